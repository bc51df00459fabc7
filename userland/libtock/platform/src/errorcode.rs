// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Standard error enum for invoking operations

use crate::ReturnCode;

/// Standard errors in Tock.
///
/// In contrast to [`ReturnCode`](crate::ReturnCode) this does not
/// feature any success cases and is therefore the error type of every
/// `Result` returned by the userspace drivers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    /// Generic failure condition
    FAIL,
    /// Underlying system is busy; retry
    BUSY,
    /// The state requested is already set
    ALREADY,
    /// The component is powered down
    OFF,
    /// Reservation required before use
    RESERVE,
    /// An invalid parameter was passed
    INVAL,
    /// Parameter passed was too large
    SIZE,
    /// Operation canceled by a call
    CANCEL,
    /// Memory required not available
    NOMEM,
    /// Operation or command is unsupported
    NOSUPPORT,
    /// Device does not exist
    NODEVICE,
    /// Device is not physically installed
    UNINSTALLED,
    /// Packet transmission not acknowledged
    NOACK,
    /// Negative code outside the kernel's numbering, carried unchanged
    Unknown(i32),
}

/// The negative value the kernel returned for this error.
impl From<ErrorCode> for i32 {
    fn from(err: ErrorCode) -> i32 {
        i32::from(ReturnCode::from(err))
    }
}

impl TryFrom<ReturnCode> for ErrorCode {
    type Error = ();

    fn try_from(rc: ReturnCode) -> Result<Self, Self::Error> {
        match rc.into_result() {
            Ok(_) => Err(()),
            Err(err) => Ok(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorCode;
    use crate::ReturnCode;

    #[test]
    fn successes_are_not_errors() {
        assert_eq!(ErrorCode::try_from(ReturnCode::SUCCESS), Err(()));
        assert_eq!(
            ErrorCode::try_from(ReturnCode::SuccessWithValue { value: 3 }),
            Err(())
        );
        assert_eq!(
            ErrorCode::try_from(ReturnCode::ENOSUPPORT),
            Ok(ErrorCode::NOSUPPORT)
        );
    }

    #[test]
    fn error_converts_to_negative_code() {
        assert_eq!(i32::from(ErrorCode::FAIL), -1);
        assert_eq!(i32::from(ErrorCode::INVAL), -6);
        assert_eq!(i32::from(ErrorCode::NOACK), -13);
        assert_eq!(i32::from(ErrorCode::Unknown(-20)), -20);
    }
}
