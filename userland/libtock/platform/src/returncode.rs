// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Standard return type of the `command` and `subscribe` system calls,
//! returning success or an error code.

use crate::ErrorCode;

/// Decoded form of the signed value the kernel places in the return register.
///
/// Non-negative values are successes, negative values map onto the kernel's
/// error numbering. A negative value outside that numbering is kept as is in
/// `ErrorWithValue`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReturnCode {
    SuccessWithValue { value: u32 }, // Success value must be positive
    SUCCESS,
    FAIL,         // Generic failure condition
    EBUSY,        // Underlying system is busy; retry
    EALREADY,     // The state requested is already set
    EOFF,         // The component is powered down
    ERESERVE,     // Reservation required before use
    EINVAL,       // An invalid parameter was passed
    ESIZE,        // Parameter passed was too large
    ECANCEL,      // Operation canceled by a call
    ENOMEM,       // Memory required not available
    ENOSUPPORT,   // Operation or command is unsupported
    ENODEVICE,    // Device does not exist
    EUNINSTALLED, // Device is not physically installed
    ENOACK,       // Packet transmission not acknowledged
    ErrorWithValue { value: i32 }, // Negative code the kernel does not define
}

impl ReturnCode {
    /// Split the return code into the success payload and the error.
    ///
    /// `SUCCESS` carries a payload of zero.
    pub fn into_result(self) -> Result<u32, ErrorCode> {
        match self {
            ReturnCode::SuccessWithValue { value } => Ok(value),
            ReturnCode::SUCCESS => Ok(0),
            ReturnCode::FAIL => Err(ErrorCode::FAIL),
            ReturnCode::EBUSY => Err(ErrorCode::BUSY),
            ReturnCode::EALREADY => Err(ErrorCode::ALREADY),
            ReturnCode::EOFF => Err(ErrorCode::OFF),
            ReturnCode::ERESERVE => Err(ErrorCode::RESERVE),
            ReturnCode::EINVAL => Err(ErrorCode::INVAL),
            ReturnCode::ESIZE => Err(ErrorCode::SIZE),
            ReturnCode::ECANCEL => Err(ErrorCode::CANCEL),
            ReturnCode::ENOMEM => Err(ErrorCode::NOMEM),
            ReturnCode::ENOSUPPORT => Err(ErrorCode::NOSUPPORT),
            ReturnCode::ENODEVICE => Err(ErrorCode::NODEVICE),
            ReturnCode::EUNINSTALLED => Err(ErrorCode::UNINSTALLED),
            ReturnCode::ENOACK => Err(ErrorCode::NOACK),
            ReturnCode::ErrorWithValue { value } => Err(ErrorCode::Unknown(value)),
        }
    }
}

impl From<i32> for ReturnCode {
    fn from(raw: i32) -> ReturnCode {
        match raw {
            0 => ReturnCode::SUCCESS,
            -1 => ReturnCode::FAIL,
            -2 => ReturnCode::EBUSY,
            -3 => ReturnCode::EALREADY,
            -4 => ReturnCode::EOFF,
            -5 => ReturnCode::ERESERVE,
            -6 => ReturnCode::EINVAL,
            -7 => ReturnCode::ESIZE,
            -8 => ReturnCode::ECANCEL,
            -9 => ReturnCode::ENOMEM,
            -10 => ReturnCode::ENOSUPPORT,
            -11 => ReturnCode::ENODEVICE,
            -12 => ReturnCode::EUNINSTALLED,
            -13 => ReturnCode::ENOACK,
            value if value > 0 => ReturnCode::SuccessWithValue {
                value: value as u32,
            },
            value => ReturnCode::ErrorWithValue { value },
        }
    }
}

impl From<ReturnCode> for i32 {
    fn from(rc: ReturnCode) -> i32 {
        match rc {
            ReturnCode::SuccessWithValue { value } => value as i32,
            ReturnCode::SUCCESS => 0,
            ReturnCode::FAIL => -1,
            ReturnCode::EBUSY => -2,
            ReturnCode::EALREADY => -3,
            ReturnCode::EOFF => -4,
            ReturnCode::ERESERVE => -5,
            ReturnCode::EINVAL => -6,
            ReturnCode::ESIZE => -7,
            ReturnCode::ECANCEL => -8,
            ReturnCode::ENOMEM => -9,
            ReturnCode::ENOSUPPORT => -10,
            ReturnCode::ENODEVICE => -11,
            ReturnCode::EUNINSTALLED => -12,
            ReturnCode::ENOACK => -13,
            ReturnCode::ErrorWithValue { value } => value,
        }
    }
}

impl From<ErrorCode> for ReturnCode {
    fn from(err: ErrorCode) -> ReturnCode {
        match err {
            ErrorCode::FAIL => ReturnCode::FAIL,
            ErrorCode::BUSY => ReturnCode::EBUSY,
            ErrorCode::ALREADY => ReturnCode::EALREADY,
            ErrorCode::OFF => ReturnCode::EOFF,
            ErrorCode::RESERVE => ReturnCode::ERESERVE,
            ErrorCode::INVAL => ReturnCode::EINVAL,
            ErrorCode::SIZE => ReturnCode::ESIZE,
            ErrorCode::CANCEL => ReturnCode::ECANCEL,
            ErrorCode::NOMEM => ReturnCode::ENOMEM,
            ErrorCode::NOSUPPORT => ReturnCode::ENOSUPPORT,
            ErrorCode::NODEVICE => ReturnCode::ENODEVICE,
            ErrorCode::UNINSTALLED => ReturnCode::EUNINSTALLED,
            ErrorCode::NOACK => ReturnCode::ENOACK,
            ErrorCode::Unknown(value) => ReturnCode::ErrorWithValue { value },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ReturnCode;
    use crate::ErrorCode;

    #[test]
    fn raw_values_follow_kernel_numbering() {
        assert_eq!(ReturnCode::from(0), ReturnCode::SUCCESS);
        assert_eq!(ReturnCode::from(-6), ReturnCode::EINVAL);
        assert_eq!(ReturnCode::from(-13), ReturnCode::ENOACK);
        assert_eq!(
            ReturnCode::from(42),
            ReturnCode::SuccessWithValue { value: 42 }
        );
        assert_eq!(i32::from(ReturnCode::ENODEVICE), -11);
        assert_eq!(i32::from(ReturnCode::SuccessWithValue { value: 7 }), 7);
    }

    #[test]
    fn undefined_negative_value_is_kept() {
        assert_eq!(
            ReturnCode::from(-99),
            ReturnCode::ErrorWithValue { value: -99 }
        );
        for raw in [-14, -20, -99, i32::MIN] {
            let err = ReturnCode::from(raw).into_result().unwrap_err();
            assert_eq!(err, ErrorCode::Unknown(raw));
            assert_eq!(i32::from(err), raw);
        }
    }

    #[test]
    fn into_result_splits_payload_and_error() {
        assert_eq!(ReturnCode::SUCCESS.into_result(), Ok(0));
        assert_eq!(
            ReturnCode::SuccessWithValue { value: 1000 }.into_result(),
            Ok(1000)
        );
        assert_eq!(ReturnCode::EBUSY.into_result(), Err(ErrorCode::BUSY));
        for raw in -13..0 {
            let err = ReturnCode::from(raw).into_result().unwrap_err();
            assert_eq!(i32::from(err), raw);
        }
    }
}
