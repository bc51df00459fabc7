// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Numbers and argument encodings of the ADC syscall driver.

use tock_registers::{register_bitfields, LocalRegisterCopy};

/// Driver number of the ADC capsule.
pub const DRIVER_NUM: u32 = 0x7;

/// The ADC delivers all of its notifications through one subscription.
pub const SUBSCRIBE_NUM: u32 = 0;

/// Highest frequency, in Hz, that fits in the continuous sampling argument.
pub const MAX_CONTINUOUS_FREQUENCY: u32 = (1 << 24) - 1;

/// Commands understood by the ADC capsule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum Command {
    /// Check whether the driver is present.
    Exists = 0,
    Initialize = 1,
    SingleSample = 2,
    /// Argument is packed with [`pack_continuous_arg`].
    ContinuousSample = 3,
    CancelSampling = 4,
    ComputeFrequency = 5,
}

/// First argument of every ADC upcall, naming the operation that completed.
///
/// Only one ADC request is outstanding at a time, but a sample queued before
/// a cancel can still arrive afterwards. Handlers check the mode and ignore
/// upcalls meant for the other kind of request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum AdcMode {
    SingleSample = 0,
    ContinuousSample = 1,
    ComputeFrequency = 2,
}

register_bitfields![u32,
    /// Argument of the continuous sampling command.
    ///
    /// `command` only carries one 32-bit argument, so the channel and the
    /// frequency share it.
    pub ContinuousArg [
        /// Channel to sample
        CHANNEL OFFSET(0) NUMBITS(8) [],

        /// Sampling frequency in Hz
        FREQUENCY OFFSET(8) NUMBITS(24) []
    ]
];

/// Typed copy of a continuous sampling argument.
pub type ContinuousArgVal = LocalRegisterCopy<u32, ContinuousArg::Register>;

/// Pack `channel` and `frequency` into the continuous sampling argument.
///
/// Only the lower 24 bits of `frequency` are kept.
pub fn pack_continuous_arg(channel: u8, frequency: u32) -> u32 {
    let mut arg = ContinuousArgVal::new(0);
    arg.write(ContinuousArg::FREQUENCY.val(frequency) + ContinuousArg::CHANNEL.val(channel as u32));
    arg.get()
}

/// Split a continuous sampling argument back into `(channel, frequency)`.
pub fn unpack_continuous_arg(arg: u32) -> (u8, u32) {
    let arg = ContinuousArgVal::new(arg);
    (
        arg.read(ContinuousArg::CHANNEL) as u8,
        arg.read(ContinuousArg::FREQUENCY),
    )
}

#[cfg(test)]
mod tests {
    use super::{pack_continuous_arg, unpack_continuous_arg, MAX_CONTINUOUS_FREQUENCY};

    #[test]
    fn frequency_in_high_bits_channel_in_low_byte() {
        assert_eq!(pack_continuous_arg(0x03, 1000), (1000 << 8) | 0x03);
        assert_eq!(pack_continuous_arg(0xff, 0), 0x0000_00ff);
        assert_eq!(pack_continuous_arg(0, MAX_CONTINUOUS_FREQUENCY), 0xffff_ff00);
    }

    #[test]
    fn unpack_recovers_channel_and_frequency() {
        let channels = [0u8, 1, 7, 14, 128, 255];
        let frequencies = [0u32, 1, 1000, 33_000, 0x00ab_cdef, MAX_CONTINUOUS_FREQUENCY];
        for &channel in channels.iter() {
            for &frequency in frequencies.iter() {
                assert_eq!(
                    unpack_continuous_arg(pack_continuous_arg(channel, frequency)),
                    (channel, frequency)
                );
            }
        }
    }

    #[test]
    fn frequency_above_24_bits_is_truncated() {
        let (channel, frequency) = unpack_continuous_arg(pack_continuous_arg(2, 0x0100_0001));
        assert_eq!(channel, 2);
        assert_eq!(frequency, 1);
    }
}
