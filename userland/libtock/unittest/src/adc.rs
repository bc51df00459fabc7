// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Fake ADC capsule.
//!
//! Answers the ADC driver's commands the way the kernel capsule does on a
//! SAM4L: single samples come from a queue of scripted readings, continuous
//! samples are pushed by the test with [`FakeAdc::stream_sample`], and
//! frequencies are resolved against the ADC's internal timer.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use libtock_platform::{ErrorCode, ReturnCode, UpcallId};

use crate::driver::{FakeDriver, UpcallQueue};

pub const DRIVER_NUM: u32 = 0x7;

const UPCALL: UpcallId = UpcallId {
    driver_num: DRIVER_NUM,
    subscribe_num: 0,
};

/// First argument of the capsule's upcalls.
#[derive(Clone, Copy)]
enum AdcMode {
    SingleSample = 0,
    ContinuousSample = 1,
    ComputeFrequency = 2,
}

pub struct FakeAdc {
    channels: u8,
    /// Frequency of the clock feeding the internal timer.
    timer_clock: u32,
    /// Highest continuous sampling frequency the ADC supports.
    max_frequency: u32,
    initialized: Cell<bool>,
    readings: RefCell<VecDeque<u32>>,
    streaming: Cell<Option<(u8, u32)>>,
    failures: RefCell<Vec<(u32, ErrorCode)>>,
}

impl FakeAdc {
    /// An ADC with 15 channels, a 31.25 kHz timer clock and a 1 kHz ceiling.
    pub fn new() -> FakeAdc {
        FakeAdc::with_config(15, 31_250, 1000)
    }

    pub fn with_config(channels: u8, timer_clock: u32, max_frequency: u32) -> FakeAdc {
        FakeAdc {
            channels,
            timer_clock,
            max_frequency,
            initialized: Cell::new(false),
            readings: RefCell::new(VecDeque::new()),
            streaming: Cell::new(None),
            failures: RefCell::new(Vec::new()),
        }
    }

    /// Result of the next single-sample conversion. With no reading queued a
    /// single sample is accepted but never completes.
    pub fn queue_reading(&self, reading: u32) {
        self.readings.borrow_mut().push_back(reading);
    }

    /// Make `command_num` fail with `err` until [`FakeAdc::clear_failures`].
    pub fn fail_command(&self, command_num: u32, err: ErrorCode) {
        self.failures.borrow_mut().push((command_num, err));
    }

    pub fn clear_failures(&self) {
        self.failures.borrow_mut().clear();
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.get()
    }

    /// Channel and resolved frequency of the running continuous sampling.
    pub fn streaming(&self) -> Option<(u8, u32)> {
        self.streaming.get()
    }

    /// Complete one continuous conversion. Does nothing unless sampling.
    pub fn stream_sample(&self, upcalls: &UpcallQueue, reading: u32) -> bool {
        match self.streaming.get() {
            Some((channel, _)) => {
                upcalls.schedule(
                    UPCALL,
                    AdcMode::ContinuousSample as u32,
                    channel as u32,
                    reading,
                );
                true
            }
            None => false,
        }
    }

    /// Closest frequency to `frequency` the internal timer can generate.
    ///
    /// The timer fires every `itmc + 1` clock ticks, with
    /// `itmc = clock / frequency - 1`.
    pub fn nearest_frequency(&self, frequency: u32) -> u32 {
        if frequency == 0 {
            return 1; // Minimum possible frequency
        }
        if frequency > self.max_frequency {
            return self.max_frequency;
        }
        let ticks = (self.timer_clock / frequency).max(1);
        self.timer_clock / ticks
    }

    fn injected_failure(&self, command_num: u32) -> Option<ErrorCode> {
        self.failures
            .borrow()
            .iter()
            .find(|(num, _)| *num == command_num)
            .map(|(_, err)| *err)
    }
}

impl FakeDriver for FakeAdc {
    fn driver_num(&self) -> u32 {
        DRIVER_NUM
    }

    fn command(&self, command_num: u32, data: u32, upcalls: &UpcallQueue) -> ReturnCode {
        if let Some(err) = self.injected_failure(command_num) {
            return ReturnCode::from(err);
        }

        match command_num {
            // Check if present, returns the number of channels
            0 => ReturnCode::SuccessWithValue {
                value: self.channels as u32,
            },

            // Initialize ADC
            1 => {
                self.initialized.set(true);
                ReturnCode::SUCCESS
            }

            // Single sample on channel
            2 => {
                let channel = data as u8;
                if data >= self.channels as u32 {
                    return ReturnCode::EINVAL;
                }
                if let Some(reading) = self.readings.borrow_mut().pop_front() {
                    upcalls.schedule(
                        UPCALL,
                        AdcMode::SingleSample as u32,
                        channel as u32,
                        reading,
                    );
                }
                ReturnCode::SUCCESS
            }

            // Continuous sampling, frequency in the upper 24 bits
            3 => {
                let channel = (data & 0xff) as u8;
                let frequency = data >> 8;
                if channel >= self.channels {
                    return ReturnCode::EINVAL;
                }
                self.streaming
                    .set(Some((channel, self.nearest_frequency(frequency))));
                ReturnCode::SUCCESS
            }

            // Cancel sampling
            4 => {
                self.streaming.set(None);
                ReturnCode::SUCCESS
            }

            // Nearest achievable frequency
            5 => {
                upcalls.schedule(
                    UPCALL,
                    AdcMode::ComputeFrequency as u32,
                    0,
                    self.nearest_frequency(data),
                );
                ReturnCode::SUCCESS
            }

            // default
            _ => ReturnCode::ENOSUPPORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FakeAdc;
    use crate::driver::{FakeDriver, UpcallQueue};
    use libtock_platform::{ErrorCode, ReturnCode};

    #[test]
    fn frequency_resolution_matches_timer() {
        let adc = FakeAdc::new();
        assert_eq!(adc.nearest_frequency(0), 1);
        assert_eq!(adc.nearest_frequency(5000), 1000);
        assert_eq!(adc.nearest_frequency(1000), 1008);
        assert_eq!(adc.nearest_frequency(300), 300);
        assert_eq!(adc.nearest_frequency(1), 1);
    }

    #[test]
    fn rejects_out_of_range_channel() {
        let adc = FakeAdc::with_config(4, 31_250, 1000);
        let upcalls = UpcallQueue::new();
        adc.queue_reading(1);
        assert_eq!(adc.command(2, 4, &upcalls), ReturnCode::EINVAL);
        assert_eq!(adc.command(3, (100 << 8) | 4, &upcalls), ReturnCode::EINVAL);
        assert_eq!(upcalls.len(), 0);
        assert_eq!(adc.command(2, 3, &upcalls), ReturnCode::SUCCESS);
        assert_eq!(upcalls.len(), 1);
    }

    #[test]
    fn streaming_follows_start_and_cancel() {
        let adc = FakeAdc::new();
        let upcalls = UpcallQueue::new();
        assert!(!adc.stream_sample(&upcalls, 1));

        assert_eq!(adc.command(3, (300 << 8) | 2, &upcalls), ReturnCode::SUCCESS);
        assert_eq!(adc.streaming(), Some((2, 300)));
        assert!(adc.stream_sample(&upcalls, 1));

        assert_eq!(adc.command(4, 0, &upcalls), ReturnCode::SUCCESS);
        assert!(!adc.stream_sample(&upcalls, 2));
        assert_eq!(upcalls.len(), 1);
    }

    #[test]
    fn injected_failures_until_cleared() {
        let adc = FakeAdc::new();
        let upcalls = UpcallQueue::new();
        adc.fail_command(1, ErrorCode::OFF);
        assert_eq!(adc.command(1, 0, &upcalls), ReturnCode::EOFF);
        assert!(!adc.is_initialized());
        adc.clear_failures();
        assert_eq!(adc.command(1, 0, &upcalls), ReturnCode::SUCCESS);
        assert!(adc.is_initialized());
        assert_eq!(adc.command(9, 0, &upcalls), ReturnCode::ENOSUPPORT);
    }
}
