// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Upcall handlers installed on the ADC subscription.
//!
//! There is one handler per kind of result. A sample handler can only write
//! a [`SampleResult`] and the frequency handler can only write a
//! [`FrequencyResult`]. Each drops upcalls whose [`AdcMode`] belongs to the
//! other kind, so a sample still in flight after a cancel cannot complete a
//! frequency negotiation.

use core::cell::Cell;

use libtock_platform::Upcall;

use crate::command::AdcMode;
use crate::slot::{FrequencyResult, SampleResult};

/// Receiver of samples while the ADC samples continuously.
pub trait ContinuousClient {
    /// Called once per conversion with the raw reading.
    fn sample_ready(&self, reading: u32);
}

impl<F: Fn(u32)> ContinuousClient for F {
    fn sample_ready(&self, reading: u32) {
        self(reading)
    }
}

/// Handler for single and continuous sample upcalls.
///
/// Every upcall is recorded in the sample slot. When a streaming client is
/// set the reading is also forwarded to it; that is the only difference
/// between the single-sample and the continuous path.
pub struct SampleDispatcher<'a> {
    result: SampleResult,
    stream: Cell<Option<&'a dyn ContinuousClient>>,
}

impl<'a> SampleDispatcher<'a> {
    pub const fn new() -> SampleDispatcher<'a> {
        SampleDispatcher {
            result: SampleResult::new(0),
            stream: Cell::new(None),
        }
    }

    pub fn result(&self) -> &SampleResult {
        &self.result
    }

    pub fn set_stream(&self, client: &'a dyn ContinuousClient) {
        self.stream.set(Some(client));
    }

    pub fn clear_stream(&self) {
        self.stream.set(None);
    }

    pub fn is_streaming(&self) -> bool {
        self.stream.get().is_some()
    }
}

impl Upcall for SampleDispatcher<'_> {
    fn upcall(&self, mode: u32, _channel: u32, reading: u32) {
        if mode == AdcMode::ComputeFrequency as u32 {
            return;
        }
        self.result.complete(reading);
        self.stream.get().map(|client| client.sample_ready(reading));
    }
}

/// Handler for the answer to a frequency negotiation.
pub struct FrequencyCallback {
    result: FrequencyResult,
}

impl FrequencyCallback {
    pub const fn new() -> FrequencyCallback {
        FrequencyCallback {
            result: FrequencyResult::new(0),
        }
    }

    pub fn result(&self) -> &FrequencyResult {
        &self.result
    }
}

impl Upcall for FrequencyCallback {
    fn upcall(&self, mode: u32, _unused: u32, frequency: u32) {
        if mode != AdcMode::ComputeFrequency as u32 {
            return;
        }
        self.result.complete(frequency);
    }
}

#[cfg(test)]
mod tests {
    use super::{FrequencyCallback, SampleDispatcher};
    use crate::command::AdcMode;
    use core::cell::RefCell;
    use libtock_platform::Upcall;
    use std::vec::Vec;

    #[test]
    fn sample_without_stream_only_fills_slot() {
        let dispatcher = SampleDispatcher::new();
        assert!(!dispatcher.result().is_ready());
        dispatcher.upcall(0, 3, 2048);
        assert!(dispatcher.result().is_ready());
        assert_eq!(dispatcher.result().get(), 2048);
    }

    #[test]
    fn stream_receives_every_reading() {
        let seen = RefCell::new(Vec::new());
        let client = |reading: u32| seen.borrow_mut().push(reading);
        let dispatcher = SampleDispatcher::new();
        dispatcher.set_stream(&client);
        assert!(dispatcher.is_streaming());

        dispatcher.upcall(1, 0, 10);
        dispatcher.upcall(1, 0, 20);
        assert_eq!(dispatcher.result().get(), 20);

        dispatcher.clear_stream();
        assert!(!dispatcher.is_streaming());
        dispatcher.upcall(1, 0, 30);
        assert_eq!(dispatcher.result().get(), 30);
        assert_eq!(*seen.borrow(), [10, 20]);
    }

    #[test]
    fn frequency_callback_writes_its_own_slot() {
        let callback = FrequencyCallback::new();
        callback.upcall(2, 0, 1000);
        assert!(callback.result().is_ready());
        assert_eq!(callback.result().get(), 1000);
    }

    #[test]
    fn handlers_drop_the_other_kind_of_upcall() {
        let callback = FrequencyCallback::new();
        callback.upcall(AdcMode::SingleSample as u32, 0, 11);
        callback.upcall(AdcMode::ContinuousSample as u32, 0, 12);
        assert!(!callback.result().is_ready());

        let dispatcher = SampleDispatcher::new();
        dispatcher.upcall(AdcMode::ComputeFrequency as u32, 0, 1000);
        assert!(!dispatcher.result().is_ready());
    }
}
