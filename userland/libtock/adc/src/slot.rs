// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Completion slot shared between an upcall handler and a blocked caller.

use core::cell::Cell;

/// Result of the most recent request of one kind, plus a completion flag.
///
/// The upcall handler is the only writer and the caller blocked in
/// `yield_for` the only reader. Both run on the single process thread, and
/// the handler completes before `yield_for` returns, so the value and the flag
/// are always observed together.
pub struct ResultSlot<T: Copy> {
    value: Cell<T>,
    ready: Cell<bool>,
}

impl<T: Copy> ResultSlot<T> {
    pub const fn new(initial: T) -> ResultSlot<T> {
        ResultSlot {
            value: Cell::new(initial),
            ready: Cell::new(false),
        }
    }

    /// Mark the slot as pending a new result. The stale value is kept.
    pub fn reset(&self) {
        self.ready.set(false);
    }

    pub fn complete(&self, value: T) {
        self.value.set(value);
        self.ready.set(true);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.get()
    }

    /// The last value written, whether or not the slot was reset since.
    pub fn get(&self) -> T {
        self.value.get()
    }
}

/// Raw reading of the last conversion, and whether it fired.
pub type SampleResult = ResultSlot<u32>;

/// Frequency resolved by the last negotiation, and whether it was computed.
pub type FrequencyResult = ResultSlot<u32>;
