// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Kernel-side model of a syscall driver.

use std::cell::RefCell;
use std::collections::VecDeque;

use libtock_platform::{ReturnCode, UpcallId};

/// An upcall scheduled by a fake driver and not yet delivered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingUpcall {
    pub id: UpcallId,
    pub arg0: u32,
    pub arg1: u32,
    pub arg2: u32,
}

/// FIFO of upcalls waiting for the process to yield.
pub struct UpcallQueue {
    pending: RefCell<VecDeque<PendingUpcall>>,
}

impl UpcallQueue {
    pub fn new() -> UpcallQueue {
        UpcallQueue {
            pending: RefCell::new(VecDeque::new()),
        }
    }

    /// Queue an upcall. It runs the next time the process yields.
    pub fn schedule(&self, id: UpcallId, arg0: u32, arg1: u32, arg2: u32) {
        self.pending.borrow_mut().push_back(PendingUpcall {
            id,
            arg0,
            arg1,
            arg2,
        });
    }

    pub fn pop(&self) -> Option<PendingUpcall> {
        self.pending.borrow_mut().pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }
}

/// A capsule as seen from the process: it answers commands and may schedule
/// upcalls in response.
pub trait FakeDriver {
    fn driver_num(&self) -> u32;

    fn command(&self, command_num: u32, arg: u32, upcalls: &UpcallQueue) -> ReturnCode;
}
