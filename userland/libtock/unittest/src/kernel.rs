// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! A fake kernel that runs userspace drivers on the host.
//!
//! Commands are answered by registered [`FakeDriver`]s. Upcalls they schedule
//! are queued and only delivered while the process yields, in order, to the
//! handler subscribed at delivery time, as the real scheduler does.

use std::cell::{Cell, RefCell};
use std::fmt;

use libtock_platform::{ErrorCode, ReturnCode, Syscalls, Upcall, UpcallId};

use crate::driver::{FakeDriver, UpcallQueue};

/// One system call made by the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyscallRecord {
    Command {
        driver_num: u32,
        command_num: u32,
        arg: u32,
    },
    Subscribe {
        driver_num: u32,
        subscribe_num: u32,
    },
    YieldFor,
}

pub struct FakeKernel<'a> {
    drivers: RefCell<Vec<&'a dyn FakeDriver>>,
    subscriptions: RefCell<Vec<(UpcallId, &'a dyn Upcall)>>,
    upcalls: UpcallQueue,
    subscribe_failure: Cell<Option<ErrorCode>>,
    yield_count: Cell<usize>,
    syscall_log: RefCell<Vec<SyscallRecord>>,
    debug_output: RefCell<Vec<String>>,
}

impl<'a> FakeKernel<'a> {
    pub fn new() -> FakeKernel<'a> {
        FakeKernel {
            drivers: RefCell::new(Vec::new()),
            subscriptions: RefCell::new(Vec::new()),
            upcalls: UpcallQueue::new(),
            subscribe_failure: Cell::new(None),
            yield_count: Cell::new(0),
            syscall_log: RefCell::new(Vec::new()),
            debug_output: RefCell::new(Vec::new()),
        }
    }

    pub fn add_driver(&self, driver: &'a dyn FakeDriver) {
        self.drivers.borrow_mut().push(driver);
    }

    pub fn upcalls(&self) -> &UpcallQueue {
        &self.upcalls
    }

    /// Make every following subscribe fail with `err`, or succeed again with
    /// `None`.
    pub fn fail_subscribe(&self, err: Option<ErrorCode>) {
        self.subscribe_failure.set(err);
    }

    /// Number of `yield_for` calls made by the process.
    pub fn yield_count(&self) -> usize {
        self.yield_count.get()
    }

    pub fn take_syscall_log(&self) -> Vec<SyscallRecord> {
        self.syscall_log.replace(Vec::new())
    }

    pub fn debug_output(&self) -> Vec<String> {
        self.debug_output.borrow().clone()
    }

    /// Deliver every queued upcall, as if the process sat in its main loop
    /// yield. Returns the number delivered.
    pub fn deliver_pending(&self) -> usize {
        let mut delivered = 0;
        while self.deliver_one() {
            delivered += 1;
        }
        delivered
    }

    /// Run the oldest queued upcall. Upcalls for a driver the process never
    /// subscribed to are dropped. Returns `false` if the queue was empty.
    fn deliver_one(&self) -> bool {
        let upcall = match self.upcalls.pop() {
            Some(upcall) => upcall,
            None => return false,
        };
        // No borrow may be held while the handler runs, it can make syscalls.
        let handler = self
            .subscriptions
            .borrow()
            .iter()
            .find(|(id, _)| *id == upcall.id)
            .map(|(_, handler)| *handler);
        if let Some(handler) = handler {
            handler.upcall(upcall.arg0, upcall.arg1, upcall.arg2);
        }
        true
    }

    fn driver(&self, driver_num: u32) -> Option<&'a dyn FakeDriver> {
        self.drivers
            .borrow()
            .iter()
            .find(|driver| driver.driver_num() == driver_num)
            .copied()
    }
}

impl<'a> Syscalls<'a> for FakeKernel<'a> {
    fn command(&self, driver_num: u32, command_num: u32, arg: u32) -> i32 {
        self.syscall_log.borrow_mut().push(SyscallRecord::Command {
            driver_num,
            command_num,
            arg,
        });
        let rcode = match self.driver(driver_num) {
            Some(driver) => driver.command(command_num, arg, &self.upcalls),
            None => ReturnCode::ENODEVICE,
        };
        i32::from(rcode)
    }

    fn subscribe(&self, driver_num: u32, subscribe_num: u32, upcall: &'a dyn Upcall) -> i32 {
        self.syscall_log.borrow_mut().push(SyscallRecord::Subscribe {
            driver_num,
            subscribe_num,
        });
        if let Some(err) = self.subscribe_failure.get() {
            return i32::from(err);
        }
        if self.driver(driver_num).is_none() {
            return i32::from(ReturnCode::ENODEVICE);
        }

        let id = UpcallId {
            driver_num,
            subscribe_num,
        };
        let mut subscriptions = self.subscriptions.borrow_mut();
        subscriptions.retain(|(existing, _)| *existing != id);
        subscriptions.push((id, upcall));
        i32::from(ReturnCode::SUCCESS)
    }

    fn yield_for(&self, condition: &dyn Fn() -> bool) {
        self.syscall_log.borrow_mut().push(SyscallRecord::YieldFor);
        self.yield_count.set(self.yield_count.get() + 1);
        while !condition() {
            if !self.deliver_one() {
                panic!("yield_for: no upcall pending, the process would sleep forever");
            }
        }
    }

    fn write_debug(&self, args: fmt::Arguments<'_>) {
        self.debug_output.borrow_mut().push(args.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::{FakeKernel, SyscallRecord};
    use crate::driver::{FakeDriver, UpcallQueue};
    use libtock_platform::{ErrorCode, ReturnCode, Syscalls, Upcall, UpcallId};
    use std::cell::RefCell;

    const ECHO: u32 = 0x99;

    /// Schedules one upcall echoing the command's argument.
    struct Echo;

    impl FakeDriver for Echo {
        fn driver_num(&self) -> u32 {
            ECHO
        }

        fn command(&self, command_num: u32, arg: u32, upcalls: &UpcallQueue) -> ReturnCode {
            let id = UpcallId {
                driver_num: ECHO,
                subscribe_num: 0,
            };
            upcalls.schedule(id, command_num, 0, arg);
            ReturnCode::SUCCESS
        }
    }

    struct Record(RefCell<Vec<u32>>);

    impl Upcall for Record {
        fn upcall(&self, _arg0: u32, _arg1: u32, arg2: u32) {
            self.0.borrow_mut().push(arg2);
        }
    }

    #[test]
    fn unknown_driver_is_nodevice() {
        let record = Record(RefCell::new(Vec::new()));
        let kernel = FakeKernel::new();
        assert_eq!(kernel.command(3, 0, 0), -11);
        assert_eq!(kernel.subscribe(3, 0, &record), -11);
    }

    #[test]
    fn upcalls_wait_for_yield() {
        let echo = Echo;
        let record = Record(RefCell::new(Vec::new()));
        let kernel = FakeKernel::new();
        kernel.add_driver(&echo);

        assert_eq!(kernel.subscribe(ECHO, 0, &record), 0);
        assert_eq!(kernel.command(ECHO, 1, 5), 0);
        assert_eq!(kernel.command(ECHO, 1, 6), 0);
        assert!(record.0.borrow().is_empty());

        kernel.yield_for(&|| record.0.borrow().len() == 1);
        assert_eq!(*record.0.borrow(), [5]);
        assert_eq!(kernel.deliver_pending(), 1);
        assert_eq!(*record.0.borrow(), [5, 6]);
        assert_eq!(kernel.yield_count(), 1);
    }

    #[test]
    fn subscribe_replaces_handler_and_can_fail() {
        let echo = Echo;
        let first = Record(RefCell::new(Vec::new()));
        let second = Record(RefCell::new(Vec::new()));
        let kernel = FakeKernel::new();
        kernel.add_driver(&echo);

        assert_eq!(kernel.subscribe(ECHO, 0, &first), 0);
        assert_eq!(kernel.subscribe(ECHO, 0, &second), 0);
        kernel.command(ECHO, 1, 9);
        kernel.deliver_pending();
        assert!(first.0.borrow().is_empty());
        assert_eq!(*second.0.borrow(), [9]);

        kernel.fail_subscribe(Some(ErrorCode::NOMEM));
        assert_eq!(kernel.subscribe(ECHO, 0, &first), -9);
        assert_eq!(
            kernel.take_syscall_log(),
            [
                SyscallRecord::Subscribe {
                    driver_num: ECHO,
                    subscribe_num: 0
                },
                SyscallRecord::Subscribe {
                    driver_num: ECHO,
                    subscribe_num: 0
                },
                SyscallRecord::Command {
                    driver_num: ECHO,
                    command_num: 1,
                    arg: 9
                },
                SyscallRecord::Subscribe {
                    driver_num: ECHO,
                    subscribe_num: 0
                },
            ]
        );
    }

    #[test]
    #[should_panic(expected = "sleep forever")]
    fn yield_without_upcall_panics() {
        let kernel = FakeKernel::new();
        kernel.yield_for(&|| false);
    }
}
