// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Process side of the Tock system call interface.
//!
//! A process reaches a capsule through three calls:
//!
//! - `command`: non-blocking request to a driver, returns a signed code.
//! - `subscribe`: installs the single upcall a driver delivers its
//!   notifications to. A new subscription replaces the previous one.
//! - `yield_for`: gives the processor back to the scheduler until a condition
//!   holds. Pending upcalls run while the process is yielded, so when
//!   `yield_for` returns every upcall that fired has completed.
//!
//! Drivers should go through the free functions of this module rather than
//! the trait methods directly, as they decode return values and trace the
//! call when [`CONFIG.trace_syscalls`](crate::config::Config::trace_syscalls)
//! is set.

use core::fmt;

use crate::config;
use crate::ReturnCode;

/// Type to uniquely identify an upcall subscription across all drivers.
///
/// This contains the driver number and the subscribe number within the driver.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct UpcallId {
    pub driver_num: u32,
    pub subscribe_num: u32,
}

/// Handler for a kernel upcall.
///
/// The arguments are the three values passed to the process by the capsule
/// and are specific to the individual driver interfaces. The handler object
/// itself takes the role of the user data pointer of the C interface.
pub trait Upcall {
    fn upcall(&self, arg0: u32, arg1: u32, arg2: u32);
}

/// The system calls a userspace driver is built on.
///
/// Implemented by the architecture-specific runtime on hardware, and by the
/// fake kernel in tests.
pub trait Syscalls<'a> {
    /// Issue `command_num` to driver `driver_num`. Returns the raw value the
    /// kernel placed in the return register.
    fn command(&self, driver_num: u32, command_num: u32, arg: u32) -> i32;

    /// Make `upcall` the handler for `subscribe_num` of `driver_num`,
    /// dropping whatever handler was installed before.
    fn subscribe(&self, driver_num: u32, subscribe_num: u32, upcall: &'a dyn Upcall) -> i32;

    /// Suspend the process until `condition` returns `true`.
    ///
    /// The condition is checked before the first yield and again after every
    /// upcall. There is no timeout: if nothing ever makes the condition true,
    /// this never returns.
    fn yield_for(&self, condition: &dyn Fn() -> bool);

    /// Sink for [`debug!`](crate::debug) output. Discarded by default.
    fn write_debug(&self, _args: fmt::Arguments<'_>) {}
}

/// Issue a command and decode the kernel's answer.
pub fn command<'a, S: Syscalls<'a> + ?Sized>(
    syscalls: &S,
    driver_num: u32,
    command_num: u32,
    arg: u32,
) -> ReturnCode {
    let rval = syscalls.command(driver_num, command_num, arg);
    if config::CONFIG.trace_syscalls {
        debug!(
            syscalls,
            "command({:#x}, {}, {:#x}) = {}", driver_num, command_num, arg, rval
        );
    }
    ReturnCode::from(rval)
}

/// Install `upcall` for `subscribe_num` of `driver_num`.
pub fn subscribe<'a, S: Syscalls<'a> + ?Sized>(
    syscalls: &S,
    driver_num: u32,
    subscribe_num: u32,
    upcall: &'a dyn Upcall,
) -> ReturnCode {
    let rval = syscalls.subscribe(driver_num, subscribe_num, upcall);
    if config::CONFIG.trace_syscalls {
        debug!(
            syscalls,
            "subscribe({:#x}, {}) = {}", driver_num, subscribe_num, rval
        );
    }
    ReturnCode::from(rval)
}

/// Yield until `condition` holds.
pub fn yield_for<'a, S: Syscalls<'a> + ?Sized>(syscalls: &S, condition: &dyn Fn() -> bool) {
    if config::CONFIG.trace_syscalls {
        debug!(syscalls, "yield_for");
    }
    syscalls.yield_for(condition);
}
