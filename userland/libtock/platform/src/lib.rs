// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Platform layer for Tock userspace drivers.
//!
//! Holds what every driver library needs regardless of the peripheral it
//! wraps: the [`Syscalls`] trait the drivers are generic over, the
//! [`Upcall`] handler trait, the kernel's return and error codes, and the
//! compile-time configuration.

#![no_std]

// This is used to run the tests on a host
#[cfg(test)]
#[macro_use]
extern crate std;

#[macro_use]
pub mod debug;
pub mod config;
pub mod syscall;

mod errorcode;
mod returncode;

pub use errorcode::ErrorCode;
pub use returncode::ReturnCode;
pub use syscall::{Syscalls, Upcall, UpcallId};
