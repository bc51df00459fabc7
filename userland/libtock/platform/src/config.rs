// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Compile-time configuration options for userspace drivers.
//!
//! Options live in a typed `const` object rather than being spread over
//! `#[cfg(feature = ...)]` attributes. Every code path stays type-checked,
//! and the compiler folds the disabled branches away.

/// Data structure holding compile-time configuration options.
///
/// To change the configuration, enable the matching Cargo feature of the
/// `libtock-platform` crate from the application's Cargo.toml.
pub struct Config {
    /// Whether syscalls issued through [`crate::syscall`] should be traced to
    /// the debug output.
    ///
    /// If enabled, one line is written through
    /// [`Syscalls::write_debug`](crate::Syscalls::write_debug) for every
    /// command, subscribe and yield, including the driver number, arguments
    /// and the value returned by the kernel.
    pub trace_syscalls: bool,
}

/// The unique instance of `Config`. This is the only location in the
/// userspace libraries where a Cargo feature is permitted to configure code.
pub const CONFIG: Config = Config {
    trace_syscalls: cfg!(feature = "trace_syscalls"),
};
