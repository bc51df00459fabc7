// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Support for userspace debug output.
//!
//! Output is handed to [`Syscalls::write_debug`](crate::Syscalls::write_debug)
//! so that the backend decides where it ends up: the console driver on a
//! board, a line buffer under the fake kernel.
//!
//! ```ignore
//! debug!(syscalls, "sampling channel {}", channel);
//! ```

/// Write formatted debug output through a [`Syscalls`](crate::Syscalls)
/// implementation.
#[macro_export]
macro_rules! debug {
    ($syscalls:expr, $($arg:tt)+) => {
        $crate::Syscalls::write_debug($syscalls, format_args!($($arg)+))
    };
}
