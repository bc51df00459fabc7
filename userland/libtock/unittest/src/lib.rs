// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Host-side test support for userspace drivers.
//!
//! [`FakeKernel`] implements [`libtock_platform::Syscalls`] so a driver can be
//! exercised without hardware. Capsules are modelled by [`FakeDriver`]
//! implementations; [`FakeAdc`] models the ADC capsule.

pub mod adc;
pub mod driver;
pub mod kernel;

pub use crate::adc::FakeAdc;
pub use crate::driver::{FakeDriver, PendingUpcall, UpcallQueue};
pub use crate::kernel::{FakeKernel, SyscallRecord};
