// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Userspace library for the ADC syscall driver.
//!
//! The capsule is asynchronous: every command completes later through an
//! upcall. This library offers it to applications as blocking calls
//! ([`Adc::read_single_sample`], [`Adc::nearest_sampling_freq`]) built on
//! `yield_for`, and as a stream of samples delivered to a
//! [`ContinuousClient`] ([`Adc::read_cont_sample`]).

#![no_std]

// This is used to run the tests on a host
#[cfg(test)]
#[macro_use]
extern crate std;

pub mod adc;
pub mod command;
pub mod dispatch;
pub mod slot;


pub use crate::adc::{Adc, Request};
pub use crate::command::{AdcMode, Command, DRIVER_NUM, MAX_CONTINUOUS_FREQUENCY};
pub use crate::dispatch::ContinuousClient;
