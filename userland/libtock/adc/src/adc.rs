// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Userspace driver for the ADC capsule.
//!
//! The capsule answers every request through a single subscription, and only
//! one request can be outstanding. [`Adc`] owns that subscription and tracks
//! which request currently holds it in a [`Request`] state, so that a
//! single-sample read, a stream of samples and a frequency negotiation never
//! share a result slot.
//!
//! Usage
//! -----
//!
//! ```ignore
//! let adc = Adc::new(&syscalls);
//! adc.initialize()?;
//! let reading = adc.read_single_sample(1)?;
//!
//! let rate = adc.nearest_sampling_freq(1000)?;
//! adc.read_cont_sample(1, rate, &|reading| { /* ... */ })?;
//! // ...
//! adc.cancel_sampling()?;
//! ```

use core::cell::Cell;

use libtock_platform::syscall;
use libtock_platform::{ErrorCode, Syscalls, Upcall};

use crate::command::{pack_continuous_arg, Command, DRIVER_NUM, SUBSCRIBE_NUM};
use crate::dispatch::{ContinuousClient, FrequencyCallback, SampleDispatcher};

/// Which request currently owns the ADC subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    Idle,
    /// A blocking single-sample read is yielded waiting for its upcall.
    AwaitingSample,
    /// A blocking frequency negotiation is yielded waiting for its upcall.
    AwaitingFrequency,
    /// Samples are forwarded to the client held by the sample dispatcher.
    Streaming,
}

/// Userspace driver for the ADC capsule, generic over the syscall backend.
pub struct Adc<'a, S: Syscalls<'a>> {
    syscalls: &'a S,
    request: Cell<Request>,
    sample: SampleDispatcher<'a>,
    frequency: FrequencyCallback,
}

impl<'a, S: Syscalls<'a>> Adc<'a, S> {
    pub fn new(syscalls: &'a S) -> Adc<'a, S> {
        Adc {
            syscalls,
            request: Cell::new(Request::Idle),
            sample: SampleDispatcher::new(),
            frequency: FrequencyCallback::new(),
        }
    }

    pub fn request(&self) -> Request {
        self.request.get()
    }

    /// Whether the last sample upcall has fired since the slot was reset.
    pub fn sample_fired(&self) -> bool {
        self.sample.result().is_ready()
    }

    /// Whether the last frequency negotiation has been answered.
    pub fn frequency_computed(&self) -> bool {
        self.frequency.result().is_ready()
    }

    // Raw interface. These only issue the syscall; sequencing requests is the
    // caller's job.

    /// Install `handler` as the only target of ADC upcalls, replacing any
    /// previous handler.
    pub fn set_callback(&self, handler: &'a dyn Upcall) -> Result<(), ErrorCode> {
        syscall::subscribe(self.syscalls, DRIVER_NUM, SUBSCRIBE_NUM, handler)
            .into_result()
            .map(|_| ())
    }

    pub fn exists(&self) -> bool {
        self.command(Command::Exists, 0).is_ok()
    }

    pub fn initialize(&self) -> Result<(), ErrorCode> {
        self.command(Command::Initialize, 0).map(|_| ())
    }

    /// Request one conversion on `channel`. The reading arrives in an upcall.
    pub fn single_sample(&self, channel: u8) -> Result<(), ErrorCode> {
        self.command(Command::SingleSample, channel as u32).map(|_| ())
    }

    /// Request conversions on `channel` every `1/frequency` seconds until
    /// cancelled. Only the lower 24 bits of `frequency` are used.
    pub fn continuous_sample(&self, channel: u8, frequency: u32) -> Result<(), ErrorCode> {
        self.command(
            Command::ContinuousSample,
            pack_continuous_arg(channel, frequency),
        )
        .map(|_| ())
    }

    /// Ask the capsule for the frequency closest to `frequency` it can
    /// generate. The answer arrives in an upcall.
    pub fn compute_frequency(&self, frequency: u32) -> Result<(), ErrorCode> {
        self.command(Command::ComputeFrequency, frequency).map(|_| ())
    }

    /// Stop continuous sampling.
    ///
    /// The streaming client is released on success. The kernel gives no
    /// acknowledgement that conversions have stopped, so one more sample may
    /// still be delivered; it is recorded but not forwarded.
    pub fn cancel_sampling(&self) -> Result<(), ErrorCode> {
        self.command(Command::CancelSampling, 0)?;
        if self.request.get() == Request::Streaming {
            self.sample.clear_stream();
            self.request.set(Request::Idle);
        }
        Ok(())
    }

    // Synchronous and streaming interface.

    /// Take one sample on `channel` and block until it is available.
    ///
    /// Stops forwarding to a streaming client first. Errors from the
    /// subscription or the command are returned without yielding.
    ///
    /// If the capsule accepts the request but never delivers the upcall, this
    /// call never returns.
    pub fn read_single_sample(&'a self, channel: u8) -> Result<u32, ErrorCode> {
        self.claim()?;
        self.sample.result().reset();
        self.set_callback(&self.sample)
            .and_then(|()| self.single_sample(channel))
            .map_err(|err| self.release(err))?;

        self.request.set(Request::AwaitingSample);
        syscall::yield_for(self.syscalls, &|| self.sample.result().is_ready());
        self.request.set(Request::Idle);
        Ok(self.sample.result().get())
    }

    /// Start sampling `channel` at `frequency` Hz, handing every reading to
    /// `client`. Returns as soon as the command is issued.
    ///
    /// If the command is rejected `client` is never called.
    pub fn read_cont_sample(
        &'a self,
        channel: u8,
        frequency: u32,
        client: &'a dyn ContinuousClient,
    ) -> Result<(), ErrorCode> {
        self.claim()?;
        self.sample.set_stream(client);
        self.set_callback(&self.sample)
            .and_then(|()| self.continuous_sample(channel, frequency))
            .map_err(|err| self.release(err))?;

        self.request.set(Request::Streaming);
        Ok(())
    }

    /// Block until the capsule reports the continuous sampling frequency
    /// closest to `frequency` that it can achieve.
    ///
    /// This takes over the subscription; a later sampling request installs
    /// its own handler again. Sample upcalls still queued from an earlier
    /// stream are dropped while waiting. If the capsule never answers, this
    /// call never returns.
    pub fn nearest_sampling_freq(&'a self, frequency: u32) -> Result<u32, ErrorCode> {
        self.claim()?;
        self.frequency.result().reset();
        self.set_callback(&self.frequency)
            .and_then(|()| self.compute_frequency(frequency))
            .map_err(|err| self.release(err))?;

        self.request.set(Request::AwaitingFrequency);
        syscall::yield_for(self.syscalls, &|| self.frequency.result().is_ready());
        self.request.set(Request::Idle);
        Ok(self.frequency.result().get())
    }

    /// Take the subscription for a new request. A blocked request keeps it;
    /// a stream gives it up.
    fn claim(&self) -> Result<(), ErrorCode> {
        match self.request.get() {
            Request::AwaitingSample | Request::AwaitingFrequency => Err(ErrorCode::BUSY),
            Request::Idle | Request::Streaming => {
                self.sample.clear_stream();
                self.request.set(Request::Idle);
                Ok(())
            }
        }
    }

    /// Drop a request that was never accepted.
    fn release(&self, err: ErrorCode) -> ErrorCode {
        self.sample.clear_stream();
        self.request.set(Request::Idle);
        err
    }

    fn command(&self, command: Command, arg: u32) -> Result<u32, ErrorCode> {
        syscall::command(self.syscalls, DRIVER_NUM, command as u32, arg).into_result()
    }
}
