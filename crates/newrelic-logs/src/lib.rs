// Copyright 2025-Present New Relic, Inc. https://newrelic.com/
// SPDX-License-Identifier: Apache-2.0

//! Batching, compression, and delivery of structured log records to the
//! New Relic Logs intake.
//!
//! The crate is split along the two halves of the delivery pipeline:
//! [`payload::package_records`] turns an ordered batch of records into
//! size-bounded gzip payloads, and [`intake::IntakeClient`] transmits those
//! payloads in order with the configured credential header.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod config;
pub mod error;
pub mod http;
pub mod intake;
pub mod payload;
