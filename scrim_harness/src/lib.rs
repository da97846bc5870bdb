// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test doubles for driving Scrim window frames without a platform.
//!
//! A [`WindowFrame`](scrim_core::window::WindowFrame) talks to the outside
//! world through two traits, and this crate provides a scripted stand-in for
//! each:
//!
//! - [`ScriptedHost`] answers
//!   [`WindowHost`](scrim_core::host::WindowHost) queries from plain public
//!   fields and records every mutation the frame requests.
//! - [`RecordingBackend`] realizes
//!   [`RenderBackend`](scrim_core::backend::RenderBackend) calls into
//!   in-memory node and target records, so a test can assert what a real
//!   compositor would be showing.
//! - [`CollectingSink`] collects the frame's trace events for assertions on
//!   ordering and recoverable failures.
//!
//! All three expose `fail_*` knobs (or scriptable answers) for fault
//! injection. The integration tests at the bottom of this crate double as
//! executable documentation of the frame's event contract.

#![no_std]

extern crate alloc;

mod backend;
mod host;
mod sink;

pub use backend::{BackendOp, NodeRecord, RecordingBackend, TargetRecord};
pub use host::{HostCall, ScriptedHost};
pub use sink::{CollectingSink, TraceRecord};
