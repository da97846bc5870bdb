// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The window frame: model, events and the non-client state machine.
//!
//! One [`WindowFrame`] runs one top-level window. It is built from four
//! pieces:
//!
//! - [`WindowModel`] — the owned record of the window's geometry,
//!   visibility, DPI, theme and activation, with unified change tracking
//!   through [`ModelChanges`].
//! - [`HostEvent`] / [`EventReply`] — the message vocabulary between the
//!   host shell and the frame.
//! - Non-client geometry — pure [`compute_client_area`] and
//!   [`classify_hit`] functions answering the host's client area and hit
//!   test queries.
//! - [`WindowFrame`] — the state machine that owns the model, the
//!   composition surface, the effect graph and the drag sink, and advances
//!   all of them per event.
//!
//! # Lifecycle
//!
//! [`WindowFrame::create`] binds to a host window and either returns a live
//! frame in [`FrameState::Normal`] or a [`CreateError`] with everything
//! rolled back. Host events then drive the frame until
//! [`WindowFrame::close`] (or a [`HostEvent::CloseRequested`]) tears it
//! down, best effort and total, into the terminal
//! [`FrameState::Destroyed`].

mod events;
mod frame;
mod model;
mod nonclient;

pub use events::{EventReply, HostEvent, PointerAction, PointerButton, PointerMessage, SettingKey};
pub use frame::{
    CreateError, FrameConfig, TeardownFailure, TeardownReport, TeardownResource, WindowFrame,
};
pub use model::{FrameState, ModelChanges, Visibility, WindowModel};
pub use nonclient::{
    AUTO_HIDE_REVEAL_INSET, ClientAreaReply, HitTestZone, RedrawHint, classify_hit,
    compute_client_area,
};
