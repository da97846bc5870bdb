// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The effect graph uses multi-channel dirty tracking (via
//! [`understory_dirty`]) to push only changed state to the render backend.
//! Each channel represents an independent category of change.
//!
//! # Propagation semantics
//!
//! Both channels are local-only: a node's parameters and its input wiring
//! belong to that node alone, so marks are made with the default policy and
//! only the explicitly marked node appears in the drain output. No dependency
//! edges are registered.
//!
//! - [`PARAM`] is marked when a node's parameter block changes. The next
//!   [`flush_params`](crate::graph::EffectGraphStore::flush_params) pushes
//!   exactly the drained nodes to the backend.
//!
//! - [`TOPOLOGY`] is marked on node creation and rewiring. Topology changes
//!   are only ever consumed by a full
//!   [`realize`](crate::graph::EffectGraphStore::realize), which rebuilds the
//!   backend graph wholesale and clears the channel.

use understory_dirty::Channel;

/// Node parameters changed; the node needs a parameter push.
pub const PARAM: Channel = Channel::new(0);

/// Graph structure changed; the backend graph needs a full rebuild.
pub const TOPOLOGY: Channel = Channel::new(1);
