// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Effect graph data model.
//!
//! The backdrop material is described as a small directed acyclic graph of
//! effect nodes. Each node has:
//!
//! - An identity ([`NodeId`]), a serial-stamped handle that becomes stale
//!   when the graph is rebuilt, preventing cross-build mixups at the API
//!   level.
//! - A kind and a typed parameter block ([`NodeParams`]).
//! - Up to two input slots wired to earlier nodes.
//!
//! Nodes are stored in struct-of-arrays layout inside
//! [`EffectGraphStore`]. The store is a *model*: creating and wiring nodes
//! touches no compositor state. [`EffectGraphStore::realize`] materializes
//! the model against a [`RenderBackend`](crate::backend::RenderBackend) in
//! one transactional pass, and
//! [`EffectGraphStore::flush_params`] pushes parameter changes
//! incrementally afterwards.
//!
//! [`AcrylicGraph`] and [`MaterialGraph`] assemble the stock topologies from
//! these pieces.
//!
//! # Dirty tracking
//!
//! Parameter mutations automatically mark the corresponding dirty channel
//! (see [`dirty`](crate::dirty)):
//!
//! - **PARAM** marks nodes whose parameter block changed; drained by
//!   [`flush_params`](EffectGraphStore::flush_params).
//! - **TOPOLOGY** marks creation and wiring; cleared by
//!   [`realize`](EffectGraphStore::realize).

mod builder;
mod id;
mod node;
mod store;

pub use builder::{AcrylicGraph, AcrylicNodes, MaterialGraph, SolidGraph, TintPath};
pub use id::{INVALID, NodeId};
pub use node::{NodeParams, input_slots};
pub use store::{EffectGraphStore, GraphBuildError, ParamFlush};
