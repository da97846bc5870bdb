// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays effect node storage with realization and parameter
//! flushing.

use alloc::vec::Vec;
use core::fmt;

use understory_dirty::{CycleHandling, DirtyTracker};

use crate::backend::{BackendError, BackendNode, NodeKind, RenderBackend};
use crate::dirty;
use crate::trace::{RecoverableErrorEvent, RecoverableOp, Tracer};

use super::id::{INVALID, NodeId};
use super::node::{NodeParams, input_slots};

/// An error that aborted a graph build.
///
/// Fatal to the frame being built: on failure [`EffectGraphStore::realize`]
/// has already rolled back every backend node it created.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GraphBuildError {
    /// Creating a backend node failed.
    NodeCreate {
        /// Kind of the node that failed.
        kind: NodeKind,
        /// Raw backend error code.
        code: i32,
    },
    /// Pushing a node's initial parameters failed.
    Param {
        /// Kind of the node that failed.
        kind: NodeKind,
        /// Raw backend error code.
        code: i32,
    },
    /// Wiring a node input failed.
    Wire {
        /// Kind of the downstream node.
        kind: NodeKind,
        /// Input slot that failed.
        slot: u8,
        /// Raw backend error code.
        code: i32,
    },
    /// The composition device is gone.
    DeviceLost,
}

impl GraphBuildError {
    /// The raw backend error code, or zero for a lost device.
    #[must_use]
    pub const fn raw_code(&self) -> i32 {
        match self {
            Self::NodeCreate { code, .. } | Self::Param { code, .. } | Self::Wire { code, .. } => {
                *code
            }
            Self::DeviceLost => 0,
        }
    }
}

impl fmt::Display for GraphBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeCreate { kind, code } => {
                write!(f, "creating {kind:?} node failed (code {code})")
            }
            Self::Param { kind, code } => {
                write!(f, "initial parameters for {kind:?} node failed (code {code})")
            }
            Self::Wire { kind, slot, code } => {
                write!(f, "wiring {kind:?} input {slot} failed (code {code})")
            }
            Self::DeviceLost => write!(f, "composition device lost"),
        }
    }
}

impl core::error::Error for GraphBuildError {}

/// Counters from one [`EffectGraphStore::flush_params`] pass.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct ParamFlush {
    /// Parameters pushed successfully.
    pub pushed: u32,
    /// Parameters the backend rejected. Rejections are recoverable; the
    /// model keeps its value and the flush continues.
    pub rejected: u32,
}

/// Struct-of-arrays storage for an effect graph.
///
/// Nodes are addressed by [`NodeId`] handles stamped with the store's build
/// serial. The store is a model first: [`create_node`](Self::create_node) and
/// [`wire`](Self::wire) touch no compositor state until
/// [`realize`](Self::realize) materializes the whole graph against a backend
/// in one transactional pass. After that, parameter edits flow through
/// [`flush_params`](Self::flush_params) incrementally.
///
/// Inputs may only be wired to nodes created earlier, which makes cycles
/// unrepresentable and creation order a valid realization order.
pub struct EffectGraphStore {
    // -- Model --
    pub(crate) kinds: Vec<NodeKind>,
    pub(crate) params: Vec<NodeParams>,
    pub(crate) inputs: Vec<[u32; 2]>,

    // -- Backend state --
    pub(crate) backend_nodes: Vec<Option<BackendNode>>,
    pub(crate) realized: bool,

    // -- Identity --
    pub(crate) serial: u32,
    pub(crate) terminal: Option<NodeId>,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,
}

impl fmt::Debug for EffectGraphStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectGraphStore")
            .field("serial", &self.serial)
            .field("nodes", &self.kinds.len())
            .field("realized", &self.realized)
            .field("terminal", &self.terminal)
            .finish_non_exhaustive()
    }
}

impl Default for EffectGraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectGraphStore {
    /// Creates an empty store with build serial zero.
    #[must_use]
    pub fn new() -> Self {
        Self::with_serial(0)
    }

    /// Creates an empty store with the given build serial.
    ///
    /// A rebuild uses the old serial plus one so that handles from the
    /// previous build fail validation.
    #[must_use]
    pub fn with_serial(serial: u32) -> Self {
        Self {
            kinds: Vec::new(),
            params: Vec::new(),
            inputs: Vec::new(),
            backend_nodes: Vec::new(),
            realized: false,
            serial,
            terminal: None,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
        }
    }

    /// Returns the store's build serial.
    #[must_use]
    pub const fn serial(&self) -> u32 {
        self.serial
    }

    /// Returns how many nodes the graph has.
    #[must_use]
    pub fn node_count(&self) -> u32 {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "node count is bounded by the u32 handle space"
        )]
        {
            self.kinds.len() as u32
        }
    }

    /// Returns whether the graph has been realized against a backend.
    #[must_use]
    pub const fn is_realized(&self) -> bool {
        self.realized
    }

    // -- Model mutation --

    /// Creates a node with the given parameters and returns its handle.
    ///
    /// Inputs start unwired.
    pub fn create_node(&mut self, params: NodeParams) -> NodeId {
        let idx = self.node_count();
        self.kinds.push(params.kind());
        self.params.push(params);
        self.inputs.push([INVALID; 2]);
        self.backend_nodes.push(None);
        self.dirty.mark(idx, dirty::PARAM);
        self.dirty.mark(idx, dirty::TOPOLOGY);
        NodeId {
            idx,
            serial: self.serial,
        }
    }

    /// Wires `input` into the numbered input slot of `node`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, `slot` is out of range for the
    /// node's kind, or `input` was not created before `node` (which would
    /// allow a cycle).
    pub fn wire(&mut self, node: NodeId, slot: u8, input: NodeId) {
        self.validate(node);
        self.validate(input);
        let kind = self.kinds[node.idx as usize];
        assert!(
            slot < input_slots(kind),
            "{kind:?} node has no input slot {slot}"
        );
        assert!(
            input.idx < node.idx,
            "input must be created before the node consuming it"
        );
        self.inputs[node.idx as usize][slot as usize] = input.idx;
        self.dirty.mark(node.idx, dirty::TOPOLOGY);
    }

    /// Marks `node` as the graph's terminal, the node presented each frame.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_terminal(&mut self, node: NodeId) {
        self.validate(node);
        self.terminal = Some(node);
    }

    /// Returns the terminal node, if one has been set.
    #[must_use]
    pub const fn terminal(&self) -> Option<NodeId> {
        self.terminal
    }

    /// Returns the parameters of a node.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn params(&self, node: NodeId) -> NodeParams {
        self.validate(node);
        self.params[node.idx as usize]
    }

    /// Replaces the parameters of a node.
    ///
    /// Marks the PARAM channel only if the block actually changed, so
    /// applying identical parameters twice leaves nothing to flush.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `params` is for a different node
    /// kind.
    pub fn set_params(&mut self, node: NodeId, params: NodeParams) {
        self.validate(node);
        let kind = self.kinds[node.idx as usize];
        assert!(
            params.kind() == kind,
            "parameter block for {:?} applied to {kind:?} node",
            params.kind()
        );
        if self.params[node.idx as usize] != params {
            self.params[node.idx as usize] = params;
            self.dirty.mark(node.idx, dirty::PARAM);
        }
    }

    /// Returns the backend handle realized for `node`, if the graph is
    /// realized.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn backend_node(&self, node: NodeId) -> Option<BackendNode> {
        self.validate(node);
        self.backend_nodes[node.idx as usize]
    }

    // -- Backend realization --

    /// Materializes the whole graph against `backend`.
    ///
    /// Nodes are created in creation order, parameterized, then wired. The
    /// pass is transactional: on any failure every backend node created so
    /// far is destroyed (best effort) and the store is left unrealized, so a
    /// failed build leaks nothing.
    ///
    /// On success both dirty channels are drained; the realized graph
    /// matches the model exactly.
    ///
    /// # Errors
    ///
    /// Returns the [`GraphBuildError`] describing the first failure.
    pub fn realize<B>(
        &mut self,
        backend: &mut B,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), GraphBuildError>
    where
        B: RenderBackend + ?Sized,
    {
        #[cfg(not(feature = "trace-rich"))]
        {
            _ = &tracer;
        }
        let count = self.node_count();
        for idx in 0..count {
            let kind = self.kinds[idx as usize];
            let node = match backend.create_node(kind) {
                Ok(node) => node,
                Err(e) => {
                    self.rollback(backend);
                    return Err(match e {
                        BackendError::DeviceLost => GraphBuildError::DeviceLost,
                        other => GraphBuildError::NodeCreate {
                            kind,
                            code: other.raw_code(),
                        },
                    });
                }
            };
            self.backend_nodes[idx as usize] = Some(node);
            if let Err(e) = self.params[idx as usize].push_to(backend, node) {
                self.rollback(backend);
                return Err(match e {
                    BackendError::DeviceLost => GraphBuildError::DeviceLost,
                    other => GraphBuildError::Param {
                        kind,
                        code: other.raw_code(),
                    },
                });
            }
            #[cfg(feature = "trace-rich")]
            tracer.node_realized(&crate::trace::NodeRealizedEvent {
                node_index: idx,
                kind,
                backend: node,
            });
        }

        for idx in 0..count {
            for slot in 0..input_slots(self.kinds[idx as usize]) {
                let input_idx = self.inputs[idx as usize][slot as usize];
                if input_idx == INVALID {
                    continue;
                }
                // Both ends were just created, so the handles are present.
                let (Some(node), Some(input)) = (
                    self.backend_nodes[idx as usize],
                    self.backend_nodes[input_idx as usize],
                ) else {
                    continue;
                };
                if let Err(e) = backend.wire_input(node, slot, input) {
                    self.rollback(backend);
                    return Err(match e {
                        BackendError::DeviceLost => GraphBuildError::DeviceLost,
                        other => GraphBuildError::Wire {
                            kind: self.kinds[idx as usize],
                            slot,
                            code: other.raw_code(),
                        },
                    });
                }
            }
        }

        self.realized = true;
        let _: Vec<u32> = self
            .dirty
            .drain(dirty::PARAM)
            .deterministic()
            .run()
            .collect();
        let _: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();
        Ok(())
    }

    /// Pushes pending parameter changes to the backend.
    ///
    /// Drains the PARAM channel and pushes each drained node's block.
    /// Rejected pushes are counted and skipped; one bad parameter never
    /// blocks the rest.
    pub fn flush_params<B>(&mut self, backend: &mut B, tracer: &mut Tracer<'_>) -> ParamFlush
    where
        B: RenderBackend + ?Sized,
    {
        let mut flush = ParamFlush::default();
        if !self.realized {
            return flush;
        }
        let dirty_nodes: Vec<u32> = self
            .dirty
            .drain(dirty::PARAM)
            .deterministic()
            .run()
            .collect();
        for &idx in &dirty_nodes {
            let Some(node) = self.backend_nodes[idx as usize] else {
                continue;
            };
            match self.params[idx as usize].push_to(backend, node) {
                Ok(()) => {
                    flush.pushed += 1;
                    #[cfg(feature = "trace-rich")]
                    tracer.param_push(&crate::trace::ParamPushEvent {
                        node_index: idx,
                        kind: self.kinds[idx as usize],
                    });
                }
                Err(e) => {
                    flush.rejected += 1;
                    tracer.recoverable_error(&RecoverableErrorEvent {
                        op: RecoverableOp::ParamPush,
                        code: e.raw_code(),
                    });
                }
            }
        }
        flush
    }

    /// Destroys every realized backend node, in reverse creation order.
    ///
    /// Each slot is cleared before its destroy call, so a reentrant look at
    /// the store never sees a handle that is being torn down. Destruction
    /// continues past failures.
    ///
    /// # Errors
    ///
    /// Returns the first [`BackendError`] reported, after all nodes have
    /// been attempted.
    pub fn teardown<B>(&mut self, backend: &mut B) -> Result<(), BackendError>
    where
        B: RenderBackend + ?Sized,
    {
        let mut first_err = None;
        for idx in (0..self.backend_nodes.len()).rev() {
            if let Some(node) = self.backend_nodes[idx].take() {
                if let Err(e) = backend.destroy_node(node) {
                    first_err.get_or_insert(e);
                }
            }
        }
        self.realized = false;
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    fn validate(&self, id: NodeId) {
        assert!(
            id.serial == self.serial && id.idx < self.node_count(),
            "stale NodeId: {id:?} (current serial: {})",
            self.serial
        );
    }

    /// Destroys backend nodes created by a failed realize, in reverse order.
    fn rollback<B>(&mut self, backend: &mut B)
    where
        B: RenderBackend + ?Sized,
    {
        for idx in (0..self.backend_nodes.len()).rev() {
            if let Some(node) = self.backend_nodes[idx].take() {
                // The build already failed; a destroy failure here changes
                // nothing.
                let _ = backend.destroy_node(node);
            }
        }
        self.realized = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::EdgeMode;
    use crate::color::Rgba8;

    fn flood(color: Rgba8) -> NodeParams {
        NodeParams::Flood { color }
    }

    #[test]
    fn create_assigns_sequential_indices() {
        let mut store = EffectGraphStore::new();
        let a = store.create_node(flood(Rgba8::opaque(1, 2, 3)));
        let b = store.create_node(NodeParams::Blur {
            radius_px: 30.0,
            edge: EdgeMode::Hard,
        });
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(store.node_count(), 2);
    }

    #[test]
    fn wire_accepts_earlier_nodes() {
        let mut store = EffectGraphStore::new();
        let src = store.create_node(flood(Rgba8::opaque(0, 0, 0)));
        let blur = store.create_node(NodeParams::Blur {
            radius_px: 30.0,
            edge: EdgeMode::Hard,
        });
        store.wire(blur, 0, src);
        assert_eq!(store.inputs[blur.index() as usize][0], src.index());
    }

    #[test]
    #[should_panic(expected = "input must be created before")]
    fn wire_rejects_later_nodes() {
        let mut store = EffectGraphStore::new();
        let blur = store.create_node(NodeParams::Blur {
            radius_px: 30.0,
            edge: EdgeMode::Hard,
        });
        let src = store.create_node(flood(Rgba8::opaque(0, 0, 0)));
        store.wire(blur, 0, src);
    }

    #[test]
    #[should_panic(expected = "has no input slot")]
    fn wire_rejects_out_of_range_slot() {
        let mut store = EffectGraphStore::new();
        let src = store.create_node(flood(Rgba8::opaque(0, 0, 0)));
        let blur = store.create_node(NodeParams::Blur {
            radius_px: 30.0,
            edge: EdgeMode::Hard,
        });
        store.wire(blur, 1, src);
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn stale_serial_is_rejected() {
        let mut old = EffectGraphStore::new();
        let stale = old.create_node(flood(Rgba8::opaque(0, 0, 0)));
        let mut rebuilt = EffectGraphStore::with_serial(old.serial() + 1);
        let _ = rebuilt.create_node(flood(Rgba8::opaque(0, 0, 0)));
        let _ = rebuilt.params(stale);
    }

    #[test]
    fn set_params_same_value_marks_nothing() {
        let mut store = EffectGraphStore::new();
        let fade = store.create_node(NodeParams::Crossfade { weight: 1.0 });
        // Consume the creation marks.
        let _: Vec<u32> = store
            .dirty
            .drain(dirty::PARAM)
            .deterministic()
            .run()
            .collect();
        store.set_params(fade, NodeParams::Crossfade { weight: 1.0 });
        let marked: Vec<u32> = store
            .dirty
            .drain(dirty::PARAM)
            .deterministic()
            .run()
            .collect();
        assert!(marked.is_empty(), "unchanged params must not mark dirty");

        store.set_params(fade, NodeParams::Crossfade { weight: 0.5 });
        let marked: Vec<u32> = store
            .dirty
            .drain(dirty::PARAM)
            .deterministic()
            .run()
            .collect();
        assert_eq!(marked, &[fade.index()]);
    }

    #[test]
    #[should_panic(expected = "parameter block for")]
    fn set_params_rejects_kind_mismatch() {
        let mut store = EffectGraphStore::new();
        let fade = store.create_node(NodeParams::Crossfade { weight: 1.0 });
        store.set_params(fade, flood(Rgba8::opaque(0, 0, 0)));
    }
}
