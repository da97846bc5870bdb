// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A recording [`RenderBackend`] double.

use alloc::vec::Vec;

use kurbo::Rect;
use scrim_core::backend::{
    BackendError, BackendNode, NodeKind, ParamKey, ParamValue, RenderBackend,
};
use scrim_core::host::WindowId;

/// One effect node the backend was asked to create.
#[derive(Clone, Debug)]
pub struct NodeRecord {
    /// The handle assigned to the node.
    pub handle: BackendNode,
    /// The node's kind.
    pub kind: NodeKind,
    /// Every parameter set on the node, in arrival order.
    pub params: Vec<(ParamKey, ParamValue)>,
    /// Input wiring by slot.
    pub inputs: [Option<BackendNode>; 2],
    /// `false` once the node was destroyed.
    pub alive: bool,
}

impl NodeRecord {
    /// Returns the most recently set value for `key`, if any.
    #[must_use]
    pub fn last_param(&self, key: ParamKey) -> Option<ParamValue> {
        self.params
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }
}

/// The composition target bound to a window.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TargetRecord {
    /// The window the target belongs to.
    pub window: WindowId,
    /// Last applied bounds in client space.
    pub bounds: Rect,
    /// Last applied DPI.
    pub dpi: u32,
    /// Last applied scale factor.
    pub scale: f64,
    /// `false` once the target was released.
    pub alive: bool,
}

/// One backend call, recorded in arrival order.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum BackendOp {
    /// `create_node` succeeded with this handle.
    CreateNode(BackendNode, NodeKind),
    /// `set_param` was called.
    SetParam(BackendNode, ParamKey),
    /// `wire_input` was called.
    Wire {
        /// The consuming node.
        node: BackendNode,
        /// Its input slot.
        slot: u8,
        /// The node wired into the slot.
        input: BackendNode,
    },
    /// `destroy_node` was called.
    DestroyNode(BackendNode),
    /// `create_or_resize_target` was called.
    Target(WindowId),
    /// `rescale_target` was called.
    Rescale(WindowId),
    /// `draw` was called with this terminal.
    Draw(BackendNode),
    /// `present` was called.
    Present,
    /// `release_target` was called.
    ReleaseTarget(WindowId),
}

/// A [`RenderBackend`] that realizes everything into in-memory records.
///
/// Capability probes answer from the two `pub` flags. Every call is appended
/// to [`ops`](Self::ops); nodes and the target keep their full state in
/// [`nodes`](Self::nodes) and [`target`](Self::target) so tests can assert
/// what a real compositor would be showing. Records survive destruction with
/// `alive` flipped to `false`, which keeps teardown order checkable.
///
/// The `fail_*` fields inject failures. A failed destroy or release still
/// kills the resource, matching the [`RenderBackend`] contract.
#[derive(Debug)]
pub struct RecordingBackend {
    /// Whether the luminosity blend probe answers yes.
    pub luminosity_blend: bool,
    /// Whether the host backdrop probe answers yes.
    pub host_backdrop: bool,
    /// Fail the Nth successful-so-far `create_node` call with code `-1`.
    pub fail_create_at: Option<usize>,
    /// Error code for every `set_param` call, if set.
    pub fail_set_param: Option<i32>,
    /// Error code for every `wire_input` call, if set.
    pub fail_wire: Option<i32>,
    /// Error code for every `destroy_node` call, if set.
    pub fail_destroy_nodes: Option<i32>,
    /// Error code for `create_or_resize_target`, if set.
    pub fail_target: Option<i32>,
    /// Error code for `rescale_target`, if set.
    pub fail_rescale: Option<i32>,
    /// Error returned by `draw`, if set.
    pub fail_draw: Option<BackendError>,
    /// Error returned by `present`, if set.
    pub fail_present: Option<BackendError>,
    /// Error code for `release_target`, if set.
    pub fail_release_target: Option<i32>,
    /// Every node ever created, alive or not.
    pub nodes: Vec<NodeRecord>,
    /// The composition target, once one was created.
    pub target: Option<TargetRecord>,
    /// Every call in arrival order.
    pub ops: Vec<BackendOp>,
    next: u64,
}

impl RecordingBackend {
    /// A backend with both capabilities, no failures and nothing recorded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            luminosity_blend: true,
            host_backdrop: true,
            fail_create_at: None,
            fail_set_param: None,
            fail_wire: None,
            fail_destroy_nodes: None,
            fail_target: None,
            fail_rescale: None,
            fail_draw: None,
            fail_present: None,
            fail_release_target: None,
            nodes: Vec::new(),
            target: None,
            ops: Vec::new(),
            next: 1,
        }
    }

    /// Returns the record for `node`.
    ///
    /// # Panics
    ///
    /// Panics if no node with that handle was ever created.
    #[must_use]
    pub fn node(&self, node: BackendNode) -> &NodeRecord {
        match self.nodes.iter().find(|r| r.handle == node) {
            Some(record) => record,
            None => panic!("unknown backend node {node:?}"),
        }
    }

    /// Returns how many nodes are currently alive.
    #[must_use]
    pub fn live_node_count(&self) -> usize {
        self.nodes.iter().filter(|r| r.alive).count()
    }

    /// Returns the kinds of the live nodes, in creation order.
    #[must_use]
    pub fn live_kinds(&self) -> Vec<NodeKind> {
        self.nodes
            .iter()
            .filter(|r| r.alive)
            .map(|r| r.kind)
            .collect()
    }

    fn node_mut(&mut self, node: BackendNode) -> &mut NodeRecord {
        match self.nodes.iter_mut().find(|r| r.handle == node) {
            Some(record) => record,
            None => panic!("unknown backend node {node:?}"),
        }
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for RecordingBackend {
    fn supports_luminosity_blend(&mut self) -> bool {
        self.luminosity_blend
    }

    fn supports_host_backdrop(&mut self) -> bool {
        self.host_backdrop
    }

    fn create_node(&mut self, kind: NodeKind) -> Result<BackendNode, BackendError> {
        if self.fail_create_at == Some(self.nodes.len()) {
            return Err(BackendError::CreateFailed(-1));
        }
        let handle = BackendNode(self.next);
        self.next += 1;
        self.nodes.push(NodeRecord {
            handle,
            kind,
            params: Vec::new(),
            inputs: [None; 2],
            alive: true,
        });
        self.ops.push(BackendOp::CreateNode(handle, kind));
        Ok(handle)
    }

    fn set_param(
        &mut self,
        node: BackendNode,
        key: ParamKey,
        value: ParamValue,
    ) -> Result<(), BackendError> {
        self.ops.push(BackendOp::SetParam(node, key));
        if let Some(code) = self.fail_set_param {
            return Err(BackendError::ParamRejected(code));
        }
        let record = self.node_mut(node);
        assert!(record.alive, "parameter set on destroyed node {node:?}");
        record.params.push((key, value));
        Ok(())
    }

    fn wire_input(
        &mut self,
        node: BackendNode,
        slot: u8,
        input: BackendNode,
    ) -> Result<(), BackendError> {
        self.ops.push(BackendOp::Wire { node, slot, input });
        if let Some(code) = self.fail_wire {
            return Err(BackendError::WireRejected(code));
        }
        let record = self.node_mut(node);
        assert!(record.alive, "input wired on destroyed node {node:?}");
        record.inputs[usize::from(slot)] = Some(input);
        Ok(())
    }

    fn destroy_node(&mut self, node: BackendNode) -> Result<(), BackendError> {
        self.ops.push(BackendOp::DestroyNode(node));
        // The handle is dead either way, even when the destroy fails.
        self.node_mut(node).alive = false;
        match self.fail_destroy_nodes {
            Some(code) => Err(BackendError::DestroyFailed(code)),
            None => Ok(()),
        }
    }

    fn create_or_resize_target(
        &mut self,
        window: WindowId,
        bounds: Rect,
        dpi: u32,
    ) -> Result<(), BackendError> {
        self.ops.push(BackendOp::Target(window));
        if let Some(code) = self.fail_target {
            return Err(BackendError::TargetFailed(code));
        }
        match &mut self.target {
            Some(target) => {
                assert!(
                    target.window == window,
                    "target requested for a second window {window:?}"
                );
                target.bounds = bounds;
                target.dpi = dpi;
                target.alive = true;
            }
            None => {
                self.target = Some(TargetRecord {
                    window,
                    bounds,
                    dpi,
                    scale: f64::from(dpi) / 96.0,
                    alive: true,
                });
            }
        }
        Ok(())
    }

    fn rescale_target(&mut self, window: WindowId, scale: f64) -> Result<(), BackendError> {
        self.ops.push(BackendOp::Rescale(window));
        if let Some(code) = self.fail_rescale {
            return Err(BackendError::TargetFailed(code));
        }
        match &mut self.target {
            Some(target) if target.window == window && target.alive => {
                target.scale = scale;
                Ok(())
            }
            _ => panic!("rescale of unknown target {window:?}"),
        }
    }

    fn draw(&mut self, terminal: BackendNode) -> Result<(), BackendError> {
        self.ops.push(BackendOp::Draw(terminal));
        if let Some(err) = self.fail_draw {
            return Err(err);
        }
        assert!(
            self.node(terminal).alive,
            "draw of destroyed node {terminal:?}"
        );
        Ok(())
    }

    fn present(&mut self) -> Result<(), BackendError> {
        self.ops.push(BackendOp::Present);
        match self.fail_present {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn release_target(&mut self, window: WindowId) -> Result<(), BackendError> {
        self.ops.push(BackendOp::ReleaseTarget(window));
        match &mut self.target {
            Some(target) if target.window == window => target.alive = false,
            _ => panic!("release of unknown target {window:?}"),
        }
        match self.fail_release_target {
            Some(code) => Err(BackendError::TargetFailed(code)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_lifecycle_is_recorded() {
        let mut backend = RecordingBackend::new();
        let w = WindowId(1);
        backend
            .create_or_resize_target(w, Rect::new(0.0, 31.0, 800.0, 600.0), 96)
            .unwrap();
        backend
            .create_or_resize_target(w, Rect::new(0.0, 31.0, 1000.0, 700.0), 96)
            .unwrap();
        backend.rescale_target(w, 2.0).unwrap();
        let target = backend.target.unwrap();
        assert_eq!(target.bounds, Rect::new(0.0, 31.0, 1000.0, 700.0));
        assert_eq!(target.scale, 2.0);
        assert!(target.alive);

        backend.release_target(w).unwrap();
        assert!(!backend.target.unwrap().alive);
    }

    #[test]
    fn node_records_keep_params_and_wiring() {
        let mut backend = RecordingBackend::new();
        let flood = backend.create_node(NodeKind::Flood).unwrap();
        let blur = backend.create_node(NodeKind::Blur).unwrap();
        backend
            .set_param(blur, ParamKey::Radius, ParamValue::Scalar(30.0))
            .unwrap();
        backend
            .set_param(blur, ParamKey::Radius, ParamValue::Scalar(40.0))
            .unwrap();
        backend.wire_input(blur, 0, flood).unwrap();

        let record = backend.node(blur);
        assert_eq!(record.params.len(), 2);
        assert_eq!(
            record.last_param(ParamKey::Radius),
            Some(ParamValue::Scalar(40.0))
        );
        assert_eq!(record.inputs[0], Some(flood));
    }

    #[test]
    fn destroyed_nodes_stay_on_record() {
        let mut backend = RecordingBackend::new();
        let flood = backend.create_node(NodeKind::Flood).unwrap();
        backend.destroy_node(flood).unwrap();
        assert_eq!(backend.live_node_count(), 0);
        assert!(!backend.node(flood).alive);
        assert_eq!(backend.ops.len(), 2);
    }

    #[test]
    fn nth_create_fails_on_request() {
        let mut backend = RecordingBackend::new();
        backend.fail_create_at = Some(1);
        assert!(backend.create_node(NodeKind::Backdrop).is_ok());
        assert_eq!(
            backend.create_node(NodeKind::Blur),
            Err(BackendError::CreateFailed(-1))
        );
    }
}
