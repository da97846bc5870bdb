// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stock material graph assembly.
//!
//! [`AcrylicGraph`] builds the translucent backdrop recipe; [`SolidGraph`]
//! builds the one-node opaque fill used under high contrast.
//! [`MaterialGraph`] wraps whichever a
//! [`MaterialPlan`](crate::theme::MaterialPlan) calls for.
//!
//! # The acrylic recipes
//!
//! Two topologies exist because not every compositor has a luminosity blend.
//! Both start by blurring the backdrop and end with a noise overlay plus a
//! fallback crossfade; they differ in how the tint is applied.
//!
//! The luminosity path (10 nodes):
//!
//! ```text
//! backdrop -> blur -+-> blend(Luminosity) -+-> blend(Color) -+-> composite -> crossfade(1)
//!                   |                      |                 |              crossfade(0)
//!        lum flood -+         tint flood --+        noise ---+                  |
//!                                                                    fallback --+
//! ```
//!
//! The legacy path replaces the two blends with saturation, an exclusion
//! blend against a fixed dark layer, and a plain tint composite (11 nodes).
//!
//! The crossfade's input 0 is the opaque fallback and input 1 the acrylic
//! chain, so weight `1.0` shows full acrylic and `0.0` only the fallback.
//! Hosts drop the weight during window moves when live backdrop sampling
//! would stutter.

use crate::backend::{
    BackdropKind, BackendError, BackendNode, BlendMode, CompositeMode, EdgeMode, NodeKind,
    RenderBackend, TileMode,
};
use crate::color::Rgba8;
use crate::theme::{MaterialParameters, MaterialPlan};
use crate::trace::Tracer;

use super::id::NodeId;
use super::node::NodeParams;
use super::store::{EffectGraphStore, GraphBuildError, ParamFlush};

/// Exclusion layer color of the legacy tint recipe.
const LEGACY_EXCLUSION_COLOR: Rgba8 = Rgba8::new(26, 26, 26, 26);

/// Which tint topology the acrylic graph uses.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TintPath {
    /// Luminosity plus color blends. Preferred.
    Luminosity,
    /// Saturation plus exclusion blend. Used when the compositor has no
    /// luminosity blend.
    Legacy,
}

impl TintPath {
    /// Probes `backend` and picks the best supported path.
    pub fn probe<B>(backend: &mut B) -> Self
    where
        B: RenderBackend + ?Sized,
    {
        if backend.supports_luminosity_blend() {
            Self::Luminosity
        } else {
            Self::Legacy
        }
    }
}

/// Handles to the parameterizable nodes of an [`AcrylicGraph`].
///
/// Join nodes (the blends and composites) are created with fixed modes and
/// never retuned, so they are not kept here.
#[derive(Clone, Copy, Debug)]
pub struct AcrylicNodes {
    /// The backdrop sampler.
    pub backdrop: NodeId,
    /// The gaussian blur.
    pub blur: NodeId,
    /// The luminosity flood. `None` on the legacy path.
    pub lum_flood: Option<NodeId>,
    /// The saturation node. `None` on the luminosity path.
    pub saturation: Option<NodeId>,
    /// The tint flood.
    pub tint_flood: NodeId,
    /// The noise source.
    pub noise: NodeId,
    /// The opaque fallback flood.
    pub fallback_flood: NodeId,
    /// The final fallback/acrylic crossfade.
    pub crossfade: NodeId,
}

/// The translucent acrylic backdrop graph.
///
/// Building is model-only; [`realize`](Self::realize) materializes the graph
/// against a backend afterwards.
#[derive(Debug)]
pub struct AcrylicGraph {
    store: EffectGraphStore,
    path: TintPath,
    nodes: AcrylicNodes,
}

impl AcrylicGraph {
    /// Builds the acrylic model for the path and backdrop `backend`
    /// supports.
    ///
    /// Only capability probes touch the backend here; no node exists on it
    /// until [`realize`](Self::realize).
    #[must_use]
    pub fn build<B>(
        backend: &mut B,
        params: &MaterialParameters,
        crossfade_weight: f64,
        serial: u32,
    ) -> Self
    where
        B: RenderBackend + ?Sized,
    {
        let path = TintPath::probe(backend);
        let source = if backend.supports_host_backdrop() {
            BackdropKind::HostBackdrop
        } else {
            BackdropKind::Wallpaper
        };
        let mut store = EffectGraphStore::with_serial(serial);

        let backdrop = store.create_node(NodeParams::Backdrop { source });
        let blur = store.create_node(NodeParams::Blur {
            radius_px: params.blur_radius_px,
            edge: EdgeMode::Hard,
        });
        store.wire(blur, 0, backdrop);

        let (lum_flood, saturation, tinted) = match path {
            TintPath::Luminosity => {
                let lum_flood = store.create_node(NodeParams::Flood {
                    color: params.tint_color.with_opacity(params.luminosity_opacity),
                });
                let lum_blend = store.create_node(NodeParams::Blend {
                    mode: BlendMode::Luminosity,
                });
                store.wire(lum_blend, 0, blur);
                store.wire(lum_blend, 1, lum_flood);
                (Some(lum_flood), None, lum_blend)
            }
            TintPath::Legacy => {
                let saturation = store.create_node(NodeParams::Saturation {
                    factor: params.saturation,
                });
                store.wire(saturation, 0, blur);
                let excl_flood = store.create_node(NodeParams::Flood {
                    color: LEGACY_EXCLUSION_COLOR,
                });
                let excl_blend = store.create_node(NodeParams::Blend {
                    mode: BlendMode::Exclusion,
                });
                store.wire(excl_blend, 0, saturation);
                store.wire(excl_blend, 1, excl_flood);
                (None, Some(saturation), excl_blend)
            }
        };

        let tint_flood = store.create_node(NodeParams::Flood {
            color: params.tint_color.with_opacity(params.tint_opacity),
        });
        let tint_join = match path {
            TintPath::Luminosity => store.create_node(NodeParams::Blend {
                mode: BlendMode::Color,
            }),
            TintPath::Legacy => store.create_node(NodeParams::Composite {
                mode: CompositeMode::SourceOver,
            }),
        };
        store.wire(tint_join, 0, tinted);
        store.wire(tint_join, 1, tint_flood);

        let noise = store.create_node(NodeParams::Noise {
            opacity: params.noise_opacity,
            tiling: TileMode::Wrap,
        });
        let noise_composite = store.create_node(NodeParams::Composite {
            mode: CompositeMode::SourceOver,
        });
        store.wire(noise_composite, 0, tint_join);
        store.wire(noise_composite, 1, noise);

        let fallback_flood = store.create_node(NodeParams::Flood {
            color: params.fallback_color,
        });
        let crossfade = store.create_node(NodeParams::Crossfade {
            weight: clamp_weight(crossfade_weight),
        });
        store.wire(crossfade, 0, fallback_flood);
        store.wire(crossfade, 1, noise_composite);
        store.set_terminal(crossfade);

        Self {
            store,
            path,
            nodes: AcrylicNodes {
                backdrop,
                blur,
                lum_flood,
                saturation,
                tint_flood,
                noise,
                fallback_flood,
                crossfade,
            },
        }
    }

    /// Returns which tint path the graph uses.
    #[must_use]
    pub const fn path(&self) -> TintPath {
        self.path
    }

    /// Returns the parameterizable node handles.
    #[must_use]
    pub const fn nodes(&self) -> &AcrylicNodes {
        &self.nodes
    }

    /// Returns the underlying store, for diagnostics.
    #[must_use]
    pub const fn store(&self) -> &EffectGraphStore {
        &self.store
    }

    /// Materializes the graph against `backend`.
    ///
    /// # Errors
    ///
    /// See [`EffectGraphStore::realize`].
    pub fn realize<B>(
        &mut self,
        backend: &mut B,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), GraphBuildError>
    where
        B: RenderBackend + ?Sized,
    {
        self.store.realize(backend, tracer)
    }

    /// Retunes the graph to new material parameters.
    ///
    /// Only nodes whose values actually change are marked for the next
    /// flush; reapplying the current parameters is a no-op.
    pub fn apply_material_parameters(&mut self, params: &MaterialParameters) {
        self.store.set_params(
            self.nodes.blur,
            NodeParams::Blur {
                radius_px: params.blur_radius_px,
                edge: EdgeMode::Hard,
            },
        );
        if let Some(lum_flood) = self.nodes.lum_flood {
            self.store.set_params(
                lum_flood,
                NodeParams::Flood {
                    color: params.tint_color.with_opacity(params.luminosity_opacity),
                },
            );
        }
        if let Some(saturation) = self.nodes.saturation {
            self.store.set_params(
                saturation,
                NodeParams::Saturation {
                    factor: params.saturation,
                },
            );
        }
        self.store.set_params(
            self.nodes.tint_flood,
            NodeParams::Flood {
                color: params.tint_color.with_opacity(params.tint_opacity),
            },
        );
        self.store.set_params(
            self.nodes.noise,
            NodeParams::Noise {
                opacity: params.noise_opacity,
                tiling: TileMode::Wrap,
            },
        );
        self.store.set_params(
            self.nodes.fallback_flood,
            NodeParams::Flood {
                color: params.fallback_color,
            },
        );
    }

    /// Sets the fallback/acrylic crossfade weight, clamped to `[0, 1]`.
    pub fn set_crossfade_weight(&mut self, weight: f64) {
        self.store.set_params(
            self.nodes.crossfade,
            NodeParams::Crossfade {
                weight: clamp_weight(weight),
            },
        );
    }

    /// Pushes pending parameter changes to the backend.
    pub fn flush_params<B>(&mut self, backend: &mut B, tracer: &mut Tracer<'_>) -> ParamFlush
    where
        B: RenderBackend + ?Sized,
    {
        self.store.flush_params(backend, tracer)
    }

    /// Returns the backend handle of the terminal node, once realized.
    #[must_use]
    pub fn terminal_backend_node(&self) -> Option<BackendNode> {
        self.store.terminal().and_then(|t| self.store.backend_node(t))
    }

    /// Destroys the realized backend nodes.
    ///
    /// # Errors
    ///
    /// See [`EffectGraphStore::teardown`].
    pub fn teardown<B>(&mut self, backend: &mut B) -> Result<(), BackendError>
    where
        B: RenderBackend + ?Sized,
    {
        self.store.teardown(backend)
    }
}

/// The one-node solid fill graph used when acrylic is suppressed.
#[derive(Debug)]
pub struct SolidGraph {
    store: EffectGraphStore,
    flood: NodeId,
}

impl SolidGraph {
    /// Builds the solid model.
    #[must_use]
    pub fn build(color: Rgba8, serial: u32) -> Self {
        let mut store = EffectGraphStore::with_serial(serial);
        let flood = store.create_node(NodeParams::Flood { color });
        store.set_terminal(flood);
        Self { store, flood }
    }

    /// Changes the fill color.
    pub fn set_color(&mut self, color: Rgba8) {
        self.store.set_params(self.flood, NodeParams::Flood { color });
    }

    /// Returns the underlying store, for diagnostics.
    #[must_use]
    pub const fn store(&self) -> &EffectGraphStore {
        &self.store
    }

    /// Materializes the graph against `backend`.
    ///
    /// # Errors
    ///
    /// See [`EffectGraphStore::realize`].
    pub fn realize<B>(
        &mut self,
        backend: &mut B,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), GraphBuildError>
    where
        B: RenderBackend + ?Sized,
    {
        self.store.realize(backend, tracer)
    }

    /// Pushes pending parameter changes to the backend.
    pub fn flush_params<B>(&mut self, backend: &mut B, tracer: &mut Tracer<'_>) -> ParamFlush
    where
        B: RenderBackend + ?Sized,
    {
        self.store.flush_params(backend, tracer)
    }

    /// Returns the backend handle of the terminal node, once realized.
    #[must_use]
    pub fn terminal_backend_node(&self) -> Option<BackendNode> {
        self.store.terminal().and_then(|t| self.store.backend_node(t))
    }

    /// Destroys the realized backend nodes.
    ///
    /// # Errors
    ///
    /// See [`EffectGraphStore::teardown`].
    pub fn teardown<B>(&mut self, backend: &mut B) -> Result<(), BackendError>
    where
        B: RenderBackend + ?Sized,
    {
        self.store.teardown(backend)
    }
}

/// The effect graph for whichever material plan is active.
#[derive(Debug)]
pub enum MaterialGraph {
    /// A translucent acrylic graph.
    Acrylic(AcrylicGraph),
    /// A solid fill graph.
    Solid(SolidGraph),
}

impl MaterialGraph {
    /// Builds the model a plan calls for.
    #[must_use]
    pub fn build<B>(
        backend: &mut B,
        plan: &MaterialPlan,
        crossfade_weight: f64,
        serial: u32,
    ) -> Self
    where
        B: RenderBackend + ?Sized,
    {
        match plan {
            MaterialPlan::Acrylic(params) => {
                Self::Acrylic(AcrylicGraph::build(backend, params, crossfade_weight, serial))
            }
            MaterialPlan::Solid(color) => Self::Solid(SolidGraph::build(*color, serial)),
        }
    }

    /// Retunes the graph to a new plan of the *same* material kind.
    ///
    /// Returns `false` without touching anything when the plan kind differs
    /// from the graph kind; the caller must rebuild instead.
    pub fn apply_plan(&mut self, plan: &MaterialPlan) -> bool {
        match (self, plan) {
            (Self::Acrylic(graph), MaterialPlan::Acrylic(params)) => {
                graph.apply_material_parameters(params);
                true
            }
            (Self::Solid(graph), MaterialPlan::Solid(color)) => {
                graph.set_color(*color);
                true
            }
            _ => false,
        }
    }

    /// Sets the crossfade weight. No-op for a solid graph.
    pub fn set_crossfade_weight(&mut self, weight: f64) {
        if let Self::Acrylic(graph) = self {
            graph.set_crossfade_weight(weight);
        }
    }

    /// Returns the tint path, or `None` for a solid graph.
    #[must_use]
    pub const fn tint_path(&self) -> Option<TintPath> {
        match self {
            Self::Acrylic(graph) => Some(graph.path),
            Self::Solid(_) => None,
        }
    }

    /// Returns the build serial.
    #[must_use]
    pub const fn serial(&self) -> u32 {
        match self {
            Self::Acrylic(graph) => graph.store.serial(),
            Self::Solid(graph) => graph.store.serial(),
        }
    }

    /// Returns how many nodes the graph has.
    #[must_use]
    pub fn node_count(&self) -> u32 {
        match self {
            Self::Acrylic(graph) => graph.store.node_count(),
            Self::Solid(graph) => graph.store.node_count(),
        }
    }

    /// Returns whether the graph has been realized against a backend.
    #[must_use]
    pub const fn is_realized(&self) -> bool {
        match self {
            Self::Acrylic(graph) => graph.store.is_realized(),
            Self::Solid(graph) => graph.store.is_realized(),
        }
    }

    /// Materializes the graph against `backend`.
    ///
    /// # Errors
    ///
    /// See [`EffectGraphStore::realize`].
    pub fn realize<B>(
        &mut self,
        backend: &mut B,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), GraphBuildError>
    where
        B: RenderBackend + ?Sized,
    {
        match self {
            Self::Acrylic(graph) => graph.realize(backend, tracer),
            Self::Solid(graph) => graph.realize(backend, tracer),
        }
    }

    /// Pushes pending parameter changes to the backend.
    pub fn flush_params<B>(&mut self, backend: &mut B, tracer: &mut Tracer<'_>) -> ParamFlush
    where
        B: RenderBackend + ?Sized,
    {
        match self {
            Self::Acrylic(graph) => graph.flush_params(backend, tracer),
            Self::Solid(graph) => graph.flush_params(backend, tracer),
        }
    }

    /// Returns the backend handle of the terminal node, once realized.
    #[must_use]
    pub fn terminal_backend_node(&self) -> Option<BackendNode> {
        match self {
            Self::Acrylic(graph) => graph.terminal_backend_node(),
            Self::Solid(graph) => graph.terminal_backend_node(),
        }
    }

    /// Destroys the realized backend nodes.
    ///
    /// # Errors
    ///
    /// See [`EffectGraphStore::teardown`].
    pub fn teardown<B>(&mut self, backend: &mut B) -> Result<(), BackendError>
    where
        B: RenderBackend + ?Sized,
    {
        match self {
            Self::Acrylic(graph) => graph.teardown(backend),
            Self::Solid(graph) => graph.teardown(backend),
        }
    }
}

/// Clamps a crossfade weight to `[0, 1]`, mapping NaN to full acrylic.
fn clamp_weight(weight: f64) -> f64 {
    if weight.is_nan() {
        1.0
    } else {
        weight.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::backend::{ParamKey, ParamValue};
    use crate::theme::MaterialParameters;

    /// Minimal backend double: hands out sequential node handles and records
    /// create/destroy order.
    struct StubBackend {
        luminosity: bool,
        host_backdrop: bool,
        next: u64,
        created: Vec<(BackendNode, NodeKind)>,
        destroyed: Vec<BackendNode>,
        fail_create_at: Option<usize>,
    }

    impl StubBackend {
        fn new(luminosity: bool, host_backdrop: bool) -> Self {
            Self {
                luminosity,
                host_backdrop,
                next: 1,
                created: Vec::new(),
                destroyed: Vec::new(),
                fail_create_at: None,
            }
        }
    }

    impl RenderBackend for StubBackend {
        fn supports_luminosity_blend(&mut self) -> bool {
            self.luminosity
        }

        fn supports_host_backdrop(&mut self) -> bool {
            self.host_backdrop
        }

        fn create_node(&mut self, kind: NodeKind) -> Result<BackendNode, BackendError> {
            if self.fail_create_at == Some(self.created.len()) {
                return Err(BackendError::CreateFailed(-1));
            }
            let node = BackendNode(self.next);
            self.next += 1;
            self.created.push((node, kind));
            Ok(node)
        }

        fn set_param(
            &mut self,
            _node: BackendNode,
            _key: ParamKey,
            _value: ParamValue,
        ) -> Result<(), BackendError> {
            Ok(())
        }

        fn wire_input(
            &mut self,
            _node: BackendNode,
            _slot: u8,
            _input: BackendNode,
        ) -> Result<(), BackendError> {
            Ok(())
        }

        fn destroy_node(&mut self, node: BackendNode) -> Result<(), BackendError> {
            self.destroyed.push(node);
            Ok(())
        }

        fn create_or_resize_target(
            &mut self,
            _window: crate::host::WindowId,
            _bounds: kurbo::Rect,
            _dpi: u32,
        ) -> Result<(), BackendError> {
            Ok(())
        }

        fn rescale_target(
            &mut self,
            _window: crate::host::WindowId,
            _scale: f64,
        ) -> Result<(), BackendError> {
            Ok(())
        }

        fn draw(&mut self, _terminal: BackendNode) -> Result<(), BackendError> {
            Ok(())
        }

        fn present(&mut self) -> Result<(), BackendError> {
            Ok(())
        }

        fn release_target(
            &mut self,
            _window: crate::host::WindowId,
        ) -> Result<(), BackendError> {
            Ok(())
        }
    }

    #[test]
    fn luminosity_topology() {
        let mut backend = StubBackend::new(true, true);
        let graph = AcrylicGraph::build(&mut backend, &MaterialParameters::DARK, 1.0, 0);
        assert_eq!(graph.path(), TintPath::Luminosity);
        assert_eq!(graph.store().node_count(), 10);
        assert!(graph.nodes().lum_flood.is_some());
        assert!(graph.nodes().saturation.is_none());
        assert_eq!(graph.store().terminal(), Some(graph.nodes().crossfade));
        // Nothing realized yet.
        assert!(backend.created.is_empty());
    }

    #[test]
    fn legacy_topology() {
        let mut backend = StubBackend::new(false, true);
        let graph = AcrylicGraph::build(&mut backend, &MaterialParameters::DARK, 1.0, 0);
        assert_eq!(graph.path(), TintPath::Legacy);
        assert_eq!(graph.store().node_count(), 11);
        assert!(graph.nodes().lum_flood.is_none());
        assert!(graph.nodes().saturation.is_some());
    }

    #[test]
    fn wallpaper_fallback_when_no_host_backdrop() {
        let mut backend = StubBackend::new(true, false);
        let graph = AcrylicGraph::build(&mut backend, &MaterialParameters::LIGHT, 1.0, 0);
        match graph.store().params(graph.nodes().backdrop) {
            NodeParams::Backdrop { source } => assert_eq!(source, BackdropKind::Wallpaper),
            other => panic!("backdrop node has params {other:?}"),
        }
    }

    #[test]
    fn realize_creates_every_node_in_order() {
        let mut backend = StubBackend::new(true, true);
        let mut graph = AcrylicGraph::build(&mut backend, &MaterialParameters::DARK, 1.0, 0);
        graph.realize(&mut backend, &mut Tracer::none()).unwrap();
        assert_eq!(backend.created.len(), 10);
        assert_eq!(backend.created[0].1, NodeKind::Backdrop);
        assert_eq!(backend.created[1].1, NodeKind::Blur);
        assert_eq!(backend.created[9].1, NodeKind::Crossfade);
        assert!(graph.store().is_realized());
        assert_eq!(
            graph.terminal_backend_node(),
            Some(backend.created[9].0),
            "terminal must map to the crossfade's backend handle"
        );
    }

    #[test]
    fn realize_failure_rolls_back_created_nodes() {
        let mut backend = StubBackend::new(true, true);
        backend.fail_create_at = Some(3);
        let mut graph = AcrylicGraph::build(&mut backend, &MaterialParameters::DARK, 1.0, 0);
        let err = graph.realize(&mut backend, &mut Tracer::none()).unwrap_err();
        assert!(matches!(err, GraphBuildError::NodeCreate { .. }));
        // The three created nodes were destroyed again, newest first.
        assert_eq!(backend.destroyed.len(), 3);
        assert_eq!(backend.destroyed[0], backend.created[2].0);
        assert_eq!(backend.destroyed[2], backend.created[0].0);
        assert!(!graph.store().is_realized());
    }

    #[test]
    fn reapplying_identical_parameters_flushes_nothing() {
        let mut backend = StubBackend::new(true, true);
        let mut graph = AcrylicGraph::build(&mut backend, &MaterialParameters::DARK, 1.0, 0);
        graph.realize(&mut backend, &mut Tracer::none()).unwrap();

        graph.apply_material_parameters(&MaterialParameters::DARK);
        let flush = graph.flush_params(&mut backend, &mut Tracer::none());
        assert_eq!(flush.pushed, 0);
        assert_eq!(flush.rejected, 0);

        let mut changed = MaterialParameters::DARK;
        changed.blur_radius_px = 40.0;
        graph.apply_material_parameters(&changed);
        let flush = graph.flush_params(&mut backend, &mut Tracer::none());
        assert_eq!(flush.pushed, 1);
    }

    #[test]
    fn node_handles_survive_parameter_updates() {
        let mut backend = StubBackend::new(true, true);
        let mut graph = AcrylicGraph::build(&mut backend, &MaterialParameters::DARK, 1.0, 0);
        graph.realize(&mut backend, &mut Tracer::none()).unwrap();
        let before = graph.terminal_backend_node();

        let mut changed = MaterialParameters::DARK;
        changed.tint_opacity = 0.5;
        graph.apply_material_parameters(&changed);
        let _ = graph.flush_params(&mut backend, &mut Tracer::none());

        assert_eq!(graph.terminal_backend_node(), before);
        assert_eq!(backend.destroyed.len(), 0, "no node may be recreated");
    }

    #[test]
    fn crossfade_weight_is_clamped() {
        let mut backend = StubBackend::new(true, true);
        let mut graph = AcrylicGraph::build(&mut backend, &MaterialParameters::DARK, 1.0, 0);
        graph.set_crossfade_weight(7.5);
        match graph.store().params(graph.nodes().crossfade) {
            NodeParams::Crossfade { weight } => assert_eq!(weight, 1.0),
            other => panic!("crossfade node has params {other:?}"),
        }
        graph.set_crossfade_weight(-2.0);
        match graph.store().params(graph.nodes().crossfade) {
            NodeParams::Crossfade { weight } => assert_eq!(weight, 0.0),
            other => panic!("crossfade node has params {other:?}"),
        }
    }

    #[test]
    fn teardown_destroys_in_reverse_order() {
        let mut backend = StubBackend::new(false, true);
        let mut graph = AcrylicGraph::build(&mut backend, &MaterialParameters::LIGHT, 1.0, 0);
        graph.realize(&mut backend, &mut Tracer::none()).unwrap();
        graph.teardown(&mut backend).unwrap();
        assert_eq!(backend.destroyed.len(), 11);
        assert_eq!(backend.destroyed[0], backend.created[10].0);
        assert_eq!(backend.destroyed[10], backend.created[0].0);
        assert!(!graph.store().is_realized());
    }

    #[test]
    fn solid_graph_is_one_flood() {
        let graph = SolidGraph::build(Rgba8::opaque(0, 0, 0), 4);
        assert_eq!(graph.store().node_count(), 1);
        assert_eq!(graph.store().serial(), 4);
        assert!(graph.store().terminal().is_some());
    }

    #[test]
    fn material_graph_follows_plan() {
        let mut backend = StubBackend::new(true, true);
        let acrylic = MaterialGraph::build(
            &mut backend,
            &MaterialPlan::Acrylic(MaterialParameters::LIGHT),
            1.0,
            0,
        );
        assert_eq!(acrylic.tint_path(), Some(TintPath::Luminosity));
        assert_eq!(acrylic.node_count(), 10);

        let solid = MaterialGraph::build(
            &mut backend,
            &MaterialPlan::Solid(Rgba8::opaque(0, 0, 0)),
            1.0,
            1,
        );
        assert_eq!(solid.tint_path(), None);
        assert_eq!(solid.node_count(), 1);
    }

    #[test]
    fn apply_plan_refuses_kind_change() {
        let mut backend = StubBackend::new(true, true);
        let mut graph = MaterialGraph::build(
            &mut backend,
            &MaterialPlan::Acrylic(MaterialParameters::LIGHT),
            1.0,
            0,
        );
        assert!(graph.apply_plan(&MaterialPlan::Acrylic(MaterialParameters::DARK)));
        assert!(!graph.apply_plan(&MaterialPlan::Solid(Rgba8::opaque(0, 0, 0))));
    }
}
