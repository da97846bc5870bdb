// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The window frame state machine.
//!
//! [`WindowFrame`] ties everything together for one window: it owns the
//! [`WindowModel`], the [`CompositionSurface`], the effect graph and the
//! drag sink, and advances them in response to [`HostEvent`]s. The host
//! shell translates native messages into events, calls
//! [`handle`](WindowFrame::handle), and translates the [`EventReply`] back.
//!
//! Handlers mutate the model through its setters and then call one
//! propagation step that reads the accumulated
//! [`ModelChanges`](super::ModelChanges) and pushes only the touched fields
//! downstream: frame margins on visibility or DPI
//! change, surface scale on DPI change, surface and sink geometry on size
//! change. Each `handle` call fully settles before returning, so hosts can
//! deliver events in plain message order without batching.
//!
//! # Failure policy
//!
//! Construction failures abort [`create`](WindowFrame::create) and return a
//! [`CreateError`]; nothing acquired so far is leaked. After construction,
//! per-event failures never escape `handle`: they are traced as recoverable
//! and the window carries on, possibly visually imperfect. Teardown is best
//! effort and total: every resource is released even when some releases
//! fail, and the frame always reaches [`FrameState::Destroyed`].

use alloc::vec::Vec;
use core::fmt;

use crate::backend::{BackendError, RenderBackend};
use crate::dragsink::{DragSink, sink_rect, structural_reply};
use crate::geometry::{FrameMargins, PhysPoint, PhysRect, PhysSize};
use crate::graph::{GraphBuildError, MaterialGraph};
use crate::host::{CursorKind, HostError, SystemMenuState, WindowHost, WindowId};
use crate::metrics::BaselineMetrics;
use crate::surface::{CompositionSurface, PresentError, PresentOutcome, surface_bounds};
use crate::theme::{MaterialOverrides, MaterialPlan, Theme, resolve_material};
use crate::trace::{
    DestroyedEvent, DispatchEvent, FrameCreatedEvent, GraphBuiltEvent, GraphParamsEvent,
    HostEventKind, MetricsEvent, PresentedEvent, RecoverableErrorEvent, RecoverableOp, ReplyKind,
    SurfaceEvent, SurfaceOp, TeardownStepEvent, ThemeEvent, Tracer, VisibilityEvent,
};

use super::events::{EventReply, HostEvent, PointerMessage, SettingKey};
use super::model::{FrameState, Visibility, WindowModel};
use super::nonclient::{HitTestZone, classify_hit, compute_client_area};

/// Per-window configuration supplied at creation.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct FrameConfig {
    /// Material overrides applied over the theme preset.
    pub overrides: MaterialOverrides,
    /// Crossfade weight between the solid fallback (`0.0`) and full acrylic
    /// (`1.0`). Policy belongs to the embedding application; the frame only
    /// applies it.
    pub crossfade_weight: f64,
    /// Weight to switch to while a move or size loop runs, restoring
    /// `crossfade_weight` when it ends. `None` keeps the weight steady.
    pub drag_crossfade_weight: Option<f64>,
}

impl Default for FrameConfig {
    /// No overrides, fully acrylic, no drag fallback.
    fn default() -> Self {
        Self {
            overrides: MaterialOverrides::default(),
            crossfade_weight: 1.0,
            drag_crossfade_weight: None,
        }
    }
}

/// A fatal window construction failure.
///
/// The caller must not show the window; whatever [`WindowFrame::create`]
/// acquired before the failure has already been released.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CreateError {
    /// Binding the composition surface to the window failed.
    Attach(BackendError),
    /// Realizing the initial effect graph failed.
    Graph(GraphBuildError),
    /// Creating the drag sink child window failed.
    DragSink(HostError),
}

impl fmt::Display for CreateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attach(e) => write!(f, "attaching composition surface: {e}"),
            Self::Graph(e) => write!(f, "building effect graph: {e}"),
            Self::DragSink(e) => write!(f, "creating drag sink: {e}"),
        }
    }
}

impl core::error::Error for CreateError {}

/// A resource released during teardown.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TeardownResource {
    /// The realized effect graph nodes.
    EffectGraph,
    /// The composition surface target.
    Surface,
    /// The drag sink child window.
    DragSink,
    /// The frame's claim on the main window handle.
    WindowHandle,
}

/// One failed release during teardown.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TeardownFailure {
    /// The resource whose release failed.
    pub resource: TeardownResource,
    /// The raw host or backend error code.
    pub code: i32,
}

/// The outcome of a [`WindowFrame::close`] call.
///
/// Teardown always runs to completion; this only records which releases
/// failed along the way.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct TeardownReport {
    /// Releases that failed, in teardown order.
    pub failures: Vec<TeardownFailure>,
}

impl TeardownReport {
    /// Whether every release succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The custom chrome frame for one top-level window.
#[derive(Debug)]
pub struct WindowFrame {
    model: WindowModel,
    state: FrameState,
    baseline: BaselineMetrics,
    config: FrameConfig,
    surface: CompositionSurface,
    graph: Option<MaterialGraph>,
    drag_sink: DragSink,
    /// Screen position of the last hit test, reused by cursor updates.
    last_hit_screen: Option<PhysPoint>,
    move_size_active: bool,
}

impl WindowFrame {
    /// Builds the frame for `window`: reads the host's metrics and theme,
    /// extends the frame margins, attaches the composition surface, realizes
    /// the effect graph and creates the drag sink.
    ///
    /// # Errors
    ///
    /// Returns a [`CreateError`] naming the step that failed. Resources
    /// acquired before the failing step are released before returning.
    pub fn create<H, B>(
        host: &mut H,
        backend: &mut B,
        window: WindowId,
        config: FrameConfig,
        tracer: &mut Tracer<'_>,
    ) -> Result<Self, CreateError>
    where
        H: WindowHost + ?Sized,
        B: RenderBackend + ?Sized,
    {
        let geometry = host.window_geometry(window);
        let dpi = host.dpi_for(window);
        let baseline = host.baseline_metrics();
        let theme = Theme::resolve(host.theme_signals());

        let mut frame = Self {
            model: WindowModel::new(window, geometry, dpi, theme),
            state: FrameState::Unrealized,
            baseline,
            config,
            surface: CompositionSurface::new(),
            graph: None,
            drag_sink: DragSink::new(),
            last_hit_screen: None,
            move_size_active: false,
        };

        _ = host.enable_nonclient_dpi_scaling(window);
        frame.push_frame_margins(host, tracer);

        let plan = resolve_material(theme, &config.overrides, host.system_window_color());
        tracer.theme(&ThemeEvent {
            theme,
            solid: matches!(plan, MaterialPlan::Solid(_)),
        });

        let client = geometry.size();
        let metrics = frame.model.metrics(&baseline);
        frame
            .surface
            .attach(backend, window, client, metrics.title_bar_height, dpi)
            .map_err(CreateError::Attach)?;
        tracer.surface(&SurfaceEvent {
            op: SurfaceOp::Attached,
            bounds: surface_bounds(client, metrics.title_bar_height),
            dpi,
        });

        let mut graph = MaterialGraph::build(backend, &plan, config.crossfade_weight, 0);
        if let Err(e) = graph.realize(backend, tracer) {
            let _ = frame.surface.teardown(backend);
            return Err(CreateError::Graph(e));
        }
        tracer.graph_built(&GraphBuiltEvent {
            path: graph.tint_path(),
            nodes: graph.node_count(),
            rebuilt: false,
        });
        frame.graph = Some(graph);

        let rect = sink_rect(client.width, metrics.title_bar_height);
        if let Err(e) = frame.drag_sink.create(host, window, rect) {
            if let Some(mut graph) = frame.graph.take() {
                let _ = graph.teardown(backend);
            }
            let _ = frame.surface.teardown(backend);
            return Err(CreateError::DragSink(e));
        }

        frame.model.take_changes();
        frame.state = FrameState::Normal;
        tracer.frame_created(&FrameCreatedEvent {
            window,
            dpi,
            width: client.width,
            height: client.height,
        });
        Ok(frame)
    }

    /// The lifecycle state.
    #[must_use]
    pub const fn state(&self) -> FrameState {
        self.state
    }

    /// The window model.
    #[must_use]
    pub const fn model(&self) -> &WindowModel {
        &self.model
    }

    /// The composition surface.
    #[must_use]
    pub const fn surface(&self) -> &CompositionSurface {
        &self.surface
    }

    /// The effect graph, while one exists.
    #[must_use]
    pub const fn graph(&self) -> Option<&MaterialGraph> {
        self.graph.as_ref()
    }

    /// The drag sink child.
    #[must_use]
    pub const fn drag_sink(&self) -> &DragSink {
        &self.drag_sink
    }

    /// The configuration the frame was created with.
    #[must_use]
    pub const fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Dispatches one host event.
    ///
    /// Events arriving while the frame is closing or destroyed are answered
    /// [`EventReply::Ignored`]; hosts deliver messages reentrantly during
    /// teardown and must observe "already gone", not a half-dead frame.
    pub fn handle<H, B>(
        &mut self,
        host: &mut H,
        backend: &mut B,
        event: HostEvent,
        tracer: &mut Tracer<'_>,
    ) -> EventReply
    where
        H: WindowHost + ?Sized,
        B: RenderBackend + ?Sized,
    {
        let kind = HostEventKind::from(&event);
        let reply = if self.state.is_live() {
            self.dispatch(host, backend, event, tracer)
        } else {
            EventReply::Ignored
        };
        tracer.dispatch(&DispatchEvent {
            event: kind,
            reply: ReplyKind::from(&reply),
        });
        reply
    }

    fn dispatch<H, B>(
        &mut self,
        host: &mut H,
        backend: &mut B,
        event: HostEvent,
        tracer: &mut Tracer<'_>,
    ) -> EventReply
    where
        H: WindowHost + ?Sized,
        B: RenderBackend + ?Sized,
    {
        match event {
            HostEvent::SizeChanged { visibility, size } => {
                self.on_size_changed(host, backend, visibility, size, tracer)
            }
            HostEvent::DpiChanged {
                dpi_x,
                dpi_y,
                suggested,
            } => self.on_dpi_changed(host, backend, dpi_x, dpi_y, suggested, tracer),
            HostEvent::CalcClientArea { proposed } => self.on_calc_client_area(host, proposed),
            HostEvent::HitTest { screen } => {
                self.last_hit_screen = Some(screen);
                EventReply::HitTest(self.hit_zone(host, screen))
            }
            HostEvent::CursorUpdate => self.on_cursor_update(host),
            HostEvent::NcRightClick { screen } => self.on_nc_right_click(host, screen),
            HostEvent::SettingChanged { key } => match key {
                SettingKey::ImmersiveColorSet => self.refresh_theme(host, backend, tracer),
                SettingKey::Other => EventReply::Ignored,
            },
            HostEvent::ColorizationChanged => self.refresh_theme(host, backend, tracer),
            HostEvent::FocusChanged { active } => {
                self.model.set_active(active);
                self.propagate(host, backend, false, tracer);
                EventReply::Handled
            }
            HostEvent::MoveSizeLoop { active } => self.on_move_size_loop(backend, active, tracer),
            HostEvent::SinkPointer { message, screen } => {
                self.on_sink_pointer(host, message, screen)
            }
            HostEvent::SinkStructural(message) => EventReply::Sink(structural_reply(message)),
            HostEvent::CloseRequested => {
                self.close(host, backend, tracer);
                EventReply::Handled
            }
        }
    }

    fn on_size_changed<H, B>(
        &mut self,
        host: &mut H,
        backend: &mut B,
        visibility: Visibility,
        size: PhysSize,
        tracer: &mut Tracer<'_>,
    ) -> EventReply
    where
        H: WindowHost + ?Sized,
        B: RenderBackend + ?Sized,
    {
        let from = self.model.visibility();
        if self.model.set_visibility(visibility) {
            tracer.visibility(&VisibilityEvent {
                from,
                to: visibility,
            });
            if let Some(state) = FrameState::for_visibility(visibility) {
                self.state = state;
            }
        }
        let origin = self.model.geometry().origin();
        self.model.set_geometry(PhysRect::from_origin_size(origin, size));
        // The size goes downstream even when nothing changed; a plain resize
        // to the same dimensions still re-syncs the surface and the sink.
        self.propagate(host, backend, true, tracer);
        EventReply::Handled
    }

    fn on_dpi_changed<H, B>(
        &mut self,
        host: &mut H,
        backend: &mut B,
        dpi_x: u32,
        dpi_y: u32,
        suggested: PhysRect,
        tracer: &mut Tracer<'_>,
    ) -> EventReply
    where
        H: WindowHost + ?Sized,
        B: RenderBackend + ?Sized,
    {
        // Hosts report per-axis DPI; the frame runs on their rounded average.
        let dpi = (dpi_x + dpi_y + 1) / 2;
        self.model.set_dpi(dpi);
        // The host pre-computed the rectangle for the new DPI; move there
        // before resizing anything downstream.
        if let Err(e) = host.move_window(self.model.window(), suggested) {
            tracer.recoverable_error(&RecoverableErrorEvent {
                op: RecoverableOp::MoveWindow,
                code: e.raw_code(),
            });
        }
        self.model.set_geometry(suggested);
        self.propagate(host, backend, false, tracer);
        EventReply::Handled
    }

    fn on_calc_client_area<H>(&mut self, host: &mut H, proposed: PhysRect) -> EventReply
    where
        H: WindowHost + ?Sized,
    {
        let window = self.model.window();
        let default_applied = host.apply_default_frame(window, proposed);
        let autohide = host.autohide_taskbar_edge(window);
        let metrics = self.model.metrics(&self.baseline);
        EventReply::ClientArea(compute_client_area(
            proposed,
            default_applied,
            self.model.visibility(),
            &metrics,
            autohide,
        ))
    }

    fn on_cursor_update<H>(&mut self, host: &mut H) -> EventReply
    where
        H: WindowHost + ?Sized,
    {
        // Re-run the hit test at the last message position instead of
        // querying the cursor fresh, staying consistent with the message
        // that triggered this event.
        let zone = match self.last_hit_screen {
            Some(screen) => self.hit_zone(host, screen),
            None => HitTestZone::Client,
        };
        let cursor = if zone == HitTestZone::TopResizeBorder {
            CursorKind::SizeNorthSouth
        } else {
            CursorKind::Arrow
        };
        host.set_cursor(cursor);
        EventReply::Handled
    }

    fn on_nc_right_click<H>(&mut self, host: &mut H, screen: PhysPoint) -> EventReply
    where
        H: WindowHost + ?Sized,
    {
        if self.hit_zone(host, screen) != HitTestZone::TitleBar {
            return EventReply::Ignored;
        }
        let window = self.model.window();
        let state = SystemMenuState::for_visibility(self.model.visibility());
        if let Some(command) = host.show_system_menu(window, screen, state) {
            host.post_system_command(window, command);
        }
        EventReply::Handled
    }

    fn on_move_size_loop<B>(
        &mut self,
        backend: &mut B,
        active: bool,
        tracer: &mut Tracer<'_>,
    ) -> EventReply
    where
        B: RenderBackend + ?Sized,
    {
        self.move_size_active = active;
        if self.config.drag_crossfade_weight.is_some() {
            let weight = self.active_crossfade_weight();
            if let Some(graph) = &mut self.graph {
                graph.set_crossfade_weight(weight);
            }
            self.flush_graph_params(backend, tracer);
        }
        EventReply::Handled
    }

    fn on_sink_pointer<H>(
        &mut self,
        host: &mut H,
        message: PointerMessage,
        screen: PhysPoint,
    ) -> EventReply
    where
        H: WindowHost + ?Sized,
    {
        // The sink translated the click to screen coordinates already.
        // Classify it and re-post as a non-client message so the host runs
        // its stock drag, resize and double-click handling.
        self.last_hit_screen = Some(screen);
        let zone = self.hit_zone(host, screen);
        host.post_nonclient_pointer(self.model.window(), message, zone, screen);
        EventReply::Handled
    }

    /// Re-resolves the theme from host signals and retunes or rebuilds the
    /// effect graph to match.
    ///
    /// Runs even when the theme enum value is unchanged: a colorization
    /// change can alter the system window color behind a high contrast
    /// solid fill without flipping the theme.
    fn refresh_theme<H, B>(
        &mut self,
        host: &mut H,
        backend: &mut B,
        tracer: &mut Tracer<'_>,
    ) -> EventReply
    where
        H: WindowHost + ?Sized,
        B: RenderBackend + ?Sized,
    {
        let theme = Theme::resolve(host.theme_signals());
        self.model.set_theme(theme);
        let plan = resolve_material(theme, &self.config.overrides, host.system_window_color());
        tracer.theme(&ThemeEvent {
            theme,
            solid: matches!(plan, MaterialPlan::Solid(_)),
        });
        self.apply_plan(backend, &plan, tracer);
        self.propagate(host, backend, false, tracer);
        EventReply::Handled
    }

    /// Retunes the live graph to `plan`, rebuilding topology only when the
    /// material kind changed (acrylic to solid or back).
    fn apply_plan<B>(&mut self, backend: &mut B, plan: &MaterialPlan, tracer: &mut Tracer<'_>)
    where
        B: RenderBackend + ?Sized,
    {
        let Some(graph) = &mut self.graph else {
            return;
        };
        if graph.apply_plan(plan) {
            self.flush_graph_params(backend, tracer);
            return;
        }
        let serial = graph.serial() + 1;
        let weight = match self.config.drag_crossfade_weight {
            Some(w) if self.move_size_active => w,
            _ => self.config.crossfade_weight,
        };
        let mut next = MaterialGraph::build(backend, plan, weight, serial);
        match next.realize(backend, tracer) {
            Ok(()) => {
                if let Err(e) = graph.teardown(backend) {
                    tracer.recoverable_error(&RecoverableErrorEvent {
                        op: RecoverableOp::GraphRebuild,
                        code: e.raw_code(),
                    });
                }
                tracer.graph_built(&GraphBuiltEvent {
                    path: next.tint_path(),
                    nodes: next.node_count(),
                    rebuilt: true,
                });
                *graph = next;
            }
            Err(e) => {
                // Keep the old graph: a window showing the previous material
                // beats a window with none.
                tracer.recoverable_error(&RecoverableErrorEvent {
                    op: RecoverableOp::GraphRebuild,
                    code: e.raw_code(),
                });
            }
        }
    }

    /// Sets the fallback crossfade weight and pushes it to the backend.
    ///
    /// This is the hook for reduced transparency policies; the embedding
    /// application decides when to call it. While a drag override is active
    /// the new weight takes effect when the move or size loop ends.
    pub fn set_crossfade_weight<B>(&mut self, backend: &mut B, weight: f64, tracer: &mut Tracer<'_>)
    where
        B: RenderBackend + ?Sized,
    {
        self.config.crossfade_weight = weight;
        let effective = self.active_crossfade_weight();
        if let Some(graph) = &mut self.graph {
            graph.set_crossfade_weight(effective);
        }
        self.flush_graph_params(backend, tracer);
    }

    /// Flushes pending graph parameters and presents the terminal node.
    ///
    /// # Errors
    ///
    /// Returns [`PresentError::NoGraph`] without a realized graph, otherwise
    /// whatever [`CompositionSurface::present`] reports. A
    /// [`PresentOutcome::RetryNextFrame`] is a success: the frame was
    /// dropped, present again next cycle.
    pub fn present<B>(
        &mut self,
        backend: &mut B,
        tracer: &mut Tracer<'_>,
    ) -> Result<PresentOutcome, PresentError>
    where
        B: RenderBackend + ?Sized,
    {
        self.flush_graph_params(backend, tracer);
        let terminal = self
            .graph
            .as_ref()
            .and_then(MaterialGraph::terminal_backend_node)
            .ok_or(PresentError::NoGraph)?;
        let outcome = self.surface.present(backend, terminal)?;
        tracer.presented(&PresentedEvent { outcome });
        Ok(outcome)
    }

    /// Tears the frame down: effect graph, then surface, then drag sink,
    /// then the window handle claim.
    ///
    /// Teardown is best effort and total. A failed release is recorded in
    /// the report and the remaining resources are still released; the frame
    /// reaches [`FrameState::Destroyed`] regardless. Calling `close` again
    /// afterwards is a no-op.
    pub fn close<H, B>(
        &mut self,
        host: &mut H,
        backend: &mut B,
        tracer: &mut Tracer<'_>,
    ) -> TeardownReport
    where
        H: WindowHost + ?Sized,
        B: RenderBackend + ?Sized,
    {
        let mut report = TeardownReport::default();
        if !self.state.is_live() {
            return report;
        }
        self.state = FrameState::Closing;

        // Graph nodes live on the device the surface fronts; release them
        // first, then the target, then the input child, then the handle.
        if let Some(mut graph) = self.graph.take() {
            let result = graph.teardown(backend).map_err(|e| e.raw_code());
            record_step(&mut report, TeardownResource::EffectGraph, result, tracer);
        }

        let result = self.surface.teardown(backend).map_err(|e| e.raw_code());
        record_step(&mut report, TeardownResource::Surface, result, tracer);

        let result = self.drag_sink.destroy(host).map_err(|e| e.raw_code());
        record_step(&mut report, TeardownResource::DragSink, result, tracer);

        let result = host
            .release_window(self.model.window())
            .map_err(|e| e.raw_code());
        record_step(&mut report, TeardownResource::WindowHandle, result, tracer);

        self.state = FrameState::Destroyed;
        tracer.destroyed(&DestroyedEvent {
            window: self.model.window(),
            clean: report.is_clean(),
        });
        report
    }

    /// Pushes accumulated model changes downstream, plus the current size
    /// when `force_size` is set.
    fn propagate<H, B>(
        &mut self,
        host: &mut H,
        backend: &mut B,
        force_size: bool,
        tracer: &mut Tracer<'_>,
    ) where
        H: WindowHost + ?Sized,
        B: RenderBackend + ?Sized,
    {
        let changes = self.model.take_changes();
        if !changes.any() && !force_size {
            return;
        }
        // Metrics follow visibility and DPI; re-extend the frame before any
        // geometry goes downstream. A minimized window has no frame on
        // screen to extend.
        if (changes.visibility || changes.dpi)
            && self.model.visibility() != Visibility::Minimized
        {
            self.push_frame_margins(host, tracer);
        }
        if changes.dpi {
            let dpi = self.model.dpi();
            if let Err(e) = self.surface.rescale(backend, dpi) {
                tracer.recoverable_error(&RecoverableErrorEvent {
                    op: RecoverableOp::SurfaceRescale,
                    code: e.raw_code(),
                });
            } else if let Some(bounds) = self.surface.bounds() {
                tracer.surface(&SurfaceEvent {
                    op: SurfaceOp::Rescaled,
                    bounds,
                    dpi,
                });
            }
        }
        // A DPI change moves the title bar height even when the suggested
        // rectangle matches the old one, so it re-syncs sizes as well.
        if changes.geometry || changes.dpi || force_size {
            self.sync_size(host, backend, self.model.geometry().size(), tracer);
        }
        // Theme changes push a material plan and are handled eagerly in
        // `refresh_theme`; activation has no downstream consumer.
    }

    /// Recomputes metrics and re-extends the frame into the client area.
    fn push_frame_margins<H>(&mut self, host: &mut H, tracer: &mut Tracer<'_>)
    where
        H: WindowHost + ?Sized,
    {
        let metrics = self.model.metrics(&self.baseline);
        tracer.metrics(&MetricsEvent {
            dpi: self.model.dpi(),
            metrics,
        });
        let window = self.model.window();
        _ = host.extend_frame_into_client(window, FrameMargins::top_only(metrics.top_frame_margin));
        if let Err(e) = host.trigger_frame_changed(window) {
            tracer.recoverable_error(&RecoverableErrorEvent {
                op: RecoverableOp::FrameChanged,
                code: e.raw_code(),
            });
        }
    }

    /// Re-syncs the surface target and the drag sink to a client size.
    fn sync_size<H, B>(
        &mut self,
        host: &mut H,
        backend: &mut B,
        size: PhysSize,
        tracer: &mut Tracer<'_>,
    ) where
        H: WindowHost + ?Sized,
        B: RenderBackend + ?Sized,
    {
        let metrics = self.model.metrics(&self.baseline);
        if let Err(e) = self.surface.resize(backend, size, metrics.title_bar_height) {
            tracer.recoverable_error(&RecoverableErrorEvent {
                op: RecoverableOp::SurfaceResize,
                code: e.raw_code(),
            });
        } else if let (Some(bounds), Some(dpi)) = (self.surface.bounds(), self.surface.dpi()) {
            tracer.surface(&SurfaceEvent {
                op: SurfaceOp::Resized,
                bounds,
                dpi,
            });
        }
        let rect = sink_rect(size.width, metrics.title_bar_height);
        if let Err(e) = self.drag_sink.sync_geometry(host, rect) {
            tracer.recoverable_error(&RecoverableErrorEvent {
                op: RecoverableOp::DragSinkSync,
                code: e.raw_code(),
            });
        }
    }

    /// Runs the layered hit test for a screen point: host default first,
    /// then the synthetic top zones.
    fn hit_zone<H>(&mut self, host: &mut H, screen: PhysPoint) -> HitTestZone
    where
        H: WindowHost + ?Sized,
    {
        let window = self.model.window();
        let default = host.default_hit_test(window, screen);
        let metrics = self.model.metrics(&self.baseline);
        let origin = self.model.geometry().origin();
        let local = PhysPoint::new(screen.x - origin.x, screen.y - origin.y);
        classify_hit(local, self.model.visibility(), &metrics, default)
    }

    fn flush_graph_params<B>(&mut self, backend: &mut B, tracer: &mut Tracer<'_>)
    where
        B: RenderBackend + ?Sized,
    {
        if let Some(graph) = &mut self.graph {
            let flush = graph.flush_params(backend, tracer);
            if flush.pushed != 0 || flush.rejected != 0 {
                tracer.graph_params(&GraphParamsEvent {
                    pushed: flush.pushed,
                    rejected: flush.rejected,
                });
            }
        }
    }

    fn active_crossfade_weight(&self) -> f64 {
        match self.config.drag_crossfade_weight {
            Some(w) if self.move_size_active => w,
            _ => self.config.crossfade_weight,
        }
    }
}

fn record_step(
    report: &mut TeardownReport,
    resource: TeardownResource,
    result: Result<(), i32>,
    tracer: &mut Tracer<'_>,
) {
    let code = match result {
        Ok(()) => 0,
        Err(code) => {
            report.failures.push(TeardownFailure { resource, code });
            code
        }
    };
    tracer.teardown_step(&TeardownStepEvent {
        resource,
        ok: result.is_ok(),
        code,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_fully_acrylic() {
        let config = FrameConfig::default();
        assert_eq!(config.crossfade_weight, 1.0);
        assert_eq!(config.drag_crossfade_weight, None);
        assert_eq!(config.overrides, MaterialOverrides::default());
    }

    #[test]
    fn teardown_report_tracks_cleanliness() {
        let mut report = TeardownReport::default();
        assert!(report.is_clean());
        report.failures.push(TeardownFailure {
            resource: TeardownResource::DragSink,
            code: -7,
        });
        assert!(!report.is_clean());
    }

    #[test]
    fn create_error_names_the_failed_step() {
        use alloc::format;

        let e = CreateError::DragSink(HostError::ChildCreateFailed(-3));
        assert_eq!(
            format!("{e}"),
            "creating drag sink: child window creation failed (code -3)"
        );
    }
}
