// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the window frame.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! frame calls as it dispatches host events, rebuilds the effect graph and
//! presents frames. All method bodies default to no-ops, so implementing only
//! the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.
//!
//! Recoverable failures are not errors: the frame carries on after them, and
//! [`RecoverableErrorEvent`] is the only record they leave. A sink that wants
//! to watch a window degrade should start there.
//!
//! # Crate features
//!
//! - `trace` enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) gates the per-node
//!   [`NodeRealizedEvent`] and [`ParamPushEvent`] plus the corresponding
//!   `TraceSink` methods.

use kurbo::Rect;

#[cfg(feature = "trace-rich")]
use crate::backend::{BackendNode, NodeKind};
use crate::graph::TintPath;
use crate::host::WindowId;
use crate::metrics::FrameMetrics;
use crate::surface::PresentOutcome;
use crate::theme::Theme;
use crate::window::{EventReply, HostEvent, TeardownResource, Visibility};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The kind of a dispatched host event, without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostEventKind {
    /// Window size or visibility changed.
    SizeChanged,
    /// Window DPI changed.
    DpiChanged,
    /// Client area calculation requested.
    CalcClientArea,
    /// Non-client hit test requested.
    HitTest,
    /// Cursor shape update requested.
    CursorUpdate,
    /// Right click in the non-client area.
    NcRightClick,
    /// A system setting changed.
    SettingChanged,
    /// System colorization changed.
    ColorizationChanged,
    /// Window activation changed.
    FocusChanged,
    /// A move or size loop started or ended.
    MoveSizeLoop,
    /// Pointer message forwarded from the drag sink.
    SinkPointer,
    /// Structural message from the drag sink.
    SinkStructural,
    /// The window was asked to close.
    CloseRequested,
}

impl From<&HostEvent> for HostEventKind {
    fn from(event: &HostEvent) -> Self {
        match event {
            HostEvent::SizeChanged { .. } => Self::SizeChanged,
            HostEvent::DpiChanged { .. } => Self::DpiChanged,
            HostEvent::CalcClientArea { .. } => Self::CalcClientArea,
            HostEvent::HitTest { .. } => Self::HitTest,
            HostEvent::CursorUpdate => Self::CursorUpdate,
            HostEvent::NcRightClick { .. } => Self::NcRightClick,
            HostEvent::SettingChanged { .. } => Self::SettingChanged,
            HostEvent::ColorizationChanged => Self::ColorizationChanged,
            HostEvent::FocusChanged { .. } => Self::FocusChanged,
            HostEvent::MoveSizeLoop { .. } => Self::MoveSizeLoop,
            HostEvent::SinkPointer { .. } => Self::SinkPointer,
            HostEvent::SinkStructural(_) => Self::SinkStructural,
            HostEvent::CloseRequested => Self::CloseRequested,
        }
    }
}

/// The kind of reply an event dispatch produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReplyKind {
    /// The event was consumed.
    Handled,
    /// The event was not the frame's to handle.
    Ignored,
    /// A hit test zone.
    HitTest,
    /// A computed client area.
    ClientArea,
    /// A drag sink acknowledgment.
    Sink,
}

impl From<&EventReply> for ReplyKind {
    fn from(reply: &EventReply) -> Self {
        match reply {
            EventReply::Handled => Self::Handled,
            EventReply::Ignored => Self::Ignored,
            EventReply::HitTest(_) => Self::HitTest,
            EventReply::ClientArea(_) => Self::ClientArea,
            EventReply::Sink(_) => Self::Sink,
        }
    }
}

/// Which composition surface operation ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceOp {
    /// The surface was bound to a window.
    Attached,
    /// The surface bounds changed.
    Resized,
    /// The surface scale changed.
    Rescaled,
    /// The surface target was released.
    Released,
}

/// Which frame operation failed recoverably.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecoverableOp {
    /// Extending the frame into the client area.
    ExtendFrameMargins,
    /// Forcing a frame re-evaluation.
    FrameChanged,
    /// Repositioning the window after a DPI change.
    MoveWindow,
    /// Resizing the composition surface.
    SurfaceResize,
    /// Rescaling the composition surface.
    SurfaceRescale,
    /// Moving the drag sink child.
    DragSinkSync,
    /// Pushing an effect parameter.
    ParamPush,
    /// Rebuilding the effect graph after a theme change.
    GraphRebuild,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted once when a window frame finishes creation.
#[derive(Clone, Copy, Debug)]
pub struct FrameCreatedEvent {
    /// The window the frame wraps.
    pub window: WindowId,
    /// DPI at creation.
    pub dpi: u32,
    /// Outer size at creation, in physical pixels.
    pub width: i32,
    /// Outer height at creation, in physical pixels.
    pub height: i32,
}

/// Emitted after every host event dispatch.
#[derive(Clone, Copy, Debug)]
pub struct DispatchEvent {
    /// What kind of event was dispatched.
    pub event: HostEventKind,
    /// What kind of reply it produced.
    pub reply: ReplyKind,
}

/// Emitted when frame metrics are recomputed.
#[derive(Clone, Copy, Debug)]
pub struct MetricsEvent {
    /// DPI the metrics were computed for.
    pub dpi: u32,
    /// The computed metrics.
    pub metrics: FrameMetrics,
}

/// Emitted when window visibility changes.
#[derive(Clone, Copy, Debug)]
pub struct VisibilityEvent {
    /// Previous visibility.
    pub from: Visibility,
    /// New visibility.
    pub to: Visibility,
}

/// Emitted when the theme is re-resolved.
#[derive(Clone, Copy, Debug)]
pub struct ThemeEvent {
    /// The resolved theme.
    pub theme: Theme,
    /// Whether the material plan is a solid fill rather than acrylic.
    pub solid: bool,
}

/// Emitted after an effect graph build or rebuild.
#[derive(Clone, Copy, Debug)]
pub struct GraphBuiltEvent {
    /// The tint path chosen, or `None` for a solid graph.
    pub path: Option<TintPath>,
    /// How many nodes the graph has.
    pub nodes: u32,
    /// `false` for the initial build, `true` for a theme-change rebuild.
    pub rebuilt: bool,
}

/// Emitted after a parameter flush.
#[derive(Clone, Copy, Debug)]
pub struct GraphParamsEvent {
    /// Parameters pushed successfully.
    pub pushed: u32,
    /// Parameters the backend rejected.
    pub rejected: u32,
}

/// Emitted after a composition surface operation.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceEvent {
    /// Which operation ran.
    pub op: SurfaceOp,
    /// Surface bounds after the operation.
    pub bounds: Rect,
    /// Surface DPI after the operation.
    pub dpi: u32,
}

/// Emitted after a present attempt.
#[derive(Clone, Copy, Debug)]
pub struct PresentedEvent {
    /// How the present ended.
    pub outcome: PresentOutcome,
}

/// Emitted when a recoverable operation fails.
#[derive(Clone, Copy, Debug)]
pub struct RecoverableErrorEvent {
    /// Which operation failed.
    pub op: RecoverableOp,
    /// The raw host or backend error code.
    pub code: i32,
}

/// Emitted for each resource released during teardown.
#[derive(Clone, Copy, Debug)]
pub struct TeardownStepEvent {
    /// Which resource was torn down.
    pub resource: TeardownResource,
    /// Whether the release succeeded.
    pub ok: bool,
    /// The raw error code on failure, zero on success.
    pub code: i32,
}

/// Emitted once when teardown completes.
#[derive(Clone, Copy, Debug)]
pub struct DestroyedEvent {
    /// The window the frame wrapped.
    pub window: WindowId,
    /// Whether every teardown step succeeded.
    pub clean: bool,
}

/// Emitted per node while realizing a graph (requires `trace-rich`).
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct NodeRealizedEvent {
    /// Model-side node index.
    pub node_index: u32,
    /// Node kind.
    pub kind: NodeKind,
    /// The backend handle assigned to it.
    pub backend: BackendNode,
}

/// Emitted per node during a parameter flush (requires `trace-rich`).
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct ParamPushEvent {
    /// Model-side node index.
    pub node_index: u32,
    /// Node kind.
    pub kind: NodeKind,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from a window frame.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called once when a frame finishes creation.
    fn on_frame_created(&mut self, e: &FrameCreatedEvent) {
        _ = e;
    }

    /// Called after every host event dispatch.
    fn on_dispatch(&mut self, e: &DispatchEvent) {
        _ = e;
    }

    /// Called when frame metrics are recomputed.
    fn on_metrics(&mut self, e: &MetricsEvent) {
        _ = e;
    }

    /// Called when window visibility changes.
    fn on_visibility(&mut self, e: &VisibilityEvent) {
        _ = e;
    }

    /// Called when the theme is re-resolved.
    fn on_theme(&mut self, e: &ThemeEvent) {
        _ = e;
    }

    /// Called after an effect graph build or rebuild.
    fn on_graph_built(&mut self, e: &GraphBuiltEvent) {
        _ = e;
    }

    /// Called after a parameter flush.
    fn on_graph_params(&mut self, e: &GraphParamsEvent) {
        _ = e;
    }

    /// Called after a composition surface operation.
    fn on_surface(&mut self, e: &SurfaceEvent) {
        _ = e;
    }

    /// Called after a present attempt.
    fn on_presented(&mut self, e: &PresentedEvent) {
        _ = e;
    }

    /// Called when a recoverable operation fails.
    fn on_recoverable_error(&mut self, e: &RecoverableErrorEvent) {
        _ = e;
    }

    /// Called for each resource released during teardown.
    fn on_teardown_step(&mut self, e: &TeardownStepEvent) {
        _ = e;
    }

    /// Called once when teardown completes.
    fn on_destroyed(&mut self, e: &DestroyedEvent) {
        _ = e;
    }

    /// Called per node while realizing a graph (requires `trace-rich`).
    #[cfg(feature = "trace-rich")]
    fn on_node_realized(&mut self, e: &NodeRealizedEvent) {
        _ = e;
    }

    /// Called per node during a parameter flush (requires `trace-rich`).
    #[cfg(feature = "trace-rich")]
    fn on_param_push(&mut self, e: &ParamPushEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`FrameCreatedEvent`].
    #[inline]
    pub fn frame_created(&mut self, e: &FrameCreatedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame_created(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DispatchEvent`].
    #[inline]
    pub fn dispatch(&mut self, e: &DispatchEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_dispatch(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`MetricsEvent`].
    #[inline]
    pub fn metrics(&mut self, e: &MetricsEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_metrics(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`VisibilityEvent`].
    #[inline]
    pub fn visibility(&mut self, e: &VisibilityEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_visibility(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ThemeEvent`].
    #[inline]
    pub fn theme(&mut self, e: &ThemeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_theme(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`GraphBuiltEvent`].
    #[inline]
    pub fn graph_built(&mut self, e: &GraphBuiltEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_graph_built(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`GraphParamsEvent`].
    #[inline]
    pub fn graph_params(&mut self, e: &GraphParamsEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_graph_params(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SurfaceEvent`].
    #[inline]
    pub fn surface(&mut self, e: &SurfaceEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_surface(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PresentedEvent`].
    #[inline]
    pub fn presented(&mut self, e: &PresentedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_presented(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RecoverableErrorEvent`].
    #[inline]
    pub fn recoverable_error(&mut self, e: &RecoverableErrorEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_recoverable_error(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TeardownStepEvent`].
    #[inline]
    pub fn teardown_step(&mut self, e: &TeardownStepEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_teardown_step(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DestroyedEvent`].
    #[inline]
    pub fn destroyed(&mut self, e: &DestroyedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_destroyed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`NodeRealizedEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn node_realized(&mut self, e: &NodeRealizedEvent) {
        if let Some(s) = &mut self.sink {
            s.on_node_realized(e);
        }
    }

    /// Emits a [`ParamPushEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn param_push(&mut self, e: &ParamPushEvent) {
        if let Some(s) = &mut self.sink {
            s.on_param_push(e);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_dispatch(&DispatchEvent {
            event: HostEventKind::SizeChanged,
            reply: ReplyKind::Handled,
        });
        sink.on_recoverable_error(&RecoverableErrorEvent {
            op: RecoverableOp::MoveWindow,
            code: -1,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.dispatch(&DispatchEvent {
            event: HostEventKind::HitTest,
            reply: ReplyKind::HitTest,
        });
        tracer.presented(&PresentedEvent {
            outcome: PresentOutcome::Presented,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            events: Vec<HostEventKind>,
        }
        impl TraceSink for RecordingSink {
            fn on_dispatch(&mut self, e: &DispatchEvent) {
                self.events.push(e.event);
            }
        }

        let mut sink = RecordingSink { events: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.dispatch(&DispatchEvent {
            event: HostEventKind::DpiChanged,
            reply: ReplyKind::Handled,
        });
        drop(tracer);
        assert_eq!(sink.events, &[HostEventKind::DpiChanged]);
    }

    #[test]
    fn event_kind_from_host_event() {
        assert_eq!(
            HostEventKind::from(&HostEvent::CloseRequested),
            HostEventKind::CloseRequested
        );
        assert_eq!(
            HostEventKind::from(&HostEvent::CursorUpdate),
            HostEventKind::CursorUpdate
        );
    }
}
