// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].

use scrim_core::backend::{BackendNode, NodeKind};
use scrim_core::graph::TintPath;
use scrim_core::host::WindowId;
use scrim_core::metrics::FrameMetrics;
use scrim_core::surface::PresentOutcome;
use scrim_core::theme::Theme;
use scrim_core::trace::{
    DestroyedEvent, DispatchEvent, FrameCreatedEvent, GraphBuiltEvent, GraphParamsEvent,
    HostEventKind, MetricsEvent, NodeRealizedEvent, ParamPushEvent, PresentedEvent,
    RecoverableErrorEvent, RecoverableOp, ReplyKind, SurfaceEvent, SurfaceOp, TeardownStepEvent,
    ThemeEvent, TraceSink, VisibilityEvent,
};
use scrim_core::window::{TeardownResource, Visibility};

use kurbo::Rect;

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_FRAME_CREATED: u8 = 1;
const TAG_DISPATCH: u8 = 2;
const TAG_METRICS: u8 = 3;
const TAG_VISIBILITY: u8 = 4;
const TAG_THEME: u8 = 5;
const TAG_GRAPH_BUILT: u8 = 6;
const TAG_GRAPH_PARAMS: u8 = 7;
const TAG_SURFACE: u8 = 8;
const TAG_PRESENTED: u8 = 9;
const TAG_RECOVERABLE: u8 = 10;
const TAG_TEARDOWN_STEP: u8 = 11;
const TAG_DESTROYED: u8 = 12;
const TAG_NODE_REALIZED: u8 = 13;
const TAG_PARAM_PUSH: u8 = 14;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_event_kind(&mut self, kind: HostEventKind) {
        self.write_u8(match kind {
            HostEventKind::SizeChanged => 0,
            HostEventKind::DpiChanged => 1,
            HostEventKind::CalcClientArea => 2,
            HostEventKind::HitTest => 3,
            HostEventKind::CursorUpdate => 4,
            HostEventKind::NcRightClick => 5,
            HostEventKind::SettingChanged => 6,
            HostEventKind::ColorizationChanged => 7,
            HostEventKind::FocusChanged => 8,
            HostEventKind::MoveSizeLoop => 9,
            HostEventKind::SinkPointer => 10,
            HostEventKind::SinkStructural => 11,
            HostEventKind::CloseRequested => 12,
        });
    }

    fn write_reply_kind(&mut self, kind: ReplyKind) {
        self.write_u8(match kind {
            ReplyKind::Handled => 0,
            ReplyKind::Ignored => 1,
            ReplyKind::HitTest => 2,
            ReplyKind::ClientArea => 3,
            ReplyKind::Sink => 4,
        });
    }

    fn write_visibility(&mut self, v: Visibility) {
        self.write_u8(match v {
            Visibility::Normal => 0,
            Visibility::Minimized => 1,
            Visibility::Maximized => 2,
            Visibility::Hidden => 3,
            Visibility::FullScreen => 4,
        });
    }

    fn write_theme(&mut self, theme: Theme) {
        self.write_u8(match theme {
            Theme::Light => 0,
            Theme::Dark => 1,
            Theme::HighContrast => 2,
        });
    }

    fn write_path(&mut self, path: Option<TintPath>) {
        self.write_u8(match path {
            None => 0,
            Some(TintPath::Luminosity) => 1,
            Some(TintPath::Legacy) => 2,
        });
    }

    fn write_surface_op(&mut self, op: SurfaceOp) {
        self.write_u8(match op {
            SurfaceOp::Attached => 0,
            SurfaceOp::Resized => 1,
            SurfaceOp::Rescaled => 2,
            SurfaceOp::Released => 3,
        });
    }

    fn write_outcome(&mut self, outcome: PresentOutcome) {
        self.write_u8(match outcome {
            PresentOutcome::Presented => 0,
            PresentOutcome::RetryNextFrame => 1,
        });
    }

    fn write_recoverable_op(&mut self, op: RecoverableOp) {
        self.write_u8(match op {
            RecoverableOp::ExtendFrameMargins => 0,
            RecoverableOp::FrameChanged => 1,
            RecoverableOp::MoveWindow => 2,
            RecoverableOp::SurfaceResize => 3,
            RecoverableOp::SurfaceRescale => 4,
            RecoverableOp::DragSinkSync => 5,
            RecoverableOp::ParamPush => 6,
            RecoverableOp::GraphRebuild => 7,
        });
    }

    fn write_resource(&mut self, resource: TeardownResource) {
        self.write_u8(match resource {
            TeardownResource::EffectGraph => 0,
            TeardownResource::Surface => 1,
            TeardownResource::DragSink => 2,
            TeardownResource::WindowHandle => 3,
        });
    }

    fn write_node_kind(&mut self, kind: NodeKind) {
        self.write_u8(match kind {
            NodeKind::Backdrop => 0,
            NodeKind::Flood => 1,
            NodeKind::Blur => 2,
            NodeKind::Saturation => 3,
            NodeKind::Blend => 4,
            NodeKind::Composite => 5,
            NodeKind::Noise => 6,
            NodeKind::Crossfade => 7,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_frame_created(&mut self, e: &FrameCreatedEvent) {
        self.write_u8(TAG_FRAME_CREATED);
        self.write_u64(e.window.0);
        self.write_u32(e.dpi);
        self.write_i32(e.width);
        self.write_i32(e.height);
    }

    fn on_dispatch(&mut self, e: &DispatchEvent) {
        self.write_u8(TAG_DISPATCH);
        self.write_event_kind(e.event);
        self.write_reply_kind(e.reply);
    }

    fn on_metrics(&mut self, e: &MetricsEvent) {
        self.write_u8(TAG_METRICS);
        self.write_u32(e.dpi);
        self.write_i32(e.metrics.resize_border_x);
        self.write_i32(e.metrics.resize_border_y);
        self.write_i32(e.metrics.caption_height);
        self.write_i32(e.metrics.title_bar_height);
        self.write_i32(e.metrics.top_frame_margin);
    }

    fn on_visibility(&mut self, e: &VisibilityEvent) {
        self.write_u8(TAG_VISIBILITY);
        self.write_visibility(e.from);
        self.write_visibility(e.to);
    }

    fn on_theme(&mut self, e: &ThemeEvent) {
        self.write_u8(TAG_THEME);
        self.write_theme(e.theme);
        self.write_bool(e.solid);
    }

    fn on_graph_built(&mut self, e: &GraphBuiltEvent) {
        self.write_u8(TAG_GRAPH_BUILT);
        self.write_path(e.path);
        self.write_u32(e.nodes);
        self.write_bool(e.rebuilt);
    }

    fn on_graph_params(&mut self, e: &GraphParamsEvent) {
        self.write_u8(TAG_GRAPH_PARAMS);
        self.write_u32(e.pushed);
        self.write_u32(e.rejected);
    }

    fn on_surface(&mut self, e: &SurfaceEvent) {
        self.write_u8(TAG_SURFACE);
        self.write_surface_op(e.op);
        self.write_f64(e.bounds.x0);
        self.write_f64(e.bounds.y0);
        self.write_f64(e.bounds.x1);
        self.write_f64(e.bounds.y1);
        self.write_u32(e.dpi);
    }

    fn on_presented(&mut self, e: &PresentedEvent) {
        self.write_u8(TAG_PRESENTED);
        self.write_outcome(e.outcome);
    }

    fn on_recoverable_error(&mut self, e: &RecoverableErrorEvent) {
        self.write_u8(TAG_RECOVERABLE);
        self.write_recoverable_op(e.op);
        self.write_i32(e.code);
    }

    fn on_teardown_step(&mut self, e: &TeardownStepEvent) {
        self.write_u8(TAG_TEARDOWN_STEP);
        self.write_resource(e.resource);
        self.write_bool(e.ok);
        self.write_i32(e.code);
    }

    fn on_destroyed(&mut self, e: &DestroyedEvent) {
        self.write_u8(TAG_DESTROYED);
        self.write_u64(e.window.0);
        self.write_bool(e.clean);
    }

    fn on_node_realized(&mut self, e: &NodeRealizedEvent) {
        self.write_u8(TAG_NODE_REALIZED);
        self.write_u32(e.node_index);
        self.write_node_kind(e.kind);
        self.write_u64(e.backend.0);
    }

    fn on_param_push(&mut self, e: &ParamPushEvent) {
        self.write_u8(TAG_PARAM_PUSH);
        self.write_u32(e.node_index);
        self.write_node_kind(e.kind);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`FrameCreatedEvent`].
    FrameCreated(FrameCreatedEvent),
    /// A [`DispatchEvent`].
    Dispatch(DispatchEvent),
    /// A [`MetricsEvent`].
    Metrics(MetricsEvent),
    /// A [`VisibilityEvent`].
    Visibility(VisibilityEvent),
    /// A [`ThemeEvent`].
    Theme(ThemeEvent),
    /// A [`GraphBuiltEvent`].
    GraphBuilt(GraphBuiltEvent),
    /// A [`GraphParamsEvent`].
    GraphParams(GraphParamsEvent),
    /// A [`SurfaceEvent`].
    Surface(SurfaceEvent),
    /// A [`PresentedEvent`].
    Presented(PresentedEvent),
    /// A [`RecoverableErrorEvent`].
    Recoverable(RecoverableErrorEvent),
    /// A [`TeardownStepEvent`].
    TeardownStep(TeardownStepEvent),
    /// A [`DestroyedEvent`].
    Destroyed(DestroyedEvent),
    /// A [`NodeRealizedEvent`].
    NodeRealized(NodeRealizedEvent),
    /// A [`ParamPushEvent`].
    ParamPush(ParamPushEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_i32(&mut self) -> Option<i32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = i32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_f64(&mut self) -> Option<f64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = f64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_bool(&mut self) -> Option<bool> {
        Some(self.read_u8()? != 0)
    }

    fn read_event_kind(&mut self) -> Option<HostEventKind> {
        Some(match self.read_u8()? {
            0 => HostEventKind::SizeChanged,
            1 => HostEventKind::DpiChanged,
            2 => HostEventKind::CalcClientArea,
            3 => HostEventKind::HitTest,
            4 => HostEventKind::CursorUpdate,
            5 => HostEventKind::NcRightClick,
            6 => HostEventKind::SettingChanged,
            7 => HostEventKind::ColorizationChanged,
            8 => HostEventKind::FocusChanged,
            9 => HostEventKind::MoveSizeLoop,
            10 => HostEventKind::SinkPointer,
            11 => HostEventKind::SinkStructural,
            _ => HostEventKind::CloseRequested,
        })
    }

    fn read_reply_kind(&mut self) -> Option<ReplyKind> {
        Some(match self.read_u8()? {
            0 => ReplyKind::Handled,
            1 => ReplyKind::Ignored,
            2 => ReplyKind::HitTest,
            3 => ReplyKind::ClientArea,
            _ => ReplyKind::Sink,
        })
    }

    fn read_visibility(&mut self) -> Option<Visibility> {
        Some(match self.read_u8()? {
            0 => Visibility::Normal,
            1 => Visibility::Minimized,
            2 => Visibility::Maximized,
            3 => Visibility::Hidden,
            _ => Visibility::FullScreen,
        })
    }

    fn read_theme(&mut self) -> Option<Theme> {
        Some(match self.read_u8()? {
            0 => Theme::Light,
            1 => Theme::Dark,
            _ => Theme::HighContrast,
        })
    }

    fn read_path(&mut self) -> Option<Option<TintPath>> {
        Some(match self.read_u8()? {
            0 => None,
            1 => Some(TintPath::Luminosity),
            _ => Some(TintPath::Legacy),
        })
    }

    fn read_surface_op(&mut self) -> Option<SurfaceOp> {
        Some(match self.read_u8()? {
            0 => SurfaceOp::Attached,
            1 => SurfaceOp::Resized,
            2 => SurfaceOp::Rescaled,
            _ => SurfaceOp::Released,
        })
    }

    fn read_outcome(&mut self) -> Option<PresentOutcome> {
        Some(match self.read_u8()? {
            0 => PresentOutcome::Presented,
            _ => PresentOutcome::RetryNextFrame,
        })
    }

    fn read_recoverable_op(&mut self) -> Option<RecoverableOp> {
        Some(match self.read_u8()? {
            0 => RecoverableOp::ExtendFrameMargins,
            1 => RecoverableOp::FrameChanged,
            2 => RecoverableOp::MoveWindow,
            3 => RecoverableOp::SurfaceResize,
            4 => RecoverableOp::SurfaceRescale,
            5 => RecoverableOp::DragSinkSync,
            6 => RecoverableOp::ParamPush,
            _ => RecoverableOp::GraphRebuild,
        })
    }

    fn read_resource(&mut self) -> Option<TeardownResource> {
        Some(match self.read_u8()? {
            0 => TeardownResource::EffectGraph,
            1 => TeardownResource::Surface,
            2 => TeardownResource::DragSink,
            _ => TeardownResource::WindowHandle,
        })
    }

    fn read_node_kind(&mut self) -> Option<NodeKind> {
        Some(match self.read_u8()? {
            0 => NodeKind::Backdrop,
            1 => NodeKind::Flood,
            2 => NodeKind::Blur,
            3 => NodeKind::Saturation,
            4 => NodeKind::Blend,
            5 => NodeKind::Composite,
            6 => NodeKind::Noise,
            _ => NodeKind::Crossfade,
        })
    }

    fn decode_frame_created(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::FrameCreated(FrameCreatedEvent {
            window: WindowId(self.read_u64()?),
            dpi: self.read_u32()?,
            width: self.read_i32()?,
            height: self.read_i32()?,
        }))
    }

    fn decode_dispatch(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Dispatch(DispatchEvent {
            event: self.read_event_kind()?,
            reply: self.read_reply_kind()?,
        }))
    }

    fn decode_metrics(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Metrics(MetricsEvent {
            dpi: self.read_u32()?,
            metrics: FrameMetrics {
                resize_border_x: self.read_i32()?,
                resize_border_y: self.read_i32()?,
                caption_height: self.read_i32()?,
                title_bar_height: self.read_i32()?,
                top_frame_margin: self.read_i32()?,
            },
        }))
    }

    fn decode_visibility(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Visibility(VisibilityEvent {
            from: self.read_visibility()?,
            to: self.read_visibility()?,
        }))
    }

    fn decode_theme(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Theme(ThemeEvent {
            theme: self.read_theme()?,
            solid: self.read_bool()?,
        }))
    }

    fn decode_graph_built(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::GraphBuilt(GraphBuiltEvent {
            path: self.read_path()?,
            nodes: self.read_u32()?,
            rebuilt: self.read_bool()?,
        }))
    }

    fn decode_graph_params(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::GraphParams(GraphParamsEvent {
            pushed: self.read_u32()?,
            rejected: self.read_u32()?,
        }))
    }

    fn decode_surface(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Surface(SurfaceEvent {
            op: self.read_surface_op()?,
            bounds: Rect::new(
                self.read_f64()?,
                self.read_f64()?,
                self.read_f64()?,
                self.read_f64()?,
            ),
            dpi: self.read_u32()?,
        }))
    }

    fn decode_presented(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Presented(PresentedEvent {
            outcome: self.read_outcome()?,
        }))
    }

    fn decode_recoverable(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Recoverable(RecoverableErrorEvent {
            op: self.read_recoverable_op()?,
            code: self.read_i32()?,
        }))
    }

    fn decode_teardown_step(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::TeardownStep(TeardownStepEvent {
            resource: self.read_resource()?,
            ok: self.read_bool()?,
            code: self.read_i32()?,
        }))
    }

    fn decode_destroyed(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Destroyed(DestroyedEvent {
            window: WindowId(self.read_u64()?),
            clean: self.read_bool()?,
        }))
    }

    fn decode_node_realized(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::NodeRealized(NodeRealizedEvent {
            node_index: self.read_u32()?,
            kind: self.read_node_kind()?,
            backend: BackendNode(self.read_u64()?),
        }))
    }

    fn decode_param_push(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ParamPush(ParamPushEvent {
            node_index: self.read_u32()?,
            kind: self.read_node_kind()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_FRAME_CREATED => self.decode_frame_created(),
            TAG_DISPATCH => self.decode_dispatch(),
            TAG_METRICS => self.decode_metrics(),
            TAG_VISIBILITY => self.decode_visibility(),
            TAG_THEME => self.decode_theme(),
            TAG_GRAPH_BUILT => self.decode_graph_built(),
            TAG_GRAPH_PARAMS => self.decode_graph_params(),
            TAG_SURFACE => self.decode_surface(),
            TAG_PRESENTED => self.decode_presented(),
            TAG_RECOVERABLE => self.decode_recoverable(),
            TAG_TEARDOWN_STEP => self.decode_teardown_step(),
            TAG_DESTROYED => self.decode_destroyed(),
            TAG_NODE_REALIZED => self.decode_node_realized(),
            TAG_PARAM_PUSH => self.decode_param_push(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_created() -> FrameCreatedEvent {
        FrameCreatedEvent {
            window: WindowId(1),
            dpi: 96,
            width: 800,
            height: 600,
        }
    }

    fn sample_metrics() -> MetricsEvent {
        MetricsEvent {
            dpi: 192,
            metrics: FrameMetrics {
                resize_border_x: 16,
                resize_border_y: 16,
                caption_height: 46,
                title_bar_height: 62,
                top_frame_margin: 2,
            },
        }
    }

    #[test]
    fn round_trip_frame_created() {
        let mut rec = RecorderSink::new();
        let orig = sample_created();
        rec.on_frame_created(&orig);

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RecordedEvent::FrameCreated(e) => {
                assert_eq!(e.window, orig.window);
                assert_eq!(e.dpi, orig.dpi);
                assert_eq!(e.width, orig.width);
                assert_eq!(e.height, orig.height);
            }
            other => panic!("expected FrameCreated, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_dispatch() {
        let mut rec = RecorderSink::new();
        rec.on_dispatch(&DispatchEvent {
            event: HostEventKind::HitTest,
            reply: ReplyKind::HitTest,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RecordedEvent::Dispatch(e) => {
                assert_eq!(e.event, HostEventKind::HitTest);
                assert_eq!(e.reply, ReplyKind::HitTest);
            }
            other => panic!("expected Dispatch, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_metrics() {
        let mut rec = RecorderSink::new();
        let orig = sample_metrics();
        rec.on_metrics(&orig);

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RecordedEvent::Metrics(e) => {
                assert_eq!(e.dpi, orig.dpi);
                assert_eq!(e.metrics.resize_border_x, orig.metrics.resize_border_x);
                assert_eq!(e.metrics.resize_border_y, orig.metrics.resize_border_y);
                assert_eq!(e.metrics.caption_height, orig.metrics.caption_height);
                assert_eq!(e.metrics.title_bar_height, orig.metrics.title_bar_height);
                assert_eq!(e.metrics.top_frame_margin, orig.metrics.top_frame_margin);
            }
            other => panic!("expected Metrics, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_graph_built() {
        let mut rec = RecorderSink::new();
        rec.on_graph_built(&GraphBuiltEvent {
            path: Some(TintPath::Legacy),
            nodes: 11,
            rebuilt: true,
        });
        rec.on_graph_built(&GraphBuiltEvent {
            path: None,
            nodes: 1,
            rebuilt: true,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 2);
        match &events[0] {
            RecordedEvent::GraphBuilt(e) => {
                assert_eq!(e.path, Some(TintPath::Legacy));
                assert_eq!(e.nodes, 11);
                assert!(e.rebuilt);
            }
            other => panic!("expected GraphBuilt, got {other:?}"),
        }
        match &events[1] {
            RecordedEvent::GraphBuilt(e) => {
                assert_eq!(e.path, None);
                assert_eq!(e.nodes, 1);
            }
            other => panic!("expected GraphBuilt, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_surface() {
        let mut rec = RecorderSink::new();
        rec.on_surface(&SurfaceEvent {
            op: SurfaceOp::Resized,
            bounds: Rect::new(0.0, 31.0, 1000.0, 700.0),
            dpi: 96,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RecordedEvent::Surface(e) => {
                assert_eq!(e.op, SurfaceOp::Resized);
                assert_eq!(e.bounds, Rect::new(0.0, 31.0, 1000.0, 700.0));
                assert_eq!(e.dpi, 96);
            }
            other => panic!("expected Surface, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_recoverable() {
        let mut rec = RecorderSink::new();
        rec.on_recoverable_error(&RecoverableErrorEvent {
            op: RecoverableOp::DragSinkSync,
            code: -9,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RecordedEvent::Recoverable(e) => {
                assert_eq!(e.op, RecoverableOp::DragSinkSync);
                assert_eq!(e.code, -9);
            }
            other => panic!("expected Recoverable, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_teardown_and_destroyed() {
        let mut rec = RecorderSink::new();
        rec.on_teardown_step(&TeardownStepEvent {
            resource: TeardownResource::EffectGraph,
            ok: false,
            code: -4,
        });
        rec.on_destroyed(&DestroyedEvent {
            window: WindowId(1),
            clean: false,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 2);
        match &events[0] {
            RecordedEvent::TeardownStep(e) => {
                assert_eq!(e.resource, TeardownResource::EffectGraph);
                assert!(!e.ok);
                assert_eq!(e.code, -4);
            }
            other => panic!("expected TeardownStep, got {other:?}"),
        }
        match &events[1] {
            RecordedEvent::Destroyed(e) => {
                assert_eq!(e.window, WindowId(1));
                assert!(!e.clean);
            }
            other => panic!("expected Destroyed, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_rich_events() {
        let mut rec = RecorderSink::new();
        rec.on_node_realized(&NodeRealizedEvent {
            node_index: 3,
            kind: NodeKind::Blend,
            backend: BackendNode(4),
        });
        rec.on_param_push(&ParamPushEvent {
            node_index: 2,
            kind: NodeKind::Flood,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 2);
        match &events[0] {
            RecordedEvent::NodeRealized(e) => {
                assert_eq!(e.node_index, 3);
                assert_eq!(e.kind, NodeKind::Blend);
                assert_eq!(e.backend, BackendNode(4));
            }
            other => panic!("expected NodeRealized, got {other:?}"),
        }
        match &events[1] {
            RecordedEvent::ParamPush(e) => {
                assert_eq!(e.node_index, 2);
                assert_eq!(e.kind, NodeKind::Flood);
            }
            other => panic!("expected ParamPush, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_multiple_events() {
        let mut rec = RecorderSink::new();
        rec.on_frame_created(&sample_created());
        rec.on_metrics(&sample_metrics());
        rec.on_theme(&ThemeEvent {
            theme: Theme::Dark,
            solid: false,
        });
        rec.on_presented(&PresentedEvent {
            outcome: PresentOutcome::Presented,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], RecordedEvent::FrameCreated(_)));
        assert!(matches!(events[1], RecordedEvent::Metrics(_)));
        assert!(matches!(events[2], RecordedEvent::Theme(_)));
        assert!(matches!(events[3], RecordedEvent::Presented(_)));
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }

    #[test]
    fn unknown_tag_stops_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_presented(&PresentedEvent {
            outcome: PresentOutcome::Presented,
        });
        let mut bytes = rec.into_bytes();
        bytes.push(0xFF);
        bytes.push(0x00);

        let events: Vec<_> = decode(&bytes).collect();
        assert_eq!(events.len(), 1);
    }
}
