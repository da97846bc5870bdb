// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Frame events
//! carry no timestamps; lines appear in dispatch order.

use std::io::Write;

use scrim_core::graph::TintPath;
use scrim_core::trace::{
    DestroyedEvent, DispatchEvent, FrameCreatedEvent, GraphBuiltEvent, GraphParamsEvent,
    MetricsEvent, NodeRealizedEvent, ParamPushEvent, PresentedEvent, RecoverableErrorEvent,
    SurfaceEvent, SurfaceOp, TeardownStepEvent, ThemeEvent, TraceSink, VisibilityEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }
}

fn path_name(path: Option<TintPath>) -> &'static str {
    match path {
        None => "solid",
        Some(TintPath::Luminosity) => "luminosity",
        Some(TintPath::Legacy) => "legacy",
    }
}

fn surface_op_name(op: SurfaceOp) -> &'static str {
    match op {
        SurfaceOp::Attached => "attach",
        SurfaceOp::Resized => "resize",
        SurfaceOp::Rescaled => "rescale",
        SurfaceOp::Released => "release",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_frame_created(&mut self, e: &FrameCreatedEvent) {
        let _ = writeln!(
            self.writer,
            "[created] window={} dpi={} size={}x{}",
            e.window.0, e.dpi, e.width, e.height,
        );
    }

    fn on_dispatch(&mut self, e: &DispatchEvent) {
        let _ = writeln!(self.writer, "[dispatch] {:?} -> {:?}", e.event, e.reply);
    }

    fn on_metrics(&mut self, e: &MetricsEvent) {
        let _ = writeln!(
            self.writer,
            "[metrics] dpi={} border={}x{} caption={} title_bar={} margin={}",
            e.dpi,
            e.metrics.resize_border_x,
            e.metrics.resize_border_y,
            e.metrics.caption_height,
            e.metrics.title_bar_height,
            e.metrics.top_frame_margin,
        );
    }

    fn on_visibility(&mut self, e: &VisibilityEvent) {
        let _ = writeln!(self.writer, "[visibility] {:?} -> {:?}", e.from, e.to);
    }

    fn on_theme(&mut self, e: &ThemeEvent) {
        let _ = writeln!(self.writer, "[theme] {:?} solid={}", e.theme, e.solid);
    }

    fn on_graph_built(&mut self, e: &GraphBuiltEvent) {
        let _ = writeln!(
            self.writer,
            "[graph] path={} nodes={} rebuilt={}",
            path_name(e.path),
            e.nodes,
            e.rebuilt,
        );
    }

    fn on_graph_params(&mut self, e: &GraphParamsEvent) {
        let _ = writeln!(
            self.writer,
            "[params] pushed={} rejected={}",
            e.pushed, e.rejected,
        );
    }

    fn on_surface(&mut self, e: &SurfaceEvent) {
        let _ = writeln!(
            self.writer,
            "[surface] {} bounds=({:.0},{:.0})..({:.0},{:.0}) dpi={}",
            surface_op_name(e.op),
            e.bounds.x0,
            e.bounds.y0,
            e.bounds.x1,
            e.bounds.y1,
            e.dpi,
        );
    }

    fn on_presented(&mut self, e: &PresentedEvent) {
        let _ = writeln!(self.writer, "[present] {:?}", e.outcome);
    }

    fn on_recoverable_error(&mut self, e: &RecoverableErrorEvent) {
        let _ = writeln!(self.writer, "[recoverable] {:?} code={}", e.op, e.code);
    }

    fn on_teardown_step(&mut self, e: &TeardownStepEvent) {
        if e.ok {
            let _ = writeln!(self.writer, "[teardown] {:?} ok", e.resource);
        } else {
            let _ = writeln!(
                self.writer,
                "[teardown] {:?} FAILED code={}",
                e.resource, e.code,
            );
        }
    }

    fn on_destroyed(&mut self, e: &DestroyedEvent) {
        let _ = writeln!(
            self.writer,
            "[destroyed] window={} clean={}",
            e.window.0, e.clean,
        );
    }

    fn on_node_realized(&mut self, e: &NodeRealizedEvent) {
        let _ = writeln!(
            self.writer,
            "[node] #{} {:?} -> {}",
            e.node_index, e.kind, e.backend.0,
        );
    }

    fn on_param_push(&mut self, e: &ParamPushEvent) {
        let _ = writeln!(self.writer, "[param] #{} {:?}", e.node_index, e.kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrim_core::host::WindowId;
    use scrim_core::window::TeardownResource;

    #[test]
    fn pretty_print_created() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_frame_created(&FrameCreatedEvent {
            window: WindowId(1),
            dpi: 96,
            width: 800,
            height: 600,
        });
        let output = String::from_utf8(sink.writer).unwrap();
        assert!(output.contains("[created]"), "got: {output}");
        assert!(output.contains("window=1"), "got: {output}");
        assert!(output.contains("size=800x600"), "got: {output}");
    }

    #[test]
    fn pretty_print_teardown_failure() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_teardown_step(&TeardownStepEvent {
            resource: TeardownResource::DragSink,
            ok: false,
            code: -5,
        });
        let output = String::from_utf8(sink.writer).unwrap();
        assert!(output.contains("FAILED"), "got: {output}");
        assert!(output.contains("code=-5"), "got: {output}");
    }
}
