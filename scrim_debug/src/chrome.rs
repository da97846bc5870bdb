// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! Frame events carry no timestamps, so the exporter uses the record sequence
//! number as the microsecond timestamp; the timeline shows event order, not
//! wall-clock time.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use scrim_core::graph::TintPath;

use crate::recorder::{RecordedEvent, decode};

fn path_name(path: Option<TintPath>) -> &'static str {
    match path {
        None => "solid",
        Some(TintPath::Luminosity) => "luminosity",
        Some(TintPath::Legacy) => "legacy",
    }
}

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        let ts = events.len();
        match recorded {
            RecordedEvent::FrameCreated(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "FrameCreated",
                    "cat": "Frame",
                    "ts": ts,
                    "pid": e.window.0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "dpi": e.dpi,
                        "width": e.width,
                        "height": e.height,
                    }
                }));
            }
            RecordedEvent::Dispatch(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("{:?}", e.event),
                    "cat": "Dispatch",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "reply": format!("{:?}", e.reply),
                    }
                }));
            }
            RecordedEvent::Metrics(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Metrics",
                    "cat": "Frame",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "dpi": e.dpi,
                        "title_bar_height": e.metrics.title_bar_height,
                        "top_frame_margin": e.metrics.top_frame_margin,
                    }
                }));
            }
            RecordedEvent::Visibility(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Visibility",
                    "cat": "Frame",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "from": format!("{:?}", e.from),
                        "to": format!("{:?}", e.to),
                    }
                }));
            }
            RecordedEvent::Theme(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Theme",
                    "cat": "Material",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "theme": format!("{:?}", e.theme),
                        "solid": e.solid,
                    }
                }));
            }
            RecordedEvent::GraphBuilt(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "GraphBuilt",
                    "cat": "Material",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "path": path_name(e.path),
                        "nodes": e.nodes,
                        "rebuilt": e.rebuilt,
                    }
                }));
            }
            RecordedEvent::GraphParams(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "GraphParams",
                    "cat": "Material",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "pushed": e.pushed,
                        "rejected": e.rejected,
                    }
                }));
            }
            RecordedEvent::Surface(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Surface",
                    "cat": "Surface",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "op": format!("{:?}", e.op),
                        "bounds": [e.bounds.x0, e.bounds.y0, e.bounds.x1, e.bounds.y1],
                        "dpi": e.dpi,
                    }
                }));
            }
            RecordedEvent::Presented(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Present",
                    "cat": "Surface",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "outcome": format!("{:?}", e.outcome),
                    }
                }));
            }
            RecordedEvent::Recoverable(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "RecoverableError",
                    "cat": "Health",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "p",
                    "args": {
                        "op": format!("{:?}", e.op),
                        "code": e.code,
                    }
                }));
            }
            RecordedEvent::TeardownStep(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "TeardownStep",
                    "cat": "Teardown",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "resource": format!("{:?}", e.resource),
                        "ok": e.ok,
                        "code": e.code,
                    }
                }));
            }
            RecordedEvent::Destroyed(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Destroyed",
                    "cat": "Teardown",
                    "ts": ts,
                    "pid": e.window.0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "clean": e.clean,
                    }
                }));
            }
            RecordedEvent::NodeRealized(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "NodeRealized",
                    "cat": "Material",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "node_index": e.node_index,
                        "kind": format!("{:?}", e.kind),
                        "backend": e.backend.0,
                    }
                }));
            }
            RecordedEvent::ParamPush(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "ParamPush",
                    "cat": "Material",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "node_index": e.node_index,
                        "kind": format!("{:?}", e.kind),
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use scrim_core::host::WindowId;
    use scrim_core::trace::{
        DispatchEvent, FrameCreatedEvent, GraphBuiltEvent, HostEventKind, ReplyKind, TraceSink,
    };

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_frame_created(&FrameCreatedEvent {
            window: WindowId(1),
            dpi: 96,
            width: 800,
            height: 600,
        });
        rec.on_graph_built(&GraphBuiltEvent {
            path: Some(TintPath::Luminosity),
            nodes: 10,
            rebuilt: false,
        });
        rec.on_dispatch(&DispatchEvent {
            event: HostEventKind::SizeChanged,
            reply: ReplyKind::Handled,
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        // Should parse as a JSON array.
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 3);

        // First event is the creation instant on the window's track.
        assert_eq!(parsed[0]["ph"], "i");
        assert_eq!(parsed[0]["name"], "FrameCreated");
        assert_eq!(parsed[0]["pid"], 1);

        // Second is the graph build.
        assert_eq!(parsed[1]["name"], "GraphBuilt");
        assert_eq!(parsed[1]["args"]["path"], "luminosity");
        assert_eq!(parsed[1]["args"]["nodes"], 10);

        // Third is the dispatch, named after the event kind.
        assert_eq!(parsed[2]["name"], "SizeChanged");
        assert_eq!(parsed[2]["args"]["reply"], "Handled");

        // Timestamps follow record order.
        assert_eq!(parsed[0]["ts"], 0);
        assert_eq!(parsed[1]["ts"], 1);
        assert_eq!(parsed[2]["ts"], 2);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
