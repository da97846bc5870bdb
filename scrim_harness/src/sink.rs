// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`TraceSink`] that collects events for assertions.

use alloc::vec::Vec;

use kurbo::Rect;
use scrim_core::graph::TintPath;
use scrim_core::host::WindowId;
use scrim_core::surface::PresentOutcome;
use scrim_core::theme::Theme;
use scrim_core::trace::{
    DestroyedEvent, DispatchEvent, FrameCreatedEvent, GraphBuiltEvent, GraphParamsEvent,
    HostEventKind, MetricsEvent, PresentedEvent, RecoverableErrorEvent, RecoverableOp, ReplyKind,
    SurfaceEvent, SurfaceOp, TeardownStepEvent, ThemeEvent, TraceSink, VisibilityEvent,
};
use scrim_core::window::{TeardownResource, Visibility};

/// One trace event, reduced to the fields assertions care about.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum TraceRecord {
    /// Frame creation finished.
    FrameCreated {
        /// The wrapped window.
        window: WindowId,
        /// Creation DPI.
        dpi: u32,
    },
    /// A host event was dispatched.
    Dispatch {
        /// The event kind.
        event: HostEventKind,
        /// The reply kind.
        reply: ReplyKind,
    },
    /// Frame metrics were recomputed.
    Metrics {
        /// The DPI they were computed for.
        dpi: u32,
        /// The resulting title bar height.
        title_bar_height: i32,
    },
    /// Visibility changed.
    Visibility {
        /// Previous visibility.
        from: Visibility,
        /// New visibility.
        to: Visibility,
    },
    /// The theme was re-resolved.
    Theme {
        /// The resolved theme.
        theme: Theme,
        /// Whether the plan is a solid fill.
        solid: bool,
    },
    /// An effect graph was built or rebuilt.
    GraphBuilt {
        /// The tint path, or `None` for solid.
        path: Option<TintPath>,
        /// Node count.
        nodes: u32,
        /// Whether this was a rebuild.
        rebuilt: bool,
    },
    /// Parameters were flushed.
    GraphParams {
        /// Pushed count.
        pushed: u32,
        /// Rejected count.
        rejected: u32,
    },
    /// A surface operation ran.
    Surface {
        /// Which operation.
        op: SurfaceOp,
        /// Bounds afterwards.
        bounds: Rect,
        /// DPI afterwards.
        dpi: u32,
    },
    /// A present attempt finished.
    Presented {
        /// How it ended.
        outcome: PresentOutcome,
    },
    /// A recoverable operation failed.
    Recoverable {
        /// Which operation.
        op: RecoverableOp,
        /// The raw error code.
        code: i32,
    },
    /// One teardown step ran.
    TeardownStep {
        /// The resource released.
        resource: TeardownResource,
        /// Whether the release succeeded.
        ok: bool,
    },
    /// Teardown completed.
    Destroyed {
        /// Whether every step succeeded.
        clean: bool,
    },
}

/// A [`TraceSink`] that appends every event to a `Vec`.
#[derive(Debug, Default)]
pub struct CollectingSink {
    /// Every event in arrival order.
    pub records: Vec<TraceRecord>,
}

impl CollectingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recoverable failure ops, in arrival order.
    #[must_use]
    pub fn recoverable_ops(&self) -> Vec<RecoverableOp> {
        self.records
            .iter()
            .filter_map(|r| match r {
                TraceRecord::Recoverable { op, .. } => Some(*op),
                _ => None,
            })
            .collect()
    }

    /// Returns `true` if any record matches `predicate`.
    pub fn any(&self, predicate: impl Fn(&TraceRecord) -> bool) -> bool {
        self.records.iter().any(predicate)
    }
}

impl TraceSink for CollectingSink {
    fn on_frame_created(&mut self, e: &FrameCreatedEvent) {
        self.records.push(TraceRecord::FrameCreated {
            window: e.window,
            dpi: e.dpi,
        });
    }

    fn on_dispatch(&mut self, e: &DispatchEvent) {
        self.records.push(TraceRecord::Dispatch {
            event: e.event,
            reply: e.reply,
        });
    }

    fn on_metrics(&mut self, e: &MetricsEvent) {
        self.records.push(TraceRecord::Metrics {
            dpi: e.dpi,
            title_bar_height: e.metrics.title_bar_height,
        });
    }

    fn on_visibility(&mut self, e: &VisibilityEvent) {
        self.records.push(TraceRecord::Visibility {
            from: e.from,
            to: e.to,
        });
    }

    fn on_theme(&mut self, e: &ThemeEvent) {
        self.records.push(TraceRecord::Theme {
            theme: e.theme,
            solid: e.solid,
        });
    }

    fn on_graph_built(&mut self, e: &GraphBuiltEvent) {
        self.records.push(TraceRecord::GraphBuilt {
            path: e.path,
            nodes: e.nodes,
            rebuilt: e.rebuilt,
        });
    }

    fn on_graph_params(&mut self, e: &GraphParamsEvent) {
        self.records.push(TraceRecord::GraphParams {
            pushed: e.pushed,
            rejected: e.rejected,
        });
    }

    fn on_surface(&mut self, e: &SurfaceEvent) {
        self.records.push(TraceRecord::Surface {
            op: e.op,
            bounds: e.bounds,
            dpi: e.dpi,
        });
    }

    fn on_presented(&mut self, e: &PresentedEvent) {
        self.records.push(TraceRecord::Presented { outcome: e.outcome });
    }

    fn on_recoverable_error(&mut self, e: &RecoverableErrorEvent) {
        self.records.push(TraceRecord::Recoverable {
            op: e.op,
            code: e.code,
        });
    }

    fn on_teardown_step(&mut self, e: &TeardownStepEvent) {
        self.records.push(TraceRecord::TeardownStep {
            resource: e.resource,
            ok: e.ok,
        });
    }

    fn on_destroyed(&mut self, e: &DestroyedEvent) {
        self.records.push(TraceRecord::Destroyed { clean: e.clean });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_arrive_in_order() {
        let mut sink = CollectingSink::new();
        sink.on_theme(&ThemeEvent {
            theme: Theme::Dark,
            solid: false,
        });
        sink.on_recoverable_error(&RecoverableErrorEvent {
            op: RecoverableOp::MoveWindow,
            code: -1,
        });
        sink.on_destroyed(&DestroyedEvent {
            window: WindowId(1),
            clean: true,
        });
        assert_eq!(
            sink.records,
            &[
                TraceRecord::Theme {
                    theme: Theme::Dark,
                    solid: false,
                },
                TraceRecord::Recoverable {
                    op: RecoverableOp::MoveWindow,
                    code: -1,
                },
                TraceRecord::Destroyed { clean: true },
            ]
        );
        assert_eq!(sink.recoverable_ops(), &[RecoverableOp::MoveWindow]);
        assert!(sink.any(|r| matches!(r, TraceRecord::Destroyed { clean: true })));
    }
}
