// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scriptable [`WindowHost`] double.

use alloc::vec::Vec;

use scrim_core::color::Rgba8;
use scrim_core::geometry::{Axis, FrameMargins, PhysPoint, PhysRect};
use scrim_core::host::{
    CapabilityStatus, CursorKind, DefaultHitTest, HostError, ResizeEdge, ScreenEdge, SystemCommand,
    SystemMenuState, WindowHost, WindowId,
};
use scrim_core::metrics::{BaselineMetrics, caption_height, resize_border_thickness};
use scrim_core::theme::ThemeSignals;
use scrim_core::window::{HitTestZone, PointerMessage};

/// One host mutation a frame requested, recorded in call order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HostCall {
    /// `enable_nonclient_dpi_scaling` was called.
    EnableNonclientDpiScaling(WindowId),
    /// `extend_frame_into_client` was called with these margins.
    ExtendFrame(WindowId, FrameMargins),
    /// `trigger_frame_changed` was called.
    FrameChanged(WindowId),
    /// `move_window` was called with this target rect.
    MoveWindow(WindowId, PhysRect),
    /// `set_cursor` was called.
    SetCursor(CursorKind),
    /// `show_system_menu` was called at this point with these item states.
    ShowSystemMenu(WindowId, PhysPoint, SystemMenuState),
    /// `post_system_command` was called.
    PostSystemCommand(WindowId, SystemCommand),
    /// `create_drag_sink` was called with this child rect.
    CreateDragSink(WindowId, PhysRect),
    /// `move_child` was called with this child rect.
    MoveChild(WindowId, PhysRect),
    /// `destroy_window` was called.
    DestroyWindow(WindowId),
    /// `release_window` was called.
    ReleaseWindow(WindowId),
    /// `post_nonclient_pointer` was called.
    PostNonclientPointer {
        /// Target window.
        window: WindowId,
        /// The forwarded pointer message.
        message: PointerMessage,
        /// The zone the frame classified.
        zone: HitTestZone,
        /// Screen position.
        screen: PhysPoint,
    },
}

/// A [`WindowHost`] whose answers come from plain public fields.
///
/// Queries read the fields; mutations are appended to [`calls`](Self::calls)
/// and succeed unless the matching `fail_*` field holds an error code. The
/// stock hit test and default frame are derived from
/// [`baseline`](Self::baseline) and [`dpi`](Self::dpi) the way a real host
/// derives them from its metrics, so tests that change those fields see
/// consistent behavior everywhere.
#[derive(Debug)]
pub struct ScriptedHost {
    /// Baseline metrics reported to the frame.
    pub baseline: BaselineMetrics,
    /// DPI reported for every window.
    pub dpi: u32,
    /// Outer geometry of the main window in screen coordinates.
    pub geometry: PhysRect,
    /// High contrast flag in the theme signals.
    pub high_contrast: bool,
    /// Light/dark preference in the theme signals.
    pub apps_use_light: Option<bool>,
    /// Auto-hide taskbar edge on the window's monitor, if any.
    pub taskbar_edge: Option<ScreenEdge>,
    /// System window color for high contrast fills.
    pub system_color: Option<Rgba8>,
    /// Selection returned whenever the system menu is shown.
    pub menu_selection: Option<SystemCommand>,
    /// Whether non-client DPI scaling is supported.
    pub nonclient_dpi_scaling: bool,
    /// Whether frame extension is supported.
    pub frame_extension: bool,
    /// Error code for `create_drag_sink`, if it should fail.
    pub fail_drag_sink_create: Option<i32>,
    /// Error code for `move_child`, if it should fail.
    pub fail_move_child: Option<i32>,
    /// Error code for `move_window`, if it should fail.
    pub fail_move_window: Option<i32>,
    /// Error code for `trigger_frame_changed`, if it should fail.
    pub fail_frame_changed: Option<i32>,
    /// Error code for `destroy_window`, if it should fail.
    pub fail_destroy_window: Option<i32>,
    /// Error code for `release_window`, if it should fail.
    pub fail_release_window: Option<i32>,
    /// Every mutation the frame requested, in order.
    pub calls: Vec<HostCall>,
    next_child: u64,
}

impl ScriptedHost {
    /// A host for an 800x600 window at the screen origin, 96 DPI, dark
    /// theme, no taskbar, everything supported and nothing failing.
    ///
    /// The baseline is [`BaselineMetrics::UNAVAILABLE`], so the frame runs
    /// on its hard-coded fallbacks: 8px resize borders, a 23px caption and a
    /// 31px title bar.
    #[must_use]
    pub fn new() -> Self {
        Self {
            baseline: BaselineMetrics::UNAVAILABLE,
            dpi: 96,
            geometry: PhysRect::new(0, 0, 800, 600),
            high_contrast: false,
            apps_use_light: Some(false),
            taskbar_edge: None,
            system_color: None,
            menu_selection: None,
            nonclient_dpi_scaling: true,
            frame_extension: true,
            fail_drag_sink_create: None,
            fail_move_child: None,
            fail_move_window: None,
            fail_frame_changed: None,
            fail_destroy_window: None,
            fail_release_window: None,
            calls: Vec::new(),
            next_child: 100,
        }
    }

    /// Returns the calls recorded since the last call to this method.
    pub fn drain_calls(&mut self) -> Vec<HostCall> {
        core::mem::take(&mut self.calls)
    }

    const fn capability(supported: bool) -> CapabilityStatus {
        if supported {
            CapabilityStatus::Applied
        } else {
            CapabilityStatus::Unavailable
        }
    }
}

impl Default for ScriptedHost {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowHost for ScriptedHost {
    fn baseline_metrics(&mut self) -> BaselineMetrics {
        self.baseline
    }

    fn window_geometry(&mut self, _window: WindowId) -> PhysRect {
        self.geometry
    }

    fn dpi_for(&mut self, _window: WindowId) -> u32 {
        self.dpi
    }

    fn enable_nonclient_dpi_scaling(&mut self, window: WindowId) -> CapabilityStatus {
        self.calls.push(HostCall::EnableNonclientDpiScaling(window));
        Self::capability(self.nonclient_dpi_scaling)
    }

    fn extend_frame_into_client(
        &mut self,
        window: WindowId,
        margins: FrameMargins,
    ) -> CapabilityStatus {
        self.calls.push(HostCall::ExtendFrame(window, margins));
        Self::capability(self.frame_extension)
    }

    fn trigger_frame_changed(&mut self, window: WindowId) -> Result<(), HostError> {
        self.calls.push(HostCall::FrameChanged(window));
        match self.fail_frame_changed {
            Some(code) => Err(HostError::WindowOpFailed(code)),
            None => Ok(()),
        }
    }

    fn move_window(&mut self, window: WindowId, target: PhysRect) -> Result<(), HostError> {
        self.calls.push(HostCall::MoveWindow(window, target));
        if let Some(code) = self.fail_move_window {
            return Err(HostError::WindowOpFailed(code));
        }
        self.geometry = target;
        Ok(())
    }

    /// The stock hit test of a host whose client area was extended to the
    /// window top: left, right and bottom bands resolve to borders, the
    /// bottom corners to corner borders, and everything else (the top rows
    /// included) to client. The frame synthesizes the top zones itself.
    fn default_hit_test(&mut self, _window: WindowId, screen: PhysPoint) -> DefaultHitTest {
        let r = self.geometry;
        if !r.contains(screen) {
            return DefaultHitTest::Nowhere;
        }
        let bx = resize_border_thickness(Axis::X, &self.baseline, self.dpi);
        let by = resize_border_thickness(Axis::Y, &self.baseline, self.dpi);
        let left = screen.x < r.left + bx;
        let right = screen.x >= r.right - bx;
        let bottom = screen.y >= r.bottom - by;
        match (left, right, bottom) {
            (true, _, true) => DefaultHitTest::Border(ResizeEdge::BottomLeft),
            (_, true, true) => DefaultHitTest::Border(ResizeEdge::BottomRight),
            (true, _, false) => DefaultHitTest::Border(ResizeEdge::Left),
            (_, true, false) => DefaultHitTest::Border(ResizeEdge::Right),
            (false, false, true) => DefaultHitTest::Border(ResizeEdge::Bottom),
            (false, false, false) => DefaultHitTest::Client,
        }
    }

    fn apply_default_frame(&mut self, _window: WindowId, proposed: PhysRect) -> PhysRect {
        let bx = resize_border_thickness(Axis::X, &self.baseline, self.dpi);
        let by = resize_border_thickness(Axis::Y, &self.baseline, self.dpi);
        let caption = caption_height(&self.baseline, self.dpi);
        PhysRect::new(
            proposed.left + bx,
            proposed.top + by + caption,
            proposed.right - bx,
            proposed.bottom - by,
        )
    }

    fn autohide_taskbar_edge(&mut self, _window: WindowId) -> Option<ScreenEdge> {
        self.taskbar_edge
    }

    fn theme_signals(&mut self) -> ThemeSignals {
        ThemeSignals {
            high_contrast: self.high_contrast,
            apps_use_light: self.apps_use_light,
        }
    }

    fn system_window_color(&mut self) -> Option<Rgba8> {
        self.system_color
    }

    fn set_cursor(&mut self, cursor: CursorKind) {
        self.calls.push(HostCall::SetCursor(cursor));
    }

    fn show_system_menu(
        &mut self,
        window: WindowId,
        at: PhysPoint,
        state: SystemMenuState,
    ) -> Option<SystemCommand> {
        self.calls.push(HostCall::ShowSystemMenu(window, at, state));
        self.menu_selection
    }

    fn post_system_command(&mut self, window: WindowId, command: SystemCommand) {
        self.calls.push(HostCall::PostSystemCommand(window, command));
    }

    fn create_drag_sink(
        &mut self,
        parent: WindowId,
        rect: PhysRect,
    ) -> Result<WindowId, HostError> {
        self.calls.push(HostCall::CreateDragSink(parent, rect));
        if let Some(code) = self.fail_drag_sink_create {
            return Err(HostError::ChildCreateFailed(code));
        }
        self.next_child += 1;
        Ok(WindowId(self.next_child))
    }

    fn move_child(&mut self, child: WindowId, rect: PhysRect) -> Result<(), HostError> {
        self.calls.push(HostCall::MoveChild(child, rect));
        match self.fail_move_child {
            Some(code) => Err(HostError::WindowOpFailed(code)),
            None => Ok(()),
        }
    }

    fn destroy_window(&mut self, window: WindowId) -> Result<(), HostError> {
        self.calls.push(HostCall::DestroyWindow(window));
        match self.fail_destroy_window {
            Some(code) => Err(HostError::DestroyFailed(code)),
            None => Ok(()),
        }
    }

    fn release_window(&mut self, window: WindowId) -> Result<(), HostError> {
        self.calls.push(HostCall::ReleaseWindow(window));
        match self.fail_release_window {
            Some(code) => Err(HostError::DestroyFailed(code)),
            None => Ok(()),
        }
    }

    fn post_nonclient_pointer(
        &mut self,
        window: WindowId,
        message: PointerMessage,
        zone: HitTestZone,
        screen: PhysPoint,
    ) {
        self.calls.push(HostCall::PostNonclientPointer {
            window,
            message,
            zone,
            screen,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_hit_test_never_reports_top_borders() {
        let mut host = ScriptedHost::new();
        // Top rows away from the side bands are client, not caption.
        assert_eq!(
            host.default_hit_test(WindowId(1), PhysPoint::new(400, 0)),
            DefaultHitTest::Client
        );
        assert_eq!(
            host.default_hit_test(WindowId(1), PhysPoint::new(400, 7)),
            DefaultHitTest::Client
        );
        // Side and bottom bands still belong to the host.
        assert_eq!(
            host.default_hit_test(WindowId(1), PhysPoint::new(3, 300)),
            DefaultHitTest::Border(ResizeEdge::Left)
        );
        assert_eq!(
            host.default_hit_test(WindowId(1), PhysPoint::new(797, 300)),
            DefaultHitTest::Border(ResizeEdge::Right)
        );
        assert_eq!(
            host.default_hit_test(WindowId(1), PhysPoint::new(400, 595)),
            DefaultHitTest::Border(ResizeEdge::Bottom)
        );
        assert_eq!(
            host.default_hit_test(WindowId(1), PhysPoint::new(3, 598)),
            DefaultHitTest::Border(ResizeEdge::BottomLeft)
        );
        assert_eq!(
            host.default_hit_test(WindowId(1), PhysPoint::new(799, 599)),
            DefaultHitTest::Border(ResizeEdge::BottomRight)
        );
        assert_eq!(
            host.default_hit_test(WindowId(1), PhysPoint::new(900, 300)),
            DefaultHitTest::Nowhere
        );
    }

    #[test]
    fn default_frame_insets_all_four_edges() {
        let mut host = ScriptedHost::new();
        let applied = host.apply_default_frame(WindowId(1), PhysRect::new(100, 100, 900, 700));
        // 8px borders, 23px caption under the top border.
        assert_eq!(applied, PhysRect::new(108, 131, 892, 692));
    }

    #[test]
    fn failing_calls_are_still_recorded() {
        let mut host = ScriptedHost::new();
        host.fail_move_child = Some(-9);
        let err = host.move_child(WindowId(101), PhysRect::new(0, 0, 10, 10));
        assert_eq!(err, Err(HostError::WindowOpFailed(-9)));
        assert_eq!(
            host.calls,
            &[HostCall::MoveChild(WindowId(101), PhysRect::new(0, 0, 10, 10))]
        );
    }

    #[test]
    fn drag_sink_children_get_fresh_ids() {
        let mut host = ScriptedHost::new();
        let a = host.create_drag_sink(WindowId(1), PhysRect::new(0, 0, 800, 31));
        let b = host.create_drag_sink(WindowId(2), PhysRect::new(0, 0, 800, 31));
        assert_ne!(a, b, "each child needs its own id");
    }

    #[test]
    fn move_window_updates_reported_geometry() {
        let mut host = ScriptedHost::new();
        let target = PhysRect::new(50, 50, 1050, 800);
        host.move_window(WindowId(1), target).unwrap();
        assert_eq!(host.window_geometry(WindowId(1)), target);
    }
}
