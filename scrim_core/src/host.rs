// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The window host abstraction.
//!
//! A *window host* is the platform windowing layer: it owns native window
//! handles, reports metrics and theme signals, performs window moves, and
//! routes input. [`WindowFrame`](crate::window::WindowFrame) drives a host
//! through the [`WindowHost`] trait and never touches platform APIs itself.
//!
//! Host implementations are responsible for:
//!
//! - translating native window messages into
//!   [`HostEvent`](crate::window::HostEvent)s and feeding them to the frame,
//! - answering the metric, geometry and theme queries below from live
//!   platform state,
//! - applying frame and geometry mutations the frame requests,
//! - creating and destroying the input sink child window.
//!
//! # Optional capabilities
//!
//! Not every host can do everything. Queries that a host may be unable to
//! answer return `Option` (`None` for "not available"), and mutations that
//! may be unsupported return [`CapabilityStatus`]. The frame degrades
//! gracefully on `Unavailable`; it never treats a missing capability as an
//! error.

use core::fmt;

use crate::color::Rgba8;
use crate::geometry::{FrameMargins, PhysPoint, PhysRect};
use crate::metrics::BaselineMetrics;
use crate::theme::ThemeSignals;
use crate::window::{HitTestZone, PointerMessage, Visibility};

/// Identifies a native window owned by the host.
///
/// The frame treats the value as opaque; hosts typically store a handle or
/// table index in it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowId(pub u64);

impl fmt::Debug for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WindowId({})", self.0)
    }
}

/// Outcome of a mutation the host may not support.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CapabilityStatus {
    /// The host applied the request.
    Applied,
    /// The host does not support the request. Not an error.
    Unavailable,
}

/// The window edge or corner a default hit test resolved to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ResizeEdge {
    /// Left border.
    Left,
    /// Right border.
    Right,
    /// Top border.
    Top,
    /// Bottom border.
    Bottom,
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
}

/// Result of the host's stock hit test for a point, before the frame's own
/// classification runs.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DefaultHitTest {
    /// Inside the client area.
    Client,
    /// On a resize border or corner.
    Border(ResizeEdge),
    /// On what the host considers the caption.
    Caption,
    /// Outside the window.
    Nowhere,
}

/// A screen edge, as used for auto-hide taskbar placement.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScreenEdge {
    /// Left edge of the monitor.
    Left,
    /// Top edge of the monitor.
    Top,
    /// Right edge of the monitor.
    Right,
    /// Bottom edge of the monitor.
    Bottom,
}

/// Cursor shapes the frame asks the host to show.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CursorKind {
    /// The default arrow.
    Arrow,
    /// Vertical resize cursor, shown over the top resize border.
    SizeNorthSouth,
}

/// Enabled state of each system menu item, derived from window visibility.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SystemMenuState {
    /// Restore item enabled.
    pub restore: bool,
    /// Move item enabled.
    pub move_item: bool,
    /// Size item enabled.
    pub size: bool,
    /// Minimize item enabled.
    pub minimize: bool,
    /// Maximize item enabled.
    pub maximize: bool,
    /// Close item enabled.
    pub close: bool,
}

impl SystemMenuState {
    /// Returns the menu state for a window in `visibility`.
    ///
    /// A maximized window can be restored but not moved, sized or maximized
    /// again; a normal window is the inverse. Close is always enabled.
    #[must_use]
    pub const fn for_visibility(visibility: Visibility) -> Self {
        let maximized = matches!(visibility, Visibility::Maximized);
        Self {
            restore: maximized,
            move_item: !maximized,
            size: !maximized,
            minimize: true,
            maximize: !maximized,
            close: true,
        }
    }
}

/// A command selected from the system menu.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SystemCommand {
    /// Restore from maximized or minimized.
    Restore,
    /// Enter the keyboard move loop.
    Move,
    /// Enter the keyboard size loop.
    Size,
    /// Minimize the window.
    Minimize,
    /// Maximize the window.
    Maximize,
    /// Close the window.
    Close,
}

/// An error from a host operation that should have succeeded.
///
/// Each variant carries the host's raw error code for diagnostics. These are
/// recoverable from the frame's point of view except during window creation,
/// where a failed drag sink aborts the frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HostError {
    /// Creating a child window failed.
    ChildCreateFailed(i32),
    /// A window geometry or frame operation failed.
    WindowOpFailed(i32),
    /// Destroying a window failed.
    DestroyFailed(i32),
}

impl HostError {
    /// The host's raw error code.
    #[must_use]
    pub const fn raw_code(&self) -> i32 {
        match self {
            Self::ChildCreateFailed(c) | Self::WindowOpFailed(c) | Self::DestroyFailed(c) => *c,
        }
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChildCreateFailed(c) => write!(f, "child window creation failed (code {c})"),
            Self::WindowOpFailed(c) => write!(f, "window operation failed (code {c})"),
            Self::DestroyFailed(c) => write!(f, "window destruction failed (code {c})"),
        }
    }
}

impl core::error::Error for HostError {}

/// Platform windowing services consumed by the frame.
///
/// All methods take `&mut self`; the frame is single-threaded and reentrant
/// host callbacks are the host's problem to serialize.
pub trait WindowHost {
    /// Reads the baseline frame metrics, unscaled at 96 DPI.
    ///
    /// Hosts that cannot answer return
    /// [`BaselineMetrics::UNAVAILABLE`]; the frame substitutes fallbacks.
    fn baseline_metrics(&mut self) -> BaselineMetrics;

    /// Returns the current outer geometry of `window` in screen coordinates.
    fn window_geometry(&mut self, window: WindowId) -> PhysRect;

    /// Returns the DPI for `window`.
    fn dpi_for(&mut self, window: WindowId) -> u32;

    /// Asks the host to scale the non-client area automatically on DPI
    /// change.
    fn enable_nonclient_dpi_scaling(&mut self, window: WindowId) -> CapabilityStatus;

    /// Extends the window frame into the client area by `margins`.
    fn extend_frame_into_client(
        &mut self,
        window: WindowId,
        margins: FrameMargins,
    ) -> CapabilityStatus;

    /// Forces the host to re-evaluate the frame, reissuing the client area
    /// calculation.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::WindowOpFailed`] if the host refuses.
    fn trigger_frame_changed(&mut self, window: WindowId) -> Result<(), HostError>;

    /// Moves and resizes `window` to `target` in screen coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::WindowOpFailed`] if the host refuses.
    fn move_window(&mut self, window: WindowId, target: PhysRect) -> Result<(), HostError>;

    /// Runs the host's stock hit test for a screen point.
    fn default_hit_test(&mut self, window: WindowId, screen: PhysPoint) -> DefaultHitTest;

    /// Applies the host's default frame to a proposed client rect during a
    /// client area calculation, returning the rect the host would use.
    fn apply_default_frame(&mut self, window: WindowId, proposed: PhysRect) -> PhysRect;

    /// Returns the edge holding an auto-hide taskbar on the window's
    /// monitor, or `None` if there is none (or the host cannot tell).
    fn autohide_taskbar_edge(&mut self, window: WindowId) -> Option<ScreenEdge>;

    /// Reads the current theme signals.
    fn theme_signals(&mut self) -> ThemeSignals;

    /// Returns the system window color used for high contrast fills, if the
    /// host can report it.
    fn system_window_color(&mut self) -> Option<Rgba8>;

    /// Sets the cursor shape.
    fn set_cursor(&mut self, cursor: CursorKind);

    /// Shows the system menu at a screen position with the given item
    /// states, returning the selected command.
    ///
    /// Returns `None` when the user dismisses the menu or the host has no
    /// system menu.
    fn show_system_menu(
        &mut self,
        window: WindowId,
        at: PhysPoint,
        state: SystemMenuState,
    ) -> Option<SystemCommand>;

    /// Posts a system command to the window's queue.
    fn post_system_command(&mut self, window: WindowId, command: SystemCommand);

    /// Creates the transparent input sink child of `parent` covering `rect`
    /// in parent client coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::ChildCreateFailed`] if the child cannot be
    /// created.
    fn create_drag_sink(
        &mut self,
        parent: WindowId,
        rect: PhysRect,
    ) -> Result<WindowId, HostError>;

    /// Moves and resizes a child window within its parent.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::WindowOpFailed`] if the host refuses.
    fn move_child(&mut self, child: WindowId, rect: PhysRect) -> Result<(), HostError>;

    /// Destroys a window the frame created.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::DestroyFailed`] if destruction fails.
    fn destroy_window(&mut self, window: WindowId) -> Result<(), HostError>;

    /// Releases the frame's claim on the main window handle during teardown.
    ///
    /// The host owns the window; this only severs the frame's association.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::DestroyFailed`] if the release fails.
    fn release_window(&mut self, window: WindowId) -> Result<(), HostError>;

    /// Forwards a pointer message from the drag sink to the main window's
    /// non-client queue, tagged with the zone it hit.
    fn post_nonclient_pointer(
        &mut self,
        window: WindowId,
        message: PointerMessage,
        zone: HitTestZone,
        screen: PhysPoint,
    );
}
