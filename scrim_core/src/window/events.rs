// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host events and frame replies.
//!
//! The host translates its native window messages into [`HostEvent`] values
//! and feeds them to [`WindowFrame::handle`](super::WindowFrame::handle),
//! which answers with an [`EventReply`]. Events must be delivered strictly
//! in the order the platform produced them; each `handle` call fully settles
//! (metrics recomputed, surfaces resized) before it returns, so the host
//! never needs to batch or reorder.
//!
//! Replies other than [`EventReply::Handled`] and [`EventReply::Ignored`]
//! carry a payload the host must translate back into its native message
//! result (a hit test code, a client rectangle, a sink acknowledgment).

use crate::dragsink::{SinkAck, SinkStructural};
use crate::geometry::{PhysPoint, PhysRect, PhysSize};

use super::model::Visibility;
use super::nonclient::{ClientAreaReply, HitTestZone};

/// A pointer button.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PointerButton {
    /// Primary button, usually left.
    Primary,
    /// Secondary button, usually right.
    Secondary,
    /// Middle button or wheel click.
    Middle,
    /// First extra button.
    Extra1,
    /// Second extra button.
    Extra2,
}

/// What a pointer button did.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PointerAction {
    /// Button pressed.
    Down,
    /// Button released.
    Up,
    /// Second press of a double click.
    DoubleClick,
}

/// A pointer button message, as forwarded by the drag sink.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PointerMessage {
    /// Which button.
    pub button: PointerButton,
    /// What it did.
    pub action: PointerAction,
}

/// A system setting key, pre-classified by the host.
///
/// Hosts receive setting changes keyed by name; the frame only reacts to the
/// immersive color set key, so hosts map everything else to
/// [`Other`](Self::Other).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum SettingKey {
    /// The immersive color set changed (light/dark preference).
    ImmersiveColorSet,
    /// Any other setting.
    Other,
}

/// An inbound window message, translated by the host.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HostEvent {
    /// The window was resized, possibly changing visibility.
    SizeChanged {
        /// Visibility reported by the notification.
        visibility: Visibility,
        /// New client size in physical pixels.
        size: PhysSize,
    },
    /// The window moved to a monitor with a different DPI, or the DPI of its
    /// monitor changed.
    DpiChanged {
        /// New horizontal DPI.
        dpi_x: u32,
        /// New vertical DPI.
        dpi_y: u32,
        /// Window rectangle the host pre-computed for the new DPI.
        suggested: PhysRect,
    },
    /// The host is computing the client area for a proposed window rect.
    CalcClientArea {
        /// Proposed outer rectangle in screen coordinates.
        proposed: PhysRect,
    },
    /// Non-client hit test at a screen point.
    HitTest {
        /// Queried position in screen coordinates.
        screen: PhysPoint,
    },
    /// The host is deciding which cursor to show over the client area.
    CursorUpdate,
    /// Right click in the non-client area.
    NcRightClick {
        /// Click position in screen coordinates.
        screen: PhysPoint,
    },
    /// A system setting changed.
    SettingChanged {
        /// Which setting.
        key: SettingKey,
    },
    /// The system colorization (accent) color changed.
    ColorizationChanged,
    /// The window gained or lost focus.
    FocusChanged {
        /// `true` if the window is now active.
        active: bool,
    },
    /// A modal move or size loop started (`true`) or ended (`false`).
    MoveSizeLoop {
        /// Whether the loop is now running.
        active: bool,
    },
    /// A pointer button message arrived at the drag sink.
    SinkPointer {
        /// The button message.
        message: PointerMessage,
        /// Pointer position in screen coordinates.
        screen: PhysPoint,
    },
    /// A structural message arrived at the drag sink.
    SinkStructural(SinkStructural),
    /// The window was asked to close.
    CloseRequested,
}

/// The frame's answer to one [`HostEvent`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EventReply {
    /// The event was consumed; no payload.
    Handled,
    /// The event is not the frame's to handle; the host should fall back to
    /// its default processing.
    Ignored,
    /// The zone a hit test resolved to.
    HitTest(HitTestZone),
    /// The computed client area and redraw hint.
    ClientArea(ClientAreaReply),
    /// The minimal answer to a drag sink structural message.
    Sink(SinkAck),
}
