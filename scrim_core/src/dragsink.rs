// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The transparent input sink over the title bar.
//!
//! With the native title bar hidden, something still has to catch pointer
//! input in the title bar band and turn it into non-client interactions
//! (drag to move, double-click to maximize, right-click for the system
//! menu). [`DragSink`] owns a transparent child window spanning that band.
//! The child swallows pointer messages; the frame re-runs its hit test for
//! each one and reposts it to the parent's non-client queue via
//! [`WindowHost::post_nonclient_pointer`](crate::host::WindowHost::post_nonclient_pointer).
//!
//! The child never paints. Its structural messages are answered by
//! [`structural_reply`] so it stays invisible and frameless.

use crate::geometry::PhysRect;
use crate::host::{HostError, WindowHost, WindowId};

/// A structural message delivered to the sink child.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SinkStructural {
    /// The child was asked to paint.
    Paint,
    /// The child was asked to erase its background.
    EraseBackground,
    /// The child's client area is being calculated.
    CalcSize,
}

/// The fixed reply to a sink structural message.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SinkAck {
    /// Validate the paint region without drawing anything.
    PaintDone,
    /// Claim the erase happened so nothing gets cleared.
    EraseHandled,
    /// The whole window rect is client area; the child has no frame.
    AllClient,
}

/// Answers a structural message for the sink child.
#[must_use]
pub const fn structural_reply(message: SinkStructural) -> SinkAck {
    match message {
        SinkStructural::Paint => SinkAck::PaintDone,
        SinkStructural::EraseBackground => SinkAck::EraseHandled,
        SinkStructural::CalcSize => SinkAck::AllClient,
    }
}

/// Returns the sink child's rect for a client width and title bar height.
///
/// The sink spans the full width of the window from the top edge down to
/// the bottom of the title bar, in parent client coordinates.
#[must_use]
pub const fn sink_rect(client_width: i32, title_bar_height: i32) -> PhysRect {
    PhysRect::new(0, 0, client_width, title_bar_height)
}

/// Lifecycle of the transparent title-bar child window.
#[derive(Debug, Default)]
pub struct DragSink {
    window: Option<WindowId>,
}

impl DragSink {
    /// Creates a sink with no child window yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { window: None }
    }

    /// Returns the child window, if created.
    #[must_use]
    pub const fn window(&self) -> Option<WindowId> {
        self.window
    }

    /// Creates the child window covering `rect` in `parent`'s client area.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::ChildCreateFailed`] from the host. Fatal to
    /// window creation: a frame without its input sink would have a dead
    /// title bar.
    ///
    /// # Panics
    ///
    /// Panics if the child already exists.
    pub fn create<H>(
        &mut self,
        host: &mut H,
        parent: WindowId,
        rect: PhysRect,
    ) -> Result<WindowId, HostError>
    where
        H: WindowHost + ?Sized,
    {
        assert!(self.window.is_none(), "drag sink child already exists");
        let child = host.create_drag_sink(parent, rect)?;
        self.window = Some(child);
        Ok(child)
    }

    /// Moves the child to `rect` after a parent resize or metric change.
    ///
    /// Does nothing when no child exists.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::WindowOpFailed`] from the host.
    pub fn sync_geometry<H>(&mut self, host: &mut H, rect: PhysRect) -> Result<(), HostError>
    where
        H: WindowHost + ?Sized,
    {
        match self.window {
            Some(child) => host.move_child(child, rect),
            None => Ok(()),
        }
    }

    /// Destroys the child window.
    ///
    /// The handle is cleared *before* the host call, so messages delivered
    /// reentrantly during destruction see no child. Destroying an absent
    /// child is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::DestroyFailed`] from the host.
    pub fn destroy<H>(&mut self, host: &mut H) -> Result<(), HostError>
    where
        H: WindowHost + ?Sized,
    {
        match self.window.take() {
            Some(child) => host.destroy_window(child),
            None => Ok(()),
        }
    }
}
