// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The composition surface bound to a window.
//!
//! [`CompositionSurface`] tracks the target the effect graph draws into: a
//! rect in client space starting below the title bar, so window content above
//! it stays untouched by the material. The surface binds to one window for
//! its whole life; geometry and scale follow the window through
//! [`resize`](CompositionSurface::resize) and
//! [`rescale`](CompositionSurface::rescale).
//!
//! Resize and rescale calls that arrive while detached are dropped silently.
//! Hosts deliver geometry messages reentrantly during teardown, and a late
//! resize on a dead target must not turn into an error.

use core::fmt;

use kurbo::Rect;

use crate::backend::{BackendError, BackendNode, RenderBackend};
use crate::geometry::PhysSize;
use crate::host::WindowId;

/// Reference DPI at which scale is `1.0`.
const BASE_DPI: f64 = 96.0;

/// Binding state of a [`CompositionSurface`].
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum SurfaceState {
    /// Not bound to any window.
    Detached,
    /// Bound to a window with a live backend target.
    Attached {
        /// The window the target belongs to.
        window: WindowId,
        /// Target bounds in client space.
        bounds: Rect,
        /// Target DPI.
        dpi: u32,
    },
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self::Detached
    }
}

/// How a present attempt ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PresentOutcome {
    /// The frame reached the screen.
    Presented,
    /// The commit failed transiently; drop this frame and try the next.
    RetryNextFrame,
}

/// A fatal-to-frame presentation error.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PresentError {
    /// The surface is not attached to a window.
    Detached,
    /// No realized effect graph supplies a terminal node.
    NoGraph,
    /// Drawing the terminal node failed with the given backend code.
    Draw(i32),
    /// The composition device is gone.
    DeviceLost,
}

impl fmt::Display for PresentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detached => write!(f, "composition surface is detached"),
            Self::NoGraph => write!(f, "no realized effect graph to present"),
            Self::Draw(c) => write!(f, "terminal draw failed (code {c})"),
            Self::DeviceLost => write!(f, "composition device lost"),
        }
    }
}

impl core::error::Error for PresentError {}

/// The backdrop target below the title bar.
#[derive(Debug, Default)]
pub struct CompositionSurface {
    state: SurfaceState,
}

/// Computes the surface bounds for a client size and title bar height.
///
/// The material starts directly below the title bar and fills the rest of
/// the client area.
#[must_use]
pub fn surface_bounds(client: PhysSize, title_bar_height: i32) -> Rect {
    Rect::new(
        0.0,
        f64::from(title_bar_height),
        f64::from(client.width),
        f64::from(client.height),
    )
}

impl CompositionSurface {
    /// Creates a detached surface.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: SurfaceState::Detached,
        }
    }

    /// Returns the binding state.
    #[must_use]
    pub const fn state(&self) -> SurfaceState {
        self.state
    }

    /// Returns whether the surface is bound to a window.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        matches!(self.state, SurfaceState::Attached { .. })
    }

    /// Returns the current target bounds, if attached.
    #[must_use]
    pub const fn bounds(&self) -> Option<Rect> {
        match self.state {
            SurfaceState::Attached { bounds, .. } => Some(bounds),
            SurfaceState::Detached => None,
        }
    }

    /// Returns the current target DPI, if attached.
    #[must_use]
    pub const fn dpi(&self) -> Option<u32> {
        match self.state {
            SurfaceState::Attached { dpi, .. } => Some(dpi),
            SurfaceState::Detached => None,
        }
    }

    /// Binds the surface to `window` and creates the backend target.
    ///
    /// # Errors
    ///
    /// Returns the [`BackendError`] if the target cannot be created; the
    /// surface stays detached.
    ///
    /// # Panics
    ///
    /// Panics if the surface is already attached. A surface binds once; a
    /// new window gets a new surface.
    pub fn attach<B>(
        &mut self,
        backend: &mut B,
        window: WindowId,
        client: PhysSize,
        title_bar_height: i32,
        dpi: u32,
    ) -> Result<(), BackendError>
    where
        B: RenderBackend + ?Sized,
    {
        assert!(
            !self.is_attached(),
            "composition surface is already attached"
        );
        let bounds = surface_bounds(client, title_bar_height);
        backend.create_or_resize_target(window, bounds, dpi)?;
        self.state = SurfaceState::Attached {
            window,
            bounds,
            dpi,
        };
        Ok(())
    }

    /// Resizes the target to a new client size.
    ///
    /// Does nothing while detached.
    ///
    /// # Errors
    ///
    /// Returns the [`BackendError`] if the backend rejects the new bounds;
    /// the stored bounds keep the last applied value.
    pub fn resize<B>(
        &mut self,
        backend: &mut B,
        client: PhysSize,
        title_bar_height: i32,
    ) -> Result<(), BackendError>
    where
        B: RenderBackend + ?Sized,
    {
        let SurfaceState::Attached { window, dpi, .. } = self.state else {
            return Ok(());
        };
        let bounds = surface_bounds(client, title_bar_height);
        backend.create_or_resize_target(window, bounds, dpi)?;
        self.state = SurfaceState::Attached {
            window,
            bounds,
            dpi,
        };
        Ok(())
    }

    /// Updates the target scale after a DPI change.
    ///
    /// Does nothing while detached.
    ///
    /// # Errors
    ///
    /// Returns the [`BackendError`] if the backend rejects the new scale.
    pub fn rescale<B>(&mut self, backend: &mut B, dpi: u32) -> Result<(), BackendError>
    where
        B: RenderBackend + ?Sized,
    {
        let SurfaceState::Attached { window, bounds, .. } = self.state else {
            return Ok(());
        };
        backend.rescale_target(window, f64::from(dpi) / BASE_DPI)?;
        self.state = SurfaceState::Attached {
            window,
            bounds,
            dpi,
        };
        Ok(())
    }

    /// Draws `terminal` into the target and commits the frame.
    ///
    /// A transient commit failure is not an error: the frame is dropped and
    /// [`PresentOutcome::RetryNextFrame`] asks the caller to simply present
    /// again on the next cycle.
    ///
    /// # Errors
    ///
    /// Returns [`PresentError::Detached`] if the surface has no target,
    /// [`PresentError::Draw`] if the draw fails, or
    /// [`PresentError::DeviceLost`] if the device is gone. All are fatal to
    /// this frame.
    pub fn present<B>(
        &mut self,
        backend: &mut B,
        terminal: BackendNode,
    ) -> Result<PresentOutcome, PresentError>
    where
        B: RenderBackend + ?Sized,
    {
        if !self.is_attached() {
            return Err(PresentError::Detached);
        }
        match backend.draw(terminal) {
            Ok(()) => {}
            Err(BackendError::DeviceLost) => return Err(PresentError::DeviceLost),
            Err(e) => return Err(PresentError::Draw(e.raw_code())),
        }
        match backend.present() {
            Ok(()) => Ok(PresentOutcome::Presented),
            Err(BackendError::DeviceLost) => Err(PresentError::DeviceLost),
            Err(_) => Ok(PresentOutcome::RetryNextFrame),
        }
    }

    /// Detaches the surface and releases the backend target.
    ///
    /// The state flips to detached *before* the backend call, so geometry
    /// messages delivered reentrantly during the release see a detached
    /// surface and drop out. Already-detached teardown is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the [`BackendError`] from the release; the surface is
    /// detached either way.
    pub fn teardown<B>(&mut self, backend: &mut B) -> Result<(), BackendError>
    where
        B: RenderBackend + ?Sized,
    {
        let SurfaceState::Attached { window, .. } = self.state else {
            return Ok(());
        };
        self.state = SurfaceState::Detached;
        backend.release_target(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_start_below_title_bar() {
        let b = surface_bounds(PhysSize::new(800, 600), 31);
        assert_eq!(b, Rect::new(0.0, 31.0, 800.0, 600.0));
        assert_eq!(b.height(), 569.0);
    }

    #[test]
    fn resized_bounds_track_client_size() {
        let b = surface_bounds(PhysSize::new(1000, 700), 31);
        assert_eq!(b.height(), 669.0);
        assert_eq!(b.width(), 1000.0);
    }

    #[test]
    fn detached_surface_reports_nothing() {
        let s = CompositionSurface::new();
        assert!(!s.is_attached());
        assert_eq!(s.bounds(), None);
        assert_eq!(s.dpi(), None);
    }
}
