// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-window model.
//!
//! [`WindowModel`] is the single owned record of one top-level window's
//! state: geometry, visibility, DPI, theme and activation. All of it is
//! instance state; nothing in this crate lives in process-wide statics, so
//! multiple windows and test doubles coexist without interference.
//!
//! Mutation goes through setters that record what changed in a
//! [`ModelChanges`] set. The frame drains the set with
//! [`WindowModel::take_changes`] after each host event and forwards only the
//! touched fields downstream, instead of wiring a callback per field.
//!
//! Derived frame metrics are cached on the model and invalidated whenever
//! DPI or visibility changes; [`WindowModel::metrics`] recomputes them on
//! first read after an invalidation.

use crate::geometry::PhysRect;
use crate::host::WindowId;
use crate::metrics::{BaselineMetrics, FrameMetrics};
use crate::theme::Theme;

/// The visibility state of a window, as reported by the host.
///
/// Exactly one value holds at a time. Transitions come from host
/// notifications only; the frame never infers visibility from geometry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Visibility {
    /// Not shown at all.
    Hidden,
    /// Minimized to the taskbar.
    Minimized,
    /// Maximized to the working area.
    Maximized,
    /// Ordinary floating window.
    Normal,
    /// Borderless full screen.
    FullScreen,
}

/// Lifecycle state of a window frame.
///
/// A frame starts [`Unrealized`](Self::Unrealized) and becomes live on
/// creation. While live, the state mirrors the window's visibility. A close
/// request moves it through [`Closing`](Self::Closing) to the terminal
/// [`Destroyed`](Self::Destroyed); no transition leaves `Destroyed`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum FrameState {
    /// Created in memory but not yet bound to a host window.
    Unrealized,
    /// Live, window in the normal state.
    Normal,
    /// Live, window maximized.
    Maximized,
    /// Live, window minimized.
    Minimized,
    /// Live, window in borderless full screen.
    FullScreen,
    /// Teardown in progress.
    Closing,
    /// Torn down. Terminal.
    Destroyed,
}

impl FrameState {
    /// Returns the live state that mirrors `visibility`, or `None` for
    /// [`Visibility::Hidden`] (hiding keeps the previous state).
    #[must_use]
    pub const fn for_visibility(visibility: Visibility) -> Option<Self> {
        match visibility {
            Visibility::Hidden => None,
            Visibility::Minimized => Some(Self::Minimized),
            Visibility::Maximized => Some(Self::Maximized),
            Visibility::Normal => Some(Self::Normal),
            Visibility::FullScreen => Some(Self::FullScreen),
        }
    }

    /// Whether the frame is bound to a window and not tearing down.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        !matches!(self, Self::Unrealized | Self::Closing | Self::Destroyed)
    }
}

/// The set of model fields touched since the last
/// [`WindowModel::take_changes`] call.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ModelChanges {
    /// Outer geometry changed.
    pub geometry: bool,
    /// Visibility changed.
    pub visibility: bool,
    /// DPI changed.
    pub dpi: bool,
    /// Theme changed.
    pub theme: bool,
    /// Activation changed.
    pub activation: bool,
}

impl ModelChanges {
    /// Whether any field changed.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.geometry || self.visibility || self.dpi || self.theme || self.activation
    }

    /// Clears all change flags.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Owned state of one top-level window.
#[derive(Clone, Debug)]
pub struct WindowModel {
    window: WindowId,
    geometry: PhysRect,
    visibility: Visibility,
    dpi: u32,
    theme: Theme,
    active: bool,
    /// Cached derived metrics; `None` after a DPI or visibility change.
    metrics: Option<FrameMetrics>,
    changes: ModelChanges,
}

impl WindowModel {
    /// Creates a model for `window` with its initial geometry, DPI and
    /// theme, in the [`Visibility::Normal`] state.
    #[must_use]
    pub const fn new(window: WindowId, geometry: PhysRect, dpi: u32, theme: Theme) -> Self {
        Self {
            window,
            geometry,
            visibility: Visibility::Normal,
            dpi,
            theme,
            active: false,
            metrics: None,
            changes: ModelChanges {
                geometry: false,
                visibility: false,
                dpi: false,
                theme: false,
                activation: false,
            },
        }
    }

    /// The host window this model describes.
    #[must_use]
    pub const fn window(&self) -> WindowId {
        self.window
    }

    /// Current outer geometry in screen coordinates.
    #[must_use]
    pub const fn geometry(&self) -> PhysRect {
        self.geometry
    }

    /// Current visibility.
    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Current DPI.
    #[must_use]
    pub const fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Current theme.
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Whether the window is active (focused).
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Sets the outer geometry.
    pub fn set_geometry(&mut self, geometry: PhysRect) {
        if self.geometry != geometry {
            self.geometry = geometry;
            self.changes.geometry = true;
        }
    }

    /// Sets the visibility, invalidating cached metrics on change.
    ///
    /// Returns `true` if the visibility actually transitioned.
    pub fn set_visibility(&mut self, visibility: Visibility) -> bool {
        if self.visibility == visibility {
            return false;
        }
        self.visibility = visibility;
        self.metrics = None;
        self.changes.visibility = true;
        true
    }

    /// Sets the DPI, invalidating cached metrics on change.
    pub fn set_dpi(&mut self, dpi: u32) {
        if self.dpi != dpi {
            self.dpi = dpi;
            self.metrics = None;
            self.changes.dpi = true;
        }
    }

    /// Sets the theme.
    pub fn set_theme(&mut self, theme: Theme) {
        if self.theme != theme {
            self.theme = theme;
            self.changes.theme = true;
        }
    }

    /// Sets the activation flag.
    pub fn set_active(&mut self, active: bool) {
        if self.active != active {
            self.active = active;
            self.changes.activation = true;
        }
    }

    /// Returns the frame metrics for the current DPI and visibility,
    /// computing and caching them if the cache is empty.
    pub fn metrics(&mut self, baseline: &BaselineMetrics) -> FrameMetrics {
        match self.metrics {
            Some(m) => m,
            None => {
                let m = FrameMetrics::compute(baseline, self.dpi, self.visibility);
                self.metrics = Some(m);
                m
            }
        }
    }

    /// The cached metrics, if any are current.
    #[must_use]
    pub const fn cached_metrics(&self) -> Option<FrameMetrics> {
        self.metrics
    }

    /// Drops the cached metrics so the next [`metrics`](Self::metrics) call
    /// recomputes them.
    pub fn invalidate_metrics(&mut self) {
        self.metrics = None;
    }

    /// Takes the accumulated change set, leaving an empty one behind.
    pub fn take_changes(&mut self) -> ModelChanges {
        core::mem::take(&mut self.changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PhysRect;

    fn model() -> WindowModel {
        WindowModel::new(
            WindowId(1),
            PhysRect::new(100, 100, 900, 700),
            96,
            Theme::Dark,
        )
    }

    #[test]
    fn setters_accumulate_changes() {
        let mut m = model();
        assert!(!m.take_changes().any());

        m.set_geometry(PhysRect::new(100, 100, 1100, 800));
        m.set_active(true);
        let changes = m.take_changes();
        assert!(changes.geometry);
        assert!(changes.activation);
        assert!(!changes.visibility);
        assert!(!changes.dpi);
        assert!(!changes.theme);

        // Taking drains.
        assert!(!m.take_changes().any());
    }

    #[test]
    fn identical_values_do_not_mark() {
        let mut m = model();
        m.set_geometry(m.geometry());
        m.set_dpi(96);
        m.set_theme(Theme::Dark);
        m.set_active(false);
        assert!(!m.set_visibility(Visibility::Normal));
        assert!(!m.take_changes().any());
    }

    #[test]
    fn metrics_cache_survives_geometry_but_not_dpi() {
        let mut m = model();
        let first = m.metrics(&BaselineMetrics::UNAVAILABLE);
        assert_eq!(first.title_bar_height, 31);
        assert!(m.cached_metrics().is_some());

        m.set_geometry(PhysRect::new(0, 0, 640, 480));
        assert!(m.cached_metrics().is_some());

        m.set_dpi(192);
        assert!(m.cached_metrics().is_none());
        assert_eq!(m.metrics(&BaselineMetrics::UNAVAILABLE).title_bar_height, 62);
    }

    #[test]
    fn visibility_change_invalidates_metrics() {
        let mut m = model();
        assert_eq!(m.metrics(&BaselineMetrics::UNAVAILABLE).title_bar_height, 31);
        assert!(m.set_visibility(Visibility::Maximized));
        assert!(m.cached_metrics().is_none());
        assert_eq!(m.metrics(&BaselineMetrics::UNAVAILABLE).title_bar_height, 23);
    }

    #[test]
    fn frame_state_mirrors_visibility() {
        assert_eq!(
            FrameState::for_visibility(Visibility::Maximized),
            Some(FrameState::Maximized)
        );
        assert_eq!(
            FrameState::for_visibility(Visibility::FullScreen),
            Some(FrameState::FullScreen)
        );
        assert_eq!(FrameState::for_visibility(Visibility::Hidden), None);
    }

    #[test]
    fn frame_state_liveness() {
        assert!(!FrameState::Unrealized.is_live());
        assert!(FrameState::Normal.is_live());
        assert!(FrameState::Minimized.is_live());
        assert!(!FrameState::Closing.is_live());
        assert!(!FrameState::Destroyed.is_live());
    }
}
