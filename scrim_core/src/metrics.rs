// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame metric computation.
//!
//! Hosts report baseline frame metrics (border padding, resize frame, caption
//! height) unscaled, at the reference 96 DPI. This module scales them to the
//! window's actual DPI and fills in hard-coded fallbacks wherever the host
//! could not supply a value, so the rest of the crate always sees a complete
//! [`FrameMetrics`].
//!
//! All scaling rounds to nearest, matching how hosts scale their own frames.

use crate::geometry::Axis;
use crate::window::Visibility;

/// Resize border thickness at 96 DPI used when the host reports nothing.
pub const FALLBACK_RESIZE_BORDER_96: i32 = 8;

/// Caption height at 96 DPI used when the host reports nothing.
pub const FALLBACK_CAPTION_HEIGHT_96: i32 = 23;

/// Visible frame border thickness at 96 DPI used when the host reports
/// nothing.
pub const FALLBACK_FRAME_BORDER_96: i32 = 1;

/// Raw frame metrics as reported by the host, at 96 DPI.
///
/// A zero or negative value means the host query failed or returned nonsense;
/// the computations below substitute fallbacks in that case. `frame_border`
/// is `None` on hosts that cannot report it at all.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BaselineMetrics {
    /// Invisible padding around the visible frame.
    pub padded_border: i32,
    /// Resize frame thickness on the horizontal axis.
    pub size_frame_x: i32,
    /// Resize frame thickness on the vertical axis.
    pub size_frame_y: i32,
    /// Caption (title bar text area) height.
    pub caption_height: i32,
    /// Visible frame border thickness, if the host can report it.
    pub frame_border: Option<i32>,
}

impl BaselineMetrics {
    /// Metrics for a host that answered none of the queries.
    ///
    /// Every derived metric falls back to its hard-coded 96 DPI value.
    pub const UNAVAILABLE: Self = Self {
        padded_border: 0,
        size_frame_x: 0,
        size_frame_y: 0,
        caption_height: 0,
        frame_border: None,
    };
}

/// Scales a 96 DPI metric to `dpi`, rounding to nearest.
#[must_use]
pub const fn scale_for_dpi(value_96: i32, dpi: u32) -> i32 {
    (value_96 * dpi as i32 + 48) / 96
}

/// Returns the scaled resize border thickness along `axis`.
///
/// The border is the padded border plus the size frame for that axis. If
/// their sum is not positive the host metrics are unusable and the fallback
/// applies instead.
#[must_use]
pub const fn resize_border_thickness(axis: Axis, baseline: &BaselineMetrics, dpi: u32) -> i32 {
    let frame = match axis {
        Axis::X => baseline.size_frame_x,
        Axis::Y => baseline.size_frame_y,
    };
    let sum = baseline.padded_border + frame;
    if sum > 0 {
        scale_for_dpi(sum, dpi)
    } else {
        scale_for_dpi(FALLBACK_RESIZE_BORDER_96, dpi)
    }
}

/// Returns the scaled caption height.
#[must_use]
pub const fn caption_height(baseline: &BaselineMetrics, dpi: u32) -> i32 {
    if baseline.caption_height > 0 {
        scale_for_dpi(baseline.caption_height, dpi)
    } else {
        scale_for_dpi(FALLBACK_CAPTION_HEIGHT_96, dpi)
    }
}

/// Complete frame metrics for one window at one DPI.
///
/// Produced by [`FrameMetrics::compute`]; every field is final and scaled,
/// with fallbacks already substituted.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FrameMetrics {
    /// Resize border thickness on the horizontal axis.
    pub resize_border_x: i32,
    /// Resize border thickness on the vertical axis.
    pub resize_border_y: i32,
    /// Caption height, excluding any border.
    pub caption_height: i32,
    /// Total title bar height from the top of the client area.
    pub title_bar_height: i32,
    /// Top margin by which the frame extends into the client area.
    pub top_frame_margin: i32,
}

impl FrameMetrics {
    /// Computes the metrics for a window in the given visibility state.
    ///
    /// A maximized window's resize borders hang off screen, so its title bar
    /// is the caption alone and its top frame margin is zero. In every other
    /// state the title bar includes the vertical resize border above the
    /// caption and the frame extends into the client by the visible border
    /// thickness.
    #[must_use]
    pub const fn compute(baseline: &BaselineMetrics, dpi: u32, visibility: Visibility) -> Self {
        let resize_border_x = resize_border_thickness(Axis::X, baseline, dpi);
        let resize_border_y = resize_border_thickness(Axis::Y, baseline, dpi);
        let caption = caption_height(baseline, dpi);
        let maximized = matches!(visibility, Visibility::Maximized);
        let title_bar_height = if maximized {
            caption
        } else {
            caption + resize_border_y
        };
        let top_frame_margin = if maximized {
            0
        } else {
            let border = match baseline.frame_border {
                Some(b) if b > 0 => b,
                _ => FALLBACK_FRAME_BORDER_96,
            };
            scale_for_dpi(border, dpi)
        };
        Self {
            resize_border_x,
            resize_border_y,
            caption_height: caption,
            title_bar_height,
            top_frame_margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling_rounds_to_nearest() {
        assert_eq!(scale_for_dpi(23, 96), 23);
        assert_eq!(scale_for_dpi(23, 144), 35); // 34.5 rounds up
        assert_eq!(scale_for_dpi(23, 192), 46);
        assert_eq!(scale_for_dpi(8, 120), 10);
        assert_eq!(scale_for_dpi(1, 96), 1);
    }

    #[test]
    fn unavailable_baseline_uses_fallbacks() {
        let b = BaselineMetrics::UNAVAILABLE;
        assert_eq!(resize_border_thickness(Axis::X, &b, 96), 8);
        assert_eq!(resize_border_thickness(Axis::Y, &b, 96), 8);
        assert_eq!(caption_height(&b, 96), 23);
    }

    #[test]
    fn reported_baseline_is_scaled() {
        let b = BaselineMetrics {
            padded_border: 4,
            size_frame_x: 4,
            size_frame_y: 4,
            caption_height: 23,
            frame_border: Some(1),
        };
        assert_eq!(resize_border_thickness(Axis::Y, &b, 96), 8);
        assert_eq!(resize_border_thickness(Axis::Y, &b, 192), 16);
        assert_eq!(caption_height(&b, 192), 46);
    }

    #[test]
    fn normal_title_bar_includes_border() {
        let m = FrameMetrics::compute(&BaselineMetrics::UNAVAILABLE, 96, Visibility::Normal);
        assert_eq!(m.caption_height, 23);
        assert_eq!(m.resize_border_y, 8);
        assert_eq!(m.title_bar_height, 31);
        assert_eq!(m.top_frame_margin, 1);
    }

    #[test]
    fn maximized_title_bar_is_caption_only() {
        let m = FrameMetrics::compute(&BaselineMetrics::UNAVAILABLE, 96, Visibility::Maximized);
        assert_eq!(m.title_bar_height, 23);
        assert_eq!(m.top_frame_margin, 0);
    }

    #[test]
    fn high_dpi_doubles_everything() {
        let m = FrameMetrics::compute(&BaselineMetrics::UNAVAILABLE, 192, Visibility::Normal);
        assert_eq!(m.resize_border_y, 16);
        assert_eq!(m.caption_height, 46);
        assert_eq!(m.title_bar_height, 62);
        assert_eq!(m.top_frame_margin, 2);
    }

    #[test]
    fn negative_host_values_fall_back() {
        let b = BaselineMetrics {
            padded_border: -4,
            size_frame_x: 2,
            size_frame_y: 2,
            caption_height: -1,
            frame_border: Some(0),
        };
        // -4 + 2 <= 0 so the fallback border applies.
        assert_eq!(resize_border_thickness(Axis::X, &b, 96), 8);
        assert_eq!(caption_height(&b, 96), 23);
        let m = FrameMetrics::compute(&b, 96, Visibility::Normal);
        assert_eq!(m.top_frame_margin, 1);
    }
}
