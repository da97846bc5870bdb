// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Non-client geometry: client area calculation and hit testing.
//!
//! With the stock title bar suppressed, the frame answers the host's client
//! area calculation and hit test queries itself. Both computations are pure
//! functions of the window's metrics and visibility; the frame calls them
//! from its event handler with whatever host-supplied context they need.
//!
//! The host keeps ownership of the left, right and bottom resize borders
//! (those insets are untouched), so [`classify_hit`] only refines points the
//! host's own hit test already placed in the client area.

use crate::geometry::{PhysPoint, PhysRect};
use crate::host::{DefaultHitTest, ScreenEdge};
use crate::metrics::FrameMetrics;

use super::model::Visibility;

/// Pixels reserved along a screen edge so an auto-hide taskbar can reveal
/// itself when the window is maximized or full screen over it.
pub const AUTO_HIDE_REVEAL_INSET: i32 = 2;

/// The zone a non-client hit test resolved to.
///
/// Computed per event and never stored on the model.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HitTestZone {
    /// The synthetic top resize border.
    TopResizeBorder,
    /// The synthetic title bar.
    TitleBar,
    /// Ordinary client area.
    Client,
    /// The host's own result, passed through unchanged.
    Default(DefaultHitTest),
}

/// How the host should redraw after a client area calculation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RedrawHint {
    /// Redraw everything at the new position; no extra non-client area
    /// exists. Avoids flashing stale client pixels at the old position.
    CleanRedraw,
    /// Extra non-client area was reserved; the host must keep it, or child
    /// windows composite at the wrong offset.
    RetainFrame,
}

/// The result of a client area calculation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ClientAreaReply {
    /// The client rectangle in screen coordinates.
    pub client: PhysRect,
    /// How the host should redraw.
    pub hint: RedrawHint,
}

/// Computes the client rectangle for a proposed window rectangle.
///
/// Starts from the host's default frame (`default_applied`), then restores
/// the proposed top edge to cancel the host's title bar reservation. A
/// maximized window additionally gives back the vertical resize border the
/// host hangs off screen. When the window is maximized or full screen over
/// a monitor with an auto-hide taskbar, the taskbar's edge is inset by
/// [`AUTO_HIDE_REVEAL_INSET`] so it can still slide out.
#[must_use]
pub fn compute_client_area(
    proposed: PhysRect,
    default_applied: PhysRect,
    visibility: Visibility,
    metrics: &FrameMetrics,
    autohide_edge: Option<ScreenEdge>,
) -> ClientAreaReply {
    let mut client = default_applied;
    client.top = proposed.top;

    if visibility == Visibility::Maximized {
        client.top += metrics.resize_border_y;
    }

    let mut inset_added = false;
    if matches!(visibility, Visibility::Maximized | Visibility::FullScreen) {
        if let Some(edge) = autohide_edge {
            match edge {
                ScreenEdge::Left => client.left += AUTO_HIDE_REVEAL_INSET,
                ScreenEdge::Top => client.top += AUTO_HIDE_REVEAL_INSET,
                ScreenEdge::Right => client.right -= AUTO_HIDE_REVEAL_INSET,
                ScreenEdge::Bottom => client.bottom -= AUTO_HIDE_REVEAL_INSET,
            }
            inset_added = true;
        }
    }

    let hint = if inset_added {
        RedrawHint::RetainFrame
    } else {
        RedrawHint::CleanRedraw
    };
    ClientAreaReply { client, hint }
}

/// Classifies a window-local point into a hit test zone.
///
/// `default_result` is the host's stock hit test for the same point; any
/// non-client answer passes through untouched, since the host still owns the
/// left, right and bottom borders. Client points are refined by vertical
/// position: the top `resize_border_y` rows are the synthetic resize border
/// (normal state only), rows down to `title_bar_height` are the title bar
/// (normal or maximized), and the rest is client area.
#[must_use]
pub fn classify_hit(
    local: PhysPoint,
    visibility: Visibility,
    metrics: &FrameMetrics,
    default_result: DefaultHitTest,
) -> HitTestZone {
    if default_result != DefaultHitTest::Client {
        return HitTestZone::Default(default_result);
    }
    if visibility == Visibility::Normal && local.y <= metrics.resize_border_y {
        return HitTestZone::TopResizeBorder;
    }
    if matches!(visibility, Visibility::Normal | Visibility::Maximized)
        && local.y <= metrics.title_bar_height
    {
        return HitTestZone::TitleBar;
    }
    HitTestZone::Client
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ResizeEdge;
    use crate::metrics::BaselineMetrics;

    fn metrics(visibility: Visibility) -> FrameMetrics {
        FrameMetrics::compute(&BaselineMetrics::UNAVAILABLE, 96, visibility)
    }

    #[test]
    fn top_rows_partition_into_three_zones() {
        // At 96 DPI the fallback border is 8 and the title bar 31.
        let m = metrics(Visibility::Normal);
        let zone = |y| {
            classify_hit(
                PhysPoint::new(400, y),
                Visibility::Normal,
                &m,
                DefaultHitTest::Client,
            )
        };

        assert_eq!(zone(0), HitTestZone::TopResizeBorder);
        assert_eq!(zone(8), HitTestZone::TopResizeBorder);
        assert_eq!(zone(9), HitTestZone::TitleBar);
        assert_eq!(zone(31), HitTestZone::TitleBar);
        assert_eq!(zone(32), HitTestZone::Client);
        assert_eq!(zone(599), HitTestZone::Client);

        // Every row lands in exactly one zone.
        for y in 0..600 {
            let expected = if y <= 8 {
                HitTestZone::TopResizeBorder
            } else if y <= 31 {
                HitTestZone::TitleBar
            } else {
                HitTestZone::Client
            };
            assert_eq!(zone(y), expected, "row {y}");
        }
    }

    #[test]
    fn maximized_top_rows_are_title_bar_not_resize() {
        let m = metrics(Visibility::Maximized);
        let zone = |y| {
            classify_hit(
                PhysPoint::new(10, y),
                Visibility::Maximized,
                &m,
                DefaultHitTest::Client,
            )
        };
        assert_eq!(zone(0), HitTestZone::TitleBar);
        assert_eq!(zone(23), HitTestZone::TitleBar);
        assert_eq!(zone(24), HitTestZone::Client);
    }

    #[test]
    fn fullscreen_has_no_title_bar_zones() {
        let m = metrics(Visibility::FullScreen);
        let zone = classify_hit(
            PhysPoint::new(10, 0),
            Visibility::FullScreen,
            &m,
            DefaultHitTest::Client,
        );
        assert_eq!(zone, HitTestZone::Client);
    }

    #[test]
    fn default_non_client_results_pass_through() {
        let m = metrics(Visibility::Normal);
        let default = DefaultHitTest::Border(ResizeEdge::BottomRight);
        let zone = classify_hit(PhysPoint::new(795, 595), Visibility::Normal, &m, default);
        assert_eq!(zone, HitTestZone::Default(default));
    }

    #[test]
    fn normal_window_top_inset_is_restored() {
        let proposed = PhysRect::new(100, 100, 900, 700);
        // Host default frame reserves 8 px sides and a 31 px title bar.
        let default_applied = PhysRect::new(108, 131, 892, 692);
        let m = metrics(Visibility::Normal);
        let reply = compute_client_area(proposed, default_applied, Visibility::Normal, &m, None);
        assert_eq!(reply.client, PhysRect::new(108, 100, 892, 692));
        assert_eq!(reply.hint, RedrawHint::CleanRedraw);
    }

    #[test]
    fn maximized_without_autohide_taskbar_redraws_clean() {
        // Maximized placement hangs the borders off screen.
        let proposed = PhysRect::new(-8, -8, 1928, 1088);
        let default_applied = PhysRect::new(0, 23, 1920, 1080);
        let m = metrics(Visibility::Maximized);
        let reply = compute_client_area(proposed, default_applied, Visibility::Maximized, &m, None);
        // Top restored to -8, then pushed back down by the border.
        assert_eq!(reply.client.top, 0);
        assert_eq!(reply.hint, RedrawHint::CleanRedraw);
    }

    #[test]
    fn autohide_taskbar_reserves_reveal_inset() {
        let proposed = PhysRect::new(-8, -8, 1928, 1088);
        let default_applied = PhysRect::new(0, 23, 1920, 1080);
        let m = metrics(Visibility::Maximized);

        let cases = [
            (ScreenEdge::Left, PhysRect::new(2, 0, 1920, 1080)),
            (ScreenEdge::Top, PhysRect::new(0, 2, 1920, 1080)),
            (ScreenEdge::Right, PhysRect::new(0, 0, 1918, 1080)),
            (ScreenEdge::Bottom, PhysRect::new(0, 0, 1920, 1078)),
        ];
        for (edge, expected) in cases {
            let reply = compute_client_area(
                proposed,
                default_applied,
                Visibility::Maximized,
                &m,
                Some(edge),
            );
            assert_eq!(reply.client, expected, "{edge:?}");
            assert_eq!(reply.hint, RedrawHint::RetainFrame, "{edge:?}");
        }
    }

    #[test]
    fn autohide_taskbar_ignored_when_normal() {
        let proposed = PhysRect::new(100, 100, 900, 700);
        let default_applied = PhysRect::new(108, 131, 892, 692);
        let m = metrics(Visibility::Normal);
        let reply = compute_client_area(
            proposed,
            default_applied,
            Visibility::Normal,
            &m,
            Some(ScreenEdge::Bottom),
        );
        assert_eq!(reply.client, PhysRect::new(108, 100, 892, 692));
        assert_eq!(reply.hint, RedrawHint::CleanRedraw);
    }
}
