// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render backend contract for compositor integrations.
//!
//! Scrim splits compositor-specific work into *backend* implementations of
//! [`RenderBackend`]. The core builds an effect graph model and a
//! composition surface; a backend realizes them against whatever the
//! platform offers. Each backend provides the following pieces:
//!
//! - **Capability probes** answering which effect features exist, so the
//!   graph builder can pick the luminosity or legacy tint topology before
//!   creating any node.
//!
//! - **Node management** creating, parameterizing, wiring and destroying
//!   effect nodes. Nodes are identified by opaque [`BackendNode`] handles the
//!   backend assigns.
//!
//! - **Target management** binding a composition target to a native window
//!   and keeping its size and scale current.
//!
//! - **Presentation** drawing the terminal node into the target and
//!   committing the result.
//!
//! # Crate boundaries
//!
//! `scrim_core` owns the window model, the effect graph model and this
//! contract module. Backend implementations depend on `scrim_core` and
//! provide compositor glue. Application code depends on both and pumps host
//! events through a [`WindowFrame`](crate::window::WindowFrame).
//!
//! # Failure model
//!
//! Backend calls return [`BackendError`] with the compositor's raw code.
//! [`BackendError::DeviceLost`] is special: it poisons the whole target and
//! surfaces as a fatal frame error, while any other draw or flush failure is
//! scoped to the frame that issued it.

use core::fmt;

use kurbo::Rect;

use crate::color::Rgba8;
use crate::host::WindowId;

/// Identifies an effect node inside the backend.
///
/// The core treats the value as opaque; backends typically store a resource
/// table index in it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BackendNode(pub u64);

impl fmt::Debug for BackendNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BackendNode({})", self.0)
    }
}

/// The effect node kinds a backend can be asked to create.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum NodeKind {
    /// Samples what is behind the window.
    Backdrop,
    /// An infinite solid color fill.
    Flood,
    /// Gaussian blur of its input.
    Blur,
    /// Saturation adjustment of its input.
    Saturation,
    /// Blends a foreground over a background with a blend mode.
    Blend,
    /// Composites a foreground over a background.
    Composite,
    /// Procedural noise texture source.
    Noise,
    /// Weighted crossfade between two inputs.
    Crossfade,
}

/// Blend modes used by the acrylic recipes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BlendMode {
    /// Takes luminosity from the foreground, color from the background.
    Luminosity,
    /// Takes color from the foreground, luminosity from the background.
    Color,
    /// Difference-like exclusion blend, used by the legacy tint path.
    Exclusion,
}

/// Composite modes used by the acrylic recipes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CompositeMode {
    /// Standard source-over alpha compositing.
    SourceOver,
}

/// Blur edge handling.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EdgeMode {
    /// Clamp at the edge, no transparent fringe.
    Hard,
}

/// Noise tiling behavior.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TileMode {
    /// The noise texture repeats in both directions.
    Wrap,
}

/// Which backdrop a backdrop node samples.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BackdropKind {
    /// Everything visually behind the window, live.
    HostBackdrop,
    /// The desktop wallpaper only.
    Wallpaper,
}

/// Parameter slots on an effect node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ParamKey {
    /// Flood fill color.
    Color,
    /// Noise opacity.
    Opacity,
    /// Blur radius in pixels.
    Radius,
    /// Saturation factor.
    Saturation,
    /// Blend mode selector.
    BlendMode,
    /// Composite mode selector.
    CompositeMode,
    /// Blur edge mode selector.
    EdgeMode,
    /// Noise tile mode selector.
    TileMode,
    /// Crossfade weight.
    Weight,
    /// Backdrop source selector.
    Source,
}

/// A parameter value for [`RenderBackend::set_param`].
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ParamValue {
    /// A color.
    Color(Rgba8),
    /// A scalar such as a radius, opacity or weight.
    Scalar(f64),
    /// A blend mode.
    Blend(BlendMode),
    /// A composite mode.
    Composite(CompositeMode),
    /// A blur edge mode.
    Edge(EdgeMode),
    /// A noise tile mode.
    Tile(TileMode),
    /// A backdrop source.
    Backdrop(BackdropKind),
}

/// An error from a render backend operation.
///
/// All variants except [`DeviceLost`](Self::DeviceLost) carry the
/// compositor's raw error code.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BackendError {
    /// Node creation failed.
    CreateFailed(i32),
    /// The backend rejected a parameter value.
    ParamRejected(i32),
    /// The backend rejected an input wiring.
    WireRejected(i32),
    /// A composition target operation failed.
    TargetFailed(i32),
    /// Drawing the terminal node failed.
    DrawFailed(i32),
    /// Committing the frame failed. Transient; retry next frame.
    FlushFailed(i32),
    /// The composition device is gone. The target cannot be recovered.
    DeviceLost,
    /// Destroying a node failed.
    DestroyFailed(i32),
}

impl BackendError {
    /// The compositor's raw error code, or zero for device loss.
    #[must_use]
    pub const fn raw_code(&self) -> i32 {
        match self {
            Self::CreateFailed(c)
            | Self::ParamRejected(c)
            | Self::WireRejected(c)
            | Self::TargetFailed(c)
            | Self::DrawFailed(c)
            | Self::FlushFailed(c)
            | Self::DestroyFailed(c) => *c,
            Self::DeviceLost => 0,
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateFailed(c) => write!(f, "effect node creation failed (code {c})"),
            Self::ParamRejected(c) => write!(f, "effect parameter rejected (code {c})"),
            Self::WireRejected(c) => write!(f, "effect input wiring rejected (code {c})"),
            Self::TargetFailed(c) => write!(f, "composition target operation failed (code {c})"),
            Self::DrawFailed(c) => write!(f, "terminal draw failed (code {c})"),
            Self::FlushFailed(c) => write!(f, "frame commit failed (code {c})"),
            Self::DeviceLost => write!(f, "composition device lost"),
            Self::DestroyFailed(c) => write!(f, "effect node destruction failed (code {c})"),
        }
    }
}

impl core::error::Error for BackendError {}

/// Compositor services consumed by the effect graph and composition surface.
///
/// A backend instance serves one window frame at a time. The core guarantees
/// it never references a node after [`destroy_node`](Self::destroy_node) and
/// never draws into a target it has released.
pub trait RenderBackend {
    /// Whether the compositor supports the luminosity blend mode.
    ///
    /// Decides between the luminosity and legacy tint topologies. Probed once
    /// per graph build.
    fn supports_luminosity_blend(&mut self) -> bool;

    /// Whether the compositor can sample the live host backdrop.
    ///
    /// When `false`, backdrop nodes fall back to sampling the wallpaper.
    fn supports_host_backdrop(&mut self) -> bool;

    /// Creates an effect node of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::CreateFailed`] or
    /// [`BackendError::DeviceLost`].
    fn create_node(&mut self, kind: NodeKind) -> Result<BackendNode, BackendError>;

    /// Sets a parameter on a node.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::ParamRejected`] if the node has no such
    /// parameter or rejects the value.
    fn set_param(
        &mut self,
        node: BackendNode,
        key: ParamKey,
        value: ParamValue,
    ) -> Result<(), BackendError>;

    /// Connects `input` to the numbered input slot of `node`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::WireRejected`] if the slot does not exist or
    /// the wiring is invalid.
    fn wire_input(
        &mut self,
        node: BackendNode,
        slot: u8,
        input: BackendNode,
    ) -> Result<(), BackendError>;

    /// Destroys a node.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::DestroyFailed`]. The node handle is dead
    /// either way.
    fn destroy_node(&mut self, node: BackendNode) -> Result<(), BackendError>;

    /// Creates the composition target for `window` or resizes it to
    /// `bounds`, a rect in the window's client space.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::TargetFailed`] or
    /// [`BackendError::DeviceLost`].
    fn create_or_resize_target(
        &mut self,
        window: WindowId,
        bounds: Rect,
        dpi: u32,
    ) -> Result<(), BackendError>;

    /// Updates the target's scale factor without changing its bounds.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::TargetFailed`] or
    /// [`BackendError::DeviceLost`].
    fn rescale_target(&mut self, window: WindowId, scale: f64) -> Result<(), BackendError>;

    /// Draws `terminal` and its whole upstream chain into the current
    /// target.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::DrawFailed`] or [`BackendError::DeviceLost`].
    fn draw(&mut self, terminal: BackendNode) -> Result<(), BackendError>;

    /// Commits the drawn frame to the screen.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::FlushFailed`], which is transient, or
    /// [`BackendError::DeviceLost`].
    fn present(&mut self) -> Result<(), BackendError>;

    /// Releases the composition target for `window`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::TargetFailed`]. The target is unusable either
    /// way.
    fn release_target(&mut self, window: WindowId) -> Result<(), BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_code_extracts_inner_code() {
        assert_eq!(BackendError::CreateFailed(-7).raw_code(), -7);
        assert_eq!(BackendError::FlushFailed(1).raw_code(), 1);
        assert_eq!(BackendError::DeviceLost.raw_code(), 0);
    }
}
