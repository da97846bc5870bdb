// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed per-node parameter blocks.

use crate::backend::{
    BackdropKind, BackendError, BackendNode, BlendMode, CompositeMode, EdgeMode, NodeKind,
    ParamKey, ParamValue, RenderBackend, TileMode,
};
use crate::color::Rgba8;

/// The parameters of one effect node, tagged by kind.
///
/// This is the model-side mirror of the key/value parameters a backend node
/// carries. Keeping the block typed means a parameter update can be compared
/// against the stored state before anything is pushed to the backend.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum NodeParams {
    /// A backdrop sampler.
    Backdrop {
        /// Which backdrop to sample.
        source: BackdropKind,
    },
    /// A solid fill.
    Flood {
        /// Fill color, including alpha.
        color: Rgba8,
    },
    /// A gaussian blur.
    Blur {
        /// Blur radius in pixels.
        radius_px: f64,
        /// Edge handling.
        edge: EdgeMode,
    },
    /// A saturation adjustment.
    Saturation {
        /// Saturation factor; `1.0` is identity.
        factor: f64,
    },
    /// A two-input blend.
    Blend {
        /// Blend mode.
        mode: BlendMode,
    },
    /// A two-input composite.
    Composite {
        /// Composite mode.
        mode: CompositeMode,
    },
    /// A noise overlay.
    Noise {
        /// Noise layer opacity.
        opacity: f64,
        /// Noise texture tiling.
        tiling: TileMode,
    },
    /// A two-input crossfade.
    Crossfade {
        /// Weight of input 1 over input 0, `[0, 1]`.
        weight: f64,
    },
}

impl NodeParams {
    /// Returns the node kind this block parameterizes.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Backdrop { .. } => NodeKind::Backdrop,
            Self::Flood { .. } => NodeKind::Flood,
            Self::Blur { .. } => NodeKind::Blur,
            Self::Saturation { .. } => NodeKind::Saturation,
            Self::Blend { .. } => NodeKind::Blend,
            Self::Composite { .. } => NodeKind::Composite,
            Self::Noise { .. } => NodeKind::Noise,
            Self::Crossfade { .. } => NodeKind::Crossfade,
        }
    }

    /// Pushes every parameter in this block to `node` on the backend.
    ///
    /// # Errors
    ///
    /// Returns the first [`BackendError`] a `set_param` call reports.
    pub fn push_to(
        &self,
        backend: &mut (impl RenderBackend + ?Sized),
        node: BackendNode,
    ) -> Result<(), BackendError> {
        match *self {
            Self::Backdrop { source } => {
                backend.set_param(node, ParamKey::Source, ParamValue::Backdrop(source))?;
            }
            Self::Flood { color } => {
                backend.set_param(node, ParamKey::Color, ParamValue::Color(color))?;
            }
            Self::Blur { radius_px, edge } => {
                backend.set_param(node, ParamKey::Radius, ParamValue::Scalar(radius_px))?;
                backend.set_param(node, ParamKey::EdgeMode, ParamValue::Edge(edge))?;
            }
            Self::Saturation { factor } => {
                backend.set_param(node, ParamKey::Saturation, ParamValue::Scalar(factor))?;
            }
            Self::Blend { mode } => {
                backend.set_param(node, ParamKey::BlendMode, ParamValue::Blend(mode))?;
            }
            Self::Composite { mode } => {
                backend.set_param(node, ParamKey::CompositeMode, ParamValue::Composite(mode))?;
            }
            Self::Noise { opacity, tiling } => {
                backend.set_param(node, ParamKey::Opacity, ParamValue::Scalar(opacity))?;
                backend.set_param(node, ParamKey::TileMode, ParamValue::Tile(tiling))?;
            }
            Self::Crossfade { weight } => {
                backend.set_param(node, ParamKey::Weight, ParamValue::Scalar(weight))?;
            }
        }
        Ok(())
    }
}

/// Returns how many input slots a node of `kind` has.
#[must_use]
pub const fn input_slots(kind: NodeKind) -> u8 {
    match kind {
        NodeKind::Backdrop | NodeKind::Flood | NodeKind::Noise => 0,
        NodeKind::Blur | NodeKind::Saturation => 1,
        NodeKind::Blend | NodeKind::Composite | NodeKind::Crossfade => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        let p = NodeParams::Blur {
            radius_px: 30.0,
            edge: EdgeMode::Hard,
        };
        assert_eq!(p.kind(), NodeKind::Blur);
        assert_eq!(
            NodeParams::Crossfade { weight: 1.0 }.kind(),
            NodeKind::Crossfade
        );
    }

    #[test]
    fn slot_counts() {
        assert_eq!(input_slots(NodeKind::Backdrop), 0);
        assert_eq!(input_slots(NodeKind::Flood), 0);
        assert_eq!(input_slots(NodeKind::Noise), 0);
        assert_eq!(input_slots(NodeKind::Blur), 1);
        assert_eq!(input_slots(NodeKind::Saturation), 1);
        assert_eq!(input_slots(NodeKind::Blend), 2);
        assert_eq!(input_slots(NodeKind::Composite), 2);
        assert_eq!(input_slots(NodeKind::Crossfade), 2);
    }
}
