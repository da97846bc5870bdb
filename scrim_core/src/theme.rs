// Copyright 2026 the Scrim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Theme resolution and material parameter selection.
//!
//! The host exposes raw theme signals (a high contrast flag and an optional
//! light/dark preference); [`Theme::resolve`] folds them into one of three
//! themes. Each theme maps to a [`MaterialPlan`]: light and dark select the
//! acrylic recipe with the corresponding [`MaterialParameters`], high
//! contrast opts out of translucency entirely and paints a solid system
//! color.
//!
//! Applications can nudge the stock recipes through [`MaterialOverrides`]
//! without replacing them wholesale.

use crate::color::Rgba8;

/// The resolved theme for a window.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Theme {
    /// Light theme.
    Light,
    /// Dark theme.
    Dark,
    /// High contrast. Translucent materials are suppressed.
    HighContrast,
}

/// Raw theme signals read from the host.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct ThemeSignals {
    /// Whether a high contrast scheme is active.
    pub high_contrast: bool,
    /// Whether apps should use the light theme. `None` when the host cannot
    /// read the preference.
    pub apps_use_light: Option<bool>,
}

impl Theme {
    /// Resolves raw signals into a theme.
    ///
    /// High contrast wins over everything. An unreadable light/dark
    /// preference resolves to light, the platform default.
    #[must_use]
    pub const fn resolve(signals: ThemeSignals) -> Self {
        if signals.high_contrast {
            Self::HighContrast
        } else {
            match signals.apps_use_light {
                Some(false) => Self::Dark,
                Some(true) | None => Self::Light,
            }
        }
    }
}

/// The tunable inputs of the acrylic recipe.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct MaterialParameters {
    /// Tint layer color.
    pub tint_color: Rgba8,
    /// Opacity applied to the tint color, `[0, 1]`.
    pub tint_opacity: f64,
    /// Opacity of the luminosity layer, `[0, 1]`.
    pub luminosity_opacity: f64,
    /// Opaque fill shown when the acrylic chain is faded out.
    pub fallback_color: Rgba8,
    /// Gaussian blur radius in pixels.
    pub blur_radius_px: f64,
    /// Opacity of the noise texture layer, `[0, 1]`.
    pub noise_opacity: f64,
    /// Saturation boost on the legacy path.
    pub saturation: f64,
}

impl MaterialParameters {
    /// Stock parameters for the light theme.
    pub const LIGHT: Self = Self {
        tint_color: Rgba8::opaque(252, 252, 252),
        tint_opacity: 0.0,
        luminosity_opacity: 0.85,
        fallback_color: Rgba8::opaque(249, 249, 249),
        blur_radius_px: 30.0,
        noise_opacity: 0.02,
        saturation: 1.25,
    };

    /// Stock parameters for the dark theme.
    pub const DARK: Self = Self {
        tint_color: Rgba8::opaque(44, 44, 44),
        tint_opacity: 0.15,
        luminosity_opacity: 0.96,
        fallback_color: Rgba8::opaque(44, 44, 44),
        blur_radius_px: 30.0,
        noise_opacity: 0.02,
        saturation: 1.25,
    };

    /// Returns the stock parameters for `theme`, or `None` for high
    /// contrast, which has no acrylic recipe.
    #[must_use]
    pub const fn for_theme(theme: Theme) -> Option<Self> {
        match theme {
            Theme::Light => Some(Self::LIGHT),
            Theme::Dark => Some(Self::DARK),
            Theme::HighContrast => None,
        }
    }
}

/// Application overrides on top of the stock material parameters.
///
/// `None` fields keep the stock value.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct MaterialOverrides {
    /// Replaces the tint color.
    pub tint_color: Option<Rgba8>,
    /// Replaces the tint opacity.
    pub tint_opacity: Option<f64>,
    /// Replaces the luminosity opacity.
    pub luminosity_opacity: Option<f64>,
    /// Replaces the fallback color.
    pub fallback_color: Option<Rgba8>,
}

impl MaterialOverrides {
    /// Applies these overrides to `base`.
    #[must_use]
    pub fn apply(&self, base: MaterialParameters) -> MaterialParameters {
        MaterialParameters {
            tint_color: self.tint_color.unwrap_or(base.tint_color),
            tint_opacity: self.tint_opacity.unwrap_or(base.tint_opacity),
            luminosity_opacity: self.luminosity_opacity.unwrap_or(base.luminosity_opacity),
            fallback_color: self.fallback_color.unwrap_or(base.fallback_color),
            ..base
        }
    }
}

/// What to paint behind the window content.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum MaterialPlan {
    /// The translucent acrylic chain with the given parameters.
    Acrylic(MaterialParameters),
    /// A single opaque fill.
    Solid(Rgba8),
}

/// Resolves the material plan for a theme.
///
/// High contrast yields a solid fill in the host's window color, or opaque
/// black if the host cannot report one. Overrides only affect the acrylic
/// themes.
#[must_use]
pub fn resolve_material(
    theme: Theme,
    overrides: &MaterialOverrides,
    system_color: Option<Rgba8>,
) -> MaterialPlan {
    match MaterialParameters::for_theme(theme) {
        Some(base) => MaterialPlan::Acrylic(overrides.apply(base)),
        None => MaterialPlan::Solid(system_color.unwrap_or(Rgba8::opaque(0, 0, 0))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_contrast_wins() {
        let t = Theme::resolve(ThemeSignals {
            high_contrast: true,
            apps_use_light: Some(true),
        });
        assert_eq!(t, Theme::HighContrast);
    }

    #[test]
    fn unreadable_preference_defaults_to_light() {
        let t = Theme::resolve(ThemeSignals {
            high_contrast: false,
            apps_use_light: None,
        });
        assert_eq!(t, Theme::Light);
    }

    #[test]
    fn dark_preference_resolves_dark() {
        let t = Theme::resolve(ThemeSignals {
            high_contrast: false,
            apps_use_light: Some(false),
        });
        assert_eq!(t, Theme::Dark);
    }

    #[test]
    fn overrides_replace_only_set_fields() {
        let o = MaterialOverrides {
            tint_color: Some(Rgba8::opaque(10, 20, 30)),
            tint_opacity: None,
            luminosity_opacity: Some(0.5),
            fallback_color: None,
        };
        let p = o.apply(MaterialParameters::DARK);
        assert_eq!(p.tint_color, Rgba8::opaque(10, 20, 30));
        assert_eq!(p.tint_opacity, MaterialParameters::DARK.tint_opacity);
        assert_eq!(p.luminosity_opacity, 0.5);
        assert_eq!(p.fallback_color, MaterialParameters::DARK.fallback_color);
        assert_eq!(p.blur_radius_px, 30.0);
    }

    #[test]
    fn high_contrast_plan_is_solid_system_color() {
        let plan = resolve_material(
            Theme::HighContrast,
            &MaterialOverrides::default(),
            Some(Rgba8::opaque(0, 0, 128)),
        );
        assert_eq!(plan, MaterialPlan::Solid(Rgba8::opaque(0, 0, 128)));
    }

    #[test]
    fn high_contrast_without_system_color_is_black() {
        let plan = resolve_material(Theme::HighContrast, &MaterialOverrides::default(), None);
        assert_eq!(plan, MaterialPlan::Solid(Rgba8::opaque(0, 0, 0)));
    }

    #[test]
    fn acrylic_plan_carries_overridden_parameters() {
        let o = MaterialOverrides {
            tint_opacity: Some(0.4),
            ..MaterialOverrides::default()
        };
        match resolve_material(Theme::Light, &o, None) {
            MaterialPlan::Acrylic(p) => {
                assert_eq!(p.tint_opacity, 0.4);
                assert_eq!(p.tint_color, MaterialParameters::LIGHT.tint_color);
            }
            MaterialPlan::Solid(_) => panic!("light theme must be acrylic"),
        }
    }
}
