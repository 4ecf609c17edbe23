//! Named color presets.

use serde::{Deserialize, Serialize};

use super::matrix::ColorMatrix;
use super::params::{ColorMode, ColorParameters};

/// The built-in presets, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorPreset {
    Original,
    Invert,
    Desaturate,
    Cyanotype,
    OldStyle,
    Silhouette,
    StrongSaturation,
    Yellowing,
}

impl ColorPreset {
    pub const ALL: [ColorPreset; 8] = [
        ColorPreset::Original,
        ColorPreset::Invert,
        ColorPreset::Desaturate,
        ColorPreset::Cyanotype,
        ColorPreset::OldStyle,
        ColorPreset::Silhouette,
        ColorPreset::StrongSaturation,
        ColorPreset::Yellowing,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            ColorPreset::Original => "Original",
            ColorPreset::Invert => "Invert",
            ColorPreset::Desaturate => "Desaturate",
            ColorPreset::Cyanotype => "Cyanotype",
            ColorPreset::OldStyle => "Old Style",
            ColorPreset::Silhouette => "Silhouette",
            ColorPreset::StrongSaturation => "Strong Saturation",
            ColorPreset::Yellowing => "Yellowing",
        }
    }

    /// Look a preset up by display name. Matching ignores case and spaces, so
    /// "Old Style", "old style" and "OldStyle" all resolve.
    pub fn from_name(name: &str) -> Option<ColorPreset> {
        let wanted = normalize(name);
        Self::ALL
            .into_iter()
            .find(|preset| normalize(preset.name()) == wanted)
    }

    /// The parameters this preset stands for.
    pub fn parameters(self) -> ColorParameters {
        use ColorMode::*;
        match self {
            ColorPreset::Original => ColorParameters::ORIGINAL,
            ColorPreset::Invert => ColorParameters::from_parts(Adjust, -100.0, 0.0, 0.0, 0.0, 100.0),
            ColorPreset::Desaturate => {
                ColorParameters::from_parts(Adjust, 0.0, -100.0, 0.0, 0.0, 100.0)
            }
            ColorPreset::Cyanotype => {
                ColorParameters::from_parts(Colorize, 215.0, 60.0, 50.0, 5.0, 100.0)
            }
            ColorPreset::OldStyle => {
                ColorParameters::from_parts(Colorize, 40.0, 35.0, 65.0, 15.0, 100.0)
            }
            ColorPreset::Silhouette => ColorParameters::from_parts(Fill, 0.0, 0.0, 0.0, 0.0, 100.0),
            ColorPreset::StrongSaturation => {
                ColorParameters::from_parts(Adjust, 0.0, 50.0, 0.0, 10.0, 100.0)
            }
            ColorPreset::Yellowing => {
                ColorParameters::from_parts(Colorize, 30.0, 45.0, 70.0, 70.0, 100.0)
            }
        }
    }

    /// Derive the matrix through the regular [`super::build_matrix`] path.
    pub fn matrix(self) -> ColorMatrix {
        super::build_matrix(&self.parameters())
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for preset in ColorPreset::ALL {
            assert_eq!(ColorPreset::from_name(preset.name()), Some(preset));
        }
    }

    #[test]
    fn test_lookup_is_lenient() {
        assert_eq!(ColorPreset::from_name("old style"), Some(ColorPreset::OldStyle));
        assert_eq!(
            ColorPreset::from_name("StrongSaturation"),
            Some(ColorPreset::StrongSaturation)
        );
        assert_eq!(ColorPreset::from_name("Sepia"), None);
    }

    #[test]
    fn test_presets_are_in_range() {
        for preset in ColorPreset::ALL {
            let params = preset.parameters();
            let validated = ColorParameters::new(
                params.mode(),
                params.hue(),
                params.saturation(),
                params.brightness(),
                params.contrast(),
                params.opacity(),
            )
            .unwrap();
            assert_eq!(validated, params, "{} is out of range", preset.name());
        }
    }

    #[test]
    fn test_original_is_identity() {
        assert!(ColorPreset::Original.matrix().is_identity());
    }

    #[test]
    fn test_preset_values() {
        let cyanotype = ColorPreset::Cyanotype.parameters();
        assert_eq!(cyanotype.mode(), ColorMode::Colorize);
        assert_eq!(cyanotype.hue(), 215.0);
        assert_eq!(cyanotype.contrast(), 5.0);

        let invert = ColorPreset::Invert.parameters();
        assert_eq!(invert.mode(), ColorMode::Adjust);
        assert_eq!(invert.hue(), -100.0);

        assert_eq!(ColorPreset::Silhouette.parameters().mode(), ColorMode::Fill);
    }
}
