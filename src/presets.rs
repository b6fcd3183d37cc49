//! Catalog of named export targets grouped by use case.

use crate::types::{ExportFormat, ExportMode};

/// A named export size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    /// Display name, also accepted by `render --preset`
    pub name: &'static str,
    /// Target width in pixels
    pub width: u32,
    /// Target height in pixels
    pub height: u32,
    /// Where the size is used
    pub description: &'static str,
}

const fn preset(name: &'static str, size: u32, description: &'static str) -> Preset {
    Preset {
        name,
        width: size,
        height: size,
        description,
    }
}

const SOCIAL: &[Preset] = &[
    preset("Twitter 2x", 800, "Retina quality for Twitter profiles"),
    preset("Twitter 1x", 400, "Standard Twitter profile size"),
    preset("Instagram", 640, "2x for mobile displays"),
    preset("LinkedIn", 800, "Professional profile pictures"),
    preset("Facebook", 340, "2x for Facebook profiles"),
];

const ICON: &[Preset] = &[
    preset("16x16", 16, "Small app icons"),
    preset("32x32", 32, "Medium app icons"),
    preset("64x64", 64, "Large app icons"),
    preset("128x128", 128, "High-res app icons"),
];

const WEB: &[Preset] = &[
    preset("Small", 200, "Web thumbnails"),
    preset("Medium", 400, "Standard web logos"),
    preset("Large", 800, "High-res web display"),
];

const PRINT: &[Preset] = &[
    preset("1 inch @300dpi", 300, "Small print logos"),
    preset("2 inch @300dpi", 600, "Medium print logos"),
    preset("4 inch @300dpi", 1200, "Large print logos"),
];

/// Presets for a mode, in display order. Custom mode has none.
pub fn presets_for(mode: ExportMode) -> &'static [Preset] {
    match mode {
        ExportMode::Social => SOCIAL,
        ExportMode::Icon => ICON,
        ExportMode::Web => WEB,
        ExportMode::Print => PRINT,
        ExportMode::Custom => &[],
    }
}

/// Recommended format and padding percent for a preset category.
///
/// Returns `None` for custom mode, which keeps whatever the user had.
pub fn recommended_output(mode: ExportMode) -> Option<(ExportFormat, u32)> {
    match mode {
        ExportMode::Social => Some((ExportFormat::Png, 15)),
        ExportMode::Icon => Some((ExportFormat::Png, 8)),
        ExportMode::Web => Some((ExportFormat::Svg, 10)),
        ExportMode::Print => Some((ExportFormat::Png, 5)),
        ExportMode::Custom => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_entries_and_custom_has_none() {
        for mode in ExportMode::ALL {
            let presets = presets_for(mode);
            match mode {
                ExportMode::Custom => assert!(presets.is_empty()),
                _ => assert!(!presets.is_empty(), "{mode} has no presets"),
            }
        }
    }

    #[test]
    fn first_entries_match_catalog() {
        assert_eq!(presets_for(ExportMode::Social)[0].width, 800);
        assert_eq!(presets_for(ExportMode::Icon)[0].width, 16);
        assert_eq!(presets_for(ExportMode::Web)[0].width, 200);
        assert_eq!(presets_for(ExportMode::Print)[0].width, 300);
        assert_eq!(presets_for(ExportMode::Print)[2].name, "4 inch @300dpi");
    }

    #[test]
    fn recommended_outputs_are_fixed_per_category() {
        assert_eq!(recommended_output(ExportMode::Social), Some((ExportFormat::Png, 15)));
        assert_eq!(recommended_output(ExportMode::Icon), Some((ExportFormat::Png, 8)));
        assert_eq!(recommended_output(ExportMode::Web), Some((ExportFormat::Svg, 10)));
        assert_eq!(recommended_output(ExportMode::Print), Some((ExportFormat::Png, 5)));
        assert_eq!(recommended_output(ExportMode::Custom), None);
    }
}
