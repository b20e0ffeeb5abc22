//! Presentation color tokens.
//!
//! Every widget takes its colors from a [`Palette`] passed down from the
//! model instead of reaching for ad-hoc constants.

use ratatui::style::Color;

use crate::highlight::BackgroundMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub primary_light: Color,
    pub primary_dark: Color,
    pub secondary: Color,
    pub secondary_light: Color,
    pub secondary_dark: Color,
    pub text: Color,
    pub text_muted: Color,
    pub surface: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
}

impl Palette {
    /// Pink/purple palette for light terminals.
    pub const fn light() -> Self {
        Self {
            primary: Color::Rgb(0xfa, 0x7a, 0xab),
            primary_light: Color::Rgb(0xff, 0xae, 0xc7),
            primary_dark: Color::Rgb(0xd0, 0x4e, 0x7d),
            secondary: Color::Rgb(0x78, 0x52, 0xa9),
            secondary_light: Color::Rgb(0x9d, 0x7b, 0xc1),
            secondary_dark: Color::Rgb(0x53, 0x3c, 0x76),
            text: Color::Rgb(0x33, 0x33, 0x33),
            text_muted: Color::Rgb(0x61, 0x61, 0x61),
            surface: Color::Rgb(0xf5, 0xf5, 0xf5),
            success: Color::Rgb(0x38, 0x8e, 0x3c),
            warning: Color::Rgb(0xff, 0xc1, 0x07),
            error: Color::Rgb(0xd3, 0x2f, 0x2f),
            info: Color::Rgb(0x02, 0x88, 0xd1),
        }
    }

    /// Same hues lifted for dark terminals.
    pub const fn dark() -> Self {
        Self {
            primary: Color::Rgb(0xff, 0x8f, 0xbb),
            primary_light: Color::Rgb(0xff, 0xb8, 0xd0),
            primary_dark: Color::Rgb(0xfa, 0x7a, 0xab),
            secondary: Color::Rgb(0xb3, 0x92, 0xe0),
            secondary_light: Color::Rgb(0xcf, 0xb8, 0xef),
            secondary_dark: Color::Rgb(0x9d, 0x7b, 0xc1),
            text: Color::Rgb(0xe6, 0xe6, 0xe6),
            text_muted: Color::Rgb(0x9e, 0x9e, 0x9e),
            surface: Color::Rgb(0x26, 0x26, 0x2b),
            success: Color::Rgb(0x81, 0xc7, 0x84),
            warning: Color::Rgb(0xff, 0xd5, 0x4f),
            error: Color::Rgb(0xef, 0x53, 0x50),
            info: Color::Rgb(0x4f, 0xc3, 0xf7),
        }
    }

    pub const fn for_background(mode: BackgroundMode) -> Self {
        match mode {
            BackgroundMode::Light => Self::light(),
            BackgroundMode::Dark => Self::dark(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_background(crate::highlight::background_mode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_palette_uses_brand_primary() {
        assert_eq!(Palette::light().primary, Color::Rgb(0xfa, 0x7a, 0xab));
        assert_eq!(Palette::light().secondary, Color::Rgb(0x78, 0x52, 0xa9));
    }

    #[test]
    fn test_palette_follows_background_mode() {
        assert_eq!(
            Palette::for_background(BackgroundMode::Dark),
            Palette::dark()
        );
        assert_eq!(
            Palette::for_background(BackgroundMode::Light),
            Palette::light()
        );
    }
}
