//! Color palettes for Rahasia Dapur
//!
//! Two palettes exist, one per effective color scheme. Screens pick a palette
//! from the scheme published by [`app_state::ThemeResolver`]:
//!
//! ```rust
//! use app_state::ColorScheme;
//! use app_ui::theme::get_theme;
//!
//! let theme = get_theme(ColorScheme::Dark);
//! assert!(theme.is_dark());
//! assert_eq!(theme.colors.primary, "#f97316");
//! ```

use app_state::ColorScheme;
use serde::{Deserialize, Serialize};

// =============================================================================
// Color Types
// =============================================================================

/// A color represented as a hex string (e.g., "#fff", "#f97316" or "#f9731615")
pub type Color = String;

/// Append a two-digit alpha to a 6-digit hex color
pub fn with_alpha(hex: &str, alpha: &str) -> Color {
    format!("{}{}", hex, alpha)
}

// =============================================================================
// Palette
// =============================================================================

/// Named colors used by the screens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    /// Body text
    pub text: Color,
    /// Screen background
    pub background: Color,
    /// Tint for headers and active controls
    pub tint: Color,
    /// Inactive tab icon
    pub tab_icon_default: Color,
    /// Active tab icon
    pub tab_icon_selected: Color,
    /// Brand orange
    pub primary: Color,
    /// Secondary surface
    pub secondary: Color,
    /// Card surface
    pub card: Color,
    /// Borders and dividers
    pub border: Color,
    /// Error text
    pub error: Color,
    /// Muted text
    pub gray: Color,
}

/// A complete theme for one color scheme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Scheme this theme renders
    pub scheme: ColorScheme,
    /// Palette
    pub colors: ThemeColors,
}

impl Theme {
    /// Check if this is a dark theme
    pub fn is_dark(&self) -> bool {
        self.scheme.is_dark()
    }

    /// Background of a selected option in the settings modal
    pub fn selected_background(&self) -> Color {
        with_alpha(&self.colors.primary, "15")
    }

    /// Background of the error banner on the auth screens
    pub fn error_background(&self) -> Color {
        if self.is_dark() {
            "#451a1a".to_string()
        } else {
            "#fef2f2".to_string()
        }
    }
}

/// Light theme
pub fn light_theme() -> Theme {
    Theme {
        scheme: ColorScheme::Light,
        colors: ThemeColors {
            text: "#1f2937".to_string(),
            background: "#fdf5f0".to_string(),
            tint: "#f97316".to_string(),
            tab_icon_default: "#ccc".to_string(),
            tab_icon_selected: "#f97316".to_string(),
            primary: "#f97316".to_string(),
            secondary: "#fbdec0".to_string(),
            card: "#ffffff".to_string(),
            border: "#e5e7eb".to_string(),
            error: "#dc2626".to_string(),
            gray: "#6b7280".to_string(),
        },
    }
}

/// Dark theme
pub fn dark_theme() -> Theme {
    Theme {
        scheme: ColorScheme::Dark,
        colors: ThemeColors {
            text: "#fff".to_string(),
            background: "#000".to_string(),
            tint: "#fff".to_string(),
            tab_icon_default: "#ccc".to_string(),
            tab_icon_selected: "#fff".to_string(),
            primary: "#f97316".to_string(),
            secondary: "#374151".to_string(),
            card: "#1f2937".to_string(),
            border: "#374151".to_string(),
            error: "#ef4444".to_string(),
            gray: "#9ca3af".to_string(),
        },
    }
}

/// Theme for an effective color scheme
pub fn get_theme(scheme: ColorScheme) -> Theme {
    match scheme {
        ColorScheme::Light => light_theme(),
        ColorScheme::Dark => dark_theme(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_theme() {
        assert!(!get_theme(ColorScheme::Light).is_dark());
        assert!(get_theme(ColorScheme::Dark).is_dark());
        assert_eq!(get_theme(ColorScheme::Light).colors.background, "#fdf5f0");
        assert_eq!(get_theme(ColorScheme::Dark).colors.card, "#1f2937");
    }

    #[test]
    fn test_brand_color_shared() {
        assert_eq!(light_theme().colors.primary, dark_theme().colors.primary);
    }

    #[test]
    fn test_derived_backgrounds() {
        assert_eq!(light_theme().selected_background(), "#f9731615");
        assert_eq!(light_theme().error_background(), "#fef2f2");
        assert_eq!(dark_theme().error_background(), "#451a1a");
    }

    #[test]
    fn test_serialize_camel_case() {
        let json = serde_json::to_value(light_theme().colors).unwrap();
        assert_eq!(json["tabIconDefault"], "#ccc");
    }
}
