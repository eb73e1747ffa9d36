//! Layout configuration passed through to the animation runtime.
//!
//! The core never interprets these values; they travel from host config into
//! each [`crate::runtime::LoadRequest`] untouched. Variants mirror the
//! runtime's own fit/alignment vocabulary so hosts can serialize them 1:1.

use serde::{Deserialize, Serialize};

/// How the artboard is scaled into its surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Fit {
    Cover,
    Contain,
    Fill,
    FitWidth,
    FitHeight,
    ScaleDown,
    None,
}

/// Where the artboard sits within its surface when it does not fill it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Alignment {
    Center,
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

/// Fit + alignment pair handed to the runtime on every load.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub fit: Fit,
    pub alignment: Alignment,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            fit: Fit::Cover,
            alignment: Alignment::Center,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_serializes_camel_case() {
        let layout = Layout {
            fit: Fit::FitWidth,
            alignment: Alignment::BottomRight,
        };
        let json = serde_json::to_string(&layout).unwrap();
        assert_eq!(json, r#"{"fit":"fitWidth","alignment":"bottomRight"}"#);
    }

    #[test]
    fn default_is_cover_center() {
        let layout = Layout::default();
        assert_eq!(layout.fit, Fit::Cover);
        assert_eq!(layout.alignment, Alignment::Center);
    }
}
