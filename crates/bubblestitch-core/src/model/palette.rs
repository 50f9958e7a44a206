use serde::{Deserialize, Serialize};

use super::cell::ColorId;

/// A yarn color available to a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteColor {
    pub id: ColorId,
    pub name: String,
    /// Display color, usually a `#RRGGBB` string. Stored as given.
    #[serde(alias = "hexValue")]
    pub display_value: String,
    pub display_order: u32,
}

impl PaletteColor {
    pub fn new(
        id: ColorId,
        name: impl Into<String>,
        display_value: impl Into<String>,
        display_order: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            display_value: display_value.into(),
            display_order,
        }
    }
}

/// Palette every new pattern starts with.
pub fn default_palette() -> Vec<PaletteColor> {
    [
        ("Ocean", "#2D5A5A"),
        ("Cream", "#F5F0E6"),
        ("Rose", "#D4847C"),
        ("Blush", "#E8B4A8"),
        ("Mustard", "#C4A84B"),
    ]
    .into_iter()
    .zip(0u32..)
    .map(|((name, value), index)| PaletteColor::new(index, name, value, index))
    .collect()
}
