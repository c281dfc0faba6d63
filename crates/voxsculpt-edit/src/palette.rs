//! Voxel color palette with a cycling active index.

use serde::{Deserialize, Serialize};

/// A named display color.  `hex` is a CSS-style `#rrggbb` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteColor {
    pub name: String,
    pub hex: String,
}

impl PaletteColor {
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
        }
    }
}

/// The seven built-in colors, pastel first.
pub fn default_colors() -> Vec<PaletteColor> {
    [
        ("Soft Indigo", "#a5b4fc"),
        ("Soft Rose", "#fda4af"),
        ("Soft Mint", "#6ee7b7"),
        ("Soft Amber", "#fcd34d"),
        ("Cyber Cyan", "#00f3ff"),
        ("Cyber Neon", "#ff00ff"),
        ("Cyber Yellow", "#ffea00"),
    ]
    .into_iter()
    .map(|(name, hex)| PaletteColor::new(name, hex))
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<PaletteColor>,
    active: usize,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(default_colors())
    }
}

impl Palette {
    pub fn new(colors: Vec<PaletteColor>) -> Self {
        Self { colors, active: 0 }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[PaletteColor] {
        &self.colors
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> Option<&PaletteColor> {
        self.colors.get(self.active)
    }

    /// Hex of the active color, or an empty string for an empty palette.
    pub fn active_hex(&self) -> &str {
        self.active().map_or("", |c| c.hex.as_str())
    }

    /// Select `index` modulo the palette length.
    pub fn set_active(&mut self, index: usize) {
        if !self.colors.is_empty() {
            self.active = index % self.colors.len();
        }
    }

    /// Step to the next color, wrapping at the end.  Returns the new index.
    pub fn advance(&mut self) -> usize {
        self.set_active(self.active + 1);
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_has_seven_colors() {
        let p = Palette::default();
        assert_eq!(p.len(), 7);
        assert_eq!(p.active_index(), 0);
        assert_eq!(p.active_hex(), "#a5b4fc");
        assert_eq!(p.colors()[6].name, "Cyber Yellow");
    }

    #[test]
    fn advance_wraps_around() {
        let colors = default_colors().into_iter().take(5).collect();
        let mut p = Palette::new(colors);
        p.set_active(4);
        assert_eq!(p.advance(), 0);
        assert_eq!(p.advance(), 1);
    }

    #[test]
    fn empty_palette_is_inert() {
        let mut p = Palette::new(Vec::new());
        assert!(p.is_empty());
        assert_eq!(p.advance(), 0);
        assert!(p.active().is_none());
        assert_eq!(p.active_hex(), "");
    }

    #[test]
    fn color_serializes_as_table() {
        let json = serde_json::to_string(&PaletteColor::new("Soft Mint", "#6ee7b7")).unwrap();
        assert_eq!(json, r##"{"name":"Soft Mint","hex":"#6ee7b7"}"##);
    }
}
