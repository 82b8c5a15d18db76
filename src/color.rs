//! Segment color generation and the id -> color table.
//!
//! Colors come from an injectable [`ColorSource`]. The default source is a
//! small seeded linear-congruential generator, so the same label map always
//! gets the same palette and tests can assert exact triples.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::SegmentId;
use crate::constants::DEFAULT_COLOR_SEED;

/// An opaque RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as a lowercase `#rrggbb` string for legends.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(rgb: Rgb) -> Self {
        [rgb.r, rgb.g, rgb.b]
    }
}

/// Supplies colors for newly introduced segments.
pub trait ColorSource {
    /// Produce the next color in the sequence.
    fn next_rgb(&mut self) -> Rgb;
}

/// Seeded linear-congruential color generator.
///
/// Green is drawn from the lower half of its range so segments stay
/// distinguishable from vegetation-heavy backing photos.
#[derive(Debug, Clone)]
pub struct SeededColors {
    state: u32,
}

impl SeededColors {
    const MULTIPLIER: u64 = 9301;
    const INCREMENT: u64 = 49297;
    const MODULUS: u64 = 233_280;

    pub fn new(seed: u32) -> Self {
        Self {
            state: (u64::from(seed) % Self::MODULUS) as u32,
        }
    }

    /// Advance and return a value in `0..range`.
    fn next_below(&mut self, range: u64) -> u8 {
        let next = (u64::from(self.state) * Self::MULTIPLIER + Self::INCREMENT) % Self::MODULUS;
        self.state = next as u32;
        // range <= 256 and next < MODULUS, so the quotient fits in a u8
        (next * range / Self::MODULUS) as u8
    }
}

impl Default for SeededColors {
    fn default() -> Self {
        Self::new(DEFAULT_COLOR_SEED)
    }
}

impl ColorSource for SeededColors {
    fn next_rgb(&mut self) -> Rgb {
        let r = self.next_below(256);
        let g = self.next_below(128);
        let b = self.next_below(256);
        Rgb::new(r, g, b)
    }
}

/// Mapping from segment id to its color.
///
/// Entries are only ever added. A retired id keeps its color so that anything
/// still referring to it (a legend, a stale hover) resolves consistently.
#[derive(Debug, Clone, Default)]
pub struct ColorTable {
    colors: BTreeMap<SegmentId, Rgb>,
}

impl ColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill ids `1..=max_id` from `source`, in id order.
    pub fn seeded(max_id: SegmentId, source: &mut dyn ColorSource) -> Self {
        let colors = (1..=max_id).map(|id| (id, source.next_rgb())).collect();
        Self { colors }
    }

    /// Add a color for a freshly allocated id. Existing entries are kept.
    pub fn insert(&mut self, id: SegmentId, rgb: Rgb) {
        if id == 0 {
            return;
        }
        self.colors.entry(id).or_insert(rgb);
    }

    /// Color of `id`; background never has one.
    pub fn get(&self, id: SegmentId) -> Option<Rgb> {
        if id == 0 {
            return None;
        }
        self.colors.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, Rgb)> + '_ {
        self.colors.iter().map(|(&id, &rgb)| (id, rgb))
    }
}

/// One row of a UI legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub id: SegmentId,
    pub rgb: Rgb,
    pub hex: String,
}

impl LegendEntry {
    pub fn new(id: SegmentId, rgb: Rgb) -> Self {
        Self {
            id,
            rgb,
            hex: rgb.to_hex(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_colors_are_reproducible() {
        let mut colors = SeededColors::default();
        assert_eq!(colors.next_rgb(), Rgb::new(242, 8, 192));
        assert_eq!(colors.next_rgb(), Rgb::new(24, 76, 9));
        assert_eq!(colors.next_rgb(), Rgb::new(19, 54, 196));

        let mut a = SeededColors::new(7);
        let mut b = SeededColors::new(7);
        for _ in 0..50 {
            assert_eq!(a.next_rgb(), b.next_rgb());
        }
    }

    #[test]
    fn test_green_channel_is_narrow() {
        let mut colors = SeededColors::new(1);
        for _ in 0..1000 {
            assert!(colors.next_rgb().g < 128);
        }
    }

    #[test]
    fn test_hex_roundtrip() {
        let rgb = Rgb::new(255, 8, 171);
        assert_eq!(rgb.to_hex(), "#ff08ab");
        assert_eq!(Rgb::from_hex("#ff08ab"), Some(rgb));
        assert_eq!(Rgb::from_hex("ff08ab"), Some(rgb));
        assert_eq!(Rgb::from_hex("#ff08a"), None);
        assert_eq!(Rgb::from_hex("#gg08ab"), None);
    }

    #[test]
    fn test_color_table_never_colors_background() {
        let mut source = SeededColors::default();
        let mut table = ColorTable::seeded(3, &mut source);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(0), None);

        table.insert(0, Rgb::new(1, 2, 3));
        assert_eq!(table.get(0), None);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_color_table_keeps_first_color() {
        let mut table = ColorTable::new();
        table.insert(4, Rgb::new(1, 1, 1));
        table.insert(4, Rgb::new(9, 9, 9));
        assert_eq!(table.get(4), Some(Rgb::new(1, 1, 1)));
    }
}
