use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    /// Converts an HSL color (hue in degrees, saturation and lightness in [0, 1]) to RGB.
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Color {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        let to_u8 = |c: f32| ((c + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Color(to_u8(r), to_u8(g), to_u8(b))
    }
}

/// Fill color of an item, derived from its id only.
/// The same id maps to the same color in every frame and every session.
pub fn item_color(id: u64) -> Color {
    //spread consecutive ids over the hue circle in steps of 137 degrees
    let hue = ((id % 360) * 137 % 360) as f32;
    Color::from_hsl(hue, 0.65, 0.60)
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        ensure!(
            hex.len() == 6 && hex.is_ascii(),
            "invalid color: {s:?}, expected #RRGGBB"
        );
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).with_context(|| format!("invalid color: {s:?}"))
        };
        Ok(Color(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Visual state of an item in a frame. Exactly one applies per item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisualState {
    Selected,
    Hovered,
    Default,
}

impl VisualState {
    /// Resolves the state of an item, selection takes precedence over hover.
    pub fn resolve(item_id: u64, selected: Option<u64>, hovered: Option<u64>) -> Self {
        if selected == Some(item_id) {
            VisualState::Selected
        } else if hovered == Some(item_id) {
            VisualState::Hovered
        } else {
            VisualState::Default
        }
    }

    /// Outline width (px) before the theme's multiplier is applied
    pub fn stroke_width(&self) -> f32 {
        match self {
            VisualState::Selected => 3.0,
            VisualState::Hovered => 2.0,
            VisualState::Default => 1.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VisualState::Selected => "selected",
            VisualState::Hovered => "hovered",
            VisualState::Default => "default",
        }
    }

    pub fn has_shadow(&self) -> bool {
        match self {
            VisualState::Selected | VisualState::Hovered => true,
            VisualState::Default => false,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
#[serde(default)]
pub struct RenderTheme {
    pub stroke_width_multiplier: f32,
    pub background: Color,
    pub container_fill: Color,
    pub container_stroke: Color,
    pub item_stroke: Color,
    pub selected_stroke: Color,
    pub hovered_stroke: Color,
    pub label_color: Color,
    pub shadow_color: Color,
}

impl Default for RenderTheme {
    fn default() -> Self {
        RenderTheme::WORKSHOP
    }
}

impl RenderTheme {
    pub const WORKSHOP: RenderTheme = RenderTheme {
        stroke_width_multiplier: 1.0,
        background: Color(0xFA, 0xFA, 0xFA),
        container_fill: Color(0xE8, 0xEC, 0xF0),
        container_stroke: Color(0x34, 0x49, 0x5E),
        item_stroke: Color(0x33, 0x33, 0x33),
        selected_stroke: Color(0x1F, 0x3A, 0x93),
        hovered_stroke: Color(0x25, 0x63, 0xEB),
        label_color: Color(0x11, 0x11, 0x11),
        shadow_color: Color(0x00, 0x00, 0x00),
    };

    pub const GRAY: RenderTheme = RenderTheme {
        stroke_width_multiplier: 1.5,
        background: Color(0xFF, 0xFF, 0xFF),
        container_fill: Color(0xD3, 0xD3, 0xD3),
        container_stroke: Color(0x00, 0x00, 0x00),
        item_stroke: Color(0x3A, 0x3A, 0x3A),
        selected_stroke: Color(0x00, 0x00, 0x00),
        hovered_stroke: Color(0x3A, 0x3A, 0x3A),
        label_color: Color(0x00, 0x00, 0x00),
        shadow_color: Color(0x63, 0x63, 0x63),
    };

    pub fn stroke_for(&self, state: VisualState) -> Color {
        match state {
            VisualState::Selected => self.selected_stroke,
            VisualState::Hovered => self.hovered_stroke,
            VisualState::Default => self.item_stroke,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn item_color_is_deterministic() {
        for id in [0, 1, 7, 359, 360, 4242, u64::MAX] {
            assert_eq!(item_color(id), item_color(id));
        }
        assert_eq!(item_color(17).to_string(), item_color(17).to_string());
    }

    #[test]
    fn consecutive_ids_get_distinct_colors() {
        assert_ne!(item_color(1), item_color(2));
        assert_ne!(item_color(2), item_color(3));
    }

    #[test_case(0.0, Color(0xFF, 0x00, 0x00); "red")]
    #[test_case(120.0, Color(0x00, 0xFF, 0x00); "green")]
    #[test_case(240.0, Color(0x00, 0x00, 0xFF); "blue")]
    #[test_case(600.0, Color(0x00, 0x00, 0xFF); "wraps around")]
    fn hsl_primaries(hue: f32, expected: Color) {
        assert_eq!(Color::from_hsl(hue, 1.0, 0.5), expected);
    }

    #[test]
    fn color_string_round_trip() {
        let color = Color(0xCC, 0x82, 0x4A);
        assert_eq!(color.to_string(), "#CC824A");
        assert_eq!("#CC824A".parse::<Color>().unwrap(), color);
        assert!("#CC82".parse::<Color>().is_err());
        assert!("#GG824A".parse::<Color>().is_err());
    }

    #[test]
    fn selection_beats_hover() {
        assert_eq!(VisualState::resolve(3, Some(3), Some(3)), VisualState::Selected);
        assert_eq!(VisualState::resolve(3, Some(4), Some(3)), VisualState::Hovered);
        assert_eq!(VisualState::resolve(3, None, None), VisualState::Default);
    }
}
