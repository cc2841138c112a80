//! Hex colour parsing and the serde helpers built on it.
//!
//! Colours are written as `#RRGGBB` / `#RRGGBBAA` strings so that task lists
//! and config files can be edited by hand.

use egui::Color32;

use crate::error::{GanttError, GanttResult};

/// Parse a `#RRGGBB` or `#RRGGBBAA` string.
pub fn parse_hex_color(s: &str) -> GanttResult<Color32> {
    let digits = s.trim().trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            .ok_or_else(|| GanttError::InvalidColor(s.to_string()))
    };
    match digits.len() {
        6 => Ok(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        8 => Ok(Color32::from_rgba_unmultiplied(
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            channel(6..8)?,
        )),
        _ => Err(GanttError::InvalidColor(s.to_string())),
    }
}

/// Format a colour back to the hex form accepted by [`parse_hex_color`].
pub fn to_hex(color: Color32) -> String {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == 255 {
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    } else {
        format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
    }
}

/// Scale the RGB channels towards black, keeping alpha.
pub fn darken(color: Color32, factor: f32) -> Color32 {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let scale = |c: u8| (c as f32 * factor.clamp(0.0, 1.0)).round() as u8;
    Color32::from_rgba_unmultiplied(scale(r), scale(g), scale(b), a)
}

/// Serde helper for `Color32` stored as a hex string.
pub mod hex_color {
    use egui::Color32;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::to_hex(*color))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_hex_color(&s).map_err(serde::de::Error::custom)
    }
}

/// Serde helper for `Option<Color32>`; absent and `null` both mean "no colour".
pub mod hex_color_opt {
    use egui::Color32;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(color: &Option<Color32>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match color {
            Some(c) => serializer.serialize_some(&super::to_hex(*c)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Color32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| super::parse_hex_color(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
