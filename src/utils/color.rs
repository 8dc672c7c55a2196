//! Marker shading: darkens a level color as a value approaches the dataset
//! maximum.

use palette::{FromColor, Hsl, Srgb};

/// Lightness runs from 50% at zero down to 20% at (or above) `max`.
/// `base` comes back unchanged when it is not a `#rrggbb` color or `max` is
/// zero.
pub fn intensity_adjusted(base: &str, value: f64, max: f64) -> String {
    if max == 0.0 {
        return base.to_string();
    }
    let Ok(rgb) = base.parse::<Srgb<u8>>() else {
        return base.to_string();
    };

    let ratio = (value / max).min(1.0) as f32;
    let mut hsl: Hsl = Hsl::from_color(rgb.into_format::<f32>());
    hsl.lightness = 0.5 - ratio * 0.3;

    let shaded: Srgb = Srgb::from_color(hsl);
    let shaded: Srgb<u8> = shaded.into_format();
    format!("#{:02x}{:02x}{:02x}", shaded.red, shaded.green, shaded.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_spans_lightness_fifty_to_twenty() {
        assert_eq!(intensity_adjusted("#ff0000", 0.0, 1.0), "#ff0000");
        assert_eq!(intensity_adjusted("#ff0000", 1.0, 1.0), "#660000");
        assert_eq!(intensity_adjusted("#ff0000", 5.0, 1.0), "#660000");
    }

    #[test]
    fn output_is_lowercase_hex() {
        let shaded = intensity_adjusted("#4CAF50", 0.5, 1.0);
        assert_eq!(shaded.len(), 7);
        assert!(shaded.starts_with('#'));
        assert_eq!(shaded, shaded.to_ascii_lowercase());
        assert_ne!(shaded, "#4caf50");
    }

    #[test]
    fn invalid_or_zero_scale_keeps_base() {
        assert_eq!(intensity_adjusted("#4CAF50", 1.0, 0.0), "#4CAF50");
        assert_eq!(intensity_adjusted("red", 1.0, 2.0), "red");
        assert_eq!(intensity_adjusted("#12345", 1.0, 2.0), "#12345");
    }
}
