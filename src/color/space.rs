//! Numeric color-space helpers
//!
//! Hex values are parsed as a single integer and split with masks and
//! shifts, so the component layout follows the bit positions rather than
//! any particular naming of the channels.

use super::ColorError;

/// Parse the digits after the leading `#` as one hexadecimal integer
fn parse_hex(hex: &str) -> Result<u64, ColorError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.is_empty() || digits.len() > 8 {
        return Err(ColorError::InvalidHex {
            value: hex.to_string(),
        });
    }
    u64::from_str_radix(digits, 16).map_err(|_| ColorError::InvalidHex {
        value: hex.to_string(),
    })
}

/// Split a hex color into its low three bytes
///
/// `#RRGGBB` yields `[RR, GG, BB]`. Longer values keep only the lowest
/// 24 bits.
pub fn hex_to_rgb(hex: &str) -> Result<[u8; 3], ColorError> {
    let n = parse_hex(hex)?;
    Ok([
        ((n & 0xFF0000) >> 16) as u8,
        ((n & 0xFF00) >> 8) as u8,
        (n & 0xFF) as u8,
    ])
}

/// Format a hex color as `rgba(..)` with four bytes taken from highest to
/// lowest of the low 32 bits
///
/// ```rust
/// use themesmith::color::hex_to_rgba;
///
/// assert_eq!(hex_to_rgba("#11223344").unwrap(), "rgba(17,34,51,68)");
/// ```
pub fn hex_to_rgba(hex: &str) -> Result<String, ColorError> {
    let n = parse_hex(hex)?;
    let parts = [(n >> 24) & 255, (n >> 16) & 255, (n >> 8) & 255, n & 255];
    Ok(format!(
        "rgba({})",
        parts
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(",")
    ))
}

/// Convert 0-255 RGB channels to hue, saturation and lightness, each in [0, 1]
pub fn rgb_to_hsl(rgb: [u8; 3]) -> [f64; 3] {
    let r = rgb[0] as f64 / 255.0;
    let g = rgb[1] as f64 / 255.0;
    let b = rgb[2] as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return [0.0, 0.0, l];
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    [h / 6.0, s, l]
}

/// Render an RGB triple the way script templates expect it: `r, g, b`
pub fn rgb_triple_string(rgb: [u8; 3]) -> String {
    format!("{}, {}, {}", rgb[0], rgb[1], rgb[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb_black_and_white() {
        assert_eq!(hex_to_rgb("#000000").unwrap(), [0, 0, 0]);
        assert_eq!(hex_to_rgb("#FFFFFF").unwrap(), [255, 255, 255]);
    }

    #[test]
    fn test_hex_to_rgb_channels() {
        assert_eq!(hex_to_rgb("#1a2b3c").unwrap(), [0x1a, 0x2b, 0x3c]);
    }

    #[test]
    fn test_hex_to_rgb_keeps_low_bytes_of_long_values() {
        // alpha-suffixed colors shift the channels up one byte
        assert_eq!(hex_to_rgb("#1a2b3c80").unwrap(), [0x2b, 0x3c, 0x80]);
    }

    #[test]
    fn test_hex_to_rgb_rejects_garbage() {
        assert!(matches!(
            hex_to_rgb("#zzzzzz"),
            Err(ColorError::InvalidHex { .. })
        ));
        assert!(hex_to_rgb("#").is_err());
        assert!(hex_to_rgb("#123456789").is_err());
    }

    #[test]
    fn test_hex_to_rgba_follows_shift_order() {
        assert_eq!(hex_to_rgba("#11223344").unwrap(), "rgba(17,34,51,68)");
        // six digits leave the top byte empty
        assert_eq!(hex_to_rgba("#ff0000").unwrap(), "rgba(0,255,0,0)");
    }

    #[test]
    fn test_rgb_to_hsl_pure_red() {
        assert_eq!(rgb_to_hsl([255, 0, 0]), [0.0, 1.0, 0.5]);
    }

    #[test]
    fn test_rgb_to_hsl_achromatic() {
        let [h, s, l] = rgb_to_hsl([128, 128, 128]);
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
        assert!((l - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_rgb_to_hsl_blue_hue() {
        let [h, s, l] = rgb_to_hsl([0, 0, 255]);
        assert!((h - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(s, 1.0);
        assert_eq!(l, 0.5);
    }

    #[test]
    fn test_rgb_triple_string() {
        assert_eq!(rgb_triple_string([1, 22, 255]), "1, 22, 255");
    }
}
