//! HEX/RGB/HSL color conversion, WCAG contrast, and palette generation.
//!
//! Two value types: [`Rgb`] with channels in 0..=255 and [`Hsl`] with hue in
//! [0,360) and saturation/lightness in [0,100], both integer-valued. The
//! RGB↔HSL round trip rounds to the nearest integer at each step, so it is
//! documented lossy: `Hsl::to_rgb` after `Rgb::to_hsl` lands within a couple
//! of channel steps of the original, not on it exactly.
//!
//! The hex round trip, by contrast, is exact:
//! `Rgb::from_hex(h)?.to_hex()` reproduces any valid 6-digit hex string
//! case-insensitively.
//!
//! Contrast follows the WCAG 2.x definition bit for bit (sRGB piecewise
//! gamma, 0.2126/0.7152/0.0722 luminance weights, `(L1+0.05)/(L2+0.05)`),
//! since the accessibility thresholds at 3.0, 4.5, and 7.0 depend on the
//! exact values.
//!
//! ## Examples
//!
//! ```rust
//! use omniconv::color::{contrast_ratio, Rgb};
//!
//! let blue = Rgb::from_hex("#3b82f6").unwrap();
//! assert_eq!((blue.r, blue.g, blue.b), (59, 130, 246));
//! assert_eq!(blue.to_hex(), "#3b82f6");
//!
//! let white = Rgb::new(255, 255, 255);
//! let black = Rgb::new(0, 0, 0);
//! assert_eq!(contrast_ratio(white, black), 21.0);
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An sRGB color with 8-bit channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A color in HSL space: hue in degrees [0,360), saturation and lightness
/// as percentages [0,100]. Integer-valued by design (display precision).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl Rgb {
    /// Creates a color from its channels.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Parses a hex color string.
    ///
    /// Accepts 6-digit form with or without the leading `#`, plus the
    /// 3-digit shorthand (each digit doubled): `#3b82f6`, `3B82F6`, `#fa0`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for anything else. (The tools this
    /// grew from returned a null sentinel here; the crate-wide `Result`
    /// discipline replaces that.)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use omniconv::color::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex("#fa0").unwrap(), Rgb::new(255, 170, 0));
    /// assert!(Rgb::from_hex("#12345").is_err());
    /// ```
    pub fn from_hex(input: &str) -> Result<Self> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::invalid_color(input));
        }
        let expanded;
        let digits = match digits.len() {
            6 => digits,
            3 => {
                expanded = digits.chars().flat_map(|c| [c, c]).collect::<String>();
                expanded.as_str()
            }
            _ => return Err(Error::invalid_color(input)),
        };
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| Error::invalid_color(input))
        };
        Ok(Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Formats this color as a lowercase `#rrggbb` string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use omniconv::color::Rgb;
    ///
    /// assert_eq!(Rgb::new(59, 130, 246).to_hex(), "#3b82f6");
    /// ```
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Converts to HSL, rounding hue/saturation/lightness to the nearest
    /// integer. Lossy with [`Hsl::to_rgb`]; see the module docs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use omniconv::color::{Hsl, Rgb};
    ///
    /// assert_eq!(Rgb::new(255, 0, 0).to_hsl(), Hsl { h: 0, s: 100, l: 50 });
    /// assert_eq!(Rgb::new(0, 255, 0).to_hsl(), Hsl { h: 120, s: 100, l: 50 });
    /// ```
    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let l = (max + min) / 2.0;

        let (h, s) = if delta == 0.0 {
            (0.0, 0.0)
        } else {
            let s = delta / (1.0 - (2.0 * l - 1.0).abs());
            let h = if max == r {
                ((g - b) / delta).rem_euclid(6.0)
            } else if max == g {
                (b - r) / delta + 2.0
            } else {
                (r - g) / delta + 4.0
            };
            (h * 60.0, s)
        };

        Hsl {
            h: (h.round() as u16) % 360,
            s: (s * 100.0).round() as u8,
            l: (l * 100.0).round() as u8,
        }
    }

    /// WCAG 2.x relative luminance in [0,1].
    ///
    /// Piecewise sRGB gamma decode per IEC 61966-2-1, then the
    /// 0.2126/0.7152/0.0722 channel weights.
    #[must_use]
    pub fn luminance(self) -> f64 {
        fn decode(channel: u8) -> f64 {
            let c = f64::from(channel) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * decode(self.r) + 0.7152 * decode(self.g) + 0.0722 * decode(self.b)
    }
}

impl Hsl {
    /// Converts to RGB via the standard hue-sector formula, rounding each
    /// channel to the nearest integer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use omniconv::color::{Hsl, Rgb};
    ///
    /// let red = Hsl { h: 0, s: 100, l: 50 };
    /// assert_eq!(red.to_rgb(), Rgb::new(255, 0, 0));
    /// ```
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let h = f64::from(self.h % 360);
        let s = f64::from(self.s.min(100)) / 100.0;
        let l = f64::from(self.l.min(100)) / 100.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
        let m = l - c / 2.0;

        let (r1, g1, b1) = match (h / 60.0) as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Rgb {
            r: ((r1 + m) * 255.0).round() as u8,
            g: ((g1 + m) * 255.0).round() as u8,
            b: ((b1 + m) * 255.0).round() as u8,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

/// WCAG 2.x contrast ratio between two colors, in [1,21].
///
/// `(L1 + 0.05) / (L2 + 0.05)` with L1 the lighter luminance. A color
/// against itself is exactly 1.0.
///
/// # Examples
///
/// ```rust
/// use omniconv::color::{contrast_ratio, Rgb};
///
/// let c = Rgb::new(59, 130, 246);
/// assert_eq!(contrast_ratio(c, c), 1.0);
/// ```
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = a.luminance();
    let lb = b.luminance();
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// WCAG conformance band for a contrast ratio.
///
/// Thresholds: 3.0 (AA for large text), 4.5 (AA), 7.0 (AAA).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContrastLevel {
    Fail,
    AaLarge,
    Aa,
    Aaa,
}

impl ContrastLevel {
    /// Classifies a contrast ratio against the WCAG thresholds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use omniconv::color::ContrastLevel;
    ///
    /// assert_eq!(ContrastLevel::classify(2.9), ContrastLevel::Fail);
    /// assert_eq!(ContrastLevel::classify(4.5), ContrastLevel::Aa);
    /// assert_eq!(ContrastLevel::classify(21.0), ContrastLevel::Aaa);
    /// ```
    #[must_use]
    pub fn classify(ratio: f64) -> Self {
        if ratio >= 7.0 {
            ContrastLevel::Aaa
        } else if ratio >= 4.5 {
            ContrastLevel::Aa
        } else if ratio >= 3.0 {
            ContrastLevel::AaLarge
        } else {
            ContrastLevel::Fail
        }
    }
}

/// Generates `count` shades of a base color: hue and saturation held fixed,
/// lightness swept linearly from 0 to 100.
///
/// Generative, not round-trip-safe. Returns an empty vec for `count == 0`;
/// `count == 1` yields the 50%-lightness midpoint.
///
/// # Examples
///
/// ```rust
/// use omniconv::color::{shades, Rgb};
///
/// let scale = shades(Rgb::from_hex("#3b82f6").unwrap(), 5);
/// assert_eq!(scale.len(), 5);
/// assert_eq!(scale[0], Rgb::new(0, 0, 0));
/// assert_eq!(scale[4], Rgb::new(255, 255, 255));
/// ```
#[must_use]
pub fn shades(base: Rgb, count: usize) -> Vec<Rgb> {
    let hsl = base.to_hsl();
    match count {
        0 => Vec::new(),
        1 => vec![Hsl { l: 50, ..hsl }.to_rgb()],
        _ => (0..count)
            .map(|i| {
                let l = (i as f64 * 100.0 / (count - 1) as f64).round() as u8;
                Hsl { l, ..hsl }.to_rgb()
            })
            .collect(),
    }
}

/// Generates a `count`-color palette by rotating the base hue in equal steps
/// around the wheel, saturation and lightness held fixed.
///
/// # Examples
///
/// ```rust
/// use omniconv::color::{palette, Rgb};
///
/// let wheel = palette(Rgb::new(255, 0, 0), 3);
/// assert_eq!(wheel[0], Rgb::new(255, 0, 0));   // 0 deg
/// assert_eq!(wheel[1], Rgb::new(0, 255, 0));   // 120 deg
/// assert_eq!(wheel[2], Rgb::new(0, 0, 255));   // 240 deg
/// ```
#[must_use]
pub fn palette(base: Rgb, count: usize) -> Vec<Rgb> {
    if count == 0 {
        return Vec::new();
    }
    let hsl = base.to_hsl();
    let step = 360.0 / count as f64;
    (0..count)
        .map(|i| {
            let h = (f64::from(hsl.h) + step * i as f64).rem_euclid(360.0).round() as u16 % 360;
            Hsl { h, ..hsl }.to_rgb()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parse_forms() {
        assert_eq!(Rgb::from_hex("#3b82f6").unwrap(), Rgb::new(59, 130, 246));
        assert_eq!(Rgb::from_hex("3B82F6").unwrap(), Rgb::new(59, 130, 246));
        assert_eq!(Rgb::from_hex("#fff").unwrap(), Rgb::new(255, 255, 255));
        assert_eq!(Rgb::from_hex("000").unwrap(), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_hex_parse_rejects() {
        for bad in ["", "#", "#12", "#12345", "#1234567", "#gggggg", "rgb(1,2,3)"] {
            assert!(Rgb::from_hex(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_hex_round_trip_exact() {
        for hex in ["#000000", "#ffffff", "#3b82f6", "#00ff7f", "#abcdef"] {
            assert_eq!(Rgb::from_hex(hex).unwrap().to_hex(), hex);
        }
        // Case-insensitive on input, lowercase on output
        assert_eq!(Rgb::from_hex("#ABCDEF").unwrap().to_hex(), "#abcdef");
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(Rgb::new(255, 0, 0).to_hsl(), Hsl { h: 0, s: 100, l: 50 });
        assert_eq!(Rgb::new(0, 0, 255).to_hsl(), Hsl { h: 240, s: 100, l: 50 });
        assert_eq!(Rgb::new(0, 0, 0).to_hsl(), Hsl { h: 0, s: 0, l: 0 });
        assert_eq!(Rgb::new(255, 255, 255).to_hsl(), Hsl { h: 0, s: 0, l: 100 });
        assert_eq!(Rgb::new(128, 128, 128).to_hsl(), Hsl { h: 0, s: 0, l: 50 });
    }

    #[test]
    fn test_hsl_round_trip_is_close() {
        // Lossy by design: each channel may drift a couple of steps
        for hex in ["#3b82f6", "#c0ffee", "#123456", "#fa8072"] {
            let rgb = Rgb::from_hex(hex).unwrap();
            let back = rgb.to_hsl().to_rgb();
            assert!((i16::from(rgb.r) - i16::from(back.r)).abs() <= 3);
            assert!((i16::from(rgb.g) - i16::from(back.g)).abs() <= 3);
            assert!((i16::from(rgb.b) - i16::from(back.b)).abs() <= 3);
        }
    }

    #[test]
    fn test_contrast_extremes() {
        let white = Rgb::new(255, 255, 255);
        let black = Rgb::new(0, 0, 0);
        assert_eq!(contrast_ratio(white, black), 21.0);
        assert_eq!(contrast_ratio(black, white), 21.0);
        assert_eq!(contrast_ratio(white, white), 1.0);
    }

    #[test]
    fn test_contrast_known_pair() {
        // #767676 on white is the canonical "just passes AA" gray
        let gray = Rgb::from_hex("#767676").unwrap();
        let ratio = contrast_ratio(gray, Rgb::new(255, 255, 255));
        assert!(ratio > 4.5 && ratio < 4.6, "got {ratio}");
        assert_eq!(ContrastLevel::classify(ratio), ContrastLevel::Aa);
    }

    #[test]
    fn test_contrast_levels() {
        assert_eq!(ContrastLevel::classify(1.0), ContrastLevel::Fail);
        assert_eq!(ContrastLevel::classify(3.0), ContrastLevel::AaLarge);
        assert_eq!(ContrastLevel::classify(6.99), ContrastLevel::Aa);
        assert_eq!(ContrastLevel::classify(7.0), ContrastLevel::Aaa);
    }

    #[test]
    fn test_shades_sweep() {
        let scale = shades(Rgb::new(59, 130, 246), 11);
        assert_eq!(scale.len(), 11);
        assert_eq!(scale.first(), Some(&Rgb::new(0, 0, 0)));
        assert_eq!(scale.last(), Some(&Rgb::new(255, 255, 255)));
        // Lightness is monotonic along the sweep
        let lightness: Vec<u8> = scale.iter().map(|c| c.to_hsl().l).collect();
        assert!(lightness.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_shades_degenerate_counts() {
        assert!(shades(Rgb::new(1, 2, 3), 0).is_empty());
        assert_eq!(shades(Rgb::new(255, 0, 0), 1), vec![Rgb::new(255, 0, 0)]);
    }

    #[test]
    fn test_palette_rotation() {
        let wheel = palette(Rgb::new(255, 0, 0), 6);
        assert_eq!(wheel.len(), 6);
        let hues: Vec<u16> = wheel.iter().map(|c| c.to_hsl().h).collect();
        assert_eq!(hues, vec![0, 60, 120, 180, 240, 300]);
    }
}
