//! # omniconv
//!
//! A pure conversion toolkit: the color, unit, text, JSON, and HTML
//! transforms behind a developer-utility toolbox, packaged as a library.
//!
//! ## What's inside
//!
//! - **[`units`]**: length/weight/volume/speed conversion via fixed scale
//!   factors, temperature via affine conversion through Celsius
//! - **[`color`]**: HEX↔RGB↔HSL, WCAG contrast ratios, shade sweeps and
//!   hue-rotation palettes
//! - **[`text`]**: case conversion (camel/snake/kebab/pascal/title/sentence
//!   and friends), reversal, dedup, sorting, line numbering, replace,
//!   keyword density
//! - **[`json`]**: validation, minify/format, recursive key sorting, a
//!   documented JSONPath subset, a structural schema checker, and output to
//!   CSV, SQL, XML, YAML, and TypeScript interfaces
//! - **[`html`]**: regex/scan-based formatting, minification, entity
//!   encoding, and link/image extraction
//!
//! ## Design
//!
//! Every function is stateless and synchronous: strings and numbers in,
//! strings and numbers out, no I/O, no shared state, nothing cached between
//! calls. All fallible operations return [`Result`] with one [`Error`] type
//! across the crate; there are no null sentinels and no panics on bad
//! input. The single sanctioned looseness is numeric unit conversion, where
//! a non-finite magnitude propagates instead of erroring (NaN in, NaN out).
//!
//! `json` and `html` both expose `format`/`minify`, so those are reached
//! through their modules rather than re-exported flat.
//!
//! ## Quick start
//!
//! ```rust
//! use omniconv::color::Rgb;
//! use omniconv::text::{convert_case, CaseMode};
//! use omniconv::units::{convert_temperature, TemperatureUnit};
//!
//! let rgb = Rgb::from_hex("#3b82f6")?;
//! assert_eq!((rgb.r, rgb.g, rgb.b), (59, 130, 246));
//!
//! assert_eq!(convert_case("helloWorld", CaseMode::Kebab), "hello-world");
//!
//! let f = convert_temperature(0.0, TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit);
//! assert_eq!(f, 32.0);
//! # Ok::<(), omniconv::Error>(())
//! ```
//!
//! ## Converting JSON
//!
//! ```rust
//! use omniconv::json::{self, CsvOptions, TsOptions};
//!
//! let doc = r#"[{"id":1,"name":"Widget"},{"id":2,"name":"Gadget"}]"#;
//!
//! let csv = json::to_csv(doc, &CsvOptions::new())?;
//! assert_eq!(csv, "id,name\n1,Widget\n2,Gadget");
//!
//! let ts = json::to_typescript(doc, &TsOptions::new().with_root_name("Product"))?;
//! assert!(ts.starts_with("interface Product {"));
//! # Ok::<(), omniconv::Error>(())
//! ```
//!
//! ## Error handling
//!
//! One error type covers the crate, with messages written for direct
//! display to an end user:
//!
//! ```rust
//! use omniconv::json::{to_csv, CsvOptions};
//!
//! let err = to_csv(r#"{"not":"an array"}"#, &CsvOptions::new()).unwrap_err();
//! assert!(err.to_string().contains("array of objects"));
//! ```

pub mod color;
pub mod error;
pub mod html;
pub mod json;
pub mod text;
pub mod units;

pub use color::{Hsl, Rgb};
pub use error::{Error, Result};
pub use text::CaseMode;
pub use units::{LengthUnit, SpeedUnit, TemperatureUnit, VolumeUnit, WeightUnit};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_reexports() {
        let rgb = Rgb::from_hex("#ffffff").unwrap();
        assert_eq!(rgb, Rgb::new(255, 255, 255));

        let mode: CaseMode = "kebab".parse().unwrap();
        assert_eq!(text::convert_case("OmniConv", mode), "omni-conv");

        let unit: LengthUnit = "mile".parse().unwrap();
        assert_eq!(units::convert(1.0, unit, LengthUnit::Meter), 1609.344);
    }

    #[test]
    fn test_one_error_type_everywhere() {
        let color_err: Error = Rgb::from_hex("nope").unwrap_err();
        let unit_err: Error = "nope".parse::<TemperatureUnit>().unwrap_err();
        let json_err: Error = json::validate("nope").unwrap_err();
        for err in [color_err, unit_err, json_err] {
            assert!(!err.to_string().is_empty());
        }
    }
}
