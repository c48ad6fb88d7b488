//! Unit conversion for length, weight, volume, speed, and temperature.
//!
//! Every dimension except temperature converts through a fixed scale factor
//! to a canonical base unit: `value * factor(from) / factor(to)`. Temperature
//! scales do not share a zero point, so they convert through Celsius with an
//! affine (scale plus offset) transform instead.
//!
//! Unit keys parse via [`FromStr`]; an unknown key is an
//! [`Error::UnsupportedUnit`](crate::Error). The conversion itself is total
//! over finite input. A non-finite magnitude (NaN, ±infinity) is not guarded
//! and propagates to the output unchanged.
//!
//! No rounding happens here. Callers decide how many decimals to display.
//!
//! ## Examples
//!
//! ```rust
//! use omniconv::units::{convert, convert_temperature, LengthUnit, TemperatureUnit};
//!
//! let km = convert(1500.0, LengthUnit::Meter, LengthUnit::Kilometer);
//! assert_eq!(km, 1.5);
//!
//! let f = convert_temperature(0.0, TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit);
//! assert_eq!(f, 32.0);
//!
//! // Keys parse case-insensitively, abbreviations included
//! let unit: LengthUnit = "km".parse().unwrap();
//! assert_eq!(unit, LengthUnit::Kilometer);
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A unit whose scale relates linearly to a per-dimension base unit.
///
/// Implementors expose a scale factor to the base unit; [`convert`] does the
/// rest. Temperature is deliberately not a `LinearUnit`; see
/// [`convert_temperature`].
pub trait LinearUnit: Copy {
    /// Dimension name used in error messages and listings.
    const DIMENSION: &'static str;

    /// Scale factor from this unit to the dimension's base unit.
    fn factor(self) -> f64;

    /// Canonical lowercase key for this unit.
    fn key(self) -> &'static str;
}

/// Converts a magnitude between two units of the same dimension.
///
/// Non-finite input propagates: `convert(f64::NAN, ..)` is NaN.
///
/// # Examples
///
/// ```rust
/// use omniconv::units::{convert, WeightUnit};
///
/// let lbs = convert(1.0, WeightUnit::Kilogram, WeightUnit::Pound);
/// assert!((lbs - 2.2046226218).abs() < 1e-9);
/// ```
#[must_use]
pub fn convert<U: LinearUnit>(value: f64, from: U, to: U) -> f64 {
    value * from.factor() / to.factor()
}

/// Parses a unit key and converts, in one step.
///
/// # Errors
///
/// Returns [`Error::UnsupportedUnit`] if either key is unknown for the
/// dimension `U`.
///
/// # Examples
///
/// ```rust
/// use omniconv::units::{convert_keys, SpeedUnit};
///
/// let kmh = convert_keys::<SpeedUnit>(10.0, "m/s", "km/h").unwrap();
/// assert!((kmh - 36.0).abs() < 1e-9);
/// ```
pub fn convert_keys<U>(value: f64, from: &str, to: &str) -> Result<f64>
where
    U: LinearUnit + FromStr<Err = Error>,
{
    Ok(convert(value, from.parse::<U>()?, to.parse::<U>()?))
}

macro_rules! linear_units {
    (
        $(#[$meta:meta])*
        $name:ident, $dimension:literal {
            $($variant:ident => $key:literal, [$($alias:literal),*], $factor:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Every unit of this dimension, in canonical order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];
        }

        impl LinearUnit for $name {
            const DIMENSION: &'static str = $dimension;

            fn factor(self) -> f64 {
                match self {
                    $($name::$variant => $factor,)+
                }
            }

            fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s.to_ascii_lowercase().as_str() {
                    $($key $(| $alias)* => Ok($name::$variant),)+
                    _ => Err(Error::unsupported_unit($dimension, s)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }
    };
}

linear_units! {
    /// Length units, base unit: meter.
    LengthUnit, "length" {
        Millimeter => "millimeter", ["mm"], 0.001;
        Centimeter => "centimeter", ["cm"], 0.01;
        Meter => "meter", ["m"], 1.0;
        Kilometer => "kilometer", ["km"], 1000.0;
        Inch => "inch", ["in"], 0.0254;
        Foot => "foot", ["ft"], 0.3048;
        Yard => "yard", ["yd"], 0.9144;
        Mile => "mile", ["mi"], 1609.344;
    }
}

linear_units! {
    /// Weight units, base unit: gram.
    ///
    /// Avoirdupois definitions for the imperial units (exact by statute).
    WeightUnit, "weight" {
        Milligram => "milligram", ["mg"], 0.001;
        Gram => "gram", ["g"], 1.0;
        Kilogram => "kilogram", ["kg"], 1000.0;
        Tonne => "tonne", ["t", "metric-ton"], 1_000_000.0;
        Ounce => "ounce", ["oz"], 28.349523125;
        Pound => "pound", ["lb", "lbs"], 453.59237;
        Stone => "stone", ["st"], 6350.29318;
    }
}

linear_units! {
    /// Volume units, base unit: liter. US customary for the imperial-style units.
    VolumeUnit, "volume" {
        Milliliter => "milliliter", ["ml"], 0.001;
        Liter => "liter", ["l"], 1.0;
        CubicMeter => "cubic-meter", ["m3"], 1000.0;
        Teaspoon => "teaspoon", ["tsp"], 0.00492892159375;
        Tablespoon => "tablespoon", ["tbsp"], 0.01478676478125;
        FluidOunce => "fluid-ounce", ["fl-oz"], 0.0295735295625;
        Cup => "cup", [], 0.2365882365;
        Pint => "pint", ["pt"], 0.473176473;
        Quart => "quart", ["qt"], 0.946352946;
        Gallon => "gallon", ["gal"], 3.785411784;
    }
}

linear_units! {
    /// Speed units, base unit: meters per second.
    SpeedUnit, "speed" {
        MetersPerSecond => "m/s", ["mps"], 1.0;
        KilometersPerHour => "km/h", ["kmh", "kph"], 0.2777777777777778;
        MilesPerHour => "mph", [], 0.44704;
        Knot => "knot", ["kn"], 0.5144444444444445;
        FeetPerSecond => "ft/s", ["fps"], 0.3048;
    }
}

/// Temperature scales. Conversion pivots through Celsius because the scales
/// do not share a zero point (affine, not linear).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    /// Every temperature scale, in canonical order.
    pub const ALL: &'static [TemperatureUnit] = &[
        TemperatureUnit::Celsius,
        TemperatureUnit::Fahrenheit,
        TemperatureUnit::Kelvin,
    ];

    /// Canonical lowercase key for this scale.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
            TemperatureUnit::Kelvin => "kelvin",
        }
    }

    fn to_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureUnit::Kelvin => value - 273.15,
        }
    }

    fn from_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => value * 9.0 / 5.0 + 32.0,
            TemperatureUnit::Kelvin => value + 273.15,
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "celsius" | "c" => Ok(TemperatureUnit::Celsius),
            "fahrenheit" | "f" => Ok(TemperatureUnit::Fahrenheit),
            "kelvin" | "k" => Ok(TemperatureUnit::Kelvin),
            _ => Err(Error::unsupported_unit("temperature", s)),
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Converts a temperature between scales via the Celsius pivot.
///
/// # Examples
///
/// ```rust
/// use omniconv::units::{convert_temperature, TemperatureUnit};
///
/// let k = convert_temperature(25.0, TemperatureUnit::Celsius, TemperatureUnit::Kelvin);
/// assert_eq!(k, 298.15);
/// ```
#[must_use]
pub fn convert_temperature(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    to.from_celsius(from.to_celsius(value))
}

/// Parses two temperature keys and converts, in one step.
///
/// # Errors
///
/// Returns [`Error::UnsupportedUnit`] if either key is unknown.
pub fn convert_temperature_keys(value: f64, from: &str, to: &str) -> Result<f64> {
    Ok(convert_temperature(value, from.parse()?, to.parse()?))
}
