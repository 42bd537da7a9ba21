// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use log::debug;

use svgtypes::Stream;

use super::number::write_num;
use crate::{WriteBuffer, WriteOptions};

/// List of all SVG length units.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum LengthUnit {
    None,
    Px,
    Pt,
    Pc,
    In,
    Cm,
    Mm,
    Percent,
}

impl LengthUnit {
    /// Returns a pixels per unit factor, using a 96 DPI basis.
    ///
    /// Returns `None` for `Percent`, which depends on a reference value.
    pub fn px_factor(self) -> Option<f64> {
        match self {
            LengthUnit::None | LengthUnit::Px => Some(1.0),
            LengthUnit::Pt => Some(1.25),
            LengthUnit::Pc => Some(15.0),
            LengthUnit::In => Some(96.0),
            LengthUnit::Cm => Some(37.7953),
            LengthUnit::Mm => Some(3.77953),
            LengthUnit::Percent => None,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            LengthUnit::None => "",
            LengthUnit::Px => "px",
            LengthUnit::Pt => "pt",
            LengthUnit::Pc => "pc",
            LengthUnit::In => "in",
            LengthUnit::Cm => "cm",
            LengthUnit::Mm => "mm",
            LengthUnit::Percent => "%",
        }
    }
}

/// Representation of the [`<length>`] type.
///
/// [`<length>`]: https://www.w3.org/TR/SVG11/types.html#DataTypeLength
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Length {
    pub num: f64,
    pub unit: LengthUnit,
}

impl Length {
    /// Constructs a new length.
    #[inline]
    pub fn new(num: f64, unit: LengthUnit) -> Length {
        Length { num, unit }
    }

    /// Constructs a new length with `LengthUnit::None`.
    #[inline]
    pub fn new_number(num: f64) -> Length {
        Length { num, unit: LengthUnit::None }
    }

    /// Parses a length from a string.
    ///
    /// Never fails: a non-numeric prefix produces a zero length
    /// and an unknown unit is treated as `LengthUnit::None`.
    pub fn parse(text: &str) -> Length {
        let mut s = Stream::from(text);
        let length = match s.parse_length() {
            Ok(v) => v,
            Err(_) => return Length::new_number(0.0),
        };

        let unit = match length.unit {
            svgtypes::LengthUnit::None => unit_from_suffix(s.slice_tail().trim()),
            svgtypes::LengthUnit::Px => LengthUnit::Px,
            svgtypes::LengthUnit::Pt => LengthUnit::Pt,
            svgtypes::LengthUnit::Pc => LengthUnit::Pc,
            svgtypes::LengthUnit::In => LengthUnit::In,
            svgtypes::LengthUnit::Cm => LengthUnit::Cm,
            svgtypes::LengthUnit::Mm => LengthUnit::Mm,
            svgtypes::LengthUnit::Percent => LengthUnit::Percent,
            svgtypes::LengthUnit::Em | svgtypes::LengthUnit::Ex => {
                debug!("Font relative length '{}' is treated as pixels.", text.trim());
                LengthUnit::None
            }
        };

        Length::new(length.number, unit)
    }

    /// Converts the length into pixels.
    ///
    /// Percent values are resolved against `reference`.
    pub fn to_px(&self, reference: f64) -> f64 {
        match self.unit.px_factor() {
            Some(factor) => self.num * factor,
            None => self.num * reference / 100.0,
        }
    }
}

// Units are matched case-insensitively.
fn unit_from_suffix(suffix: &str) -> LengthUnit {
    match suffix.to_ascii_lowercase().as_str() {
        "" => LengthUnit::None,
        "px" => LengthUnit::Px,
        "pt" => LengthUnit::Pt,
        "pc" => LengthUnit::Pc,
        "in" => LengthUnit::In,
        "cm" => LengthUnit::Cm,
        "mm" => LengthUnit::Mm,
        _ => {
            debug!("Unsupported length unit '{}'. Treated as pixels.", suffix);
            LengthUnit::None
        }
    }
}

impl Default for Length {
    fn default() -> Length {
        Length::new_number(0.0)
    }
}

/// Parses a length literal into pixels.
///
/// Percent values resolve to zero.
pub fn parse_length(text: &str) -> f64 {
    parse_length_with_reference(text, 0.0)
}

/// Parses a length literal into pixels, resolving percent values against `reference`.
pub fn parse_length_with_reference(text: &str, reference: f64) -> f64 {
    Length::parse(text).to_px(reference)
}

impl WriteBuffer for Length {
    fn write_buf_opt(&self, opt: &WriteOptions, buf: &mut Vec<u8>) {
        write_num(self.num, opt.precision_coordinates, opt.remove_leading_zero, buf);
        buf.extend_from_slice(self.unit.suffix().as_bytes());
    }
}

impl_display!(Length);
