// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use float_cmp::ApproxEqUlps;

use crate::{WriteBuffer, WriteOptions};

/// A trait for fuzzy/approximate equality comparisons of float numbers.
pub trait FuzzyEq<Rhs: ?Sized = Self> {
    /// Returns `true` if values are approximately equal.
    fn fuzzy_eq(&self, other: &Rhs) -> bool;

    /// Returns `true` if values are not approximately equal.
    #[inline]
    fn fuzzy_ne(&self, other: &Rhs) -> bool {
        !self.fuzzy_eq(other)
    }
}

impl FuzzyEq for f64 {
    #[inline]
    fn fuzzy_eq(&self, other: &f64) -> bool {
        self.approx_eq_ulps(other, 4)
    }
}

/// A trait for checking that a float is approximately zero.
pub trait FuzzyZero: FuzzyEq {
    /// Returns `true` if the number is approximately zero.
    fn is_fuzzy_zero(&self) -> bool;
}

impl FuzzyZero for f64 {
    #[inline]
    fn is_fuzzy_zero(&self) -> bool {
        self.abs() < ::std::f64::EPSILON * 8.0
    }
}

static POW_VEC: &[f64] = &[
    1.0,
    10.0,
    100.0,
    1_000.0,
    10_000.0,
    100_000.0,
    1_000_000.0,
    10_000_000.0,
    100_000_000.0,
];

/// Writes a number rounded to `precision` fractional digits.
///
/// The precision is clamped to the 1..=8 range.
/// Trailing zeros and the trailing `.0` are never written.
pub fn write_num(num: f64, precision: u8, rm_leading_zero: bool, buf: &mut Vec<u8>) {
    let precision = precision.max(1).min(8);

    if !num.is_finite() {
        buf.push(b'0');
        return;
    }

    let multiplier = POW_VEC[precision as usize];
    let rounded = (num * multiplier).round();
    if rounded == 0.0 {
        buf.push(b'0');
        return;
    }

    let new_value = rounded / multiplier;

    let start_pos = buf.len();

    let mut dtoa_buf = dtoa::Buffer::new();
    let text = dtoa_buf.format(new_value);
    // dtoa always adds '.0' to integers.
    let text = text.strip_suffix(".0").unwrap_or(text);
    buf.extend_from_slice(text.as_bytes());

    if rm_leading_zero {
        let s = &buf[start_pos..];
        if s.starts_with(b"0.") {
            // 0.1 -> .1
            buf.remove(start_pos);
        } else if s.starts_with(b"-0.") {
            // -0.1 -> -.1
            buf.remove(start_pos + 1);
        }
    }
}

impl WriteBuffer for f64 {
    fn write_buf_opt(&self, opt: &WriteOptions, buf: &mut Vec<u8>) {
        write_num(*self, opt.precision_coordinates, opt.remove_leading_zero, buf);
    }
}
