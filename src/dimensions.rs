//! SI dimension vectors.
//!
//! An [`SIDimensions`] value holds one integer exponent per base dimension
//! slot: mass, length, time, electrical current, thermodynamic temperature,
//! amount of substance, luminous intensity, and a final "money" slot used by
//! non-physical units. Two units are dimensionally compatible exactly when
//! their dimension vectors are equal.

use core::fmt;
use core::ops::{Add, Neg, Sub};
use core::str::FromStr;

use crate::error::{UnitError, UnitResult};

/// Number of base dimension slots.
pub const NUMBER_DIMENSIONS: usize = 8;

/// Canonical abbreviation of each slot, in storage and formatting order.
pub const BASE_ABBREVIATIONS: [&str; NUMBER_DIMENSIONS] =
    ["kg", "m", "s", "A", "K", "mol", "cd", "$"];

// Longest symbols first so that `mol` is not read as `m` followed by `ol`.
const PARSE_ORDER: [usize; NUMBER_DIMENSIONS] = [5, 0, 6, 1, 2, 3, 4, 7];

/// Exponents over the SI base dimensions.
///
/// Immutable, `Copy`, and hashable: equal vectors compare equal and hash
/// equal, which is what lets the registry key quantities by dimension.
///
/// # Examples
///
/// ```
/// use metrum::SIDimensions;
///
/// let force: SIDimensions = "kg.m/s2".parse().unwrap();
/// let area = SIDimensions::LENGTH + SIDimensions::LENGTH;
/// let pressure = force - area;
/// assert_eq!(pressure.to_string(), "kg/m.s2");
/// assert_eq!(pressure, "kg/m.s2".parse().unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct SIDimensions {
    exponents: [i8; NUMBER_DIMENSIONS],
}

impl SIDimensions {
    pub const DIMENSIONLESS: Self = Self::from_exponents([0, 0, 0, 0, 0, 0, 0, 0]);
    pub const MASS: Self = Self::from_exponents([1, 0, 0, 0, 0, 0, 0, 0]);
    pub const LENGTH: Self = Self::from_exponents([0, 1, 0, 0, 0, 0, 0, 0]);
    pub const TIME: Self = Self::from_exponents([0, 0, 1, 0, 0, 0, 0, 0]);
    pub const CURRENT: Self = Self::from_exponents([0, 0, 0, 1, 0, 0, 0, 0]);
    pub const TEMPERATURE: Self = Self::from_exponents([0, 0, 0, 0, 1, 0, 0, 0]);
    pub const AMOUNT_OF_SUBSTANCE: Self = Self::from_exponents([0, 0, 0, 0, 0, 1, 0, 0]);
    pub const LUMINOUS_INTENSITY: Self = Self::from_exponents([0, 0, 0, 0, 0, 0, 1, 0]);
    pub const MONEY: Self = Self::from_exponents([0, 0, 0, 0, 0, 0, 0, 1]);

    /// Build from exponents in slot order `[kg, m, s, A, K, mol, cd, $]`.
    #[inline]
    pub const fn from_exponents(exponents: [i8; NUMBER_DIMENSIONS]) -> Self {
        Self { exponents }
    }

    /// Exponents in slot order.
    #[inline]
    pub const fn exponents(&self) -> [i8; NUMBER_DIMENSIONS] {
        self.exponents
    }

    /// Whether every exponent is zero.
    #[inline]
    pub const fn is_dimensionless(&self) -> bool {
        let mut i = 0;
        while i < NUMBER_DIMENSIONS {
            if self.exponents[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Dimensions of the product of two quantities.
    ///
    /// # Panics
    ///
    /// If an exponent leaves the `i8` range. Values built from user input
    /// go through [`checked_plus`](Self::checked_plus).
    pub const fn plus(self, other: Self) -> Self {
        let mut exponents = [0i8; NUMBER_DIMENSIONS];
        let mut i = 0;
        while i < NUMBER_DIMENSIONS {
            exponents[i] = match self.exponents[i].checked_add(other.exponents[i]) {
                Some(e) => e,
                None => panic!("SI dimension exponent overflow"),
            };
            i += 1;
        }
        Self { exponents }
    }

    /// Dimensions of the quotient of two quantities.
    ///
    /// # Panics
    ///
    /// As [`plus`](Self::plus).
    pub const fn minus(self, other: Self) -> Self {
        self.plus(other.negate())
    }

    /// Dimensions of the reciprocal.
    ///
    /// # Panics
    ///
    /// If an exponent is `-128`.
    pub const fn negate(self) -> Self {
        let mut exponents = [0i8; NUMBER_DIMENSIONS];
        let mut i = 0;
        while i < NUMBER_DIMENSIONS {
            exponents[i] = match self.exponents[i].checked_neg() {
                Some(e) => e,
                None => panic!("SI dimension exponent overflow"),
            };
            i += 1;
        }
        Self { exponents }
    }

    /// Dimensions of the quantity raised to an integer power.
    ///
    /// ```
    /// use metrum::SIDimensions;
    /// assert_eq!(SIDimensions::LENGTH.pow(3).to_string(), "m3");
    /// ```
    ///
    /// # Panics
    ///
    /// If an exponent leaves the `i8` range.
    pub const fn pow(self, power: i8) -> Self {
        let mut exponents = [0i8; NUMBER_DIMENSIONS];
        let mut i = 0;
        while i < NUMBER_DIMENSIONS {
            exponents[i] = match self.exponents[i].checked_mul(power) {
                Some(e) => e,
                None => panic!("SI dimension exponent overflow"),
            };
            i += 1;
        }
        Self { exponents }
    }

    // ── Checked arithmetic ──────────────────────────────────────────

    fn try_zip(self, other: Self, op: impl Fn(i32, i32) -> i32) -> UnitResult<Self> {
        let mut exponents = [0i8; NUMBER_DIMENSIONS];
        for (i, slot) in exponents.iter_mut().enumerate() {
            let e = op(i32::from(self.exponents[i]), i32::from(other.exponents[i]));
            *slot = i8::try_from(e).map_err(|_| {
                UnitError::IllegalArgument(format!(
                    "exponent {e} of {} out of range",
                    BASE_ABBREVIATIONS[i]
                ))
            })?;
        }
        Ok(Self { exponents })
    }

    /// [`plus`](Self::plus), failing with `IllegalArgument` on exponent
    /// overflow.
    pub fn checked_plus(self, other: Self) -> UnitResult<Self> {
        self.try_zip(other, |a, b| a + b)
    }

    pub fn checked_minus(self, other: Self) -> UnitResult<Self> {
        self.try_zip(other, |a, b| a - b)
    }

    pub fn checked_negate(self) -> UnitResult<Self> {
        Self::DIMENSIONLESS.checked_minus(self)
    }

    /// [`pow`](Self::pow) for any integer power, failing with
    /// `IllegalArgument` when an exponent leaves the `i8` range.
    pub fn checked_pow(self, power: i32) -> UnitResult<Self> {
        self.try_zip(Self::DIMENSIONLESS, |a, _| a.saturating_mul(power))
    }

    /// Parse the canonical textual form, e.g. `kg.m/s2`, `1/s`, `m^2`.
    ///
    /// Terms may be separated by `.` or written back to back (`kgm2/s3`);
    /// exponents may carry an optional `^` and sign. `1` alone is
    /// dimensionless.
    pub fn parse(input: &str) -> UnitResult<Self> {
        let text = input.trim();
        if text.is_empty() {
            return Err(UnitError::invalid_format(input, "empty SI dimension string"));
        }
        let (numerator, denominator) = match text.split_once('/') {
            Some((n, d)) => {
                if d.contains('/') {
                    return Err(UnitError::invalid_format(input, "more than one '/'"));
                }
                if d.trim().is_empty() {
                    return Err(UnitError::invalid_format(input, "empty denominator"));
                }
                (n, Some(d))
            }
            None => (text, None),
        };

        let mut exponents = [0i32; NUMBER_DIMENSIONS];
        parse_terms(input, numerator, 1, &mut exponents)?;
        if let Some(d) = denominator {
            parse_terms(input, d, -1, &mut exponents)?;
        }

        let mut result = [0i8; NUMBER_DIMENSIONS];
        for (slot, &e) in result.iter_mut().zip(exponents.iter()) {
            *slot = i8::try_from(e)
                .map_err(|_| UnitError::invalid_format(input, "exponent out of range"))?;
        }
        Ok(Self::from_exponents(result))
    }
}

fn parse_terms(
    input: &str,
    part: &str,
    sign: i32,
    exponents: &mut [i32; NUMBER_DIMENSIONS],
) -> UnitResult<()> {
    let part = part.trim();
    if part.is_empty() || part == "1" {
        return Ok(());
    }
    for segment in part.split('.') {
        let mut rest = segment.trim();
        if rest.is_empty() {
            return Err(UnitError::invalid_format(input, "empty term"));
        }
        while !rest.is_empty() {
            let slot = PARSE_ORDER
                .iter()
                .copied()
                .find(|&i| rest.starts_with(BASE_ABBREVIATIONS[i]))
                .ok_or_else(|| {
                    UnitError::invalid_format(input, format!("unrecognized token at `{rest}`"))
                })?;
            rest = &rest[BASE_ABBREVIATIONS[slot].len()..];
            rest = rest.strip_prefix('^').unwrap_or(rest);

            let negative = rest.starts_with('-');
            if negative {
                rest = &rest[1..];
            }
            let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
            let exponent = if digits == 0 {
                if negative {
                    return Err(UnitError::invalid_format(input, "sign without exponent"));
                }
                1
            } else {
                rest[..digits]
                    .parse::<i32>()
                    .map_err(|_| UnitError::invalid_format(input, "exponent out of range"))?
            };
            rest = &rest[digits..];
            let exponent = if negative { -exponent } else { exponent };
            exponents[slot] += sign * exponent;
        }
    }
    Ok(())
}

// ── Formatting / parsing traits ─────────────────────────────────────

impl fmt::Display for SIDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "1");
        }
        let term = |i: usize, e: i16| {
            if e == 1 {
                BASE_ABBREVIATIONS[i].to_string()
            } else {
                format!("{}{}", BASE_ABBREVIATIONS[i], e)
            }
        };
        let numerator: Vec<String> = (0..NUMBER_DIMENSIONS)
            .filter(|&i| self.exponents[i] > 0)
            .map(|i| term(i, i16::from(self.exponents[i])))
            .collect();
        let denominator: Vec<String> = (0..NUMBER_DIMENSIONS)
            .filter(|&i| self.exponents[i] < 0)
            .map(|i| term(i, -i16::from(self.exponents[i])))
            .collect();

        if numerator.is_empty() {
            write!(f, "1")?;
        } else {
            write!(f, "{}", numerator.join("."))?;
        }
        if !denominator.is_empty() {
            write!(f, "/{}", denominator.join("."))?;
        }
        Ok(())
    }
}

impl FromStr for SIDimensions {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ── Arithmetic ──────────────────────────────────────────────────────

impl Add for SIDimensions {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.plus(rhs)
    }
}

impl Sub for SIDimensions {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.minus(rhs)
    }
}

impl Neg for SIDimensions {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self.negate()
    }
}
