/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::fmt::{self, Display, Formatter};
use std::ops::{Div, Mul};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::composite::Composite;
use super::dimension::Dimensions;
use super::error::UnitError;
use super::exponent::Exponent;
use super::parser::parse_unit_with;
use super::resolver::Resolver;

/// Relative tolerance used when comparing conversion factors.
pub const FACTOR_TOLERANCE: f64 = 1e-10;

pub(crate) fn factors_equal(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= FACTOR_TOLERANCE * a.abs().max(b.abs())
}

/* Conversion factors must stay finite and positive through every
 * operation, including products and powers that overflow or
 * underflow. */
fn checked_factor(factor: f64) -> Result<f64, UnitError> {
    match factor.is_finite() && factor > 0.0 {
        true => Ok(factor),
        false => Err(UnitError::InvalidFactor(factor)),
    }
}

/// A physical unit: dimensions plus the factor converting a value in
/// this unit to the CGS base unit of the same dimensions.
///
/// The optional symbol only affects display. Two units are equal when
/// their dimensions match and their factors agree within
/// [`FACTOR_TOLERANCE`].
#[derive(Serialize, Clone, Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Unit {
    dimensions: Dimensions,
    factor: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    symbol: Option<Composite>,
}

impl Unit {
    pub fn new(dimensions: Dimensions, factor: f64) -> Result<Self, UnitError> {
        Ok(Unit {
            dimensions,
            factor: checked_factor(factor)?,
            symbol: None,
        })
    }

    pub fn dimensionless() -> Self {
        Unit {
            dimensions: Dimensions::DIMENSIONLESS,
            factor: 1.0,
            symbol: Some(Composite::default()),
        }
    }

    /// The CGS base unit for `dimensions`.
    pub fn base(dimensions: Dimensions) -> Self {
        Unit {
            dimensions,
            factor: 1.0,
            symbol: None,
        }
    }

    /// The CGS base unit for an exponent vector given as numbers.
    pub fn from_exponents(exponents: &[f64]) -> Result<Self, UnitError> {
        Ok(Unit::base(Dimensions::from_f64s(exponents)?))
    }

    /// Replace the display symbol.
    pub fn with_symbol(self, symbol: &str) -> Self {
        Unit {
            symbol: Some(Composite::simple(symbol)),
            ..self
        }
    }

    pub fn parse(input: &str) -> Result<Self, UnitError> {
        parse_unit_with(input, &Resolver::default())
    }

    pub fn parse_with(
        input: &str,
        resolver: &Resolver,
    ) -> Result<Self, UnitError> {
        parse_unit_with(input, resolver)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn symbol(&self) -> Option<&Composite> {
        self.symbol.as_ref()
    }

    pub fn is_dimensionless(&self) -> bool {
        self.dimensions.is_dimensionless()
    }

    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimensions == other.dimensions
    }

    /// Factor to multiply a value in `self` by to express it in `other`.
    pub fn conversion_factor_to(&self, other: &Unit) -> Result<f64, UnitError> {
        match self.is_compatible(other) {
            true => checked_factor(self.factor / other.factor),
            false => Err(UnitError::Incompatible(
                self.dimensions,
                other.dimensions,
            )),
        }
    }

    /// The CGS base unit with the same dimensions.
    pub fn to_base(&self) -> Unit {
        Unit::base(self.dimensions)
    }

    /// Fails when the exponents overflow or the factor leaves the
    /// range of positive finite floats.
    pub fn pow<E: Into<Exponent>>(&self, exp: E) -> Result<Unit, UnitError> {
        let exp = exp.into();
        let factor = match exp.is_integer() {
            true => match i32::try_from(exp.numer()) {
                Ok(n) => self.factor.powi(n),
                Err(_) => self.factor.powf(exp.to_f64()),
            },
            false => self.factor.powf(exp.to_f64()),
        };
        Ok(Unit {
            dimensions: (self.dimensions * exp)?,
            factor: checked_factor(factor)?,
            symbol: self.symbol.as_ref().map(|s| s.pow(exp)).transpose()?,
        })
    }

    /// Raise to a floating-point power. The exponent must be close to
    /// a simple fraction.
    pub fn powf(&self, exp: f64) -> Result<Unit, UnitError> {
        self.pow(Exponent::from_f64(exp)?)
    }

    /* Symbol to use when combining with another unit. An unnamed
     * base unit is spelled out in base symbols. */
    fn annotation(&self) -> Option<Composite> {
        match (&self.symbol, self.factor == 1.0) {
            (Some(s), _) => Some(s.clone()),
            (None, true) => Some(Composite::from_dimensions(&self.dimensions)),
            (None, false) => None,
        }
    }

    fn combine(
        &self,
        other: &Unit,
        other_exp: Exponent,
    ) -> Result<Unit, UnitError> {
        let rhs = other.pow(other_exp)?;
        let symbol = match (&self.symbol, &other.symbol) {
            (None, None) => None,
            _ => match (self.annotation(), rhs.annotation()) {
                (Some(a), Some(b)) => Some((a * b)?),
                _ => None,
            },
        };
        Ok(Unit {
            dimensions: (self.dimensions + rhs.dimensions)?,
            factor: checked_factor(self.factor * rhs.factor)?,
            symbol,
        })
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.is_compatible(other) && factors_equal(self.factor, other.factor)
    }
}

impl FromStr for Unit {
    type Err = UnitError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::parse(s)
    }
}

impl Default for Unit {
    fn default() -> Self {
        Unit::dimensionless()
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        match &self.symbol {
            Some(s) if s.is_empty() => write!(f, "{}", self.dimensions),
            Some(s) => write!(f, "{}", s),
            None => match (self.factor == 1.0, self.is_dimensionless()) {
                (true, _) => write!(f, "{}", self.dimensions),
                (false, true) => write!(f, "{}", self.factor),
                (false, false) => {
                    write!(f, "{} {}", self.factor, self.dimensions)
                }
            },
        }
    }
}

/* Multiplication: dimensions add and factors multiply. */

impl Mul<&Unit> for &Unit {
    type Output = Result<Unit, UnitError>;
    fn mul(self, other: &Unit) -> Result<Unit, UnitError> {
        self.combine(other, Exponent::ONE)
    }
}

impl Mul<Unit> for Unit {
    type Output = Result<Unit, UnitError>;
    fn mul(self, other: Unit) -> Result<Unit, UnitError> {
        &self * &other
    }
}

/* Division: dimensions subtract and factors divide. */

impl Div<&Unit> for &Unit {
    type Output = Result<Unit, UnitError>;
    fn div(self, other: &Unit) -> Result<Unit, UnitError> {
        self.combine(other, -Exponent::ONE)
    }
}

impl Div<Unit> for Unit {
    type Output = Result<Unit, UnitError>;
    fn div(self, other: Unit) -> Result<Unit, UnitError> {
        &self / &other
    }
}

/* Deserialization checks the factor. */

#[derive(Deserialize)]
struct UnitRepr {
    dimensions: Dimensions,
    factor: f64,
    #[serde(default)]
    symbol: Option<Composite>,
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        use serde::de::Error;
        let repr = UnitRepr::deserialize(deserializer)?;
        let unit =
            Unit::new(repr.dimensions, repr.factor).map_err(D::Error::custom)?;
        Ok(Unit {
            symbol: repr.symbol,
            ..unit
        })
    }
}
