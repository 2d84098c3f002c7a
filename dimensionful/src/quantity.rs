/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::parser::{parse_quantity, parse_quantity_with};

use super::dimension::Dimensions;
use super::error::UnitError;
use super::exponent::Exponent;
use super::payload::Payload;
use super::resolver::Resolver;
use super::unit::{Unit, FACTOR_TOLERANCE};
use super::unit_spec::UnitSpec;

/// A value with a unit.
///
/// Quantities compare equal when their units are compatible and the
/// values agree within [`FACTOR_TOLERANCE`] once expressed in the same
/// unit, so `100 cm == 1 m`.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Quantity<T = f64>(pub T, pub Unit);

impl<T: Payload> Quantity<T> {
    /// Resolves `unit` against the default CGS table.
    pub fn new<U: Into<UnitSpec>>(
        value: T,
        unit: U,
    ) -> Result<Self, UnitError> {
        Ok(Quantity(value, Unit::try_from(unit.into())?))
    }

    pub fn new_with<U: Into<UnitSpec>>(
        value: T,
        unit: U,
        resolver: &Resolver,
    ) -> Result<Self, UnitError> {
        Ok(Quantity(value, unit.into().resolve(resolver)?))
    }

    pub fn with_unit(value: T, unit: Unit) -> Self {
        Quantity(value, unit)
    }

    pub fn dimensionless(value: T) -> Self {
        Quantity(value, Unit::dimensionless())
    }

    pub fn value(&self) -> &T {
        &self.0
    }

    pub fn unit(&self) -> &Unit {
        &self.1
    }

    pub fn into_value(self) -> T {
        self.0
    }

    pub fn dimensions(&self) -> Dimensions {
        self.1.dimensions()
    }

    pub fn is_compatible(&self, other: &Quantity<T>) -> bool {
        self.1.is_compatible(&other.1)
    }

    /// The same quantity expressed in `unit`.
    pub fn convert_to(&self, unit: &Unit) -> Result<Self, UnitError> {
        Ok(Quantity(self.value_in(unit)?, unit.clone()))
    }

    /// The same quantity expressed in CGS base units.
    pub fn convert_to_base(&self) -> Self {
        Quantity(self.value_in_base(), self.1.to_base())
    }

    /// The value expressed in `unit`.
    pub fn value_in(&self, unit: &Unit) -> Result<T, UnitError> {
        let factor = self.1.conversion_factor_to(unit)?;
        Ok(match factor == 1.0 {
            true => self.0.clone(),
            false => self.0.scale(factor),
        })
    }

    /// The value expressed in CGS base units.
    pub fn value_in_base(&self) -> T {
        match self.1.factor() == 1.0 {
            true => self.0.clone(),
            false => self.0.scale(self.1.factor()),
        }
    }

    pub fn pow<E: Into<Exponent>>(&self, exp: E) -> Result<Self, UnitError> {
        let exp = exp.into();
        Ok(Quantity(self.0.powf(exp.to_f64()), self.1.pow(exp)?))
    }

    pub fn powf(&self, exp: f64) -> Result<Self, UnitError> {
        self.pow(Exponent::from_f64(exp)?)
    }

    pub fn abs(&self) -> Self {
        Quantity(self.0.abs(), self.1.clone())
    }

    /// Compare values after converting `other` into this quantity's
    /// unit, within a relative tolerance.
    pub fn approx_eq(
        &self,
        other: &Quantity<T>,
    ) -> Result<bool, UnitError> {
        Ok(self.0.approx_eq(&other.value_in(&self.1)?, FACTOR_TOLERANCE))
    }
}

impl Quantity {
    pub fn parse(input: &str) -> Result<Self, UnitError> {
        parse_quantity(input)
    }

    pub fn parse_with(
        input: &str,
        resolver: &Resolver,
    ) -> Result<Self, UnitError> {
        parse_quantity_with(input, resolver)
    }

    /* Note: we cannot implement the trait, because it does not allow
    for error conditions. */
    pub fn partial_cmp(
        &self,
        rhs: &Self,
    ) -> Result<Option<Ordering>, UnitError> {
        Ok(self.0.partial_cmp(&rhs.value_in(&self.1)?))
    }
}

impl<T: Payload> PartialEq for Quantity<T> {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other).unwrap_or(false)
    }
}

impl Display for Quantity<f64> {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(f, "{} {}", self.0, self.1)
    }
}

impl Display for Quantity<Vec<f64>> {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(f, "{:?} {}", self.0, self.1)
    }
}

/* Addition and subtraction: the right operand is expressed in the
 * left operand's unit. */

impl<T: Payload> Add<&Quantity<T>> for &Quantity<T> {
    type Output = Result<Quantity<T>, UnitError>;
    fn add(self, rhs: &Quantity<T>) -> Result<Quantity<T>, UnitError> {
        let value = Payload::add(&self.0, &rhs.value_in(&self.1)?)?;
        Ok(Quantity(value, self.1.clone()))
    }
}

impl<T: Payload> Add<Quantity<T>> for Quantity<T> {
    type Output = Result<Quantity<T>, UnitError>;
    fn add(self, rhs: Quantity<T>) -> Result<Quantity<T>, UnitError> {
        &self + &rhs
    }
}

impl<T: Payload> Sub<&Quantity<T>> for &Quantity<T> {
    type Output = Result<Quantity<T>, UnitError>;
    fn sub(self, rhs: &Quantity<T>) -> Result<Quantity<T>, UnitError> {
        let value = Payload::sub(&self.0, &rhs.value_in(&self.1)?)?;
        Ok(Quantity(value, self.1.clone()))
    }
}

impl<T: Payload> Sub<Quantity<T>> for Quantity<T> {
    type Output = Result<Quantity<T>, UnitError>;
    fn sub(self, rhs: Quantity<T>) -> Result<Quantity<T>, UnitError> {
        &self - &rhs
    }
}

/* Multiplication and division combine the units. */

impl<T: Payload> Mul<&Quantity<T>> for &Quantity<T> {
    type Output = Result<Quantity<T>, UnitError>;
    fn mul(self, rhs: &Quantity<T>) -> Result<Quantity<T>, UnitError> {
        Ok(Quantity(Payload::mul(&self.0, &rhs.0)?, (&self.1 * &rhs.1)?))
    }
}

impl<T: Payload> Mul<Quantity<T>> for Quantity<T> {
    type Output = Result<Quantity<T>, UnitError>;
    fn mul(self, rhs: Quantity<T>) -> Result<Quantity<T>, UnitError> {
        &self * &rhs
    }
}

impl<T: Payload> Div<&Quantity<T>> for &Quantity<T> {
    type Output = Result<Quantity<T>, UnitError>;
    fn div(self, rhs: &Quantity<T>) -> Result<Quantity<T>, UnitError> {
        let value = Payload::div(&self.0, &rhs.0)?;
        Ok(Quantity(value, (&self.1 / &rhs.1)?))
    }
}

impl<T: Payload> Div<Quantity<T>> for Quantity<T> {
    type Output = Result<Quantity<T>, UnitError>;
    fn div(self, rhs: Quantity<T>) -> Result<Quantity<T>, UnitError> {
        &self / &rhs
    }
}

/* Raw numbers act as dimensionless quantities in base units. They
 * scale any quantity, but only add to dimensionless ones. */

fn scalar_in(value: f64, unit: &Unit) -> Result<f64, UnitError> {
    Ok(value / unit.conversion_factor_to(&Unit::dimensionless())?)
}

impl<T: Payload> Mul<f64> for &Quantity<T> {
    type Output = Quantity<T>;
    fn mul(self, rhs: f64) -> Quantity<T> {
        Quantity(self.0.scale(rhs), self.1.clone())
    }
}

impl<T: Payload> Mul<f64> for Quantity<T> {
    type Output = Quantity<T>;
    fn mul(self, rhs: f64) -> Quantity<T> {
        Quantity(self.0.scale(rhs), self.1)
    }
}

impl<T: Payload> Mul<&Quantity<T>> for f64 {
    type Output = Quantity<T>;
    fn mul(self, rhs: &Quantity<T>) -> Quantity<T> {
        rhs * self
    }
}

impl<T: Payload> Mul<Quantity<T>> for f64 {
    type Output = Quantity<T>;
    fn mul(self, rhs: Quantity<T>) -> Quantity<T> {
        rhs * self
    }
}

impl<T: Payload> Div<f64> for &Quantity<T> {
    type Output = Result<Quantity<T>, UnitError>;
    fn div(self, rhs: f64) -> Result<Quantity<T>, UnitError> {
        match rhs == 0.0 {
            true => Err(UnitError::DivisionByZero),
            false => Ok(Quantity(self.0.scale(1.0 / rhs), self.1.clone())),
        }
    }
}

impl<T: Payload> Div<f64> for Quantity<T> {
    type Output = Result<Quantity<T>, UnitError>;
    fn div(self, rhs: f64) -> Result<Quantity<T>, UnitError> {
        &self / rhs
    }
}

impl<T: Payload> Div<&Quantity<T>> for f64 {
    type Output = Result<Quantity<T>, UnitError>;
    fn div(self, rhs: &Quantity<T>) -> Result<Quantity<T>, UnitError> {
        Ok(Quantity(rhs.0.recip()?.scale(self), rhs.1.pow(-1)?))
    }
}

impl<T: Payload> Div<Quantity<T>> for f64 {
    type Output = Result<Quantity<T>, UnitError>;
    fn div(self, rhs: Quantity<T>) -> Result<Quantity<T>, UnitError> {
        self / &rhs
    }
}

impl<T: Payload> Add<f64> for &Quantity<T> {
    type Output = Result<Quantity<T>, UnitError>;
    fn add(self, rhs: f64) -> Result<Quantity<T>, UnitError> {
        let value = self.0.offset(scalar_in(rhs, &self.1)?);
        Ok(Quantity(value, self.1.clone()))
    }
}

impl<T: Payload> Add<f64> for Quantity<T> {
    type Output = Result<Quantity<T>, UnitError>;
    fn add(self, rhs: f64) -> Result<Quantity<T>, UnitError> {
        &self + rhs
    }
}

impl<T: Payload> Add<&Quantity<T>> for f64 {
    type Output = Result<Quantity<T>, UnitError>;
    fn add(self, rhs: &Quantity<T>) -> Result<Quantity<T>, UnitError> {
        rhs + self
    }
}

impl<T: Payload> Add<Quantity<T>> for f64 {
    type Output = Result<Quantity<T>, UnitError>;
    fn add(self, rhs: Quantity<T>) -> Result<Quantity<T>, UnitError> {
        &rhs + self
    }
}

impl<T: Payload> Sub<f64> for &Quantity<T> {
    type Output = Result<Quantity<T>, UnitError>;
    fn sub(self, rhs: f64) -> Result<Quantity<T>, UnitError> {
        let value = self.0.offset(-scalar_in(rhs, &self.1)?);
        Ok(Quantity(value, self.1.clone()))
    }
}

impl<T: Payload> Sub<f64> for Quantity<T> {
    type Output = Result<Quantity<T>, UnitError>;
    fn sub(self, rhs: f64) -> Result<Quantity<T>, UnitError> {
        &self - rhs
    }
}

impl<T: Payload> Sub<&Quantity<T>> for f64 {
    type Output = Result<Quantity<T>, UnitError>;
    fn sub(self, rhs: &Quantity<T>) -> Result<Quantity<T>, UnitError> {
        let value = rhs.0.scale(-1.0).offset(scalar_in(self, &rhs.1)?);
        Ok(Quantity(value, rhs.1.clone()))
    }
}

impl<T: Payload> Sub<Quantity<T>> for f64 {
    type Output = Result<Quantity<T>, UnitError>;
    fn sub(self, rhs: Quantity<T>) -> Result<Quantity<T>, UnitError> {
        self - &rhs
    }
}

impl<T: Payload> Neg for Quantity<T> {
    type Output = Quantity<T>;
    fn neg(self) -> Quantity<T> {
        Quantity(self.0.scale(-1.0), self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::Quantity;
    use crate::{Unit, UnitError};

    #[test]
    fn display() {
        let q = Quantity::new(2.5, "km s^-1").unwrap();
        assert_eq!(q.to_string(), "2.5 km s^-1");
        let v = Quantity::new(vec![1.0, 2.0], "cm").unwrap();
        assert_eq!(v.to_string(), "[1.0, 2.0] cm");
    }

    #[test]
    fn ordering() {
        let a = Quantity::parse("1 km").unwrap();
        let b = Quantity::parse("999 m").unwrap();
        assert_eq!(a.partial_cmp(&b), Ok(Some(std::cmp::Ordering::Greater)));
        assert!(a.partial_cmp(&Quantity::parse("1 g").unwrap()).is_err());
    }

    #[test]
    fn equality_converts() {
        let m = Quantity::parse("1 m").unwrap();
        assert_eq!(Quantity::parse("100 cm").unwrap(), m);
        assert_eq!(m, Quantity::parse("100 cm").unwrap());
        assert_ne!(Quantity::parse("99 cm").unwrap(), m);
        assert_ne!(Quantity::parse("1 g").unwrap(), m);
    }

    #[test]
    fn scalar_division() {
        let q = Quantity::with_unit(4.0, Unit::parse("cm").unwrap());
        assert_eq!((q.clone() / 2.0).unwrap().0, 2.0);
        assert_eq!(q / 0.0, Err(UnitError::DivisionByZero));
    }
}
