/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::fmt::Debug;

use super::error::UnitError;

/// Numeric data carried by a quantity.
///
/// Binary operations are fallible so that array payloads can report
/// shape mismatches.
pub trait Payload: Clone + Debug {
    fn mul(&self, rhs: &Self) -> Result<Self, UnitError>;
    /// Fails with [`UnitError::DivisionByZero`] on a zero divisor.
    fn div(&self, rhs: &Self) -> Result<Self, UnitError>;
    fn add(&self, rhs: &Self) -> Result<Self, UnitError>;
    fn sub(&self, rhs: &Self) -> Result<Self, UnitError>;
    fn scale(&self, factor: f64) -> Self;
    /// Adds `delta` to every element.
    fn offset(&self, delta: f64) -> Self;
    /// Fails with [`UnitError::DivisionByZero`] on a zero element.
    fn recip(&self) -> Result<Self, UnitError>;
    fn powf(&self, exp: f64) -> Self;
    fn abs(&self) -> Self;
    fn approx_eq(&self, rhs: &Self, rel: f64) -> bool;
}

fn close(a: f64, b: f64, rel: f64) -> bool {
    a == b || (a - b).abs() <= rel * a.abs().max(b.abs())
}

impl Payload for f64 {
    fn mul(&self, rhs: &Self) -> Result<Self, UnitError> {
        Ok(self * rhs)
    }

    fn div(&self, rhs: &Self) -> Result<Self, UnitError> {
        match *rhs == 0.0 {
            true => Err(UnitError::DivisionByZero),
            false => Ok(self / rhs),
        }
    }

    fn add(&self, rhs: &Self) -> Result<Self, UnitError> {
        Ok(self + rhs)
    }

    fn sub(&self, rhs: &Self) -> Result<Self, UnitError> {
        Ok(self - rhs)
    }

    fn scale(&self, factor: f64) -> Self {
        self * factor
    }

    fn offset(&self, delta: f64) -> Self {
        self + delta
    }

    fn recip(&self) -> Result<Self, UnitError> {
        Payload::div(&1.0, self)
    }

    fn powf(&self, exp: f64) -> Self {
        f64::powf(*self, exp)
    }

    fn abs(&self) -> Self {
        f64::abs(*self)
    }

    fn approx_eq(&self, rhs: &Self, rel: f64) -> bool {
        close(*self, *rhs, rel)
    }
}

/* Arrays operate elementwise. A single-element operand is broadcast. */

fn zip_with<F>(a: &[f64], b: &[f64], f: F) -> Result<Vec<f64>, UnitError>
where
    F: Fn(f64, f64) -> Result<f64, UnitError>,
{
    match (a, b) {
        _ if a.len() == b.len() => {
            a.iter().zip(b).map(|(x, y)| f(*x, *y)).collect()
        }
        (_, [y]) => a.iter().map(|x| f(*x, *y)).collect(),
        ([x], _) => b.iter().map(|y| f(*x, *y)).collect(),
        _ => Err(UnitError::Shape(a.len(), b.len())),
    }
}

impl Payload for Vec<f64> {
    fn mul(&self, rhs: &Self) -> Result<Self, UnitError> {
        zip_with(self, rhs, |x, y| Payload::mul(&x, &y))
    }

    fn div(&self, rhs: &Self) -> Result<Self, UnitError> {
        zip_with(self, rhs, |x, y| Payload::div(&x, &y))
    }

    fn add(&self, rhs: &Self) -> Result<Self, UnitError> {
        zip_with(self, rhs, |x, y| Payload::add(&x, &y))
    }

    fn sub(&self, rhs: &Self) -> Result<Self, UnitError> {
        zip_with(self, rhs, |x, y| Payload::sub(&x, &y))
    }

    fn scale(&self, factor: f64) -> Self {
        self.iter().map(|x| x * factor).collect()
    }

    fn offset(&self, delta: f64) -> Self {
        self.iter().map(|x| x + delta).collect()
    }

    fn recip(&self) -> Result<Self, UnitError> {
        self.iter().map(Payload::recip).collect()
    }

    fn powf(&self, exp: f64) -> Self {
        self.iter().map(|x| f64::powf(*x, exp)).collect()
    }

    fn abs(&self) -> Self {
        self.iter().map(|x| f64::abs(*x)).collect()
    }

    fn approx_eq(&self, rhs: &Self, rel: f64) -> bool {
        self.len() == rhs.len()
            && self.iter().zip(rhs).all(|(x, y)| close(*x, *y, rel))
    }
}
