/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use num_rational::Rational64;
use num_traits::{CheckedAdd, CheckedMul, CheckedSub, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::UnitError;

/// Largest denominator considered when snapping a float to a rational.
pub const MAX_DENOMINATOR: i64 = 1000;

/// Absolute tolerance used when snapping a float to a rational.
pub const SNAP_TOLERANCE: f64 = 1e-9;

/// Floats beyond this magnitude are never snapped.
const MAX_MAGNITUDE: f64 = 1e12;

/// A rational exponent of a base dimension.
///
/// Exponents are kept as reduced fractions so that `1.5`, `3/2` and
/// `0.5 * 3` all compare equal. Floating-point input is accepted on a
/// best-effort basis: it is snapped to the nearest fraction with a
/// denominator of at most [`MAX_DENOMINATOR`].
///
/// Arithmetic is checked: sums and products that do not fit in an
/// `i64` fraction yield [`UnitError::ExponentOverflow`]. The numerator
/// is never `i64::MIN`, so negation cannot overflow.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct Exponent(Rational64);

impl Exponent {
    pub const ZERO: Self = Exponent(Rational64::new_raw(0, 1));
    pub const ONE: Self = Exponent(Rational64::new_raw(1, 1));

    pub fn new(numer: i64, denom: i64) -> Result<Self, UnitError> {
        match (numer, denom) {
            (_, 0) => Err(UnitError::DivisionByZero),
            (i64::MIN, _) | (_, i64::MIN) => Err(UnitError::ExponentOverflow),
            _ => Ok(Exponent(Rational64::new(numer, denom))),
        }
    }

    pub const fn integer(n: i32) -> Self {
        Exponent(Rational64::new_raw(n as i64, 1))
    }

    /// `n / 2`, in lowest terms.
    pub const fn halves(n: i32) -> Self {
        match n % 2 {
            0 => Exponent(Rational64::new_raw((n / 2) as i64, 1)),
            _ => Exponent(Rational64::new_raw(n as i64, 2)),
        }
    }

    pub fn from_f64(value: f64) -> Result<Self, UnitError> {
        if !value.is_finite() || value.abs() > MAX_MAGNITUDE {
            return Err(UnitError::Exponent(value));
        }
        (1..=MAX_DENOMINATOR)
            .find_map(|denom| {
                let numer = (value * denom as f64).round();
                match (numer / denom as f64 - value).abs() < SNAP_TOLERANCE {
                    true => Some(Exponent(Rational64::new(
                        numer as i64,
                        denom,
                    ))),
                    false => None,
                }
            })
            .ok_or(UnitError::Exponent(value))
    }

    pub fn numer(&self) -> i64 {
        *self.0.numer()
    }

    pub fn denom(&self) -> i64 {
        *self.0.denom()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    pub fn to_f64(&self) -> f64 {
        self.numer() as f64 / self.denom() as f64
    }

    pub fn as_ratio(&self) -> Rational64 {
        self.0
    }
}

impl Default for Exponent {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i32> for Exponent {
    fn from(n: i32) -> Self {
        Exponent::integer(n)
    }
}

impl TryFrom<i64> for Exponent {
    type Error = UnitError;
    fn try_from(n: i64) -> Result<Self, UnitError> {
        Exponent::new(n, 1)
    }
}

impl TryFrom<Rational64> for Exponent {
    type Error = UnitError;
    fn try_from(r: Rational64) -> Result<Self, UnitError> {
        Exponent::new(*r.numer(), *r.denom())
    }
}

impl Display for Exponent {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        match self.is_integer() {
            true => write!(f, "{}", self.numer()),
            false => write!(f, "{}/{}", self.numer(), self.denom()),
        }
    }
}

/// Parses `2`, `-1`, `3/2`, `-0.25` or `.5`. Decimal notation is
/// converted exactly (`0.25` is `1/4`).
impl FromStr for Exponent {
    type Err = UnitError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || UnitError::Parse {
            position: 0,
            message: format!("invalid exponent '{}'", s),
        };
        let s = s.trim();
        if let Some((n, d)) = s.split_once('/') {
            let numer = n.trim().parse::<i64>().map_err(|_| invalid())?;
            let denom = d.trim().parse::<i64>().map_err(|_| invalid())?;
            return Exponent::new(numer, denom);
        }
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (int, frac) = digits.split_once('.').unwrap_or((digits, ""));
        if (int.is_empty() && frac.is_empty())
            || !int.chars().chain(frac.chars()).all(|c| c.is_ascii_digit())
            || int.len() + frac.len() > 18
        {
            return Err(invalid());
        }
        let numer = format!("{}{}", int, frac)
            .parse::<i64>()
            .map_err(|_| invalid())?;
        let denom = 10i64.pow(frac.len() as u32);
        Exponent::new(if negative { -numer } else { numer }, denom)
    }
}

/* Arithmetic. */

fn checked(r: Option<Rational64>) -> Result<Exponent, UnitError> {
    match r {
        Some(r) if *r.numer() != i64::MIN => Ok(Exponent(r)),
        _ => Err(UnitError::ExponentOverflow),
    }
}

impl Add for Exponent {
    type Output = Result<Exponent, UnitError>;
    fn add(self, rhs: Exponent) -> Result<Exponent, UnitError> {
        checked(self.0.checked_add(&rhs.0))
    }
}

impl Sub for Exponent {
    type Output = Result<Exponent, UnitError>;
    fn sub(self, rhs: Exponent) -> Result<Exponent, UnitError> {
        checked(self.0.checked_sub(&rhs.0))
    }
}

impl Mul for Exponent {
    type Output = Result<Exponent, UnitError>;
    fn mul(self, rhs: Exponent) -> Result<Exponent, UnitError> {
        checked(self.0.checked_mul(&rhs.0))
    }
}

impl Neg for Exponent {
    type Output = Exponent;
    fn neg(self) -> Exponent {
        Exponent(-self.0)
    }
}

/* Serialization: integers as numbers, fractions as "n/d". */

#[derive(Deserialize)]
#[serde(untagged)]
enum ExponentRepr {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Serialize for Exponent {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match self.is_integer() {
            true => serializer.serialize_i64(self.numer()),
            false => serializer.collect_str(self),
        }
    }
}

impl<'de> Deserialize<'de> for Exponent {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        use serde::de::Error;
        match ExponentRepr::deserialize(deserializer)? {
            ExponentRepr::Integer(n) => {
                Exponent::try_from(n).map_err(D::Error::custom)
            }
            ExponentRepr::Float(v) => {
                Exponent::from_f64(v).map_err(D::Error::custom)
            }
            ExponentRepr::Text(s) => s.parse().map_err(D::Error::custom),
        }
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for Exponent {
    fn schema_name() -> String {
        String::from("Exponent")
    }

    fn json_schema(
        _gen: &mut schemars::gen::SchemaGenerator,
    ) -> schemars::schema::Schema {
        use schemars::schema::{InstanceType, SchemaObject, SingleOrVec};
        SchemaObject {
            instance_type: Some(SingleOrVec::Vec(vec![
                InstanceType::Integer,
                InstanceType::Number,
                InstanceType::String,
            ])),
            ..Default::default()
        }
        .into()
    }
}
