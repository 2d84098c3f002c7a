/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Index, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use super::error::UnitError;
use super::exponent::Exponent;

/// Number of fundamental dimensions.
pub const NUM_BASE: usize = 4;

/// Fundamental dimensions of the CGS system, in vector order.
///
/// Charge is not fundamental: electromagnetic units follow Gaussian
/// conventions and are expressed in mass, length and time.
#[derive(
    Serialize,
    Deserialize,
    PartialEq,
    PartialOrd,
    Eq,
    Ord,
    Hash,
    Clone,
    Copy,
    Debug,
)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum BaseDimension {
    Mass,
    Length,
    Time,
    Temperature,
}

static BASE_DIMENSIONS: [BaseDimension; NUM_BASE] = [
    BaseDimension::Mass,
    BaseDimension::Length,
    BaseDimension::Time,
    BaseDimension::Temperature,
];

impl BaseDimension {
    pub const LIST: &'static [Self] = &BASE_DIMENSIONS;

    pub const fn index(&self) -> usize {
        match self {
            BaseDimension::Mass => 0,
            BaseDimension::Length => 1,
            BaseDimension::Time => 2,
            BaseDimension::Temperature => 3,
        }
    }

    pub const fn symbol(&self) -> &'static str {
        match self {
            BaseDimension::Mass => "M",
            BaseDimension::Length => "L",
            BaseDimension::Time => "T",
            BaseDimension::Temperature => "Θ",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            BaseDimension::Mass => "mass",
            BaseDimension::Length => "length",
            BaseDimension::Time => "time",
            BaseDimension::Temperature => "temperature",
        }
    }

    /// Symbol of the CGS reference unit for this dimension.
    pub const fn base_unit(&self) -> &'static str {
        match self {
            BaseDimension::Mass => "g",
            BaseDimension::Length => "cm",
            BaseDimension::Time => "s",
            BaseDimension::Temperature => "K",
        }
    }
}

impl Display for BaseDimension {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.name())
    }
}

/// Exponents over the fundamental dimensions. This is a unit's
/// "type": conversion is possible only between units with equal
/// dimensions.
#[derive(
    Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, Default, Debug,
)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(transparent)]
pub struct Dimensions([Exponent; NUM_BASE]);

impl Dimensions {
    pub const DIMENSIONLESS: Self = Self::from_integers([0, 0, 0, 0]);

    pub const MASS: Self = Self::from_integers([1, 0, 0, 0]);
    pub const LENGTH: Self = Self::from_integers([0, 1, 0, 0]);
    pub const TIME: Self = Self::from_integers([0, 0, 1, 0]);
    pub const TEMPERATURE: Self = Self::from_integers([0, 0, 0, 1]);

    pub const RATE: Self = Self::from_integers([0, 0, -1, 0]);
    pub const AREA: Self = Self::from_integers([0, 2, 0, 0]);
    pub const VOLUME: Self = Self::from_integers([0, 3, 0, 0]);
    pub const MASS_DENSITY: Self = Self::from_integers([1, -3, 0, 0]);
    pub const VELOCITY: Self = Self::from_integers([0, 1, -1, 0]);
    pub const ACCELERATION: Self = Self::from_integers([0, 1, -2, 0]);
    pub const MOMENTUM: Self = Self::from_integers([1, 1, -1, 0]);
    pub const FORCE: Self = Self::from_integers([1, 1, -2, 0]);
    pub const ENERGY: Self = Self::from_integers([1, 2, -2, 0]);
    pub const POWER: Self = Self::from_integers([1, 2, -3, 0]);

    pub const fn new(exponents: [Exponent; NUM_BASE]) -> Self {
        Dimensions(exponents)
    }

    pub const fn from_integers(exponents: [i32; NUM_BASE]) -> Self {
        Dimensions([
            Exponent::integer(exponents[0]),
            Exponent::integer(exponents[1]),
            Exponent::integer(exponents[2]),
            Exponent::integer(exponents[3]),
        ])
    }

    /// Builds a vector from plain numbers, snapping each to a rational.
    pub fn from_f64s(exponents: &[f64]) -> Result<Self, UnitError> {
        if exponents.len() != NUM_BASE {
            return Err(UnitError::DimensionCount {
                expected: NUM_BASE,
                found: exponents.len(),
            });
        }
        let mut r = [Exponent::ZERO; NUM_BASE];
        for (e, v) in r.iter_mut().zip(exponents) {
            *e = Exponent::from_f64(*v)?;
        }
        Ok(Dimensions(r))
    }

    /// Gaussian charge: (energy * length)^(1/2).
    pub const fn charge() -> Self {
        Dimensions([
            Exponent::halves(1),
            Exponent::halves(3),
            Exponent::integer(-1),
            Exponent::ZERO,
        ])
    }

    pub fn get(&self, dim: BaseDimension) -> Exponent {
        self.0[dim.index()]
    }

    pub fn exponents(&self) -> &[Exponent; NUM_BASE] {
        &self.0
    }

    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (BaseDimension, Exponent)> + '_ {
        BaseDimension::LIST.iter().map(|d| (*d, self.get(*d)))
    }

    pub fn is_dimensionless(&self) -> bool {
        self.0.iter().all(Exponent::is_zero)
    }

    fn zip_with(
        self,
        rhs: Self,
        f: impl Fn(Exponent, Exponent) -> Result<Exponent, UnitError>,
    ) -> Result<Self, UnitError> {
        let mut r = self.0;
        for (a, b) in r.iter_mut().zip(rhs.0) {
            *a = f(*a, b)?;
        }
        Ok(Dimensions(r))
    }
}

impl Index<BaseDimension> for Dimensions {
    type Output = Exponent;
    fn index(&self, dim: BaseDimension) -> &Exponent {
        &self.0[dim.index()]
    }
}

impl From<[i32; NUM_BASE]> for Dimensions {
    fn from(exponents: [i32; NUM_BASE]) -> Self {
        Dimensions(exponents.map(Exponent::from))
    }
}

/// Renders the dimensions in CGS reference units, e.g. `g cm^2 s^-2`.
impl Display for Dimensions {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        if self.is_dimensionless() {
            return write!(f, "(dimensionless)");
        }
        let terms = self
            .iter()
            .filter(|(_, e)| !e.is_zero())
            .map(|(d, e)| match e == Exponent::ONE {
                true => d.base_unit().to_string(),
                false => format!("{}^{}", d.base_unit(), e),
            })
            .collect::<Vec<_>>();
        write!(f, "{}", terms.join(" "))
    }
}

/* Operations on dimensions: exponents add under multiplication,
 * subtract under division and scale under exponentiation. All fail
 * with ExponentOverflow when an exponent leaves the i64 range. */

impl Add<Dimensions> for Dimensions {
    type Output = Result<Dimensions, UnitError>;
    fn add(self, rhs: Dimensions) -> Result<Dimensions, UnitError> {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl Sub<Dimensions> for Dimensions {
    type Output = Result<Dimensions, UnitError>;
    fn sub(self, rhs: Dimensions) -> Result<Dimensions, UnitError> {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl Neg for Dimensions {
    type Output = Dimensions;
    fn neg(self) -> Dimensions {
        Dimensions(self.0.map(|e| -e))
    }
}

impl Mul<Exponent> for Dimensions {
    type Output = Result<Dimensions, UnitError>;
    fn mul(self, rhs: Exponent) -> Result<Dimensions, UnitError> {
        let mut r = self.0;
        for e in r.iter_mut() {
            *e = (*e * rhs)?;
        }
        Ok(Dimensions(r))
    }
}
