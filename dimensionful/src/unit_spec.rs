/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use serde::{Deserialize, Serialize};

use super::dimension::{Dimensions, NUM_BASE};
use super::error::UnitError;
use super::resolver::Resolver;
use super::unit::Unit;

/// The ways a unit can be specified when building a quantity.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum UnitSpec {
    /// A unit expression such as `km s^-1`.
    Expression(String),
    /// Exponents of the base dimensions; the CGS base unit.
    Exponents(Vec<f64>),
    /// Dimensions with an explicit conversion factor.
    Scaled(Dimensions, f64),
    Unit(Unit),
}

impl UnitSpec {
    pub fn resolve(self, resolver: &Resolver) -> Result<Unit, UnitError> {
        match self {
            UnitSpec::Expression(expr) => Unit::parse_with(&expr, resolver),
            UnitSpec::Exponents(exps) => Unit::from_exponents(&exps),
            UnitSpec::Scaled(dims, factor) => Unit::new(dims, factor),
            UnitSpec::Unit(unit) => Ok(unit),
        }
    }
}

impl TryFrom<UnitSpec> for Unit {
    type Error = UnitError;
    fn try_from(spec: UnitSpec) -> Result<Self, Self::Error> {
        spec.resolve(&Resolver::default())
    }
}

impl From<&str> for UnitSpec {
    fn from(expr: &str) -> Self {
        UnitSpec::Expression(expr.to_string())
    }
}

impl From<String> for UnitSpec {
    fn from(expr: String) -> Self {
        UnitSpec::Expression(expr)
    }
}

impl From<[i32; NUM_BASE]> for UnitSpec {
    fn from(exps: [i32; NUM_BASE]) -> Self {
        UnitSpec::Scaled(Dimensions::from(exps), 1.0)
    }
}

impl From<[f64; NUM_BASE]> for UnitSpec {
    fn from(exps: [f64; NUM_BASE]) -> Self {
        UnitSpec::Exponents(exps.to_vec())
    }
}

impl From<Dimensions> for UnitSpec {
    fn from(dims: Dimensions) -> Self {
        UnitSpec::Scaled(dims, 1.0)
    }
}

impl From<(Dimensions, f64)> for UnitSpec {
    fn from((dims, factor): (Dimensions, f64)) -> Self {
        UnitSpec::Scaled(dims, factor)
    }
}

impl From<Unit> for UnitSpec {
    fn from(unit: Unit) -> Self {
        UnitSpec::Unit(unit)
    }
}

impl From<&Unit> for UnitSpec {
    fn from(unit: &Unit) -> Self {
        UnitSpec::Unit(unit.clone())
    }
}
