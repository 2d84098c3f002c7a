/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::fmt::{self, Display, Formatter};
use std::ops::Mul;

use serde::{Deserialize, Serialize};

use super::dimension::Dimensions;
use super::error::UnitError;
use super::exponent::Exponent;

/// Symbolic form of a unit: symbols with exponents, in order of first
/// appearance. Used only for display.
#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Default, Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(transparent)]
pub struct Composite(Vec<(String, Exponent)>);

impl Composite {
    pub fn simple(symbol: &str) -> Self {
        Composite(vec![(symbol.to_string(), Exponent::ONE)])
    }

    /// The dimensions spelled out in CGS reference units.
    pub fn from_dimensions(dimensions: &Dimensions) -> Self {
        Composite(
            dimensions
                .iter()
                .filter(|(_, e)| !e.is_zero())
                .map(|(d, e)| (d.base_unit().to_string(), e))
                .collect(),
        )
    }

    /// Collects terms, merging repeated symbols and dropping those
    /// whose exponents cancel.
    pub fn from_terms<I>(terms: I) -> Result<Self, UnitError>
    where
        I: IntoIterator<Item = (String, Exponent)>,
    {
        let mut r: Vec<(String, Exponent)> = Vec::new();
        for (symbol, exp) in terms {
            match r.iter_mut().find(|(s, _)| *s == symbol) {
                Some((_, e)) => *e = (*e + exp)?,
                None => r.push((symbol, exp)),
            }
        }
        r.retain(|(_, e)| !e.is_zero());
        Ok(Composite(r))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Exponent)> {
        self.0.iter().map(|(s, e)| (s.as_str(), *e))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pow(&self, p: Exponent) -> Result<Self, UnitError> {
        let terms = self
            .0
            .iter()
            .map(|(s, e)| Ok((s.clone(), (*e * p)?)))
            .collect::<Result<Vec<_>, UnitError>>()?;
        Composite::from_terms(terms)
    }
}

impl Mul<Composite> for Composite {
    type Output = Result<Composite, UnitError>;
    fn mul(self, other: Self) -> Result<Composite, UnitError> {
        Composite::from_terms(self.0.into_iter().chain(other.0))
    }
}

impl Display for Composite {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        let terms = self
            .0
            .iter()
            .map(|(s, e)| match *e == Exponent::ONE {
                true => s.clone(),
                false => format!("{}^{}", s, e),
            })
            .collect::<Vec<_>>();
        write!(f, "{}", terms.join(" "))
    }
}
