/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use super::dimension::Dimensions;
use super::error::UnitError;
use super::exponent::Exponent;
use super::parser::is_symbol;
use super::prefix::SiPrefix;
use super::unit::factors_equal;

lazy_static! {
    static ref CGS: SymbolTable = SymbolTable::build_cgs();
}

/// Dimensions and CGS conversion factor of a known symbol.
#[derive(Serialize, Deserialize, PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct SymbolEntry {
    pub dimensions: Dimensions,
    pub factor: f64,
}

/// A prefixed spelling that is also a symbol of its own, with a
/// different meaning. The plain symbol always wins.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Ambiguity {
    pub spelling: String,
    pub prefix: String,
    pub symbol: String,
}

/// Lookup tables for unit symbols and prefixes.
///
/// Tables are assembled once (the built-in CGS table, or one read
/// from JSON) and only read afterwards.
#[derive(Serialize, Deserialize, PartialEq, Clone, Default, Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct SymbolTable {
    #[serde(default)]
    symbols: BTreeMap<String, SymbolEntry>,
    #[serde(default)]
    prefixes: BTreeMap<String, f64>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in CGS table.
    pub fn cgs() -> &'static SymbolTable {
        &CGS
    }

    pub fn from_json(input: &str) -> Result<Self, UnitError> {
        let table: SymbolTable = serde_json::from_str(input)?;
        table.validate()?;
        log::debug!(
            "loaded symbol table with {} symbols and {} prefixes",
            table.symbols.len(),
            table.prefixes.len()
        );
        table.warn_ambiguities();
        Ok(table)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, UnitError> {
        let path = path.as_ref();
        log::debug!("reading symbol table from {}", path.display());
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn to_json(&self) -> Result<String, UnitError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn symbol(&self, symbol: &str) -> Option<&SymbolEntry> {
        self.symbols.get(symbol)
    }

    pub fn prefix(&self, prefix: &str) -> Option<f64> {
        self.prefixes.get(prefix).copied()
    }

    pub fn symbols(&self) -> impl Iterator<Item = (&str, &SymbolEntry)> {
        self.symbols.iter().map(|(s, e)| (s.as_str(), e))
    }

    pub fn prefixes(&self) -> impl Iterator<Item = (&str, f64)> {
        self.prefixes.iter().map(|(p, m)| (p.as_str(), *m))
    }

    pub fn insert_symbol(
        &mut self,
        symbol: &str,
        dimensions: Dimensions,
        factor: f64,
    ) -> Result<(), UnitError> {
        check_symbol(symbol)?;
        check_factor(factor)?;
        self.symbols
            .insert(symbol.to_string(), SymbolEntry { dimensions, factor });
        Ok(())
    }

    pub fn insert_prefix(
        &mut self,
        prefix: &str,
        multiplier: f64,
    ) -> Result<(), UnitError> {
        check_symbol(prefix)?;
        check_factor(multiplier)?;
        self.prefixes.insert(prefix.to_string(), multiplier);
        Ok(())
    }

    /// Adds all entries of `other`, replacing existing ones.
    pub fn extend(&mut self, other: SymbolTable) {
        self.symbols.extend(other.symbols);
        self.prefixes.extend(other.prefixes);
    }

    pub fn validate(&self) -> Result<(), UnitError> {
        self.symbols.iter().try_for_each(|(s, e)| {
            check_symbol(s)?;
            check_factor(e.factor)
        })?;
        self.prefixes.iter().try_for_each(|(p, m)| {
            check_symbol(p)?;
            check_factor(*m)
        })
    }

    pub fn ambiguities(&self) -> Vec<Ambiguity> {
        let mut r = Vec::new();
        for (symbol, entry) in &self.symbols {
            for (prefix, multiplier) in &self.prefixes {
                let spelling = format!("{}{}", prefix, symbol);
                if let Some(other) = self.symbols.get(&spelling) {
                    if other.dimensions != entry.dimensions
                        || !factors_equal(
                            other.factor,
                            entry.factor * multiplier,
                        )
                    {
                        r.push(Ambiguity {
                            spelling,
                            prefix: prefix.clone(),
                            symbol: symbol.clone(),
                        });
                    }
                }
            }
        }
        r
    }

    fn warn_ambiguities(&self) {
        for a in self.ambiguities() {
            log::warn!(
                "symbol '{}' shadows prefix '{}' applied to '{}'",
                a.spelling,
                a.prefix,
                a.symbol
            );
        }
    }

    fn build_cgs() -> Self {
        let mut table = SymbolTable::new();
        for (symbol, dimensions, factor) in cgs_symbols() {
            table.symbols.insert(
                symbol.to_string(),
                SymbolEntry { dimensions, factor },
            );
        }
        for prefix in SiPrefix::LIST {
            for spelling in prefix.spellings() {
                table
                    .prefixes
                    .insert(spelling.to_string(), prefix.multiplier());
            }
        }
        table
    }
}

fn check_symbol(symbol: &str) -> Result<(), UnitError> {
    match is_symbol(symbol) {
        true => Ok(()),
        false => Err(UnitError::Table(format!("invalid symbol '{}'", symbol))),
    }
}

fn check_factor(factor: f64) -> Result<(), UnitError> {
    match factor.is_finite() && factor > 0.0 {
        true => Ok(()),
        false => Err(UnitError::InvalidFactor(factor)),
    }
}

/* Built-in symbols with their CGS conversion factors. */

fn cgs_symbols() -> Vec<(&'static str, Dimensions, f64)> {
    let gauss = Dimensions::new([
        Exponent::halves(1),
        Exponent::halves(-1),
        Exponent::integer(-1),
        Exponent::ZERO,
    ]);
    vec![
        /* CGS base units. */
        ("g", Dimensions::MASS, 1.0),
        ("cm", Dimensions::LENGTH, 1.0),
        ("s", Dimensions::TIME, 1.0),
        ("K", Dimensions::TEMPERATURE, 1.0),
        /* Other CGS units. */
        ("dyne", Dimensions::FORCE, 1.0),
        ("erg", Dimensions::ENERGY, 1.0),
        ("esu", Dimensions::charge(), 1.0),
        ("gauss", gauss, 1.0),
        ("Hz", Dimensions::RATE, 1.0),
        /* SI units. */
        ("m", Dimensions::LENGTH, 1e2),
        ("J", Dimensions::ENERGY, 1e7),
        ("N", Dimensions::FORCE, 1e5),
        ("W", Dimensions::POWER, 1e7),
        ("Pa", Dimensions::from_integers([1, -1, -2, 0]), 10.0),
        ("eV", Dimensions::ENERGY, 1.602176634e-12),
        /* Times. */
        ("min", Dimensions::TIME, 60.0),
        ("hr", Dimensions::TIME, 3600.0),
        ("day", Dimensions::TIME, 86400.0),
        ("yr", Dimensions::TIME, 31536000.0),
        /* Solar units. */
        ("Msun", Dimensions::MASS, 1.98892e33),
        ("Rsun", Dimensions::LENGTH, 6.96e10),
        ("Lsun", Dimensions::POWER, 3.9e33),
        ("Tsun", Dimensions::TEMPERATURE, 5870.0),
        /* Astronomical distances. */
        ("AU", Dimensions::LENGTH, 1.49598e13),
        ("ly", Dimensions::LENGTH, 9.46053e17),
        ("pc", Dimensions::LENGTH, 3.08568025e18),
        /* Hubble constant. */
        ("H_0", Dimensions::RATE, 2.3e-18),
    ]
}
