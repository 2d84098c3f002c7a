/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use super::dimension::Dimensions;
use super::error::UnitError;
use super::table::SymbolTable;

/// Dimensions and CGS factor of a (possibly prefixed) symbol.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Resolved {
    pub dimensions: Dimensions,
    pub factor: f64,
}

/// Resolves unit symbols against a symbol table.
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'t> {
    table: &'t SymbolTable,
}

impl Default for Resolver<'static> {
    fn default() -> Self {
        Resolver::new(SymbolTable::cgs())
    }
}

impl<'t> Resolver<'t> {
    pub fn new(table: &'t SymbolTable) -> Self {
        Resolver { table }
    }

    pub fn table(&self) -> &'t SymbolTable {
        self.table
    }

    /// Looks up `token`, first as a plain symbol and then as a prefix
    /// followed by a symbol. When several splits match, the one with
    /// the longest symbol wins.
    pub fn resolve(&self, token: &str) -> Result<Resolved, UnitError> {
        if let Some(entry) = self.table.symbol(token) {
            return Ok(Resolved {
                dimensions: entry.dimensions,
                factor: entry.factor,
            });
        }

        token
            .char_indices()
            .skip(1)
            .find_map(|(i, _)| {
                let (prefix, symbol) = token.split_at(i);
                let multiplier = self.table.prefix(prefix)?;
                let entry = self.table.symbol(symbol)?;
                log::trace!(
                    "resolved '{}' as prefix '{}' on '{}'",
                    token,
                    prefix,
                    symbol
                );
                Some(Resolved {
                    dimensions: entry.dimensions,
                    factor: entry.factor * multiplier,
                })
            })
            .ok_or_else(|| UnitError::UnknownSymbol(token.to_string()))
    }
}
