/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

pub mod composite;
pub mod constants;
pub mod dimension;
pub mod error;
pub mod exponent;
pub mod parser;
pub mod payload;
pub mod prefix;
pub mod quantity;
pub mod resolver;
pub mod table;
pub mod unit;
pub mod unit_spec;

pub use composite::Composite;
pub use dimension::{BaseDimension, Dimensions, NUM_BASE};
pub use error::UnitError;
pub use exponent::Exponent;
pub use parser::{parse_quantity, parse_terms, parse_unit, Term};
pub use payload::Payload;
pub use prefix::SiPrefix;
pub use quantity::Quantity;
pub use resolver::{Resolved, Resolver};
pub use table::{Ambiguity, SymbolEntry, SymbolTable};
pub use unit::{Unit, FACTOR_TOLERANCE};
pub use unit_spec::UnitSpec;
