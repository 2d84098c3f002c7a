/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Metric prefixes known to the default symbol table.
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
pub enum SiPrefix {
    Yocto,
    Zepto,
    Atto,
    Femto,
    Pico,
    Nano,
    Micro,
    Milli,
    Centi,
    Deci,
    Deca,
    Hecto,
    Kilo,
    Mega,
    Giga,
    Tera,
    Peta,
    Exa,
    Zetta,
    Yotta,
}

static SI_PREFIXES: [SiPrefix; 20] = [
    SiPrefix::Yocto,
    SiPrefix::Zepto,
    SiPrefix::Atto,
    SiPrefix::Femto,
    SiPrefix::Pico,
    SiPrefix::Nano,
    SiPrefix::Micro,
    SiPrefix::Milli,
    SiPrefix::Centi,
    SiPrefix::Deci,
    SiPrefix::Deca,
    SiPrefix::Hecto,
    SiPrefix::Kilo,
    SiPrefix::Mega,
    SiPrefix::Giga,
    SiPrefix::Tera,
    SiPrefix::Peta,
    SiPrefix::Exa,
    SiPrefix::Zetta,
    SiPrefix::Yotta,
];

impl SiPrefix {
    pub const LIST: &'static [Self] = &SI_PREFIXES;

    /// Power of ten.
    pub const fn power(&self) -> i32 {
        match self {
            SiPrefix::Yocto => -24,
            SiPrefix::Zepto => -21,
            SiPrefix::Atto => -18,
            SiPrefix::Femto => -15,
            SiPrefix::Pico => -12,
            SiPrefix::Nano => -9,
            SiPrefix::Micro => -6,
            SiPrefix::Milli => -3,
            SiPrefix::Centi => -2,
            SiPrefix::Deci => -1,
            SiPrefix::Deca => 1,
            SiPrefix::Hecto => 2,
            SiPrefix::Kilo => 3,
            SiPrefix::Mega => 6,
            SiPrefix::Giga => 9,
            SiPrefix::Tera => 12,
            SiPrefix::Peta => 15,
            SiPrefix::Exa => 18,
            SiPrefix::Zetta => 21,
            SiPrefix::Yotta => 24,
        }
    }

    /// All accepted spellings; the first one is canonical.
    pub const fn spellings(&self) -> &'static [&'static str] {
        match self {
            SiPrefix::Yocto => &["y"],
            SiPrefix::Zepto => &["z"],
            SiPrefix::Atto => &["a"],
            SiPrefix::Femto => &["f"],
            SiPrefix::Pico => &["p"],
            SiPrefix::Nano => &["n"],
            SiPrefix::Micro => &["µ", "μ", "u"],
            SiPrefix::Milli => &["m"],
            SiPrefix::Centi => &["c"],
            SiPrefix::Deci => &["d"],
            SiPrefix::Deca => &["da"],
            SiPrefix::Hecto => &["h"],
            SiPrefix::Kilo => &["k"],
            SiPrefix::Mega => &["M"],
            SiPrefix::Giga => &["G"],
            SiPrefix::Tera => &["T"],
            SiPrefix::Peta => &["P"],
            SiPrefix::Exa => &["E"],
            SiPrefix::Zetta => &["Z"],
            SiPrefix::Yotta => &["Y"],
        }
    }

    pub fn prefix(&self) -> &'static str {
        self.spellings()[0]
    }

    pub fn multiplier(&self) -> f64 {
        10f64.powi(self.power())
    }
}

impl Display for SiPrefix {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.prefix())
    }
}
