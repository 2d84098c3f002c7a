/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::fs;

use dimensionful::{Dimensions, Resolver, SymbolTable, Unit, UnitError};

const TABLE: &str = r#"{
    "symbols": {
        "furlong": { "dimensions": [0, 1, 0, 0], "factor": 20116.8 },
        "fortnight": { "dimensions": [0, 0, 1, 0], "factor": 1209600.0 },
        "statA": { "dimensions": ["1/2", "3/2", -2, 0], "factor": 1.0 }
    },
    "prefixes": {
        "k": 1000.0
    }
}"#;

#[test]
fn load_from_json() {
    let table = SymbolTable::from_json(TABLE).unwrap();
    let resolver = Resolver::new(&table);

    let speed = Unit::parse_with("kfurlong fortnight^-1", &resolver).unwrap();
    assert_eq!(speed.dimensions(), Dimensions::VELOCITY);
    assert!((speed.factor() / (20116.8e3 / 1209600.0) - 1.0).abs() < 1e-12);

    let current = Unit::parse_with("statA", &resolver).unwrap();
    assert_eq!(
        Ok(current.dimensions()),
        Dimensions::charge() - Dimensions::TIME
    );

    assert_eq!(
        Unit::parse_with("cm", &resolver),
        Err(UnitError::UnknownSymbol("cm".to_string()))
    );
}

#[test]
fn extend_builtin() {
    let mut table = SymbolTable::cgs().clone();
    table.extend(SymbolTable::from_json(TABLE).unwrap());
    let resolver = Resolver::new(&table);

    let speed = Unit::parse_with("furlong fortnight^-1", &resolver).unwrap();
    let cms = Unit::parse_with("cm s^-1", &resolver).unwrap();
    let factor = speed.conversion_factor_to(&cms).unwrap();
    assert!((factor / (20116.8 / 1209600.0) - 1.0).abs() < 1e-12);

    /* The built-in table itself is unchanged. */
    assert!(Unit::parse("furlong").is_err());
}

#[test]
fn load_from_file() {
    let path = std::env::temp_dir().join("dimensionful-table-test.json");
    fs::write(&path, TABLE).unwrap();
    let table = SymbolTable::load(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert!(table.symbol("furlong").is_some());
    assert_eq!(table.prefix("k"), Some(1000.0));

    assert!(matches!(
        SymbolTable::load(std::env::temp_dir().join("dimensionful-missing")),
        Err(UnitError::Io(_))
    ));
}

#[test]
fn rejects_invalid_tables() {
    assert_eq!(
        SymbolTable::from_json(
            r#"{ "symbols": { "x": { "dimensions": [0, 1, 0, 0],
                                     "factor": 0.0 } } }"#
        ),
        Err(UnitError::InvalidFactor(0.0))
    );
    assert!(matches!(
        SymbolTable::from_json(
            r#"{ "symbols": { "x": { "dimensions": [0, 1, 0],
                                     "factor": 1.0 } } }"#
        ),
        Err(UnitError::Json(_))
    ));
    assert!(matches!(
        SymbolTable::from_json(r#"{ "prefixes": { "k m": 1000.0 } }"#),
        Err(UnitError::Table(_))
    ));
}

#[test]
fn json_round_trip() {
    let cgs = SymbolTable::cgs();
    let table = SymbolTable::from_json(&cgs.to_json().unwrap()).unwrap();
    assert_eq!(table.symbols().count(), cgs.symbols().count());
    assert_eq!(table.prefixes().count(), cgs.prefixes().count());
    for (symbol, entry) in cgs.symbols() {
        let loaded = table.symbol(symbol).unwrap();
        assert_eq!(loaded.dimensions, entry.dimensions);
        assert!((loaded.factor / entry.factor - 1.0).abs() < 1e-15);
    }
}
