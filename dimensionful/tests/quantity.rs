/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use dimensionful::constants::GRAVITATIONAL_CONSTANT;
use dimensionful::{Dimensions, Quantity, Unit, UnitError};

const PC: f64 = 3.08568025e18;

fn close(a: f64, b: f64, rel: f64) -> bool {
    ((a - b) / b).abs() < rel
}

fn q(value: f64, unit: &str) -> Quantity {
    Quantity::new(value, unit).unwrap()
}

fn unit(s: &str) -> Unit {
    Unit::parse(s).unwrap()
}

#[test]
fn creation() {
    let u1 = unit("Mpc");
    let q1 = Quantity::with_unit(1.0, u1.clone());
    assert_eq!(q1.0, 1.0);
    assert_eq!(q1.1, u1);
    assert_eq!(q(1.0, "Mpc"), q1);
    assert_eq!(Quantity::parse("1 Mpc").unwrap(), q1);
    assert_eq!(
        Quantity::new(1.0, "aaa"),
        Err(UnitError::UnknownSymbol("aaa".to_string()))
    );
}

#[test]
fn string_representation() {
    let q1 = q(1.0, "Mpc yr^-1");
    assert_eq!(q1.to_string(), "1 Mpc yr^-1");
}

#[test]
fn convert_to() {
    let u1 = unit("g * cm**-3");
    let u2 = unit("Msun * Mpc**-3");
    let q1 = Quantity::with_unit(1e-29, u1.clone());

    let q2 = q1.convert_to(&u2).unwrap();
    assert!(close(q2.0, 1.47721e11, 1e-4));
    assert_eq!(q2.1, u2);
    /* The receiver is left untouched. */
    assert_eq!(q1.0, 1e-29);
    assert_eq!(q1.1, u1);

    assert!(close(q1.value_in(&u2).unwrap(), 1.47721e11, 1e-4));
}

#[test]
fn convert_round_trip() {
    let q1 = q(42.0, "km hr^-1");
    let back = q1
        .convert_to(&unit("pc yr^-1"))
        .unwrap()
        .convert_to(q1.unit())
        .unwrap();
    assert!(close(back.0, 42.0, 1e-12));
    assert_eq!(back.1, q1.1);
}

#[test]
fn convert_bad_dimensions() {
    let q1 = q(1e-29, "g * cm**-3");
    assert_eq!(
        q1.convert_to(&unit("Msun * Mpc**-2")),
        Err(UnitError::Incompatible(
            Dimensions::MASS_DENSITY,
            Dimensions::from_integers([1, -2, 0, 0])
        ))
    );
}

#[test]
fn convert_to_base() {
    let q1 = q(1.47721e11, "Msun * Mpc**-3");
    let q2 = q1.convert_to_base();
    assert!(close(q2.0, 1e-29, 1e-4));
    assert_eq!(q2.1, unit("g * cm**-3"));
    assert_eq!(q2.convert_to_base(), q2);
    assert_eq!(q1.value_in_base(), q2.0);
}

#[test]
fn equality() {
    let q1 = q(1.0, "g * cm * s * K");
    let q2 = q(1.0, "g * cm * s * K");
    let q3 = q(1.0, "kg * cm * ms * K");
    let q4 = q(1.0 * 1e3, "g * cm * s * mK");

    assert!(q1.approx_eq(&q2).unwrap());
    assert!(q2.approx_eq(&q3).unwrap());
    assert!(q3.approx_eq(&q4).unwrap());

    let q5 = q(1.0, "g * cm * K");
    assert!(q1.approx_eq(&q5).is_err());
}

#[test]
fn addition() {
    let q1 = q(1.0, "cm * s**-1");
    let q2 = q(2.0, "cm * s**-1");
    let q3 = q(3.0, "cm * s**-1");
    let q4 = q(1.0, "cm");
    let q5 = q(1.0, "km * hr**-1");
    let q6 = q(0.01 + 1e3 / 3600.0, "m * s**-1");
    let q7 = Quantity::dimensionless(1.0);
    let q8 = Quantity::dimensionless(2.0);

    assert_eq!((&q1 + &q2).unwrap(), q3);
    assert_eq!((&q2 + &q1).unwrap(), q3);

    assert!((&q1 + &q5).unwrap().approx_eq(&q6).unwrap());
    assert!((&q5 + &q1).unwrap().approx_eq(&q6).unwrap());
    assert_eq!((&q5 + &q1).unwrap().1, q5.1);

    assert_eq!((q7 + Quantity::dimensionless(1.0)).unwrap(), q8);

    assert!(matches!(&q1 + &q4, Err(UnitError::Incompatible(_, _))));
}

#[test]
fn subtraction() {
    let q1 = q(3.0, "cm * s**-1");
    let q2 = q(1.0, "cm * s**-1");
    let q3 = q(2.0, "cm * s**-1");
    let q4 = q(1.0, "cm");
    let q5 = q(1.0, "km * hr**-1");
    let q6 = q(0.01 - 1e3 / 3600.0, "m * s**-1");

    assert_eq!((&q1 - &q2).unwrap(), q3);
    assert_eq!((-q2.clone() + q1.clone()).unwrap(), q3);

    assert!((&q2 - &q5).unwrap().approx_eq(&q6).unwrap());
    assert!((-q5.clone() + q2.clone()).unwrap().approx_eq(&q6).unwrap());

    assert!((&q1 - &q4).is_err());
}

#[test]
fn multiplication() {
    let u1 = unit("g * cm**2 * s**-3 * K");
    let q1 = q(2.0, "g * cm**2 * s**-3 * K");
    let q2 = q(3.0, "g * cm**-2 * s**-1 * K");
    let q3 = q(6.0, "g**2 * s**-4 * K**2");
    let q4 = q(5.0, "pc cm^-1 K^-1");
    let q5 = q(2.0 * 5.0, "g * pc * cm * s**(-3)");
    let q6 = q(2.0 * 5.0 * PC, "g * cm**2 * s**-3");

    assert!((&q1 * &q2).unwrap().approx_eq(&q3).unwrap());
    assert!((&q2 * &q1).unwrap().approx_eq(&q3).unwrap());

    assert!((&q1 * &q4).unwrap().approx_eq(&q5).unwrap());
    assert!((&q4 * &q1).unwrap().approx_eq(&q5).unwrap());
    assert!((&q1 * &q4).unwrap().approx_eq(&q6).unwrap());
    assert!((&q4 * &q1).unwrap().approx_eq(&q6).unwrap());

    let q7 = q1.clone() * 3.0;
    assert_eq!(q7.0, 6.0);
    assert_eq!(q7.1, u1);
    let q8 = 3.0 * &q1;
    assert_eq!(q8.0, 6.0);
    assert_eq!(q8.1, u1);
}

#[test]
fn division() {
    let u1 = unit("g * cm**2 * s**-3 * K");
    let q1 = q(2.0, "g * cm**2 * s**-3 * K");
    let q2 = q(3.0, "g * cm**-2 * s**-1 * K");
    let q3 = q(2.0 / 3.0, "cm**4 * s**-2");
    let q4 = q(5.0, "pc cm^-1 K");
    let q5 = q(2.0 / 5.0, "g * cm**3 * pc^-1 * s**(-3)");
    let q6 = q(2.0 / 5.0 / PC, "g * cm**2 * s**-3");

    assert!((&q1 / &q2).unwrap().approx_eq(&q3).unwrap());
    assert!((&q1 / &q4).unwrap().approx_eq(&q5).unwrap());
    assert!((&q1 / &q4).unwrap().approx_eq(&q6).unwrap());

    let q8 = (q1.clone() / 3.0).unwrap();
    assert!(close(q8.0, 2.0 / 3.0, 1e-15));
    assert_eq!(q8.1, u1);

    assert_eq!(&q1 / &q(0.0, "s"), Err(UnitError::DivisionByZero));

    let q9 = (3.0 / &q1).unwrap();
    assert_eq!(q9.0, 3.0 / 2.0);
    assert_eq!(q9.1, u1.pow(-1).unwrap());
    assert_eq!(3.0 / q(0.0, "s"), Err(UnitError::DivisionByZero));
}

#[test]
fn scalar_addition() {
    let q7 = Quantity::dimensionless(1.0);
    let q8 = Quantity::dimensionless(2.0);

    assert_eq!((&q7 + 1.0).unwrap(), q8);
    assert_eq!((1.0 + &q7).unwrap(), q8);
    assert_eq!((&q8 - 1.0).unwrap(), q7);
    assert_eq!((-1.0 + q8.clone()).unwrap(), q7);
    assert_eq!((3.0 - &q8).unwrap(), q7);

    /* Dimensionless units with a factor take the number in base
     * units. */
    let ratio = q(1.0, "km m^-1");
    let sum = (&ratio + 1000.0).unwrap();
    assert!(close(sum.0, 2.0, 1e-12));
    assert_eq!(sum.1, ratio.1);

    let speed = q(1.0, "cm * s**-1");
    assert_eq!(
        &speed + 1.0,
        Err(UnitError::Incompatible(
            Dimensions::VELOCITY,
            Dimensions::DIMENSIONLESS
        ))
    );
    assert!((&speed - 1.0).is_err());
    assert!((1.0 - &speed).is_err());
}

#[test]
fn equality_across_units() {
    assert_eq!(q(100.0, "cm"), q(1.0, "m"));
    assert_eq!(q(1.0, "km hr^-1"), q(1e5 / 3600.0, "cm s^-1"));
    assert_ne!(q(100.0, "cm"), q(1.0, "km"));
    assert_ne!(q(1.0, "cm"), q(1.0, "g"));
}

#[test]
fn factor_out_of_range() {
    assert_eq!(
        Quantity::new(1.0, "Msun^10"),
        Err(UnitError::InvalidFactor(f64::INFINITY))
    );
    let msun = q(1.0, "Msun^5");
    assert!((&msun * &msun).is_err());
    assert!(msun.pow(2).is_err());
}

#[test]
fn pow() {
    let side = q(3.0, "km");
    let area = side.pow(2).unwrap();
    assert_eq!(area.0, 9.0);
    assert_eq!(area.1, unit("km^2"));
    let back = area.powf(0.5).unwrap();
    assert!(back.approx_eq(&side).unwrap());
}

#[test]
fn comparison() {
    let a = q(1.0, "pc");
    let b = q(3.0, "ly");
    assert_eq!(a.partial_cmp(&b), Ok(Some(std::cmp::Ordering::Greater)));
    assert_eq!(b.partial_cmp(&a), Ok(Some(std::cmp::Ordering::Less)));
    assert!(a.partial_cmp(&q(1.0, "g")).is_err());
    assert_eq!(q(-2.0, "cm").abs().0, 2.0);
}

#[test]
fn gravity() {
    let m1 = q(5.9742e27, "g");
    let m2 = q(1.98892e33, "g");
    let r = q(1.496e13, "cm");

    let force = (&(&*GRAVITATIONAL_CONSTANT * &m1).unwrap() * &m2)
        .and_then(|f| f / r.pow(2)?)
        .unwrap();

    assert_eq!(force.dimensions(), Dimensions::FORCE);
    let expected = 6.673e-8 * 5.9742e27 * 1.98892e33 / 1.496e13f64.powi(2);
    assert!(close(force.value_in_base(), expected, 1e-12));
}

#[test]
fn binary_period() {
    let period = q(2.49, "day");
    let dp = q(20.0, "s");
    let dt = q(100.0, "yr");
    let m1 = q(2.9, "Msun");
    let m2 = q(1.4, "Msun");

    let numer = ((&dp * &m1).unwrap() * m2.clone()).unwrap();
    let spread = (&m1 - &m2).unwrap();
    let denom = (((period * 3.0) * dt).unwrap() * spread).unwrap();
    let mdot = (numer / denom)
        .unwrap()
        .convert_to(&unit("Msun yr^-1"))
        .unwrap();

    assert!(close(mdot.0, 8.38745930223e-07, 1e-9));
    assert_eq!(mdot.to_string().split(' ').nth(1), Some("Msun"));
}

#[test]
fn array_payloads() {
    let a = Quantity::new(vec![1.0, 2.0, 3.0], "km").unwrap();
    let b = Quantity::new(vec![100.0], "m").unwrap();

    let sum = (&a + &b).unwrap();
    assert_eq!(sum.1, unit("km"));
    assert!(sum
        .0
        .iter()
        .zip([1.1, 2.1, 3.1])
        .all(|(x, y)| close(*x, y, 1e-12)));

    let cm = a.convert_to(&unit("cm")).unwrap();
    assert_eq!(cm.0, vec![1e5, 2e5, 3e5]);

    let c = Quantity::new(vec![1.0, 2.0], "km").unwrap();
    assert_eq!(&a + &c, Err(UnitError::Shape(3, 2)));

    let t = Quantity::new(vec![2.0, 0.0, 1.0], "s").unwrap();
    assert_eq!(&a / &t, Err(UnitError::DivisionByZero));
}
