/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

//! Physical constants in CGS units.

use std::f64::consts::PI;

use lazy_static::lazy_static;

use super::dimension::Dimensions;
use super::quantity::Quantity;
use super::unit::Unit;

fn cgs(value: f64, dimensions: [i32; 4]) -> Quantity {
    Quantity(value, Unit::base(Dimensions::from_integers(dimensions)))
}

lazy_static! {
    /// Speed of light in vacuum.
    pub static ref SPEED_OF_LIGHT: Quantity =
        cgs(2.99792458e10, [0, 1, -1, 0]);
    /// Newton's gravitational constant.
    pub static ref GRAVITATIONAL_CONSTANT: Quantity =
        cgs(6.673e-8, [-1, 3, -2, 0]);
    pub static ref BOLTZMANN: Quantity = cgs(1.38064e-16, [1, 2, -2, -1]);
    pub static ref PLANCK: Quantity = cgs(6.626070e-27, [1, 2, -1, 0]);
    /// Planck's constant divided by 2π.
    pub static ref REDUCED_PLANCK: Quantity =
        cgs(6.626070e-27 / (2.0 * PI), [1, 2, -1, 0]);
    /// Elementary charge (Gaussian units).
    pub static ref ELEMENTARY_CHARGE: Quantity =
        Quantity(
            4.8032068e-10,
            Unit::base(Dimensions::charge()).with_symbol("esu"),
        );
    pub static ref PROTON_MASS: Quantity = cgs(1.672623e-24, [1, 0, 0, 0]);
    pub static ref ELECTRON_MASS: Quantity = cgs(9.109389e-28, [1, 0, 0, 0]);
    pub static ref ATOMIC_MASS_UNIT: Quantity =
        cgs(1.6605402e-24, [1, 0, 0, 0]);
    /// Thomson scattering cross-section.
    pub static ref THOMSON_CROSS_SECTION: Quantity =
        cgs(6.6524588e-25, [0, 2, 0, 0]);
    pub static ref STEFAN_BOLTZMANN: Quantity =
        cgs(5.67e-5, [1, 0, -3, -4]);
    /// Radiation density constant.
    pub static ref RADIATION_CONSTANT: Quantity =
        cgs(7.5657e-15, [1, -1, -2, -4]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions() {
        assert_eq!(SPEED_OF_LIGHT.dimensions(), Dimensions::VELOCITY);
        assert_eq!(
            (&*GRAVITATIONAL_CONSTANT * &*PROTON_MASS)
                .unwrap()
                .dimensions(),
            Dimensions::from_integers([0, 3, -2, 0])
        );
        assert!(BOLTZMANN.to_string().ends_with(" g cm^2 s^-2 K^-1"));
        assert_eq!(BOLTZMANN.1, Unit::parse("erg K^-1").unwrap());
        assert_eq!(
            GRAVITATIONAL_CONSTANT.1,
            Unit::parse("cm^3 g^-1 s^-2").unwrap()
        );
        assert_eq!(ELEMENTARY_CHARGE.1, Unit::parse("esu").unwrap());
        assert_eq!(ELEMENTARY_CHARGE.1.to_string(), "esu");
        assert!(REDUCED_PLANCK.0 < PLANCK.0);
        assert_eq!(
            (Dimensions::ENERGY - Dimensions::VOLUME).and_then(|d| {
                d + Dimensions::from_integers([0, 0, 0, -4])
            }),
            Ok(RADIATION_CONSTANT.dimensions())
        );
    }
}
