//! Named units of measure and the quantities they belong to.
//!
//! The catalog (names, factors, descriptions) is lifted from PROJ's
//! `units.c` table, grouped here by [`Quantity`] instead of being split
//! across separate per-kind arrays, since the planner needs to ask "can
//! I convert from this unit to that one" without caring which kind it
//! parses into.

use crate::error::Error;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The dimension a [`Unit`] measures. Two units only convert between each
/// other when they share a `Quantity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    Length,
    Angle,
    Scale,
    Unitless,
}

/// A named unit of measure: a multiplicative factor onto the quantity's
/// SI-ish base unit (meters for length, radians for angle, dimensionless
/// for scale).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    name: &'static str,
    description: &'static str,
    quantity: Quantity,
    to_base: f64,
}

impl Unit {
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        self.description
    }

    #[must_use]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    #[must_use]
    pub fn to_base(&self) -> f64 {
        self.to_base
    }

    /// Look up a unit by name, e.g. `"m"`, `"us-ft"`, `"deg"`.
    pub fn named(name: &str) -> Result<Unit, Error> {
        CATALOG
            .get(name)
            .copied()
            .ok_or_else(|| Error::InvalidParameter(format!("unknown unit '{name}'")))
    }

    /// Convert a value expressed in `self` into the equivalent value
    /// expressed in `target`. `NaN` propagates unconverted, per the
    /// Point data model's `NaN`-is-inert convention.
    pub fn convert(&self, value: f64, target: &Unit) -> Result<f64, Error> {
        if value.is_nan() {
            return Ok(value);
        }
        if self.quantity != target.quantity {
            return Err(Error::UnknownUnitQuantity {
                from: self.name.to_string(),
                to: target.name.to_string(),
            });
        }
        Ok(value * self.to_base / target.to_base)
    }
}

const fn u(name: &'static str, description: &'static str, quantity: Quantity, to_base: f64) -> Unit {
    Unit {
        name,
        description,
        quantity,
        to_base,
    }
}

#[rustfmt::skip]
const LINEAR: [Unit; 13] = [
    u("km",     "Kilometer",                    Quantity::Length, 1000.0),
    u("m",      "Meter",                        Quantity::Length, 1.0),
    u("dm",     "Decimeter",                    Quantity::Length, 0.1),
    u("cm",     "Centimeter",                   Quantity::Length, 0.01),
    u("mm",     "Millimeter",                   Quantity::Length, 0.001),
    u("kmi",    "International Nautical Mile",  Quantity::Length, 1852.0),
    u("in",     "International Inch",           Quantity::Length, 0.0254),
    u("ft",     "International Foot",           Quantity::Length, 0.3048),
    u("yd",     "International Yard",           Quantity::Length, 0.9144),
    u("mi",     "International Statute Mile",   Quantity::Length, 1609.344),
    u("fath",   "International Fathom",         Quantity::Length, 1.8288),
    u("us-ft",  "U.S. Surveyor's Foot",         Quantity::Length, 1200.0 / 3937.0),
    u("us-yd",  "U.S. Surveyor's Yard",         Quantity::Length, 3600.0 / 3937.0),
];

#[rustfmt::skip]
const ANGULAR: [Unit; 3] = [
    u("rad",  "Radian", Quantity::Angle, 1.0),
    u("deg",  "Degree", Quantity::Angle, std::f64::consts::PI / 180.0),
    u("grad", "Grad",   Quantity::Angle, std::f64::consts::PI / 200.0),
];

#[rustfmt::skip]
const SCALE: [Unit; 2] = [
    u("unity", "Unity",     Quantity::Scale, 1.0),
    u("ppm",   "Part per million", Quantity::Scale, 1.0e-6),
];

const UNITLESS: Unit = u("unitless", "Unitless", Quantity::Unitless, 1.0);

static CATALOG: Lazy<HashMap<&'static str, Unit>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for unit in LINEAR.iter().chain(ANGULAR.iter()).chain(SCALE.iter()) {
        map.entry(unit.name).or_insert(*unit);
    }
    map.insert(UNITLESS.name, UNITLESS);
    map
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feet_to_meters() -> Result<(), Error> {
        let ft = Unit::named("ft")?;
        let m = Unit::named("m")?;
        assert!((ft.convert(1.0, &m)? - 0.3048).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn degrees_to_radians() -> Result<(), Error> {
        let deg = Unit::named("deg")?;
        let rad = Unit::named("rad")?;
        assert!((deg.convert(180.0, &rad)? - std::f64::consts::PI).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn incompatible_quantities_fail() {
        let m = Unit::named("m").unwrap();
        let deg = Unit::named("deg").unwrap();
        assert!(m.convert(1.0, &deg).is_err());
    }

    #[test]
    fn nan_propagates_unconverted() -> Result<(), Error> {
        let m = Unit::named("m")?;
        let ft = Unit::named("ft")?;
        assert!(m.convert(f64::NAN, &ft)?.is_nan());
        Ok(())
    }

    #[test]
    fn unknown_unit_errors() {
        assert!(Unit::named("bogus").is_err());
    }
}
