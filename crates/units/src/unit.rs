//! Unit values and conversion.

use std::fmt;

use crate::error::UnitError;
use crate::table::UNIT_TABLE;

/// Molar mass ratio CO2 / C.
const CO2_PER_C: f64 = 44.0 / 12.0;

/// Which mass a mass-flux unit counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    /// Mass of carbon.
    Carbon,
    /// Mass of carbon dioxide.
    Co2,
}

/// A recognised unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Mass per year, `10^exponent` grams of `species`.
    MassRate {
        /// Power of ten relative to one gram.
        exponent: i32,
        /// Counted species.
        species: Species,
    },
    /// Relative value in percent.
    Percent,
    /// Relative value as a plain ratio.
    Fraction,
}

impl Unit {
    pub(crate) const fn mass_rate(exponent: i32, species: Species) -> Self {
        Unit::MassRate { exponent, species }
    }

    /// Looks up a unit string in the recognised table.
    ///
    /// Surrounding whitespace is ignored; everything else must match exactly.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::UnknownUnit`] for unrecognised strings.
    pub fn parse(s: &str) -> Result<Self, UnitError> {
        let key = s.trim();
        UNIT_TABLE
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, unit)| *unit)
            .ok_or_else(|| UnitError::UnknownUnit {
                unit: s.to_string(),
            })
    }

    /// Returns `true` for percent and fraction.
    pub fn is_relative(self) -> bool {
        matches!(self, Unit::Percent | Unit::Fraction)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::MassRate { exponent, species } => {
                let prefix = match exponent {
                    0 => "g".to_string(),
                    3 => "kg".to_string(),
                    6 => "Mg".to_string(),
                    9 => "Gg".to_string(),
                    12 => "Tg".to_string(),
                    15 => "Pg".to_string(),
                    e => format!("1e{e} g"),
                };
                let species = match species {
                    Species::Carbon => "C",
                    Species::Co2 => "CO2",
                };
                write!(f, "{prefix} {species} yr-1")
            }
            Unit::Percent => write!(f, "%"),
            Unit::Fraction => write!(f, "1"),
        }
    }
}

/// Multiplicative factor taking a value in `from` to `to`.
///
/// # Errors
///
/// Returns [`UnitError::UnsupportedConversion`] when the units belong to
/// different families (mass rate vs relative).
pub fn conversion_factor(from: Unit, to: Unit) -> Result<f64, UnitError> {
    match (from, to) {
        (
            Unit::MassRate {
                exponent: ef,
                species: sf,
            },
            Unit::MassRate {
                exponent: et,
                species: st,
            },
        ) => {
            let scale = 10f64.powi(ef - et);
            let species = match (sf, st) {
                (Species::Carbon, Species::Co2) => CO2_PER_C,
                (Species::Co2, Species::Carbon) => 1.0 / CO2_PER_C,
                _ => 1.0,
            };
            Ok(scale * species)
        }
        (Unit::Percent, Unit::Percent) | (Unit::Fraction, Unit::Fraction) => Ok(1.0),
        (Unit::Fraction, Unit::Percent) => Ok(100.0),
        (Unit::Percent, Unit::Fraction) => Ok(0.01),
        _ => Err(UnitError::UnsupportedConversion {
            from: from.to_string(),
            to: to.to_string(),
        }),
    }
}

/// What to do with a variable's values on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// Leave values untouched (error-only reads already hold ratios).
    None,
    /// Convert from the declared unit into this one.
    To(Unit),
}

/// Applies `conversion` to `values`, given the declared unit string.
///
/// The declared unit is always validated against the table, even when no
/// conversion is requested, so unknown units never pass through silently.
///
/// # Errors
///
/// Returns [`UnitError::UnknownUnit`] if `declared` is not recognised and
/// [`UnitError::UnsupportedConversion`] if the pair cannot be converted.
pub fn convert_in_place(
    values: &mut [f64],
    declared: &str,
    conversion: Conversion,
) -> Result<Unit, UnitError> {
    let from = Unit::parse(declared)?;
    match conversion {
        Conversion::None => Ok(from),
        Conversion::To(to) => {
            let factor = conversion_factor(from, to).map_err(|_| {
                UnitError::UnsupportedConversion {
                    from: declared.to_string(),
                    to: to.to_string(),
                }
            })?;
            if factor != 1.0 {
                values.iter_mut().for_each(|v| *v *= factor);
            }
            Ok(to)
        }
    }
}
