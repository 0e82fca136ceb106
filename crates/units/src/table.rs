//! Recognised unit strings.

use crate::unit::{Species, Unit};

/// Every accepted spelling, mapped onto its unit.
///
/// Mass exponents are relative to one gram.
pub(crate) const UNIT_TABLE: &[(&str, Unit)] = &[
    // carbon mass per year
    ("g C yr-1", Unit::mass_rate(0, Species::Carbon)),
    ("gC/yr", Unit::mass_rate(0, Species::Carbon)),
    ("kg C yr-1", Unit::mass_rate(3, Species::Carbon)),
    ("kgC/yr", Unit::mass_rate(3, Species::Carbon)),
    ("t C yr-1", Unit::mass_rate(6, Species::Carbon)),
    ("Mg C yr-1", Unit::mass_rate(6, Species::Carbon)),
    ("kt C yr-1", Unit::mass_rate(9, Species::Carbon)),
    ("Gg C yr-1", Unit::mass_rate(9, Species::Carbon)),
    ("Mt C yr-1", Unit::mass_rate(12, Species::Carbon)),
    ("Tg C yr-1", Unit::mass_rate(12, Species::Carbon)),
    ("TgC/yr", Unit::mass_rate(12, Species::Carbon)),
    ("Gt C yr-1", Unit::mass_rate(15, Species::Carbon)),
    ("Pg C yr-1", Unit::mass_rate(15, Species::Carbon)),
    ("PgC/yr", Unit::mass_rate(15, Species::Carbon)),
    // CO2 mass per year
    ("g CO2 yr-1", Unit::mass_rate(0, Species::Co2)),
    ("kg CO2 yr-1", Unit::mass_rate(3, Species::Co2)),
    ("t CO2 yr-1", Unit::mass_rate(6, Species::Co2)),
    ("Mg CO2 yr-1", Unit::mass_rate(6, Species::Co2)),
    ("kt CO2 yr-1", Unit::mass_rate(9, Species::Co2)),
    ("Gg CO2 yr-1", Unit::mass_rate(9, Species::Co2)),
    ("Mt CO2 yr-1", Unit::mass_rate(12, Species::Co2)),
    ("Tg CO2 yr-1", Unit::mass_rate(12, Species::Co2)),
    ("Gt CO2 yr-1", Unit::mass_rate(15, Species::Co2)),
    ("Pg CO2 yr-1", Unit::mass_rate(15, Species::Co2)),
    // relative
    ("%", Unit::Percent),
    ("percent", Unit::Percent),
    ("1", Unit::Fraction),
    ("fraction", Unit::Fraction),
];

/// All recognised unit spellings, in table order.
pub fn recognised_units() -> impl Iterator<Item = &'static str> {
    UNIT_TABLE.iter().map(|(name, _)| *name)
}
