//! Built-in and caller-defined country unions.

use std::collections::BTreeMap;

use crate::error::RegionError;

const EU27: &[&str] = &[
    "AUT", "BEL", "BGR", "HRV", "CYP", "CZE", "DNK", "EST", "FIN", "FRA", "DEU", "GRC", "HUN",
    "IRL", "ITA", "LVA", "LTU", "LUX", "MLT", "NLD", "POL", "PRT", "ROU", "SVK", "SVN", "ESP",
    "SWE",
];

const EU27_UK: &[&str] = &[
    "AUT", "BEL", "BGR", "HRV", "CYP", "CZE", "DNK", "EST", "FIN", "FRA", "DEU", "GRC", "HUN",
    "IRL", "ITA", "LVA", "LTU", "LUX", "MLT", "NLD", "POL", "PRT", "ROU", "SVK", "SVN", "ESP",
    "SWE", "GBR",
];

/// Well-known multi-country unions, by plot-group name.
pub const BUILTIN_UNIONS: &[(&str, &[&str])] = &[
    ("Baltic countries", &["EST", "LTU", "LVA"]),
    ("BLT", &["EST", "LTU", "LVA"]),
    ("Benelux", &["BEL", "NLD", "LUX"]),
    ("BNL", &["BEL", "NLD", "LUX"]),
    ("FMA", &["FRA", "AND"]),
    ("IBE", &["ESP", "PRT"]),
    ("UKI", &["GBR", "IRL"]),
    ("CSK", &["CZE", "SVK"]),
    ("DSF", &["DNK", "SWE", "FIN"]),
    ("EU27", EU27),
    ("EU27+UK", EU27_UK),
];

/// Union name to ordered member codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnionTable {
    unions: BTreeMap<String, Vec<String>>,
}

impl UnionTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table pre-filled with [`BUILTIN_UNIONS`].
    pub fn builtin() -> Self {
        let unions = BUILTIN_UNIONS
            .iter()
            .map(|(name, codes)| {
                (
                    name.to_string(),
                    codes.iter().map(|c| c.to_string()).collect(),
                )
            })
            .collect();
        Self { unions }
    }

    /// Adds a union, replacing any existing one of the same name.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::EmptyUnion`] if `codes` is empty.
    pub fn insert(&mut self, name: impl Into<String>, codes: Vec<String>) -> Result<(), RegionError> {
        let name = name.into();
        if codes.is_empty() {
            return Err(RegionError::EmptyUnion { name });
        }
        if let Some(old) = self.unions.insert(name.clone(), codes) {
            tracing::debug!(union = %name, replaced = ?old, "union overridden");
        }
        Ok(())
    }

    /// Member codes of union `name`.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.unions.get(name).map(Vec::as_slice)
    }

    /// Number of unions.
    pub fn len(&self) -> usize {
        self.unions.len()
    }

    /// Returns `true` if the table holds no unions.
    pub fn is_empty(&self) -> bool {
        self.unions.is_empty()
    }

    /// Unions in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.unions.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_expected_members() {
        let t = UnionTable::builtin();
        assert_eq!(t.get("FMA").unwrap(), ["FRA", "AND"]);
        assert_eq!(t.get("Baltic countries"), t.get("BLT"));
        assert_eq!(t.get("EU27").unwrap().len(), 27);
        assert_eq!(t.get("EU27+UK").unwrap().len(), 28);
        assert!(t.get("FRA").is_none());
    }

    #[test]
    fn eu27_uk_extends_eu27() {
        let t = UnionTable::builtin();
        let eu = t.get("EU27").unwrap();
        let euuk = t.get("EU27+UK").unwrap();
        assert!(eu.iter().all(|c| euuk.contains(c)));
        assert!(euuk.contains(&"GBR".to_string()));
        assert!(!eu.contains(&"GBR".to_string()));
    }

    #[test]
    fn insert_overrides() {
        let mut t = UnionTable::builtin();
        t.insert("FMA", vec!["FRA".into(), "AND".into(), "MCO".into()])
            .unwrap();
        assert_eq!(t.get("FMA").unwrap().len(), 3);
    }

    #[test]
    fn insert_rejects_empty() {
        let mut t = UnionTable::new();
        assert!(matches!(
            t.insert("void", vec![]),
            Err(RegionError::EmptyUnion { .. })
        ));
        assert!(t.is_empty());
    }
}
