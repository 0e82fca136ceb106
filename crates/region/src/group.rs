//! Plot groups and their resolution to raw codes.

use std::collections::BTreeSet;

use crate::error::RegionError;
use crate::table::UnionTable;

/// A named aggregation target and the raw codes it sums over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotGroup {
    name: String,
    codes: Vec<String>,
}

impl PlotGroup {
    /// Group consisting of the single raw code `code`.
    pub fn single(code: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            name: code.clone(),
            codes: vec![code],
        }
    }

    /// Group summing over `codes`.
    pub fn union(name: impl Into<String>, codes: Vec<String>) -> Self {
        Self {
            name: name.into(),
            codes,
        }
    }

    /// Group name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member codes, in table order.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Returns `true` if the group is more than a single code.
    pub fn is_union(&self) -> bool {
        self.codes.len() > 1 || self.codes.first().is_some_and(|c| *c != self.name)
    }
}

/// Resolves every name in `names` to a [`PlotGroup`].
///
/// A name found in `unions` resolves to the union's members; otherwise a
/// name found in `known_codes` resolves to itself.
///
/// # Errors
///
/// - [`RegionError::UnknownGroup`] if a name is neither a union nor a known
///   code.
/// - [`RegionError::UnknownCode`] if a union member is not a known code.
pub fn resolve_groups(
    names: &[String],
    unions: &UnionTable,
    known_codes: &BTreeSet<String>,
) -> Result<Vec<PlotGroup>, RegionError> {
    names
        .iter()
        .map(|name| {
            if let Some(members) = unions.get(name) {
                if let Some(missing) = members.iter().find(|c| !known_codes.contains(*c)) {
                    return Err(RegionError::UnknownCode {
                        group: name.clone(),
                        code: missing.clone(),
                    });
                }
                Ok(PlotGroup::union(name.clone(), members.to_vec()))
            } else if known_codes.contains(name) {
                Ok(PlotGroup::single(name.clone()))
            } else {
                Err(RegionError::UnknownGroup {
                    group: name.clone(),
                })
            }
        })
        .collect()
}
