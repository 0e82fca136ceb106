//! Series metadata and the name registry.

use std::collections::BTreeMap;

use crate::error::FluxError;
use crate::kind::SeriesKind;

/// Metadata of one named data source ("simulation").
///
/// Created when the source is read, mutated in place by later stages (the
/// correction pass rewrites the display label), never removed; hidden
/// series are only marked not-to-display.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesMeta {
    name: String,
    kind: SeriesKind,
    flip_sign: bool,
    production: bool,
    display: bool,
    display_name: Option<String>,
    correct: bool,
    required: bool,
}

impl SeriesMeta {
    /// Creates metadata with defaults: no sign flip, production, displayed,
    /// not corrected, not required.
    pub fn new(name: impl Into<String>, kind: SeriesKind) -> Self {
        Self {
            name: name.into(),
            kind,
            flip_sign: false,
            production: true,
            display: true,
            display_name: None,
            correct: false,
            required: false,
        }
    }

    /// Sets whether values are sign-flipped on read.
    pub fn with_flip_sign(mut self, flip: bool) -> Self {
        self.flip_sign = flip;
        self
    }

    /// Sets the production (as opposed to illustrative) flag.
    pub fn with_production(mut self, production: bool) -> Self {
        self.production = production;
        self
    }

    /// Sets whether the series is displayed and exported.
    pub fn with_display(mut self, display: bool) -> Self {
        self.display = display;
        self
    }

    /// Sets the display label.
    pub fn with_display_name(mut self, label: impl Into<String>) -> Self {
        self.display_name = Some(label.into());
        self
    }

    /// Flags the series for the correction pass.
    pub fn with_correct(mut self, correct: bool) -> Self {
        self.correct = correct;
        self
    }

    /// Marks the series as required to hold data after aggregation.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Unique series name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Series kind.
    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    /// Whether values are sign-flipped on read.
    pub fn flip_sign(&self) -> bool {
        self.flip_sign
    }

    /// Production (true) or illustrative (false).
    pub fn production(&self) -> bool {
        self.production
    }

    /// Whether the series is displayed.
    pub fn display(&self) -> bool {
        self.display
    }

    /// Display label, falling back to the name.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Replaces the display label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.display_name = Some(label.into());
    }

    /// Whether the correction pass applies to this series.
    pub fn correct(&self) -> bool {
        self.correct
    }

    /// Whether an all-NaN result is fatal for this series.
    pub fn required(&self) -> bool {
        self.required
    }
}

/// Ordered set of series with name lookup.
///
/// Position in the registry is the series' index in the tensor.
#[derive(Debug, Clone, Default)]
pub struct SeriesRegistry {
    series: Vec<SeriesMeta>,
    index: BTreeMap<String, usize>,
}

impl SeriesRegistry {
    /// Builds a registry, rejecting duplicate names.
    ///
    /// # Errors
    ///
    /// Returns [`FluxError::DuplicateSeries`] if a name appears twice.
    pub fn new(series: Vec<SeriesMeta>) -> Result<Self, FluxError> {
        let mut index = BTreeMap::new();
        for (i, s) in series.iter().enumerate() {
            if index.insert(s.name().to_string(), i).is_some() {
                return Err(FluxError::DuplicateSeries {
                    name: s.name().to_string(),
                });
            }
        }
        Ok(Self { series, index })
    }

    /// Number of series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns `true` if no series are registered.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Tensor index of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`FluxError::UnknownSeries`] if the name is not registered.
    pub fn index_of(&self, name: &str) -> Result<usize, FluxError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| FluxError::UnknownSeries {
                name: name.to_string(),
            })
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Metadata at tensor index `idx`.
    pub fn get(&self, idx: usize) -> Option<&SeriesMeta> {
        self.series.get(idx)
    }

    /// Mutable metadata at tensor index `idx`.
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut SeriesMeta> {
        self.series.get_mut(idx)
    }

    /// Name of the series at `idx`, or `"?"` if out of range.
    pub fn name_at(&self, idx: usize) -> &str {
        self.series.get(idx).map_or("?", |s| s.name())
    }

    /// Iterates metadata in tensor order.
    pub fn iter(&self) -> impl Iterator<Item = &SeriesMeta> {
        self.series.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let m = SeriesMeta::new("UNFCCC", SeriesKind::Inventory);
        assert!(m.display());
        assert!(m.production());
        assert!(!m.flip_sign());
        assert!(!m.correct());
        assert!(!m.required());
        assert_eq!(m.label(), "UNFCCC");
    }

    #[test]
    fn label_override() {
        let mut m = SeriesMeta::new("UNFCCC", SeriesKind::Inventory)
            .with_display_name("UNFCCC LULUCF");
        assert_eq!(m.label(), "UNFCCC LULUCF");
        m.set_label("UNFCCC LULUCF (net)");
        assert_eq!(m.label(), "UNFCCC LULUCF (net)");
    }

    #[test]
    fn registry_lookup() {
        let reg = SeriesRegistry::new(vec![
            SeriesMeta::new("A", SeriesKind::Other),
            SeriesMeta::new("B", SeriesKind::TopDown),
        ])
        .unwrap();
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.index_of("B").unwrap(), 1);
        assert_eq!(reg.name_at(0), "A");
        assert_eq!(reg.name_at(9), "?");
        assert!(matches!(
            reg.index_of("C"),
            Err(FluxError::UnknownSeries { .. })
        ));
    }

    #[test]
    fn registry_rejects_duplicates() {
        let err = SeriesRegistry::new(vec![
            SeriesMeta::new("A", SeriesKind::Other),
            SeriesMeta::new("A", SeriesKind::TopDown),
        ])
        .unwrap_err();
        assert_eq!(err, FluxError::DuplicateSeries { name: "A".into() });
    }
}
