use crate::literal::LiteralError;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Why a single record was degraded or dropped during normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WarningKind {
    /// The resource has no `name` and is dropped.
    MissingName,
    /// A literal could not be converted, the field is left empty.
    InvalidLiteral {
        property: &'static str,
        error: LiteralError,
    },
}

impl WarningKind {
    /// A stable code used to aggregate warnings in the dataset statistics.
    pub fn code(&self) -> &'static str {
        match self {
            WarningKind::MissingName => "missing_name",
            WarningKind::InvalidLiteral { error, .. } => error.code(),
        }
    }
}

/// A non-fatal issue found while normalizing one subject.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizationWarning {
    pub source_label: String,
    /// The IRI or blank node label of the affected subject.
    pub subject: String,
    pub kind: WarningKind,
}

impl Display for NormalizationWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            WarningKind::MissingName => write!(
                f,
                "[{}] {} has no name and was skipped",
                self.source_label, self.subject
            ),
            WarningKind::InvalidLiteral { property, error } => write!(
                f,
                "[{}] {} has an unusable {property}: {error}",
                self.source_label, self.subject
            ),
        }
    }
}

/// Aggregated outcome of normalizing all sources.
///
/// Data-quality issues never abort a build. Instead, they are collected here and surface in the
/// dataset statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizationReport {
    warnings: Vec<NormalizationWarning>,
    dropped_records: usize,
    candidates_per_source: BTreeMap<String, usize>,
}

impl NormalizationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning for a record that is kept.
    pub fn warn(&mut self, warning: NormalizationWarning) {
        self.warnings.push(warning);
    }

    /// Records a warning for a record that is dropped.
    pub fn drop_record(&mut self, warning: NormalizationWarning) {
        self.dropped_records += 1;
        self.warnings.push(warning);
    }

    /// Records the number of candidates produced by `source_label`.
    pub fn add_candidates(&mut self, source_label: &str, count: usize) {
        *self
            .candidates_per_source
            .entry(source_label.to_owned())
            .or_default() += count;
    }

    /// Merges `other` into `self`.
    pub fn merge(&mut self, other: NormalizationReport) {
        self.warnings.extend(other.warnings);
        self.dropped_records += other.dropped_records;
        for (label, count) in other.candidates_per_source {
            *self.candidates_per_source.entry(label).or_default() += count;
        }
    }

    pub fn warnings(&self) -> &[NormalizationWarning] {
        &self.warnings
    }

    pub fn dropped_records(&self) -> usize {
        self.dropped_records
    }

    pub fn candidates_per_source(&self) -> &BTreeMap<String, usize> {
        &self.candidates_per_source
    }

    pub fn total_candidates(&self) -> usize {
        self.candidates_per_source.values().sum()
    }

    /// Number of warnings per [`WarningKind::code`].
    pub fn warning_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for warning in &self.warnings {
            *counts.entry(warning.kind.code().to_owned()).or_default() += 1;
        }
        counts
    }
}
