//! Error types for reference-store construction and quantity resolution.

use crate::quantity::QuantityKind;

/// Errors arising from store construction or from a resolution query.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum XsecError {
    /// The process name has no entry in the reference store.
    ///
    /// Raised regardless of strictness.
    #[error("unknown process \"{0}\"")]
    UnknownProcess(String),

    /// The process defines no value group for the requested kind (strict only).
    #[error("process \"{process}\" does not define a {kind} value group")]
    MissingQuantity { process: String, kind: QuantityKind },

    /// Neither the energy nor the period label is part of the label set (strict only).
    #[error(
        "the {kind} value group of process \"{process}\" has no slot for {energy_field} or {period_field}"
    )]
    UnrecognizedLabel {
        process: String,
        kind: QuantityKind,
        energy_field: String,
        period_field: String,
    },

    /// A table slot is keyed by a label outside `Periods ∪ Energies`.
    #[error("process \"{process}\": {kind} slot \"{label}\" is not a configured period or energy")]
    UnknownTableLabel {
        process: String,
        kind: QuantityKind,
        label: String,
    },

    /// A slot value does not match the value type of its kind.
    #[error("process \"{process}\": {kind} slot \"{label}\" expects a {expected} value")]
    ValueTypeMismatch {
        process: String,
        kind: QuantityKind,
        label: String,
        expected: &'static str,
    },

    /// The configured label set is empty, duplicated or overlapping.
    #[error("invalid label set: {0}")]
    InvalidLabelSet(String),

    /// A reference table document could not be parsed.
    #[error("table error: {0}")]
    Table(String),
}

impl XsecError {
    /// Stable snake_case classification, independent of the message text.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownProcess(_) => "unknown_process",
            Self::MissingQuantity { .. } => "missing_quantity",
            Self::UnrecognizedLabel { .. } => "unrecognized_label",
            Self::UnknownTableLabel { .. } => "unknown_table_label",
            Self::ValueTypeMismatch { .. } => "value_type_mismatch",
            Self::InvalidLabelSet(_) => "invalid_label_set",
            Self::Table(_) => "table",
        }
    }
}
