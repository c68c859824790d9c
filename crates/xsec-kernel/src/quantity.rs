//! Quantity kinds and resolved quantity values.
//!
//! Every query names one of six quantity kinds. Each kind fixes:
//!
//! - **table key**: the name used by reference tables (`CrossSection`, `NEvents`, ...)
//! - **field prefix**: the stem of the historical slot names (`XSec_13TeV`, `NEVT_UL18`, ...)
//! - **default**: the sentinel read from unset slots and returned by lenient fallbacks
//! - **value type**: numeric scalar, or text for dataset descriptors
//!
//! | Kind | Table key | Prefix | Default |
//! |------|-----------|--------|---------|
//! | CrossSection | `CrossSection` | `XSec` | −1.0 |
//! | EventCount | `NEvents` | `NEVT` | −1.0 |
//! | BranchingRatio | `BranchingRatio` | `BRat` | 1.0 |
//! | KFactor | `kFactor` | `kFac` | 1.0 |
//! | Correction | `Correction` | `Corr` | 1.0 |
//! | DatasetDescriptor | `XMLname` | `Xml` | `""` |

use crate::error::XsecError;
use serde::{Deserialize, Serialize};

/// The recognized quantity categories a query can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QuantityKind {
    /// Production cross section, in picobarns.
    CrossSection,

    /// (Weighted) number of generated events.
    #[serde(rename = "NEvents", alias = "EventCount")]
    EventCount,

    /// Decay-channel fraction applied on top of the cross section.
    BranchingRatio,

    /// Higher-order correction to a leading-order cross section.
    #[serde(rename = "kFactor", alias = "KFactor")]
    KFactor,

    /// Ad hoc multiplicative adjustment for known mismodeling.
    Correction,

    /// Storage path of the sample description.
    #[serde(rename = "XMLname", alias = "DatasetDescriptor")]
    DatasetDescriptor,
}

/// The value type a kind's slots hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Scalar,
    Text,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "numeric",
            Self::Text => "text",
        }
    }
}

impl QuantityKind {
    pub const ALL: [QuantityKind; 6] = [
        Self::CrossSection,
        Self::EventCount,
        Self::BranchingRatio,
        Self::KFactor,
        Self::Correction,
        Self::DatasetDescriptor,
    ];

    /// Key used for this kind in reference tables.
    pub fn table_key(self) -> &'static str {
        match self {
            Self::CrossSection => "CrossSection",
            Self::EventCount => "NEvents",
            Self::BranchingRatio => "BranchingRatio",
            Self::KFactor => "kFactor",
            Self::Correction => "Correction",
            Self::DatasetDescriptor => "XMLname",
        }
    }

    /// Stem of the per-label slot names.
    pub fn field_prefix(self) -> &'static str {
        match self {
            Self::CrossSection => "XSec",
            Self::EventCount => "NEVT",
            Self::BranchingRatio => "BRat",
            Self::KFactor => "kFac",
            Self::Correction => "Corr",
            Self::DatasetDescriptor => "Xml",
        }
    }

    pub fn value_type(self) -> ValueType {
        match self {
            Self::DatasetDescriptor => ValueType::Text,
            _ => ValueType::Scalar,
        }
    }

    /// Value of an unset slot, and of a lenient fallback.
    pub fn default_value(self) -> Quantity {
        match self {
            Self::CrossSection | Self::EventCount => Quantity::Scalar(-1.0),
            Self::BranchingRatio | Self::KFactor | Self::Correction => Quantity::Scalar(1.0),
            Self::DatasetDescriptor => Quantity::Text(String::new()),
        }
    }

    /// Historical slot name, e.g. `XSec_13TeV`.
    pub fn field_name(self, label: &str) -> String {
        format!("{}_{label}", self.field_prefix())
    }

    /// Historical provenance slot name, e.g. `XSecSource_13TeV`.
    pub fn source_field_name(self, label: &str) -> String {
        format!("{}Source_{label}", self.field_prefix())
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Quantity::Scalar(value)
    }
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Quantity::Text(value.to_string())
    }
}

impl From<String> for Quantity {
    fn from(value: String) -> Self {
        Quantity::Text(value)
    }
}

impl std::fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table_key())
    }
}

impl std::str::FromStr for QuantityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CrossSection" | "cross_section" | "xsec" => Ok(Self::CrossSection),
            "NEvents" | "EventCount" | "event_count" | "nevt" => Ok(Self::EventCount),
            "BranchingRatio" | "branching_ratio" | "br" => Ok(Self::BranchingRatio),
            "kFactor" | "KFactor" | "k_factor" => Ok(Self::KFactor),
            "Correction" | "correction" | "corr" => Ok(Self::Correction),
            "XMLname" | "DatasetDescriptor" | "dataset_descriptor" | "xml" => {
                Ok(Self::DatasetDescriptor)
            }
            _ => Err(format!("unknown quantity kind: {s}")),
        }
    }
}

/// A resolved slot value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Scalar(f64),
    Text(String),
}

impl Quantity {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Scalar(_) => None,
            Self::Text(value) => Some(value),
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Scalar(_) => ValueType::Scalar,
            Self::Text(_) => ValueType::Text,
        }
    }

    /// Whether this value equals the sentinel default of `kind`.
    ///
    /// An explicitly stored value that happens to equal the default is
    /// indistinguishable from an unset slot.
    pub fn is_default_for(&self, kind: QuantityKind) -> bool {
        *self == kind.default_value()
    }

    /// Scalar accessor that reports a type mismatch instead of panicking.
    pub fn require_scalar(
        &self,
        process: &str,
        kind: QuantityKind,
        label: &str,
    ) -> Result<f64, XsecError> {
        self.as_scalar().ok_or_else(|| XsecError::ValueTypeMismatch {
            process: process.to_string(),
            kind,
            label: label.to_string(),
            expected: ValueType::Scalar.as_str(),
        })
    }

    /// Text accessor that reports a type mismatch instead of panicking.
    pub fn require_text(
        &self,
        process: &str,
        kind: QuantityKind,
        label: &str,
    ) -> Result<String, XsecError> {
        self.as_text()
            .map(str::to_string)
            .ok_or_else(|| XsecError::ValueTypeMismatch {
                process: process.to_string(),
                kind,
                label: label.to_string(),
                expected: ValueType::Text.as_str(),
            })
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}
