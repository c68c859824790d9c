//! Period and energy label sets.
//!
//! Labels are fixed at configuration time and shared by every process in a
//! store: each value group holds exactly one slot per label in
//! `Periods ∪ Energies`.

use crate::error::XsecError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which label list a label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKind {
    Period,
    Energy,
}

/// Ordered, duplicate-free period and energy labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LabelSetInput")]
pub struct LabelSet {
    periods: Vec<String>,
    energies: Vec<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LabelSetInput {
    periods: Vec<String>,
    energies: Vec<String>,
}

impl TryFrom<LabelSetInput> for LabelSet {
    type Error = XsecError;

    fn try_from(input: LabelSetInput) -> Result<Self, Self::Error> {
        Self::new(input.periods, input.energies)
    }
}

impl LabelSet {
    /// Build a label set, rejecting empty lists, empty labels and duplicates.
    pub fn new<P, E>(periods: P, energies: E) -> Result<Self, XsecError>
    where
        P: IntoIterator,
        P::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        let periods: Vec<String> = periods.into_iter().map(Into::into).collect();
        let energies: Vec<String> = energies.into_iter().map(Into::into).collect();

        if periods.is_empty() {
            return Err(XsecError::InvalidLabelSet("no periods configured".to_string()));
        }
        if energies.is_empty() {
            return Err(XsecError::InvalidLabelSet("no energies configured".to_string()));
        }

        let mut seen = BTreeSet::new();
        for label in periods.iter().chain(energies.iter()) {
            if label.trim().is_empty() {
                return Err(XsecError::InvalidLabelSet("empty label".to_string()));
            }
            if !seen.insert(label.as_str()) {
                return Err(XsecError::InvalidLabelSet(format!(
                    "label \"{label}\" configured more than once"
                )));
            }
        }

        Ok(Self { periods, energies })
    }

    /// Parse a `periods = [..]` / `energies = [..]` configuration fragment.
    pub fn from_toml_str(raw: &str) -> Result<Self, XsecError> {
        let input: LabelSetInput =
            toml::from_str(raw).map_err(|e| XsecError::InvalidLabelSet(e.message().to_string()))?;
        Self::try_from(input)
    }

    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    pub fn energies(&self) -> &[String] {
        &self.energies
    }

    /// All labels, periods first, in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.periods
            .iter()
            .chain(self.energies.iter())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.periods.len() + self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, label: &str) -> bool {
        self.classify(label).is_some()
    }

    pub fn classify(&self, label: &str) -> Option<LabelKind> {
        if self.periods.iter().any(|p| p == label) {
            Some(LabelKind::Period)
        } else if self.energies.iter().any(|e| e == label) {
            Some(LabelKind::Energy)
        } else {
            None
        }
    }
}
