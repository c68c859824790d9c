//! Value groups: one total slot map per (process, kind).

use crate::error::XsecError;
use crate::labels::LabelSet;
use crate::quantity::{Quantity, QuantityKind};
use crate::table::RawSlot;
use serde::Serialize;
use std::collections::BTreeMap;

/// One label's value and its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot {
    pub value: Quantity,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub source: String,
}

impl Slot {
    fn unset(kind: QuantityKind) -> Self {
        Self {
            value: kind.default_value(),
            source: String::new(),
        }
    }
}

/// Per-label values of one quantity kind for one process.
///
/// Total over the store's label set: every period and energy label has a
/// slot, holding the kind default and an empty source unless the table set it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueGroup {
    kind: QuantityKind,
    slots: BTreeMap<String, Slot>,
}

impl ValueGroup {
    /// Materialize a table's raw slots against `labels`.
    pub(crate) fn materialize(
        process: &str,
        kind: QuantityKind,
        labels: &LabelSet,
        raw: &BTreeMap<String, RawSlot>,
    ) -> Result<Self, XsecError> {
        let mut slots: BTreeMap<String, Slot> = labels
            .iter()
            .map(|label| (label.to_string(), Slot::unset(kind)))
            .collect();

        for (label, raw_slot) in raw {
            let slot = slots
                .get_mut(label)
                .ok_or_else(|| XsecError::UnknownTableLabel {
                    process: process.to_string(),
                    kind,
                    label: label.clone(),
                })?;

            if let Some(value) = raw_slot.value() {
                if value.value_type() != kind.value_type() {
                    return Err(XsecError::ValueTypeMismatch {
                        process: process.to_string(),
                        kind,
                        label: label.clone(),
                        expected: kind.value_type().as_str(),
                    });
                }
                slot.value = value.clone();
            }
            slot.source = raw_slot.source().to_string();
        }

        Ok(Self { kind, slots })
    }

    pub fn kind(&self) -> QuantityKind {
        self.kind
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.slots.contains_key(label)
    }

    pub fn slot(&self, label: &str) -> Option<&Slot> {
        self.slots.get(label)
    }

    pub fn value(&self, label: &str) -> Option<&Quantity> {
        self.slot(label).map(|slot| &slot.value)
    }

    pub fn source(&self, label: &str) -> Option<&str> {
        self.slot(label).map(|slot| slot.source.as_str())
    }

    /// Whether the slot for `label` holds something other than the kind default.
    pub fn is_set(&self, label: &str) -> bool {
        self.value(label)
            .is_some_and(|value| !value.is_default_for(self.kind))
    }

    /// Slots in label-name order.
    pub fn slots(&self) -> impl Iterator<Item = (&str, &Slot)> {
        self.slots.iter().map(|(label, slot)| (label.as_str(), slot))
    }
}
