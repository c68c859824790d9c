//! Process records: the value groups one process defines.

use crate::error::XsecError;
use crate::labels::LabelSet;
use crate::quantity::QuantityKind;
use crate::table::TableEntry;
use crate::value_group::ValueGroup;
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything the store knows about one process.
///
/// A record need not define every kind: recorded-data samples usually carry
/// only event counts and dataset descriptors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessRecord {
    name: String,
    groups: BTreeMap<QuantityKind, ValueGroup>,
}

impl ProcessRecord {
    pub(crate) fn materialize(
        name: &str,
        entry: &TableEntry,
        labels: &LabelSet,
    ) -> Result<Self, XsecError> {
        let unset = BTreeMap::new();
        let mut groups = BTreeMap::new();
        for kind in entry.kinds() {
            let raw = entry.slots(kind).unwrap_or(&unset);
            groups.insert(kind, ValueGroup::materialize(name, kind, labels, raw)?);
        }
        Ok(Self {
            name: name.to_string(),
            groups,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self, kind: QuantityKind) -> Option<&ValueGroup> {
        self.groups.get(&kind)
    }

    pub fn defines(&self, kind: QuantityKind) -> bool {
        self.groups.contains_key(&kind)
    }

    /// Kinds this record defines, in kind order.
    pub fn kinds(&self) -> impl Iterator<Item = QuantityKind> + '_ {
        self.groups.keys().copied()
    }
}
