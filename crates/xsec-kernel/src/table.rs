//! Reference table documents: the shape shared by base and supplementary tables.
//!
//! ```toml
//! [TTbarTo2L2Nu.CrossSection]
//! 13TeV = { value = 831.76, source = "https://twiki.cern.ch/twiki/bin/view/LHCPhysics/TtbarNNLO" }
//!
//! [TTbarTo2L2Nu.NEvents]
//! UL18 = 12345
//! ```
//!
//! A table is `process -> { kind -> { label -> slot } }`. Slots are either a
//! bare value or a `{ value, source }` pair where either half may be omitted.
//! Tables are only checked for shape here; label membership and value types
//! are checked when a store materializes them.

use crate::error::XsecError;
use crate::quantity::{Quantity, QuantityKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One slot as written in a table document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSlot {
    Bare(Quantity),
    Detailed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Quantity>,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        source: String,
    },
}

impl RawSlot {
    pub fn value(&self) -> Option<&Quantity> {
        match self {
            Self::Bare(value) => Some(value),
            Self::Detailed { value, .. } => value.as_ref(),
        }
    }

    pub fn source(&self) -> &str {
        match self {
            Self::Bare(_) => "",
            Self::Detailed { source, .. } => source,
        }
    }
}

/// All value groups one process defines, keyed by kind then label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableEntry(BTreeMap<QuantityKind, BTreeMap<String, RawSlot>>);

impl TableEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a value group for `kind` without setting any slot.
    pub fn define(mut self, kind: QuantityKind) -> Self {
        self.0.entry(kind).or_default();
        self
    }

    /// Set the value of one slot, keeping any source already recorded.
    pub fn value(
        mut self,
        kind: QuantityKind,
        label: impl Into<String>,
        value: impl Into<Quantity>,
    ) -> Self {
        let slots = self.0.entry(kind).or_default();
        let label = label.into();
        let source = slots
            .get(&label)
            .map(|slot| slot.source().to_string())
            .unwrap_or_default();
        slots.insert(
            label,
            RawSlot::Detailed {
                value: Some(value.into()),
                source,
            },
        );
        self
    }

    /// Set the provenance string of one slot, keeping any value already recorded.
    pub fn source(
        mut self,
        kind: QuantityKind,
        label: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        let slots = self.0.entry(kind).or_default();
        let label = label.into();
        let value = slots.get(&label).and_then(|slot| slot.value().cloned());
        slots.insert(
            label,
            RawSlot::Detailed {
                value,
                source: source.into(),
            },
        );
        self
    }

    pub fn kinds(&self) -> impl Iterator<Item = QuantityKind> + '_ {
        self.0.keys().copied()
    }

    pub fn slots(&self, kind: QuantityKind) -> Option<&BTreeMap<String, RawSlot>> {
        self.0.get(&kind)
    }
}

/// A whole table document: process name -> entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceTable(BTreeMap<String, TableEntry>);

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the entry for `process`.
    pub fn with_process(mut self, process: impl Into<String>, entry: TableEntry) -> Self {
        self.0.insert(process.into(), entry);
        self
    }

    pub fn insert(&mut self, process: impl Into<String>, entry: TableEntry) -> Option<TableEntry> {
        self.0.insert(process.into(), entry)
    }

    pub fn get(&self, process: &str) -> Option<&TableEntry> {
        self.0.get(process)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in process-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TableEntry)> {
        self.0.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, XsecError> {
        toml::from_str(raw).map_err(|e| XsecError::Table(e.message().to_string()))
    }

    pub fn from_json_str(raw: &str) -> Result<Self, XsecError> {
        serde_json::from_str(raw).map_err(|e| XsecError::Table(e.to_string()))
    }

    pub fn from_json_value(raw: &Value) -> Result<Self, XsecError> {
        Self::deserialize(raw).map_err(|e| XsecError::Table(e.to_string()))
    }
}

impl FromIterator<(String, TableEntry)> for ReferenceTable {
    fn from_iter<I: IntoIterator<Item = (String, TableEntry)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Supplementary tables merged over the base table at build time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Supplement {
    #[default]
    None,
    Sequence(Vec<ReferenceTable>),
    Single(ReferenceTable),
}

impl Supplement {
    /// Parse either one table (a JSON object) or an ordered list (a JSON array).
    pub fn from_json_value(raw: &Value) -> Result<Self, XsecError> {
        Self::deserialize(raw).map_err(|_| {
            XsecError::Table(
                "supplement must be null, a table object, or an array of table objects"
                    .to_string(),
            )
        })
    }

    /// Tables in merge order.
    pub fn into_tables(self) -> Vec<ReferenceTable> {
        match self {
            Self::None => Vec::new(),
            Self::Sequence(tables) => tables,
            Self::Single(table) => vec![table],
        }
    }
}

impl From<ReferenceTable> for Supplement {
    fn from(table: ReferenceTable) -> Self {
        Self::Single(table)
    }
}

impl From<Vec<ReferenceTable>> for Supplement {
    fn from(tables: Vec<ReferenceTable>) -> Self {
        Self::Sequence(tables)
    }
}

impl From<Option<ReferenceTable>> for Supplement {
    fn from(table: Option<ReferenceTable>) -> Self {
        table.map_or(Self::None, Self::Single)
    }
}
