//! The immutable reference store.
//!
//! Built once from a base table and zero or more supplementary tables, then
//! only read. Supplementary tables merge in order with whole-record
//! replacement: a process named in a later table replaces every value group
//! of the earlier record, never individual slots.

use crate::error::XsecError;
use crate::labels::LabelSet;
use crate::record::ProcessRecord;
use crate::table::{ReferenceTable, Supplement};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

const STORE_DIGEST_PREFIX: &str = "xs1_";

/// Process name -> record, over one fixed label set.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceStore {
    labels: LabelSet,
    records: BTreeMap<String, ProcessRecord>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoreProjection<'a> {
    schema: u32,
    labels: &'a LabelSet,
    records: &'a BTreeMap<String, ProcessRecord>,
}

impl ReferenceStore {
    /// Build a store from `base`, then apply each supplementary table in order.
    pub fn build(
        labels: LabelSet,
        base: &ReferenceTable,
        supplement: impl Into<Supplement>,
    ) -> Result<Self, XsecError> {
        let mut records = BTreeMap::new();
        insert_table(&mut records, &labels, base, false)?;

        for table in supplement.into().into_tables() {
            insert_table(&mut records, &labels, &table, true)?;
        }

        log::debug!(
            "reference store built: {} processes over {} labels",
            records.len(),
            labels.len()
        );
        Ok(Self { labels, records })
    }

    /// Fails with `UnknownProcess` when `process` has no entry.
    pub fn lookup(&self, process: &str) -> Result<&ProcessRecord, XsecError> {
        self.records
            .get(process)
            .ok_or_else(|| XsecError::UnknownProcess(process.to_string()))
    }

    pub fn contains(&self, process: &str) -> bool {
        self.records.contains_key(process)
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Process names in deterministic order.
    pub fn processes(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn records(&self) -> impl Iterator<Item = &ProcessRecord> {
        self.records.values()
    }

    /// Content digest of labels and records.
    ///
    /// Two stores with the same labels and materialized records produce the
    /// same digest, whatever the order their tables were merged in.
    pub fn digest(&self) -> String {
        let projection = StoreProjection {
            schema: 1,
            labels: &self.labels,
            records: &self.records,
        };
        let bytes = serde_json::to_vec(&projection).unwrap_or_default();
        format!("{STORE_DIGEST_PREFIX}{}", digest_bytes(&bytes))
    }
}

fn insert_table(
    records: &mut BTreeMap<String, ProcessRecord>,
    labels: &LabelSet,
    table: &ReferenceTable,
    supplementary: bool,
) -> Result<(), XsecError> {
    for (name, entry) in table.iter() {
        let record = ProcessRecord::materialize(name, entry, labels)?;
        if records.insert(name.to_string(), record).is_some() && supplementary {
            log::debug!("supplementary table replaces process \"{name}\"");
        }
    }
    Ok(())
}

fn digest_bytes(bytes: &[u8]) -> String {
    let mut digest = Sha256::new();
    digest.update(bytes);
    let output = digest.finalize();
    let mut rendered = String::with_capacity(output.len() * 2);
    for byte in output {
        rendered.push_str(format!("{byte:02x}").as_str());
    }
    rendered
}
