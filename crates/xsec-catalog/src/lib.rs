//! # xsec-catalog
//!
//! The compiled-in reference data: Run 2 ultra-legacy cross sections,
//! branching ratios, k-factors, corrections, event counts and dataset
//! descriptors, with their sources.
//!
//! The document is embedded at compile time and materialized once per
//! process into an immutable [`ReferenceStore`]. Sessions that need extra
//! processes build their own store over the same base with
//! [`reference_store_with`].
//!
//! ```text
//! data/reference.toml ──include_str!──► Catalog { labels, table }
//!                                            │ ReferenceStore::build
//!                                            ▼
//!                              reference_store()  (built once, shared)
//! ```

use once_cell::sync::Lazy;
use serde::Deserialize;
use xsec_kernel::{LabelSet, ReferenceStore, ReferenceTable, Supplement, XsecError};

/// The embedded reference document.
pub const REFERENCE_TOML: &str = include_str!("../data/reference.toml");

/// A base-table document: its label set and its processes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    labels: LabelSet,
    processes: ReferenceTable,
}

impl Catalog {
    /// Parse a `[labels]` + `[processes]` document.
    pub fn from_toml_str(raw: &str) -> Result<Self, XsecError> {
        toml::from_str(raw).map_err(|e| XsecError::Table(e.message().to_string()))
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn table(&self) -> &ReferenceTable {
        &self.processes
    }

    /// Build a store over this document, merging `supplement` on top.
    pub fn build_store(
        &self,
        supplement: impl Into<Supplement>,
    ) -> Result<ReferenceStore, XsecError> {
        ReferenceStore::build(self.labels.clone(), &self.processes, supplement)
    }
}

struct Reference {
    catalog: Catalog,
    store: ReferenceStore,
}

static REFERENCE: Lazy<Result<Reference, XsecError>> = Lazy::new(|| {
    let catalog = Catalog::from_toml_str(REFERENCE_TOML)?;
    let store = catalog.build_store(Supplement::None)?;
    log::debug!(
        "reference catalog loaded: {} processes, digest {}",
        store.len(),
        store.digest()
    );
    Ok(Reference { catalog, store })
});

fn reference() -> Result<&'static Reference, XsecError> {
    REFERENCE.as_ref().map_err(Clone::clone)
}

/// The embedded document, parsed once.
pub fn reference_catalog() -> Result<&'static Catalog, XsecError> {
    reference().map(|reference| &reference.catalog)
}

/// Periods and energies of the embedded document.
pub fn reference_labels() -> Result<&'static LabelSet, XsecError> {
    reference_catalog().map(Catalog::labels)
}

/// Processes of the embedded document, as a table.
pub fn reference_table() -> Result<&'static ReferenceTable, XsecError> {
    reference_catalog().map(Catalog::table)
}

/// The shared store over the embedded document alone.
pub fn reference_store() -> Result<&'static ReferenceStore, XsecError> {
    reference().map(|reference| &reference.store)
}

/// A new store over the embedded document with `supplement` merged on top.
pub fn reference_store_with(
    supplement: impl Into<Supplement>,
) -> Result<ReferenceStore, XsecError> {
    reference_catalog()?.build_store(supplement)
}
