//! # xsec-kernel
//!
//! Shape and storage of simulated-sample reference data: cross sections,
//! event counts, branching ratios, k-factors, corrections and dataset
//! descriptors, each with a provenance string.
//!
//! This crate is **data-agnostic**: it ships no reference values. It only
//! prescribes how per-label values are laid out and how supplementary tables
//! merge over a base table.
//!
//! ## Architecture
//!
//! ```text
//! LabelSet            ← Periods ∪ Energies, fixed at configuration time
//!     │
//! ReferenceTable      ← process → kind → label → slot (serde document)
//!     │  build + merge
//! ReferenceStore      ← process → ProcessRecord (immutable)
//!     │
//! ProcessRecord       ← kind → ValueGroup (only the kinds it defines)
//!     │
//! ValueGroup          ← label → Slot { value, source }, total over the labels
//! ```

pub mod error;
pub mod labels;
pub mod quantity;
pub mod record;
pub mod store;
pub mod table;
pub mod value_group;

pub use error::XsecError;
pub use labels::{LabelKind, LabelSet};
pub use quantity::{Quantity, QuantityKind, ValueType};
pub use record::ProcessRecord;
pub use store::ReferenceStore;
pub use table::{RawSlot, ReferenceTable, Supplement, TableEntry};
pub use value_group::{Slot, ValueGroup};
