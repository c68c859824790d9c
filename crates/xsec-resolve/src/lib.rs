//! # xsec-resolve
//!
//! Query surface over an immutable [`xsec_kernel::ReferenceStore`]:
//! - energy/period precedence with strict and lenient fallback
//! - provenance of the slot a query selected
//! - typed convenience accessors (cross section, event count, ...)
//! - effective sample luminosity and the factors behind it
//!
//! ```text
//! caller ─► Resolver::resolve(process, energy, period, kind)
//!              │
//!              ├─ ReferenceStore::lookup(process)
//!              └─ energy slot, else period slot
//! ```

pub mod luminosity;
pub mod resolver;

pub use luminosity::{LuminosityBreakdown, LuminosityOptions, is_available_luminosity};
pub use resolver::{Resolution, Resolver, Selection, Strictness};
