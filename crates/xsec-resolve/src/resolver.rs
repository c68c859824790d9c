//! Energy/period precedence resolution.
//!
//! A query names a process, an energy label, a period label and a quantity
//! kind. Both labels are always consulted:
//!
//! 1. The process must exist (`UnknownProcess`, whatever the strictness).
//! 2. The process must define the kind; otherwise strict queries fail with
//!    `MissingQuantity` and lenient ones return the kind default.
//! 3. At least one label must be part of the label set; otherwise strict
//!    queries fail with `UnrecognizedLabel` and lenient ones return the kind
//!    default.
//! 4. The energy slot wins when it differs from the kind default. Otherwise
//!    the period slot is returned, even if it also holds the default.
//!
//! Energy-independent cross sections live under the energy label while
//! per-period event counts and descriptors live under period labels; one
//! lookup path serves both. A value stored under the energy label that
//! equals the default sentinel (a branching ratio of exactly 1.0, say) reads
//! as unset and falls through to the period slot.

use serde::{Deserialize, Serialize};
use xsec_kernel::{Quantity, QuantityKind, ReferenceStore, ValueGroup, XsecError};

/// Whether absent data is an error or a sentinel default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
    /// Absent value groups and unrecognized labels are errors.
    Strict,
    /// Absent data resolves to the kind default.
    Lenient,
}

impl Strictness {
    pub fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl From<bool> for Strictness {
    fn from(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Lenient }
    }
}

/// Which slot a resolution read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "slot", content = "label", rename_all = "snake_case")]
pub enum Selection {
    Energy(String),
    Period(String),
    /// No slot was read; a lenient query substituted the kind default.
    KindDefault,
}

impl Selection {
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Energy(label) | Self::Period(label) => Some(label),
            Self::KindDefault => None,
        }
    }
}

/// A resolved value together with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub process: String,
    pub kind: QuantityKind,
    pub value: Quantity,
    pub source: String,
    pub selection: Selection,
}

impl Resolution {
    fn kind_default(process: &str, kind: QuantityKind) -> Self {
        Self {
            process: process.to_string(),
            kind,
            value: kind.default_value(),
            source: String::new(),
            selection: Selection::KindDefault,
        }
    }

    fn from_slot(process: &str, group: &ValueGroup, selection: Selection) -> Self {
        let label = selection.label().unwrap_or_default();
        let kind = group.kind();
        Self {
            process: process.to_string(),
            kind,
            value: group
                .value(label)
                .cloned()
                .unwrap_or_else(|| kind.default_value()),
            source: group.source(label).unwrap_or_default().to_string(),
            selection,
        }
    }

    fn label(&self) -> &str {
        self.selection.label().unwrap_or_default()
    }
}

/// Read-only query surface over a [`ReferenceStore`].
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    store: &'a ReferenceStore,
}

impl<'a> Resolver<'a> {
    pub fn new(store: &'a ReferenceStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &'a ReferenceStore {
        self.store
    }

    /// Resolve one quantity, reporting which slot was read and its source.
    pub fn resolve_detailed(
        &self,
        process: &str,
        energy: &str,
        period: &str,
        kind: QuantityKind,
        strictness: Strictness,
    ) -> Result<Resolution, XsecError> {
        let record = self.store.lookup(process)?;

        let Some(group) = record.group(kind) else {
            if strictness.is_strict() {
                log::warn!(
                    "process \"{process}\" defines {:?}, not {kind}",
                    record.kinds().collect::<Vec<_>>()
                );
                return Err(XsecError::MissingQuantity {
                    process: process.to_string(),
                    kind,
                });
            }
            return Ok(Resolution::kind_default(process, kind));
        };

        if !group.has_label(energy) && !group.has_label(period) {
            if strictness.is_strict() {
                log::warn!("{kind} value group of \"{process}\": {group:?}");
                return Err(XsecError::UnrecognizedLabel {
                    process: process.to_string(),
                    kind,
                    energy_field: kind.field_name(energy),
                    period_field: kind.field_name(period),
                });
            }
            return Ok(Resolution::kind_default(process, kind));
        }

        // An unrecognized label reads as the default, so the other one decides.
        let selection = if group.is_set(energy) || !group.has_label(period) {
            Selection::Energy(energy.to_string())
        } else {
            Selection::Period(period.to_string())
        };
        Ok(Resolution::from_slot(process, group, selection))
    }

    /// Resolve one quantity to its value.
    pub fn resolve(
        &self,
        process: &str,
        energy: &str,
        period: &str,
        kind: QuantityKind,
        strictness: Strictness,
    ) -> Result<Quantity, XsecError> {
        self.resolve_detailed(process, energy, period, kind, strictness)
            .map(|resolution| resolution.value)
    }

    /// Provenance string of the slot the precedence rule selects.
    ///
    /// Empty when a lenient query fell back to the kind default.
    pub fn resolve_source(
        &self,
        process: &str,
        energy: &str,
        period: &str,
        kind: QuantityKind,
        strictness: Strictness,
    ) -> Result<String, XsecError> {
        self.resolve_detailed(process, energy, period, kind, strictness)
            .map(|resolution| resolution.source)
    }

    /// Cross section in pb. Strict.
    pub fn cross_section(
        &self,
        process: &str,
        energy: &str,
        period: &str,
    ) -> Result<f64, XsecError> {
        self.scalar(process, energy, period, QuantityKind::CrossSection, Strictness::Strict)
    }

    /// Generated event count. Strict.
    pub fn event_count(&self, process: &str, energy: &str, period: &str) -> Result<f64, XsecError> {
        self.scalar(process, energy, period, QuantityKind::EventCount, Strictness::Strict)
    }

    /// Branching ratio; 1.0 when absent.
    pub fn branching_ratio(
        &self,
        process: &str,
        energy: &str,
        period: &str,
    ) -> Result<f64, XsecError> {
        self.scalar(process, energy, period, QuantityKind::BranchingRatio, Strictness::Lenient)
    }

    /// k-factor; 1.0 when absent.
    pub fn k_factor(&self, process: &str, energy: &str, period: &str) -> Result<f64, XsecError> {
        self.scalar(process, energy, period, QuantityKind::KFactor, Strictness::Lenient)
    }

    /// Correction factor; 1.0 when absent.
    pub fn correction(&self, process: &str, energy: &str, period: &str) -> Result<f64, XsecError> {
        self.scalar(process, energy, period, QuantityKind::Correction, Strictness::Lenient)
    }

    /// Dataset descriptor path; empty when absent.
    pub fn dataset_descriptor(
        &self,
        process: &str,
        energy: &str,
        period: &str,
    ) -> Result<String, XsecError> {
        let resolution = self.resolve_detailed(
            process,
            energy,
            period,
            QuantityKind::DatasetDescriptor,
            Strictness::Lenient,
        )?;
        resolution
            .value
            .require_text(process, resolution.kind, resolution.label())
    }

    fn scalar(
        &self,
        process: &str,
        energy: &str,
        period: &str,
        kind: QuantityKind,
        strictness: Strictness,
    ) -> Result<f64, XsecError> {
        let resolution = self.resolve_detailed(process, energy, period, kind, strictness)?;
        resolution
            .value
            .require_scalar(process, kind, resolution.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xsec_kernel::{LabelSet, ReferenceTable, Supplement, TableEntry};

    const ENERGY: &str = "13TeV";

    fn store() -> ReferenceStore {
        let labels = LabelSet::new(["UL17", "UL18"], [ENERGY]).expect("labels");
        let table = ReferenceTable::new()
            .with_process(
                "TTbarTo2L2Nu",
                TableEntry::new()
                    .value(QuantityKind::CrossSection, ENERGY, 831.76)
                    .source(QuantityKind::CrossSection, ENERGY, "TtbarNNLO")
                    .value(QuantityKind::CrossSection, "UL18", 800.0)
                    .value(QuantityKind::BranchingRatio, ENERGY, 0.105)
                    .value(QuantityKind::EventCount, "UL18", 12345.0)
                    .value(QuantityKind::DatasetDescriptor, "UL18", "SM/UL18/TTbar.xml")
                    .source(QuantityKind::DatasetDescriptor, "UL18", "/TTTo2L2Nu/MINIAODSIM"),
            )
            .with_process(
                "QCD_HT50to100",
                TableEntry::new()
                    .value(QuantityKind::CrossSection, "UL17", 23610000.0)
                    .value(QuantityKind::CrossSection, "UL18", 25600000.0)
                    .source(QuantityKind::CrossSection, "UL18", "XSDB (LO)"),
            )
            .with_process(
                "Zprime",
                TableEntry::new()
                    .value(QuantityKind::BranchingRatio, ENERGY, 1.0)
                    .value(QuantityKind::BranchingRatio, "UL18", 0.5),
            );
        ReferenceStore::build(labels, &table, Supplement::None).expect("build")
    }

    #[test]
    fn energy_slot_wins_when_set() {
        let store = store();
        let resolver = Resolver::new(&store);
        let resolution = resolver
            .resolve_detailed(
                "TTbarTo2L2Nu",
                ENERGY,
                "UL18",
                QuantityKind::CrossSection,
                Strictness::Strict,
            )
            .expect("resolve");
        assert_eq!(resolution.value, Quantity::Scalar(831.76));
        assert_eq!(resolution.source, "TtbarNNLO");
        assert_eq!(resolution.selection, Selection::Energy(ENERGY.to_string()));
    }

    #[test]
    fn period_slot_used_when_energy_slot_is_default() {
        let store = store();
        let resolver = Resolver::new(&store);
        assert_eq!(
            resolver.cross_section("QCD_HT50to100", ENERGY, "UL17"),
            Ok(23610000.0)
        );
        assert_eq!(
            resolver
                .resolve_source(
                    "QCD_HT50to100",
                    ENERGY,
                    "UL18",
                    QuantityKind::CrossSection,
                    Strictness::Strict,
                )
                .expect("source"),
            "XSDB (LO)"
        );
    }

    #[test]
    fn period_fallback_may_return_the_default() {
        let store = store();
        let resolver = Resolver::new(&store);
        assert_eq!(resolver.event_count("TTbarTo2L2Nu", ENERGY, "UL17"), Ok(-1.0));
    }

    #[test]
    fn explicit_default_under_energy_falls_through() {
        let store = store();
        let resolver = Resolver::new(&store);
        assert_eq!(resolver.branching_ratio("Zprime", ENERGY, "UL18"), Ok(0.5));
    }

    #[test]
    fn unknown_process_fails_in_both_modes() {
        let store = store();
        let resolver = Resolver::new(&store);
        for strictness in [Strictness::Strict, Strictness::Lenient] {
            let err = resolver
                .resolve("WW", ENERGY, "UL18", QuantityKind::KFactor, strictness)
                .expect_err("unknown process");
            assert_eq!(err, XsecError::UnknownProcess("WW".to_string()));
        }
    }

    #[test]
    fn missing_group_depends_on_strictness() {
        let store = store();
        let resolver = Resolver::new(&store);
        let err = resolver
            .resolve("TTbarTo2L2Nu", ENERGY, "UL18", QuantityKind::KFactor, Strictness::Strict)
            .expect_err("strict missing group");
        assert_eq!(err.kind(), "missing_quantity");

        let resolution = resolver
            .resolve_detailed(
                "TTbarTo2L2Nu",
                ENERGY,
                "UL18",
                QuantityKind::KFactor,
                Strictness::Lenient,
            )
            .expect("lenient");
        assert_eq!(resolution.value, Quantity::Scalar(1.0));
        assert_eq!(resolution.selection, Selection::KindDefault);
        assert_eq!(resolver.k_factor("TTbarTo2L2Nu", ENERGY, "UL18"), Ok(1.0));
    }

    #[test]
    fn unrecognized_labels_depend_on_strictness() {
        let store = store();
        let resolver = Resolver::new(&store);
        let err = resolver
            .resolve("TTbarTo2L2Nu", "8TeV", "2012", QuantityKind::CrossSection, Strictness::Strict)
            .expect_err("strict unrecognized labels");
        assert_eq!(
            err,
            XsecError::UnrecognizedLabel {
                process: "TTbarTo2L2Nu".to_string(),
                kind: QuantityKind::CrossSection,
                energy_field: "XSec_8TeV".to_string(),
                period_field: "XSec_2012".to_string(),
            }
        );

        assert_eq!(
            resolver.resolve(
                "TTbarTo2L2Nu",
                "8TeV",
                "2012",
                QuantityKind::CrossSection,
                Strictness::Lenient,
            ),
            Ok(Quantity::Scalar(-1.0))
        );
        assert_eq!(resolver.dataset_descriptor("TTbarTo2L2Nu", "8TeV", "2012"), Ok(String::new()));
    }

    #[test]
    fn one_recognized_label_is_enough() {
        let store = store();
        let resolver = Resolver::new(&store);
        assert_eq!(resolver.cross_section("TTbarTo2L2Nu", ENERGY, "2012"), Ok(831.76));
        assert_eq!(resolver.cross_section("TTbarTo2L2Nu", "8TeV", "UL18"), Ok(800.0));
        assert_eq!(resolver.event_count("TTbarTo2L2Nu", ENERGY, "2012"), Ok(-1.0));
    }

    #[test]
    fn dataset_descriptor_and_source() {
        let store = store();
        let resolver = Resolver::new(&store);
        assert_eq!(
            resolver.dataset_descriptor("TTbarTo2L2Nu", ENERGY, "UL18"),
            Ok("SM/UL18/TTbar.xml".to_string())
        );
        assert_eq!(
            resolver
                .resolve_source(
                    "TTbarTo2L2Nu",
                    ENERGY,
                    "UL18",
                    QuantityKind::DatasetDescriptor,
                    Strictness::Lenient,
                )
                .expect("source"),
            "/TTTo2L2Nu/MINIAODSIM"
        );
    }

    #[test]
    fn strictness_from_flag() {
        assert_eq!(Strictness::from(true), Strictness::Strict);
        assert_eq!(Strictness::from(false), Strictness::Lenient);
    }
}
