//! Resolution against the compiled-in reference catalog.

use xsec_catalog::{reference_store, reference_store_with};
use xsec_kernel::{QuantityKind, ReferenceTable, TableEntry, XsecError};
use xsec_resolve::{LuminosityOptions, Resolver, Selection, Strictness};

const ENERGY: &str = "13TeV";

fn resolver() -> Resolver<'static> {
    Resolver::new(reference_store().expect("reference store"))
}

#[test]
fn ttbar_dilepton_cross_section_and_branching_ratio() {
    let resolver = resolver();
    assert_eq!(resolver.cross_section("TTbarTo2L2Nu", ENERGY, "UL18").unwrap(), 831.76);
    assert_eq!(resolver.branching_ratio("TTbarTo2L2Nu", ENERGY, "UL18").unwrap(), 0.105);
    assert_eq!(
        resolver
            .resolve_source(
                "TTbarTo2L2Nu",
                ENERGY,
                "UL17",
                QuantityKind::CrossSection,
                Strictness::Strict,
            )
            .unwrap(),
        "https://twiki.cern.ch/twiki/bin/view/LHCPhysics/TtbarNNLO"
    );
}

#[test]
fn period_only_cross_sections_fall_back_to_the_period() {
    let resolver = resolver();
    assert_eq!(resolver.cross_section("QCD_HT50to100", ENERGY, "UL17").unwrap(), 23610000.0);
    assert_eq!(resolver.cross_section("QCD_HT50to100", ENERGY, "UL18").unwrap(), 25600000.0);
}

#[test]
fn set_energy_slot_shadows_the_period_slot() {
    let resolver = resolver();
    let resolution = resolver
        .resolve_detailed(
            "WJetsToLNu_HT-100to200",
            ENERGY,
            "UL16preVFP",
            QuantityKind::CrossSection,
            Strictness::Strict,
        )
        .unwrap();
    assert_eq!(resolution.value.as_scalar(), Some(1395.0));
    assert_eq!(resolution.source, "XSDB (LO)");
    assert_eq!(resolution.selection, Selection::Energy(ENERGY.to_string()));

    assert_eq!(resolver.k_factor("WJetsToLNu_HT-100to200", ENERGY, "UL17").unwrap(), 1.21);
}

#[test]
fn data_samples_have_no_cross_section() {
    let resolver = resolver();
    let err = resolver.cross_section("SingleMuon_RunA", ENERGY, "UL18").unwrap_err();
    assert_eq!(
        err,
        XsecError::MissingQuantity {
            process: "SingleMuon_RunA".to_string(),
            kind: QuantityKind::CrossSection,
        }
    );
    assert_eq!(resolver.branching_ratio("SingleMuon_RunA", ENERGY, "UL18").unwrap(), 1.0);
}

#[test]
fn corrections_are_per_period() {
    let resolver = resolver();
    let process = "DYJetsToLL_M-50_HT-200to400";
    assert_eq!(resolver.correction(process, ENERGY, "UL17").unwrap(), 0.999);
    assert_eq!(resolver.correction(process, ENERGY, "UL16preVFP").unwrap(), 1.0);
    assert_eq!(resolver.event_count(process, ENERGY, "UL17").unwrap(), 12513057.0);
}

#[test]
fn dataset_descriptors_and_their_sources() {
    let resolver = resolver();
    assert_eq!(
        resolver
            .dataset_descriptor("ST_tW_top_5f_inclusiveDecays", ENERGY, "UL18")
            .unwrap(),
        "RunII_106X_v2/SM/UL18/ST_tW_top_5f_inclusiveDecays_CP5_powheg-pythia8_Summer20UL18_v2.xml"
    );

    // Source recorded, descriptor not yet produced.
    let process = "ST_tW_top_5f_NoFullyHadronicDecays";
    assert_eq!(resolver.dataset_descriptor(process, ENERGY, "UL16preVFP").unwrap(), "");
    let source = resolver
        .resolve_source(
            process,
            ENERGY,
            "UL16preVFP",
            QuantityKind::DatasetDescriptor,
            Strictness::Lenient,
        )
        .unwrap();
    assert!(source.ends_with("/MINIAODSIM"), "{source}");
}

#[test]
fn lenient_queries_never_fail_for_known_processes() {
    let resolver = resolver();
    let store = resolver.store();
    for process in store.processes() {
        for period in store.labels().periods() {
            for kind in QuantityKind::ALL {
                let value = resolver
                    .resolve(process, ENERGY, period, kind, Strictness::Lenient)
                    .unwrap_or_else(|e| panic!("{process} {kind} {period}: {e}"));
                assert_eq!(value.value_type(), kind.value_type(), "{process} {kind} {period}");
            }
        }
    }
}

#[test]
fn unknown_process_fails_in_both_modes() {
    let resolver = resolver();
    for strictness in [Strictness::Strict, Strictness::Lenient] {
        let err = resolver
            .resolve("NoSuchSample", ENERGY, "UL18", QuantityKind::KFactor, strictness)
            .unwrap_err();
        assert_eq!(err, XsecError::UnknownProcess("NoSuchSample".to_string()));
    }
}

#[test]
fn catalog_sample_without_event_count_has_no_luminosity() {
    let breakdown = resolver()
        .luminosity_breakdown("TTbarTo2L2Nu", ENERGY, "UL18", LuminosityOptions::default())
        .unwrap();
    assert_eq!(breakdown.event_count, -1.0);
    assert!(!breakdown.is_available());
}

#[test]
fn supplement_adds_a_private_signal_sample() {
    let supplement = ReferenceTable::new().with_process(
        "SignalM1000",
        TableEntry::new()
            .value(QuantityKind::CrossSection, ENERGY, 0.5)
            .source(QuantityKind::CrossSection, ENERGY, "private production")
            .value(QuantityKind::BranchingRatio, ENERGY, 0.25)
            .value(QuantityKind::KFactor, ENERGY, 2.0)
            .value(QuantityKind::EventCount, "UL18", 1000.0),
    );
    let store = reference_store_with(supplement).expect("store with supplement");
    assert_eq!(store.len(), reference_store().unwrap().len() + 1);

    let resolver = Resolver::new(&store);
    let breakdown = resolver
        .luminosity_breakdown(
            "SignalM1000",
            ENERGY,
            "UL18",
            LuminosityOptions::default().with_k_factor(),
        )
        .unwrap();
    insta::assert_debug_snapshot!(breakdown, @r#"
    LuminosityBreakdown {
        process: "SignalM1000",
        energy: "13TeV",
        period: "UL18",
        cross_section: 0.5,
        branching_ratio: 0.25,
        k_factor: Some(
            2.0,
        ),
        correction: None,
        effective_cross_section: 0.25,
        event_count: 1000.0,
        luminosity: 4000.0,
    }
    "#);

    // The shared store is untouched.
    assert!(!reference_store().unwrap().contains("SignalM1000"));
}

#[test]
fn supplement_replaces_whole_catalog_records() {
    let supplement = ReferenceTable::new().with_process(
        "TTbarTo2L2Nu",
        TableEntry::new().value(QuantityKind::EventCount, "UL18", 64310000.0),
    );
    let store = reference_store_with(supplement).unwrap();
    let resolver = Resolver::new(&store);

    assert_eq!(resolver.event_count("TTbarTo2L2Nu", ENERGY, "UL18").unwrap(), 64310000.0);
    assert_eq!(
        resolver.cross_section("TTbarTo2L2Nu", ENERGY, "UL18").unwrap_err().kind(),
        "missing_quantity"
    );
}
