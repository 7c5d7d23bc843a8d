use glassbox_core::models::{CompanyStage, ModuleKind};
use glassbox_domain::catalog::{self, CORE_MODULES, DOMAIN_MODULES};
use glassbox_domain::keywords::DOMAIN_KEYWORDS;

#[test]
fn module_metric_weights_sum_to_one() {
    let all = CORE_MODULES
        .iter()
        .chain(DOMAIN_MODULES.iter().flat_map(|(_, ms)| ms.iter()));
    for module in all {
        let total: f64 = module.metrics.iter().map(|m| m.weight).sum();
        assert!((total - 1.0).abs() < 1e-9, "{} metric weights sum to {total}", module.id);
    }
}

#[test]
fn domain_modules_belong_to_known_domains() {
    for (domain, modules) in DOMAIN_MODULES {
        assert!(DOMAIN_KEYWORDS.iter().any(|(d, _)| d == domain), "{domain} is not classifiable");
        assert!(modules.iter().all(|m| m.kind == ModuleKind::Domain));
    }
    assert!(CORE_MODULES.iter().all(|m| m.kind == ModuleKind::Core));
}

#[test]
fn module_lookup_covers_core_and_domain() {
    assert_eq!(catalog::module_definition("finance").map(|m| m.name), Some("Financial Health"));
    assert!(catalog::module_definition("cac_payback").is_some());
    assert!(catalog::module_definition("nope").is_none());
}

#[test]
fn stage_weights_are_fractions() {
    assert!((catalog::stage_weight(CompanyStage::SeriesA, "traction") - 0.35).abs() < 1e-12);
    assert!((catalog::stage_weight(CompanyStage::Seed, "risk") - 0.01).abs() < 1e-12);
    assert_eq!(
        catalog::stage_weight(CompanyStage::SeriesB, "team"),
        catalog::stage_weight(CompanyStage::Seed, "team")
    );
}

#[test]
fn metric_keywords_match_snippets() {
    let cac = catalog::module_definition("cac_payback").unwrap();
    let spec = cac.metrics.iter().find(|m| m.name == "cac").unwrap();
    assert!(spec.matches("blended cac: 500"));
    assert!(!spec.matches("burn rate: 150000"));

    let metric = spec.instantiate();
    assert_eq!(metric.name, "cac");
    assert!((metric.weight - 0.3).abs() < 1e-12);
}
