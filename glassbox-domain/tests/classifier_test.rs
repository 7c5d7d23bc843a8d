use chrono::{DateTime, TimeZone, Utc};
use glassbox_core::models::{Company, CompanyStage};
use glassbox_domain::keywords;
use glassbox_domain::DomainClassifier;
use test_fixtures::load_fixture;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

fn named(name: &str, description: &str) -> Company {
    let mut company = Company::new(name);
    company.description = Some(description.to_string());
    company
}

// ── Domain ──

#[test]
fn saas_company_classifies_as_b2b_saas() {
    let company: Company = load_fixture("companies/b2b_saas_seed.json");
    let c = DomainClassifier::new().classify_at(&company, "Workflow automation with ERP integration.", "", now());

    assert_eq!(c.primary_domain, "B2B SaaS");
    assert!(c.confidence > 0.0 && c.confidence <= 1.0);
    assert_eq!(c.naics_code.as_deref(), Some("54151"));
    let (domain, found) = &c.keywords_found[0];
    assert_eq!(domain, "B2B SaaS");
    assert!(found.iter().any(|k| k == "saas"));
    assert!(found.iter().any(|k| k == "erp"));
}

#[test]
fn fintech_company_has_full_confidence_when_only_fintech_matches() {
    let company: Company = load_fixture("companies/fintech_regulated.json");
    let c = DomainClassifier::new().classify_at(&company, "", "", now());

    assert_eq!(c.primary_domain, "Fintech");
    assert!((c.confidence - 1.0).abs() < 1e-12);
    assert!(c.secondary_domains.is_empty());
    assert_eq!(c.naics_code.as_deref(), Some("52"));
}

#[test]
fn no_keyword_match_falls_back_to_b2b_saas() {
    let company: Company = load_fixture("companies/sparse_intake.json");
    let c = DomainClassifier::new().classify_at(&company, "", "", now());

    assert_eq!(c.primary_domain, "B2B SaaS");
    assert!((c.confidence - 0.1).abs() < 1e-12);
    assert!(c.keywords_found.is_empty());
    assert!(c.secondary_domains.is_empty());
}

#[test]
fn ties_resolve_to_table_order() {
    // "restaurant" is Food/QSR, "warehouse" is Logistics: one vote each.
    let company = named("Kitchen Co", "restaurant warehouse");
    let c = DomainClassifier::new().classify_at(&company, "", "", now());

    assert_eq!(c.primary_domain, "Food/QSR");
    assert_eq!(c.secondary_domains, vec!["Logistics/Delivery".to_string()]);
    assert!((c.confidence - 0.5).abs() < 1e-12);
}

#[test]
fn multi_word_keywords_count_per_word() {
    // "last mile" scores 2 and "freight" 1 for Logistics; "factory machinery" 2 for Manufacturing.
    let company = named("Haul", "last mile freight factory machinery");
    let c = DomainClassifier::new().classify_at(&company, "", "", now());

    assert_eq!(c.primary_domain, "Logistics/Delivery");
    assert_eq!(c.secondary_domains, vec!["Manufacturing/Industrial".to_string()]);
    assert!((c.confidence - 3.0 / 5.0).abs() < 1e-12);
}

#[test]
fn secondary_domains_need_half_the_primary_score() {
    let company = named("Cart", "d2c e-commerce marketplace brand with a payment step");
    let c = DomainClassifier::new().classify_at(&company, "", "", now());

    assert_eq!(c.primary_domain, "D2C/E-commerce");
    assert!(!c.secondary_domains.contains(&"Fintech".to_string()));
}

#[test]
fn classification_is_deterministic() {
    let company: Company = load_fixture("companies/b2b_saas_seed.json");
    let classifier = DomainClassifier::new();
    let a = classifier.classify_at(&company, "extra", "site", now());
    let b = classifier.classify_at(&company, "extra", "site", now());
    assert_eq!(a, b);
}

// ── Stage ──

#[test]
fn stage_keywords_win_over_declared_stage() {
    let mut company = named("Rocket", "now in series b with an international footprint");
    company.stage = Some(CompanyStage::Seed);
    let c = DomainClassifier::new().classify_at(&company, "", "", now());
    assert_eq!(c.stage, CompanyStage::SeriesB);
}

#[test]
fn stage_vote_ties_keep_the_earlier_stage() {
    let company = named("Blank", "prototype pilot");
    let c = DomainClassifier::new().classify_at(&company, "", "", now());
    assert_eq!(c.stage, CompanyStage::PreSeed);
}

#[test]
fn stealth_keyword_means_pre_seed() {
    let company: Company = load_fixture("companies/sparse_intake.json");
    let c = DomainClassifier::new().classify_at(&company, "", "", now());
    assert_eq!(c.stage, CompanyStage::PreSeed);
}

#[test]
fn declared_stage_used_without_keywords() {
    let company: Company = load_fixture("companies/b2b_saas_seed.json");
    let c = DomainClassifier::new().classify_at(&company, "", "", now());
    assert_eq!(c.stage, CompanyStage::Seed);
}

#[test]
fn declared_stage_wins_over_company_age() {
    let classifier = DomainClassifier::new();
    let mut company = Company::new("Quiet Labs");
    company.founded_date = Some(now() - chrono::Duration::days(1_000));
    assert_eq!(classifier.classify_stage("", &company, now()), CompanyStage::SeriesA);

    company.stage = Some(CompanyStage::Seed);
    assert_eq!(classifier.classify_stage("", &company, now()), CompanyStage::Seed);
    assert_eq!(
        classifier.classify_stage("series b", &company, now()),
        CompanyStage::SeriesB
    );
}

#[test]
fn stage_inferred_from_age() {
    let classifier = DomainClassifier::new();
    let mut company = Company::new("Quiet Labs");

    company.founded_date = Some(now() - chrono::Duration::days(365));
    assert_eq!(classifier.classify_stage("", &company, now()), CompanyStage::PreSeed);

    company.founded_date = Some(now() - chrono::Duration::days(500));
    assert_eq!(classifier.classify_stage("", &company, now()), CompanyStage::Seed);

    company.founded_date = Some(now() - chrono::Duration::days(731));
    assert_eq!(classifier.classify_stage("", &company, now()), CompanyStage::SeriesA);
}

#[test]
fn stage_defaults_to_seed() {
    let company = Company::new("Quiet Labs");
    assert_eq!(
        DomainClassifier::new().classify_stage("", &company, now()),
        CompanyStage::Seed
    );
}

#[test]
fn future_founding_date_is_ignored() {
    let mut company = Company::new("Quiet Labs");
    company.founded_date = Some(now() + chrono::Duration::days(30));
    assert_eq!(
        DomainClassifier::new().classify_stage("", &company, now()),
        CompanyStage::Seed
    );
}

// ── Tables ──

#[test]
fn every_domain_has_a_naics_code() {
    for (domain, _) in keywords::DOMAIN_KEYWORDS {
        assert!(keywords::naics_code(domain).is_some(), "{domain} has no NAICS code");
    }
    assert!(keywords::naics_code("Space").is_none());
}
