use glassbox_core::models::{Company, CompanyStage, DocumentKind};
use test_fixtures::{load_fixture, load_fixture_value};

#[test]
fn company_fixtures_deserialize_into_models() {
    for name in ["b2b_saas_seed", "fintech_regulated", "sparse_intake"] {
        let company: Company = load_fixture(&format!("companies/{name}.json"));
        assert!(!company.name.is_empty(), "{name} has no name");
    }
}

#[test]
fn b2b_saas_fixture_carries_documented_figures() {
    let company: Company = load_fixture("companies/b2b_saas_seed.json");
    assert_eq!(company.stage, Some(CompanyStage::Seed));
    assert_eq!(company.merged_intake().financial_data.arr, Some(1_200_000.0));
    assert!(company
        .documents
        .iter()
        .any(|d| d.kind == DocumentKind::FinancialStatement));
}

#[test]
fn finance_fixture_has_burn_inputs() {
    let value = load_fixture_value("scoring/finance_module.json");
    assert_eq!(value["company_data"]["burn_multiple"]["values"]["net_burn"], 150000.0);
    assert_eq!(value["company_data"]["burn_multiple"]["values"]["net_new_arr"], 100000.0);
}
