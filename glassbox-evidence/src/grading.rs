//! Source-type grading and authority lookup.

use glassbox_core::models::EvidenceGrade;

/// Verified sources: OAuth APIs and licensed databases.
pub const VERIFIED_SOURCES: &[&str] = &[
    "stripe_api",
    "chargebee_api",
    "salesforce_api",
    "hubspot_api",
    "mixpanel_api",
    "amplitude_api",
    "github_api",
    "licensed_db",
];

/// Public and third-party sources.
pub const PUBLIC_SOURCES: &[&str] = &[
    "crunchbase",
    "pitchbook",
    "techcrunch",
    "bloomberg",
    "reuters",
    "wsj",
    "patent_office",
    "app_store",
    "google_play",
    "linkedin",
    "glassdoor",
    "news_api",
    "social_media",
];

/// Grade a source type. Anything unrecognised is self-reported.
pub fn grade(source_type: &str) -> EvidenceGrade {
    if VERIFIED_SOURCES.contains(&source_type) {
        EvidenceGrade::E3
    } else if PUBLIC_SOURCES.contains(&source_type) {
        EvidenceGrade::E2
    } else {
        EvidenceGrade::E1
    }
}

/// Built-in authority for a source type, if it has one.
pub fn default_authority(source_type: &str) -> Option<f64> {
    let authority = match source_type {
        // E3
        "stripe_api" | "chargebee_api" => 0.95,
        "salesforce_api" | "hubspot_api" | "mixpanel_api" | "amplitude_api" => 0.90,
        "github_api" => 0.85,
        "licensed_db" => 0.90,
        // E2
        "crunchbase" => 0.75,
        "pitchbook" => 0.80,
        "techcrunch" => 0.70,
        "bloomberg" | "reuters" => 0.85,
        "wsj" => 0.80,
        "patent_office" => 0.90,
        "app_store" | "google_play" => 0.75,
        "linkedin" => 0.65,
        "glassdoor" => 0.60,
        // E1
        "pitch_deck" => 0.40,
        "founder_interview" => 0.35,
        "company_website" => 0.45,
        "press_release" => 0.30,
        "investor_update" => 0.50,
        "financial_statement" => 0.50,
        "business_plan" => 0.35,
        _ => return None,
    };
    Some(authority)
}
