use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Actions recorded in an evaluation's audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    EvaluationStarted,
    DomainClassified,
    ModulesSelected,
    EvidenceCollected,
    ApiIngestionFailed,
    ModuleScored,
    RisksAssessed,
    BiasAnalyzed,
    DecisionGenerated,
    EvaluationCompleted,
    EvaluationFailed,
    MetricOverridden,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EvaluationStarted => "evaluation_started",
            Self::DomainClassified => "domain_classified",
            Self::ModulesSelected => "modules_selected",
            Self::EvidenceCollected => "evidence_collected",
            Self::ApiIngestionFailed => "api_ingestion_failed",
            Self::ModuleScored => "module_scored",
            Self::RisksAssessed => "risks_assessed",
            Self::BiasAnalyzed => "bias_analyzed",
            Self::DecisionGenerated => "decision_generated",
            Self::EvaluationCompleted => "evaluation_completed",
            Self::EvaluationFailed => "evaluation_failed",
            Self::MetricOverridden => "metric_overridden",
        }
    }
}

/// Who performed the action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditActor {
    System,
    Analyst(String),
}

impl AuditActor {
    pub fn name(&self) -> &str {
        match self {
            Self::System => crate::constants::SYSTEM_ACTOR,
            Self::Analyst(name) => name,
        }
    }
}

/// An entry in the append-only audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub sequence: u64,
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
    /// JSON details about the action.
    pub details: serde_json::Value,
    pub actor: AuditActor,
    /// Hash of the previous entry, empty for the first.
    pub prev_hash: String,
    /// blake3 over this entry's content and `prev_hash`.
    pub hash: String,
}

impl AuditEntry {
    fn compute_hash(
        sequence: u64,
        timestamp: &DateTime<Utc>,
        action: AuditAction,
        details: &serde_json::Value,
        actor: &AuditActor,
        prev_hash: &str,
    ) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&sequence.to_le_bytes());
        hasher.update(timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true).as_bytes());
        hasher.update(action.as_str().as_bytes());
        hasher.update(details.to_string().as_bytes());
        hasher.update(actor.name().as_bytes());
        hasher.update(prev_hash.as_bytes());
        hasher.finalize().to_hex().to_string()
    }

    fn recompute_hash(&self) -> String {
        Self::compute_hash(
            self.sequence,
            &self.timestamp,
            self.action,
            &self.details,
            &self.actor,
            &self.prev_hash,
        )
    }
}

/// Hash-chained, append-only log. Entries cannot be edited or reordered
/// through this API, and [`AuditLog::verify`] detects tampering with a
/// deserialized copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(
        &mut self,
        action: AuditAction,
        details: serde_json::Value,
        actor: AuditActor,
    ) -> &AuditEntry {
        let sequence = self.entries.len() as u64;
        let prev_hash = self
            .entries
            .last()
            .map(|e| e.hash.clone())
            .unwrap_or_default();
        let timestamp = Utc::now();
        let hash = AuditEntry::compute_hash(sequence, &timestamp, action, &details, &actor, &prev_hash);
        self.entries.push(AuditEntry {
            sequence,
            timestamp,
            action,
            details,
            actor,
            prev_hash,
            hash,
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AuditEntry> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&AuditEntry> {
        self.entries.last()
    }

    /// True when sequence numbers are contiguous and every hash links.
    pub fn verify(&self) -> bool {
        let mut prev = String::new();
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.sequence != i as u64 || entry.prev_hash != prev || entry.recompute_hash() != entry.hash {
                return false;
            }
            prev = entry.hash.clone();
        }
        true
    }
}

impl<'a> IntoIterator for &'a AuditLog {
    type Item = &'a AuditEntry;
    type IntoIter = std::slice::Iter<'a, AuditEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
