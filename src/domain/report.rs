use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::kind::CriKind;
use super::record::{InterventionRecord, lenient_id, lenient_timestamp, parse_timestamp};

/// A stored intervention report (CRI)
///
/// Form fields are kept as a flat JSON object next to the identity
/// fields, which is also how the report list is persisted.
///
/// Lists written by older app versions carry numeric ids and epoch
/// millisecond timestamps; both are accepted. An unreadable creation time
/// is kept as `None` rather than guessed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriReport {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default)]
    pub numero_cri: String,
    #[serde(rename = "type")]
    pub kind: CriKind,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl CriReport {
    /// Create an unsaved report (no id, no number yet)
    pub fn new(kind: CriKind, fields: Map<String, Value>) -> Self {
        Self {
            id: String::new(),
            numero_cri: String::new(),
            kind,
            created_at: Some(Utc::now()),
            fields,
        }
    }

    /// Text value of a form field, `None` when missing or blank
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn site_name(&self) -> Option<&str> {
        self.field_str("site")
    }

    pub fn client_name(&self) -> Option<&str> {
        self.field_str("nom_client")
    }

    pub fn intervention_type(&self) -> Option<&str> {
        self.field_str(self.kind.type_field())
    }

    pub fn status(&self) -> Option<&str> {
        self.field_str(self.kind.status_field())
    }

    pub fn is_completed(&self) -> bool {
        self.status() == Some(self.kind.completed_status())
    }

    /// Derive the record the dashboard aggregates
    pub fn to_record(&self) -> InterventionRecord {
        let site_name = self.site_name().map(str::to_string);
        InterventionRecord {
            site_id: site_name.as_deref().map(site_id_for),
            site_name,
            intervention_type: self.intervention_type().map(str::to_string),
            start_time: self.fields.get("heure_debut").and_then(parse_timestamp),
            end_time: self.fields.get("heure_fin").and_then(parse_timestamp),
            completed: self.is_completed(),
            created_at: self.created_at,
        }
    }
}

/// Site identifier derived from the free-text site name
pub fn site_id_for(site_name: &str) -> String {
    site_name.trim().to_lowercase()
}
