//! Form validation for intervention reports
//!
//! Each report kind has a fixed list of [`FieldRule`]s. Rules run in
//! order and only the first failing rule of a field is reported, so a
//! missing phone number says "required" rather than "invalid format".

mod rules;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::{CriKind, parse_timestamp};

pub use rules::{COMMON_RULES, PROJET_RULES, SERVICE_RULES};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Check applied to one form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// Present and not blank
    Required,
    /// Ten digits, when present
    Phone,
    /// Plausible email address, when present
    Email,
    /// Number greater than or equal to zero, when present
    NonNegative,
    /// Parseable date or time, when present
    Date,
    /// One of the listed values, when present
    OneOf(&'static [&'static str]),
    /// Required only while `field` is true
    RequiredWhen { field: &'static str },
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub validator: Validator,
    pub message: &'static str,
}

impl FieldRule {
    pub const fn new(field: &'static str, validator: Validator, message: &'static str) -> Self {
        Self { field, validator, message }
    }

    fn check(&self, fields: &Map<String, Value>) -> bool {
        let value = fields.get(self.field).filter(|v| !is_blank(v));
        match self.validator {
            Validator::Required => value.is_some(),
            Validator::RequiredWhen { field } => {
                !fields.get(field).is_some_and(is_truthy) || value.is_some()
            }
            Validator::Phone => value.is_none_or(|v| {
                v.as_str()
                    .map(str::trim)
                    .is_some_and(|s| s.len() == 10 && s.bytes().all(|b| b.is_ascii_digit()))
            }),
            Validator::Email => {
                value.is_none_or(|v| v.as_str().is_some_and(|s| EMAIL_RE.is_match(s.trim())))
            }
            Validator::NonNegative => value.is_none_or(|v| as_number(v).is_some_and(|n| n >= 0.0)),
            Validator::Date => value.is_none_or(|v| parse_timestamp(v).is_some()),
            Validator::OneOf(options) => {
                value.is_none_or(|v| v.as_str().is_some_and(|s| options.contains(&s.trim())))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All field errors of a rejected form, in rule order
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} champ(s) invalide(s): {}", .errors.len(), summary(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Message for `field`, if it failed
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate a report form against the rules of its kind
pub fn validate(kind: CriKind, fields: &Map<String, Value>) -> Result<(), ValidationErrors> {
    let specific = match kind {
        CriKind::Projet => PROJET_RULES,
        CriKind::Service => SERVICE_RULES,
    };
    validate_with(COMMON_RULES.iter().chain(specific), fields)
}

/// Validate against an arbitrary rule list
pub fn validate_with<'a>(
    rules: impl IntoIterator<Item = &'a FieldRule>,
    fields: &Map<String, Value>,
) -> Result<(), ValidationErrors> {
    let mut errors: Vec<FieldError> = Vec::new();
    for rule in rules {
        if errors.iter().any(|e| e.field == rule.field) {
            continue;
        }
        if !rule.check(fields) {
            errors.push(FieldError {
                field: rule.field.to_string(),
                message: rule.message.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { errors })
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.trim(), "true" | "oui" | "1"),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    fn common() -> Map<String, Value> {
        form(json!({
            "date_intervention": "2026-10-16",
            "heure_debut": "2026-10-16T08:00:00Z",
            "heure_fin": "2026-10-16T10:00:00Z",
            "nom_client": "ACME",
            "site": "Usine Nord",
            "adresse": "1 rue du Port",
            "contact_client": "M. Martin",
            "nom_technicien": "Durand",
            "signature_technicien": "data:image/png;base64,AAAA"
        }))
    }

    fn valid_service() -> Map<String, Value> {
        let mut fields = common();
        fields.extend(form(json!({
            "type_demande": "Dépannage",
            "priorite": "Haute",
            "description_demande": "Imprimante HS",
            "diagnostic_realise": "Fusible",
            "actions_effectuees": "Remplacement fusible",
            "temps_intervention": 1.5,
            "statut_resolution": "Résolu"
        })));
        fields
    }

    #[test]
    fn test_empty_projet_form_lists_required_fields() {
        let err = validate(CriKind::Projet, &Map::new()).unwrap_err();
        assert_eq!(err.get("site"), Some("Le site est requis"));
        assert_eq!(err.get("nom_projet"), Some("Le nom du projet est requis"));
        assert_eq!(err.get("statut_projet"), Some("Le statut est requis"));
        // Optional fields stay silent when absent
        assert_eq!(err.get("telephone_contact"), None);
        assert_eq!(err.get("email_contact"), None);
    }

    #[test]
    fn test_valid_service_form() {
        assert!(validate(CriKind::Service, &valid_service()).is_ok());
    }

    #[test]
    fn test_phone_and_email_formats() {
        let mut fields = common();
        fields.insert("telephone_contact".into(), json!("01 23 45"));
        fields.insert("email_contact".into(), json!("pas-un-email"));
        let err = validate(CriKind::Projet, &fields).unwrap_err();
        assert_eq!(err.get("telephone_contact"), Some("Numéro invalide (10 chiffres)"));
        assert_eq!(err.get("email_contact"), Some("Email invalide"));

        fields.insert("telephone_contact".into(), json!("0123456789"));
        fields.insert("email_contact".into(), json!("tech@example.fr"));
        let err = validate(CriKind::Projet, &fields).unwrap_err();
        assert_eq!(err.get("telephone_contact"), None);
        assert_eq!(err.get("email_contact"), None);
    }

    #[test]
    fn test_negative_time_is_rejected() {
        let mut fields = valid_service();
        fields.insert("temps_intervention".into(), json!(-2));
        let err = validate(CriKind::Service, &fields).unwrap_err();
        assert_eq!(err.errors, vec![FieldError {
            field: "temps_intervention".into(),
            message: "Doit être positif".into(),
        }]);
    }

    #[test]
    fn test_follow_up_date_required_only_when_flagged() {
        let mut fields = valid_service();
        fields.insert("intervention_supplementaire".into(), json!(false));
        assert!(validate(CriKind::Service, &fields).is_ok());

        fields.insert("intervention_supplementaire".into(), json!(true));
        let err = validate(CriKind::Service, &fields).unwrap_err();
        assert_eq!(err.get("date_suivi"), Some("Date de suivi requise"));

        fields.insert("date_suivi".into(), json!("2026-11-02"));
        assert!(validate(CriKind::Service, &fields).is_ok());
    }

    #[test]
    fn test_only_first_error_per_field() {
        let mut fields = valid_service();
        fields.insert("priorite".into(), json!("Urgentissime"));
        fields.insert("heure_fin".into(), json!("plus tard"));
        let err = validate(CriKind::Service, &fields).unwrap_err();
        assert_eq!(err.len(), 2);
        assert_eq!(err.get("priorite"), Some("Priorité inconnue"));
        assert_eq!(err.get("heure_fin"), Some("Heure invalide"));
        assert!(err.to_string().starts_with("2 champ(s) invalide(s)"));
    }
}
