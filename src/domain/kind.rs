use serde::{Deserialize, Serialize};

/// The two report variants captured in the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriKind {
    /// Project follow-up (installation, configuration, audits...)
    Projet,
    /// Service call (breakdowns, support, maintenance)
    Service,
}

impl CriKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CriKind::Projet => "projet",
            CriKind::Service => "service",
        }
    }

    /// Prefix used in report numbers (`CRI-PROJ-...`, `CRI-SERV-...`)
    pub fn number_prefix(&self) -> &'static str {
        match self {
            CriKind::Projet => "PROJ",
            CriKind::Service => "SERV",
        }
    }

    /// Form field holding the intervention category
    pub fn type_field(&self) -> &'static str {
        match self {
            CriKind::Projet => "type_intervention",
            CriKind::Service => "type_demande",
        }
    }

    /// Form field holding the outcome status
    pub fn status_field(&self) -> &'static str {
        match self {
            CriKind::Projet => "statut_projet",
            CriKind::Service => "statut_resolution",
        }
    }

    /// Status value that marks the intervention as completed
    pub fn completed_status(&self) -> &'static str {
        match self {
            CriKind::Projet => "Terminé",
            CriKind::Service => "Résolu",
        }
    }
}

impl std::fmt::Display for CriKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CriKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "projet" | "proj" => Ok(CriKind::Projet),
            "service" | "serv" => Ok(CriKind::Service),
            other => Err(format!("Unknown report kind: {other} (expected projet or service)")),
        }
    }
}
