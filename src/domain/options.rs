//! Fixed option sets offered by the report forms' select fields

pub const PROJECT_INTERVENTION_TYPES: &[&str] = &[
    "Installation matériel",
    "Configuration",
    "Mise à jour",
    "Formation",
    "Audit",
    "Autre",
];

pub const PROJECT_PHASES: &[&str] = &[
    "Étude",
    "Installation",
    "Configuration",
    "Tests",
    "Mise en production",
    "Clôture",
];

pub const PROJECT_STATUSES: &[&str] = &["En cours", "En attente validation", "Terminé", "Suspendu"];

pub const SERVICE_REQUEST_TYPES: &[&str] = &[
    "Maintenance préventive",
    "Maintenance corrective",
    "Dépannage",
    "Support technique",
    "Assistance utilisateur",
    "Autre",
];

pub const SERVICE_PRIORITIES: &[&str] = &["Basse", "Normale", "Haute", "Critique"];

pub const RESOLUTION_STATUSES: &[&str] = &[
    "Résolu",
    "Partiellement résolu",
    "Non résolu",
    "En attente pièces",
    "Escaladé niveau 2",
];

pub const SATISFACTION_LEVELS: &[&str] = &[
    "Très satisfait",
    "Satisfait",
    "Neutre",
    "Insatisfait",
    "Très insatisfait",
];
