use super::FieldRule;
use super::Validator::{Date, Email, NonNegative, OneOf, Phone, Required, RequiredWhen};
use crate::domain::options::{
    PROJECT_INTERVENTION_TYPES, PROJECT_PHASES, PROJECT_STATUSES, RESOLUTION_STATUSES,
    SATISFACTION_LEVELS, SERVICE_PRIORITIES, SERVICE_REQUEST_TYPES,
};

/// Rules shared by both report kinds
pub const COMMON_RULES: &[FieldRule] = &[
    FieldRule::new("date_intervention", Required, "La date est requise"),
    FieldRule::new("date_intervention", Date, "Date invalide"),
    FieldRule::new("heure_debut", Required, "L'heure de début est requise"),
    FieldRule::new("heure_debut", Date, "Heure invalide"),
    FieldRule::new("heure_fin", Required, "L'heure de fin est requise"),
    FieldRule::new("heure_fin", Date, "Heure invalide"),
    FieldRule::new("nom_client", Required, "Le nom du client est requis"),
    FieldRule::new("site", Required, "Le site est requis"),
    FieldRule::new("adresse", Required, "L'adresse est requise"),
    FieldRule::new("contact_client", Required, "Le contact client est requis"),
    FieldRule::new("telephone_contact", Phone, "Numéro invalide (10 chiffres)"),
    FieldRule::new("nom_technicien", Required, "Le nom du technicien est requis"),
    FieldRule::new("signature_technicien", Required, "La signature technicien est requise"),
];

pub const PROJET_RULES: &[FieldRule] = &[
    FieldRule::new("email_contact", Email, "Email invalide"),
    FieldRule::new("nom_projet", Required, "Le nom du projet est requis"),
    FieldRule::new("phase_projet", Required, "La phase du projet est requise"),
    FieldRule::new("phase_projet", OneOf(PROJECT_PHASES), "Phase inconnue"),
    FieldRule::new("type_intervention", Required, "Le type d'intervention est requis"),
    FieldRule::new("type_intervention", OneOf(PROJECT_INTERVENTION_TYPES), "Type d'intervention inconnu"),
    FieldRule::new("description_travaux", Required, "La description est requise"),
    FieldRule::new("prochaine_intervention", Date, "Date invalide"),
    FieldRule::new("statut_projet", Required, "Le statut est requis"),
    FieldRule::new("statut_projet", OneOf(PROJECT_STATUSES), "Statut inconnu"),
];

pub const SERVICE_RULES: &[FieldRule] = &[
    FieldRule::new("type_demande", Required, "Le type de demande est requis"),
    FieldRule::new("type_demande", OneOf(SERVICE_REQUEST_TYPES), "Type de demande inconnu"),
    FieldRule::new("priorite", Required, "La priorité est requise"),
    FieldRule::new("priorite", OneOf(SERVICE_PRIORITIES), "Priorité inconnue"),
    FieldRule::new("description_demande", Required, "La description est requise"),
    FieldRule::new("diagnostic_realise", Required, "Le diagnostic est requis"),
    FieldRule::new("actions_effectuees", Required, "Les actions effectuées sont requises"),
    FieldRule::new("temps_intervention", Required, "Le temps est requis"),
    FieldRule::new("temps_intervention", NonNegative, "Doit être positif"),
    FieldRule::new("statut_resolution", Required, "Le statut est requis"),
    FieldRule::new("statut_resolution", OneOf(RESOLUTION_STATUSES), "Statut inconnu"),
    FieldRule::new(
        "date_suivi",
        RequiredWhen { field: "intervention_supplementaire" },
        "Date de suivi requise",
    ),
    FieldRule::new("date_suivi", Date, "Date invalide"),
    FieldRule::new("satisfaction_client", OneOf(SATISFACTION_LEVELS), "Niveau de satisfaction inconnu"),
];
