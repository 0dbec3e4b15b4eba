//! Translation lookup
//!
//! Keys follow the `namespace:group:Key` layout used across the app
//! (`transit:transitAgency:List`). Unknown keys render as the key itself.

use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Maps a translation key to localized text
pub trait Translate {
    fn t(&self, key: &str) -> String;
}

const LOCALE_EN: &str = r#"{
    "transit:transitAgency:List": "Transit Agency List",
    "transit:transitAgency:New": "New agency",
    "transit:transitAgency:NewUnsaved": "New agency (unsaved)",
    "transit:transitAgency:Agency": "Agency",
    "transit:transitAgency:Acronym": "Acronym",
    "transit:transitAgency:Name": "Name",
    "transit:transitLine:New": "New line",
    "transit:transitLine:NewUnsaved": "New line (unsaved)",
    "transit:transitLine:Line": "Line",
    "transit:transitLine:Lines": "lines",
    "transit:transitLine:Shortname": "Short name",
    "transit:transitLine:Longname": "Long name",
    "main:Color": "Color",
    "main:Save": "Save",
    "main:Cancel": "Cancel",
    "main:Left": "Left",
    "main:Right": "Right",
    "main:Preferences": "Preferences",
    "main:NothingSelected": "Select or create an agency to start editing.",
    "main:preferences:General": "General",
    "main:preferences:DefaultSection": "Default section",
    "main:preferences:InfoPanelPosition": "Info panel position",
    "main:preferences:DefaultWalkingSpeedKph": "Default walking speed (km/h)",
    "main:preferences:DefaultWalkingSpeedKphHelp": "Used for access and egress walking times when no other speed is specified.",
    "main:preferences:ResetToDefault": "Reset to default value",
    "main:sections:Agencies": "Agencies, lines and paths",
    "main:sections:Nodes": "Stop nodes",
    "main:sections:Services": "Services",
    "main:sections:Scenarios": "Scenarios",
    "main:sections:Routing": "Routing",
    "main:sections:AccessibilityMap": "Accessibility map",
    "main:sections:BatchCalculation": "Batch calculation",
    "main:sections:Simulations": "Simulations",
    "main:sections:GtfsImport": "GTFS import",
    "main:sections:GtfsExport": "GTFS export"
}"#;

const LOCALE_FR: &str = r#"{
    "transit:transitAgency:List": "Liste des agences de transport",
    "transit:transitAgency:New": "Nouvelle agence",
    "transit:transitAgency:NewUnsaved": "Nouvelle agence (non enregistrée)",
    "transit:transitAgency:Agency": "Agence",
    "transit:transitAgency:Acronym": "Acronyme",
    "transit:transitAgency:Name": "Nom",
    "transit:transitLine:New": "Nouvelle ligne",
    "transit:transitLine:NewUnsaved": "Nouvelle ligne (non enregistrée)",
    "transit:transitLine:Line": "Ligne",
    "transit:transitLine:Lines": "lignes",
    "transit:transitLine:Shortname": "Numéro",
    "transit:transitLine:Longname": "Nom",
    "main:Color": "Couleur",
    "main:Save": "Enregistrer",
    "main:Cancel": "Annuler",
    "main:Left": "Gauche",
    "main:Right": "Droite",
    "main:Preferences": "Préférences",
    "main:NothingSelected": "Sélectionnez ou créez une agence pour commencer.",
    "main:preferences:General": "Général",
    "main:preferences:DefaultSection": "Section par défaut",
    "main:preferences:InfoPanelPosition": "Position du panneau d'information",
    "main:preferences:DefaultWalkingSpeedKph": "Vitesse de marche par défaut (km/h)",
    "main:preferences:DefaultWalkingSpeedKphHelp": "Utilisée pour les temps d'accès et de sortie à pied lorsqu'aucune autre vitesse n'est précisée.",
    "main:preferences:ResetToDefault": "Réinitialiser à la valeur par défaut",
    "main:sections:Agencies": "Agences, lignes et trajets",
    "main:sections:Nodes": "Noeuds d'arrêts",
    "main:sections:Services": "Services",
    "main:sections:Scenarios": "Scénarios",
    "main:sections:Routing": "Calcul de chemin",
    "main:sections:AccessibilityMap": "Carte d'accessibilité",
    "main:sections:BatchCalculation": "Calcul en lot",
    "main:sections:Simulations": "Simulations",
    "main:sections:GtfsImport": "Importation GTFS",
    "main:sections:GtfsExport": "Exportation GTFS"
}"#;

/// Embedded translation table for one language
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    language: String,
    entries: HashMap<String, String>,
}

impl Catalog {
    /// Catalog for `language`, English when the language is not bundled
    pub fn for_language(language: &str) -> Self {
        let (language, source) = match language {
            "fr" => ("fr", LOCALE_FR),
            "en" => ("en", LOCALE_EN),
            other => {
                warn!(language = other, "Unsupported language, falling back to English");
                ("en", LOCALE_EN)
            }
        };
        let entries = match serde_json::from_str::<Map<String, Value>>(source) {
            Ok(map) => map
                .into_iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
                .collect(),
            Err(e) => {
                warn!(error = %e, language, "Embedded locale failed to parse");
                HashMap::new()
            }
        };
        debug!(language, count = entries.len(), "Translations loaded");
        Self {
            language: language.to_string(),
            entries,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

impl Translate for Catalog {
    fn t(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
