// src/config.rs
//
// Configuration (TOML)
// --------------------
// Emplacement : $CALCULATRICE_CONFIG, sinon <config_dir>/calculatrice-rpn/config.toml
//
//   [moteur]
//   operateurs = ["+", "-", "×", "÷", "^", "%"]
//   notation_scientifique = true
//   caractere_inconnu = "rejeter"      # ou "ignorer"
//   largeur_max = 10
//   multiplication_implicite = true
//
//   [historique]
//   fichier = "/chemin/historique.txt"
//   max_entrees = 50
//
//   [journal]
//   actif = false
//   fichier = "/chemin/journal_frappes.txt"
//
// Fichier absent => défauts. Fichier illisible ou invalide => avertissement + défauts.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::noyau::OptionsMoteur;

const NOM_APP: &str = "calculatrice-rpn";
const VAR_CONFIG: &str = "CALCULATRICE_CONFIG";

/// Borne de l’historique (dernière calculatrice).
pub const MAX_HISTORIQUE_DEFAUT: usize = 50;

#[derive(Debug, Error)]
pub enum ErreurConfig {
    #[error("lecture de {chemin:?} impossible")]
    Lecture {
        chemin: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("configuration invalide dans {chemin:?}")]
    Syntaxe {
        chemin: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub moteur: OptionsMoteur,
    pub historique: ConfigHistorique,
    pub journal: ConfigJournal,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfigHistorique {
    /// None : historique en mémoire seulement.
    pub fichier: Option<PathBuf>,
    pub max_entrees: usize,
}

impl Default for ConfigHistorique {
    fn default() -> Self {
        Self {
            fichier: dossier_donnees().map(|d| d.join("historique.txt")),
            max_entrees: MAX_HISTORIQUE_DEFAUT,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfigJournal {
    pub actif: bool,
    pub fichier: Option<PathBuf>,
}

impl Default for ConfigJournal {
    fn default() -> Self {
        Self {
            actif: false,
            fichier: dossier_donnees().map(|d| d.join("journal_frappes.txt")),
        }
    }
}

fn dossier_donnees() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join(NOM_APP))
}

impl Config {
    pub fn chemin_defaut() -> Option<PathBuf> {
        if let Some(p) = std::env::var_os(VAR_CONFIG) {
            return Some(PathBuf::from(p));
        }
        dirs::config_dir().map(|d| d.join(NOM_APP).join("config.toml"))
    }

    pub fn depuis_toml(texte: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(texte)
    }

    /// `Ok(None)` si le fichier n’existe pas.
    pub fn depuis_fichier(chemin: &Path) -> Result<Option<Self>, ErreurConfig> {
        let texte = match std::fs::read_to_string(chemin) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ErreurConfig::Lecture {
                    chemin: chemin.to_path_buf(),
                    source,
                })
            }
        };

        Self::depuis_toml(&texte)
            .map(Some)
            .map_err(|source| ErreurConfig::Syntaxe {
                chemin: chemin.to_path_buf(),
                source,
            })
    }

    /// Charge la configuration de l’emplacement par défaut, sans jamais échouer.
    pub fn charger() -> Self {
        let Some(chemin) = Self::chemin_defaut() else {
            debug!("aucun dossier de configuration, défauts utilisés");
            return Self::default();
        };

        match Self::depuis_fichier(&chemin) {
            Ok(Some(cfg)) => {
                info!(chemin = %chemin.display(), "configuration chargée");
                cfg
            }
            Ok(None) => {
                debug!(chemin = %chemin.display(), "pas de configuration, défauts utilisés");
                Self::default()
            }
            Err(e) => {
                warn!(erreur = ?e, "configuration ignorée, défauts utilisés");
                Self::default()
            }
        }
    }
}
