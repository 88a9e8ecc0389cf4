//! src/app/etat.rs
//!
//! État hôte (sans vue).
//!
//! Rôle : relier l’afficheur (machine d’état), l’historique et l’observateur
//! de saisie. Toute évaluation passe par l’afficheur ; ici on ne fait que
//! distribuer les événements et ranger les résultats.
//!
//! Contrats :
//! - Un échec d’historique ou de journal n’interrompt jamais la saisie
//!   (avertissement + message UI).
//! - L’observateur est démarré / arrêté explicitement par l’hôte.

use tracing::warn;

use crate::config::Config;
use crate::noyau::OptionsMoteur;

use super::afficheur::{Afficheur, Evenement};
use super::historique::Historique;
use super::journal::{JournalFrappes, ObservateurSaisie};

pub struct AppCalc {
    // --- écran ---
    pub afficheur: Afficheur,

    // --- paramètres du noyau ---
    pub options: OptionsMoteur,

    // --- historique ---
    pub historique: Historique,

    // --- UX ---
    /// Dernier problème côté hôte (fichier d’historique, journal), vide sinon.
    pub avertissement: String,

    journal: Option<Box<dyn ObservateurSaisie>>,
}

impl AppCalc {
    pub fn new(config: &Config) -> Self {
        let max = config.historique.max_entrees;
        let mut historique = match &config.historique.fichier {
            Some(chemin) => Historique::avec_fichier(chemin, max),
            None => Historique::en_memoire(max),
        };

        let mut avertissement = String::new();
        if let Err(e) = historique.charger() {
            warn!(erreur = ?e, "historique non chargé");
            avertissement = e.to_string();
        }

        let journal: Option<Box<dyn ObservateurSaisie>> = if config.journal.actif {
            config
                .journal
                .fichier
                .as_ref()
                .map(|chemin| Box::new(JournalFrappes::new(chemin)) as Box<dyn ObservateurSaisie>)
        } else {
            None
        };

        Self {
            afficheur: Afficheur::default(),
            options: config.moteur.clone(),
            historique,
            avertissement,
            journal,
        }
    }

    /// Remplace l’observateur (l’ancien est arrêté).
    pub fn avec_observateur(mut self, obs: Box<dyn ObservateurSaisie>) -> Self {
        self.arreter_journal();
        self.journal = Some(obs);
        self
    }

    pub fn demarrer_journal(&mut self) {
        let Some(obs) = self.journal.as_mut() else {
            return;
        };
        if let Err(e) = obs.demarrer() {
            warn!(erreur = ?e, "journal de frappes désactivé");
            self.avertissement = e.to_string();
            self.journal = None;
        }
    }

    pub fn arreter_journal(&mut self) {
        if let Some(obs) = self.journal.as_mut() {
            obs.arreter();
        }
    }

    /* ------------------------ Événements ------------------------ */

    /// Point d’entrée unique des boutons et du clavier.
    pub fn appuyer(&mut self, ev: Evenement) {
        if let Some(obs) = self.journal.as_mut() {
            obs.observer(&ev);
        }

        if let Some(calcul) = self.afficheur.traiter(ev, &self.options) {
            if let Err(e) = self.historique.ajouter(calcul) {
                warn!(erreur = ?e, "calcul non sauvegardé");
                self.avertissement = e.to_string();
            }
        }
    }

    pub fn effacer_historique(&mut self) {
        match self.historique.effacer() {
            Ok(()) => self.avertissement.clear(),
            Err(e) => {
                warn!(erreur = ?e, "historique non effacé");
                self.avertissement = e.to_string();
            }
        }
    }
}

/// Fermeture de l’application : le journal est vidé et refermé.
impl Drop for AppCalc {
    fn drop(&mut self) {
        self.arreter_journal();
    }
}
