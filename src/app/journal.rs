//! src/app/journal.rs
//!
//! Journal de frappes : observateur injecté, cycle de vie explicite.
//!
//! L’hôte possède l’observateur, l’allume au démarrage et l’éteint à la
//! fermeture. Seuls les événements que l’hôte lui passe sont enregistrés
//! (aucune écoute clavier globale).

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use thiserror::Error;
use tracing::{info, warn};

use super::afficheur::Evenement;

#[derive(Debug, Error)]
pub enum ErreurJournal {
    #[error("ouverture du journal {chemin:?} impossible")]
    Ouverture {
        chemin: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("écriture du journal impossible")]
    Ecriture(#[from] std::io::Error),
}

pub trait ObservateurSaisie {
    fn demarrer(&mut self) -> Result<(), ErreurJournal>;

    /// Ne doit jamais bloquer la saisie : un échec coupe l’observateur.
    fn observer(&mut self, ev: &Evenement);

    fn arreter(&mut self);
}

/// Fichier texte en ajout : en-tête de session puis une ligne par touche.
#[derive(Debug)]
pub struct JournalFrappes {
    chemin: PathBuf,
    fichier: Option<File>,
}

impl JournalFrappes {
    pub fn new(chemin: impl Into<PathBuf>) -> Self {
        Self {
            chemin: chemin.into(),
            fichier: None,
        }
    }

    pub fn actif(&self) -> bool {
        self.fichier.is_some()
    }
}

impl ObservateurSaisie for JournalFrappes {
    fn demarrer(&mut self) -> Result<(), ErreurJournal> {
        if self.fichier.is_some() {
            return Ok(());
        }

        let ouverture = |source: std::io::Error| ErreurJournal::Ouverture {
            chemin: self.chemin.clone(),
            source,
        };

        if let Some(parent) = self.chemin.parent() {
            std::fs::create_dir_all(parent).map_err(ouverture)?;
        }
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.chemin)
            .map_err(ouverture)?;

        let maintenant = Local::now();
        writeln!(
            f,
            "--- Session débutée le {} ---",
            maintenant.format("%d/%m/%Y à %H:%M:%S")
        )?;

        info!(chemin = %self.chemin.display(), "journal de frappes démarré");
        self.fichier = Some(f);
        Ok(())
    }

    fn observer(&mut self, ev: &Evenement) {
        let Some(f) = self.fichier.as_mut() else {
            return;
        };

        let heure = Local::now().format("%H:%M:%S");
        if let Err(e) = writeln!(f, "[{heure}] Touche: {}", ev.etiquette()) {
            warn!(erreur = %e, "journal de frappes coupé");
            self.fichier = None;
        }
    }

    fn arreter(&mut self) {
        if let Some(mut f) = self.fichier.take() {
            if let Err(e) = f.flush() {
                warn!(erreur = %e, "vidage du journal de frappes");
            }
            info!(chemin = %self.chemin.display(), "journal de frappes arrêté");
        }
    }
}
