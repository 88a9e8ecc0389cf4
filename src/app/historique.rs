//! src/app/historique.rs
//!
//! Historique des calculs : mémoire bornée + fichier texte optionnel.
//!
//! Format du fichier : une ligne "expression = resultat" par calcul, du plus
//! ancien au plus récent. Le fichier est réécrit en entier à chaque ajout.

use std::collections::VecDeque;
use std::io::ErrorKind;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Calcul {
    pub expression: String,
    pub resultat: String,
}

impl Calcul {
    pub fn ligne(&self) -> String {
        format!("{} = {}", self.expression, self.resultat)
    }

    /// Coupe au premier '=' ; les lignes sans '=' sont ignorées.
    pub fn depuis_ligne(ligne: &str) -> Option<Self> {
        let (expression, resultat) = ligne.trim().split_once('=')?;
        Some(Self {
            expression: expression.trim().to_string(),
            resultat: resultat.trim().to_string(),
        })
    }
}

#[derive(Debug, Error)]
pub enum ErreurHistorique {
    #[error("lecture de l’historique {chemin:?} impossible")]
    Lecture {
        chemin: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("écriture de l’historique {chemin:?} impossible")]
    Ecriture {
        chemin: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, Debug)]
pub struct Historique {
    entrees: VecDeque<Calcul>,
    max_entrees: usize,
    fichier: Option<PathBuf>,
}

impl Historique {
    pub fn en_memoire(max_entrees: usize) -> Self {
        Self {
            entrees: VecDeque::new(),
            max_entrees: max_entrees.max(1),
            fichier: None,
        }
    }

    /// Ne lit rien : appeler `charger` ensuite.
    pub fn avec_fichier(chemin: impl Into<PathBuf>, max_entrees: usize) -> Self {
        Self {
            fichier: Some(chemin.into()),
            ..Self::en_memoire(max_entrees)
        }
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }

    /// Plus récent en premier.
    pub fn iter_recent(&self) -> impl Iterator<Item = &Calcul> {
        self.entrees.iter().rev()
    }

    /// Recharge depuis le fichier. Un fichier trop long est tronqué puis réécrit.
    pub fn charger(&mut self) -> Result<(), ErreurHistorique> {
        let Some(chemin) = self.fichier.clone() else {
            return Ok(());
        };

        let texte = match std::fs::read_to_string(&chemin) {
            Ok(t) => t,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(source) => return Err(ErreurHistorique::Lecture { chemin, source }),
        };

        self.entrees = texte.lines().filter_map(Calcul::depuis_ligne).collect();

        if self.tronquer() {
            self.sauvegarder()?;
        }
        Ok(())
    }

    pub fn ajouter(&mut self, calcul: Calcul) -> Result<(), ErreurHistorique> {
        self.entrees.push_back(calcul);
        self.tronquer();
        self.sauvegarder()
    }

    /// Vide la mémoire et supprime le fichier.
    pub fn effacer(&mut self) -> Result<(), ErreurHistorique> {
        self.entrees.clear();

        let Some(chemin) = &self.fichier else {
            return Ok(());
        };
        match std::fs::remove_file(chemin) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(ErreurHistorique::Ecriture {
                chemin: chemin.clone(),
                source,
            }),
        }
    }

    /// Retire les plus anciens au-delà de la borne. Rend true si quelque chose a sauté.
    fn tronquer(&mut self) -> bool {
        let mut coupe = false;
        while self.entrees.len() > self.max_entrees {
            self.entrees.pop_front();
            coupe = true;
        }
        coupe
    }

    fn sauvegarder(&self) -> Result<(), ErreurHistorique> {
        let Some(chemin) = &self.fichier else {
            return Ok(());
        };

        let ecriture = |source: std::io::Error| ErreurHistorique::Ecriture {
            chemin: chemin.clone(),
            source,
        };

        if let Some(parent) = chemin.parent() {
            std::fs::create_dir_all(parent).map_err(ecriture)?;
        }

        let mut texte = String::new();
        for c in &self.entrees {
            texte.push_str(&c.ligne());
            texte.push('\n');
        }
        std::fs::write(chemin, texte).map_err(ecriture)
    }
}
