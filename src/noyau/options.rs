// src/noyau/options.rs
//
// Réglages du noyau : ce qui distinguait les anciennes copies du moteur
// (opérateurs reconnus, repli scientifique, caractères inconnus) devient
// de la configuration.

use std::collections::BTreeSet;

use serde::Deserialize;

use super::jetons::Op;

/// Largeur d’affichage observée sur toutes les calculatrices.
pub const LARGEUR_DEFAUT: usize = 10;

/// Conduite du tokenizer face à un caractère hors alphabet.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CaractereInconnu {
    #[default]
    Rejeter,
    Ignorer,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct OptionsMoteur {
    /// Opérateurs acceptés par le tokenizer (les autres sont « inconnus »).
    pub operateurs: BTreeSet<Op>,
    /// Repli `d.ddde±XX` quand le format fixe dépasse `largeur_max`.
    pub notation_scientifique: bool,
    pub caractere_inconnu: CaractereInconnu,
    /// Budget en caractères de la magnitude (signe non compté).
    pub largeur_max: usize,
    /// `2(3)`, `(1)(2)`, `(2)3` : insère un `×`.
    pub multiplication_implicite: bool,
}

impl Default for OptionsMoteur {
    fn default() -> Self {
        Self {
            operateurs: Op::TOUS.iter().copied().collect(),
            notation_scientifique: true,
            caractere_inconnu: CaractereInconnu::Rejeter,
            largeur_max: LARGEUR_DEFAUT,
            multiplication_implicite: true,
        }
    }
}

impl OptionsMoteur {
    pub fn accepte(&self, op: Op) -> bool {
        self.operateurs.contains(&op)
    }
}
