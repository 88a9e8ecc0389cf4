// src/noyau/erreur.rs

use thiserror::Error;

/// Échecs du noyau. Levés au point de détection, propagés tels quels.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErreurCalcul {
    /// Parenthèses, pile d’opérandes, numéral invalide, entrée vide.
    #[error("expression invalide: {0}")]
    MalformedExpression(&'static str),

    /// Diviseur (ou base du modulo) exactement nul.
    #[error("division par zéro")]
    DivisionByZero,

    #[error("caractère inattendu: '{0}'")]
    InvalidCharacter(char),

    /// Dépassement (10^400) ou NaN ((-8)^0.5).
    #[error("résultat non représentable")]
    NonFiniteResult,
}
