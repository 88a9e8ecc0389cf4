//! Noyau de calcul flottant
//!
//! Organisation interne :
//! - erreur.rs   : ErreurCalcul (taxonomie des échecs)
//! - options.rs  : OptionsMoteur (opérateurs, repli scientifique, inconnus)
//! - jetons.rs   : tokenisation (moins unaire, multiplication implicite)
//! - rpn.rs      : shunting-yard
//! - eval.rs     : pile d’opérandes + pipeline complet
//! - format.rs   : affichage borné (repli scientifique)
//!
//! Fonctions pures, sans état partagé ni E/S.

pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod options;
pub mod rpn;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale : les deux appels consommés par l’hôte
pub use erreur::ErreurCalcul;
pub use eval::evaluate;
pub use format::format_number;
pub use jetons::Op;
pub use options::OptionsMoteur;
