//! src/app/afficheur.rs
//!
//! Machine d’état de l’écran (sans vue).
//!
//! Rôle : transformer une suite d’événements (boutons, clavier) en
//! expression + écran, en n’appelant que les deux fonctions publiques du noyau
//! (`evaluate`, `format_number`).
//!
//! Contrats :
//! - État « Erreur » : seul `Effacer` est accepté.
//! - Saisie d’un nombre bornée à `LIMITE_SAISIE` caractères.
//! - Un `Egal` réussi rend la paire (expression, résultat) à l’hôte.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::noyau::{evaluate, format_number, Op, OptionsMoteur};

use super::historique::Calcul;

/// Longueur max d’un nombre saisi à l’écran.
pub const LIMITE_SAISIE: usize = 10;

pub const TEXTE_ERREUR: &str = "Erreur";

/// Opérations appliquées directement à la valeur affichée.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unaire {
    Racine,
    Pourcent,
    Signe,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Evenement {
    Chiffre(char),
    Operateur(Op),
    Decimal,
    OuvrirParenthese,
    FermerParenthese,
    Egal,
    Effacer,
    Retour,
    Unaire(Unaire),
}

impl Evenement {
    /// Étiquette courte (journal de frappes, info-bulles).
    pub fn etiquette(&self) -> String {
        match self {
            Evenement::Chiffre(d) => d.to_string(),
            Evenement::Operateur(op) => op.symbole().to_string(),
            Evenement::Decimal => ".".to_string(),
            Evenement::OuvrirParenthese => "(".to_string(),
            Evenement::FermerParenthese => ")".to_string(),
            Evenement::Egal => "ENTREE".to_string(),
            Evenement::Effacer => "AC".to_string(),
            Evenement::Retour => "RETOUR".to_string(),
            Evenement::Unaire(Unaire::Racine) => "√".to_string(),
            Evenement::Unaire(Unaire::Pourcent) => "%".to_string(),
            Evenement::Unaire(Unaire::Signe) => "±".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Afficheur {
    /// Expression complète envoyée au noyau.
    pub expression: String,
    /// Grand affichage : nombre en cours, résultat ou "Erreur".
    pub ecran: String,
    /// Petit affichage au-dessus (expression, "expr =", "√(x)").
    pub operation: String,
    pub resultat_affiche: bool,
    pub erreur: bool,
}

impl Default for Afficheur {
    fn default() -> Self {
        Self {
            expression: String::new(),
            ecran: "0".to_string(),
            operation: String::new(),
            resultat_affiche: false,
            erreur: false,
        }
    }
}

impl Afficheur {
    pub fn traiter(&mut self, ev: Evenement, options: &OptionsMoteur) -> Option<Calcul> {
        if self.erreur && ev != Evenement::Effacer {
            return None;
        }

        match ev {
            Evenement::Effacer => *self = Self::default(),
            Evenement::Egal => return self.egal(options),
            Evenement::OuvrirParenthese => self.parenthese('('),
            Evenement::FermerParenthese => self.parenthese(')'),
            Evenement::Operateur(op) => self.operateur(op),
            Evenement::Decimal => self.decimal(),
            Evenement::Chiffre(d) => self.chiffre(d),
            Evenement::Retour => self.retour(),
            Evenement::Unaire(Unaire::Racine) => self.racine(options),
            Evenement::Unaire(Unaire::Pourcent) => self.pourcent(options),
            Evenement::Unaire(Unaire::Signe) => self.signe(),
        }
        None
    }

    fn egal(&mut self, options: &OptionsMoteur) -> Option<Calcul> {
        if self.expression.is_empty() {
            return None;
        }

        match evaluate(&self.expression, options) {
            Ok(resultat) => {
                let calcul = Calcul {
                    expression: self.expression.clone(),
                    resultat: resultat.clone(),
                };
                self.operation = format!("{} =", self.expression);
                self.expression = texte_reutilisable(&resultat);
                self.ecran = resultat;
                self.resultat_affiche = true;
                Some(calcul)
            }
            Err(e) => {
                debug!(expression = %self.expression, erreur = %e, "évaluation refusée");
                self.mettre_erreur();
                None
            }
        }
    }

    fn mettre_erreur(&mut self) {
        self.ecran = TEXTE_ERREUR.to_string();
        self.expression.clear();
        self.resultat_affiche = true;
        self.erreur = true;
    }

    fn parenthese(&mut self, c: char) {
        if self.resultat_affiche {
            self.expression.clear();
            self.resultat_affiche = false;
        }
        self.expression.push(c);
        if c == '(' {
            self.ecran = "0".to_string();
        }
        self.operation = self.expression.clone();
    }

    /// Après ')' il faut un opérateur avant un nouveau nombre.
    fn apres_fermante(&self) -> bool {
        !self.resultat_affiche && self.expression.ends_with(')')
    }

    /// Un opérateur final est remplacé, jamais doublé.
    fn operateur(&mut self, op: Op) {
        self.resultat_affiche = false;
        if self.expression.chars().last().and_then(Op::depuis_char).is_some() {
            self.expression.pop();
        }
        self.expression.push(op.symbole());
        self.operation = self.expression.clone();
        self.ecran = "0".to_string();
    }

    fn decimal(&mut self) {
        if self.apres_fermante() {
            return;
        }
        if self.resultat_affiche {
            self.expression.clear();
            self.ecran = "0".to_string();
            self.resultat_affiche = false;
        }
        if self.ecran.contains('.') || self.ecran.chars().count() >= LIMITE_SAISIE {
            return;
        }

        if self.ecran == "0" && !self.expression.ends_with(|c: char| c.is_ascii_digit()) {
            self.ecran = "0.".to_string();
            self.expression.push_str("0.");
        } else {
            self.ecran.push('.');
            self.expression.push('.');
        }
        self.operation = self.expression.clone();
    }

    fn chiffre(&mut self, d: char) {
        if !d.is_ascii_digit() || self.apres_fermante() {
            return;
        }

        if self.resultat_affiche {
            self.expression = d.to_string();
            self.ecran = d.to_string();
            self.operation = self.expression.clone();
            self.resultat_affiche = false;
            return;
        }

        if self.ecran.chars().count() >= LIMITE_SAISIE && self.ecran != "0" {
            return;
        }

        if self.ecran == "0" {
            self.ecran = d.to_string();
        } else {
            self.ecran.push(d);
        }
        self.expression.push(d);
        self.operation = self.expression.clone();
    }

    fn retour(&mut self) {
        if self.resultat_affiche {
            return;
        }
        self.expression.pop();
        // un signe unaire orphelin part avec son nombre
        if let Some(avant) = self.expression.strip_suffix('-') {
            if position_de_signe(avant) {
                self.expression.pop();
            }
        }
        // l’écran reprend l’opérande qui termine désormais l’expression
        self.ecran = operande_final(&self.expression)
            .unwrap_or("0")
            .to_string();
        self.operation = self.expression.clone();
    }

    fn racine(&mut self, options: &OptionsMoteur) {
        let courant = match self.ecran.parse::<f64>() {
            Ok(v) if v >= 0.0 => v,
            _ => return self.mettre_erreur(),
        };

        let resultat = format_number(courant.sqrt(), options);
        self.operation = format!("√({})", self.ecran);
        self.expression = texte_reutilisable(&resultat);
        self.ecran = resultat;
        self.resultat_affiche = true;
    }

    /// Divise l’écran par 100 et remplace le dernier nombre de l’expression.
    fn pourcent(&mut self, options: &OptionsMoteur) {
        // rien à convertir juste après un opérateur ou une parenthèse
        if operande_final(&self.expression).is_none() {
            return;
        }
        let Ok(courant) = self.ecran.parse::<f64>() else {
            return self.mettre_erreur();
        };

        let valeur = courant / 100.0;
        self.ecran = format_number(valeur, options);
        self.expression = remplacer_dernier_nombre(&self.expression, valeur.abs());
        self.operation = self.expression.clone();
    }

    /// ± sur l’opérande qui termine l’expression, et sur l’écran.
    fn signe(&mut self) {
        if self.ecran == "0" {
            return;
        }
        let Some(operande) = operande_final(&self.expression) else {
            return;
        };

        let debut = self.expression.len() - operande.len();
        let bascule = basculer_signe(operande);
        self.expression.truncate(debut);
        self.expression.push_str(&bascule);
        self.ecran = basculer_signe(&self.ecran);
        self.operation = self.expression.clone();
    }
}

fn basculer_signe(nombre: &str) -> String {
    match nombre.strip_prefix('-') {
        Some(reste) => reste.to_string(),
        None => format!("-{nombre}"),
    }
}

/// Nombre qui termine l’expression, signe unaire compris ("3+-5" -> "-5",
/// "12-3" -> "3"). None si elle finit par un opérateur ou une parenthèse.
fn operande_final(expression: &str) -> Option<&str> {
    let corps = expression.trim_end_matches(|c: char| c.is_ascii_digit() || c == '.');
    if corps.len() == expression.len() {
        return None;
    }

    let debut = match corps.strip_suffix('-') {
        Some(avant) if position_de_signe(avant) => avant.len(),
        _ => corps.len(),
    };
    Some(&expression[debut..])
}

/// Un '-' placé après `avant` est un signe, pas une soustraction.
fn position_de_signe(avant: &str) -> bool {
    avant.is_empty() || avant.ends_with(|c: char| c == '(' || Op::depuis_char(c).is_some())
}

/// Un résultat en notation scientifique n’est pas relisible par le tokenizer :
/// on repasse en décimal complet pour la suite du calcul.
fn texte_reutilisable(resultat: &str) -> String {
    if !resultat.contains('e') {
        return resultat.to_string();
    }
    match resultat.parse::<f64>() {
        Ok(v) => format!("{v}"),
        Err(_) => resultat.to_string(),
    }
}

fn remplacer_dernier_nombre(expression: &str, magnitude: f64) -> String {
    static DERNIER_NOMBRE: OnceLock<Regex> = OnceLock::new();
    let re = DERNIER_NOMBRE
        .get_or_init(|| Regex::new(r"(\d+(?:\.\d+)?)(\D*)$").expect("regex dernier nombre"));

    re.replace(expression, |caps: &Captures| {
        format!("{magnitude}{}", &caps[2])
    })
    .into_owned()
}
