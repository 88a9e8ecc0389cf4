//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> RPN -> pile d’opérandes -> format_number
//!
//! Remarque : le noyau ne journalise rien ; l’hôte décide quoi faire d’une erreur.

use num_traits::Zero;

use super::erreur::ErreurCalcul;
use super::format::format_number;
use super::jetons::{tokenize, Op, Tok};
use super::options::OptionsMoteur;
use super::rpn::to_postfix;

/// API publique : évalue une expression et retourne le texte d’affichage.
pub fn evaluate(expr_str: &str, options: &OptionsMoteur) -> Result<String, ErreurCalcul> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurCalcul::MalformedExpression("entrée vide"));
    }

    let jetons = tokenize(s, options)?;
    let rpn = to_postfix(&jetons)?;
    let valeur = eval_postfix(&rpn)?;

    Ok(format_number(valeur, options))
}

/// Replie une RPN en un scalaire : `b` = sommet, `a` = suivant, pousse `a op b`.
pub fn eval_postfix(rpn: &[Tok]) -> Result<f64, ErreurCalcul> {
    const SOUS_PILE: ErreurCalcul = ErreurCalcul::MalformedExpression("opérande manquant");

    let mut st: Vec<f64> = Vec::with_capacity(rpn.len());

    for &tok in rpn {
        match tok {
            Tok::Num(v) => st.push(v),

            Tok::Op(op) => {
                let b = st.pop().ok_or(SOUS_PILE)?;
                let a = st.pop().ok_or(SOUS_PILE)?;
                st.push(appliquer(op, a, b)?);
            }

            Tok::LPar | Tok::RPar => {
                return Err(ErreurCalcul::MalformedExpression(
                    "parenthèse inattendue en RPN",
                ))
            }
        }
    }

    match st.as_slice() {
        [v] if v.is_finite() => Ok(*v),
        [_] => Err(ErreurCalcul::NonFiniteResult),
        [] => Err(ErreurCalcul::MalformedExpression("expression vide")),
        _ => Err(ErreurCalcul::MalformedExpression("opérateur manquant")),
    }
}

pub fn appliquer(op: Op, a: f64, b: f64) -> Result<f64, ErreurCalcul> {
    let r = match op {
        Op::Plus => a + b,
        Op::Moins => a - b,
        Op::Fois => a * b,
        Op::Div => {
            if b.is_zero() {
                return Err(ErreurCalcul::DivisionByZero);
            }
            a / b
        }
        Op::Puissance => a.powf(b),
        Op::Modulo => {
            if b.is_zero() {
                return Err(ErreurCalcul::DivisionByZero);
            }
            modulo_plancher(a, b)
        }
    };

    if r.is_finite() {
        Ok(r)
    } else {
        Err(ErreurCalcul::NonFiniteResult)
    }
}

/// Reste du signe du diviseur : -7 % 3 = 2, 7 % -3 = -2.
fn modulo_plancher(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        r + b
    } else {
        r
    }
}
