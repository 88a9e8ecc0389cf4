// src/noyau/rpn.rs
//
// Shunting-yard -> RPN
// Objectif:
// - Convertir une suite de Tok infixe en RPN (postfix)
//
// Règles:
// - + - : 1 ; × ÷ % : 2 ; ^ : 3
// - tout est associatif à gauche, sauf ^ (2^3^2 = 2^(3^2))
// - le moins unaire est déjà réglé par le tokenizer (nombre négatif ou "0 - (")

use super::erreur::ErreurCalcul;
use super::jetons::{Op, Tok};

pub fn precedence(op: Op) -> u8 {
    match op {
        Op::Plus | Op::Moins => 1,
        Op::Fois | Op::Div | Op::Modulo => 2,
        Op::Puissance => 3,
    }
}

fn is_right_associative(op: Op) -> bool {
    matches!(op, Op::Puissance)
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(2), Op(+), Num(3), Op(×), Num(4)]
///   rpn:    [Num(2), Num(3), Num(4), Op(×), Op(+)]
pub fn to_postfix(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurCalcul> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();

    for &tok in tokens {
        match tok {
            Tok::Num(_) => out.push(tok),

            Tok::LPar => ops.push(tok),

            Tok::RPar => loop {
                match ops.pop() {
                    Some(Tok::LPar) => break,
                    Some(top) => out.push(top),
                    None => {
                        return Err(ErreurCalcul::MalformedExpression(
                            "parenthèse fermante sans ouvrante",
                        ))
                    }
                }
            },

            Tok::Op(op) => {
                // dépile tant que le haut n'est pas '(' et que la
                // précédence/associativité exige de sortir l'opérateur du haut
                while let Some(&Tok::Op(top)) = ops.last() {
                    let p_top = precedence(top);
                    let p_tok = precedence(op);

                    let doit_pop = if is_right_associative(op) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    ops.pop();
                    out.push(Tok::Op(top));
                }

                ops.push(tok);
            }
        }
    }

    // vide la pile ops
    while let Some(tok) = ops.pop() {
        if tok == Tok::LPar {
            return Err(ErreurCalcul::MalformedExpression(
                "parenthèse ouvrante sans fermante",
            ));
        }
        out.push(tok);
    }

    Ok(out)
}
