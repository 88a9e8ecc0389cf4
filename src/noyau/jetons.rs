// src/noyau/jetons.rs

use serde::Deserialize;

use super::erreur::ErreurCalcul;
use super::options::{CaractereInconnu, OptionsMoteur};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum Op {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Moins,
    #[serde(rename = "×", alias = "*")]
    Fois,
    #[serde(rename = "÷", alias = "/")]
    Div,
    #[serde(rename = "^")]
    Puissance,
    #[serde(rename = "%")]
    Modulo,
}

impl Op {
    pub const TOUS: [Op; 6] = [
        Op::Plus,
        Op::Moins,
        Op::Fois,
        Op::Div,
        Op::Puissance,
        Op::Modulo,
    ];

    /// Accepte les deux graphies : `×`/`*` et `÷`/`/`.
    pub fn depuis_char(c: char) -> Option<Op> {
        match c {
            '+' => Some(Op::Plus),
            '-' => Some(Op::Moins),
            '×' | '*' => Some(Op::Fois),
            '÷' | '/' => Some(Op::Div),
            '^' => Some(Op::Puissance),
            '%' => Some(Op::Modulo),
            _ => None,
        }
    }

    /// Graphie d’affichage (celle des boutons).
    pub fn symbole(self) -> char {
        match self {
            Op::Plus => '+',
            Op::Moins => '-',
            Op::Fois => '×',
            Op::Div => '÷',
            Op::Puissance => '^',
            Op::Modulo => '%',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Op(Op),
    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, .5)
/// - moins unaire collé au nombre (ex: -5, 2×-3)
/// - `-(` réécrit en `0 - (`
/// - opérateurs + - × * ÷ / ^ % (filtrés par `options.operateurs`)
/// - parenthèses ( ), avec multiplication implicite optionnelle
///
/// Les espaces séparent les nombres et sont ignorés.
pub fn tokenize(s: &str, options: &OptionsMoteur) -> Result<Vec<Tok>, ErreurCalcul> {
    let chars: Vec<char> = s.chars().collect();
    let mut out = Vec::new();
    let mut nombre = String::new();

    // dernier caractère significatif (ni espace, ni caractère ignoré)
    let mut precedent: Option<char> = None;

    for (i, &c) in chars.iter().enumerate() {
        if c.is_whitespace() {
            // un signe seul attend son nombre : "4 × - 2"
            if nombre != "-" {
                vider(&mut nombre, &mut out)?;
            }
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            if nombre.is_empty()
                && options.multiplication_implicite
                && matches!(out.last(), Some(Tok::RPar))
            {
                out.push(Tok::Op(Op::Fois));
            }
            nombre.push(c);
            precedent = Some(c);
            continue;
        }

        if c == '-' && options.accepte(Op::Moins) && est_position_signe(precedent) {
            if prochain_significatif(&chars[i + 1..]) == Some('(') {
                vider(&mut nombre, &mut out)?;
                out.push(Tok::Num(0.0));
                out.push(Tok::Op(Op::Moins));
            } else {
                nombre.push('-');
            }
            precedent = Some(c);
            continue;
        }

        let tok = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            _ => Op::depuis_char(c)
                .filter(|op| options.accepte(*op))
                .map(Tok::Op),
        };

        match tok {
            Some(tok) => {
                vider(&mut nombre, &mut out)?;
                if tok == Tok::LPar
                    && options.multiplication_implicite
                    && matches!(out.last(), Some(Tok::Num(_) | Tok::RPar))
                {
                    out.push(Tok::Op(Op::Fois));
                }
                out.push(tok);
                precedent = Some(c);
            }
            None => match options.caractere_inconnu {
                CaractereInconnu::Rejeter => return Err(ErreurCalcul::InvalidCharacter(c)),
                CaractereInconnu::Ignorer => {}
            },
        }
    }

    vider(&mut nombre, &mut out)?;
    Ok(out)
}

/// `-` est un signe en tête, après un opérateur ou après `(`.
fn est_position_signe(precedent: Option<char>) -> bool {
    match precedent {
        None => true,
        Some('(') => true,
        Some(c) => Op::depuis_char(c).is_some(),
    }
}

fn prochain_significatif(reste: &[char]) -> Option<char> {
    reste.iter().copied().find(|c| !c.is_whitespace())
}

fn vider(nombre: &mut String, out: &mut Vec<Tok>) -> Result<(), ErreurCalcul> {
    if nombre.is_empty() {
        return Ok(());
    }
    let v = lire_numeral(nombre)?;
    out.push(Tok::Num(v));
    nombre.clear();
    Ok(())
}

/// Numéral : un `-` de tête au plus, un `.` au plus, au moins un chiffre.
fn lire_numeral(s: &str) -> Result<f64, ErreurCalcul> {
    const INVALIDE: ErreurCalcul = ErreurCalcul::MalformedExpression("nombre invalide");

    let corps = s.strip_prefix('-').unwrap_or(s);
    let chiffres = corps.chars().filter(char::is_ascii_digit).count();
    let points = corps.chars().filter(|&c| c == '.').count();
    if chiffres == 0 || points > 1 || corps.contains('-') {
        return Err(INVALIDE);
    }
    s.parse::<f64>().map_err(|_| INVALIDE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jetons(s: &str) -> Vec<Tok> {
        tokenize(s, &OptionsMoteur::default())
            .unwrap_or_else(|e| panic!("tokenize({s:?}) erreur: {e}"))
    }

    #[test]
    fn moins_unaire_en_tete() {
        assert_eq!(
            jetons("-5+3"),
            vec![Tok::Num(-5.0), Tok::Op(Op::Plus), Tok::Num(3.0)]
        );
    }

    #[test]
    fn moins_binaire_avant_parenthese() {
        assert_eq!(
            jetons("3-(2)"),
            vec![
                Tok::Num(3.0),
                Tok::Op(Op::Moins),
                Tok::LPar,
                Tok::Num(2.0),
                Tok::RPar
            ]
        );
    }

    #[test]
    fn moins_unaire_devant_parenthese_devient_zero_moins() {
        assert_eq!(
            jetons("-(4)"),
            vec![
                Tok::Num(0.0),
                Tok::Op(Op::Moins),
                Tok::LPar,
                Tok::Num(4.0),
                Tok::RPar
            ]
        );
    }

    #[test]
    fn moins_apres_operateur_colle_au_nombre() {
        assert_eq!(
            jetons("2×-3.5"),
            vec![Tok::Num(2.0), Tok::Op(Op::Fois), Tok::Num(-3.5)]
        );
        assert_eq!(
            jetons("(-1)"),
            vec![Tok::LPar, Tok::Num(-1.0), Tok::RPar]
        );
    }

    #[test]
    fn deux_graphies_meme_operateur() {
        assert_eq!(jetons("6*2"), jetons("6×2"));
        assert_eq!(jetons("6/2"), jetons("6÷2"));
    }

    #[test]
    fn espaces_separes_et_ignores() {
        assert_eq!(
            jetons(" 12 +  3 "),
            vec![Tok::Num(12.0), Tok::Op(Op::Plus), Tok::Num(3.0)]
        );
        // le signe se décide sur le caractère significatif précédent
        assert_eq!(
            jetons("4 × - 2"),
            vec![Tok::Num(4.0), Tok::Op(Op::Fois), Tok::Num(-2.0)]
        );
    }

    #[test]
    fn multiplication_implicite() {
        assert_eq!(
            jetons("2(3)"),
            vec![
                Tok::Num(2.0),
                Tok::Op(Op::Fois),
                Tok::LPar,
                Tok::Num(3.0),
                Tok::RPar
            ]
        );
        assert_eq!(
            jetons("(1)(2)"),
            vec![
                Tok::LPar,
                Tok::Num(1.0),
                Tok::RPar,
                Tok::Op(Op::Fois),
                Tok::LPar,
                Tok::Num(2.0),
                Tok::RPar
            ]
        );
        assert_eq!(jetons("(2)3")[3], Tok::Op(Op::Fois));
    }

    #[test]
    fn multiplication_implicite_desactivee() {
        let o = OptionsMoteur {
            multiplication_implicite: false,
            ..OptionsMoteur::default()
        };
        assert_eq!(
            tokenize("2(3)", &o).unwrap(),
            vec![Tok::Num(2.0), Tok::LPar, Tok::Num(3.0), Tok::RPar]
        );
    }

    #[test]
    fn caractere_inconnu_rejete() {
        assert_eq!(
            tokenize("2+a", &OptionsMoteur::default()),
            Err(ErreurCalcul::InvalidCharacter('a'))
        );
    }

    #[test]
    fn caractere_inconnu_ignore() {
        let o = OptionsMoteur {
            caractere_inconnu: CaractereInconnu::Ignorer,
            ..OptionsMoteur::default()
        };
        assert_eq!(
            tokenize("2+$3", &o).unwrap(),
            vec![Tok::Num(2.0), Tok::Op(Op::Plus), Tok::Num(3.0)]
        );
    }

    #[test]
    fn operateur_hors_ensemble_est_inconnu() {
        let o = OptionsMoteur {
            operateurs: [Op::Plus, Op::Moins, Op::Fois, Op::Div].into_iter().collect(),
            ..OptionsMoteur::default()
        };
        assert_eq!(
            tokenize("2^3", &o),
            Err(ErreurCalcul::InvalidCharacter('^'))
        );
    }

    #[test]
    fn numeraux_invalides() {
        let o = OptionsMoteur::default();
        for s in ["1.2.3", "--5", "3×-", ".", "2+-.+1"] {
            assert!(
                matches!(tokenize(s, &o), Err(ErreurCalcul::MalformedExpression(_))),
                "{s:?}"
            );
        }
    }

    #[test]
    fn formes_decimales_courtes() {
        assert_eq!(jetons(".5"), vec![Tok::Num(0.5)]);
        assert_eq!(jetons("2."), vec![Tok::Num(2.0)]);
        assert_eq!(jetons("-.25"), vec![Tok::Num(-0.25)]);
    }
}
