//! Tests de propriétés : arithmétique fermée, RPN vs précédence standard,
//! idempotence de l’affichage.
//!
//! RNG déterministe (seed fixe) : aucune dépendance, échecs reproductibles.

use super::eval::eval_postfix;
use super::jetons::tokenize;
use super::rpn::to_postfix;
use super::{evaluate, format_number, ErreurCalcul, OptionsMoteur};

/* ------------------------ RNG déterministe minimal ------------------------ */

struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn entier(&mut self, min: i64, max: i64) -> i64 {
        let etendue = (max - min + 1) as u32;
        min + (self.next_u32() % etendue) as i64
    }
}

fn opts() -> OptionsMoteur {
    OptionsMoteur::default()
}

/* ------------------------ a op b ------------------------ */

#[test]
fn paires_entieres_forme_fermee() {
    let mut rng = Rng::new(0xC0FFEE);
    let o = opts();

    for _ in 0..2_000 {
        let a = rng.entier(-999, 999);
        let b = rng.entier(-999, 999);
        let (sym, attendu) = match rng.entier(0, 3) {
            0 => ('+', Some((a + b) as f64)),
            1 => ('-', Some((a - b) as f64)),
            2 => ('×', Some((a * b) as f64)),
            _ => ('÷', (b != 0).then(|| a as f64 / b as f64)),
        };

        let expr = format!("{a}{sym}{b}");
        match attendu {
            Some(v) => assert_eq!(
                evaluate(&expr, &o),
                Ok(format_number(v, &o)),
                "expr={expr:?}"
            ),
            None => assert_eq!(
                evaluate(&expr, &o),
                Err(ErreurCalcul::DivisionByZero),
                "expr={expr:?}"
            ),
        }
    }
}

/* ------------------------ RPN vs précédence standard ------------------------ */

/// Référence indépendante : d’abord × ÷ de gauche à droite, puis + -.
fn reference(nombres: &[f64], ops: &[char]) -> f64 {
    let mut termes = vec![nombres[0]];
    let mut signes = Vec::new();

    for (op, &n) in ops.iter().zip(&nombres[1..]) {
        match op {
            '×' => {
                if let Some(t) = termes.last_mut() {
                    *t *= n;
                }
            }
            '÷' => {
                if let Some(t) = termes.last_mut() {
                    *t /= n;
                }
            }
            _ => {
                signes.push(*op);
                termes.push(n);
            }
        }
    }

    let mut acc = termes[0];
    for (op, t) in signes.iter().zip(&termes[1..]) {
        if *op == '+' {
            acc += t;
        } else {
            acc -= t;
        }
    }
    acc
}

#[test]
fn rpn_respecte_la_precedence() {
    let mut rng = Rng::new(42);
    let o = opts();

    for _ in 0..1_000 {
        let longueur = rng.entier(1, 6) as usize;
        let nombres: Vec<f64> = (0..=longueur).map(|_| rng.entier(1, 50) as f64).collect();
        let ops: Vec<char> = (0..longueur)
            .map(|_| ['+', '-', '×', '÷'][rng.entier(0, 3) as usize])
            .collect();

        let mut expr = nombres[0].to_string();
        for (op, n) in ops.iter().zip(&nombres[1..]) {
            expr.push(*op);
            expr.push_str(&n.to_string());
        }

        let jetons = tokenize(&expr, &o).unwrap();
        let rpn = to_postfix(&jetons).unwrap();
        let obtenu = eval_postfix(&rpn).unwrap();
        let attendu = reference(&nombres, &ops);

        let tolerance = 1e-9 * attendu.abs().max(1.0);
        assert!(
            (obtenu - attendu).abs() <= tolerance,
            "expr={expr:?} obtenu={obtenu} attendu={attendu}"
        );
    }
}

#[test]
fn parentheses_redondantes_sans_effet() {
    let o = opts();
    for (a, b) in [("2+3×4", "(2+(3×4))"), ("8-2-1", "((8-2)-1)"), ("2^3^2", "2^(3^2)")] {
        assert_eq!(evaluate(a, &o), evaluate(b, &o), "{a} vs {b}");
    }
}

/* ------------------------ Affichage ------------------------ */

#[test]
fn format_idempotent_aleatoire() {
    let mut rng = Rng::new(7);
    let o = opts();

    for _ in 0..2_000 {
        let mantisse = rng.entier(-999_999, 999_999) as f64 / 1_000.0;
        let echelle = 10f64.powi(rng.entier(-6, 15) as i32);
        let x = mantisse * echelle;

        let une = format_number(x, &o);
        let relu: f64 = une
            .parse()
            .unwrap_or_else(|_| panic!("relecture impossible: {une:?} (x={x})"));
        assert_eq!(format_number(relu, &o), une, "x={x}");

        let magnitude = une.strip_prefix('-').unwrap_or(&une);
        assert!(magnitude.len() <= o.largeur_max, "trop large: {une:?}");
    }
}
