//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - longueur bornée
//! - budget temps global
//! - toute erreur typée est acceptée ; une panique ne l’est pas
//! - invariant clé : un résultat Ok tient dans la largeur d’affichage

use std::time::{Duration, Instant};

use super::options::CaractereInconnu;
use super::{evaluate, ErreurCalcul, OptionsMoteur};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération (bornée) ------------------------ */

/// Alphabet reconnu + quelques intrus.
const ALPHABET: &[char] = &[
    '0', '1', '2', '3', '7', '9', '.', '+', '-', '×', '*', '÷', '/', '^', '%', '(', ')', ' ',
    'x', 'e', '√',
];

fn gen_chaine(rng: &mut Rng, max_len: u32) -> String {
    let len = rng.pick(max_len) + 1;
    (0..len)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

fn check_ok(expr: &str, res: &Result<String, ErreurCalcul>, o: &OptionsMoteur) {
    if let Ok(txt) = res {
        let magnitude = txt.strip_prefix('-').unwrap_or(txt);
        assert!(
            magnitude.chars().count() <= o.largeur_max,
            "expr={expr:?} trop large: {txt:?}"
        );
    }
}

#[test]
fn fuzz_chaines_aleatoires() {
    let start = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(0xDEC0DE);
    let o = OptionsMoteur::default();

    for _ in 0..5_000 {
        budget(start, max);
        let expr = gen_chaine(&mut rng, 24);

        let r1 = evaluate(&expr, &o);
        let r2 = evaluate(&expr, &o);
        assert_eq!(r1, r2, "non déterministe: {expr:?}");
        check_ok(&expr, &r1, &o);
    }
}

#[test]
fn fuzz_caracteres_ignores_jamais_invalides() {
    let start = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(99);
    let o = OptionsMoteur {
        caractere_inconnu: CaractereInconnu::Ignorer,
        ..OptionsMoteur::default()
    };

    for _ in 0..3_000 {
        budget(start, max);
        let expr = gen_chaine(&mut rng, 16);
        let r = evaluate(&expr, &o);
        assert!(
            !matches!(r, Err(ErreurCalcul::InvalidCharacter(_))),
            "expr={expr:?} r={r:?}"
        );
        check_ok(&expr, &r, &o);
    }
}

#[test]
fn parentheses_profondes() {
    let o = OptionsMoteur::default();
    let n = 2_000;
    let expr = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(evaluate(&expr, &o), Ok("1".to_string()));

    let boiteuse = format!("{}1{}", "(".repeat(n), ")".repeat(n - 1));
    assert!(matches!(
        evaluate(&boiteuse, &o),
        Err(ErreurCalcul::MalformedExpression(_))
    ));
}

#[test]
fn longue_somme() {
    let o = OptionsMoteur::default();
    let expr = vec!["1"; 10_000].join("+");
    assert_eq!(evaluate(&expr, &o), Ok("10000".to_string()));
}
