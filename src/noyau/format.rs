// src/noyau/format.rs

use num_traits::Zero;

use super::options::OptionsMoteur;

/* ------------------------ Affichage borné ------------------------ */

/// Texte d’affichage d’un résultat, borné à `options.largeur_max` caractères
/// (signe non compté).
///
/// - entier        : "42"
/// - décimal       : arrondi à 3 décimales, zéros finaux retirés ("2.5")
/// - trop large    : précision 3 -> 2 -> 1 -> 0, puis "1.235e+10"
///
/// Totale : NaN et infinis ont aussi un texte.
pub fn format_number(value: f64, options: &OptionsMoteur) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() { "-∞" } else { "∞" }.to_string();
    }

    let largeur = options.largeur_max.max(1);
    let corps = format_magnitude(value.abs(), largeur, options.notation_scientifique);

    // jamais de "-0"
    if value.is_sign_negative() && corps != "0" {
        format!("-{corps}")
    } else {
        corps
    }
}

fn format_magnitude(m: f64, largeur: usize, scientifique: bool) -> String {
    if m.is_zero() {
        return "0".to_string();
    }

    if m.fract().is_zero() {
        let entier = format!("{m:.0}");
        if entier.len() <= largeur || !scientifique {
            return entier;
        }
        return format_scientifique(m, largeur);
    }

    let mut dernier = String::new();
    for precision in (0..=3).rev() {
        let txt = sans_zeros_finaux(format!("{m:.precision$}"));
        if txt.len() <= largeur {
            return txt;
        }
        dernier = txt;
    }

    if scientifique {
        format_scientifique(m, largeur)
    } else {
        dernier
    }
}

/// "2.500" -> "2.5" ; "3.000" -> "3" ; "100" reste "100".
fn sans_zeros_finaux(s: String) -> String {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Mantisse à 3 décimales, exposant signé sur au moins deux chiffres.
fn format_scientifique(m: f64, largeur: usize) -> String {
    let brut = format!("{m:.3e}");
    let (mantisse, exposant) = brut.split_once('e').unwrap_or((brut.as_str(), "0"));
    let exposant: i32 = exposant.parse().unwrap_or(0);
    let signe = if exposant < 0 { '-' } else { '+' };

    let txt = format!("{mantisse}e{signe}{:02}", exposant.abs());
    if txt.chars().count() > largeur {
        txt.chars().take(largeur).collect()
    } else {
        txt
    }
}
