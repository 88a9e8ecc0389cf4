// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// - Écran : petite ligne d’opération + grand affichage
// - Pavé 4 colonnes, une étiquette = un Evenement (evenement_bouton)
// - Clavier : chiffres, opérateurs, Enter = "=", Backspace = ⌫, Escape = AC
// - Historique repliable + bouton d’effacement
//
// Tout passe par AppCalc::appuyer : la vue ne touche jamais l’afficheur.

use eframe::egui;

use super::afficheur::{Evenement, Unaire};
use super::etat::AppCalc;
use crate::noyau::Op;

/// Disposition du pavé, ligne par ligne.
const PAVE: [[&str; 4]; 6] = [
    ["AC", "%", "(", ")"],
    ["7", "8", "9", "÷"],
    ["4", "5", "6", "×"],
    ["1", "2", "3", "-"],
    ["0", ".", "^", "+"],
    ["±", "√", "⌫", "="],
];

const TAILLE_BOUTON: [f32; 2] = [64.0, 44.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.ui_ecran(ui);

                ui.add_space(8.0);
                self.ui_pave(ui);

                if !self.avertissement.is_empty() {
                    ui.add_space(6.0);
                    ui.colored_label(ui.visuals().warn_fg_color, &self.avertissement);
                }

                ui.add_space(8.0);
                ui.separator();
                self.ui_historique(ui);
            });
    }

    /// Traduit les frappes de la frame en événements.
    pub fn lire_clavier(&mut self, ctx: &egui::Context) {
        let evenements: Vec<Evenement> =
            ctx.input(|i| i.events.iter().filter_map(evenement_clavier).collect());
        for ev in evenements {
            self.appuyer(ev);
        }
    }

    fn ui_ecran(&self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(4.0 * TAILLE_BOUTON[0] + 18.0);
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    ui.monospace(&self.afficheur.operation);

                    let couleur = if self.afficheur.erreur {
                        ui.visuals().error_fg_color
                    } else {
                        ui.visuals().strong_text_color()
                    };
                    ui.label(
                        egui::RichText::new(&self.afficheur.ecran)
                            .monospace()
                            .size(36.0)
                            .color(couleur),
                    );
                });
            });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_calculatrice")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in PAVE {
                    for etiquette in ligne {
                        let resp = ui.add_sized(TAILLE_BOUTON, egui::Button::new(etiquette));
                        if resp.clicked() {
                            if let Some(ev) = evenement_bouton(etiquette) {
                                self.appuyer(ev);
                            }
                        }
                    }
                    ui.end_row();
                }
            });
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new(format!("Historique ({})", self.historique.len()))
            .id_salt("historique")
            .default_open(false)
            .show(ui, |ui| {
                if self.historique.is_empty() {
                    ui.weak("aucun calcul");
                } else {
                    for calcul in self.historique.iter_recent() {
                        ui.monospace(calcul.ligne());
                    }
                }

                ui.add_space(4.0);
                if ui.button("Effacer l’historique").clicked() {
                    self.effacer_historique();
                }
            });
    }
}

/* ------------------------ Correspondances ------------------------ */

pub fn evenement_bouton(etiquette: &str) -> Option<Evenement> {
    let ev = match etiquette {
        "AC" => Evenement::Effacer,
        "⌫" => Evenement::Retour,
        "=" => Evenement::Egal,
        "±" => Evenement::Unaire(Unaire::Signe),
        "√" => Evenement::Unaire(Unaire::Racine),
        _ => {
            let mut cs = etiquette.chars();
            match (cs.next(), cs.next()) {
                (Some(c), None) => return evenement_caractere(c),
                _ => return None,
            }
        }
    };
    Some(ev)
}

/// Un caractère tapé. '%' est le pourcentage, jamais le modulo.
pub fn evenement_caractere(c: char) -> Option<Evenement> {
    match c {
        '0'..='9' => Some(Evenement::Chiffre(c)),
        '.' | ',' => Some(Evenement::Decimal),
        '(' => Some(Evenement::OuvrirParenthese),
        ')' => Some(Evenement::FermerParenthese),
        '=' => Some(Evenement::Egal),
        '%' => Some(Evenement::Unaire(Unaire::Pourcent)),
        _ => Op::depuis_char(c).map(Evenement::Operateur),
    }
}

pub fn evenement_touche(touche: egui::Key) -> Option<Evenement> {
    match touche {
        egui::Key::Enter => Some(Evenement::Egal),
        egui::Key::Backspace => Some(Evenement::Retour),
        egui::Key::Escape => Some(Evenement::Effacer),
        _ => None,
    }
}

fn evenement_clavier(e: &egui::Event) -> Option<Evenement> {
    match e {
        egui::Event::Text(texte) => {
            let mut cs = texte.chars();
            match (cs.next(), cs.next()) {
                (Some(c), None) => evenement_caractere(c),
                // collage : ignoré
                _ => None,
            }
        }
        egui::Event::Key {
            key, pressed: true, ..
        } => evenement_touche(*key),
        _ => None,
    }
}
