//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, erreur, précision, démarche)
//! et offrir des opérations simples (C/CLR/AC/DEL) sans logique d’affichage.
//! Aucune évaluation ici : le noyau n’est appelé que depuis vue.rs.

use crate::noyau::{borner_precision, Demarche, ErreurCalcul, PRECISION_DEFAUT};

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String,
    pub erreur: String,

    pub demarche: Demarche,

    // --- paramètres ---
    pub precision: usize,

    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::avec_precision(PRECISION_DEFAUT)
    }
}

impl AppCalc {
    pub fn avec_precision(precision: usize) -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            erreur: String::new(),
            demarche: Demarche::default(),
            precision: borner_precision(precision),
            focus_entree: true,
        }
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + précision par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.precision = PRECISION_DEFAUT;
    }

    /// C : effacer seulement l’entrée.
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultat + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.erreur.clear();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// DEL : retire le dernier symbole (et les espaces qui le suivent).
    pub fn backspace_entree(&mut self) {
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }
        self.entree.pop();
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }
        self.focus_entree = true;
    }

    /// Place une erreur. On CONSERVE le dernier résultat, la démarche est effacée.
    /// Si l’erreur a une position, on souligne le caractère fautif sous l’entrée.
    pub fn set_erreur(&mut self, e: &ErreurCalcul) {
        self.erreur = match e.index() {
            Some(i) => format!("{e}\n{}\n{}^", self.entree, " ".repeat(i)),
            None => e.to_string(),
        };
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    pub fn set_resultat(&mut self, resultat: impl Into<String>, demarche: Demarche) {
        self.erreur.clear();
        self.resultat = resultat.into();
        self.demarche = demarche;
        self.focus_entree = true;
    }

    pub fn set_precision(&mut self, precision: usize) {
        self.precision = borner_precision(precision);
        self.focus_entree = true;
    }
}
