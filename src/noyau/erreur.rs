// src/noyau/erreur.rs

/// Erreurs du noyau.
///
/// `index` = position (en caractères, à partir de 0) dans l’entrée d’origine.
/// Toutes les variantes sauf `ExpressionVide` en portent une.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ErreurCalcul {
    #[error("parenthèse non appariée (index {index})")]
    ParentheseNonAppariee { index: usize },

    #[error("parenthèses vides (index {index})")]
    ParenthesesVides { index: usize },

    #[error("'*' ou '/' en tête, sans opérande à gauche (index {index})")]
    OperateurMultiplicatifEnTete { index: usize },

    #[error("opérateurs adjacents (index {index})")]
    OperateursAdjacents { index: usize },

    #[error("opérateur final, sans opérande à droite (index {index})")]
    OperateurFinal { index: usize },

    #[error("caractère invalide '{caractere}' (index {index})")]
    CaractereInvalide { index: usize, caractere: char },

    #[error("expression vide")]
    ExpressionVide,

    #[error("division par zéro (index {index})")]
    DivisionParZero { index: usize },

    /// Jetons incohérents : ne peut pas venir d’un découpage réussi.
    #[error("erreur interne : {detail} (index {index})")]
    Interne { index: usize, detail: &'static str },
}

impl ErreurCalcul {
    /// Position fautive dans l’entrée, si connue.
    pub fn index(&self) -> Option<usize> {
        use ErreurCalcul::*;

        match self {
            ExpressionVide => None,
            ParentheseNonAppariee { index }
            | ParenthesesVides { index }
            | OperateurMultiplicatifEnTete { index }
            | OperateursAdjacents { index }
            | OperateurFinal { index }
            | CaractereInvalide { index, .. }
            | DivisionParZero { index }
            | Interne { index, .. } => Some(*index),
        }
    }

    /// Famille “syntaxe” (tout sauf division par zéro et interne).
    pub fn est_syntaxique(&self) -> bool {
        !matches!(
            self,
            ErreurCalcul::DivisionParZero { .. } | ErreurCalcul::Interne { .. }
        )
    }
}
