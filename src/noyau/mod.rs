//! Noyau exact (décimal)
//!
//! Organisation interne :
//! - jetons.rs    : jetons + tokenisation (seul validateur de syntaxe)
//! - portees.rs   : portées (blocs entre parenthèses) rangées par profondeur
//! - eval.rs      : replis en place, de la portée la plus profonde à la racine
//! - normalise.rs : arrondi final + Valeur (entier ou décimal exact)
//! - erreur.rs    : ErreurCalcul

pub mod erreur;
pub mod eval;
pub mod jetons;
pub mod normalise;
pub mod portees;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurCalcul;
pub use eval::{evaluer, evaluer_avec_demarche, Demarche};
pub use normalise::{borner_precision, Valeur, PRECISION_DEFAUT, PRECISION_MAX};
