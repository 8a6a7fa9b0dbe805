//! Tests de propriétés : comportements attendus de bout en bout.
//!
//! - exemples de référence (priorités, parenthèses, signes, exactitude)
//! - une erreur précise par défaut de syntaxe, jamais une erreur générique
//! - proptest : littéral seul, idempotence, multiplication implicite

use num_bigint::BigInt;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::{evaluer, ErreurCalcul, Valeur, PRECISION_DEFAUT};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn eval_ok(expr: &str) -> Valeur {
    init_logs();
    evaluer(expr, PRECISION_DEFAUT).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn eval_err(expr: &str) -> ErreurCalcul {
    init_logs();
    match evaluer(expr, PRECISION_DEFAUT) {
        Ok(v) => panic!("expr={expr:?} aurait dû échouer, obtenu {v}"),
        Err(e) => e,
    }
}

fn entier(n: i64) -> Valeur {
    Valeur::Entier(BigInt::from(n))
}

/* ------------------------ Exemples de référence ------------------------ */

#[test]
fn prop_priorites_et_parentheses() {
    assert_eq!(eval_ok("2+3*4"), entier(14));
    assert_eq!(eval_ok("(2+3)*4"), entier(20));
    assert_eq!(eval_ok("2(3+4)"), entier(14));
    assert_eq!(eval_ok("(2)(3)"), entier(6));
}

#[test]
fn prop_moins_unaire_en_tete_seulement() {
    assert_eq!(eval_ok("-3+5"), entier(2));
    // jamais après un autre opérateur
    assert!(matches!(
        eval_err("3*-2"),
        ErreurCalcul::OperateursAdjacents { .. }
    ));
    assert!(matches!(
        eval_err("3+-2"),
        ErreurCalcul::OperateursAdjacents { .. }
    ));
    // après '(' : oui
    assert_eq!(eval_ok("3*(-2)"), entier(-6));
}

#[test]
fn prop_aller_retour_exact() {
    assert_eq!(eval_ok("1/3*3"), entier(1));
    assert_eq!(eval_ok("2/7*7"), entier(2));
    assert_eq!(eval_ok("(1/3+1/3+1/3)"), entier(1));
    assert_eq!(eval_ok("1/10+1/10+1/10-3/10"), entier(0));
}

#[test]
fn prop_division_par_zero() {
    assert!(matches!(
        eval_err("5/0"),
        ErreurCalcul::DivisionParZero { .. }
    ));
    assert!(matches!(
        eval_err("5/(2-2)"),
        ErreurCalcul::DivisionParZero { .. }
    ));
}

#[test]
fn prop_erreurs_specifiques() {
    assert!(matches!(
        eval_err("(2+3"),
        ErreurCalcul::ParentheseNonAppariee { index: 0 }
    ));
    assert!(matches!(
        eval_err("2++3"),
        ErreurCalcul::OperateursAdjacents { index: 2 }
    ));
    assert!(matches!(
        eval_err("2+"),
        ErreurCalcul::OperateurFinal { index: 1 }
    ));
    assert_eq!(eval_err(""), ErreurCalcul::ExpressionVide);
    assert!(matches!(
        eval_err("2&3"),
        ErreurCalcul::CaractereInvalide {
            index: 1,
            caractere: '&'
        }
    ));
    assert!(matches!(
        eval_err("()"),
        ErreurCalcul::ParenthesesVides { index: 1 }
    ));
    assert!(matches!(
        eval_err("/3"),
        ErreurCalcul::OperateurMultiplicatifEnTete { index: 0 }
    ));
}

#[test]
fn prop_resultats_decimaux() {
    assert_eq!(eval_ok("7/4").to_string(), "1.75");
    assert_eq!(eval_ok("-7/4").to_string(), "-1.75");
    assert_eq!(
        eval_ok("2/3").to_string(),
        "0.666666666666666666666666666667"
    );
}

/* ------------------------ proptest ------------------------ */

proptest! {
    #[test]
    fn prop_litteral_seul_inchange(n in 0u64..=u64::MAX) {
        let v = evaluer(&n.to_string(), PRECISION_DEFAUT).unwrap();
        prop_assert_eq!(v, Valeur::Entier(BigInt::from(n)));
    }

    #[test]
    fn prop_grand_litteral_inchange(chiffres in "[1-9][0-9]{0,60}") {
        let v = evaluer(&chiffres, PRECISION_DEFAUT).unwrap();
        prop_assert_eq!(v.to_string(), chiffres);
    }

    #[test]
    fn prop_idempotence(a in 1u32..1000, b in 1u32..1000, c in 1u32..1000) {
        let expr = format!("({a}-{b})/{c}*({b}+{a})");
        let premier = evaluer(&expr, PRECISION_DEFAUT);
        for _ in 0..3 {
            prop_assert_eq!(&evaluer(&expr, PRECISION_DEFAUT), &premier);
        }
    }

    #[test]
    fn prop_implicite_egal_explicite(a in 0u32..10_000, b in 0u32..10_000, c in 0u32..10_000) {
        let implicite = evaluer(&format!("{a}({b}+{c})"), PRECISION_DEFAUT);
        let explicite = evaluer(&format!("{a}*({b}+{c})"), PRECISION_DEFAUT);
        prop_assert_eq!(implicite, explicite);
    }

    #[test]
    fn prop_espaces_ignores(a in 1u32..10_000, b in 1u32..10_000) {
        let serre = evaluer(&format!("{a}/{b}-{b}"), PRECISION_DEFAUT);
        let aere = evaluer(&format!("  {a} /  {b} - {b}  "), PRECISION_DEFAUT);
        prop_assert_eq!(serre, aere);
    }
}
