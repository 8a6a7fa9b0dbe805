//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - chaque expression générée porte sa valeur de référence (calculée pendant
//!   la génération) ; `None` = une division par zéro doit être signalée
//! - invariant clé : le noyau rend exactement la référence arrondie

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

use super::{evaluer, ErreurCalcul, Valeur, PRECISION_DEFAUT};

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
        // LCG simple (déterministe)
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
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

/// Texte + valeur exacte attendue (`None` : division par zéro quelque part).
struct Gen {
    texte: String,
    valeur: Option<BigRational>,
}

fn rat(n: u32) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

fn gen_facteur(rng: &mut Rng, depth: usize) -> Gen {
    if depth == 0 || rng.pick(3) == 0 {
        // petits entiers, 0 inclus (utile pour les divisions par zéro)
        let n = rng.pick(13);
        return Gen {
            texte: n.to_string(),
            valeur: Some(rat(n)),
        };
    }

    let inner = gen_expr(rng, depth - 1);
    Gen {
        texte: format!("({})", inner.texte),
        valeur: inner.valeur,
    }
}

fn gen_terme(rng: &mut Rng, depth: usize) -> Gen {
    let mut acc = gen_facteur(rng, depth);

    for _ in 0..rng.pick(3) {
        let f = gen_facteur(rng, depth);

        // multiplication implicite seulement contre une parenthèse
        let implicite_possible = acc.texte.ends_with(')') || f.texte.starts_with('(');

        let (sep, division) = match rng.pick(3) {
            0 => ("*", false),
            1 => (" / ", true),
            _ if implicite_possible => ("", false),
            _ => (" * ", false),
        };

        let valeur = match (acc.valeur, f.valeur) {
            (Some(a), Some(b)) if division => {
                if b.is_zero() {
                    None
                } else {
                    Some(a / b)
                }
            }
            (Some(a), Some(b)) => Some(a * b),
            _ => None,
        };

        acc = Gen {
            texte: format!("{}{sep}{}", acc.texte, f.texte),
            valeur,
        };
    }

    acc
}

fn gen_expr(rng: &mut Rng, depth: usize) -> Gen {
    let signe = match rng.pick(4) {
        0 => "-",
        1 => "+",
        _ => "",
    };

    let premier = gen_terme(rng, depth);
    let mut acc = Gen {
        texte: format!("{signe}{}", premier.texte),
        valeur: if signe == "-" {
            premier.valeur.map(|v| -v)
        } else {
            premier.valeur
        },
    };

    for _ in 0..rng.pick(3) {
        let t = gen_terme(rng, depth);
        let plus = rng.coin();

        let valeur = match (acc.valeur, t.valeur) {
            (Some(a), Some(b)) => Some(if plus { a + b } else { a - b }),
            _ => None,
        };

        acc = Gen {
            texte: format!("{}{}{}", acc.texte, if plus { "+" } else { " - " }, t.texte),
            valeur,
        };
    }

    acc
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_reference_exacte() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let g = gen_expr(&mut rng, 4);

        match (evaluer(&g.texte, PRECISION_DEFAUT), g.valeur) {
            (Ok(v), Some(attendu)) => {
                assert_eq!(
                    v,
                    Valeur::depuis_rationnel(&attendu, PRECISION_DEFAUT),
                    "expr={:?}",
                    g.texte
                );
                seen_ok += 1;
            }
            (Err(ErreurCalcul::DivisionParZero { .. }), None) => {
                seen_err += 1;
            }
            (obtenu, attendu) => {
                panic!(
                    "expr={:?} obtenu={obtenu:?} attendu={attendu:?}",
                    g.texte
                );
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_determinisme() {
    let mut a = Rng::new(0xBADC0DE_u64);
    let mut b = Rng::new(0xBADC0DE_u64);

    for _ in 0..50 {
        let ga = gen_expr(&mut a, 3);
        let gb = gen_expr(&mut b, 3);
        assert_eq!(ga.texte, gb.texte);
        assert_eq!(
            evaluer(&ga.texte, PRECISION_DEFAUT),
            evaluer(&gb.texte, PRECISION_DEFAUT)
        );
    }
}

#[test]
fn fuzz_safe_corruption_donne_une_erreur_propre() {
    // Chaque expression valide, tronquée ou salie, doit rendre Ok ou une erreur typée.
    let mut rng = Rng::new(0x5EED_u64);
    let parasites = ['(', ')', '+', '*', '/', '&', ' '];

    for _ in 0..200 {
        let g = gen_expr(&mut rng, 3);
        let mut chars: Vec<char> = g.texte.chars().collect();
        let at = rng.pick(chars.len() as u32 + 1) as usize;
        let parasite = parasites[rng.pick(parasites.len() as u32) as usize];
        if rng.coin() {
            chars.insert(at, parasite);
        } else {
            chars.truncate(at);
        }
        let s: String = chars.into_iter().collect();

        if let Err(e) = evaluer(&s, PRECISION_DEFAUT) {
            assert!(
                !matches!(e, ErreurCalcul::Interne { .. }),
                "erreur interne: expr={s:?} err={e}"
            );
        }
    }
}

#[test]
fn fuzz_safe_imbrication_profonde_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    // rien de récursif dans le noyau : 1000 niveaux de parenthèses passent
    let n = 1000;
    let expr = format!("{}1{}", "(".repeat(n), "+1)".repeat(n));
    let v = evaluer(&expr, 10).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    assert_eq!(v, Valeur::Entier(BigInt::from(n as u32 + 1)));
}

#[test]
fn fuzz_safe_longue_chaine_plate() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let expr = vec!["1/2"; 800].join("+");
    let v = evaluer(&expr, 10).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    // 800*(1/2) = 400
    assert_eq!(v.to_string(), "400");
}
