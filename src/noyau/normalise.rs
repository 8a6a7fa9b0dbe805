// src/noyau/normalise.rs

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

/// Précision par défaut (chiffres après la virgule).
pub const PRECISION_DEFAUT: usize = 30;

/// Garde-fou : on borne la précision (anti-abus / anti-gel).
pub const PRECISION_MAX: usize = 200;

pub fn borner_precision(precision: usize) -> usize {
    precision.min(PRECISION_MAX)
}

/// Résultat final, déjà arrondi.
///
/// `Decimal` vaut `mantisse / 10^echelle`, sans zéro final dans la mantisse
/// (et `echelle > 0`, sinon ce serait un `Entier`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Valeur {
    Entier(BigInt),
    Decimal { mantisse: BigInt, echelle: usize },
}

impl Valeur {
    /// Arrondi au demi supérieur (égalité : on s’éloigne de zéro) à `precision` chiffres.
    /// Entier si la partie fractionnaire arrondie est nulle.
    pub fn depuis_rationnel(r: &BigRational, precision: usize) -> Self {
        if r.is_integer() {
            return Valeur::Entier(r.to_integer());
        }

        // on travaille sur la valeur absolue, le signe est remis à la fin
        let scale = pow10(precision);
        let num = r.numer().abs() * &scale;
        let denom = r.denom();
        let q = &num / denom;
        let reste = &num % denom;
        let mut scaled = if reste * 2u32 >= *denom { q + 1u32 } else { q };

        let signe = |n: BigInt| if r.is_negative() { -n } else { n };

        if (&scaled % &scale).is_zero() {
            return Valeur::Entier(signe(&scaled / &scale));
        }

        // retire les zéros finaux
        let dix = BigInt::from(10);
        let mut echelle = precision;
        while (&scaled % &dix).is_zero() {
            scaled /= &dix;
            echelle -= 1;
        }

        Valeur::Decimal {
            mantisse: signe(scaled),
            echelle,
        }
    }

    pub fn nature(&self) -> &'static str {
        match self {
            Valeur::Entier(_) => "entier",
            Valeur::Decimal { .. } => "décimal",
        }
    }
}

impl fmt::Display for Valeur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Valeur::Entier(n) => write!(f, "{n}"),
            Valeur::Decimal { mantisse, echelle } => {
                f.write_str(&scaled_to_decimal(mantisse.clone(), *echelle))
            }
        }
    }
}

/* ------------------------ Décimal (scaled -> texte) ------------------------ */

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal.
fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    if digits == 0 {
        return if neg {
            format!("-{int_part}")
        } else {
            format!("{int_part}")
        };
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    if neg {
        format!("-{int_part}.{frac}")
    } else {
        format!("{int_part}.{frac}")
    }
}
