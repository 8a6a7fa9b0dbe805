//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> portées (de la plus profonde à la racine) -> replis en place
//!          -> arrondi -> Valeur
//!
//! Chaque portée est une suite plate de jetons. La priorité vient seulement de
//! l’ordre des passes (`*` `/` puis `+` `-`) ; un repli écrit son résultat dans
//! la case de l’opérateur et marque ses deux opérandes `Consomme`. Les indices
//! ne bougent jamais, donc les bornes de portées restent valides jusqu’au bout.

use num_rational::BigRational;
use num_traits::Zero;

use super::erreur::ErreurCalcul;
use super::jetons::{format_rat, format_tokens, tokenize, Decoupage, Op, Tok};
use super::normalise::{borner_precision, Valeur};
use super::portees::{format_portees, Portee, PorteesParProfondeur};

#[derive(Default, Clone, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub portees: String,
    pub etapes: String,
    pub note: String,
}

/// API publique : évalue une expression, résultat arrondi à `precision` chiffres.
pub fn evaluer(expr_str: &str, precision: usize) -> Result<Valeur, ErreurCalcul> {
    let decoupage = tokenize(expr_str)?;
    let mut etapes = String::new();
    let r = replier_decoupage(decoupage, &mut etapes)?;
    Ok(Valeur::depuis_rationnel(&r, borner_precision(precision)))
}

/// Comme `evaluer`, plus la démarche (jetons, portées, un repli par ligne).
pub fn evaluer_avec_demarche(
    expr_str: &str,
    precision: usize,
) -> Result<(Valeur, Demarche), ErreurCalcul> {
    let precision = borner_precision(precision);

    let decoupage = tokenize(expr_str)?;
    let jetons_txt = format_tokens(&decoupage.jetons);
    let portees_txt = format_portees(&decoupage.portees);

    let mut etapes = String::new();
    let r = replier_decoupage(decoupage, &mut etapes)?;
    let valeur = Valeur::depuis_rationnel(&r, precision);

    log::debug!("{expr_str:?} = {valeur}");

    let d = Demarche {
        jetons: jetons_txt,
        portees: portees_txt,
        etapes,
        note: format!(
            "Pipeline: jetons → portées (de la plus profonde à la racine) → * / puis + - → arrondi ({precision} chiffres)."
        ),
    };

    Ok((valeur, d))
}

fn replier_decoupage(decoupage: Decoupage, etapes: &mut String) -> Result<BigRational, ErreurCalcul> {
    let Decoupage {
        mut jetons,
        positions,
        portees,
    } = decoupage;
    evaluer_portees(&mut jetons, &positions, &portees, etapes)
}

/// Replie toutes les portées, de la plus profonde à la racine, puis lit
/// l’unique jeton survivant (valeur exacte, non arrondie).
pub fn evaluer_portees(
    jetons: &mut [Tok],
    positions: &[usize],
    portees: &PorteesParProfondeur,
    etapes: &mut String,
) -> Result<BigRational, ErreurCalcul> {
    for portee in portees.du_plus_profond() {
        replier_portee(jetons, positions, portee, etapes)?;
    }

    let mut vivants = jetons
        .iter()
        .enumerate()
        .filter(|(_, t)| !matches!(t, Tok::Consomme));

    match (vivants.next(), vivants.next()) {
        (Some((_, Tok::Num(v))), None) => Ok(v.clone()),
        (Some((i, _)), _) => Err(ErreurCalcul::Interne {
            index: position(positions, i),
            detail: "plus d’un jeton après repli",
        }),
        (None, _) => Err(ErreurCalcul::Interne {
            index: 0,
            detail: "aucun jeton après repli",
        }),
    }
}

fn replier_portee(
    jetons: &mut [Tok],
    positions: &[usize],
    portee: &Portee,
    etapes: &mut String,
) -> Result<(), ErreurCalcul> {
    let Portee { debut, fin, .. } = *portee;
    let dans_le_tableau = if portee.est_racine() {
        debut <= fin && fin < jetons.len()
    } else {
        debut >= 1 && debut <= fin && fin < jetons.len().saturating_sub(1)
    };
    if !dans_le_tableau {
        return Err(ErreurCalcul::Interne {
            index: position(positions, debut),
            detail: "portée hors du tableau de jetons",
        });
    }
    let mut debut = debut;

    log::debug!(
        "portée profondeur {} [{}..{}] : {}",
        portee.profondeur,
        debut,
        fin,
        format_tokens(&jetons[debut..=fin])
    );

    // 1) retire les parenthèses englobantes
    if !portee.est_racine() {
        jetons[debut - 1] = Tok::Consomme;
        jetons[fin + 1] = Tok::Consomme;
    }

    // 2) signe en tête
    match jetons[debut] {
        Tok::Op(Op::Plus) => {
            jetons[debut] = Tok::Consomme;
            debut += 1;
        }
        Tok::Op(Op::Minus) => {
            jetons[debut] = Tok::Consomme;
            debut += 1;
            while debut <= fin && matches!(jetons[debut], Tok::Consomme) {
                debut += 1;
            }
            match jetons.get_mut(debut) {
                Some(Tok::Num(n)) => *n = -&*n,
                _ => {
                    return Err(ErreurCalcul::Interne {
                        index: position(positions, debut),
                        detail: "signe '-' sans nombre",
                    })
                }
            }
            debut += 1;
        }
        _ => {}
    }

    // 3) * / puis 4) + -, chacun de gauche à droite
    for multiplicatif in [true, false] {
        for i in debut..=fin {
            let op = match &jetons[i] {
                Tok::Op(op) if op.est_multiplicatif() == multiplicatif => *op,
                _ => continue,
            };
            replier(jetons, positions, i, op, etapes)?;
        }
    }

    Ok(())
}

/// Replie `gauche op droite` dans la case de l’opérateur.
fn replier(
    jetons: &mut [Tok],
    positions: &[usize],
    i: usize,
    op: Op,
    etapes: &mut String,
) -> Result<(), ErreurCalcul> {
    let index = position(positions, i);

    let (Some(g), Some(d)) = (voisin_gauche(jetons, i), voisin_droit(jetons, i)) else {
        return Err(ErreurCalcul::Interne {
            index,
            detail: "opérande manquant",
        });
    };

    let (Tok::Num(a), Tok::Num(b)) = (&jetons[g], &jetons[d]) else {
        return Err(ErreurCalcul::Interne {
            index,
            detail: "opérande non numérique",
        });
    };

    let r = match op {
        Op::Plus => a + b,
        Op::Minus => a - b,
        Op::Star => a * b,
        Op::Slash => {
            if b.is_zero() {
                return Err(ErreurCalcul::DivisionParZero { index });
            }
            a / b
        }
    };

    let ligne = format!(
        "{} {} {} = {}",
        format_rat(a),
        op.symbole(),
        format_rat(b),
        format_rat(&r)
    );
    log::trace!("{ligne}");
    push_etape(etapes, &ligne);

    jetons[i] = Tok::Num(r);
    jetons[g] = Tok::Consomme;
    jetons[d] = Tok::Consomme;
    Ok(())
}

fn voisin_gauche(jetons: &[Tok], i: usize) -> Option<usize> {
    (0..i).rev().find(|&k| !matches!(jetons[k], Tok::Consomme))
}

fn voisin_droit(jetons: &[Tok], i: usize) -> Option<usize> {
    (i + 1..jetons.len()).find(|&k| !matches!(jetons[k], Tok::Consomme))
}

fn position(positions: &[usize], i: usize) -> usize {
    positions.get(i).copied().unwrap_or(0)
}

fn push_etape(etapes: &mut String, ligne: &str) {
    if !etapes.is_empty() {
        etapes.push('\n');
    }
    etapes.push_str(ligne);
}
