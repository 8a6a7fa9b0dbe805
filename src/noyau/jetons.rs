// src/noyau/jetons.rs

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

use super::erreur::ErreurCalcul;
use super::portees::{Portee, PorteesParProfondeur};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Minus,
    Star,
    Slash,
}

impl Op {
    pub fn symbole(self) -> char {
        match self {
            Op::Plus => '+',
            Op::Minus => '-',
            Op::Star => '*',
            Op::Slash => '/',
        }
    }

    /// `*` et `/` : repliés avant `+` et `-`.
    pub fn est_multiplicatif(self) -> bool {
        matches!(self, Op::Star | Op::Slash)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(BigRational),
    Op(Op),

    LPar,
    RPar,

    // Case déjà repliée dans une voisine : sautée par la recherche de voisins.
    Consomme,
}

/// Résultat du découpage : jetons + position source de chaque jeton + portées.
#[derive(Clone, Debug)]
pub struct Decoupage {
    pub jetons: Vec<Tok>,
    pub positions: Vec<usize>,
    pub portees: PorteesParProfondeur,
}

impl Decoupage {
    fn pousser(&mut self, tok: Tok, position: usize) {
        self.jetons.push(tok);
        self.positions.push(position);
    }

    fn dernier(&self) -> Option<&Tok> {
        self.jetons.last()
    }

    fn dernier_est_op(&self) -> bool {
        matches!(self.dernier(), Some(Tok::Op(_)))
    }

    /// Nombre ou ')' juste avant : une multiplication implicite s’impose.
    fn dernier_est_operande(&self) -> bool {
        matches!(self.dernier(), Some(Tok::Num(_) | Tok::RPar))
    }
}

/// Parenthèse ouverte en attente de sa fermante.
#[derive(Clone, Copy, Debug)]
struct Ouverture {
    debut: usize,
    profondeur: usize,
    index: usize,
}

/// Tokenize une chaîne en jetons + portées, en une seule passe gauche → droite.
///
/// C’est le seul validateur de syntaxe : tout ce qui sort d’ici en `Ok` est
/// repliable par l’évaluateur sans autre vérification.
/// Supporte:
/// - entiers (ex: 12) ; des espaces entre chiffres ne coupent pas le nombre
/// - opérateurs + - * /
/// - parenthèses ( ) avec multiplication implicite : 2(3), (2)3, (2)(3)
/// - + / - en tête (en début d’expression ou après '(')
pub fn tokenize(s: &str) -> Result<Decoupage, ErreurCalcul> {
    let chars: Vec<char> = s.chars().collect();
    let dernier_index = chars.len().saturating_sub(1);

    let mut out = Decoupage {
        jetons: Vec::new(),
        positions: Vec::new(),
        portees: PorteesParProfondeur::new(),
    };
    let mut ouvertures: Vec<Ouverture> = Vec::new();
    let mut profondeur: usize = 0;

    for (i, &c) in chars.iter().enumerate() {
        if c.is_whitespace() {
            continue;
        }

        match c {
            '0'..='9' => {
                // "/0" : rejet lexical immédiat (seulement le motif littéral)
                if c == '0' && matches!(out.dernier(), Some(Tok::Op(Op::Slash))) {
                    let index = out.positions.last().copied().unwrap_or(i);
                    return Err(ErreurCalcul::DivisionParZero { index });
                }

                let chiffre = BigRational::from_integer(BigInt::from(c as u32 - '0' as u32));

                if let Some(Tok::Num(n)) = out.jetons.last_mut() {
                    let dix = BigRational::from_integer(BigInt::from(10));
                    *n = &*n * &dix + chiffre;
                    continue;
                }

                if matches!(out.dernier(), Some(Tok::RPar)) {
                    out.pousser(Tok::Op(Op::Star), i);
                }
                out.pousser(Tok::Num(chiffre), i);
            }

            '(' => {
                if out.dernier_est_operande() {
                    out.pousser(Tok::Op(Op::Star), i);
                }
                out.pousser(Tok::LPar, i);
                profondeur += 1;
                ouvertures.push(Ouverture {
                    debut: out.jetons.len(),
                    profondeur,
                    index: i,
                });
            }

            ')' => {
                if ouvertures.is_empty() {
                    return Err(ErreurCalcul::ParentheseNonAppariee { index: i });
                }
                match out.dernier() {
                    Some(Tok::LPar) => return Err(ErreurCalcul::ParenthesesVides { index: i }),
                    Some(Tok::Op(_)) => return Err(ErreurCalcul::OperateurFinal { index: i }),
                    _ => {}
                }

                let Some(ouv) = ouvertures.pop() else {
                    return Err(ErreurCalcul::ParentheseNonAppariee { index: i });
                };
                out.portees.enregistrer(Portee {
                    profondeur: ouv.profondeur,
                    debut: ouv.debut,
                    fin: out.jetons.len() - 1,
                });
                out.pousser(Tok::RPar, i);
                profondeur -= 1;
            }

            '+' | '-' => {
                if out.dernier_est_op() {
                    return Err(ErreurCalcul::OperateursAdjacents { index: i });
                }
                if i == dernier_index {
                    return Err(ErreurCalcul::OperateurFinal { index: i });
                }
                let op = if c == '+' { Op::Plus } else { Op::Minus };
                out.pousser(Tok::Op(op), i);
            }

            '*' | '/' => {
                if matches!(out.dernier(), None | Some(Tok::LPar)) {
                    return Err(ErreurCalcul::OperateurMultiplicatifEnTete { index: i });
                }
                if out.dernier_est_op() {
                    return Err(ErreurCalcul::OperateursAdjacents { index: i });
                }
                if i == dernier_index {
                    return Err(ErreurCalcul::OperateurFinal { index: i });
                }
                let op = if c == '*' { Op::Star } else { Op::Slash };
                out.pousser(Tok::Op(op), i);
            }

            _ => {
                return Err(ErreurCalcul::CaractereInvalide {
                    index: i,
                    caractere: c,
                })
            }
        }
    }

    if out.jetons.is_empty() {
        return Err(ErreurCalcul::ExpressionVide);
    }
    // la plus interne des parenthèses restées ouvertes
    if let Some(ouv) = ouvertures.last() {
        return Err(ErreurCalcul::ParentheseNonAppariee { index: ouv.index });
    }
    // "2+ " : l’opérateur n’est pas le dernier caractère, mais reste le dernier jeton
    if out.dernier_est_op() {
        let index = out.positions.last().copied().unwrap_or(dernier_index);
        return Err(ErreurCalcul::OperateurFinal { index });
    }

    let fin = out.jetons.len() - 1;
    out.portees.enregistrer(Portee {
        profondeur: 0,
        debut: 0,
        fin,
    });

    log::debug!(
        "découpage: {} jetons, profondeur max {}",
        out.jetons.len(),
        out.portees.profondeur_max()
    );

    Ok(out)
}

/// n, ou n/d si la valeur n’est pas entière.
pub fn format_rat(r: &BigRational) -> String {
    let n = r.numer();
    let d = r.denom();
    if d.is_one() {
        format!("{n}")
    } else {
        format!("{n}/{d}")
    }
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(r) => format_rat(r),
            Tok::Op(op) => op.symbole().to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
            Tok::Consomme => "·".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
