// src/console.rs
//
// Boucle console (natif seulement)
// --------------------------------
// Lit une ligne, évalue, affiche le résultat ou l’erreur, recommence.
// 'q' ou 'Q' (ou fin d’entrée) arrête la boucle.
// Une erreur n’arrête jamais la boucle : elle est affichée, on continue.

use std::io::{self, BufRead, Write};

use crate::noyau::{evaluer, ErreurCalcul};

const INTRO: &str = "Entrez une expression. Pour l’instant, seuls les entiers,\n\
les parenthèses et les opérateurs de base (+, -, *, /)\n\
sont acceptés. Pour quitter la calculatrice, tapez 'q'.";

const INVITE: &str = "> ";

pub fn boucle<R: BufRead, W: Write>(entree: R, mut sortie: W, precision: usize) -> io::Result<()> {
    log::info!("console: précision {precision} chiffres");

    writeln!(sortie, "{INTRO}")?;

    let mut lignes = entree.lines();
    loop {
        write!(sortie, "{INVITE}")?;
        sortie.flush()?;

        let Some(ligne) = lignes.next() else {
            // fin d’entrée : on termine la ligne d’invite
            writeln!(sortie)?;
            break;
        };
        let ligne = ligne?;

        if ligne.trim().eq_ignore_ascii_case("q") {
            break;
        }

        // ligne brute : les index d’erreur restent ceux du texte tapé
        writeln!(sortie, "{}", rendu(&ligne, precision))?;
        writeln!(sortie)?;
    }

    Ok(())
}

/// Texte affiché pour une ligne : résultat suivi de sa nature, ou message d’erreur selon la famille.
pub fn rendu(expr: &str, precision: usize) -> String {
    match evaluer(expr, precision) {
        Ok(v) => format!("{v}\n({})", v.nature()),
        Err(e @ ErreurCalcul::DivisionParZero { .. }) => format!("DIVISION PAR ZÉRO : {e}"),
        Err(e) if e.est_syntaxique() => format!("ERREUR DE SYNTAXE : {e}"),
        Err(e) => {
            log::error!("{expr:?}: {e}");
            format!("ERREUR : {e}")
        }
    }
}
