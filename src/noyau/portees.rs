// src/noyau/portees.rs

/// Une portée = un bloc de jetons à replier en une seule valeur.
///
/// `debut..=fin` borne le contenu ENTRE une paire de parenthèses
/// (parenthèses exclues), sauf la portée racine (profondeur 0) qui couvre
/// tout le tableau de jetons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Portee {
    pub profondeur: usize,
    pub debut: usize,
    pub fin: usize,
}

impl Portee {
    pub fn est_racine(&self) -> bool {
        self.profondeur == 0
    }
}

/// Portées rangées par profondeur, chacune dans l’ordre de sa parenthèse fermante.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PorteesParProfondeur {
    niveaux: Vec<Vec<Portee>>,
}

impl PorteesParProfondeur {
    pub fn new() -> Self {
        Self {
            niveaux: vec![Vec::new()],
        }
    }

    /// Ajoute une portée à son niveau (crée les niveaux manquants).
    pub fn enregistrer(&mut self, portee: Portee) {
        while self.niveaux.len() <= portee.profondeur {
            self.niveaux.push(Vec::new());
        }
        self.niveaux[portee.profondeur].push(portee);
    }

    pub fn profondeur_max(&self) -> usize {
        self.niveaux.len().saturating_sub(1)
    }

    pub fn niveau(&self, profondeur: usize) -> &[Portee] {
        self.niveaux
            .get(profondeur)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Ordre d’évaluation : du plus profond au plus superficiel,
    /// ordre d’enregistrement à profondeur égale. Les niveaux vides sont sautés.
    pub fn du_plus_profond(&self) -> impl Iterator<Item = &Portee> + '_ {
        self.niveaux.iter().rev().flat_map(|n| n.iter())
    }
}

/// Format utilitaire (démarche) : une ligne par profondeur non vide.
pub fn format_portees(portees: &PorteesParProfondeur) -> String {
    let mut lignes = Vec::new();
    for p in 0..=portees.profondeur_max() {
        let niveau = portees.niveau(p);
        if niveau.is_empty() {
            continue;
        }
        let blocs: Vec<String> = niveau
            .iter()
            .map(|r| format!("[{}..{}]", r.debut, r.fin))
            .collect();
        lignes.push(format!("profondeur {p} : {}", blocs.join(" ")));
    }
    lignes.join("\n")
}
