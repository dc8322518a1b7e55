// src/noyau/indice.rs
//
// Indices + espaces + contexte de génération.
// - Espace : occupé (i), virtuel (a), complet (p), photon (x)
// - Indice : espace + numéro + drapeau externe (indice libre, jamais renommé)
// - ContexteIndices : compteur explicite par espace, passé à chaque constructeur
//
// Pas d'état global : deux constructions qui partagent un contexte ne peuvent pas
// produire deux fois le même indice muet.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Espace {
    Occupe,
    Virtuel,
    Complet,
    Photon,
}

impl Espace {
    pub const TOUS: [Espace; 4] = [
        Espace::Occupe,
        Espace::Virtuel,
        Espace::Complet,
        Espace::Photon,
    ];

    pub fn lettre(self) -> char {
        match self {
            Espace::Occupe => 'i',
            Espace::Virtuel => 'a',
            Espace::Complet => 'p',
            Espace::Photon => 'x',
        }
    }

    fn rang(self) -> usize {
        match self {
            Espace::Occupe => 0,
            Espace::Virtuel => 1,
            Espace::Complet => 2,
            Espace::Photon => 3,
        }
    }

    /// Intersection de deux espaces ; None si disjoints.
    /// Complet = occupé ∪ virtuel. Les modes photoniques ne croisent aucun espace orbital.
    pub fn intersection(self, autre: Espace) -> Option<Espace> {
        use Espace::*;
        match (self, autre) {
            (x, y) if x == y => Some(x),
            (Complet, Occupe) | (Occupe, Complet) => Some(Occupe),
            (Complet, Virtuel) | (Virtuel, Complet) => Some(Virtuel),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Indice {
    pub espace: Espace,
    pub numero: u32,
    pub externe: bool,
}

impl Indice {
    /// Indice muet (sommé) : normalement fourni par un ContexteIndices.
    pub fn muet(espace: Espace, numero: u32) -> Self {
        Indice {
            espace,
            numero,
            externe: false,
        }
    }

    /// Indice libre : jamais éliminé ni renuméroté.
    pub fn externe(espace: Espace, numero: u32) -> Self {
        Indice {
            espace,
            numero,
            externe: true,
        }
    }

    /// Lettre de l'espace, en majuscule pour un indice externe.
    fn lettre(&self) -> char {
        if self.externe {
            self.espace.lettre().to_ascii_uppercase()
        } else {
            self.espace.lettre()
        }
    }

    pub fn latex(&self) -> String {
        format!("{}_{{{}}}", self.lettre(), self.numero)
    }
}

impl fmt::Display for Indice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.lettre(), self.numero)
    }
}

/* ------------------------ Contexte de génération ------------------------ */

/// Compteurs monotones, un par espace. Le premier indice de chaque espace porte le numéro 1.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContexteIndices {
    compteurs: [u32; 4],
}

impl ContexteIndices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nouveau(&mut self, espace: Espace) -> Indice {
        let c = &mut self.compteurs[espace.rang()];
        *c += 1;
        Indice::muet(espace, *c)
    }

    pub fn nouveaux(&mut self, espace: Espace, n: usize) -> Vec<Indice> {
        (0..n).map(|_| self.nouveau(espace)).collect()
    }

    /// Nombre d'indices déjà générés dans `espace`.
    pub fn emis(&self, espace: Espace) -> u32 {
        self.compteurs[espace.rang()]
    }
}
