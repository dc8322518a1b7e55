// src/noyau/tenseur.rs
//
// Feuille Tenseur.
// - nom + indices hauts + indices bas + étiquette de symétrie
// - opérateur élémentaire (création / annihilation) : même feuille, étiquetée par
//   sa statistique ; un seul indice, en bas, aucun en haut
//
// La canonisation d'un tenseur (anti)symétrique trie chaque liste d'indices :
// - symétrique      : tri sans signe
// - antisymétrique  : tri + parité de la permutation ; indice répété => zéro

use std::collections::BTreeMap;

use super::indice::Indice;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symetrie {
    Aucune,
    Symetrique,
    Antisymetrique,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Statistique {
    Fermion,
    Boson,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    Creation,
    Annihilation,
}

impl Action {
    pub fn adjointe(self) -> Action {
        match self {
            Action::Creation => Action::Annihilation,
            Action::Annihilation => Action::Creation,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Operateur {
    pub statistique: Statistique,
    pub action: Action,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tenseur {
    pub nom: String,
    pub haut: Vec<Indice>,
    pub bas: Vec<Indice>,
    pub symetrie: Symetrie,
    pub operateur: Option<Operateur>,
}

impl Tenseur {
    pub fn new(nom: impl Into<String>, haut: Vec<Indice>, bas: Vec<Indice>, symetrie: Symetrie) -> Self {
        Tenseur {
            nom: nom.into(),
            haut,
            bas,
            symetrie,
            operateur: None,
        }
    }

    /// a†_p, a_p (fermions) ou b†_x, b_x (bosons).
    pub fn operateur_elementaire(statistique: Statistique, action: Action, indice: Indice) -> Self {
        let nom = match statistique {
            Statistique::Fermion => "a",
            Statistique::Boson => "b",
        };
        Tenseur {
            nom: nom.to_string(),
            haut: Vec::new(),
            bas: vec![indice],
            symetrie: Symetrie::Aucune,
            operateur: Some(Operateur { statistique, action }),
        }
    }

    pub fn est_operateur(&self) -> bool {
        self.operateur.is_some()
    }

    /// (étiquette, indice) d'un opérateur élémentaire bien formé.
    pub fn comme_operateur(&self) -> Option<(Operateur, &Indice)> {
        let op = self.operateur?;
        match (self.haut.as_slice(), self.bas.as_slice()) {
            ([], [i]) => Some((op, i)),
            _ => None,
        }
    }

    pub fn indices(&self) -> impl Iterator<Item = &Indice> {
        self.haut.iter().chain(self.bas.iter())
    }

    /// Conjugué hermitien : action inversée pour un opérateur, haut/bas échangés sinon.
    pub fn adjoint(&self) -> Tenseur {
        match self.operateur {
            Some(op) => Tenseur {
                operateur: Some(Operateur {
                    statistique: op.statistique,
                    action: op.action.adjointe(),
                }),
                ..self.clone()
            },
            None => Tenseur {
                haut: self.bas.clone(),
                bas: self.haut.clone(),
                ..self.clone()
            },
        }
    }

    /// Renommage simultané (les indices absents de la table sont gardés).
    pub fn renomme(&self, table: &BTreeMap<Indice, Indice>) -> Tenseur {
        let r = |v: &[Indice]| -> Vec<Indice> {
            v.iter()
                .map(|i| table.get(i).cloned().unwrap_or_else(|| i.clone()))
                .collect()
        };
        Tenseur {
            haut: r(&self.haut),
            bas: r(&self.bas),
            ..self.clone()
        }
    }

    /// Forme canonique : None si le tenseur s'annule, sinon (signe négatif ?, tenseur trié).
    pub fn canonise(self) -> Option<(bool, Tenseur)> {
        match self.symetrie {
            Symetrie::Aucune => Some((false, self)),
            Symetrie::Symetrique => {
                let mut t = self;
                t.haut.sort();
                t.bas.sort();
                Some((false, t))
            }
            Symetrie::Antisymetrique => {
                if a_doublon(&self.haut) || a_doublon(&self.bas) {
                    return None;
                }
                let parite = nombre_inversions(&self.haut) + nombre_inversions(&self.bas);
                let mut t = self;
                t.haut.sort();
                t.bas.sort();
                Some((parite % 2 == 1, t))
            }
        }
    }
}

/* ------------------------ Permutations ------------------------ */

pub(crate) fn nombre_inversions(v: &[Indice]) -> usize {
    let mut n = 0;
    for i in 0..v.len() {
        for j in (i + 1)..v.len() {
            if v[i] > v[j] {
                n += 1;
            }
        }
    }
    n
}

fn a_doublon(v: &[Indice]) -> bool {
    v.iter()
        .enumerate()
        .any(|(k, i)| v[k + 1..].contains(i))
}
