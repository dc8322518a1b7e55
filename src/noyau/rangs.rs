// src/noyau/rangs.rs
//
// Criblage par rang d'excitation (avant toute contraction).
//
// État = (trous, particules, photons) au-dessus de la référence.
// Chaque monôme agit de droite à gauche, opérateur par opérateur :
// - a†_a, a_i : crée une particule / un trou
// - a_a, a†_i : détruit une particule / un trou (impossible si le compte est nul)
// - indice général : les deux lectures (occupé ou virtuel) sont suivies
// - b†_x / b_x : ajoute / retire un photon
// Les états sont dédupliqués à chaque pas (BTreeSet), le coût reste polynomial.
//
// Un déterminant de rang k = k trous, k particules, aucun photon.

use std::collections::BTreeSet;

use super::expr::Expr;
use super::indice::Espace;
use super::tenseur::{Action, Statistique, Tenseur};

type Etat = (u32, u32, u32);

/// Vrai si un terme de `e`, appliqué à la référence, peut produire un déterminant de rang k.
pub fn eleve_vide_au_rang(e: &Expr, k: u32) -> bool {
    e.termes().iter().any(|(_, m)| {
        etats_atteints(&m.operateurs(), (0, 0, 0)).contains(&(k, k, 0))
    })
}

/// Rang k' ≤ k.
pub fn eleve_vide_jusquau_rang(e: &Expr, k: u32) -> bool {
    (0..=k).any(|r| eleve_vide_au_rang(e, r))
}

/// Vrai si un terme de `e` peut ramener un déterminant de rang k à la référence.
pub fn ramene_au_vide(e: &Expr, k: u32) -> bool {
    e.termes().iter().any(|(_, m)| {
        etats_atteints(&m.operateurs(), (k, k, 0)).contains(&(0, 0, 0))
    })
}

/// Depuis un rang k' ≤ k.
pub fn ramene_au_vide_depuis_rang_au_plus(e: &Expr, k: u32) -> bool {
    (0..=k).any(|r| ramene_au_vide(e, r))
}

fn etats_atteints(operateurs: &[&Tenseur], depart: Etat) -> BTreeSet<Etat> {
    let mut etats = BTreeSet::from([depart]);
    for t in operateurs.iter().rev() {
        etats = etats.iter().flat_map(|&s| successeurs(t, s)).collect();
        if etats.is_empty() {
            break;
        }
    }
    etats
}

/// États possibles après un opérateur ; vide si l'opérateur annule l'état.
fn successeurs(t: &Tenseur, (trous, particules, photons): Etat) -> Vec<Etat> {
    let Some((op, indice)) = t.comme_operateur() else {
        return Vec::new();
    };
    let cree = op.action == Action::Creation;
    match op.statistique {
        Statistique::Boson => {
            if cree {
                vec![(trous, particules, photons + 1)]
            } else {
                photons
                    .checked_sub(1)
                    .map(|n| (trous, particules, n))
                    .into_iter()
                    .collect()
            }
        }
        Statistique::Fermion => {
            let lectures: &[Espace] = match indice.espace {
                Espace::Complet => &[Espace::Occupe, Espace::Virtuel],
                Espace::Occupe => &[Espace::Occupe],
                Espace::Virtuel => &[Espace::Virtuel],
                Espace::Photon => &[],
            };
            lectures
                .iter()
                .filter_map(|&espace| match (espace, cree) {
                    (Espace::Virtuel, true) => Some((trous, particules + 1, photons)),
                    (Espace::Virtuel, false) => {
                        particules.checked_sub(1).map(|n| (trous, n, photons))
                    }
                    (_, false) => Some((trous + 1, particules, photons)),
                    (_, true) => trous.checked_sub(1).map(|n| (n, particules, photons)),
                })
                .collect()
        }
    }
}
