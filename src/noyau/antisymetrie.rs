// src/noyau/antisymetrie.rs
//
// Développement des tenseurs antisymétriques en tenseurs sans symétrie.
// ḡ^{pq}_{rs} = g^{pq}_{rs} - g^{qp}_{rs}
//
// - chaque permutation σ des indices hauts donne (-1)^{inv(σ)} X^{σ(haut)}_{bas}
// - indices bas gardés dans l'ordre canonique
// - rang 1, rangs haut/bas différents, opérateurs : inchangés
// La somme obtenue est re-canonisée (distribution dans les produits englobants).

use log::debug;

use super::expr::Expr;
use super::indice::Indice;
use super::rationnel::Rationnel;
use super::tenseur::{nombre_inversions, Symetrie, Tenseur};

/// Remplace chaque tenseur antisymétrique (rang ≥ 2, autant d'indices hauts que bas)
/// par la somme signée de ses permutations.
pub fn developpe_antisymetrie(e: &Expr) -> Expr {
    match e {
        Expr::Constante(_) => e.clone(),
        Expr::Tenseur(t) => developpe_tenseur(t),
        Expr::Somme(ts) => Expr::somme_ponderee(
            ts.iter()
                .map(|t| (t.coeff.clone(), developpe_antisymetrie(&t.expr))),
        ),
        Expr::Produit(fs) => Expr::produit(fs.iter().map(developpe_antisymetrie)),
    }
}

fn developpe_tenseur(t: &Tenseur) -> Expr {
    let developpable = t.symetrie == Symetrie::Antisymetrique
        && !t.est_operateur()
        && t.haut.len() > 1
        && t.haut.len() == t.bas.len();
    if !developpable {
        return Expr::depuis_tenseur(t.clone());
    }

    let mut haut = t.haut.clone();
    haut.sort();
    let mut termes: Vec<(Rationnel, Expr)> = Vec::new();
    loop {
        let signe = if nombre_inversions(&haut) % 2 == 0 { 1 } else { -1 };
        let x = Tenseur::new(t.nom.clone(), haut.clone(), t.bas.clone(), Symetrie::Aucune);
        termes.push((Rationnel::entier(signe), Expr::depuis_tenseur(x)));
        if !permutation_suivante(&mut haut) {
            break;
        }
    }
    debug!("développement de {} : {} termes", t.nom, termes.len());
    Expr::somme_ponderee(termes)
}

/// Permutation suivante dans l'ordre lexicographique ; false après la dernière.
fn permutation_suivante(v: &mut [Indice]) -> bool {
    let Some(i) = (1..v.len()).rev().find(|&i| v[i - 1] < v[i]) else {
        return false;
    };
    let pivot = i - 1;
    let mut j = v.len() - 1;
    while v[j] <= v[pivot] {
        j -= 1;
    }
    v.swap(pivot, j);
    v[i..].reverse();
    true
}
