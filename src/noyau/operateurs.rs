// src/noyau/operateurs.rs
//
// Constructeurs d'opérateurs (forme normale, préfacteurs exacts).
// - excitation / désexcitation A(n)      : A^{a…}_{i…} a†_a… a_i…
// - hamiltonien H(n), H()                : f (1 corps), ḡ (2 corps, 1/4), h (n corps)
// - cluster T(n) et T(n)†                : amplitude t
// - bosonique Hw(n), couplage Hep, H couplé
//
// Convention commune : (1/(nc!·na!)) X^{créations}_{annihilations} a†… a…,
// annihilations écrites dans l'ordre inverse des indices du tenseur.
// Chaque appel tire des indices neufs du contexte reçu : enchaîner les appels sur
// un même contexte garantit des indices muets disjoints.

use log::debug;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

use super::expr::Expr;
use super::indice::{ContexteIndices, Espace};
use super::rationnel::Rationnel;
use super::tenseur::{Statistique, Symetrie};

/* ------------------------ Préfacteurs ------------------------ */

fn factorielle(n: usize) -> BigInt {
    (1..=n).fold(BigInt::one(), |acc, k| acc * BigInt::from(k))
}

/// 1 / (nc! · na!)
fn prefacteur(nc: usize, na: usize) -> Rationnel {
    Rationnel::from(BigRational::new(
        BigInt::one(),
        factorielle(nc) * factorielle(na),
    ))
}

/* ------------------------ Brique générique ------------------------ */

/// (1/(nc!·na!)) X^{p…}_{q…} c†_p… c_q(inverse), indices neufs tirés de `ctx`.
/// Au-delà de deux indices, le tenseur est antisymétrique (fermions) ou symétrique (bosons).
pub fn operateur_normal(
    ctx: &mut ContexteIndices,
    nom: &str,
    statistique: Statistique,
    espaces_creation: &[Espace],
    espaces_annihilation: &[Espace],
) -> Expr {
    let cre: Vec<_> = espaces_creation.iter().map(|&e| ctx.nouveau(e)).collect();
    let ann: Vec<_> = espaces_annihilation.iter().map(|&e| ctx.nouveau(e)).collect();

    let symetrie = if cre.len() + ann.len() <= 2 {
        Symetrie::Aucune
    } else {
        match statistique {
            Statistique::Fermion => Symetrie::Antisymetrique,
            Statistique::Boson => Symetrie::Symetrique,
        }
    };

    let mut facteurs = Vec::with_capacity(2 + cre.len() + ann.len());
    facteurs.push(Expr::constante(prefacteur(cre.len(), ann.len())));
    facteurs.push(Expr::tenseur(nom, cre.clone(), ann.clone(), symetrie));
    facteurs.extend(cre.into_iter().map(|i| Expr::creation(statistique, i)));
    facteurs.extend(ann.into_iter().rev().map(|i| Expr::annihilation(statistique, i)));
    Expr::produit(facteurs)
}

fn chaine_de_rangs<F>(ctx: &mut ContexteIndices, k: u32, mut construit: F) -> Expr
where
    F: FnMut(&mut ContexteIndices, u32) -> Expr,
{
    let termes: Vec<Expr> = (1..=k).map(|n| construit(ctx, n)).collect();
    Expr::somme(termes)
}

/* ------------------------ Excitations ------------------------ */

/// A(n) : n > 0 excitation, n < 0 désexcitation (adjoint de A(|n|)), n = 0 identité.
pub fn excitation(ctx: &mut ContexteIndices, n: i32) -> Expr {
    debug!("excitation({n})");
    particule_trou(ctx, "A", n)
}

/// T(n) ; rang négatif = adjoint.
pub fn cluster(ctx: &mut ContexteIndices, n: i32) -> Expr {
    debug!("cluster({n})");
    particule_trou(ctx, "t", n)
}

/// T(n)† ; même rang signé que `cluster`, donc `cluster_adjoint(ctx, -n)` = T(n).
pub fn cluster_adjoint(ctx: &mut ContexteIndices, n: i32) -> Expr {
    cluster(ctx, n).adjoint()
}

/// Σ_{n=1..k} T(n) ; vide (zéro) pour k ≤ 0.
pub fn cluster_jusqua(ctx: &mut ContexteIndices, k: i32) -> Expr {
    let termes: Vec<Expr> = (1..=k).map(|n| cluster(ctx, n)).collect();
    Expr::somme(termes)
}

fn particule_trou(ctx: &mut ContexteIndices, nom: &str, n: i32) -> Expr {
    if n == 0 {
        return Expr::un();
    }
    let rang = n.unsigned_abs() as usize;
    let e = operateur_normal(
        ctx,
        nom,
        Statistique::Fermion,
        &vec![Espace::Virtuel; rang],
        &vec![Espace::Occupe; rang],
    );
    if n > 0 {
        e
    } else {
        e.adjoint()
    }
}

/* ------------------------ Hamiltoniens électroniques ------------------------ */

/// Terme à n corps, indices généraux. H(0) = 0.
pub fn hamiltonien(ctx: &mut ContexteIndices, n: u32) -> Expr {
    debug!("hamiltonien({n})");
    let nom = match n {
        0 => return Expr::zero(),
        1 => "f",
        2 => "g",
        _ => "h",
    };
    let espaces = vec![Espace::Complet; n as usize];
    operateur_normal(ctx, nom, Statistique::Fermion, &espaces, &espaces)
}

/// Σ_{n=1..k} H(n)
pub fn hamiltonien_jusqua(ctx: &mut ContexteIndices, k: u32) -> Expr {
    chaine_de_rangs(ctx, k, hamiltonien)
}

/// H = H(1) + H(2)
pub fn hamiltonien_total(ctx: &mut ContexteIndices) -> Expr {
    hamiltonien_jusqua(ctx, 2)
}

/* ------------------------ Bosons / couplage ------------------------ */

/// Terme bosonique à n quanta : ω (n = 1) ou w symétrique.
pub fn hamiltonien_bosonique(ctx: &mut ContexteIndices, n: u32) -> Expr {
    debug!("hamiltonien_bosonique({n})");
    let nom = match n {
        0 => return Expr::zero(),
        1 => "ω",
        _ => "w",
    };
    let espaces = vec![Espace::Photon; n as usize];
    operateur_normal(ctx, nom, Statistique::Boson, &espaces, &espaces)
}

pub fn hamiltonien_bosonique_jusqua(ctx: &mut ContexteIndices, k: u32) -> Expr {
    chaine_de_rangs(ctx, k, hamiltonien_bosonique)
}

/// d^{p x}_{q} a†_p a_q b†_x + d^{p}_{q x} a†_p a_q b_x (émission + absorption).
pub fn couplage_electron_photon(ctx: &mut ContexteIndices) -> Expr {
    debug!("couplage_electron_photon");
    let (p, q, x) = (
        ctx.nouveau(Espace::Complet),
        ctx.nouveau(Espace::Complet),
        ctx.nouveau(Espace::Photon),
    );
    let emission = Expr::produit([
        Expr::tenseur("d", vec![p.clone(), x.clone()], vec![q.clone()], Symetrie::Aucune),
        Expr::creation(Statistique::Fermion, p),
        Expr::annihilation(Statistique::Fermion, q),
        Expr::creation(Statistique::Boson, x),
    ]);

    let (p, q, x) = (
        ctx.nouveau(Espace::Complet),
        ctx.nouveau(Espace::Complet),
        ctx.nouveau(Espace::Photon),
    );
    let absorption = Expr::produit([
        Expr::tenseur("d", vec![p.clone()], vec![q.clone(), x.clone()], Symetrie::Aucune),
        Expr::creation(Statistique::Fermion, p),
        Expr::annihilation(Statistique::Fermion, q),
        Expr::annihilation(Statistique::Boson, x),
    ]);

    emission + absorption
}

/// H(1) + H(2) + Hw(1) + Hep
pub fn hamiltonien_couple(ctx: &mut ContexteIndices) -> Expr {
    let h = hamiltonien_total(ctx);
    let hw = hamiltonien_bosonique(ctx, 1);
    let hep = couplage_electron_photon(ctx);
    Expr::somme([h, hw, hep])
}

/* ------------------------ Introspection ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Symbole {
    pub nom: &'static str,
    pub notation: &'static str,
    pub description: &'static str,
}

pub const SYMBOLES: &[Symbole] = &[
    Symbole {
        nom: "A",
        notation: "A^{a…}_{i…}",
        description: "amplitude d'excitation (rang > 0) ou de désexcitation (rang < 0)",
    },
    Symbole {
        nom: "t",
        notation: "t^{a…}_{i…}",
        description: "amplitude de cluster T(n)",
    },
    Symbole {
        nom: "f",
        notation: "f^{p}_{q}",
        description: "opérateur de Fock, hamiltonien à un corps",
    },
    Symbole {
        nom: "g",
        notation: "\\bar{g}^{pq}_{rs}",
        description: "intégrales à deux corps antisymétrisées (préfacteur 1/4)",
    },
    Symbole {
        nom: "h",
        notation: "\\bar{h}^{p…}_{q…}",
        description: "terme générique à n corps (n ≥ 3)",
    },
    Symbole {
        nom: "ω",
        notation: "\\omega^{x}_{y}",
        description: "énergie des modes photoniques",
    },
    Symbole {
        nom: "w",
        notation: "\\hat{w}^{x…}_{y…}",
        description: "terme bosonique à n quanta (n ≥ 2), symétrique",
    },
    Symbole {
        nom: "d",
        notation: "d^{px}_{q}, d^{p}_{qx}",
        description: "couplage électron-photon (émission, absorption)",
    },
    Symbole {
        nom: "δ",
        notation: "\\delta^{p}_{q}",
        description: "contraction en base orthonormée",
    },
    Symbole {
        nom: "s",
        notation: "s^{p}_{q}",
        description: "recouvrement (base non orthonormée)",
    },
    Symbole {
        nom: "a",
        notation: "a^{\\dagger}_{p}, a_{p}",
        description: "création / annihilation fermionique",
    },
    Symbole {
        nom: "b",
        notation: "b^{\\dagger}_{x}, b_{x}",
        description: "création / annihilation bosonique",
    },
];

pub fn symboles() -> &'static [Symbole] {
    SYMBOLES
}
