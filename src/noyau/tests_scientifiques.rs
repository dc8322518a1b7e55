//! Tests scientifiques (campagne) : scénarios physiques + déterminisme + limites contrôlées.
//!
//! But : vérifier le moteur sur des expressions réelles (CC, couplage photonique)
//! sans faire chauffer la machine.
//! - budget temps global
//! - un seul contexte d'indices par construction (indices muets disjoints)
//! - logger de test (simplelog) : les traces `debug!` du moteur sont visibles avec --nocapture
//!
//! Convention de positions : chaîne d'opérateurs élémentaires aplatie, base 0.
//! A(-2) occupe 0..4, puis chaque facteur suivant enchaîne ses opérateurs.

use std::time::{Duration, Instant};

use simplelog::{Config, LevelFilter, TestLogger};

use super::contraction::{contracte, moyenne_vide, Motif};
use super::erreur::Erreur;
use super::expr::Expr;
use super::indice::{ContexteIndices, Espace, Indice};
use super::operateurs::{
    cluster, excitation, hamiltonien, hamiltonien_bosonique, hamiltonien_couple, hamiltonien_total,
};
use super::options::Options;
use super::rationnel::Rationnel;
use super::tenseur::Statistique;

fn init_logs() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

fn nombre_de(e: &Expr, nom: &str) -> usize {
    e.facteurs()
        .iter()
        .filter(|f| matches!(f, Expr::Tenseur(t) if t.nom == nom))
        .count()
}

/// ⟨0| A(-2) H T2 T2 |0⟩, une seule topologie.
fn ccsd_dirige() -> Expr {
    let mut ctx = ContexteIndices::new();
    let e = Expr::produit([
        excitation(&mut ctx, -2),
        hamiltonien_total(&mut ctx),
        cluster(&mut ctx, 2),
        cluster(&mut ctx, 2),
    ]);
    moyenne_vide(&e, &[(2, 6), (3, 7)]).unwrap_or_else(|err| panic!("ccsd: {err}"))
}

/* ------------------------ Rendu des hamiltoniens ------------------------ */

#[test]
fn sci_hamiltoniens_rendus() {
    let mut ctx = ContexteIndices::new();
    let h1 = hamiltonien(&mut ctx, 1).latex();
    let h2 = hamiltonien(&mut ctx, 2).latex();
    assert!(!h1.is_empty() && !h2.is_empty());
    assert_ne!(h1, h2);
    assert_eq!(h1, "{f^{{p_{1}}}_{{p_{2}}}}{a^{\\dagger}_{p_{1}}}{a_{p_{2}}}");

    let total = hamiltonien_total(&mut ContexteIndices::new()).latex();
    assert_eq!(total, format!("{h1} + {h2}"));
}

/* ------------------------ Désexcitation × excitation ------------------------ */

#[test]
fn sci_rang2_contraction_complete_deltas() {
    init_logs();
    let mut ctx = ContexteIndices::new();
    let e = Expr::produit([excitation(&mut ctx, -2), excitation(&mut ctx, 2)]);
    let r = moyenne_vide(&e, &[(3, 4), (2, 5), (1, 6), (0, 7)]).unwrap();

    let termes = r.termes();
    assert_eq!(termes.len(), 1);
    let (c, m) = &termes[0];
    assert_eq!(*c, Rationnel::new(1, 16).unwrap());
    assert_eq!(nombre_de(m, "δ"), 4);
    assert_eq!(nombre_de(m, "A"), 2);
    assert!(m.operateurs().is_empty());

    // δ éliminés : il reste A^{ij}_{ab} A^{ab}_{ij}
    let opts = Options::default().avec_reduction_deltas(true);
    let motif = Motif::new([(3, 4), (2, 5), (1, 6), (0, 7)]).unwrap();
    let (reduit, d) = contracte(&e, &motif, &opts).unwrap();
    let (_, m) = reduit.termes().remove(0);
    assert_eq!(nombre_de(&m, "δ"), 0);
    assert_eq!(nombre_de(&m, "A"), 2);
    assert_eq!(d.termes_evalues, 1);
    assert_eq!(d.termes_annules, 0);
}

#[test]
fn sci_rang2_indices_identiques_donne_un() {
    let i = |n| Indice::muet(Espace::Occupe, n);
    let a = |n| Indice::muet(Espace::Virtuel, n);
    let cre = |x| Expr::creation(Statistique::Fermion, x);
    let ann = |x| Expr::annihilation(Statistique::Fermion, x);

    let chaine = Expr::chaine([
        cre(i(1)),
        cre(i(2)),
        ann(a(2)),
        ann(a(1)),
        cre(a(1)),
        cre(a(2)),
        ann(i(2)),
        ann(i(1)),
    ])
    .unwrap();
    let r = moyenne_vide(&chaine, &[(3, 4), (2, 5), (1, 6), (0, 7)]).unwrap();
    assert_eq!(r, Expr::un());
}

#[test]
fn sci_rang2_roles_incompatibles_zero() {
    let mut ctx = ContexteIndices::new();
    let e = Expr::produit([excitation(&mut ctx, -2), excitation(&mut ctx, 2)]);
    // deux créateurs
    let r = moyenne_vide(&e, &[(0, 1)]).unwrap();
    assert_eq!(r, Expr::zero());
}

/* ------------------------ CCSD dirigé ------------------------ */

#[test]
fn sci_ccsd_deterministe() {
    init_logs();
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    let reference = ccsd_dirige();
    let latex = reference.latex();
    assert!(!latex.is_empty());
    // seul le terme à un corps survit (le terme à deux corps apparie deux annihilateurs)
    assert_eq!(reference.termes().len(), 1);
    assert!(latex.starts_with("-\\frac{1}{64}"), "{latex}");
    assert_eq!(nombre_de(&reference, "δ"), 2);

    for _ in 0..10 {
        assert_eq!(ccsd_dirige().latex(), latex);
        budget(t0, max);
    }
}

/* ------------------------ Motifs invalides ------------------------ */

#[test]
fn sci_motif_position_reutilisee() {
    let mut ctx = ContexteIndices::new();
    let e = Expr::produit([
        excitation(&mut ctx, -2),
        hamiltonien_total(&mut ctx),
        cluster(&mut ctx, 2),
    ]);
    match moyenne_vide(&e, &[(1, 2), (1, 3)]) {
        Err(Erreur::MotifInvalide(msg)) => assert!(msg.contains("position 1")),
        autre => panic!("MotifInvalide attendu, obtenu {autre:?}"),
    }
}

#[test]
fn sci_motif_hors_chaine() {
    let mut ctx = ContexteIndices::new();
    let e = Expr::produit([excitation(&mut ctx, -1), excitation(&mut ctx, 1)]);
    assert!(matches!(
        moyenne_vide(&e, &[(0, 3), (1, 4)]),
        Err(Erreur::MotifInvalide(_))
    ));
}

/* ------------------------ Loi du signe ------------------------ */

#[test]
fn sci_loi_du_signe() {
    let p = Indice::muet(Espace::Complet, 1);
    let q = Indice::muet(Espace::Complet, 2);
    let ann = Expr::annihilation(Statistique::Fermion, p);
    let cre = Expr::creation(Statistique::Fermion, q);

    let direct = moyenne_vide(&Expr::chaine([ann.clone(), cre.clone()]).unwrap(), &[(0, 1)]).unwrap();
    let inverse = moyenne_vide(&Expr::chaine([cre.clone(), ann.clone()]).unwrap(), &[(1, 0)]).unwrap();
    assert_eq!(direct.termes()[0].0, Rationnel::entier(1));
    assert_eq!(inverse, -direct.clone());

    // deux opérateurs adjacents : toujours +1, quel que soit le rôle du premier
    let adjacent = moyenne_vide(&Expr::chaine([cre, ann]).unwrap(), &[(0, 1)]).unwrap();
    assert_eq!(adjacent, direct);
}

#[test]
fn sci_recouvrement_positif() {
    let mut ctx = ContexteIndices::new();
    let e = Expr::produit([excitation(&mut ctx, -1), excitation(&mut ctx, 1)]);
    let opts = Options::default().avec_reduction_deltas(true);
    let motif = Motif::new([(1, 2), (0, 3)]).unwrap();
    let (r, _) = contracte(&e, &motif, &opts).unwrap();

    let termes = r.termes();
    assert_eq!(termes.len(), 1);
    assert_eq!(termes[0].0, Rationnel::entier(1));
    assert_eq!(nombre_de(&termes[0].1, "δ"), 0);
    assert_eq!(nombre_de(&termes[0].1, "A"), 2);
    assert!(!r.latex().starts_with('-'), "{}", r.latex());
}

/* ------------------------ Bosons / couplage ------------------------ */

#[test]
fn sci_bosonique_externes() {
    let mut ctx = ContexteIndices::new();
    let x_ext = Indice::externe(Espace::Photon, 1);
    let y_ext = Indice::externe(Espace::Photon, 2);
    let e = Expr::produit([
        Expr::annihilation(Statistique::Boson, x_ext),
        hamiltonien_bosonique(&mut ctx, 1),
        Expr::creation(Statistique::Boson, y_ext),
    ]);
    let opts = Options::default().avec_reduction_deltas(true);
    let motif = Motif::new([(0, 1), (2, 3)]).unwrap();
    let (r, _) = contracte(&e, &motif, &opts).unwrap();
    assert_eq!(r.latex(), "{\\omega^{{X_{1}}}_{{X_{2}}}}");
}

#[test]
fn sci_couple_stress_borne() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    let mut ctx = ContexteIndices::new();
    let h = hamiltonien_couple(&mut ctx);
    let t1 = cluster(&mut ctx, 1);
    let e = Expr::produit([excitation(&mut ctx, -1), h, t1]);
    budget(t0, max);

    // position 1 : a_a de A(-1) ; position 2 : premier opérateur du terme de H (b† pour Hw => nul)
    let motif = Motif::new([(1, 2)]).unwrap();
    let (r, d) = contracte(&e, &motif, &Options::default()).unwrap();
    assert_eq!(d.termes_evalues, 5);
    assert!(d.termes_annules < d.termes_evalues);
    assert!(!r.est_zero());
    budget(t0, max);
}
