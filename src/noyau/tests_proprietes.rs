//! Tests de propriétés (proptest) : lois algébriques de la forme canonique.
//!
//! - petites tailles (indices 1..5, rationnels à petits numérateurs) : les collisions
//!   d'indices et les annulations sont fréquentes, c'est voulu
//! - chaque propriété compare deux constructions indépendantes du même objet

use proptest::prelude::*;

use super::contraction::moyenne_vide;
use super::expr::Expr;
use super::indice::{Espace, Indice};
use super::rationnel::Rationnel;
use super::tenseur::{Statistique, Symetrie};

fn indice() -> impl Strategy<Value = Indice> {
    (0usize..3, 1u32..5).prop_map(|(e, n)| {
        let espace = [Espace::Occupe, Espace::Virtuel, Espace::Complet][e];
        Indice::muet(espace, n)
    })
}

fn tenseur() -> impl Strategy<Value = Expr> {
    (
        prop::sample::select(vec!["f", "g", "t"]),
        indice(),
        indice(),
        indice(),
        any::<bool>(),
    )
        .prop_map(|(nom, h1, h2, b, anti)| {
            if anti {
                Expr::tenseur(nom, vec![h1, h2], vec![b], Symetrie::Antisymetrique)
            } else {
                Expr::tenseur(nom, vec![h1], vec![b], Symetrie::Aucune)
            }
        })
}

fn rationnel() -> impl Strategy<Value = Rationnel> {
    (-12i64..12, 1i64..8).prop_map(|(n, d)| Rationnel::new(n, d).unwrap())
}

fn non_nul() -> impl Strategy<Value = i64> {
    prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
}

/// Constante, tenseur ou monôme à coefficient.
fn operande() -> impl Strategy<Value = Expr> {
    prop_oneof![
        rationnel().prop_map(Expr::constante),
        tenseur(),
        (rationnel(), tenseur(), tenseur())
            .prop_map(|(c, a, b)| Expr::produit([Expr::constante(c), a, b])),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn somme_commutative(a in operande(), b in operande()) {
        prop_assert_eq!(
            Expr::somme([a.clone(), b.clone()]),
            Expr::somme([b, a])
        );
    }

    #[test]
    fn somme_associative(a in operande(), b in operande(), c in operande()) {
        prop_assert_eq!(
            (&a + &b) + c.clone(),
            a + (&b + &c)
        );
    }

    #[test]
    fn simplification_idempotente(a in operande(), b in operande(), c in operande()) {
        let e = Expr::produit([Expr::somme([a, b]), c]);
        let s = e.simplifie();
        prop_assert_eq!(&s, &e);
        prop_assert_eq!(s.simplifie(), s);
    }

    #[test]
    fn distribution(a in operande(), b in operande(), c in operande()) {
        let gauche = Expr::produit([Expr::somme([a.clone(), b.clone()]), c.clone()]);
        let droite = Expr::somme([Expr::produit([a, c.clone()]), Expr::produit([b, c])]);
        prop_assert_eq!(gauche, droite);
    }

    #[test]
    fn exactitude(p in -1000i64..1000, q in non_nul()) {
        let r = Rationnel::new(p, q).unwrap();
        prop_assert_eq!(&r * &Rationnel::entier(q), Rationnel::entier(p));

        let e = Expr::produit([Expr::fraction(p, q).unwrap(), Expr::entier(q)]);
        prop_assert_eq!(e, Expr::entier(p));
    }

    #[test]
    fn elimination_des_zeros(c in rationnel(), a in operande(), b in operande()) {
        let s = Expr::somme_ponderee([
            (c.clone(), a.clone()),
            (-c, a),
            (Rationnel::entier(1), b.clone()),
        ]);
        prop_assert!(s.termes().iter().all(|(k, _)| !num_traits::Zero::is_zero(k)));
        prop_assert_eq!(s, b);
    }

    #[test]
    fn loi_du_signe(p in indice(), q in indice()) {
        let ann = Expr::annihilation(Statistique::Fermion, p);
        let cre = Expr::creation(Statistique::Fermion, q);
        let direct = moyenne_vide(&Expr::chaine([ann.clone(), cre.clone()]).unwrap(), &[(0, 1)]).unwrap();
        let inverse = moyenne_vide(&Expr::chaine([cre.clone(), ann.clone()]).unwrap(), &[(1, 0)]).unwrap();
        prop_assert_eq!(inverse, -direct.clone());
        let adjacent = moyenne_vide(&Expr::chaine([cre, ann]).unwrap(), &[(0, 1)]).unwrap();
        prop_assert_eq!(adjacent, direct);
    }

    #[test]
    fn adjoint_involutif(a in operande(), b in operande(), p in indice(), q in indice()) {
        let e = Expr::produit([
            a,
            Expr::creation(Statistique::Fermion, p),
            Expr::annihilation(Statistique::Fermion, q),
            b,
        ]);
        prop_assert_eq!(e.adjoint().adjoint(), e);
    }
}
