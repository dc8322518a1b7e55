// src/noyau/expr.rs
//
// Arbre d'expressions exact (immuable, partagé par Rc).
// - Constante : rationnel exact
// - Tenseur   : feuille tensorielle ou opérateur élémentaire a†/a/b†/b
// - Somme     : (coefficient, monôme) triés, fusionnés, jamais de coefficient nul
// - Produit   : [constante] + c-nombres triés + opérateurs dans l'ordre d'origine
//
// Toute construction passe par canon.rs : un Expr obtenu par l'API publique est
// toujours en forme canonique, donc l'égalité structurelle suffit pour fusionner.
//
// IMPORTANT : ne jamais écrire `use Expr::*` (le variant Tenseur masquerait la struct).

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::rc::Rc;

use num_traits::{One, Zero};

use super::canon;
use super::erreur::Erreur;
use super::format::format_latex;
use super::indice::Indice;
use super::rationnel::Rationnel;
use super::tenseur::{Action, Statistique, Symetrie, Tenseur};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expr {
    Constante(Rationnel),
    Tenseur(Rc<Tenseur>),
    Somme(Rc<[Terme]>),
    Produit(Rc<[Expr]>),
}

/// Terme d'une Somme : coefficient non nul × monôme (1, tenseur ou produit sans constante).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Terme {
    pub coeff: Rationnel,
    pub expr: Expr,
}

impl Ord for Expr {
    fn cmp(&self, autre: &Self) -> Ordering {
        canon::cmp_expr(self, autre)
    }
}

impl PartialOrd for Expr {
    fn partial_cmp(&self, autre: &Self) -> Option<Ordering> {
        Some(self.cmp(autre))
    }
}

/* ------------------------ Constructeurs ------------------------ */

impl Expr {
    pub fn zero() -> Expr {
        Expr::Constante(Rationnel::zero())
    }

    pub fn un() -> Expr {
        Expr::Constante(Rationnel::one())
    }

    pub fn entier(n: i64) -> Expr {
        Expr::Constante(Rationnel::entier(n))
    }

    pub fn fraction(num: i64, den: i64) -> Result<Expr, Erreur> {
        Ok(Expr::Constante(Rationnel::new(num, den)?))
    }

    pub fn constante(r: Rationnel) -> Expr {
        Expr::Constante(r)
    }

    /// Tenseur c-nombre. Un tenseur antisymétrique à indice répété vaut 0.
    pub fn tenseur(nom: impl Into<String>, haut: Vec<Indice>, bas: Vec<Indice>, symetrie: Symetrie) -> Expr {
        canon::canon_tenseur(Tenseur::new(nom, haut, bas, symetrie))
    }

    pub fn depuis_tenseur(t: Tenseur) -> Expr {
        canon::canon_tenseur(t)
    }

    pub fn creation(statistique: Statistique, indice: Indice) -> Expr {
        Expr::Tenseur(Rc::new(Tenseur::operateur_elementaire(
            statistique,
            Action::Creation,
            indice,
        )))
    }

    pub fn annihilation(statistique: Statistique, indice: Indice) -> Expr {
        Expr::Tenseur(Rc::new(Tenseur::operateur_elementaire(
            statistique,
            Action::Annihilation,
            indice,
        )))
    }

    /// Chaîne ordonnée d'opérateurs élémentaires (non vide).
    pub fn chaine<I>(operateurs: I) -> Result<Expr, Erreur>
    where
        I: IntoIterator<Item = Expr>,
    {
        let ops: Vec<Expr> = operateurs.into_iter().collect();
        if ops.is_empty() {
            return Err(Erreur::ExpressionMalformee(
                "chaîne d'opérateurs vide".to_string(),
            ));
        }
        if let Some(k) = ops.iter().position(|e| !e.est_operateur()) {
            return Err(Erreur::ExpressionMalformee(format!(
                "facteur {k} de la chaîne : pas un opérateur élémentaire"
            )));
        }
        Ok(canon::canon_produit(ops))
    }

    pub fn somme<I>(termes: I) -> Expr
    where
        I: IntoIterator<Item = Expr>,
    {
        canon::canon_somme(termes.into_iter().map(|e| (Rationnel::one(), e)).collect())
    }

    pub fn somme_ponderee<I>(termes: I) -> Expr
    where
        I: IntoIterator<Item = (Rationnel, Expr)>,
    {
        canon::canon_somme(termes.into_iter().collect())
    }

    /// Produit ordonné ; produit vide = 1.
    pub fn produit<I>(facteurs: I) -> Expr
    where
        I: IntoIterator<Item = Expr>,
    {
        canon::canon_produit(facteurs.into_iter().collect())
    }

    pub fn fois(&self, c: &Rationnel) -> Expr {
        canon::canon_somme(vec![(c.clone(), self.clone())])
    }
}

/* ------------------------ Inspection ------------------------ */

impl Expr {
    pub fn est_zero(&self) -> bool {
        matches!(self, Expr::Constante(r) if r.is_zero())
    }

    pub fn est_un(&self) -> bool {
        matches!(self, Expr::Constante(r) if r.is_one())
    }

    pub fn est_operateur(&self) -> bool {
        matches!(self, Expr::Tenseur(t) if t.est_operateur())
    }

    /// Décomposition additive : (coefficient, monôme). Zéro n'a aucun terme.
    pub fn termes(&self) -> Vec<(Rationnel, Expr)> {
        match self {
            Expr::Somme(ts) => ts.iter().map(|t| (t.coeff.clone(), t.expr.clone())).collect(),
            e if e.est_zero() => Vec::new(),
            e => vec![canon::decompose(e)],
        }
    }

    /// Facteurs multiplicatifs (1 n'a aucun facteur).
    pub fn facteurs(&self) -> Vec<Expr> {
        match self {
            Expr::Produit(fs) => fs.to_vec(),
            e if e.est_un() => Vec::new(),
            e => vec![e.clone()],
        }
    }

    /// Opérateurs élémentaires rencontrés, dans l'ordre de lecture.
    pub fn operateurs(&self) -> Vec<&Tenseur> {
        let mut out = Vec::new();
        collecte_operateurs(self, &mut out);
        out
    }

    /// Tous les indices, dans l'ordre de lecture (avec répétitions).
    pub fn indices(&self) -> Vec<&Indice> {
        let mut out = Vec::new();
        collecte_indices(self, &mut out);
        out
    }
}

fn collecte_operateurs<'a>(e: &'a Expr, out: &mut Vec<&'a Tenseur>) {
    match e {
        Expr::Constante(_) => {}
        Expr::Tenseur(t) => {
            if t.est_operateur() {
                out.push(t.as_ref());
            }
        }
        Expr::Somme(ts) => ts.iter().for_each(|t| collecte_operateurs(&t.expr, out)),
        Expr::Produit(fs) => fs.iter().for_each(|f| collecte_operateurs(f, out)),
    }
}

fn collecte_indices<'a>(e: &'a Expr, out: &mut Vec<&'a Indice>) {
    match e {
        Expr::Constante(_) => {}
        Expr::Tenseur(t) => out.extend(t.indices()),
        Expr::Somme(ts) => ts.iter().for_each(|t| collecte_indices(&t.expr, out)),
        Expr::Produit(fs) => fs.iter().for_each(|f| collecte_indices(f, out)),
    }
}

/* ------------------------ Transformations ------------------------ */

impl Expr {
    /// Re-canonisation (idempotente sur un arbre déjà canonique).
    pub fn simplifie(&self) -> Expr {
        canon::canon_expr(self)
    }

    /// Renommage simultané des indices, puis re-canonisation.
    pub fn renomme(&self, table: &BTreeMap<Indice, Indice>) -> Expr {
        canon::canon_expr(&renomme_brut(self, table))
    }

    /// Conjugué hermitien : ordre des facteurs inversé, actions inversées,
    /// indices hauts/bas des tenseurs échangés. Coefficients réels.
    pub fn adjoint(&self) -> Expr {
        match self {
            Expr::Constante(_) => self.clone(),
            Expr::Tenseur(t) => Expr::depuis_tenseur(t.adjoint()),
            Expr::Somme(ts) => Expr::somme_ponderee(
                ts.iter().map(|t| (t.coeff.clone(), t.expr.adjoint())),
            ),
            Expr::Produit(fs) => Expr::produit(fs.iter().rev().map(Expr::adjoint)),
        }
    }

    pub fn latex(&self) -> String {
        format_latex(self)
    }
}

fn renomme_brut(e: &Expr, table: &BTreeMap<Indice, Indice>) -> Expr {
    match e {
        Expr::Constante(_) => e.clone(),
        Expr::Tenseur(t) => Expr::Tenseur(Rc::new(t.renomme(table))),
        Expr::Somme(ts) => Expr::Somme(
            ts.iter()
                .map(|t| Terme {
                    coeff: t.coeff.clone(),
                    expr: renomme_brut(&t.expr, table),
                })
                .collect(),
        ),
        Expr::Produit(fs) => Expr::Produit(fs.iter().map(|f| renomme_brut(f, table)).collect()),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.latex())
    }
}

impl From<Rationnel> for Expr {
    fn from(r: Rationnel) -> Self {
        Expr::Constante(r)
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Expr::entier(n)
    }
}

/* ------------------------ Opérateurs arithmétiques ------------------------ */

impl Add for Expr {
    type Output = Expr;
    fn add(self, autre: Expr) -> Expr {
        Expr::somme([self, autre])
    }
}

impl<'a> Add<&'a Expr> for &'a Expr {
    type Output = Expr;
    fn add(self, autre: &'a Expr) -> Expr {
        Expr::somme([self.clone(), autre.clone()])
    }
}

impl Sub for Expr {
    type Output = Expr;
    fn sub(self, autre: Expr) -> Expr {
        Expr::somme_ponderee([(Rationnel::one(), self), (-Rationnel::one(), autre)])
    }
}

impl<'a> Sub<&'a Expr> for &'a Expr {
    type Output = Expr;
    fn sub(self, autre: &'a Expr) -> Expr {
        Expr::somme_ponderee([
            (Rationnel::one(), self.clone()),
            (-Rationnel::one(), autre.clone()),
        ])
    }
}

impl Mul for Expr {
    type Output = Expr;
    fn mul(self, autre: Expr) -> Expr {
        Expr::produit([self, autre])
    }
}

impl<'a> Mul<&'a Expr> for &'a Expr {
    type Output = Expr;
    fn mul(self, autre: &'a Expr) -> Expr {
        Expr::produit([self.clone(), autre.clone()])
    }
}

impl Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        self.fois(&-Rationnel::one())
    }
}

impl Neg for &Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        self.fois(&-Rationnel::one())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::indice::Espace;

    fn p(n: u32) -> Indice {
        Indice::muet(Espace::Complet, n)
    }

    fn f(a: u32, b: u32) -> Expr {
        Expr::tenseur("f", vec![p(a)], vec![p(b)], Symetrie::Aucune)
    }

    #[test]
    fn constantes_multipliees() {
        let e = Expr::produit([Expr::entier(2), Expr::fraction(3, 4).unwrap()]);
        assert_eq!(e, Expr::fraction(3, 2).unwrap());
    }

    #[test]
    fn fusion_et_zero() {
        let e = f(1, 2) + f(1, 2);
        assert_eq!(e.termes(), vec![(Rationnel::entier(2), f(1, 2))]);
        let z = &f(1, 2) - &f(1, 2);
        assert!(z.est_zero());
        assert!(z.termes().is_empty());
    }

    #[test]
    fn produit_neutres() {
        assert_eq!(Expr::produit([Expr::un(), f(1, 2)]), f(1, 2));
        assert!(Expr::produit([Expr::zero(), f(1, 2)]).est_zero());
        assert!(Expr::produit(Vec::new()).est_un());
        assert!(Expr::un().facteurs().is_empty());
    }

    #[test]
    fn chaine_refuse_vide_et_scalaire() {
        assert!(matches!(
            Expr::chaine(Vec::new()),
            Err(Erreur::ExpressionMalformee(_))
        ));
        assert!(matches!(
            Expr::chaine([Expr::creation(Statistique::Fermion, p(1)), f(1, 2)]),
            Err(Erreur::ExpressionMalformee(_))
        ));
        let c = Expr::chaine([
            Expr::annihilation(Statistique::Fermion, p(2)),
            Expr::creation(Statistique::Fermion, p(1)),
        ])
        .unwrap();
        // ordre des opérateurs conservé
        assert_eq!(c.operateurs()[0].bas[0], p(2));
        assert_eq!(c.operateurs()[1].bas[0], p(1));
    }

    #[test]
    fn cnombres_commutent_operateurs_non() {
        let a1 = Expr::creation(Statistique::Fermion, p(1));
        let a2 = Expr::annihilation(Statistique::Fermion, p(2));
        let x = Expr::produit([a1.clone(), f(3, 4), a2.clone(), f(1, 2)]);
        let y = Expr::produit([f(1, 2), a1.clone(), f(3, 4), a2.clone()]);
        assert_eq!(x, y);
        let z = Expr::produit([a2, f(1, 2), f(3, 4), a1]);
        assert_ne!(x, z);
    }

    #[test]
    fn adjoint_inverse_ordre() {
        let e = Expr::produit([
            f(1, 2),
            Expr::creation(Statistique::Fermion, p(1)),
            Expr::annihilation(Statistique::Fermion, p(2)),
        ]);
        let adj = e.adjoint();
        let attendu = Expr::produit([
            f(2, 1),
            Expr::creation(Statistique::Fermion, p(2)),
            Expr::annihilation(Statistique::Fermion, p(1)),
        ]);
        assert_eq!(adj, attendu);
        assert_eq!(adj.adjoint(), e);
    }

    #[test]
    fn renommage_recanonise() {
        let g = Expr::tenseur("g", vec![p(1), p(2)], vec![p(3), p(4)], Symetrie::Antisymetrique);
        let mut table = BTreeMap::new();
        table.insert(p(2), p(1));
        assert!(g.renomme(&table).est_zero());
    }
}
