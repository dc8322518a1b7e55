// src/noyau/canon.rs
//
// Canonicalisation forte (déterministe) :
// - aplatissement Somme / Produit
// - distribution immédiate d'un Produit sur toute Somme
// - suppression des neutres (terme nul, facteur 1) ; facteur nul => 0
// - regroupement des rationnels en tête de Produit
// - tri des c-nombres (ils commutent) ; les opérateurs gardent leur ordre
// - tenseurs (anti)symétriques : indices triés, signe de permutation
// - fusion des termes égaux d'une Somme (BTreeMap ordonnée par cmp_expr)
//
// Note : l'ordre total ne lit jamais une adresse ni un hash : deux exécutions
// produisent le même arbre.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::rc::Rc;

use num_traits::{One, Zero};

use crate::noyau::expr::{Expr, Terme};
use crate::noyau::rationnel::Rationnel;
use crate::noyau::tenseur::Tenseur;

/* ------------------------ clef de tri déterministe ------------------------ */

fn rang(e: &Expr) -> u8 {
    match e {
        Expr::Constante(_) => 0,
        Expr::Tenseur(_) => 1,
        Expr::Produit(_) => 2,
        Expr::Somme(_) => 3,
    }
}

pub(crate) fn cmp_tenseur(a: &Tenseur, b: &Tenseur) -> Ordering {
    a.est_operateur()
        .cmp(&b.est_operateur())
        .then_with(|| a.nom.cmp(&b.nom))
        .then_with(|| a.haut.len().cmp(&b.haut.len()))
        .then_with(|| a.bas.len().cmp(&b.bas.len()))
        .then_with(|| a.haut.cmp(&b.haut))
        .then_with(|| a.bas.cmp(&b.bas))
        .then_with(|| a.symetrie.cmp(&b.symetrie))
        .then_with(|| a.operateur.cmp(&b.operateur))
}

/// Ordre total sur la forme canonique (rang, puis structure).
/// Cohérent avec l'égalité structurelle : Equal <=> arbres identiques.
pub fn cmp_expr(a: &Expr, b: &Expr) -> Ordering {
    rang(a).cmp(&rang(b)).then_with(|| match (a, b) {
        (Expr::Constante(x), Expr::Constante(y)) => x.cmp(y),
        (Expr::Tenseur(x), Expr::Tenseur(y)) => cmp_tenseur(x, y),
        (Expr::Produit(x), Expr::Produit(y)) => x.len().cmp(&y.len()).then_with(|| {
            x.iter()
                .zip(y.iter())
                .map(|(u, v)| cmp_expr(u, v))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        }),
        (Expr::Somme(x), Expr::Somme(y)) => x.len().cmp(&y.len()).then_with(|| {
            x.iter()
                .zip(y.iter())
                .map(|(u, v)| cmp_expr(&u.expr, &v.expr).then_with(|| u.coeff.cmp(&v.coeff)))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        }),
        // rangs différents : déjà tranché
        _ => Ordering::Equal,
    })
}

/* ------------------------ monômes ------------------------ */

/// Monôme à partir de facteurs déjà canoniques, sans constante.
fn monome(mut facteurs: Vec<Expr>) -> Expr {
    match facteurs.len() {
        0 => Expr::un(),
        1 => facteurs.remove(0),
        _ => Expr::Produit(Rc::from(facteurs)),
    }
}

/// Expr canonique -> (coefficient, monôme). Une Somme reste entière (coefficient 1).
pub(crate) fn decompose(e: &Expr) -> (Rationnel, Expr) {
    match e {
        Expr::Constante(r) => (r.clone(), Expr::un()),
        Expr::Produit(fs) => match fs.first() {
            Some(Expr::Constante(r)) => (r.clone(), monome(fs[1..].to_vec())),
            _ => (Rationnel::one(), e.clone()),
        },
        _ => (Rationnel::one(), e.clone()),
    }
}

/// c · m, avec m monôme canonique.
fn mise_a_l_echelle(c: Rationnel, m: Expr) -> Expr {
    if c.is_zero() {
        return Expr::zero();
    }
    if c.is_one() {
        return m;
    }
    match m {
        Expr::Constante(r) => Expr::Constante(c * r),
        Expr::Produit(fs) => {
            let mut v = Vec::with_capacity(fs.len() + 1);
            v.push(Expr::Constante(c));
            v.extend(fs.iter().cloned());
            Expr::Produit(Rc::from(v))
        }
        autre => Expr::Produit(Rc::from(vec![Expr::Constante(c), autre])),
    }
}

/* ------------------------ Somme : aplatissement + fusion + tri ------------------------ */

/// Termes déjà canoniques individuellement.
pub fn canon_somme(termes: Vec<(Rationnel, Expr)>) -> Expr {
    let mut table: BTreeMap<Expr, Rationnel> = BTreeMap::new();

    let mut ajoute = |c: Rationnel, m: Expr| {
        if c.is_zero() {
            return;
        }
        let entree = table.entry(m).or_insert_with(Rationnel::zero);
        *entree = &*entree + &c;
    };

    for (c, e) in termes {
        match e {
            Expr::Somme(ts) => {
                for t in ts.iter() {
                    ajoute(&c * &t.coeff, t.expr.clone());
                }
            }
            autre => {
                let (k, m) = decompose(&autre);
                ajoute(&c * &k, m);
            }
        }
    }

    let mut restants: Vec<Terme> = table
        .into_iter()
        .filter(|(_, c)| !c.is_zero())
        .map(|(expr, coeff)| Terme { coeff, expr })
        .collect();

    match restants.len() {
        0 => Expr::zero(),
        1 => {
            let t = restants.remove(0);
            mise_a_l_echelle(t.coeff, t.expr)
        }
        _ => Expr::Somme(Rc::from(restants)),
    }
}

/* ------------------------ Produit : aplatissement + distribution + tri ------------------------ */

/// Facteurs déjà canoniques individuellement. L'ordre relatif des opérateurs est conservé.
pub fn canon_produit(facteurs: Vec<Expr>) -> Expr {
    let facteurs = aplatit(facteurs);

    // distribution sur la première Somme rencontrée (récursif pour les suivantes)
    if let Some(k) = facteurs.iter().position(|f| matches!(f, Expr::Somme(_))) {
        if let Expr::Somme(ts) = &facteurs[k] {
            let developpe = ts
                .iter()
                .map(|t| {
                    let mut v = facteurs.clone();
                    v[k] = t.expr.clone();
                    (t.coeff.clone(), canon_produit(v))
                })
                .collect();
            return canon_somme(developpe);
        }
    }

    let mut coeff = Rationnel::one();
    let mut cnombres: Vec<Expr> = Vec::new();
    let mut operateurs: Vec<Expr> = Vec::new();

    for f in facteurs {
        match f {
            Expr::Constante(r) => {
                if r.is_zero() {
                    return Expr::zero();
                }
                coeff = coeff * r;
            }
            Expr::Tenseur(t) => {
                if t.est_operateur() {
                    operateurs.push(Expr::Tenseur(t));
                } else {
                    cnombres.push(Expr::Tenseur(t));
                }
            }
            // déjà aplatis / distribués
            Expr::Produit(_) | Expr::Somme(_) => {}
        }
    }

    cnombres.sort_by(cmp_expr);
    cnombres.extend(operateurs);
    mise_a_l_echelle(coeff, monome(cnombres))
}

/// Produits imbriqués dépliés, ordre conservé.
fn aplatit(facteurs: Vec<Expr>) -> Vec<Expr> {
    let mut out = Vec::with_capacity(facteurs.len());
    for f in facteurs {
        match f {
            Expr::Produit(fs) => out.extend(aplatit(fs.to_vec())),
            autre => out.push(autre),
        }
    }
    out
}

/* ------------------------ Tenseur ------------------------ */

pub fn canon_tenseur(t: Tenseur) -> Expr {
    match t.canonise() {
        None => Expr::zero(),
        Some((false, t)) => Expr::Tenseur(Rc::new(t)),
        Some((true, t)) => Expr::Produit(Rc::from(vec![
            Expr::Constante(-Rationnel::one()),
            Expr::Tenseur(Rc::new(t)),
        ])),
    }
}

/* ------------------------ Récursion complète ------------------------ */

/// Re-canonise tout l'arbre (idempotent).
pub fn canon_expr(e: &Expr) -> Expr {
    match e {
        Expr::Constante(_) => e.clone(),
        Expr::Tenseur(t) => canon_tenseur(t.as_ref().clone()),
        Expr::Produit(fs) => canon_produit(fs.iter().map(canon_expr).collect()),
        Expr::Somme(ts) => canon_somme(
            ts.iter()
                .map(|t| (t.coeff.clone(), canon_expr(&t.expr)))
                .collect(),
        ),
    }
}
