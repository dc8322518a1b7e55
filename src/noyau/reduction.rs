// src/noyau/reduction.rs
//
// Réductions après contraction (optionnelles) :
// - reduit_deltas   : δ^{p}_{q} avec un indice muet => renommage dans tout le terme
// - canonise_muets  : renumérotation des indices muets par ordre de première apparition
//
// Un indice externe n'est jamais remplacé. L'indice conservé est celui de l'espace
// le plus étroit (l'intersection des deux espaces).
// La renumérotation est une heuristique : elle ne détecte pas toutes les équivalences
// par permutation d'indices muets, seulement celles qui suivent l'ordre de lecture.

use std::collections::BTreeMap;

use log::trace;

use super::expr::Expr;
use super::indice::{ContexteIndices, Espace, Indice};
use super::tenseur::Symetrie;

const DELTA: &str = "δ";

/* ------------------------ δ ------------------------ */

pub fn reduit_deltas(e: &Expr) -> Expr {
    Expr::somme_ponderee(
        e.termes()
            .into_iter()
            .map(|(c, m)| (c, reduit_terme(&m))),
    )
}

fn reduit_terme(m: &Expr) -> Expr {
    let mut courant = m.clone();
    loop {
        let facteurs = courant.facteurs();
        let trouve = facteurs
            .iter()
            .enumerate()
            .find_map(|(k, f)| elimination(f).map(|table| (k, table)));
        let Some((k, table)) = trouve else {
            return courant;
        };
        trace!("élimination δ : {} ({} renommage(s))", facteurs[k], table.len());
        let reste = facteurs
            .into_iter()
            .enumerate()
            .filter(|(j, _)| *j != k)
            .map(|(_, f)| f);
        courant = Expr::produit(reste).renomme(&table);
    }
}

/// Table de renommage qui élimine le facteur `f` (table vide : δ_pp = 1).
fn elimination(f: &Expr) -> Option<BTreeMap<Indice, Indice>> {
    let Expr::Tenseur(t) = f else {
        return None;
    };
    if t.nom != DELTA || t.est_operateur() {
        return None;
    }
    let ([p], [q]) = (t.haut.as_slice(), t.bas.as_slice()) else {
        return None;
    };
    let mut table = BTreeMap::new();
    if p == q {
        return Some(table);
    }
    let inter = p.espace.intersection(q.espace)?;
    if !q.externe && p.espace == inter {
        table.insert(q.clone(), p.clone());
    } else if !p.externe && q.espace == inter {
        table.insert(p.clone(), q.clone());
    } else {
        return None;
    }
    Some(table)
}

/* ------------------------ Renumérotation ------------------------ */

pub fn canonise_muets(e: &Expr) -> Expr {
    Expr::somme_ponderee(
        e.termes()
            .into_iter()
            .map(|(c, m)| (c, canonise_terme(&m))),
    )
}

type ClefAveugle = (u8, String, Symetrie, Vec<(Espace, bool)>);

/// Clef de tri qui ignore les numéros d'indices.
fn clef_aveugle(f: &Expr) -> ClefAveugle {
    match f {
        Expr::Tenseur(t) => (
            1,
            t.nom.clone(),
            t.symetrie,
            t.indices().map(|i| (i.espace, i.externe)).collect(),
        ),
        _ => (0, String::new(), Symetrie::Aucune, Vec::new()),
    }
}

fn canonise_terme(m: &Expr) -> Expr {
    let (mut cnombres, operateurs): (Vec<Expr>, Vec<Expr>) =
        m.facteurs().into_iter().partition(|f| !f.est_operateur());
    cnombres.sort_by_key(clef_aveugle);

    let mut ctx = ContexteIndices::new();
    let mut table: BTreeMap<Indice, Indice> = BTreeMap::new();
    for f in cnombres.iter().chain(operateurs.iter()) {
        for i in f.indices() {
            if !i.externe && !table.contains_key(i) {
                table.insert(i.clone(), ctx.nouveau(i.espace));
            }
        }
    }

    Expr::produit(cnombres.into_iter().chain(operateurs)).renomme(&table)
}
