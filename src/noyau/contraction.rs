// src/noyau/contraction.rs
//
// Moyenne sur le vide par Wick dirigé : une seule topologie, donnée par le motif.
//
// Pipeline (par terme de la Somme canonique) :
// 1) aplatissement : c-nombres d'un côté, chaîne d'opérateurs élémentaires de l'autre
// 2) bornes du motif vérifiées contre la longueur de la chaîne
// 3) pour chaque paire, dans l'ordre du motif :
//    - statistiques différentes ou même action => terme nul
//    - espaces disjoints => terme nul
//    - signe fermionique (-1)^p, p = fermions encore vivants strictement entre les deux
//      + 1 si la paire est écrite de droite à gauche (g > d)
// 4) valeur : δ (ou s hors base orthonormée), 1 si indices identiques en base orthonormée
// 5) opérateurs non contractés gardés dans l'ordre ; somme des termes re-canonisée
//
// Un rôle incompatible n'est pas une erreur. Une position hors chaîne ou réutilisée l'est.

use log::{debug, info};

use super::erreur::Erreur;
use super::expr::Expr;
use super::indice::Indice;
use super::options::Options;
use super::rationnel::Rationnel;
use super::reduction::{canonise_muets, reduit_deltas};
use super::tenseur::{Operateur, Statistique, Symetrie};

/// Paire de positions dans la chaîne d'opérateurs aplatie (base 0).
pub type Paire = (usize, usize);

/* ------------------------ Motif ------------------------ */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Motif {
    paires: Vec<Paire>,
}

impl Motif {
    /// Refuse une paire (k, k) et toute position utilisée deux fois.
    pub fn new<I>(paires: I) -> Result<Self, Erreur>
    where
        I: IntoIterator<Item = Paire>,
    {
        let paires: Vec<Paire> = paires.into_iter().collect();
        let mut vues: Vec<usize> = Vec::with_capacity(paires.len() * 2);
        for &(g, d) in &paires {
            if g == d {
                return Err(Erreur::MotifInvalide(format!(
                    "paire ({g}, {d}) : une position ne se contracte pas avec elle-même"
                )));
            }
            for k in [g, d] {
                if vues.contains(&k) {
                    return Err(Erreur::MotifInvalide(format!(
                        "position {k} utilisée deux fois"
                    )));
                }
                vues.push(k);
            }
        }
        Ok(Motif { paires })
    }

    pub fn paires(&self) -> &[Paire] {
        &self.paires
    }

    pub fn est_vide(&self) -> bool {
        self.paires.is_empty()
    }

    /// Toutes les positions doivent exister dans une chaîne de longueur n.
    pub fn verifie_bornes(&self, n: usize) -> Result<(), Erreur> {
        for &(g, d) in &self.paires {
            let k = g.max(d);
            if k >= n {
                return Err(Erreur::MotifInvalide(format!(
                    "position {k} hors chaîne ({n} opérateurs)"
                )));
            }
        }
        Ok(())
    }
}

/* ------------------------ Démarche ------------------------ */

/// Trace d'une évaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemarcheContraction {
    pub avant: String,
    pub apres: String,
    pub termes_evalues: usize,
    pub termes_annules: usize,
    pub note: String,
}

/* ------------------------ API ------------------------ */

/// ⟨0| expr |0⟩ selon la liste de paires (options par défaut).
pub fn moyenne_vide(expr: &Expr, paires: &[Paire]) -> Result<Expr, Erreur> {
    let motif = Motif::new(paires.iter().copied())?;
    let (resultat, _) = contracte(expr, &motif, &Options::default())?;
    Ok(resultat)
}

pub fn contracte(
    expr: &Expr,
    motif: &Motif,
    options: &Options,
) -> Result<(Expr, DemarcheContraction), Erreur> {
    let canon = expr.simplifie();
    let termes = canon.termes();

    let mut contributions: Vec<(Rationnel, Expr)> = Vec::with_capacity(termes.len());
    let mut annules = 0usize;

    for (k, (coeff, monome)) in termes.iter().enumerate() {
        let valeur = contracte_terme(monome, motif, options).map_err(|e| match e {
            Erreur::MotifInvalide(msg) => {
                Erreur::MotifInvalide(format!("{msg}, terme {k} : {}", monome.latex()))
            }
            autre => autre,
        })?;
        match valeur {
            Some(valeur) => {
                debug!("terme {k} : {valeur}");
                contributions.push((coeff.clone(), valeur));
            }
            None => {
                debug!("terme {k} : contraction nulle");
                annules += 1;
            }
        }
    }

    let mut resultat = Expr::somme_ponderee(contributions);
    let mut note = String::from("Canonisation -> Aplatissement -> Wick dirigé -> Somme");
    if options.reduction_deltas {
        resultat = canonise_muets(&reduit_deltas(&resultat));
        note.push_str(" -> Réduction δ -> Renumérotation");
    }

    info!(
        "contraction : {} paires, {} termes, {} nuls",
        motif.paires().len(),
        termes.len(),
        annules
    );

    let demarche = DemarcheContraction {
        avant: canon.latex(),
        apres: resultat.latex(),
        termes_evalues: termes.len(),
        termes_annules: annules,
        note,
    };
    Ok((resultat, demarche))
}

/* ------------------------ Terme ------------------------ */

struct Element {
    operateur: Operateur,
    indice: Indice,
    expr: Expr,
}

/// Ok(None) : le terme s'annule.
fn contracte_terme(monome: &Expr, motif: &Motif, options: &Options) -> Result<Option<Expr>, Erreur> {
    let mut scalaires: Vec<Expr> = Vec::new();
    let mut chaine: Vec<Element> = Vec::new();

    for f in monome.facteurs() {
        let op = match &f {
            Expr::Tenseur(t) if t.est_operateur() => Some(
                t.comme_operateur()
                    .map(|(o, i)| (o, i.clone()))
                    .ok_or_else(|| {
                        Erreur::ExpressionMalformee(format!(
                            "opérateur {} sans indice unique",
                            t.nom
                        ))
                    })?,
            ),
            _ => None,
        };
        match op {
            Some((operateur, indice)) => chaine.push(Element {
                operateur,
                indice,
                expr: f,
            }),
            None => scalaires.push(f),
        }
    }

    motif.verifie_bornes(chaine.len())?;

    let mut vivant = vec![true; chaine.len()];
    let mut signe_negatif = false;
    let mut valeurs: Vec<Expr> = Vec::with_capacity(motif.paires().len());

    for &(g, d) in motif.paires() {
        let (og, od) = (chaine[g].operateur, chaine[d].operateur);
        if og.statistique != od.statistique || og.action == od.action {
            debug!("paire ({g}, {d}) : rôles incompatibles");
            return Ok(None);
        }

        if og.statistique == Statistique::Fermion {
            let (gauche, droite) = (g.min(d), g.max(d));
            let entre = (gauche + 1..droite)
                .filter(|&k| vivant[k] && chaine[k].operateur.statistique == Statistique::Fermion)
                .count();
            if (entre + usize::from(g > d)) % 2 == 1 {
                signe_negatif = !signe_negatif;
            }
        }
        vivant[g] = false;
        vivant[d] = false;

        match valeur_contraction(&chaine[g].indice, &chaine[d].indice, options) {
            Some(v) => valeurs.push(v),
            None => {
                debug!("paire ({g}, {d}) : espaces disjoints");
                return Ok(None);
            }
        }
    }

    let mut facteurs = scalaires;
    if signe_negatif {
        facteurs.push(Expr::entier(-1));
    }
    facteurs.extend(valeurs);
    facteurs.extend(
        chaine
            .into_iter()
            .zip(vivant)
            .filter(|(_, v)| *v)
            .map(|(e, _)| e.expr),
    );
    Ok(Some(Expr::produit(facteurs)))
}

/// Valeur d'une contraction entre deux indices ; None si les espaces sont disjoints.
fn valeur_contraction(p: &Indice, q: &Indice, options: &Options) -> Option<Expr> {
    p.espace.intersection(q.espace)?;
    if p == q && options.base_orthonormee {
        return Some(Expr::un());
    }
    let (haut, bas) = if p <= q { (p, q) } else { (q, p) };
    let nom = if options.base_orthonormee { "δ" } else { "s" };
    Some(Expr::tenseur(
        nom,
        vec![haut.clone()],
        vec![bas.clone()],
        Symetrie::Aucune,
    ))
}
