//! Noyau exact Q-pur : seconde quantification
//!
//! Organisation interne :
//! - rationnel.rs    : rationnel exact (BigRational), division sûre
//! - erreur.rs       : taxonomie des erreurs (thiserror)
//! - indice.rs       : espaces i/a/p/x + contexte de génération d'indices
//! - tenseur.rs      : feuille tenseur / opérateur élémentaire, symétries
//! - expr.rs         : arbre Constante/Tenseur/Somme/Produit (Rc, immuable)
//! - canon.rs        : canonisation forte + ordre total
//! - format.rs       : rendu LaTeX
//! - operateurs.rs   : A(n), H(n), T(n), Hw, Hep, H couplé + table des symboles
//! - options.rs      : réglages du moteur
//! - contraction.rs  : Wick dirigé (moyenne sur le vide)
//! - reduction.rs    : élimination des δ + renumérotation des indices muets
//! - antisymetrie.rs : développement ḡ = g - g(échange)
//! - rangs.rs        : criblage par rang d'excitation

pub mod antisymetrie;
pub mod canon;
pub mod contraction;
pub mod erreur;
pub mod expr;
pub mod format;
pub mod indice;
pub mod operateurs;
pub mod options;
pub mod rangs;
pub mod rationnel;
pub mod reduction;
pub mod tenseur;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_proprietes;

// API publique
pub use antisymetrie::developpe_antisymetrie;
pub use contraction::{contracte, moyenne_vide, DemarcheContraction, Motif, Paire};
pub use erreur::Erreur;
pub use expr::{Expr, Terme};
pub use format::format_latex;
pub use indice::{ContexteIndices, Espace, Indice};
pub use operateurs::{
    cluster, cluster_adjoint, cluster_jusqua, couplage_electron_photon, excitation, hamiltonien,
    hamiltonien_bosonique, hamiltonien_bosonique_jusqua, hamiltonien_couple, hamiltonien_jusqua,
    hamiltonien_total, operateur_normal, symboles, Symbole,
};
pub use options::Options;
pub use rangs::{
    eleve_vide_au_rang, eleve_vide_jusquau_rang, ramene_au_vide, ramene_au_vide_depuis_rang_au_plus,
};
pub use rationnel::Rationnel;
pub use reduction::{canonise_muets, reduit_deltas};
pub use tenseur::{Action, Operateur, Statistique, Symetrie, Tenseur};
