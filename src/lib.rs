// src/lib.rs
//
// Wick Q-pur : algèbre symbolique exacte pour la seconde quantification.
// - construction d'opérateurs (excitations, hamiltoniens, clusters, photons)
// - moyenne sur le vide par Wick dirigé (signe fermionique exact)
// - rendu LaTeX
//
// Aucun logger n'est installé ici : l'appelant choisit (façade `log`).

//! ```
//! use wick_qpur::{excitation, moyenne_vide, ContexteIndices, Expr};
//!
//! let mut ctx = ContexteIndices::new();
//! let e = Expr::produit([excitation(&mut ctx, -1), excitation(&mut ctx, 1)]);
//! let r = moyenne_vide(&e, &[(1, 2), (0, 3)]).unwrap();
//! assert!(!r.est_zero());
//! println!("{}", r.latex());
//! ```

pub mod noyau;

pub use noyau::*;
