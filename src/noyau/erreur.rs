// src/noyau/erreur.rs
//
// Taxonomie des erreurs du noyau.
// - ExpressionMalformee : arbre structurellement invalide pour une transformation
// - DivisionParZero     : division rationnelle par zéro
// - MotifInvalide       : position hors chaîne ou utilisée deux fois
//
// Une paire de rôles/statistiques incompatibles n'est PAS une erreur : la contraction
// vaut zéro (convention physique).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Erreur {
    #[error("expression malformée : {0}")]
    ExpressionMalformee(String),

    #[error("division par zéro")]
    DivisionParZero,

    #[error("motif de contraction invalide : {0}")]
    MotifInvalide(String),
}
