// src/noyau/options.rs
//
// Réglages du moteur de contraction.
// - base_orthonormee : <p|q> = δ (et δ_pp = 1) ; sinon tenseur de recouvrement s
// - reduction_deltas : élimination des δ sur indices muets + renumérotation après contraction

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    pub base_orthonormee: bool,
    pub reduction_deltas: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            base_orthonormee: true,
            reduction_deltas: false,
        }
    }
}

impl Options {
    pub fn avec_base_orthonormee(mut self, oui: bool) -> Self {
        self.base_orthonormee = oui;
        self
    }

    pub fn avec_reduction_deltas(mut self, oui: bool) -> Self {
        self.reduction_deltas = oui;
        self
    }
}
