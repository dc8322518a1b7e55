// src/noyau/rationnel.rs
//
// Rationnel exact (sans flottants).
// - BigRational réduit : num_rational normalise à la construction
// - dénominateur strictement positif
// - comparaison par produit en croix
// - division par zéro : erreur typée, jamais de panique

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use super::erreur::Erreur;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rationnel(BigRational);

impl Rationnel {
    /// n/d, réduit. Erreur si d == 0.
    pub fn new(num: i64, den: i64) -> Result<Self, Erreur> {
        Self::depuis_bigints(BigInt::from(num), BigInt::from(den))
    }

    pub fn depuis_bigints(num: BigInt, den: BigInt) -> Result<Self, Erreur> {
        if den.is_zero() {
            return Err(Erreur::DivisionParZero);
        }
        Ok(Rationnel(BigRational::new(num, den)))
    }

    pub fn entier(n: i64) -> Self {
        Rationnel(BigRational::from_integer(BigInt::from(n)))
    }

    pub fn depuis_bigint(n: BigInt) -> Self {
        Rationnel(BigRational::from_integer(n))
    }

    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }

    pub fn est_entier(&self) -> bool {
        self.0.denom().is_one()
    }

    pub fn est_negatif(&self) -> bool {
        self.0.is_negative()
    }

    pub fn abs(&self) -> Self {
        Rationnel(self.0.abs())
    }

    pub fn inverse(&self) -> Result<Self, Erreur> {
        if self.is_zero() {
            return Err(Erreur::DivisionParZero);
        }
        Ok(Rationnel(self.0.recip()))
    }

    /// self / diviseur (exact).
    pub fn divise(&self, diviseur: &Rationnel) -> Result<Self, Erreur> {
        if diviseur.is_zero() {
            return Err(Erreur::DivisionParZero);
        }
        Ok(Rationnel(&self.0 / &diviseur.0))
    }
}

impl From<i64> for Rationnel {
    fn from(n: i64) -> Self {
        Rationnel::entier(n)
    }
}

impl From<BigRational> for Rationnel {
    fn from(r: BigRational) -> Self {
        Rationnel(r)
    }
}

/* ------------------------ Neutres (num_traits) ------------------------ */

impl Zero for Rationnel {
    fn zero() -> Self {
        Rationnel(BigRational::zero())
    }
    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Rationnel {
    fn one() -> Self {
        Rationnel(BigRational::one())
    }
    fn is_one(&self) -> bool {
        self.0.is_one()
    }
}

/* ------------------------ Opérations ------------------------ */

impl Add for Rationnel {
    type Output = Rationnel;
    fn add(self, autre: Rationnel) -> Rationnel {
        Rationnel(self.0 + autre.0)
    }
}

impl<'a> Add<&'a Rationnel> for &'a Rationnel {
    type Output = Rationnel;
    fn add(self, autre: &'a Rationnel) -> Rationnel {
        Rationnel(&self.0 + &autre.0)
    }
}

impl Sub for Rationnel {
    type Output = Rationnel;
    fn sub(self, autre: Rationnel) -> Rationnel {
        Rationnel(self.0 - autre.0)
    }
}

impl<'a> Sub<&'a Rationnel> for &'a Rationnel {
    type Output = Rationnel;
    fn sub(self, autre: &'a Rationnel) -> Rationnel {
        Rationnel(&self.0 - &autre.0)
    }
}

impl Mul for Rationnel {
    type Output = Rationnel;
    fn mul(self, autre: Rationnel) -> Rationnel {
        Rationnel(self.0 * autre.0)
    }
}

impl<'a> Mul<&'a Rationnel> for &'a Rationnel {
    type Output = Rationnel;
    fn mul(self, autre: &'a Rationnel) -> Rationnel {
        Rationnel(&self.0 * &autre.0)
    }
}

impl Neg for Rationnel {
    type Output = Rationnel;
    fn neg(self) -> Rationnel {
        Rationnel(-self.0)
    }
}

impl Neg for &Rationnel {
    type Output = Rationnel;
    fn neg(self) -> Rationnel {
        Rationnel(-&self.0)
    }
}

/* ------------------------ Ordre (produit en croix) ------------------------ */

impl Ord for Rationnel {
    fn cmp(&self, autre: &Self) -> Ordering {
        // a/b ? c/d  <=>  a*d ? c*b   (b, d > 0)
        let gauche = self.numer() * autre.denom();
        let droite = autre.numer() * self.denom();
        gauche.cmp(&droite)
    }
}

impl PartialOrd for Rationnel {
    fn partial_cmp(&self, autre: &Self) -> Option<Ordering> {
        Some(self.cmp(autre))
    }
}

impl fmt::Display for Rationnel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.numer();
        let d = self.denom();
        if d.is_one() {
            write!(f, "{n}")
        } else {
            write!(f, "{n}/{d}")
        }
    }
}
