// src/noyau/format.rs
//
// Rendu LaTeX (pur, récursif).
// - Somme   : signes repliés, " + " / " - "
// - Produit : concaténation ; constante de tête = coefficient ; Somme => \left( \right)
// - Tenseur : {nom^{{i}{j}}_{{k}{l}}}, \bar{} antisymétrique, \hat{} symétrique
// - Opérateurs : {a^{\dagger}_{p_{1}}}, {b_{x_{1}}}

use num_traits::{One, Signed};

use super::expr::Expr;
use super::indice::Indice;
use super::rationnel::Rationnel;
use super::tenseur::{Action, Statistique, Symetrie, Tenseur};

/* ------------------------ Helpers rationnels ------------------------ */

fn format_rationnel(r: &Rationnel) -> String {
    let n = r.numer();
    let d = r.denom();
    if d.is_one() {
        return format!("{n}");
    }
    if n.is_negative() {
        format!("-\\frac{{{}}}{{{d}}}", n.abs())
    } else {
        format!("\\frac{{{n}}}{{{d}}}")
    }
}

/// Préfixe d'un monôme : "" pour 1, "-" pour -1, sinon le rationnel.
fn format_coefficient(c: &Rationnel, monome: &Expr) -> String {
    if monome.est_un() {
        return format_rationnel(c);
    }
    if c.is_one() {
        return String::new();
    }
    if (-c).is_one() {
        return "-".to_string();
    }
    format_rationnel(c)
}

fn format_monome(e: &Expr) -> String {
    if e.est_un() {
        return String::new();
    }
    format_latex(e)
}

/* ------------------------ Feuilles ------------------------ */

fn nom_latex(nom: &str) -> String {
    match nom {
        "δ" => "\\delta".to_string(),
        "ω" => "\\omega".to_string(),
        "ε" => "\\epsilon".to_string(),
        "λ" => "\\lambda".to_string(),
        autre => autre.to_string(),
    }
}

fn liste_indices(v: &[Indice]) -> String {
    v.iter().map(|i| format!("{{{}}}", i.latex())).collect()
}

fn format_tenseur(t: &Tenseur) -> String {
    if let Some((op, i)) = t.comme_operateur() {
        let lettre = match op.statistique {
            Statistique::Fermion => "a",
            Statistique::Boson => "b",
        };
        return match op.action {
            Action::Creation => format!("{{{lettre}^{{\\dagger}}_{{{}}}}}", i.latex()),
            Action::Annihilation => format!("{{{lettre}_{{{}}}}}", i.latex()),
        };
    }

    let nom = nom_latex(&t.nom);
    let nom = match t.symetrie {
        Symetrie::Aucune => nom,
        Symetrie::Antisymetrique => format!("\\bar{{{nom}}}"),
        Symetrie::Symetrique => format!("\\hat{{{nom}}}"),
    };

    let mut s = String::from("{");
    s.push_str(&nom);
    if !t.haut.is_empty() {
        s.push_str(&format!("^{{{}}}", liste_indices(&t.haut)));
    }
    if !t.bas.is_empty() {
        s.push_str(&format!("_{{{}}}", liste_indices(&t.bas)));
    }
    s.push('}');
    s
}

/* ------------------------ Rendu principal ------------------------ */

pub fn format_latex(e: &Expr) -> String {
    match e {
        Expr::Constante(r) => format_rationnel(r),
        Expr::Tenseur(t) => format_tenseur(t),
        Expr::Produit(fs) => {
            let (tete, reste) = match fs.first() {
                Some(Expr::Constante(c)) if (-c).is_one() => ("-".to_string(), &fs[1..]),
                Some(Expr::Constante(c)) => (format_rationnel(c), &fs[1..]),
                _ => (String::new(), &fs[..]),
            };
            let corps: String = reste
                .iter()
                .map(|f| match f {
                    Expr::Somme(_) => format!("\\left({}\\right)", format_latex(f)),
                    autre => format_latex(autre),
                })
                .collect();
            format!("{tete}{corps}")
        }
        Expr::Somme(ts) => {
            let mut out = String::new();
            for (k, t) in ts.iter().enumerate() {
                let c = &t.coeff;
                if k == 0 {
                    out.push_str(&format_coefficient(c, &t.expr));
                } else if c.est_negatif() {
                    out.push_str(" - ");
                    out.push_str(&format_coefficient(&c.abs(), &t.expr));
                } else {
                    out.push_str(" + ");
                    out.push_str(&format_coefficient(c, &t.expr));
                }
                out.push_str(&format_monome(&t.expr));
            }
            out
        }
    }
}
