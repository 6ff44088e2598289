//! Multivariate polynomials with exact rational coefficients
//!
//! A polynomial is a map from exponent vectors to nonzero `BigRational`
//! coefficients. The lexicographic order on exponent vectors doubles as the
//! monomial order, so the maximal map key is the leading term.

use crate::param::ParamSet;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Add, Mul, Neg, Sub};

/// An exponent vector over the parameter set.
///
/// Invariant: the vector length equals the arity of the owning [`Poly`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Monomial(Vec<u32>);

impl Monomial {
    /// The empty product (constant monomial).
    pub fn unit(arity: usize) -> Self {
        Monomial(vec![0; arity])
    }

    /// The single variable `x_index`.
    pub fn var(index: usize, arity: usize) -> Self {
        let mut exps = vec![0; arity];
        exps[index] = 1;
        Monomial(exps)
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }

    pub fn exponent(&self, index: usize) -> u32 {
        self.0[index]
    }

    pub fn is_unit(&self) -> bool {
        self.0.iter().all(|&e| e == 0)
    }

    /// Sum of exponents.
    pub fn total_degree(&self) -> usize {
        self.0.iter().map(|&e| e as usize).sum()
    }

    pub fn mul(&self, other: &Monomial) -> Monomial {
        debug_assert_eq!(self.0.len(), other.0.len());
        Monomial(
            self.0
                .iter()
                .zip(&other.0)
                .map(|(a, b)| a + b)
                .collect(),
        )
    }

    /// Componentwise difference, or `None` when `other` does not divide.
    pub fn checked_div(&self, other: &Monomial) -> Option<Monomial> {
        debug_assert_eq!(self.0.len(), other.0.len());
        self.0
            .iter()
            .zip(&other.0)
            .map(|(a, b)| a.checked_sub(*b))
            .collect::<Option<Vec<u32>>>()
            .map(Monomial)
    }
}

/// Serialized form of a polynomial: an explicit term list, so the artifact
/// survives serde_json (which cannot key maps by exponent vectors).
#[derive(Serialize, Deserialize)]
struct PolyRepr {
    arity: usize,
    terms: Vec<(Monomial, BigRational)>,
}

/// A multivariate polynomial over `BigRational` coefficients.
///
/// Invariant: stored coefficients are nonzero; all monomials share `arity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PolyRepr", into = "PolyRepr")]
pub struct Poly {
    arity: usize,
    terms: BTreeMap<Monomial, BigRational>,
}

impl From<PolyRepr> for Poly {
    fn from(repr: PolyRepr) -> Self {
        let mut p = Poly::zero(repr.arity);
        for (m, c) in repr.terms {
            p.insert_add(m, c);
        }
        p
    }
}

impl From<Poly> for PolyRepr {
    fn from(p: Poly) -> Self {
        PolyRepr {
            arity: p.arity,
            terms: p.terms.into_iter().collect(),
        }
    }
}

impl Poly {
    pub fn zero(arity: usize) -> Self {
        Poly {
            arity,
            terms: BTreeMap::new(),
        }
    }

    pub fn one(arity: usize) -> Self {
        Poly::constant(BigRational::one(), arity)
    }

    pub fn constant(c: BigRational, arity: usize) -> Self {
        let mut terms = BTreeMap::new();
        if !c.is_zero() {
            terms.insert(Monomial::unit(arity), c);
        }
        Poly { arity, terms }
    }

    /// The single variable `x_index` with coefficient one.
    pub fn var(index: usize, arity: usize) -> Self {
        let mut terms = BTreeMap::new();
        terms.insert(Monomial::var(index, arity), BigRational::one());
        Poly { arity, terms }
    }

    /// A single term `c * m`.
    pub fn term(m: Monomial, c: BigRational, arity: usize) -> Self {
        debug_assert_eq!(m.arity(), arity);
        let mut terms = BTreeMap::new();
        if !c.is_zero() {
            terms.insert(m, c);
        }
        Poly { arity, terms }
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.terms.len() == 1
            && self
                .terms
                .iter()
                .next()
                .map(|(m, c)| m.is_unit() && c.is_one())
                .unwrap_or(false)
    }

    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, &BigRational)> {
        self.terms.iter()
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Leading term in the lexicographic monomial order.
    pub fn leading(&self) -> Option<(&Monomial, &BigRational)> {
        self.terms.iter().next_back()
    }

    /// Maximal total degree over all terms; zero for the zero polynomial.
    pub fn total_degree(&self) -> usize {
        self.terms
            .keys()
            .map(|m| m.total_degree())
            .max()
            .unwrap_or(0)
    }

    /// Degree in the single variable `v`; zero for the zero polynomial.
    pub fn deg_in(&self, v: usize) -> u32 {
        self.terms
            .keys()
            .map(|m| m.exponent(v))
            .max()
            .unwrap_or(0)
    }

    /// Lowest-indexed variable that actually occurs, if any.
    pub fn lowest_var(&self) -> Option<usize> {
        (0..self.arity).find(|&v| self.terms.keys().any(|m| m.exponent(v) > 0))
    }

    fn insert_add(&mut self, m: Monomial, c: BigRational) {
        if c.is_zero() {
            return;
        }
        match self.terms.entry(m) {
            std::collections::btree_map::Entry::Vacant(e) => {
                e.insert(c);
            }
            std::collections::btree_map::Entry::Occupied(mut e) => {
                let sum = e.get() + &c;
                if sum.is_zero() {
                    e.remove();
                } else {
                    *e.get_mut() = sum;
                }
            }
        }
    }

    pub fn scale(&self, c: &BigRational) -> Poly {
        if c.is_zero() {
            return Poly::zero(self.arity);
        }
        Poly {
            arity: self.arity,
            terms: self.terms.iter().map(|(m, k)| (m.clone(), k * c)).collect(),
        }
    }

    /// Multiply by the single monomial `v^k`.
    pub fn shift(&self, v: usize, k: u32) -> Poly {
        if k == 0 {
            return self.clone();
        }
        Poly {
            arity: self.arity,
            terms: self
                .terms
                .iter()
                .map(|(m, c)| {
                    let mut exps: Vec<u32> = (0..self.arity).map(|i| m.exponent(i)).collect();
                    exps[v] += k;
                    (Monomial(exps), c.clone())
                })
                .collect(),
        }
    }

    /// Coefficient polynomials when viewed as univariate in `v`, indexed by
    /// the `v`-degree. The returned polynomials have `v`-degree zero.
    pub fn uni_coeffs(&self, v: usize) -> Vec<Poly> {
        let deg = self.deg_in(v) as usize;
        let mut out = vec![Poly::zero(self.arity); deg + 1];
        for (m, c) in &self.terms {
            let k = m.exponent(v) as usize;
            let mut exps: Vec<u32> = (0..self.arity).map(|i| m.exponent(i)).collect();
            exps[v] = 0;
            out[k].insert_add(Monomial(exps), c.clone());
        }
        out
    }

    /// Exact division: `Some(q)` with `q * d == self`, or `None` when `d`
    /// does not divide. Division by zero yields `None`.
    pub fn div_exact(&self, d: &Poly) -> Option<Poly> {
        debug_assert_eq!(self.arity, d.arity);
        let (dm, dc) = d.leading()?;
        let (dm, dc) = (dm.clone(), dc.clone());
        let mut rem = self.clone();
        let mut quot = Poly::zero(self.arity);
        while !rem.is_zero() {
            let (rm, rc) = match rem.leading() {
                Some((m, c)) => (m.clone(), c.clone()),
                None => break,
            };
            let m = rm.checked_div(&dm)?;
            let c = &rc / &dc;
            let t = Poly::term(m, c, self.arity);
            rem = &rem - &(&t * d);
            quot = &quot + &t;
        }
        Some(quot)
    }

    /// Scale so the lexicographic leading coefficient is one.
    pub fn make_monic(&self) -> Poly {
        match self.leading() {
            None => self.clone(),
            Some((_, c)) => self.scale(&c.recip()),
        }
    }

    /// Rewrite onto a new parameter set, mapping variable `i` of `self` to
    /// variable `map[i]`. Distinct variables may collapse to one, so terms
    /// can merge or cancel.
    pub fn remap_params(&self, map: &[usize], new_arity: usize) -> Poly {
        debug_assert_eq!(map.len(), self.arity);
        let mut out = Poly::zero(new_arity);
        for (m, c) in &self.terms {
            let mut exps = vec![0u32; new_arity];
            for (i, &target) in map.iter().enumerate() {
                exps[target] += m.exponent(i);
            }
            out.insert_add(Monomial(exps), c.clone());
        }
        out
    }

    /// Numeric evaluation; `None` if a coefficient overflows `f64`.
    pub fn eval_f64(&self, point: &[f64]) -> Option<f64> {
        debug_assert_eq!(point.len(), self.arity);
        let mut acc = 0.0;
        for (m, c) in &self.terms {
            let mut term = c.to_f64()?;
            for (i, &x) in point.iter().enumerate() {
                term *= x.powi(m.exponent(i) as i32);
            }
            acc += term;
        }
        Some(acc)
    }

    fn render_with(&self, ps: &ParamSet, latex: bool) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        let mut out = String::new();
        for (i, (m, c)) in self.terms.iter().rev().enumerate() {
            let neg = c.is_negative();
            let mag = c.abs();
            if i == 0 {
                if neg {
                    out.push('-');
                }
            } else if neg {
                out.push_str(" - ");
            } else {
                out.push_str(" + ");
            }
            let mono = render_monomial(m, ps, latex);
            if mono.is_empty() {
                out.push_str(&mag.to_string());
            } else if mag.is_one() {
                out.push_str(&mono);
            } else if latex {
                out.push_str(&format!("{mag} {mono}"));
            } else {
                out.push_str(&format!("{mag}*{mono}"));
            }
        }
        out
    }

    /// Plain-text rendering against the given parameter names.
    pub fn render(&self, ps: &ParamSet) -> String {
        self.render_with(ps, false)
    }

    /// LaTeX rendering against the given parameter names.
    pub fn latex(&self, ps: &ParamSet) -> String {
        self.render_with(ps, true)
    }
}

fn render_monomial(m: &Monomial, ps: &ParamSet, latex: bool) -> String {
    let mut parts = Vec::new();
    for i in 0..m.arity() {
        let e = m.exponent(i);
        if e == 0 {
            continue;
        }
        let name = ps.name(i);
        if e == 1 {
            parts.push(name.to_string());
        } else if latex {
            parts.push(format!("{name}^{{{e}}}"));
        } else {
            parts.push(format!("{name}^{e}"));
        }
    }
    parts.join(if latex { " " } else { "*" })
}

impl Add for &Poly {
    type Output = Poly;

    fn add(self, rhs: &Poly) -> Poly {
        debug_assert_eq!(self.arity, rhs.arity);
        let mut out = self.clone();
        for (m, c) in &rhs.terms {
            out.insert_add(m.clone(), c.clone());
        }
        out
    }
}

impl Sub for &Poly {
    type Output = Poly;

    fn sub(self, rhs: &Poly) -> Poly {
        debug_assert_eq!(self.arity, rhs.arity);
        let mut out = self.clone();
        for (m, c) in &rhs.terms {
            out.insert_add(m.clone(), -c.clone());
        }
        out
    }
}

impl Neg for &Poly {
    type Output = Poly;

    fn neg(self) -> Poly {
        Poly {
            arity: self.arity,
            terms: self
                .terms
                .iter()
                .map(|(m, c)| (m.clone(), -c.clone()))
                .collect(),
        }
    }
}

impl Mul for &Poly {
    type Output = Poly;

    fn mul(self, rhs: &Poly) -> Poly {
        debug_assert_eq!(self.arity, rhs.arity);
        let mut out = Poly::zero(self.arity);
        for (ma, ca) in &self.terms {
            for (mb, cb) in &rhs.terms {
                out.insert_add(ma.mul(mb), ca * cb);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn q(n: i64) -> BigRational {
        BigRational::from_integer(BigInt::from(n))
    }

    #[test]
    fn difference_of_squares() {
        // (x + 1)(x - 1) = x^2 - 1
        let x = Poly::var(0, 1);
        let one = Poly::one(1);
        let prod = &(&x + &one) * &(&x - &one);
        let expected = &(&x * &x) - &one;
        assert_eq!(prod, expected);
    }

    #[test]
    fn cancellation_drops_terms() {
        let x = Poly::var(0, 2);
        let d = &x - &x;
        assert!(d.is_zero());
        assert_eq!(d.term_count(), 0);
    }

    #[test]
    fn degrees() {
        // x^2*y + y
        let x = Poly::var(0, 2);
        let y = Poly::var(1, 2);
        let p = &(&(&x * &x) * &y) + &y;
        assert_eq!(p.total_degree(), 3);
        assert_eq!(p.deg_in(0), 2);
        assert_eq!(p.deg_in(1), 1);
        assert_eq!(p.lowest_var(), Some(0));
    }

    #[test]
    fn exact_division() {
        let x = Poly::var(0, 2);
        let y = Poly::var(1, 2);
        let a = &(&x + &y) * &(&x - &y);
        let quot = a.div_exact(&(&x + &y)).unwrap();
        assert_eq!(quot, &x - &y);
        assert!(a.div_exact(&(&x + &Poly::one(2))).is_none());
    }

    #[test]
    fn uni_view_roundtrip() {
        // x^2*y + 2x + 3 viewed in x: [3, 2, y]
        let x = Poly::var(0, 2);
        let y = Poly::var(1, 2);
        let p = &(&(&(&x * &x) * &y) + &x.scale(&q(2))) + &Poly::constant(q(3), 2);
        let coeffs = p.uni_coeffs(0);
        assert_eq!(coeffs.len(), 3);
        assert_eq!(coeffs[0], Poly::constant(q(3), 2));
        assert_eq!(coeffs[1], Poly::constant(q(2), 2));
        assert_eq!(coeffs[2], y);
    }

    #[test]
    fn remap_collapses_variables() {
        // x*y under x,y -> t becomes t^2
        let x = Poly::var(0, 2);
        let y = Poly::var(1, 2);
        let p = &x * &y;
        let t2 = p.remap_params(&[0, 0], 1);
        let t = Poly::var(0, 1);
        assert_eq!(t2, &t * &t);
        // x - y collapses to zero
        let d = (&x - &y).remap_params(&[0, 0], 1);
        assert!(d.is_zero());
    }

    #[test]
    fn rendering() {
        let ps = ParamSet::sleep_probs(2);
        let x = Poly::var(0, 2);
        let p = &(&x * &x).scale(&q(2)) - &Poly::one(2);
        assert_eq!(p.render(&ps), "2*q_0^2 - 1");
    }
}
