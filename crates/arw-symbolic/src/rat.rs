//! Reduced rational functions
//!
//! The field the solver works over. A value is a fraction of two
//! polynomials kept in canonical form: numerator and denominator share no
//! polynomial factor, and the denominator is monic in the lexicographic
//! leading coefficient. Every constructor and operation re-canonicalizes,
//! so equality-to-zero is an exact structural test on the numerator.

use crate::gcd::poly_gcd;
use crate::param::ParamSet;
use crate::poly::Poly;
use crate::{Result, SymbolicError};
use num_bigint::BigInt;
use num_rational::BigRational;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// An exact rational function over the parameter set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rat {
    num: Poly,
    den: Poly,
}

impl Rat {
    /// Build a fraction, failing when the denominator is identically zero.
    pub fn new(num: Poly, den: Poly) -> Result<Self> {
        if den.is_zero() {
            return Err(SymbolicError::DivisionByZero);
        }
        Ok(Self::reduced(num, den))
    }

    /// Canonicalize a fraction with a known-nonzero denominator.
    fn reduced(num: Poly, den: Poly) -> Self {
        debug_assert!(!den.is_zero());
        if num.is_zero() {
            return Rat {
                num,
                den: Poly::one(den.arity()),
            };
        }
        let g = poly_gcd(&num, &den);
        let (mut num, mut den) = if g.is_one() {
            (num, den)
        } else {
            (
                num.div_exact(&g).expect("gcd divides numerator"),
                den.div_exact(&g).expect("gcd divides denominator"),
            )
        };
        let lc_inv = den.leading().map(|(_, lc)| lc.recip());
        if let Some(inv) = lc_inv {
            num = num.scale(&inv);
            den = den.scale(&inv);
        }
        Rat { num, den }
    }

    pub fn zero(arity: usize) -> Self {
        Rat {
            num: Poly::zero(arity),
            den: Poly::one(arity),
        }
    }

    pub fn one(arity: usize) -> Self {
        Rat {
            num: Poly::one(arity),
            den: Poly::one(arity),
        }
    }

    pub fn from_int(n: i64, arity: usize) -> Self {
        Rat {
            num: Poly::constant(BigRational::from_integer(BigInt::from(n)), arity),
            den: Poly::one(arity),
        }
    }

    /// The constant `n / d`.
    pub fn rational(n: i64, d: i64, arity: usize) -> Result<Self> {
        if d == 0 {
            return Err(SymbolicError::DivisionByZero);
        }
        Ok(Rat {
            num: Poly::constant(
                BigRational::new(BigInt::from(n), BigInt::from(d)),
                arity,
            ),
            den: Poly::one(arity),
        })
    }

    /// The parameter `index` as a field value.
    pub fn var(index: usize, ps: &ParamSet) -> Result<Self> {
        if index >= ps.arity() {
            return Err(SymbolicError::ParameterOutOfRange {
                index,
                arity: ps.arity(),
            });
        }
        Ok(Rat {
            num: Poly::var(index, ps.arity()),
            den: Poly::one(ps.arity()),
        })
    }

    pub fn arity(&self) -> usize {
        self.num.arity()
    }

    pub fn num(&self) -> &Poly {
        &self.num
    }

    pub fn den(&self) -> &Poly {
        &self.den
    }

    /// Exact zero test on the canonical form.
    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.num == self.den
    }

    /// Total degree of the reduced numerator. Pivot-selection heuristic
    /// only; zero for the zero value.
    pub fn numerator_degree(&self) -> usize {
        self.num.total_degree()
    }

    /// Multiplicative inverse; fails on zero.
    pub fn inv(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(SymbolicError::DivisionByZero);
        }
        Ok(Self::reduced(self.den.clone(), self.num.clone()))
    }

    /// Division; fails when `rhs` is zero.
    pub fn div(&self, rhs: &Rat) -> Result<Self> {
        if rhs.is_zero() {
            return Err(SymbolicError::DivisionByZero);
        }
        Ok(Self::reduced(
            &self.num * &rhs.den,
            &self.den * &rhs.num,
        ))
    }

    /// Rewrite onto a new parameter set, mapping parameter `i` to
    /// `map[i]`. Fails when the substitution collapses the denominator to
    /// zero.
    pub fn substitute(&self, map: &[usize], target: &ParamSet) -> Result<Self> {
        let num = self.num.remap_params(map, target.arity());
        let den = self.den.remap_params(map, target.arity());
        Rat::new(num, den)
    }

    /// Numeric evaluation at a parameter point. `None` when the denominator
    /// vanishes at the point or a coefficient overflows `f64`.
    pub fn eval_f64(&self, point: &[f64]) -> Option<f64> {
        let den = self.den.eval_f64(point)?;
        if den == 0.0 {
            return None;
        }
        Some(self.num.eval_f64(point)? / den)
    }

    /// Plain-text `num / den` rendering; bare numerator when the
    /// denominator is one.
    pub fn render(&self, ps: &ParamSet) -> String {
        if self.den.is_one() {
            self.num.render(ps)
        } else {
            format!("({}) / ({})", self.num.render(ps), self.den.render(ps))
        }
    }

    /// LaTeX rendering.
    pub fn latex(&self, ps: &ParamSet) -> String {
        if self.den.is_one() {
            self.num.latex(ps)
        } else {
            format!("\\frac{{{}}}{{{}}}", self.num.latex(ps), self.den.latex(ps))
        }
    }
}

impl Add for &Rat {
    type Output = Rat;

    fn add(self, rhs: &Rat) -> Rat {
        debug_assert_eq!(self.arity(), rhs.arity());
        Rat::reduced(
            &(&self.num * &rhs.den) + &(&rhs.num * &self.den),
            &self.den * &rhs.den,
        )
    }
}

impl Sub for &Rat {
    type Output = Rat;

    fn sub(self, rhs: &Rat) -> Rat {
        debug_assert_eq!(self.arity(), rhs.arity());
        Rat::reduced(
            &(&self.num * &rhs.den) - &(&rhs.num * &self.den),
            &self.den * &rhs.den,
        )
    }
}

impl Mul for &Rat {
    type Output = Rat;

    fn mul(self, rhs: &Rat) -> Rat {
        debug_assert_eq!(self.arity(), rhs.arity());
        Rat::reduced(&self.num * &rhs.num, &self.den * &rhs.den)
    }
}

impl Neg for &Rat {
    type Output = Rat;

    fn neg(self) -> Rat {
        Rat {
            num: -&self.num,
            den: self.den.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ps() -> ParamSet {
        ParamSet::sleep_probs(2)
    }

    fn q0() -> Rat {
        Rat::var(0, &ps()).unwrap()
    }

    fn q1() -> Rat {
        Rat::var(1, &ps()).unwrap()
    }

    #[test]
    fn fraction_reduces() {
        // (q0^2 - 1) / (q0 + 1) = q0 - 1
        let one = Rat::one(2);
        let num = &(&q0() * &q0()) - &one;
        let den = &q0() + &one;
        let r = num.div(&den).unwrap();
        assert_eq!(r, &q0() - &one);
        assert!(r.den().is_one());
    }

    #[test]
    fn add_over_common_denominator() {
        // q0/(1-q0) + 1 = 1/(1-q0)
        let one = Rat::one(2);
        let omq = &one - &q0();
        let a = q0().div(&omq).unwrap();
        let sum = &a + &one;
        assert_eq!(sum, one.div(&omq).unwrap());
    }

    #[test]
    fn subtraction_cancels_exactly() {
        let a = q0().div(&(&Rat::one(2) - &q1())).unwrap();
        let d = &a - &a;
        assert!(d.is_zero());
        assert_eq!(d, Rat::zero(2));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(
            q0().div(&Rat::zero(2)),
            Err(SymbolicError::DivisionByZero)
        );
        assert_eq!(Rat::zero(2).inv(), Err(SymbolicError::DivisionByZero));
    }

    #[test]
    fn numerator_degree_is_reduced_degree() {
        let one = Rat::one(2);
        // ((q0+1)(q0-1)) / (q0+1) has reduced numerator degree 1
        let r = (&(&q0() + &one) * &(&q0() - &one))
            .div(&(&q0() + &one))
            .unwrap();
        assert_eq!(r.numerator_degree(), 1);
        assert_eq!(Rat::zero(2).numerator_degree(), 0);
        assert_eq!(one.numerator_degree(), 0);
    }

    #[test]
    fn inverse_roundtrip() {
        let r = (&q0() + &q1()).div(&(&Rat::one(2) - &q0())).unwrap();
        let prod = &r * &r.inv().unwrap();
        assert!(prod.is_one());
    }

    #[test]
    fn univariate_substitution() {
        let uni = ParamSet::single("q");
        let r = &q0() * &q1();
        let s = r.substitute(&[0, 0], &uni).unwrap();
        let q = Rat::var(0, &uni).unwrap();
        assert_eq!(s, &q * &q);
    }

    #[test]
    fn substitution_can_zero_a_denominator() {
        let uni = ParamSet::single("q");
        let den = &q0() - &q1();
        let r = Rat::one(2).div(&den).unwrap();
        assert_eq!(
            r.substitute(&[0, 0], &uni),
            Err(SymbolicError::DivisionByZero)
        );
    }

    #[test]
    fn evaluation() {
        // q0 / (1 - q0) at q0 = 1/2 is 1
        let r = q0().div(&(&Rat::one(2) - &q0())).unwrap();
        let v = r.eval_f64(&[0.5, 0.25]).unwrap();
        assert!((v - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rendering() {
        let p = ps();
        let one = Rat::one(2);
        let r = q0().div(&(&one - &q0())).unwrap();
        // canonical denominator is monic: q0 - 1, numerator -q0
        assert_eq!(r.render(&p), "(-q_0) / (q_0 - 1)");
        assert_eq!(r.latex(&p), "\\frac{-q_0}{q_0 - 1}");
        assert_eq!(one.render(&p), "1");
    }

    #[test]
    fn serde_roundtrip() {
        let r = q0().div(&(&Rat::one(2) - &q1())).unwrap();
        let json = serde_json::to_string(&r).unwrap();
        let back: Rat = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
