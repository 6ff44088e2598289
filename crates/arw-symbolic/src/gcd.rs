//! Polynomial GCD via a primitive Euclidean remainder sequence
//!
//! The fraction type reduces through this routine after every arithmetic
//! operation, so it has to be exact for arbitrary inputs. It recurses one
//! variable at a time: a polynomial is viewed as univariate in its
//! lowest-indexed variable with coefficients in the remaining ones, the
//! content is split off, and the primitive parts run a pseudo-remainder
//! Euclidean loop. Constant polynomials have GCD one (coefficients live in
//! a field, so numeric content is irrelevant).
//!
//! The result is canonical: monic in the lexicographic leading coefficient.

use crate::poly::Poly;

/// Greatest common divisor of two polynomials, monic-normalized.
///
/// `poly_gcd(0, 0)` is the zero polynomial; otherwise the result is nonzero
/// and divides both inputs exactly.
pub fn poly_gcd(a: &Poly, b: &Poly) -> Poly {
    debug_assert_eq!(a.arity(), b.arity());
    if a.is_zero() {
        return b.make_monic();
    }
    if b.is_zero() {
        return a.make_monic();
    }

    let v = match lowest_var(a, b) {
        Some(v) => v,
        // Both constant and nonzero.
        None => return Poly::one(a.arity()),
    };

    let ca = content_in(a, v);
    let cb = content_in(b, v);
    let c = poly_gcd(&ca, &cb);

    let pa = primitive_part(a, &ca);
    let pb = primitive_part(b, &cb);

    let (mut p, mut q) = if a.deg_in(v) >= b.deg_in(v) {
        (pa, pb)
    } else {
        (pb, pa)
    };
    while !q.is_zero() {
        let r = pseudo_rem(&p, &q, v);
        p = q;
        q = if r.is_zero() {
            r
        } else {
            let cr = content_in(&r, v);
            primitive_part(&r, &cr)
        };
    }

    (&c * &p).make_monic()
}

fn lowest_var(a: &Poly, b: &Poly) -> Option<usize> {
    match (a.lowest_var(), b.lowest_var()) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) => Some(x),
        (None, y) => y,
    }
}

/// GCD of the coefficient polynomials of `p` viewed as univariate in `v`.
fn content_in(p: &Poly, v: usize) -> Poly {
    let mut acc = Poly::zero(p.arity());
    for coeff in p.uni_coeffs(v) {
        if coeff.is_zero() {
            continue;
        }
        acc = poly_gcd(&acc, &coeff);
        if acc.is_one() {
            break;
        }
    }
    acc
}

fn primitive_part(p: &Poly, content: &Poly) -> Poly {
    if content.is_one() {
        return p.clone();
    }
    p.div_exact(content)
        .expect("content divides its polynomial")
}

/// Remainder of `p` by `q` in the variable `v`, up to a factor of a power
/// of `q`'s leading coefficient. Callers take the primitive part afterward,
/// so the stray factor is irrelevant.
fn pseudo_rem(p: &Poly, q: &Poly, v: usize) -> Poly {
    let dq = q.deg_in(v);
    let q_coeffs = q.uni_coeffs(v);
    let lq = &q_coeffs[dq as usize];

    let mut r = p.clone();
    loop {
        if r.is_zero() {
            return r;
        }
        let dr = r.deg_in(v);
        if dr < dq {
            return r;
        }
        let r_coeffs = r.uni_coeffs(v);
        let lr = &r_coeffs[dr as usize];
        // r := lq * r - lr * v^(dr - dq) * q, which cancels the lead term
        r = &(&r * lq) - &(&q.shift(v, dr - dq) * lr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::Poly;

    fn x() -> Poly {
        Poly::var(0, 2)
    }

    fn y() -> Poly {
        Poly::var(1, 2)
    }

    #[test]
    fn univariate_common_factor() {
        // gcd((x+1)(x-1), (x+1)x) = x+1
        let xp1 = &x() + &Poly::one(2);
        let a = &xp1 * &(&x() - &Poly::one(2));
        let b = &xp1 * &x();
        assert_eq!(poly_gcd(&a, &b), xp1);
    }

    #[test]
    fn multivariate_common_factor() {
        // gcd((x+y)(x-y), (x+y)x) = x+y
        let s = &x() + &y();
        let a = &s * &(&x() - &y());
        let b = &s * &x();
        assert_eq!(poly_gcd(&a, &b), s);
    }

    #[test]
    fn coprime_inputs() {
        let a = &x() + &Poly::one(2);
        let b = &y() + &Poly::one(2);
        assert_eq!(poly_gcd(&a, &b), Poly::one(2));
    }

    #[test]
    fn zero_cases() {
        let z = Poly::zero(2);
        let a = (&x() + &y()).scale(&num_rational::BigRational::from_integer(3.into()));
        assert_eq!(poly_gcd(&z, &a), &x() + &y());
        assert_eq!(poly_gcd(&a, &z), &x() + &y());
        assert!(poly_gcd(&z, &z).is_zero());
    }

    #[test]
    fn gcd_divides_both() {
        let f = &(&x() + &y()) * &(&x() + &Poly::one(2));
        let g = &(&x() + &y()) * &(&y() + &Poly::one(2));
        let d = poly_gcd(&f, &g);
        assert!(f.div_exact(&d).is_some());
        assert!(g.div_exact(&d).is_some());
    }
}
