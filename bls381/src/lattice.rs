//! Short basis of the GLV lattice.
//!
//! For a modulus r and an eigenvalue lambda, the lattice
//! L = {(u, v) : u + v * lambda = 0 mod r} has determinant r. A short basis
//! of L lets a scalar k be rewritten as k1 + k2 * lambda with k1 and k2
//! about half the size of r (Gallant, Lambert, Vanstone, section 4).

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

use crate::errors::{Error, Result};

/// Basis vectors (a, b) and (c, d) of the GLV lattice with `det = a*d - b*c`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lattice {
    /// First component of the first vector.
    pub a: BigInt,
    /// Second component of the first vector.
    pub b: BigInt,
    /// First component of the second vector.
    pub c: BigInt,
    /// Second component of the second vector.
    pub d: BigInt,
    /// Signed determinant, +-r for a reduced basis.
    pub det: BigInt,
}

/// Runs the extended Euclidean algorithm on (r, lambda) until the remainder
/// drops below sqrt(r) and picks the two shortest vectors it produced.
pub fn precompute_lattice(modulus: &BigInt, lambda: &BigInt) -> Result<Lattice> {
    if modulus <= &BigInt::from(1) || !lambda.is_positive() || lambda >= modulus {
        return Err(Error::Parameter(format!(
            "lattice needs 0 < lambda < modulus, got lambda = {lambda}, modulus = {modulus}"
        )));
    }
    let sqrt = modulus.sqrt();

    // invariant: r_i = t_i * lambda mod modulus
    let (mut r0, mut t0) = (modulus.clone(), BigInt::zero());
    let (mut r1, mut t1) = (lambda.clone(), BigInt::from(1));
    while r1 >= sqrt {
        let q = &r0 / &r1;
        let r2 = &r0 - &q * &r1;
        let t2 = &t0 - &q * &t1;
        r0 = std::mem::replace(&mut r1, r2);
        t0 = std::mem::replace(&mut t1, t2);
    }
    if r1.is_zero() {
        return Err(Error::Parameter(
            "lattice reduction did not converge".to_string(),
        ));
    }
    let q = &r0 / &r1;
    let r2 = &r0 - &q * &r1;
    let t2 = &t0 - &q * &t1;

    let a = r1;
    let b = -t1;
    let (c, d) = if &r0 * &r0 + &t0 * &t0 <= &r2 * &r2 + &t2 * &t2 {
        (r0, -t0)
    } else {
        (r2, -t2)
    };
    let det = &a * &d - &b * &c;
    if det.is_zero() {
        return Err(Error::Parameter("degenerate lattice basis".to_string()));
    }
    Ok(Lattice { a, b, c, d, det })
}

/// Nearest integer to n / d, halves rounded up.
fn rounding(n: &BigInt, d: &BigInt) -> BigInt {
    let (n, d) = if d.is_negative() { (-n, -d) } else { (n.clone(), d.clone()) };
    (n * 2u32 + &d).div_floor(&(d * 2u32))
}

impl Lattice {
    /// Splits `k` into `(k1, k2)` with `k = k1 + k2 * lambda mod r`.
    ///
    /// Writes (k, 0) in the basis with rational coordinates, rounds them and
    /// returns the difference to the closest lattice vector.
    pub fn split_scalar(&self, k: &BigInt) -> (BigInt, BigInt) {
        let beta1 = rounding(&(k * &self.d), &self.det);
        let beta2 = rounding(&-(k * &self.b), &self.det);
        let k1 = k - &beta1 * &self.a - &beta2 * &self.c;
        let k2 = -(&beta1 * &self.b) - &beta2 * &self.d;
        (k1, k2)
    }
}
