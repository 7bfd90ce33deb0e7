//! Base, extension and scalar fields of BLS12-381.
//!
//! Arithmetic comes from arkworks. This module only adds what the codec and
//! the parameter setup need on top of it: fixed-width big-endian byte
//! strings, decimal literal parsing and the lexicographic order used to
//! pick a y-coordinate during point compression.

use ark_ff::{Field, PrimeField, Zero};
use num_bigint::BigUint;

use crate::errors::{Error, Result};

/// Base field, p = 0x1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab
pub type Fp = ark_bls12_381::Fq;

/// Quadratic extension Fp[u]/(u^2 + 1), the coordinate field of G2.
pub type Fp2 = ark_bls12_381::Fq2;

/// Scalar field, r = 0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001
pub type Fr = ark_bls12_381::Fr;

/// Size in bytes of a serialized base field element.
pub const SIZE_OF_FP: usize = 48;

/// Size in bytes of a serialized scalar field element.
pub const SIZE_OF_FR: usize = 32;

/// Size in bytes of a serialized quadratic extension element.
pub const SIZE_OF_FP2: usize = 2 * SIZE_OF_FP;

/// Converts an integer to a field element, rejecting values outside `[0, modulus)`.
pub(crate) fn prime_from_biguint<F: PrimeField>(n: BigUint) -> Option<F> {
    let modulus: BigUint = F::MODULUS.into();
    if n >= modulus {
        return None;
    }
    Some(F::from(n))
}

/// Canonical big-endian representation of `f`, left padded to `size` bytes.
///
/// `size` must hold the modulus, which every caller passes as a constant.
pub(crate) fn prime_to_be_bytes<F: PrimeField>(f: &F, size: usize) -> Vec<u8> {
    let n: BigUint = (*f).into();
    let bytes = n.to_bytes_be();
    let mut out = vec![0u8; size.saturating_sub(bytes.len())];
    out.extend_from_slice(&bytes);
    out
}

/// Reads a canonical big-endian field element of exactly `size` bytes.
pub(crate) fn prime_read_be<F: PrimeField>(bytes: &[u8], size: usize) -> Result<F> {
    check_size(bytes, size)?;
    prime_from_biguint(BigUint::from_bytes_be(bytes)).ok_or(Error::NonCanonicalFieldElement)
}

fn check_size(bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() != expected {
        return Err(Error::InvalidLength {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

/// Parses a base-10 literal into a field element.
pub(crate) fn prime_from_decimal<F: PrimeField>(literal: &str) -> Result<F> {
    let n = BigUint::parse_bytes(literal.as_bytes(), 10)
        .ok_or_else(|| Error::Parameter(format!("malformed decimal literal {literal:?}")))?;
    prime_from_biguint(n)
        .ok_or_else(|| Error::Parameter(format!("literal {literal:?} exceeds the field modulus")))
}

/// Builds an `Fp2` element from decimal literals for its real and imaginary parts.
pub(crate) fn fp2_from_decimal(c0: &str, c1: &str) -> Result<Fp2> {
    Ok(Fp2::new(prime_from_decimal(c0)?, prime_from_decimal(c1)?))
}

/// A field that curve point coordinates live in.
///
/// Implemented for [`Fp`] (G1) and [`Fp2`] (G2).
pub trait CoordinateField: Field {
    /// Size in bytes of the big-endian encoding.
    const SIZE: usize;

    /// Big-endian encoding, [`Self::SIZE`] bytes long.
    fn to_be_bytes(&self) -> Vec<u8>;

    /// Writes the big-endian encoding into `out`.
    ///
    /// Fails with [`Error::InvalidLength`] unless `out` is exactly
    /// [`Self::SIZE`] bytes long.
    fn write_be(&self, out: &mut [u8]) -> Result<()> {
        check_size(out, Self::SIZE)?;
        out.copy_from_slice(&self.to_be_bytes());
        Ok(())
    }

    /// Parses a big-endian encoding of exactly [`Self::SIZE`] bytes.
    fn read_be(bytes: &[u8]) -> Result<Self>;

    /// Whether `self` is the larger of `{self, -self}` in the lexicographic
    /// order of the Zcash serialization format.
    fn lexicographically_largest(&self) -> bool;
}

impl CoordinateField for Fp {
    const SIZE: usize = SIZE_OF_FP;

    fn to_be_bytes(&self) -> Vec<u8> {
        prime_to_be_bytes(self, SIZE_OF_FP)
    }

    fn read_be(bytes: &[u8]) -> Result<Self> {
        prime_read_be(bytes, SIZE_OF_FP)
    }

    fn lexicographically_largest(&self) -> bool {
        self.into_bigint() > Fp::MODULUS_MINUS_ONE_DIV_TWO
    }
}

// Imaginary part first, as in the Zcash format.
impl CoordinateField for Fp2 {
    const SIZE: usize = SIZE_OF_FP2;

    fn to_be_bytes(&self) -> Vec<u8> {
        let mut out = self.c1.to_be_bytes();
        out.extend(self.c0.to_be_bytes());
        out
    }

    fn read_be(bytes: &[u8]) -> Result<Self> {
        check_size(bytes, SIZE_OF_FP2)?;
        let (c1, c0) = bytes.split_at(SIZE_OF_FP);
        Ok(Fp2::new(Fp::read_be(c0)?, Fp::read_be(c1)?))
    }

    fn lexicographically_largest(&self) -> bool {
        if self.c1.is_zero() {
            self.c0.lexicographically_largest()
        } else {
            self.c1.lexicographically_largest()
        }
    }
}
