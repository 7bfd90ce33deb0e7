//! Parameters for GLV scalar multiplication.
//!
//! The third roots of unity define the endomorphisms phi1 and phi2 on G1 and
//! G2, (x, y) -> (omega * x, y). lambda is their eigenvalue on the r-torsion,
//! so phi(P) = [lambda]P for every P in G1 (resp. G2).
//! cf <https://www.cosic.esat.kuleuven.be/nessie/reports/phase2/GLV.pdf>

use ark_ff::{Field, PrimeField};
use num_bigint::{BigInt, BigUint};

use crate::constants::{G1Affine, G2Affine};
use crate::errors::{Error, Result};
use crate::fields::{prime_from_decimal, Fp, Fr};
use crate::lattice::{precompute_lattice, Lattice};

const THIRD_ROOT_ONE_G1: &str = "4002409555221667392624310435006688643935503118305586438271171395842971157480381377015405980053539358417135540939436";

// x^2 - 1
const LAMBDA_GLV: &str = "228988810152649578064853576960394133503";

/// Cube roots of unity, their eigenvalue and the reduced lattice basis.
#[derive(Clone, Debug)]
pub struct GlvParameters {
    /// Primitive cube root of unity in Fp.
    pub third_root_one_g1: Fp,
    /// `third_root_one_g1^2`, acting on G2 x-coordinates through Fp ⊂ Fp2.
    pub third_root_one_g2: Fp,
    /// Eigenvalue of phi1 and phi2 on the r-torsion, x^2 - 1.
    pub lambda: BigInt,
    /// Short vectors of ker((u, v) -> u + v * lambda mod r).
    pub basis: Lattice,
}

impl GlvParameters {
    /// Parses the literals and reduces the lattice for (r, lambda).
    pub fn new() -> Result<Self> {
        let third_root_one_g1: Fp = prime_from_decimal(THIRD_ROOT_ONE_G1)?;
        let third_root_one_g2 = third_root_one_g1.square();
        let lambda = BigInt::parse_bytes(LAMBDA_GLV.as_bytes(), 10)
            .ok_or_else(|| Error::Parameter(format!("malformed lambda {LAMBDA_GLV:?}")))?;

        let r: BigUint = Fr::MODULUS.into();
        let basis = precompute_lattice(&BigInt::from(r), &lambda)?;

        Ok(GlvParameters {
            third_root_one_g1,
            third_root_one_g2,
            lambda,
            basis,
        })
    }

    /// phi1(x, y) = (omega * x, y)
    pub fn phi_g1(&self, p: &G1Affine) -> G1Affine {
        if p.infinity {
            return *p;
        }
        G1Affine::new_unchecked(p.x * self.third_root_one_g1, p.y)
    }

    /// phi2(x, y) = (omega^2 * x, y)
    pub fn phi_g2(&self, p: &G2Affine) -> G2Affine {
        if p.infinity {
            return *p;
        }
        G2Affine::new_unchecked(p.x.mul_by_base_prime_field(&self.third_root_one_g2), p.y)
    }

    /// `lambda` as a scalar field element.
    pub fn lambda_fr(&self) -> Fr {
        Fr::from(self.lambda.magnitude().clone())
    }
}
