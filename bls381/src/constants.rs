// E: y^2 = x^3 + 4
// E': y^2 = x^3 + 4(u + 1)
// Tower: Fp -> Fp2, u^2 = -1 -> Fp12, v^6 = u + 1
// Seed (BLS12 family): x = -15132376222941642752 = -0xd201000000010000
// Optimal ate loop: trace(frob) - 1 = x
// Fp: p = 4002409555221667393417789825735904156556882819939007885332058136124031650490837864442687629129015664037894272559787
// Fr: r = 52435875175126190479447740508185965837690552500527637822603658699938581184513 (x^4 - x^2 + 1)

use ark_ff::{Field, One, Zero};
use num_bigint::{BigInt, BigUint};

use crate::errors::{Error, Result};
use crate::fields::{fp2_from_decimal, prime_from_decimal, Fp, Fp2};

pub use ark_bls12_381::{G1Affine, G2Affine};

/// G1 point in Jacobian coordinates (X:Y:Z), (x, y) = (X/Z^2, Y/Z^3).
pub type G1Jac = ark_bls12_381::G1Projective;

/// G2 point in Jacobian coordinates.
pub type G2Jac = ark_bls12_381::G2Projective;

/// Number of signed digits in the optimal ate loop counter.
pub const LOOP_COUNTER_LEN: usize = 64;

const B_CURVE_COEFF: u64 = 4;

const G1_GEN_X: &str = "3685416753713387016781088315183077757961620795782546409894578378688607592378376318836054947676345821548104185464507";
const G1_GEN_Y: &str = "1339506544944476473020471379941921221584933875938349620426543736416511423956333506472724655353366534992391756441569";

const G2_GEN_X_C0: &str = "352701069587466618187139116011060144890029952792775240219908644239793785735715026873347600343865175952761926303160";
const G2_GEN_X_C1: &str = "3059144344244213709971259814753781636986470325476647558659373206291635324768958432433509563104347017837885763365758";
const G2_GEN_Y_C0: &str = "1985150602287291935568054521177171638300868978215655730859378665066344726373823718423869104263333984641494340347905";
const G2_GEN_Y_C1: &str = "927553665492332455747201965776037880757740193453592970025027978793976877002675564980949289727957565575433344219582";

// binary decomposition of 15132376222941642752, little endian
const LOOP_COUNTER: [i8; LOOP_COUNTER_LEN] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 1, 1,
];

const X_GEN: &str = "15132376222941642752";

/// Curve equation coefficients, generators and the pairing seed.
#[derive(Clone, Debug)]
pub struct CurveConstants {
    /// b in y^2 = x^3 + b.
    pub b_curve_coeff: Fp,
    /// b' = (1 + u) * b, the twist's constant term.
    pub b_twist_curve_coeff: Fp2,
    /// Generator of the r-torsion subgroup in ker(pi - id).
    pub g1_gen: G1Jac,
    /// Generator of the r-torsion subgroup in ker(Tr).
    pub g2_gen: G2Jac,
    /// Affine form of `g1_gen`.
    pub g1_gen_aff: G1Affine,
    /// Affine form of `g2_gen`.
    pub g2_gen_aff: G2Affine,
    /// (1:1:0)
    pub g1_infinity: G1Jac,
    /// (1:1:0)
    pub g2_infinity: G2Jac,
    /// Optimal ate loop counter (trace - 1 = x for the BLS family).
    pub loop_counter: [i8; LOOP_COUNTER_LEN],
    /// |x|, the seed is negative.
    pub x_gen: BigUint,
}

impl CurveConstants {
    /// Parses the literals and normalizes the generators to affine form.
    pub fn new() -> Result<Self> {
        let b_curve_coeff = Fp::from(B_CURVE_COEFF);
        let b_twist_curve_coeff =
            Fp2::new(Fp::one(), Fp::one()).mul_by_base_prime_field(&b_curve_coeff);

        let g1_gen = G1Jac::new_unchecked(
            prime_from_decimal(G1_GEN_X)?,
            prime_from_decimal(G1_GEN_Y)?,
            Fp::one(),
        );
        let g2_gen = G2Jac::new_unchecked(
            fp2_from_decimal(G2_GEN_X_C0, G2_GEN_X_C1)?,
            fp2_from_decimal(G2_GEN_Y_C0, G2_GEN_Y_C1)?,
            Fp2::one(),
        );
        let g1_gen_aff = G1Affine::from(g1_gen);
        let g2_gen_aff = G2Affine::from(g2_gen);

        let g1_infinity = G1Jac::new_unchecked(Fp::one(), Fp::one(), Fp::zero());
        let g2_infinity = G2Jac::new_unchecked(Fp2::one(), Fp2::one(), Fp2::zero());

        let x_gen = BigUint::parse_bytes(X_GEN.as_bytes(), 10)
            .ok_or_else(|| Error::Parameter(format!("malformed seed {X_GEN:?}")))?;

        Ok(CurveConstants {
            b_curve_coeff,
            b_twist_curve_coeff,
            g1_gen,
            g2_gen,
            g1_gen_aff,
            g2_gen_aff,
            g1_infinity,
            g2_infinity,
            loop_counter: LOOP_COUNTER,
            x_gen,
        })
    }
}

/// Sum of `digits[i] * 2^i`.
pub fn signed_digits_value(digits: &[i8]) -> BigInt {
    digits
        .iter()
        .rev()
        .fold(BigInt::zero(), |acc, d| (acc << 1u32) + BigInt::from(*d))
}
