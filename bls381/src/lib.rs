//! BLS12-381 curve parameters and point serialization.
//!
//! This crate provides the curve constants (equation coefficients,
//! generators, optimal ate loop counter), the GLV endomorphism parameters
//! and the twist isomorphism used by scalar multiplication and pairings,
//! plus a stream codec for scalars, field elements and points in the
//! Zcash compressed / uncompressed format.
//!
//! Field and group arithmetic come from arkworks; the parameters are built
//! once per process by [`parameters`].

mod constants;
mod endo;
mod errors;
mod fields;
mod glv;
mod lattice;
mod marshal;
mod parallel;
mod params;
mod point;

#[cfg(test)]
mod tests;

pub use constants::{
    signed_digits_value, CurveConstants, G1Affine, G1Jac, G2Affine, G2Jac, LOOP_COUNTER_LEN,
};
pub use endo::TwistIsomorphism;
pub use errors::{Error, Result};
pub use fields::{CoordinateField, Fp, Fp2, Fr, SIZE_OF_FP, SIZE_OF_FP2, SIZE_OF_FR};
pub use glv::GlvParameters;
pub use lattice::{precompute_lattice, Lattice};
pub use marshal::{Decode, Decoder, Encode, Encoder, EncoderConfig, EncoderOption};
pub use params::{generators, parameters, CurveParameters};
pub use point::{
    PointEncoding, PointMetadata, SIZE_OF_G1_AFFINE_COMPRESSED, SIZE_OF_G1_AFFINE_UNCOMPRESSED,
    SIZE_OF_G2_AFFINE_COMPRESSED, SIZE_OF_G2_AFFINE_UNCOMPRESSED,
};
