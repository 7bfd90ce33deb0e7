use std::sync::OnceLock;

use log::debug;

use crate::constants::{CurveConstants, G1Affine, G1Jac, G2Affine, G2Jac};
use crate::endo::TwistIsomorphism;
use crate::errors::Result;
use crate::glv::GlvParameters;

/// Everything derived once at start-up and read-only afterwards.
#[derive(Clone, Debug)]
pub struct CurveParameters {
    /// Coefficients, generators and the pairing seed.
    pub constants: CurveConstants,
    /// GLV endomorphism data.
    pub glv: GlvParameters,
    /// psi on the twist.
    pub endo: TwistIsomorphism,
}

impl CurveParameters {
    /// Parses all literals and runs the lattice precomputation.
    pub fn new() -> Result<Self> {
        let params = CurveParameters {
            constants: CurveConstants::new()?,
            glv: GlvParameters::new()?,
            endo: TwistIsomorphism::new()?,
        };
        debug!(
            "bls12-381 parameters ready, glv det = {}",
            params.glv.basis.det
        );
        Ok(params)
    }
}

static PARAMETERS: OnceLock<CurveParameters> = OnceLock::new();

/// Process-wide parameters, built on first use.
///
/// # Panics
///
/// If the parameters cannot be built. Nothing downstream is meaningful
/// without them.
pub fn parameters() -> &'static CurveParameters {
    PARAMETERS.get_or_init(|| match CurveParameters::new() {
        Ok(params) => params,
        Err(e) => panic!("bls12-381 parameter setup failed: {e}"),
    })
}

/// Generators of the r-torsion groups, in ker(pi - id) and ker(Tr).
pub fn generators() -> (G1Jac, G2Jac, G1Affine, G2Affine) {
    let c = &parameters().constants;
    (c.g1_gen, c.g2_gen, c.g1_gen_aff, c.g2_gen_aff)
}
