use crate::constants::G2Affine;
use crate::errors::Result;
use crate::fields::{fp2_from_decimal, Fp2};

const U_C0: &str = "0";
const U_C1: &str = "4002409555221667392624310435006688643935503118305586438271171395842971157480381377015405980053539358417135540939437";
const V_C0: &str = "2973677408986561043442465346520108879172042883009249989176415018091420807192182638567116318576472649347015917690530";
const V_C1: &str = "1028732146235106349975324479215795277384839936929757896155643118032610843298655225875571310552543014690878354869257";

/// psi o pi o psi^-1, where psi: E -> E' is the degree 6 isomorphism
/// defined over Fp12 and pi the p-power Frobenius.
///
/// On E' it reads (x, y) -> (conj(x) * u, conj(y) * v), and acts on G2 as
/// multiplication by the seed x.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TwistIsomorphism {
    /// Factor applied to the conjugated x-coordinate.
    pub u: Fp2,
    /// Factor applied to the conjugated y-coordinate.
    pub v: Fp2,
}

impl TwistIsomorphism {
    /// Parses `u` and `v` from their literals.
    pub fn new() -> Result<Self> {
        Ok(TwistIsomorphism {
            u: fp2_from_decimal(U_C0, U_C1)?,
            v: fp2_from_decimal(V_C0, V_C1)?,
        })
    }

    /// Applies the endomorphism; the identity maps to itself.
    pub fn psi(&self, p: &G2Affine) -> G2Affine {
        if p.infinity {
            return *p;
        }
        G2Affine::new_unchecked(conjugate(&p.x) * self.u, conjugate(&p.y) * self.v)
    }
}

fn conjugate(e: &Fp2) -> Fp2 {
    Fp2::new(e.c0, -e.c1)
}
