//! Zcash / IETF point serialization for G1 and G2 affine points.
//!
//! The three most significant bits of the first byte carry metadata:
//! - bit 7 is set when the point is compressed,
//! - bit 6 is set when the point is the point at infinity (all remaining
//!   bits must then be zero),
//! - bit 5 is set when the point is compressed, not infinity, and its
//!   y-coordinate is the lexicographically largest of the two roots.
//!
//! This only works because the base field modulus is 381 bits, so the top
//! three bits of a 48-byte coordinate are always clear.

use ark_ec::short_weierstrass::{Affine, SWCurveConfig};
use ark_ff::Field;

use crate::errors::{Error, Result};
use crate::fields::{CoordinateField, Fp, Fp2};

pub(crate) const M_MASK: u8 = 0b111 << 5;
pub(crate) const M_UNCOMPRESSED: u8 = 0b000 << 5;
pub(crate) const M_UNCOMPRESSED_INFINITY: u8 = 0b010 << 5;
pub(crate) const M_COMPRESSED_SMALLEST: u8 = 0b100 << 5;
pub(crate) const M_COMPRESSED_LARGEST: u8 = 0b101 << 5;
pub(crate) const M_COMPRESSED_INFINITY: u8 = 0b110 << 5;

/// Size in bytes of a compressed G1 point.
pub const SIZE_OF_G1_AFFINE_COMPRESSED: usize = Fp::SIZE;
/// Size in bytes of an uncompressed G1 point.
pub const SIZE_OF_G1_AFFINE_UNCOMPRESSED: usize = 2 * Fp::SIZE;
/// Size in bytes of a compressed G2 point.
pub const SIZE_OF_G2_AFFINE_COMPRESSED: usize = Fp2::SIZE;
/// Size in bytes of an uncompressed G2 point.
pub const SIZE_OF_G2_AFFINE_UNCOMPRESSED: usize = 2 * Fp2::SIZE;

/// Metadata tag stored in the top three bits of an encoded point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointMetadata {
    /// `000`: x then y.
    Uncompressed,
    /// `010`: the identity, uncompressed width.
    UncompressedInfinity,
    /// `100`: x only, y is the smaller root.
    CompressedSmallest,
    /// `101`: x only, y is the larger root.
    CompressedLargest,
    /// `110`: the identity, compressed width.
    CompressedInfinity,
}

impl PointMetadata {
    /// Reads the tag from the most significant byte of an encoding.
    ///
    /// Fails with [`Error::MalformedEncoding`] on the three bit patterns
    /// that are not assigned a meaning.
    pub fn from_msb(msb: u8) -> Result<Self> {
        match msb & M_MASK {
            M_UNCOMPRESSED => Ok(Self::Uncompressed),
            M_UNCOMPRESSED_INFINITY => Ok(Self::UncompressedInfinity),
            M_COMPRESSED_SMALLEST => Ok(Self::CompressedSmallest),
            M_COMPRESSED_LARGEST => Ok(Self::CompressedLargest),
            M_COMPRESSED_INFINITY => Ok(Self::CompressedInfinity),
            _ => Err(Error::MalformedEncoding(msb)),
        }
    }

    /// The tag bits, already shifted into place.
    pub const fn bits(self) -> u8 {
        match self {
            Self::Uncompressed => M_UNCOMPRESSED,
            Self::UncompressedInfinity => M_UNCOMPRESSED_INFINITY,
            Self::CompressedSmallest => M_COMPRESSED_SMALLEST,
            Self::CompressedLargest => M_COMPRESSED_LARGEST,
            Self::CompressedInfinity => M_COMPRESSED_INFINITY,
        }
    }

    /// Whether only x follows the tag.
    #[inline]
    pub fn is_compressed(self) -> bool {
        !matches!(self, Self::Uncompressed | Self::UncompressedInfinity)
    }

    /// Whether the tag denotes the identity.
    #[inline]
    pub fn is_infinity(self) -> bool {
        matches!(self, Self::UncompressedInfinity | Self::CompressedInfinity)
    }
}

/// Binary encoding of an affine point in compressed and uncompressed form.
pub trait PointEncoding: Sized + Copy + Send + Sync {
    /// Size of the compressed encoding (x only).
    const SIZE_COMPRESSED: usize;
    /// Size of the uncompressed encoding (x then y).
    const SIZE_UNCOMPRESSED: usize;

    /// Compressed encoding, `SIZE_COMPRESSED` bytes.
    fn bytes(&self) -> Vec<u8>;

    /// Uncompressed encoding, `SIZE_UNCOMPRESSED` bytes.
    fn raw_bytes(&self) -> Vec<u8>;

    /// Parses and validates an encoding in either form.
    ///
    /// The buffer length must match the form announced by its metadata.
    fn set_bytes(buf: &[u8]) -> Result<Self>;
}

fn check_len(buf: &[u8], expected: usize) -> Result<()> {
    if buf.len() != expected {
        return Err(Error::InvalidLength {
            expected,
            actual: buf.len(),
        });
    }
    Ok(())
}

/// Infinity encodings carry nothing but the tag.
fn check_infinity_payload(buf: &[u8]) -> Result<()> {
    if buf[0] & !M_MASK != 0 || buf[1..].iter().any(|b| *b != 0) {
        return Err(Error::MalformedEncoding(buf[0]));
    }
    Ok(())
}

fn validate<P: SWCurveConfig>(p: Affine<P>) -> Result<Affine<P>> {
    if !p.is_on_curve() {
        return Err(Error::PointNotOnCurve);
    }
    if !p.is_in_correct_subgroup_assuming_on_curve() {
        return Err(Error::PointNotInSubgroup);
    }
    Ok(p)
}

/// A compressed point whose y-coordinate has not been recovered yet.
///
/// Produced by [`parse_compressed`] during the sequential read of a point
/// sequence and turned into a validated point by [`Self::recover`].
pub(crate) enum CompressedCandidate<P: SWCurveConfig> {
    Infinity,
    Point { x: P::BaseField, largest: bool },
}

impl<P> CompressedCandidate<P>
where
    P: SWCurveConfig,
    P::BaseField: CoordinateField,
{
    /// Recovers y from the curve equation y^2 = x^3 + b and validates the point.
    pub(crate) fn recover(&self) -> Result<Affine<P>> {
        let (x, largest) = match self {
            Self::Infinity => return Ok(Affine::identity()),
            Self::Point { x, largest } => (*x, *largest),
        };
        // a = 0 for both BLS12-381 groups
        let rhs = x.square() * x + P::COEFF_B;
        let mut y = rhs.sqrt().ok_or(Error::PointNotOnCurve)?;
        if y.lexicographically_largest() != largest {
            y = -y;
        }
        let p = Affine::new_unchecked(x, y);
        if !p.is_in_correct_subgroup_assuming_on_curve() {
            return Err(Error::PointNotInSubgroup);
        }
        Ok(p)
    }
}

/// Parses the metadata and x-coordinate of a compressed encoding without
/// touching the curve equation.
pub(crate) fn parse_compressed<P>(buf: &[u8]) -> Result<CompressedCandidate<P>>
where
    P: SWCurveConfig,
    P::BaseField: CoordinateField,
{
    let size = <P::BaseField as CoordinateField>::SIZE;
    check_len(buf, size)?;
    let largest = match PointMetadata::from_msb(buf[0])? {
        PointMetadata::CompressedInfinity => {
            check_infinity_payload(buf)?;
            return Ok(CompressedCandidate::Infinity);
        }
        PointMetadata::CompressedSmallest => false,
        PointMetadata::CompressedLargest => true,
        _ => return Err(Error::MalformedEncoding(buf[0])),
    };

    let mut x_bytes = [0u8; SIZE_OF_G2_AFFINE_COMPRESSED];
    let x_bytes = &mut x_bytes[..size];
    x_bytes.copy_from_slice(buf);
    x_bytes[0] &= !M_MASK;
    let x = P::BaseField::read_be(x_bytes)?;
    Ok(CompressedCandidate::Point { x, largest })
}

impl<P> PointEncoding for Affine<P>
where
    P: SWCurveConfig,
    P::BaseField: CoordinateField,
{
    const SIZE_COMPRESSED: usize = <P::BaseField as CoordinateField>::SIZE;
    const SIZE_UNCOMPRESSED: usize = 2 * <P::BaseField as CoordinateField>::SIZE;

    fn bytes(&self) -> Vec<u8> {
        if self.infinity {
            let mut out = vec![0u8; Self::SIZE_COMPRESSED];
            out[0] = M_COMPRESSED_INFINITY;
            return out;
        }
        let mut out = self.x.to_be_bytes();
        out[0] |= if self.y.lexicographically_largest() {
            M_COMPRESSED_LARGEST
        } else {
            M_COMPRESSED_SMALLEST
        };
        out
    }

    fn raw_bytes(&self) -> Vec<u8> {
        if self.infinity {
            let mut out = vec![0u8; Self::SIZE_UNCOMPRESSED];
            out[0] = M_UNCOMPRESSED_INFINITY;
            return out;
        }
        // M_UNCOMPRESSED is all zeros, the top bits of x are already clear
        let mut out = self.x.to_be_bytes();
        out.extend(self.y.to_be_bytes());
        out
    }

    fn set_bytes(buf: &[u8]) -> Result<Self> {
        let Some(&msb) = buf.first() else {
            return Err(Error::InvalidLength {
                expected: Self::SIZE_COMPRESSED,
                actual: 0,
            });
        };
        let metadata = PointMetadata::from_msb(msb)?;
        if metadata.is_compressed() {
            return parse_compressed::<P>(buf)?.recover();
        }

        check_len(buf, Self::SIZE_UNCOMPRESSED)?;
        if metadata.is_infinity() {
            check_infinity_payload(buf)?;
            return Ok(Affine::identity());
        }
        let (x, y) = buf.split_at(Self::SIZE_COMPRESSED);
        let x = P::BaseField::read_be(x)?;
        let y = P::BaseField::read_be(y)?;
        validate(Affine::new_unchecked(x, y))
    }
}
