//! Stream encoder and decoder for BLS12-381 objects.
//!
//! Supported values are `u64`, [`Fr`], [`Fp`], single G1/G2 affine points and
//! sequences of them. Points are compressed by default; an encoder built
//! with [`EncoderOption::RawEncoding`] writes them uncompressed. Scalars and
//! field elements are written the same way in both modes.
//!
//! A sequence is a 4-byte big-endian length followed by its elements. Each
//! element describes its own form through its metadata byte, so a decoder
//! accepts sequences that mix compressed and uncompressed points.

use std::io::{self, Read, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use ark_ec::short_weierstrass::{Affine, SWCurveConfig};
use log::{trace, warn};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::fields::{
    prime_read_be, prime_to_be_bytes, CoordinateField, Fp, Fr, SIZE_OF_FP, SIZE_OF_FR,
};
use crate::parallel;
use crate::point::{
    parse_compressed, CompressedCandidate, PointEncoding, PointMetadata,
    SIZE_OF_G2_AFFINE_UNCOMPRESSED,
};

/// Options accepted by [`Encoder::with_options`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EncoderOption {
    /// Write points uncompressed (x and y).
    RawEncoding,
}

/// Encoder settings, for callers that keep them in their own configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Write points uncompressed.
    #[serde(default)]
    pub raw: bool,
}

impl EncoderConfig {
    fn apply(&mut self, option: EncoderOption) {
        match option {
            EncoderOption::RawEncoding => self.raw = true,
        }
    }
}

/// Writes BLS12-381 values to an output stream.
///
/// # Example
///
/// ```
/// use bls381::{generators, Decoder, Encoder, G1Affine};
///
/// let (_, _, g1, _) = generators();
///
/// let mut enc = Encoder::new(Vec::new());
/// enc.encode(&g1)?;
/// assert_eq!(enc.bytes_written(), 48);
///
/// let bytes = enc.into_inner();
/// let mut dec = Decoder::new(bytes.as_slice());
/// let mut p = G1Affine::identity();
/// dec.decode(&mut p)?;
/// assert_eq!(p, g1);
/// # Ok::<(), bls381::Error>(())
/// ```
pub struct Encoder<W: Write> {
    w: W,
    n: u64,
    raw: bool,
}

impl<W: Write> Encoder<W> {
    /// Creates an encoder that compresses points.
    pub fn new(w: W) -> Self {
        Self::with_config(w, EncoderConfig::default())
    }

    /// Creates an encoder, applying `options` in order.
    pub fn with_options<I>(w: W, options: I) -> Self
    where
        I: IntoIterator<Item = EncoderOption>,
    {
        let mut config = EncoderConfig::default();
        for option in options {
            config.apply(option);
        }
        Self::with_config(w, config)
    }

    /// Creates an encoder from a deserialized [`EncoderConfig`].
    pub fn with_config(w: W, config: EncoderConfig) -> Self {
        Encoder {
            w,
            n: 0,
            raw: config.raw,
        }
    }

    /// Writes the binary encoding of `v`.
    pub fn encode<T: Encode + ?Sized>(&mut self, v: &T) -> Result<()> {
        v.encode_to(self)
    }

    /// Total number of bytes written to the underlying writer.
    pub fn bytes_written(&self) -> u64 {
        self.n
    }

    /// Whether points are written uncompressed.
    pub fn is_raw(&self) -> bool {
        self.raw
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.w
    }

    // `write_all` loses the count of a partial write, so track every chunk.
    fn write_bytes(&mut self, mut buf: &[u8]) -> Result<()> {
        while !buf.is_empty() {
            match self.w.write(buf) {
                Ok(0) => return Err(io::Error::from(io::ErrorKind::WriteZero).into()),
                Ok(written) => {
                    self.n += written as u64;
                    buf = &buf[written..];
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    fn write_point<T: PointEncoding>(&mut self, p: &T) -> Result<()> {
        let buf = if self.raw { p.raw_bytes() } else { p.bytes() };
        self.write_bytes(&buf)
    }

    fn write_points<T: PointEncoding>(&mut self, points: &[T]) -> Result<()> {
        let len = u32::try_from(points.len()).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "sequence longer than u32::MAX")
        })?;
        self.write_bytes(&len.to_be_bytes())?;
        for p in points {
            self.write_point(p)?;
        }
        Ok(())
    }
}

/// Reads BLS12-381 values from an input stream.
pub struct Decoder<R: Read> {
    r: R,
    n: u64,
}

impl<R: Read> Decoder<R> {
    /// Creates a decoder reading from `r`.
    pub fn new(r: R) -> Self {
        Decoder { r, n: 0 }
    }

    /// Reads the binary encoding of `v` from the stream.
    ///
    /// On error `v` is left unchanged; [`Self::bytes_read`] still reports
    /// everything consumed so far.
    pub fn decode<T: Decode + ?Sized>(&mut self, v: &mut T) -> Result<()> {
        v.decode_from(self)
    }

    /// Total number of bytes consumed from the underlying reader.
    pub fn bytes_read(&self) -> u64 {
        self.n
    }

    /// Returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.r
    }

    fn read_bytes(&mut self, mut buf: &mut [u8]) -> Result<()> {
        while !buf.is_empty() {
            match self.r.read(buf) {
                Ok(0) => return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into()),
                Ok(read) => {
                    self.n += read as u64;
                    buf = &mut buf[read..];
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    fn read_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_bytes(&mut buf)?;
        Ok(u32::from_be_bytes(buf))
    }

    fn read_u64(&mut self) -> Result<u64> {
        let mut buf = [0u8; 8];
        self.read_bytes(&mut buf)?;
        Ok(u64::from_be_bytes(buf))
    }

    /// Reads one point encoding into `buf`: the compressed size first, then
    /// the rest of the uncompressed size if the metadata asks for it.
    fn read_point_bytes<T: PointEncoding>(
        &mut self,
        buf: &mut [u8],
    ) -> Result<(PointMetadata, usize)> {
        self.read_bytes(&mut buf[..T::SIZE_COMPRESSED])?;
        let metadata = PointMetadata::from_msb(buf[0])?;
        if metadata.is_compressed() {
            return Ok((metadata, T::SIZE_COMPRESSED));
        }
        self.read_bytes(&mut buf[T::SIZE_COMPRESSED..T::SIZE_UNCOMPRESSED])?;
        Ok((metadata, T::SIZE_UNCOMPRESSED))
    }
}

/// A value the [`Encoder`] knows how to write.
pub trait Encode {
    fn encode_to<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()>;
}

/// A value the [`Decoder`] knows how to read in place.
pub trait Decode {
    fn decode_from<R: Read>(&mut self, dec: &mut Decoder<R>) -> Result<()>;
}

impl Encode for u64 {
    fn encode_to<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.write_bytes(&self.to_be_bytes())
    }
}

impl Encode for Fr {
    fn encode_to<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.write_bytes(&prime_to_be_bytes(self, SIZE_OF_FR))
    }
}

impl Encode for Fp {
    fn encode_to<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.write_bytes(&self.to_be_bytes())
    }
}

impl<P> Encode for Affine<P>
where
    P: SWCurveConfig,
    P::BaseField: CoordinateField,
{
    fn encode_to<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.write_point(self)
    }
}

impl<P> Encode for [Affine<P>]
where
    P: SWCurveConfig,
    P::BaseField: CoordinateField,
{
    fn encode_to<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.write_points(self)
    }
}

impl<P> Encode for Vec<Affine<P>>
where
    P: SWCurveConfig,
    P::BaseField: CoordinateField,
{
    fn encode_to<W: Write>(&self, enc: &mut Encoder<W>) -> Result<()> {
        enc.write_points(self)
    }
}

impl Decode for u64 {
    fn decode_from<R: Read>(&mut self, dec: &mut Decoder<R>) -> Result<()> {
        *self = dec.read_u64()?;
        Ok(())
    }
}

/// Arbitrary precision integers travel as 8-byte big-endian words.
impl Decode for BigUint {
    fn decode_from<R: Read>(&mut self, dec: &mut Decoder<R>) -> Result<()> {
        let mut buf = [0u8; 8];
        dec.read_bytes(&mut buf)?;
        *self = BigUint::from_bytes_be(&buf);
        Ok(())
    }
}

impl Decode for Fr {
    fn decode_from<R: Read>(&mut self, dec: &mut Decoder<R>) -> Result<()> {
        let mut buf = [0u8; SIZE_OF_FR];
        dec.read_bytes(&mut buf)?;
        *self = prime_read_be(&buf, SIZE_OF_FR)?;
        Ok(())
    }
}

impl Decode for Fp {
    fn decode_from<R: Read>(&mut self, dec: &mut Decoder<R>) -> Result<()> {
        let mut buf = [0u8; SIZE_OF_FP];
        dec.read_bytes(&mut buf)?;
        *self = Fp::read_be(&buf)?;
        Ok(())
    }
}

impl<P> Decode for Affine<P>
where
    P: SWCurveConfig,
    P::BaseField: CoordinateField,
{
    fn decode_from<R: Read>(&mut self, dec: &mut Decoder<R>) -> Result<()> {
        let mut buf = [0u8; SIZE_OF_G2_AFFINE_UNCOMPRESSED];
        let (_, size) = dec.read_point_bytes::<Self>(&mut buf)?;
        *self = Self::set_bytes(&buf[..size])?;
        Ok(())
    }
}

impl<P> Decode for Vec<Affine<P>>
where
    P: SWCurveConfig,
    P::BaseField: CoordinateField,
{
    /// Element sizes are only known after reading each metadata byte, so
    /// the stream is read sequentially. Uncompressed elements are validated
    /// on the spot; compressed ones are recovered afterwards, in parallel.
    fn decode_from<R: Read>(&mut self, dec: &mut Decoder<R>) -> Result<()> {
        let len = dec.read_u32()? as usize;
        let mut buf = [0u8; SIZE_OF_G2_AFFINE_UNCOMPRESSED];

        let mut slots: Vec<(Affine<P>, Option<CompressedCandidate<P>>)> = Vec::new();
        for _ in 0..len {
            let (metadata, size) = dec.read_point_bytes::<Affine<P>>(&mut buf)?;
            let encoded = &buf[..size];
            if metadata.is_compressed() {
                slots.push((Affine::identity(), Some(parse_compressed::<P>(encoded)?)));
            } else {
                slots.push((Affine::set_bytes(encoded)?, None));
            }
        }
        trace!(
            "read {} points, {} pending decompression",
            len,
            slots.iter().filter(|(_, pending)| pending.is_some()).count()
        );

        let failures = AtomicU64::new(0);
        parallel::execute(&mut slots, |_, chunk| {
            for (point, pending) in chunk.iter_mut() {
                let Some(candidate) = pending.take() else {
                    continue;
                };
                match candidate.recover() {
                    Ok(p) => *point = p,
                    Err(_) => {
                        failures.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }
        });

        let failures = failures.into_inner();
        if failures != 0 {
            warn!("point decompression failed for {failures} of {len} elements");
            return Err(Error::PointDecompressionFailed { failures });
        }
        *self = slots.into_iter().map(|(p, _)| p).collect();
        Ok(())
    }
}
