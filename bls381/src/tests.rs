use super::*;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::Field;
use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_scalar(rng: &mut StdRng) -> Fr {
    let limbs: [u64; 4] = rng.random();
    let bytes: Vec<u8> = limbs.iter().flat_map(|l| l.to_be_bytes()).collect();
    Fr::from(BigUint::from_bytes_be(&bytes))
}

fn random_g1(rng: &mut StdRng) -> G1Affine {
    (G1Jac::from(G1Affine::generator()) * random_scalar(rng)).into_affine()
}

fn random_g2(rng: &mut StdRng) -> G2Affine {
    (G2Jac::from(G2Affine::generator()) * random_scalar(rng)).into_affine()
}

/// An x-coordinate with no point above it on E.
fn g1_x_without_root() -> Fp {
    let b = parameters().constants.b_curve_coeff;
    let mut x = Fp::from(1u64);
    while (x.square() * x + b).sqrt().is_some() {
        x += Fp::from(1u64);
    }
    x
}

/// An x-coordinate with no point above it on E'.
fn g2_x_without_root() -> Fp2 {
    let b = parameters().constants.b_twist_curve_coeff;
    let mut x = Fp2::new(Fp::from(1u64), Fp::from(1u64));
    while (x.square() * x + b).sqrt().is_some() {
        x.c0 += Fp::from(1u64);
    }
    x
}

/// Overwrites the x-coordinate of a compressed element, keeping its tag.
fn corrupt_compressed<F: CoordinateField>(bytes: &mut [u8], start: usize, x: F) {
    let tag = bytes[start] & 0b1110_0000;
    x.write_be(&mut bytes[start..start + F::SIZE]).unwrap();
    bytes[start] |= tag;
}

const G1_GENERATOR_COMPRESSED: &str = "97f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb";
const G2_GENERATOR_COMPRESSED: &str = "93e02b6052719f607dacd3a088274f65596bd0d09920b61ab5da61bbdc7f5049334cf11213945d57e5ac7d055d042b7e024aa2b2f08f0a91260805272dc51051c6e47ad4fa403b02b4510b647ae3d1770bac0326a805bbefd48056c8c121bdb8";

#[test]
fn test_generator_test_vectors() {
    let (_, _, g1, g2) = generators();
    let g1_bytes = hex::decode(G1_GENERATOR_COMPRESSED).unwrap();
    let g2_bytes = hex::decode(G2_GENERATOR_COMPRESSED).unwrap();
    assert_eq!(g1.bytes(), g1_bytes);
    assert_eq!(g2.bytes(), g2_bytes);
    assert_eq!(G1Affine::set_bytes(&g1_bytes).unwrap(), g1);
    assert_eq!(G2Affine::set_bytes(&g2_bytes).unwrap(), g2);
}

#[test]
fn test_compressed_generator_scenario() {
    let (_, _, g1, _) = generators();
    let mut enc = Encoder::new(Vec::new());
    enc.encode(&g1).unwrap();
    let bytes = enc.into_inner();

    let metadata = PointMetadata::from_msb(bytes[0]).unwrap();
    assert!(matches!(
        metadata,
        PointMetadata::CompressedSmallest | PointMetadata::CompressedLargest
    ));

    let mut decoded = G1Affine::identity();
    Decoder::new(bytes.as_slice()).decode(&mut decoded).unwrap();
    assert_eq!(decoded.x, g1.x);
    assert_eq!(decoded.y, g1.y);
}

#[test]
fn test_round_trip_both_modes() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut g1s: Vec<G1Affine> = (0..16).map(|_| random_g1(&mut rng)).collect();
    let mut g2s: Vec<G2Affine> = (0..8).map(|_| random_g2(&mut rng)).collect();
    g1s.push(G1Affine::identity());
    g2s.insert(3, G2Affine::identity());

    for raw in [false, true] {
        let mut enc = Encoder::with_config(Vec::new(), EncoderConfig { raw });
        for p in &g1s {
            enc.encode(p).unwrap();
        }
        for p in &g2s {
            enc.encode(p).unwrap();
        }
        let written = enc.bytes_written();
        let bytes = enc.into_inner();
        assert_eq!(written, bytes.len() as u64);

        let mut dec = Decoder::new(bytes.as_slice());
        for p in &g1s {
            let mut q = G1Affine::identity();
            dec.decode(&mut q).unwrap();
            assert_eq!(&q, p);
        }
        for p in &g2s {
            let mut q = G2Affine::identity();
            dec.decode(&mut q).unwrap();
            assert_eq!(&q, p);
        }
        assert_eq!(dec.bytes_read(), written);
    }
}

#[test]
fn test_mixed_stream() {
    let mut rng = StdRng::seed_from_u64(7);
    let g1s: Vec<G1Affine> = (0..5).map(|_| random_g1(&mut rng)).collect();
    let g2s: Vec<G2Affine> = (0..3).map(|_| random_g2(&mut rng)).collect();
    let fr = random_scalar(&mut rng);
    let fp = Fp::from(123456789u64);

    for options in [vec![], vec![EncoderOption::RawEncoding]] {
        let mut enc = Encoder::with_options(Vec::new(), options);
        enc.encode(&u64::MAX).unwrap();
        enc.encode(&fr).unwrap();
        enc.encode(&fp).unwrap();
        enc.encode(&g1s).unwrap();
        enc.encode(g2s.as_slice()).unwrap();
        enc.encode(&g1s[0]).unwrap();
        let written = enc.bytes_written();
        let bytes = enc.into_inner();

        let mut dec = Decoder::new(bytes.as_slice());
        let mut n = 0u64;
        let mut fr2 = Fr::from(0u64);
        let mut fp2 = Fp::from(0u64);
        let mut g1s2: Vec<G1Affine> = Vec::new();
        let mut g2s2: Vec<G2Affine> = Vec::new();
        let mut single = G1Affine::identity();
        dec.decode(&mut n).unwrap();
        dec.decode(&mut fr2).unwrap();
        dec.decode(&mut fp2).unwrap();
        dec.decode(&mut g1s2).unwrap();
        dec.decode(&mut g2s2).unwrap();
        dec.decode(&mut single).unwrap();

        assert_eq!(n, u64::MAX);
        assert_eq!(fr2, fr);
        assert_eq!(fp2, fp);
        assert_eq!(g1s2, g1s);
        assert_eq!(g2s2, g2s);
        assert_eq!(single, g1s[0]);
        assert_eq!(dec.bytes_read(), written);
    }
}

fn mixed_batch(points: &[G2Affine], rng: &mut StdRng) -> Vec<u8> {
    let mut bytes = (points.len() as u32).to_be_bytes().to_vec();
    for p in points {
        if rng.random::<bool>() {
            bytes.extend(p.raw_bytes());
        } else {
            bytes.extend(p.bytes());
        }
    }
    bytes
}

#[test]
fn test_batch_with_mixed_forms() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut points: Vec<G2Affine> = (0..40).map(|_| random_g2(&mut rng)).collect();
    points[17] = G2Affine::identity();
    let bytes = mixed_batch(&points, &mut rng);

    let mut dec = Decoder::new(bytes.as_slice());
    let mut decoded: Vec<G2Affine> = Vec::new();
    dec.decode(&mut decoded).unwrap();
    assert_eq!(decoded, points);
    assert_eq!(dec.bytes_read(), bytes.len() as u64);
}

#[test]
fn test_batch_reports_decompression_failure() {
    let mut rng = StdRng::seed_from_u64(3);
    let points: Vec<G1Affine> = (0..64).map(|_| random_g1(&mut rng)).collect();
    let mut enc = Encoder::new(Vec::new());
    enc.encode(&points).unwrap();
    let mut bytes = enc.into_inner();

    let bad_x = g1_x_without_root();
    for index in [5usize, 50] {
        corrupt_compressed(&mut bytes, 4 + index * SIZE_OF_G1_AFFINE_COMPRESSED, bad_x);
    }

    let mut dec = Decoder::new(bytes.as_slice());
    let mut decoded: Vec<G1Affine> = Vec::new();
    let err = dec.decode(&mut decoded).unwrap_err();
    assert!(matches!(err, Error::PointDecompressionFailed { failures: 2 }));
    assert_eq!(dec.bytes_read(), bytes.len() as u64);
    assert!(decoded.is_empty());
}

#[test]
fn test_g2_batch_reports_decompression_failure() {
    let mut rng = StdRng::seed_from_u64(5);
    let points: Vec<G2Affine> = (0..12).map(|_| random_g2(&mut rng)).collect();
    let mut enc = Encoder::new(Vec::new());
    enc.encode(&points).unwrap();
    let mut bytes = enc.into_inner();
    corrupt_compressed(
        &mut bytes,
        4 + 7 * SIZE_OF_G2_AFFINE_COMPRESSED,
        g2_x_without_root(),
    );

    let mut dec = Decoder::new(bytes.as_slice());
    let mut decoded: Vec<G2Affine> = Vec::new();
    let err = dec.decode(&mut decoded).unwrap_err();
    assert!(matches!(err, Error::PointDecompressionFailed { failures: 1 }));
    assert_eq!(dec.bytes_read(), bytes.len() as u64);
    assert!(decoded.is_empty());
}

#[test]
fn test_batch_rejects_bad_uncompressed_element_immediately() {
    let mut rng = StdRng::seed_from_u64(9);
    let points: Vec<G1Affine> = (0..4).map(|_| random_g1(&mut rng)).collect();
    let mut enc = Encoder::with_options(Vec::new(), [EncoderOption::RawEncoding]);
    enc.encode(&points).unwrap();
    let mut bytes = enc.into_inner();
    // flip a bit of the second element's y
    bytes[4 + 2 * SIZE_OF_G1_AFFINE_UNCOMPRESSED - 1] ^= 1;

    let mut dec = Decoder::new(bytes.as_slice());
    let mut decoded: Vec<G1Affine> = Vec::new();
    assert!(matches!(
        dec.decode(&mut decoded),
        Err(Error::PointNotOnCurve)
    ));
    assert_eq!(
        dec.bytes_read(),
        (4 + 2 * SIZE_OF_G1_AFFINE_UNCOMPRESSED) as u64
    );
}

#[test]
fn test_rejects_point_outside_subgroup() {
    // points of E(Fp) outside G1 exist since the cofactor is not 1
    let b = parameters().constants.b_curve_coeff;
    let mut x = Fp::from(1u64);
    let p = loop {
        if let Some(y) = (x.square() * x + b).sqrt() {
            let p = G1Affine::new_unchecked(x, y);
            if !p.is_in_correct_subgroup_assuming_on_curve() {
                break p;
            }
        }
        x += Fp::from(1u64);
    };
    assert!(matches!(
        G1Affine::set_bytes(&p.raw_bytes()),
        Err(Error::PointNotInSubgroup)
    ));
    assert!(matches!(
        G1Affine::set_bytes(&p.bytes()),
        Err(Error::PointNotInSubgroup)
    ));
}

#[test]
fn test_glv_split_with_process_parameters() {
    let glv = &parameters().glv;
    let r = num_bigint::BigInt::from(BigUint::from(<Fr as ark_ff::PrimeField>::MODULUS));
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..10 {
        let k: BigUint = random_scalar(&mut rng).into();
        let k = num_bigint::BigInt::from(k);
        let (k1, k2) = glv.basis.split_scalar(&k);
        let recombined = (k1 + k2 * &glv.lambda - &k) % &r;
        assert_eq!(recombined, num_bigint::BigInt::from(0));
    }
}
