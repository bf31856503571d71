//! Incremental and reuse behaviour common to every algorithm.

use std::io::{self, Read, Write};

use hash_core::{Crc16, Crc32, Error, HashCore, Hasher, Md5, Xcrc};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn split_equivalence<C: HashCore + Default>(rng: &mut ChaCha20Rng) {
    let mut hasher = Hasher::<C>::new();
    for _ in 0..32 {
        let len = rng.gen_range(0..600);
        let mut data = vec![0u8; len];
        rng.fill_bytes(&mut data);

        let whole = hasher.compute_hash(&data);

        let mut rest = &data[..];
        while !rest.is_empty() {
            let take = rng.gen_range(0..=rest.len().min(130));
            hasher.update(&rest[..take]);
            rest = &rest[take..];
        }
        assert_eq!(hasher.finalize(), whole, "{} len {len}", C::ALGORITHM);
    }
}

#[test]
fn chunked_updates_match_one_shot() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x5eed);
    split_equivalence::<hash_core::Md5Core>(&mut rng);
    split_equivalence::<hash_core::Crc16Core>(&mut rng);
    split_equivalence::<hash_core::Crc32Core>(&mut rng);
    split_equivalence::<hash_core::XcrcCore>(&mut rng);
}

#[test]
fn instances_are_reusable_after_finalize() {
    let mut md5 = Md5::new();
    let first = md5.compute_hash(b"abc");
    let second = md5.compute_hash(b"abc");
    assert_eq!(first, second);
    assert_eq!(md5.hash(), first.as_slice());

    let mut crc = Crc32::new();
    assert_eq!(crc.compute_hash(b"ABC"), crc.compute_hash(b"ABC"));
}

#[test]
fn hash_is_zero_until_first_digest() {
    assert_eq!(Md5::new().hash(), &[0u8; 16]);
    assert_eq!(Crc16::new().hash(), &[0u8; 2]);
    assert_eq!(Crc32::new().hash(), &[0u8; 4]);
    assert_eq!(Xcrc::new().hash(), &[0u8; 2]);
}

#[test]
fn out_of_range_updates_are_rejected() {
    let mut crc = Crc16::new();
    assert_eq!(
        crc.update_range(b"abc", 1, 3),
        Err(Error::OutOfRange {
            offset: 1,
            count: 3,
            len: 3
        })
    );
    crc.update_range(b"xabcx", 1, 3).unwrap();
    assert_eq!(hex::encode(crc.finalize()), "9738");
}

#[test]
fn hashers_are_io_writers() {
    let mut md5 = Md5::new();
    let mut source = io::repeat(b'a').take(1_000_000);
    io::copy(&mut source, &mut md5).unwrap();
    md5.flush().unwrap();
    assert_eq!(hex::encode(md5.finalize()), "7707d6ae4e027c70eea2a935c2296f21");

    let mut xcrc = Xcrc::new();
    write!(xcrc, "1234{}", 5678).unwrap();
    assert_eq!(hex::encode(xcrc.finalize()), "8e37");
}

#[test]
fn names_and_sizes() {
    assert_eq!(Md5::new().algorithm_name(), "MD5");
    assert_eq!(Crc16::new().algorithm_name(), "CRC16");
    assert_eq!(Crc32::new().algorithm_name(), "CRC32");
    assert_eq!(Xcrc::new().algorithm_name(), "XCRC");
    assert_eq!(Crc16::new().hash_size(), 16);
    assert_eq!(Crc32::new().hash_size(), 32);
}
