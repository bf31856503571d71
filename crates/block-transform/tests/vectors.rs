//! Known-answer tests and streaming behaviour for AES sessions.

use std::io::Write;

use block_transform::{
    CipherMode, CryptoTransform, CryptoWriter, Direction, Error, PaddingMode, Rijndael,
};

fn key16() -> Vec<u8> {
    (0u8..16).collect()
}

#[test]
fn cbc_pkcs7_known_vectors() {
    let alg = Rijndael::new();
    let iv = [0u8; 16];
    for (plaintext, expected) in [
        (
            vec![0u8; 16],
            "c6a13b37878f5b826f4f8162a1c8d879b1a29273be2c4207a5ace393398cb6fb",
        ),
        (b"ABC".to_vec(), "acd4d698f0965bc9fddd70ba1f99df28"),
        (
            vec![0u8; 24],
            "c6a13b37878f5b826f4f8162a1c8d8796ea94bd1ca5ce1221b88171eb446f514",
        ),
        (
            vec![0u8; 32],
            "c6a13b37878f5b826f4f8162a1c8d879af9d9926f7dac87192b1c4143ad98958\
             81f93de617acc47f8ca968242cee1d99",
        ),
    ] {
        let ct = alg.encrypt(&key16(), &iv, &plaintext).unwrap();
        assert_eq!(hex::encode(&ct), expected);
        assert_eq!(alg.decrypt(&key16(), &iv, &ct).unwrap(), plaintext);
    }
}

#[test]
fn aligned_plaintext_gains_a_full_padding_block() {
    let alg = Rijndael::new();
    for len in [16, 32, 48] {
        let ct = alg.encrypt(&key16(), &[], &vec![9u8; len]).unwrap();
        assert_eq!(ct.len(), len + 16);
    }
    let ct = Rijndael::new()
        .encrypt(&(0u8..32).collect::<Vec<_>>(), &[0u8; 16], &[])
        .unwrap();
    assert_eq!(hex::encode(ct), "9f3b7504926f8bd36e3118e903a4cd4a");
}

#[test]
fn cbc_without_padding_aes256() {
    let key: Vec<u8> = (0u8..32).collect();
    let iv: Vec<u8> = (16u8..32).collect();
    let alg = Rijndael::new().with_padding(PaddingMode::None).unwrap();
    let ct = alg
        .encrypt(&key, &iv, b"The quick brown fox jumps over t")
        .unwrap();
    assert_eq!(
        hex::encode(&ct),
        "b746e4f1bce2352d20440b8a2e0eb8fd68c1fcd0d00fcac779ecaadacde7e51a"
    );
    assert!(matches!(
        alg.encrypt(&key, &iv, b"not aligned"),
        Err(Error::InvalidBlockSize { len: 11, .. })
    ));
}

#[test]
fn aes192_cbc() {
    let key: Vec<u8> = (0u8..24).collect();
    let iv: Vec<u8> = (0u8..16).collect();
    let ct = Rijndael::new().encrypt(&key, &iv, b"hello, rijndael!").unwrap();
    assert_eq!(
        hex::encode(ct),
        "b5be8803564d7fb395907643fa5b4fbdba445d59cc8c084133cebedd5792d630"
    );
}

#[test]
fn ecb_pkcs7() {
    let alg = Rijndael::new().with_mode(CipherMode::Ecb).unwrap();
    let ct = alg.encrypt(&key16(), &[], b"ABC").unwrap();
    assert_eq!(hex::encode(&ct), "acd4d698f0965bc9fddd70ba1f99df28");
    assert_eq!(alg.decrypt(&key16(), &[], &ct).unwrap(), b"ABC");
}

#[test]
fn iv_is_truncated_or_zero_extended() {
    let alg = Rijndael::new();
    let short = alg.encrypt(&key16(), &[0u8; 4], b"ABC").unwrap();
    let long = alg.encrypt(&key16(), &[0u8; 40], b"ABC").unwrap();
    assert_eq!(short, long);
    assert_eq!(hex::encode(short), "acd4d698f0965bc9fddd70ba1f99df28");
}

#[test]
fn block_by_block_matches_one_shot() {
    let alg = Rijndael::new();
    let plaintext: Vec<u8> = (0..100u8).collect();
    let iv = [7u8; 16];
    let expected = alg.encrypt(&key16(), &iv, &plaintext).unwrap();

    let mut enc = alg.create_encryptor(&key16(), &iv).unwrap();
    let mut ct = vec![0u8; 96];
    for i in 0..6 {
        let n = enc
            .transform_block(&plaintext, i * 16, 16, &mut ct, i * 16)
            .unwrap();
        assert_eq!(n, 16);
    }
    ct.extend(enc.transform_final_block(&plaintext, 96, 4).unwrap());
    assert_eq!(ct, expected);

    let mut dec = alg.create_decryptor(&key16(), &iv).unwrap();
    assert_eq!(dec.direction(), Direction::Decrypt);
    let mut pt = vec![0u8; ct.len()];
    let n = dec.transform_block(&ct, 0, 64, &mut pt, 0).unwrap();
    assert_eq!(n, 48);
    let m = dec.transform_block(&ct, 64, 48, &mut pt, n).unwrap();
    assert_eq!(m, 48);
    pt.truncate(n + m);
    pt.extend(dec.transform_final_block(&[], 0, 0).unwrap());
    assert_eq!(pt, plaintext);
}

#[test]
fn writer_streams_odd_sized_chunks() {
    let alg = Rijndael::new();
    let key = [0x42u8; 32];
    let iv = [0x24u8; 16];
    let plaintext: Vec<u8> = (0..1000u32).map(|i| (i * 31 % 251) as u8).collect();
    let expected = alg.encrypt(&key, &iv, &plaintext).unwrap();

    let mut writer = CryptoWriter::new(Vec::new(), alg.create_encryptor(&key, &iv).unwrap());
    for chunk in plaintext.chunks(37) {
        writer.write_all(chunk).unwrap();
    }
    let ct = writer.finish().unwrap();
    assert_eq!(ct, expected);

    let mut writer = CryptoWriter::new(Vec::new(), alg.create_decryptor(&key, &iv).unwrap());
    for chunk in ct.chunks(5) {
        writer.write_all(chunk).unwrap();
    }
    assert_eq!(writer.finish().unwrap(), plaintext);
}

#[test]
fn writer_reports_misaligned_ciphertext() {
    let alg = Rijndael::new();
    let key = [1u8; 16];
    let mut writer = CryptoWriter::new(Vec::new(), alg.create_decryptor(&key, &[]).unwrap());
    writer.write_all(&[0u8; 20]).unwrap();
    assert!(matches!(
        writer.finish(),
        Err(Error::InvalidBlockSize { len: 4, .. })
    ));
}
