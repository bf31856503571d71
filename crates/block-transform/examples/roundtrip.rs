//! Encrypts a message with each key size and decrypts it again.

use block_transform::{KeySize, Rijndael};

fn main() -> Result<(), block_transform::Error> {
    let message = b"Rijndael with a 128-bit block";
    let iv = [0u8; 16];
    let mut alg = Rijndael::new();
    for size in KeySize::ALL {
        alg.set_key_size(size.bits())?;
        let key: Vec<u8> = (0..size.key_len() as u8).collect();
        let ct = alg.encrypt(&key, &iv, message)?;
        let pt = alg.decrypt(&key, &iv, &ct)?;
        println!("AES-{}: {}", alg.key_size(), hex::encode(&ct));
        assert_eq!(pt, message);
    }
    Ok(())
}

