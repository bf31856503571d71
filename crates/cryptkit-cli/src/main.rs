//! Command-line interface for `cryptkit`.

#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, ensure, Context, Result};
use block_transform::{CipherMode, CryptoWriter, KeySize, PaddingMode, Rijndael};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use hash_core::{Crc16, Crc32, HashCore, Hasher, Md5, Md5Core, Xcrc};
use log::{debug, info};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// AES block transforms, MD5 and CRC checksums.
#[derive(Parser)]
#[command(name = "cryptkit", version, about = "AES-CBC/ECB encryption, MD5 and CRC checksums")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the digest of a file (or stdin) as lower-case hex.
    Hash {
        /// Digest or checksum to compute.
        #[arg(short, long, value_enum, default_value_t = Algorithm::Md5)]
        algorithm: Algorithm,
        /// Input file; stdin when omitted.
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Encrypt a file.
    Enc(CipherArgs),
    /// Decrypt a file.
    Dec(CipherArgs),
    /// Check built-in known answers and random round trips.
    Selftest {
        /// Number of random round trips per key size.
        #[arg(long, default_value_t = 16)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Algorithm {
    Md5,
    Crc16,
    Crc32,
    Xcrc,
}

#[derive(Args)]
struct CipherArgs {
    /// AES key as 32, 48 or 64 hex characters.
    #[arg(long, value_name = "HEX")]
    key_hex: String,
    /// IV as hex (zero-extended or truncated to 16 bytes); all zeros when omitted.
    #[arg(long, value_name = "HEX")]
    iv_hex: Option<String>,
    /// Chaining mode (cbc or ecb).
    #[arg(long, default_value = "cbc")]
    mode: CipherMode,
    /// Padding (pkcs7, none or zeros).
    #[arg(long, default_value = "pkcs7")]
    padding: PaddingMode,
    /// Input file.
    #[arg(long, value_name = "FILE")]
    input: PathBuf,
    /// Output file.
    #[arg(long, value_name = "FILE")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Commands::Hash { algorithm, input } => cmd_hash(algorithm, input.as_deref()),
        Commands::Enc(args) => cmd_cipher(&args, true),
        Commands::Dec(args) => cmd_cipher(&args, false),
        Commands::Selftest { samples, seed } => cmd_selftest(samples, seed),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn cmd_hash(algorithm: Algorithm, input: Option<&Path>) -> Result<()> {
    let reader: Box<dyn Read> = match input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let digest = match algorithm {
        Algorithm::Md5 => digest_reader::<Md5Core>(reader)?,
        Algorithm::Crc16 => digest_reader::<hash_core::Crc16Core>(reader)?,
        Algorithm::Crc32 => digest_reader::<hash_core::Crc32Core>(reader)?,
        Algorithm::Xcrc => digest_reader::<hash_core::XcrcCore>(reader)?,
    };
    println!("{}", hex::encode(digest));
    Ok(())
}

fn digest_reader<C: HashCore + Default>(mut reader: impl Read) -> Result<Vec<u8>> {
    let mut hasher = Hasher::<C>::new();
    let n = io::copy(&mut reader, &mut hasher).context("read input")?;
    debug!("{}: hashed {n} bytes", hasher.algorithm_name());
    Ok(hasher.finalize())
}

fn cmd_cipher(args: &CipherArgs, encrypt: bool) -> Result<()> {
    let key = parse_key_hex(&args.key_hex)?;
    let iv = match &args.iv_hex {
        Some(iv_hex) => hex::decode(iv_hex.trim()).context("decode IV hex")?,
        None => vec![0u8; 16],
    };
    let alg = Rijndael::new()
        .with_mode(args.mode)?
        .with_padding(args.padding)?;
    let transform = if encrypt {
        alg.create_encryptor(&key, &iv)?
    } else {
        alg.create_decryptor(&key, &iv)?
    };

    let mut reader = BufReader::new(
        File::open(&args.input).with_context(|| format!("open {}", args.input.display()))?,
    );
    let output = File::create(&args.output)
        .with_context(|| format!("create {}", args.output.display()))?;
    let mut writer = CryptoWriter::new(BufWriter::new(output), transform);
    let n = io::copy(&mut reader, &mut writer)
        .with_context(|| format!("transform {}", args.input.display()))?;
    writer
        .finish()
        .with_context(|| format!("finish {}", args.output.display()))?;
    info!(
        "{} {n} bytes -> {}",
        if encrypt { "encrypted" } else { "decrypted" },
        args.output.display()
    );
    Ok(())
}

const HASH_VECTORS: [(Algorithm, &str, &str); 15] = [
    (Algorithm::Md5, "", "d41d8cd98f00b204e9800998ecf8427e"),
    (Algorithm::Md5, "abc", "900150983cd24fb0d6963f7d28e17f72"),
    (Algorithm::Md5, "message digest", "f96b697d7cb7938d525a2f31aaf161d0"),
    (Algorithm::Crc16, "", "0000"),
    (Algorithm::Crc16, "abc", "9738"),
    (Algorithm::Crc16, "ABC", "4521"),
    (Algorithm::Crc16, "12345678", "3c9d"),
    (Algorithm::Crc32, "", "00000000"),
    (Algorithm::Crc32, "abc", "352441c2"),
    (Algorithm::Crc32, "ABC", "a3830348"),
    (Algorithm::Crc32, "12345678", "9ae0daaf"),
    (Algorithm::Xcrc, "", "6a59"),
    (Algorithm::Xcrc, "abc", "7795"),
    (Algorithm::Xcrc, "ABC", "107d"),
    (Algorithm::Xcrc, "12345678", "8e37"),
];

fn one_shot(algorithm: Algorithm, data: &[u8]) -> Vec<u8> {
    match algorithm {
        Algorithm::Md5 => Md5::new().hash_data(data),
        Algorithm::Crc16 => Crc16::new().hash_data(data),
        Algorithm::Crc32 => Crc32::new().hash_data(data),
        Algorithm::Xcrc => Xcrc::new().hash_data(data),
    }
}

fn cmd_selftest(samples: usize, seed: Option<u64>) -> Result<()> {
    for (algorithm, input, expected) in HASH_VECTORS {
        let actual = hex::encode(one_shot(algorithm, input.as_bytes()));
        if actual != expected {
            bail!("{algorithm:?}({input:?}) = {actual}, expected {expected}");
        }
    }
    info!("{} digest vectors ok", HASH_VECTORS.len());

    let key: Vec<u8> = (0u8..16).collect();
    let ct = Rijndael::new().encrypt(&key, &[0u8; 16], &[0u8; 16])?;
    ensure!(
        hex::encode(&ct[..16]) == "c6a13b37878f5b826f4f8162a1c8d879",
        "AES-CBC known answer mismatch"
    );
    ensure!(ct.len() == 32, "aligned PKCS7 input must gain a padding block");

    let mut rng = seeded_rng(seed);
    for size in KeySize::ALL {
        for _ in 0..samples {
            let mut key = vec![0u8; size.key_len()];
            let mut iv = [0u8; 16];
            rng.fill_bytes(&mut key);
            rng.fill_bytes(&mut iv);
            let mut data = vec![0u8; rng.gen_range(0..256)];
            rng.fill_bytes(&mut data);

            for mode in [CipherMode::Cbc, CipherMode::Ecb] {
                let alg = Rijndael::new().with_mode(mode)?;
                let ct = alg.encrypt(&key, &iv, &data)?;
                if alg.decrypt(&key, &iv, &ct)? != data {
                    bail!("AES-{} {mode} round trip failed", size.bits());
                }
            }
        }
    }
    println!("selftest ok");
    Ok(())
}

fn parse_key_hex(hex_str: &str) -> Result<Vec<u8>> {
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    if KeySize::from_key_len(bytes.len()).is_err() {
        bail!("AES key must be 16, 24 or 32 bytes (got {})", bytes.len());
    }
    Ok(bytes)
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(value) => ChaCha20Rng::seed_from_u64(value),
        None => ChaCha20Rng::from_entropy(),
    }
}
