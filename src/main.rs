use std::process;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

use textbook_rsa::rsa::{
    decrypt_from_base64, encrypt_to_base64, BlockMode, KeyGenerator, RsaCipher, RsaConfig,
};

const DEFAULT_MESSAGE: &str = "Ceci est un message de test très secret pour le TP RSA.";

/// Generate an RSA key pair, encrypt a message, decrypt it and compare
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Key size in bits
    #[arg(short, long, default_value_t = 1024)]
    bits: u32,

    /// Message to encrypt
    #[arg(short, long, default_value = DEFAULT_MESSAGE)]
    message: String,

    /// Length-prefix every block so leading zero bytes survive
    #[arg(long)]
    strict: bool,

    /// Seed for reproducible key material
    #[arg(long)]
    seed: Option<u64>,
}

fn truncate(text: &str, len: usize) -> String {
    match text.char_indices().nth(len) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

fn run(args: Args) -> Result<bool> {
    let mode = if args.strict {
        BlockMode::LengthPrefixed
    } else {
        BlockMode::StripZeros
    };
    let config = RsaConfig::default().with_key_size(args.bits).with_block_mode(mode);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    println!("### RSA key generation ({} bits) ###", args.bits);
    let keypair = KeyGenerator::new(config)
        .context("invalid configuration")?
        .generate(&mut rng)
        .context("key generation failed")?;

    let n_hex = hex::encode(keypair.public_key.n.to_bytes_be());
    println!("\n[Public key (n, e)]");
    println!("n (modulus, start): {}", truncate(&n_hex, 30));
    println!("e: {}", keypair.public_key.e);
    println!("\n[Private key (n, d)]");
    println!("d (start): {}", truncate(&keypair.private_key.d.to_string(), 30));
    println!("{}", "-".repeat(50));

    println!("Plaintext: '{}'", args.message);
    let cipher = RsaCipher::for_keypair(&keypair);

    let encoded = encrypt_to_base64(&cipher, &args.message, &keypair.public_key)?;
    println!("\nCiphertext (base64):\n{}", truncate(&encoded, 50));

    let decrypted = decrypt_from_base64(&cipher, &encoded, &keypair.private_key)?;
    if !decrypted.is_complete() {
        bail!("{} ciphertext block(s) could not be decoded", decrypted.failed_blocks());
    }
    println!("\nDecrypted:\n'{}'", decrypted.text);
    info!("round trip over {} base64 characters", encoded.len());

    Ok(decrypted.text == args.message)
}

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    match run(Args::parse()) {
        Ok(true) => println!("\nSUCCESS: RSA encryption round trip works."),
        Ok(false) => {
            println!("\nFAILURE: the decrypted message does not match.");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
