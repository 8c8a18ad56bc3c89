//! Model signing utility.
//!
//! Creates a signed manifest (`manifest.json`) and Ed25519 signature
//! (`model.sig`) for the model files in a directory, so the application can
//! verify them at startup.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin sign_model -- <model_dir> [--serial <n>]
//! cargo run --bin sign_model -- --generate-key <out_dir> [--force]
//! ```
//!
//! The signing seed (base64, 32 bytes) is read from the file named by
//! `CARDIOGATE_MODEL_SIGNING_KEY_B64_FILE`. Point
//! `CARDIOGATE_MODEL_PUBKEY_B64_FILE` at the generated `verifying_key.b64`
//! when running the application.

use std::env;
use std::fs;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use base64::engine::general_purpose;
use base64::Engine;
use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use cardiogate::adapters::model::sign_model_dir;

const KEY_FILE_ENV: &str = "CARDIOGATE_MODEL_SIGNING_KEY_B64_FILE";
const SEED_FILE: &str = "signing_key.b64";
const PUBKEY_FILE: &str = "verifying_key.b64";

#[derive(Zeroize, ZeroizeOnDrop)]
struct Seed([u8; 32]);

enum Command {
    Sign { model_dir: PathBuf, serial: Option<u64> },
    GenerateKey { out_dir: PathBuf, force: bool },
}

fn usage() -> anyhow::Error {
    anyhow!(
        "Usage: sign_model <model_dir> [--serial <u64>]\n       sign_model --generate-key <out_dir> [--force]"
    )
}

fn parse_args() -> Result<Command> {
    let mut args = env::args().skip(1);
    let mut positional: Option<PathBuf> = None;
    let mut serial: Option<u64> = None;
    let mut generate = false;
    let mut force = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--serial" => {
                let v = args.next().ok_or_else(usage)?;
                serial = Some(v.trim().parse().context("--serial must be a u64")?);
            }
            "--generate-key" => generate = true,
            "--force" => force = true,
            "-h" | "--help" => return Err(usage()),
            _ => {
                if positional.is_none() {
                    positional = Some(PathBuf::from(arg));
                } else {
                    return Err(usage());
                }
            }
        }
    }

    let path = positional.ok_or_else(usage)?;
    Ok(if generate {
        Command::GenerateKey {
            out_dir: path,
            force,
        }
    } else {
        Command::Sign {
            model_dir: path,
            serial,
        }
    })
}

fn read_signing_seed() -> Result<Seed> {
    let path = env::var(KEY_FILE_ENV)
        .map_err(|_| anyhow!("Missing signing key: set {KEY_FILE_ENV} to a base64 seed file"))?;
    let content = Zeroizing::new(
        fs::read_to_string(path.trim()).context("Failed reading signing key file")?,
    );

    let raw = Zeroizing::new(
        general_purpose::STANDARD
            .decode(content.trim())
            .context("Invalid base64 in signing key")?,
    );
    let bytes: [u8; 32] = raw.as_slice().try_into().map_err(|_| {
        anyhow!(
            "Signing key seed must be 32 bytes after base64 decode (got {})",
            raw.len()
        )
    })?;
    Ok(Seed(bytes))
}

fn write_key_file(path: &Path, content: &str, mode: u32, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("Refusing to overwrite existing file {path:?}. Use --force.");
    }

    let mut opts = fs::OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        opts.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let mut file = opts
        .open(path)
        .with_context(|| format!("Failed to open {path:?}"))?;
    file.write_all(content.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}

fn generate_key(out_dir: &Path, force: bool) -> Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("Failed to create {out_dir:?}"))?;

    let mut seed = Seed([0u8; 32]);
    OsRng.fill_bytes(&mut seed.0);
    let verifying_key = SigningKey::from_bytes(&seed.0).verifying_key();

    let seed_b64 = Zeroizing::new(general_purpose::STANDARD.encode(&seed.0));
    let pub_b64 = general_purpose::STANDARD.encode(verifying_key.as_bytes());

    let seed_path = out_dir.join(SEED_FILE);
    let pub_path = out_dir.join(PUBKEY_FILE);
    write_key_file(&seed_path, &seed_b64, 0o600, force)?;
    write_key_file(&pub_path, &pub_b64, 0o644, force)?;

    // Only non-secret material is printed.
    println!("Wrote signing seed to {seed_path:?}");
    println!("Wrote verifying key to {pub_path:?}");
    println!("Verifying key (base64)={pub_b64}");
    Ok(())
}

fn sign(model_dir: &Path, serial: Option<u64>) -> Result<()> {
    let model_dir = if model_dir.is_file() {
        model_dir
            .parent()
            .ok_or_else(|| anyhow!("Model path has no parent directory"))?
    } else {
        model_dir
    };

    let seed = read_signing_seed()?;
    let signing_key = SigningKey::from_bytes(&seed.0);
    let serial = serial.unwrap_or_else(|| chrono::Utc::now().timestamp().max(1) as u64);

    let manifest = sign_model_dir(model_dir, &signing_key, serial)
        .with_context(|| format!("Failed to sign {model_dir:?}"))?;

    for (name, digest) in &manifest.files {
        println!("Bound {name} sha256={digest}");
    }
    println!(
        "Verifying key (base64)={}",
        general_purpose::STANDARD.encode(signing_key.verifying_key().as_bytes())
    );
    Ok(())
}

fn main() -> Result<()> {
    match parse_args()? {
        Command::Sign { model_dir, serial } => sign(&model_dir, serial),
        Command::GenerateKey { out_dir, force } => generate_key(&out_dir, force),
    }
}
