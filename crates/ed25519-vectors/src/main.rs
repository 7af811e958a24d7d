use ed25519_core::{verify, KeyPair, Signature};
use ed25519_vectors::{logger, report_builder, vectors};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;

fn usage() {
    eprintln!("Usage: ed25519-vectors [OPTIONS]");
    eprintln!("  --vectors         Run the RFC 8032 test vectors (default)");
    eprintln!("  --seed, -s HEX    Sign with the key derived from a 32-byte hex seed");
    eprintln!("  --message, -m HEX Message to sign, as hex (default: empty)");
    eprintln!("  --output, -o PATH Also write the JSON report to PATH");
    eprintln!("  --verbose, -v     Debug logging on stderr");
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let mut seed: Option<String> = None;
    let mut message = String::new();
    let mut output: Option<PathBuf> = None;
    let mut verbose = false;

    // Simple argument parsing
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--vectors" => seed = None,
            "--seed" | "-s" => {
                i += 1;
                if i < args.len() {
                    seed = Some(args[i].clone());
                }
            }
            "--message" | "-m" => {
                i += 1;
                if i < args.len() {
                    message = args[i].clone();
                }
            }
            "--output" | "-o" => {
                i += 1;
                if i < args.len() {
                    output = Some(PathBuf::from(&args[i]));
                }
            }
            "--verbose" | "-v" => verbose = true,
            "--help" | "-h" => {
                usage();
                return ExitCode::SUCCESS;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                usage();
                return ExitCode::FAILURE;
            }
        }
        i += 1;
    }

    logger::init(verbose);

    let result = match seed {
        Some(seed) => sign_one(&seed, &message),
        None => run_vectors(),
    };

    let (report, ok) = match result {
        Ok(done) => done,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = output {
        eprintln!("Exporting report JSON to {:?}...", &path);
        if let Some(parent) = path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                eprintln!("error: failed to create output directory: {err}");
                return ExitCode::FAILURE;
            }
        }
        if let Err(err) = report_builder::export_report_json(&report, &path) {
            eprintln!("error: failed to write report: {err}");
            return ExitCode::FAILURE;
        }
    }

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Run the built-in vectors, printing one line per vector like the
/// reference script: name, signature matches, public key matches, verifies.
fn run_vectors() -> Result<(Value, bool), String> {
    eprintln!("Running RFC 8032 test vectors...");
    let outcomes = vectors::run_all().map_err(|e| e.to_string())?;

    for outcome in &outcomes {
        println!(
            "{:15} {} {} {}",
            outcome.name, outcome.signature_matches, outcome.public_key_matches, outcome.verified
        );
    }

    let ok = outcomes.iter().all(|o| o.passed());
    if ok {
        eprintln!("  ✓ all {} vectors pass", outcomes.len());
    } else {
        eprintln!("  ✗ some vectors failed");
    }
    Ok((report_builder::build_vector_report(&outcomes), ok))
}

fn sign_one(seed_hex: &str, message_hex: &str) -> Result<(Value, bool), String> {
    let seed = hex::decode(seed_hex).map_err(|e| format!("seed: {e}"))?;
    let message = hex::decode(message_hex).map_err(|e| format!("message: {e}"))?;

    eprintln!("[1/3] Deriving key pair...");
    let keypair = KeyPair::derive(&seed).map_err(|e| e.to_string())?;
    eprintln!("  A = {}", hex::encode(keypair.pk.to_bytes()));

    eprintln!("[2/3] Signing {} byte message...", message.len());
    let sig = Signature::sign(&keypair, &message);

    eprintln!("[3/3] Verifying signature...");
    let verified = verify(&keypair.pk, &sig.to_bytes(), &message).map_err(|e| e.to_string())?;
    if verified {
        eprintln!("  ✓ Signature valid");
    } else {
        eprintln!("  ✗ Signature did not verify");
    }

    let report = report_builder::build_signing_report(&keypair, &message, &sig, verified);
    // Also print the JSON to stdout for inspection
    println!(
        "{}",
        serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?
    );
    Ok((report, verified))
}
