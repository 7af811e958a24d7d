use serde_json::{json, Value};
use std::path::Path;

use ed25519_core::{KeyPair, Signature};

use crate::vectors::VectorOutcome;

/// Summarize a vector run as JSON.
pub fn build_vector_report(outcomes: &[VectorOutcome]) -> Value {
    let passed = outcomes.iter().filter(|o| o.passed()).count();
    json!({
        "suite":   "RFC 8032 section 7.1",
        "total":   outcomes.len(),
        "passed":  passed,
        "vectors": outcomes,
    })
}

/// Describe one signing operation as JSON. All byte strings are lowercase hex.
///
/// The seed is deliberately left out.
pub fn build_signing_report(
    keypair: &KeyPair,
    message: &[u8],
    signature: &Signature,
    verified: bool,
) -> Value {
    json!({
        "publicKey": hex::encode(keypair.pk.to_bytes()),
        "message":   hex::encode(message),
        "signature": hex::encode(signature.to_bytes()),
        "R":         hex::encode(signature.r),
        "S":         hex::encode(signature.s),
        "verified":  verified,
    })
}

/// Write a report to a file, pretty-printed.
pub fn export_report_json(report: &Value, output_path: &Path) -> std::io::Result<()> {
    let json_str = serde_json::to_string_pretty(report)?;
    std::fs::write(output_path, json_str)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
