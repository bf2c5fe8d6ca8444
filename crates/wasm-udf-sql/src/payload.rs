//! Loading and text-encoding the compiled module.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use base64::prelude::*;
use log::debug;

/// Read the complete contents of a WebAssembly file.
pub fn read_wasm(path: &Path) -> Result<Vec<u8>> {
    let wasm = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    debug!("read {} bytes from {}", wasm.len(), path.display());
    Ok(wasm)
}

/// Encode module bytes as RFC 4648 base64 (standard alphabet, padded).
///
/// Empty input encodes to the empty string.
pub fn encode_wasm(wasm: &[u8]) -> String {
    BASE64_STANDARD.encode(wasm)
}
