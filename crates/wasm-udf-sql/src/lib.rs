//! Registration SQL for WebAssembly user-defined functions.
//!
//! Turns a compiled WebAssembly module into a `CREATE FUNCTION` statement
//! that a database engine can execute to register the module as a UDF.
//!
//! # Pipeline
//!
//! 1. **Read** ([`read_wasm`]) — loads the module bytes from disk.
//! 2. **Encode** ([`encode_wasm`]) — converts the bytes to standard,
//!    padded base64 text.
//! 3. **Render** ([`render_create_function`]) — interpolates a
//!    [`UdfDescriptor`] into the fixed statement template.
//!
//! The statement is only produced, never executed. Field values are
//! interpolated verbatim: names containing quotes will yield malformed SQL.

pub mod payload;
pub mod udf;

use std::path::Path;

use anyhow::Result;

pub use payload::{encode_wasm, read_wasm};
pub use udf::{render_create_function, UdfDescriptor, BIGINT, LANGUAGE};

/// Read a WebAssembly module and render the statement registering it as
/// a `(BIGINT, BIGINT) -> BIGINT` function.
///
/// `export_name` selects the module export to invoke; when `None` the
/// function's own name is used.
pub fn create_function_sql(
    udf_name: &str,
    export_name: Option<&str>,
    wasm_path: &Path,
) -> Result<String> {
    let wasm = read_wasm(wasm_path)?;
    let descriptor = UdfDescriptor::binary_bigint(udf_name, export_name, &wasm);
    Ok(render_create_function(&descriptor))
}
