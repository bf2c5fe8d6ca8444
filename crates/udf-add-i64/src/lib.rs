//! `add_i64`: a `(BIGINT, BIGINT) -> BIGINT` UDF.
//!
//! Build for `wasm32-unknown-unknown` and register the resulting module
//! with `make-create-function-sql add_i64 <path>.wasm`.

use anyhow::{ensure, Result};
use rmpv::Value;
use wasm_udf_guest::{decode_i64, export_udf};

fn do_add(left: i64, right: i64) -> i64 {
    left.wrapping_add(right)
}

fn call(args: Vec<Value>) -> Result<Value> {
    ensure!(args.len() == 2, "add_i64 expects 2 arguments, got {}", args.len());
    Ok(Value::from(do_add(decode_i64(&args[0])?, decode_i64(&args[1])?)))
}

/// Entry point invoked by the host.
///
/// Traps when the call fails, after writing the error to standard error.
///
/// # Safety
///
/// `input_ptr` must be a length-prefixed buffer allocated through
/// [`wasm_udf_guest::alloc`].
#[no_mangle]
pub unsafe extern "C" fn add_i64(input_ptr: *const u8) -> *mut u8 {
    export_udf(input_ptr, call)
}
