//! Guest side of the `wasmMessagePack` UDF calling convention.
//!
//! A module registered with `"language": "wasmMessagePack"` exchanges
//! arguments and results with the host through linear memory:
//!
//! - The host calls [`alloc`] to obtain a buffer, writes the input into it
//!   and passes its address to the entry point.
//! - The input buffer is a native-endian `i32` byte count followed by a
//!   MessagePack array holding the call arguments.
//! - The entry point returns the address of an output buffer using the same
//!   framing around a single MessagePack value. The host frees it with
//!   [`dealloc`], passing `4 + length` as the capacity.
//!
//! [`wrap_udf`] performs the whole exchange around a plain Rust closure.
//! [`export_udf`] does the same for an exported entry point and traps when
//! the call fails. The `decode_*` helpers unpack individual arguments.

pub mod abi;
pub mod values;

pub use abi::{
    alloc, dealloc, export_udf, read_input, trap, wrap_udf, write_output, SIZE_NUM_BYTES,
};
pub use values::{
    decode_bool, decode_decimal, decode_f32, decode_f64, decode_i16, decode_i32, decode_i64,
    decode_str, encode_decimal, Decimal,
};
