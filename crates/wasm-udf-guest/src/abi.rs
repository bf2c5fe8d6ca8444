//! Linear-memory buffers shared with the host.

use std::mem;
use std::os::raw::c_void;
use std::slice;

use anyhow::{anyhow, Context, Result};
use rmpv::Value;
use serde::Serialize;

/// Width of the length prefix in front of every buffer.
pub const SIZE_NUM_BYTES: usize = mem::size_of::<i32>();

/// Allocate `size` bytes for the host to fill.
///
/// # Safety
///
/// The returned buffer must be released with [`dealloc`] using the same
/// `size` as capacity.
#[no_mangle]
pub unsafe extern "C" fn alloc(size: usize) -> *mut c_void {
    let mut buffer: Vec<u8> = Vec::with_capacity(size);
    let pointer = buffer.as_mut_ptr();
    mem::forget(buffer);
    pointer as *mut c_void
}

/// Release a buffer obtained from [`alloc`] or [`write_output`].
///
/// # Safety
///
/// `pointer` must come from this module's allocator with exactly
/// `capacity` bytes reserved.
#[no_mangle]
pub unsafe extern "C" fn dealloc(pointer: *mut c_void, capacity: usize) {
    drop(Vec::from_raw_parts(pointer as *mut u8, 0, capacity));
}

/// Decode the argument array from a length-prefixed input buffer.
///
/// The buffer stays owned by the host.
///
/// # Safety
///
/// `ptr` must point to a readable length prefix followed by at least that
/// many readable bytes.
pub unsafe fn read_input(ptr: *const u8) -> Result<Vec<Value>> {
    let mut size_bytes = [0u8; SIZE_NUM_BYTES];
    size_bytes.copy_from_slice(slice::from_raw_parts(ptr, SIZE_NUM_BYTES));
    let input_size = usize::try_from(i32::from_ne_bytes(size_bytes))
        .context("error converting input buffer size")?;

    let mut payload = slice::from_raw_parts(ptr.add(SIZE_NUM_BYTES), input_size);
    let input = rmpv::decode::read_value(&mut payload).context("error decoding input buffer")?;
    match input {
        Value::Array(args) => Ok(args),
        other => Err(anyhow!(
            "error reading input buffer as array, found instead: {other:?}"
        )),
    }
}

/// Serialize `val` into a fresh length-prefixed buffer and hand it to the
/// host.
pub fn write_output(val: &Value) -> Result<*mut u8> {
    let mut output = vec![0u8; SIZE_NUM_BYTES];
    val.serialize(&mut rmp_serde::Serializer::new(&mut output))
        .context("error encoding output value")?;

    let output_size = i32::try_from(output.len() - SIZE_NUM_BYTES)
        .context("error converting output buffer size")?;
    output[..SIZE_NUM_BYTES].copy_from_slice(&output_size.to_ne_bytes());

    // Capacity must equal the length so the host can free it with `dealloc`.
    let output = output.into_boxed_slice();
    Ok(Box::into_raw(output) as *mut u8)
}

/// Run `f` over the decoded arguments at `input_ptr` and return the
/// encoded result. Failures are also reported on standard error.
///
/// # Safety
///
/// Same requirements as [`read_input`].
pub unsafe fn wrap_udf(
    input_ptr: *const u8,
    f: impl FnOnce(Vec<Value>) -> Result<Value>,
) -> Result<*mut u8> {
    read_input(input_ptr)
        .and_then(f)
        .and_then(|output| write_output(&output))
        .map_err(|e| {
            eprintln!("ERROR: {e:?}");
            e
        })
}

/// Body of an exported entry point. Like [`wrap_udf`], but a failed call
/// traps so the host never receives an output pointer it cannot read.
///
/// # Safety
///
/// Same requirements as [`read_input`].
pub unsafe fn export_udf(
    input_ptr: *const u8,
    f: impl FnOnce(Vec<Value>) -> Result<Value>,
) -> *mut u8 {
    match wrap_udf(input_ptr, f) {
        Ok(output_ptr) => output_ptr,
        Err(_) => trap(),
    }
}

/// Abort the current call. On wasm32 this executes `unreachable`, which
/// the host reports as a failed invocation.
pub fn trap() -> ! {
    #[cfg(target_arch = "wasm32")]
    core::arch::wasm32::unreachable();
    #[cfg(not(target_arch = "wasm32"))]
    std::process::abort();
}
