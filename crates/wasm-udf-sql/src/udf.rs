//! UDF descriptor and the `CREATE FUNCTION` template.

use log::debug;

use crate::payload::encode_wasm;

/// Calling convention the database uses to pass arguments to the module.
pub const LANGUAGE: &str = "wasmMessagePack";

/// SQL type name for 64-bit signed integers.
pub const BIGINT: &str = "BIGINT";

/// Everything needed to register one WebAssembly function.
///
/// No field is validated or escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdfDescriptor {
    /// Name of the SQL function being created.
    pub name: String,
    /// SQL argument types, in call order.
    pub input_types: Vec<String>,
    /// SQL result type.
    pub return_type: String,
    /// Module export to invoke. `None` means the export shares the
    /// function's name.
    pub export_name: Option<String>,
    /// Base64 text of the compiled module.
    pub data: String,
}

impl UdfDescriptor {
    /// Descriptor for a `(BIGINT, BIGINT) -> BIGINT` function backed by
    /// the given module bytes.
    pub fn binary_bigint(name: &str, export_name: Option<&str>, wasm: &[u8]) -> Self {
        let data = encode_wasm(wasm);
        debug!("encoded {} module bytes into {} base64 chars", wasm.len(), data.len());
        Self {
            name: name.to_string(),
            input_types: vec![BIGINT.to_string(), BIGINT.to_string()],
            return_type: BIGINT.to_string(),
            export_name: export_name.map(str::to_string),
            data,
        }
    }

    /// The export the database will call.
    pub fn entrypoint(&self) -> &str {
        self.export_name.as_deref().unwrap_or(&self.name)
    }
}

/// Render the `CREATE FUNCTION` statement registering `udf`.
///
/// Fields are interpolated verbatim. The result starts at `CREATE` and
/// ends at `}';` with no surrounding newlines.
pub fn render_create_function(udf: &UdfDescriptor) -> String {
    format!(
        "CREATE FUNCTION {name} AS '\n\
         {{\n  \
         \"entrypoint\": \"{entrypoint}\",\n  \
         \"language\": \"{LANGUAGE}\",\n  \
         \"input_types\": [\"{input_types}\"],\n  \
         \"return_type\": \"{return_type}\",\n  \
         \"data\": \"{data}\"\n\
         }}';",
        name = udf.name,
        entrypoint = udf.entrypoint(),
        input_types = udf.input_types.join("\", \""),
        return_type = udf.return_type,
        data = udf.data,
    )
}
