//! Rendering of tagged values into MySQL literal text.
//!
//! The statement engine builds SQL by interpolating literals rather than by
//! binding driver parameters; these functions are the only place literal
//! text is produced. Text and JSON literals escape embedded quotes and
//! backslashes.

use crate::types::Value;

/// Render one value into its MySQL literal form. Infallible: every kind has
/// a literal rendering.
#[must_use]
pub fn sql_literal(value: &Value) -> String {
    match value {
        Value::Int(v) => v.to_string(),
        Value::Float(v) => v.to_string(),
        Value::Bool(v) => if *v { "TRUE" } else { "FALSE" }.to_string(),
        Value::Text(v) => quote_text(v),
        Value::Timestamp(v) => format!("'{}'", v.format("%Y-%m-%d %H:%M:%S")),
        Value::Null => "NULL".to_string(),
        Value::Json(v) => quote_text(&v.to_string()),
        Value::Bytes(v) => {
            let hex: String = v.iter().map(|b| format!("{b:02x}")).collect();
            format!("X'{hex}'")
        }
    }
}

/// Render a column name backtick-quoted, doubling embedded backticks.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

fn quote_text(text: &str) -> String {
    format!("'{}'", text.replace('\\', "\\\\").replace('\'', "''"))
}
