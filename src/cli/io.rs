//! JSON output of the CLI commands
//!
//! One JSON object per line on stdout, UTF-8 only.

use std::io::{self, Write};

use serde_json::{json, Value};

use super::errors::{CliError, CliResult};

/// Write a JSON value to stdout
pub fn write_json(value: &Value) -> CliResult<()> {
    write_json_to(&mut io::stdout().lock(), value)
}

/// Write an error object to stderr
pub fn write_error(err: &CliError) {
    let value = error_value(err);
    let _ = write_json_to(&mut io::stderr().lock(), &value);
}

fn error_value(err: &CliError) -> Value {
    json!({
        "status": "error",
        "code": err.code(),
        "message": err.to_string(),
    })
}

fn write_json_to<W: Write>(writer: &mut W, value: &Value) -> CliResult<()> {
    let line = serde_json::to_string(value)?;
    writeln!(writer, "{}", line)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn test_one_line_per_value() {
        let mut out = Vec::new();
        write_json_to(&mut out, &json!({"a": 1})).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\"a\":1}\n");
    }

    #[test]
    fn test_error_value() {
        let value = error_value(&CliError::from(ConfigError::Invalid("bad".into())));
        assert_eq!(value["status"], "error");
        assert_eq!(value["code"], "FAHRRAD_CLI_CONFIG_ERROR");
    }
}
