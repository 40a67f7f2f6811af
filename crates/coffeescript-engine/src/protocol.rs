//! Result envelope shared by the runtime backends.
//!
//! A program body is wrapped in a function whose outcome is serialized as a
//! single JSON line: `["ok"]` for `undefined`, `["ok", value]` for anything
//! JSON can represent, and `["err", message]` when the body throws.

use serde_json::Value;

use crate::{Error, Result};

/// Wrap `body` so that evaluating the result yields the envelope string.
///
/// `body` is placed inside a function, so it may declare locals and must
/// `return` the value to report.
pub fn envelope(body: &str) -> String {
    format!(
        r#"(function(program) {{
  try {{
    var result = program();
    if (typeof result === 'undefined') {{
      return JSON.stringify(['ok']);
    }}
    try {{
      return JSON.stringify(['ok', result]);
    }} catch (err) {{
      return JSON.stringify(['err', '' + err]);
    }}
  }} catch (err) {{
    return JSON.stringify(['err', '' + err]);
  }}
}})(function() {{
{body}
}})"#
    )
}

/// Body that runs `source` and then returns `expression`.
pub fn program(source: &str, expression: &str) -> String {
    format!("{source}\n;\nreturn {expression};")
}

/// Expression calling the function at `path` with JSON arguments.
pub fn call_expression(path: &str, args: &[Value]) -> Result<String> {
    Ok(format!("{path}.apply(this, {})", serde_json::to_string(args)?))
}

/// Expression evaluating `expression` through direct `eval`, so that it
/// sees the locals of the surrounding program.
pub fn eval_expression(expression: &str) -> Result<String> {
    Ok(format!("eval({})", serde_json::to_string(expression)?))
}

/// Decode the envelope from a runtime's output.
///
/// Only the last non-empty line is considered, so anything the program
/// printed before it is ignored.
pub fn decode(output: &str) -> Result<Value> {
    let line = output
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(|| Error::Runtime("runtime produced no output".to_string()))?;

    let envelope: Value = serde_json::from_str(line)
        .map_err(|e| Error::Runtime(format!("unreadable runtime output `{line}`: {e}")))?;

    match envelope.as_array().map(Vec::as_slice) {
        Some([Value::String(status)]) if status == "ok" => Ok(Value::Null),
        Some([Value::String(status), value]) if status == "ok" => Ok(value.clone()),
        Some([Value::String(status), Value::String(message)]) if status == "err" => {
            Err(Error::Program(message.clone()))
        }
        _ => Err(Error::Runtime(format!("unexpected runtime output `{line}`"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_undefined() {
        assert_eq!(decode(r#"["ok"]"#).unwrap(), Value::Null);
    }

    #[test]
    fn test_decode_value() {
        assert_eq!(decode(r#"["ok", {"a": [1, "b"]}]"#).unwrap(), json!({"a": [1, "b"]}));
    }

    #[test]
    fn test_decode_ignores_earlier_output() {
        let output = "console noise\n[\"ok\", 3]\n\n";
        assert_eq!(decode(output).unwrap(), json!(3));
    }

    #[test]
    fn test_decode_program_error() {
        let result = decode(r#"["err", "ReferenceError: add is not defined"]"#);
        match result {
            Err(Error::Program(message)) => {
                assert_eq!(message, "ReferenceError: add is not defined")
            }
            other => panic!("Expected program error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_empty_output() {
        assert!(matches!(decode("  \n"), Err(Error::Runtime(_))));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(decode("not json"), Err(Error::Runtime(_))));
        assert!(matches!(decode(r#"["maybe", 1]"#), Err(Error::Runtime(_))));
    }

    #[test]
    fn test_call_expression() {
        let expr = call_expression("CoffeeScript.compile", &[json!("x = 1"), json!({"bare": true})])
            .unwrap();
        assert_eq!(expr, r#"CoffeeScript.compile.apply(this, ["x = 1",{"bare":true}])"#);
    }

    #[test]
    fn test_eval_expression_quotes_source() {
        assert_eq!(eval_expression("a + \"b\"").unwrap(), r#"eval("a + \"b\"")"#);
    }

    #[test]
    fn test_program_returns_expression() {
        let body = program("var x = 1", "x");
        assert!(body.starts_with("var x = 1"));
        assert!(body.ends_with("return x;"));
    }
}
