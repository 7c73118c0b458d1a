//! JSON Web Token decoding.

use serde_json::{Value, json};
use toolbox_model::{Result, ToolError};

use crate::convert::decode_base64_lenient;

const CONTEXT: &str = "Failed to decode JWT";

fn decode_segment(segment: &str, name: &str) -> Result<Value> {
    let bytes = decode_base64_lenient(segment)
        .map_err(|e| ToolError::failed(CONTEXT, format!("{name} is not base64url: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ToolError::failed(CONTEXT, format!("{name} is not JSON: {e}")))
}

/// Decode a JWT into its header, payload and (undecoded) signature.
///
/// The signature is not verified.
pub fn jwt(input: &str) -> Result<String> {
    let token = input.trim();
    if token.is_empty() {
        return Err(ToolError::failed(CONTEXT, "Please enter a JWT token"));
    }
    let parts: Vec<&str> = token.split('.').collect();
    let [header, payload, signature] = parts.as_slice() else {
        return Err(ToolError::failed(
            CONTEXT,
            "Invalid JWT token format. Expected 3 parts: header.payload.signature",
        ));
    };

    let decoded = json!({
        "header": decode_segment(header, "header")?,
        "payload": decode_segment(payload, "payload")?,
        "signature": signature,
    });
    serde_json::to_string_pretty(&decoded).map_err(|e| ToolError::failed(CONTEXT, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
        eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyfQ.\
        SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c";

    #[test]
    fn decodes_header_and_payload() {
        let output = jwt(TOKEN).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["header"]["alg"], "HS256");
        assert_eq!(value["payload"]["name"], "John Doe");
        assert_eq!(value["signature"], "SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c");
    }

    #[test]
    fn rejects_wrong_part_count() {
        assert_eq!(
            jwt("a.b").unwrap_err().to_string(),
            "Failed to decode JWT: Invalid JWT token format. Expected 3 parts: header.payload.signature"
        );
        assert!(jwt("  ").is_err());
    }
}
