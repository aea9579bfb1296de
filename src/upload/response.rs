use crate::error::UploadError;
use serde::Deserialize;
use serde_json::Value;

const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Deserialize, Default)]
struct RawResponse {
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

/// Outcome reported by the server in a JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerResponse {
    Success,
    Failure(String),
}

impl ServerResponse {
    /// Classify a parsed body. `message` decides success by JavaScript
    /// truthiness; anything else is a failure carrying `error` or a fallback.
    pub fn from_json(body: Value) -> Result<Self, UploadError> {
        let raw = match body {
            Value::Null => {
                return Err(UploadError::MalformedBody(
                    "response body is null".to_string(),
                ))
            }
            Value::Object(_) => serde_json::from_value::<RawResponse>(body)
                .map_err(|e| UploadError::MalformedBody(e.to_string()))?,
            _ => RawResponse::default(),
        };

        if raw.message.as_ref().is_some_and(is_truthy) {
            return Ok(ServerResponse::Success);
        }

        let reason = match raw.error {
            Some(v) if is_truthy(&v) => js_string(&v),
            _ => UNKNOWN_ERROR.to_string(),
        };
        Ok(ServerResponse::Failure(reason))
    }
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// String conversion as done when concatenating a value onto text in a
/// browser: arrays join their elements with commas, objects collapse to a tag.
pub fn js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classify(body: Value) -> ServerResponse {
        ServerResponse::from_json(body).unwrap()
    }

    #[test]
    fn message_means_success() {
        assert_eq!(classify(json!({ "message": "ok" })), ServerResponse::Success);
        let generated = json!({
            "message": "Certificates generated successfully!",
            "zip": "/download",
        });
        assert_eq!(classify(generated), ServerResponse::Success);
        assert_eq!(classify(json!({ "message": {} })), ServerResponse::Success);
    }

    #[test]
    fn error_text_is_passed_through() {
        assert_eq!(
            classify(json!({ "error": "bad template" })),
            ServerResponse::Failure("bad template".to_string())
        );
    }

    #[test]
    fn missing_fields_fall_back_to_unknown_error() {
        assert_eq!(
            classify(json!({})),
            ServerResponse::Failure("Unknown error".to_string())
        );
        assert_eq!(
            classify(json!({ "error": "" })),
            ServerResponse::Failure("Unknown error".to_string())
        );
        assert_eq!(
            classify(json!({ "error": null })),
            ServerResponse::Failure("Unknown error".to_string())
        );
    }

    #[test]
    fn falsy_message_is_not_success() {
        for message in [json!(""), json!(0), json!(false), json!(null)] {
            assert_eq!(
                classify(json!({ "message": message, "error": "nope" })),
                ServerResponse::Failure("nope".to_string())
            );
        }
    }

    #[test]
    fn non_string_error_is_converted_like_a_browser() {
        assert_eq!(
            classify(json!({ "error": 42 })),
            ServerResponse::Failure("42".to_string())
        );
        assert_eq!(
            classify(json!({ "error": { "a": 1 } })),
            ServerResponse::Failure("[object Object]".to_string())
        );
        assert_eq!(
            classify(json!({ "error": ["a", "b"] })),
            ServerResponse::Failure("a,b".to_string())
        );
        assert_eq!(
            classify(json!({ "error": true })),
            ServerResponse::Failure("true".to_string())
        );
    }

    #[test]
    fn js_string_matches_browser_conversion() {
        assert_eq!(js_string(&json!([1, null, [2, 3], { "k": 0 }])), "1,,2,3,[object Object]");
        assert_eq!(js_string(&json!(2.0)), "2");
        assert_eq!(js_string(&json!(1.5)), "1.5");
        assert_eq!(js_string(&json!([])), "");
    }

    #[test]
    fn non_object_bodies_have_no_fields() {
        assert_eq!(
            classify(json!([1, 2])),
            ServerResponse::Failure("Unknown error".to_string())
        );
        assert_eq!(
            classify(json!("message")),
            ServerResponse::Failure("Unknown error".to_string())
        );
    }

    #[test]
    fn null_body_is_malformed() {
        assert!(matches!(
            ServerResponse::from_json(Value::Null),
            Err(UploadError::MalformedBody(_))
        ));
    }
}
