//! Response payload returned by the sync function

/// Body of a successful response
///
/// The function usually answers with JSON, but plain text is accepted too.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Body parsed as JSON
    Json(serde_json::Value),
    /// Raw body text when it is not valid JSON
    Text(String),
}

impl Payload {
    /// Parse a response body, falling back to the raw text
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str(body) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(body.to_string()),
        }
    }
}

impl std::fmt::Display for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Payload::Json(value) => write!(f, "{}", value),
            Payload::Text(text) => f.write_str(text),
        }
    }
}
