//! Wire types for the `/chat` endpoint.

use serde::{Deserialize, Serialize};

/// Body of `POST {base_url}/chat`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub message: String,
}

/// Successful reply. Extra fields are ignored; a missing `reply` is a parse error.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatResponse {
    pub reply: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let req = ChatRequest {
            message: "hi".to_string(),
        };
        assert_eq!(serde_json::to_string(&req).unwrap(), r#"{"message":"hi"}"#);
    }

    #[test]
    fn test_response_ignores_extra_fields() {
        let resp: ChatResponse =
            serde_json::from_str(r#"{"reply":"Hello","latency_ms":12}"#).unwrap();
        assert_eq!(resp.reply, "Hello");
    }

    #[test]
    fn test_response_requires_reply() {
        assert!(serde_json::from_str::<ChatResponse>(r#"{"answer":"Hello"}"#).is_err());
        assert!(serde_json::from_str::<ChatResponse>(r#"{"reply":null}"#).is_err());
    }
}
