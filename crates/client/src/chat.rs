use faranga_core::Language;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::gateway::{ApiGateway, Body, Method};

/// A reply from the multilingual assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

/// POST `/chat/` - send one message to the assistant.
///
/// The backend has answered under both `reply` and `response` keys over
/// time, so both are accepted.
pub fn chat(gateway: &ApiGateway, message: &str, language: Language) -> Result<ChatReply, ApiError> {
    let body = serde_json::json!({
        "message": message,
        "language": language.code(),
    });
    let value = gateway
        .request(Method::Post, "/chat/", &[], Body::Json(body))?
        .into_value()?;
    let reply = value
        .get("reply")
        .or_else(|| value.get("response"))
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::Decode("chat response carried no reply text".to_string()))?;
    Ok(ChatReply {
        reply: reply.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    #[test]
    fn reply_key_probing() {
        // Mirrors the probing order used by `chat`.
        let via_reply = json!({"reply": "Muraho!", "response": "ignored"});
        let via_response = json!({"response": "Bonjour"});
        assert_eq!(via_reply.get("reply").and_then(|v| v.as_str()), Some("Muraho!"));
        assert_eq!(
            via_response
                .get("reply")
                .or_else(|| via_response.get("response"))
                .and_then(|v| v.as_str()),
            Some("Bonjour")
        );
    }
}
