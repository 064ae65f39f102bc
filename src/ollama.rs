use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:11434";
pub const DEFAULT_MODEL: &str = "llama3.2";

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ReplyMessage,
}

// Ollama also sends timing and token-count telemetry alongside the message;
// serde drops the fields we don't model.
#[derive(Deserialize)]
struct ReplyMessage {
    #[allow(dead_code)]
    #[serde(default)]
    role: String,
    content: String,
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("failed to encode chat request: {0}")]
    Encoding(#[source] serde_json::Error),
    #[error("could not reach Ollama: {0}. Make sure Ollama is running with: ollama serve")]
    Transport(#[source] reqwest::Error),
    #[error("Ollama returned an invalid reply: {0}")]
    Decoding(#[source] serde_json::Error),
}

#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
}

impl OllamaClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.to_string(),
        }
    }

    /// One non-streaming exchange with `/api/chat`. The prior transcript is
    /// already joined into a single user-turn prompt by the caller. Always
    /// invoked from a spawned task so the event loop never blocks on it.
    pub async fn chat(&self, model: &str, prompt: &str) -> Result<String, ChatError> {
        let url = format!("{}/api/chat", self.base_url);

        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            stream: false,
        };

        let body = serde_json::to_vec(&request).map_err(ChatError::Encoding)?;

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(ChatError::Transport)?
            .error_for_status()
            .map_err(ChatError::Transport)?;

        let bytes = response.bytes().await.map_err(ChatError::Transport)?;
        decode_reply(&bytes)
    }
}

fn decode_reply(bytes: &[u8]) -> Result<String, ChatError> {
    let reply: ChatResponse = serde_json::from_slice(bytes).map_err(ChatError::Decoding)?;
    Ok(reply.message.content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_matches_wire_shape() {
        let request = ChatRequest {
            model: "llama3.2".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "You: hello".to_string(),
            }],
            stream: false,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "model": "llama3.2",
                "messages": [{"role": "user", "content": "You: hello"}],
                "stream": false,
            })
        );
    }

    #[test]
    fn test_decode_reply_ignores_telemetry_fields() {
        let body = serde_json::json!({
            "model": "llama3.2",
            "created_at": "2024-01-01T00:00:00Z",
            "message": {"role": "assistant", "content": "hi there"},
            "done_reason": "stop",
            "done": true,
            "total_duration": 123456,
            "eval_count": 42,
        });
        let text = decode_reply(body.to_string().as_bytes()).unwrap();
        assert_eq!(text, "hi there");
    }

    #[test]
    fn test_decode_reply_accepts_empty_content() {
        let body = br#"{"message": {"role": "assistant", "content": ""}}"#;
        assert_eq!(decode_reply(body).unwrap(), "");
    }

    #[test]
    fn test_decode_reply_classifies_invalid_body() {
        let err = decode_reply(b"not json at all").unwrap_err();
        assert!(matches!(err, ChatError::Decoding(_)));
    }

    #[test]
    fn test_decode_reply_classifies_missing_message() {
        let err = decode_reply(br#"{"done": true}"#).unwrap_err();
        assert!(matches!(err, ChatError::Decoding(_)));
    }
}
