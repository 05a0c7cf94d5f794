//! Bot API client

use super::types::Message;
use crate::error::{BotError, Result};
use crate::interface::{MessageRef, Messenger, SendOptions};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Description the API returns when an edit would not change anything
const NOT_MODIFIED: &str = "message is not modified";

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// Telegram Bot API client
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient").finish_non_exhaustive()
    }
}

impl TelegramClient {
    pub fn new(client: Client, token: &str) -> Self {
        Self::with_api_url(client, DEFAULT_API_URL, token)
    }

    /// Create a client against another Bot API server
    pub fn with_api_url(client: Client, api_url: &str, token: &str) -> Self {
        Self {
            client,
            base_url: format!("{}/bot{token}", api_url.trim_end_matches('/')),
        }
    }

    /// Point the bot's webhook at `url`
    pub async fn set_webhook(&self, url: &str) -> Result<()> {
        self.call::<bool>("setWebhook", &json!({ "url": url }))
            .await
            .map(|_| ())
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, payload: &Value) -> Result<T> {
        debug!(method, "Calling Bot API");

        let response = self
            .client
            .post(format!("{}/{method}", self.base_url))
            .json(payload)
            .send()
            .await
            .map_err(|e| transport(method, &e.without_url()))?;

        // Failed calls still carry a JSON body with a description
        let body = response
            .text()
            .await
            .map_err(|e| transport(method, &e.without_url()))?;
        parse_response(method, &body)
    }
}

fn transport(method: &str, err: &dyn std::fmt::Display) -> BotError {
    BotError::Transport(format!("{method}: {err}"))
}

fn parse_response<T: DeserializeOwned>(method: &str, body: &str) -> Result<T> {
    let response: ApiResponse<T> =
        serde_json::from_str(body).map_err(|e| transport(method, &e))?;

    if !response.ok {
        let description = response
            .description
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(transport(method, &description));
    }
    response
        .result
        .ok_or_else(|| transport(method, &"response has no result"))
}

fn apply_options(payload: &mut Value, options: &SendOptions) -> Result<()> {
    if let Some(mode) = options.parse_mode {
        payload["parse_mode"] = serde_json::to_value(mode)?;
    }
    if let Some(keyboard) = &options.keyboard {
        payload["reply_markup"] = serde_json::to_value(keyboard)?;
    }
    Ok(())
}

fn send_payload(chat_id: i64, text: &str, options: &SendOptions) -> Result<Value> {
    let mut payload = json!({ "chat_id": chat_id, "text": text });
    apply_options(&mut payload, options)?;
    Ok(payload)
}

fn edit_payload(target: MessageRef, text: &str, options: &SendOptions) -> Result<Value> {
    let mut payload = json!({
        "chat_id": target.chat_id,
        "message_id": target.message_id,
        "text": text,
    });
    apply_options(&mut payload, options)?;
    Ok(payload)
}

fn is_not_modified(err: &BotError) -> bool {
    matches!(err, BotError::Transport(message) if message.contains(NOT_MODIFIED))
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        options: &SendOptions,
    ) -> Result<MessageRef> {
        let payload = send_payload(chat_id, text, options)?;
        let message: Message = self.call("sendMessage", &payload).await?;
        Ok(MessageRef {
            chat_id: message.chat.id,
            message_id: message.message_id,
        })
    }

    async fn edit_message(
        &self,
        target: MessageRef,
        text: &str,
        options: &SendOptions,
    ) -> Result<()> {
        let payload = edit_payload(target, text, options)?;
        match self.call::<Value>("editMessageText", &payload).await {
            Ok(_) => Ok(()),
            Err(e) if is_not_modified(&e) => {
                debug!(message_id = target.message_id, "Edit left message unchanged");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn send_typing(&self, chat_id: i64) -> Result<()> {
        self.call::<bool>(
            "sendChatAction",
            &json!({ "chat_id": chat_id, "action": "typing" }),
        )
        .await
        .map(|_| ())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<()> {
        self.call::<bool>(
            "answerCallbackQuery",
            &json!({ "callback_query_id": callback_id }),
        )
        .await
        .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::InlineKeyboard;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_send_payload_with_keyboard() {
        let options = SendOptions::markdown()
            .with_keyboard(Some(InlineKeyboard::single("🔄 Actualizar", "go:btc")));
        let payload = send_payload(7, "*hola*", &options).unwrap();

        assert_eq!(
            payload,
            json!({
                "chat_id": 7,
                "text": "*hola*",
                "parse_mode": "Markdown",
                "reply_markup": {
                    "inline_keyboard": [[{ "text": "🔄 Actualizar", "callback_data": "go:btc" }]]
                }
            })
        );
    }

    #[test]
    fn test_send_payload_plain() {
        let payload = send_payload(7, "hola", &SendOptions::default()).unwrap();
        assert_eq!(payload, json!({ "chat_id": 7, "text": "hola" }));
    }

    #[test]
    fn test_edit_payload() {
        let target = MessageRef {
            chat_id: 7,
            message_id: 77,
        };
        let payload = edit_payload(target, "nuevo", &SendOptions::markdown()).unwrap();
        assert_eq!(
            payload,
            json!({
                "chat_id": 7,
                "message_id": 77,
                "text": "nuevo",
                "parse_mode": "Markdown"
            })
        );
    }

    #[test]
    fn test_parse_sent_message() {
        let body = r#"{
            "ok": true,
            "result": {
                "message_id": 55,
                "chat": { "id": 7, "type": "private" },
                "date": 1497020400,
                "text": "hola"
            }
        }"#;
        let message: Message = assert_ok!(parse_response("sendMessage", body));
        assert_eq!(message.message_id, 55);
        assert_eq!(message.chat.id, 7);
    }

    #[test]
    fn test_parse_api_failure() {
        let body = r#"{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}"#;
        let err = assert_err!(parse_response::<Message>("sendMessage", body));

        assert!(matches!(err, BotError::Transport(_)));
        assert_eq!(
            err.to_string(),
            "Transport error: sendMessage: Bad Request: chat not found"
        );
        assert!(!is_not_modified(&err));
    }

    #[test]
    fn test_parse_ok_without_result() {
        let err = assert_err!(parse_response::<bool>("setWebhook", r#"{"ok": true}"#));
        assert_eq!(
            err.to_string(),
            "Transport error: setWebhook: response has no result"
        );
    }

    #[test]
    fn test_parse_failure_without_description() {
        let err = assert_err!(parse_response::<Message>("sendMessage", r#"{"ok": false}"#));
        assert_eq!(err.to_string(), "Transport error: sendMessage: unknown error");
    }

    #[test]
    fn test_parse_garbage() {
        let err = assert_err!(parse_response::<bool>("setWebhook", "<html>"));
        assert!(matches!(err, BotError::Transport(_)));
    }

    #[test]
    fn test_not_modified_is_detected() {
        let body = r#"{"ok": false, "description": "Bad Request: message is not modified: specified new message content and reply markup are exactly the same"}"#;
        let err = assert_err!(parse_response::<Value>("editMessageText", body));
        assert!(is_not_modified(&err));
    }

    #[test]
    fn test_debug_hides_token() {
        let client = TelegramClient::new(Client::new(), "123:secret");
        assert!(!format!("{client:?}").contains("secret"));
    }
}
