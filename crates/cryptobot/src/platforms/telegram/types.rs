//! Bot API update payloads

use crate::interface::{
    Callback, Inbound, MessageRef, Sender, parse_callback_data, parse_command,
};
use serde::{Deserialize, Serialize};

/// One webhook delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
}

impl From<User> for Sender {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            language_code: user.language_code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// A press on an inline keyboard button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub data: Option<String>,
}

impl Inbound {
    /// Envelope for an update, if it carries a command
    ///
    /// Text messages must start with `/`. Callback queries must carry
    /// `go:<command>` data and the message the button belongs to.
    pub fn from_update(update: Update) -> Option<Self> {
        if let Some(query) = update.callback_query {
            return from_callback(query);
        }

        let message = update.message?;
        let (command, args) = parse_command(message.text.as_deref()?)?;
        Some(Self {
            command,
            args,
            chat_id: message.chat.id,
            sender: message.from?.into(),
            callback: None,
        })
    }
}

fn from_callback(query: CallbackQuery) -> Option<Inbound> {
    let command = parse_callback_data(query.data.as_deref()?)?.to_string();
    let message = query.message?;

    Some(Inbound {
        command,
        args: String::new(),
        chat_id: message.chat.id,
        sender: query.from.into(),
        callback: Some(Callback {
            id: query.id,
            message: MessageRef {
                chat_id: message.chat.id,
                message_id: message.message_id,
            },
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Update {
        serde_json::from_value(value).unwrap()
    }

    fn user() -> serde_json::Value {
        json!({
            "id": 42,
            "is_bot": false,
            "first_name": "Ada",
            "last_name": "Lovelace",
            "username": "ada",
            "language_code": "es"
        })
    }

    #[test]
    fn test_text_command() {
        let update = parse(json!({
            "update_id": 1,
            "message": {
                "message_id": 10,
                "from": user(),
                "chat": { "id": -200, "type": "group" },
                "date": 1_497_020_400,
                "text": "/BTC@CryptoBot ahora"
            }
        }));

        let inbound = Inbound::from_update(update).unwrap();
        assert_eq!(inbound.command, "BTC");
        assert_eq!(inbound.args, "ahora");
        assert_eq!(inbound.chat_id, -200);
        assert_eq!(inbound.sender.handle(), "@ada");
        assert_eq!(inbound.sender.language_code.as_deref(), Some("es"));
        assert!(!inbound.is_callback());
    }

    #[test]
    fn test_plain_text_is_skipped() {
        let update = parse(json!({
            "update_id": 2,
            "message": {
                "message_id": 11,
                "from": user(),
                "chat": { "id": 1, "type": "private" },
                "text": "hola"
            }
        }));
        assert!(Inbound::from_update(update).is_none());
    }

    #[test]
    fn test_message_without_text_is_skipped() {
        let update = parse(json!({
            "update_id": 3,
            "message": {
                "message_id": 12,
                "from": user(),
                "chat": { "id": 1, "type": "private" }
            }
        }));
        assert!(Inbound::from_update(update).is_none());
    }

    #[test]
    fn test_refresh_callback() {
        let update = parse(json!({
            "update_id": 4,
            "callback_query": {
                "id": "cb-1",
                "from": user(),
                "message": {
                    "message_id": 77,
                    "chat": { "id": 1, "type": "private" },
                    "text": "🏦 *SurBTC* (BTC/CLP):"
                },
                "chat_instance": "x",
                "data": "go:eth"
            }
        }));

        let inbound = Inbound::from_update(update).unwrap();
        assert_eq!(inbound.command, "eth");
        assert_eq!(inbound.chat_id, 1);
        assert_eq!(
            inbound.callback,
            Some(Callback {
                id: "cb-1".to_string(),
                message: MessageRef {
                    chat_id: 1,
                    message_id: 77,
                },
            })
        );
    }

    #[test]
    fn test_unknown_callback_data_is_skipped() {
        let update = parse(json!({
            "update_id": 5,
            "callback_query": {
                "id": "cb-2",
                "from": user(),
                "message": {
                    "message_id": 78,
                    "chat": { "id": 1, "type": "private" }
                },
                "data": "something-else"
            }
        }));
        assert!(Inbound::from_update(update).is_none());
    }

    #[test]
    fn test_empty_update_is_skipped() {
        assert!(Inbound::from_update(parse(json!({ "update_id": 6 }))).is_none());
    }
}
