//! Command dispatch
//!
//! One turn runs in this order:
//! 1. before-hooks observe the update
//! 2. the command name is resolved through delegations to a handler
//! 3. the session is loaded, or created on first contact
//! 4. the handler produces replies, which are all rendered up front
//! 5. replies are sent, or the pressed message is edited in place
//! 6. the session is written back
//!
//! A failure at any step ends the turn without writing the session.

use super::{BeforeHook, CommandHandler, CommandMatcher, Reply, ReplyIntent, ReplyMode, Turn};
use crate::error::{BotError, Result};
use crate::interface::{Inbound, Messenger, ParseMode, Session, SessionStore};
use crate::prompts::TemplateName;
use cryptobot_prompt::{Language, TemplateRegistry};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Longest chain of delegations followed before giving up
const MAX_DELEGATION_DEPTH: usize = 8;

struct Route {
    matcher: CommandMatcher,
    handler: Arc<dyn CommandHandler>,
}

/// Result of dispatching one update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// No handler matched the command
    Ignored,
    /// Replies delivered, in order
    Replied(Vec<ReplyIntent>),
}

/// Routes inbound commands to handlers and delivers their replies
pub struct Dispatcher {
    routes: Vec<Route>,
    delegations: HashMap<String, String>,
    hooks: Vec<Arc<dyn BeforeHook>>,
    templates: Arc<TemplateRegistry>,
    sessions: Arc<dyn SessionStore>,
    messenger: Arc<dyn Messenger>,
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// Handler for `name` after following delegations
    ///
    /// Exact matchers win over patterns. Among patterns the first registered
    /// wins. Returns the command name the handler was found under.
    pub fn resolve(&self, name: &str) -> Option<(String, Arc<dyn CommandHandler>)> {
        let target = follow_delegations(&self.delegations, name)?;
        find_route(&self.routes, &target).map(|route| (target, route.handler.clone()))
    }

    /// Run one turn, logging instead of returning errors
    pub async fn process(&self, inbound: &Inbound) {
        match self.dispatch(inbound).await {
            Ok(TurnOutcome::Ignored) => {}
            Ok(TurnOutcome::Replied(intents)) => {
                debug!(
                    command = %inbound.command,
                    chat = inbound.chat_id,
                    replies = intents.len(),
                    "Turn complete"
                );
            }
            Err(e) => {
                error!(
                    command = %inbound.command,
                    chat = inbound.chat_id,
                    error = %e,
                    "Turn failed"
                );
            }
        }
    }

    /// Run one turn
    pub async fn dispatch(&self, inbound: &Inbound) -> Result<TurnOutcome> {
        for hook in &self.hooks {
            hook.before(inbound);
        }

        if let Some(callback) = &inbound.callback {
            if let Err(e) = self.messenger.answer_callback(&callback.id).await {
                warn!(callback = %callback.id, error = %e, "Failed to answer callback");
            }
        }

        let Some((command, handler)) = self.resolve(&inbound.command) else {
            debug!(command = %inbound.command, "No handler matches command");
            return Ok(TurnOutcome::Ignored);
        };

        let conversation_id = inbound.conversation_id();
        let mut session = self
            .sessions
            .get(&conversation_id)
            .await?
            .unwrap_or_else(|| {
                Session::new(conversation_id.clone(), inbound.chat_id, inbound.sender.id)
            });

        let language = inbound
            .sender
            .language()
            .or_else(|| session.data.language().map(Language::from_code))
            .unwrap_or_else(|| self.templates.default_language().clone());
        session.data.set_language(language.code());

        let replies = {
            let mut turn = Turn {
                inbound,
                session: &mut session,
                language: language.clone(),
            };
            handler.handle(&mut turn).await?
        };

        let intents = self.render(inbound, &language, replies)?;
        for intent in &intents {
            self.deliver(inbound.chat_id, intent).await?;
        }

        session.data.set_last_command(command);
        session.touch();
        self.sessions.set(&conversation_id, &session).await?;

        Ok(TurnOutcome::Replied(intents))
    }

    /// Render every reply before anything is sent
    ///
    /// The first reply of a callback turn edits the pressed message; every
    /// other reply is a new message.
    fn render(
        &self,
        inbound: &Inbound,
        language: &Language,
        replies: Vec<Reply>,
    ) -> Result<Vec<ReplyIntent>> {
        replies
            .into_iter()
            .enumerate()
            .map(|(i, reply)| {
                let text = self.templates.render_with_lang(
                    reply.template.as_str(),
                    language,
                    &reply.context,
                )?;
                let mode = match &inbound.callback {
                    Some(callback) if i == 0 => ReplyMode::Update(callback.message),
                    _ => ReplyMode::Send,
                };
                Ok(ReplyIntent {
                    mode,
                    template: reply.template,
                    text,
                    parse_mode: ParseMode::Markdown,
                    keyboard: reply.keyboard,
                })
            })
            .collect()
    }

    async fn deliver(&self, chat_id: i64, intent: &ReplyIntent) -> Result<()> {
        let options = intent.options();
        match intent.mode {
            ReplyMode::Send => {
                self.messenger
                    .send_message(chat_id, &intent.text, &options)
                    .await?;
            }
            ReplyMode::Update(target) => {
                self.messenger
                    .edit_message(target, &intent.text, &options)
                    .await?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field(
                "routes",
                &self.routes.iter().map(|r| &r.matcher).collect::<Vec<_>>(),
            )
            .field("delegations", &self.delegations)
            .field("hooks", &self.hooks.len())
            .field("templates", &self.templates)
            .finish_non_exhaustive()
    }
}

fn find_route<'a>(routes: &'a [Route], name: &str) -> Option<&'a Route> {
    routes
        .iter()
        .find(|r| r.matcher.is_exact() && r.matcher.matches(name))
        .or_else(|| {
            routes
                .iter()
                .find(|r| !r.matcher.is_exact() && r.matcher.matches(name))
        })
}

/// Final command name `name` delegates to; `None` when the chain loops
fn follow_delegations(delegations: &HashMap<String, String>, name: &str) -> Option<String> {
    let mut current = name;
    for _ in 0..=MAX_DELEGATION_DEPTH {
        match delegations.get(current) {
            Some(next) => current = next.as_str(),
            None => return Some(current.to_string()),
        }
    }
    None
}

/// Builder for [`Dispatcher`]
///
/// `build` checks that every reply template is registered and that every
/// delegation ends at a handler, so neither can fail per request.
#[derive(Default)]
pub struct DispatcherBuilder {
    routes: Vec<Route>,
    delegations: HashMap<String, String>,
    hooks: Vec<Arc<dyn BeforeHook>>,
    templates: Option<Arc<TemplateRegistry>>,
    sessions: Option<Arc<dyn SessionStore>>,
    messenger: Option<Arc<dyn Messenger>>,
}

impl DispatcherBuilder {
    /// Register `handler` for names accepted by `matcher`
    pub fn command(mut self, matcher: CommandMatcher, handler: Arc<dyn CommandHandler>) -> Self {
        self.routes.push(Route { matcher, handler });
        self
    }

    /// Make `from` run the handler of `to`
    pub fn delegate(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.delegations.insert(from.into(), to.into());
        self
    }

    pub fn hook(mut self, hook: Arc<dyn BeforeHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn templates(mut self, templates: Arc<TemplateRegistry>) -> Self {
        self.templates = Some(templates);
        self
    }

    pub fn sessions(mut self, sessions: Arc<dyn SessionStore>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    pub fn messenger(mut self, messenger: Arc<dyn Messenger>) -> Self {
        self.messenger = Some(messenger);
        self
    }

    pub fn build(self) -> Result<Dispatcher> {
        let templates = self
            .templates
            .ok_or_else(|| BotError::Config("template registry not configured".to_string()))?;
        let sessions = self
            .sessions
            .ok_or_else(|| BotError::Config("session store not configured".to_string()))?;
        let messenger = self
            .messenger
            .ok_or_else(|| BotError::Config("messenger not configured".to_string()))?;

        templates.ensure_registered(TemplateName::ALL.iter().map(|name| name.as_str()))?;

        for from in self.delegations.keys() {
            let target = follow_delegations(&self.delegations, from).ok_or_else(|| {
                BotError::Config(format!("delegation from '{from}' does not terminate"))
            })?;
            if find_route(&self.routes, &target).is_none() {
                return Err(BotError::UnknownHandler(target));
            }
        }

        Ok(Dispatcher {
            routes: self.routes,
            delegations: self.delegations,
            hooks: self.hooks,
            templates,
            sessions,
            messenger,
        })
    }
}
