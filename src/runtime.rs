//! Executes effects returned by `AppState`.
//!
//! The TUI spawns requests onto the tokio runtime and collects results from a
//! channel on the next tick; the headless commands await them in order.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use crate::effects::{ApiEvent, Effect};
use crate::network::ApiClient;
use crate::state::AppState;
use crate::storage::TokenStore;

/// Performs one request effect. Local effects yield `None`.
pub async fn perform(client: &ApiClient, effect: Effect) -> Option<ApiEvent> {
    let event = match effect {
        Effect::Login(credentials) => ApiEvent::LoggedIn(client.login(&credentials).await),
        Effect::FetchArticles { token } => ApiEvent::ArticlesLoaded(client.list_articles(&token).await),
        Effect::CreateArticle { token, draft } => {
            ApiEvent::ArticleCreated(client.create_article(&token, &draft).await)
        }
        Effect::UpdateArticle { token, article_id, draft } => ApiEvent::ArticleUpdated {
            article_id,
            result: client.update_article(&token, article_id, &draft).await,
        },
        Effect::DeleteArticle { token, article_id } => ApiEvent::ArticleDeleted {
            article_id,
            result: client.delete_article(&token, article_id).await,
        },
        Effect::PersistToken(_) | Effect::ClearToken => return None,
    };
    Some(event)
}

/// Applies a token effect to the store. Store failures are logged, not fatal.
fn persist(store: &dyn TokenStore, effect: &Effect) {
    let result = match effect {
        Effect::PersistToken(token) => store.save(token),
        Effect::ClearToken => store.clear(),
        _ => return,
    };
    if let Err(e) = result {
        tracing::error!(error = %e, "could not update token store");
    }
}

/// Fire-and-forget executor used by the TUI event loop.
pub struct Executor {
    client: ApiClient,
    store: Arc<dyn TokenStore>,
    handle: Handle,
    tx: UnboundedSender<ApiEvent>,
}

impl Executor {
    pub fn new(client: ApiClient, store: Arc<dyn TokenStore>, handle: Handle, tx: UnboundedSender<ApiEvent>) -> Self {
        Self { client, store, handle, tx }
    }

    pub fn dispatch(&self, effects: Vec<Effect>) {
        for effect in effects {
            if !effect.is_request() {
                persist(self.store.as_ref(), &effect);
                continue;
            }
            let client = self.client.clone();
            let tx = self.tx.clone();
            self.handle.spawn(async move {
                if let Some(event) = perform(&client, effect).await {
                    // Receiver is gone only when the UI has quit.
                    let _ = tx.send(event);
                }
            });
        }
    }
}

/// How a chain of requests went. The first request is the operation that was
/// asked for; anything after it was triggered by its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub primary_ok: bool,
    pub follow_ups_ok: bool,
}

impl Completion {
    pub fn all_ok(&self) -> bool {
        self.primary_ok && self.follow_ups_ok
    }
}

/// Runs effects one after another until none are left, feeding every result
/// back into `state`.
pub async fn run_to_completion(
    state: &mut AppState,
    client: &ApiClient,
    store: &dyn TokenStore,
    effects: Vec<Effect>,
) -> Completion {
    let mut queue: VecDeque<Effect> = effects.into();
    let mut completion = Completion { primary_ok: true, follow_ups_ok: true };
    let mut first = true;
    while let Some(effect) = queue.pop_front() {
        if !effect.is_request() {
            persist(store, &effect);
            continue;
        }
        if let Some(event) = perform(client, effect).await {
            let ok = event.is_ok();
            if first {
                completion.primary_ok = ok;
                first = false;
            } else {
                completion.follow_ups_ok &= ok;
            }
            queue.extend(state.apply(event));
        }
    }
    completion
}
