//! Effects and API results.
//!
//! The state methods never touch the network or the disk. They return
//! `Effect`s for the runtime to execute, and the runtime answers network
//! effects with an `ApiEvent` that is fed back through `AppState::apply`.

use crate::error::ApiError;
use crate::models::{ArticleDraft, ArticleResponse, ArticlesResponse, Credentials, LoginResponse, MessageResponse};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Login(Credentials),
    FetchArticles { token: String },
    CreateArticle { token: String, draft: ArticleDraft },
    UpdateArticle { token: String, article_id: u64, draft: ArticleDraft },
    DeleteArticle { token: String, article_id: u64 },
    PersistToken(String),
    ClearToken,
}

impl Effect {
    /// Effects that go over the wire and come back as an `ApiEvent`.
    pub fn is_request(&self) -> bool {
        !matches!(self, Effect::PersistToken(_) | Effect::ClearToken)
    }
}

#[derive(Debug)]
pub enum ApiEvent {
    LoggedIn(Result<LoginResponse, ApiError>),
    ArticlesLoaded(Result<ArticlesResponse, ApiError>),
    ArticleCreated(Result<ArticleResponse, ApiError>),
    ArticleUpdated {
        article_id: u64,
        result: Result<ArticleResponse, ApiError>,
    },
    ArticleDeleted {
        article_id: u64,
        result: Result<MessageResponse, ApiError>,
    },
}

impl ApiEvent {
    pub fn is_ok(&self) -> bool {
        match self {
            ApiEvent::LoggedIn(r) => r.is_ok(),
            ApiEvent::ArticlesLoaded(r) => r.is_ok(),
            ApiEvent::ArticleCreated(r) => r.is_ok(),
            ApiEvent::ArticleUpdated { result, .. } => result.is_ok(),
            ApiEvent::ArticleDeleted { result, .. } => result.is_ok(),
        }
    }
}
