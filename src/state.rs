//! Application state and the operations that mutate it.
//!
//! Every server call goes through the same steps: clear the status message,
//! raise `busy`, hand an `Effect` to the runtime, and later fold the
//! `ApiEvent` back in with `apply`.

use chrono::{DateTime, Local};

use crate::effects::{ApiEvent, Effect};
use crate::error::ApiError;
use crate::form::{ArticleForm, LoginForm, Submission};
use crate::models::{Article, ArticleDraft, Credentials, Screen};

pub const GOODBYE: &str = "Goodbye!";
pub const LOGIN_FAILED: &str = "Failed to log in. Please check your username and password.";
pub const LOAD_FAILED: &str = "Failed to load articles. Please try again.";
pub const CREATE_FAILED: &str = "Failed to create article. Please try again.";
pub const UPDATE_FAILED: &str = "Failed to update article. Please try again.";
pub const DELETE_FAILED: &str = "Failed to delete article. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArticlesFocus {
    Form,
    List,
}

pub struct AppState {
    pub screen: Screen,
    pub token: Option<String>,
    pub message: String,
    pub message_at: Option<DateTime<Local>>,
    pub busy: bool,
    pub articles: Vec<Article>,
    pub selected: Option<usize>,
    pub form: ArticleForm,
    pub login: LoginForm,
    pub focus: ArticlesFocus,
}

impl AppState {
    /// Starts on the login screen with whatever token the store had.
    pub fn new(token: Option<String>) -> Self {
        Self {
            screen: Screen::Login,
            token,
            message: String::new(),
            message_at: None,
            busy: false,
            articles: Vec::new(),
            selected: None,
            form: ArticleForm::default(),
            login: LoginForm::default(),
            focus: ArticlesFocus::List,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.message_at = if self.message.is_empty() { None } else { Some(Local::now()) };
    }

    /// Client-side router. The article screen needs a token and fetches on entry.
    pub fn navigate(&mut self, screen: Screen) -> Vec<Effect> {
        match screen {
            Screen::Login => {
                self.screen = Screen::Login;
                Vec::new()
            }
            Screen::Articles => {
                if self.token.is_none() {
                    tracing::debug!("no token, redirecting to login");
                    self.screen = Screen::Login;
                    return Vec::new();
                }
                if self.screen == Screen::Articles {
                    return Vec::new();
                }
                self.screen = Screen::Articles;
                self.list()
            }
        }
    }

    pub fn login(&mut self, credentials: Credentials) -> Vec<Effect> {
        self.set_message("");
        self.busy = true;
        vec![Effect::Login(credentials)]
    }

    /// Submits the login form. Nothing happens while a field is blank.
    pub fn submit_login(&mut self) -> Vec<Effect> {
        match self.login.submit() {
            Some(credentials) => self.login(credentials),
            None => Vec::new(),
        }
    }

    pub fn logout(&mut self) -> Vec<Effect> {
        if self.token.take().is_some() {
            tracing::info!("logged out");
        }
        self.form.reset();
        self.focus = ArticlesFocus::List;
        self.set_message(GOODBYE);
        self.screen = Screen::Login;
        vec![Effect::ClearToken]
    }

    pub fn list(&mut self) -> Vec<Effect> {
        let Some(token) = self.require_token() else {
            return Vec::new();
        };
        self.set_message("");
        self.busy = true;
        vec![Effect::FetchArticles { token }]
    }

    pub fn create(&mut self, draft: ArticleDraft) -> Vec<Effect> {
        let Some(token) = self.require_token() else {
            return Vec::new();
        };
        self.set_message("");
        self.busy = true;
        vec![Effect::CreateArticle { token, draft }]
    }

    pub fn update(&mut self, article_id: u64, draft: ArticleDraft) -> Vec<Effect> {
        let Some(token) = self.require_token() else {
            return Vec::new();
        };
        self.set_message("");
        self.busy = true;
        vec![Effect::UpdateArticle { token, article_id, draft }]
    }

    /// Leaves `busy` alone, unlike the other article operations.
    pub fn delete(&mut self, article_id: u64) -> Vec<Effect> {
        let Some(token) = self.require_token() else {
            return Vec::new();
        };
        self.set_message("");
        vec![Effect::DeleteArticle { token, article_id }]
    }

    pub fn submit_form(&mut self) -> Vec<Effect> {
        match self.form.submit() {
            Some(Submission::Create(draft)) => self.create(draft),
            Some(Submission::Update { article_id, draft }) => self.update(article_id, draft),
            None => Vec::new(),
        }
    }

    pub fn set_current_article(&mut self, article_id: u64) {
        if let Some(article) = self.articles.iter().find(|a| a.article_id == article_id) {
            self.form.set_current_article(article.clone());
            self.focus = ArticlesFocus::Form;
        }
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.selected.and_then(|i| self.articles.get(i))
    }

    pub fn select_next(&mut self) {
        if self.articles.is_empty() {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i + 1 < self.articles.len() => i + 1,
            Some(i) => i,
            None => 0,
        });
    }

    pub fn select_prev(&mut self) {
        if self.articles.is_empty() {
            self.selected = None;
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
    }

    /// Folds a finished request back into the state.
    pub fn apply(&mut self, event: ApiEvent) -> Vec<Effect> {
        match event {
            ApiEvent::LoggedIn(result) => {
                self.busy = false;
                match result {
                    Ok(res) => {
                        tracing::info!("login succeeded");
                        self.token = Some(res.token.clone());
                        self.set_message(res.message);
                        let mut effects = vec![Effect::PersistToken(res.token)];
                        effects.extend(self.navigate(Screen::Articles));
                        effects
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "login failed");
                        self.set_message(LOGIN_FAILED);
                        Vec::new()
                    }
                }
            }
            ApiEvent::ArticlesLoaded(result) => {
                self.busy = false;
                match result {
                    Ok(res) => {
                        tracing::info!(count = res.articles.len(), "articles loaded");
                        self.articles = res.articles;
                        self.clamp_selection();
                        self.set_message(res.message);
                        Vec::new()
                    }
                    Err(e) => self.fail(e, "load articles", LOAD_FAILED, false),
                }
            }
            ApiEvent::ArticleCreated(result) => {
                self.busy = false;
                match result {
                    Ok(res) => {
                        tracing::info!(article_id = res.article.article_id, "article created");
                        self.articles.push(res.article);
                        self.set_message(res.message);
                        Vec::new()
                    }
                    Err(e) => self.fail(e, "create article", CREATE_FAILED, true),
                }
            }
            ApiEvent::ArticleUpdated { article_id, result } => {
                self.busy = false;
                // The edit target was already cleared at submit.
                if self.form.editing.as_ref().is_some_and(|a| a.article_id == article_id) {
                    self.form.reset();
                }
                match result {
                    Ok(res) => {
                        tracing::info!(article_id, "article updated");
                        if let Some(slot) = self.articles.iter_mut().find(|a| a.article_id == article_id) {
                            *slot = res.article;
                        }
                        self.set_message(res.message);
                        Vec::new()
                    }
                    Err(e) => self.fail(e, "update article", UPDATE_FAILED, false),
                }
            }
            ApiEvent::ArticleDeleted { article_id, result } => match result {
                Ok(res) => {
                    tracing::info!(article_id, "article deleted");
                    self.articles.retain(|a| a.article_id != article_id);
                    self.clamp_selection();
                    self.set_message(res.message);
                    Vec::new()
                }
                Err(e) => self.fail(e, "delete article", DELETE_FAILED, true),
            },
        }
    }

    /// A 401 ends the session; anything else becomes a status message.
    fn fail(
        &mut self,
        error: ApiError,
        action: &str,
        fallback: &str,
        prefer_server: bool,
    ) -> Vec<Effect> {
        if error.is_unauthorized() {
            tracing::warn!(action, "token rejected, logging out");
            return self.logout();
        }
        tracing::warn!(action, error = %error, "request failed");
        let message = match error.server_message() {
            Some(server) if prefer_server => server.to_string(),
            _ => fallback.to_string(),
        };
        self.set_message(message);
        Vec::new()
    }

    fn require_token(&mut self) -> Option<String> {
        if self.token.is_none() {
            self.screen = Screen::Login;
        }
        self.token.clone()
    }

    fn clamp_selection(&mut self) {
        self.selected = match self.articles.len() {
            0 => None,
            n => Some(self.selected.unwrap_or(0).min(n - 1)),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleResponse, ArticlesResponse, LoginResponse, MessageResponse, Topic};
    use reqwest::StatusCode;

    fn article(id: u64, title: &str) -> Article {
        Article { article_id: id, title: title.into(), text: "text".into(), topic: Topic::React }
    }

    fn logged_in() -> AppState {
        let mut state = AppState::new(Some("tok".into()));
        state.screen = Screen::Articles;
        state.articles = vec![article(1, "one"), article(2, "two"), article(3, "three")];
        state
    }

    fn status(code: u16, body: &str) -> ApiError {
        ApiError::from_response(StatusCode::from_u16(code).unwrap(), body)
    }

    fn draft() -> ArticleDraft {
        ArticleDraft { title: "new".into(), text: "body".into(), topic: Some(Topic::Node) }
    }

    #[test]
    fn login_success_stores_token_and_fetches_articles() {
        let mut state = AppState::new(None);
        state.set_message("old");
        let effects = state.login(Credentials { username: "foo".into(), password: "12345678".into() });
        assert!(state.busy);
        assert!(state.message.is_empty());
        assert_eq!(effects.len(), 1);

        let effects = state.apply(ApiEvent::LoggedIn(Ok(LoginResponse {
            message: "Welcome back, foo!".into(),
            token: "tok-9".into(),
        })));
        assert_eq!(state.token.as_deref(), Some("tok-9"));
        assert_eq!(state.screen, Screen::Articles);
        assert!(state.busy, "mount fetch is in flight");
        assert_eq!(
            effects,
            vec![
                Effect::PersistToken("tok-9".into()),
                Effect::FetchArticles { token: "tok-9".into() },
            ]
        );
    }

    #[test]
    fn login_failure_keeps_session_empty() {
        let mut state = AppState::new(None);
        state.login(Credentials { username: "foo".into(), password: "bad".into() });
        let effects = state.apply(ApiEvent::LoggedIn(Err(status(401, r#"{"message":"Invalid credentials"}"#))));
        assert!(effects.is_empty());
        assert!(state.token.is_none());
        assert!(!state.busy);
        assert_eq!(state.screen, Screen::Login);
        assert_eq!(state.message, LOGIN_FAILED);
    }

    #[test]
    fn articles_screen_is_guarded() {
        let mut state = AppState::new(None);
        assert!(state.navigate(Screen::Articles).is_empty());
        assert_eq!(state.screen, Screen::Login);

        let mut state = AppState::new(Some("tok".into()));
        assert_eq!(state.navigate(Screen::Articles), vec![Effect::FetchArticles { token: "tok".into() }]);
        assert!(state.navigate(Screen::Articles).is_empty(), "already mounted");
    }

    #[test]
    fn list_replaces_collection_in_server_order() {
        let mut state = logged_in();
        state.list();
        state.apply(ApiEvent::ArticlesLoaded(Ok(ArticlesResponse {
            message: "Here are your articles".into(),
            articles: vec![article(9, "nine"), article(4, "four")],
        })));
        let ids: Vec<u64> = state.articles.iter().map(|a| a.article_id).collect();
        assert_eq!(ids, vec![9, 4]);
        assert_eq!(state.message, "Here are your articles");
        assert!(!state.busy);
    }

    #[test]
    fn list_with_expired_token_logs_out() {
        let mut state = logged_in();
        state.list();
        let effects = state.apply(ApiEvent::ArticlesLoaded(Err(status(401, ""))));
        assert_eq!(effects, vec![Effect::ClearToken]);
        assert!(state.token.is_none());
        assert_eq!(state.screen, Screen::Login);
        assert_eq!(state.message, GOODBYE);
        assert!(!state.busy);
    }

    #[test]
    fn list_failure_keeps_collection() {
        let mut state = logged_in();
        state.list();
        state.apply(ApiEvent::ArticlesLoaded(Err(status(500, r#"{"message":"db down"}"#))));
        assert_eq!(state.articles.len(), 3);
        assert_eq!(state.message, LOAD_FAILED);
    }

    #[test]
    fn operations_without_token_redirect_to_login() {
        let mut state = AppState::new(None);
        state.screen = Screen::Articles;
        assert!(state.list().is_empty());
        assert!(state.create(draft()).is_empty());
        assert!(state.update(1, draft()).is_empty());
        assert!(state.delete(1).is_empty());
        assert_eq!(state.screen, Screen::Login);
        assert!(!state.busy);
    }

    #[test]
    fn create_appends_only_after_acknowledgement() {
        let mut state = logged_in();
        state.form.draft = draft();
        let effects = state.submit_form();
        assert_eq!(effects, vec![Effect::CreateArticle { token: "tok".into(), draft: draft() }]);
        assert_eq!(state.articles.len(), 3);
        assert!(state.busy);

        state.apply(ApiEvent::ArticleCreated(Ok(ArticleResponse {
            message: "Well done!".into(),
            article: article(10, "new"),
        })));
        assert_eq!(state.articles.last().map(|a| a.article_id), Some(10));
        assert_eq!(state.message, "Well done!");
        assert!(!state.busy);
    }

    #[test]
    fn create_failure_prefers_server_message() {
        let mut state = logged_in();
        state.create(draft());
        state.apply(ApiEvent::ArticleCreated(Err(status(422, r#"{"message":"title too long"}"#))));
        assert_eq!(state.message, "title too long");
        assert_eq!(state.articles.len(), 3);

        state.create(draft());
        state.apply(ApiEvent::ArticleCreated(Err(status(500, ""))));
        assert_eq!(state.message, CREATE_FAILED);
    }

    #[test]
    fn update_replaces_only_matching_entry() {
        let mut state = logged_in();
        state.set_current_article(2);
        assert_eq!(state.form.draft.title, "two");
        state.form.draft.title = "TWO".into();
        let effects = state.submit_form();
        assert!(matches!(&effects[..], [Effect::UpdateArticle { article_id: 2, .. }]));
        assert!(!state.form.is_editing());

        state.apply(ApiEvent::ArticleUpdated {
            article_id: 2,
            result: Ok(ArticleResponse { message: "updated".into(), article: article(2, "TWO") }),
        });
        let titles: Vec<&str> = state.articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["one", "TWO", "three"]);
    }

    #[test]
    fn update_failure_clears_edit_target() {
        let mut state = logged_in();
        state.set_current_article(3);
        state.update(3, draft());
        assert!(state.form.is_editing());
        state.apply(ApiEvent::ArticleUpdated { article_id: 3, result: Err(status(500, "")) });
        assert!(!state.form.is_editing());
        assert_eq!(state.message, UPDATE_FAILED);
        assert_eq!(state.articles[2].title, "three");
    }

    #[test]
    fn update_failure_ignores_server_message() {
        let mut state = logged_in();
        state.update(2, draft());
        state.apply(ApiEvent::ArticleUpdated { article_id: 2, result: Err(status(422, r#"{"message":"x"}"#)) });
        assert_eq!(state.message, UPDATE_FAILED);
        assert!(!state.busy);
    }

    #[test]
    fn delete_removes_only_matching_entry_without_busy() {
        let mut state = logged_in();
        state.selected = Some(2);
        let effects = state.delete(3);
        assert!(!state.busy);
        assert_eq!(effects, vec![Effect::DeleteArticle { token: "tok".into(), article_id: 3 }]);

        state.apply(ApiEvent::ArticleDeleted {
            article_id: 3,
            result: Ok(MessageResponse { message: "Article 3 was deleted".into() }),
        });
        let ids: Vec<u64> = state.articles.iter().map(|a| a.article_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(state.selected, Some(1));
        assert_eq!(state.message, "Article 3 was deleted");
    }

    #[test]
    fn delete_failure_keeps_collection() {
        let mut state = logged_in();
        state.delete(1);
        state.apply(ApiEvent::ArticleDeleted { article_id: 1, result: Err(status(404, r#"{"message":"not found"}"#)) });
        assert_eq!(state.articles.len(), 3);
        assert_eq!(state.message, "not found");

        state.delete(1);
        state.apply(ApiEvent::ArticleDeleted { article_id: 1, result: Err(status(500, "")) });
        assert_eq!(state.message, DELETE_FAILED);
    }

    #[test]
    fn rejected_token_on_mutation_logs_out() {
        let mut state = logged_in();
        state.create(draft());
        let effects = state.apply(ApiEvent::ArticleCreated(Err(status(401, ""))));
        assert_eq!(effects, vec![Effect::ClearToken]);
        assert!(!state.is_logged_in());

        let mut state = logged_in();
        state.update(2, draft());
        let effects = state.apply(ApiEvent::ArticleUpdated { article_id: 2, result: Err(status(401, "")) });
        assert_eq!(effects, vec![Effect::ClearToken]);
        assert!(!state.is_logged_in());
        assert_eq!(state.screen, Screen::Login);
        assert!(!state.busy);

        let mut state = logged_in();
        state.delete(1);
        let effects = state.apply(ApiEvent::ArticleDeleted { article_id: 1, result: Err(status(401, "")) });
        assert_eq!(effects, vec![Effect::ClearToken]);
        assert!(!state.is_logged_in());
        assert_eq!(state.screen, Screen::Login);
        assert_eq!(state.message, GOODBYE);
        assert!(!state.busy);
    }

    #[test]
    fn logout_returns_focus_to_list() {
        let mut state = logged_in();
        state.focus = ArticlesFocus::Form;
        state.create(draft());
        state.apply(ApiEvent::ArticleCreated(Err(status(401, ""))));
        assert_eq!(state.focus, ArticlesFocus::List);
    }

    #[test]
    fn logout_is_always_allowed() {
        let mut state = AppState::new(None);
        assert_eq!(state.logout(), vec![Effect::ClearToken]);
        assert_eq!(state.message, GOODBYE);
        assert_eq!(state.screen, Screen::Login);

        let mut state = logged_in();
        state.set_current_article(1);
        state.logout();
        assert!(state.token.is_none());
        assert!(!state.form.is_editing());
    }

    #[test]
    fn cancel_edit_leaves_collection_alone() {
        let mut state = logged_in();
        state.set_current_article(1);
        state.form.reset();
        assert_eq!(state.form.draft, ArticleDraft::default());
        assert_eq!(state.articles.len(), 3);
    }
}
