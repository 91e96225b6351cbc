//! Headless subcommands. They drive the same `AppState` as the TUI and await
//! each request in turn.

use anyhow::{Context, Result, bail};

use crate::cli::Command;
use crate::config::{self, Settings};
use crate::form::{ArticleForm, Submission};
use crate::models::{Article, ArticleDraft, Credentials, Screen, Topic, TEXT_MAX_CHARS, TITLE_MAX_CHARS};
use crate::network::ApiClient;
use crate::paths;
use crate::runtime::run_to_completion;
use crate::state::AppState;
use crate::storage::TokenStore;

pub async fn run(
    command: Command,
    settings: &Settings,
    client: &ApiClient,
    store: &dyn TokenStore,
) -> Result<()> {
    let token = store.load().context("Could not read stored token")?;
    let mut state = AppState::new(token);

    let effects = match command {
        Command::Config { set_base_url } => return show_config(settings, set_base_url),
        Command::Login { username, password } => state.login(Credentials { username, password }),
        Command::Logout => state.logout(),
        Command::List => {
            require_session(&state)?;
            state.navigate(Screen::Articles)
        }
        Command::Create { title, text, topic } => {
            require_session(&state)?;
            let draft = build_draft(title, text, topic)?;
            state.create(draft)
        }
        Command::Update { article_id, title, text, topic } => {
            require_session(&state)?;
            let draft = build_draft(title, text, topic)?;
            state.update(article_id, draft)
        }
        Command::Delete { article_id } => {
            require_session(&state)?;
            state.delete(article_id)
        }
    };

    let had_session = state.is_logged_in();
    let completion = run_to_completion(&mut state, client, store, effects).await;
    if !completion.primary_ok {
        if had_session && !state.is_logged_in() {
            bail!("Session expired. {}", state.message);
        }
        bail!("{}", state.message);
    }
    if !completion.follow_ups_ok {
        if !state.is_logged_in() {
            bail!("Session expired. {}", state.message);
        }
        eprintln!("Warning: {}", state.message);
        return Ok(());
    }

    if !state.message.is_empty() {
        println!("{}", state.message);
    }
    if state.screen == Screen::Articles || !state.articles.is_empty() {
        print_articles(&state.articles);
    }
    Ok(())
}

fn require_session(state: &AppState) -> Result<()> {
    if !state.is_logged_in() {
        bail!("Not logged in. Run `articles login` first.");
    }
    Ok(())
}

/// Runs the values through the same form the TUI uses, so the same rules apply.
fn build_draft(title: String, text: String, topic: Topic) -> Result<ArticleDraft> {
    if title.chars().count() > TITLE_MAX_CHARS {
        bail!("title is limited to {} characters", TITLE_MAX_CHARS);
    }
    if text.chars().count() > TEXT_MAX_CHARS {
        bail!("text is limited to {} characters", TEXT_MAX_CHARS);
    }
    let mut form = ArticleForm::default();
    form.draft = ArticleDraft { title, text, topic: Some(topic) };
    match form.submit() {
        Some(Submission::Create(draft)) => Ok(draft),
        _ => bail!("title and text must not be empty"),
    }
}

fn print_articles(articles: &[Article]) {
    if articles.is_empty() {
        println!("No articles yet");
        return;
    }
    for article in articles {
        println!("#{} [{}] {}", article.article_id, article.topic, article.title);
        println!("    {}", article.text);
    }
}

fn show_config(settings: &Settings, set_base_url: Option<String>) -> Result<()> {
    let user_config = paths::config_path()?;
    if let Some(url) = set_base_url {
        config::save_base_url(&user_config, &url)?;
        println!("Saved base_url = {} to {}", url, user_config.display());
        return Ok(());
    }
    println!("{}", toml::to_string_pretty(settings)?);
    println!("# config file: {}", user_config.display());
    println!("# token file:  {}", settings.token_path()?.display());
    println!("# log file:    {}", settings.log_path()?.display());
    Ok(())
}
