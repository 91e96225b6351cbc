use serde::{Deserialize, Serialize};
use std::fmt;

pub const TITLE_MAX_CHARS: usize = 50;
pub const TEXT_MAX_CHARS: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topic {
    JavaScript,
    React,
    Node,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::JavaScript, Topic::React, Topic::Node];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::JavaScript => "JavaScript",
            Topic::React => "React",
            Topic::Node => "Node",
        }
    }

    /// Steps through `None -> JavaScript -> React -> Node -> None`, like a select box.
    pub fn cycle(current: Option<Topic>, forward: bool) -> Option<Topic> {
        let slots: [Option<Topic>; 4] = [None, Some(Topic::JavaScript), Some(Topic::React), Some(Topic::Node)];
        let pos = slots.iter().position(|t| *t == current).unwrap_or(0);
        let next = if forward {
            (pos + 1) % slots.len()
        } else {
            (pos + slots.len() - 1) % slots.len()
        };
        slots[next]
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Topic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown topic '{}', expected one of JavaScript, React, Node", s))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub article_id: u64,
    pub title: String,
    pub text: String,
    pub topic: Topic,
}

/// Unsaved contents of the create/edit form. Also the request body for create and update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ArticleDraft {
    pub title: String,
    pub text: String,
    pub topic: Option<Topic>,
}

impl ArticleDraft {
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.text.is_empty() && self.topic.is_some()
    }
}

impl From<&Article> for ArticleDraft {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            text: article.text.clone(),
            topic: Some(article.topic),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    pub token: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ArticlesResponse {
    #[serde(default)]
    pub message: String,
    pub articles: Vec<Article>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ArticleResponse {
    #[serde(default)]
    pub message: String,
    pub article: Article,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Login,
    Articles,
}

impl Screen {
    pub fn route(&self) -> &'static str {
        match self {
            Screen::Login => "/",
            Screen::Articles => "/articles",
        }
    }
}
