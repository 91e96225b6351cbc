//! Create/edit form and login form state.

use crate::models::{Article, ArticleDraft, Credentials, Topic, TEXT_MAX_CHARS, TITLE_MAX_CHARS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Title,
    Text,
    Topic,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Text,
            FormField::Text => FormField::Topic,
            FormField::Topic => FormField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::Topic,
            FormField::Text => FormField::Title,
            FormField::Topic => FormField::Text,
        }
    }
}

/// What a submit turned into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Create(ArticleDraft),
    Update { article_id: u64, draft: ArticleDraft },
}

/// Article form. Create mode when `editing` is `None`, edit mode otherwise.
#[derive(Debug)]
pub struct ArticleForm {
    pub draft: ArticleDraft,
    pub editing: Option<Article>,
    pub focus: FormField,
}

impl Default for ArticleForm {
    fn default() -> Self {
        Self {
            draft: ArticleDraft::default(),
            editing: None,
            focus: FormField::Title,
        }
    }
}

impl ArticleForm {
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn set_current_article(&mut self, article: Article) {
        self.draft = ArticleDraft::from(&article);
        self.editing = Some(article);
        self.focus = FormField::Title;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn can_submit(&self) -> bool {
        self.draft.is_complete()
    }

    /// Returns `None` while a field is empty. Otherwise resets to create mode.
    pub fn submit(&mut self) -> Option<Submission> {
        if !self.can_submit() {
            return None;
        }
        let draft = self.draft.clone();
        let submission = match &self.editing {
            Some(article) => Submission::Update { article_id: article.article_id, draft },
            None => Submission::Create(draft),
        };
        self.reset();
        Some(submission)
    }

    pub fn push_char(&mut self, c: char) {
        match self.focus {
            FormField::Title => push_limited(&mut self.draft.title, c, TITLE_MAX_CHARS),
            FormField::Text => push_limited(&mut self.draft.text, c, TEXT_MAX_CHARS),
            FormField::Topic => {}
        }
    }

    pub fn pop_char(&mut self) {
        match self.focus {
            FormField::Title => {
                self.draft.title.pop();
            }
            FormField::Text => {
                self.draft.text.pop();
            }
            FormField::Topic => self.draft.topic = None,
        }
    }

    pub fn cycle_topic(&mut self, forward: bool) {
        self.draft.topic = Topic::cycle(self.draft.topic, forward);
    }
}

fn push_limited(field: &mut String, c: char, max: usize) {
    if field.chars().count() < max {
        field.push(c);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

#[derive(Debug)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            focus: LoginField::Username,
        }
    }
}

impl LoginForm {
    pub fn can_submit(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.trim().is_empty()
    }

    /// Takes the credentials and clears the password field.
    pub fn submit(&mut self) -> Option<Credentials> {
        if !self.can_submit() {
            return None;
        }
        let credentials = Credentials {
            username: self.username.trim().to_string(),
            password: std::mem::take(&mut self.password),
        };
        self.focus = LoginField::Password;
        Some(credentials)
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub fn push_char(&mut self, c: char) {
        match self.focus {
            LoginField::Username => self.username.push(c),
            LoginField::Password => self.password.push(c),
        }
    }

    pub fn pop_char(&mut self) {
        match self.focus {
            LoginField::Username => self.username.pop(),
            LoginField::Password => self.password.pop(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> Article {
        Article {
            article_id: 4,
            title: "Closures".into(),
            text: "Functions that capture scope".into(),
            topic: Topic::JavaScript,
        }
    }

    fn type_str(form: &mut ArticleForm, s: &str) {
        s.chars().for_each(|c| form.push_char(c));
    }

    #[test]
    fn submit_disabled_until_all_fields_set() {
        let mut form = ArticleForm::default();
        assert!(!form.can_submit());
        type_str(&mut form, "Title");
        form.focus = FormField::Text;
        type_str(&mut form, "Body");
        assert!(!form.can_submit());
        assert_eq!(form.submit(), None);
        form.cycle_topic(true);
        assert!(form.can_submit());
    }

    #[test]
    fn create_submit_resets_form() {
        let mut form = ArticleForm::default();
        form.draft = ArticleDraft { title: "a".into(), text: "b".into(), topic: Some(Topic::Node) };
        let submission = form.submit().unwrap();
        assert!(matches!(submission, Submission::Create(ref d) if d.title == "a"));
        assert_eq!(form.draft, ArticleDraft::default());
        assert!(!form.is_editing());
    }

    #[test]
    fn edit_prefills_and_submit_targets_article() {
        let mut form = ArticleForm::default();
        form.set_current_article(article());
        assert!(form.is_editing());
        assert_eq!(form.draft.title, "Closures");
        assert_eq!(form.draft.topic, Some(Topic::JavaScript));

        form.cycle_topic(true);
        let submission = form.submit().unwrap();
        assert_eq!(
            submission,
            Submission::Update {
                article_id: 4,
                draft: ArticleDraft {
                    title: "Closures".into(),
                    text: "Functions that capture scope".into(),
                    topic: Some(Topic::React),
                },
            }
        );
        assert!(!form.is_editing());
    }

    #[test]
    fn cancel_returns_to_empty_create_mode() {
        let mut form = ArticleForm::default();
        form.set_current_article(article());
        form.reset();
        assert!(!form.is_editing());
        assert_eq!(form.draft, ArticleDraft::default());
    }

    #[test]
    fn title_and_text_respect_max_length() {
        let mut form = ArticleForm::default();
        type_str(&mut form, &"x".repeat(80));
        assert_eq!(form.draft.title.chars().count(), TITLE_MAX_CHARS);
        form.focus = FormField::Text;
        type_str(&mut form, &"é".repeat(250));
        assert_eq!(form.draft.text.chars().count(), TEXT_MAX_CHARS);
    }

    #[test]
    fn login_form_takes_password() {
        let mut form = LoginForm::default();
        "  foo ".chars().for_each(|c| form.push_char(c));
        assert!(form.submit().is_none());
        form.toggle_focus();
        "12345678".chars().for_each(|c| form.push_char(c));
        let creds = form.submit().unwrap();
        assert_eq!(creds.username, "foo");
        assert_eq!(creds.password, "12345678");
        assert!(form.password.is_empty());
    }
}
