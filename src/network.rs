use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::Settings;
use crate::error::ApiError;
use crate::models::{
    ArticleDraft, ArticleResponse, ArticlesResponse, Credentials, LoginResponse, MessageResponse,
};

/// Thin client over the articles REST API. Every method is exactly one request.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    settings: Settings,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            http: Client::new(),
            settings: settings.clone(),
        }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let url = self.settings.login_url();
        tracing::debug!(url = %url, username = %credentials.username, "POST login");
        send(self.http.post(&url).json(credentials)).await
    }

    pub async fn list_articles(&self, token: &str) -> Result<ArticlesResponse, ApiError> {
        let url = self.settings.articles_url();
        tracing::debug!(url = %url, "GET articles");
        send(self.http.get(&url).header(AUTHORIZATION, token)).await
    }

    pub async fn create_article(&self, token: &str, draft: &ArticleDraft) -> Result<ArticleResponse, ApiError> {
        let url = self.settings.articles_url();
        tracing::debug!(url = %url, title = %draft.title, "POST article");
        send(self.http.post(&url).header(AUTHORIZATION, token).json(draft)).await
    }

    pub async fn update_article(
        &self,
        token: &str,
        article_id: u64,
        draft: &ArticleDraft,
    ) -> Result<ArticleResponse, ApiError> {
        let url = self.settings.article_url(article_id);
        tracing::debug!(url = %url, "PUT article");
        send(self.http.put(&url).header(AUTHORIZATION, token).json(draft)).await
    }

    pub async fn delete_article(
        &self,
        token: &str,
        article_id: u64,
    ) -> Result<MessageResponse, ApiError> {
        let url = self.settings.article_url(article_id);
        tracing::debug!(url = %url, "DELETE article");
        send(self.http.delete(&url).header(AUTHORIZATION, token)).await
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_response(status, &body));
    }
    Ok(response.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Topic;
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load_from(&dir.path().join("none.toml"), Some(server.uri().as_str())).unwrap();
        ApiClient::new(&settings)
    }

    #[tokio::test]
    async fn login_posts_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .and(body_json(json!({"username": "foo", "password": "12345678"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Here are your articles, foo!",
                "token": "tok-1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let res = client_for(&server)
            .login(&Credentials { username: "foo".into(), password: "12345678".into() })
            .await
            .unwrap();
        assert_eq!(res.token, "tok-1");
    }

    #[tokio::test]
    async fn token_is_sent_raw_in_authorization_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/articles"))
            .and(header("Authorization", "tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "ok",
                "articles": [{"article_id": 1, "title": "a", "text": "b", "topic": "Node"}]
            })))
            .mount(&server)
            .await;

        let res = client_for(&server).list_articles("tok-1").await.unwrap();
        assert_eq!(res.articles.len(), 1);
        assert_eq!(res.articles[0].topic, Topic::Node);
    }

    #[tokio::test]
    async fn expired_token_maps_to_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/articles"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Token expired"})))
            .mount(&server)
            .await;

        let err = client_for(&server).list_articles("old").await.unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn update_and_delete_target_article_path() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/articles/9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "updated",
                "article": {"article_id": 9, "title": "t", "text": "x", "topic": "React"}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/articles/9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "deleted"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let draft = ArticleDraft { title: "t".into(), text: "x".into(), topic: Some(Topic::React) };
        assert_eq!(client.update_article("tok", 9, &draft).await.unwrap().article.article_id, 9);
        assert_eq!(client.delete_article("tok", 9).await.unwrap().message, "deleted");
    }
}
