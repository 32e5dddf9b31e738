//! # REST client for the LearnLoop backend
//!
//! [`ApiClient`] implements [`Remote`] over `reqwest`. JSON bodies in both
//! directions, camelCase field names, multipart for uploads.
//!
//! | Operation | Request |
//! |-----------|---------|
//! | posts | `GET`/`POST /posts`, `DELETE /posts/{id}` |
//! | learning progress | `GET`/`POST /learningProgress`, `PUT`/`DELETE /learningProgress/{id}` |
//! | skill shares | `GET`/`POST /skillShares`, `DELETE /skillShares/{id}` |
//! | stories | `GET`/`POST /workoutStories` |
//! | uploads | `POST /files/upload?category=...`, multipart field `file`, plain-text URL back |
//!
//! Non-2xx responses become [`RemoteError::Status`] carrying the response
//! body (a 404 becomes [`RemoteError::NotFound`]).

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use store::config::ApiConfig;
use store::models::{
    LearningProgress, NewLearningProgress, NewPost, NewSkillShare, NewStory, Post, SkillShare,
    Story,
};
use store::{MediaFile, Remote, RemoteError, UploadCategory};

/// HTTP access to the backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

fn transport(error: reqwest::Error) -> RemoteError {
    if error.is_decode() {
        RemoteError::Decode(error.to_string())
    } else {
        RemoteError::Transport(error.to_string())
    }
}

/// Error for a non-success `status` on `path`.
pub(crate) fn status_error(status: u16, path: &str, body: &str) -> RemoteError {
    if status == StatusCode::NOT_FOUND.as_u16() {
        return RemoteError::NotFound(path.to_string());
    }
    let message = match body.trim() {
        "" => StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("request failed")
            .to_string(),
        text => text.to_string(),
    };
    RemoteError::Status { status, message }
}

/// Join `base` and `path` with exactly one slash.
pub(crate) fn join(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, RemoteError> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(std::time::Duration::from_secs(config.timeout_secs));
        let http = builder.build().map_err(transport)?;
        Ok(Self {
            http,
            base_url: config.base_url.trim().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, join(&self.base_url, path))
    }

    /// Send and turn non-2xx into an error.
    async fn send(&self, path: &str, request: RequestBuilder) -> Result<Response, RemoteError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(path, error = %e, "request failed");
            transport(e)
        })?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(path, status = status.as_u16(), "backend rejected request");
        Err(status_error(status.as_u16(), path, &body))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        let response = self.send(path, self.request(Method::GET, path)).await?;
        response.json().await.map_err(transport)
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, RemoteError> {
        let response = self
            .send(path, self.request(method, path).json(body))
            .await?;
        response.json().await.map_err(transport)
    }

    async fn delete(&self, path: &str) -> Result<(), RemoteError> {
        self.send(path, self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}

impl Remote for ApiClient {
    async fn list_posts(&self) -> Result<Vec<Post>, RemoteError> {
        self.get_json("posts").await
    }

    async fn create_post(&self, input: &NewPost) -> Result<Post, RemoteError> {
        self.send_json(Method::POST, "posts", input).await
    }

    async fn delete_post(&self, id: &str) -> Result<(), RemoteError> {
        self.delete(&format!("posts/{id}")).await
    }

    async fn list_learning_progress(&self) -> Result<Vec<LearningProgress>, RemoteError> {
        self.get_json("learningProgress").await
    }

    async fn create_learning_progress(
        &self,
        input: &NewLearningProgress,
    ) -> Result<LearningProgress, RemoteError> {
        self.send_json(Method::POST, "learningProgress", input).await
    }

    async fn update_learning_progress(
        &self,
        id: &str,
        input: &NewLearningProgress,
    ) -> Result<LearningProgress, RemoteError> {
        self.send_json(Method::PUT, &format!("learningProgress/{id}"), input)
            .await
    }

    async fn delete_learning_progress(&self, id: &str) -> Result<(), RemoteError> {
        self.delete(&format!("learningProgress/{id}")).await
    }

    async fn list_skill_shares(&self) -> Result<Vec<SkillShare>, RemoteError> {
        self.get_json("skillShares").await
    }

    async fn create_skill_share(&self, input: &NewSkillShare) -> Result<SkillShare, RemoteError> {
        self.send_json(Method::POST, "skillShares", input).await
    }

    async fn delete_skill_share(&self, id: &str) -> Result<(), RemoteError> {
        self.delete(&format!("skillShares/{id}")).await
    }

    async fn list_stories(&self) -> Result<Vec<Story>, RemoteError> {
        self.get_json("workoutStories").await
    }

    async fn create_story(&self, input: &NewStory) -> Result<Story, RemoteError> {
        self.send_json(Method::POST, "workoutStories", input).await
    }

    async fn upload_file(
        &self,
        file: &MediaFile,
        category: UploadCategory,
    ) -> Result<String, RemoteError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime)
            .map_err(transport)?;
        let form = Form::new().part("file", part);
        let path = format!("files/upload?category={}", category.as_str());

        let response = self
            .send(&path, self.request(Method::POST, &path).multipart(form))
            .await?;
        let url = response.text().await.map_err(transport)?;
        let url = url.trim();
        if url.is_empty() {
            return Err(RemoteError::Decode("upload returned no URL".to_string()));
        }
        tracing::debug!(file = %file.name, url, "uploaded");
        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_normalises_slashes() {
        assert_eq!(join("http://h/api", "posts"), "http://h/api/posts");
        assert_eq!(join("http://h/api/", "/posts/7"), "http://h/api/posts/7");
    }

    #[test]
    fn test_status_error_mapping() {
        assert_eq!(
            status_error(404, "posts/9", "gone"),
            RemoteError::NotFound("posts/9".to_string())
        );
        assert_eq!(
            status_error(400, "posts", "  contentDescription is required "),
            RemoteError::Status {
                status: 400,
                message: "contentDescription is required".to_string()
            }
        );
        assert_eq!(
            status_error(503, "posts", ""),
            RemoteError::Status {
                status: 503,
                message: "Service Unavailable".to_string()
            }
        );
    }

    #[test]
    fn test_client_keeps_configured_base() {
        let config = ApiConfig {
            base_url: " http://localhost:8080/api ".to_string(),
            timeout_secs: 5,
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api");
    }
}
