use reqwest::{header, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};

use super::error::ApiError;
use crate::{credential::Credential, profile::Profile, user_create_request::UserCreateRequest};

const LOGIN_PATH: &str = "/auth/login";
const SIGNUP_PATH: &str = "/auth/signup";

/// HTTP access to the remote collections. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        ApiClient { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn request(&self, method: Method, path: &str, credential: &Credential) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header(header::AUTHORIZATION, credential.authorization())
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        credential: &Credential,
    ) -> Result<T, ApiError> {
        let request = self.request(Method::GET, path, credential).query(query);
        let response = send(request, "GET", path).await?;
        Ok(response.json().await?)
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        credential: &Credential,
    ) -> Result<T, ApiError> {
        let request = self.request(Method::POST, path, credential).json(body);
        let response = send(request, "POST", path).await?;
        Ok(response.json().await?)
    }

    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        credential: &Credential,
    ) -> Result<T, ApiError> {
        let request = self.request(Method::PUT, path, credential).json(body);
        let response = send(request, "PUT", path).await?;
        Ok(response.json().await?)
    }

    pub async fn delete(&self, path: &str, credential: &Credential) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, path, credential);
        send(request, "DELETE", path).await?;
        Ok(())
    }

    /// `POST /auth/login?username=&password=` with a basic header from the same pair.
    pub async fn login(&self, username: &str, password: &str) -> Result<Profile, ApiError> {
        let credential = Credential::derive(username, password);
        let request = self
            .request(Method::POST, LOGIN_PATH, &credential)
            .query(&[("username", username), ("password", password)]);
        let response = send(request, "POST", LOGIN_PATH).await?;
        Ok(response.json().await?)
    }

    /// `POST /auth/signup`; the only unauthenticated write.
    pub async fn signup(&self, account: &UserCreateRequest) -> Result<(), ApiError> {
        let request = self.http.post(self.url(SIGNUP_PATH)).json(account);
        send(request, "POST", SIGNUP_PATH).await?;
        Ok(())
    }
}

async fn send(request: RequestBuilder, method: &'static str, path: &str) -> Result<Response, ApiError> {
    tracing::debug!(method, path, "api request");
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Rejected { method, path: path.to_string(), status: status.as_u16() });
    }
    Ok(response)
}
