use crate::models::{NewTodo, Todo, TodoId, UserId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Network,
    Http,
    Parse,
}

/// Transport failure from the remote store. The controller never inspects
/// more than the kind; every variant maps to one fixed banner text.
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    pub(crate) fn http(status: u16, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {body}"),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub user_id: Option<UserId>,
}

pub(crate) const DEFAULT_API_URL: &str = "http://localhost:3000";

impl EnvConfig {
    pub fn new() -> Self {
        let mut cfg = Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_id: None,
        };

        // Both `window.ENV.API_URL` and `window.ENV.api_url` are accepted (same for USER_ID).
        let Some(env) = web_sys::window()
            .and_then(|w| w.get("ENV"))
            .filter(|env| !env.is_undefined() && env.is_object())
        else {
            return cfg;
        };

        let read = |keys: &[&str]| {
            keys.iter()
                .filter_map(|k| js_sys::Reflect::get(&env, &JsValue::from(*k)).ok())
                .find(|v| !v.is_undefined() && !v.is_null())
        };

        if let Some(url) = read(&["API_URL", "api_url"]).and_then(|v| v.as_string()) {
            cfg.api_url = url;
        }

        // USER_ID may be a number or a numeric string.
        cfg.user_id = read(&["USER_ID", "user_id"]).and_then(|v| {
            v.as_f64()
                .map(|n| n as UserId)
                .or_else(|| v.as_string().and_then(|s| s.trim().parse().ok()))
        });
        cfg.user_id = cfg.user_id.filter(|id| *id != 0);

        cfg
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The four remote operations the client core needs. Each call is a single
/// request with no retry; failures surface immediately.
#[async_trait(?Send)]
pub(crate) trait TodoStore {
    async fn list(&self, user_id: UserId) -> ApiResult<Vec<Todo>>;
    async fn create(&self, todo: &NewTodo) -> ApiResult<Todo>;
    async fn update(&self, todo: &Todo) -> ApiResult<Todo>;
    async fn delete(&self, id: TodoId) -> ApiResult<()>;
}

#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(cfg: &EnvConfig) -> Self {
        Self::new(cfg.api_url.clone())
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> ApiResult<reqwest::Response> {
        let res = req.send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            Ok(res)
        } else {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, "Request failed"))
        }
    }

    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> ApiResult<T> {
        self.send(req).await?.json().await.map_err(ApiError::parse)
    }
}

#[async_trait(?Send)]
impl TodoStore for ApiClient {
    async fn list(&self, user_id: UserId) -> ApiResult<Vec<Todo>> {
        let url = self.url(&format!("/todos?userId={user_id}"));
        self.request(self.http.get(url)).await
    }

    async fn create(&self, todo: &NewTodo) -> ApiResult<Todo> {
        self.request(self.http.post(self.url("/todos")).json(todo)).await
    }

    async fn update(&self, todo: &Todo) -> ApiResult<Todo> {
        let url = self.url(&format!("/todos/{}", todo.id));
        self.request(self.http.patch(url).json(todo)).await
    }

    async fn delete(&self, id: TodoId) -> ApiResult<()> {
        // The body of a successful delete is ignored.
        self.send(self.http.delete(self.url(&format!("/todos/{id}"))))
            .await
            .map(|_| ())
    }
}
