//! Background networking bridge.
//!
//! All server calls run on a private tokio runtime; results come back
//! through `std::sync::mpsc` channels drained once per frame. Requests
//! are never cancelled: a stale reply is still delivered and applied to
//! whatever state is current by then.

use std::sync::mpsc::Sender;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub struct RemoteClient {
    runtime: tokio::runtime::Runtime,
    http: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    pub fn new(base_url: String) -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("failed to start async runtime");
        Self {
            runtime,
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn set_base_url(&mut self, base_url: String) {
        self.base_url = base_url;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// POST `body` to `path`; the parsed reply (or an error string for
    /// the UI) is pushed into `tx` when the call finishes.
    pub fn post<Req, Resp>(&self, path: &str, body: Req, tx: Sender<Result<Resp, String>>)
    where
        Req: Serialize + Send + Sync + 'static,
        Resp: DeserializeOwned + Send + 'static,
    {
        let http = self.http.clone();
        let url = self.url(path);
        self.runtime.spawn(async move {
            let result = post_json(&http, &url, &body).await;
            if let Err(e) = &result {
                tracing::warn!("POST {url} failed: {e}");
            }
            let _ = tx.send(result);
        });
    }

    /// POST variant that maps the reply before sending it on, so callers
    /// can tag results with routing context (e.g. which object a
    /// refinement belongs to).
    pub fn post_map<Req, Resp, T>(
        &self,
        path: &str,
        body: Req,
        tx: Sender<T>,
        map: impl FnOnce(Result<Resp, String>) -> T + Send + 'static,
    ) where
        Req: Serialize + Send + Sync + 'static,
        Resp: DeserializeOwned + Send + 'static,
        T: Send + 'static,
    {
        let http = self.http.clone();
        let url = self.url(path);
        self.runtime.spawn(async move {
            let result = post_json(&http, &url, &body).await;
            if let Err(e) = &result {
                tracing::warn!("POST {url} failed: {e}");
            }
            let _ = tx.send(map(result));
        });
    }

    /// POST variant for callers that only care about failures
    /// (analytics, purchase tracking).
    pub fn post_fire_and_forget<Req>(&self, path: &str, body: Req)
    where
        Req: Serialize + Send + Sync + 'static,
    {
        let http = self.http.clone();
        let url = self.url(path);
        self.runtime.spawn(async move {
            if let Err(e) = post_json::<Req, serde_json::Value>(&http, &url, &body).await {
                tracing::warn!("POST {url} failed: {e}");
            }
        });
    }

    /// DELETE with a JSON body (the marketplace ownership check reads
    /// the asserted email from the body).
    pub fn delete<Req, Resp>(&self, path: &str, body: Req, tx: Sender<Result<Resp, String>>)
    where
        Req: Serialize + Send + Sync + 'static,
        Resp: DeserializeOwned + Send + 'static,
    {
        let http = self.http.clone();
        let url = self.url(path);
        self.runtime.spawn(async move {
            let result = async {
                let response = http
                    .delete(&url)
                    .json(&body)
                    .send()
                    .await
                    .map_err(|e| e.to_string())?;
                let status = response.status();
                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(error_message(status.as_u16(), &body));
                }
                response.json().await.map_err(|e| e.to_string())
            }
            .await;
            if let Err(e) = &result {
                tracing::warn!("DELETE {url} failed: {e}");
            }
            let _ = tx.send(result);
        });
    }

    /// GET `path` and push the parsed reply into `tx`.
    pub fn get<Resp>(&self, path: &str, tx: Sender<Result<Resp, String>>)
    where
        Resp: DeserializeOwned + Send + 'static,
    {
        let http = self.http.clone();
        let url = self.url(path);
        self.runtime.spawn(async move {
            let result = get_json(&http, &url).await;
            if let Err(e) = &result {
                tracing::warn!("GET {url} failed: {e}");
            }
            let _ = tx.send(result);
        });
    }
}

async fn post_json<Req: Serialize, Resp: DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
    body: &Req,
) -> Result<Resp, String> {
    let response = http
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(error_message(status.as_u16(), &body));
    }
    response.json().await.map_err(|e| e.to_string())
}

async fn get_json<Resp: DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
) -> Result<Resp, String> {
    let response = http.get(url).send().await.map_err(|e| e.to_string())?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(error_message(status.as_u16(), &body));
    }
    response.json().await.map_err(|e| e.to_string())
}

/// Prefer the server's `{"error": "..."}` payload when present.
fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"].as_str().map(str::to_string))
        .unwrap_or_else(|| format!("server responded with {status}"))
}
