use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;

use crate::error::WeatherError;

/// Status line and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The only network capability the pipeline needs: perform a GET and hand back status + body.
///
/// Transport failures must be reported as [`WeatherError::Network`] carrying the
/// underlying message unchanged.
#[async_trait]
pub trait HttpClient: Send + Sync + Debug {
    async fn get(&self, url: &str) -> Result<HttpResponse, WeatherError>;
}

#[async_trait]
impl<T: HttpClient + ?Sized> HttpClient for std::sync::Arc<T> {
    async fn get(&self, url: &str) -> Result<HttpResponse, WeatherError> {
        (**self).get(url).await
    }
}

/// [`HttpClient`] backed by `reqwest`. No timeout or retry is configured.
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpClient {
    http: Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, WeatherError> {
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.to_string()))?;

        let status = res.status().as_u16();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::Network(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::{collections::VecDeque, sync::Mutex};

    /// Replays scripted responses in order and records every requested URL.
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedHttp {
        replies: Mutex<VecDeque<Result<HttpResponse, WeatherError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedHttp {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn ok(self, body: &str) -> Self {
            self.reply(Ok(HttpResponse::new(200, body)))
        }

        pub(crate) fn status(self, status: u16) -> Self {
            self.reply(Ok(HttpResponse::new(status, "")))
        }

        pub(crate) fn fail(self, message: &str) -> Self {
            self.reply(Err(WeatherError::Network(message.to_string())))
        }

        fn reply(self, reply: Result<HttpResponse, WeatherError>) -> Self {
            self.replies.lock().unwrap().push_back(reply);
            self
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpClient for ScriptedHttp {
        async fn get(&self, url: &str) -> Result<HttpResponse, WeatherError> {
            self.calls.lock().unwrap().push(url.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| panic!("unexpected request to {url}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_2xx_only() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(301, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());
        assert!(!HttpResponse::new(503, "").is_success());
    }

    #[tokio::test]
    async fn arc_client_delegates() {
        let inner = std::sync::Arc::new(testing::ScriptedHttp::new().ok("{}"));
        let res = inner.get("http://example.test/a").await.unwrap();

        assert_eq!(res.body, "{}");
        assert_eq!(inner.calls(), vec!["http://example.test/a".to_string()]);
    }
}
