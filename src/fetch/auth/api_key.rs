use crate::fetch::HttpClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};

/// An [`HttpClient`] wrapper that injects a credential as an HTTP header.
///
/// Used when a timing server only serves its read log to authenticated
/// clients.
pub struct ApiKey<C> {
    pub inner: C,
    header_name: HeaderName,
    value: HeaderValue,
}

impl<C> ApiKey<C> {
    /// Sets `header_name: key` on every request.
    pub fn new(inner: C, header_name: &str, key: &str) -> Result<Self> {
        let header_name = HeaderName::from_bytes(header_name.as_bytes())
            .with_context(|| format!("invalid header name {header_name}"))?;
        let mut value = HeaderValue::from_str(key).context("invalid header value")?;
        value.set_sensitive(true);
        Ok(Self {
            inner,
            header_name,
            value,
        })
    }

    /// Uses `Authorization: Bearer <key>`.
    pub fn bearer(inner: C, key: &str) -> Result<Self> {
        Self::new(inner, AUTHORIZATION.as_str(), &format!("Bearer {key}"))
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for ApiKey<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut()
            .insert(self.header_name.clone(), self.value.clone());
        self.inner.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::BasicClient;
    use reqwest::header::HeaderMap;
    use std::sync::Mutex;

    /// Records the headers of every request and answers with a builder error.
    #[derive(Default)]
    struct CapturingClient {
        seen: Mutex<Vec<HeaderMap>>,
    }

    #[async_trait]
    impl HttpClient for CapturingClient {
        async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            self.seen.lock().unwrap().push(req.headers().clone());
            Err(reqwest::Client::new().get("not a url").build().unwrap_err())
        }
    }

    fn get(url: &str) -> reqwest::Request {
        reqwest::Request::new(reqwest::Method::GET, url.parse().unwrap())
    }

    #[tokio::test]
    async fn test_execute_inserts_bearer_header() {
        let client = ApiKey::bearer(CapturingClient::default(), "secret").unwrap();
        assert!(client.execute(get("http://timing.local/reads.txt")).await.is_err());

        let seen = client.inner.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].get(AUTHORIZATION).unwrap(), "Bearer secret");
    }

    #[tokio::test]
    async fn test_execute_replaces_existing_header() {
        let client = ApiKey::new(CapturingClient::default(), "x-api-key", "k2").unwrap();
        let mut req = get("http://timing.local/reads.txt");
        req.headers_mut()
            .insert("x-api-key", HeaderValue::from_static("k1"));
        let _ = client.execute(req).await;

        let seen = client.inner.seen.lock().unwrap();
        let values: Vec<_> = seen[0].get_all("x-api-key").iter().collect();
        assert_eq!(values, vec!["k2"]);
    }

    #[test]
    fn test_bearer_sets_authorization_value() {
        let client = ApiKey::bearer(BasicClient::new(), "secret").unwrap();
        assert_eq!(client.header_name, AUTHORIZATION);
        assert_eq!(client.value.to_str().unwrap(), "Bearer secret");
        assert!(client.value.is_sensitive());
    }

    #[test]
    fn test_invalid_header_name_is_error() {
        assert!(ApiKey::new(BasicClient::new(), "bad header", "x").is_err());
    }

    #[test]
    fn test_invalid_header_value_is_error() {
        assert!(ApiKey::bearer(BasicClient::new(), "line\nbreak").is_err());
    }
}
