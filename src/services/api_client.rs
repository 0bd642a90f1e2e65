use crate::config::get_settings;
use crate::services::error::ApiError;
use log::warn;
use reqwest::Client;
use reqwest::header::ORIGIN;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

/// One candidate target in an ordered fallback chain.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub url: String,
    /// The direct leg carries browser-style cross-origin headers so the
    /// wire shape matches what the service already accepts.
    pub cross_origin: bool,
}

/// Thin wrapper over `reqwest::Client` holding the two endpoint bases.
///
/// Mutation requests go through `post_with_fallback`: the same-origin proxy
/// is tried first and the fully-qualified API second. Everything else talks
/// to the API directly.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    proxy_base: String,
    direct_base: String,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(proxy_base: &str, direct_base: &str, timeout: Duration) -> ApiClient {
        ApiClient {
            http: Client::new(),
            proxy_base: proxy_base.trim_end_matches('/').to_string(),
            direct_base: direct_base.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn from_settings() -> ApiClient {
        let settings = get_settings();
        ApiClient::new(
            &settings.config.proxy_base_url,
            &settings.config.api_base_url,
            Duration::from_secs(settings.config.request_timeout_secs),
        )
    }

    fn chain(&self, path: &str) -> Vec<Endpoint> {
        vec![
            Endpoint {
                url: format!("{}{}", self.proxy_base, path),
                cross_origin: false,
            },
            Endpoint {
                url: format!("{}{}", self.direct_base, path),
                cross_origin: true,
            },
        ]
    }

    async fn send_json(&self, endpoint: &Endpoint, body: &Value) -> Result<Value, ApiError> {
        let mut request = self
            .http
            .post(&endpoint.url)
            .json(body)
            .timeout(self.timeout);

        if endpoint.cross_origin {
            request = request.header(ORIGIN, self.proxy_base.as_str());
        }

        let response = request.send().await.map_err(|source| ApiError::Transport {
            url: endpoint.url.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                url: endpoint.url.clone(),
                status: status.as_u16(),
                reason,
            });
        }

        response.json::<Value>().await.map_err(|source| ApiError::Transport {
            url: endpoint.url.clone(),
            source,
        })
    }

    /// POSTs `body` to the proxy, then to the direct endpoint. First success
    /// wins; when every candidate fails the proxy error is the one returned.
    pub async fn post_with_fallback(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        first_success(self.chain(path), |endpoint| async move {
            self.send_json(&endpoint, body).await
        })
        .await
    }

    /// Typed POST against the direct endpoint, with an optional bearer.
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
        bearer: Option<&str>,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.direct_base, path);
        let mut request = self.http.post(&url).json(body).timeout(self.timeout);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
                reason,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Transport { url, source })
    }

    /// Typed GET against the direct endpoint.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        bearer: Option<&str>,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.direct_base, path);
        let mut request = self.http.get(&url).timeout(self.timeout);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
                reason,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Transport { url, source })
    }

    /// Raw PUT for the presigned upload. Deliberately unauthenticated: the
    /// credential is embedded in the URL itself.
    pub async fn put_bytes(
        &self,
        url: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ApiError> {
        let response = self
            .http
            .put(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                reason,
            });
        }

        Ok(())
    }
}

/// Runs `attempt` against each candidate in order. The first success is
/// returned as-is; if all candidates fail the error of the FIRST attempt is
/// the one surfaced, so callers see the primary endpoint's failure.
pub(crate) async fn first_success<T, F, Fut>(
    candidates: Vec<Endpoint>,
    mut attempt: F,
) -> Result<T, ApiError>
where
    F: FnMut(Endpoint) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut first_err: Option<ApiError> = None;

    for endpoint in candidates {
        let url = endpoint.url.clone();
        match attempt(endpoint).await {
            Ok(value) => return Ok(value),
            Err(err) => {
                warn!("request to {} failed: {}", url, err);
                if first_err.is_none() {
                    first_err = Some(err);
                }
            }
        }
    }

    Err(first_err.unwrap_or(ApiError::NoEndpoints))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<Endpoint> {
        vec![
            Endpoint {
                url: "http://proxy/modify-tags".to_string(),
                cross_origin: false,
            },
            Endpoint {
                url: "http://direct/modify-tags".to_string(),
                cross_origin: true,
            },
        ]
    }

    fn failure(url: &str) -> ApiError {
        ApiError::Status {
            url: url.to_string(),
            status: 504,
            reason: "gateway timeout".to_string(),
        }
    }

    #[tokio::test]
    async fn test_second_candidate_wins_when_first_fails() {
        let result = first_success(candidates(), |endpoint| async move {
            if endpoint.url.contains("proxy") {
                Err(failure(&endpoint.url))
            } else {
                Ok("payload")
            }
        })
        .await;

        assert_eq!(result.unwrap(), "payload");
    }

    #[tokio::test]
    async fn test_first_error_is_surfaced_when_all_fail() {
        let result: Result<(), ApiError> =
            first_success(candidates(), |endpoint| async move { Err(failure(&endpoint.url)) })
                .await;

        match result.unwrap_err() {
            ApiError::Status { url, .. } => assert_eq!(url, "http://proxy/modify-tags"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_first_success_short_circuits() {
        let mut attempts = 0;
        let result = first_success(candidates(), |_| {
            attempts += 1;
            async { Ok(42) }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts, 1);
    }

    #[tokio::test]
    async fn test_no_candidates() {
        let result: Result<(), ApiError> =
            first_success(Vec::new(), |_| async { Ok(()) }).await;
        assert!(matches!(result.unwrap_err(), ApiError::NoEndpoints));
    }
}
