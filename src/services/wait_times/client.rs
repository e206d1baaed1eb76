use std::time::Duration;

use reqwest::header::RETRY_AFTER;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::cache::RateLimiter;
use crate::error::AppError;
use crate::models::theme_park::WaitSource;

/// HTTP plumbing shared by the wait-time providers: bounded timeout, rate
/// limiting and 429 backoff.
pub struct ProviderClient {
    source: WaitSource,
    http: reqwest::Client,
    base_url: String,
    limiter: RateLimiter,
}

impl ProviderClient {
    pub fn new(
        source: WaitSource,
        base_url: &str,
        timeout: Duration,
        max_requests: usize,
        window: Duration,
    ) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build {} client: {}", source, e)))?;

        Ok(Self {
            source,
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            limiter: RateLimiter::new(max_requests, window),
        })
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    fn rate_limited(&self) -> AppError {
        AppError::RateLimited {
            provider: self.source.to_string(),
        }
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        bearer: Option<&str>,
    ) -> Result<T, AppError> {
        if !self.limiter.try_acquire() {
            debug!("{} request to {} held back by rate limiter", self.source, path);
            return Err(self.rate_limited());
        }

        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.get(&url).query(query);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::upstream(self.source.as_str(), e))?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or_else(|| self.limiter.window());
            warn!(
                "{} answered 429, backing off for {}s",
                self.source,
                retry_after.as_secs()
            );
            self.limiter.back_off(retry_after);
            return Err(self.rate_limited());
        }
        if !status.is_success() {
            return Err(AppError::upstream(
                self.source.as_str(),
                format!("HTTP {} from {}", status, path),
            ));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| {
                AppError::upstream(
                    self.source.as_str(),
                    format!("bad payload from {}: {}", path, e),
                )
            })
    }
}
