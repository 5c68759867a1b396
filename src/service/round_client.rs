use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue};

use crate::api::round_dto::{RoundRequestDto, RoundResponseDto};
use crate::error::{Error, Result};
use crate::service::endpoint::RoundEndpoint;

/// Opaque session token handed out by the round service.
pub type SessionId = String;

/// The external turn-based service revealing each day's demand in
/// exchange for submitted movements. One implementation talks HTTP, the
/// scripted one replays canned rounds in tests.
#[async_trait]
pub trait RoundService: Send + Sync {
    async fn start_session(&self) -> Result<SessionId>;

    async fn play_round(
        &self,
        session: &SessionId,
        request: &RoundRequestDto,
    ) -> Result<RoundResponseDto>;

    async fn end_session(&self, session: &SessionId) -> Result<()>;
}

/// HTTP client for the round service. The static `API-KEY` credential is
/// attached to every request as a default header; the session token goes
/// out per call as `SESSION-ID`.
///
/// Transport failures are retried with exponential backoff and a little
/// jitter before they surface as a fatal error. Non-success statuses are
/// not retried: the service treats a bad round as a bad round.
pub struct HttpRoundService {
    client: reqwest::Client,
    base_url: String,
    max_attempts: u32,
    retry_base_delay: Duration,
}

impl HttpRoundService {
    pub fn new(base_url: String, api_key: &str) -> Result<HttpRoundService> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "API-KEY",
            HeaderValue::from_str(api_key)
                .map_err(|_| Error::ConfigError("API key is not a valid header value".to_string()))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(HttpRoundService {
            client,
            base_url,
            max_attempts: 3,
            retry_base_delay: Duration::from_millis(500),
        })
    }

    async fn post_with_retry(
        &self,
        endpoint: RoundEndpoint,
        session: Option<&SessionId>,
        body: Option<&RoundRequestDto>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        let mut attempt = 1;

        loop {
            let mut request = self.client.post(&url);
            if let Some(session) = session {
                request = request.header("SESSION-ID", session.as_str());
            }
            request = match body {
                Some(body) => request.json(body),
                None => request.json(&serde_json::json!({})),
            };

            match request.send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => {
                    let status = response.status().as_u16();
                    let body_text = response.text().await.unwrap_or_default();
                    log::error!(
                        "Request to '{}' answered with status {}: {}",
                        endpoint.path(),
                        status,
                        body_text
                    );
                    return Err(Error::ServiceStatusError { status, body: body_text });
                }
                Err(e) if attempt < self.max_attempts => {
                    let backoff = self.backoff_delay(attempt);
                    log::warn!(
                        "Request to '{}' failed (attempt {}/{}): {}. Retrying in {:?}.",
                        endpoint.path(),
                        attempt,
                        self.max_attempts,
                        e,
                        backoff
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(Error::TransportError(e)),
            }
        }
    }

    fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponential = self.retry_base_delay.saturating_mul(2u32.saturating_pow(attempt - 1));
        let jitter_ms: u64 = rand::rng().random_range(0..=250);
        exponential + Duration::from_millis(jitter_ms)
    }
}

#[async_trait]
impl RoundService for HttpRoundService {
    async fn start_session(&self) -> Result<SessionId> {
        let response = self.post_with_retry(RoundEndpoint::StartSession, None, None).await?;

        // The session id is the plain response body.
        let session = response.text().await?.trim().to_string();
        if session.is_empty() {
            return Err(Error::SessionError("service returned an empty session token".to_string()));
        }

        log::info!("Round service session '{}' started.", session);
        Ok(session)
    }

    async fn play_round(
        &self,
        session: &SessionId,
        request: &RoundRequestDto,
    ) -> Result<RoundResponseDto> {
        let response = self
            .post_with_retry(RoundEndpoint::PlayRound, Some(session), Some(request))
            .await?;

        let body_text = response.text().await?;
        let parsed: RoundResponseDto = serde_json::from_str(&body_text)?;

        log::debug!(
            "Round {} answered with {} demand entries.",
            request.day,
            parsed.demand.len()
        );
        Ok(parsed)
    }

    async fn end_session(&self, session: &SessionId) -> Result<()> {
        self.post_with_retry(RoundEndpoint::EndSession, Some(session), None).await?;
        log::info!("Round service session '{}' ended.", session);
        Ok(())
    }
}
