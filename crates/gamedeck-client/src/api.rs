use std::future::Future;

use bytes::Bytes;
use reqwest::StatusCode;

use gamedeck_core::{EnvelopeError, ErrorBody, Game, GameCreatePayload, unwrap_list};

use crate::config::ClientConfig;
use crate::error::ApiError;

/// Outcome of a create request. The service's reply is kept verbatim and
/// never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// The two operations the store needs from the games service.
pub trait GamesApi: Send + Sync {
    /// Fetch the full game list, unwrapped from its `{"data": [...]}` envelope.
    fn list_games(&self) -> impl Future<Output = Result<Vec<Game>, ApiError>> + Send;

    /// Submit a new game. Any response that arrives counts as success.
    fn create_game(
        &self,
        payload: &GameCreatePayload,
    ) -> impl Future<Output = Result<CreateResponse, ApiError>> + Send;
}

/// `GamesApi` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGamesApi {
    client: reqwest::Client,
    games_url: reqwest::Url,
}

impl HttpGamesApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().build()?;
        Self::with_client(client, config)
    }

    /// Build on an existing `reqwest::Client`, e.g. one shared with the host.
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self {
            client,
            games_url: config.games_url()?,
        })
    }

    pub fn games_url(&self) -> &reqwest::Url {
        &self.games_url
    }
}

impl GamesApi for HttpGamesApi {
    async fn list_games(&self) -> Result<Vec<Game>, ApiError> {
        let resp = self.client.get(self.games_url.clone()).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                message: ErrorBody::message_from(&body),
            });
        }

        let games = unwrap_list::<Game>(&body).inspect_err(|e| {
            if *e == EnvelopeError::BareArray {
                tracing::warn!(
                    url = %self.games_url,
                    "Games service sent a bare array instead of an envelope"
                );
            }
        })?;
        tracing::debug!(count = games.len(), "Fetched game list");
        Ok(games)
    }

    async fn create_game(&self, payload: &GameCreatePayload) -> Result<CreateResponse, ApiError> {
        let resp = self
            .client
            .post(self.games_url.clone())
            .json(payload)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        tracing::debug!(%status, name = %payload.name, "Create request settled");
        Ok(CreateResponse { status, body })
    }
}
