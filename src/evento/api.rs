use super::dto::{ErrorResponse, EventResponse};
use super::model::{Event, EventDraft};
use async_trait::async_trait;
use lazy_static::lazy_static;
use reqwest::{Client, Response, StatusCode, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

pub const DEFAULT_EVENTS_URL: &str = "http://localhost:8080/api/v1/evento";

lazy_static! {
    static ref REST_CLIENT: Client = Client::new();
}

/// The REST collaborator both flows talk to
#[async_trait]
pub trait EventsBackend: Send + Sync {
    /// Creates an event. The backend may answer with the created resource or an empty body.
    async fn create(&self, draft: &EventDraft) -> Result<Option<Event>, APIError>;

    /// Returns every event, in the order the backend sent them
    async fn get_all(&self) -> Result<Vec<Event>, APIError>;
}

#[derive(Debug, Clone)]
pub struct EventsAPI {
    endpoint: Url,
}

impl EventsAPI {
    pub fn new(endpoint: Url) -> Self {
        Self { endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn rejection(response: Response) -> APIError {
        let status = response.status().as_u16();
        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|body| body.message),
            Err(e) => {
                warn!("Could not read rejection body: {}", e);
                None
            }
        };

        error!(status, message = ?message, "Request rejected");

        APIError::Rejected { status, message }
    }
}

#[async_trait]
impl EventsBackend for EventsAPI {
    #[tracing::instrument(skip(self, draft), fields(endpoint = %self.endpoint, nome = %draft.name))]
    async fn create(&self, draft: &EventDraft) -> Result<Option<Event>, APIError> {
        info!("Creating event");

        let response = REST_CLIENT
            .post(self.endpoint.clone())
            .json(draft)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => {
                let body = response.text().await?;

                if body.trim().is_empty() {
                    info!("Event created (empty body)");
                    return Ok(None);
                }

                match serde_json::from_str::<EventResponse>(&body) {
                    Ok(created) => {
                        info!(id = %created.id, "Event created");
                        Ok(Some(created.to_model()))
                    }
                    Err(e) => {
                        warn!("Event created but response could not be parsed: {:?}", e);
                        Ok(None)
                    }
                }
            }
            status if status.is_success() => {
                warn!(status = status.as_u16(), "Unexpected success status");
                Err(APIError::UnexpectedStatus(status.as_u16()))
            }
            _ => Err(Self::rejection(response).await),
        }
    }

    #[tracing::instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn get_all(&self) -> Result<Vec<Event>, APIError> {
        info!("Getting all events");

        let response = REST_CLIENT.get(self.endpoint.clone()).send().await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let json_response = response.text().await?;

        match serde_json::from_str::<Vec<Value>>(&json_response) {
            Ok(parsed_response) => {
                info!("Got {} events", parsed_response.len());

                Ok(parsed_response
                    .into_iter()
                    .enumerate()
                    .filter_map(|(index, item)| to_event(index, item))
                    .collect())
            }
            Err(e) => {
                error!("Response parse failed: {:?}", e);
                Err(APIError::InvalidResponse(e))
            }
        }
    }
}

/// Converts one listed item, skipping it when it does not match the event shape
fn to_event(index: usize, item: Value) -> Option<Event> {
    let id = item.get("id").cloned();

    match serde_json::from_value::<EventResponse>(item) {
        Ok(response) => Some(response.to_model()),
        Err(e) => {
            warn!(index, id = ?id, "Skipping malformed event: {}", e);
            None
        }
    }
}

#[derive(Debug, Error)]
pub enum APIError {
    #[error("could not reach the backend: {0}")]
    Request(#[from] reqwest::Error),
    #[error("backend rejected the request with status {status}")]
    Rejected { status: u16, message: Option<String> },
    #[error("backend answered with unexpected status {0}")]
    UnexpectedStatus(u16),
    #[error("backend sent an invalid response: {0}")]
    InvalidResponse(serde_json::Error),
}

impl APIError {
    /// The `message` the backend attached to a rejection, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            APIError::Rejected {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}
