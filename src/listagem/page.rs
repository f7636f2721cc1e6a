use crate::evento::api::{APIError, EventsBackend};
use crate::evento::model::Event;
use thiserror::Error;
use tracing::{error, info, instrument};

pub const FETCH_ERROR_MESSAGE: &str =
    "Erro ao conectar com o servidor. Verifique se o backend está rodando.";

#[derive(Debug, Error)]
#[error("{}", FETCH_ERROR_MESSAGE)]
pub struct FetchError {
    #[source]
    pub cause: APIError,
}

impl FetchError {
    pub fn message(&self) -> &'static str {
        FETCH_ERROR_MESSAGE
    }
}

/// The featured event and everything after it
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<T> {
    pub featured: Option<T>,
    pub rest: Vec<T>,
}

/// The first event is featured, the others keep their order in `rest`
pub fn partition<T>(events: Vec<T>) -> Partition<T> {
    let mut events = events.into_iter();

    Partition {
        featured: events.next(),
        rest: events.collect(),
    }
}

#[instrument(skip_all)]
pub async fn fetch_all<B>(backend: &B) -> Result<Vec<Event>, FetchError>
where
    B: EventsBackend + ?Sized,
{
    backend.get_all().await.map_err(|cause| {
        error!("Error fetching events: {}", cause);
        FetchError { cause }
    })
}

#[derive(Debug)]
pub enum ListingState {
    Loading,
    Failed(FetchError),
    Empty,
    Loaded { featured: Event, rest: Vec<Event> },
}

/// State of the dashboard page
#[derive(Debug)]
pub struct ListingPage {
    state: ListingState,
}

impl Default for ListingPage {
    fn default() -> Self {
        Self {
            state: ListingState::Loading,
        }
    }
}

impl ListingPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ListingState {
        &self.state
    }

    pub async fn load<B>(&mut self, backend: &B) -> &ListingState
    where
        B: EventsBackend + ?Sized,
    {
        self.state = ListingState::Loading;

        self.state = match fetch_all(backend).await {
            Ok(events) => match partition(events) {
                Partition {
                    featured: Some(featured),
                    rest,
                } => {
                    info!("Featuring '{}' with {} more", featured.name, rest.len());
                    ListingState::Loaded { featured, rest }
                }
                Partition { featured: None, .. } => {
                    info!("Agenda is empty");
                    ListingState::Empty
                }
            },
            Err(e) => ListingState::Failed(e),
        };

        &self.state
    }

    /// Manual retry from the error page
    pub async fn retry<B>(&mut self, backend: &B) -> &ListingState
    where
        B: EventsBackend + ?Sized,
    {
        info!("Retrying");
        self.load(backend).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evento::model::{parse_local_date_time, EventDraft, EventId, EventKind};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeBackend {
        answers: Mutex<Vec<Result<Vec<Event>, APIError>>>,
    }

    impl FakeBackend {
        fn answering(answers: Vec<Result<Vec<Event>, APIError>>) -> Self {
            Self {
                answers: Mutex::new(answers),
            }
        }
    }

    #[async_trait]
    impl EventsBackend for FakeBackend {
        async fn create(&self, _draft: &EventDraft) -> Result<Option<Event>, APIError> {
            Ok(None)
        }

        async fn get_all(&self) -> Result<Vec<Event>, APIError> {
            self.answers.lock().unwrap().remove(0)
        }
    }

    fn event(id: i64, name: &str) -> Event {
        Event {
            id: EventId::Number(id),
            name: name.to_string(),
            description: format!("Sobre {}", name),
            kind: EventKind::Workshop,
            location: "Auditório".to_string(),
            starts_at: parse_local_date_time("2024-05-01T09:00").unwrap(),
            ends_at: parse_local_date_time("2024-05-01T12:00").unwrap(),
            event_link: None,
            image_link: None,
        }
    }

    #[test_log::test]
    fn partition_of_nothing_should_have_no_featured() {
        let result = partition(Vec::<u8>::new());

        assert_eq!(
            result,
            Partition {
                featured: None,
                rest: vec![]
            }
        );
    }

    #[test_log::test]
    fn partition_of_one_should_only_feature_it() {
        assert_eq!(
            partition(vec!["e1"]),
            Partition {
                featured: Some("e1"),
                rest: vec![]
            }
        );
    }

    #[test_log::test]
    fn partition_should_keep_the_backend_order() {
        assert_eq!(
            partition(vec!["e1", "e2", "e3"]),
            Partition {
                featured: Some("e1"),
                rest: vec!["e2", "e3"]
            }
        );
    }

    #[test_log::test]
    fn fetch_error_should_show_the_connectivity_message() {
        let error = FetchError {
            cause: APIError::UnexpectedStatus(204),
        };

        assert_eq!(error.to_string(), FETCH_ERROR_MESSAGE);
        assert_eq!(error.message(), FETCH_ERROR_MESSAGE);
    }

    #[test_log::test(tokio::test)]
    async fn should_start_loading_and_feature_the_first_event() {
        let backend = FakeBackend::answering(vec![Ok(vec![
            event(3, "Rust Meetup"),
            event(1, "Oficina de Git"),
            event(2, "Hackathon"),
        ])]);
        let mut page = ListingPage::new();
        assert!(matches!(page.state(), ListingState::Loading));

        let state = page.load(&backend).await;

        match state {
            ListingState::Loaded { featured, rest } => {
                assert_eq!(featured.name, "Rust Meetup");
                assert_eq!(
                    rest.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
                    vec!["Oficina de Git", "Hackathon"]
                );
            }
            other => panic!("Unexpected state {:?}", other),
        }
    }

    #[test_log::test(tokio::test)]
    async fn no_events_should_show_the_empty_agenda() {
        let backend = FakeBackend::answering(vec![Ok(vec![])]);
        let mut page = ListingPage::new();

        assert!(matches!(page.load(&backend).await, ListingState::Empty));
    }

    #[test_log::test(tokio::test)]
    async fn failure_should_be_recoverable_with_retry() {
        let backend = FakeBackend::answering(vec![
            Err(APIError::Rejected {
                status: 503,
                message: None,
            }),
            Ok(vec![event(1, "Congresso")]),
        ]);
        let mut page = ListingPage::new();

        match page.load(&backend).await {
            ListingState::Failed(error) => assert_eq!(error.message(), FETCH_ERROR_MESSAGE),
            other => panic!("Unexpected state {:?}", other),
        }

        assert!(matches!(
            page.retry(&backend).await,
            ListingState::Loaded { rest, .. } if rest.is_empty()
        ));
    }
}
