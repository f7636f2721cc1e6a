use super::validation::{validate, FieldErrors, Validation};
use crate::evento::api::{APIError, EventsBackend};
use crate::evento::model::{Event, EventDraft, EventField, UnknownEventKind};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use thiserror::Error;
use tracing::{error, info, instrument, warn};

pub const SUBMIT_FALLBACK_MESSAGE: &str = "Falha na conexão ou erro interno do servidor.";
pub const SUCCESS_MESSAGE: &str = "Evento cadastrado com sucesso!";
pub const CHECK_FIELDS_MESSAGE: &str = "Verifique os campos obrigatórios e as datas.";

const SUBMIT_LABEL: &str = "Confirmar Agendamento";
const SUBMITTING_LABEL: &str = "Sincronizando...";

/// Where an error is shown: inline next to a field, or the `api` banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKey {
    Field(EventField),
    Api,
}

impl Display for ErrorKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKey::Field(field) => write!(f, "{}", field),
            ErrorKey::Api => write!(f, "api"),
        }
    }
}

pub type FormErrors = BTreeMap<ErrorKey, String>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBanner {
    pub kind: BannerKind,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{} field(s) need attention", .0.len())]
    Validation(FieldErrors),
    #[error("{0}")]
    Api(String),
    #[error("backend answered with unexpected status {0}")]
    UnexpectedStatus(u16),
    #[error("a submission is already in flight")]
    AlreadySubmitting,
    #[error("no submission is in flight")]
    NotSubmitting,
}

/// State of the registration page: the draft, its errors and the submission status.
///
/// Handlers are meant to be driven one at a time by the UI. A submission can be
/// split into [`RegistrationForm::begin_submit`] and [`RegistrationForm::finish_submit`]
/// around the network call; [`RegistrationForm::submit`] does both.
#[derive(Debug, Default)]
pub struct RegistrationForm {
    draft: EventDraft,
    errors: FormErrors,
    status: SubmissionStatus,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &EventDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn field_error(&self, field: EventField) -> Option<&str> {
        self.errors.get(&ErrorKey::Field(field)).map(String::as_str)
    }

    pub fn api_error(&self) -> Option<&str> {
        self.errors.get(&ErrorKey::Api).map(String::as_str)
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.status != SubmissionStatus::Submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submit_enabled() {
            SUBMIT_LABEL
        } else {
            SUBMITTING_LABEL
        }
    }

    /// Sets a field and drops the error recorded for it, without re-validating.
    ///
    /// Editing after a finished submission also clears the banner.
    pub fn update_field(
        &mut self,
        field: EventField,
        value: impl Into<String>,
    ) -> Result<(), UnknownEventKind> {
        self.draft.set(field, value)?;
        self.errors.remove(&ErrorKey::Field(field));

        if matches!(
            self.status,
            SubmissionStatus::Success | SubmissionStatus::Error
        ) {
            self.status = SubmissionStatus::Idle;
        }

        Ok(())
    }

    /// Validates the draft and replaces the recorded errors with the outcome
    pub fn validate(&mut self) -> Validation {
        let validation = validate(&self.draft);

        self.errors = validation
            .errors
            .iter()
            .map(|(field, message)| (ErrorKey::Field(*field), message.clone()))
            .collect();

        validation
    }

    /// Starts a submission, returning the payload to send.
    ///
    /// Refused while another submission is in flight. An invalid draft ends in
    /// the error status without producing a payload.
    pub fn begin_submit(&mut self) -> Result<EventDraft, SubmitError> {
        if self.status == SubmissionStatus::Submitting {
            warn!("Submit ignored, another one is in flight");
            return Err(SubmitError::AlreadySubmitting);
        }

        self.status = SubmissionStatus::Idle;

        let validation = self.validate();
        if !validation.valid {
            info!("Draft has {} invalid field(s)", validation.errors.len());
            self.status = SubmissionStatus::Error;
            return Err(SubmitError::Validation(validation.errors));
        }

        self.status = SubmissionStatus::Submitting;

        Ok(self.draft.clone())
    }

    /// Applies the backend's answer to a submission started with `begin_submit`.
    ///
    /// An answer arriving with no submission in flight is refused and changes nothing.
    pub fn finish_submit(
        &mut self,
        result: Result<Option<Event>, APIError>,
    ) -> Result<Option<Event>, SubmitError> {
        if self.status != SubmissionStatus::Submitting {
            warn!("Ignoring an answer for a submission that was not started");
            return Err(SubmitError::NotSubmitting);
        }

        match result {
            Ok(created) => {
                info!("Event registered");
                self.draft = EventDraft::default();
                self.errors.clear();
                self.status = SubmissionStatus::Success;

                Ok(created)
            }
            Err(APIError::UnexpectedStatus(status)) => {
                self.status = SubmissionStatus::Error;

                Err(SubmitError::UnexpectedStatus(status))
            }
            Err(err) => {
                error!("Error submitting event: {}", err);

                let message = err
                    .server_message()
                    .unwrap_or(SUBMIT_FALLBACK_MESSAGE)
                    .to_string();

                self.errors = FormErrors::from([(ErrorKey::Api, message.clone())]);
                self.status = SubmissionStatus::Error;

                Err(SubmitError::Api(message))
            }
        }
    }

    #[instrument(skip_all)]
    pub async fn submit<B>(&mut self, backend: &B) -> Result<Option<Event>, SubmitError>
    where
        B: EventsBackend + ?Sized,
    {
        let payload = self.begin_submit()?;
        let result = backend.create(&payload).await;

        self.finish_submit(result)
    }

    pub fn status_banner(&self) -> Option<StatusBanner> {
        match self.status {
            SubmissionStatus::Success => Some(StatusBanner {
                kind: BannerKind::Success,
                message: SUCCESS_MESSAGE.to_string(),
            }),
            SubmissionStatus::Error => Some(StatusBanner {
                kind: BannerKind::Error,
                message: match self.api_error() {
                    Some(api_error) => format!("Erro do Servidor: {}", api_error),
                    None => CHECK_FIELDS_MESSAGE.to_string(),
                },
            }),
            SubmissionStatus::Idle | SubmissionStatus::Submitting => None,
        }
    }
}
