use crate::evento::model::{parse_local_date_time, EventDraft, EventField};
use std::collections::BTreeMap;
use tracing::debug;

pub const NAME_REQUIRED: &str = "O nome do evento é obrigatório.";
pub const DESCRIPTION_REQUIRED: &str = "A descrição é obrigatória.";
pub const LOCATION_REQUIRED: &str = "O local do evento é obrigatório.";
pub const START_REQUIRED: &str = "A data de início é obrigatória.";
pub const END_REQUIRED: &str = "A data de finalização é obrigatória.";
pub const END_BEFORE_START: &str = "A data final deve ser posterior à data de início.";
pub const INVALID_DATE: &str = "Data inválida.";

pub type FieldErrors = BTreeMap<EventField, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub errors: FieldErrors,
}

/// Runs every check against the draft, collecting one message per field.
///
/// The date-order check only runs once both dates are present.
pub fn validate(draft: &EventDraft) -> Validation {
    let mut errors = FieldErrors::new();

    let required = [
        (EventField::Name, NAME_REQUIRED),
        (EventField::Description, DESCRIPTION_REQUIRED),
        (EventField::Location, LOCATION_REQUIRED),
    ];
    for (field, message) in required {
        if draft.get(field).trim().is_empty() {
            errors.insert(field, message.to_string());
        }
    }

    if draft.starts_at.is_empty() {
        errors.insert(EventField::StartsAt, START_REQUIRED.to_string());
    }
    if draft.ends_at.is_empty() {
        errors.insert(EventField::EndsAt, END_REQUIRED.to_string());
    }

    for field in [
        EventField::Name,
        EventField::Description,
        EventField::Location,
        EventField::EventLink,
        EventField::ImageLink,
    ] {
        let Some(max_len) = field.max_len() else {
            continue;
        };

        if draft.get(field).chars().count() > max_len {
            errors
                .entry(field)
                .or_insert_with(|| format!("Use no máximo {} caracteres.", max_len));
        }
    }

    if !draft.starts_at.is_empty() && !draft.ends_at.is_empty() {
        check_date_order(draft, &mut errors);
    }

    debug!("Draft validated with {} errors", errors.len());

    Validation {
        valid: errors.is_empty(),
        errors,
    }
}

fn check_date_order(draft: &EventDraft, errors: &mut FieldErrors) {
    let start = parse_local_date_time(&draft.starts_at);
    let end = parse_local_date_time(&draft.ends_at);

    match (start, end) {
        (Ok(start), Ok(end)) => {
            if start >= end {
                errors.insert(EventField::EndsAt, END_BEFORE_START.to_string());
            }
        }
        (start, end) => {
            if start.is_err() {
                errors.insert(EventField::StartsAt, INVALID_DATE.to_string());
            }
            if end.is_err() {
                errors.insert(EventField::EndsAt, INVALID_DATE.to_string());
            }
        }
    }
}
