//! Plain-text views of both pages, as printed by the binary.

use crate::cadastro::form::{BannerKind, ErrorKey, RegistrationForm};
use crate::evento::model::Event;
use crate::listagem::page::ListingState;
use itertools::Itertools;

const FEATURED_BADGE: &str = "★ Evento Destaque";
const TICKETS_LABEL: &str = "Acessar Ingressos";
const NEXT_EVENTS_TITLE: &str = "Próximos Eventos";

pub fn listing(state: &ListingState) -> String {
    match state {
        ListingState::Loading => "Sincronizando calendário...".to_string(),
        ListingState::Failed(error) => [
            "Ops! Algo deu errado.",
            error.message(),
            "Tentar Novamente: execute `evento listar` outra vez.",
        ]
        .join("\n"),
        ListingState::Empty => [
            "Agenda Vazia",
            "Não há eventos programados para os próximos dias. Que tal criar o primeiro agora?",
            "Criar Primeiro Evento: `evento cadastrar --help`",
        ]
        .join("\n"),
        ListingState::Loaded { featured, rest } => {
            let mut sections = vec![featured_card(featured)];

            if !rest.is_empty() {
                sections.push(format!(
                    "{} ({} eventos encontrados)\n{}",
                    NEXT_EVENTS_TITLE,
                    rest.len(),
                    rest.iter().map(mini_card).join("\n")
                ));
            }

            sections.join("\n\n")
        }
    }
}

fn featured_card(event: &Event) -> String {
    let mut lines = vec![
        FEATURED_BADGE.to_string(),
        event.name.to_uppercase(),
        event.description.clone(),
        format!("Quando: {}", event.schedule().full_schedule),
        format!("Onde: {}", event.location),
        format!("Tipo: {}", event.kind.label()),
    ];

    if let Some(link) = &event.event_link {
        lines.push(format!("{}: {}", TICKETS_LABEL, link));
    }
    if let Some(image) = &event.image_link {
        lines.push(format!("Imagem: {}", image));
    }

    lines.join("\n")
}

fn mini_card(event: &Event) -> String {
    format!(
        "- [{}] {} | {} | {}",
        event.id,
        event.name,
        event.schedule().full_schedule,
        event.description
    )
}

/// Status banner followed by one line per recorded field error
pub fn registration(form: &RegistrationForm) -> String {
    let banner = form.status_banner().map(|banner| match banner.kind {
        BannerKind::Success => format!("✔ {}", banner.message),
        BannerKind::Error => format!("✖ {}", banner.message),
    });

    let field_errors = form
        .errors()
        .iter()
        .filter(|(key, _)| **key != ErrorKey::Api)
        .map(|(key, message)| format!("  {}: {}", key, message));

    banner.into_iter().chain(field_errors).join("\n")
}
