use anyhow::Result;
use clap::{Parser, Subcommand};
use evento::cadastro::form::RegistrationForm;
use evento::config::env_loader::load_config;
use evento::evento::api::EventsAPI;
use evento::evento::model::{EventField, EventKind};
use evento::listagem::page::{ListingPage, ListingState};
use evento::render;
use evento::tracing::{setup_loki, shutdown_loki};
use std::process::ExitCode;
use strum::IntoEnumIterator;
use tracing::info;

#[derive(Parser)]
#[command(name = "evento")]
#[command(about = "Register and list events on the Evento backend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the featured event and the ones after it
    Listar,
    /// Register a new event
    Cadastrar {
        /// Event name (max 150 characters)
        #[arg(long)]
        nome: String,

        /// Description (max 500 characters)
        #[arg(long)]
        descricao: String,

        /// One of the kinds listed by `evento tipos`
        #[arg(long, default_value_t = EventKind::default().to_string())]
        tipo: String,

        /// Venue (max 150 characters)
        #[arg(long)]
        local: String,

        /// Start, e.g. "2024-05-01T09:00"
        #[arg(long)]
        inicio: String,

        /// End, strictly after the start
        #[arg(long)]
        fim: String,

        /// Ticket page
        #[arg(long, default_value = "")]
        link_evento: String,

        /// Cover image URL
        #[arg(long, default_value = "")]
        link_imagem: String,
    },
    /// List the event kinds
    Tipos,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config()?;

    let loki = setup_loki(config.loki_url.as_ref()).await;
    let api = EventsAPI::new(config.api_url.clone());

    info!("Using backend at {}", api.endpoint());

    let exit_code = match cli.command {
        Commands::Listar => {
            let mut page = ListingPage::new();
            let state = page.load(&api).await;

            println!("{}", render::listing(state));

            if matches!(state, ListingState::Failed(_)) {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Commands::Cadastrar {
            nome,
            descricao,
            tipo,
            local,
            inicio,
            fim,
            link_evento,
            link_imagem,
        } => {
            let mut form = RegistrationForm::new();

            form.update_field(EventField::Name, nome)?;
            form.update_field(EventField::Kind, tipo)?;
            form.update_field(EventField::Description, descricao)?;
            form.update_field(EventField::Location, local)?;
            form.update_field(EventField::StartsAt, inicio)?;
            form.update_field(EventField::EndsAt, fim)?;
            form.update_field(EventField::EventLink, link_evento)?;
            form.update_field(EventField::ImageLink, link_imagem)?;

            let result = form.submit(&api).await;

            println!("{}", render::registration(&form));

            match result {
                Ok(Some(created)) => {
                    println!("id: {}", created.id);
                    ExitCode::SUCCESS
                }
                Ok(None) => ExitCode::SUCCESS,
                Err(_) => ExitCode::FAILURE,
            }
        }
        Commands::Tipos => {
            EventKind::iter().for_each(|kind| println!("{:<12} {}", kind.to_string(), kind.label()));

            ExitCode::SUCCESS
        }
    };

    shutdown_loki(loki).await;

    Ok(exit_code)
}
