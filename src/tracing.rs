use std::io;
use tokio::task::JoinHandle;
use tracing::{info, warn, Level};
use tracing_loki::url::Url;
use tracing_loki::{BackgroundTask, BackgroundTaskController};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{filter, fmt};

fn build_loki_layer(
    base_url: Url,
) -> Result<
    (
        tracing_loki::Layer,
        BackgroundTaskController,
        BackgroundTask,
    ),
    tracing_loki::Error,
> {
    tracing_loki::builder()
        .label("service", "evento")?
        .build_controller_url(base_url)
}

/// Logs to stdout, and to Loki as well when it is configured and reachable.
///
/// The returned controller must be shut down before exiting so buffered logs are flushed.
pub async fn setup_loki(
    loki_url: Option<&Url>,
) -> Option<(BackgroundTaskController, JoinHandle<()>)> {
    let filter = filter::Targets::new()
        .with_target("evento", Level::TRACE)
        .with_default(Level::WARN);

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stdout));

    match loki_url {
        None => {
            registry.init();
            warn!("Loki URL not provided. Continuing without it.");
        }
        Some(base_url) => match reqwest::get(base_url.clone()).await {
            Ok(_) => match build_loki_layer(base_url.clone()) {
                Ok((layer, controller, task)) => {
                    registry.with(layer).init();
                    let handle = tokio::spawn(task);

                    info!("Loki initialized");

                    return Some((controller, handle));
                }
                Err(err) => {
                    registry.init();
                    warn!("Couldn't build the Loki layer ({}). Continuing without it.", err);
                }
            },
            Err(_) => {
                registry.init();
                warn!("Couldn't connect to Loki. Continuing without it.");
            }
        },
    };

    None
}

pub async fn shutdown_loki(loki: Option<(BackgroundTaskController, JoinHandle<()>)>) {
    if let Some((controller, handle)) = loki {
        controller.shutdown().await;

        if let Err(err) = handle.await {
            warn!("Loki task did not finish cleanly: {}", err);
        }
    }
}
