use std::io::ErrorKind;
use std::io::Result;
use std::sync::Arc;
use tokio::fs;
use tokio::signal;
use tokio::sync::mpsc;
use tokio::sync::oneshot;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::instrument;
use tracing::warn;
use tracing::Level;

mod board;
mod config;
mod console;
mod market;

use crate::board::controller::run_board_loop;
use crate::board::view::{render_html, render_table, BoardView};
use crate::config::Config;
use crate::console::spawn_console_reader;
use crate::market::client::{CoinSource, CoinStatsClient};

const CONFIG_FILE_PATH: &str = "app_config.json";

async fn read_config(file_path: &str) -> Result<Config> {
    let config_string = match fs::read_to_string(file_path).await {
        Ok(config_string) => config_string,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => return Err(e),
    };
    let config: Config = serde_json::from_str(config_string.as_str())?;
    Ok(config)
}

#[instrument(skip_all)]
async fn consume_views(
    mut view_receiver: mpsc::UnboundedReceiver<BoardView>,
    currency: String,
    html_output: Option<String>,
) {
    while let Some(view) = view_receiver.recv().await {
        println!("{}", render_table(&view, &currency));

        if let Some(path) = &html_output {
            match fs::write(path, render_html(&view, &currency)).await {
                Ok(_) => debug!("Wrote {} rows to {}", view.rows.len(), path),
                Err(e) => warn!("Error writing HTML view to {}: {}", path, e),
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config_result = read_config(CONFIG_FILE_PATH).await;
    let max_level = match &config_result {
        Ok(config) => config.log_level(),
        Err(_) => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .init();

    let config = match config_result {
        Ok(config) => config,
        Err(error) => {
            error!("Error reading config file {}: {}", CONFIG_FILE_PATH, error);
            return;
        }
    };

    info!(
        "Polling {} every {}s for {} coins in {}",
        config.base_url,
        config.refresh_period().as_secs(),
        config.limit,
        config.currency
    );

    let source: Arc<dyn CoinSource> = match CoinStatsClient::new(
        &config.base_url,
        config.query(),
        config.request_timeout(),
    ) {
        Ok(client) => Arc::new(client),
        Err(error) => {
            error!("Error creating HTTP client: {}", error);
            return;
        }
    };

    let (input_sender, input_receiver) = mpsc::unbounded_channel();
    let (view_sender, view_receiver) = mpsc::unbounded_channel();
    let (stop_signal_send, stop_signal_recv) = oneshot::channel();
    let (quit_sender, quit_receiver) = oneshot::channel();

    spawn_console_reader(input_sender, quit_sender);

    let view_task = tokio::spawn(consume_views(
        view_receiver,
        config.currency.clone(),
        config.html_output.clone(),
    ));

    tokio::spawn(async move {
        tokio::select! {
            result = signal::ctrl_c() => {
                if let Err(e) = result {
                    error!("Failed to listen for Ctrl+C: {}", e);
                }
                info!("Ctrl+C pressed. Stopping...");
            }
            Ok(()) = quit_receiver => {
                info!("Quit command received. Stopping...");
            }
        }

        if stop_signal_send.send(()).is_err() {
            warn!("Board loop is already stopped");
        }
    });

    let state = run_board_loop(
        source,
        config.refresh_period(),
        input_receiver,
        view_sender,
        stop_signal_recv,
    )
    .await;

    if let Err(e) = view_task.await {
        warn!("View consumer task failed: {}", e);
    }
    info!(
        "Board stopped with {} of {} coins displayed (search '{}', limit {:?}).",
        state.filtered().len(),
        state.snapshot().len(),
        state.search(),
        state.row_limit()
    );
}
