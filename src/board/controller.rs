use crate::board::state::{BoardState, InputEvent};
use crate::board::view::BoardView;
use crate::market::client::CoinSource;
use crate::market::coin::Coin;
use crate::market::error::DataFetchFailure;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;
use tracing::info;
use tracing::instrument;
use tracing::trace;
use tracing::warn;

#[derive(Debug)]
struct FetchOutcome {
    generation: u64,
    result: Result<Vec<Coin>, DataFetchFailure>,
}

/// Polls `source` every `period` (first tick immediately) until the stop
/// signal fires or its sender is dropped.
///
/// A tick that finds the previous fetch still running aborts it and counts it
/// as a failed cycle, so a source slower than `period` still surfaces the
/// fetch advisory. Outcomes older than the last applied one are dropped, so a
/// stale response never replaces a newer snapshot. Every state change publishes a fresh view.
/// Returns the final state.
#[instrument(skip_all, fields(period_ms = period.as_millis() as u64))]
pub async fn run_board_loop(
    source: Arc<dyn CoinSource>,
    period: Duration,
    mut input_receiver: mpsc::UnboundedReceiver<InputEvent>,
    view_sender: mpsc::UnboundedSender<BoardView>,
    mut stop_signal_recv: oneshot::Receiver<()>,
) -> BoardState {
    let mut state = BoardState::default();
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let (outcome_sender, mut outcome_receiver) = mpsc::unbounded_channel::<FetchOutcome>();
    let mut in_flight: Option<JoinHandle<()>> = None;
    let mut generation: u64 = 0;
    let mut applied_generation: u64 = 0;
    let mut inputs_open = true;

    loop {
        tokio::select! {
            _ = &mut stop_signal_recv => {
                info!("Stop signal received, quit polling loop");
                break;
            }
            _ = ticker.tick() => {
                if let Some(handle) = in_flight.take() {
                    if !handle.is_finished() {
                        handle.abort();
                        let superseded = DataFetchFailure::Other(format!(
                            "no response within {}ms, superseded by the next tick",
                            period.as_millis()
                        ));
                        applied_generation = generation;
                        apply_outcome(&mut state, FetchOutcome { generation, result: Err(superseded) });
                        publish_view(&view_sender, &state);
                    }
                }

                generation += 1;
                trace!("Timer ticked, starting fetch #{}", generation);

                let source = Arc::clone(&source);
                let sender = outcome_sender.clone();
                let current = generation;
                in_flight = Some(tokio::spawn(async move {
                    let result = source.fetch_coins().await;
                    let _ = sender.send(FetchOutcome { generation: current, result });
                }));
            }
            Some(outcome) = outcome_receiver.recv() => {
                if outcome.generation <= applied_generation {
                    trace!("Dropping stale outcome of fetch #{}", outcome.generation);
                } else {
                    applied_generation = outcome.generation;
                    apply_outcome(&mut state, outcome);
                    publish_view(&view_sender, &state);
                }
            }
            event = input_receiver.recv(), if inputs_open => {
                match event {
                    Some(event) => {
                        debug!("Applying input {:?}", event);
                        state.apply_input(event);
                        publish_view(&view_sender, &state);
                    }
                    None => {
                        trace!("Input channel closed");
                        inputs_open = false;
                    }
                }
            }
        }
    }

    if let Some(handle) = in_flight.take() {
        handle.abort();
    }

    state
}

fn apply_outcome(state: &mut BoardState, outcome: FetchOutcome) {
    match outcome.result {
        Ok(coins) => {
            debug!("Fetch #{} returned {} coins", outcome.generation, coins.len());
            state.apply_snapshot(coins);
        }
        Err(error) => {
            warn!("Error fetching coin list (fetch #{}): {}", outcome.generation, error);
            state.record_fetch_failure();
        }
    }
}

fn publish_view(view_sender: &mpsc::UnboundedSender<BoardView>, state: &BoardState) {
    if view_sender.send(state.view()).is_err() {
        trace!("View receiver is dropped, view not published");
    }
}
