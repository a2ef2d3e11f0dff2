//! First-success-wins race orchestration
//!
//! One task per candidate, unbounded fan-out (the candidate set is small and
//! fixed). Results are collected in completion order; the first committed
//! booking latches as the winner. In-flight flows are never cancelled — they
//! run to natural completion so the remote session is not left in a partial
//! state — but their results after the latch only count as diagnostics.

use crate::flow::{run_flow, FlowSettings};
use crate::outcome::{FlowResult, RaceOutcome};
use chrono::Utc;
use courtrace_core::{Candidate, Credentials, RaceConfig};
use courtrace_http::{BookingApi, Gateway};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Race every candidate concurrently and return the overall outcome.
///
/// `make_api` builds one gateway per candidate — flows never share a session,
/// since the remote API keys server-side state to it.
///
/// The orchestrator itself is infallible: whatever the flows do, it produces
/// a [`RaceOutcome`].
pub async fn run_race<A, F>(
    settings: Arc<FlowSettings>,
    candidates: &[Candidate],
    make_api: F,
) -> RaceOutcome
where
    A: BookingApi + 'static,
    F: Fn(&Candidate) -> A,
{
    let run_id = Uuid::new_v4();
    info!(%run_id, candidates = candidates.len(), "starting race");

    let mut tasks = JoinSet::new();
    for candidate in candidates {
        let api = make_api(candidate);
        let settings = Arc::clone(&settings);
        let candidate = candidate.clone();
        let span = info_span!("flow", %run_id, candidate = %candidate.label);

        tasks.spawn(
            async move { run_flow(&api, &settings, &candidate, Utc::now()).await }.instrument(span),
        );
    }

    let mut winner: Option<FlowResult> = None;
    let mut rest = Vec::new();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(result) if result.is_success() => {
                if winner.is_none() {
                    info!(candidate = %result.candidate.label, "race won");
                    winner = Some(result);
                } else {
                    // The winner is latched; a second success is only logged.
                    warn!(
                        candidate = %result.candidate.label,
                        "success after the race was already won"
                    );
                    rest.push(result);
                }
            }
            Ok(result) => rest.push(result),
            Err(join_error) => {
                error!(%join_error, "flow task did not complete");
            }
        }
    }

    match winner {
        Some(winner) => RaceOutcome::Won { winner, rest },
        None => RaceOutcome::AllFailed(rest),
    }
}

/// Race over real HTTP: one [`Gateway`] per candidate, built from the config
/// and runtime credentials.
pub async fn run_race_http(config: &RaceConfig, credentials: &Credentials) -> RaceOutcome {
    let settings = Arc::new(FlowSettings::from_config(config, credentials.secret.clone()));

    run_race(settings, &config.candidates, |_| {
        Gateway::new(
            config.base_url.clone(),
            config.utility_id,
            credentials.token.clone(),
            &config.device,
        )
    })
    .await
}
