//! Full-protocol race test over real HTTP against a mock Axum server

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use courtrace_checksum::sign;
use courtrace_core::{Candidate, Credentials, DeviceIdentity, RaceConfig};
use courtrace_race::{run_race_http, RaceOutcome};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Default)]
struct ServerState {
    commits: Mutex<Vec<(String, Value)>>,
}

async fn booking_time() -> Json<Value> {
    Json(json!({
        "data": [
            {"id": 571, "fromTime": 1_700_132_400_000_i64},
            {"id": 575, "fromTime": 1_700_139_600_000_i64}
        ]
    }))
}

async fn empty_listing() -> Json<Value> {
    Json(json!({"data": []}))
}

/// Accept only place 802; everything else is already taken.
async fn booking(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let token = headers
        .get("x-vinhome-token")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.commits.lock().unwrap().push((token, body.clone()));

    if body["bookingRequests"][0]["placeId"] == json!(802) {
        Json(json!({"code": 200, "message": "booked"}))
    } else {
        Json(json!({"code": 409, "message": "Slot already taken"}))
    }
}

async fn start_server(state: Arc<ServerState>) -> SocketAddr {
    let app = Router::new()
        .route("/utility/75/booking-time", get(booking_time))
        .route("/utility/75/classifies", get(empty_listing))
        .route("/utility/75/places", get(empty_listing))
        .route("/utility/ticket-info", get(empty_listing))
        .route("/customer-utility/booking", post(booking))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start
    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

    addr
}

fn config(addr: SocketAddr) -> RaceConfig {
    RaceConfig {
        base_url: format!("http://{addr}"),
        utility_id: 75,
        classify_id: 118,
        target_hour: None,
        days_ahead: 1,
        candidates: vec![
            Candidate {
                place_id: 801,
                place_utility_id: 625,
                time_constraint_id: 571,
                label: "Court 2 (S1.01)".to_string(),
            },
            Candidate {
                place_id: 802,
                place_utility_id: 626,
                time_constraint_id: 571,
                label: "Court 1 (S1.02)".to_string(),
            },
        ],
        device: DeviceIdentity::default(),
    }
}

#[tokio::test]
async fn test_race_over_http_first_accepted_commit_wins() {
    let state = Arc::new(ServerState::default());
    let addr = start_server(Arc::clone(&state)).await;

    let credentials = Credentials {
        token: "test-token".to_string(),
        secret: "S".to_string(),
    };

    let outcome = run_race_http(&config(addr), &credentials).await;

    match outcome {
        RaceOutcome::Won { winner, rest } => {
            assert_eq!(winner.candidate.place_id, 802);
            let confirmation = winner.outcome.as_ref().unwrap();
            assert_eq!(confirmation.message.as_deref(), Some("booked"));

            assert_eq!(rest.len(), 1);
            assert_eq!(rest[0].candidate.place_id, 801);
            let failure = rest[0].outcome.as_ref().unwrap_err();
            assert!(failure.to_string().contains("Slot already taken"));
        }
        other => panic!("expected a won race, got {other:?}"),
    }

    // Both candidates reached the commit step, each with the shared token
    // and a checksum matching its own payload fields.
    let commits = state.commits.lock().unwrap();
    assert_eq!(commits.len(), 2);

    for (token, body) in commits.iter() {
        assert_eq!(token, "test-token");

        let entry = &body["bookingRequests"][0];
        let expected = sign(
            entry["utilityId"].as_i64().unwrap(),
            entry["placeId"].as_i64().unwrap(),
            entry["bookingDate"].as_i64().unwrap(),
            entry["timeConstraintId"].as_i64().unwrap(),
            "S",
        );
        assert_eq!(body["cs"].as_str().unwrap(), expected);
    }
}

#[tokio::test]
async fn test_race_over_http_all_rejected() {
    let state = Arc::new(ServerState::default());
    let addr = start_server(Arc::clone(&state)).await;

    let credentials = Credentials {
        token: "test-token".to_string(),
        secret: "S".to_string(),
    };

    // Only candidate 801 competes, and the server rejects it.
    let mut config = config(addr);
    config.candidates.truncate(1);

    let outcome = run_race_http(&config, &credentials).await;

    match outcome {
        RaceOutcome::AllFailed(results) => {
            assert_eq!(results.len(), 1);
            let failure = results[0].outcome.as_ref().unwrap_err();
            assert!(failure.to_string().contains("Slot already taken"));
        }
        other => panic!("expected all-failed, got {other:?}"),
    }
}
