//! State HTTP endpoint for the display frontend
//!
//! Serves the latest clock snapshot as JSON. The frontend polls /state (or
//! long-polls /poll to wake on the next change signal) and re-renders;
//! /waypoints exposes the raw pass-through positional data.

use crate::io::waypoints::WaypointStore;
use crate::services::notifier::ChangeNotifier;
use crate::services::tracker::ClockSnapshot;
use bytes::Bytes;
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info};

/// Encode a snapshot for the frontend
fn format_state(snapshot: &ClockSnapshot) -> String {
    serde_json::to_string(snapshot).expect("snapshot serialization should not fail")
}

fn json_response(body: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(body)))
        .expect("static response should not fail")
}

/// Handle HTTP requests
async fn handle_request(
    req: Request<hyper::body::Incoming>,
    snapshot_rx: watch::Receiver<ClockSnapshot>,
    waypoints: WaypointStore,
    changes: ChangeNotifier,
) -> Result<Response<Full<Bytes>>, Infallible> {
    match (req.method(), req.uri().path()) {
        (&Method::GET, "/state") => Ok(json_response(format_state(&snapshot_rx.borrow()))),
        (&Method::GET, "/poll") => {
            // Long-poll: answer with fresh state after the next change
            // signal. A lagged or closed signal still answers with the
            // current state rather than erroring.
            let mut rx = changes.subscribe();
            let _ = rx.recv().await;
            Ok(json_response(format_state(&snapshot_rx.borrow())))
        }
        (&Method::GET, "/waypoints") => Ok(json_response(waypoints.to_json().to_string())),
        (&Method::GET, "/health") => Ok(Response::builder()
            .status(StatusCode::OK)
            .body(Full::new(Bytes::from("ok")))
            .expect("static response should not fail")),
        _ => Ok(Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Full::new(Bytes::from("Not Found")))
            .expect("static response should not fail")),
    }
}

/// Start the state HTTP server
pub async fn start_state_server(
    port: u16,
    snapshot_rx: watch::Receiver<ClockSnapshot>,
    waypoints: WaypointStore,
    changes: ChangeNotifier,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    info!(port = %port, "state_server_started");

    loop {
        tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok((stream, _addr)) => {
                        let io = TokioIo::new(stream);
                        let snapshot_rx = snapshot_rx.clone();
                        let waypoints = waypoints.clone();
                        let changes = changes.clone();

                        tokio::spawn(async move {
                            let service = service_fn(move |req| {
                                let snapshot_rx = snapshot_rx.clone();
                                let waypoints = waypoints.clone();
                                let changes = changes.clone();
                                async move { handle_request(req, snapshot_rx, waypoints, changes).await }
                            });

                            if let Err(e) = http1::Builder::new()
                                .serve_connection(io, service)
                                .await
                            {
                                error!(error = %e, "state_http_error");
                            }
                        });
                    }
                    Err(e) => {
                        error!(error = %e, "state_accept_error");
                    }
                }
            }
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    info!("state_server_shutdown");
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::tracker::PersonLocation;

    #[test]
    fn test_format_state_preserves_order() {
        let snapshot = ClockSnapshot {
            people: vec![
                PersonLocation { person: "Alice".to_string(), location: "School".to_string() },
                PersonLocation { person: "Bob".to_string(), location: "Lost".to_string() },
            ],
        };

        let body = format_state(&snapshot);
        assert_eq!(
            body,
            r#"{"people":[{"person":"Alice","location":"School"},{"person":"Bob","location":"Lost"}]}"#
        );
    }

    #[test]
    fn test_format_state_empty_roster() {
        let body = format_state(&ClockSnapshot::default());
        assert_eq!(body, r#"{"people":[]}"#);
    }
}
