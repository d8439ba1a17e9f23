use crate::bridge::model::{DetectorStatus, ErrorReply, IngestReply};
use anyhow::Context;
use log::info;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use stepcore::{SensorSample, StepDetector};
use warp::http::StatusCode;
use warp::reply::{self, Json, WithStatus};
use warp::{Filter, Rejection, Reply};

/// Detector shared between bridge handlers. The mutex serialises sample
/// delivery and control calls.
pub type SharedDetector = Arc<Mutex<StepDetector>>;

const MAX_BODY_BYTES: u64 = 4 * 1024 * 1024;

pub fn bind_address(port: u16) -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], port))
}

/// `GET /status`, `POST /start|stop|reset`, `POST /samples`.
pub fn routes(
    detector: SharedDetector,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let status = warp::path("status")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_detector(detector.clone()))
        .map(handle_status);

    let start = warp::path("start")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_detector(detector.clone()))
        .map(handle_start);

    let stop = warp::path("stop")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_detector(detector.clone()))
        .map(handle_stop);

    let reset = warp::path("reset")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_detector(detector.clone()))
        .map(handle_reset);

    let samples = warp::path("samples")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with_detector(detector))
        .map(handle_samples);

    status.or(start).or(stop).or(reset).or(samples)
}

/// Serves the bridge until Ctrl+C.
pub async fn serve(detector: SharedDetector, addr: SocketAddr) -> anyhow::Result<()> {
    let (bound, server) = warp::serve(routes(detector))
        .try_bind_with_graceful_shutdown(addr, async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .with_context(|| format!("binding control bridge on {}", addr))?;
    info!("control bridge listening on http://{}", bound);
    server.await;
    info!("control bridge stopped");
    Ok(())
}

fn with_detector(
    detector: SharedDetector,
) -> impl Filter<Extract = (SharedDetector,), Error = Infallible> + Clone {
    warp::any().map(move || detector.clone())
}

fn status_reply(detector: &StepDetector) -> WithStatus<Json> {
    reply::with_status(
        reply::json(&DetectorStatus::capture(detector)),
        StatusCode::OK,
    )
}

fn error_reply(status: StatusCode, message: String) -> WithStatus<Json> {
    reply::with_status(reply::json(&ErrorReply { error: message }), status)
}

fn poisoned() -> WithStatus<Json> {
    error_reply(
        StatusCode::INTERNAL_SERVER_ERROR,
        "detector lock poisoned".to_string(),
    )
}

fn handle_status(detector: SharedDetector) -> WithStatus<Json> {
    match detector.lock() {
        Ok(guard) => status_reply(&guard),
        Err(_) => poisoned(),
    }
}

fn handle_start(detector: SharedDetector) -> WithStatus<Json> {
    let Ok(mut guard) = detector.lock() else {
        return poisoned();
    };
    match guard.start() {
        Ok(()) => status_reply(&guard),
        Err(err) => error_reply(StatusCode::CONFLICT, err.to_string()),
    }
}

fn handle_stop(detector: SharedDetector) -> WithStatus<Json> {
    let Ok(mut guard) = detector.lock() else {
        return poisoned();
    };
    guard.stop();
    status_reply(&guard)
}

fn handle_reset(detector: SharedDetector) -> WithStatus<Json> {
    let Ok(mut guard) = detector.lock() else {
        return poisoned();
    };
    guard.reset();
    status_reply(&guard)
}

fn handle_samples(samples: Vec<SensorSample>, detector: SharedDetector) -> WithStatus<Json> {
    let Ok(mut guard) = detector.lock() else {
        return poisoned();
    };
    let steps_detected = samples
        .iter()
        .filter(|sample| guard.on_sample(**sample).is_some())
        .count();
    let reply_body = IngestReply {
        received: samples.len(),
        steps_detected,
        step_count: guard.step_count(),
    };
    reply::with_status(reply::json(&reply_body), StatusCode::OK)
}
