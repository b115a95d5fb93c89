use std::sync::Arc;

use activity_state::ActivityState;
use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, Uri},
    response::Json,
    routing::{get, post},
};
use sample_store::{Sample, StreamKind};
use sensors::nmea::Receiver;
use serde_json::{Map, Value, json};
use sliding_window::WindowSample;

use crate::{Gateway, GatewayError};

type SharedGateway = Arc<Gateway>;

#[derive(Debug, serde::Serialize)]
struct Stored {
    success: bool,
    message: String,
    data: Sample,
}

impl Stored {
    fn new(kind: StreamKind, data: Sample) -> (StatusCode, Json<Self>) {
        let body = Self {
            success: true,
            message: format!("{kind} data stored successfully"),
            data,
        };

        (StatusCode::CREATED, Json(body))
    }
}

#[derive(Debug, serde::Serialize)]
struct Listing {
    success: bool,
    count: usize,
    data: Vec<Sample>,
}

#[derive(Debug, serde::Serialize)]
struct Activity {
    success: bool,
    activity: Option<ActivityState>,
    speed: Option<f64>,
}

#[derive(Debug, serde::Serialize)]
struct Live {
    success: bool,
    activity: Option<ActivityState>,
    speed: Vec<WindowSample>,
    acceleration: Vec<WindowSample>,
}

pub fn router(gateway: SharedGateway) -> Router {
    Router::new()
        .route("/", get(descriptor))
        .route("/imu", post(submit_imu).get(list_imu))
        .route("/gps", post(submit_gps).get(list_gps))
        .route("/gps/nmea", post(submit_nmea))
        .route("/activity", get(activity))
        .route("/live", get(live))
        .fallback(not_found)
        .with_state(gateway)
}

async fn descriptor() -> Json<Value> {
    Json(json!({
        "message": "IMU/GPS Server is running",
        "endpoints": {
            "POST /imu": "Store IMU data",
            "POST /gps": "Store GPS data",
            "POST /gps/nmea": "Store GPS data from NMEA sentences",
            "GET /imu": "Retrieve all IMU data",
            "GET /gps": "Retrieve all GPS data",
            "GET /activity": "Current activity derived from the latest GPS speed",
            "GET /live": "Live chart series",
        },
    }))
}

fn submit(
    gateway: &Gateway,
    kind: StreamKind,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<(StatusCode, Json<Stored>), GatewayError> {
    let Json(payload) = body?;

    let sample = gateway.submit(kind, payload);

    tracing::debug!(stream = %kind, id = sample.id(), "sample submitted");

    Ok(Stored::new(kind, sample))
}

async fn submit_imu(
    State(gateway): State<SharedGateway>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<(StatusCode, Json<Stored>), GatewayError> {
    submit(&gateway, StreamKind::Imu, body)
}

async fn submit_gps(
    State(gateway): State<SharedGateway>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<(StatusCode, Json<Stored>), GatewayError> {
    submit(&gateway, StreamKind::Gps, body)
}

/// Decodes one epoch of NMEA output (one sentence per line) into a single
/// positional sample.
async fn submit_nmea(
    State(gateway): State<SharedGateway>,
    body: String,
) -> Result<(StatusCode, Json<Stored>), GatewayError> {
    let mut receiver = Receiver::new();

    for line in body.lines() {
        receiver.feed(line)?;
    }

    let payload = receiver.payload().ok_or(GatewayError::NoPosition)?;

    let sample = gateway.submit(StreamKind::Gps, payload);

    tracing::debug!(id = sample.id(), fix = receiver.has_fix(), "NMEA sample submitted");

    Ok(Stored::new(StreamKind::Gps, sample))
}

fn list(gateway: &Gateway, kind: StreamKind) -> Json<Listing> {
    let snapshot = gateway.query(kind);

    Json(Listing {
        success: true,
        count: snapshot.count,
        data: snapshot.samples,
    })
}

async fn list_imu(State(gateway): State<SharedGateway>) -> Json<Listing> {
    list(&gateway, StreamKind::Imu)
}

async fn list_gps(State(gateway): State<SharedGateway>) -> Json<Listing> {
    list(&gateway, StreamKind::Gps)
}

async fn activity(State(gateway): State<SharedGateway>) -> Json<Activity> {
    let current = gateway.current_activity();

    Json(Activity {
        success: true,
        activity: current.activity,
        speed: current.speed,
    })
}

async fn live(State(gateway): State<SharedGateway>) -> Json<Live> {
    let current = gateway.current_activity();
    let feed = gateway.live();

    Json(Live {
        success: true,
        activity: current.activity,
        speed: feed.speed().snapshot(),
        acceleration: feed.acceleration().snapshot(),
    })
}

async fn not_found(uri: Uri) -> GatewayError {
    GatewayError::NotFound(uri.path().to_owned())
}
