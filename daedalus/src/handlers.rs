use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use mazelib::{render, Direction, Error, Reply, Session};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};

/// Everything the handlers share. One session at a time by construction:
/// the mutex serializes whole maze lifecycles, and the selector state
/// lives inside the session for the lifetime of the process.
pub struct AppState {
    pub session: Mutex<Session>,
    pub pretty: bool,
    pub shutdown: Notify,
}

pub type SharedState = Arc<AppState>;

/// GET /awake: throw away any maze in progress, carve a new one and wake
/// Icarus in his starting room.
pub async fn awake(
    State(state): State<SharedState>,
) -> Result<Json<Reply>, (StatusCode, Json<Reply>)> {
    let mut session = state.session.lock().await;
    match session.begin(&mut rand::thread_rng()) {
        Ok((kind, survey)) => {
            tracing::info!(generator = kind.name(), "carved a new maze");
            if let Some(maze) = session.maze() {
                // Console dump for the operator; not part of the protocol.
                if state.pretty {
                    println!("{}", render::render_pretty(maze));
                } else {
                    println!("{}", render::render(maze));
                }
            }
            Ok(Json(Reply::ok(survey)))
        }
        Err(err) => {
            tracing::error!(%err, "failed to initialize a maze");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(Reply::rejection(err.to_string())),
            ))
        }
    }
}

/// GET /move/{direction}: one step for Icarus. Rejections never move him
/// and never bump the step counter.
pub async fn move_direction(
    State(state): State<SharedState>,
    Path(direction): Path<String>,
) -> (StatusCode, Json<Reply>) {
    let dir: Direction = match direction.parse() {
        Ok(dir) => dir,
        Err(err) => {
            return (StatusCode::CONFLICT, Json(Reply::rejection(err.to_string())));
        }
    };

    let mut session = state.session.lock().await;
    match session.step(dir) {
        Ok(survey) => (StatusCode::OK, Json(Reply::ok(survey))),
        Err(Error::Victory) => {
            let steps = session.steps();
            tracing::info!(steps, "treasure reached");
            (
                StatusCode::OK,
                Json(Reply::victory(format!("Victory achieved in {steps} steps"))),
            )
        }
        Err(err @ Error::OutOfBounds { .. }) => {
            // A consistent maze can't produce this: it means a carver left
            // a one-sided wall somewhere.
            tracing::error!(%err, "wall pairing invariant violated");
            (StatusCode::CONFLICT, Json(Reply::rejection(err.to_string())))
        }
        Err(err) => (StatusCode::CONFLICT, Json(Reply::rejection(err.to_string()))),
    }
}

/// GET /done: report the aggregates and shut the server down.
pub async fn done(State(state): State<SharedState>) -> Json<Value> {
    let stats = state.session.lock().await.stats();
    tracing::info!(
        solved = stats.solved,
        average_steps = stats.average_steps,
        "client finished, shutting down"
    );
    state.shutdown.notify_one();
    Json(json!({
        "solved": stats.solved,
        "average_steps": stats.average_steps,
        "message": format!(
            "Labyrinth solved {} times with an avg of {} steps",
            stats.solved, stats.average_steps
        ),
    }))
}
