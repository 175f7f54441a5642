use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::routing::get;
use axum::Router;
use clap::Parser;
use mazelib::{Session, SessionConfig};
use tokio::sync::{Mutex, Notify};
use tower_http::trace::TraceLayer;

mod handlers;

use handlers::{awake, done, move_direction, AppState};

/// Daedalus builds labyrinths and hosts them for one Icarus at a time.
#[derive(Parser, Debug)]
#[command(name = "daedalus")]
#[command(about = "Start the labyrinth creator", long_about = None)]
struct Args {
    /// Maze width in rooms
    #[arg(long, default_value_t = 15)]
    width: i32,

    /// Maze height in rooms
    #[arg(long, default_value_t = 10)]
    height: i32,

    /// Number of mazes the client plans to solve (sizes the carver
    /// selector's warm-up phase)
    #[arg(long, default_value_t = 100)]
    times: usize,

    /// Dump the fancier three-row-per-room rendering on each new maze
    #[arg(long)]
    pretty: bool,

    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    anyhow::ensure!(
        args.width >= 1 && args.height >= 1,
        "maze dimensions must be at least 1x1"
    );

    let state = Arc::new(AppState {
        session: Mutex::new(Session::new(SessionConfig {
            width: args.width,
            height: args.height,
            times: args.times,
        })),
        pretty: args.pretty,
        shutdown: Notify::new(),
    });

    let app = Router::new()
        .route("/awake", get(awake))
        .route("/move/{direction}", get(move_direction))
        .route("/done", get(done))
        .with_state(state.clone())
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("daedalus listening on http://{addr}");

    let waiter = state.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            // Both /done and an interrupt end up here, so the statistics
            // below get flushed either way.
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = waiter.shutdown.notified() => {}
            }
        })
        .await?;

    let stats = state.session.lock().await.stats();
    println!(
        "Labyrinth solved {} times with an avg of {} steps",
        stats.solved, stats.average_steps
    );

    Ok(())
}
