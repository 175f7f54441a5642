mod api;
mod solver;

use anyhow::Result;
use api::HttpMazeApi;
use clap::Parser;
use solver::BacktrackingSolver;

/// Icarus wakes up in a labyrinth and can only see whether his room has
/// a wall to the top, right, bottom and left. He asks Daedalus for one
/// maze after another and escapes them by recursive backtracking.
#[derive(Parser, Debug)]
#[command(name = "icarus")]
#[command(about = "Start the labyrinth solver", long_about = None)]
struct Args {
    /// How many labyrinths to solve before telling the server we are done
    #[arg(long, default_value_t = 10)]
    times: usize,

    /// Port the Daedalus server listens on
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Base URL of the Daedalus server (overrides --port)
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let base_url = args
        .base_url
        .unwrap_or_else(|| format!("http://127.0.0.1:{}", args.port));
    let api = HttpMazeApi::new(base_url);

    println!("Solving {} times", args.times);
    let mut solved = 0;
    for run in 1..=args.times {
        if BacktrackingSolver::new(&api).run().await? {
            solved += 1;
        } else {
            // Only possible when part of the maze is unreachable.
            println!("Run {run}: exhausted every reachable room without finding the treasure");
        }
    }
    println!("Solved {solved}/{} labyrinths", args.times);

    api.done().await?;
    Ok(())
}
