use anyhow::{Context, Result};
use async_trait::async_trait;
use mazelib::{Direction, Reply, Survey};
use reqwest::Client;

/// What one move attempt came back as.
#[derive(Debug, Clone)]
pub enum StepOutcome {
    /// Icarus is in a new room; this is what he can see from it.
    Moved(Survey),
    /// The treasure was reached; carries the server's victory message.
    Victory(String),
    /// The server refused the move; Icarus has not moved.
    Rejected(String),
}

/// The maze service seam. The solver only ever talks through this, so
/// tests can swap the HTTP client for an in-memory maze.
#[async_trait]
pub trait MazeApi: Send + Sync {
    /// Wake up in a fresh maze and get the survey for the waking room.
    async fn awake(&self) -> Result<Survey>;

    /// Ask to be moved one room in `dir`.
    async fn step(&self, dir: Direction) -> Result<StepOutcome>;
}

/// `MazeApi` over HTTP against a running Daedalus.
pub struct HttpMazeApi {
    client: Client,
    base_url: String,
}

impl HttpMazeApi {
    pub fn new(base_url: String) -> HttpMazeApi {
        HttpMazeApi {
            client: Client::new(),
            base_url,
        }
    }

    async fn fetch_reply(&self, path: &str) -> Result<Reply> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;
        // Rejections come back as 409 with a reply body, so parse the
        // body whatever the status was.
        response
            .json::<Reply>()
            .await
            .with_context(|| format!("malformed reply from {url}"))
    }

    /// Tell Daedalus we are finished so he can report and shut down.
    pub async fn done(&self) -> Result<()> {
        let url = format!("{}/done", self.base_url);
        self.client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;
        Ok(())
    }
}

#[async_trait]
impl MazeApi for HttpMazeApi {
    async fn awake(&self) -> Result<Survey> {
        let reply = self.fetch_reply("awake").await?;
        if reply.error {
            anyhow::bail!("server refused to start a maze: {}", reply.message);
        }
        Ok(reply.survey)
    }

    async fn step(&self, dir: Direction) -> Result<StepOutcome> {
        let reply = self.fetch_reply(&format!("move/{dir}")).await?;
        Ok(if reply.victory {
            StepOutcome::Victory(reply.message)
        } else if reply.error {
            StepOutcome::Rejected(reply.message)
        } else {
            StepOutcome::Moved(reply.survey)
        })
    }
}
