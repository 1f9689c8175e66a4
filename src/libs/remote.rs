use crate::libs::config::ServerConfig;
use crate::libs::data_storage::{APP_NAME, APP_VERSION};
use crate::libs::formatter::FormattedEntry;
use crate::libs::journal::{ActivityEntry, ActivityLog};
use crate::libs::messages::Message;
use crate::libs::presence::Status;
use crate::{msg_bail_anyhow, msg_error_anyhow, msg_warning};
use anyhow::Result;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

/// Mirrors activity rows to `<api_url>/activity`.
///
/// Rows are queued and posted from a background task in the order they were
/// written, so a slow server never blocks the state machine. Delivery is best
/// effort: a failed post is reported and dropped.
pub struct RemoteLog {
    sender: UnboundedSender<ActivityEntry>,
}

impl RemoteLog {
    /// Must be called from within a tokio runtime.
    pub fn spawn(config: ServerConfig) -> Self {
        let (sender, mut receiver) = unbounded_channel::<ActivityEntry>();
        let client = Client::new();

        tokio::spawn(async move {
            while let Some(entry) = receiver.recv().await {
                if let Err(e) = post(&client, &config, &entry).await {
                    msg_warning!(Message::RemoteLogFailed(e.to_string()));
                }
            }
        });

        Self { sender }
    }
}

async fn post(client: &Client, config: &ServerConfig, entry: &ActivityEntry) -> Result<()> {
    let url = format!("{}/activity", config.api_url.trim_end_matches('/'));
    let response = client
        .post(url)
        .bearer_auth(&config.auth_token)
        .header(USER_AGENT, format!("{}/{}", APP_NAME, APP_VERSION))
        .json(&FormattedEntry::from(entry))
        .send()
        .await?;

    if !response.status().is_success() {
        msg_bail_anyhow!(Message::RemoteLogRejected(response.status().to_string()));
    }
    Ok(())
}

impl ActivityLog for RemoteLog {
    fn append(&self, entry: &ActivityEntry) -> Result<()> {
        self.sender
            .send(entry.clone())
            .map_err(|_| msg_error_anyhow!(Message::RemoteLogClosed))
    }

    /// The server is write-only from the tracker's point of view.
    fn last_status(&self) -> Result<Option<Status>> {
        Ok(None)
    }
}
