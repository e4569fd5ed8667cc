//! Periodic self-ping that keeps a sleeping host (free-tier PaaS) warm.

use std::time::Duration;

use tokio::task::JoinHandle;

const PING_QUERY: &str = "pulse";

fn ping_target(base_url: &str) -> String {
    format!("{}/search?q={PING_QUERY}", base_url.trim_end_matches('/'))
}

/// One ping. Returns the response status, or `None` when the request failed.
async fn ping_once(client: &reqwest::Client, target: &str) -> Option<u16> {
    match client.get(target).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            tracing::info!(target, status, "self-ping");
            Some(status)
        }
        Err(err) => {
            tracing::warn!(target, error = %err, "self-ping failed");
            None
        }
    }
}

/// Spawn the pinger. The first ping fires one full `interval` after start.
pub fn spawn_self_ping(base_url: String, interval: Duration) -> JoinHandle<()> {
    let target = ping_target(&base_url);
    let client = reqwest::Client::new();
    tracing::info!(target = %target, interval_secs = interval.as_secs(), "self-ping enabled");

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            ping_once(&client, &target).await;
        }
    })
}
