use log::{debug, error};

use serde::Serialize;

/// webhook execution payload, only the field Discord requires
#[derive(Serialize)]
struct WebhookPayload {
    content: String,
}

/// forwards an error report to the configured Discord webhook
///
/// fire and forget, a broken sink only gets logged
pub async fn report(client: &reqwest::Client, webhook_url: &str, text: &str) {
    // Discord rejects message content above 2000 characters
    let content: String = text.chars().take(1900).collect();

    let response = client
        .post(webhook_url)
        .json(&WebhookPayload { content })
        .send()
        .await;

    match response {
        Ok(r) if r.status().is_success() => debug!("forwarded error report to webhook"),
        Ok(r) => error!("error webhook answered with status {}", r.status()),
        Err(e) => error!("failed to reach error webhook: {e}"),
    }
}
