// Copyright 2024-Present Logz.io Ltd. https://logz.io/
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use okta_hook_agent::config::Config;
use okta_hook_agent::event_processor::OktaEventProcessor;
use okta_hook_agent::hook_agent::HookAgent;

/// A shipping token with the required 32-letter run.
pub const TEST_TOKEN: &str = "aBcDeFgHiJkLmNoPqRsTuVwXyZaBcDeF";

/// Config pointed at a mock listener, with millisecond backoff so retry
/// tests stay fast.
pub fn test_config(receiver_port: u16, listener_url: &str) -> Config {
    Config {
        receiver_port,
        max_request_content_length: 10_000_000,
        bulk_request_timeout: Duration::from_secs(1),
        bulk_retry_backoff_base: Duration::from_millis(1),
        listener_url_override: Some(listener_url.to_string()),
    }
}

/// Starts the hook agent in the background and waits for it to come up.
pub async fn start_agent(config: Config) {
    let agent = HookAgent {
        config: Arc::new(config),
        event_processor: Arc::new(OktaEventProcessor {}),
    };
    tokio::spawn(async move {
        let _ = agent.start().await;
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
}

/// A realistic event hook delivery: global fields at the top level, three
/// events under data.events.
pub fn sample_hook_body() -> serde_json::Value {
    json!({
        "eventId": "ev-123",
        "eventTime": "2024-05-01T10:00:03.000Z",
        "eventType": "com.okta.event_hook",
        "source": "https://example.okta.com/api/v1/eventHooks/who8sabp9rlkzKo2y0h7",
        "data": {
            "events": [
                {
                    "uuid": "u-0",
                    "published": "2024-05-01T10:00:00.000Z",
                    "eventType": "user.session.start",
                    "severity": "INFO"
                },
                {
                    "uuid": "u-1",
                    "published": "2024-05-01T10:00:01.000Z",
                    "eventType": "user.session.start",
                    "severity": "INFO"
                },
                {
                    "uuid": "u-2",
                    "published": "2024-05-01T10:00:02.000Z",
                    "eventType": "user.account.update_password",
                    "severity": "WARN"
                }
            ]
        }
    })
}
