// Copyright 2024-Present Logz.io Ltd. https://logz.io/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

use std::{env, sync::Arc};

use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use okta_hook_agent::{
    config,
    event_processor::OktaEventProcessor,
    hook_agent::HookAgent,
};

#[tokio::main]
pub async fn main() {
    let log_level = env::var("LOGZIO_LOG_LEVEL")
        .map(|val| val.to_lowercase())
        .unwrap_or("info".to_string());

    let env_filter = format!("h2=off,hyper=off,rustls=off,{}", log_level);

    #[allow(clippy::expect_used)]
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_new(env_filter).expect("could not parse log level in configuration"),
        )
        .with_level(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true)
        .without_time()
        .finish();

    #[allow(clippy::expect_used)]
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    debug!("Logging subsystem enabled");

    let config = match config::Config::new() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!("Error creating config on event hook receiver startup: {e}");
            return;
        }
    };

    let hook_agent = HookAgent {
        config,
        event_processor: Arc::new(OktaEventProcessor {}),
    };

    let res = hook_agent.start().await;
    if let Err(e) = res {
        error!("Error when starting the event hook receiver: {e:?}");
    }
}
