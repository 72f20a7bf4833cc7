// Copyright 2024-Present Logz.io Ltd. https://logz.io/
// SPDX-License-Identifier: Apache-2.0

//! HTTP receiver for Okta event hooks.
//!
//! The agent accepts event hook deliveries on a single endpoint, answers the
//! one-time endpoint verification challenge, validates shipping credentials
//! from the request headers, reshapes each event and forwards the batch to
//! the Logz.io bulk listener through [`logzio_client`].

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod config;
pub mod credentials;
pub mod event_processor;
pub mod hook_agent;
pub mod http_utils;
