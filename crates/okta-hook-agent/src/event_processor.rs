// Copyright 2024-Present Logz.io Ltd. https://logz.io/
// SPDX-License-Identifier: Apache-2.0

//! Event batch processing: validation, transformation and shipping.

use std::sync::Arc;

use async_trait::async_trait;
use hyper::http::{self, HeaderMap};
use hyper::StatusCode;
use serde_json::{Map, Value};
use tracing::{debug, error};

use logzio_client::{LogzioClient, LogzioClientConfig};

use crate::config::Config;
use crate::credentials;
use crate::http_utils::{self, HttpResponse};

#[async_trait]
pub trait EventProcessor {
    /// Validates shipping credentials, transforms the delivered events and
    /// exports them as one bulk. Every outcome is a structured JSON
    /// response; nothing escalates past the request.
    async fn process_events(
        &self,
        config: Arc<Config>,
        headers: &HeaderMap,
        body: &[u8],
    ) -> http::Result<HttpResponse>;
}

#[allow(clippy::module_name_repetitions)]
pub struct OktaEventProcessor;

#[async_trait]
impl EventProcessor for OktaEventProcessor {
    async fn process_events(
        &self,
        config: Arc<Config>,
        headers: &HeaderMap,
        body: &[u8],
    ) -> http::Result<HttpResponse> {
        let (token, region) = match credentials::credentials_from_headers(headers) {
            Ok(credentials) => credentials,
            Err(e) => {
                return http_utils::log_and_create_http_response(
                    &e.to_string(),
                    StatusCode::BAD_REQUEST,
                )
            }
        };

        let mut client_config = LogzioClientConfig::for_region(token, &region);
        client_config.request_timeout = config.bulk_request_timeout;
        client_config.initial_backoff = config.bulk_retry_backoff_base;
        if let Some(url) = &config.listener_url_override {
            client_config.listener_url = url.clone();
        }
        let mut client = LogzioClient::new(client_config);

        debug!("starting to parse request body");
        let body: Map<String, Value> = match serde_json::from_slice(body) {
            Ok(parsed) => parsed,
            Err(e) => {
                return http_utils::log_and_create_http_response(
                    &format!("error while parsing request body: {e}"),
                    StatusCode::INTERNAL_SERVER_ERROR,
                )
            }
        };

        let events = match body
            .get("data")
            .and_then(|data| data.get("events"))
            .and_then(Value::as_array)
        {
            Some(events) => events,
            None => {
                return http_utils::log_and_create_http_response(
                    "error while parsing request body: no data.events array",
                    StatusCode::INTERNAL_SERVER_ERROR,
                )
            }
        };

        let global_fields = extract_global_fields(&body);
        for event in events {
            let Some(record) = enrich_event(event, &global_fields) else {
                error!("skipping event that is not a JSON object");
                continue;
            };
            // A bad record must not abort the rest of the batch.
            if let Err(e) = client.write_record(&record) {
                error!("error while writing log record to the buffer: {e}");
            }
        }

        let status = client.export().await;
        if status == StatusCode::OK {
            http_utils::log_and_create_http_response(
                "execution finished successfully, check your logz.io account to see the data",
                StatusCode::OK,
            )
        } else {
            http_utils::log_and_create_http_response(
                "error while exporting logs to logz.io",
                status,
            )
        }
    }
}

/// Collects every top-level field of the delivery except the `data` payload,
/// and stamps the record type. These fields are merged into every shipped
/// event.
fn extract_global_fields(body: &Map<String, Value>) -> Map<String, Value> {
    let mut global_fields = Map::new();
    global_fields.insert("type".to_string(), Value::String("okta".to_string()));
    for (key, value) in body {
        if key != "data" {
            global_fields.insert(key.clone(), value.clone());
        }
    }
    global_fields
}

/// Reshapes one event for ingestion: `published` becomes `@timestamp` and
/// the delivery's global fields are merged in. Returns None when the event
/// is not a JSON object.
fn enrich_event(event: &Value, global_fields: &Map<String, Value>) -> Option<Value> {
    let mut record = event.as_object()?.clone();
    let published = record.remove("published").unwrap_or(Value::Null);
    record.insert("@timestamp".to_string(), published);
    for (key, value) in global_fields {
        record.insert(key.clone(), value.clone());
    }
    Some(Value::Object(record))
}
