pub mod domain;
mod services;

pub use domain::{classify_error, CommandAction, CommandRequest};

use crate::config::BiblioConfig;
use biblio_analysis::Vocabulary;
use biblio_corpus::SharedCorpus;
use biblio_protocol::{CommandResponse, ResponseMeta};
use serde_json::Value;
use services::Services;
use std::time::Instant;

pub struct CommandHandler {
    services: Services,
}

impl CommandHandler {
    pub fn new(corpus: SharedCorpus, vocabulary: Vocabulary, config: BiblioConfig) -> Self {
        Self {
            services: Services::new(corpus, vocabulary, config),
        }
    }

    pub fn execute(&self, request: CommandRequest) -> CommandResponse {
        self.dispatch(request.action, request.payload)
    }

    pub fn dispatch(&self, action: CommandAction, payload: Value) -> CommandResponse {
        let started = Instant::now();
        log::debug!("Executing {}", action.as_str());

        match self.services.route(action, payload) {
            Ok(outcome) => {
                let mut response = CommandResponse::ok(outcome.data);
                response.meta = ResponseMeta {
                    records: Some(outcome.records),
                    duration_ms: Some(started.elapsed().as_millis() as u64),
                };
                response
            }
            Err(err) => error_response(&err, started.elapsed().as_millis() as u64),
        }
    }
}

fn error_response(err: &anyhow::Error, duration_ms: u64) -> CommandResponse {
    let message = format!("{err:#}");
    let classification = classify_error(err);
    log::warn!("Command failed ({}): {message}", classification.code);

    let mut response = CommandResponse::error(classification.code, message, classification.hint);
    response.meta.duration_ms = Some(duration_ms);
    response
}
