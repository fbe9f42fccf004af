use biblio_analysis::AnalysisError;
use biblio_corpus::CorpusError;
use biblio_graph::GraphError;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub action: CommandAction,
    #[serde(default = "empty_payload")]
    pub payload: Value,
}

pub fn empty_payload() -> Value {
    Value::Object(Default::default())
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandAction {
    Frequency,
    WordCloud,
    Pairs,
    Venues,
    Graph,
    CorpusStats,
    Filter,
    UniqueValues,
    GetRecord,
    Reload,
}

impl CommandAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            CommandAction::Frequency => "frequency",
            CommandAction::WordCloud => "word_cloud",
            CommandAction::Pairs => "pairs",
            CommandAction::Venues => "venues",
            CommandAction::Graph => "graph",
            CommandAction::CorpusStats => "corpus_stats",
            CommandAction::Filter => "filter",
            CommandAction::UniqueValues => "unique_values",
            CommandAction::GetRecord => "get_record",
            CommandAction::Reload => "reload",
        }
    }
}

/// Service result before it is wrapped in a `CommandResponse`
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutcome {
    pub data: Value,
    /// Corpus size the result was computed over
    pub records: usize,
}

impl CommandOutcome {
    pub fn new(data: Value, records: usize) -> Self {
        Self { data, records }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct WordCloudPayload {
    #[serde(default)]
    pub top: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PairsPayload {
    pub field_a: String,
    pub field_b: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct VenuesPayload {
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GraphFormat {
    #[default]
    Json,
    Dot,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct GraphRequest {
    #[serde(default)]
    pub venue_limit: Option<usize>,
    #[serde(default)]
    pub sample_size: Option<usize>,
    /// Fixed seed for the random attribute source
    #[serde(default)]
    pub seed: Option<u64>,
    /// Take attributes from this record field instead of the random set
    #[serde(default)]
    pub attribute_field: Option<String>,
    /// Key article nodes by venue and title
    #[serde(default)]
    pub per_venue_titles: bool,
    #[serde(default)]
    pub format: GraphFormat,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterPayload {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UniqueValuesPayload {
    pub field: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetRecordPayload {
    pub id: String,
}

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Invalid payload for {action}: {message}")]
    InvalidPayload {
        action: &'static str,
        message: String,
    },

    #[error("Record not found: {0}")]
    NotFound(String),
}

pub fn parse_payload<T: DeserializeOwned>(action: CommandAction, payload: Value) -> Result<T, RequestError> {
    serde_json::from_value(payload).map_err(|err| RequestError::InvalidPayload {
        action: action.as_str(),
        message: err.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorClassification {
    pub code: &'static str,
    pub hint: Option<String>,
}

pub fn classify_error(err: &anyhow::Error) -> ErrorClassification {
    if let Some(request_err) = err.downcast_ref::<RequestError>() {
        return match request_err {
            RequestError::InvalidPayload { action, .. } => ErrorClassification {
                code: "invalid_request",
                hint: Some(format!("Check the payload fields accepted by `{action}`")),
            },
            RequestError::NotFound(_) => ErrorClassification {
                code: "not_found",
                hint: Some("Use `unique_values` with field `id` to list record ids".to_string()),
            },
        };
    }

    if let Some(analysis_err) = err.downcast_ref::<AnalysisError>() {
        return match analysis_err {
            AnalysisError::PrerequisiteNotComputed(what) => ErrorClassification {
                code: "prerequisite_not_computed",
                hint: Some(format!("Run {what} before requesting this view")),
            },
            AnalysisError::VocabularyError(_) => ErrorClassification {
                code: "invalid_vocabulary",
                hint: Some("Vocabulary files are JSON or TOML with `categories` and `equivalences`".to_string()),
            },
            _ => ErrorClassification {
                code: "analysis_error",
                hint: None,
            },
        };
    }

    if let Some(graph_err) = err.downcast_ref::<GraphError>() {
        return match graph_err {
            GraphError::EmptyAttributeSet => ErrorClassification {
                code: "invalid_config",
                hint: Some("Provide at least one value in attributes.values".to_string()),
            },
            _ => ErrorClassification {
                code: "graph_error",
                hint: None,
            },
        };
    }

    if err.downcast_ref::<CorpusError>().is_some() {
        return ErrorClassification {
            code: "corpus_unavailable",
            hint: Some("Check the corpus path and its .bib/.json contents".to_string()),
        };
    }

    ErrorClassification {
        code: "internal",
        hint: None,
    }
}
