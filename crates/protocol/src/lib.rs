use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Ok,
    Error,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ResponseMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

/// Envelope returned by every command API call
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CommandResponse {
    pub status: CommandStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEnvelope>,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub meta: ResponseMeta,
}

impl CommandResponse {
    pub fn ok(data: serde_json::Value) -> Self {
        Self {
            status: CommandStatus::Ok,
            message: None,
            error: None,
            data,
            meta: ResponseMeta::default(),
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>, hint: Option<String>) -> Self {
        let message = message.into();
        Self {
            status: CommandStatus::Error,
            message: Some(message.clone()),
            error: Some(ErrorEnvelope {
                code: code.into(),
                message,
                hint,
            }),
            data: serde_json::Value::Null,
            meta: ResponseMeta::default(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.status, CommandStatus::Error)
    }
}

/// One bar of the co-occurrence chart
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PairRow {
    pub label: String,
    pub value_a: String,
    pub value_b: String,
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct VenueRow {
    pub venue: String,
    pub count: u64,
}

/// Parallel label/count lists, the shape bar-chart renderers take
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
}

impl FromIterator<(String, u64)> for ChartSeries {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let (labels, counts) = iter.into_iter().unzip();
        Self { labels, counts }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Venue,
    Article,
    Attribute,
}

impl NodeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeKind::Venue => "venue",
            NodeKind::Article => "article",
            NodeKind::Attribute => "attribute",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GraphNodePayload {
    pub id: String,
    pub kind: NodeKind,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GraphEdgePayload {
    pub source: String,
    pub target: String,
}

/// Typed node list + edge list for graph renderers
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct GraphPayload {
    pub nodes: Vec<GraphNodePayload>,
    pub edges: Vec<GraphEdgePayload>,
}
