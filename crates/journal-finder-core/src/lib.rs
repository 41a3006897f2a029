use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod config_file;
pub mod filter;
pub mod orchestrator;
pub mod presenter;
pub mod service;

// Re-export for convenience
pub use filter::{FilterDefaults, FilterState, PUBLISHERS};
pub use orchestrator::{SearchOrchestrator, SearchPhase, SearchTicket};
pub use presenter::{DismissReason, ResultPresenter};
pub use service::{HttpRankingService, RankingService, SearchError, SearchOutcome};

/// Ranking endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "https://sarthak005-deploy-fastapi-application.hf.space/query";

/// Per-request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable overriding the configured endpoint.
pub const ENDPOINT_ENV: &str = "JOURNAL_FINDER_ENDPOINT";

/// A journal returned by the ranking service.
///
/// Field names on the wire follow the service's column names, hence the
/// renames. `Category` and `Keywords` are optional in responses and may be
/// `null`; `Keywords` may also arrive as one comma-separated string. Whole
/// numbers are accepted in float form (`14.0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Journal {
    /// Rank assigned by the service (1 = best match).
    #[serde(deserialize_with = "wire::whole_number")]
    pub id: u32,
    #[serde(rename = "Name")]
    pub name: String,
    /// Journal impact factor.
    #[serde(rename = "JIF")]
    pub jif: f64,
    #[serde(rename = "Category", default, deserialize_with = "wire::null_as_empty")]
    pub category: String,
    #[serde(rename = "Keywords", default, deserialize_with = "wire::keyword_list")]
    pub keywords: Vec<String>,
    #[serde(rename = "Publisher")]
    pub publisher: String,
    /// Days to first editorial decision.
    #[serde(rename = "Decision_Time", deserialize_with = "wire::whole_number")]
    pub decision_time: u32,
}

/// Lenient decoders for the ranking service's journal rows.
mod wire {
    use serde::de::{Deserializer, Error};
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Int(u64),
        Float(f64),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Keywords {
        List(Vec<String>),
        Text(String),
    }

    /// A non-negative integer, also accepted as a float with no fraction.
    pub fn whole_number<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        match Number::deserialize(d)? {
            Number::Int(n) => {
                u32::try_from(n).map_err(|_| D::Error::custom(format!("{n} is out of range")))
            }
            Number::Float(f) if f.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&f) => {
                Ok(f as u32)
            }
            Number::Float(f) => Err(D::Error::custom(format!("expected a whole number, got {f}"))),
        }
    }

    pub fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
    }

    /// A keyword array, a comma-separated string, or `null`.
    pub fn keyword_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(match Option::<Keywords>::deserialize(d)? {
            None => Vec::new(),
            Some(Keywords::List(list)) => list,
            Some(Keywords::Text(text)) => text
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }
}

/// Ranking backend the service should use to match the abstract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LlmModel {
    #[default]
    #[serde(rename = "faiss")]
    Faiss,
    #[serde(rename = "gemini-pro")]
    GeminiPro,
    #[serde(rename = "groq")]
    Groq,
    #[serde(rename = "mixtral")]
    Mixtral,
    #[serde(rename = "openai")]
    OpenAi,
}

impl LlmModel {
    /// Every identifier the service accepts, default first.
    pub fn all() -> &'static [LlmModel] {
        &[
            LlmModel::Faiss,
            LlmModel::GeminiPro,
            LlmModel::Groq,
            LlmModel::Mixtral,
            LlmModel::OpenAi,
        ]
    }

    /// The models offered in the filter sidebar.
    pub fn sidebar() -> &'static [LlmModel] {
        &[
            LlmModel::Faiss,
            LlmModel::GeminiPro,
            LlmModel::Mixtral,
            LlmModel::OpenAi,
        ]
    }

    /// Wire identifier.
    pub fn id(self) -> &'static str {
        match self {
            Self::Faiss => "faiss",
            Self::GeminiPro => "gemini-pro",
            Self::Groq => "groq",
            Self::Mixtral => "mixtral",
            Self::OpenAi => "openai",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Faiss => "FAISS",
            Self::GeminiPro => "Gemini",
            Self::Groq => "Groq",
            Self::Mixtral => "Mixtral",
            Self::OpenAi => "OpenAI",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Faiss => {
                "Facebook AI Similarity Search - Efficient similarity search and clustering"
            }
            Self::GeminiPro => "Google's most capable AI model for text analysis",
            Self::Groq => "Low-latency LLM inference hosted on Groq",
            Self::Mixtral => "Mistral AI's powerful mixture-of-experts model",
            Self::OpenAi => "OpenAI's state of the art model",
        }
    }
}

impl fmt::Display for LlmModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for LlmModel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        LlmModel::all()
            .iter()
            .copied()
            .find(|m| m.id().eq_ignore_ascii_case(needle) || m.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CoreError::UnknownModel(s.to_string()))
    }
}

/// Immutable filter snapshot sent alongside the abstract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Minimum impact factor.
    pub impact_factor: f64,
    /// Maximum days to first decision.
    pub first_decision_time: u32,
    /// Selected publishers joined with `", "`; empty means no preference.
    pub publisher: String,
    pub llm_model: LlmModel,
}

/// The exact JSON payload posted to the ranking service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub criteria: FilterCriteria,
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unknown ranking model: {0}")]
    UnknownModel(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolved runtime configuration (file + env + flags already merged).
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub timeout_secs: u64,
    pub defaults: FilterDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            defaults: FilterDefaults::default(),
        }
    }
}

impl Config {
    /// Build a runtime config from an on-disk config, falling back to defaults
    /// for anything the file leaves out. Unknown model names are logged and ignored.
    pub fn from_file(file: &config_file::ConfigFile) -> Self {
        let mut config = Config::default();

        if let Some(service) = &file.service {
            if let Some(endpoint) = &service.endpoint {
                config.endpoint = endpoint.clone();
            }
            if let Some(secs) = service.timeout_secs {
                config.timeout_secs = secs.max(1);
            }
        }

        if let Some(filters) = &file.filters {
            if let Some(v) = filters.impact_factor {
                config.defaults.impact_factor = filter::clamp_impact_factor(v);
            }
            if let Some(d) = filters.decision_time {
                config.defaults.decision_time = filter::clamp_decision_time(d);
            }
            if let Some(name) = &filters.llm_model {
                match name.parse::<LlmModel>() {
                    Ok(model) => config.defaults.llm_model = model,
                    Err(e) => tracing::warn!(error = %e, "ignoring configured model"),
                }
            }
            if let Some(publishers) = &filters.publishers {
                config.defaults.publishers = publishers.clone();
            }
        }

        config
    }

    /// Apply command-line or environment overrides on top of the file values.
    pub fn with_overrides(mut self, endpoint: Option<String>, timeout_secs: Option<u64>) -> Self {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.endpoint = endpoint;
        }
        if let Some(secs) = timeout_secs {
            self.timeout_secs = secs.max(1);
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
