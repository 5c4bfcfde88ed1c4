use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single timestamped communication record.
///
/// Ordering across records is `(timestamp, id)`, so ties on time are broken
/// deterministically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Unique message id.
    pub id: String,
    pub sender: String,
    #[serde(default)]
    pub recipients: Vec<String>,
    pub timestamp: DateTime<Utc>,
    /// Topic distribution used as the content fingerprint.
    #[serde(default)]
    pub topics: Vec<f64>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    /// Relevance override. Falls back to the configured default prize.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prize: Option<f64>,
}

impl Interaction {
    pub fn new(
        id: impl Into<String>,
        sender: impl Into<String>,
        recipients: Vec<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            sender: sender.into(),
            recipients,
            timestamp,
            topics: Vec::new(),
            subject: String::new(),
            body: String::new(),
            prize: None,
        }
    }

    pub fn with_topics(mut self, topics: Vec<f64>) -> Self {
        self.topics = topics;
        self
    }

    pub fn with_content(mut self, subject: impl Into<String>, body: impl Into<String>) -> Self {
        self.subject = subject.into();
        self.body = body.into();
        self
    }

    pub fn with_prize(mut self, prize: f64) -> Self {
        self.prize = Some(prize);
        self
    }

    /// Sort key: timestamp first, id second.
    pub fn order_key(&self) -> (DateTime<Utc>, &str) {
        (self.timestamp, self.id.as_str())
    }

    /// Recipients with duplicates removed, first occurrence kept.
    pub fn unique_recipients(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.recipients
            .iter()
            .map(String::as_str)
            .filter(|r| seen.insert(*r))
            .collect()
    }
}
