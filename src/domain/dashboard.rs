// Dashboard document and remote record domain models
use serde_json::Value;

/// Prefix applied to every dashboard title before submission.
pub const PRODUCTION_PREFIX: &str = "PROD: ";

/// An opaque dashboard definition loaded from disk. Only the top-level
/// "title" field is ever inspected or rewritten.
#[derive(Debug, Clone)]
pub struct DashboardDocument {
    body: Value,
}

impl DashboardDocument {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            body: serde_json::from_str(text)?,
        })
    }

    /// Prepend the production prefix to the document's title, if it has one.
    /// Applied unconditionally; each run re-reads documents from disk, so the
    /// prefix does not compound across runs.
    pub fn apply_production_prefix(&mut self) {
        if let Some(title) = self.body.get("title").and_then(Value::as_str) {
            let prefixed = format!("{PRODUCTION_PREFIX}{title}");
            self.body["title"] = Value::String(prefixed);
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.body.get("title").and_then(Value::as_str)
    }

    pub fn body(&self) -> &Value {
        &self.body
    }
}

/// A dashboard as known to the remote endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardRecord {
    pub uid: String,
    pub title: String,
}

impl DashboardRecord {
    pub fn new(uid: String, title: String) -> Self {
        Self { uid, title }
    }

    pub fn is_production(&self) -> bool {
        self.title.contains(PRODUCTION_PREFIX)
    }
}
