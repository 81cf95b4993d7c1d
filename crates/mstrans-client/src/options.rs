use std::collections::HashMap;
use std::fmt;

use crate::error::CallResult;
use crate::validate::Kind;

/// Receives the outcome of one dispatched call. Runs at most once, on the
/// task that completed the request.
pub type CompletionHandler = Box<dyn FnOnce(CallResult) + Send + 'static>;

/// One option value as the Ajax endpoints understand them: a plain string,
/// a list of strings, or a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Text(String),
    List(Vec<String>),
    Map(serde_json::Map<String, serde_json::Value>),
}

impl OptionValue {
    pub fn kind(&self) -> Kind {
        match self {
            OptionValue::Text(_) => Kind::Text,
            OptionValue::List(_) => Kind::List,
            OptionValue::Map(_) => Kind::Map,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            OptionValue::Text(text) => text.is_empty(),
            OptionValue::List(items) => items.is_empty(),
            OptionValue::Map(map) => map.is_empty(),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(text: &str) -> Self {
        OptionValue::Text(text.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(text: String) -> Self {
        OptionValue::Text(text)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(items: Vec<String>) -> Self {
        OptionValue::List(items)
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(items: Vec<&str>) -> Self {
        OptionValue::List(items.into_iter().map(str::to_string).collect())
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for OptionValue {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        OptionValue::Map(map)
    }
}

/// The argument bag for one operation call: named values plus the
/// completion handler that will receive the result.
#[derive(Default)]
pub struct Options {
    values: HashMap<String, OptionValue>,
    handler: Option<CompletionHandler>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a named value.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Registers the handler that receives the call's outcome.
    pub fn on_result(mut self, handler: impl FnOnce(CallResult) + Send + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    /// The value under `name`, if present and a plain string.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(OptionValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: OptionValue) {
        self.values.insert(name.into(), value);
    }

    pub(crate) fn take_handler(&mut self) -> Option<CompletionHandler> {
        self.handler.take()
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("values", &self.values)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}
