//! Rendering context construction.
//!
//! [`build_context`] turns a validated [`ProjectConfig`] into the flat map
//! of placeholder values every template sees. The only impure input is the
//! [`IdGenerator`], which callers inject so tests can pin identifiers.

use indexmap::IndexMap;
use serde::Serialize;
use uuid::Uuid;

use crate::config::ProjectConfig;
use crate::constants::REGISTRY_NAMESPACE;

/// A single context value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContextValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    Sequence(Vec<ContextValue>),
}

impl ContextValue {
    /// Text used when the value is spliced into a file or directory name.
    /// Sequences have no single textual form.
    pub fn as_name_fragment(&self) -> Option<String> {
        match self {
            ContextValue::String(s) => Some(s.clone()),
            ContextValue::Integer(i) => Some(i.to_string()),
            ContextValue::Boolean(b) => Some(b.to_string()),
            ContextValue::Sequence(_) => None,
        }
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        ContextValue::String(value.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        ContextValue::String(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        ContextValue::Integer(value)
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        ContextValue::Boolean(value)
    }
}

impl<T: Into<ContextValue>> From<Vec<T>> for ContextValue {
    fn from(values: Vec<T>) -> Self {
        ContextValue::Sequence(values.into_iter().map(Into::into).collect())
    }
}

/// Ordered placeholder name → value mapping for one generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Context {
    values: IndexMap<String, ContextValue>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K: Into<String>, V: Into<ContextValue>>(&mut self, key: K, value: V) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Source of unique identifiers for identifier-shaped context slots.
pub trait IdGenerator {
    /// Returns a fresh identifier, distinct from every earlier one.
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs in the upper-case form solution files use.
#[derive(Debug, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string().to_uppercase()
    }
}

/// Context slots that each receive a fresh identifier.
pub const ID_KEYS: [&str; 5] = [
    "ProjectGuid",
    "AppHostGuid",
    "ApiGuid",
    "ServiceDefaultsGuid",
    "WorkerGuid",
];

/// Builds the rendering context for `config`.
pub fn build_context(config: &ProjectConfig, ids: &mut dyn IdGenerator) -> Context {
    let descriptor = config.template().descriptor();
    let lower_name = config.name().to_lowercase();
    let features = config.features().union(descriptor.implied);
    let database = config.database().unwrap_or(descriptor.default_database);

    let mut context = Context::new();
    context.insert("Name", config.name());
    context.insert("ProjectName", config.display_name());
    context.insert("Framework", config.framework());
    context.insert("Port", i64::from(config.port()));
    context.insert("MinInstances", i64::from(config.min_instances()));
    context.insert("MaxInstances", i64::from(config.max_instances()));
    context.insert("CPU", config.cpu());
    context.insert("Memory", config.memory());
    context.insert("ECRRepoName", format!("{REGISTRY_NAMESPACE}/{lower_name}"));
    context.insert("ServiceName", lower_name);
    context.insert("Region", descriptor.default_region);
    context.insert("Cloud", descriptor.cloud.slug());
    context.insert("Template", descriptor.name);

    for key in ID_KEYS {
        context.insert(key, ids.next_id());
    }

    context.insert("Database", database.as_str());
    context.insert("IncludeCache", features.cache);
    context.insert("IncludeStorage", features.storage);
    context.insert("IncludeMail", features.mail);
    context.insert("IncludeMessageQueue", features.queue);
    context.insert("IncludeJobs", features.jobs);
    context.insert("IncludeWorker", features.worker);
    context.insert("Services", features.enabled());

    context
}
