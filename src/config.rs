use serde::Deserialize;
use std::collections::HashMap;

use crate::error::ConfigError;
use crate::types::{Config, MetricDefinition};

/// Trait for abstracting environment variable access
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Production implementation using std::env
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Mock implementation for testing
#[derive(Debug, Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    pub fn set_var<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn with_var<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.set_var(key, value);
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

#[derive(Debug, Deserialize)]
struct PluginDescriptor {
    #[serde(default)]
    metrics: Vec<DescriptorMetric>,
}

#[derive(Debug, Deserialize)]
struct DescriptorMetric {
    timeseries: DescriptorTimeseries,
    source: DescriptorSource,
}

#[derive(Debug, Deserialize)]
struct DescriptorTimeseries {
    key: String,
    #[serde(default)]
    dimensions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DescriptorSource {
    #[serde(rename = "type")]
    type_: String,
    #[serde(default)]
    relative: bool,
}

/// Parse the metric catalogue out of a plugin descriptor document.
pub fn parse_metric_definitions(json: &str) -> Result<Vec<MetricDefinition>, serde_json::Error> {
    let descriptor: PluginDescriptor = serde_json::from_str(json)?;
    Ok(descriptor
        .metrics
        .into_iter()
        .map(|m| MetricDefinition {
            key: m.timeseries.key,
            dimension_names: m.timeseries.dimensions,
            source_type: m.source.type_,
            is_relative: m.source.relative,
        })
        .collect())
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_with_env(&SystemEnvironment)
}

pub fn load_config_with_env<E: EnvironmentProvider>(env: &E) -> Result<Config, ConfigError> {
    let id = required(env, "CLUSTER_ID")?;

    let url = required(env, "CLUSTER_URL")?.trim_end_matches('/').to_string();
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(ConfigError::Invalid {
            field: "CLUSTER_URL",
            reason: format!("expected an http(s) URL, got {:?}", url),
        });
    }

    let token = required(env, "CLUSTER_TOKEN")?;

    let debug_enabled = env.get_var("DEBUG")
        .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "True"))
        .unwrap_or(false);

    // Presence alone turns dev mode on; only an explicit falsy value turns it off.
    let dev_mode = env.get_var("DEV")
        .map(|v| !matches!(v.as_str(), "0" | "false" | "FALSE" | "False"))
        .unwrap_or(false);

    let path = required(env, "METRICS_CONFIG")?;
    let descriptor = std::fs::read_to_string(&path).map_err(|e| ConfigError::Descriptor {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    let metric_definitions = parse_metric_definitions(&descriptor).map_err(|e| ConfigError::Descriptor {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Config {
        id,
        url,
        token,
        debug_enabled,
        dev_mode,
        metric_definitions,
    })
}

fn required<E: EnvironmentProvider>(env: &E, key: &'static str) -> Result<String, ConfigError> {
    env.get_var(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(key))
}
