// 📨 Request descriptors - what an HTTP executor should send
//
// Nothing here performs I/O. Entity wrappers produce `Request` values and the
// caller's executor turns them into real calls.

use crate::config::ClientConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

/// Query-string or form parameters (string, number, bool or null values)
pub type Params = BTreeMap<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Request {
    pub path: String,

    #[serde(default)]
    pub method: HttpMethod,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query: Params,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub body: Params,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl Request {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Request {
            path: path.into(),
            method,
            ..Default::default()
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Request::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Request::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Request::new(HttpMethod::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Request::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Request::new(HttpMethod::Delete, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Merge a whole parameter map into the query
    pub fn query_params(mut self, params: Params) -> Self {
        self.query.extend(params);
        self
    }

    pub fn body(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.body.insert(key.into(), value.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Absolute URL for this request, query included. Null query values are skipped.
    pub fn url(&self, config: &ClientConfig) -> Result<Url, url::ParseError> {
        let root = config.api_root.trim_end_matches('/');
        let mut url = Url::parse(&format!("{}{}", root, self.path))?;

        let pairs: Vec<(&String, String)> = self
            .query
            .iter()
            .filter_map(|(key, value)| param_string(value).map(|value| (key, value)))
            .collect();

        if !pairs.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in pairs {
                query.append_pair(key, &value);
            }
        }

        Ok(url)
    }
}

/// Render a parameter value the way it goes on the wire
pub fn param_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
