use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Ordered multi-entry header container.
///
/// Names keep the case they were added with; every lookup compares names
/// ASCII case-insensitively. Iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<(String, String)>")]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, keeping any existing entries with the same name.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Replaces every entry named `name` with a single one at the position of
    /// the first match, or appends when the name is new.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(index) => {
                self.entries[index] = (name.clone(), value);
                let mut seen_first = false;
                self.entries.retain(|(existing, _)| {
                    if !existing.eq_ignore_ascii_case(&name) {
                        return true;
                    }
                    let keep = !seen_first;
                    seen_first = true;
                    keep
                });
            }
            None => self.entries.push((name, value)),
        }
    }

    /// Combined value of all entries named `name`, joined with `", "`.
    pub fn get(&self, name: &str) -> Option<String> {
        let values = self.get_all(name);
        if values.is_empty() {
            None
        } else {
            Some(values.join(", "))
        }
    }

    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
            .collect()
    }

    pub fn has(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn remove(&mut self, name: &str) {
        self.entries
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(name))
    }
}

impl<N, V> FromIterator<(N, V)> for Headers
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl From<Vec<(String, String)>> for Headers {
    fn from(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }
}

impl From<&http::HeaderMap> for Headers {
    fn from(map: &http::HeaderMap) -> Self {
        map.iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect()
    }
}

/// Where a request's headers come from.
///
/// JSON objects deserialize into [`HeaderSource::Map`] and arrays of
/// `[name, value]` pairs into [`HeaderSource::Headers`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum HeaderSource {
    Map(#[serde(deserialize_with = "text_map")] IndexMap<String, String>),
    Headers(Headers),
}

impl HeaderSource {
    /// Entries in the source's natural order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_> {
        match self {
            HeaderSource::Headers(headers) => Box::new(headers.iter()),
            HeaderSource::Map(map) => {
                Box::new(map.iter().map(|(name, value)| (name.as_str(), value.as_str())))
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            HeaderSource::Headers(headers) => headers.is_empty(),
            HeaderSource::Map(map) => map.is_empty(),
        }
    }
}

impl From<Headers> for HeaderSource {
    fn from(headers: Headers) -> Self {
        HeaderSource::Headers(headers)
    }
}

impl From<IndexMap<String, String>> for HeaderSource {
    fn from(map: IndexMap<String, String>) -> Self {
        HeaderSource::Map(map)
    }
}

impl From<&http::HeaderMap> for HeaderSource {
    fn from(map: &http::HeaderMap) -> Self {
        HeaderSource::Headers(Headers::from(map))
    }
}

fn text_map<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(name, value)| {
            let text = match value {
                Value::String(text) => text,
                Value::Number(number) => number.to_string(),
                Value::Bool(flag) => flag.to_string(),
                Value::Null => "null".to_string(),
                Value::Array(_) | Value::Object(_) => {
                    debug!(name = %name, "dropping header with a nested value");
                    return None;
                }
            };
            Some((name, text))
        })
        .collect())
}

/// Reads an optional header source, treating any shape other than a map or
/// a list of pairs as absent.
pub(crate) fn lenient_header_source<'de, D>(
    deserializer: D,
) -> Result<Option<HeaderSource>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match HeaderSource::deserialize(raw) {
        Ok(source) => Ok(Some(source)),
        Err(err) => {
            debug!(%err, "ignoring headers of unsupported shape");
            Ok(None)
        }
    }
}
