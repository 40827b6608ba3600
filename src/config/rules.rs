use std::collections::HashSet;

use indexmap::IndexMap;

use super::loader::HeaderRules;
use crate::request::{HeaderSource, Headers};

/// Filters and extends a request's headers according to `rules`.
///
/// Names compare case-insensitively. Appended headers are added in name
/// order and only when the request does not already carry them. The result
/// keeps the variant of the input; absent headers become a map when
/// anything is appended.
pub fn apply_header_rules(
    headers: Option<HeaderSource>,
    rules: &HeaderRules,
) -> Option<HeaderSource> {
    let include_set = lowercase_set(rules.include_headers.as_deref());
    let exclude_set = lowercase_set(rules.exclude_headers.as_deref());

    let keep = |name: &str| {
        let lower = name.to_ascii_lowercase();
        if let Some(ref include) = include_set {
            if !include.contains(&lower) {
                return false;
            }
        }
        if let Some(ref exclude) = exclude_set {
            if exclude.contains(&lower) {
                return false;
            }
        }
        true
    };

    let mut kept: Vec<(String, String)> = headers
        .as_ref()
        .map(|source| {
            source
                .iter()
                .filter(|&(name, _)| keep(name))
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect()
        })
        .unwrap_or_default();

    let mut present: HashSet<String> = kept
        .iter()
        .map(|(name, _)| name.to_ascii_lowercase())
        .collect();
    let mut appended: Vec<_> = rules.append_headers.iter().collect();
    appended.sort_by(|a, b| a.0.cmp(b.0));
    for (name, value) in appended {
        if present.insert(name.to_ascii_lowercase()) {
            kept.push((name.clone(), value.clone()));
        }
    }

    match headers {
        Some(HeaderSource::Headers(_)) => Some(HeaderSource::Headers(Headers::from(kept))),
        Some(HeaderSource::Map(_)) => Some(HeaderSource::Map(kept.into_iter().collect())),
        None if kept.is_empty() => None,
        None => Some(HeaderSource::Map(kept.into_iter().collect::<IndexMap<_, _>>())),
    }
}

fn lowercase_set(names: Option<&[String]>) -> Option<HashSet<String>> {
    names.filter(|slice| !slice.is_empty()).map(|slice| {
        slice
            .iter()
            .map(|s| s.to_ascii_lowercase())
            .collect::<HashSet<_>>()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn container() -> Option<HeaderSource> {
        let headers: Headers = vec![
            ("Accept", "*/*"),
            ("User-Agent", "curl/8"),
            ("X-Auth", "token"),
        ]
        .into_iter()
        .collect();
        Some(headers.into())
    }

    fn names(source: &HeaderSource) -> Vec<&str> {
        source.iter().map(|(name, _)| name).collect()
    }

    #[test]
    fn include_and_exclude_filters_headers() {
        let rules = HeaderRules {
            include_headers: Some(vec!["accept".to_string(), "X-Auth".to_string()]),
            exclude_headers: Some(vec!["x-auth".to_string()]),
            ..HeaderRules::default()
        };

        let result = apply_header_rules(container(), &rules).expect("headers");
        assert!(matches!(result, HeaderSource::Headers(_)));
        assert_eq!(names(&result), vec!["Accept"]);
    }

    #[test]
    fn append_headers_adds_missing_entries_in_name_order() {
        let mut append = HashMap::new();
        append.insert("X-Trace".to_string(), "abc".to_string());
        append.insert("accept".to_string(), "application/json".to_string());
        append.insert("X-Env".to_string(), "dev".to_string());
        let rules = HeaderRules {
            append_headers: append,
            ..HeaderRules::default()
        };

        let result = apply_header_rules(container(), &rules).expect("headers");
        assert_eq!(
            names(&result),
            vec!["Accept", "User-Agent", "X-Auth", "X-Env", "X-Trace"]
        );
        assert!(result.iter().any(|(n, v)| n == "Accept" && v == "*/*"));
    }

    #[test]
    fn map_sources_stay_maps() {
        let mut map = IndexMap::new();
        map.insert("Cookie".to_string(), "a=b".to_string());
        map.insert("Accept".to_string(), "*/*".to_string());
        let rules = HeaderRules {
            exclude_headers: Some(vec!["COOKIE".to_string()]),
            ..HeaderRules::default()
        };

        let result = apply_header_rules(Some(HeaderSource::Map(map)), &rules).expect("headers");
        assert!(matches!(result, HeaderSource::Map(_)));
        assert_eq!(names(&result), vec!["Accept"]);
    }

    #[test]
    fn absent_headers_stay_absent_without_appends() {
        assert!(apply_header_rules(None, &HeaderRules::default()).is_none());

        let mut append = HashMap::new();
        append.insert("X-Env".to_string(), "dev".to_string());
        let rules = HeaderRules {
            append_headers: append,
            ..HeaderRules::default()
        };
        let result = apply_header_rules(None, &rules).expect("headers");
        assert!(matches!(result, HeaderSource::Map(_)));
    }
}
