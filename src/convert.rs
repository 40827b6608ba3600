use tracing::debug;

use crate::encoder::{generate_body, generate_compress, generate_header, generate_method};
use crate::request::{RequestInit, RequestUrl};

/// Builds a `curl` command that replays a fetch-style request.
///
/// `input` only contributes its URL. Method, headers and body come from
/// `init`, which defaults to empty options.
pub fn fetch_to_curl<I>(input: &I, init: Option<&RequestInit>) -> String
where
    I: RequestUrl + ?Sized,
{
    let url = input.request_url();
    let fallback = RequestInit::default();
    let options = init.unwrap_or(&fallback);

    let headers = generate_header(Some(options));
    debug!(url = %url, compressed = headers.is_encode, "rendering curl command");

    format!(
        "curl '{url}'{}{}{}{}",
        generate_method(options),
        headers.params,
        generate_body(&options.body),
        generate_compress(headers.is_encode),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{Headers, Request, RequestBody};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn url_string_with_and_without_options() {
        assert_eq!(
            fetch_to_curl("google.com", Some(&RequestInit::new())),
            "curl 'google.com'"
        );
        assert_eq!(fetch_to_curl("google.com", None), "curl 'google.com'");
    }

    #[test]
    fn parsed_url_renders_normalized_form() {
        let url = url::Url::parse("https://google.com").unwrap();
        assert_eq!(
            fetch_to_curl(&url, Some(&RequestInit::new())),
            "curl 'https://google.com/'"
        );
    }

    #[test]
    fn method_follows_url() {
        let init = RequestInit::new().method("POST");
        assert_eq!(
            fetch_to_curl("google.com", Some(&init)),
            "curl 'google.com' -X POST"
        );
    }

    #[test]
    fn request_input_contributes_only_its_url() {
        let request = Request::new(
            "https://example.com/items",
            RequestInit::new().method("DELETE").body("ignored"),
        );
        assert_eq!(
            fetch_to_curl(&request, None),
            "curl 'https://example.com/items'"
        );
        assert_eq!(
            request.to_curl(),
            "curl 'https://example.com/items' -X DELETE --data-binary 'ignored'"
        );
    }

    #[test]
    fn fragments_follow_fixed_order() {
        let headers: Headers = vec![
            ("Content-Type", "application/json"),
            ("Content-Length", "17"),
            ("Accept-Encoding", "gzip, deflate"),
        ]
        .into_iter()
        .collect();
        let init = RequestInit::new()
            .method("patch")
            .headers(headers)
            .body(RequestBody::from(json!({"name": "O'Brien"})));

        assert_eq!(
            fetch_to_curl("https://example.com/users/1", Some(&init)),
            concat!(
                "curl 'https://example.com/users/1' -X PATCH",
                r#" -H "Content-Type: application/json""#,
                r#" -H "Accept-Encoding: gzip, deflate""#,
                r#" --data-binary '{"name":"O'\''Brien"}'"#,
                " --compressed",
            )
        );
    }

    #[test]
    fn repeated_calls_are_identical() {
        let init = RequestInit::new()
            .method("put")
            .body(RequestBody::from(json!({"b": 2, "a": 1})));
        let first = fetch_to_curl("u", Some(&init));
        let second = fetch_to_curl("u", Some(&init));
        assert_eq!(first, second);
        assert!(first.ends_with(r#"'{"b":2,"a":1}'"#));
    }
}
