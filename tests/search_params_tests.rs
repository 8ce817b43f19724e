#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]

/// Tests for UrlSearchParams, standalone and attached to a URL
use whurl::{Url, UrlSearchParams};

#[test]
fn test_parse_basics() {
    let params = UrlSearchParams::parse("a=1&b=2&a=3");
    assert_eq!(params.size(), 3);
    assert_eq!(params.get("a"), Some("1"));
    assert_eq!(params.get_all("a"), ["1", "3"]);
    assert_eq!(params.get("b"), Some("2"));
    assert_eq!(params.get("missing"), None);
}

#[test]
fn test_parse_question_mark_and_empty_chunks() {
    let params = UrlSearchParams::parse("?a=1");
    assert_eq!(params.get("a"), Some("1"));

    let params = UrlSearchParams::parse("&&a=1&&&b=2&");
    assert_eq!(params.size(), 2);
}

#[test]
fn test_parse_no_value_and_extra_equals() {
    let params = UrlSearchParams::parse("flag&k=v=w");
    assert_eq!(params.get("flag"), Some(""));
    assert_eq!(params.get("k"), Some("v=w"));
}

#[test]
fn test_set_replaces_first_and_drops_rest() {
    let mut params = UrlSearchParams::parse("a=1&b=2&a=3");
    params.set("a", "9");
    assert_eq!(params.to_string(), "a=9&b=2");

    params.set("c", "7");
    assert_eq!(params.to_string(), "a=9&b=2&c=7");
}

#[test]
fn test_append_and_delete() {
    let mut params = UrlSearchParams::new();
    params.append("k", "1");
    params.append("k", "2");
    params.append("other", "x");
    assert_eq!(params.size(), 3);

    params.delete("k", Some("1"));
    assert_eq!(params.get_all("k"), ["2"]);

    params.delete("k", None);
    assert!(!params.has("k", None));
    assert_eq!(params.to_string(), "other=x");
}

#[test]
fn test_has_with_value() {
    let params = UrlSearchParams::parse("a=1&a=2");
    assert!(params.has("a", None));
    assert!(params.has("a", Some("1")));
    assert!(params.has("a", Some("2")));
    assert!(!params.has("a", Some("3")));
}

#[test]
fn test_iteration_order() {
    let params = UrlSearchParams::parse("c=3&a=1&b=2");
    let keys: Vec<&str> = params.keys().collect();
    assert_eq!(keys, ["c", "a", "b"]);
    let values: Vec<&str> = params.values().collect();
    assert_eq!(values, ["3", "1", "2"]);
    let entries: Vec<(&str, &str)> = params.entries().collect();
    assert_eq!(entries, [("c", "3"), ("a", "1"), ("b", "2")]);
}

#[test]
fn test_sort_stable_by_name() {
    let mut params = UrlSearchParams::parse("z=1&a=2&z=3&a=4");
    params.sort();
    let entries: Vec<(&str, &str)> = params.iter().collect();
    assert_eq!(entries, [("a", "2"), ("a", "4"), ("z", "1"), ("z", "3")]);
}

#[test]
fn test_sort_uses_utf16_code_units() {
    // U+1F308's lead surrogate (0xD83C) sorts below U+FB03 in UTF-16,
    // although its code point is higher
    let mut params = UrlSearchParams::new();
    params.append("\u{fb03}", "1");
    params.append("\u{1f308}", "2");
    params.sort();
    let keys: Vec<&str> = params.keys().collect();
    assert_eq!(keys, ["\u{1f308}", "\u{fb03}"]);
}

#[test]
fn test_space_and_plus_round_trip() {
    let mut params = UrlSearchParams::new();
    params.append("k", "a b");
    assert_eq!(params.to_string(), "k=a+b");
    let reparsed = UrlSearchParams::parse(&params.to_string());
    assert_eq!(reparsed.get("k"), Some("a b"));

    let mut params = UrlSearchParams::new();
    params.append("math", "1+1=2");
    assert_eq!(params.to_string(), "math=1%2B1%3D2");
    let reparsed = UrlSearchParams::parse(&params.to_string());
    assert_eq!(reparsed.get("math"), Some("1+1=2"));
}

#[test]
fn test_unicode_round_trip() {
    let mut params = UrlSearchParams::new();
    params.append("name", "Fran\u{e7}ois");
    params.append("snow", "\u{2603}");
    let serialized = params.to_string();
    assert!(serialized.is_ascii());
    let reparsed = UrlSearchParams::parse(&serialized);
    assert_eq!(reparsed.get("name"), Some("Fran\u{e7}ois"));
    assert_eq!(reparsed.get("snow"), Some("\u{2603}"));
}

#[test]
fn test_construction_coercions() {
    let params: UrlSearchParams = "a=1&b=2".into();
    assert_eq!(params.get("b"), Some("2"));

    let params: UrlSearchParams = "?a=1".into();
    assert_eq!(params.get("a"), Some("1"));

    let params: UrlSearchParams = String::from("c=3").into();
    assert_eq!(params.get("c"), Some("3"));

    let params: UrlSearchParams = [("a", "1"), ("b", "2")].into_iter().collect();
    assert_eq!(params.to_string(), "a=1&b=2");
    assert!(!params.is_empty());
    assert!(UrlSearchParams::new().is_empty());

    let mut params = UrlSearchParams::new();
    params.extend([("x", "y")]);
    assert_eq!(params.get("x"), Some("y"));
}

#[test]
fn test_url_coupling_append() {
    let mut url = Url::parse("http://example.com/p?a=1", None).unwrap();
    {
        let mut params = url.search_params_mut();
        params.append("b", "2");
        params.set("a", "9");
    }
    assert_eq!(url.search(), "?a=9&b=2");
    assert_eq!(url.href(), "http://example.com/p?a=9&b=2");
}

#[test]
fn test_url_coupling_clear_empties_query() {
    let mut url = Url::parse("http://example.com/p?a=1&b=2", None).unwrap();
    {
        let mut params = url.search_params_mut();
        params.delete("a", None);
        params.delete("b", None);
    }
    assert_eq!(url.search(), "");
    assert_eq!(url.href(), "http://example.com/p");
}

#[test]
fn test_url_coupling_sort() {
    let mut url = Url::parse("http://example.com/?b=2&a=1", None).unwrap();
    url.search_params_mut().sort();
    assert_eq!(url.href(), "http://example.com/?a=1&b=2");
}

#[test]
fn test_snapshot_is_detached() {
    let url = Url::parse("http://example.com/?a=1", None).unwrap();
    let mut params = url.search_params();
    params.append("b", "2");
    // The snapshot does not write back
    assert_eq!(url.search(), "?a=1");
}

#[test]
fn test_set_search_reloads_params() {
    let mut url = Url::parse("http://example.com/?a=1", None).unwrap();
    url.set_search("c=3");
    assert_eq!(url.search_params().get("c"), Some("3"));
    assert_eq!(url.search_params().get("a"), None);
}

#[test]
fn test_decoded_names_and_values() {
    // Names and values come out percent-decoded and UTF-8 decoded
    let url = Url::parse("http://h/?na%20me=va%26lue&sn%C3%B6=x", None).unwrap();
    let params = url.search_params();
    assert_eq!(params.get("na me"), Some("va&lue"));
    assert_eq!(params.get("sn\u{f6}"), Some("x"));
}
