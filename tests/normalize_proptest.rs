//! Property-based tests for the codec, parser and normalization pipeline.
//!
//! These tests generate URL text, both structured and loosely random, and
//! check the invariants the crate promises: encoding is idempotent,
//! serialization is a fixed point of reparsing, and normalizing twice
//! changes nothing.

use proptest::prelude::*;

use url_canon::{
    MAX_PORT, MIN_PORT, NormalizationOptions, Transform, UrlError, encode_path,
    encode_query_or_fragment, filter_port, normalize, parse, remove_dot_segments,
};

/// Strategies for generating URL text.
mod strategies {
    use super::*;

    const SCHEMES: &[&str] = &["http", "https", "HTTP", "ftp", "file", "mailto"];

    const LABELS: &[&str] = &["www", "WWW", "example", "Example", "com", "org", "bücher", "localhost", "a1"];

    const SEGMENTS: &[&str] = &[
        "", ".", "..", "%2e", "%2E%2e", "a", "B", "%7euser", "%2f", "index.html", "default.asp",
        "page.html", "x;jsessionid=1", "a b", "%zz",
    ];

    const KEYS: &[&str] = &["a", "b", "%61", "sid", "utm_source", "q", "", "k%26"];

    const VALUES: &[&str] = &["1", "", "x y", "%41", "a%2fb"];

    pub fn host() -> impl Strategy<Value = String> {
        prop::collection::vec(prop::sample::select(LABELS.to_vec()), 1..=4)
            .prop_map(|labels| labels.join("."))
    }

    pub fn user_info() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            Just("user@".to_string()),
            Just("user:pass@".to_string()),
            Just(":@".to_string()),
        ]
    }

    pub fn port() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            Just(":".to_string()),
            Just(":80".to_string()),
            Just(":443".to_string()),
            (1u32..70_000).prop_map(|p| format!(":{p}")),
        ]
    }

    pub fn path() -> impl Strategy<Value = String> {
        prop::collection::vec(prop::sample::select(SEGMENTS.to_vec()), 0..6).prop_map(|segments| {
            segments
                .iter()
                .map(|segment| format!("/{segment}"))
                .collect::<String>()
        })
    }

    pub fn query() -> impl Strategy<Value = String> {
        let pair = (
            prop::sample::select(KEYS.to_vec()),
            prop::option::of(prop::sample::select(VALUES.to_vec())),
        )
            .prop_map(|(key, value)| match value {
                Some(value) => format!("{key}={value}"),
                None => key.to_string(),
            });
        prop_oneof![
            Just(String::new()),
            Just("?".to_string()),
            prop::collection::vec(pair, 1..5).prop_map(|pairs| format!("?{}", pairs.join("&"))),
        ]
    }

    pub fn fragment() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            Just("#".to_string()),
            Just("#top".to_string()),
            Just("#a%2fb".to_string()),
        ]
    }

    /// A URL with an authority, built from the component strategies.
    pub fn url() -> impl Strategy<Value = String> {
        (
            prop::sample::select(SCHEMES.to_vec()),
            user_info(),
            host(),
            port(),
            path(),
            query(),
            fragment(),
        )
            .prop_map(|(scheme, user, host, port, path, query, fragment)| {
                format!("{scheme}://{user}{host}{port}{path}{query}{fragment}")
            })
    }

    /// Loosely random text over the characters that matter to the splitter.
    pub fn url_like_text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9:/?#@.%=&;~\\[\\] _-]{0,40}"
    }

    pub fn transforms() -> impl Strategy<Value = Vec<Transform>> {
        prop::sample::subsequence(Transform::ALL.to_vec(), 0..=Transform::ALL.len())
    }
}

mod codec_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn path_encoding_is_idempotent(text in "\\PC{0,30}") {
            let once = encode_path(&text);
            prop_assert_eq!(encode_path(&once), once);
        }

        #[test]
        fn query_encoding_is_idempotent(text in "\\PC{0,30}") {
            let once = encode_query_or_fragment(&text);
            prop_assert_eq!(encode_query_or_fragment(&once), once);
        }

        #[test]
        fn encoding_leaves_only_valid_escapes(text in "[a-z%0-9G]{0,20}") {
            let encoded = encode_path(&text);
            let bytes = encoded.as_bytes();
            for (i, b) in bytes.iter().enumerate() {
                if *b == b'%' {
                    prop_assert!(i + 2 < bytes.len());
                    prop_assert!(bytes[i + 1].is_ascii_hexdigit() && bytes[i + 2].is_ascii_hexdigit());
                }
            }
        }

        #[test]
        fn filter_port_range(value in any::<i64>()) {
            let result = filter_port(Some(value));
            if (MIN_PORT..=MAX_PORT).contains(&value) {
                prop_assert_eq!(result.map(|p| p.map(i64::from)), Ok(Some(value)));
            } else {
                prop_assert_eq!(result, Err(UrlError::InvalidPort { value }));
            }
        }

        #[test]
        fn valid_ports_pass_through(value in 1i64..=65_535) {
            prop_assert_eq!(filter_port(Some(value)).map(|p| p.map(i64::from)), Ok(Some(value)));
        }
    }
}

mod parser_tests {
    use super::strategies::*;
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn serialization_is_a_reparse_fixed_point(text in url_like_text()) {
            let serialized = parse(&text).to_string();
            prop_assert_eq!(parse(&serialized).to_string(), serialized);
        }

        #[test]
        fn structured_urls_round_trip(text in url()) {
            let url = parse(&text);
            let serialized = url.to_string();
            prop_assert_eq!(parse(&serialized).to_string(), serialized.clone());
            prop_assert!(url.host().is_some(), "no host in {}", text);
        }
    }
}

mod normalize_tests {
    use super::strategies::*;
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn normalizing_twice_equals_once(text in url(), transforms in transforms()) {
            let options = NormalizationOptions::builder()
                .enable_all(transforms)
                .query_removal_patterns(["utm_.*"])
                .build()
                .unwrap();
            let once = normalize(&parse(&text), &options);
            let twice = normalize(&once, &options);
            prop_assert_eq!(twice, once);
        }

        #[test]
        fn preserving_normalization_is_stable_through_text(text in url()) {
            let options = NormalizationOptions::preserving();
            let once = normalize(&parse(&text), &options).to_string();
            let again = normalize(&parse(&once), &options).to_string();
            prop_assert_eq!(again, once);
        }

        #[test]
        fn dot_segment_removal_leaves_no_dot_segments(text in path()) {
            let result = remove_dot_segments(&encode_path(&text));
            for segment in result.split('/') {
                prop_assert!(segment != "." && segment != "..", "{} -> {}", text, result);
                prop_assert!(!segment.eq_ignore_ascii_case("%2e"));
            }
        }
    }
}
