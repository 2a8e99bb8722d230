//! Exchange listing parser
//!
//! `rabbitmqctl list_exchanges` emits whitespace-delimited columns, with an
//! arguments column in an Erlang-flavoured bracket encoding rather than
//! JSON. [`decode_argument_column`] normalizes that encoding with a fixed
//! repair-rule sequence; [`parse_exchange_line`] turns one listing line into
//! an [`ExchangeRecord`].

use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;
use warren_core::types::{ExchangeKey, ExchangeRecord};
use warren_core::{Error, Result};

/// Repairs the key/value separator the listing omits: `{"key",` -> `{"key":`.
fn key_separator() -> &'static Regex {
    static KEY_SEPARATOR: OnceLock<Regex> = OnceLock::new();
    KEY_SEPARATOR.get_or_init(|| Regex::new(r#"\{("(?:.|\\")*?"),"#).expect("valid regex"))
}

/// Decode the arguments column into a standard JSON object.
///
/// The column wraps its value in one outer array even when it represents a
/// single object, omits the `:` separator after each key, and renders
/// sibling keys as adjacent single-key objects. The repair sequence, in
/// order:
///
/// 1. strip one layer of surrounding `[...]`
/// 2. insert `:` after each quoted key (`{"key",` becomes `{"key":`)
/// 3. collapse `},{` into `,`, merging the single-key objects
/// 4. an empty result decodes to `{}`
///
/// The repaired string must parse as a JSON object; failure after repairs
/// is an error for the caller to surface, since arguments participate in
/// desired-state comparison.
pub fn decode_argument_column(
    raw: &str,
) -> serde_json::Result<serde_json::Map<String, serde_json::Value>> {
    let stripped = raw
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(raw);

    let repaired = key_separator().replace_all(stripped, "{${1}:");
    let merged = repaired.replace("},{", ",");

    if merged.is_empty() {
        return Ok(serde_json::Map::new());
    }
    serde_json::from_str(&merged)
}

/// Parse one exchange listing line for `vhost`.
///
/// Returns `Ok(None)` for lines that cannot carry a record (the broker
/// suppresses nothing but the name field, so fewer than five tokens means
/// the type cannot be resolved); such lines are dropped with a diagnostic
/// rather than failing the pass. An argument column that stays unparseable
/// after all repairs is a hard error.
///
/// The listing omits an empty name field entirely instead of emitting an
/// empty token, shifting every other field left by one; a five-token line
/// is therefore an exchange with the empty name.
pub fn parse_exchange_line(vhost: &str, line: &str) -> Result<Option<ExchangeRecord>> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    let (name, rest) = match fields.len() {
        n if n >= 6 => (fields[0], &fields[1..6]),
        5 => ("", &fields[0..5]),
        _ => {
            warn!(
                "dropping unparseable exchange line for vhost `{}`: `{}`",
                vhost, line
            );
            return Ok(None);
        }
    };

    let arguments = decode_argument_column(rest[4])
        .map_err(|e| Error::parse(vhost, line, format!("bad arguments column: {}", e)))?;

    Ok(Some(ExchangeRecord {
        key: ExchangeKey::new(name, Some(vhost.to_string())),
        kind: rest[0].to_string(),
        internal: parse_flag(rest[1]),
        durable: parse_flag(rest[2]),
        auto_delete: parse_flag(rest[3]),
        arguments,
        present: true,
    }))
}

/// The listing prints boolean columns as `true`/`false`
fn parse_flag(field: &str) -> bool {
    field == "true"
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_empty_column() {
        assert!(decode_argument_column("").unwrap().is_empty());
        assert!(decode_argument_column("[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_single_key() {
        let map = decode_argument_column(r#"[{"x-max-length",10}]"#).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["x-max-length"], json!(10));
    }

    #[test]
    fn test_decode_multiple_keys() {
        let map =
            decode_argument_column(r#"[{"hash-header","hash-on"},{"x-message-ttl",60000}]"#)
                .unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["hash-header"], json!("hash-on"));
        assert_eq!(map["x-message-ttl"], json!(60000));
    }

    #[test]
    fn test_decode_nested_array_value() {
        let map = decode_argument_column(r#"[{"x-match","all"},{"grades",[1,2,3]}]"#).unwrap();
        assert_eq!(map["x-match"], json!("all"));
        assert_eq!(map["grades"], json!([1, 2, 3]));
    }

    #[test]
    fn test_decode_round_trip() {
        // Encoding {"x-max-length": 10} through the tool's convention and
        // decoding it back yields the standard map
        let map = decode_argument_column(r#"[{"x-max-length",10}]"#).unwrap();
        let expected: serde_json::Map<String, serde_json::Value> =
            serde_json::from_value(json!({"x-max-length": 10})).unwrap();
        assert_eq!(map, expected);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode_argument_column("[{broken").is_err());
        // A repaired string that is valid JSON but not an object also fails
        assert!(decode_argument_column("10").is_err());
    }

    #[test]
    fn test_parse_full_line() {
        let record = parse_exchange_line("/", "logs\ttopic\tfalse\ttrue\tfalse\t[]")
            .unwrap()
            .unwrap();
        assert_eq!(record.key.name, "logs");
        assert_eq!(record.key.vhost.as_deref(), Some("/"));
        assert_eq!(record.kind, "topic");
        assert!(!record.internal);
        assert!(record.durable);
        assert!(!record.auto_delete);
        assert!(record.arguments.is_empty());
        assert!(record.present);
    }

    #[test]
    fn test_parse_empty_name_shifts_fields() {
        // The default exchange: the listing suppresses the empty name field,
        // so only five tokens arrive
        let record = parse_exchange_line("/", "direct\tfalse\ttrue\tfalse\t[]")
            .unwrap()
            .unwrap();
        assert_eq!(record.key.name, "");
        assert_eq!(record.kind, "direct");
        assert!(record.durable);
    }

    #[test]
    fn test_named_and_empty_name_lines_differ_only_in_name() {
        let named = parse_exchange_line("/", "logs\tdirect\tfalse\ttrue\tfalse\t[]")
            .unwrap()
            .unwrap();
        let unnamed = parse_exchange_line("/", "direct\tfalse\ttrue\tfalse\t[]")
            .unwrap()
            .unwrap();

        assert_eq!(named.key.name, "logs");
        assert_eq!(unnamed.key.name, "");
        assert_eq!(named.kind, unnamed.kind);
        assert_eq!(named.internal, unnamed.internal);
        assert_eq!(named.durable, unnamed.durable);
        assert_eq!(named.auto_delete, unnamed.auto_delete);
        assert_eq!(named.arguments, unnamed.arguments);
    }

    #[test]
    fn test_parse_line_with_arguments() {
        let record = parse_exchange_line(
            "/",
            "dlx\ttopic\tfalse\ttrue\tfalse\t[{\"x-message-ttl\",60000}]",
        )
        .unwrap()
        .unwrap();
        assert_eq!(record.arguments["x-message-ttl"], json!(60000));
    }

    #[test]
    fn test_parse_short_line_dropped() {
        assert!(parse_exchange_line("/", "direct\tfalse").unwrap().is_none());
        assert!(parse_exchange_line("/", "x").unwrap().is_none());
    }

    #[test]
    fn test_parse_bad_arguments_is_hard_error() {
        let err = parse_exchange_line("/", "logs\ttopic\tfalse\ttrue\tfalse\t[{oops")
            .unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }
}
