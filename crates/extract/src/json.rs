//! Tolerant accessors over loosely-shaped JSON.
//!
//! Upstream fields are frequently present-but-empty (`""`, `0`, `null`), so
//! fallback chains skip anything falsy rather than stopping at the first key
//! that merely exists.

use scraper::Html;
use serde_json::Value;

use crate::consts;

/// Whether a value counts as "set" for the purposes of a fallback chain.
///
/// `null`, `false`, `0`, `NaN` and `""` are unset; objects and arrays are
/// always set, even when empty.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Follows a dotted path (`"data.items"`) through nested objects.
pub(crate) fn path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| current.get(key))
}

/// The first truthy value among `paths`, in order.
pub(crate) fn first<'a>(value: &'a Value, paths: &[&str]) -> Option<&'a Value> {
    paths.iter().filter_map(|p| path(value, p)).find(|v| truthy(v))
}

/// Renders scalars as text; strings as-is, numbers in decimal.
pub(crate) fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// The first truthy value among `paths` that can be rendered as text.
pub(crate) fn first_text(value: &Value, paths: &[&str]) -> Option<String> {
    paths.iter().filter_map(|p| path(value, p)).filter(|v| truthy(v)).find_map(text)
}

/// Lenient integer parsing: numbers are truncated, strings contribute their
/// leading (optionally signed) run of digits, so `"2023 (HD)"` is `2023`.
pub(crate) fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => leading_int(s),
        _ => None,
    }
}

fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Strict numeric conversion: the whole (trimmed) string must be a number.
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Names out of a category-like field.
///
/// Supports a flat array (of strings or `{name}` objects) and the grouped
/// object form `{"1": {"group": {..}, "list": [{"name": ..}]}, ..}`.
pub(crate) fn names(value: Option<&Value>) -> Vec<String> {
    let named = |v: &Value| match v {
        Value::Object(_) => first_text(v, &["name"]),
        other => text(other),
    };
    match value {
        Some(Value::Array(entries)) => entries.iter().filter_map(named).collect(),
        Some(Value::Object(groups)) => groups
            .values()
            .flat_map(|group| match group.get("list") {
                Some(Value::Array(list)) => list.iter().filter_map(named).collect(),
                _ => named(group).into_iter().collect::<Vec<_>>(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// The first `19xx`/`20xx` token in the given names.
pub(crate) fn year_from_names(names: &[String]) -> Option<i32> {
    consts::YEAR_REGEX.find(&names.join(" ")).and_then(|m| m.as_str().parse().ok())
}

/// Reduces an HTML fragment to its trimmed text content.
///
/// # Examples
///
/// ```rust
/// use nguonc_extract::strip_html;
///
/// assert_eq!(strip_html("<p>Ch&agrave;o <b>bạn</b></p> "), "Chào bạn");
/// ```
pub fn strip_html(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment.root_element().text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(null), false)]
    #[case(json!(false), false)]
    #[case(json!(0), false)]
    #[case(json!(""), false)]
    #[case(json!("0"), true)]
    #[case(json!(1.5), true)]
    #[case(json!([]), true)]
    #[case(json!({}), true)]
    fn test_truthy(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(truthy(&value), expected);
    }

    #[test]
    fn test_first_text_skips_empty_values() {
        let raw = json!({"name": "", "title": null, "origin_name": "Origin", "vn_name": "Tên"});
        assert_eq!(first_text(&raw, &["name", "title", "origin_name", "vn_name"]), Some("Origin".to_string()));
        assert_eq!(first_text(&raw, &["missing"]), None);
    }

    #[test]
    fn test_path_follows_nested_objects() {
        let raw = json!({"data": {"items": [1, 2]}, "flat": 3});
        assert_eq!(path(&raw, "data.items"), Some(&json!([1, 2])));
        assert_eq!(path(&raw, "flat.deeper"), None);
    }

    #[rstest]
    #[case(json!(2023), Some(2023))]
    #[case(json!(12.9), Some(12))]
    #[case(json!("2019"), Some(2019))]
    #[case(json!("  24 tập"), Some(24))]
    #[case(json!("-3"), Some(-3))]
    #[case(json!("Tập 5"), None)]
    #[case(json!(true), None)]
    fn test_as_int(#[case] value: Value, #[case] expected: Option<i64>) {
        assert_eq!(as_int(&value), expected);
    }

    #[rstest]
    #[case(json!(12), Some(12.0))]
    #[case(json!(" 3 "), Some(3.0))]
    #[case(json!("24 tập"), None)]
    fn test_as_number(#[case] value: Value, #[case] expected: Option<f64>) {
        assert_eq!(as_number(&value), expected);
    }

    #[test]
    fn test_names_from_flat_and_grouped_categories() {
        let flat = json!([{"name": "Hành Động"}, "Hài", {"slug": "no-name"}]);
        assert_eq!(names(Some(&flat)), vec!["Hành Động", "Hài"]);
        let grouped = json!({
            "1": {"group": {"name": "Định dạng"}, "list": [{"name": "Phim bộ"}]},
            "3": {"group": {"name": "Năm"}, "list": [{"name": "2024"}]}
        });
        assert_eq!(names(Some(&grouped)), vec!["Phim bộ", "2024"]);
        assert!(names(None).is_empty());
    }

    #[rstest]
    #[case(&["Phim bộ", "2024"], Some(2024))]
    #[case(&["Hài", "Năm 1998 cũ"], Some(1998))]
    #[case(&["12024", "2100"], None)]
    #[case(&[], None)]
    fn test_year_from_names(#[case] input: &[&str], #[case] expected: Option<i32>) {
        let input: Vec<String> = input.iter().map(|s| s.to_string()).collect();
        assert_eq!(year_from_names(&input), expected);
    }

    #[test]
    fn test_strip_html_passes_plain_text_through() {
        assert_eq!(strip_html("  plain text "), "plain text");
        assert_eq!(strip_html(""), "");
    }
}
