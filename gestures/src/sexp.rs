//! S-expression helpers shared by config overrides, replay scripts,
//! and status output.

use lexpr::Value;

/// Render a boolean the way elisp reads it.
pub fn bool_sexp(b: bool) -> &'static str {
    if b {
        "t"
    } else {
        "nil"
    }
}

/// Keyword name without its leading colon, if `value` is a keyword.
/// Handles both `Value::Keyword("key")` (elisp parser) and
/// `Value::Symbol(":key")` (default parser) forms.
pub fn keyword_name(value: &Value) -> Option<&str> {
    match value {
        Value::Keyword(k) => Some(k.as_ref()),
        Value::Symbol(s) => s.strip_prefix(':'),
        _ => None,
    }
}

/// Whether a value reads as nil: `()`, `nil`, or `#f`.
pub fn is_nil(value: &Value) -> bool {
    match value {
        Value::Null | Value::Nil => true,
        Value::Symbol(s) => s.as_ref() == "nil",
        Value::Bool(b) => !*b,
        _ => false,
    }
}

/// Numeric value as f64.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

/// Elements of a proper list. Returns None for non-lists.
pub fn list_items(value: &Value) -> Option<Vec<&Value>> {
    let mut items = Vec::new();
    let mut current = value;
    loop {
        match current {
            Value::Cons(pair) => {
                items.push(pair.car());
                current = pair.cdr();
            }
            Value::Null | Value::Nil => return Some(items),
            _ => return None,
        }
    }
}

/// Key/value pairs of a keyword plist. Returns None if the list is
/// improper, a key is not a keyword, or a key has no value.
pub fn plist_pairs(value: &Value) -> Option<Vec<(&str, &Value)>> {
    let items = list_items(value)?;
    if items.len() % 2 != 0 {
        return None;
    }
    items
        .chunks(2)
        .map(|kv| keyword_name(kv[0]).map(|k| (k, kv[1])))
        .collect()
}

/// Format an event s-expression.
pub fn format_event(event_type: &str, fields: &[(&str, String)]) -> String {
    let mut s = format!("(:type :event :event :{}", event_type);
    for (key, val) in fields {
        s.push_str(&format!(" :{} {}", key, val));
    }
    s.push(')');
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_sexp() {
        assert_eq!(bool_sexp(true), "t");
        assert_eq!(bool_sexp(false), "nil");
    }

    #[test]
    fn test_plist_pairs() {
        let v = lexpr::from_str("(:a 1 :b 2.5)").unwrap();
        let pairs = plist_pairs(&v).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, "a");
        assert_eq!(as_number(pairs[1].1), Some(2.5));
    }

    #[test]
    fn test_plist_pairs_odd_length() {
        let v = lexpr::from_str("(:a 1 :b)").unwrap();
        assert!(plist_pairs(&v).is_none());
    }

    #[test]
    fn test_plist_pairs_non_keyword_key() {
        let v = lexpr::from_str("(a 1)").unwrap();
        assert!(plist_pairs(&v).is_none());
    }

    #[test]
    fn test_is_nil() {
        assert!(is_nil(&lexpr::from_str("()").unwrap()));
        assert!(is_nil(&lexpr::from_str("nil").unwrap()));
        assert!(!is_nil(&lexpr::from_str("(1)").unwrap()));
        assert!(!is_nil(&lexpr::from_str("0").unwrap()));
    }

    #[test]
    fn test_list_items_improper() {
        let v = lexpr::from_str("(1 . 2)").unwrap();
        assert!(list_items(&v).is_none());
    }

    #[test]
    fn test_format_event() {
        let s = format_event("scroll", &[("y", "0.420".to_string())]);
        assert_eq!(s, "(:type :event :event :scroll :y 0.420)");
    }
}
