//! Nested path assignment for aggregated form data
//!
//! Field names like `user.email` or `addresses[0].city` are interpreted as
//! paths into the aggregated data object. Dot-separated components are object
//! keys, digit-run components (dotted or bracketed) inside the array index
//! range are array indices, and quoted bracket components
//! (`meta["dotted.key"]`) are taken verbatim. Empty components are dropped,
//! so `a..b` is the same path as `a.b`.

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
}

/// Assign `value` at `path` inside `target`, creating intermediate objects
/// and arrays as needed.
///
/// Existing scalars along the path are replaced by the container the next
/// segment requires; growing an array fills the gap with `Null`. Overlapping
/// paths are last-write-wins. Never panics, whatever the path string.
pub fn assign(target: &mut Map<String, Value>, path: &str, value: Value) {
    let segments = parse(path);
    let Some((first, rest)) = segments.split_first() else {
        // Paths that normalize to nothing ("", ".", "[]") keep the raw name.
        target.insert(path.to_string(), value);
        return;
    };

    // The aggregation root is an object, so a leading index becomes a key.
    let key = object_key(first);
    match rest.split_last() {
        None => {
            target.insert(key, value);
        }
        Some((last, mids)) => {
            let mut slot = target.entry(key).or_insert(Value::Null);
            for segment in mids {
                slot = child_slot(slot, segment);
            }
            write_value(slot, last, value);
        }
    }
}

fn object_key(segment: &Segment) -> String {
    match segment {
        Segment::Key(key) => key.clone(),
        Segment::Index(idx) => idx.to_string(),
    }
}

/// Descend one segment, coercing the slot into the container kind the
/// segment requires.
fn child_slot<'a>(slot: &'a mut Value, segment: &Segment) -> &'a mut Value {
    match segment {
        Segment::Key(key) => {
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            match slot {
                Value::Object(map) => map.entry(key.as_str()).or_insert(Value::Null),
                _ => unreachable!(),
            }
        }
        Segment::Index(idx) => {
            if !slot.is_array() {
                *slot = Value::Array(Vec::new());
            }
            match slot {
                Value::Array(items) => {
                    if items.len() <= *idx {
                        items.resize(idx + 1, Value::Null);
                    }
                    &mut items[*idx]
                }
                _ => unreachable!(),
            }
        }
    }
}

fn write_value(slot: &mut Value, segment: &Segment, value: Value) {
    match segment {
        Segment::Key(key) => {
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(map) = slot {
                map.insert(key.clone(), value);
            }
        }
        Segment::Index(idx) => {
            if !slot.is_array() {
                *slot = Value::Array(Vec::new());
            }
            if let Value::Array(items) = slot {
                if items.len() <= *idx {
                    items.resize(idx + 1, Value::Null);
                }
                items[*idx] = value;
            }
        }
    }
}

fn parse(path: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chars = path.chars().peekable();
    let mut buf = String::new();

    while let Some(c) = chars.next() {
        match c {
            '.' => flush(&mut buf, &mut segments),
            '[' => {
                flush(&mut buf, &mut segments);
                if let Some(&quote @ ('"' | '\'')) = chars.peek() {
                    chars.next();
                    let mut key = String::new();
                    for c in chars.by_ref() {
                        if c == quote {
                            break;
                        }
                        key.push(c);
                    }
                    for c in chars.by_ref() {
                        if c == ']' {
                            break;
                        }
                    }
                    // Quoted components are verbatim keys, digits included.
                    segments.push(Segment::Key(key));
                } else {
                    let mut raw = String::new();
                    for c in chars.by_ref() {
                        if c == ']' {
                            break;
                        }
                        raw.push(c);
                    }
                    if !raw.is_empty() {
                        segments.push(component(&raw));
                    }
                }
            }
            _ => buf.push(c),
        }
    }
    flush(&mut buf, &mut segments);
    segments
}

fn flush(buf: &mut String, segments: &mut Vec<Segment>) {
    if !buf.is_empty() {
        segments.push(component(buf));
        buf.clear();
    }
}

/// Upper bound for digit runs treated as array indices, matching the
/// JavaScript array index range. Runs at or past it, like runs with leading
/// zeros, address a literal key instead.
const INDEX_LIMIT: u64 = u32::MAX as u64;

fn component(raw: &str) -> Segment {
    let digits = raw.bytes().all(|b| b.is_ascii_digit());
    let uint_shaped = raw == "0" || (digits && !raw.starts_with('0'));
    if uint_shaped {
        if let Ok(idx) = raw.parse::<usize>() {
            if (idx as u64) < INDEX_LIMIT {
                return Segment::Index(idx);
            }
        }
    }
    Segment::Key(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assigned(path: &str, value: Value) -> Value {
        let mut target = Map::new();
        assign(&mut target, path, value);
        Value::Object(target)
    }

    mod parsing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_dots_split_keys() {
            assert_eq!(
                parse("user.profile.name"),
                vec![
                    Segment::Key("user".into()),
                    Segment::Key("profile".into()),
                    Segment::Key("name".into()),
                ]
            );
        }

        #[test]
        fn test_bracket_digits_are_indices() {
            assert_eq!(
                parse("tags[2]"),
                vec![Segment::Key("tags".into()), Segment::Index(2)]
            );
        }

        #[test]
        fn test_dotted_digits_are_indices() {
            assert_eq!(
                parse("tags.2"),
                vec![Segment::Key("tags".into()), Segment::Index(2)]
            );
        }

        #[test]
        fn test_quoted_component_is_verbatim() {
            assert_eq!(
                parse("meta[\"dotted.key\"]"),
                vec![Segment::Key("meta".into()), Segment::Key("dotted.key".into())]
            );
        }

        #[test]
        fn test_single_quoted_component() {
            assert_eq!(
                parse("meta['7']"),
                vec![Segment::Key("meta".into()), Segment::Key("7".into())]
            );
        }

        #[test]
        fn test_bare_bracket_word_is_key() {
            assert_eq!(
                parse("a[b].c"),
                vec![
                    Segment::Key("a".into()),
                    Segment::Key("b".into()),
                    Segment::Key("c".into()),
                ]
            );
        }

        #[test]
        fn test_empty_components_dropped() {
            assert_eq!(
                parse("a..b."),
                vec![Segment::Key("a".into()), Segment::Key("b".into())]
            );
            assert_eq!(parse(".a"), vec![Segment::Key("a".into())]);
            assert_eq!(parse("..."), Vec::<Segment>::new());
        }

        #[test]
        fn test_oversized_digit_run_is_key() {
            let segs = parse("a[99999999999999999999999]");
            assert_eq!(
                segs,
                vec![
                    Segment::Key("a".into()),
                    Segment::Key("99999999999999999999999".into()),
                ]
            );
        }

        #[test]
        fn test_index_range_boundary() {
            assert_eq!(
                parse("a[4294967294]"),
                vec![Segment::Key("a".into()), Segment::Index(4_294_967_294)]
            );
            assert_eq!(
                parse("a[4294967295]"),
                vec![Segment::Key("a".into()), Segment::Key("4294967295".into())]
            );
        }

        #[test]
        fn test_leading_zero_run_is_key() {
            assert_eq!(
                parse("a.007"),
                vec![Segment::Key("a".into()), Segment::Key("007".into())]
            );
            assert_eq!(
                parse("a.0"),
                vec![Segment::Key("a".into()), Segment::Index(0)]
            );
        }
    }

    mod assignment {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_plain_key() {
            assert_eq!(assigned("title", json!("x")), json!({ "title": "x" }));
        }

        #[test]
        fn test_nested_object() {
            assert_eq!(
                assigned("user.email", json!("a@b.com")),
                json!({ "user": { "email": "a@b.com" } })
            );
        }

        #[test]
        fn test_array_index() {
            assert_eq!(assigned("tags[0]", json!("x")), json!({ "tags": ["x"] }));
        }

        #[test]
        fn test_array_holes_filled_with_null() {
            assert_eq!(
                assigned("tags[2]", json!("x")),
                json!({ "tags": [null, null, "x"] })
            );
        }

        #[test]
        fn test_index_then_key() {
            assert_eq!(
                assigned("users[1].name", json!("ann")),
                json!({ "users": [null, { "name": "ann" }] })
            );
        }

        #[test]
        fn test_quoted_key_keeps_dot() {
            assert_eq!(
                assigned("meta[\"dotted.key\"]", json!(1)),
                json!({ "meta": { "dotted.key": 1 } })
            );
        }

        #[test]
        fn test_leading_index_becomes_root_key() {
            assert_eq!(assigned("[0].a", json!(1)), json!({ "0": { "a": 1 } }));
        }

        #[test]
        fn test_scalar_replaced_by_object() {
            let mut target = Map::new();
            assign(&mut target, "a", json!(1));
            assign(&mut target, "a.b", json!(2));
            assert_eq!(Value::Object(target), json!({ "a": { "b": 2 } }));
        }

        #[test]
        fn test_object_replaced_by_array() {
            let mut target = Map::new();
            assign(&mut target, "a.b", json!(1));
            assign(&mut target, "a.b[0]", json!(2));
            assert_eq!(Value::Object(target), json!({ "a": { "b": [2] } }));
        }

        #[test]
        fn test_overlapping_paths_last_write_wins() {
            let mut target = Map::new();
            assign(&mut target, "a.b", json!(1));
            assign(&mut target, "a.b", json!(2));
            assert_eq!(Value::Object(target), json!({ "a": { "b": 2 } }));
        }

        #[test]
        fn test_sibling_paths_merge() {
            let mut target = Map::new();
            assign(&mut target, "user.first", json!("a"));
            assign(&mut target, "user.last", json!("b"));
            assert_eq!(
                Value::Object(target),
                json!({ "user": { "first": "a", "last": "b" } })
            );
        }

        #[test]
        fn test_degenerate_path_keeps_raw_name() {
            assert_eq!(assigned("", json!(1)), json!({ "": 1 }));
            assert_eq!(assigned("...", json!(1)), json!({ "...": 1 }));
        }

        #[test]
        fn test_existing_array_index_overwritten_in_place() {
            let mut target = Map::new();
            assign(&mut target, "tags[1]", json!("old"));
            assign(&mut target, "tags[0]", json!("new"));
            assert_eq!(Value::Object(target), json!({ "tags": ["new", "old"] }));
        }

        #[test]
        fn test_out_of_range_indices_assign_as_keys() {
            assert_eq!(
                assigned("a[18446744073709551615]", json!(1)),
                json!({ "a": { "18446744073709551615": 1 } })
            );
            assert_eq!(
                assigned("a[4294967295]", json!(2)),
                json!({ "a": { "4294967295": 2 } })
            );
        }
    }
}
