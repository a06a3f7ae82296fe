//! JSON normalization.
//!
//! The body is decoded into a `serde_json::Value` (a tagged variant: null,
//! bool, number, string, array, object) and encoded back compactly. Objects
//! are `BTreeMap`-backed, so keys come out sorted.
//!
//! Nesting is accepted up to [`MAX_DEPTH`] levels. Decoding, encoding and
//! teardown all grow the stack on demand or avoid recursion, so a deep body
//! cannot overflow a worker thread.

use serde::Deserialize;
use serde_json::Value;

/// Deepest array/object nesting that is still decoded.
pub const MAX_DEPTH: usize = 10_000;

const RED_ZONE: usize = 64 * 1024;
const STACK_PER_GROWTH: usize = 1024 * 1024;

/// Parse `body` as JSON and re-encode it canonically.
///
/// Anything that does not parse (including an empty body) becomes `null`.
/// Invalid UTF-8 inside strings is replaced with U+FFFD rather than rejected.
pub fn normalize(body: &[u8]) -> Vec<u8> {
    let value = match parse(body) {
        Ok(value) => value,
        Err(reason) => {
            tracing::debug!(%reason, body_len = body.len(), "Body is not JSON, echoing null");
            Value::Null
        }
    };

    let mut out = Vec::new();
    write_value(&value, &mut out);
    dismantle(value);
    out
}

fn parse(body: &[u8]) -> Result<Value, String> {
    let depth = nesting_depth(body);
    if depth > MAX_DEPTH {
        return Err(format!("nesting depth {depth} exceeds {MAX_DEPTH}"));
    }

    let text = String::from_utf8_lossy(body);
    let mut de = serde_json::Deserializer::from_str(&text);
    de.disable_recursion_limit();

    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))
        .map_err(|e| e.to_string())?;
    if let Err(e) = de.end() {
        dismantle(value);
        return Err(e.to_string());
    }
    Ok(value)
}

/// Deepest `[`/`{` nesting outside string literals.
fn nesting_depth(body: &[u8]) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for &b in body {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                max = max.max(depth);
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

/// Compact encoding, identical to `serde_json::to_vec`.
fn write_value(value: &Value, out: &mut Vec<u8>) {
    stacker::maybe_grow(RED_ZONE, STACK_PER_GROWTH, || match value {
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_value(item, out);
            }
            out.push(b']');
        }
        Value::Object(map) => {
            out.push(b'{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_scalar(key, out);
                out.push(b':');
                write_value(item, out);
            }
            out.push(b'}');
        }
        scalar => write_scalar(scalar, out),
    })
}

fn write_scalar<T: serde::Serialize + ?Sized>(scalar: &T, out: &mut Vec<u8>) {
    // Strings, numbers, bools and null cannot fail to serialize into memory.
    if serde_json::to_writer(&mut *out, scalar).is_err() {
        out.extend_from_slice(b"null");
    }
}

/// Drop a value without recursing once per nesting level.
fn dismantle(value: Value) {
    let mut pending = vec![value];
    while let Some(value) = pending.pop() {
        match value {
            Value::Array(items) => pending.extend(items),
            Value::Object(map) => pending.extend(map.into_iter().map(|(_, item)| item)),
            _ => {}
        }
    }
}
