//! Total scalar coercions over dynamic values.
//!
//! Every function here is total: unrecognized or unconvertible input degrades
//! to a zero value (`0`, `0.0`, `false`, `"null"`) instead of failing. The
//! optional [`CoercionHook`] lets a caller observe the lossy cases without
//! changing any result.

use serde_json::Value;

/// Describes one lossy coercion, reported through a [`CoercionHook`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lossy {
    /// Kind name of the source value (see [`kind`]).
    pub from: &'static str,
    /// Name of the requested target type, e.g. `"i64"`.
    pub target: &'static str,
    /// Textual rendering of the source value.
    pub source: String,
}

/// Observer for lossy coercions. Fired when text fails to parse, when a
/// non-scalar shape degrades to a default, or when a float→integer
/// conversion drops a fractional part. Never affects the returned value.
pub type CoercionHook = dyn Fn(Lossy);

fn report(hook: Option<&CoercionHook>, from: &'static str, target: &'static str, source: &Value) {
    if let Some(hook) = hook {
        hook(Lossy {
            from,
            target,
            source: to_string(Some(source)),
        });
    }
}

fn report_absent(hook: Option<&CoercionHook>, target: &'static str) {
    if let Some(hook) = hook {
        hook(Lossy {
            from: "undefined",
            target,
            source: "null".to_string(),
        });
    }
}

/// Kind name of a dynamic value: `"null"`, `"boolean"`, `"number"`,
/// `"string"`, `"array"`, `"object"`, or `"undefined"` for the absent
/// placeholder.
pub fn kind(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

/// Renders a value as text. Strings pass through verbatim; numbers render in
/// their natural decimal form; booleans as `true`/`false`; null and the
/// absent placeholder as `"null"`; sequences and mappings as compact JSON.
pub fn to_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "null".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(v) => v.to_string(),
    }
}

/// Coerces a value to a boolean.
///
/// Booleans pass through. Strings match a fixed case-insensitive synonym
/// table (`t`, `yes`, `y`, `1`, `pass` → true; `f`, `no`, `n`, `0`, `fail` →
/// false), then fall back to a generic parse that accepts `true`/`false` in
/// any case and yields `false` otherwise. Numbers are true iff strictly
/// greater than zero. Any other shape is false.
pub fn to_bool(value: Option<&Value>, hook: Option<&CoercionHook>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(v @ Value::String(s)) => match s.to_ascii_lowercase().as_str() {
            "t" | "yes" | "y" | "1" | "pass" | "true" => true,
            "f" | "no" | "n" | "0" | "fail" | "false" => false,
            _ => {
                report(hook, "string", "bool", v);
                false
            }
        },
        Some(Value::Number(n)) => n.as_f64().map(|f| f > 0.0).unwrap_or(false),
        Some(v) => {
            report(hook, kind(value), "bool", v);
            false
        }
        None => {
            report_absent(hook, "bool");
            false
        }
    }
}

fn to_i64_inner(value: Option<&Value>, hook: Option<&CoercionHook>, target: &'static str) -> i64 {
    match value {
        Some(Value::Bool(b)) => i64::from(*b),
        Some(v @ Value::String(s)) => match s.parse::<i64>() {
            Ok(i) => i,
            Err(_) => {
                report(hook, "string", target, v);
                0
            }
        },
        Some(v @ Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i
            } else if let Some(u) = n.as_u64() {
                report(hook, "number", target, v);
                u as i64
            } else {
                let f = n.as_f64().unwrap_or(0.0);
                if f.fract() != 0.0 {
                    report(hook, "number", target, v);
                }
                f as i64
            }
        }
        Some(v) => {
            report(hook, kind(value), target, v);
            0
        }
        None => {
            report_absent(hook, target);
            0
        }
    }
}

/// Coerces a value to an `i64`. Booleans become 1/0; text is parsed as a
/// base-10 integer (empty or unparsable text yields 0); floats truncate
/// toward zero; any other shape yields 0.
pub fn to_i64(value: Option<&Value>, hook: Option<&CoercionHook>) -> i64 {
    to_i64_inner(value, hook, "i64")
}

/// Coerces a value to an `i32`, with wrapping truncation to the target
/// width. Otherwise identical to [`to_i64`].
pub fn to_i32(value: Option<&Value>, hook: Option<&CoercionHook>) -> i32 {
    let wide = to_i64_inner(value, hook, "i32");
    let narrow = wide as i32;
    if i64::from(narrow) != wide {
        report_width(hook, value, "i32");
    }
    narrow
}

/// Coerces a value to an `i8`, with wrapping truncation to the target width.
/// Otherwise identical to [`to_i64`].
pub fn to_i8(value: Option<&Value>, hook: Option<&CoercionHook>) -> i8 {
    let wide = to_i64_inner(value, hook, "i8");
    let narrow = wide as i8;
    if i64::from(narrow) != wide {
        report_width(hook, value, "i8");
    }
    narrow
}

fn report_width(hook: Option<&CoercionHook>, value: Option<&Value>, target: &'static str) {
    match value {
        Some(v) => report(hook, kind(value), target, v),
        None => report_absent(hook, target),
    }
}

/// Coerces a value to an `f64`. Booleans become 1.0/0.0; text is parsed as a
/// decimal float (empty or unparsable text yields 0); any other shape yields
/// 0.
pub fn to_f64(value: Option<&Value>, hook: Option<&CoercionHook>) -> f64 {
    to_f64_inner(value, hook, "f64")
}

/// Coerces a value to an `f32`. Same rules as [`to_f64`], converted to the
/// target width.
pub fn to_f32(value: Option<&Value>, hook: Option<&CoercionHook>) -> f32 {
    to_f64_inner(value, hook, "f32") as f32
}

fn to_f64_inner(value: Option<&Value>, hook: Option<&CoercionHook>, target: &'static str) -> f64 {
    match value {
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(v @ Value::String(s)) => match s.parse::<f64>() {
            Ok(f) => f,
            Err(_) => {
                report(hook, "string", target, v);
                0.0
            }
        },
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(v) => {
            report(hook, kind(value), target, v);
            0.0
        }
        None => {
            report_absent(hook, target);
            0.0
        }
    }
}
