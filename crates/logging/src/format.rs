//! crates/logging/src/format.rs
//! Turns the arguments of a leveled call into the single output string.

use super::value::{CIRCULAR_MARKER, LogValue, Node, Structure, UNKNOWN_MARKER};
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::cell::{Cell, RefCell};
use std::fmt;
use thiserror::Error;

/// Number of values serialized before the rest are replaced with
/// [`UNKNOWN_MARKER`].
pub const SERIALIZATION_BUDGET: usize = 10;

/// Separator placed between joined arguments.
pub const ARGUMENT_SEPARATOR: &str = "  ";

/// Failure to serialize a structured argument.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The JSON serializer rejected the value.
    #[error("failed to serialize argument: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Compact JSON produced by [`censored_json`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CensoredJson {
    /// The JSON text.
    pub text: String,
    /// Whether a [`CIRCULAR_MARKER`] was substituted.
    pub circular: bool,
}

/// Serializes `value` to compact JSON, censoring cycles and oversized trees.
///
/// A value that re-enters one of its own ancestors is written as
/// `"[Circular]"`. The first [`SERIALIZATION_BUDGET`] values (the root
/// included) are written normally; every later one becomes `"[Unknown]"`.
///
/// # Errors
///
/// Returns [`FormatError`] when a node in the tree is mutably borrowed.
///
/// # Examples
///
/// ```
/// use logging::{LogValue, Node, censored_json};
///
/// let node = Node::map([("name", "root")]);
/// node.insert("me", &node);
///
/// let json = censored_json(&LogValue::from(&node)).unwrap();
/// assert_eq!(json.text, r#"{"name":"root","me":"[Circular]"}"#);
/// assert!(json.circular);
/// ```
pub fn censored_json(value: &LogValue) -> Result<CensoredJson, FormatError> {
    let state = CensorState::default();
    let text = serde_json::to_string(&Censored {
        value,
        state: &state,
    })?;
    Ok(CensoredJson {
        text,
        circular: state.circular.get(),
    })
}

#[derive(Default)]
struct CensorState {
    visited: Cell<usize>,
    ancestors: RefCell<Vec<Node>>,
    circular: Cell<bool>,
}

impl CensorState {
    fn is_ancestor(&self, node: &Node) -> bool {
        self.ancestors
            .borrow()
            .iter()
            .any(|ancestor| ancestor.ptr_eq(node))
    }
}

struct Censored<'a> {
    value: &'a LogValue,
    state: &'a CensorState,
}

impl Censored<'_> {
    const fn child<'b>(&'b self, value: &'b LogValue) -> Censored<'b> {
        Censored {
            value,
            state: self.state,
        }
    }
}

impl Serialize for Censored<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let state = self.state;

        if let LogValue::Structured(node) = self.value
            && state.is_ancestor(node)
        {
            state.circular.set(true);
            return serializer.serialize_str(CIRCULAR_MARKER);
        }

        if state.visited.get() >= SERIALIZATION_BUDGET {
            return serializer.serialize_str(UNKNOWN_MARKER);
        }
        state.visited.set(state.visited.get() + 1);

        match self.value {
            LogValue::Null => serializer.serialize_unit(),
            LogValue::Bool(flag) => serializer.serialize_bool(*flag),
            LogValue::Number(number) => serialize_number(*number, serializer),
            LogValue::Str(text) => serializer.serialize_str(text),
            LogValue::Structured(node) => {
                let structure = node
                    .try_structure()
                    .ok_or_else(|| S::Error::custom("value is borrowed for writing"))?;

                state.ancestors.borrow_mut().push(node.clone());
                let result = match &*structure {
                    Structure::List(items) => {
                        let mut seq = serializer.serialize_seq(Some(items.len()))?;
                        for item in items {
                            seq.serialize_element(&self.child(item))?;
                        }
                        seq.end()
                    }
                    Structure::Map(entries) => {
                        let mut map = serializer.serialize_map(Some(entries.len()))?;
                        for (key, item) in entries {
                            map.serialize_entry(key, &self.child(item))?;
                        }
                        map.end()
                    }
                };
                state.ancestors.borrow_mut().pop();
                result
            }
        }
    }
}

fn serialize_number<S: Serializer>(number: f64, serializer: S) -> Result<S::Ok, S::Error> {
    const EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

    if !number.is_finite() {
        serializer.serialize_unit()
    } else if number.fract() == 0.0 && number.abs() <= EXACT_INTEGER {
        serializer.serialize_i64(number as i64)
    } else {
        serializer.serialize_f64(number)
    }
}

/// Result of [`format_arguments`].
#[derive(Clone, Debug, PartialEq)]
pub enum Formatted {
    /// Exactly one argument, passed through untouched.
    Single(LogValue),
    /// Sorted, serialized and joined arguments.
    Text(String),
    /// Joined text plus the original arguments, produced when a cycle was
    /// censored or a structured argument could not be serialized.
    Circular {
        /// The joined text.
        text: String,
        /// The arguments in call order.
        raw: Vec<LogValue>,
    },
}

impl Formatted {
    /// Reports whether the circular fallback was taken.
    #[must_use]
    pub const fn is_circular(&self) -> bool {
        matches!(self, Self::Circular { .. })
    }
}

impl fmt::Display for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(value) if value.is_structured() => match censored_json(value) {
                Ok(json) => f.write_str(&json.text),
                Err(_) => f.write_str(&value.sort_key()),
            },
            Self::Single(value) => f.write_str(&value.sort_key()),
            Self::Text(text) | Self::Circular { text, .. } => f.write_str(text),
        }
    }
}

/// Formats the arguments of a leveled call.
///
/// Arguments are stably sorted by the UTF-16 code units of
/// [`LogValue::sort_key`]. A single argument
/// is returned as is. Otherwise structured arguments are replaced with their
/// [`censored_json`] text and everything is joined with two spaces.
///
/// # Examples
///
/// ```
/// use logging::{Formatted, LogValue, format_arguments};
///
/// let joined = format_arguments(vec![LogValue::from("b"), LogValue::from("a")]);
/// assert_eq!(joined, Formatted::Text("a  b".to_owned()));
///
/// let single = format_arguments(vec![LogValue::from(7)]);
/// assert_eq!(single, Formatted::Single(LogValue::from(7)));
/// ```
#[must_use]
pub fn format_arguments(args: Vec<LogValue>) -> Formatted {
    if args.is_empty() {
        return Formatted::Text(String::new());
    }

    let mut sorted = args.clone();
    sorted.sort_by_cached_key(|value| value.sort_key().encode_utf16().collect::<Vec<u16>>());

    if sorted.len() == 1 {
        return Formatted::Single(sorted.remove(0));
    }

    let mut circular = false;
    let parts: Vec<String> = sorted
        .iter()
        .map(|value| {
            if !value.is_structured() {
                return value.join_text();
            }
            match censored_json(value) {
                Ok(json) => {
                    circular |= json.circular;
                    json.text
                }
                Err(error) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(target: "logging::format", %error, "keeping raw argument");
                    #[cfg(not(feature = "tracing"))]
                    let _ = error;
                    circular = true;
                    value.join_text()
                }
            }
        })
        .collect();

    let text = parts.join(ARGUMENT_SEPARATOR);
    if circular {
        Formatted::Circular { text, raw: args }
    } else {
        Formatted::Text(text)
    }
}
