//! crates/logging/src/value.rs
//! Loggable argument values.
//!
//! Arguments handed to the leveled operations are converted into [`LogValue`]
//! at the call boundary. Scalars are stored inline. Lists and maps live in a
//! shared [`Node`] so that aliasing and self-reference survive the
//! conversion, which the formatter must detect rather than loop on.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Marker written in place of a value that re-enters one of its ancestors.
pub const CIRCULAR_MARKER: &str = "[Circular]";

/// Marker written in place of values past the serialization budget.
pub const UNKNOWN_MARKER: &str = "[Unknown]";

/// A single argument of a leveled logging call.
#[derive(Clone, Debug, PartialEq)]
pub enum LogValue {
    /// Absent value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Number; integers are carried as `f64`.
    Number(f64),
    /// Text.
    Str(String),
    /// Shared list or map.
    Structured(Node),
}

impl LogValue {
    /// Returns the text the value sorts by.
    ///
    /// Strings are themselves, numbers use their shortest form, maps read
    /// `[object Object]` and lists join their elements with commas.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::{LogValue, Node};
    ///
    /// assert_eq!(LogValue::from(10).sort_key(), "10");
    /// assert_eq!(LogValue::from(0.5).sort_key(), "0.5");
    /// assert_eq!(LogValue::Null.sort_key(), "null");
    /// assert_eq!(LogValue::from(Node::list([1, 2])).sort_key(), "1,2");
    /// assert_eq!(LogValue::from(Node::map([("a", 1)])).sort_key(), "[object Object]");
    /// ```
    #[must_use]
    pub fn sort_key(&self) -> String {
        match self {
            Self::Null => "null".to_owned(),
            other => other.join_text(),
        }
    }

    /// Returns the text used when the value is joined with other arguments.
    ///
    /// Identical to [`sort_key`](Self::sort_key) except that `Null` joins as
    /// empty text.
    #[must_use]
    pub fn join_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out, &mut Vec::new());
        out
    }

    /// Returns the shared node when the value is a list or map.
    #[must_use]
    pub const fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Structured(node) => Some(node),
            _ => None,
        }
    }

    /// Reports whether the value is a list or map.
    #[must_use]
    pub const fn is_structured(&self) -> bool {
        matches!(self, Self::Structured(_))
    }

    fn write_text(&self, out: &mut String, open: &mut Vec<Node>) {
        match self {
            Self::Null => {}
            Self::Bool(flag) => out.push_str(if *flag { "true" } else { "false" }),
            Self::Number(number) => out.push_str(&number_text(*number)),
            Self::Str(text) => out.push_str(text),
            Self::Structured(node) => node.write_text(out, open),
        }
    }
}

impl fmt::Display for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sort_key())
    }
}

/// Renders a number in its shortest round-trip form.
///
/// Magnitudes of `1e21` and above, or below `1e-6`, switch to exponent
/// notation with an explicit sign (`1e+21`, `5e-7`).
pub(crate) fn number_text(number: f64) -> String {
    if number.is_nan() {
        return "NaN".to_owned();
    }
    if number.is_infinite() {
        return if number.is_sign_positive() {
            "Infinity".to_owned()
        } else {
            "-Infinity".to_owned()
        };
    }
    if number == 0.0 {
        return "0".to_owned();
    }

    let magnitude = number.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return number.to_string();
    }

    let text = format!("{number:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}

/// Contents of a [`Node`].
#[derive(Clone, Debug, PartialEq)]
pub enum Structure {
    /// Ordered list of values.
    List(Vec<LogValue>),
    /// Ordered key/value entries; keys are unique.
    Map(Vec<(String, LogValue)>),
}

/// Shared, mutable list or map.
///
/// Cloning a node clones the handle, not the contents, so a node may appear
/// several times in one argument tree or contain itself. Equality is identity.
#[derive(Clone)]
pub struct Node(Rc<RefCell<Structure>>);

impl Node {
    /// Creates a list node.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        Self::from_structure(Structure::List(items.into_iter().map(Into::into).collect()))
    }

    /// Creates a map node. A repeated key keeps its first position and its
    /// last value.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<LogValue>,
    {
        let node = Self::from_structure(Structure::Map(Vec::new()));
        for (key, value) in entries {
            node.insert(key, value);
        }
        node
    }

    /// Wraps existing contents in a new node.
    #[must_use]
    pub fn from_structure(structure: Structure) -> Self {
        Self(Rc::new(RefCell::new(structure)))
    }

    /// Appends `value` to a list node. Has no effect on a map.
    ///
    /// # Panics
    ///
    /// Panics when the node is currently borrowed.
    pub fn push(&self, value: impl Into<LogValue>) {
        if let Structure::List(items) = &mut *self.0.borrow_mut() {
            items.push(value.into());
        }
    }

    /// Sets `key` on a map node, replacing any previous value in place. Has
    /// no effect on a list.
    ///
    /// # Panics
    ///
    /// Panics when the node is currently borrowed.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<LogValue>) {
        if let Structure::Map(entries) = &mut *self.0.borrow_mut() {
            let key = key.into();
            let value = value.into();
            match entries.iter_mut().find(|(existing, _)| *existing == key) {
                Some((_, slot)) => *slot = value,
                None => entries.push((key, value)),
            }
        }
    }

    /// Borrows the contents.
    ///
    /// # Panics
    ///
    /// Panics when the node is currently mutably borrowed.
    #[must_use]
    pub fn structure(&self) -> Ref<'_, Structure> {
        self.0.borrow()
    }

    /// Mutably borrows the contents.
    ///
    /// While the returned guard is alive the node cannot be serialized, and
    /// formatting falls back to the raw arguments.
    ///
    /// # Panics
    ///
    /// Panics when the node is currently borrowed.
    #[must_use]
    pub fn structure_mut(&self) -> RefMut<'_, Structure> {
        self.0.borrow_mut()
    }

    pub(crate) fn try_structure(&self) -> Option<Ref<'_, Structure>> {
        self.0.try_borrow().ok()
    }

    /// Reports whether both handles point at the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the number of elements or entries; zero while mutably borrowed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.try_structure().map_or(0, |structure| match &*structure {
            Structure::List(items) => items.len(),
            Structure::Map(entries) => entries.len(),
        })
    }

    /// Reports whether the node holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn write_text(&self, out: &mut String, open: &mut Vec<Self>) {
        if open.iter().any(|node| node.ptr_eq(self)) {
            return;
        }
        let Some(structure) = self.try_structure() else {
            return;
        };
        match &*structure {
            Structure::Map(_) => out.push_str("[object Object]"),
            Structure::List(items) => {
                open.push(self.clone());
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        out.push(',');
                    }
                    item.write_text(out, open);
                }
                open.pop();
            }
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.try_structure().as_deref() {
            Some(Structure::List(_)) => "list",
            Some(Structure::Map(_)) => "map",
            None => "borrowed",
        };
        f.debug_struct("Node")
            .field("kind", &kind)
            .field("len", &self.len())
            .finish()
    }
}

impl From<Node> for LogValue {
    fn from(node: Node) -> Self {
        Self::Structured(node)
    }
}

impl From<&Node> for LogValue {
    fn from(node: &Node) -> Self {
        Self::Structured(node.clone())
    }
}

impl From<&str> for LogValue {
    fn from(text: &str) -> Self {
        Self::Str(text.to_owned())
    }
}

impl From<String> for LogValue {
    fn from(text: String) -> Self {
        Self::Str(text)
    }
}

impl From<&String> for LogValue {
    fn from(text: &String) -> Self {
        Self::Str(text.clone())
    }
}

impl From<char> for LogValue {
    fn from(ch: char) -> Self {
        Self::Str(ch.to_string())
    }
}

impl From<bool> for LogValue {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<()> for LogValue {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl<T: Into<Self>> From<Option<T>> for LogValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

macro_rules! lossless_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for LogValue {
                fn from(number: $ty) -> Self {
                    Self::Number(f64::from(number))
                }
            }
        )*
    };
}

lossless_number!(i8, i16, i32, u8, u16, u32, f32, f64);

macro_rules! wide_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for LogValue {
                fn from(number: $ty) -> Self {
                    Self::Number(number as f64)
                }
            }
        )*
    };
}

wide_number!(i64, u64, isize, usize);

impl From<serde_json::Value> for LogValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(flag),
            Value::Number(number) => number.as_f64().map_or(Self::Null, Self::Number),
            Value::String(text) => Self::Str(text),
            Value::Array(items) => Self::Structured(Node::list(items)),
            Value::Object(entries) => Self::Structured(Node::map(entries)),
        }
    }
}

impl From<&serde_json::Value> for LogValue {
    fn from(value: &serde_json::Value) -> Self {
        Self::from(value.clone())
    }
}
