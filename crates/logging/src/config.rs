//! crates/logging/src/config.rs
//! Logger settings, partial updates, and the JSON merge rules that apply them.

use super::levels::{LevelSpec, Severity};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// Category toggled by [`LogService::rs`](crate::LogService::rs).
pub const ROUTES_AND_STATES: &str = "rs";

/// Category toggled by [`LogService::dlog`](crate::LogService::dlog).
pub const DIRECTIVES: &str = "directives";

/// Complete logger configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Master switch for every channel except `error`.
    pub enabled: bool,
    /// Verbosity threshold.
    pub level: Severity,
    /// Per-category switches layered on top of the level gate.
    pub categories: BTreeMap<String, bool>,
    /// Append the caller location to tiered lines.
    pub show_emitter_location: bool,
    /// Render category names as badge labels instead of message prefixes.
    pub show_labels: bool,
    /// Host-supplied keys the logger does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        let categories = [ROUTES_AND_STATES, DIRECTIVES]
            .into_iter()
            .map(|name| (name.to_owned(), true))
            .collect();

        Self {
            enabled: false,
            level: Severity::Warn,
            categories,
            show_emitter_location: true,
            show_labels: false,
            extra: Map::new(),
        }
    }
}

impl Settings {
    /// Reports whether `category` is switched on. Unknown categories are off.
    #[must_use]
    pub fn category_enabled(&self, category: &str) -> bool {
        self.categories.get(category).copied().unwrap_or(false)
    }

    /// Reports whether `severity` passes both the enable flag and the level.
    #[must_use]
    pub const fn admits(&self, severity: Severity) -> bool {
        self.enabled && severity.within(self.level)
    }
}

/// Errors raised while interpreting a settings argument.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The argument was not a JSON object.
    #[error("settings must be an object, found {found}")]
    NotAnObject {
        /// JSON kind of the rejected argument.
        found: &'static str,
    },
}

/// Partial settings update. Absent fields keep their previous value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    /// New enable flag.
    #[serde(alias = "enable", skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// New level; ignored when it does not resolve.
    #[serde(alias = "debugLevel", skip_serializing_if = "Option::is_none")]
    pub level: Option<LevelSpec>,
    /// Category switches merged key by key.
    #[serde(alias = "debugModules", skip_serializing_if = "BTreeMap::is_empty")]
    pub categories: BTreeMap<String, bool>,
    /// New location display flag.
    #[serde(alias = "emitters", skip_serializing_if = "Option::is_none")]
    pub show_emitter_location: Option<bool>,
    /// New label display flag.
    #[serde(alias = "labels", skip_serializing_if = "Option::is_none")]
    pub show_labels: Option<bool>,
    /// Remaining keys, merged into [`Settings::extra`].
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SettingsPatch {
    /// Builds a patch from an arbitrary JSON value.
    ///
    /// Both the canonical keys and the host aliases (`enable`, `debugLevel`,
    /// `debugModules`, `emitters`, `labels`) are recognised. A known key
    /// holding a value of the wrong type is skipped; keys the logger does not
    /// know are kept in [`extra`](Self::extra).
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::{LevelSpec, SettingsPatch};
    /// use serde_json::json;
    ///
    /// let patch = SettingsPatch::from_json(&json!({
    ///     "enable": true,
    ///     "debugLevel": "info",
    ///     "labels": "yes",
    ///     "theme": {"dark": true}
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(patch.enabled, Some(true));
    /// assert_eq!(patch.level, Some(LevelSpec::Name("info".into())));
    /// assert_eq!(patch.show_labels, None);
    /// assert!(patch.extra.contains_key("theme"));
    ///
    /// assert!(SettingsPatch::from_json(&json!([1, 2])).is_err());
    /// ```
    pub fn from_json(value: &Value) -> Result<Self, SettingsError> {
        let Value::Object(map) = value else {
            return Err(SettingsError::NotAnObject {
                found: json_kind(value),
            });
        };

        let mut patch = Self::default();
        for (key, value) in map {
            match key.as_str() {
                "enabled" | "enable" => {
                    if let Some(flag) = value.as_bool() {
                        patch.enabled = Some(flag);
                    }
                }
                "level" | "debugLevel" => {
                    if let Some(level) = LevelSpec::from_json(value) {
                        patch.level = Some(level);
                    }
                }
                "categories" | "debugModules" => {
                    if let Value::Object(categories) = value {
                        for (name, flag) in categories {
                            if let Some(flag) = flag.as_bool() {
                                patch.categories.insert(name.clone(), flag);
                            }
                        }
                    }
                }
                "showEmitterLocation" | "emitters" => {
                    if let Some(flag) = value.as_bool() {
                        patch.show_emitter_location = Some(flag);
                    }
                }
                "showLabels" | "labels" => {
                    if let Some(flag) = value.as_bool() {
                        patch.show_labels = Some(flag);
                    }
                }
                _ => {
                    merge_value(&mut patch.extra, key, value.clone());
                }
            }
        }

        Ok(patch)
    }

    /// Reports whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enabled.is_none()
            && self.level.is_none()
            && self.categories.is_empty()
            && self.show_emitter_location.is_none()
            && self.show_labels.is_none()
            && self.extra.is_empty()
    }
}

/// Merges `patch` into `target`.
///
/// Keys present in both whose values are objects on both sides merge
/// recursively; every other value (arrays, strings, numbers, booleans,
/// null) overwrites the target outright.
///
/// # Examples
///
/// ```
/// use logging::merge_json;
/// use serde_json::json;
///
/// let mut target = json!({"a": {"x": 1, "y": [1, 2]}, "b": 1}).as_object().unwrap().clone();
/// let patch = json!({"a": {"y": [3], "z": true}, "b": "two"}).as_object().unwrap().clone();
/// merge_json(&mut target, &patch);
///
/// assert_eq!(
///     serde_json::Value::Object(target),
///     json!({"a": {"x": 1, "y": [3], "z": true}, "b": "two"})
/// );
/// ```
pub fn merge_json(target: &mut Map<String, Value>, patch: &Map<String, Value>) {
    for (key, value) in patch {
        merge_value(target, key, value.clone());
    }
}

fn merge_value(target: &mut Map<String, Value>, key: &str, value: Value) {
    match (target.get_mut(key), value) {
        (Some(Value::Object(existing)), Value::Object(incoming)) => {
            merge_json(existing, &incoming);
        }
        (_, value) => {
            target.insert(key.to_owned(), value);
        }
    }
}

pub(crate) const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
