use crate::error::{DeckwatchError, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

const PREFS_FILENAME: &str = "prefs.json";

const SECONDS_PER_DAY: i64 = 86_400;

/// User preferences, stored as a flat JSON document in the preferences
/// directory.
///
/// Loading is fail-soft per key: a missing or unreadable file yields all
/// defaults, and a corrupt value for one key falls back to that key's
/// default without disturbing the rest. Writes go through a temp file and
/// rename, so a crashed write never leaves a truncated document behind.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Preferences {
    pub menu_title: String,
    pub show_when_profile_opens: bool,
    pub notify_every_n_days: u32,
    pub notify_never: bool,
    /// Unix timestamp of the last shown report; 0 means never shown.
    pub last_opened_at: i64,
    pub name_filter: String,
    pub filter_filtered_decks: bool,
    pub filter_container_decks: bool,
    pub filter_empty_decks: bool,
    pub filter_limits_zero: bool,
    pub filter_available_zero: bool,
    pub filter_has_new: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            menu_title: "Find Empty New-Card Decks".to_string(),
            show_when_profile_opens: false,
            notify_every_n_days: 0,
            notify_never: true,
            last_opened_at: 0,
            name_filter: String::new(),
            filter_filtered_decks: true,
            filter_container_decks: true,
            filter_empty_decks: true,
            filter_limits_zero: true,
            filter_available_zero: true,
            filter_has_new: false,
        }
    }
}

impl Preferences {
    /// Load preferences from the given directory, falling back to defaults
    /// on any failure. Never errors.
    pub fn load<P: AsRef<Path>>(prefs_dir: P) -> Self {
        let path = prefs_dir.as_ref().join(PREFS_FILENAME);
        let Ok(content) = fs::read_to_string(&path) else {
            return Self::default();
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(doc) => Self::from_document(&doc),
            Err(_) => Self::default(),
        }
    }

    fn from_document(doc: &Value) -> Self {
        let d = Self::default();
        Self {
            menu_title: str_or(doc, "menu_title", d.menu_title),
            show_when_profile_opens: bool_or(
                doc,
                "show_when_profile_opens",
                d.show_when_profile_opens,
            ),
            notify_every_n_days: u32_or(doc, "notify_every_n_days", d.notify_every_n_days),
            notify_never: bool_or(doc, "notify_never", d.notify_never),
            last_opened_at: i64_or(doc, "last_opened_at", d.last_opened_at),
            name_filter: str_or(doc, "name_filter", d.name_filter),
            filter_filtered_decks: bool_or(doc, "filter_filtered_decks", d.filter_filtered_decks),
            filter_container_decks: bool_or(
                doc,
                "filter_container_decks",
                d.filter_container_decks,
            ),
            filter_empty_decks: bool_or(doc, "filter_empty_decks", d.filter_empty_decks),
            filter_limits_zero: bool_or(doc, "filter_limits_zero", d.filter_limits_zero),
            filter_available_zero: bool_or(doc, "filter_available_zero", d.filter_available_zero),
            filter_has_new: bool_or(doc, "filter_has_new", d.filter_has_new),
        }
    }

    /// Save preferences atomically: write to a temp file in the same
    /// directory, then rename over the old document.
    pub fn save<P: AsRef<Path>>(&self, prefs_dir: P) -> Result<()> {
        let prefs_dir = prefs_dir.as_ref();
        if !prefs_dir.exists() {
            fs::create_dir_all(prefs_dir).map_err(DeckwatchError::Io)?;
        }
        let path = prefs_dir.join(PREFS_FILENAME);
        let tmp_path = prefs_dir.join(format!("{}.tmp", PREFS_FILENAME));
        let content = serde_json::to_string_pretty(self).map_err(DeckwatchError::Serialization)?;
        fs::write(&tmp_path, content).map_err(DeckwatchError::Io)?;
        fs::rename(&tmp_path, &path).map_err(DeckwatchError::Io)?;
        Ok(())
    }

    /// Reminder policy: never when `notify_never`; always when the interval
    /// is 0; otherwise only once the report has been shown before and the
    /// interval has elapsed since.
    pub fn should_auto_show(&self, now: i64) -> bool {
        if self.notify_never {
            return false;
        }
        if self.notify_every_n_days == 0 {
            return true;
        }
        if self.last_opened_at <= 0 {
            return false;
        }
        let elapsed_days = (now - self.last_opened_at) / SECONDS_PER_DAY;
        elapsed_days >= i64::from(self.notify_every_n_days)
    }

    /// All recognized keys with their current values, in document order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("menu_title", self.menu_title.clone()),
            (
                "show_when_profile_opens",
                self.show_when_profile_opens.to_string(),
            ),
            ("notify_every_n_days", self.notify_every_n_days.to_string()),
            ("notify_never", self.notify_never.to_string()),
            ("last_opened_at", self.last_opened_at.to_string()),
            ("name_filter", self.name_filter.clone()),
            (
                "filter_filtered_decks",
                self.filter_filtered_decks.to_string(),
            ),
            (
                "filter_container_decks",
                self.filter_container_decks.to_string(),
            ),
            ("filter_empty_decks", self.filter_empty_decks.to_string()),
            ("filter_limits_zero", self.filter_limits_zero.to_string()),
            (
                "filter_available_zero",
                self.filter_available_zero.to_string(),
            ),
            ("filter_has_new", self.filter_has_new.to_string()),
        ]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// Set one key from its string form, validating the value type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "menu_title" => self.menu_title = value.to_string(),
            "show_when_profile_opens" => self.show_when_profile_opens = parse_bool(value)?,
            "notify_every_n_days" => self.notify_every_n_days = parse_num(value)?,
            "notify_never" => self.notify_never = parse_bool(value)?,
            "last_opened_at" => self.last_opened_at = parse_num(value)?,
            "name_filter" => self.name_filter = value.to_string(),
            "filter_filtered_decks" => self.filter_filtered_decks = parse_bool(value)?,
            "filter_container_decks" => self.filter_container_decks = parse_bool(value)?,
            "filter_empty_decks" => self.filter_empty_decks = parse_bool(value)?,
            "filter_limits_zero" => self.filter_limits_zero = parse_bool(value)?,
            "filter_available_zero" => self.filter_available_zero = parse_bool(value)?,
            "filter_has_new" => self.filter_has_new = parse_bool(value)?,
            _ => {
                return Err(DeckwatchError::Api(format!(
                    "Unknown preference key: {}",
                    key
                )))
            }
        }
        Ok(())
    }
}

fn str_or(doc: &Value, key: &str, default: String) -> String {
    doc.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or(default)
}

fn bool_or(doc: &Value, key: &str, default: bool) -> bool {
    doc.get(key).and_then(Value::as_bool).unwrap_or(default)
}

fn u32_or(doc: &Value, key: &str, default: u32) -> u32 {
    doc.get(key)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(default)
}

fn i64_or(doc: &Value, key: &str, default: i64) -> i64 {
    doc.get(key).and_then(Value::as_i64).unwrap_or(default)
}

fn parse_bool(value: &str) -> Result<bool> {
    match value {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(DeckwatchError::Api(format!(
            "Expected a boolean, got: {}",
            value
        ))),
    }
}

fn parse_num<T: std::str::FromStr>(value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| DeckwatchError::Api(format!("Expected a number, got: {}", value)))
}
