use crate::commands::{CmdMessage, CmdResult};
use crate::config::Preferences;
use crate::error::{DeckwatchError, Result};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(prefs_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut prefs = Preferences::load(prefs_dir);
    match action {
        ConfigAction::ShowAll => Ok(CmdResult::default().with_preferences(prefs)),
        ConfigAction::ShowKey(key) => {
            let value = prefs
                .get(&key)
                .ok_or_else(|| DeckwatchError::Api(format!("Unknown preference key: {}", key)))?;
            Ok(CmdResult::default().with_message(CmdMessage::info(format!("{} = {}", key, value))))
        }
        ConfigAction::Set(key, value) => {
            prefs.set(&key, &value)?;
            // A failed write falls back silently; the preference still
            // applies for this process.
            let _ = prefs.save(prefs_dir);
            Ok(CmdResult::default()
                .with_message(CmdMessage::success(format!("Set {} = {}", key, value))))
        }
    }
}
