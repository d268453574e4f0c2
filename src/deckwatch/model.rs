use crate::hierarchy;

/// Identifier for a deck inside one collection. Opaque and stable within a
/// snapshot; never reused across decks.
pub type DeckId = i64;

/// Identifier for a shared configuration preset.
pub type PresetId = i64;

/// New-card supply classification for a deck.
///
/// Variant order defines severity: `Limits` is worse than `Availability`,
/// which is worse than `Normal`. Aggregation relies on `Ord` for the
/// worst-case roll-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    /// New cards are available and the daily limit allows them.
    Normal,
    /// The limit allows new cards, but every new card is suspended (or there
    /// are none).
    Availability,
    /// The configured daily limit is zero, so the deck never yields new cards.
    Limits,
}

impl Status {
    /// Derive a deck's own status from its limit and unsuspended-new count.
    pub fn classify(new_limit: Option<u32>, unsuspended_new: u32) -> Self {
        match new_limit {
            Some(0) => Status::Limits,
            _ if unsuspended_new == 0 => Status::Availability,
            _ => Status::Normal,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Limits => "0/day (limits)",
            Status::Availability => "0 available (unsuspended)",
            Status::Normal => "Has new cards",
        }
    }
}

/// Where a deck's new-card limit was discovered.
///
/// Display-only provenance; logic never branches on it beyond the
/// presence/absence of the limit itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitSource {
    DeckOverride,
    SharedPreset,
    Unknown,
}

impl std::fmt::Display for LimitSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LimitSource::DeckOverride => write!(f, "deck override"),
            LimitSource::SharedPreset => write!(f, "shared preset"),
            LimitSource::Unknown => write!(f, "unknown"),
        }
    }
}

/// One entry from deck enumeration: the minimum the loader must resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckEntry {
    pub id: DeckId,
    pub name: String,
    pub filtered: bool,
}

/// Everything the report knows about one deck, own values plus aggregates
/// rolled up from descendants.
///
/// Rebuilt from scratch on every report; nothing here survives a host-data
/// mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckInfo {
    pub id: DeckId,
    pub name: String,
    pub is_filtered: bool,
    pub new_limit: Option<u32>,
    pub limit_source: LimitSource,
    pub unsuspended_new: u32,
    pub suspended_new: u32,
    pub total_cards: u32,
    pub self_status: Status,
    pub agg_status: Status,
    pub agg_unsuspended_new: u32,
    pub agg_suspended_new: u32,
    pub is_container: bool,
    pub is_empty: bool,
}

impl DeckInfo {
    pub fn depth(&self) -> usize {
        hierarchy::depth(&self.name)
    }

    /// Display label for the new-card limit. Filtered decks have no day-limit
    /// concept and always render "N/A"; an undetermined limit renders "?" and
    /// is never treated as zero.
    pub fn limit_label(&self) -> String {
        if self.is_filtered {
            return "N/A".to_string();
        }
        match self.new_limit {
            Some(n) => n.to_string(),
            None => "?".to_string(),
        }
    }
}
