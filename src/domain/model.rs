use serde::{Deserialize, Serialize};

/// Username substituted when the lookup service cannot resolve a profile.
pub const DEFAULT_USERNAME: &str = "Herobrine";

// 20 ticks per second of game time.
const TICKS_PER_HOUR: f64 = 20.0 * 60.0 * 60.0;

/// Unit used for `total_playtime` in the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum PlaytimeUnit {
    #[default]
    Hours,
    Ticks,
}

/// Playtime as it appears in the report: a bare JSON number either way,
/// integer for raw ticks and float for converted hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Playtime {
    Ticks(u64),
    Hours(f64),
}

/// One line of the consolidated report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerReport {
    pub username: String,
    pub total_deaths: u64,
    pub total_playtime: Playtime,
}

/// Per-player input after extraction, before unit conversion. `document` is
/// `None` when the snapshot file could not be read or parsed.
#[derive(Debug, Clone)]
pub struct PlayerSnapshot {
    pub uuid: String,
    pub username: String,
    pub document: Option<StatsDocument>,
}

/// Body returned by the profile lookup service on a successful request.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileLookupResponse {
    pub name: String,
}

/// On-disk per-player snapshot. Only the two counters under
/// `stats."minecraft:custom"` matter; everything else is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsDocument {
    pub stats: Option<StatsSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsSection {
    #[serde(rename = "minecraft:custom")]
    pub custom: Option<CustomStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomStats {
    #[serde(rename = "minecraft:play_time")]
    pub play_time: Option<u64>,
    #[serde(rename = "minecraft:deaths")]
    pub deaths: Option<u64>,
}

impl StatsDocument {
    /// `(total_deaths, play_time_ticks)`, zero for any missing level.
    pub fn counters(&self) -> (u64, u64) {
        match self.stats.as_ref().and_then(|s| s.custom.as_ref()) {
            Some(custom) => (custom.deaths.unwrap_or(0), custom.play_time.unwrap_or(0)),
            None => (0, 0),
        }
    }
}

/// Game ticks to hours, rounded to 2 decimal places.
pub fn ticks_to_hours(ticks: u64) -> f64 {
    (ticks as f64 / TICKS_PER_HOUR * 100.0).round() / 100.0
}
