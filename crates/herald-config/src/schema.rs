use herald_events::BusSettings;
use herald_telemetry::TelemetryConfig;
use serde::{Deserialize, Serialize};

/// Main herald configuration
///
/// Loaded from (in priority order):
/// 1. `herald.jsonc` - JSON with comments
/// 2. `herald.json` - Standard JSON
/// 3. `herald.yml` / `herald.yaml` - YAML format
///
/// Hidden variants (`.herald.*`) and `~/.config/herald/` are checked after.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeraldConfig {
    /// Broadcast bus settings
    #[serde(default)]
    pub bus: BusSettings,

    /// Logging settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
