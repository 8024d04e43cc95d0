// Core configuration: the narrow slice of `EmulatorConfig`'s load-or-default
// pattern that the emulation core itself needs.

use crate::cartridge::Region;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

const CONFIG_FILE: &str = "nes_core.toml";

/// Configuration for the core. Region defaults to the cartridge header's own
/// platform flag; this override exists for hosts that want to force NTSC
/// timing on a `Dual` cartridge, for example.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    pub region: Region,
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfig { region: Region::Ntsc }
    }
}

impl CoreConfig {
    /// Load configuration from file, or fall back to `Default` if the file
    /// is missing or unreadable.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn load() -> Result<Self, io::Error> {
        let contents = fs::read_to_string(CONFIG_FILE)?;
        toml::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn save(&self) -> Result<(), io::Error> {
        let contents = toml::to_string_pretty(self).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(CONFIG_FILE, contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_region_is_ntsc() {
        assert_eq!(CoreConfig::default().region, Region::Ntsc);
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = CoreConfig { region: Region::Pal };
        let toml_str = toml::to_string(&config).expect("serialize");
        let deserialized: CoreConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(deserialized.region, Region::Pal);
    }
}
