//! Game configuration resource.
//!
//! Settings loaded from an INI file at startup. Every value has a safe
//! default, so a missing file or a missing key simply keeps the default.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 960
//! height = 540
//! target_fps = 60
//! vsync = true
//!
//! [blackjack]
//! starting_bankroll = 200
//! min_bet = 10
//! max_bet = 500
//! bet_step = 10
//! num_decks = 6
//! reshuffle_below = 20
//! rig_loss_rate = 0.95
//! dealer_step_ms = 350
//!
//! [world]
//! maps_dir = ./assets/maps
//! player_speed = 192
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::blackjack::round::{
    DEALER_STEP_SECS, MAX_BET, MIN_BET, NUM_DECKS, RESHUFFLE_BELOW, RIG_LOSS_RATE,
    STARTING_BANKROLL, TableRules,
};

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 960;
const DEFAULT_WINDOW_HEIGHT: u32 = 540;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_PLAYER_SPEED: f32 = 192.0;
const DEFAULT_MAPS_DIR: &str = "./assets/maps";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    /// Limits, shoe size and pacing of the blackjack table.
    pub rules: TableRules,
    /// Directory searched for `street.json` and `casino.json`.
    pub maps_dir: PathBuf,
    /// Player walking speed in pixels per second.
    pub player_speed: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            rules: TableRules {
                starting_bankroll: STARTING_BANKROLL,
                min_bet: MIN_BET,
                max_bet: MAX_BET,
                bet_step: MIN_BET,
                num_decks: NUM_DECKS,
                reshuffle_below: RESHUFFLE_BELOW,
                rig_loss_rate: RIG_LOSS_RATE,
                dealer_step_secs: DEALER_STEP_SECS,
            },
            maps_dir: PathBuf::from(DEFAULT_MAPS_DIR),
            player_speed: DEFAULT_PLAYER_SPEED,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);

        info!(
            "Loaded config: {}x{} window, fps={}, vsync={}, bankroll={}, bets {}..{}, decks={}, rig={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.rules.starting_bankroll,
            self.rules.min_bet,
            self.rules.max_bet,
            self.rules.num_decks,
            self.rules.rig_loss_rate
        );

        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, content: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }

        // [blackjack] section
        let rules = &mut self.rules;
        if let Some(bankroll) = config.getint("blackjack", "starting_bankroll").ok().flatten() {
            rules.starting_bankroll = bankroll.max(0);
        }
        if let Some(min_bet) = config.getuint("blackjack", "min_bet").ok().flatten() {
            rules.min_bet = min_bet as u32;
        }
        if let Some(max_bet) = config.getuint("blackjack", "max_bet").ok().flatten() {
            rules.max_bet = max_bet as u32;
        }
        if let Some(step) = config.getuint("blackjack", "bet_step").ok().flatten() {
            rules.bet_step = (step as u32).max(1);
        }
        if let Some(decks) = config.getuint("blackjack", "num_decks").ok().flatten() {
            rules.num_decks = (decks as usize).max(1);
        }
        if let Some(below) = config.getuint("blackjack", "reshuffle_below").ok().flatten() {
            rules.reshuffle_below = below as usize;
        }
        if let Some(rate) = config.getfloat("blackjack", "rig_loss_rate").ok().flatten() {
            rules.rig_loss_rate = rate.clamp(0.0, 1.0);
        }
        if let Some(ms) = config.getuint("blackjack", "dealer_step_ms").ok().flatten() {
            rules.dealer_step_secs = ms as f32 / 1000.0;
        }
        rules.max_bet = rules.max_bet.max(rules.min_bet);

        // [world] section
        if let Some(dir) = config.get("world", "maps_dir") {
            self.maps_dir = PathBuf::from(dir);
        }
        if let Some(speed) = config.getfloat("world", "player_speed").ok().flatten() {
            self.player_speed = speed as f32;
        }
    }

    /// Disable the house override on lost hands.
    pub fn set_fair(&mut self) {
        self.rules.rig_loss_rate = 0.0;
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_table_rules() {
        let config = GameConfig::new();
        assert_eq!(config.rules, TableRules::default());
        assert_eq!(config.window_size(), (960, 540));
    }

    #[test]
    fn test_load_overrides_present_keys_only() {
        let mut config = GameConfig::new();
        config
            .load_from_str(
                "[window]\nwidth = 1280\n\n[blackjack]\nmin_bet = 25\nrig_loss_rate = 0.5\ndealer_step_ms = 100\n\n[world]\nmaps_dir = maps\n",
            )
            .unwrap();
        assert_eq!(config.window_width, 1280);
        assert_eq!(config.window_height, 540);
        assert_eq!(config.rules.min_bet, 25);
        assert_eq!(config.rules.max_bet, 500);
        assert!((config.rules.rig_loss_rate - 0.5).abs() < 1e-9);
        assert!((config.rules.dealer_step_secs - 0.1).abs() < 1e-6);
        assert_eq!(config.maps_dir, PathBuf::from("maps"));
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[blackjack]\nrig_loss_rate = 3.0\nnum_decks = 0\nmin_bet = 900\n")
            .unwrap();
        assert!((config.rules.rig_loss_rate - 1.0).abs() < 1e-9);
        assert_eq!(config.rules.num_decks, 1);
        assert_eq!(config.rules.max_bet, 900);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut config = GameConfig::with_path("/nonexistent/neoncasino/config.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.rules, TableRules::default());
    }

    #[test]
    fn test_set_fair_disables_override() {
        let mut config = GameConfig::new();
        config.set_fair();
        assert_eq!(config.rules.rig_loss_rate, 0.0);
    }
}
