use crate::targeting::DEFAULT_MIN_ROTATIONS;
use std::path::PathBuf;
use std::time::Duration;

/// Default logical spin length and visual transition length
pub const DEFAULT_SPIN_DURATION: Duration = Duration::from_millis(9000);

/// Wheel configuration
#[derive(Debug, Clone)]
pub struct WheelConfig {
    /// How long a spin blocks new triggers before the winner is revealed
    pub spin_duration: Duration,
    /// Length of the rotation animation; cosmetic only
    pub transition_duration: Duration,
    /// Full extra turns added to every spin
    pub min_rotations: u32,
    /// JSON file holding the roster
    pub store_path: PathBuf,
    /// Reject roster edits while a spin is in flight
    pub lock_roster_while_spinning: bool,
    pub start_muted: bool,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            spin_duration: DEFAULT_SPIN_DURATION,
            transition_duration: DEFAULT_SPIN_DURATION,
            min_rotations: DEFAULT_MIN_ROTATIONS,
            store_path: PathBuf::from("lucky_spin_participants.json"),
            lock_roster_while_spinning: true,
            start_muted: false,
        }
    }
}

fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v != "0" && v.to_lowercase() != "false")
        .unwrap_or(default)
}

fn env_millis(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(default)
}

impl WheelConfig {
    /// Load config from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let spin_duration = env_millis("WHEEL_SPIN_DURATION_MS", defaults.spin_duration);
        let transition_duration =
            env_millis("WHEEL_TRANSITION_MS", defaults.transition_duration);

        let min_rotations = std::env::var("WHEEL_MIN_ROTATIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.min_rotations);

        let store_path = std::env::var("WHEEL_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.store_path);

        let lock_roster_while_spinning = env_flag(
            "WHEEL_LOCK_ROSTER_WHILE_SPINNING",
            defaults.lock_roster_while_spinning,
        );
        let start_muted = env_flag("WHEEL_MUTED", defaults.start_muted);

        tracing::info!(
            spin_ms = spin_duration.as_millis() as u64,
            transition_ms = transition_duration.as_millis() as u64,
            min_rotations,
            store_path = %store_path.display(),
            lock_roster_while_spinning,
            start_muted,
            "Wheel config loaded"
        );

        Self {
            spin_duration,
            transition_duration,
            min_rotations,
            store_path,
            lock_roster_while_spinning,
            start_muted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: [&str; 6] = [
        "WHEEL_SPIN_DURATION_MS",
        "WHEEL_TRANSITION_MS",
        "WHEEL_MIN_ROTATIONS",
        "WHEEL_STORE_PATH",
        "WHEEL_LOCK_ROSTER_WHILE_SPINNING",
        "WHEEL_MUTED",
    ];

    fn clear_env() {
        for key in KEYS {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        clear_env();
        let config = WheelConfig::from_env();

        assert_eq!(config.spin_duration, Duration::from_millis(9000));
        assert_eq!(config.transition_duration, Duration::from_millis(9000));
        assert_eq!(config.min_rotations, 8);
        assert!(config.lock_roster_while_spinning);
        assert!(!config.start_muted);
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        std::env::set_var("WHEEL_SPIN_DURATION_MS", "3000");
        std::env::set_var("WHEEL_TRANSITION_MS", "2500");
        std::env::set_var("WHEEL_MIN_ROTATIONS", "3");
        std::env::set_var("WHEEL_STORE_PATH", "/tmp/roster.json");
        std::env::set_var("WHEEL_LOCK_ROSTER_WHILE_SPINNING", "false");
        std::env::set_var("WHEEL_MUTED", "1");

        let config = WheelConfig::from_env();
        clear_env();

        assert_eq!(config.spin_duration, Duration::from_millis(3000));
        assert_eq!(config.transition_duration, Duration::from_millis(2500));
        assert_eq!(config.min_rotations, 3);
        assert_eq!(config.store_path, PathBuf::from("/tmp/roster.json"));
        assert!(!config.lock_roster_while_spinning);
        assert!(config.start_muted);
    }

    #[test]
    #[serial]
    fn test_invalid_numbers_fall_back() {
        clear_env();
        std::env::set_var("WHEEL_SPIN_DURATION_MS", "soon");
        std::env::set_var("WHEEL_MIN_ROTATIONS", "-2");

        let config = WheelConfig::from_env();
        clear_env();

        assert_eq!(config.spin_duration, DEFAULT_SPIN_DURATION);
        assert_eq!(config.min_rotations, DEFAULT_MIN_ROTATIONS);
    }
}
