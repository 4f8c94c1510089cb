//! Live, player-editable settings and the layered resolver that combines
//! them with per-component defaults.
//!
//! Settings are read fresh on every use, so a change made while the game is
//! running takes effect on the very next roll of every trigger.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{TICKS_PER_SECOND, TriggerProps};
use crate::error::TriggerResult;

/// Range the settings screen allows for the base chance.
pub const BASE_CHANCE_RANGE: (f32, f32) = (0.001, 0.05);
/// Range the settings screen allows for the per-failure increment.
pub const INCREMENT_RANGE: (f32, f32) = (0.001, 0.01);

const DEFAULT_BASE_CHANCE: f32 = 0.01;
const DEFAULT_INCREMENT: f32 = 0.01;

fn default_true() -> bool {
    true
}

fn default_base_chance() -> f32 {
    DEFAULT_BASE_CHANCE
}

fn default_increment() -> f32 {
    DEFAULT_INCREMENT
}

/// The three player-tunable values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriggerSettings {
    /// Whether a failed roll raises the chance for the next one.
    #[serde(default = "default_true")]
    pub enable_chance_increase: bool,
    /// Amount added after each failed roll.
    #[serde(default = "default_increment", alias = "chance_increment_amount")]
    pub chance_increment: f32,
    /// Starting chance and reset target.
    #[serde(default = "default_base_chance")]
    pub base_chance: f32,
}

impl Default for TriggerSettings {
    fn default() -> Self {
        Self {
            enable_chance_increase: true,
            chance_increment: DEFAULT_INCREMENT,
            base_chance: DEFAULT_BASE_CHANCE,
        }
    }
}

impl TriggerSettings {
    /// Set the base chance, clamped to [`BASE_CHANCE_RANGE`]. NaN is ignored.
    pub fn set_base_chance(&mut self, chance: f32) {
        if chance.is_nan() {
            return;
        }
        self.base_chance = chance.clamp(BASE_CHANCE_RANGE.0, BASE_CHANCE_RANGE.1);
    }

    /// Set the increment, clamped to [`INCREMENT_RANGE`]. NaN is ignored.
    pub fn set_chance_increment(&mut self, increment: f32) {
        if increment.is_nan() {
            return;
        }
        self.chance_increment = increment.clamp(INCREMENT_RANGE.0, INCREMENT_RANGE.1);
    }

    /// Pull hand-edited values back into the domain a chance can live in:
    /// base in [0, 1], increment non-negative. Non-finite values take their
    /// defaults. The narrower settings-screen ranges are not enforced here.
    pub fn sanitized(self) -> Self {
        Self {
            enable_chance_increase: self.enable_chance_increase,
            chance_increment: if self.chance_increment.is_finite() {
                self.chance_increment.max(0.0)
            } else {
                DEFAULT_INCREMENT
            },
            base_chance: if self.base_chance.is_finite() {
                self.base_chance.clamp(0.0, 1.0)
            } else {
                DEFAULT_BASE_CHANCE
            },
        }
    }

    /// Restore every value to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Worst-case number of checks until a roll is certain to succeed.
    ///
    /// `None` when the chance never grows.
    pub fn checks_to_guarantee(&self) -> Option<u32> {
        if !self.enable_chance_increase || self.chance_increment <= 0.0 {
            return None;
        }
        // Exact multiples must not round up a step on float noise.
        let steps = ((1.0 - self.base_chance) / self.chance_increment - 1e-4).ceil();
        Some(steps.max(0.0) as u32 + 1)
    }

    /// Worst-case minutes until a success, given the check interval in ticks.
    pub fn minutes_to_guarantee(&self, tick_interval: u32) -> Option<f32> {
        let checks = self.checks_to_guarantee()?;
        let seconds_per_check = tick_interval as f32 / TICKS_PER_SECOND as f32;
        Some(checks as f32 * seconds_per_check / 60.0)
    }

    /// Load settings from a JSON file. Missing keys take their defaults and
    /// out-of-domain values are sanitized with a warning.
    pub fn load(path: &Path) -> TriggerResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let raw: Self = serde_json::from_str(&content)?;
        let settings = raw.sanitized();
        if settings != raw {
            warn!(path = %path.display(), ?raw, ?settings, "settings out of range, clamped");
        }
        Ok(settings)
    }

    /// Load settings, or defaults if the file does not exist yet.
    pub fn load_or_default(path: &Path) -> TriggerResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write settings to a JSON file.
    pub fn save(&self, path: &Path) -> TriggerResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Shared handle to the settings store.
///
/// Cloning the handle shares the underlying store. The store may be empty,
/// in which case every value falls back to the component defaults.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    inner: Arc<RwLock<Option<TriggerSettings>>>,
}

impl SettingsStore {
    /// A store holding no settings.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A store holding `settings`.
    pub fn with_settings(settings: TriggerSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(settings))),
        }
    }

    /// Current settings, if any.
    pub fn get(&self) -> Option<TriggerSettings> {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the settings.
    pub fn set(&self, settings: TriggerSettings) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(settings);
    }

    /// Edit the settings in place, starting from defaults if the store is empty.
    pub fn update(&self, f: impl FnOnce(&mut TriggerSettings)) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(guard.get_or_insert_with(TriggerSettings::default));
    }

    /// Drop the settings so defaults apply again.
    pub fn clear(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Resolves effective values: live setting if present, component default otherwise.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    props: TriggerProps,
    settings: SettingsStore,
}

impl ConfigResolver {
    /// Combine component defaults with a settings store.
    pub fn new(props: TriggerProps, settings: SettingsStore) -> Self {
        Self { props, settings }
    }

    /// The component defaults.
    pub fn props(&self) -> &TriggerProps {
        &self.props
    }

    /// The settings store this resolver reads from.
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Effective base chance, always within [0, 1].
    pub fn base_chance(&self) -> f32 {
        self.settings
            .get()
            .map(|s| s.sanitized().base_chance)
            .unwrap_or(self.props.base_chance)
    }

    /// Effective per-failure increment, never negative.
    pub fn chance_increment(&self) -> f32 {
        self.settings
            .get()
            .map(|s| s.sanitized().chance_increment)
            .unwrap_or(self.props.chance_increment)
    }

    /// Whether failed rolls raise the chance. Enabled when no settings exist.
    pub fn chance_increase_enabled(&self) -> bool {
        self.settings
            .get()
            .map(|s| s.enable_chance_increase)
            .unwrap_or(true)
    }

    /// Ticks between roll attempts.
    pub fn tick_interval(&self) -> u32 {
        self.props.tick_interval
    }

    /// Cooldown after a success.
    pub fn sound_cooldown_ticks(&self) -> u32 {
        self.props.sound_cooldown_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_defaults() {
        let s = TriggerSettings::default();
        assert!(s.enable_chance_increase);
        assert!((s.base_chance - 0.01).abs() < f32::EPSILON);
        assert!((s.chance_increment - 0.01).abs() < f32::EPSILON);
    }

    #[test]
    fn setters_clamp_to_screen_ranges() {
        let mut s = TriggerSettings::default();
        s.set_base_chance(0.5);
        assert!((s.base_chance - 0.05).abs() < f32::EPSILON);
        s.set_base_chance(0.0);
        assert!((s.base_chance - 0.001).abs() < f32::EPSILON);
        s.set_chance_increment(1.0);
        assert!((s.chance_increment - 0.01).abs() < f32::EPSILON);
    }

    #[test]
    fn setters_ignore_nan() {
        let mut s = TriggerSettings::default();
        s.set_base_chance(f32::NAN);
        s.set_chance_increment(f32::NAN);
        assert_eq!(s, TriggerSettings::default());

        let reloaded: TriggerSettings =
            serde_json::from_str(&serde_json::to_string(&s).unwrap()).unwrap();
        assert_eq!(reloaded, s);
    }

    #[test]
    fn sanitized_keeps_chance_in_domain() {
        let s = TriggerSettings {
            enable_chance_increase: true,
            chance_increment: -0.3,
            base_chance: 2.5,
        }
        .sanitized();
        assert_eq!(s.base_chance, 1.0);
        assert_eq!(s.chance_increment, 0.0);

        let s = TriggerSettings {
            enable_chance_increase: false,
            chance_increment: f32::INFINITY,
            base_chance: f32::NAN,
        }
        .sanitized();
        assert!(!s.enable_chance_increase);
        assert!((s.base_chance - 0.01).abs() < f32::EPSILON);
        assert!((s.chance_increment - 0.01).abs() < f32::EPSILON);

        // Hand-edited values outside the screen ranges but inside [0, 1] stay.
        let s = TriggerSettings {
            enable_chance_increase: true,
            chance_increment: 0.2,
            base_chance: 0.5,
        };
        assert_eq!(s.sanitized(), s);
    }

    #[test]
    fn load_clamps_out_of_range_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"base_chance": 2.5, "chance_increment": -0.3}"#).unwrap();

        let s = TriggerSettings::load(&path).unwrap();
        assert_eq!(s.base_chance, 1.0);
        assert_eq!(s.chance_increment, 0.0);
    }

    #[test]
    fn resolver_sanitizes_live_values() {
        let store = SettingsStore::with_settings(TriggerSettings {
            enable_chance_increase: true,
            chance_increment: -0.3,
            base_chance: 2.5,
        });
        let resolver = ConfigResolver::new(TriggerProps::default(), store);
        assert_eq!(resolver.base_chance(), 1.0);
        assert_eq!(resolver.chance_increment(), 0.0);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut s = TriggerSettings {
            enable_chance_increase: false,
            chance_increment: 0.005,
            base_chance: 0.03,
        };
        s.reset();
        assert_eq!(s, TriggerSettings::default());
    }

    #[test]
    fn guarantee_estimate_matches_default_screen() {
        let s = TriggerSettings::default();
        // ceil(0.99 / 0.01) + 1
        assert_eq!(s.checks_to_guarantee(), Some(100));
        // 100 checks of 20 seconds each
        let minutes = s.minutes_to_guarantee(1200).unwrap();
        assert!((minutes - 33.333_332).abs() < 0.01);
    }

    #[test]
    fn no_guarantee_without_increase() {
        let s = TriggerSettings {
            enable_chance_increase: false,
            ..TriggerSettings::default()
        };
        assert_eq!(s.checks_to_guarantee(), None);
        assert_eq!(s.minutes_to_guarantee(1200), None);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let s: TriggerSettings = serde_json::from_str(r#"{"base_chance": 0.02}"#).unwrap();
        assert!(s.enable_chance_increase);
        assert!((s.base_chance - 0.02).abs() < f32::EPSILON);
        assert!((s.chance_increment - 0.01).abs() < f32::EPSILON);
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let s = TriggerSettings {
            enable_chance_increase: false,
            chance_increment: 0.002,
            base_chance: 0.04,
        };
        s.save(&path).unwrap();
        assert_eq!(TriggerSettings::load(&path).unwrap(), s);
    }

    #[test]
    fn load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let s = TriggerSettings::load_or_default(&dir.path().join("none.json")).unwrap();
        assert_eq!(s, TriggerSettings::default());
    }

    #[test]
    fn resolver_falls_back_to_props() {
        let props = TriggerProps::default()
            .with_base_chance(0.2)
            .with_chance_increment(0.05);
        let resolver = ConfigResolver::new(props, SettingsStore::empty());
        assert!((resolver.base_chance() - 0.2).abs() < f32::EPSILON);
        assert!((resolver.chance_increment() - 0.05).abs() < f32::EPSILON);
        assert!(resolver.chance_increase_enabled());
    }

    #[test]
    fn resolver_sees_live_overrides() {
        let store = SettingsStore::empty();
        let resolver = ConfigResolver::new(TriggerProps::default(), store.clone());

        store.set(TriggerSettings {
            enable_chance_increase: false,
            chance_increment: 0.002,
            base_chance: 0.03,
        });
        assert!((resolver.base_chance() - 0.03).abs() < f32::EPSILON);
        assert!(!resolver.chance_increase_enabled());

        store.update(|s| s.base_chance = 0.04);
        assert!((resolver.base_chance() - 0.04).abs() < f32::EPSILON);

        store.clear();
        assert!((resolver.base_chance() - 0.01).abs() < f32::EPSILON);
        assert!(resolver.chance_increase_enabled());
    }
}
