use std::sync::OnceLock;

use tracing::{info, warn};

use crate::host::Host;

/// The set of custom sounds a trigger picks from.
///
/// One registry is shared by every component in a process. It is built from
/// the host's sound catalog the first time anyone asks for it and never
/// changes afterwards; concurrent first use builds and logs exactly once.
#[derive(Debug)]
pub struct SoundRegistry {
    prefix: String,
    sounds: OnceLock<Vec<String>>,
}

impl SoundRegistry {
    /// Create an unbuilt registry matching sound names that start with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            sounds: OnceLock::new(),
        }
    }

    /// The name prefix this registry filters on.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether the registry has been built.
    pub fn is_initialized(&self) -> bool {
        self.sounds.get().is_some()
    }

    /// The registered sound names, building the registry from `host` on first use.
    pub fn sounds<H: Host + ?Sized>(&self, host: &H) -> &[String] {
        self.sounds.get_or_init(|| self.build(host))
    }

    /// The registered names if already built, without touching the host.
    pub fn built(&self) -> Option<&[String]> {
        self.sounds.get().map(Vec::as_slice)
    }

    fn build<H: Host + ?Sized>(&self, host: &H) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for name in host.sound_names() {
            if name.starts_with(&self.prefix) && !found.contains(&name) {
                found.push(name);
            }
        }

        if found.is_empty() {
            warn!(
                prefix = %self.prefix,
                "no custom sounds found, the fallback sound will be used"
            );
        } else {
            info!(prefix = %self.prefix, count = found.len(), "found custom sounds");
        }
        found
    }
}
