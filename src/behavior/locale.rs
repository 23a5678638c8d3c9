use serde::{Deserialize, Serialize};

use super::{dom::Dom, Capability};

pub const PREFERRED_LANGUAGE_KEY: &str = "preferredLanguage";

/// Key-value storage that outlives the page (`localStorage` in a browser).
/// Writes are best effort.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// The browsing context: reported language, current location, navigation.
pub trait Host {
    /// The browser's primary language tag, e.g. `es-ES`.
    fn primary_language(&self) -> Option<String>;
    fn pathname(&self) -> String;
    /// Full page navigation.
    fn redirect(&self, path: &str);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    pub storage_key: String,
    pub default_language: String,
    pub redirect_from: String,
    pub redirect_to: String,
    /// Read the stored preference before overwriting it. Off by default,
    /// which means a working store never reports a first visit.
    pub check_before_write: bool,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            storage_key: PREFERRED_LANGUAGE_KEY.to_string(),
            default_language: "en".to_string(),
            redirect_from: "en".to_string(),
            redirect_to: "es".to_string(),
            check_before_write: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleOutcome {
    /// The page language was recorded, nothing else happened.
    Stored,
    Redirect(String),
    /// No storage, nothing recorded.
    Skipped,
}

/// `es-ES` -> `es`
pub fn base_subtag(tag: &str) -> &str {
    tag.split('-').next().unwrap_or(tag)
}

/// Rewrites the first `/{from}/` segment to `/{to}/`, and the bare root to
/// `/{to}/`. `None` when the path has nothing to rewrite.
pub fn localized_path(path: &str, from: &str, to: &str) -> Option<String> {
    let target = format!("/{to}/");
    if path == "/" {
        return Some(target);
    }
    let segment = format!("/{from}/");
    if path.contains(&segment) {
        Some(path.replacen(&segment, &target, 1))
    } else {
        None
    }
}

pub struct LocalePreference<'a> {
    config: &'a LocaleConfig,
}

impl<'a> LocalePreference<'a> {
    pub fn new(config: &'a LocaleConfig) -> Self {
        Self { config }
    }

    pub fn apply<D: Dom, H: Host, S: PreferenceStore>(
        &self,
        dom: &D,
        host: &H,
        storage: &Capability<S>,
    ) -> LocaleOutcome {
        let Capability::Available(store) = storage else {
            log::debug!("no preference storage, skipping locale detection");
            return LocaleOutcome::Skipped;
        };
        let current = dom
            .document_language()
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| self.config.default_language.clone());
        let key = &self.config.storage_key;

        let first_visit = if self.config.check_before_write {
            let absent = store.get(key).is_none();
            store.set(key, &current);
            absent
        } else {
            store.set(key, &current);
            store.get(key).is_none()
        };
        if !first_visit {
            return LocaleOutcome::Stored;
        }

        let Some(browser) = host.primary_language() else {
            return LocaleOutcome::Stored;
        };
        if !base_subtag(&browser).eq_ignore_ascii_case(&self.config.redirect_to)
            || current != self.config.redirect_from
        {
            return LocaleOutcome::Stored;
        }
        let path = host.pathname();
        match localized_path(&path, &self.config.redirect_from, &self.config.redirect_to) {
            Some(target) if target != path => {
                log::debug!("first visit with {browser}, redirecting {path} -> {target}");
                host.redirect(&target);
                LocaleOutcome::Redirect(target)
            }
            _ => LocaleOutcome::Stored,
        }
    }
}
