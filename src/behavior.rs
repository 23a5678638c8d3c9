//! Client-side page behaviors: mobile navigation, locale preference,
//! lazy image fallback and smooth in-page scrolling.
//!
//! Everything here is written against the [`dom::Dom`] trait and a handful of
//! injected capabilities so the logic runs (and is tested) without a browser.
//! The `web` module binds it to `web_sys` when the crate is built for hydration.

pub mod dom;
pub mod lazy;
pub mod locale;
pub mod nav;
pub mod scroll;
#[cfg(test)]
mod testing;
#[cfg(feature = "hydrate")]
pub mod web;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use dom::Dom;
use lazy::{ImageObserver, LazyConfig, LazyImages, LazyLoadPlan, LazySupport};
use locale::{Host, LocaleConfig, LocaleOutcome, LocalePreference, PreferenceStore};
use nav::{NavConfig, NavToggle};
use scroll::{ScrollConfig, SmoothScroll};

/// A host capability that may or may not exist in the running browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability<T> {
    Available(T),
    Unavailable,
}

impl<T> Capability<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Self::Available(t) => Some(t),
            Self::Unavailable => None,
        }
    }
}

impl<T> From<Option<T>> for Capability<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(t) => Self::Available(t),
            None => Self::Unavailable,
        }
    }
}

/// What an event handler wants done with the native default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Default,
    PreventDefault,
}

impl EventOutcome {
    pub fn is_prevented(self) -> bool {
        self == Self::PreventDefault
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BehaviorError {
    #[error("invalid behavior config: {0}")]
    Config(String),
    #[error("couldn't attach {event} listener: {message}")]
    Listener { event: &'static str, message: String },
    #[error("couldn't create intersection observer: {0}")]
    Observer(String),
    #[error("no window object available")]
    MissingWindow,
    #[error("no document available")]
    MissingDocument,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub nav: NavConfig,
    pub locale: LocaleConfig,
    pub lazy: LazyConfig,
    pub scroll: ScrollConfig,
}

impl BehaviorConfig {
    /// Parses a (possibly partial) JSON override; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, BehaviorError> {
        serde_json::from_str(json).map_err(|e| BehaviorError::Config(e.to_string()))
    }
}

/// `document.readyState` is `"loading"` until the parser finishes; installs
/// must then wait for `DOMContentLoaded`.
pub fn is_still_parsing(ready_state: &str) -> bool {
    ready_state == "loading"
}

/// The installed behaviors of one page load.
///
/// Each part is independent; the event layer drives them with the
/// `on_*` handlers and never needs to touch more than one at a time.
#[derive(Debug)]
pub struct PageBehavior<N> {
    pub nav: Option<NavToggle<N>>,
    pub locale: LocaleOutcome,
    pub lazy: LazyLoadPlan<N>,
    pub scroll: SmoothScroll<N>,
}

impl<N: Clone + PartialEq + std::fmt::Debug> PageBehavior<N> {
    pub fn install<D, H, S, O>(
        dom: &D,
        host: &H,
        storage: &Capability<S>,
        lazy_support: &LazySupport<O>,
        config: &BehaviorConfig,
    ) -> Self
    where
        D: Dom<Node = N>,
        H: Host,
        S: PreferenceStore,
        O: ImageObserver<N>,
    {
        let nav = NavToggle::install(dom, &config.nav);
        let locale = LocalePreference::new(&config.locale).apply(dom, host, storage);
        let lazy = LazyImages::new(&config.lazy).install(dom, lazy_support);
        let scroll = SmoothScroll::install(dom, &config.scroll);
        log::debug!(
            "page behaviors installed: nav={} locale={:?} anchors={}",
            nav.is_some(),
            locale,
            scroll.anchors().len()
        );
        Self {
            nav,
            locale,
            lazy,
            scroll,
        }
    }
}
