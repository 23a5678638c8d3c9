use serde::{Deserialize, Serialize};

use super::{dom::Dom, EventOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub anchor_selector: String,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            anchor_selector: r##"a[href^="#"]"##.to_string(),
        }
    }
}

/// In-page anchors that scroll smoothly to their target and move focus there.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothScroll<N> {
    anchors: Vec<N>,
}

impl<N: Clone + PartialEq> SmoothScroll<N> {
    pub fn install<D: Dom<Node = N>>(dom: &D, config: &ScrollConfig) -> Self {
        Self {
            anchors: dom.query_selector_all(&config.anchor_selector),
        }
    }

    pub fn anchors(&self) -> &[N] {
        &self.anchors
    }

    /// The destination is read at click time, so anchors rewritten after
    /// install still go where they point.
    pub fn on_anchor_click<D: Dom<Node = N>>(&self, dom: &D, anchor: &N) -> EventOutcome {
        let Some(href) = dom.attribute(anchor, "href") else {
            return EventOutcome::Default;
        };
        let Some(id) = href.strip_prefix('#').filter(|id| !id.is_empty()) else {
            return EventOutcome::Default;
        };
        match dom.element_by_id(id) {
            Some(target) => {
                dom.scroll_into_view(&target);
                dom.focus(&target);
                EventOutcome::PreventDefault
            }
            None => EventOutcome::Default,
        }
    }
}
