use serde::{Deserialize, Serialize};

use super::{
    dom::{focusable_descendants, Dom},
    EventOutcome,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub toggle_selector: String,
    pub menu_selector: String,
    pub open_class: String,
    pub expanded_attribute: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            toggle_selector: ".site-nav__toggle".to_string(),
            menu_selector: ".site-nav__menu".to_string(),
            open_class: "is-open".to_string(),
            expanded_attribute: "aria-expanded".to_string(),
        }
    }
}

/// Keeps Tab / Shift+Tab cycling between the first and last focusable
/// elements captured when the menu opened.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusTrap<N> {
    first: N,
    last: N,
}

impl<N: Clone + PartialEq> FocusTrap<N> {
    /// `None` when the container has nothing focusable.
    pub fn capture<D: Dom<Node = N>>(dom: &D, container: &N) -> Option<Self> {
        let focusable = focusable_descendants(dom, container);
        Some(Self {
            first: focusable.first()?.clone(),
            last: focusable.last()?.clone(),
        })
    }

    pub fn on_keydown<D: Dom<Node = N>>(&self, dom: &D, key: &str, shift: bool) -> EventOutcome {
        if key != "Tab" {
            return EventOutcome::Default;
        }
        let active = dom.active_element();
        let (from, to) = if shift {
            (&self.first, &self.last)
        } else {
            (&self.last, &self.first)
        };
        if active.as_ref() == Some(from) {
            dom.focus(to);
            EventOutcome::PreventDefault
        } else {
            EventOutcome::Default
        }
    }
}

/// Mobile navigation: a toggle control and the menu panel it shows.
///
/// The expanded attribute on the toggle and the open class on the menu are
/// only ever written together through [`NavToggle::set_open`].
#[derive(Debug)]
pub struct NavToggle<N> {
    toggle: N,
    menu: N,
    trap: Option<FocusTrap<N>>,
    config: NavConfig,
}

impl<N: Clone + PartialEq> NavToggle<N> {
    /// `None` unless both the toggle and the menu are on the page.
    pub fn install<D: Dom<Node = N>>(dom: &D, config: &NavConfig) -> Option<Self> {
        let toggle = dom.query_selector(&config.toggle_selector)?;
        let menu = dom.query_selector(&config.menu_selector)?;
        Some(Self {
            toggle,
            menu,
            trap: None,
            config: config.clone(),
        })
    }

    pub fn toggle(&self) -> &N {
        &self.toggle
    }

    pub fn menu(&self) -> &N {
        &self.menu
    }

    pub fn is_open<D: Dom<Node = N>>(&self, dom: &D) -> bool {
        dom.attribute(&self.toggle, &self.config.expanded_attribute)
            .is_some_and(|v| v == "true")
    }

    fn set_open<D: Dom<Node = N>>(&mut self, dom: &D, open: bool) {
        dom.set_attribute(
            &self.toggle,
            &self.config.expanded_attribute,
            if open { "true" } else { "false" },
        );
        if open {
            dom.add_class(&self.menu, &self.config.open_class);
            self.trap = FocusTrap::capture(dom, &self.menu);
        } else {
            dom.remove_class(&self.menu, &self.config.open_class);
        }
    }

    pub fn on_toggle_click<D: Dom<Node = N>>(&mut self, dom: &D) {
        let open = !self.is_open(dom);
        self.set_open(dom, open);
    }

    /// Any click on the document; closes the menu when it landed outside
    /// both the toggle and the menu. A target that isn't an element counts
    /// as outside.
    pub fn on_document_click<D: Dom<Node = N>>(&mut self, dom: &D, target: Option<&N>) {
        let inside = target.is_some_and(|t| {
            dom.contains(&self.toggle, t) || dom.contains(&self.menu, t)
        });
        if !inside {
            self.set_open(dom, false);
        }
    }

    /// Escape closes an open menu and hands focus back to the toggle.
    pub fn on_document_keydown<D: Dom<Node = N>>(&mut self, dom: &D, key: &str) -> EventOutcome {
        if key == "Escape" && dom.has_class(&self.menu, &self.config.open_class) {
            self.set_open(dom, false);
            dom.focus(&self.toggle);
        }
        EventOutcome::Default
    }

    pub fn on_menu_keydown<D: Dom<Node = N>>(
        &self,
        dom: &D,
        key: &str,
        shift: bool,
    ) -> EventOutcome {
        match &self.trap {
            Some(trap) if self.is_open(dom) => trap.on_keydown(dom, key, shift),
            _ => EventOutcome::Default,
        }
    }
}
