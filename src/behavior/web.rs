//! Binds the page behaviors to the live browser document.
//!
//! Listeners and observers live for the rest of the page, so their closures
//! are leaked with `forget` once attached.

use std::{cell::RefCell, rc::Rc};

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, KeyboardEvent, NodeList, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Storage, Window,
};

use super::{
    dom::Dom,
    is_still_parsing,
    lazy::{ImageObserver, LazyImageSet, LazyLoadPlan, LazySupport},
    locale::{Host, PreferenceStore},
    nav::NavToggle,
    scroll::SmoothScroll,
    BehaviorConfig, BehaviorError, Capability, EventOutcome, PageBehavior,
};

/// Optional `<script type="application/json">` holding a [`BehaviorConfig`] override.
pub const CONFIG_ELEMENT_ID: &str = "page-behavior-config";

type SharedLazySet = Rc<RefCell<Option<LazyImageSet<Element>>>>;

#[derive(Debug, Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect()
}

impl Dom for WebDom {
    type Node = Element;

    fn query_selector(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_selector_all(&self, selector: &str) -> Vec<Element> {
        self.document
            .query_selector_all(selector)
            .map(elements)
            .unwrap_or_default()
    }

    fn descendants(&self, node: &Element) -> Vec<Element> {
        node.query_selector_all("*").map(elements).unwrap_or_default()
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name().to_ascii_lowercase()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        if let Err(e) = node.set_attribute(name, value) {
            log::warn!("couldn't set {name}: {e:?}");
        }
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        if let Err(e) = node.class_list().add_1(class) {
            log::warn!("couldn't add class {class}: {e:?}");
        }
    }

    fn remove_class(&self, node: &Element, class: &str) {
        if let Err(e) = node.class_list().remove_1(class) {
            log::warn!("couldn't remove class {class}: {e:?}");
        }
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        let node: &web_sys::Node = node;
        ancestor.contains(Some(node))
    }

    fn active_element(&self) -> Option<Element> {
        self.document.active_element()
    }

    fn focus(&self, node: &Element) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            if let Err(e) = el.focus() {
                log::warn!("couldn't focus element: {e:?}");
            }
        }
    }

    fn scroll_into_view(&self, node: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        node.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn document_language(&self) -> Option<String> {
        self.document
            .document_element()
            .and_then(|root| root.get_attribute("lang"))
    }
}

pub struct WebStorage(Storage);

impl PreferenceStore for WebStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.0.set_item(key, value) {
            log::warn!("couldn't store {key}: {e:?}");
        }
    }
}

/// Access to `localStorage` can throw (privacy modes, sandboxed frames).
pub fn local_storage(window: &Window) -> Capability<WebStorage> {
    window.local_storage().ok().flatten().map(WebStorage).into()
}

pub struct WebHost(Window);

impl Host for WebHost {
    fn primary_language(&self) -> Option<String> {
        self.0.navigator().language()
    }

    fn pathname(&self) -> String {
        self.0
            .location()
            .pathname()
            .unwrap_or_else(|_| "/".to_string())
    }

    fn redirect(&self, path: &str) {
        if let Err(e) = self.0.location().set_href(path) {
            log::warn!("couldn't redirect to {path}: {e:?}");
        }
    }
}

pub struct WebObserver(IntersectionObserver);

impl ImageObserver<Element> for WebObserver {
    fn observe(&self, node: &Element) {
        self.0.observe(node);
    }

    fn unobserve(&self, node: &Element) {
        self.0.unobserve(node);
    }
}

fn supports_native_lazy_loading() -> bool {
    let global = js_sys::global();
    js_sys::Reflect::get(&global, &JsValue::from_str("HTMLImageElement"))
        .and_then(|ctor| js_sys::Reflect::get(&ctor, &JsValue::from_str("prototype")))
        .and_then(|proto| js_sys::Reflect::has(&proto, &JsValue::from_str("loading")))
        .unwrap_or(false)
}

fn supports_intersection_observer(window: &Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

fn lazy_support(
    dom: &WebDom,
    window: &Window,
    set: &SharedLazySet,
) -> Result<LazySupport<WebObserver>, BehaviorError> {
    if supports_native_lazy_loading() {
        return Ok(LazySupport::native());
    }
    if !supports_intersection_observer(window) {
        return Ok(LazySupport::fallback());
    }

    let callback = {
        let set = set.clone();
        let dom = dom.clone();
        Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                let entries = entries
                    .iter()
                    .filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|e| (e.target(), e.is_intersecting()))
                    .collect::<Vec<_>>();
                if let Some(set) = set.borrow_mut().as_mut() {
                    let swapped = set.on_entries(&dom, &WebObserver(observer), &entries);
                    log::debug!("lazy images swapped: {swapped}");
                }
            },
        )
    };
    let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref())
        .map_err(|e| BehaviorError::Observer(format!("{e:?}")))?;
    callback.forget();
    Ok(LazySupport::observed(WebObserver(observer)))
}

fn listen(
    target: &EventTarget,
    event: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), BehaviorError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| BehaviorError::Listener {
            event,
            message: format!("{e:?}"),
        })?;
    closure.forget();
    Ok(())
}

fn finish(event: &Event, outcome: EventOutcome) {
    if outcome.is_prevented() {
        event.prevent_default();
    }
}

fn wire_nav(dom: &WebDom, nav: NavToggle<Element>) -> Result<(), BehaviorError> {
    let toggle = nav.toggle().clone();
    let menu = nav.menu().clone();
    let nav = Rc::new(RefCell::new(nav));

    listen(&toggle, "click", {
        let (nav, dom) = (nav.clone(), dom.clone());
        move |_| nav.borrow_mut().on_toggle_click(&dom)
    })?;
    listen(&dom.document, "click", {
        let (nav, dom) = (nav.clone(), dom.clone());
        move |ev| {
            let target = ev.target().and_then(|t| t.dyn_into::<Element>().ok());
            nav.borrow_mut().on_document_click(&dom, target.as_ref());
        }
    })?;
    listen(&dom.document, "keydown", {
        let (nav, dom) = (nav.clone(), dom.clone());
        move |ev| {
            if let Some(key) = ev.dyn_ref::<KeyboardEvent>().map(|k| k.key()) {
                let outcome = nav.borrow_mut().on_document_keydown(&dom, &key);
                finish(&ev, outcome);
            }
        }
    })?;
    listen(&menu, "keydown", {
        let dom = dom.clone();
        move |ev| {
            if let Some(kev) = ev.dyn_ref::<KeyboardEvent>() {
                let outcome = nav.borrow().on_menu_keydown(&dom, &kev.key(), kev.shift_key());
                finish(&ev, outcome);
            }
        }
    })
}

fn wire_scroll(dom: &WebDom, scroll: SmoothScroll<Element>) -> Result<(), BehaviorError> {
    let anchors = scroll.anchors().to_vec();
    let scroll = Rc::new(scroll);
    for anchor in anchors {
        let (scroll, dom, target) = (scroll.clone(), dom.clone(), anchor.clone());
        listen(&anchor, "click", move |ev| {
            finish(&ev, scroll.on_anchor_click(&dom, &target));
        })?;
    }
    Ok(())
}

/// Reads the override from [`CONFIG_ELEMENT_ID`]; a broken override is
/// logged and ignored.
pub fn config_from_document(document: &Document) -> BehaviorConfig {
    let Some(json) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return BehaviorConfig::default();
    };
    BehaviorConfig::from_json(&json).unwrap_or_else(|e| {
        log::warn!("{e}, using defaults");
        BehaviorConfig::default()
    })
}

pub fn install(window: &Window, document: &Document) -> Result<(), BehaviorError> {
    let config = config_from_document(document);
    let dom = WebDom::new(document.clone());
    let host = WebHost(window.clone());
    let storage = local_storage(window);
    let lazy_set: SharedLazySet = Rc::new(RefCell::new(None));
    let support = lazy_support(&dom, window, &lazy_set)?;

    let PageBehavior {
        nav, lazy, scroll, ..
    } = PageBehavior::install(&dom, &host, &storage, &support, &config);

    if let LazyLoadPlan::Observed(set) = lazy {
        *lazy_set.borrow_mut() = Some(set);
    }
    if let Some(nav) = nav {
        wire_nav(&dom, nav)?;
    }
    wire_scroll(&dom, scroll)
}

/// Installs now, or on `DOMContentLoaded` if the document is still parsing.
pub fn install_when_ready() -> Result<(), BehaviorError> {
    let window = web_sys::window().ok_or(BehaviorError::MissingWindow)?;
    let document = window.document().ok_or(BehaviorError::MissingDocument)?;

    if !is_still_parsing(&document.ready_state()) {
        return install(&window, &document);
    }
    let target = document.clone();
    listen(&target, "DOMContentLoaded", move |_| {
        if let Err(e) = install(&window, &document) {
            log::error!("page behaviors not installed: {e}");
        }
    })
}
