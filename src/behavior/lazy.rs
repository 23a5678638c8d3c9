use serde::{Deserialize, Serialize};

use super::{dom::Dom, Capability};

/// Visibility observation for images (an `IntersectionObserver` in a browser).
pub trait ImageObserver<N> {
    fn observe(&self, node: &N);
    fn unobserve(&self, node: &N);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LazyConfig {
    pub image_selector: String,
    pub source_attribute: String,
    pub loaded_class: String,
}

impl Default for LazyConfig {
    fn default() -> Self {
        Self {
            image_selector: r#"img[loading="lazy"]"#.to_string(),
            source_attribute: "data-src".to_string(),
            loaded_class: "loaded".to_string(),
        }
    }
}

/// What the host can do for lazy images.
#[derive(Debug)]
pub struct LazySupport<O> {
    /// The image element understands `loading="lazy"` itself.
    pub native: bool,
    pub observer: Capability<O>,
}

impl<O> LazySupport<O> {
    pub fn native() -> Self {
        Self {
            native: true,
            observer: Capability::Unavailable,
        }
    }

    pub fn observed(observer: O) -> Self {
        Self {
            native: false,
            observer: Capability::Available(observer),
        }
    }

    pub fn fallback() -> Self {
        Self {
            native: false,
            observer: Capability::Unavailable,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PendingImage<N> {
    node: N,
    source: String,
}

/// Images waiting for their real source. Entries leave on swap and never
/// come back.
#[derive(Debug, Clone, PartialEq)]
pub struct LazyImageSet<N> {
    pending: Vec<PendingImage<N>>,
    config: LazyConfig,
}

impl<N: Clone + PartialEq> LazyImageSet<N> {
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending_nodes(&self) -> Vec<N> {
        self.pending.iter().map(|p| p.node.clone()).collect()
    }

    /// Swaps in the pending source, marks the image loaded and stops
    /// observing it. Returns `false` for images already swapped or never
    /// tracked.
    pub fn on_visible<D, O>(&mut self, dom: &D, observer: &O, node: &N) -> bool
    where
        D: Dom<Node = N>,
        O: ImageObserver<N>,
    {
        let Some(i) = self.pending.iter().position(|p| &p.node == node) else {
            return false;
        };
        let image = self.pending.swap_remove(i);
        dom.set_attribute(&image.node, "src", &image.source);
        dom.add_class(&image.node, &self.config.loaded_class);
        observer.unobserve(&image.node);
        true
    }

    /// Feeds a batch of observer entries, `(image, is_intersecting)`.
    /// Returns how many images were swapped.
    pub fn on_entries<D, O>(&mut self, dom: &D, observer: &O, entries: &[(N, bool)]) -> usize
    where
        D: Dom<Node = N>,
        O: ImageObserver<N>,
    {
        entries
            .iter()
            .filter(|(_, visible)| *visible)
            .filter(|(node, _)| self.on_visible(dom, observer, node))
            .count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LazyLoadPlan<N> {
    /// The browser handles it; nothing installed.
    Native,
    Observed(LazyImageSet<N>),
    /// No observer: every image got its source immediately.
    Eager { swapped: usize },
}

pub struct LazyImages<'a> {
    config: &'a LazyConfig,
}

impl<'a> LazyImages<'a> {
    pub fn new(config: &'a LazyConfig) -> Self {
        Self { config }
    }

    fn pending_source<D: Dom>(&self, dom: &D, node: &D::Node) -> Option<String> {
        dom.attribute(node, &self.config.source_attribute)
            .filter(|s| !s.is_empty())
            .or_else(|| dom.attribute(node, "src"))
    }

    pub fn install<D, O>(&self, dom: &D, support: &LazySupport<O>) -> LazyLoadPlan<D::Node>
    where
        D: Dom,
        O: ImageObserver<D::Node>,
    {
        if support.native {
            return LazyLoadPlan::Native;
        }
        let images = dom.query_selector_all(&self.config.image_selector);

        match &support.observer {
            Capability::Available(observer) => {
                let pending = images
                    .into_iter()
                    .filter_map(|node| {
                        let source = self.pending_source(dom, &node)?;
                        observer.observe(&node);
                        Some(PendingImage { node, source })
                    })
                    .collect();
                LazyLoadPlan::Observed(LazyImageSet {
                    pending,
                    config: self.config.clone(),
                })
            }
            Capability::Unavailable => {
                let mut swapped = 0;
                for node in &images {
                    if let Some(source) = self.pending_source(dom, node) {
                        dom.set_attribute(node, "src", &source);
                        swapped += 1;
                    }
                }
                log::debug!("no intersection observer, loaded {swapped} images eagerly");
                LazyLoadPlan::Eager { swapped }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::testing::{FakeDom, NodeId, RecordingObserver};

    fn gallery() -> (FakeDom, Vec<NodeId>) {
        let dom = FakeDom::new();
        let root = dom.root();
        let a = dom.append(
            root,
            "img",
            &[("loading", "lazy"), ("src", "/thumb-a.jpg"), ("data-src", "/a.jpg")],
        );
        let b = dom.append(root, "img", &[("loading", "lazy"), ("src", "/b.jpg")]);
        let eager = dom.append(root, "img", &[("src", "/logo.svg"), ("data-src", "/x.jpg")]);
        (dom, vec![a, b, eager])
    }

    #[test]
    fn test_native_support_is_noop() {
        let (dom, imgs) = gallery();
        let plan = LazyImages::new(&LazyConfig::default())
            .install(&dom, &LazySupport::<RecordingObserver>::native());
        assert_eq!(plan, LazyLoadPlan::Native);
        assert_eq!(dom.attribute(&imgs[0], "src"), Some("/thumb-a.jpg".into()));
    }

    #[test]
    fn test_observes_only_lazy_images() {
        let (dom, imgs) = gallery();
        let support = LazySupport::observed(RecordingObserver::default());
        let plan = LazyImages::new(&LazyConfig::default()).install(&dom, &support);

        let observer = support.observer.as_option().unwrap();
        assert_eq!(observer.observed(), vec![imgs[0], imgs[1]]);
        match plan {
            LazyLoadPlan::Observed(set) => assert_eq!(set.pending_nodes(), vec![imgs[0], imgs[1]]),
            other => panic!("expected observed plan, got {other:?}"),
        }
        // nothing swapped before visibility
        assert_eq!(dom.attribute(&imgs[0], "src"), Some("/thumb-a.jpg".into()));
    }

    #[test]
    fn test_visible_image_swapped_exactly_once() {
        let (dom, imgs) = gallery();
        let support = LazySupport::observed(RecordingObserver::default());
        let LazyLoadPlan::Observed(mut set) =
            LazyImages::new(&LazyConfig::default()).install(&dom, &support)
        else {
            panic!("expected observed plan");
        };
        let observer = support.observer.as_option().unwrap();

        assert!(set.on_visible(&dom, observer, &imgs[0]));
        assert_eq!(dom.attribute(&imgs[0], "src"), Some("/a.jpg".into()));
        assert!(dom.has_class(&imgs[0], "loaded"));
        assert_eq!(observer.unobserved(), vec![imgs[0]]);
        assert_eq!(observer.observed(), vec![imgs[1]]);

        // later entries for the same image do nothing
        dom.set_attribute(&imgs[0], "src", "/changed.jpg");
        assert!(!set.on_visible(&dom, observer, &imgs[0]));
        assert_eq!(dom.attribute(&imgs[0], "src"), Some("/changed.jpg".into()));
        assert_eq!(observer.unobserved(), vec![imgs[0]]);
    }

    #[test]
    fn test_entries_skip_invisible() {
        let (dom, imgs) = gallery();
        let support = LazySupport::observed(RecordingObserver::default());
        let LazyLoadPlan::Observed(mut set) =
            LazyImages::new(&LazyConfig::default()).install(&dom, &support)
        else {
            panic!("expected observed plan");
        };
        let observer = support.observer.as_option().unwrap();

        let swapped = set.on_entries(&dom, observer, &[(imgs[0], false), (imgs[1], true)]);
        assert_eq!(swapped, 1);
        // no data-src: keeps its own source but is still marked loaded
        assert_eq!(dom.attribute(&imgs[1], "src"), Some("/b.jpg".into()));
        assert!(dom.has_class(&imgs[1], "loaded"));
        assert!(!dom.has_class(&imgs[0], "loaded"));
        assert_eq!(set.pending_nodes(), vec![imgs[0]]);

        let swapped = set.on_entries(&dom, observer, &[(imgs[0], true), (imgs[1], true)]);
        assert_eq!(swapped, 1);
        assert!(set.is_empty());
    }

    #[test]
    fn test_eager_fallback_without_observer() {
        let (dom, imgs) = gallery();
        let plan = LazyImages::new(&LazyConfig::default())
            .install(&dom, &LazySupport::<RecordingObserver>::fallback());

        assert_eq!(plan, LazyLoadPlan::Eager { swapped: 2 });
        assert_eq!(dom.attribute(&imgs[0], "src"), Some("/a.jpg".into()));
        assert_eq!(dom.attribute(&imgs[1], "src"), Some("/b.jpg".into()));
        // the fallback only swaps sources
        assert!(!dom.has_class(&imgs[0], "loaded"));
        // not marked lazy
        assert_eq!(dom.attribute(&imgs[2], "src"), Some("/logo.svg".into()));
    }
}
