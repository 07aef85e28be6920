//! LayoutService: the state machine behind a multi-pane viewer.
//!
//! A [`LayoutService`] owns four pieces of state:
//!
//! - the active [`ViewportLayout`] (shared, frozen, compared by identity),
//! - one content slot per layout box (`Vec<Option<C>>`),
//! - the selected slot index,
//! - the [`ViewerMode`].
//!
//! Every change is announced on an embedded [`EventBus`] under one of the
//! four [`LayoutServiceEvent`] names.  Observers (typically the rendering
//! layer) subscribe once and redraw on each notification.
//!
//! # Invariants (for beginners)
//!
//! After construction and after every public operation:
//!
//! - `content.len() == layout.len()`
//! - `selected < layout.len()`
//!
//! Bad input never panics and never returns an error: mutators simply leave
//! the state untouched and report `false`.
//!
//! # Event order when the layout changes
//!
//! [`LayoutService::set_layout`] swaps the layout, rebuilds the content
//! array, clamps the selection (which may publish `SelectionChanged`), and
//! only then publishes a single `LayoutChanged`.  Observers of
//! `LayoutChanged` therefore always see a consistent service.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};
use viewport_core::{Callback, EventBus, EventBusError, SubscriptionId, ViewportLayout};

use super::catalog::{LayoutCatalog, LayoutProvider};
use super::viewports::{layout_to_viewports, ViewportDescriptor};

/// Id of the layout a new service starts with.
pub const DEFAULT_LAYOUT_ID: &str = "grid-1x1";

// ── Viewer mode ───────────────────────────────────────────────────────────────

/// Presentation mode of the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewerMode {
    #[default]
    Normal,
    MaximumViewportSpace,
}

impl ViewerMode {
    /// Every mode in cycle order.
    pub const CYCLE: [ViewerMode; 2] = [ViewerMode::Normal, ViewerMode::MaximumViewportSpace];

    /// The mode after `self` in [`ViewerMode::CYCLE`], wrapping around.
    pub fn next(self) -> Self {
        let position = Self::CYCLE.iter().position(|m| *m == self).unwrap_or(0);
        Self::CYCLE[(position + 1) % Self::CYCLE.len()]
    }
}

impl fmt::Display for ViewerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerMode::Normal => write!(f, "normal"),
            ViewerMode::MaximumViewportSpace => write!(f, "maximum-viewport-space"),
        }
    }
}

// ── Events ────────────────────────────────────────────────────────────────────

/// The four notifications a [`LayoutService`] publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutServiceEvent {
    LayoutChanged,
    ContentChanged,
    SelectionChanged,
    ModeChanged,
}

impl LayoutServiceEvent {
    pub const ALL: [LayoutServiceEvent; 4] = [
        LayoutServiceEvent::LayoutChanged,
        LayoutServiceEvent::ContentChanged,
        LayoutServiceEvent::SelectionChanged,
        LayoutServiceEvent::ModeChanged,
    ];

    /// The event-bus name for this notification.
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutServiceEvent::LayoutChanged => "LayoutChanged",
            LayoutServiceEvent::ContentChanged => "ContentChanged",
            LayoutServiceEvent::SelectionChanged => "SelectionChanged",
            LayoutServiceEvent::ModeChanged => "ModeChanged",
        }
    }
}

impl fmt::Display for LayoutServiceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload delivered to subscribers.
#[derive(Debug, Clone)]
pub enum LayoutEvent<C> {
    LayoutChanged {
        new: Arc<ViewportLayout>,
        old: Arc<ViewportLayout>,
    },
    ContentChanged {
        index: usize,
        new: Option<C>,
        old: Option<C>,
    },
    SelectionChanged {
        new: usize,
        old: usize,
    },
    ModeChanged(ViewerMode),
}

impl<C> LayoutEvent<C> {
    /// Which [`LayoutServiceEvent`] this payload belongs to.
    pub fn kind(&self) -> LayoutServiceEvent {
        match self {
            LayoutEvent::LayoutChanged { .. } => LayoutServiceEvent::LayoutChanged,
            LayoutEvent::ContentChanged { .. } => LayoutServiceEvent::ContentChanged,
            LayoutEvent::SelectionChanged { .. } => LayoutServiceEvent::SelectionChanged,
            LayoutEvent::ModeChanged(_) => LayoutServiceEvent::ModeChanged,
        }
    }
}

// ── Service ───────────────────────────────────────────────────────────────────

/// Viewer layout state plus its change notifications.
///
/// `C` is the per-slot content type (for example a display-set id).  The
/// service is single-threaded; wrap it in a `Mutex` together with its bus if
/// it has to be shared.
pub struct LayoutService<C> {
    provider: Box<dyn LayoutProvider>,
    layout: Arc<ViewportLayout>,
    content: Vec<Option<C>>,
    selected: usize,
    mode: ViewerMode,
    bus: EventBus<LayoutEvent<C>>,
}

impl<C: Clone> Default for LayoutService<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clone> LayoutService<C> {
    /// Creates a service backed by the built-in [`LayoutCatalog`], starting
    /// on [`DEFAULT_LAYOUT_ID`].
    pub fn new() -> Self {
        Self::with_default_layout(DEFAULT_LAYOUT_ID)
    }

    /// Creates a service backed by the built-in catalog, starting on the
    /// layout with id `default_id`.
    pub fn with_default_layout(default_id: &str) -> Self {
        Self::with_provider(Box::new(LayoutCatalog), default_id)
    }

    /// Creates a service backed by an arbitrary [`LayoutProvider`].
    ///
    /// If `default_id` is unknown the service falls back to
    /// [`DEFAULT_LAYOUT_ID`]; if the provider lacks that too, a single
    /// full-area slot is used.
    pub fn with_provider(provider: Box<dyn LayoutProvider>, default_id: &str) -> Self {
        let layout = initial_layout(provider.as_ref(), default_id);
        debug!(layout = layout.id(), slots = layout.len(), "layout service created");
        Self {
            provider,
            content: vec![None; layout.len()],
            layout,
            selected: 0,
            mode: ViewerMode::Normal,
            bus: EventBus::new(),
        }
    }

    // ── Mode ─────────────────────────────────────────────────────────────────

    /// Advances to the next [`ViewerMode`] and publishes `ModeChanged`.
    pub fn toggle_viewer_mode(&mut self) -> ViewerMode {
        self.mode = self.mode.next();
        debug!(mode = %self.mode, "viewer mode changed");
        self.publish(LayoutEvent::ModeChanged(self.mode));
        self.mode
    }

    // ── Layout ───────────────────────────────────────────────────────────────

    /// Replaces the active layout.
    ///
    /// Returns `false` without touching anything when `new_layout` is `None`,
    /// is the layout already active, or has no slots.  With `discard = false`
    /// content is carried over slot by slot; with `discard = true` every slot
    /// is cleared.
    pub fn set_layout(&mut self, new_layout: Option<Arc<ViewportLayout>>, discard: bool) -> bool {
        let Some(new_layout) = new_layout else {
            return false;
        };
        if Arc::ptr_eq(&new_layout, &self.layout) {
            return false;
        }
        if new_layout.is_empty() {
            warn!(layout = new_layout.id(), "ignoring layout without slots");
            return false;
        }

        let old = std::mem::replace(&mut self.layout, Arc::clone(&new_layout));
        debug!(from = old.id(), to = new_layout.id(), discard, "layout changed");
        self.reset_content(!discard);
        self.publish(LayoutEvent::LayoutChanged {
            new: new_layout,
            old,
        });
        true
    }

    /// Looks `id` up in the provider and applies it via [`Self::set_layout`].
    pub fn set_default_layout_by_id(&mut self, id: &str, discard: bool) -> bool {
        let found = self.provider.lookup_by_id(id);
        if found.is_none() {
            debug!(id, "no layout with this id");
        }
        self.set_layout(found, discard)
    }

    // ── Content ──────────────────────────────────────────────────────────────

    /// Rebuilds the content array to match the active layout.
    ///
    /// With `preserve` the first `min(old, new)` slots keep their values.
    /// The selection is then clamped into the new range.
    pub fn reset_content(&mut self, preserve: bool) {
        let len = self.layout.len();
        let mut content = vec![None; len];
        if preserve {
            for (slot, value) in content.iter_mut().zip(self.content.drain(..)) {
                *slot = value;
            }
        }
        self.content = content;
        self.set_selected(self.selected.min(len.saturating_sub(1)));
    }

    /// Stores `value` in slot `index` and publishes `ContentChanged`.
    ///
    /// The event fires even when the value is unchanged.  Out-of-range
    /// indices return `false`.
    pub fn set_content(&mut self, index: usize, value: Option<C>) -> bool {
        let Some(slot) = self.content.get_mut(index) else {
            return false;
        };
        let old = std::mem::replace(slot, value.clone());
        self.publish(LayoutEvent::ContentChanged {
            index,
            new: value,
            old,
        });
        true
    }

    /// The value stored in slot `index`, if any.
    pub fn get_content(&self, index: usize) -> Option<C> {
        self.content.get(index).cloned().flatten()
    }

    /// Ascending indices of every slot holding a value.
    pub fn viewport_indices_with_content(&self) -> Vec<usize> {
        self.content
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.as_ref().map(|_| i))
            .collect()
    }

    // ── Selection ────────────────────────────────────────────────────────────

    /// Selects slot `index`.  Publishes `SelectionChanged` only when the
    /// index is in range and differs from the current selection.
    pub fn set_selected(&mut self, index: usize) -> bool {
        if index >= self.layout.len() || index == self.selected {
            return false;
        }
        let old = std::mem::replace(&mut self.selected, index);
        debug!(from = old, to = index, "selection changed");
        self.publish(LayoutEvent::SelectionChanged { new: index, old });
        true
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn layout(&self) -> &Arc<ViewportLayout> {
        &self.layout
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn mode(&self) -> ViewerMode {
        self.mode
    }

    /// Every layout the provider offers, in display order.
    pub fn default_layouts(&self) -> Vec<Arc<ViewportLayout>> {
        self.provider.layouts()
    }

    /// Renderer descriptors for the valid slots of the active layout.
    pub fn viewports(&self, plugin: &str) -> Vec<ViewportDescriptor> {
        layout_to_viewports(&self.layout, plugin)
    }

    // ── Subscriptions ────────────────────────────────────────────────────────

    /// Registers `callback` for `event`.
    ///
    /// # Errors
    ///
    /// Propagates [`EventBusError`] from the embedded bus.
    pub fn subscribe(
        &self,
        event: LayoutServiceEvent,
        callback: Callback<LayoutEvent<C>>,
    ) -> Result<SubscriptionId, EventBusError> {
        self.bus.subscribe(event.as_str(), callback)
    }

    /// Removes subscriptions for `event`: all of them with `None`, or only
    /// those registered with the same callback.  Returns how many were removed.
    pub fn unsubscribe(
        &self,
        event: LayoutServiceEvent,
        callback: Option<&Callback<LayoutEvent<C>>>,
    ) -> usize {
        self.bus.unsubscribe(event.as_str(), callback)
    }

    /// Removes one subscription by id.
    pub fn unsubscribe_id(&self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe_id(id)
    }

    pub fn unsubscribe_from_all(&self) {
        self.bus.unsubscribe_from_all();
    }

    /// Number of live subscriptions for `event`.
    pub fn subscription_count(&self, event: LayoutServiceEvent) -> usize {
        self.bus.subscription_count(event.as_str())
    }

    fn publish(&self, event: LayoutEvent<C>) {
        self.bus.publish(event.kind().as_str(), &event);
    }
}

impl<C> fmt::Debug for LayoutService<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutService")
            .field("layout", &self.layout.id())
            .field("filled", &self.content.iter().filter(|c| c.is_some()).count())
            .field("selected", &self.selected)
            .field("mode", &self.mode)
            .field("bus", &self.bus)
            .finish()
    }
}

fn initial_layout(provider: &dyn LayoutProvider, default_id: &str) -> Arc<ViewportLayout> {
    if let Some(layout) = provider.lookup_by_id(default_id).filter(|l| !l.is_empty()) {
        return layout;
    }
    warn!(id = default_id, fallback = DEFAULT_LAYOUT_ID, "unknown default layout");
    provider
        .lookup_by_id(DEFAULT_LAYOUT_ID)
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| ViewportLayout::grid(1, 1).freeze())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use viewport_core::callback;

    use super::*;
    use crate::application::catalog::MockLayoutProvider;

    type Log = Rc<RefCell<Vec<LayoutEvent<&'static str>>>>;

    fn service() -> LayoutService<&'static str> {
        LayoutService::new()
    }

    /// Subscribes a recorder to every event kind.
    fn record_all(svc: &LayoutService<&'static str>) -> Log {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        for event in LayoutServiceEvent::ALL {
            let log = Rc::clone(&log);
            svc.subscribe(event, callback(move |e: &LayoutEvent<&'static str>| {
                log.borrow_mut().push(e.clone())
            }))
            .unwrap();
        }
        log
    }

    fn kinds(log: &Log) -> Vec<LayoutServiceEvent> {
        log.borrow().iter().map(LayoutEvent::kind).collect()
    }

    fn catalog(id: &str) -> Arc<ViewportLayout> {
        LayoutCatalog::find(id).unwrap()
    }

    fn assert_invariants(svc: &LayoutService<&'static str>) {
        let len = svc.layout().len();
        assert_eq!(svc.content.len(), len);
        assert!(svc.selected() < len);
    }

    // ── Initial state ────────────────────────────────────────────────────────

    #[test]
    fn test_initial_state() {
        let svc = service();
        assert_eq!(svc.mode(), ViewerMode::Normal);
        assert_eq!(svc.layout().id(), "grid-1x1");
        assert!(Arc::ptr_eq(svc.layout(), &catalog("grid-1x1")));
        assert_eq!(svc.get_content(0), None);
        assert_eq!(svc.selected(), 0);
        assert!(svc.viewport_indices_with_content().is_empty());
        assert_invariants(&svc);
    }

    #[test]
    fn test_configured_default_layout_is_used() {
        let svc: LayoutService<u8> = LayoutService::with_default_layout("grid-2x2");
        assert_eq!(svc.layout().id(), "grid-2x2");
        assert_eq!(svc.content.len(), 4);
    }

    #[test]
    fn test_unknown_configured_default_falls_back() {
        let svc: LayoutService<u8> = LayoutService::with_default_layout("grid-7x7");
        assert_eq!(svc.layout().id(), DEFAULT_LAYOUT_ID);
    }

    #[test]
    fn test_default_layouts_come_from_provider() {
        let svc = service();
        let layouts = svc.default_layouts();
        assert_eq!(layouts.len(), 8);
        assert!(Arc::ptr_eq(&layouts[0], &LayoutCatalog::default_layouts()[0]));
    }

    // ── Mocked provider ──────────────────────────────────────────────────────

    #[test]
    fn test_mock_provider_supplies_initial_layout() {
        let custom = ViewportLayout::grid(1, 2).freeze();
        let returned = Arc::clone(&custom);

        let mut mock = MockLayoutProvider::new();
        mock.expect_lookup_by_id()
            .withf(|id| id == "side-by-side")
            .times(1)
            .returning(move |_| Some(Arc::clone(&returned)));

        let svc: LayoutService<u8> = LayoutService::with_provider(Box::new(mock), "side-by-side");
        assert!(Arc::ptr_eq(svc.layout(), &custom));
        assert_eq!(svc.content.len(), 2);
    }

    #[test]
    fn test_mock_provider_without_layouts_uses_single_slot() {
        let mut mock = MockLayoutProvider::new();
        mock.expect_lookup_by_id().times(2).returning(|_| None);

        let svc: LayoutService<u8> = LayoutService::with_provider(Box::new(mock), "missing");
        assert_eq!(svc.layout().len(), 1);
        assert_eq!(svc.selected(), 0);
    }

    #[test]
    fn test_set_default_layout_by_id_consults_provider() {
        let three = ViewportLayout::grid(1, 3).freeze();
        let returned = Arc::clone(&three);

        let mut mock = MockLayoutProvider::new();
        mock.expect_lookup_by_id()
            .withf(|id| id == DEFAULT_LAYOUT_ID)
            .returning(|_| Some(ViewportLayout::grid(1, 1).freeze()));
        mock.expect_lookup_by_id()
            .withf(|id| id == "three")
            .times(1)
            .returning(move |_| Some(Arc::clone(&returned)));
        mock.expect_lookup_by_id()
            .withf(|id| id == "nope")
            .times(1)
            .returning(|_| None);

        let mut svc: LayoutService<u8> = LayoutService::with_provider(Box::new(mock), DEFAULT_LAYOUT_ID);
        assert!(svc.set_default_layout_by_id("three", false));
        assert!(Arc::ptr_eq(svc.layout(), &three));
        assert!(!svc.set_default_layout_by_id("nope", false));
        assert!(Arc::ptr_eq(svc.layout(), &three));
    }

    // ── Mode ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_toggle_viewer_mode_cycles_and_publishes() {
        let mut svc = service();
        let log = record_all(&svc);

        assert_eq!(svc.toggle_viewer_mode(), ViewerMode::MaximumViewportSpace);
        assert_eq!(svc.toggle_viewer_mode(), ViewerMode::Normal);

        let modes: Vec<_> = log
            .borrow()
            .iter()
            .filter_map(|e| match e {
                LayoutEvent::ModeChanged(m) => Some(*m),
                _ => None,
            })
            .collect();
        assert_eq!(modes, vec![ViewerMode::MaximumViewportSpace, ViewerMode::Normal]);
    }

    #[test]
    fn test_viewer_mode_next_wraps() {
        for mode in ViewerMode::CYCLE {
            assert_eq!(mode.next().next(), mode);
        }
    }

    // ── set_layout ───────────────────────────────────────────────────────────

    #[test]
    fn test_set_layout_none_is_noop() {
        let mut svc = service();
        let log = record_all(&svc);
        assert!(!svc.set_layout(None, false));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_set_layout_same_instance_is_noop() {
        let mut svc = service();
        let log = record_all(&svc);
        assert!(!svc.set_layout(Some(catalog("grid-1x1")), true));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_set_layout_equal_but_distinct_instance_is_applied() {
        let mut svc = service();
        let log = record_all(&svc);
        let twin = ViewportLayout::grid(1, 1).freeze();
        assert!(svc.set_layout(Some(Arc::clone(&twin)), false));
        assert!(Arc::ptr_eq(svc.layout(), &twin));
        assert_eq!(kinds(&log), vec![LayoutServiceEvent::LayoutChanged]);
    }

    #[test]
    fn test_set_layout_empty_is_rejected() {
        let mut svc = service();
        let empty = ViewportLayout::new("Empty", "empty").freeze();
        assert!(!svc.set_layout(Some(empty), false));
        assert_eq!(svc.layout().id(), "grid-1x1");
        assert_invariants(&svc);
    }

    #[test]
    fn test_set_layout_publishes_new_and_old() {
        let mut svc = service();
        let log = record_all(&svc);
        let before = Arc::clone(svc.layout());
        let grid = catalog("grid-2x2");

        assert!(svc.set_layout(Some(Arc::clone(&grid)), false));

        let events = log.borrow();
        assert_eq!(events.len(), 1);
        match &events[0] {
            LayoutEvent::LayoutChanged { new, old } => {
                assert!(Arc::ptr_eq(new, &grid));
                assert!(Arc::ptr_eq(old, &before));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_set_layout_preserves_content_prefix() {
        let mut svc = service();
        svc.set_layout(Some(catalog("grid-2x2")), false);
        svc.set_content(0, Some("a"));
        svc.set_content(1, Some("b"));
        svc.set_content(3, Some("d"));

        svc.set_layout(Some(catalog("grid-1x2")), false);
        assert_eq!(svc.get_content(0), Some("a"));
        assert_eq!(svc.get_content(1), Some("b"));
        assert_eq!(svc.viewport_indices_with_content(), vec![0, 1]);

        svc.set_layout(Some(catalog("grid-3x3")), false);
        assert_eq!(svc.viewport_indices_with_content(), vec![0, 1]);
        assert_eq!(svc.get_content(8), None);
        assert_invariants(&svc);
    }

    #[test]
    fn test_set_layout_discard_clears_content() {
        let mut svc = service();
        svc.set_content(0, Some("a"));
        svc.set_layout(Some(catalog("grid-2x2")), true);
        assert!(svc.viewport_indices_with_content().is_empty());
        assert_eq!(svc.content.len(), 4);
    }

    #[test]
    fn test_shrinking_layout_clamps_selection_before_layout_event() {
        let mut svc = service();
        svc.set_layout(Some(catalog("grid-3x3")), false);
        assert!(svc.set_selected(8));

        let log = record_all(&svc);
        svc.set_layout(Some(catalog("grid-1x2")), false);

        assert_eq!(svc.selected(), 1);
        assert_eq!(
            kinds(&log),
            vec![LayoutServiceEvent::SelectionChanged, LayoutServiceEvent::LayoutChanged]
        );
        match &log.borrow()[0] {
            LayoutEvent::SelectionChanged { new, old } => assert_eq!((*new, *old), (1, 8)),
            other => panic!("unexpected event {other:?}"),
        };
    }

    #[test]
    fn test_growing_layout_keeps_selection_silently() {
        let mut svc = service();
        svc.set_layout(Some(catalog("grid-1x2")), false);
        svc.set_selected(1);
        let log = record_all(&svc);

        svc.set_layout(Some(catalog("grid-2x2")), false);
        assert_eq!(svc.selected(), 1);
        assert_eq!(kinds(&log), vec![LayoutServiceEvent::LayoutChanged]);
    }

    // ── Content ──────────────────────────────────────────────────────────────

    #[test]
    fn test_set_content_out_of_range_is_noop() {
        let mut svc = service();
        let log = record_all(&svc);
        assert!(!svc.set_content(1, Some("x")));
        assert!(log.borrow().is_empty());
        assert_eq!(svc.get_content(1), None);
    }

    #[test]
    fn test_set_content_publishes_even_when_unchanged() {
        let mut svc = service();
        let log = record_all(&svc);
        svc.set_content(0, Some("x"));
        svc.set_content(0, Some("x"));

        let events = log.borrow();
        assert_eq!(events.len(), 2);
        match &events[1] {
            LayoutEvent::ContentChanged { index, new, old } => {
                assert_eq!(*index, 0);
                assert_eq!(*new, Some("x"));
                assert_eq!(*old, Some("x"));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_clearing_content_reports_old_value() {
        let mut svc = service();
        svc.set_content(0, Some("x"));
        let log = record_all(&svc);
        svc.set_content(0, None);

        match &log.borrow()[0] {
            LayoutEvent::ContentChanged { new, old, .. } => {
                assert_eq!(*new, None);
                assert_eq!(*old, Some("x"));
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert!(svc.viewport_indices_with_content().is_empty());
    }

    #[test]
    fn test_reset_content_without_preserve_clears() {
        let mut svc = service();
        svc.set_content(0, Some("x"));
        svc.reset_content(false);
        assert_eq!(svc.get_content(0), None);
        assert_invariants(&svc);
    }

    #[test]
    fn test_viewport_indices_with_content_ascending() {
        let mut svc = service();
        svc.set_layout(Some(catalog("grid-2x3")), false);
        svc.set_content(4, Some("e"));
        svc.set_content(1, Some("b"));
        svc.set_content(2, Some("c"));
        svc.set_content(2, None);
        assert_eq!(svc.viewport_indices_with_content(), vec![1, 4]);
    }

    // ── Selection ────────────────────────────────────────────────────────────

    #[test]
    fn test_set_selected_rules() {
        let mut svc = service();
        svc.set_layout(Some(catalog("grid-2x2")), false);
        let log = record_all(&svc);

        assert!(!svc.set_selected(0), "already selected");
        assert!(!svc.set_selected(4), "out of range");
        assert!(svc.set_selected(3));
        assert_eq!(svc.selected(), 3);

        assert_eq!(kinds(&log), vec![LayoutServiceEvent::SelectionChanged]);
        match &log.borrow()[0] {
            LayoutEvent::SelectionChanged { new, old } => assert_eq!((*new, *old), (3, 0)),
            other => panic!("unexpected event {other:?}"),
        };
    }

    // ── Subscriptions ────────────────────────────────────────────────────────

    #[test]
    fn test_unsubscribe_specific_callback() {
        let mut svc = service();
        let hits = Rc::new(RefCell::new(0));
        let counter = {
            let hits = Rc::clone(&hits);
            callback(move |_: &LayoutEvent<&'static str>| *hits.borrow_mut() += 1)
        };
        svc.subscribe(LayoutServiceEvent::ModeChanged, Rc::clone(&counter))
            .unwrap();
        svc.toggle_viewer_mode();
        assert_eq!(svc.unsubscribe(LayoutServiceEvent::ModeChanged, Some(&counter)), 1);
        svc.toggle_viewer_mode();
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_unsubscribe_from_all_silences_everything() {
        let mut svc = service();
        let log = record_all(&svc);
        svc.unsubscribe_from_all();
        for event in LayoutServiceEvent::ALL {
            assert_eq!(svc.subscription_count(event), 0);
        }
        svc.toggle_viewer_mode();
        svc.set_content(0, Some("x"));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_panicking_observer_does_not_break_service() {
        let mut svc = service();
        svc.subscribe(
            LayoutServiceEvent::ModeChanged,
            callback(|_: &LayoutEvent<&'static str>| panic!("observer bug")),
        )
        .unwrap();
        let log = record_all(&svc);

        assert_eq!(svc.toggle_viewer_mode(), ViewerMode::MaximumViewportSpace);
        assert_eq!(kinds(&log), vec![LayoutServiceEvent::ModeChanged]);
    }

    #[test]
    fn test_event_names() {
        let names: Vec<_> = LayoutServiceEvent::ALL.iter().map(|e| e.as_str()).collect();
        assert_eq!(
            names,
            vec!["LayoutChanged", "ContentChanged", "SelectionChanged", "ModeChanged"]
        );
    }

    #[test]
    fn test_viewports_follow_active_layout() {
        let mut svc = service();
        assert_eq!(svc.viewports("cornerstone").len(), 1);
        svc.set_layout(Some(catalog("3-plane")), false);
        let viewports = svc.viewports("cornerstone");
        assert_eq!(viewports.len(), 3);
        assert!(viewports.iter().all(|v| v.plugin == "cornerstone"));
    }
}
