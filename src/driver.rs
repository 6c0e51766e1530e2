//! Async event loop feeding a [`Page`] and its sticky instances.
//!
//! The `Driver` owns the page model and the registry. Page events arrive on an
//! unbounded channel and are applied immediately; a frame interval ticks every
//! instance, which runs due recalculations and pending updates. Everything
//! stays on one task, so callbacks need not be `Send`.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace, warn};

use crate::dom::node::NodeId;
use crate::geometry::{Px, Rect, Size};
use crate::page::Page;
use crate::plugin::{Command, Stickies};
use crate::sticky::{Sticky, StickyConfig};

/// Default frame interval (~60 fps).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

// ---------------------------------------------------------------------------
// PageEvent
// ---------------------------------------------------------------------------

/// Something that happened to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Document and content finished loading.
    Load,
    /// The window scrolled to `top`.
    Scroll { top: Px },
    /// The viewport changed size.
    Resize { viewport: Size },
    /// A subtree mutation reported by the environment.
    Mutation { target: NodeId },
    /// A node was laid out again.
    Layout { node: NodeId, rect: Rect },
    /// A named operation on the instance attached to `node`.
    Command { node: NodeId, command: Command },
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Owns the page and registry and routes events between them.
#[derive(Debug)]
pub struct Driver {
    page: Page,
    stickies: Stickies,
    frame_interval: Duration,
}

impl Driver {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            stickies: Stickies::new(),
            frame_interval: FRAME_INTERVAL,
        }
    }

    /// Override the frame interval (builder).
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn stickies(&self) -> &Stickies {
        &self.stickies
    }

    /// Attach the sticky behavior to `node`; see [`Stickies::apply`].
    pub fn apply(&mut self, node: NodeId, config: impl Into<StickyConfig>) -> &mut Sticky {
        self.stickies.apply(&self.page, node, config)
    }

    /// Apply one event to the page and fan it out to the instances.
    pub fn dispatch(&mut self, event: PageEvent, now: std::time::Instant) {
        trace!(?event, "page event");
        match event {
            PageEvent::Load => self.stickies.load(&mut self.page),
            PageEvent::Scroll { top } => {
                self.page.scroll_to(top);
                self.stickies.scroll();
            }
            PageEvent::Resize { viewport } => {
                self.page.resize(viewport);
                self.stickies.resize(now);
            }
            PageEvent::Mutation { target } => self.stickies.mutation(target, now, &self.page),
            PageEvent::Layout { node, rect } => self.page.set_rect(node, rect),
            PageEvent::Command { node, command } => {
                if !self.stickies.invoke(&mut self.page, node, command) {
                    warn!(?node, "command sent to a node without a sticky instance");
                }
            }
        }
    }

    /// One animation frame: tick every instance, then report the structural
    /// changes the frame made (mask insertion and removal) as mutations.
    pub fn frame(&mut self, now: std::time::Instant) {
        self.stickies.tick(now, &mut self.page);
        for target in self.page.take_mutations() {
            self.stickies.mutation(target, now, &self.page);
        }
    }

    /// Run until `events` closes, then flush one last frame and hand back the
    /// page and registry.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<PageEvent>) -> (Page, Stickies) {
        let mut frames = time::interval(self.frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        debug!(interval = ?self.frame_interval, instances = self.stickies.len(), "driver started");

        loop {
            tokio::select! {
                biased;
                event = events.recv() => match event {
                    Some(event) => self.dispatch(event, Instant::now().into_std()),
                    None => break,
                },
                _ = frames.tick() => self.frame(Instant::now().into_std()),
            }
        }

        self.frame(Instant::now().into_std());
        debug!(instances = self.stickies.len(), "driver stopped");
        (self.page, self.stickies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::dom::node::NodeData;
    use crate::sticky::config::{MASK_CLASS, RECALC_DELAY};
    use crate::sticky::StickyState;

    fn fixture() -> (Page, NodeId) {
        let mut page = Page::new(Size::new(1280.0, 800.0));
        let body = page.body();
        let context = page.append(
            body,
            NodeData::new("section").with_class("layout"),
            Rect::new(0.0, 0.0, 1280.0, 3000.0),
        );
        let elem = page.append(context, NodeData::new("aside"), Rect::new(20.0, 500.0, 300.0, 400.0));
        page.take_mutations();
        (page, elem)
    }

    #[test]
    fn dispatch_and_frame() {
        let (page, elem) = fixture();
        let mut driver = Driver::new(page);
        driver.apply(elem, StickyConfig::new(".layout"));
        let t0 = std::time::Instant::now();

        driver.dispatch(PageEvent::Load, t0);
        driver.dispatch(PageEvent::Scroll { top: 100.0 }, t0);
        driver.dispatch(PageEvent::Scroll { top: 650.0 }, t0);
        driver.frame(t0);
        assert_eq!(driver.stickies().get(elem).unwrap().state(), StickyState::Stuck);
        assert_eq!(driver.page().dom().query_by_class(MASK_CLASS).len(), 1);
    }

    #[test]
    fn layout_change_applies_after_resize_settles() {
        let (page, elem) = fixture();
        let mut driver = Driver::new(page);
        driver.apply(elem, StickyConfig::new(".layout"));
        let t0 = std::time::Instant::now();
        driver.dispatch(PageEvent::Load, t0);

        driver.dispatch(PageEvent::Layout { node: elem, rect: Rect::new(20.0, 900.0, 300.0, 400.0) }, t0);
        driver.dispatch(PageEvent::Resize { viewport: Size::new(1024.0, 700.0) }, t0);
        driver.frame(t0 + Duration::from_millis(100));
        assert_eq!(driver.stickies().get(elem).unwrap().calc().bounds.top, 500.0);

        driver.frame(t0 + RECALC_DELAY);
        assert_eq!(driver.stickies().get(elem).unwrap().calc().bounds.top, 900.0);
        assert_eq!(driver.page().viewport().height, 700.0);
    }

    #[test]
    fn mask_insertion_feeds_observer() {
        let (page, elem) = fixture();
        let mut driver = Driver::new(page);
        driver.apply(elem, StickyConfig::new(".layout").observe(true));
        let t0 = std::time::Instant::now();
        driver.dispatch(PageEvent::Load, t0);
        driver.dispatch(PageEvent::Scroll { top: 1000.0 }, t0);
        driver.frame(t0);

        // The mask was inserted into the context: a recalculation is armed.
        let sticky = driver.stickies().get(elem).unwrap();
        assert_eq!(sticky.next_deadline(), Some(t0 + RECALC_DELAY));

        driver.frame(t0 + RECALC_DELAY);
        let sticky = driver.stickies().get(elem).unwrap();
        assert_eq!(sticky.state(), StickyState::Stuck);
        assert_eq!(sticky.next_deadline(), None);
        assert_eq!(driver.page().dom().query_by_class(MASK_CLASS).len(), 1);
    }

    #[test]
    fn command_to_unknown_node_is_ignored() {
        let (page, elem) = fixture();
        let mut driver = Driver::new(page);
        driver.dispatch(PageEvent::Command { node: elem, command: Command::Destroy }, std::time::Instant::now());
        assert!(driver.stickies().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn run_until_channel_closes() {
        let (page, elem) = fixture();
        let mut driver = Driver::new(page);
        driver.apply(elem, StickyConfig::new(".layout").bottom_offset(20.0));
        let (tx, rx) = mpsc::unbounded_channel();

        let feed = async move {
            tx.send(PageEvent::Load).unwrap();
            tx.send(PageEvent::Scroll { top: 600.0 }).unwrap();
            time::sleep(Duration::from_millis(40)).await;
            tx.send(PageEvent::Scroll { top: 2700.0 }).unwrap();
            time::sleep(Duration::from_millis(40)).await;
        };

        let ((page, stickies), ()) = tokio::join!(driver.run(rx), feed);
        assert_eq!(stickies.get(elem).unwrap().state(), StickyState::Bound);
        assert!(page.node(elem).unwrap().has_class("bound"));
    }

    #[tokio::test(start_paused = true)]
    async fn run_debounces_resize() {
        let (page, elem) = fixture();
        let mut driver = Driver::new(page).with_frame_interval(Duration::from_millis(10));
        driver.apply(elem, StickyConfig::new(".layout"));
        let (tx, rx) = mpsc::unbounded_channel();

        let feed = async move {
            tx.send(PageEvent::Load).unwrap();
            time::sleep(Duration::from_millis(20)).await;
            tx.send(PageEvent::Layout { node: elem, rect: Rect::new(20.0, 800.0, 300.0, 400.0) })
                .unwrap();
            for _ in 0..5 {
                tx.send(PageEvent::Resize { viewport: Size::new(1000.0, 800.0) }).unwrap();
                time::sleep(Duration::from_millis(50)).await;
            }
            time::sleep(Duration::from_millis(300)).await;
        };

        let ((_, stickies), ()) = tokio::join!(driver.run(rx), feed);
        assert_eq!(stickies.get(elem).unwrap().calc().bounds.top, 800.0);
    }

    #[tokio::test(start_paused = true)]
    async fn destroy_command_unregisters() {
        let (page, elem) = fixture();
        let mut driver = Driver::new(page);
        driver.apply(elem, StickyConfig::new(".layout"));
        let (tx, rx) = mpsc::unbounded_channel();

        let feed = async move {
            tx.send(PageEvent::Load).unwrap();
            tx.send(PageEvent::Scroll { top: 1000.0 }).unwrap();
            time::sleep(Duration::from_millis(20)).await;
            tx.send(PageEvent::Command { node: elem, command: Command::Destroy }).unwrap();
        };

        let ((page, stickies), ()) = tokio::join!(driver.run(rx), feed);
        assert!(stickies.is_empty());
        assert!(page.node(elem).unwrap().style.is_empty());
        assert!(page.dom().query_by_class(MASK_CLASS).is_empty());
    }
}
