#![forbid(unsafe_code)]

//! Site navigation state: mobile menu, header style, deferred section jumps.
//!
//! Clicking a nav item closes the mobile menu first and scrolls a short
//! moment later so the menu's exit animation is not fighting the scroll.
//! The delay is modelled as a pending jump that [`Navigation::tick`] runs
//! once it falls due; a second click before then replaces the first.

use std::time::{Duration, Instant};

use folio_core::section::{NAV_ITEMS, NavItem, SectionId};

use crate::scroll_spy::{ScrollSpy, ScrollSpyError, Viewport};

/// Delay between a nav click and the scroll it triggers.
pub const NAV_SCROLL_DELAY: Duration = Duration::from_millis(100);

/// Scroll offset past which the header switches to its opaque style.
pub const SCROLLED_THRESHOLD_PX: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingJump {
    section: String,
    due: Instant,
}

/// Navigation controller.
#[derive(Debug)]
pub struct Navigation {
    spy: ScrollSpy,
    mobile_menu_open: bool,
    is_scrolled: bool,
    pending: Option<PendingJump>,
}

impl Navigation {
    #[must_use]
    pub fn new(spy: ScrollSpy) -> Self {
        Self {
            spy,
            mobile_menu_open: false,
            is_scrolled: false,
            pending: None,
        }
    }

    #[must_use]
    pub fn items(&self) -> &'static [NavItem] {
        &NAV_ITEMS
    }

    #[must_use]
    pub fn spy(&self) -> &ScrollSpy {
        &self.spy
    }

    pub fn spy_mut(&mut self) -> &mut ScrollSpy {
        &mut self.spy
    }

    #[must_use]
    pub fn active_section(&self) -> Option<&SectionId> {
        self.spy.active_section()
    }

    /// Whether `id` is the highlighted nav item.
    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.active_section().is_some_and(|s| s == id)
    }

    #[must_use]
    pub fn mobile_menu_open(&self) -> bool {
        self.mobile_menu_open
    }

    #[must_use]
    pub fn is_scrolled(&self) -> bool {
        self.is_scrolled
    }

    /// Page scrolling is locked while the mobile menu is open.
    #[must_use]
    pub fn body_scroll_locked(&self) -> bool {
        self.mobile_menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
    }

    pub fn close_menu(&mut self) {
        self.mobile_menu_open = false;
    }

    pub fn on_key_escape(&mut self) {
        self.close_menu();
    }

    /// A pointer press outside both the menu and its toggle button.
    pub fn on_outside_click(&mut self) {
        self.close_menu();
    }

    /// Record the document scroll offset and pull in any new visibility
    /// updates.
    pub fn on_scroll(&mut self, offset: f64) {
        self.is_scrolled = offset > SCROLLED_THRESHOLD_PX;
        self.spy.pump();
    }

    /// Close the menu and schedule a jump to `id`.
    pub fn on_nav_click(&mut self, id: &str, now: Instant) {
        self.close_menu();
        if let Some(previous) = &self.pending {
            tracing::trace!(replaced = %previous.section, section = id, "nav jump replaced");
        }
        self.pending = Some(PendingJump {
            section: id.to_string(),
            due: now + NAV_SCROLL_DELAY,
        });
    }

    /// Section of the jump waiting to run, if any.
    #[must_use]
    pub fn pending_jump(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.section.as_str())
    }

    /// Run the pending jump if it is due and drain visibility updates.
    ///
    /// Returns the jump's outcome when one ran.
    pub fn tick(
        &mut self,
        now: Instant,
        viewport: &mut dyn Viewport,
    ) -> Option<Result<f64, ScrollSpyError>> {
        self.spy.pump();
        let due = self.pending.as_ref().is_some_and(|p| now >= p.due);
        if !due {
            return None;
        }
        let jump = self.pending.take()?;
        Some(self.spy.scroll_to_section(&jump.section, viewport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll_spy::ScrollSpyConfig;
    use crate::simulator::PageSimulator;
    use crate::subscription::ManualIntersectionSource;
    use folio_core::SectionRegistry;

    fn setup() -> (Navigation, PageSimulator, ManualIntersectionSource) {
        let source = ManualIntersectionSource::new();
        let page = PageSimulator::new(800.0)
            .section("home", 800.0)
            .section("about", 800.0)
            .section("contact", 800.0)
            .attach(source.clone());
        let registry = SectionRegistry::new(["home", "about", "contact"]).unwrap();
        let spy = ScrollSpy::new(ScrollSpyConfig::new(registry), &source);
        (Navigation::new(spy), page, source)
    }

    #[test]
    fn menu_toggles_and_locks_body() {
        let (mut nav, _, _) = setup();
        assert!(!nav.mobile_menu_open());
        nav.toggle_menu();
        assert!(nav.mobile_menu_open());
        assert!(nav.body_scroll_locked());
        nav.on_key_escape();
        assert!(!nav.mobile_menu_open());
        assert!(!nav.body_scroll_locked());
    }

    #[test]
    fn outside_click_closes_menu() {
        let (mut nav, _, _) = setup();
        nav.toggle_menu();
        nav.on_outside_click();
        assert!(!nav.mobile_menu_open());
    }

    #[test]
    fn scrolled_threshold_is_strict() {
        let (mut nav, _, _) = setup();
        nav.on_scroll(20.0);
        assert!(!nav.is_scrolled());
        nav.on_scroll(21.0);
        assert!(nav.is_scrolled());
        nav.on_scroll(0.0);
        assert!(!nav.is_scrolled());
    }

    #[test]
    fn nav_click_closes_menu_and_defers_scroll() {
        let (mut nav, mut page, _) = setup();
        let t0 = Instant::now();
        nav.toggle_menu();
        nav.on_nav_click("about", t0);
        assert!(!nav.mobile_menu_open());
        assert_eq!(nav.pending_jump(), Some("about"));

        assert!(nav.tick(t0 + Duration::from_millis(99), &mut page).is_none());
        assert!(page.requests().is_empty());

        let outcome = nav.tick(t0 + NAV_SCROLL_DELAY, &mut page).unwrap();
        assert_eq!(outcome, Ok(720.0));
        assert!(nav.is_active("about"));
        assert_eq!(nav.pending_jump(), None);
    }

    #[test]
    fn later_click_replaces_pending_jump() {
        let (mut nav, mut page, _) = setup();
        let t0 = Instant::now();
        nav.on_nav_click("about", t0);
        nav.on_nav_click("contact", t0 + Duration::from_millis(50));
        assert!(nav.tick(t0 + Duration::from_millis(120), &mut page).is_none());
        let outcome = nav.tick(t0 + Duration::from_millis(150), &mut page).unwrap();
        assert_eq!(outcome, Ok(1520.0));
        assert_eq!(page.requests().len(), 1);
    }

    #[test]
    fn jump_to_missing_section_reports_error() {
        let (mut nav, mut page, _) = setup();
        let t0 = Instant::now();
        nav.on_nav_click("research", t0);
        let outcome = nav.tick(t0 + NAV_SCROLL_DELAY, &mut page).unwrap();
        assert!(matches!(outcome, Err(ScrollSpyError::SectionNotFound(_))));
        assert!(page.requests().is_empty());
    }

    #[test]
    fn user_scroll_updates_active_item() {
        let (mut nav, mut page, _) = setup();
        page.refresh();
        nav.on_scroll(page.scroll_offset());
        assert!(nav.is_active("home"));

        page.set_scroll(1600.0);
        nav.on_scroll(page.scroll_offset());
        assert!(nav.is_active("contact"));
        assert!(nav.is_scrolled());
    }

    #[test]
    fn items_are_site_nav() {
        let (nav, _, _) = setup();
        assert_eq!(nav.items().len(), 6);
        assert_eq!(nav.items()[0].id, "home");
    }
}
