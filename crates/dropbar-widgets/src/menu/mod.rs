#![forbid(unsafe_code)]

//! Horizontal dropdown menu bar.
//!
//! A [`Menu`] draws one bar row split into equal segments, one per child
//! entry, and coordinates the children:
//!
//! - at most one entry is open at a time ([`OpenFlags`])
//! - children report selected text, which becomes the segment label
//!   ([`TitleOverrides`], [`resolve_title`])
//! - while mounted with `scroll_fixed` enabled, host scroll signals switch
//!   the bar between free and fixed styling ([`ScrollFixedDetector`])
//!
//! Children are positional: state is keyed by index in the entry list, and
//! empty slots keep their index. Replace the whole list with
//! [`Menu::set_entries`], which also resets per-entry state.
//!
//! # Hit regions
//!
//! Bar segments register `(menu hit id, HitRegion::Button, index)`. Child `i`
//! gets hit id `menu hit id + 1 + i` for its own popup regions, so leave that
//! range free when placing several menus in one frame.
//!
//! # Example
//!
//! ```
//! use dropbar_core::event::{Event, MouseEvent};
//! use dropbar_core::geometry::Rect;
//! use dropbar_render::frame::Frame;
//! use dropbar_widgets::StatefulWidget;
//! use dropbar_widgets::menu::{Menu, MenuConfig, MenuEvent, MenuItem, MenuOption, MenuState};
//!
//! let mut menu = Menu::new(MenuConfig::default());
//! menu.push(MenuItem::new(vec![MenuOption::new("all", "All")]).value("all"));
//! menu.push(MenuItem::new(vec![MenuOption::new("new", "Newest")]).title("Sort"));
//!
//! let mut state = MenuState::new();
//! let mut frame = Frame::with_hit_grid(20, 5);
//! menu.render(Rect::new(0, 0, 20, 1), &mut frame, &mut state);
//!
//! let click = MouseEvent::left_click(12, 0);
//! let hit = frame.hit_test(12, 0);
//! let outcome = menu.handle_event(&Event::Mouse(click), &mut state, hit);
//! assert_eq!(outcome, MenuEvent::Toggled { index: 1, open: true });
//! ```

pub mod config;
pub mod entry;
pub mod item;
pub mod scroll_fixed;
pub mod titles;
pub mod visibility;

pub use config::{MenuConfig, MenuConfigError, MenuConfigParse};
#[cfg(feature = "serde")]
pub use config::{MenuOptions, ScrollFixedOption};
pub use entry::{Direction, EntryConfig, InjectedEntry, InjectedProps, MenuEntry, MenuOption, MenuParent};
pub use item::MenuItem;
pub use scroll_fixed::{FixedMode, ScrollFixed, ScrollFixedDetector};
pub use titles::{TitleOverrides, resolve_title};
pub use visibility::OpenFlags;

use dropbar_core::event::Event;
use dropbar_core::geometry::Rect;
use dropbar_core::scroll::{ScrollHost, ScrollSignal, ScrollSubscription};
use dropbar_render::cell::{Cell, PackedRgba};
use dropbar_render::frame::{Frame, Hit, HitId, HitRegion};
use dropbar_style::Style;

use crate::icon::Icon;
use crate::{StatefulWidget, Widget, draw_text_span, set_style_area, truncate_to_width};

/// Class tag of the root.
pub const ROOT_CLASS: &str = "dropbar-menu";
/// Class tag of the bar.
pub const BAR_CLASS: &str = "dropbar-menu__bar";

/// Hit id used by [`Menu::new`].
pub const DEFAULT_HIT_ID: HitId = HitId::new(1);

/// What [`Menu::handle_event`] did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// Not for this menu, or no state change.
    Ignored,
    /// A bar segment was clicked.
    Toggled { index: usize, open: bool },
    /// The scroll-fixed mode changed.
    FixedChanged(FixedMode),
    /// Child `index` consumed the event.
    Entry(usize),
}

impl MenuEvent {
    /// Whether the caller should redraw.
    #[must_use]
    pub const fn needs_redraw(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Mutable state of one mounted menu.
#[derive(Debug, Default)]
pub struct MenuState {
    open_flags: OpenFlags,
    title_overrides: TitleOverrides,
    detector: ScrollFixedDetector,
    bar_area: Rect,
    root_area: Rect,
    subscription: Option<ScrollSubscription>,
    mounted: bool,
}

impl MenuState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn open_flags(&self) -> &OpenFlags {
        &self.open_flags
    }

    /// Whether entry `index` is open.
    #[must_use]
    pub fn is_open(&self, index: usize) -> bool {
        self.open_flags.is_open(index)
    }

    /// Whether any entry is open.
    #[must_use]
    pub fn is_opened(&self) -> bool {
        self.open_flags.any_open()
    }

    #[must_use]
    pub fn title_override(&self, index: usize) -> Option<&str> {
        self.title_overrides.get(index)
    }

    #[must_use]
    pub fn fixed_mode(&self) -> FixedMode {
        self.detector.mode()
    }

    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.detector.mode().is_fixed()
    }

    /// Bar row from the last render.
    #[must_use]
    pub const fn bar_area(&self) -> Rect {
        self.bar_area
    }

    /// Area popups may cover, from the last render.
    #[must_use]
    pub const fn root_area(&self) -> Rect {
        self.root_area
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether a scroll subscription is live.
    #[must_use]
    pub const fn is_listening(&self) -> bool {
        self.subscription.is_some()
    }

    /// Release the scroll subscription. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        self.mounted = false;
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }

    fn listen(&mut self, host: &ScrollHost) {
        if self.subscription.is_none() {
            self.subscription = Some(host.subscribe());
        }
    }

    fn reset_entries(&mut self) {
        self.open_flags.reset();
        self.title_overrides.reset();
    }
}

/// Class tags for the root and the bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuClassNames {
    pub root: String,
    pub bar: String,
}

/// The dropdown menu bar.
pub struct Menu {
    config: MenuConfig,
    entries: Vec<Option<Box<dyn MenuEntry>>>,
    hit_id: HitId,
}

impl std::fmt::Debug for Menu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Menu")
            .field("config", &self.config)
            .field("entries", &self.entries.len())
            .field("hit_id", &self.hit_id)
            .finish()
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new(MenuConfig::default())
    }
}

impl Menu {
    #[must_use]
    pub fn new(config: MenuConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            hit_id: DEFAULT_HIT_ID,
        }
    }

    /// Set the hit id for bar segments.
    #[must_use]
    pub fn hit_id(mut self, id: HitId) -> Self {
        self.hit_id = id;
        self
    }

    /// Builder form of [`Menu::push`].
    #[must_use]
    pub fn entry(mut self, entry: impl MenuEntry + 'static) -> Self {
        self.push(entry);
        self
    }

    #[must_use]
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Append an entry at the next position.
    pub fn push(&mut self, entry: impl MenuEntry + 'static) {
        self.entries.push(Some(Box::new(entry)));
    }

    /// Append an empty slot. It draws nothing but keeps its index.
    pub fn push_empty(&mut self) {
        self.entries.push(None);
    }

    /// Replace every entry and forget per-entry state.
    pub fn set_entries(&mut self, entries: Vec<Option<Box<dyn MenuEntry>>>, state: &mut MenuState) {
        dropbar_core::debug!(count = entries.len(), "menu entries replaced");
        self.entries = entries;
        state.reset_entries();
    }

    /// Number of slots, empty ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`, if that slot is filled.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&dyn MenuEntry> {
        self.entries.get(index).and_then(|slot| slot.as_deref())
    }

    /// Mutable entry at `index`, if that slot is filled.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut (dyn MenuEntry + 'static)> {
        self.entries.get_mut(index).and_then(|slot| slot.as_deref_mut())
    }

    /// Start listening to `host` when `scroll_fixed` is enabled.
    pub fn mount(&self, state: &mut MenuState, host: &ScrollHost) {
        state.mounted = true;
        if self.config.scroll_fixed.is_enabled() {
            state.listen(host);
        }
    }

    /// Change `scroll_fixed`, subscribing or unsubscribing a mounted state
    /// to match. Disabling returns the bar to free mode.
    pub fn set_scroll_fixed(
        &mut self,
        scroll_fixed: impl Into<ScrollFixed>,
        state: &mut MenuState,
        host: &ScrollHost,
    ) -> MenuEvent {
        self.config.scroll_fixed = scroll_fixed.into();
        if !state.mounted {
            return MenuEvent::Ignored;
        }
        if self.config.scroll_fixed.is_enabled() {
            state.listen(host);
            return MenuEvent::Ignored;
        }
        if let Some(subscription) = state.subscription.take() {
            subscription.unsubscribe();
        }
        if state.detector.mode().is_fixed() {
            state.detector.reset();
            return MenuEvent::FixedChanged(FixedMode::Free);
        }
        MenuEvent::Ignored
    }

    /// Classify one scroll signal. Ignored unless the state is listening.
    pub fn observe_scroll(&self, state: &mut MenuState, signal: ScrollSignal) -> MenuEvent {
        if state.subscription.is_none() {
            return MenuEvent::Ignored;
        }
        let Some(threshold) = self.config.scroll_fixed.threshold() else {
            return MenuEvent::Ignored;
        };
        match state.detector.observe(threshold, signal) {
            Some(mode) => {
                dropbar_core::debug!(
                    offset = signal.offset(),
                    threshold,
                    fixed = mode.is_fixed(),
                    "menu scroll-fixed changed"
                );
                MenuEvent::FixedChanged(mode)
            }
            None => MenuEvent::Ignored,
        }
    }

    /// Drain the scroll subscription and classify every pending signal.
    ///
    /// Returns the last mode change, if any.
    pub fn poll_scroll(&self, state: &mut MenuState) -> MenuEvent {
        let pending = match state.subscription.as_ref() {
            Some(subscription) => subscription.drain(),
            None => return MenuEvent::Ignored,
        };
        pending
            .into_iter()
            .map(|signal| self.observe_scroll(state, signal))
            .filter(MenuEvent::needs_redraw)
            .last()
            .unwrap_or(MenuEvent::Ignored)
    }

    /// Route one event.
    ///
    /// `hit` is the hit-test result at the mouse position from the last
    /// rendered frame.
    pub fn handle_event(&mut self, event: &Event, state: &mut MenuState, hit: Option<Hit>) -> MenuEvent {
        match event {
            Event::Scroll(signal) => self.observe_scroll(state, *signal),
            Event::Mouse(mouse) => {
                if mouse.is_left_press()
                    && let Some((id, HitRegion::Button, data)) = hit
                    && id == self.hit_id
                {
                    return self.click_entry(data as usize, state);
                }
                self.dispatch_to_entries(event, state, hit)
            }
            Event::Resize { .. } => MenuEvent::Ignored,
        }
    }

    fn click_entry(&self, index: usize, state: &mut MenuState) -> MenuEvent {
        let Some(entry) = self.get(index) else {
            return MenuEvent::Ignored;
        };
        if entry.config().disabled {
            dropbar_core::debug!(index, "menu click on disabled entry ignored");
            return MenuEvent::Ignored;
        }
        let open = MenuParent::new(&self.config, state).toggle_item_show(index);
        MenuEvent::Toggled { index, open }
    }

    fn dispatch_to_entries(&mut self, event: &Event, state: &mut MenuState, hit: Option<Hit>) -> MenuEvent {
        let menu_hit_id = self.hit_id;
        let active_color = self.config.active_color;
        let config = &self.config;
        for (index, slot) in self.entries.iter_mut().enumerate() {
            let Some(entry) = slot.as_deref_mut() else {
                continue;
            };
            let props = InjectedProps {
                show_popup: state.is_open(index),
                order_key: index,
                active_color,
                hit_id: child_hit_id(menu_hit_id, index),
            };
            let mut parent = MenuParent::new(config, state);
            if entry.handle_event(event, hit, &props, &mut parent) {
                return MenuEvent::Entry(index);
            }
        }
        MenuEvent::Ignored
    }

    /// Pair every filled slot with its label, props and the shared parent.
    pub fn inject<'p, 's>(&'p self, parent: &'p MenuParent<'s>) -> Vec<InjectedEntry<'p, 's>> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_deref().map(|entry| (index, entry)))
            .map(|(index, entry)| {
                let props = InjectedProps {
                    show_popup: parent.is_open(index),
                    order_key: index,
                    active_color: self.config.active_color,
                    hit_id: child_hit_id(self.hit_id, index),
                };
                let label = resolve_title(&entry.config(), parent.title_override(index));
                InjectedEntry::new(entry, label, props, parent)
            })
            .collect()
    }

    /// Class tags for the current state.
    #[must_use]
    pub fn class_names(&self, state: &MenuState) -> MenuClassNames {
        let mut root = vec![ROOT_CLASS];
        let mut bar = vec![BAR_CLASS];
        if state.is_opened() {
            bar.push("opened");
        }
        if !self.config.class_name.is_empty() {
            root.push(&self.config.class_name);
            bar.push(&self.config.class_name);
        }
        if state.is_fixed() {
            root.push("scroll-fixed");
        }
        MenuClassNames {
            root: root.join(" "),
            bar: bar.join(" "),
        }
    }

    fn bar_style(&self, state: &MenuState) -> Style {
        let mut style = self.config.style;
        if state.is_opened() {
            style = style.patch(self.config.opened_style);
        }
        if state.is_fixed() {
            style = style.patch(self.config.fixed_style);
        }
        style
    }

    fn icon_name<'a>(&'a self, entry: &EntryConfig<'_>) -> &'a str {
        if !self.config.title_icon.is_empty() {
            return &self.config.title_icon;
        }
        match entry.direction {
            Direction::Up => "arrow-up",
            Direction::Down => "down-arrow",
        }
    }

    fn render_segment(&self, entry: &InjectedEntry<'_, '_>, segment: Rect, base: Style, frame: &mut Frame) {
        let config = entry.config();
        let mut style = base;
        if entry.props().show_popup {
            style = style.fg(self.config.active_color);
        }
        if config.disabled {
            style = style.fg(PackedRgba::GRAY).dim();
        }

        let icon = Icon::new(self.icon_name(config)).style(style);
        let icon_width = icon.width();
        let gap = u16::from(icon_width > 0);
        let max_label = segment.width.saturating_sub(icon_width + gap);
        let label = truncate_to_width(entry.label(), usize::from(max_label));
        let label_width = dropbar_render::display_width(label) as u16;
        let content_width = if label.is_empty() {
            icon_width
        } else {
            label_width + gap + icon_width
        };
        let x = segment.x + segment.width.saturating_sub(content_width) / 2;

        let mut cursor = draw_text_span(frame, x, segment.y, label, style, segment.right());
        if !label.is_empty() {
            cursor = cursor.saturating_add(gap);
        }
        if icon_width > 0 && cursor < segment.right() {
            icon.render(Rect::new(cursor, segment.y, 1, 1), frame);
        }

        frame.register_hit(segment, self.hit_id, HitRegion::Button, entry.index() as u64);
    }
}

/// Hit id reserved for child `index` of a menu using `menu_id`.
#[must_use]
pub fn child_hit_id(menu_id: HitId, index: usize) -> HitId {
    let offset = u32::try_from(index).unwrap_or(u32::MAX).saturating_add(1);
    HitId::new(menu_id.id().saturating_add(offset))
}

impl StatefulWidget for Menu {
    type State = MenuState;

    fn render(&self, area: Rect, frame: &mut Frame, state: &mut Self::State) {
        let _span = dropbar_core::debug_span!(
            "widget_render",
            widget = "Menu",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        let bar = area.top_rows(1);
        state.bar_area = bar;
        state.root_area = frame.bounds();
        if bar.is_empty() {
            return;
        }

        let base = self.bar_style(state);
        frame.buffer.fill(bar, Cell::from_char(' '));
        set_style_area(frame, bar, base);

        let parent = MenuParent::new(&self.config, state);
        let injected = self.inject(&parent);
        let segments = bar.split_columns(injected.len());

        for (entry, segment) in injected.iter().zip(&segments) {
            self.render_segment(entry, *segment, base, frame);
        }
        for (entry, segment) in injected.iter().zip(segments) {
            entry.render(segment, frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropbar_core::event::MouseEvent;

    fn options() -> Vec<MenuOption> {
        vec![
            MenuOption::new("all", "All products"),
            MenuOption::new("new", "New products"),
        ]
    }

    fn abc_menu() -> Menu {
        Menu::new(MenuConfig::default())
            .entry(MenuItem::new(options()).title("A"))
            .entry(MenuItem::new(options()).title("B"))
            .entry(MenuItem::new(options()).title("C"))
    }

    fn render(menu: &Menu, state: &mut MenuState) -> Frame {
        let mut frame = Frame::with_hit_grid(30, 6);
        menu.render(Rect::new(0, 0, 30, 1), &mut frame, state);
        frame
    }

    fn click(menu: &mut Menu, state: &mut MenuState, x: u16, y: u16) -> MenuEvent {
        let frame = render(menu, state);
        let hit = frame.hit_test(x, y);
        menu.handle_event(&Event::Mouse(MouseEvent::left_click(x, y)), state, hit)
    }

    /// Click the middle of segment `index` of a 3-entry, 30-wide bar.
    fn click_entry(menu: &mut Menu, state: &mut MenuState, index: u16) -> MenuEvent {
        click(menu, state, index * 10 + 5, 0)
    }

    #[test]
    fn clicks_follow_accordion_semantics() {
        let mut menu = abc_menu();
        let mut state = MenuState::new();

        assert_eq!(
            click_entry(&mut menu, &mut state, 1),
            MenuEvent::Toggled { index: 1, open: true }
        );
        assert_eq!(state.open_flags().snapshot(3), vec![false, true, false]);

        click_entry(&mut menu, &mut state, 1);
        assert_eq!(state.open_flags().snapshot(3), vec![false, false, false]);

        click_entry(&mut menu, &mut state, 0);
        click_entry(&mut menu, &mut state, 2);
        assert_eq!(state.open_flags().snapshot(3), vec![false, false, true]);
    }

    #[test]
    fn disabled_entry_click_is_ignored() {
        let mut menu = Menu::new(MenuConfig::default())
            .entry(MenuItem::new(options()).title("A"))
            .entry(MenuItem::new(options()).title("B").disabled(true));
        let mut state = MenuState::new();
        let frame = render(&menu, &mut state);
        let hit = frame.hit_test(20, 0);
        assert_eq!(hit, Some((DEFAULT_HIT_ID, HitRegion::Button, 1)));
        let outcome = menu.handle_event(&Event::Mouse(MouseEvent::left_click(20, 0)), &mut state, hit);
        assert_eq!(outcome, MenuEvent::Ignored);
        assert!(!state.is_opened());
    }

    #[test]
    fn labels_resolve_in_bar() {
        let menu = Menu::new(MenuConfig::default())
            .entry(MenuItem::new(options()).value("new"))
            .entry(MenuItem::new(options()).title("Sort"));
        let mut state = MenuState::new();
        let frame = render(&menu, &mut state);
        let row = frame.buffer.row_text(0);
        assert!(row.contains("New products"), "{row:?}");
        assert!(row.contains("Sort ▾"), "{row:?}");
    }

    #[test]
    fn selection_becomes_label() {
        let mut menu = Menu::new(MenuConfig::default())
            .entry(MenuItem::new(options()).value("all"));
        let mut state = MenuState::new();
        click(&mut menu, &mut state, 10, 0);
        assert!(state.is_open(0));

        // Option rows start right below the bar.
        let outcome = click(&mut menu, &mut state, 3, 2);
        assert_eq!(outcome, MenuEvent::Entry(0));
        assert!(!state.is_opened());
        assert_eq!(state.title_override(0), Some("New products"));

        let frame = render(&menu, &mut state);
        assert!(frame.buffer.row_text(0).contains("New products"));
        assert!(frame.buffer.row_text(2).trim().is_empty());
    }

    #[test]
    fn open_segment_uses_active_color() {
        let red = PackedRgba::rgb(200, 0, 0);
        let mut menu = Menu::new(MenuConfig::default().with_active_color(red))
            .entry(MenuItem::new(options()).title("A"));
        let mut state = MenuState::new();
        click(&mut menu, &mut state, 10, 0);
        let frame = render(&menu, &mut state);
        let x = frame.buffer.row_text(0).find('A').unwrap() as u16;
        assert_eq!(frame.buffer.get(x, 0).unwrap().fg, red);
    }

    #[test]
    fn title_icon_overrides_direction_arrow() {
        let menu = Menu::new(MenuConfig::default().with_title_icon("more"))
            .entry(MenuItem::new(options()).title("A"))
            .entry(MenuItem::new(options()).title("B").direction(Direction::Up));
        let mut state = MenuState::new();
        let row = render(&menu, &mut state).buffer.row_text(0);
        assert_eq!(row.matches('…').count(), 2, "{row:?}");

        let menu = Menu::new(MenuConfig::default())
            .entry(MenuItem::new(options()).title("B").direction(Direction::Up));
        let row = render(&menu, &mut state).buffer.row_text(0);
        assert!(row.contains("B ▴"), "{row:?}");
    }

    #[test]
    fn empty_slots_keep_positions() {
        let mut menu = Menu::new(MenuConfig::default());
        menu.push(MenuItem::new(options()).title("A"));
        menu.push_empty();
        menu.push(MenuItem::new(options()).title("C"));
        let mut state = MenuState::new();

        // Two visible segments of 15 columns; the second is entry 2.
        let frame = render(&menu, &mut state);
        assert_eq!(frame.hit_test(20, 0), Some((DEFAULT_HIT_ID, HitRegion::Button, 2)));
        click(&mut menu, &mut state, 20, 0);
        assert_eq!(state.open_flags().snapshot(3), vec![false, false, true]);
    }

    #[test]
    fn set_entries_resets_state() {
        let mut menu = abc_menu();
        let mut state = MenuState::new();
        click_entry(&mut menu, &mut state, 0);
        MenuParent::new(&MenuConfig::default(), &mut state).update_title("x", 1);

        let replacement: Box<dyn MenuEntry> = Box::new(MenuItem::new(options()));
        menu.set_entries(vec![Some(replacement)], &mut state);
        assert_eq!(menu.len(), 1);
        assert!(!state.is_opened());
        assert_eq!(state.title_override(1), None);
    }

    #[test]
    fn fixed_threshold_boundaries() {
        let mut host = ScrollHost::window();
        let menu = Menu::new(MenuConfig::default().with_scroll_fixed(true));
        let mut state = MenuState::new();
        menu.mount(&mut state, &host);
        assert!(state.is_listening());

        host.scroll_to(30);
        assert_eq!(menu.poll_scroll(&mut state), MenuEvent::Ignored);
        assert!(!state.is_fixed());
        host.scroll_to(31);
        assert_eq!(menu.poll_scroll(&mut state), MenuEvent::FixedChanged(FixedMode::Fixed));
        host.scroll_to(400);
        assert_eq!(menu.poll_scroll(&mut state), MenuEvent::Ignored);
        host.scroll_to(-20);
        assert_eq!(menu.poll_scroll(&mut state), MenuEvent::FixedChanged(FixedMode::Free));
    }

    #[test]
    fn custom_threshold_via_events() {
        let host = ScrollHost::window();
        let mut menu = Menu::new(MenuConfig::default().with_scroll_fixed(50u32));
        let mut state = MenuState::new();
        menu.mount(&mut state, &host);

        let mut send = |offset| {
            menu.handle_event(&Event::Scroll(ScrollSignal::page(offset)), &mut state, None)
        };
        assert_eq!(send(49), MenuEvent::Ignored);
        assert_eq!(send(50), MenuEvent::Ignored);
        assert_eq!(send(51), MenuEvent::FixedChanged(FixedMode::Fixed));
    }

    #[test]
    fn disabled_scroll_fixed_never_listens() {
        let host = ScrollHost::window();
        let mut menu = Menu::default();
        let mut state = MenuState::new();
        menu.mount(&mut state, &host);
        assert!(!state.is_listening());
        assert_eq!(host.listener_count(), 0);
        let outcome = menu.handle_event(&Event::Scroll(ScrollSignal::page(500)), &mut state, None);
        assert_eq!(outcome, MenuEvent::Ignored);
        assert!(!state.is_fixed());
    }

    #[test]
    fn unmount_releases_subscription() {
        let mut host = ScrollHost::window();
        let mut menu = Menu::new(MenuConfig::default().with_scroll_fixed(true));
        let mut state = MenuState::new();
        menu.mount(&mut state, &host);
        assert_eq!(host.listener_count(), 1);

        state.unmount();
        assert_eq!(host.listener_count(), 0);
        assert_eq!(host.scroll_to(100), 0);
        assert_eq!(menu.poll_scroll(&mut state), MenuEvent::Ignored);
        let outcome = menu.handle_event(&Event::Scroll(ScrollSignal::page(100)), &mut state, None);
        assert_eq!(outcome, MenuEvent::Ignored);
        assert!(!state.is_fixed());

        state.unmount();
        assert!(!state.is_mounted());
    }

    #[test]
    fn unmount_without_mount_is_noop() {
        let mut state = MenuState::new();
        state.unmount();
        assert!(!state.is_listening());
    }

    #[test]
    fn dropping_state_releases_subscription() {
        let host = ScrollHost::window();
        let menu = Menu::new(MenuConfig::default().with_scroll_fixed(true));
        {
            let mut state = MenuState::new();
            menu.mount(&mut state, &host);
            assert_eq!(host.listener_count(), 1);
        }
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn set_scroll_fixed_resubscribes() {
        let mut host = ScrollHost::window();
        let mut menu = Menu::default();
        let mut state = MenuState::new();
        menu.mount(&mut state, &host);
        assert!(!state.is_listening());

        menu.set_scroll_fixed(10u32, &mut state, &host);
        assert!(state.is_listening());
        host.scroll_to(11);
        assert_eq!(menu.poll_scroll(&mut state), MenuEvent::FixedChanged(FixedMode::Fixed));

        let outcome = menu.set_scroll_fixed(false, &mut state, &host);
        assert_eq!(outcome, MenuEvent::FixedChanged(FixedMode::Free));
        assert!(!state.is_listening());
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn set_scroll_fixed_before_mount_only_configures() {
        let host = ScrollHost::window();
        let mut menu = Menu::default();
        let mut state = MenuState::new();
        menu.set_scroll_fixed(true, &mut state, &host);
        assert!(!state.is_listening());
        menu.mount(&mut state, &host);
        assert!(state.is_listening());
    }

    #[test]
    fn fixed_mode_restyles_bar() {
        let menu = Menu::new(MenuConfig::default().with_scroll_fixed(ScrollFixed::Threshold(0)))
            .entry(MenuItem::new(options()).title("A"));
        let host = ScrollHost::window();
        let mut state = MenuState::new();
        menu.mount(&mut state, &host);
        menu.observe_scroll(&mut state, ScrollSignal::page(1));
        assert!(state.is_fixed());

        let frame = render(&menu, &mut state);
        let cell = frame.buffer.get(0, 0).unwrap();
        assert!(cell.attrs.contains(dropbar_render::cell::StyleFlags::BOLD));
    }

    #[test]
    fn class_names_track_state() {
        let mut menu = Menu::new(MenuConfig::default().with_class_name("shop"))
            .entry(MenuItem::new(options()).title("A"));
        let mut state = MenuState::new();
        let names = menu.class_names(&state);
        assert_eq!(names.root, "dropbar-menu shop");
        assert_eq!(names.bar, "dropbar-menu__bar shop");

        click(&mut menu, &mut state, 10, 0);
        assert_eq!(menu.class_names(&state).bar, "dropbar-menu__bar opened shop");
    }

    #[test]
    fn inject_skips_empty_slots_and_attaches_props() {
        let mut menu = Menu::default().hit_id(HitId::new(10));
        menu.push_empty();
        menu.push(MenuItem::new(options()).value("new"));
        let mut state = MenuState::new();
        let config = MenuConfig::default();
        let mut parent = MenuParent::new(&config, &mut state);
        parent.toggle_item_show(1);

        let injected = menu.inject(&parent);
        assert_eq!(injected.len(), 1);
        let entry = &injected[0];
        assert_eq!(entry.index(), 1);
        assert_eq!(entry.label(), "New products");
        assert!(entry.props().show_popup);
        assert_eq!(entry.props().hit_id, HitId::new(12));
        assert_eq!(entry.props().active_color, PackedRgba::rgb(0xF2, 0x27, 0x0C));
    }

    #[test]
    fn zero_height_area_draws_nothing() {
        let menu = abc_menu();
        let mut state = MenuState::new();
        let mut frame = Frame::with_hit_grid(30, 2);
        menu.render(Rect::new(0, 0, 30, 0), &mut frame, &mut state);
        assert_eq!(frame.hit_test(5, 0), None);
    }

    #[test]
    fn child_hit_ids_follow_menu_id() {
        assert_eq!(child_hit_id(HitId::new(1), 0), HitId::new(2));
        assert_eq!(child_hit_id(HitId::new(u32::MAX), 3), HitId::new(u32::MAX));
    }
}
