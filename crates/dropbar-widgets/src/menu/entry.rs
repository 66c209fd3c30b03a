#![forbid(unsafe_code)]

//! The contract between the bar and its child entries.
//!
//! Children are opaque [`MenuEntry`] trait objects. On every render pass and
//! every event dispatch the bar builds one [`MenuParent`] and hands each child
//! its own [`InjectedProps`]. `MenuParent` is the only way a child can touch
//! shared state: its mutating methods need `&mut self`, and render passes only
//! ever see `&MenuParent`.

use dropbar_core::event::Event;
use dropbar_core::geometry::Rect;
use dropbar_render::cell::PackedRgba;
use dropbar_render::frame::{Frame, Hit, HitId};

use super::MenuState;
use super::config::MenuConfig;
use crate::Widget;

/// Which way an entry's popup opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Above the bar.
    Up,
    /// Below the bar.
    #[default]
    Down,
}

/// One selectable option of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MenuOption {
    pub value: String,
    pub text: String,
}

impl MenuOption {
    #[must_use]
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}

/// What the bar reads from a child each render. Never mutated by the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryConfig<'a> {
    pub disabled: bool,
    pub title: Option<&'a str>,
    pub value: Option<&'a str>,
    pub direction: Direction,
    pub options: &'a [MenuOption],
}

/// Per-child values attached by the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectedProps {
    /// Whether this child's popup should be drawn.
    pub show_popup: bool,
    /// Position of the child in the entry list.
    pub order_key: usize,
    /// Accent color for the active option.
    pub active_color: PackedRgba,
    /// Hit id reserved for this child's popup regions.
    pub hit_id: HitId,
}

/// Capability handed to children: flags plus the operations that change
/// shared menu state.
#[derive(Debug)]
pub struct MenuParent<'a> {
    close_on_click_overlay: bool,
    lock_scroll: bool,
    state: &'a mut MenuState,
}

impl<'a> MenuParent<'a> {
    pub(crate) fn new(config: &MenuConfig, state: &'a mut MenuState) -> Self {
        Self {
            close_on_click_overlay: config.close_on_click_overlay,
            lock_scroll: config.lock_scroll,
            state,
        }
    }

    /// Whether clicking a popup's overlay should close it.
    #[must_use]
    pub const fn close_on_click_overlay(&self) -> bool {
        self.close_on_click_overlay
    }

    /// Whether an open popup should swallow wheel scrolling.
    #[must_use]
    pub const fn lock_scroll(&self) -> bool {
        self.lock_scroll
    }

    /// The area popups may cover, as of the last render.
    #[must_use]
    pub fn parent(&self) -> Rect {
        self.state.root_area
    }

    /// The bar row, as of the last render.
    #[must_use]
    pub fn bar(&self) -> Rect {
        self.state.bar_area
    }

    /// Whether entry `index` is open.
    #[must_use]
    pub fn is_open(&self, index: usize) -> bool {
        self.state.open_flags.is_open(index)
    }

    /// Flip entry `index` and close every other entry.
    ///
    /// Returns the new open state of `index`.
    pub fn toggle_item_show(&mut self, index: usize) -> bool {
        let open = self.state.open_flags.toggle(index);
        dropbar_core::debug!(index, open, "menu entry toggled");
        open
    }

    /// Close entry `index`.
    pub fn hide_item_show(&mut self, index: usize) {
        self.state.open_flags.hide(index);
        dropbar_core::debug!(index, "menu entry hidden");
    }

    /// Record the title text for entry `index`.
    pub fn update_title(&mut self, text: impl Into<String>, index: usize) {
        let text = text.into();
        dropbar_core::debug!(index, title = %text, "menu title updated");
        self.state.title_overrides.set(index, text);
    }

    pub(crate) fn title_override(&self, index: usize) -> Option<&str> {
        self.state.title_overrides.get(index)
    }
}

/// A child entry of the bar.
pub trait MenuEntry {
    /// Current static configuration.
    fn config(&self) -> EntryConfig<'_>;

    /// Draw the entry's popup. `area` is the entry's bar segment.
    ///
    /// Called every pass; implementations draw nothing unless
    /// `props.show_popup` is set.
    fn render(&self, area: Rect, frame: &mut Frame, props: &InjectedProps, parent: &MenuParent<'_>);

    /// Offer an event to the entry. Returns `true` if consumed.
    fn handle_event(
        &mut self,
        _event: &Event,
        _hit: Option<Hit>,
        _props: &InjectedProps,
        _parent: &mut MenuParent<'_>,
    ) -> bool {
        false
    }
}

/// A child paired with its injected props and the shared capability.
pub struct InjectedEntry<'p, 's> {
    entry: &'p dyn MenuEntry,
    config: EntryConfig<'p>,
    label: &'p str,
    props: InjectedProps,
    parent: &'p MenuParent<'s>,
}

impl<'p, 's> InjectedEntry<'p, 's> {
    pub(crate) fn new(
        entry: &'p dyn MenuEntry,
        label: &'p str,
        props: InjectedProps,
        parent: &'p MenuParent<'s>,
    ) -> Self {
        Self {
            entry,
            config: entry.config(),
            label,
            props,
            parent,
        }
    }

    /// Position in the entry list.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.props.order_key
    }

    /// Resolved bar label.
    #[must_use]
    pub const fn label(&self) -> &'p str {
        self.label
    }

    /// The child's configuration, as read for this pass.
    #[must_use]
    pub const fn config(&self) -> &EntryConfig<'p> {
        &self.config
    }

    #[must_use]
    pub const fn props(&self) -> &InjectedProps {
        &self.props
    }
}

impl std::fmt::Debug for InjectedEntry<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InjectedEntry")
            .field("label", &self.label)
            .field("config", &self.config)
            .field("props", &self.props)
            .finish_non_exhaustive()
    }
}

impl Widget for InjectedEntry<'_, '_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        self.entry.render(area, frame, &self.props, self.parent);
    }
}
