#![forbid(unsafe_code)]

//! A concrete bar entry: a list of options in a popup.
//!
//! The popup covers the part of the parent area on the entry's side of the
//! bar. The whole region is an overlay; the option rows sit next to the bar.
//! Hit regions use the child's injected hit id:
//!
//! - `HitRegion::Overlay` for the overlay
//! - `HitRegion::Content` for option rows, with the option index as data

use dropbar_core::event::{Event, MouseEventKind};
use dropbar_core::geometry::Rect;
use dropbar_render::cell::{Cell, PackedRgba};
use dropbar_render::frame::{Frame, Hit, HitRegion};
use dropbar_style::Style;

use super::entry::{Direction, EntryConfig, InjectedProps, MenuEntry, MenuOption, MenuParent};
use crate::icon::Icon;
use crate::{Widget, draw_text_span, set_style_area, truncate_to_width};

/// A dropdown entry with a fixed option list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuItem {
    title: Option<String>,
    value: Option<String>,
    options: Vec<MenuOption>,
    disabled: bool,
    direction: Direction,
    popup_style: Style,
    changed: Option<String>,
}

impl MenuItem {
    #[must_use]
    pub fn new(options: Vec<MenuOption>) -> Self {
        Self {
            options,
            popup_style: Style::new().bg(PackedRgba::BLACK),
            ..Self::default()
        }
    }

    /// Static title; takes precedence over the selected option's text.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Initially selected value.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn popup_style(mut self, style: Style) -> Self {
        self.popup_style = style;
        self
    }

    /// Currently selected value.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.value.as_deref()
    }

    #[must_use]
    pub fn options(&self) -> &[MenuOption] {
        &self.options
    }

    /// Take the value chosen since the last call, if any.
    pub fn take_change(&mut self) -> Option<String> {
        self.changed.take()
    }

    /// The whole region the popup covers: everything in `parent` on this
    /// entry's side of the bar.
    fn overlay_area(&self, parent: Rect, bar: Rect) -> Rect {
        let region = match self.direction {
            Direction::Down => {
                let top = bar.bottom().max(parent.y);
                Rect::new(parent.x, top, parent.width, parent.bottom().saturating_sub(top))
            }
            Direction::Up => {
                let bottom = bar.y.min(parent.bottom());
                Rect::new(parent.x, parent.y, parent.width, bottom.saturating_sub(parent.y))
            }
        };
        region.intersection(&parent)
    }

    /// Option rows: the rows of `overlay` nearest the bar.
    fn options_area(&self, overlay: Rect) -> Rect {
        let rows = u16::try_from(self.options.len())
            .unwrap_or(u16::MAX)
            .min(overlay.height);
        match self.direction {
            Direction::Down => Rect::new(overlay.x, overlay.y, overlay.width, rows),
            Direction::Up => Rect::new(overlay.x, overlay.bottom() - rows, overlay.width, rows),
        }
    }

    fn select(&mut self, index: usize, props: &InjectedProps, parent: &mut MenuParent<'_>) {
        let Some(option) = self.options.get(index) else {
            return;
        };
        let (value, text) = (option.value.clone(), option.text.clone());
        dropbar_core::debug!(entry = props.order_key, value = %value, "menu option selected");
        if self.value.as_deref() != Some(value.as_str()) {
            self.changed = Some(value.clone());
        }
        self.value = Some(value);
        parent.update_title(text, props.order_key);
        parent.hide_item_show(props.order_key);
    }
}

impl MenuEntry for MenuItem {
    fn config(&self) -> EntryConfig<'_> {
        EntryConfig {
            disabled: self.disabled,
            title: self.title.as_deref(),
            value: self.value.as_deref(),
            direction: self.direction,
            options: &self.options,
        }
    }

    fn render(&self, _area: Rect, frame: &mut Frame, props: &InjectedProps, parent: &MenuParent<'_>) {
        if !props.show_popup {
            return;
        }
        let overlay = self.overlay_area(parent.parent(), parent.bar());
        if overlay.is_empty() {
            return;
        }
        frame.register_hit(overlay, props.hit_id, HitRegion::Overlay, 0);

        let rows = self.options_area(overlay);
        frame.buffer.fill(rows, Cell::from_char(' '));
        set_style_area(frame, rows, self.popup_style);

        let check = Icon::new("check");
        let text_max_x = rows.right().saturating_sub(check.width() + 1);
        for (i, option) in self.options.iter().enumerate().take(usize::from(rows.height)) {
            let y = rows.y + i as u16;
            let row = Rect::new(rows.x, y, rows.width, 1);
            let active = self.value.as_deref() == Some(option.value.as_str());
            let style = if active {
                self.popup_style.fg(props.active_color)
            } else {
                self.popup_style
            };
            let text = truncate_to_width(&option.text, usize::from(rows.width.saturating_sub(3)));
            draw_text_span(frame, row.x.saturating_add(1), y, text, style, text_max_x);
            if active && rows.width > 2 {
                check
                    .style(style)
                    .render(Rect::new(text_max_x, y, 1, 1), frame);
            }
            frame.register_hit(row, props.hit_id, HitRegion::Content, i as u64);
        }
    }

    fn handle_event(
        &mut self,
        event: &Event,
        hit: Option<Hit>,
        props: &InjectedProps,
        parent: &mut MenuParent<'_>,
    ) -> bool {
        if !props.show_popup {
            return false;
        }
        let Event::Mouse(mouse) = event else {
            return false;
        };
        if matches!(mouse.kind, MouseEventKind::ScrollUp | MouseEventKind::ScrollDown) {
            return parent.lock_scroll();
        }
        if !mouse.is_left_press() {
            return false;
        }
        match hit {
            Some((id, HitRegion::Content, data)) if id == props.hit_id => {
                self.select(data as usize, props, parent);
                true
            }
            Some((id, HitRegion::Overlay, _)) if id == props.hit_id => {
                if parent.close_on_click_overlay() {
                    parent.hide_item_show(props.order_key);
                }
                true
            }
            _ => false,
        }
    }
}
