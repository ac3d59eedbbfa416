//! Option picker: centred popup listing the values of one filter category.
//!
//! # Navigation
//! - typing narrows the list (case-insensitive match on label or URI)
//! - `↑` / `↓` move the cursor
//! - `Enter` picks the highlighted option, `Escape` closes without change

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use crate::widgets::{centered_rect, text_input::TextInput};
use liita_core::{FilterCategory, FilterField, OptionRecord};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Clear, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

const POPUP_WIDTH: u16 = 60;
const POPUP_HEIGHT: u16 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerAction {
    None,
    Choose(OptionRecord),
    Cancel,
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct OptionPickerState {
    pub field: FilterField,
    pub category: FilterCategory,
    /// `None` until the option list has arrived.
    options: Option<Vec<OptionRecord>>,
    pub filter: TextInput,
    /// Index into [`visible`](Self::visible).
    pub cursor: usize,
}

impl OptionPickerState {
    pub fn new(field: FilterField, category: FilterCategory, options: Option<Vec<OptionRecord>>) -> Self {
        Self { field, category, options, filter: TextInput::default(), cursor: 0 }
    }

    pub fn is_loading(&self) -> bool {
        self.options.is_none()
    }

    pub fn set_options(&mut self, options: Vec<OptionRecord>) {
        self.options = Some(options);
        self.clamp_cursor();
    }

    /// Options matching the filter text, in server order.
    pub fn visible(&self) -> Vec<&OptionRecord> {
        let needle = self.filter.as_str().to_lowercase();
        self.options
            .iter()
            .flatten()
            .filter(|option| {
                needle.is_empty()
                    || option.label.to_lowercase().contains(&needle)
                    || option.value.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn handle(&mut self, event: &AppEvent) -> PickerAction {
        match event {
            AppEvent::Escape => PickerAction::Cancel,
            AppEvent::Enter => match self.visible().get(self.cursor) {
                Some(option) => {
                    tracing::debug!(category = %self.category, value = %option.value, "picker: chosen");
                    PickerAction::Choose((*option).clone())
                }
                None => PickerAction::None,
            },
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                PickerAction::None
            }
            AppEvent::Nav(Direction::Down) => {
                if self.cursor + 1 < self.visible().len() {
                    self.cursor += 1;
                }
                PickerAction::None
            }
            other => {
                if self.filter.handle(other) {
                    self.cursor = 0;
                }
                PickerAction::None
            }
        }
    }

    fn clamp_cursor(&mut self) {
        let max = self.visible().len().saturating_sub(1);
        self.cursor = self.cursor.min(max);
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct OptionPicker<'a> {
    state: &'a OptionPickerState,
    theme: &'a Theme,
}

impl<'a> OptionPicker<'a> {
    pub fn new(state: &'a OptionPickerState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    fn layout(area: Rect) -> (Rect, Rect, Rect) {
        let popup = centered_rect(POPUP_WIDTH, POPUP_HEIGHT, area);
        let inner = Block::bordered().inner(popup);
        let rows = Layout::default()
            .direction(LayoutDir::Vertical)
            .constraints([Constraint::Length(1), Constraint::Fill(1)])
            .split(inner);
        (popup, rows[0], rows[1])
    }

    /// Terminal position of the cursor in the filter line.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let (_, filter_row, _) = Self::layout(area);
        (self.state.filter.cursor_col(filter_row, 2), filter_row.y)
    }
}

impl Widget for OptionPicker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (popup, filter_row, list_area) = Self::layout(area);
        Clear.render(popup, buf);

        Block::bordered()
            .title(format!(" {} (Enter pick, Esc cancel) ", self.state.category.title()))
            .border_style(self.theme.border_focused)
            .render(popup, buf);

        Paragraph::new(Line::from(vec![
            Span::styled("> ", self.theme.border_focused),
            Span::raw(self.state.filter.as_str()),
        ]))
        .render(filter_row, buf);

        if self.state.is_loading() {
            Paragraph::new(Span::styled("loading…", self.theme.status_busy)).render(list_area, buf);
            return;
        }

        let visible = self.state.visible();
        if visible.is_empty() {
            Paragraph::new(Span::styled("no matching values", self.theme.placeholder))
                .render(list_area, buf);
            return;
        }

        let items: Vec<ListItem> = visible
            .iter()
            .map(|option| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{:<24} ", option.label)),
                    Span::styled(option.value.clone(), self.theme.placeholder),
                ]))
            })
            .collect();

        let list = List::new(items).highlight_style(self.theme.table_selected);
        let mut list_state = ListState::default().with_selected(Some(self.state.cursor));
        StatefulWidget::render(list, list_area, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
