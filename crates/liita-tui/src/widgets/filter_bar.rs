//! Filter bar: the lemma pattern box and the three category selects across
//! the top of the screen.
//!
//! # Editing
//!
//! - On the lemma box, `Char` / `Backspace` / `←` `→` edit the pattern and
//!   `Enter` searches immediately instead of waiting for the debounce.
//! - On a select, `Enter` opens the option picker, typing a character opens
//!   it pre-filtered, and `Backspace` clears the selection.
//! - `Tab` / `Shift+Tab` move between boxes (handled by the app shell via
//!   [`FilterBarState::next_field`] / [`FilterBarState::prev_field`]).

use crate::event::AppEvent;
use crate::theme::Theme;
use crate::widgets::text_input::TextInput;
use liita_core::{check_pattern, FilterField, FilterSet, OptionRecord};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};
use std::rc::Rc;

/// Boxes in on-screen order.
pub const FIELDS: [FilterField; 4] = [
    FilterField::Lemma,
    FilterField::InflectionType,
    FilterField::Pos,
    FilterField::Gender,
];

/// What the app shell should do after the bar handled an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    None,
    /// A filter value changed; schedule a debounced search.
    Changed,
    /// Search now, skipping the debounce.
    SearchNow,
    /// Open the option picker for a select, optionally seeded with a typed char.
    OpenPicker { field: FilterField, seed: Option<char> },
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FilterBarState {
    /// Box that receives input while the bar is focused.
    pub active: FilterField,
    pub lemma: TextInput,
    inflection_type: Option<OptionRecord>,
    pos: Option<OptionRecord>,
    gender: Option<OptionRecord>,
}

impl Default for FilterBarState {
    fn default() -> Self {
        Self {
            active: FilterField::Lemma,
            lemma: TextInput::default(),
            inflection_type: None,
            pos: None,
            gender: None,
        }
    }
}

impl FilterBarState {
    /// Pre-fill from an existing filter set, labelling selections through
    /// the lookup tables.
    pub fn from_filters(filters: &FilterSet) -> Self {
        let mut state = Self::default();
        if let Some(lemma) = filters.get(FilterField::Lemma) {
            state.lemma = TextInput::new(lemma);
        }
        for field in FIELDS {
            let (Some(category), Some(value)) = (field.category(), filters.get(field)) else {
                continue;
            };
            state.select(
                field,
                Some(OptionRecord { value: value.to_string(), label: category.label(value).to_string() }),
            );
        }
        state
    }

    pub fn selection(&self, field: FilterField) -> Option<&OptionRecord> {
        match field {
            FilterField::InflectionType => self.inflection_type.as_ref(),
            FilterField::Pos => self.pos.as_ref(),
            FilterField::Gender => self.gender.as_ref(),
            FilterField::Lemma => None,
        }
    }

    /// Set or clear a select. Ignored for the lemma box.
    pub fn select(&mut self, field: FilterField, option: Option<OptionRecord>) {
        match field {
            FilterField::InflectionType => self.inflection_type = option,
            FilterField::Pos => self.pos = option,
            FilterField::Gender => self.gender = option,
            FilterField::Lemma => {}
        }
    }

    /// Current filters. Blank inputs are absent.
    pub fn to_filter_set(&self) -> FilterSet {
        let mut filters = FilterSet::new();
        filters.set(FilterField::Lemma, Some(self.lemma.as_str().to_string()));
        for field in FIELDS {
            if let Some(option) = self.selection(field) {
                filters.set(field, Some(option.value.clone()));
            }
        }
        filters
    }

    pub fn clear(&mut self) {
        self.lemma.clear();
        self.inflection_type = None;
        self.pos = None;
        self.gender = None;
    }

    /// Local compile error for the lemma pattern, if any. Advisory only.
    pub fn pattern_warning(&self) -> Option<String> {
        if self.lemma.as_str().trim().is_empty() {
            return None;
        }
        check_pattern(self.lemma.as_str()).err().map(|err| {
            // regex errors are multi-line; the last line names the problem
            err.to_string().lines().last().unwrap_or_default().trim().to_string()
        })
    }

    /// Advance to the next box. Returns `false` when already on the last one.
    pub fn next_field(&mut self) -> bool {
        let idx = index_of(self.active);
        match FIELDS.get(idx + 1) {
            Some(next) => {
                self.active = *next;
                true
            }
            None => false,
        }
    }

    /// Move to the previous box. Returns `false` when already on the first one.
    pub fn prev_field(&mut self) -> bool {
        match index_of(self.active).checked_sub(1) {
            Some(prev) => {
                self.active = FIELDS[prev];
                true
            }
            None => false,
        }
    }

    pub fn handle(&mut self, event: &AppEvent) -> FilterAction {
        if self.active == FilterField::Lemma {
            return match event {
                AppEvent::Enter => FilterAction::SearchNow,
                other if self.lemma.handle(other) => {
                    tracing::debug!(lemma = %self.lemma.as_str(), "filter: lemma edited");
                    FilterAction::Changed
                }
                _ => FilterAction::None,
            };
        }

        let field = self.active;
        match event {
            AppEvent::Enter => FilterAction::OpenPicker { field, seed: None },
            AppEvent::Char(c) => FilterAction::OpenPicker { field, seed: Some(*c) },
            AppEvent::Backspace if self.selection(field).is_some() => {
                tracing::debug!(field = ?field, "filter: selection cleared");
                self.select(field, None);
                FilterAction::Changed
            }
            _ => FilterAction::None,
        }
    }
}

fn index_of(field: FilterField) -> usize {
    FIELDS.iter().position(|f| *f == field).unwrap_or(0)
}

fn split(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([
            Constraint::Fill(2),
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ])
        .split(area)
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct FilterBar<'a> {
    state: &'a FilterBarState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> FilterBar<'a> {
    pub fn new(state: &'a FilterBarState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }

    /// Absolute terminal position of the text cursor inside the lemma box.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let lemma_box = split(area)[0];
        let inner = Block::bordered().inner(lemma_box);
        (self.state.lemma.cursor_col(inner, 0), inner.y)
    }
}

impl Widget for FilterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let boxes = split(area);
        let warning = self.state.pattern_warning();

        for (field, rect) in FIELDS.into_iter().zip(boxes.iter()) {
            let active = self.focused && self.state.active == field;
            let mut border_style = self.theme.border(active);

            let (title, content) = match field.category() {
                None => {
                    let title = match &warning {
                        Some(_) => " Lemma (regex) ⚠ ".to_string(),
                        None => " Lemma (regex) ".to_string(),
                    };
                    if warning.is_some() {
                        border_style = self.theme.border_warning;
                    }
                    let line = if self.state.lemma.is_empty() && !active {
                        Line::from(Span::styled("press / to type a pattern", self.theme.placeholder))
                    } else {
                        Line::from(self.state.lemma.as_str())
                    };
                    (title, line)
                }
                Some(category) => {
                    let line = match self.state.selection(field) {
                        Some(option) => Line::from(option.label.as_str()),
                        None => Line::from(Span::styled("any", self.theme.placeholder)),
                    };
                    (format!(" {} ", category.title()), line)
                }
            };

            let block = Block::bordered().title(title).border_style(border_style);
            let inner = block.inner(*rect);
            block.render(*rect, buf);
            Paragraph::new(content).render(inner, buf);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const VERB: &str = "http://lila-erc.eu/ontologies/lila/verb";

    fn verb() -> OptionRecord {
        OptionRecord { value: VERB.to_string(), label: "Verb".to_string() }
    }

    #[test]
    fn typing_in_lemma_box_changes_filters() {
        let mut bar = FilterBarState::default();
        assert_eq!(bar.handle(&AppEvent::Char('^')), FilterAction::Changed);
        assert_eq!(bar.handle(&AppEvent::Char('a')), FilterAction::Changed);
        assert_eq!(bar.to_filter_set(), FilterSet::new().with_lemma("^a"));
        assert_eq!(bar.handle(&AppEvent::Enter), FilterAction::SearchNow);
    }

    #[test]
    fn space_in_lemma_box_is_a_pattern() {
        let mut bar = FilterBarState::default();
        assert_eq!(bar.handle(&AppEvent::Char(' ')), FilterAction::Changed);
        assert_eq!(bar.to_filter_set(), FilterSet::new().with_lemma(" "));
        assert!(!bar.to_filter_set().is_empty());
    }

    #[test]
    fn emptied_lemma_box_is_absent() {
        let mut bar = FilterBarState::default();
        bar.handle(&AppEvent::Char('a'));
        bar.handle(&AppEvent::Backspace);
        assert!(bar.to_filter_set().is_empty());
    }

    #[test]
    fn select_keys_open_picker_or_clear() {
        let mut bar = FilterBarState::default();
        assert!(bar.next_field());
        assert!(bar.next_field());
        assert_eq!(bar.active, FilterField::Pos);
        assert_eq!(
            bar.handle(&AppEvent::Char('v')),
            FilterAction::OpenPicker { field: FilterField::Pos, seed: Some('v') }
        );
        assert_eq!(bar.handle(&AppEvent::Backspace), FilterAction::None);

        bar.select(FilterField::Pos, Some(verb()));
        assert_eq!(bar.to_filter_set(), FilterSet::new().with_pos(VERB));
        assert_eq!(bar.handle(&AppEvent::Backspace), FilterAction::Changed);
        assert!(bar.to_filter_set().is_empty());
    }

    #[test]
    fn field_cycling_stops_at_the_ends() {
        let mut bar = FilterBarState::default();
        assert!(!bar.prev_field());
        while bar.next_field() {}
        assert_eq!(bar.active, FilterField::Gender);
        assert!(bar.prev_field());
        assert_eq!(bar.active, FilterField::Pos);
    }

    #[test]
    fn prefill_labels_selections() {
        let filters = FilterSet::new().with_lemma("rosa").with_pos(VERB);
        let bar = FilterBarState::from_filters(&filters);
        assert_eq!(bar.lemma.as_str(), "rosa");
        assert_eq!(bar.selection(FilterField::Pos), Some(&verb()));
        assert_eq!(bar.to_filter_set(), filters);
    }

    #[test]
    fn broken_pattern_warns() {
        let bar = FilterBarState::from_filters(&FilterSet::new().with_lemma("am("));
        assert!(bar.pattern_warning().is_some());
        let bar = FilterBarState::from_filters(&FilterSet::new().with_lemma("^am.+re$"));
        assert_eq!(bar.pattern_warning(), None);
    }

    #[test]
    fn clear_resets_everything() {
        let mut bar = FilterBarState::from_filters(&FilterSet::new().with_lemma("x").with_pos(VERB));
        bar.clear();
        assert!(bar.to_filter_set().is_empty());
    }
}
