//! Results table: the scrollable list of matching lemmas.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move cursor up one row (scrolls view if needed) |
//! | `↓` / `j` | Move cursor down one row |
//! | `PageUp` / `Ctrl+u` | Scroll up one page |
//! | `PageDown` / `Ctrl+d` | Scroll down one page |
//! | `g` / `G` | Jump to first / last row |
//!
//! # Scroll semantics
//!
//! `offset` = index of the first visible record. `cursor` = absolute index
//! into `records`. The cursor is always kept within the visible window;
//! moving it past the edge scrolls.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use liita_core::lookup::last_segment;
use liita_core::ResultRecord;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::Span,
    widgets::{
        Block, Cell as TableCell, Paragraph, Row, Scrollbar, ScrollbarOrientation,
        ScrollbarState, StatefulWidget, Table, Widget,
    },
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

pub struct ResultsTableState {
    records: Vec<ResultRecord>,
    /// Index of the first visible record.
    pub offset: usize,
    /// Absolute index into `records` of the highlighted row.
    pub cursor: usize,
    pub show_lexicons: bool,
    /// Cached from the last render so `handle()` can page by the real height.
    last_height: Cell<usize>,
}

impl ResultsTableState {
    pub fn new(show_lexicons: bool) -> Self {
        Self {
            records: Vec::new(),
            offset: 0,
            cursor: 0,
            show_lexicons,
            last_height: Cell::new(20),
        }
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    /// Replace the contents, resetting scroll and cursor.
    pub fn set_records(&mut self, records: Vec<ResultRecord>) {
        self.records = records;
        self.offset = 0;
        self.cursor = 0;
    }

    pub fn selected(&self) -> Option<&ResultRecord> {
        self.records.get(self.cursor)
    }

    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    /// Scroll just enough to bring the cursor into view.
    fn follow_cursor(&mut self) {
        let height = self.height();
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }
    }

    pub fn handle(&mut self, event: &AppEvent) {
        let total = self.records.len();
        if total == 0 {
            return;
        }
        let last = total - 1;
        let page = self.height();

        match event {
            AppEvent::Nav(Direction::Up) => self.cursor = self.cursor.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => self.cursor = (self.cursor + 1).min(last),
            AppEvent::ScrollUp => {
                self.offset = self.offset.saturating_sub(page);
                self.cursor = self.cursor.saturating_sub(page);
            }
            AppEvent::ScrollDown => {
                self.offset = (self.offset + page).min(total.saturating_sub(page));
                self.cursor = (self.cursor + page).min(last);
            }
            AppEvent::ScrollToTop => self.cursor = 0,
            AppEvent::ScrollToBottom => self.cursor = last,
            _ => return,
        }
        self.follow_cursor();
        tracing::trace!(cursor = self.cursor, offset = self.offset, "results: moved");
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ResultsTable<'a> {
    state: &'a ResultsTableState,
    focused: bool,
    theme: &'a Theme,
    /// Shown in place of rows when there are none.
    empty_message: &'a str,
}

impl<'a> ResultsTable<'a> {
    pub fn new(
        state: &'a ResultsTableState,
        focused: bool,
        theme: &'a Theme,
        empty_message: &'a str,
    ) -> Self {
        Self { state, focused, theme, empty_message }
    }
}

impl Widget for ResultsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let total = self.state.records.len();
        let block = Block::bordered()
            .title(format!(" Results ({total}) "))
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        // One row goes to the header.
        let height = (inner.height as usize).saturating_sub(1);
        // Cache for handle(), safe because draw always runs before handle()
        self.state.last_height.set(height);

        if total == 0 {
            Paragraph::new(Span::styled(self.empty_message, self.theme.placeholder))
                .render(inner, buf);
            return;
        }

        let start = self.state.offset.min(total);
        let end = (start + height).min(total);

        let rows: Vec<Row> = self.state.records[start..end]
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let mut cells = vec![
                    TableCell::from(record.wrs.clone()),
                    TableCell::from(Span::styled(record.pos.clone(), self.theme.pos_style(&record.pos))),
                ];
                if self.state.show_lexicons {
                    let lexicons: Vec<&str> = record.lexicon_list().map(last_segment).collect();
                    cells.push(TableCell::from(lexicons.join(", ")));
                }
                cells.push(TableCell::from(Span::styled(
                    last_segment(&record.subject).to_string(),
                    self.theme.uri,
                )));
                let row = Row::new(cells);
                if start + i == self.state.cursor {
                    row.style(if self.focused { self.theme.table_selected } else { self.theme.placeholder })
                } else {
                    row
                }
            })
            .collect();

        let mut header = vec!["Written representations", "POS"];
        let mut widths = vec![Constraint::Fill(3), Constraint::Length(14)];
        if self.state.show_lexicons {
            header.push("Lexicons");
            widths.push(Constraint::Fill(2));
        }
        header.push("Lemma");
        widths.push(Constraint::Fill(1));

        // Table (fill) + 1-column scrollbar strip inside the borders.
        let table_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect { x: inner.right().saturating_sub(1), width: 1, ..inner };

        Widget::render(
            Table::new(rows, widths)
                .header(Row::new(header).style(self.theme.table_header))
                .column_spacing(2),
            table_area,
            buf,
        );

        if total > height {
            let mut sb_state = ScrollbarState::new(total)
                .position(start)
                .viewport_content_length(height);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                sb_area,
                buf,
                &mut sb_state,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
