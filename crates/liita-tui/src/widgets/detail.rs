//! Entry detail popup: every `predicate object` pair of the selected lemma.
//!
//! Opened with `Enter` on a result row; `↑` / `↓` scroll, `o` opens the lemma
//! in the browser, `Escape` closes.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use crate::widgets::centered_rect;
use liita_core::lookup::last_segment;
use liita_core::{PredicateRow, TermKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

/// Rows still loading, loaded, or failed with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailRows {
    Loading,
    Loaded(Vec<PredicateRow>),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct DetailState {
    pub subject: String,
    /// Written forms of the lemma, for the title.
    pub forms: String,
    pub rows: DetailRows,
    pub scroll: u16,
}

impl DetailState {
    pub fn new(subject: impl Into<String>, forms: impl Into<String>) -> Self {
        Self { subject: subject.into(), forms: forms.into(), rows: DetailRows::Loading, scroll: 0 }
    }

    /// Returns `true` when the popup should close.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Escape | AppEvent::Quit => return true,
            AppEvent::Nav(Direction::Up) => self.scroll = self.scroll.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => {
                if let DetailRows::Loaded(rows) = &self.rows {
                    if (self.scroll as usize) + 1 < rows.len() {
                        self.scroll += 1;
                    }
                }
            }
            AppEvent::ScrollToTop => self.scroll = 0,
            _ => {}
        }
        false
    }
}

/// Short form of a predicate IRI: the fragment or last path segment.
fn predicate_label(predicate: &str) -> &str {
    match predicate.rsplit_once('#') {
        Some((_, fragment)) if !fragment.is_empty() => fragment,
        _ => last_segment(predicate),
    }
}

pub struct DetailPopup<'a> {
    state: &'a DetailState,
    theme: &'a Theme,
}

impl<'a> DetailPopup<'a> {
    pub fn new(state: &'a DetailState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for DetailPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(area.width.saturating_sub(8).max(40), area.height.saturating_sub(4), area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(format!(" {} ", self.state.forms))
            .title_bottom(Line::from(Span::styled(format!(" {} ", self.state.subject), self.theme.uri)))
            .border_style(self.theme.border_focused);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let lines: Vec<Line> = match &self.state.rows {
            DetailRows::Loading => vec![Line::from(Span::styled("loading…", self.theme.status_busy))],
            DetailRows::Failed(message) => {
                vec![Line::from(Span::styled(message.clone(), self.theme.status_error))]
            }
            DetailRows::Loaded(rows) if rows.is_empty() => {
                vec![Line::from(Span::styled("no statements", self.theme.placeholder))]
            }
            DetailRows::Loaded(rows) => rows
                .iter()
                .map(|row| {
                    let object = match row.object.kind {
                        TermKind::Uri => Span::styled(row.object.value.clone(), self.theme.uri),
                        TermKind::Bnode => {
                            Span::styled(format!("_:{}", row.object.value), self.theme.placeholder)
                        }
                        TermKind::Literal | TermKind::TypedLiteral => match &row.object.lang {
                            Some(lang) => Span::raw(format!("\"{}\"@{lang}", row.object.value)),
                            None => Span::raw(format!("\"{}\"", row.object.value)),
                        },
                    };
                    Line::from(vec![
                        Span::styled(
                            format!("  {:<24}", predicate_label(&row.predicate)),
                            self.theme.table_header,
                        ),
                        object,
                    ])
                })
                .collect(),
        };

        Paragraph::new(lines).scroll((self.state.scroll, 0)).render(inner, buf);
    }
}
