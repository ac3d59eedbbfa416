//! Status bar widget: the 1-line strip at the top of the screen.
//!
//! Left: endpoint host. Middle: search state. Right: keybinding hints.

use crate::theme::Theme;
use chrono::{DateTime, Local};
use liita_core::RequestTicket;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Widget,
};

/// What the search pipeline is doing, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// No filters set; nothing to search.
    Idle,
    /// Filters changed, waiting for the debounce to elapse.
    Pending,
    Searching(RequestTicket),
    Results { count: usize, at: DateTime<Local> },
    /// The last search failed; distinct from a search with no matches.
    Failed(String),
    /// Transient feedback from a command (export link, deep link, …).
    Message(String),
}

impl Status {
    /// Text shown in the results pane when it has no rows.
    pub fn empty_hint(&self) -> &'static str {
        match self {
            Status::Idle => "type a lemma pattern (/) or pick a filter (Tab) to search",
            Status::Pending | Status::Searching(_) => "searching…",
            Status::Results { .. } => "no matching lemmas",
            Status::Failed(_) => "the search failed, see the status bar (r to retry)",
            Status::Message(_) => "",
        }
    }
}

pub struct StatusBar<'a> {
    status: &'a Status,
    endpoint: &'a str,
    timestamp_format: &'a str,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(status: &'a Status, endpoint: &'a str, timestamp_format: &'a str, theme: &'a Theme) -> Self {
        Self { status, endpoint, timestamp_format, theme }
    }

    fn status_span(&self) -> Span<'static> {
        match self.status {
            Status::Idle => Span::styled("idle", self.theme.status_idle),
            Status::Pending => Span::styled("…", self.theme.status_busy),
            Status::Searching(ticket) => {
                Span::styled(format!("searching {ticket}"), self.theme.status_busy)
            }
            Status::Results { count, at } => Span::styled(
                format!(
                    "{count} result{} · {}",
                    if *count == 1 { "" } else { "s" },
                    at.format(self.timestamp_format)
                ),
                self.theme.status_ok,
            ),
            Status::Failed(message) => Span::styled(format!("error: {message}"), self.theme.status_error),
            Status::Message(message) => Span::raw(message.clone()),
        }
    }
}

fn host(endpoint: &str) -> &str {
    let rest = endpoint.split_once("://").map(|(_, rest)| rest).unwrap_or(endpoint);
    rest.split('/').next().unwrap_or(rest)
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Span::styled(" liita ", self.theme.border_focused.add_modifier(Modifier::REVERSED)),
            Span::styled(format!(" {} ", host(self.endpoint)), self.theme.status_idle),
            Span::raw("│ "),
            self.status_span(),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);

        // Keybinding hints at the right edge
        let hint = " /:filter  e:export  ::cmd  ?:help  q:quit ";
        let hint_x = area.right().saturating_sub(hint.chars().count() as u16);
        let status_end = area.x + line.width() as u16;
        if hint_x > status_end {
            buf.set_string(hint_x, area.y, hint, self.theme.status_idle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liita_core::RequestSequencer;

    fn rendered(status: &Status) -> String {
        let theme = Theme::load_default();
        let area = Rect::new(0, 0, 120, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new(status, "https://liita.it/sparql", "%H:%M", &theme).render(area, &mut buf);
        (0..area.width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn host_is_extracted() {
        assert_eq!(host("https://liita.it/sparql"), "liita.it");
        assert_eq!(host("http://localhost:7200/repositories/x"), "localhost:7200");
        assert_eq!(host("liita.it"), "liita.it");
    }

    #[test]
    fn shows_ticket_while_searching() {
        let ticket = RequestSequencer::new().issue();
        let line = rendered(&Status::Searching(ticket));
        assert!(line.contains("liita.it"));
        assert!(line.contains("searching #1"));
        assert!(line.contains("q:quit"));
    }

    #[test]
    fn failure_is_distinct_from_no_results() {
        let failed = rendered(&Status::Failed("endpoint returned HTTP 500".into()));
        let empty = rendered(&Status::Results { count: 0, at: Local::now() });
        assert!(failed.contains("error: endpoint returned HTTP 500"));
        assert!(empty.contains("0 results"));
        assert_ne!(Status::Failed(String::new()).empty_hint(), Status::Results { count: 0, at: Local::now() }.empty_hint());
    }
}
