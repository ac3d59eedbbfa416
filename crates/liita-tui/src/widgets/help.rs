//! Help popup: centred floating overlay listing all keybindings.
//!
//! Toggle with `?`; close with `?` or `Escape`.

use crate::theme::Theme;
use crate::widgets::centered_rect;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

const BINDINGS: &[(&str, &str)] = &[
    ("q  /  Ctrl+c", "Quit"),
    ("Tab / Shift+Tab", "Next / previous filter, then results"),
    ("/", "Edit the lemma pattern"),
    ("Enter (filter)", "Search now, or open the value picker"),
    ("Backspace (select)", "Clear the selected value"),
    ("Escape", "Leave the filter bar / close popup"),
    ("↑ k  /  ↓ j", "Move through results"),
    ("PageUp / Ctrl+u", "Scroll results up"),
    ("PageDown / Ctrl+d", "Scroll results down"),
    ("g  /  G", "First / last result"),
    ("Enter (results)", "Show every statement about the lemma"),
    ("o", "Open the selected lemma in the browser"),
    ("e", "Open the CSV export of this search"),
    ("C", "Clear all filters"),
    ("r  /  Ctrl+r", "Search again and reload value lists"),
    (":", "Command line (:help for commands)"),
    ("?", "Toggle this help popup"),
];

const COMMANDS: &[(&str, &str)] = &[
    (":q", "Quit"),
    (":theme <default|gruvbox>", "Switch theme"),
    (":export", "Show and open the CSV export URL"),
    (":link", "Show the web interface deep link"),
    (":lexicons", "Toggle the lexicons column"),
    (":clear  :refresh  :open", "Same as C, r, o"),
];

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

fn entry<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<26}", key), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(desc),
    ])
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (BINDINGS.len() + COMMANDS.len() + 4) as u16;
        let popup = centered_rect(80, height, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" liita: keybindings (? to close) ")
            .border_style(self.theme.border_focused);

        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines: Vec<Line> = BINDINGS.iter().map(|(key, desc)| entry(key, desc)).collect();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("  Commands", self.theme.table_header)));
        lines.extend(COMMANDS.iter().map(|(key, desc)| entry(key, desc)));

        Paragraph::new(lines).render(inner, buf);
    }
}
