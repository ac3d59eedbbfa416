// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{app::AppState, theme::Theme};

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    // Toggle the help popup
    Help,
    // Switch to a bundled theme
    Theme(String),
    // Reset every filter
    Clear,
    // Search again and reload option lists
    Refresh,
    // Show and open the CSV export URL
    Export,
    // Show the web interface deep link
    Link,
    // Toggle the lexicons column
    Lexicons,
    // Open the selected lemma
    Open,
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" | "q!" | "quit!" => Ok(Command::Quit),
            "help" | "h" => Ok(Command::Help),
            "clear" => Ok(Command::Clear),
            "refresh" | "r" => Ok(Command::Refresh),
            "export" | "csv" => Ok(Command::Export),
            "link" => Ok(Command::Link),
            "lexicons" | "lex" => Ok(Command::Lexicons),
            "open" => Ok(Command::Open),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Theme(name) => {
            s.theme = Theme::by_name(&name);
        }
        Command::Clear => s.clear_filters(),
        Command::Refresh => s.refresh(),
        Command::Export => s.export(),
        Command::Link => s.show_link(),
        Command::Lexicons => {
            s.results.show_lexicons = !s.results.show_lexicons;
        }
        Command::Open => s.open_selected(),
    }
}
