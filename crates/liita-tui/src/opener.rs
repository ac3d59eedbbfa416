//! Hand a URL to the desktop: `ui.opener` when configured, else the
//! platform default (`xdg-open`, `open`, `start`).

use std::io;
use std::process::{Command, Stdio};

/// Spawn the opener for `url` without waiting for it.
pub fn open_url(url: &str, opener: Option<&str>) -> io::Result<()> {
    let mut command = match opener {
        Some(program) => Command::new(program),
        None => platform_opener(),
    };
    tracing::info!(url, opener = ?opener, "opening url");
    command
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}

fn platform_opener() -> Command {
    if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else {
        Command::new("xdg-open")
    }
}
