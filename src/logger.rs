//! Terminal output.
//!
//! One-line tagged messages through [`log!`](crate::log) and
//! [`debug!`](crate::debug), plus the watch session's status block: the
//! outcome of the latest batch, redrawn in place.
//!
//! ```ignore
//! log!("scan"; "indexed {} views", count);
//! status_success("rewrote views: /home/index.tsx");
//! ```

use std::io::{Write, stdout};
use std::sync::LazyLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{OwoColorize, Style};
use parking_lot::Mutex;

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Enable `debug!` output (`--verbose`).
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Print `[tag] message`.
///
/// ```ignore
/// log!("write"; "{} views", index.len());
/// ```
#[macro_export]
macro_rules! log {
    ($tag:expr; $($arg:tt)*) => {{
        $crate::logger::log($tag, &format!($($arg)*))
    }};
}

/// Like [`log!`](crate::log), printed only in verbose mode.
#[macro_export]
macro_rules! debug {
    ($tag:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($tag, &format!($($arg)*))
        }
    }};
}

pub fn log(tag: &str, message: &str) {
    // Lines below the status block must not be erased by its next redraw
    let mut block = STATUS.lock();
    block.height = 0;

    let mut out = stdout().lock();
    writeln!(out, "{} {message}", format!("[{tag}]").style(tag_style(tag))).ok();
    out.flush().ok();
}

/// Prefix style by tag. Unknown tags share the neutral style.
fn tag_style(tag: &str) -> Style {
    let style = Style::new().bold();
    match tag {
        "error" => style.bright_red(),
        "warning" => style.yellow(),
        "watch" | "actor" => style.bright_cyan(),
        "write" => style.bright_blue(),
        "scan" | "build" => style.bright_green(),
        _ => style.bright_magenta(),
    }
}

// ============================================================================
// Status block
// ============================================================================

/// Result class of a hot-update batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Rewritten,
    Unchanged,
    Failed,
}

impl Outcome {
    fn symbol(self) -> String {
        match self {
            Self::Rewritten => "✓".green().to_string(),
            Self::Unchanged => String::new(),
            Self::Failed => "✗".red().to_string(),
        }
    }
}

/// Status lines last drawn by the watch session.
///
/// `height` is how many lines to move up before redrawing; zero means the
/// block was scrolled away by other output and is drawn fresh.
struct StatusBlock {
    height: usize,
}

static STATUS: LazyLock<Mutex<StatusBlock>> = LazyLock::new(|| Mutex::new(StatusBlock { height: 0 }));

impl StatusBlock {
    fn show(&mut self, outcome: Outcome, text: &str) {
        let mut out = stdout().lock();
        if let Ok(up) = u16::try_from(self.height)
            && up > 0
        {
            execute!(out, cursor::MoveUp(up), Clear(ClearType::FromCursorDown)).ok();
        }

        let line = render(&clock(unix_secs()), outcome, text);
        writeln!(out, "{line}").ok();
        out.flush().ok();
        self.height = line.lines().count();
    }
}

fn render(clock: &str, outcome: Outcome, text: &str) -> String {
    let stamp = format!("[{clock}]").dimmed().to_string();
    match outcome {
        Outcome::Unchanged => format!("{stamp} {}", text.dimmed()),
        _ => format!("{stamp} {} {text}", outcome.symbol()),
    }
}

fn unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

/// `HH:MM:SS` of a unix timestamp.
///
/// This is UTC time of day. No local timezone is applied.
fn clock(secs: u64) -> String {
    let day = secs % 86_400;
    format!("{:02}:{:02}:{:02}", day / 3600, day / 60 % 60, day % 60)
}

pub fn status_success(message: &str) {
    STATUS.lock().show(Outcome::Rewritten, message);
}

pub fn status_unchanged(message: &str) {
    STATUS.lock().show(Outcome::Unchanged, message);
}

/// Show a failure. A non-empty `detail` goes on its own line below.
pub fn status_error(summary: &str, detail: &str) {
    let text = if detail.is_empty() {
        summary.to_string()
    } else {
        format!("{summary}\n{detail}")
    };
    STATUS.lock().show(Outcome::Failed, &text);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_utc_time_of_day() {
        assert_eq!(clock(0), "00:00:00");
        assert_eq!(clock(86_399), "23:59:59");
        // 2024-01-01T13:05:09Z
        assert_eq!(clock(1_704_114_309), "13:05:09");
    }

    #[test]
    fn test_render_keeps_detail_lines() {
        let line = render("10:00:00", Outcome::Failed, "scan failed: /about.tsx\nmultiple `meta`");
        assert_eq!(line.lines().count(), 2);
        assert!(line.contains("scan failed: /about.tsx"));
        assert!(line.ends_with("multiple `meta`"));
    }

    #[test]
    fn test_render_unchanged_has_no_symbol() {
        let line = render("10:00:00", Outcome::Unchanged, "views unchanged");
        assert!(!line.contains('✓'));
        assert!(!line.contains('✗'));
        assert!(line.contains("10:00:00"));
    }
}
