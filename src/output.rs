use atty::Stream;
use colored::*;

/// Formatted console output for policy-audit
pub struct Output;

impl Output {
    /// Check if colors should be enabled
    pub(crate) fn colors_enabled() -> bool {
        atty::is(Stream::Stdout) && std::env::var("NO_COLOR").is_err()
    }

    /// Initialize output system (call at startup)
    pub fn init() {
        if !Self::colors_enabled() {
            colored::control::set_override(false);
        }
    }

    /// Show a success message
    pub fn success(msg: &str) {
        println!("{}", status_line("✓", msg, Color::Green, Self::colors_enabled()));
    }

    /// Show an error message
    pub fn error(msg: &str) {
        eprintln!("{}", status_line("✗", msg, Color::Red, Self::colors_enabled()));
    }

    /// Show a warning message
    pub fn warning(msg: &str) {
        println!("{}", status_line("⚠", msg, Color::Yellow, Self::colors_enabled()));
    }

    /// Show an info message
    pub fn info(msg: &str) {
        println!("{}", status_line("ℹ", msg, Color::Cyan, Self::colors_enabled()));
    }

    /// Show a heading
    pub fn heading(msg: &str) {
        if Self::colors_enabled() {
            println!("\n{}", msg.bold().bright_blue());
        } else {
            println!("\n{}", msg);
        }
    }

    /// Show a category being processed
    pub fn category(name: &str, files: usize) {
        if Self::colors_enabled() {
            println!("  {} {} {}", "📁".blue(), name.bold(), format!("({} file(s))", files).dimmed());
        } else {
            println!("  📁 {} ({} file(s))", name, files);
        }
    }

    /// Show a processed file and how many policies it contributed
    pub fn file_info(name: &str, policies: usize) {
        if Self::colors_enabled() {
            println!("    {} {} {}", "📄".cyan(), name, format!("{} policy(ies)", policies).dimmed());
        } else {
            println!("    📄 {} {} policy(ies)", name, policies);
        }
    }

    /// Show a summary line
    pub fn summary(title: &str, count: usize, unit: &str) {
        if Self::colors_enabled() {
            println!("{} {}", title.bold(), format!("{} {}", count, unit).green());
        } else {
            println!("{} {} {}", title, count, unit);
        }
    }

    /// Show a path
    pub fn path(path: &str) {
        if Self::colors_enabled() {
            println!("  {} {}", "🔗".blue(), path.dimmed());
        } else {
            println!("  🔗 {}", path);
        }
    }
}

/// A symbol-prefixed status message, tinted with `color` when colors are on
fn status_line(symbol: &str, msg: &str, color: Color, colors: bool) -> String {
    if colors {
        format!("{} {}", symbol.color(color).bold(), msg.color(color))
    } else {
        format!("{} {}", symbol, msg)
    }
}
