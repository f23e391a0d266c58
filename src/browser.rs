use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Stdio};

/// Opens `path` with the platform's default handler (usually the web browser).
///
/// The opener is spawned and left running; its exit status is not awaited.
pub fn open_report(path: &Path) -> Result<()> {
    let path = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", path.display()))?;

    let mut command = opener_command(&path);
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to open {} in the default browser", path.display()))?;

    Ok(())
}

#[cfg(target_os = "windows")]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    // The empty argument is the window title `start` expects before the target.
    command.arg("/C").arg("start").arg("").arg(path);
    command
}

#[cfg(target_os = "macos")]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}
