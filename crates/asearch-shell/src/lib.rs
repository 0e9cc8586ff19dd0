use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::thread::{self, JoinHandle};

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("location no longer exists: {0}")]
    Missing(String),
    #[error("failed to launch opener for {location}: {source}")]
    Launch {
        location: String,
        #[source]
        source: std::io::Error,
    },
}

/// Host side effects the core asks for but never performs itself.
pub trait ShellActions {
    fn open_location(&self, location: &str) -> Result<(), ShellError>;
    fn notify(&self, message: &str);
}

/// Opens locations with the platform's default handler and reports
/// notifications on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShell;

impl ShellActions for SystemShell {
    fn open_location(&self, location: &str) -> Result<(), ShellError> {
        let path = path_from_location(location);
        if !path.exists() {
            return Err(ShellError::Missing(location.to_string()));
        }

        spawn_reaped(opener_command(&path)).map_err(|source| ShellError::Launch {
            location: location.to_string(),
            source,
        })?;

        tracing::info!(location, "opened location");
        Ok(())
    }

    fn notify(&self, message: &str) {
        tracing::debug!("notify: {}", message);
        eprintln!("{}", message);
    }
}

#[cfg(target_os = "windows")]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
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

/// Spawns `command` and waits for it on a background thread so the child
/// never lingers as a zombie.
pub fn spawn_reaped(
    mut command: Command,
) -> std::io::Result<JoinHandle<std::io::Result<ExitStatus>>> {
    let mut child = command.spawn()?;
    Ok(thread::spawn(move || {
        let status = child.wait();
        if let Ok(status) = &status {
            if !status.success() {
                tracing::debug!(%status, "opener exited with failure");
            }
        }
        status
    }))
}

/// Filesystem path for a location, accepting both `file://` URIs and plain paths.
pub fn path_from_location(location: &str) -> PathBuf {
    let Some(rest) = location.strip_prefix("file://") else {
        return PathBuf::from(location);
    };

    // file:///C:/dir -> C:/dir
    let bytes = rest.as_bytes();
    if bytes.len() >= 3 && bytes[0] == b'/' && bytes[2] == b':' && bytes[1].is_ascii_alphabetic() {
        return PathBuf::from(&rest[1..]);
    }

    PathBuf::from(rest)
}
