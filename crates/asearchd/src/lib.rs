mod debounce;
mod panel;
mod protocol;
mod source;

use asearch_config::Settings;
use asearch_index::{build, IndexError, IndexSource, NameIndex};
use asearch_query::{QueryEngine, SearchRequest, Selection};
use asearch_shell::ShellActions;

pub use debounce::QueryDebouncer;
pub use panel::PanelState;
pub use protocol::{ControlCommand, HostMessage, PanelMessage};
pub use source::{location_for_path, WalkDirSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOpen {
    Created,
    Revealed,
}

/// Owns the name index and the (at most one) open search panel for the
/// lifetime of the host.
pub struct AppService<S> {
    pub settings: Settings,
    shell: S,
    index: Option<NameIndex>,
    panel: Option<PanelState>,
}

impl<S: ShellActions> AppService<S> {
    pub fn new(settings: Settings, shell: S) -> Self {
        Self {
            settings,
            shell,
            index: None,
            panel: None,
        }
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    /// `false` until the first successful rebuild, which lets callers tell an
    /// unbuilt index from an empty result.
    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    pub fn index(&self) -> Option<&NameIndex> {
        self.index.as_ref()
    }

    pub fn panel(&self) -> Option<&PanelState> {
        self.panel.as_ref()
    }

    /// Rebuilds the index from scratch. On failure the previous index stays
    /// in place and the error is both reported and returned.
    pub async fn reindex<I: IndexSource>(&mut self, source: &I) -> Result<usize, IndexError> {
        let locations = match source.enumerate().await {
            Ok(locations) => locations,
            Err(err) => {
                tracing::warn!(%err, "reindex failed, keeping previous index");
                self.shell.notify(&format!("Indexing failed: {}", err));
                return Err(err);
            }
        };

        let built = build(locations);
        self.index = Some(built.index);
        if let Some(panel) = self.panel.as_mut() {
            panel.invalidate();
        }

        tracing::info!(files = built.processed, "reindex finished");
        self.shell.notify(&format!("Indexed {} files", built.processed));
        Ok(built.processed)
    }

    /// Opens the search panel, or reveals the existing one.
    pub fn show_panel(&mut self) -> PanelOpen {
        if self.panel.is_some() {
            tracing::debug!("revealing existing panel");
            return PanelOpen::Revealed;
        }

        self.panel = Some(PanelState::new());
        tracing::debug!("panel created");
        PanelOpen::Created
    }

    pub fn close_panel(&mut self) {
        if self.panel.take().is_some() {
            tracing::debug!("panel closed");
        }
    }

    pub fn search(&self, request: &SearchRequest) -> Vec<String> {
        self.index
            .as_ref()
            .map(|index| index.search(request))
            .unwrap_or_default()
    }

    /// Handles one message from the panel and returns the replies to send
    /// back. Messages arriving without an open panel are dropped.
    pub fn handle_message(&mut self, message: PanelMessage) -> Vec<HostMessage> {
        let Some(panel) = self.panel.as_mut() else {
            tracing::debug!(received = ?message, "no open panel, dropping message");
            return Vec::new();
        };

        let page_jump = self.settings.page_jump;
        match message {
            PanelMessage::DoSearch { text } => panel.submit(self.index.as_ref(), text),
            PanelMessage::Ok => panel.acknowledge(self.index.as_ref()),
            PanelMessage::Open { path } => {
                open_location(&self.shell, &path);
                Vec::new()
            }
            PanelMessage::MoveUp => vec![panel.navigate(Selection::move_up)],
            PanelMessage::MoveDown => vec![panel.navigate(Selection::move_down)],
            PanelMessage::PageUp => vec![panel.navigate(|s| s.page_up(page_jump))],
            PanelMessage::PageDown => vec![panel.navigate(|s| s.page_down(page_jump))],
            PanelMessage::Home => vec![panel.navigate(Selection::home)],
            PanelMessage::End => vec![panel.navigate(Selection::end)],
            PanelMessage::Confirm => {
                if let Some(location) = panel.confirm() {
                    open_location(&self.shell, location);
                }
                Vec::new()
            }
            PanelMessage::Unknown => Vec::new(),
        }
    }
}

fn open_location<S: ShellActions>(shell: &S, location: &str) {
    if let Err(err) = shell.open_location(location) {
        tracing::warn!(%err, location, "open failed");
        shell.notify(&format!("Could not open {}: {}", location, err));
    }
}
