use serde::{Deserialize, Serialize};

/// Messages the rendering surface sends to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum PanelMessage {
    DoSearch { text: String },
    Open { path: String },
    /// Acknowledges the last `filesFound` delivery.
    Ok,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    Home,
    End,
    Confirm,
    #[serde(other)]
    Unknown,
}

impl PanelMessage {
    /// Parses one channel line. Malformed lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        match serde_json::from_str(line) {
            Ok(message) => Some(message),
            Err(err) => {
                tracing::debug!(%err, line, "ignoring malformed panel message");
                None
            }
        }
    }
}

/// Messages the host sends back to the surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum HostMessage {
    FilesFound {
        #[serde(rename = "filesFound")]
        files_found: Vec<String>,
    },
    Selection {
        index: usize,
    },
}

impl HostMessage {
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Host-level actions a surface may request besides panel traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum ControlCommand {
    Show,
    Reindex,
    Close,
    Quit,
}

impl ControlCommand {
    pub fn parse(line: &str) -> Option<Self> {
        serde_json::from_str(line).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_messages_use_command_tag() {
        assert_eq!(
            PanelMessage::parse(r#"{"command":"doSearch","text":"foo"}"#),
            Some(PanelMessage::DoSearch {
                text: "foo".to_string()
            })
        );
        assert_eq!(
            PanelMessage::parse(r#"{"command":"open","path":"file:///p/a.txt"}"#),
            Some(PanelMessage::Open {
                path: "file:///p/a.txt".to_string()
            })
        );
        assert_eq!(PanelMessage::parse(r#"{"command":"ok"}"#), Some(PanelMessage::Ok));
        assert_eq!(
            PanelMessage::parse(r#"{"command":"moveDown"}"#),
            Some(PanelMessage::MoveDown)
        );
    }

    #[test]
    fn unknown_and_malformed_messages() {
        assert_eq!(
            PanelMessage::parse(r#"{"command":"resize","width":3}"#),
            Some(PanelMessage::Unknown)
        );
        assert_eq!(PanelMessage::parse("not json"), None);
        assert_eq!(PanelMessage::parse(r#"{"text":"no tag"}"#), None);
    }

    #[test]
    fn files_found_wire_shape() {
        let line = HostMessage::FilesFound {
            files_found: vec!["/p/foo.txt".to_string()],
        }
        .to_line()
        .unwrap();
        assert_eq!(line, r#"{"command":"filesFound","filesFound":["/p/foo.txt"]}"#);
    }

    #[test]
    fn control_commands_do_not_swallow_panel_traffic() {
        assert_eq!(
            ControlCommand::parse(r#"{"command":"reindex"}"#),
            Some(ControlCommand::Reindex)
        );
        assert_eq!(ControlCommand::parse(r#"{"command":"doSearch","text":"x"}"#), None);
    }
}
