//! Client introspection queries.
//!
//! Interactive clients fire a few SQL statements on connect (version checks,
//! `SET` commands, catalog lookups). These get canned answers so the client is
//! satisfied and the game never sees them.

use crate::pgwire::{BackendMessage, FieldDescription};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// `SELECT version()...`
    Version,
    /// `SELECT ... as type;`
    TypedLiteral,
    /// Any other `SELECT `.
    Select,
    /// `SET ...`
    Set,
}

/// Classify raw query text. Checked in order, case-sensitive, before any
/// command cleanup.
pub fn classify(query: &str) -> Option<Probe> {
    if query.starts_with("SELECT version()") {
        Some(Probe::Version)
    } else if query.starts_with("SELECT ") && query.ends_with("as type;") {
        Some(Probe::TypedLiteral)
    } else if query.starts_with("SELECT ") {
        Some(Probe::Select)
    } else if query.starts_with("SET ") {
        Some(Probe::Set)
    } else {
        None
    }
}

/// Frames answering `probe`, ending with ReadyForQuery.
pub fn reply(probe: Probe, server_version: &str) -> Vec<BackendMessage> {
    let mut frames = match probe {
        Probe::Version => single_row("version", server_version),
        Probe::TypedLiteral => single_row("type", "log"),
        Probe::Select => vec![
            BackendMessage::RowDescription(Vec::new()),
            BackendMessage::CommandComplete("SELECT 0".to_string()),
        ],
        Probe::Set => vec![BackendMessage::CommandComplete("SET".to_string())],
    };
    frames.push(BackendMessage::ReadyForQuery);
    frames
}

fn single_row(column: &str, value: &str) -> Vec<BackendMessage> {
    vec![
        BackendMessage::RowDescription(vec![FieldDescription::text(column)]),
        BackendMessage::DataRow(vec![Some(value.to_string())]),
        BackendMessage::CommandComplete("SELECT 1".to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_order() {
        assert_eq!(classify("SELECT version();"), Some(Probe::Version));
        assert_eq!(
            classify("SELECT 'x'::regtype as type;"),
            Some(Probe::TypedLiteral)
        );
        assert_eq!(
            classify("SELECT n.nspname FROM pg_namespace n"),
            Some(Probe::Select)
        );
        assert_eq!(classify("SET extra_float_digits = 3"), Some(Probe::Set));
    }

    #[test]
    fn game_text_is_not_a_probe() {
        assert_eq!(classify("look"), None);
        assert_eq!(classify("select version()"), None);
        assert_eq!(classify("SELECT"), None);
        assert_eq!(classify("settle down"), None);
    }

    #[test]
    fn version_reply_carries_configured_version() {
        let frames = reply(Probe::Version, "16.8");
        assert_eq!(
            frames,
            vec![
                BackendMessage::RowDescription(vec![FieldDescription::text("version")]),
                BackendMessage::DataRow(vec![Some("16.8".to_string())]),
                BackendMessage::CommandComplete("SELECT 1".to_string()),
                BackendMessage::ReadyForQuery,
            ]
        );
    }

    #[test]
    fn set_reply_is_bare_command_complete() {
        assert_eq!(
            reply(Probe::Set, "16.8"),
            vec![
                BackendMessage::CommandComplete("SET".to_string()),
                BackendMessage::ReadyForQuery,
            ]
        );
    }
}
