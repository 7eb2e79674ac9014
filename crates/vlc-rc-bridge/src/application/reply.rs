//! Command validation and reply shaping.
//!
//! Pure functions with no I/O, used by the HTTP handlers on the way in
//! (validate the command text) and on the way out (split the reply).

use thiserror::Error;

use crate::domain::CommandReply;

/// Line separator used inside rc replies.
pub const REPLY_LINE_SEPARATOR: &str = "\r\n";

/// Reasons a command is refused before it reaches the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("command is empty")]
    Empty,

    /// A line break would smuggle a second command into one exchange.
    #[error("command must be a single line")]
    MultiLine,
}

/// Checks that `command` is exactly one non-blank line.
///
/// The text is otherwise passed through untouched: command semantics are
/// VLC's business.
pub fn validate_command(command: &str) -> Result<&str, CommandError> {
    if command.contains(&['\r', '\n'][..]) {
        return Err(CommandError::MultiLine);
    }
    if command.trim().is_empty() {
        return Err(CommandError::Empty);
    }
    Ok(command)
}

/// Splits a framed reply into its lines.
///
/// An empty reply produces a single empty line, so `response` is never an
/// empty array.
pub fn to_command_reply(reply: &str) -> CommandReply {
    CommandReply {
        response: reply
            .split(REPLY_LINE_SEPARATOR)
            .map(str::to_owned)
            .collect(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_reply() {
        let reply = to_command_reply("Playing");
        assert_eq!(reply.response, vec!["Playing"]);
    }

    #[test]
    fn test_multi_line_reply_split_on_crlf() {
        // Arrange: a typical `status` block
        let raw = "( new input: file:///a.mp3 )\r\n( audio volume: 256 )\r\n( state playing )";

        // Act
        let reply = to_command_reply(raw);

        // Assert
        assert_eq!(
            reply.response,
            vec![
                "( new input: file:///a.mp3 )",
                "( audio volume: 256 )",
                "( state playing )"
            ]
        );
    }

    #[test]
    fn test_bare_newline_is_not_a_separator() {
        let reply = to_command_reply("a\nb");
        assert_eq!(reply.response, vec!["a\nb"]);
    }

    #[test]
    fn test_empty_reply_yields_one_empty_line() {
        let reply = to_command_reply("");
        assert_eq!(reply.response, vec![""]);
    }

    #[test]
    fn test_validate_accepts_command_with_arguments() {
        assert_eq!(validate_command("volume 256"), Ok("volume 256"));
    }

    #[test]
    fn test_validate_rejects_empty_and_blank() {
        assert_eq!(validate_command(""), Err(CommandError::Empty));
        assert_eq!(validate_command("   "), Err(CommandError::Empty));
    }

    #[test]
    fn test_validate_rejects_embedded_line_breaks() {
        assert_eq!(validate_command("pause\nquit"), Err(CommandError::MultiLine));
        assert_eq!(validate_command("pause\r"), Err(CommandError::MultiLine));
    }
}
