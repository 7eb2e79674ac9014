//! Reply framing for the rc text protocol.
//!
//! The rc interface has no length prefix.  A reply is recognised by scanning
//! the accumulated text for two anchors:
//!
//! ```text
//! <stale/echo noise> <command echo> <reply payload> "> "
//!                    ^ anchor 1                     ^ anchor 2 (prompt)
//! ```
//!
//! [`contains_prompt`] decides when to stop reading; [`extract_reply`] cuts
//! the payload out of what was read.  Both are pure functions so they can be
//! tested without a socket.

/// Prompt sentinel the rc interface prints after every reply.
pub const PROMPT: &str = "> ";

/// Terminator appended to every outgoing command.
pub const LINE_TERMINATOR: &str = "\n";

/// Returns `true` once `buf` holds the prompt sentinel anywhere.
pub fn contains_prompt(buf: &[u8]) -> bool {
    buf.windows(PROMPT.len()).any(|w| w == PROMPT.as_bytes())
}

/// Builds the bytes written to the socket for `command`.
pub fn encode_command(command: &str) -> Vec<u8> {
    let mut line = Vec::with_capacity(command.len() + LINE_TERMINATOR.len());
    line.extend_from_slice(command.as_bytes());
    line.extend_from_slice(LINE_TERMINATOR.as_bytes());
    line
}

/// Extracts the reply payload from the raw text read after sending `command`.
///
/// 1. Everything up to and including the first occurrence of `command` is
///    dropped (the echo).  If the command does not occur, or is empty,
///    nothing is dropped.
/// 2. One trailing prompt sentinel is removed.
/// 3. Surrounding whitespace is trimmed.
///
/// # Example
///
/// ```rust
/// use vlc_rc_core::framing::extract_reply;
///
/// assert_eq!(extract_reply("status\r\nPlaying\r\n> ", "status"), "Playing");
/// ```
pub fn extract_reply(raw: &str, command: &str) -> String {
    let after_echo = match raw.find(command) {
        Some(idx) if !command.is_empty() => &raw[idx + command.len()..],
        _ => raw,
    };

    let payload = after_echo.strip_suffix(PROMPT).unwrap_or(after_echo);

    payload.trim().to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_reply_strips_echo_and_prompt() {
        // Arrange: echo, payload, prompt – the canonical rc reply shape
        let raw = "status\r\nPlaying\r\n> ";

        // Act
        let reply = extract_reply(raw, "status");

        // Assert
        assert_eq!(reply, "Playing");
    }

    #[test]
    fn test_extract_reply_keeps_multiline_payload() {
        let raw = "info\r\n+----[ Meta data ]\r\n| title: Song\r\n+----[ end of stream info ]\r\n> ";
        let reply = extract_reply(raw, "info");
        assert_eq!(
            reply,
            "+----[ Meta data ]\r\n| title: Song\r\n+----[ end of stream info ]"
        );
    }

    #[test]
    fn test_extract_reply_without_echo_keeps_text() {
        // Some rc builds do not echo the command back.
        let raw = "Playing\r\n> ";
        assert_eq!(extract_reply(raw, "status"), "Playing");
    }

    #[test]
    fn test_extract_reply_cuts_at_first_echo_only() {
        // The command text appears twice; only the first occurrence is the echo.
        let raw = "volume\r\nvolume: 256\r\n> ";
        assert_eq!(extract_reply(raw, "volume"), "volume: 256");
    }

    #[test]
    fn test_extract_reply_discards_noise_before_echo() {
        let raw = "status change: ( audio volume: 256 )\r\nget_time\r\n42\r\n> ";
        assert_eq!(extract_reply(raw, "get_time"), "42");
    }

    #[test]
    fn test_extract_reply_empty_payload() {
        assert_eq!(extract_reply("pause\r\n> ", "pause"), "");
    }

    #[test]
    fn test_extract_reply_empty_command_strips_nothing() {
        assert_eq!(extract_reply("hello\r\n> ", ""), "hello");
    }

    #[test]
    fn test_extract_reply_without_prompt_returns_trimmed_text() {
        // Stream closed mid-reply: no prompt was ever received.
        assert_eq!(extract_reply("status\r\nPartial", "status"), "Partial");
    }

    #[test]
    fn test_extract_reply_removes_only_one_trailing_prompt() {
        assert_eq!(extract_reply("x\r\na> > ", "x"), "a>");
    }

    #[test]
    fn test_extract_reply_keeps_prompt_in_the_middle() {
        assert_eq!(extract_reply("x\r\na > b\r\n> ", "x"), "a > b");
    }

    #[test]
    fn test_contains_prompt_detects_sentinel() {
        assert!(contains_prompt(b"Playing\r\n> "));
        assert!(contains_prompt(b"> "));
    }

    #[test]
    fn test_contains_prompt_requires_trailing_space() {
        assert!(!contains_prompt(b"Playing\r\n>"));
        assert!(!contains_prompt(b""));
    }

    #[test]
    fn test_encode_command_appends_newline() {
        assert_eq!(encode_command("status"), b"status\n".to_vec());
    }
}
