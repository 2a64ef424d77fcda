//! Splits raw input lines into a command word, argument tokens and remainder.

const BY_MARKER: &str = "/by";
const FROM_MARKER: &str = "/from";
const TO_MARKER: &str = "/to";

/// Top-level command words. Matching is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandWord {
    List,
    Mark,
    Unmark,
    Delete,
    Todo,
    Deadline,
    Event,
    On,
    Find,
    Undo,
    Bye,
    Unknown,
}

impl CommandWord {
    pub fn from_token(token: &str) -> Self {
        match token.to_lowercase().as_str() {
            "list" => CommandWord::List,
            "mark" => CommandWord::Mark,
            "unmark" => CommandWord::Unmark,
            "delete" => CommandWord::Delete,
            "todo" => CommandWord::Todo,
            "deadline" => CommandWord::Deadline,
            "event" => CommandWord::Event,
            "on" => CommandWord::On,
            "find" => CommandWord::Find,
            "undo" => CommandWord::Undo,
            "bye" => CommandWord::Bye,
            _ => CommandWord::Unknown,
        }
    }

    /// Commands that may change the task list and therefore get an undo checkpoint.
    pub fn is_mutating(self) -> bool {
        matches!(
            self,
            CommandWord::Todo
                | CommandWord::Deadline
                | CommandWord::Event
                | CommandWord::Delete
                | CommandWord::Mark
                | CommandWord::Unmark
        )
    }
}

/// A raw line split into its command word and the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub command: CommandWord,
    /// Whitespace-delimited tokens after the command word.
    pub args: Vec<String>,
    /// Everything after the command word, trimmed. Empty when absent.
    pub remainder: String,
}

impl ParsedCommand {
    /// The whole remainder as an integer, for `mark`/`unmark`/`delete`.
    /// Trailing words make it invalid.
    ///
    /// Range checking against the list is left to the caller.
    pub fn index_arg(&self) -> Option<i64> {
        self.remainder.parse().ok()
    }
}

pub fn parse_command(raw: &str) -> ParsedCommand {
    let line = raw.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    ParsedCommand {
        command: CommandWord::from_token(head),
        args: rest.split_whitespace().map(str::to_string).collect(),
        remainder: rest.to_string(),
    }
}

/// `<description> /by <when>` split into its two non-empty parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineArgs<'a> {
    pub description: &'a str,
    pub by: &'a str,
}

/// `<description> /from <start> /to <end>` split into its three non-empty parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventArgs<'a> {
    pub description: &'a str,
    pub from: &'a str,
    pub to: &'a str,
}

/// Splits a deadline remainder on the first `/by`.
pub fn split_deadline(remainder: &str) -> Option<DeadlineArgs<'_>> {
    let by_at = remainder.find(BY_MARKER)?;
    let description = remainder[..by_at].trim();
    let by = remainder[by_at + BY_MARKER.len()..].trim();
    if description.is_empty() || by.is_empty() {
        return None;
    }
    Some(DeadlineArgs { description, by })
}

/// Splits an event remainder on the first `/from` and the first `/to`.
///
/// `/from` has to come before `/to`.
pub fn split_event(remainder: &str) -> Option<EventArgs<'_>> {
    let from_at = remainder.find(FROM_MARKER)?;
    let to_at = remainder.find(TO_MARKER)?;
    if to_at < from_at {
        return None;
    }

    let description = remainder[..from_at].trim();
    let from = remainder
        .get(from_at + FROM_MARKER.len()..to_at)
        .map(str::trim)?;
    let to = remainder[to_at + TO_MARKER.len()..].trim();
    if description.is_empty() || from.is_empty() || to.is_empty() {
        return None;
    }
    Some(EventArgs {
        description,
        from,
        to,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_splits_command_and_remainder() {
        let parsed = parse_command("   todo   read book  ");
        assert_eq!(parsed.command, CommandWord::Todo);
        assert_eq!(parsed.remainder, "read book");
        assert_eq!(parsed.args, vec!["read", "book"]);
    }

    #[test]
    fn command_word_is_case_insensitive() {
        assert_eq!(parse_command("LIST").command, CommandWord::List);
        assert_eq!(parse_command("Undo").command, CommandWord::Undo);
        assert_eq!(parse_command("DeadLine x /by y").command, CommandWord::Deadline);
    }

    #[test]
    fn unknown_words_keep_their_remainder() {
        let parsed = parse_command("wat is this");
        assert_eq!(parsed.command, CommandWord::Unknown);
        assert_eq!(parsed.remainder, "is this");

        let blank = parse_command("   ");
        assert_eq!(blank.command, CommandWord::Unknown);
        assert!(blank.remainder.is_empty());
        assert!(blank.args.is_empty());
    }

    #[test]
    fn tab_separates_command_word() {
        let parsed = parse_command("find\tbook");
        assert_eq!(parsed.command, CommandWord::Find);
        assert_eq!(parsed.remainder, "book");
    }

    #[test]
    fn index_arg_requires_an_integer_token() {
        assert_eq!(parse_command("mark 2").index_arg(), Some(2));
        assert_eq!(parse_command("mark").index_arg(), None);
        assert_eq!(parse_command("mark abc").index_arg(), None);
        assert_eq!(parse_command("mark   ").index_arg(), None);
        assert_eq!(parse_command("delete -1").index_arg(), Some(-1));
        assert_eq!(parse_command("mark 1 extra").index_arg(), None);
        assert_eq!(parse_command("  unmark   3  ").index_arg(), Some(3));
        assert_eq!(
            parse_command("delete 99999999999999999999999").index_arg(),
            None
        );
    }

    #[test]
    fn mutating_commands() {
        for word in ["todo", "deadline", "event", "delete", "mark", "unmark"] {
            assert!(CommandWord::from_token(word).is_mutating(), "{word}");
        }
        for word in ["list", "on", "find", "undo", "bye", "nope"] {
            assert!(!CommandWord::from_token(word).is_mutating(), "{word}");
        }
    }

    #[test]
    fn splits_deadline_on_first_by() {
        let args = split_deadline("return book /by 2019-10-15").expect("split");
        assert_eq!(args.description, "return book");
        assert_eq!(args.by, "2019-10-15");

        assert_eq!(split_deadline("return book"), None);
        assert_eq!(split_deadline("/by 2019-10-15"), None);
        assert_eq!(split_deadline("return book /by   "), None);
    }

    #[test]
    fn splits_event_segments() {
        let args = split_event("project meeting /from 2019-08-06 1400 /to 1600").expect("split");
        assert_eq!(args.description, "project meeting");
        assert_eq!(args.from, "2019-08-06 1400");
        assert_eq!(args.to, "1600");
    }

    #[test]
    fn event_needs_ordered_non_empty_segments() {
        assert_eq!(split_event("meeting /to 1600 /from 1400"), None);
        assert_eq!(split_event("meeting /from 1400"), None);
        assert_eq!(split_event("/from 1400 /to 1600"), None);
        assert_eq!(split_event("meeting /from /to 1600"), None);
        assert_eq!(split_event("meeting /from 1400 /to"), None);
    }
}
