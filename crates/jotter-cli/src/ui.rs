//! Plain-text rendering of engine replies.

use jotter_core::datetime::display_date;
use jotter_engine::{CommandError, Reply};

const DIVIDER: &str = "____________________________________________________________";
const INDENT: &str = "  ";

pub fn welcome() -> String {
    block(["Hello! I'm Jotter, your task tracker.", "What can I do for you?"])
}

pub fn goodbye() -> String {
    render(&Reply::Bye)
}

/// Renders one reply as a divider-framed block.
pub fn render(reply: &Reply) -> String {
    block(body(reply))
}

fn body(reply: &Reply) -> Vec<String> {
    match reply {
        Reply::Added { task, count } => vec![
            "Got it. I've added this task:".to_string(),
            format!("{INDENT}{task}"),
            count_line(*count),
        ],
        Reply::Deleted { task, count } => vec![
            "Noted. I've removed this task:".to_string(),
            format!("{INDENT}{task}"),
            count_line(*count),
        ],
        Reply::Marked { task } => vec![
            "Nice! I've marked this task as done:".to_string(),
            format!("{INDENT}{task}"),
        ],
        Reply::Unmarked { task } => vec![
            "OK, I've marked this task as not done yet:".to_string(),
            format!("{INDENT}{task}"),
        ],
        Reply::Listed { tasks } => numbered("Here are the tasks in your list:", tasks),
        Reply::Found { tasks } if tasks.is_empty() => vec!["No matching tasks found.".to_string()],
        Reply::Found { tasks } => numbered("Here are the matching tasks in your list:", tasks),
        Reply::OnDate { date, tasks } if tasks.is_empty() => {
            vec![format!("No tasks found on {}.", display_date(*date))]
        }
        Reply::OnDate { date, tasks } => numbered(
            &format!("Here are the tasks on {}:", display_date(*date)),
            tasks,
        ),
        Reply::Undone { count } => vec![
            "Undid the last change.".to_string(),
            count_line(*count),
        ],
        Reply::NothingToUndo => vec!["Nothing to undo.".to_string()],
        Reply::Unknown => vec![
            "That's not a command I recognize.".to_string(),
            "Available commands: list, mark, unmark, delete, todo, deadline, event, on, find, undo, bye"
                .to_string(),
        ],
        Reply::Failed(err) => failure(err),
        Reply::Bye => vec!["See you again soon!".to_string()],
    }
}

fn failure(err: &CommandError) -> Vec<String> {
    let mut lines = vec![err.to_string()];
    lines.extend(err.hint().map(str::to_string));
    lines
}

fn count_line(count: usize) -> String {
    format!("Now you have {count} tasks in the list.")
}

fn numbered(header: &str, tasks: &[String]) -> Vec<String> {
    let mut lines = Vec::with_capacity(tasks.len() + 1);
    lines.push(header.to_string());
    lines.extend(
        tasks
            .iter()
            .enumerate()
            .map(|(i, task)| format!("{}.{task}", i + 1)),
    );
    lines
}

fn block<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    out.push_str(DIVIDER);
    out.push('\n');
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    out.push_str(DIVIDER);
    out.push('\n');
    out
}
