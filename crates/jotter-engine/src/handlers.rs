//! One handler per command word. Handlers validate fully before touching the
//! list, so every user-facing rejection leaves it unchanged.

use anyhow::Result;
use jotter_core::command::{split_deadline, split_event};
use jotter_core::{
    parse_date_only, parse_date_time, parse_event_end, CommandWord, ParsedCommand, Task,
    TaskList, TaskListError,
};

use crate::error::{CommandError, DateField};
use crate::reply::Reply;

/// Runs every command except `undo` and `bye`, which the engine owns.
///
/// User mistakes come back as a [`CommandError`] inside the `anyhow::Error`;
/// anything else is an internal failure.
pub(crate) fn run(parsed: &ParsedCommand, tasks: &mut TaskList) -> Result<Reply> {
    match parsed.command {
        CommandWord::List => Ok(list(tasks)),
        CommandWord::Todo => add_todo(&parsed.remainder, tasks),
        CommandWord::Deadline => add_deadline(&parsed.remainder, tasks),
        CommandWord::Event => add_event(&parsed.remainder, tasks),
        CommandWord::Mark => {
            let index = position(parsed, tasks, "mark")?;
            let task = tasks.mark_done(index)?;
            Ok(Reply::Marked {
                task: task.display(),
            })
        }
        CommandWord::Unmark => {
            let index = position(parsed, tasks, "unmark")?;
            let task = tasks.mark_not_done(index)?;
            Ok(Reply::Unmarked {
                task: task.display(),
            })
        }
        CommandWord::Delete => {
            let index = position(parsed, tasks, "delete")?;
            let removed = tasks.remove(index)?;
            Ok(Reply::Deleted {
                task: removed.display(),
                count: tasks.len(),
            })
        }
        CommandWord::Find => find(&parsed.remainder, tasks),
        CommandWord::On => on(&parsed.remainder, tasks),
        CommandWord::Unknown => Ok(Reply::Unknown),
        CommandWord::Undo | CommandWord::Bye => {
            anyhow::bail!("`{:?}` must be handled by the engine", parsed.command)
        }
    }
}

fn list(tasks: &TaskList) -> Reply {
    Reply::Listed {
        tasks: tasks.iter().map(Task::display).collect(),
    }
}

fn position(
    parsed: &ParsedCommand,
    tasks: &TaskList,
    verb: &'static str,
) -> Result<usize, CommandError> {
    parsed
        .index_arg()
        .and_then(|number| tasks.position_of(number))
        .ok_or(CommandError::InvalidIndex { verb })
}

fn add_todo(remainder: &str, tasks: &mut TaskList) -> Result<Reply> {
    if remainder.is_empty() {
        return Err(CommandError::MissingDescription.into());
    }
    let task = Task::todo(remainder).map_err(CommandError::from)?;
    add(task, tasks)
}

fn add_deadline(remainder: &str, tasks: &mut TaskList) -> Result<Reply> {
    let args = split_deadline(remainder).ok_or(CommandError::DeadlineUsage)?;
    let by = parse_date_time(args.by).ok_or_else(|| CommandError::BadDate {
        field: DateField::Deadline,
        raw: args.by.to_string(),
    })?;
    let task = Task::deadline(args.description, by).map_err(CommandError::from)?;
    add(task, tasks)
}

fn add_event(remainder: &str, tasks: &mut TaskList) -> Result<Reply> {
    let args = split_event(remainder).ok_or(CommandError::EventUsage)?;
    let from = parse_date_time(args.from).ok_or_else(|| CommandError::BadDate {
        field: DateField::EventStart,
        raw: args.from.to_string(),
    })?;
    let to = parse_event_end(&from, args.to).ok_or_else(|| CommandError::BadDate {
        field: DateField::EventEnd,
        raw: args.to.to_string(),
    })?;
    if to.at < from.at {
        return Err(CommandError::EndBeforeStart.into());
    }
    let task = Task::event(args.description, from, to).map_err(CommandError::from)?;
    add(task, tasks)
}

fn add(task: Task, tasks: &mut TaskList) -> Result<Reply> {
    let display = task.display();
    match tasks.push_unique(task) {
        Ok(count) => Ok(Reply::Added {
            task: display,
            count,
        }),
        Err(TaskListError::Duplicate { description }) => {
            Err(CommandError::Duplicate { description }.into())
        }
        Err(err) => Err(err.into()),
    }
}

fn find(remainder: &str, tasks: &TaskList) -> Result<Reply> {
    if remainder.is_empty() {
        return Err(CommandError::MissingKeyword.into());
    }
    Ok(Reply::Found {
        tasks: tasks
            .iter()
            .filter(|task| task.matches_keyword(remainder))
            .map(Task::display)
            .collect(),
    })
}

fn on(remainder: &str, tasks: &TaskList) -> Result<Reply> {
    if remainder.is_empty() {
        return Err(CommandError::MissingDate.into());
    }
    let date = parse_date_only(remainder).ok_or_else(|| CommandError::BadDate {
        field: DateField::On,
        raw: remainder.to_string(),
    })?;
    Ok(Reply::OnDate {
        date,
        tasks: tasks
            .iter()
            .filter(|task| task.occurs_on(date))
            .map(Task::display)
            .collect(),
    })
}
