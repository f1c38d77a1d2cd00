//! Line commands of the interactive shell and their effect on a session.

use clap::{Parser, Subcommand};
use client_core::{BookHubSession, DraftField, FilterField, SubmitOutcome};

use crate::render;

#[derive(Parser, Debug)]
#[command(multicall = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    /// Set a filter (`genre` or `q`) to the rest of the line; no text clears it.
    Filter {
        field: FilterField,
        #[arg(skip)]
        text: String,
    },
    /// Reload the list with the current filters.
    Apply,
    /// Show the list as last loaded.
    List,
    /// Set a draft field to the rest of the line; no text clears it.
    Set {
        field: DraftField,
        #[arg(skip)]
        text: String,
    },
    /// Show the draft.
    Draft,
    /// Submit the draft.
    Save,
    /// Leave the shell.
    #[command(alias = "exit")]
    Quit,
}

pub enum Flow {
    Continue(String),
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`; parse failures carry
/// clap's rendered message, help output included.
///
/// For `set` and `filter` only the command word and the field name go through
/// clap. The value is everything after the single separator that follows the
/// field name, whitespace included.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, String> {
    let (word, rest) = next_word(line);
    if word.is_empty() {
        return Ok(None);
    }

    let takes_text = matches!(word, "set" | "filter");
    let (field, text) = next_word(rest);
    let mut tokens = vec![word];
    if takes_text {
        tokens.extend((!field.is_empty()).then_some(field));
    } else {
        tokens.extend(rest.split_whitespace());
    }

    let mut command = ShellLine::try_parse_from(tokens)
        .map_err(|err| err.render().to_string())?
        .command;
    if let ShellCommand::Set { text: value, .. } | ShellCommand::Filter { text: value, .. } =
        &mut command
    {
        *value = text.to_string();
    }
    Ok(Some(command))
}

/// Splits off the first word. The remainder starts after exactly one
/// whitespace character.
fn next_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(end) => {
            let separator = input[end..].chars().next().map_or(1, char::len_utf8);
            (&input[..end], &input[end + separator..])
        }
        None => (input, ""),
    }
}

pub async fn execute(session: &BookHubSession, command: ShellCommand) -> Flow {
    let output = match command {
        ShellCommand::Filter { field, text } => {
            session.catalog().set_filter(field, text).await;
            "Filter updated; run `apply` to reload.".to_string()
        }
        ShellCommand::Apply => {
            session.catalog().reload().await;
            catalog_view(session).await
        }
        ShellCommand::List => catalog_view(session).await,
        ShellCommand::Set { field, text } => {
            session.draft().set_field(field, text).await;
            render::draft(&session.draft().draft().await, session.backend_url())
        }
        ShellCommand::Draft => {
            render::draft(&session.draft().draft().await, session.backend_url())
        }
        ShellCommand::Save => save(session).await,
        ShellCommand::Quit => return Flow::Quit,
    };
    Flow::Continue(output)
}

async fn save(session: &BookHubSession) -> String {
    let missing = session.draft().draft().await.missing_required();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|field| field.as_str()).collect();
        return format!("Please fill in: {}", names.join(", "));
    }

    match session.draft().submit().await {
        SubmitOutcome::Created => format!("Saved.\n{}", catalog_view(session).await),
        SubmitOutcome::Rejected(message) => format!("! {message}"),
    }
}

async fn catalog_view(session: &BookHubSession) -> String {
    let snapshot = session.catalog().snapshot().await;
    render::catalog(&snapshot, session.banner().await.as_deref())
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
