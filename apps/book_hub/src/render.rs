//! Plain-text views of the catalog and the draft form.

use std::fmt::{self, Write as _};

use client_core::{CatalogSnapshot, DraftField, DraftForm};
use shared::domain::Book;

pub const EMPTY_CATALOG: &str = "No books yet. Add one using the form.";

pub fn catalog(snapshot: &CatalogSnapshot, banner: Option<&str>) -> String {
    let mut out = String::new();
    // Writing into a String never fails.
    let _ = write_catalog(&mut out, snapshot, banner);
    out
}

pub fn draft(form: &DraftForm, backend_url: &str) -> String {
    let mut out = String::new();
    let _ = write_draft(&mut out, form, backend_url);
    out
}

fn write_catalog(
    out: &mut impl fmt::Write,
    snapshot: &CatalogSnapshot,
    banner: Option<&str>,
) -> fmt::Result {
    let loading = snapshot.status.is_loading();

    if loading {
        writeln!(out, "Loading books...")?;
    }
    if let Some(message) = banner {
        writeln!(out, "! {message}")?;
    }

    for book in &snapshot.books {
        write_card(out, book)?;
    }

    if snapshot.books.is_empty() && !loading {
        writeln!(out, "{EMPTY_CATALOG}")?;
    }
    Ok(())
}

fn write_card(out: &mut impl fmt::Write, book: &Book) -> fmt::Result {
    writeln!(out, "[{}] {}", book.genre.to_uppercase(), book.title)?;
    writeln!(out, "  by {}", book.author)?;
    if let Some(description) = present(&book.description) {
        writeln!(out, "  {description}")?;
    }
    if let Some(cover) = present(&book.cover_url) {
        writeln!(out, "  cover: {cover}")?;
    }
    if let Some(content) = present(&book.content) {
        writeln!(out, "  excerpt:")?;
        for line in content.lines() {
            writeln!(out, "    {line}")?;
        }
    }
    if let Some(audio) = present(&book.audio_summary_url) {
        writeln!(out, "  audio summary: {audio}")?;
    }
    if !book.tags().is_empty() {
        let tags: Vec<String> = book.tags().iter().map(|t| format!("#{t}")).collect();
        writeln!(out, "  {}", tags.join(" "))?;
    }
    writeln!(out)
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn write_draft(out: &mut impl fmt::Write, form: &DraftForm, backend_url: &str) -> fmt::Result {
    writeln!(out, "Add a Book")?;
    for field in DraftField::ALL {
        let marker = if DraftField::REQUIRED.contains(&field) {
            "*"
        } else {
            " "
        };
        writeln!(out, " {marker}{:<18} {}", field.as_str(), form.get(field))?;
    }
    writeln!(out, "Backend: {backend_url}")
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
