//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use flix_core::{ContentKind, ContentRecord};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// One line per title: id, kind, title, year, genre, rating.
pub fn record_line(record: &ContentRecord) {
    let kind = match record.kind {
        ContentKind::Movie => "MOVIE ".cyan(),
        ContentKind::Series => "SERIES".magenta(),
    };
    println!(
        "{:>14} {} {} ({}) {} {}",
        record.id.to_string().dimmed(),
        kind,
        record.title.bold(),
        record.year,
        record.genre.dimmed(),
        format!("★ {:.1}", record.rating).yellow()
    );
}

/// Print records as lines or JSON.
pub fn records<'a>(records: impl IntoIterator<Item = &'a ContentRecord>, as_json: bool) -> Result<()> {
    let records: Vec<&ContentRecord> = records.into_iter().collect();
    if as_json {
        return json(&records);
    }
    for record in records {
        record_line(record);
    }
    Ok(())
}
