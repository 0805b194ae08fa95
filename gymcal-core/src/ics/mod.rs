//! ICS file generation and parsing.
//!
//! This module handles reading and writing .ics files according to RFC 5545.

mod generate;
mod parse;

pub use generate::generate_ics;
pub use parse::{ParsedCalendar, ParsedEvent, parse_calendar};

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::GymcalResult;
use crate::event::CalendarDocument;

/// Serialize `doc` and write it to `path`, replacing any existing file.
pub fn write_ics(doc: &CalendarDocument, path: &Path) -> GymcalResult<()> {
    let content = generate_ics(doc)?;

    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    file.flush()?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote calendar");
    Ok(())
}
