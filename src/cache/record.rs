//! Record Codec Module
//!
//! Grammar, encoding and search for question-title records.
//!
//! A record is `<digits>. <name>: <difficulty>` and is stored followed by the
//! terminator `"; "`. A partition's value is nothing more than those encoded
//! records back to back, so a name may not itself contain the terminator.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CacheError, Result};

// == Public Constants ==
/// Appended to every record when it is written to a partition
pub const RECORD_TERMINATOR: &str = "; ";

/// `<digits>. <name>: <difficulty>`; digits are ASCII only, name is greedy so
/// it may contain `": "`.
static TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)\.\s(.+):\s(?i:(easy|medium|hard))$").expect("title pattern is valid")
});

// == Difficulty ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CacheError;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(CacheError::InvalidFormat(format!(
                "unknown difficulty '{}'",
                s
            ))),
        }
    }
}

// == Record ==
/// One parsed question title.
///
/// The title text is kept exactly as written; accessors slice into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Question number, digits as written (leading zeros kept)
    pub number: String,
    pub name: String,
    pub difficulty: Difficulty,
    title: String,
    numbered_end: usize,
    label_start: usize,
}

impl Record {
    /// Parses a full title such as `"1. Two Sum: Easy"`.
    pub fn parse(title: &str) -> Result<Self> {
        if title.contains(RECORD_TERMINATOR) {
            return Err(CacheError::InvalidFormat(format!(
                "title '{}' contains the record terminator '{}'",
                title, RECORD_TERMINATOR
            )));
        }

        let caps = TITLE_PATTERN.captures(title).ok_or_else(|| {
            CacheError::InvalidFormat(format!(
                "title '{}' does not match '<number>. <name>: <Easy|Medium|Hard>'",
                title
            ))
        })?;
        let name = &caps[2];
        let label = &caps[3];

        Ok(Self {
            number: caps[1].to_string(),
            name: name.to_string(),
            difficulty: label.parse()?,
            title: title.to_string(),
            numbered_end: caps.get(2).map_or(0, |m| m.end()),
            label_start: caps.get(3).map_or(title.len(), |m| m.start()),
        })
    }

    /// Title without the difficulty, as stored, e.g. `"1. Two Sum"`.
    pub fn numbered_title(&self) -> &str {
        &self.title[..self.numbered_end]
    }

    /// Difficulty with its stored spelling, e.g. `"easy"`.
    pub fn difficulty_label(&self) -> &str {
        &self.title[self.label_start..]
    }

    /// True if `name` equals this record's name, ignoring case.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

// == Codec Operations ==
/// Returns true if `title` satisfies the record grammar.
pub fn validate(title: &str) -> bool {
    Record::parse(title).is_ok()
}

/// Returns the append-ready payload `"<title>; "`.
pub fn encode(title: &str) -> Result<String> {
    Record::parse(title)?;
    Ok(format!("{}{}", title, RECORD_TERMINATOR))
}

/// Returns the bare question name, e.g. `"Two Sum"` for `"1. Two Sum: Easy"`.
pub fn extract_name(title: &str) -> Result<String> {
    Record::parse(title).map(|record| record.name)
}

/// Parses every record in a partition's raw content, in storage order.
///
/// Fragments that do not parse are skipped.
pub fn records(content: &str) -> impl Iterator<Item = Record> + '_ {
    content
        .split_terminator(RECORD_TERMINATOR)
        .filter(|fragment| !fragment.is_empty())
        .filter_map(|fragment| match Record::parse(fragment) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("Skipping unparseable fragment '{}': {}", fragment, e);
                None
            }
        })
}

/// Finds the first record in `content` whose whole name matches `name`.
pub fn search(content: &str, name: &str) -> Option<Record> {
    records(content).find(|record| record.has_name(name))
}
