//! Strict parser for the index record
//!
//! The grammar is fixed: three `Field: value` lines, a blank line, then the
//! `Untracked`, `Unstaged` and `Staged` sections in that order, separated by
//! blank lines. A section header declares its entry count and exactly that many
//! entry lines must follow before the separator (or the end of the record for
//! the last section). Anything else is rejected with `CorruptIndex`; the parser
//! never truncates or reads past a declared count.

use crate::artifacts::index::index_record::{Index, unescape};
use crate::artifacts::index::{
    HEAD_FIELD, HELP_FIELD, MERGE_FIELD, NO_MERGE, STAGED_MARKER, STAGED_SECTION,
    UNSTAGED_MARKER, UNSTAGED_SECTION, UNTRACKED_MARKER, UNTRACKED_SECTION,
};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{RepositoryError, Result};
use std::collections::{BTreeMap, BTreeSet};

pub struct IndexParser<'c> {
    lines: Vec<&'c str>,
    position: usize,
}

impl<'c> IndexParser<'c> {
    pub fn new(content: &'c str) -> Self {
        // a single trailing newline is tolerated, the writer never emits one
        let content = content.strip_suffix('\n').unwrap_or(content);

        IndexParser {
            lines: content.split('\n').collect(),
            position: 0,
        }
    }

    pub fn parse(mut self) -> Result<Index> {
        let head = self.field(HEAD_FIELD)?;
        let merge = self.field(MERGE_FIELD)?;
        let help = self.field(HELP_FIELD)?;
        self.separator()?;

        let untracked_lines = self.section(UNTRACKED_SECTION, UNTRACKED_MARKER)?;
        self.separator()?;
        let unstaged_lines = self.section(UNSTAGED_SECTION, UNSTAGED_MARKER)?;
        self.separator()?;
        let staged_lines = self.section(STAGED_SECTION, STAGED_MARKER)?;

        if self.position < self.lines.len() {
            return Err(self.error(self.position, "unexpected content after the staged section"));
        }

        let mut untracked = BTreeSet::new();
        for (line, entry) in untracked_lines {
            let path = self.path(line, entry)?;
            if !untracked.insert(path) {
                return Err(self.error(line, "duplicate untracked path"));
            }
        }

        let unstaged = self.tracked_entries(unstaged_lines, &untracked)?;
        let staged = self.tracked_entries(staged_lines, &untracked)?;

        if let Some(path) = staged.keys().find(|path| unstaged.contains_key(*path)) {
            return Err(RepositoryError::corrupt_index(
                0,
                format!("path {path:?} is both staged and unstaged"),
            ));
        }

        Ok(Index {
            head,
            merge: (merge != NO_MERGE).then_some(merge),
            help,
            untracked,
            unstaged,
            staged,
        })
    }

    fn next_line(&mut self, expected: &str) -> Result<(usize, &'c str)> {
        let index = self.position;
        let line = self
            .lines
            .get(index)
            .copied()
            .ok_or_else(|| self.error(index, format!("unexpected end of index, expected {expected}")))?;

        self.position += 1;
        Ok((index, line))
    }

    fn field(&mut self, name: &str) -> Result<String> {
        let (index, line) = self.next_line(name)?;

        let value = line
            .strip_prefix(name)
            .and_then(|rest| rest.strip_prefix(": "))
            .ok_or_else(|| self.error(index, format!("expected `{name}: <value>`")))?;

        unescape(value).ok_or_else(|| self.error(index, "invalid escape sequence"))
    }

    fn separator(&mut self) -> Result<()> {
        let (index, line) = self.next_line("a blank line")?;

        if !line.is_empty() {
            return Err(self.error(index, "expected a blank line"));
        }

        Ok(())
    }

    /// Read a section header and exactly the declared number of entries
    ///
    /// Entries are returned with their line index and the marker stripped.
    fn section(&mut self, name: &str, marker: char) -> Result<Vec<(usize, &'c str)>> {
        let (index, line) = self.next_line(name)?;

        let count = line
            .strip_prefix(name)
            .and_then(|rest| rest.strip_prefix(" ("))
            .and_then(|rest| rest.strip_suffix(')'))
            .and_then(|count| count.parse::<usize>().ok())
            .ok_or_else(|| self.error(index, format!("expected `{name} (<count>)` section header")))?;

        let mut entries = Vec::with_capacity(count.min(self.lines.len()));
        for _ in 0..count {
            let (index, line) = self.next_line(&format!("{count} {name} entries"))?;

            let entry = line
                .strip_prefix(marker)
                .and_then(|rest| rest.strip_prefix(' '))
                .ok_or_else(|| {
                    self.error(index, format!("expected `{marker} ` entry in {name} section"))
                })?;

            entries.push((index, entry));
        }

        Ok(entries)
    }

    fn tracked_entries(
        &self,
        lines: Vec<(usize, &str)>,
        untracked: &BTreeSet<String>,
    ) -> Result<BTreeMap<String, ObjectId>> {
        let mut entries = BTreeMap::new();

        for (line, entry) in lines {
            let (oid, path) = entry
                .split_once(' ')
                .ok_or_else(|| self.error(line, "expected `<digest> <path>`"))?;
            let oid = ObjectId::try_parse(oid).map_err(|_| self.error(line, "invalid digest"))?;
            let path = self.path(line, path)?;

            if untracked.contains(&path) {
                return Err(self.error(line, "path is also listed as untracked"));
            }
            if entries.insert(path, oid).is_some() {
                return Err(self.error(line, "duplicate path"));
            }
        }

        Ok(entries)
    }

    fn path(&self, line: usize, raw: &str) -> Result<String> {
        unescape(raw).ok_or_else(|| self.error(line, "invalid escape sequence in path"))
    }

    /// Errors report 1-based line numbers
    fn error(&self, index: usize, reason: impl Into<String>) -> RepositoryError {
        RepositoryError::corrupt_index(index + 1, reason)
    }
}
