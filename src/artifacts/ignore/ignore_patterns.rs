use crate::artifacts::ignore::{COMMENT_PREFIX, IGNORE_FILE_NAME, WILDCARD};
use crate::errors::{IoResultExt, RepositoryError, Result};
use regex::Regex;
use std::path::Path;

/// Compiled ignore patterns
#[derive(Debug, Clone, Default)]
pub struct IgnorePatterns {
    patterns: Vec<Regex>,
}

impl IgnorePatterns {
    /// Load `.vcsignore` from the repository root; a missing file ignores nothing
    pub fn load(root: &Path) -> Result<Self> {
        let ignore_path = root.join(IGNORE_FILE_NAME);

        match std::fs::read_to_string(&ignore_path) {
            Ok(content) => Self::parse(&content),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(error).with_path(ignore_path),
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let patterns = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_PREFIX))
            .map(Self::compile)
            .collect::<Result<Vec<_>>>()?;

        Ok(IgnorePatterns { patterns })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Check a `/`-separated path relative to the repository root
    pub fn is_ignored(&self, relative_path: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| pattern.is_match(relative_path))
    }

    fn compile(pattern: &str) -> Result<Regex> {
        let expression = pattern
            .split(WILDCARD)
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");

        Regex::new(&expression).map_err(|source| RepositoryError::Ignore {
            pattern: pattern.to_string(),
            source,
        })
    }
}
