use crate::artifacts::index::index_parser::IndexParser;
use crate::artifacts::index::{
    DEFAULT_HEAD, DEFAULT_HELP, HEAD_FIELD, HELP_FIELD, MERGE_FIELD, NO_MERGE, STAGED_MARKER,
    STAGED_SECTION, UNSTAGED_MARKER, UNSTAGED_SECTION, UNTRACKED_MARKER, UNTRACKED_SECTION,
};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use std::collections::{BTreeMap, BTreeSet};

/// The staging record
///
/// `staged`, `unstaged` and `untracked` never share a path. A merge marker
/// whose value is literally `None` cannot be represented, since that is how an
/// absent marker is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    pub head: String,
    pub merge: Option<String>,
    pub help: String,
    pub untracked: BTreeSet<String>,
    pub unstaged: BTreeMap<String, ObjectId>,
    pub staged: BTreeMap<String, ObjectId>,
}

/// Which part of the index a path currently belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCategory {
    Staged,
    Unstaged,
    Untracked,
}

impl Default for Index {
    fn default() -> Self {
        Index {
            head: DEFAULT_HEAD.to_string(),
            merge: None,
            help: DEFAULT_HELP.to_string(),
            untracked: BTreeSet::new(),
            unstaged: BTreeMap::new(),
            staged: BTreeMap::new(),
        }
    }
}

impl Index {
    pub fn parse(content: &str) -> Result<Self> {
        IndexParser::new(content).parse()
    }

    pub fn serialize(&self) -> String {
        self.to_string()
    }

    /// Every entry whose content is recorded in the object database
    pub fn content_entries(&self) -> impl Iterator<Item = (&String, &ObjectId)> {
        self.staged.iter().chain(self.unstaged.iter())
    }

    pub fn has_content(&self) -> bool {
        !self.staged.is_empty() || !self.unstaged.is_empty()
    }
}

impl std::fmt::Display for Index {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let merge = self.merge.as_deref().map(escape).unwrap_or(NO_MERGE.into());

        writeln!(f, "{HEAD_FIELD}: {}", escape(&self.head))?;
        writeln!(f, "{MERGE_FIELD}: {merge}")?;
        writeln!(f, "{HELP_FIELD}: {}", escape(&self.help))?;
        writeln!(f)?;

        writeln!(f, "{UNTRACKED_SECTION} ({})", self.untracked.len())?;
        for path in &self.untracked {
            writeln!(f, "{UNTRACKED_MARKER} {}", escape(path))?;
        }
        writeln!(f)?;

        writeln!(f, "{UNSTAGED_SECTION} ({})", self.unstaged.len())?;
        for (path, oid) in &self.unstaged {
            writeln!(f, "{UNSTAGED_MARKER} {oid} {}", escape(path))?;
        }
        writeln!(f)?;

        // the record has no trailing newline
        write!(f, "{STAGED_SECTION} ({})", self.staged.len())?;
        for (path, oid) in &self.staged {
            write!(f, "\n{STAGED_MARKER} {oid} {}", escape(path))?;
        }

        Ok(())
    }
}

pub(crate) fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            c => escaped.push(c),
        }
    }

    escaped
}

/// Reverse of [`escape`]; `None` on a dangling or unknown escape sequence
pub(crate) fn unescape(value: &str) -> Option<String> {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }

        match chars.next()? {
            '\\' => unescaped.push('\\'),
            'n' => unescaped.push('\n'),
            'r' => unescaped.push('\r'),
            _ => return None,
        }
    }

    Some(unescaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn populated_index() -> Index {
        let mut index = Index::default();
        index.untracked.insert("notes.txt".to_string());
        index
            .unstaged
            .insert("src/lib.rs".to_string(), ObjectId::digest("old lib"));
        index
            .staged
            .insert("a.txt".to_string(), ObjectId::digest("hello"));
        index
    }

    #[test]
    fn default_index_serialization() {
        let expected = "Head: main\n\
                        Merge: None\n\
                        Help: g?\n\
                        \n\
                        Untracked (0)\n\
                        \n\
                        Unstaged (0)\n\
                        \n\
                        Staged (0)";

        assert_eq!(Index::default().serialize(), expected);
    }

    #[rstest]
    fn populated_index_serialization(populated_index: Index) {
        let expected = format!(
            "Head: main\nMerge: None\nHelp: g?\n\n\
             Untracked (1)\n? notes.txt\n\n\
             Unstaged (1)\nM {} src/lib.rs\n\n\
             Staged (1)\nA aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d a.txt",
            ObjectId::digest("old lib")
        );

        assert_eq!(populated_index.serialize(), expected);
    }

    #[rstest]
    fn content_entries_cover_staged_and_unstaged(populated_index: Index) {
        let entries = populated_index
            .content_entries()
            .map(|(path, oid)| (path.as_str(), oid.clone()))
            .collect::<Vec<_>>();

        assert_eq!(
            entries,
            vec![
                ("a.txt", ObjectId::digest("hello")),
                ("src/lib.rs", ObjectId::digest("old lib")),
            ]
        );
        assert!(populated_index.has_content());
    }

    #[test]
    fn escaping_round_trips_awkward_paths() {
        let path = "dir\\with\nnewline\rand ? markers";

        assert_eq!(escape(path), "dir\\\\with\\nnewline\\rand ? markers");
        assert_eq!(unescape(&escape(path)).as_deref(), Some(path));
        assert_eq!(unescape("dangling\\"), None);
        assert_eq!(unescape("unknown\\t"), None);
    }

    fn arb_oid() -> impl Strategy<Value = ObjectId> {
        any::<Vec<u8>>().prop_map(|bytes| ObjectId::digest(bytes))
    }

    fn arb_index() -> impl Strategy<Value = Index> {
        let paths = proptest::collection::btree_set(any::<String>(), 0..12);
        let merge = proptest::option::of(any::<String>().prop_filter("reserved", |m| m != NO_MERGE));

        (
            any::<String>(),
            merge,
            any::<String>(),
            paths,
            proptest::collection::vec(arb_oid(), 12),
        )
            .prop_map(|(head, merge, help, paths, oids)| {
                let mut index = Index {
                    head,
                    merge,
                    help,
                    ..Index::default()
                };

                // spread the distinct paths over the three categories
                for (i, path) in paths.into_iter().enumerate() {
                    match i % 3 {
                        0 => {
                            index.untracked.insert(path);
                        }
                        1 => {
                            index.unstaged.insert(path, oids[i].clone());
                        }
                        _ => {
                            index.staged.insert(path, oids[i].clone());
                        }
                    }
                }

                index
            })
    }

    proptest! {
        #[test]
        fn parse_is_the_inverse_of_serialize(index in arb_index()) {
            let serialized = index.serialize();

            prop_assert_eq!(Index::parse(&serialized).unwrap(), index);
        }
    }
}
