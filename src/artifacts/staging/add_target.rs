/// Specifiers accepted as "every discoverable file"
pub const ALL_FILES_DIRECTIVES: [&str; 2] = ["*", "--all"];

/// What `add` should stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddTarget {
    /// Every discoverable file in the working tree
    All,
    /// Path specifiers relative to the repository root; a directory stands
    /// for every discoverable file below it
    Paths(Vec<String>),
}

impl AddTarget {
    /// Build a target from raw command-line specifiers
    pub fn from_specifiers(specifiers: Vec<String>) -> Self {
        if specifiers
            .iter()
            .any(|specifier| ALL_FILES_DIRECTIVES.contains(&specifier.as_str()))
        {
            AddTarget::All
        } else {
            AddTarget::Paths(specifiers)
        }
    }
}
