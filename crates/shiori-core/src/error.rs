/// A fetched entry that cannot be used as-is
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    #[error("Malformed markup at byte {position}: {reason}")]
    Markup { position: u64, reason: String },

    #[error("Unbalanced braces in stylesheet at byte {0}")]
    UnbalancedStylesheet(usize),
}

/// Errors surfaced from a resolution call.
///
/// "Not found" is never an error; only configuration problems are.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("No dictionaries configured")]
    NoDictionariesConfigured,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseWordError {
    #[error("Empty word")]
    EmptyWord,

    #[error("Unclosed '{bracket}' in \"{input}\"")]
    UnclosedBracket { bracket: char, input: String },
}
