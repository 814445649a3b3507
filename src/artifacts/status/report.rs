/// Outcome of reconciling the index against the working tree.
///
/// All three lists hold forward-slash-relative paths in lexicographic
/// order, so repeated runs over unchanged inputs print identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    /// Tracked files whose current content hashes differently
    pub changed: Vec<String>,
    /// Files on disk with no index entry
    pub untracked: Vec<String>,
    /// Index entries with no file left on disk
    pub deleted: Vec<String>,
}

impl StatusReport {
    pub fn is_clean(&self) -> bool {
        self.changed.is_empty() && self.untracked.is_empty() && self.deleted.is_empty()
    }
}
