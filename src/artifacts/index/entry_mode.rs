use crate::errors::IndexError;

/// File mode recorded for a tracked file.
///
/// Only regular and executable files are representable; directories are
/// implied by entry paths and never stored. The raw mode word from the
/// binary parse is validated here instead of being trusted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryMode {
    #[default]
    Regular,
    Executable,
}

impl EntryMode {
    pub const REGULAR: u32 = 0o100644;
    pub const EXECUTABLE: u32 = 0o100755;

    pub fn as_u32(&self) -> u32 {
        match self {
            EntryMode::Regular => Self::REGULAR,
            EntryMode::Executable => Self::EXECUTABLE,
        }
    }
}

impl TryFrom<u32> for EntryMode {
    type Error = IndexError;

    fn try_from(mode: u32) -> Result<Self, Self::Error> {
        match mode {
            Self::REGULAR => Ok(EntryMode::Regular),
            Self::EXECUTABLE => Ok(EntryMode::Executable),
            other => Err(IndexError::MalformedEntry {
                reason: format!("unsupported file mode {other:o}"),
            }),
        }
    }
}

impl std::fmt::Display for EntryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:06o}", self.as_u32())
    }
}
