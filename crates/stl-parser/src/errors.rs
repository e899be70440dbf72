use std::{
    collections::TryReserveError,
    error::Error,
    fmt::{Debug, Display},
    io,
    num::ParseFloatError,
    path::{Path, PathBuf},
};

pub struct StlParsingError {
    path: Option<PathBuf>,
    location: Option<ErrorLocation>,
    detail: StlParsingErrorDetail,
}

/// Where in the source an error was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorLocation {
    /// 1-based line number and the raw line, for ascii files.
    Line { number: usize, content: String },
    /// Offset from the start of the buffer, for binary files.
    ByteOffset(usize),
}

#[derive(Debug, thiserror::Error)]
pub enum StlParsingErrorDetail {
    #[error("failed to read file: {0}")]
    FailedToReadFile(#[source] io::Error),

    #[error("file is too small to be an STL file ({len} bytes)")]
    TooSmall { len: usize },

    #[error("malformed binary header: {remaining_bytes} bytes left, a header needs 84")]
    MalformedHeader { remaining_bytes: usize },

    #[error(
        "malformed facet count: {facet_count} facets need {required_bytes} bytes \
        but only {remaining_bytes} are left"
    )]
    MalformedFacetCount {
        facet_count: u32,
        required_bytes: u64,
        remaining_bytes: usize,
    },

    #[error("found \"{0}\" block nested in an open one")]
    NestedBlock(&'static str),

    #[error("found \"{0}\" out of sync")]
    OutOfSyncToken(&'static str),

    #[error("failed to convert \"{token}\" to a float: {source}")]
    NumberFormatError {
        token: String,
        #[source]
        source: InvalidNumber,
    },

    #[error("expected {expected} components, found {found}")]
    NotEnoughComponents { expected: usize, found: usize },

    #[error("reached the end of the file inside an open solid")]
    UnterminatedSolid,

    #[error("{count} unexpected bytes after the last facet")]
    TrailingBytes { count: usize },

    #[error("allocation failure: {0}")]
    AllocationFailure(#[source] TryReserveError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidNumber {
    #[error("token is not valid UTF-8")]
    NotUtf8,
    #[error(transparent)]
    Unparsable(#[from] ParseFloatError),
    #[error("value is not finite")]
    NotFinite,
}

impl StlParsingError {
    pub(crate) fn at_line(number: usize, line: &[u8], detail: StlParsingErrorDetail) -> Self {
        Self {
            path: None,
            location: Some(ErrorLocation::Line {
                number,
                content: String::from_utf8_lossy(line).into_owned(),
            }),
            detail,
        }
    }

    pub(crate) fn at_offset(offset: usize, detail: StlParsingErrorDetail) -> Self {
        Self {
            path: None,
            location: Some(ErrorLocation::ByteOffset(offset)),
            detail,
        }
    }

    pub(crate) fn with_path(mut self, path: &Path) -> Self {
        self.path = Some(path.to_path_buf());
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn location(&self) -> Option<&ErrorLocation> {
        self.location.as_ref()
    }

    pub fn detail(&self) -> &StlParsingErrorDetail {
        &self.detail
    }
}

impl From<StlParsingErrorDetail> for StlParsingError {
    fn from(detail: StlParsingErrorDetail) -> Self {
        Self {
            path: None,
            location: None,
            detail,
        }
    }
}

impl Debug for StlParsingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "StlParsingError {{")?;
        if let Some(path) = self.path.as_ref() {
            writeln!(f, "\tfile: \"{}\"", path.display())?;
        }
        match self.location.as_ref() {
            Some(ErrorLocation::Line { number, content }) => {
                writeln!(f, "\tline: {number}")?;
                writeln!(f, "\tline_content: \"{content}\"")?;
            }
            Some(ErrorLocation::ByteOffset(offset)) => writeln!(f, "\tbyte_offset: {offset}")?,
            None => (),
        }
        writeln!(f, "\tdetails: {:?}", self.detail)?;
        write!(f, "}}")
    }
}

impl Display for StlParsingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse STL")?;
        if let Some(path) = self.path.as_ref() {
            write!(f, " file \"{}\"", path.display())?;
        }
        match self.location.as_ref() {
            Some(ErrorLocation::Line { number, content }) => {
                write!(f, " at line {number} (\"{}\")", content.trim())?
            }
            Some(ErrorLocation::ByteOffset(offset)) => write!(f, " at byte {offset}")?,
            None => (),
        }
        write!(f, ": {}", self.detail)
    }
}

impl Error for StlParsingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.detail)
    }
}
