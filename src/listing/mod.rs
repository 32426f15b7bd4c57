//! The listing engine: argument classification, directory walks and output.

mod output;
mod walk;

use crate::fs::{Entry, FsError, RemoteFs};
use crate::resolve::ResolvedPath;
use std::io::{self, Write};
use thiserror::Error;

pub use walk::Lister;

/// Options for one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingOptions {
    /// Emit detailed, column-aligned rows.
    pub long: bool,
    /// Include hidden entries and synthesize `.` and `..`.
    pub all: bool,
    /// Scale sizes with unit suffixes.
    pub human_readable: bool,
    /// List directory arguments as entries instead of listing their contents.
    pub dirs_as_plain: bool,
    /// Descend into every directory found during the walk.
    pub recurse: bool,
}

/// A path the engine produces output for.
///
/// `relative` and `absolute` are joined independently while walking: the display
/// form may start from `""` while the query form always starts from a fully
/// qualified path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingTarget {
    /// Path as shown to the user. `""` and `"."` mean "no prefix".
    pub relative: String,
    /// Path sent to the remote filesystem.
    pub absolute: String,
    pub entry: Entry,
}

impl ListingTarget {
    /// Rename an empty display path to `"."` for single-line rendering.
    fn into_plain(mut self) -> Self {
        if self.relative.is_empty() {
            self.relative = ".".to_string();
        }
        self
    }
}

/// Targets split into those rendered as a single line and those walked.
#[derive(Debug, Default)]
struct Listing {
    plain: Vec<ListingTarget>,
    descend: Vec<ListingTarget>,
}

/// Errors that abort a listing.
#[derive(Debug, Error)]
pub enum ListError {
    #[error(transparent)]
    Fs(#[from] FsError),
    #[error("write failed: {0}")]
    Output(#[from] io::Error),
}

/// List `paths` on `fs`, writing to `out` with the wall clock as "now".
pub fn ls<F, W>(
    fs: &F,
    paths: &[ResolvedPath],
    options: ListingOptions,
    out: W,
) -> Result<(), ListError>
where
    F: RemoteFs + ?Sized,
    W: Write,
{
    Lister::new(fs, options, out).run(paths)
}
