//! Turns command-line arguments into display/query path pairs.
//!
//! Relative arguments are resolved against the remote home directory, and
//! segments with glob metacharacters are expanded against directory listings.
//! The display side keeps the user's spelling; the query side is always a
//! cleaned absolute path.

use crate::fs::{FsError, RemoteFs};
use crate::path::{clean, has_glob, join_display, join_query};
use globset::Glob;
use thiserror::Error;
use tracing::debug;

/// One argument after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Text shown to the user. Empty when no argument was given.
    pub display: String,
    /// Absolute path queried on the remote filesystem.
    pub absolute: String,
}

impl ResolvedPath {
    fn child(&self, name: &str) -> Self {
        Self {
            display: join_display(&self.display, name),
            absolute: join_query(&self.absolute, name),
        }
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Fs(#[from] FsError),
    #[error("{0}: no such file or directory")]
    NoMatch(String),
    #[error("{pattern}: invalid pattern: {message}")]
    BadPattern { pattern: String, message: String },
}

/// Resolve every argument, in order. With no arguments the home directory is
/// listed under an empty display path.
pub fn resolve_paths<F: RemoteFs + ?Sized>(
    fs: &F,
    args: &[String],
) -> Result<Vec<ResolvedPath>, ResolveError> {
    let mut home: Option<String> = None;
    let mut home_dir = || -> Result<String, FsError> {
        if let Some(home) = &home {
            return Ok(home.clone());
        }
        let fetched = fs.home_dir()?;
        debug!(home = %fetched, "resolved home directory");
        home = Some(fetched.clone());
        Ok(fetched)
    };

    if args.is_empty() {
        return Ok(vec![ResolvedPath {
            display: String::new(),
            absolute: home_dir()?,
        }]);
    }

    let mut resolved = Vec::new();
    for arg in args {
        let root = if arg.starts_with('/') {
            ResolvedPath {
                display: "/".to_string(),
                absolute: "/".to_string(),
            }
        } else {
            ResolvedPath {
                display: String::new(),
                absolute: home_dir()?,
            }
        };
        resolved.extend(expand(fs, arg, root)?);
    }
    Ok(resolved)
}

fn expand<F: RemoteFs + ?Sized>(
    fs: &F,
    arg: &str,
    root: ResolvedPath,
) -> Result<Vec<ResolvedPath>, ResolveError> {
    let segments: Vec<&str> = arg.split('/').filter(|s| !s.is_empty()).collect();

    if !segments.iter().any(|s| has_glob(s)) {
        return Ok(vec![ResolvedPath {
            display: arg.to_string(),
            absolute: clean(&format!("{}/{}", root.absolute, arg)),
        }]);
    }

    let mut frontier = vec![root];
    for (i, segment) in segments.iter().enumerate() {
        let last = i + 1 == segments.len();
        let mut next = Vec::new();

        if has_glob(segment) {
            let matcher = Glob::new(segment)
                .map_err(|e| ResolveError::BadPattern {
                    pattern: arg.to_string(),
                    message: e.kind().to_string(),
                })?
                .compile_matcher();
            let match_hidden = segment.starts_with('.');

            for parent in &frontier {
                for entry in fs.list_dir(&parent.absolute)? {
                    if entry.is_hidden() && !match_hidden {
                        continue;
                    }
                    // Only directories can hold the remaining segments.
                    if !last && !entry.is_dir() {
                        continue;
                    }
                    if matcher.is_match(&entry.name) {
                        next.push(parent.child(&entry.name));
                    }
                }
            }
        } else {
            next.extend(frontier.iter().map(|parent| parent.child(segment)));
        }

        if next.is_empty() {
            return Err(ResolveError::NoMatch(arg.to_string()));
        }
        frontier = next;
    }

    debug!(pattern = arg, matches = frontier.len(), "expanded glob");
    Ok(frontier)
}
