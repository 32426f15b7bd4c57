use std::io::Write;

use tracing::debug;

use super::output::Output;
use super::{ListError, Listing, ListingOptions, ListingTarget};
use crate::format::{long_row, Clock, SystemClock};
use crate::fs::{Entry, RemoteFs};
use crate::path::{join_display, join_query};
use crate::resolve::ResolvedPath;

/// Pseudo-entries synthesized at the top of every walked directory under `all`.
/// They are always rendered as single lines and never walked.
const SPECIAL_NAMES: [&str; 2] = [".", ".."];

/// Listing engine for one invocation.
///
/// Issues one blocking remote call at a time and walks depth-first.
pub struct Lister<'a, F: RemoteFs + ?Sized, W: Write, C: Clock = SystemClock> {
    fs: &'a F,
    options: ListingOptions,
    out: Output<W>,
    clock: C,
    /// Whether directories met from here on are walked. Starts as
    /// `!dirs_as_plain` for the arguments, then becomes `recurse`.
    descend: bool,
}

impl<'a, F: RemoteFs + ?Sized, W: Write> Lister<'a, F, W, SystemClock> {
    pub fn new(fs: &'a F, options: ListingOptions, out: W) -> Self {
        Self {
            fs,
            options,
            out: Output::new(out, options.long),
            clock: SystemClock,
            descend: !options.dirs_as_plain,
        }
    }
}

impl<'a, F: RemoteFs + ?Sized, W: Write, C: Clock> Lister<'a, F, W, C> {
    /// Replace the clock used for the time-or-year column.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> Lister<'a, F, W, C2> {
        Lister {
            fs: self.fs,
            options: self.options,
            out: self.out,
            clock,
            descend: self.descend,
        }
    }

    /// List every argument path. Buffered output is flushed even when the
    /// listing fails; the first error is returned afterwards.
    pub fn run(&mut self, paths: &[ResolvedPath]) -> Result<(), ListError> {
        let result = self.list_arguments(paths);
        if let Err(ListError::Fs(e)) = &result {
            debug!(path = e.path(), error = %e, "listing aborted");
        }
        let flushed = self.out.finish();
        result?;
        flushed?;
        Ok(())
    }

    /// Consume the lister and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn list_arguments(&mut self, paths: &[ResolvedPath]) -> Result<(), ListError> {
        let mut listing = Listing::default();
        for path in paths {
            debug!(path = %path.absolute, "stat argument");
            let entry = self.fs.stat(&path.absolute)?;
            let target = ListingTarget {
                relative: path.display.clone(),
                absolute: path.absolute.clone(),
                entry,
            };
            if self.descend && target.entry.is_dir() {
                listing.descend.push(target);
            } else {
                listing.plain.push(target.into_plain());
            }
        }

        self.descend = self.options.recurse;

        // A lone directory argument is listed without a header, like `ls dir`.
        if listing.plain.is_empty() && listing.descend.len() == 1 {
            self.walk(&listing.descend[0])
        } else {
            self.render(&listing)
        }
    }

    fn render(&mut self, listing: &Listing) -> Result<(), ListError> {
        for target in &listing.plain {
            self.emit(&target.relative, &target.entry)?;
        }
        for target in &listing.descend {
            self.out.header(&target.relative)?;
            self.walk(target)?;
        }
        Ok(())
    }

    fn walk(&mut self, dir: &ListingTarget) -> Result<(), ListError> {
        debug!(path = %dir.absolute, display = %dir.relative, "walking directory");

        if self.options.all {
            for special in SPECIAL_NAMES {
                let relative = join_display(&dir.relative, special);
                if self.options.long {
                    let absolute = join_query(&dir.absolute, special);
                    let entry = self.fs.stat(&absolute)?;
                    self.emit(&relative, &entry)?;
                } else {
                    self.out.line(&relative)?;
                }
            }
        }

        let children = self.fs.list_dir(&dir.absolute)?;
        debug!(path = %dir.absolute, count = children.len(), "listed directory");

        let mut listing = Listing::default();
        for entry in children {
            if !self.options.all && entry.is_hidden() {
                continue;
            }
            let relative = join_display(&dir.relative, &entry.name);
            let absolute = join_query(&dir.absolute, &entry.name);
            let target = ListingTarget {
                relative,
                absolute,
                entry,
            };
            if self.descend && target.entry.is_dir() {
                listing.descend.push(target.clone());
            }
            listing.plain.push(target);
        }

        self.render(&listing)
    }

    fn emit(&mut self, display: &str, entry: &Entry) -> Result<(), ListError> {
        if self.options.long {
            let now = self.clock.now();
            self.out
                .row(long_row(display, entry, self.options.human_readable, &now))?;
        } else {
            self.out.line(display)?;
        }
        Ok(())
    }
}
