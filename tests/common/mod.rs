#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, TimeZone};
use hdfs_ls::format::FixedClock;
use hdfs_ls::fs::MemoryFs;
use hdfs_ls::listing::{ListError, Lister, ListingOptions};
use hdfs_ls::resolve::resolve_paths;
use std::io::{self, Write};

pub const HOME: &str = "/user/alice";

/// "Now" for every listing in the tests: 2024-08-15 09:00 UTC.
pub fn now() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 8, 15, 9, 0, 0)
        .unwrap()
}

/// Home directory layout shared by most tests:
///
/// ```text
/// /user/alice
/// ├── readme.md        (1536 bytes)
/// ├── .bashrc
/// ├── sub/
/// │   ├── leaf
/// │   ├── nested/
/// │   │   └── deep.txt
/// │   └── .secret
/// └── empty/
/// ```
pub fn sample_fs() -> MemoryFs {
    MemoryFs::new(HOME)
        .file("/user/alice/readme.md", 1536)
        .file("/user/alice/.bashrc", 12)
        .file("/user/alice/sub/leaf", 3)
        .file("/user/alice/sub/nested/deep.txt", 70)
        .file("/user/alice/sub/.secret", 1)
        .dir("/user/alice/empty")
}

/// Resolve `args` and list them, returning the result and everything written.
pub fn try_run(
    fs: &MemoryFs,
    args: &[&str],
    options: ListingOptions,
) -> (Result<(), ListError>, String) {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    let paths = resolve_paths(fs, &args).unwrap();
    let mut lister = Lister::new(fs, options, Vec::new()).with_clock(FixedClock(now()));
    let result = lister.run(&paths);
    let out = String::from_utf8(lister.into_inner()).unwrap();
    (result, out)
}

/// Resolve `args` and list them, panicking on failure.
pub fn run(fs: &MemoryFs, args: &[&str], options: ListingOptions) -> String {
    let (result, out) = try_run(fs, args, options);
    result.unwrap();
    out
}

pub fn lines(out: &str) -> Vec<&str> {
    out.lines().collect()
}

pub fn opts() -> ListingOptions {
    ListingOptions::default()
}

/// Writer that rejects every write, like stdout after the reader hung up.
pub struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// List `args` into a [`ClosedPipe`].
pub fn run_into_closed_pipe(
    fs: &MemoryFs,
    args: &[&str],
    options: ListingOptions,
) -> Result<(), ListError> {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    let paths = resolve_paths(fs, &args).unwrap();
    Lister::new(fs, options, ClosedPipe)
        .with_clock(FixedClock(now()))
        .run(&paths)
}
