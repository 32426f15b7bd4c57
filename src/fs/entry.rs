use chrono::{DateTime, Utc};

/// Kind of filesystem object. Only directories can be walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Metadata snapshot for one remote filesystem object, taken at stat time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Leaf name (no slashes).
    pub name: String,
    pub kind: EntryKind,
    /// Size in bytes. Only meaningful for files.
    pub size: u64,
    /// POSIX permission bits, sticky bit included.
    pub permission: u32,
    pub owner: String,
    pub group: String,
    pub modification_time: DateTime<Utc>,
}

const STICKY_BIT: u32 = 0o1000;

impl Entry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Whether the leaf name marks a hidden entry.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }

    /// Format kind and permission bits as a POSIX-style string (e.g. "drwxr-xr-x").
    pub fn mode_string(&self) -> String {
        let mut s = String::with_capacity(10);
        s.push(match self.kind {
            EntryKind::Directory => 'd',
            EntryKind::File => '-',
        });
        for shift in [6, 3, 0] {
            let bits = (self.permission >> shift) & 0o7;
            s.push(if bits & 0o4 != 0 { 'r' } else { '-' });
            s.push(if bits & 0o2 != 0 { 'w' } else { '-' });
            s.push(if bits & 0o1 != 0 { 'x' } else { '-' });
        }
        if self.permission & STICKY_BIT != 0 {
            let other_exec = self.permission & 0o1 != 0;
            s.pop();
            s.push(if other_exec { 't' } else { 'T' });
        }
        s
    }
}
