//! In-memory filesystem implementation.
//!
//! Used for testing. Children keep insertion order so callers can observe that
//! listings are rendered in the order the backend returns them.

use super::{Entry, EntryKind, FsError, FsResult, RemoteFs};
use crate::path::clean;
use chrono::{DateTime, TimeZone, Utc};
use std::cell::Cell;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
struct Node {
    entry: Entry,
    children: Vec<String>,
}

/// In-memory filesystem with a fixed home directory.
#[derive(Debug)]
pub struct MemoryFs {
    home: String,
    nodes: HashMap<String, Node>,
    denied: HashSet<String>,
    stat_calls: Cell<usize>,
    list_calls: Cell<usize>,
}

/// Modification time given to entries that don't set one.
pub fn default_modification_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 6, 1, 12, 30, 0)
        .single()
        .unwrap_or_default()
}

fn leaf_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or_default()
}

fn parent_of(path: &str) -> Option<String> {
    if path == "/" {
        return None;
    }
    let idx = path.rfind('/')?;
    Some(if idx == 0 {
        "/".to_string()
    } else {
        path[..idx].to_string()
    })
}

impl MemoryFs {
    /// Create a filesystem containing only `/` and the home directory with its parents.
    pub fn new(home: &str) -> Self {
        let mut fs = Self {
            home: clean(home),
            nodes: HashMap::new(),
            denied: HashSet::new(),
            stat_calls: Cell::new(0),
            list_calls: Cell::new(0),
        };
        fs.nodes.insert(
            "/".to_string(),
            Node {
                entry: Self::make_entry("/", EntryKind::Directory, 0),
                children: Vec::new(),
            },
        );
        let home = fs.home.clone();
        fs.insert(&home, EntryKind::Directory, 0);
        fs
    }

    fn make_entry(path: &str, kind: EntryKind, size: u64) -> Entry {
        Entry {
            name: leaf_name(path).to_string(),
            kind,
            size,
            permission: match kind {
                EntryKind::Directory => 0o755,
                EntryKind::File => 0o644,
            },
            owner: "hdfs".to_string(),
            group: "supergroup".to_string(),
            modification_time: default_modification_time(),
        }
    }

    /// Insert an entry, creating missing parent directories. Re-inserting a path
    /// replaces its entry but keeps its position among its siblings.
    pub fn insert(&mut self, path: &str, kind: EntryKind, size: u64) -> &mut Entry {
        let path = clean(path);
        if let Some(parent) = parent_of(&path) {
            if !self.nodes.contains_key(&parent) {
                self.insert(&parent, EntryKind::Directory, 0);
            }
            let name = leaf_name(&path).to_string();
            if let Some(node) = self.nodes.get_mut(&parent) {
                if !node.children.contains(&name) {
                    node.children.push(name);
                }
            }
        }

        let entry = Self::make_entry(&path, kind, size);
        let node = self.nodes.entry(path).or_insert_with(|| Node {
            entry: entry.clone(),
            children: Vec::new(),
        });
        node.entry = entry;
        &mut node.entry
    }

    /// Add a directory.
    pub fn dir(mut self, path: &str) -> Self {
        self.insert(path, EntryKind::Directory, 0);
        self
    }

    /// Add a file of the given size.
    pub fn file(mut self, path: &str, size: u64) -> Self {
        self.insert(path, EntryKind::File, size);
        self
    }

    /// Adjust the entry at `path` in place. Unknown paths are ignored.
    pub fn modify(mut self, path: &str, f: impl FnOnce(&mut Entry)) -> Self {
        if let Some(node) = self.nodes.get_mut(&clean(path)) {
            f(&mut node.entry);
        }
        self
    }

    /// Make every operation on `path` fail with `PermissionDenied`.
    pub fn deny(mut self, path: &str) -> Self {
        self.denied.insert(clean(path));
        self
    }

    /// Number of `stat` calls served so far.
    pub fn stat_calls(&self) -> usize {
        self.stat_calls.get()
    }

    /// Number of `list_dir` calls served so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.get()
    }

    fn lookup(&self, path: &str) -> FsResult<&Node> {
        let key = clean(path);
        if self.denied.contains(&key) {
            return Err(FsError::PermissionDenied(path.to_string()));
        }
        self.nodes
            .get(&key)
            .ok_or_else(|| FsError::NotFound(path.to_string()))
    }
}

impl RemoteFs for MemoryFs {
    fn stat(&self, path: &str) -> FsResult<Entry> {
        self.stat_calls.set(self.stat_calls.get() + 1);
        self.lookup(path).map(|node| node.entry.clone())
    }

    fn list_dir(&self, path: &str) -> FsResult<Vec<Entry>> {
        self.list_calls.set(self.list_calls.get() + 1);
        let node = self.lookup(path)?;
        if !node.entry.is_dir() {
            return Err(FsError::Io {
                path: path.to_string(),
                message: "not a directory".to_string(),
            });
        }

        let base = clean(path);
        node.children
            .iter()
            .map(|name| {
                let child = crate::path::join_query(&base, name);
                self.nodes
                    .get(&child)
                    .map(|n| n.entry.clone())
                    .ok_or(FsError::NotFound(child))
            })
            .collect()
    }

    fn home_dir(&self) -> FsResult<String> {
        Ok(self.home.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_home_and_parents() {
        let fs = MemoryFs::new("/user/alice");
        assert!(fs.stat("/user").unwrap().is_dir());
        assert!(fs.stat("/user/alice").unwrap().is_dir());
        assert_eq!(fs.home_dir().unwrap(), "/user/alice");
    }

    #[test]
    fn list_dir_keeps_insertion_order() {
        let fs = MemoryFs::new("/user/alice")
            .file("/data/zeta", 1)
            .file("/data/alpha", 2)
            .dir("/data/mid");
        let names: Vec<String> = fs
            .list_dir("/data")
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn missing_path_is_not_found() {
        let fs = MemoryFs::new("/user/alice");
        assert_eq!(
            fs.stat("/nope"),
            Err(FsError::NotFound("/nope".to_string()))
        );
    }

    #[test]
    fn denied_path_is_permission_denied() {
        let fs = MemoryFs::new("/user/alice").dir("/secret").deny("/secret");
        assert!(matches!(
            fs.list_dir("/secret"),
            Err(FsError::PermissionDenied(_))
        ));
    }

    #[test]
    fn listing_a_file_fails() {
        let fs = MemoryFs::new("/user/alice").file("/f", 3);
        assert!(matches!(fs.list_dir("/f"), Err(FsError::Io { .. })));
    }

    #[test]
    fn counters_track_calls() {
        let fs = MemoryFs::new("/user/alice");
        let _ = fs.stat("/user");
        let _ = fs.stat("/user/alice");
        let _ = fs.list_dir("/user");
        assert_eq!(fs.stat_calls(), 2);
        assert_eq!(fs.list_calls(), 1);
    }
}
