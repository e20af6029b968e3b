//! Background detection of files newly added to the watched directory.
//!
//! Detection is a snapshot diff of directory listings taken once per poll
//! interval. A file is first seen at least one interval after it appears,
//! which gives writers that create then fill a file time to finish.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    NewFile(String),
}

pub struct DirectoryWatcher {
    dir: PathBuf,
    interval: Duration,
    seen: BTreeSet<String>,
}

impl DirectoryWatcher {
    pub fn new(dir: impl Into<PathBuf>, interval: Duration) -> Self {
        let dir = dir.into();
        let seen = list_names(&dir);
        Self { dir, interval, seen }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// One watch cycle: lists the directory, returns names absent from the
    /// previous listing in lexical order, and keeps the new listing.
    ///
    /// Removals are never reported. A missing directory lists as empty, so
    /// every file is new again once it reappears.
    pub fn poll(&mut self) -> Vec<String> {
        let current = list_names(&self.dir);
        let added = current.difference(&self.seen).cloned().collect();
        self.seen = current;
        added
    }

    /// Polls forever, calling `on_new` once for every new file name.
    pub fn run<F>(mut self, mut on_new: F)
    where
        F: FnMut(String),
    {
        loop {
            thread::sleep(self.interval);

            for name in self.poll() {
                log::debug!("New file in {}: {}", self.dir.display(), name);
                on_new(name);
            }
        }
    }
}

/// Runs `watcher` on a background thread, posting each new file to
/// `events` and then calling `wake` so the receiver side can react.
pub fn spawn<W>(
    watcher: DirectoryWatcher,
    events: Sender<WatchEvent>,
    wake: W,
) -> std::io::Result<JoinHandle<()>>
where
    W: Fn() + Send + 'static,
{
    thread::Builder::new()
        .name("directory-watcher".into())
        .spawn(move || {
            log::info!("Watching {}", watcher.dir().display());
            watcher.run(|name| {
                if events.send(WatchEvent::NewFile(name)).is_err() {
                    log::debug!("Watch event receiver is gone");
                    return;
                }
                wake();
            });
        })
}

fn list_names(dir: &Path) -> BTreeSet<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("Cannot list {}: {}", dir.display(), e);
            return BTreeSet::new();
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use tempfile::tempdir;

    const INTERVAL: Duration = Duration::from_millis(50);

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "x").unwrap();
    }

    #[test]
    fn reports_only_added_files() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "a.txt");

        let mut watcher = DirectoryWatcher::new(dir.path(), INTERVAL);
        touch(dir.path(), "b.txt");

        assert_eq!(watcher.poll(), vec!["b.txt"]);
        assert!(watcher.poll().is_empty());
    }

    #[test]
    fn new_files_come_in_lexical_order() {
        let dir = tempdir().unwrap();
        let mut watcher = DirectoryWatcher::new(dir.path(), INTERVAL);
        for name in ["c.py", "a.py", "b.py"] {
            touch(dir.path(), name);
        }

        assert_eq!(watcher.poll(), vec!["a.py", "b.py", "c.py"]);
    }

    #[test]
    fn removals_are_not_reported_but_readding_is() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "a.txt");
        let mut watcher = DirectoryWatcher::new(dir.path(), INTERVAL);

        fs::remove_file(dir.path().join("a.txt")).unwrap();
        assert!(watcher.poll().is_empty());

        touch(dir.path(), "a.txt");
        assert_eq!(watcher.poll(), vec!["a.txt"]);
    }

    #[test]
    fn missing_directory_is_empty() {
        let root = tempdir().unwrap();
        let mut watcher = DirectoryWatcher::new(root.path().join("not_yet"), INTERVAL);

        assert!(watcher.poll().is_empty());
    }

    #[test]
    fn deleted_directory_forgets_its_files() {
        let root = tempdir().unwrap();
        let dir = root.path().join("watched");
        fs::create_dir(&dir).unwrap();
        touch(&dir, "a.txt");
        touch(&dir, "b.txt");

        let mut watcher = DirectoryWatcher::new(&dir, INTERVAL);
        fs::remove_dir_all(&dir).unwrap();
        assert!(watcher.poll().is_empty());

        fs::create_dir(&dir).unwrap();
        touch(&dir, "a.txt");
        touch(&dir, "b.txt");
        assert_eq!(watcher.poll(), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn spawned_watcher_posts_events() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "old.txt");

        let (tx, rx) = mpsc::channel();
        let watcher = DirectoryWatcher::new(dir.path(), INTERVAL);
        spawn(watcher, tx, || {}).unwrap();

        touch(dir.path(), "new.txt");
        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(event, WatchEvent::NewFile("new.txt".into()));
        assert!(rx.recv_timeout(INTERVAL * 4).is_err());
    }

    #[test]
    fn file_filled_after_creation_is_seen_with_content() {
        let dir = tempdir().unwrap();
        let (tx, rx) = mpsc::channel();
        let watcher = DirectoryWatcher::new(dir.path(), Duration::from_secs(1));
        spawn(watcher, tx, || {}).unwrap();

        let path = dir.path().join("snip.py");
        fs::File::create(&path).unwrap();
        thread::sleep(Duration::from_millis(300));
        assert!(rx.try_recv().is_err());
        fs::write(&path, "def foo(): pass").unwrap();

        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(event, WatchEvent::NewFile("snip.py".into()));
        assert_eq!(fs::read_to_string(&path).unwrap(), "def foo(): pass");
    }
}
