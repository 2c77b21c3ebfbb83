//! File watching for rebuild-on-change.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Events emitted by the file watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// Catalog file was written, replaced or removed
    CatalogModified(PathBuf),

    /// Rendered component markup under the html root changed
    ComponentModified(PathBuf),

    /// Source stylesheet changed
    StylesheetModified(PathBuf),
}

/// Inputs of a build that should trigger a rebuild when they change.
#[derive(Debug, Clone)]
pub struct WatchTargets {
    pub catalog: PathBuf,
    pub html_dir: PathBuf,
    pub stylesheet: PathBuf,
}

impl WatchTargets {
    /// Resolve every target to an absolute path, matching what notify reports.
    fn resolved(&self) -> Self {
        Self {
            catalog: absolute(&self.catalog),
            html_dir: absolute(&self.html_dir),
            stylesheet: absolute(&self.stylesheet),
        }
    }

    /// Directories to register with notify.
    ///
    /// Single files are watched through their parent directory so editors
    /// that save by rename are still seen.
    fn watch_list(&self) -> Vec<(PathBuf, RecursiveMode)> {
        let mut list = vec![(self.html_dir.clone(), RecursiveMode::Recursive)];

        for file in [&self.catalog, &self.stylesheet] {
            let Some(parent) = file.parent() else {
                continue;
            };
            if !list.iter().any(|(dir, _)| dir == parent) {
                list.push((parent.to_path_buf(), RecursiveMode::NonRecursive));
            }
        }

        list
    }

    /// Map a changed path to the build input it belongs to.
    pub fn classify(&self, path: &Path) -> Option<WatchEvent> {
        if path == self.catalog {
            Some(WatchEvent::CatalogModified(path.to_path_buf()))
        } else if path == self.stylesheet {
            Some(WatchEvent::StylesheetModified(path.to_path_buf()))
        } else if path.starts_with(&self.html_dir) {
            Some(WatchEvent::ComponentModified(path.to_path_buf()))
        } else {
            None
        }
    }
}

/// File watcher for detecting changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Create a new file watcher for the given build inputs.
    ///
    /// Returns the watcher and a channel to receive events.
    pub fn new(
        targets: &WatchTargets,
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let targets = targets.resolved();
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        for (path, mode) in targets.watch_list() {
            if path.exists() {
                watcher.watch(&path, mode).map_err(std::io::Error::other)?;
            } else {
                tracing::warn!("Not watching missing path {}", path.display());
            }
        }

        std::thread::spawn(move || {
            let mut last_event: Option<Instant> = None;
            let debounce_duration = Duration::from_millis(100);

            while let Ok(event) = sync_rx.recv() {
                if !is_change(&event.kind) {
                    continue;
                }

                // Debounce rapid events
                let now = Instant::now();
                if last_event.is_some_and(|t| now.duration_since(t) < debounce_duration) {
                    continue;
                }

                let mut matched = false;
                for path in &event.paths {
                    if let Some(e) = targets.classify(path) {
                        matched = true;
                        if async_tx.blocking_send(e).is_err() {
                            return;
                        }
                    }
                }
                if matched {
                    last_event = Some(now);
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

fn is_change(kind: &notify::EventKind) -> bool {
    use notify::EventKind;

    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

fn absolute(path: &Path) -> PathBuf {
    path.canonicalize()
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn targets(root: &Path) -> WatchTargets {
        WatchTargets {
            catalog: root.join("catalog.json"),
            html_dir: root.join("output/html"),
            stylesheet: root.join("css/app.css"),
        }
    }

    #[test]
    fn classifies_paths() {
        let targets = targets(Path::new("/site"));

        assert_eq!(
            targets.classify(Path::new("/site/catalog.json")),
            Some(WatchEvent::CatalogModified(PathBuf::from("/site/catalog.json")))
        );
        assert_eq!(
            targets.classify(Path::new("/site/css/app.css")),
            Some(WatchEvent::StylesheetModified(PathBuf::from("/site/css/app.css")))
        );
        assert!(matches!(
            targets.classify(Path::new("/site/output/html/forms/1.html")),
            Some(WatchEvent::ComponentModified(_))
        ));
        assert_eq!(targets.classify(Path::new("/site/output/preview/index.html")), None);
        assert_eq!(targets.classify(Path::new("/site/notes.txt")), None);
    }

    #[test]
    fn watches_shared_parent_once() {
        let targets = WatchTargets {
            catalog: PathBuf::from("/site/catalog.json"),
            html_dir: PathBuf::from("/site/output/html"),
            stylesheet: PathBuf::from("/site/app.css"),
        };

        let dirs: Vec<_> = targets.watch_list().into_iter().map(|(p, _)| p).collect();

        assert_eq!(
            dirs,
            vec![PathBuf::from("/site/output/html"), PathBuf::from("/site")]
        );
    }

    #[tokio::test]
    async fn watches_component_changes() {
        let temp = tempdir().unwrap();
        let targets = targets(temp.path());
        fs::create_dir_all(&targets.html_dir).unwrap();

        let (watcher, mut rx) = FileWatcher::new(&targets).unwrap();

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(targets.html_dir.join("1.html"), "<p>changed</p>").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(3), rx.recv()).await;

        drop(watcher);

        let event = event.expect("timeout waiting for file watch event");
        assert!(matches!(event, Some(WatchEvent::ComponentModified(_))));
    }
}
