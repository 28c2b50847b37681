//! File system watcher for watch mode

use crate::config::is_script_file;
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

const DEBOUNCE_MS: u64 = 300;

/// Watches a file or directory for script changes
pub struct ScriptWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<notify::Event>>,
    script_patterns: Vec<String>,
    /// Set when watching a single file; events for its siblings are dropped
    target: Option<PathBuf>,
}

fn is_create_or_modify(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Create(_) | EventKind::Modify(_))
}

impl ScriptWatcher {
    /// Start watching the given path (file or directory)
    pub fn watch(path: &Path, script_patterns: &[&str]) -> notify::Result<Self> {
        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default().with_poll_interval(Duration::from_millis(DEBOUNCE_MS)),
        )?;

        let target = if path.is_dir() {
            None
        } else {
            Some(path.canonicalize().unwrap_or_else(|_| path.to_path_buf()))
        };

        if path.is_dir() {
            watcher.watch(path, RecursiveMode::Recursive)?;
        } else if let Some(parent) = path.parent() {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            watcher.watch(parent, RecursiveMode::NonRecursive)?;
        }
        log::debug!("Watching {}", path.display());

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            script_patterns: script_patterns.iter().map(|s| s.to_string()).collect(),
            target,
        })
    }

    /// Script paths touched by a create/modify event
    fn paths_from_event(&self, event: &notify::Event) -> Vec<PathBuf> {
        if !is_create_or_modify(&event.kind) {
            return vec![];
        }
        let patterns: Vec<&str> = self.script_patterns.iter().map(String::as_str).collect();
        event
            .paths
            .iter()
            .filter(|p| is_script_file(p, &patterns) && self.is_target(p))
            .cloned()
            .collect()
    }

    fn is_target(&self, path: &Path) -> bool {
        let Some(target) = &self.target else {
            return true;
        };
        path == target || path.canonicalize().is_ok_and(|p| &p == target)
    }

    /// Wait for the next batch of changes. Blocks until at least one event,
    /// then drains for DEBOUNCE_MS.
    pub fn next_changes(&self) -> Vec<PathBuf> {
        let mut all = HashSet::new();

        match self.receiver.recv_timeout(Duration::from_secs(3600)) {
            Ok(Ok(event)) => all.extend(self.paths_from_event(&event)),
            Ok(Err(e)) => {
                log::warn!("Watch error: {}", e);
                return vec![];
            }
            Err(_) => return vec![],
        }

        std::thread::sleep(Duration::from_millis(DEBOUNCE_MS));
        while let Ok(ev) = self.receiver.try_recv() {
            if let Ok(event) = ev {
                all.extend(self.paths_from_event(&event));
            }
        }

        let mut paths: Vec<PathBuf> = all.into_iter().collect();
        paths.sort();
        paths
    }
}
