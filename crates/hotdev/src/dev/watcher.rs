//! Recursive file watcher feeding the event bus.
//!
//! The `notify` backend delivers raw events on its own thread; they are
//! forwarded over a channel to a tokio task that runs them through
//! [`ChangeFilter`] and publishes the survivors. The task stops cleanly when
//! its cancellation token fires and fails on any error reported by the
//! backend.

use crate::dev::{ChangeNotification, Debouncer, Decision, EventBus, IgnoreList};
use crate::error::{DevError, Result, ResultExt};
use notify::event::ModifyKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

/// Raw filesystem change, before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawChange {
    /// Entry created, removed or renamed
    Rename,
    /// Content or metadata changed
    Change,
}

impl RawChange {
    /// Classify a `notify` event kind; access events are not changes.
    pub fn classify(kind: &EventKind) -> Option<Self> {
        match kind {
            EventKind::Create(_) | EventKind::Remove(_) => Some(RawChange::Rename),
            EventKind::Modify(ModifyKind::Name(_)) => Some(RawChange::Rename),
            EventKind::Modify(_) | EventKind::Any => Some(RawChange::Change),
            EventKind::Access(_) | EventKind::Other => None,
        }
    }
}

/// Debounce and ignore stage between raw events and the bus.
///
/// Owns the debounce ledger; only the watch task touches it.
#[derive(Debug)]
pub struct ChangeFilter {
    root: PathBuf,
    ignore: IgnoreList,
    debouncer: Debouncer,
}

impl ChangeFilter {
    /// Create a filter for paths under `root` with the default debounce window.
    pub fn new(root: PathBuf, ignore: IgnoreList) -> Self {
        Self::with_debouncer(root, ignore, Debouncer::default())
    }

    /// Create a filter with a custom debouncer.
    pub fn with_debouncer(root: PathBuf, ignore: IgnoreList, debouncer: Debouncer) -> Self {
        Self {
            root,
            ignore,
            debouncer,
        }
    }

    /// Path of `path` relative to the root, `/`-separated.
    ///
    /// `None` for paths outside the root, the root itself, and paths that are
    /// not valid UTF-8.
    pub fn relative_filename(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let mut segments = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(segment) => segments.push(segment.to_str()?),
                Component::CurDir => {}
                _ => return None,
            }
        }
        (!segments.is_empty()).then(|| segments.join("/"))
    }

    /// Turn one changed path into a notification, or drop it.
    pub fn process(&mut self, path: &Path, now: Instant) -> Option<ChangeNotification> {
        let Some(filename) = self.relative_filename(path) else {
            trace!("Dropping event without usable filename: {}", path.display());
            return None;
        };

        if self.debouncer.check(&filename, now) == Decision::Suppress {
            trace!("Debounced {}", filename);
            return None;
        }

        if self.ignore.is_ignored(Path::new(&filename)) {
            trace!("Ignored {}", filename);
            return None;
        }

        info!("[change] {}", filename);
        Some(ChangeNotification::change(filename))
    }
}

/// Running watcher.
///
/// Dropping the handle cancels the watch task.
pub struct FileWatcher {
    /// Underlying notify watcher; dropping it stops the OS watch
    _watcher: RecommendedWatcher,
    cancel: CancellationToken,
    task: Option<JoinHandle<Result<()>>>,
}

impl FileWatcher {
    /// Start watching `root` recursively and publish accepted changes to `bus`.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// - `DevError::DirectoryNotFound` if `root` is not an existing directory
    /// - `DevError::Watch` if the backend cannot be set up
    pub fn spawn(
        root: impl Into<PathBuf>,
        ignore: IgnoreList,
        bus: Arc<EventBus>,
    ) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(DevError::DirectoryNotFound(root));
        }
        let root = root.canonicalize().with_path(&root)?;

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            // Send only fails once the watch task is gone.
            let _ = event_tx.send(res);
        })?;
        watcher.watch(&root, RecursiveMode::Recursive)?;

        info!("[watch]\tWatching {}", root.display());

        let cancel = CancellationToken::new();
        let filter = ChangeFilter::new(root, ignore);
        let task = tokio::spawn(watch_loop(event_rx, filter, bus, cancel.clone()));

        Ok(Self {
            _watcher: watcher,
            cancel,
            task: Some(task),
        })
    }

    /// Token that stops the watch task when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Check if the watch task is still running.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Wait for the watch task to end without cancelling it.
    ///
    /// Resolves to `Ok(())` after a cancellation and to the watch error
    /// otherwise. Returns immediately once the task has been awaited.
    pub async fn wait(&mut self) -> Result<()> {
        let Some(task) = self.task.as_mut() else {
            return Ok(());
        };

        let outcome = task.await;
        self.task = None;

        match outcome {
            Ok(result) => result,
            Err(join_err) => Err(DevError::WatchTask(join_err.to_string())),
        }
    }

    /// Cancel the watch task and wait for it to finish.
    pub async fn stop(mut self) -> Result<()> {
        self.cancel.cancel();
        self.wait().await
    }
}

impl Drop for FileWatcher {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn watch_loop(
    mut events: mpsc::UnboundedReceiver<notify::Result<Event>>,
    mut filter: ChangeFilter,
    bus: Arc<EventBus>,
    cancel: CancellationToken,
) -> Result<()> {
    loop {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                debug!("File watcher cancelled");
                return Ok(());
            }

            received = events.recv() => match received {
                Some(Ok(event)) => {
                    dispatch(&event, &mut filter, &bus);
                }
                Some(Err(err)) => return Err(DevError::Watch(err)),
                None => return Ok(()),
            },
        }
    }
}

/// Publish every path of `event` that passes the filter.
fn dispatch(event: &Event, filter: &mut ChangeFilter, bus: &EventBus) -> usize {
    let Some(kind) = RawChange::classify(&event.kind) else {
        return 0;
    };

    let now = Instant::now();
    let mut published = 0;
    for path in &event.paths {
        if let Some(notification) = filter.process(path, now) {
            let delivered = bus.publish(&notification);
            debug!(?kind, subscribers = delivered, "Published {}", notification.filename);
            published += 1;
        }
    }
    published
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, DataChange, RenameMode};
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn root() -> PathBuf {
        PathBuf::from("/srv/public")
    }

    fn filter() -> ChangeFilter {
        ChangeFilter::new(root(), IgnoreList::default())
    }

    #[test]
    fn test_classify_event_kinds() {
        assert_eq!(
            RawChange::classify(&EventKind::Create(CreateKind::File)),
            Some(RawChange::Rename)
        );
        assert_eq!(
            RawChange::classify(&EventKind::Modify(ModifyKind::Name(RenameMode::Both))),
            Some(RawChange::Rename)
        );
        assert_eq!(
            RawChange::classify(&EventKind::Modify(ModifyKind::Data(DataChange::Content))),
            Some(RawChange::Change)
        );
        assert_eq!(
            RawChange::classify(&EventKind::Access(AccessKind::Any)),
            None
        );
        assert_eq!(RawChange::classify(&EventKind::Other), None);
    }

    #[test]
    fn test_relative_filename() {
        let filter = filter();
        assert_eq!(
            filter.relative_filename(&root().join("css").join("site.css")),
            Some("css/site.css".to_string())
        );
        assert_eq!(filter.relative_filename(&root()), None);
        assert_eq!(filter.relative_filename(Path::new("/etc/passwd")), None);
    }

    #[test]
    fn test_duplicate_within_window_is_dropped() {
        let mut filter = filter();
        let path = root().join("index.html");
        let start = Instant::now();

        let first = filter.process(&path, start);
        let second = filter.process(&path, start + Duration::from_millis(50));
        let third = filter.process(&path, start + Duration::from_millis(150));

        assert_eq!(first, Some(ChangeNotification::change("index.html")));
        assert_eq!(second, None);
        assert_eq!(third, Some(ChangeNotification::change("index.html")));
    }

    #[test]
    fn test_ignored_directories_never_publish() {
        let mut filter = filter();
        let start = Instant::now();

        assert_eq!(filter.process(&root().join(".git").join("HEAD"), start), None);
        assert_eq!(
            filter.process(
                &root().join("node_modules").join("lib").join("index.js"),
                start + Duration::from_secs(1)
            ),
            None
        );
    }

    #[test]
    fn test_extra_ignore_prefix() {
        let mut filter = ChangeFilter::new(root(), IgnoreList::new(["dist"]));
        assert_eq!(filter.process(&root().join("dist").join("app.js"), Instant::now()), None);
        assert!(filter.process(&root().join("src").join("app.js"), Instant::now()).is_some());
    }

    #[test]
    fn test_dispatch_skips_access_events() {
        let bus = EventBus::new();
        let mut filter = filter();
        let event = Event::new(EventKind::Access(AccessKind::Any)).add_path(root().join("a.html"));

        assert_eq!(dispatch(&event, &mut filter, &bus), 0);
    }

    #[test]
    fn test_dispatch_publishes_every_path() {
        let bus = Arc::new(EventBus::new());
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        {
            let seen = Arc::clone(&seen);
            bus.subscribe(move |n| seen.lock().push(n.filename.clone()));
        }
        let mut filter = filter();
        let event = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::Both)))
            .add_path(root().join("old.html"))
            .add_path(root().join("new.html"));

        assert_eq!(dispatch(&event, &mut filter, &bus), 2);
        assert_eq!(*seen.lock(), vec!["old.html", "new.html"]);
    }

    #[tokio::test]
    async fn test_spawn_missing_directory_fails_fast() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("public");

        let result = FileWatcher::spawn(&missing, IgnoreList::default(), Arc::new(EventBus::new()));

        assert!(matches!(result, Err(DevError::DirectoryNotFound(p)) if p == missing));
    }

    #[tokio::test]
    async fn test_stop_is_a_clean_shutdown() {
        let temp = TempDir::new().unwrap();
        let watcher =
            FileWatcher::spawn(temp.path(), IgnoreList::default(), Arc::new(EventBus::new()))
                .unwrap();

        assert!(watcher.is_running());
        assert!(watcher.stop().await.is_ok());
    }

    #[tokio::test]
    async fn test_cancellation_token_stops_task() {
        let temp = TempDir::new().unwrap();
        let mut watcher =
            FileWatcher::spawn(temp.path(), IgnoreList::default(), Arc::new(EventBus::new()))
                .unwrap();

        watcher.cancellation_token().cancel();
        let outcome = tokio::time::timeout(Duration::from_secs(5), watcher.wait()).await;

        assert!(matches!(outcome, Ok(Ok(()))));
        assert!(!watcher.is_running());
        // A second wait returns immediately
        assert!(watcher.wait().await.is_ok());
    }

    #[tokio::test]
    async fn test_file_change_reaches_bus() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();

        let bus = Arc::new(EventBus::new());
        let (tx, mut rx) = mpsc::unbounded_channel();
        bus.subscribe(move |n| {
            let _ = tx.send(n.clone());
        });

        let watcher = FileWatcher::spawn(temp.path(), IgnoreList::default(), bus).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(temp.path().join(".git").join("HEAD"), "ref: refs/heads/main").unwrap();
        fs::write(temp.path().join("index.html"), "<html></html>").unwrap();

        let notification = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("no notification within 5s")
            .expect("bus closed");

        assert_eq!(notification, ChangeNotification::change("index.html"));
        watcher.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_backend_error_is_fatal() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(Err(notify::Error::generic("inotify queue overflow")))
            .unwrap();

        let result = watch_loop(rx, filter(), Arc::new(EventBus::new()), CancellationToken::new()).await;

        assert!(matches!(result, Err(DevError::Watch(_))));
    }

    #[tokio::test]
    async fn test_cancellation_wins_over_queued_error() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(Err(notify::Error::generic("inotify queue overflow")))
            .unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = watch_loop(rx, filter(), Arc::new(EventBus::new()), cancel).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_wait_surfaces_backend_error() {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let mut watcher = FileWatcher {
            _watcher: notify::recommended_watcher(|_: notify::Result<Event>| {}).unwrap(),
            cancel: cancel.clone(),
            task: Some(tokio::spawn(watch_loop(
                rx,
                filter(),
                Arc::new(EventBus::new()),
                cancel,
            ))),
        };

        tx.send(Err(notify::Error::generic("inotify queue overflow")))
            .unwrap();
        let outcome = tokio::time::timeout(Duration::from_secs(5), watcher.wait())
            .await
            .expect("watch task did not end");

        assert!(matches!(outcome, Err(DevError::Watch(_))));
        assert!(!watcher.is_running());
        // Stopping after a failure is a no-op
        assert!(watcher.stop().await.is_ok());
    }
}
