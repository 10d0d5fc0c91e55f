use crate::config::{ButtonEntry, GalleryConfig};
use crate::loading_state::{LoadingState, LoadingStates};
use crate::shell::FlexButton;
use crate::work::{run_work, Work, WorkOutcome};
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Reference host: owns the loading flags and runs the work each tap starts.
///
/// Taps that arrive while a button is loading are ignored here; the button
/// itself reports every tap.
#[derive(Clone)]
pub struct Host {
    gallery: Arc<GalleryConfig>,
    states: LoadingStates,
    tasks: Arc<Mutex<Vec<JoinHandle<WorkOutcome>>>>,
    changes: Arc<watch::Sender<u64>>,
    runtime: Option<Handle>,
}

impl Host {
    /// Creates a host that runs work on the current tokio runtime, if any.
    ///
    /// Taps may then arrive from any thread. Without a runtime every tap
    /// fails and the flag goes straight back to idle.
    pub fn new(gallery: GalleryConfig) -> Self {
        let runtime = match Handle::try_current() {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!("No tokio runtime available, work cannot be started: {}", e);
                None
            }
        };
        Self::with_runtime(gallery, runtime)
    }

    pub fn with_runtime(gallery: GalleryConfig, runtime: Option<Handle>) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            gallery: Arc::new(gallery),
            states: LoadingStates::new(),
            tasks: Arc::new(Mutex::new(Vec::new())),
            changes: Arc::new(changes),
            runtime,
        }
    }

    pub fn gallery(&self) -> &GalleryConfig {
        &self.gallery
    }

    pub fn states(&self) -> &LoadingStates {
        &self.states
    }

    /// Receiver bumped every time any flag changes; hosts re-render on it
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    pub fn entry(&self, name: &str) -> Option<&ButtonEntry> {
        self.gallery.buttons.iter().find(|entry| entry.name == name)
    }

    /// Builds the button named `name`, wired to this host
    pub fn button(&self, name: &str) -> Option<FlexButton> {
        let entry = self.entry(name)?;
        let loading = self.states.binding(&entry.name);
        let host = self.clone();
        let button_name = entry.name.clone();
        let work = entry.work.clone();
        let flag = loading.clone();

        Some(FlexButton::new(entry.style.clone(), loading, move |was_loading| {
            host.on_activate(&button_name, &flag, was_loading, &work);
        }))
    }

    pub fn buttons(&self) -> Vec<FlexButton> {
        self.gallery
            .buttons
            .iter()
            .filter_map(|entry| self.button(&entry.name))
            .collect()
    }

    fn on_activate(&self, name: &str, flag: &LoadingState, was_loading: bool, work: &Work) {
        if was_loading {
            debug!("Ignoring tap on '{}' while loading", name);
            return;
        }
        if !flag.begin() {
            // Rendered idle, but another tap already started the work
            debug!("Work for '{}' already running", name);
            return;
        }
        info!("Starting work for '{}'", name);
        self.notify();

        let Some(runtime) = &self.runtime else {
            error!("Cannot run work for '{}' without a tokio runtime", name);
            flag.set(false);
            self.notify();
            return;
        };

        let host = self.clone();
        let flag = flag.clone();
        let task_name = name.to_string();
        let work = work.clone();
        let handle = runtime.spawn(async move {
            let outcome = run_work(&work, &task_name).await;
            if outcome.success {
                info!("Work for '{}' finished", task_name);
            } else {
                error!(
                    "Work for '{}' failed: {}",
                    task_name,
                    outcome.error_message.as_deref().unwrap_or("unknown error")
                );
            }
            flag.set(false);
            host.notify();
            outcome
        });

        match self.tasks.lock() {
            Ok(mut tasks) => {
                // Finished work was already logged; only running work is kept
                tasks.retain(|task| !task.is_finished());
                tasks.push(handle);
            }
            Err(e) => warn!("Failed to track work for '{}': {}", name, e),
        }
    }

    /// Number of tracked work items that have not finished yet
    pub fn running_work(&self) -> usize {
        match self.tasks.lock() {
            Ok(tasks) => tasks.iter().filter(|task| !task.is_finished()).count(),
            Err(e) => {
                warn!("Failed to inspect running work: {}", e);
                0
            }
        }
    }

    fn notify(&self) {
        self.changes.send_modify(|generation| *generation += 1);
    }

    /// Waits for the work still tracked and returns its outcomes
    pub async fn wait_idle(&self) -> Vec<WorkOutcome> {
        let handles: Vec<JoinHandle<WorkOutcome>> = match self.tasks.lock() {
            Ok(mut tasks) => tasks.drain(..).collect(),
            Err(e) => {
                warn!("Failed to collect running work: {}", e);
                Vec::new()
            }
        };

        let mut outcomes = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => error!("Work task panicked: {}", e),
            }
        }
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    fn gallery() -> GalleryConfig {
        parse_config(
            r#"
name: "Test"
buttons:
  - name: "Submit"
    title: "Submit"
    work:
      kind: sleep
      millis: 20
  - name: "Fail"
    title: "Fail"
    work:
      kind: command
      command: "false"
"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_tap_starts_work_and_clears_flag() {
        let host = Host::new(gallery());
        let button = host.button("Submit").unwrap();

        button.render().activate();
        assert!(host.states().is_loading("Submit"));
        assert!(button.render().tree.contains_progress());

        let outcomes = host.wait_idle().await;
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].success);
        assert!(!host.states().is_loading("Submit"));
        assert!(!button.render().tree.contains_progress());
    }

    #[tokio::test]
    async fn test_taps_while_loading_are_ignored() {
        let host = Host::new(gallery());
        let button = host.button("Submit").unwrap();

        let idle = button.render();
        idle.activate();
        // Double tap on the same idle render
        idle.activate();
        button.render().activate();

        assert_eq!(host.wait_idle().await.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_work_still_clears_flag() {
        let host = Host::new(gallery());
        host.button("Fail").unwrap().render().activate();

        let outcomes = host.wait_idle().await;
        assert!(!outcomes[0].success);
        assert!(!host.states().is_loading("Fail"));
    }

    #[tokio::test]
    async fn test_subscribe_sees_changes() {
        let host = Host::new(gallery());
        let mut changes = host.subscribe();
        host.button("Submit").unwrap().render().activate();

        assert!(changes.has_changed().unwrap());
        let _ = changes.borrow_and_update();
        host.wait_idle().await;
        assert!(changes.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_finished_work_is_not_retained() {
        let host = Host::new(gallery());
        let button = host.button("Submit").unwrap();

        for _ in 0..5 {
            button.render().activate();
            while host.states().is_loading("Submit") {
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            }
        }

        // At most the last task and one that was still winding down
        let tracked = host.tasks.lock().unwrap().len();
        assert!(tracked <= 2, "tracked {} handles", tracked);
        assert!(host.wait_idle().await.len() <= 2);
        assert_eq!(host.running_work(), 0);
    }

    #[test]
    fn test_tap_from_plain_thread_uses_captured_runtime() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let host = {
            let _guard = runtime.enter();
            Host::new(gallery())
        };
        let button = host.button("Submit").unwrap();

        std::thread::spawn(move || button.render().activate()).join().unwrap();
        assert!(host.states().is_loading("Submit"));

        let outcomes = runtime.block_on(host.wait_idle());
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].success);
        assert!(!host.states().is_loading("Submit"));
    }

    #[test]
    fn test_tap_without_runtime_resets_flag() {
        let host = Host::with_runtime(gallery(), None);
        let mut changes = host.subscribe();
        host.button("Submit").unwrap().render().activate();

        assert!(!host.states().is_loading("Submit"));
        assert!(changes.has_changed().unwrap());
        assert_eq!(host.running_work(), 0);
    }

    #[test]
    fn test_unknown_button() {
        let host = Host::new(gallery());
        assert!(host.button("Missing").is_none());
        assert_eq!(host.buttons().len(), 2);
    }
}
