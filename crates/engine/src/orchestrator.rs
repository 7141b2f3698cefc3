//! Run orchestration: the `Idle → Running → Idle` state machine.
//!
//! A run is two independently scheduled tasks over shared state:
//! - the pipeline task walks the [`StepPlan`] with paced delays and feeds
//!   [`ProcessingEvent`]s into the processing slot
//! - the insights task fetches advisory text and overwrites the insights slot
//!
//! Neither task is ever cancelled. The insights task may finish before,
//! during, or after the pipeline; it never touches processing state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use hardsub_common::config::AppConfig;
use hardsub_common::error::{HardsubError, HardsubResult};
use hardsub_common::pacing::{Pacer, RandomPacer};
use hardsub_insights::{fetcher_from_config, InsightsFetcher, InsightsRequest};
use hardsub_model::notification::MISSING_FILES_MESSAGE;
use hardsub_model::{
    FileHandle, Notification, ProcessingEvent, ProcessingState, SelectionStore, SlotKind,
    ThumbnailPosition,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::notify::NotificationSurface;
use crate::plan::StepPlan;

struct Shared {
    selection: watch::Sender<SelectionStore>,
    processing: watch::Sender<ProcessingState>,
    insights: watch::Sender<String>,
    notifications: NotificationSurface,
    fetcher: Arc<dyn InsightsFetcher>,
    pacer: Arc<dyn Pacer>,
    /// Id of the most recent run; insights from older runs are dropped.
    current_run: AtomicU64,
}

/// Owns every state slot of a hardsub session and the start command.
pub struct HardsubController {
    shared: Arc<Shared>,
    pipeline: Mutex<Option<JoinHandle<()>>>,
}

impl HardsubController {
    pub fn new(
        fetcher: Arc<dyn InsightsFetcher>,
        pacer: Arc<dyn Pacer>,
        notification_display: Duration,
    ) -> Self {
        let (selection, _) = watch::channel(SelectionStore::new());
        let (processing, _) = watch::channel(ProcessingState::new());
        let (insights, _) = watch::channel(String::new());

        Self {
            shared: Arc::new(Shared {
                selection,
                processing,
                insights,
                notifications: NotificationSurface::new(notification_display),
                fetcher,
                pacer,
                current_run: AtomicU64::new(0),
            }),
            pipeline: Mutex::new(None),
        }
    }

    /// Controller with the configured fetcher and notification time.
    ///
    /// Without an explicit `pacer` the configured pipeline timing is used.
    pub fn from_config(config: &AppConfig, pacer: Option<Arc<dyn Pacer>>) -> Self {
        let pacer = pacer.unwrap_or_else(|| Arc::new(RandomPacer::new(config.pipeline)));
        Self::new(
            fetcher_from_config(&config.insights),
            pacer,
            Duration::from_millis(config.notifications.display_ms),
        )
    }

    // --- Render contract: read-only views -------------------------------

    pub fn selection(&self) -> watch::Receiver<SelectionStore> {
        self.shared.selection.subscribe()
    }

    pub fn processing(&self) -> watch::Receiver<ProcessingState> {
        self.shared.processing.subscribe()
    }

    pub fn insights(&self) -> watch::Receiver<String> {
        self.shared.insights.subscribe()
    }

    pub fn notification(&self) -> watch::Receiver<Option<Notification>> {
        self.shared.notifications.subscribe()
    }

    /// Snapshot of the processing slot.
    pub fn processing_state(&self) -> ProcessingState {
        self.shared.processing.borrow().clone()
    }

    /// Snapshot of the selection slot.
    pub fn selection_state(&self) -> SelectionStore {
        self.shared.selection.borrow().clone()
    }

    /// Current insights text (empty until the first fetch resolves).
    pub fn insights_text(&self) -> String {
        self.shared.insights.borrow().clone()
    }

    pub fn notifications(&self) -> &NotificationSurface {
        &self.shared.notifications
    }

    pub fn is_processing(&self) -> bool {
        self.shared.processing.borrow().is_processing
    }

    // --- Selection commands ---------------------------------------------

    /// Put a picked file into a slot; `None` (cancelled picker) is a no-op.
    pub fn select_file(&self, kind: SlotKind, file: Option<FileHandle>) {
        self.shared
            .selection
            .send_if_modified(|selection| selection.select_file(kind, file));
    }

    pub fn set_position(&self, position: ThumbnailPosition) {
        self.shared.selection.send_if_modified(|selection| {
            let changed = selection.position != position;
            selection.set_position(position);
            changed
        });
    }

    // --- Run commands ---------------------------------------------------

    /// Start a hardsub run. Outcome is observed through the state slots.
    ///
    /// Must be called inside a tokio runtime.
    pub fn start_hardsubbing(&self) {
        if let Err(e) = self.try_start() {
            tracing::debug!(error = %e, "Hardsub run not started");
        }
    }

    /// Fallible form of [`start_hardsubbing`](Self::start_hardsubbing).
    ///
    /// On a missing video or subtitle file an error notification is raised
    /// and no state changes. While a run is in flight the call is rejected
    /// without side effects; this holds for concurrent callers too.
    pub fn try_start(&self) -> HardsubResult<()> {
        if self.is_processing() {
            tracing::warn!("Start requested while a run is in flight");
            return Err(HardsubError::AlreadyRunning);
        }

        let selection = self.selection_state();
        let missing = selection.missing_required();
        if !missing.is_empty() {
            tracing::warn!(?missing, "Cannot start hardsub run");
            self.shared.notifications.show(Notification::missing_files());
            return Err(HardsubError::validation(MISSING_FILES_MESSAGE));
        }

        // Check-and-set under the slot's write lock: of several concurrent
        // callers exactly one observes an idle slot.
        let mut run_id = None;
        self.shared.processing.send_if_modified(|state| {
            if state.is_processing {
                return false;
            }
            state.apply_in_place(&ProcessingEvent::Started);
            run_id = Some(self.shared.current_run.fetch_add(1, Ordering::SeqCst) + 1);
            true
        });
        let Some(run_id) = run_id else {
            tracing::warn!("Start requested while a run is in flight");
            return Err(HardsubError::AlreadyRunning);
        };

        let plan = StepPlan::from_selection(&selection);

        tracing::info!(
            run_id,
            video = %selection.video.display_name,
            subtitles = %selection.subtitles.display_name,
            thumbnail = selection.has_thumbnail(),
            position = %selection.position,
            steps = plan.len(),
            "Starting hardsub run"
        );

        spawn_insights(
            Arc::clone(&self.shared),
            run_id,
            InsightsRequest::from_selection(&selection),
        );

        let handle = tokio::spawn(run_pipeline(Arc::clone(&self.shared), run_id, plan));
        *self
            .pipeline
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(handle);

        Ok(())
    }

    /// Wait for the pipeline of the current run, if any, to finish.
    pub async fn wait_idle(&self) {
        let handle = self
            .pipeline
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Hardsub pipeline task failed");
            }
        }
    }
}

fn spawn_insights(shared: Arc<Shared>, run_id: u64, request: InsightsRequest) {
    tokio::spawn(async move {
        tracing::debug!(run_id, fetcher = shared.fetcher.name(), "Fetching insights");
        let text = shared.fetcher.fetch(&request).await;

        if shared.current_run.load(Ordering::SeqCst) != run_id {
            tracing::debug!(run_id, "Discarding insights from a superseded run");
            return;
        }
        shared.insights.send_replace(text);
    });
}

async fn run_pipeline(shared: Arc<Shared>, run_id: u64, plan: StepPlan) {
    let step_count = plan.len();

    for (index, line) in plan.steps.into_iter().enumerate() {
        tokio::time::sleep(shared.pacer.step_delay(index)).await;
        tracing::debug!(run_id, step = index + 1, of = step_count, %line, "Step complete");
        shared.processing.send_modify(|state| {
            state.apply_in_place(&ProcessingEvent::StepCompleted {
                index,
                step_count,
                line,
            });
        });
    }

    tokio::time::sleep(shared.pacer.finalize_delay()).await;
    shared.processing.send_modify(|state| {
        state.apply_in_place(&ProcessingEvent::Finished);
    });

    tracing::info!(run_id, output = %plan.output_name, "Hardsub run finished");
    shared
        .notifications
        .show(Notification::saved(&plan.output_name));
}

#[cfg(test)]
mod tests {
    use super::*;
    use hardsub_common::pacing::FixedPacer;
    use hardsub_insights::StaticInsights;

    fn controller() -> HardsubController {
        HardsubController::new(
            Arc::new(StaticInsights::new("insight")),
            Arc::new(FixedPacer::instant()),
            Duration::from_millis(4000),
        )
    }

    #[test]
    fn test_selection_commands_update_slot() {
        let controller = controller();
        let rx = controller.selection();

        controller.select_file(SlotKind::Video, Some(FileHandle::from_path("a.mkv")));
        controller.select_file(SlotKind::Video, None);
        controller.set_position(ThumbnailPosition::BottomLeft);

        let selection = rx.borrow();
        assert_eq!(selection.video.display_name, "a.mkv");
        assert_eq!(selection.position, ThumbnailPosition::BottomLeft);
    }

    #[test]
    fn test_from_config_uses_configured_notification_time() {
        let mut config = AppConfig::default();
        config.notifications.display_ms = 1234;
        config.insights.enabled = false;
        let controller =
            HardsubController::from_config(&config, Some(Arc::new(FixedPacer::instant())));
        assert_eq!(
            controller.notifications().display_duration(),
            Duration::from_millis(1234)
        );
    }

    #[tokio::test]
    async fn test_instant_run_completes() {
        let controller = controller();
        controller.select_file(SlotKind::Video, Some(FileHandle::from_path("a.mkv")));
        controller.select_file(SlotKind::Subtitles, Some(FileHandle::from_path("a.ass")));

        controller.try_start().unwrap();
        assert!(controller.is_processing());
        controller.wait_idle().await;

        let state = controller.processing_state();
        assert!(!state.is_processing);
        assert_eq!(state.progress, 100.0);
        assert_eq!(state.log.len(), 9);
    }
}
