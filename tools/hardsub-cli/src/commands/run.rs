//! Run the hardsub pipeline and render it to the terminal.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use hardsub_common::config::AppConfig;
use hardsub_common::pacing::{FixedPacer, Pacer};
use hardsub_engine::HardsubController;
use hardsub_model::{FileHandle, SlotKind, ThumbnailPosition};

use crate::render::{print_selection, TerminalRenderer};

pub struct RunArgs {
    pub video: Option<PathBuf>,
    pub subtitles: Option<PathBuf>,
    pub thumbnail: Option<PathBuf>,
    pub position: ThumbnailPosition,
    pub instant: bool,
    pub insights_wait: u64,
    pub json: bool,
}

pub async fn run(config: &AppConfig, args: RunArgs) -> anyhow::Result<()> {
    let pacer: Option<Arc<dyn Pacer>> = if args.instant {
        Some(Arc::new(FixedPacer::instant()))
    } else {
        None
    };
    let controller = HardsubController::from_config(config, pacer);

    controller.select_file(SlotKind::Video, args.video.map(FileHandle::from_path));
    controller.select_file(SlotKind::Subtitles, args.subtitles.map(FileHandle::from_path));
    controller.select_file(SlotKind::Thumbnail, args.thumbnail.map(FileHandle::from_path));
    controller.set_position(args.position);

    print_selection(&controller.selection_state());

    let mut renderer = TerminalRenderer::new(&controller);
    controller.start_hardsubbing();

    if !controller.is_processing() {
        renderer.render_notification();
        anyhow::bail!("Hardsub run did not start");
    }

    renderer.follow_run().await;
    controller.wait_idle().await;
    renderer
        .show_insights(Duration::from_secs(args.insights_wait))
        .await;

    if args.json {
        let summary = serde_json::json!({
            "selection": controller.selection_state(),
            "processing": controller.processing_state(),
            "insights": controller.insights_text(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
