//! Fetch processing insights without running the pipeline.

use hardsub_common::config::AppConfig;
use hardsub_insights::{fetcher_from_config, InsightsRequest};
use hardsub_model::ThumbnailPosition;

pub async fn run(
    config: &AppConfig,
    video: String,
    subtitles: String,
    thumbnail: bool,
    position: ThumbnailPosition,
) -> anyhow::Result<()> {
    let fetcher = fetcher_from_config(&config.insights);
    let request = InsightsRequest::new(video, subtitles, thumbnail, position);

    tracing::info!(fetcher = fetcher.name(), "Requesting insights");
    let text = fetcher.fetch(&request).await;
    println!("{text}");
    Ok(())
}
