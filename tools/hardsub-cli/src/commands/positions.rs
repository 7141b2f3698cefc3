//! List thumbnail positions.

use hardsub_model::ThumbnailPosition;

pub fn run() -> anyhow::Result<()> {
    println!("{:<14} {:<14} Overlay", "Position", "Label");
    println!("{}", "=".repeat(70));
    for position in ThumbnailPosition::ALL {
        let default = if position == ThumbnailPosition::default() {
            " (default)"
        } else {
            ""
        };
        println!(
            "{:<14} {:<14} overlay={}{default}",
            position.slug(),
            position.label(),
            position.overlay_expr()
        );
    }
    Ok(())
}
