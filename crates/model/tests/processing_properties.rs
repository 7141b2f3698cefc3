use std::collections::HashSet;

use hardsub_model::processing::{
    ProcessingEvent, ProcessingState, COMPLETION_LOG_LINE, INIT_LOG_LINE,
};
use hardsub_model::ThumbnailPosition;
use proptest::prelude::*;

fn run_events(step_count: usize) -> Vec<ProcessingEvent> {
    let mut events = vec![ProcessingEvent::Started];
    events.extend((0..step_count).map(|index| ProcessingEvent::StepCompleted {
        index,
        step_count,
        line: format!("step {index}"),
    }));
    events.push(ProcessingEvent::Finished);
    events
}

proptest! {
    #[test]
    fn progress_is_monotonic_and_hits_100_only_at_completion(step_count in 1usize..32, runs in 1usize..4) {
        let mut state = ProcessingState::new();

        for _ in 0..runs {
            let events = run_events(step_count);
            let last = events.len() - 1;
            let mut previous = 0.0;

            for (i, event) in events.iter().enumerate() {
                state.apply_in_place(event);
                prop_assert!(state.progress >= previous);
                prop_assert_eq!(state.progress == 100.0, i == last);
                prop_assert_eq!(state.is_processing, i != last);
                previous = state.progress;
            }

            prop_assert_eq!(state.log.len(), step_count + 2);
            prop_assert_eq!(state.log.first().map(String::as_str), Some(INIT_LOG_LINE));
            prop_assert_eq!(state.log.last().map(String::as_str), Some(COMPLETION_LOG_LINE));
        }
    }
}

#[test]
fn overlay_mapping_is_total_and_distinct() {
    let exprs: HashSet<&str> = ThumbnailPosition::ALL
        .iter()
        .map(|p| p.overlay_expr())
        .collect();
    assert_eq!(exprs.len(), 4);

    for position in ThumbnailPosition::ALL {
        assert_eq!(position.overlay_expr(), position.overlay_expr());
        let roundtrip: ThumbnailPosition = position.slug().parse().unwrap();
        assert_eq!(roundtrip, position);
    }
}
