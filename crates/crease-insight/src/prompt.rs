use crease_types::BallEvent;

/// Comma-separated ball log in prompt notation, e.g. `1, WIDE, 0(W), 4`.
pub fn history_line(events: &[BallEvent]) -> String {
    events
        .iter()
        .map(BallEvent::insight_notation)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The instruction sent to the generator for a given ball log.
pub fn build_prompt(events: &[BallEvent]) -> String {
    format!(
        "Analyze this Box Cricket innings history (WD=Wide, NB=NoBall, W=Wicket): [{}]. \
         Provide a single, very concise tactical sentence (max 15 words) for the captain. \
         Focus on momentum or pressure.",
        history_line(events)
    )
}
