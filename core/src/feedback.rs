/// Trigger surface the game loop fires cues into.
///
/// Calls are fire-and-forget: implementations must swallow platform
/// failures and never block gameplay. `narrate` replaces any in-flight
/// narration before starting the new one.
pub trait FeedbackSink {
    fn play_flip(&self);
    fn play_success(&self);
    fn play_fail(&self);
    fn play_game_start(&self);
    fn play_game_won(&self);
    fn narrate(&self, text: &str);
}

/// Sink that drops every cue, for tests and headless runs.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn play_flip(&self) {}
    fn play_success(&self) {}
    fn play_fail(&self) {}
    fn play_game_start(&self) {}
    fn play_game_won(&self) {}
    fn narrate(&self, _text: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_sink_accepts_every_cue() {
        let sink: &dyn FeedbackSink = &NullFeedback;
        sink.play_flip();
        sink.play_success();
        sink.play_fail();
        sink.play_game_start();
        sink.play_game_won();
        sink.narrate("Rosa");
    }
}
