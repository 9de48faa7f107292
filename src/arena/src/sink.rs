use cricket_core::{MatchEvent, MatchResult, MatchSink, Scorecard};
use log::debug;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

#[derive(Debug, Clone)]
pub enum ArenaMessage {
    Event(MatchEvent),
    Scorecard(Scorecard),
    Finished(MatchResult),
}

/// Forwards engine output to an async consumer. A dropped receiver only
/// silences the sink; the match keeps running.
pub struct ChannelSink {
    sender: UnboundedSender<ArenaMessage>,
}

impl ChannelSink {
    pub fn new(sender: UnboundedSender<ArenaMessage>) -> Self {
        ChannelSink { sender }
    }

    pub fn channel() -> (Self, UnboundedReceiver<ArenaMessage>) {
        let (sender, receiver) = unbounded_channel();
        (ChannelSink::new(sender), receiver)
    }

    fn push(&self, message: ArenaMessage) {
        if self.sender.send(message).is_err() {
            debug!("arena receiver dropped, message discarded");
        }
    }
}

impl MatchSink for ChannelSink {
    fn send_message(&mut self, event: &MatchEvent) {
        self.push(ArenaMessage::Event(event.clone()));
    }

    fn update_scorecard(&mut self, scorecard: &Scorecard) {
        self.push(ArenaMessage::Scorecard(scorecard.clone()));
    }

    fn match_end(&mut self, result: &MatchResult) {
        self.push(ArenaMessage::Finished(result.clone()));
    }
}
