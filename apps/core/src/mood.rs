//! Bot face state.
//!
//! Pure state machine for the mood indicator shown next to the transcript.
//! Time is passed in explicitly so the display layer owns the clock.
//!
//! Rules:
//! - `Confused` holds for [`CONFUSED_LOCK`]; while confused only `Idle` is accepted.
//! - `Happy` falls back to `Idle` after [`HAPPY_HOLD`].
//! - `Thinking` and `Confused` cycle through their variations every [`FRAME_INTERVAL`].

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::matcher::is_confident_match;

pub const CONFUSED_LOCK: Duration = Duration::from_secs(3);
pub const HAPPY_HOLD: Duration = Duration::from_secs(2);
pub const FRAME_INTERVAL: Duration = Duration::from_secs(1);

/// Bot mood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Idle,
    Thinking,
    Happy,
    Confused,
}

impl Mood {
    /// Resting expression
    pub fn expression(&self) -> &'static str {
        match self {
            Mood::Idle => "😊",
            Mood::Thinking => "🤔",
            Mood::Happy => "😄",
            Mood::Confused => "😕",
        }
    }

    /// Frames cycled while the mood is held
    pub fn variations(&self) -> &'static [&'static str] {
        match self {
            Mood::Idle => &["🙂", "😊", "🤗"],
            Mood::Thinking => &["🤔", "🧐", "💭"],
            Mood::Happy => &["😄", "😃", "🤗"],
            Mood::Confused => &["😕", "🤨", "❓"],
        }
    }

    /// Map a confidence to the indicator shown while a reply is prepared
    pub fn from_confidence(confidence: f32) -> Self {
        if is_confident_match(confidence) {
            Mood::Thinking
        } else {
            Mood::Confused
        }
    }
}

/// Things that happen to the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceEvent {
    InputReceived,
    Answered,
    Unanswered,
    DataLoaded,
    DataFailed,
}

/// Current face plus the bookkeeping needed for timed transitions
#[derive(Debug, Clone)]
pub struct FaceState {
    mood: Mood,
    since: Instant,
}

impl FaceState {
    pub fn new(now: Instant) -> Self {
        Self {
            mood: Mood::Idle,
            since: now,
        }
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    /// Try to switch mood; returns whether it changed
    pub fn set(&mut self, mood: Mood, now: Instant) -> bool {
        if self.mood == Mood::Confused && mood != Mood::Idle {
            return false;
        }
        if self.mood == mood {
            return false;
        }
        self.mood = mood;
        self.since = now;
        true
    }

    /// Apply an event
    pub fn apply(&mut self, event: FaceEvent, now: Instant) -> bool {
        let target = match event {
            FaceEvent::InputReceived => Mood::Thinking,
            FaceEvent::Answered | FaceEvent::DataLoaded => Mood::Happy,
            FaceEvent::Unanswered | FaceEvent::DataFailed => Mood::Confused,
        };
        self.set(target, now)
    }

    /// Reflect classifier confidence
    pub fn observe_confidence(&mut self, confidence: f32, now: Instant) -> bool {
        self.set(Mood::from_confidence(confidence), now)
    }

    /// Advance timed transitions; returns whether the mood changed
    pub fn tick(&mut self, now: Instant) -> bool {
        let held = now.saturating_duration_since(self.since);
        match self.mood {
            Mood::Confused if held >= CONFUSED_LOCK => self.set(Mood::Idle, now),
            Mood::Happy if held >= HAPPY_HOLD => self.set(Mood::Idle, now),
            _ => false,
        }
    }

    /// Expression to draw at `now`
    pub fn frame(&self, now: Instant) -> &'static str {
        let held = now.saturating_duration_since(self.since);
        match self.mood {
            Mood::Thinking | Mood::Confused => {
                let variations = self.mood.variations();
                let step = (held.as_millis() / FRAME_INTERVAL.as_millis()) as usize;
                variations[step % variations.len()]
            }
            // excited for the first second
            Mood::Happy if held < FRAME_INTERVAL => "🤩",
            mood => mood.expression(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_confidence() {
        assert_eq!(Mood::from_confidence(0.9), Mood::Thinking);
        assert_eq!(Mood::from_confidence(0.4), Mood::Confused);
        assert_eq!(Mood::from_confidence(0.0), Mood::Confused);
    }

    #[test]
    fn test_answer_cycle() {
        let start = Instant::now();
        let mut face = FaceState::new(start);

        assert!(face.apply(FaceEvent::InputReceived, start));
        assert_eq!(face.mood(), Mood::Thinking);

        assert!(face.apply(FaceEvent::Answered, start));
        assert_eq!(face.mood(), Mood::Happy);

        assert!(!face.tick(start + Duration::from_secs(1)));
        assert!(face.tick(start + HAPPY_HOLD));
        assert_eq!(face.mood(), Mood::Idle);
    }

    #[test]
    fn test_confused_is_locked() {
        let start = Instant::now();
        let mut face = FaceState::new(start);

        face.apply(FaceEvent::Unanswered, start);
        assert_eq!(face.mood(), Mood::Confused);

        assert!(!face.apply(FaceEvent::Answered, start + Duration::from_secs(1)));
        assert!(!face.apply(FaceEvent::InputReceived, start + Duration::from_secs(1)));
        assert_eq!(face.mood(), Mood::Confused);

        assert!(!face.tick(start + Duration::from_secs(2)));
        assert!(face.tick(start + CONFUSED_LOCK));
        assert_eq!(face.mood(), Mood::Idle);
    }

    #[test]
    fn test_frames_cycle() {
        let start = Instant::now();
        let mut face = FaceState::new(start);
        face.apply(FaceEvent::InputReceived, start);

        assert_eq!(face.frame(start), "🤔");
        assert_eq!(face.frame(start + Duration::from_millis(1500)), "🧐");
        assert_eq!(face.frame(start + Duration::from_secs(3)), "🤔");
    }

    #[test]
    fn test_happy_frame() {
        let start = Instant::now();
        let mut face = FaceState::new(start);
        face.apply(FaceEvent::DataLoaded, start);

        assert_eq!(face.frame(start), "🤩");
        assert_eq!(face.frame(start + Duration::from_millis(1200)), "😄");
    }
}
