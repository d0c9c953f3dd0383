//! Face State Tests
//!
//! Drives the face through the events of a whole chat session.

use crate::knowledge::{KnowledgeBase, KnowledgeEntry};
use crate::mood::{FaceEvent, FaceState, Mood, CONFUSED_LOCK, HAPPY_HOLD};
use crate::responder::resolve;
use std::time::{Duration, Instant};

#[test]
fn test_session_flow() {
    let start = Instant::now();
    let mut face = FaceState::new(start);

    face.apply(FaceEvent::DataLoaded, start);
    assert_eq!(face.mood(), Mood::Happy);

    let t = start + HAPPY_HOLD;
    assert!(face.tick(t));
    assert_eq!(face.mood(), Mood::Idle);

    // a question that cannot be answered
    face.apply(FaceEvent::InputReceived, t);
    assert_eq!(face.mood(), Mood::Thinking);
    face.observe_confidence(0.2, t);
    assert_eq!(face.mood(), Mood::Confused);

    // the next question arrives while still confused
    let t2 = t + Duration::from_secs(1);
    assert!(!face.apply(FaceEvent::InputReceived, t2));
    assert_eq!(face.mood(), Mood::Confused);

    let t3 = t + CONFUSED_LOCK;
    face.tick(t3);
    assert_eq!(face.mood(), Mood::Idle);
    face.apply(FaceEvent::InputReceived, t3);
    face.apply(FaceEvent::Answered, t3);
    assert_eq!(face.mood(), Mood::Happy);
}

#[test]
fn test_data_failure_confuses() {
    let start = Instant::now();
    let mut face = FaceState::new(start);

    face.apply(FaceEvent::DataFailed, start);
    assert_eq!(face.mood(), Mood::Confused);
    assert!(!face.apply(FaceEvent::DataLoaded, start));
}

#[test]
fn test_mood_follows_classifier_confidence() {
    let kb = KnowledgeBase::from_iter([KnowledgeEntry::new(
        "how do i declare a variable in java?",
        "Write the variable type, then its name.",
        None,
    )]);

    // answered, but phrased without question structure or domain terms
    let scored = resolve("declaring a variable, quickly", Some(&kb));
    let processed = scored.processed.unwrap();
    assert!(scored.match_result.unwrap().confidence > 0.4);
    assert!((processed.confidence - 0.4).abs() < 1e-6);
    assert_eq!(Mood::from_confidence(processed.confidence), Mood::Confused);

    // unanswered, but clearly a request
    let fallback = resolve("tell me about bananas", Some(&kb));
    let processed = fallback.processed.unwrap();
    assert!((processed.confidence - 0.7).abs() < 1e-6);
    assert_eq!(Mood::from_confidence(processed.confidence), Mood::Thinking);
}

#[test]
fn test_mood_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Mood::Confused).unwrap(), "\"confused\"");
}
