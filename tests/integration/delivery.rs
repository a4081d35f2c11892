use askbot::utils::reply::{EMPTY_ANSWER_PLACEHOLDER, deliver};
use mockall::Sequence;
use pretty_assertions::assert_eq;

use crate::common::mocks::{MockSink, RecordingSink, Sent};
use crate::test_utils;

fn chunks(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_first_chunk_edits_primary_rest_follow_up() {
    test_utils::init();
    let sink = RecordingSink::default();

    deliver(&sink, &chunks(&["one", "two", "three"]))
        .await
        .unwrap();

    assert_eq!(
        sink.sent(),
        vec![
            Sent::Primary("one".to_string()),
            Sent::FollowUp("two".to_string()),
            Sent::FollowUp("three".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_empty_answer_sends_placeholder() {
    let sink = RecordingSink::default();

    deliver(&sink, &[]).await.unwrap();

    assert_eq!(
        sink.sent(),
        vec![Sent::Primary(EMPTY_ANSWER_PLACEHOLDER.to_string())]
    );
}

#[tokio::test]
async fn test_calls_are_made_in_order() {
    let mut sink = MockSink::new();
    let mut seq = Sequence::new();

    sink.expect_edit_primary()
        .withf(|content| content.to_string() == "first")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    sink.expect_append()
        .withf(|content| content.to_string() == "second")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    sink.expect_append()
        .withf(|content| content.to_string() == "third")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));

    deliver(&sink, &chunks(&["first", "second", "third"]))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_stops_at_first_failed_send() {
    let mut sink = MockSink::new();

    sink.expect_edit_primary().times(1).returning(|_| Ok(()));
    sink.expect_append()
        .times(1)
        .returning(|_| Err("rate limited".into()));

    let result = deliver(&sink, &chunks(&["first", "second", "third"])).await;

    assert_eq!(result.unwrap_err().to_string(), "rate limited");
}
