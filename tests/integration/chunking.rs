use askbot::utils::chunker::{
    Boundary, ChunkError, DISCORD_MESSAGE_LIMIT, chunk_message, rejoin, split_chunks,
};
use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use test_case::test_case;

use crate::common::fixtures::two_paragraph_answer;

#[test]
fn test_long_single_paragraph() {
    let chunks = chunk_message(&"A".repeat(2500), DISCORD_MESSAGE_LIMIT).unwrap();
    assert_eq!(chunks, vec!["A".repeat(2000), "A".repeat(500)]);
}

#[test]
fn test_short_paragraphs_stay_together() {
    let chunks = chunk_message("Para1\n\nPara2", DISCORD_MESSAGE_LIMIT).unwrap();
    assert_eq!(chunks, vec!["Para1\n\nPara2"]);
}

#[test]
fn test_two_large_paragraphs_split() {
    let (first, second) = two_paragraph_answer();
    let text = format!("{first}\n\n{second}");

    let chunks = chunk_message(&text, DISCORD_MESSAGE_LIMIT).unwrap();
    assert_eq!(chunks, vec![first, second]);
}

#[test_case(3 * DISCORD_MESSAGE_LIMIT, 3 ; "exact multiple")]
#[test_case(3 * DISCORD_MESSAGE_LIMIT + 1, 4 ; "with remainder")]
fn test_hard_slice_count(len: usize, expected: usize) {
    let chunks = split_chunks(&"x".repeat(len), DISCORD_MESSAGE_LIMIT).unwrap();

    assert_eq!(chunks.len(), expected);
    assert!(chunks.iter().skip(1).all(|c| c.boundary == Boundary::HardSlice));
    assert!(chunks.iter().all(|c| c.text.chars().count() <= DISCORD_MESSAGE_LIMIT));
}

#[test]
fn test_realistic_answer_round_trips() {
    let paragraph = "Lifetimes describe how long a reference is valid. ".repeat(12);
    let code = format!("```rust\n{}```", "let x = &y;\n".repeat(300));
    let text = [paragraph.as_str(); 5].join("\n\n") + "\n\n" + &code + "\n\nHope that helps!";

    let chunks = split_chunks(&text, DISCORD_MESSAGE_LIMIT).unwrap();

    assert!(chunks.len() > 1);
    assert!(chunks.iter().all(|c| c.text.chars().count() <= DISCORD_MESSAGE_LIMIT));
    assert_eq!(rejoin(&chunks), text);
}

#[test]
fn test_zero_length_limit() {
    assert_matches!(
        chunk_message("text", 0),
        Err(ChunkError::InvalidConfiguration(0))
    );
}
