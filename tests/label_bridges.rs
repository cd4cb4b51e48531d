//! Labels sitting inside connector lines.

use aacheck::{analyze_with_options, AnalyzeOptions, Diagnostics};

fn check(diagram: &str) -> Diagnostics {
    analyze_with_options(diagram, &AnalyzeOptions::new().with_require_rectangle(false))
}

#[test]
fn test_horizontal_bridge() {
    let diagram = "\
┌────┐        ┌────┐
│ A  │─ ok ──▶│ B  │
└────┘        └────┘
";
    assert_eq!(
        check(diagram),
        Diagnostics {
            correct_rectangles: 2,
            ..Diagnostics::default()
        }
    );
}

#[test]
fn test_bridge_with_punctuation() {
    let diagram = "\
┌────┐          ┌────┐
│ A  │─ ok!? ──▶│ B  │
└────┘          └────┘
";
    assert!(check(diagram).is_clean());
}

#[test]
fn test_missing_left_line() {
    let diagram = "\
┌────┐        ┌────┐
│ A  │  ok ──▶│ B  │
└────┘        └────┘
";
    let stats = check(diagram);
    assert_eq!(stats.connector_errors, 1);
    assert_eq!(stats.arrow_errors, 1);
}

#[test]
fn test_line_never_resumes_before_arrow() {
    let diagram = "\
┌────┐        ┌────┐
│ A  │── ok   ▶│ B  │
└────┘        └────┘
";
    let stats = check(diagram);
    assert!(stats.connector_errors >= 1);
    assert!(stats.arrow_errors >= 1);
    assert!(stats.misaligned >= 2);
}

#[test]
fn test_spaces_are_not_a_label() {
    let diagram = "\
┌────┐        ┌────┐
│ A  │──    ──▶│ B  │
└────┘        └────┘
";
    let stats = check(diagram);
    assert!(stats.connector_errors >= 1);
}

#[test]
fn test_vertical_label_next_to_line() {
    let diagram = "\
┌──┐
│A │
└┬─┘
 Pass
  │
  ▼
┌──┐
│B │
└──┘
";
    assert!(check(diagram).is_clean());
}

#[test]
fn test_label_interrupting_vertical_line() {
    let stats = check("  │\n  X\n  │\n");
    assert_eq!(stats.connector_errors, 2);
}

#[test]
fn test_label_overlapping_malformed_box() {
    let stats = check("┌──────┐\n│ A ok │\n└─────┘\n");
    assert_eq!(stats.rectangle_errors, 1);
    assert_eq!(stats.connector_errors, 0);
}
