//! Full diagrams that once scored wrongly.

use aacheck::{analyze, Diagnostics};

const USER_FLOWCHART: &str = "\
┌─────────────┐     ┌─────────────┐     ┌─────────────┐
│ API         │────▶│ Approval    │────▶│ Transcoding │
│ Gateway     │     │ Service     │     │ Service     │
└─────────────┘     └─────────────┘     └─────────────┘
      ▲                    ▲                    ▲
      │                    │                    │
      │ Reject             │ Approve            │ Failure
      ▼                    ▼                    ▼
┌─────────────┐     ┌─────────────┐     ┌─────────────┐
│ Notification│◀────│ Review      │◀────│ Notify      │
│ Service     │     │ Step        │     │ Failure     │
└─────────────┘     └─────────────┘     └─────────────┘
";

const USER_SEQUENCE: &str = "\
┌─────────┐     ┌─────────┐     ┌─────────┐     ┌─────────┐
│ Queue   │────▶│ Worker  │────▶│Reviewer │────▶│Storage  │
└─────────┘     └─────────┘     └─────────┘     └─────────┘
     ▲                ▲                ▲                ▲
     │                │                │                │
     └────────────────┴────────────────┴────────────────┴────────────────┐
                                                                        │
                                                                        ▼
┌─────────┐     ┌─────────┐     ┌─────────┐                              │
│Restore  │◄────┤Handler  │◄────┤Checker  │                              │
└─────────┘     └─────────┘     └─────────┘                              │
                                                                        │
                                                                        ▼
                                                  Handles empty/corrupted backups
";

const POLICY_LINES: [&str; 26] = [
    "┌─────────────┐     ┌──────────────┐     ┌─────────────┐",
    "│ API         │────▶│ Authorization│────▶│ Data        │",
    "│ Gateway     │     │ Check        │     │ Schema      │",
    "└─────────────┘     └──────────────┘     └─────────────┘",
    "      │                   │                   │",
    "      │ Fail              │ Fail              │ Fail",
    "      ▼                   ▼                   ▼",
    "┌─────────────┐     ┌──────────────┐     ┌─────────────┐",
    "│ Error       │     │ Error        │     │ Error       │",
    "│ Response    │     │ Response     │     │ Response    │",
    "└─────────────┘     └──────────────┘     └─────────────┘",
    "      │                   │                   │",
    "      └───────────────────┴───────────────────┘",
    "                        Pass",
    "                         │",
    "                         ▼",
    "┌─────────────┐     ┌──────────────┐     ┌─────────────┐",
    "│ Content     │────▶│ Queue        │────▶│ Worker      │",
    "│ Filter      │     │ Notification │     │ Service     │",
    "└─────────────┘     └──────────────┘     └─────────────┘",
    "      │                   │                   │",
    "      │ Prohibited        │                   ▼",
    "┌─────────────┐          │             ┌─────────────┐",
    "│ Error       │          │             │ Logging     │",
    "│ Response    │          │             │ & Monitoring",
    "└─────────────┘          │             └─────────────┘",
];

/// Rows 20..=25 carry a stray vertical line under the queue box.
const QUEUE_LINE_ROWS: std::ops::RangeInclusive<usize> = 20..=25;

fn policy_lines() -> Vec<String> {
    POLICY_LINES.iter().map(|l| l.to_string()).collect()
}

fn remove_queue_line(lines: &mut [String]) {
    for row in QUEUE_LINE_ROWS {
        let line = &mut lines[row];
        let col = line
            .chars()
            .enumerate()
            .find(|&(col, c)| c == '│' && col > 18 && col < 35)
            .map(|(col, _)| col);
        if let Some(col) = col {
            *line = line
                .chars()
                .enumerate()
                .map(|(i, c)| if i == col { ' ' } else { c })
                .collect();
        }
    }
}

fn expect(diagram: &str, expected: [usize; 5]) {
    let want = Diagnostics {
        correct_rectangles: expected[0],
        rectangle_errors: expected[1],
        connector_errors: expected[2],
        arrow_errors: expected[3],
        misaligned: expected[4],
    };
    assert_eq!(analyze(diagram), want, "\n{diagram}");
}

#[test]
fn test_user_flowchart_is_not_clean() {
    let stats = analyze(USER_FLOWCHART);
    assert!(stats.misaligned >= 1);
    assert!(stats.connector_errors >= 1);
}

#[test]
fn test_user_sequence_is_not_clean() {
    let stats = analyze(USER_SEQUENCE);
    assert!(stats.misaligned >= 1);
    assert!(stats.connector_errors >= 1);
}

#[test]
fn test_policy_diagram_current() {
    expect(&policy_lines().join("\n"), [10, 1, 1, 0, 2]);
}

#[test]
fn test_policy_diagram_without_queue_line() {
    let mut lines = policy_lines();
    remove_queue_line(&mut lines);
    expect(&lines.join("\n"), [10, 1, 0, 0, 1]);
}

#[test]
fn test_policy_diagram_with_logging_box_fixed() {
    let mut lines = policy_lines();
    lines[24] = "│ Response    │          │             │ & Monitoring│".to_string();
    expect(&lines.join("\n"), [11, 0, 1, 0, 1]);
}

#[test]
fn test_policy_diagram_fully_fixed() {
    let mut lines = policy_lines();
    remove_queue_line(&mut lines);
    lines[24] = "│ Response    │                        │ & Monitoring│".to_string();
    expect(&lines.join("\n"), [11, 0, 0, 0, 0]);
}

#[test]
fn test_colored_diagram_matches_uncolored() {
    let base = "\
┌────┐   ┌────┐
│ A  │──▶│ B  │
└────┘   └────┘
";
    let colored = concat!(
        "\x1b[35m┌────┐\x1b[0m   \x1b[35m┌────┐\x1b[0m\n",
        "\x1b[35m│ A  │\x1b[0m──▶\x1b[35m│ B  │\x1b[0m\n",
        "\x1b[35m└────┘\x1b[0m   \x1b[35m└────┘\x1b[0m\n",
    );
    assert_eq!(analyze(base), analyze(colored));
    assert!(analyze(colored).is_clean());
}
