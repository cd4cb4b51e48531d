//! aacheck - find alignment defects in Unicode box-drawing diagrams
//!
//! Diagrams are checked for broken rectangles, dangling or mis-joined
//! connector lines, and arrowheads that are fed from the wrong side, point
//! at nothing, or hang on an orphaned shaft.
//!
//! # Example
//!
//! ```
//! use aacheck::analyze;
//!
//! let diagram = "\
//! ┌────┐   ┌────┐
//! │ A  │──▶│ B  │
//! └────┘   └────┘
//! ";
//! let diagnostics = analyze(diagram);
//! assert_eq!(diagnostics.correct_rectangles, 2);
//! assert_eq!(diagnostics.misaligned, 0);
//! ```
//!
//! Callers that reject unsupported glyph styles should check
//! [`has_disallowed_chars`] first:
//!
//! ```
//! assert!(aacheck::has_disallowed_chars("╭──╮\n╰──╯"));
//! ```

pub mod arrow;
pub mod chars;
pub mod components;
pub mod connect;
pub mod connector;
pub mod diagnostics;
pub mod extract;
pub mod grid;
pub mod rect;

use std::collections::BTreeSet;

pub use chars::{ArrowHead, Direction, Shape};
pub use diagnostics::{AnalyzeOptions, Diagnostics};
pub use extract::text_block;
pub use grid::{normalize, Grid, Pos};

use components::Components;

/// Analyze a diagram with default options.
pub fn analyze(text: &str) -> Diagnostics {
    analyze_with_options(text, &AnalyzeOptions::default())
}

/// Analyze a diagram.
///
/// Never fails: any text, including empty text, yields a record.
pub fn analyze_with_options(text: &str, options: &AnalyzeOptions) -> Diagnostics {
    let grid = normalize(text, options.tab_width);

    let mut comps = Components::build(&grid);
    let rects = rect::detect_rectangles(&grid, &mut comps);
    let connectors =
        connector::count_connector_errors(&grid, &comps, &rects, options.stack_centering);
    let arrows = arrow::count_arrow_errors(&grid);

    let mut rectangle_errors = rects.errors();
    if options.require_rectangle && rects.valid() == 0 {
        rectangle_errors = rectangle_errors.max(1);
    }

    let diagnostics = Diagnostics::new(
        rects.valid(),
        rectangle_errors,
        connectors.total(),
        arrows,
    );
    tracing::debug!(
        width = grid.width,
        height = grid.height,
        ?diagnostics,
        "analyzed diagram"
    );
    diagnostics
}

/// Unsupported box-drawing characters in `text` (rounded, heavy, double,
/// dashed ...), after escape sequences are removed.
pub fn disallowed_chars(text: &str) -> BTreeSet<char> {
    chars::disallowed_in(&grid::strip_ansi(text))
}

/// True when `text` uses any unsupported box-drawing character.
pub fn has_disallowed_chars(text: &str) -> bool {
    !disallowed_chars(text).is_empty()
}
