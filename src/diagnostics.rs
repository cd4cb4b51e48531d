//! Analysis options and the aggregate defect record.

use serde::{Deserialize, Serialize};

/// Options for [`crate::analyze_with_options`].
///
/// # Example
///
/// ```
/// use aacheck::{analyze_with_options, AnalyzeOptions};
///
/// let options = AnalyzeOptions::new()
///     .with_require_rectangle(false)
///     .with_tab_width(4);
/// let diagnostics = analyze_with_options("──▶ done", &options);
/// assert_eq!(diagnostics.rectangle_errors, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Charge one rectangle error when no valid box was found.
    pub require_rectangle: bool,
    /// Tab stop width used while normalizing. Zero behaves as one.
    pub tab_width: usize,
    /// Require vertical tracks in a single-column stack of boxes to sit on
    /// the boxes' center column.
    pub stack_centering: bool,
}

impl AnalyzeOptions {
    pub fn new() -> Self {
        Self {
            require_rectangle: true,
            tab_width: 8,
            stack_centering: true,
        }
    }

    pub fn with_require_rectangle(mut self, require_rectangle: bool) -> Self {
        self.require_rectangle = require_rectangle;
        self
    }

    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    pub fn with_stack_centering(mut self, stack_centering: bool) -> Self {
        self.stack_centering = stack_centering;
        self
    }
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Defect counts for one diagram.
///
/// `misaligned` is always the sum of the three error counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub correct_rectangles: usize,
    pub rectangle_errors: usize,
    pub connector_errors: usize,
    pub arrow_errors: usize,
    pub misaligned: usize,
}

impl Diagnostics {
    pub(crate) fn new(
        correct_rectangles: usize,
        rectangle_errors: usize,
        connector_errors: usize,
        arrow_errors: usize,
    ) -> Self {
        Self {
            correct_rectangles,
            rectangle_errors,
            connector_errors,
            arrow_errors,
            misaligned: rectangle_errors + connector_errors + arrow_errors,
        }
    }

    /// No defects of any kind.
    pub fn is_clean(&self) -> bool {
        self.misaligned == 0
    }

    /// Share of correct boxes among correct boxes plus defects, in `[0, 1]`.
    /// A diagram with nothing to grade scores zero.
    pub fn alignment_score(&self) -> f64 {
        let total = self.correct_rectangles + self.misaligned;
        if total == 0 {
            0.0
        } else {
            self.correct_rectangles as f64 / total as f64
        }
    }
}
