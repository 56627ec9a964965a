//! Operator-facing progress reporting
//!
//! The engine never formats terminal output itself. It describes each phase
//! through a [`Reporter`] together with an explicit nesting depth, and the
//! CLI decides how that looks.

/// Kind of a reported line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Phase heading
    Section,
    /// Secondary detail
    Note,
    /// Benign but noteworthy (missing optional hook, skipped target)
    Attention,
    /// Phase finished
    Success,
    /// Phase failed
    Error,
}

/// Receiver of phase progress
pub trait Reporter {
    /// Print one line at `depth`
    fn message(&self, tone: Tone, text: &str, depth: usize);

    /// `(index/total)` counter ahead of a batch item
    fn counter(&self, index: usize, total: usize);

    /// Horizontal rule bracketing hook output
    fn ruler(&self, depth: usize);

    /// Blank separator line
    fn blank(&self);

    /// Phase heading
    fn section(&self, text: &str, depth: usize) {
        self.message(Tone::Section, text, depth);
    }

    /// Secondary detail
    fn note(&self, text: &str, depth: usize) {
        self.message(Tone::Note, text, depth);
    }

    /// Benign advisory
    fn attention(&self, text: &str, depth: usize) {
        self.message(Tone::Attention, text, depth);
    }

    /// Success line
    fn success(&self, text: &str, depth: usize) {
        self.message(Tone::Success, text, depth);
    }

    /// Failure line
    fn error(&self, text: &str, depth: usize) {
        self.message(Tone::Error, text, depth);
    }
}

/// Reporter that prints nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn message(&self, _tone: Tone, _text: &str, _depth: usize) {}
    fn counter(&self, _index: usize, _total: usize) {}
    fn ruler(&self, _depth: usize) {}
    fn blank(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingReporter;

    #[test]
    fn test_default_methods_forward_tone_and_depth() {
        let reporter = RecordingReporter::new();
        reporter.section("Syncing", 0);
        reporter.attention("Hook not found", 2);
        reporter.error("exit code 3", 1);

        assert_eq!(
            reporter.lines(),
            vec![
                (Tone::Section, "Syncing".to_string(), 0),
                (Tone::Attention, "Hook not found".to_string(), 2),
                (Tone::Error, "exit code 3".to_string(), 1),
            ]
        );
        assert!(reporter.contains(Tone::Error, "code 3"));
        assert!(!reporter.contains(Tone::Success, "code 3"));
    }

    #[test]
    fn test_counter_is_recorded() {
        let reporter = RecordingReporter::new();
        reporter.counter(1, 2);
        assert!(reporter.contains(Tone::Note, "(1/2)"));
    }
}
