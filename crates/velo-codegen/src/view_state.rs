//! State collected while emitting a view, rendered into the view model.

use crate::naming::swift_string;
use indexmap::IndexSet;

/// Facts the view model must declare, gathered during one emission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Options of the last segmented control seen; duplicates kept.
    pub segment_options: Vec<String>,
    pub has_checkbox: bool,
    /// Text-field binding names, in first-seen order.
    pub bindings: IndexSet<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything recorded by a previous emission.
    pub fn reset(&mut self) {
        self.segment_options.clear();
        self.has_checkbox = false;
        self.bindings.clear();
    }

    /// Record the options of a segmented control, replacing earlier ones.
    pub fn set_segments(&mut self, options: Vec<String>) {
        self.segment_options = options;
    }

    pub fn mark_checkbox(&mut self) {
        self.has_checkbox = true;
    }

    /// Record a text-field binding. Returns false if it was already known.
    pub fn register_binding(&mut self, name: impl Into<String>) -> bool {
        self.bindings.insert(name.into())
    }

    pub fn has_segments(&self) -> bool {
        !self.segment_options.is_empty()
    }

    /// Published property declarations, one per line.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();

        if self.has_segments() {
            let options: Vec<String> = self.segment_options.iter().map(|o| swift_string(o)).collect();
            lines.push(format!(
                "@Published var segmentData: [String] = [{}]",
                options.join(", ")
            ));
            lines.push("@Published var selectedSegment: String?".to_string());
        }
        if self.has_checkbox {
            lines.push("@Published var isChecked: Bool = false".to_string());
        }
        for binding in &self.bindings {
            lines.push(format!("@Published var {}: String = \"\"", binding));
        }

        lines.join("\n")
    }
}
