use serde::{Deserialize, Serialize};

/// A selectable mood: the label sent to the service and the glyph shown on its button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodOption {
    pub label: String,
    pub glyph: String,
}

impl MoodOption {
    pub fn new(label: &str, glyph: &str) -> Self {
        Self {
            label: label.to_string(),
            glyph: glyph.to_string(),
        }
    }
}

/// Fixed list of preset moods, built once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodCatalog {
    options: Vec<MoodOption>,
}

impl MoodCatalog {
    pub fn new(options: Vec<MoodOption>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &[MoodOption] {
        &self.options
    }

    pub fn get(&self, idx: usize) -> Option<&MoodOption> {
        self.options.get(idx)
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.options.iter().position(|o| o.label == label)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl Default for MoodCatalog {
    fn default() -> Self {
        Self::new(vec![
            MoodOption::new("Happy", "😀"),
            MoodOption::new("Sad", "😢"),
            MoodOption::new("Angry", "😡"),
            MoodOption::new("Anxious", "😱"),
            MoodOption::new("Calm", "😌"),
        ])
    }
}
