//! Mood input sources
//!
//! A mood comes either from a preset button or from the free-text box, never
//! both. [`InputState`] keeps that exclusivity and resolves which string, if
//! any, should be submitted.

/// Whichever input source most recently produced a mood
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveSource {
    #[default]
    None,
    Preset(String),
    FreeText(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputState {
    active: ActiveSource,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> &ActiveSource {
        &self.active
    }

    pub fn selected_preset(&self) -> Option<&str> {
        match &self.active {
            ActiveSource::Preset(label) => Some(label),
            _ => None,
        }
    }

    /// Current free-text content, empty when a preset is active
    pub fn free_text(&self) -> &str {
        match &self.active {
            ActiveSource::FreeText(text) => text,
            _ => "",
        }
    }

    /// Select a preset, discarding any typed text. Returns the mood to submit.
    pub fn select_preset(&mut self, label: &str) -> String {
        self.active = ActiveSource::Preset(label.to_string());
        label.to_string()
    }

    /// Replace the free-text content. Never submits.
    pub fn edit_free_text(&mut self, text: &str) {
        self.active = if text.is_empty() {
            ActiveSource::None
        } else {
            ActiveSource::FreeText(text.to_string())
        };
    }

    /// Resolve the typed mood for submission.
    ///
    /// Returns `None` when the text is blank; a blank submit must never start
    /// a request.
    pub fn submit_free_text(&self) -> Option<String> {
        let trimmed = self.free_text().trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_preset_clears_free_text() {
        let mut input = InputState::new();
        input.edit_free_text("tired");
        let mood = input.select_preset("Happy");

        assert_eq!(mood, "Happy");
        assert_eq!(input.free_text(), "");
        assert_eq!(input.selected_preset(), Some("Happy"));
    }

    #[test]
    fn test_edit_free_text_clears_preset() {
        let mut input = InputState::new();
        input.select_preset("Sad");
        input.edit_free_text("tired");

        assert_eq!(input.selected_preset(), None);
        assert_eq!(input.active(), &ActiveSource::FreeText("tired".to_string()));
    }

    #[test]
    fn test_edit_to_empty_deactivates() {
        let mut input = InputState::new();
        input.edit_free_text("t");
        input.edit_free_text("");
        assert_eq!(input.active(), &ActiveSource::None);
    }

    #[test]
    fn test_submit_free_text_trims() {
        let mut input = InputState::new();
        input.edit_free_text("  a bit low \n");
        assert_eq!(input.submit_free_text(), Some("a bit low".to_string()));
        // Submitting keeps the typed text in place
        assert_eq!(input.free_text(), "  a bit low \n");
    }

    #[test]
    fn test_submit_blank_is_noop() {
        let mut input = InputState::new();
        input.edit_free_text("   ");
        assert_eq!(input.submit_free_text(), None);

        let mut preset = InputState::new();
        preset.select_preset("Calm");
        assert_eq!(preset.submit_free_text(), None);
        assert_eq!(preset.selected_preset(), Some("Calm"));
    }
}
