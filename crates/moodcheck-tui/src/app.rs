use std::sync::Arc;

use moodcheck_core::{
    Event, MoodCatalog, MoodSession, PendingRequest, SuggestionTransport, ViewState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Moods,
    Input,
}

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub struct App {
    pub should_quit: bool,
    pub focus: Focus,
    pub catalog: MoodCatalog,

    // Highlighted mood button
    pub mood_cursor: usize,
    // Cursor position in the free-text box, in chars
    pub input_cursor: usize,

    // Loading animation
    pub animation_frame: u8,

    session: MoodSession,
}

impl App {
    pub fn new(session: MoodSession, catalog: MoodCatalog) -> Self {
        Self {
            should_quit: false,
            focus: Focus::Moods,
            catalog,
            mood_cursor: 0,
            input_cursor: 0,
            animation_frame: 0,
            session,
        }
    }

    pub fn view(&self) -> &ViewState {
        self.session.state()
    }

    pub fn is_loading(&self) -> bool {
        self.view().is_loading()
    }

    pub fn free_text(&self) -> &str {
        self.view().input.free_text()
    }

    pub fn transport(&self) -> Arc<dyn SuggestionTransport> {
        self.session.transport()
    }

    /// Apply an event to the session. Returns a request to run, if one was started.
    pub fn dispatch(&mut self, event: Event) -> Option<PendingRequest> {
        let request = self.session.dispatch(event);

        // Selecting a preset empties the text box under the cursor
        let char_count = self.free_text().chars().count();
        self.input_cursor = self.input_cursor.min(char_count);

        request
    }

    pub fn mood_left(&mut self) {
        self.mood_cursor = self.mood_cursor.saturating_sub(1);
    }

    pub fn mood_right(&mut self) {
        if self.mood_cursor + 1 < self.catalog.len() {
            self.mood_cursor += 1;
        }
    }

    pub fn select_mood(&mut self, idx: usize) -> Option<PendingRequest> {
        let label = self.catalog.get(idx)?.label.clone();
        self.mood_cursor = idx;
        self.dispatch(Event::SelectPreset(label))
    }

    pub fn select_highlighted_mood(&mut self) -> Option<PendingRequest> {
        self.select_mood(self.mood_cursor)
    }

    pub fn submit_free_text(&mut self) -> Option<PendingRequest> {
        if !self.view().can_submit_free_text() {
            return None;
        }
        self.dispatch(Event::SubmitFreeText)
    }

    pub fn insert_char(&mut self, c: char) {
        let mut text = self.free_text().to_string();
        let byte_pos = char_to_byte_index(&text, self.input_cursor);
        text.insert(byte_pos, c);
        self.input_cursor += 1;
        self.dispatch(Event::EditFreeText(text));
    }

    pub fn delete_before_cursor(&mut self) {
        if self.input_cursor == 0 {
            return;
        }
        let mut text = self.free_text().to_string();
        self.input_cursor -= 1;
        let byte_pos = char_to_byte_index(&text, self.input_cursor);
        text.remove(byte_pos);
        self.dispatch(Event::EditFreeText(text));
    }

    pub fn delete_at_cursor(&mut self) {
        let mut text = self.free_text().to_string();
        if self.input_cursor >= text.chars().count() {
            return;
        }
        let byte_pos = char_to_byte_index(&text, self.input_cursor);
        text.remove(byte_pos);
        self.dispatch(Event::EditFreeText(text));
    }

    pub fn cursor_left(&mut self) {
        self.input_cursor = self.input_cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let char_count = self.free_text().chars().count();
        self.input_cursor = (self.input_cursor + 1).min(char_count);
    }

    pub fn cursor_home(&mut self) {
        self.input_cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.input_cursor = self.free_text().chars().count();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Moods => Focus::Input,
            Focus::Input => Focus::Moods,
        };
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.is_loading() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        } else {
            self.animation_frame = 0;
        }
    }
}
