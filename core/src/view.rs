//! Rendering onto a write-only surface.
//!
//! The browser page is a tree of named regions. The game never reads it
//! back; every render clears a section and fills it again.

use crate::{
    game::{GameState, GameStatus},
    posting::PostingFields,
    sanitize::escape_html,
};
use serde::Serialize;
use std::collections::BTreeMap;

pub const INPUT_PLACEHOLDER: &str = "Wer hat das geschrieben?";
pub const SUBMIT_LABEL: &str = "Rate";
pub const SOLUTION_PREFIX: &str = "Lösung: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Posting,
    Guesses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    Username,
    Rating,
    Status,
    Published,
    Title,
    Message,
    Link,
    Guess(usize),
}

impl Region {
    pub fn section(self) -> Section {
        match self {
            Region::Guess(_) => Section::Guesses,
            _ => Section::Posting,
        }
    }

    /// CSS class (or element id) of the region in the page markup.
    pub fn class_name(self) -> String {
        match self {
            Region::Username  => "posting-username".into(),
            Region::Rating    => "posting-rating".into(),
            Region::Status    => "posting-status".into(),
            Region::Published => "posting-published".into(),
            Region::Title     => "posting-title".into(),
            Region::Message   => "posting-message".into(),
            Region::Link      => "posting-link".into(),
            Region::Guess(i)  => format!("postle-guess-{i}"),
        }
    }
}

/// Visual tone of the guess input once the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputTone {
    Neutral,
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputState {
    pub disabled:    bool,
    pub placeholder: String,
    pub value:       String,
    pub tone:        InputTone,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            disabled:    false,
            placeholder: INPUT_PLACEHOLDER.into(),
            value:       String::new(),
            tone:        InputTone::Neutral,
        }
    }
}

impl InputState {
    /// Input for a game in `state`. A finished game locks the field and
    /// reveals the solution.
    pub fn for_game(state: &GameState) -> Self {
        let tone = match state.status() {
            GameStatus::InProgress => return Self::default(),
            GameStatus::Won  => InputTone::Success,
            GameStatus::Lost => InputTone::Danger,
        };
        Self {
            disabled:    true,
            placeholder: String::new(),
            value:       format!("{SOLUTION_PREFIX}{}", state.solution()),
            tone,
        }
    }
}

/// Something the game can draw on.
pub trait Surface {
    /// Empty every region of `section`.
    fn clear(&mut self, section: Section);
    /// Replace the content of one region.
    fn write(&mut self, region: Region, content: &str);
    /// Rebuild the guess list with `count` empty slots.
    fn guess_slots(&mut self, count: usize);
    fn set_input(&mut self, input: &InputState);
}

/// Draw a posting. Absent fields stay empty; title and body are untrusted
/// and get escaped.
pub fn render_posting(surface: &mut dyn Surface, fields: &PostingFields) {
    surface.clear(Section::Posting);

    if let Some(href) = &fields.permalink {
        surface.write(Region::Link, href);
    }
    if let Some(author) = &fields.author {
        surface.write(Region::Username, author);
    }
    if let Some(status) = &fields.status {
        surface.write(Region::Status, status);
    }
    if let Some(published) = &fields.published_at {
        surface.write(Region::Published, published);
    }
    if let Some(rating) = fields.rating() {
        surface.write(Region::Rating, &rating);
    }
    if let Some(title) = &fields.title {
        surface.write(Region::Title, &escape_html(title));
    }
    if let Some(body) = &fields.body {
        surface.write(Region::Message, &escape_html(body));
    }
}

/// Draw the guess list and the input field.
pub fn render_game(surface: &mut dyn Surface, state: &GameState) {
    for (i, guess) in state.guesses().iter().enumerate() {
        surface.write(Region::Guess(i), guess);
    }
    surface.set_input(&InputState::for_game(state));
}

// ── In-memory surface ──────────────────────────────────────────

/// Keeps region contents in memory and renders them to page markup.
#[derive(Debug, Clone, Default)]
pub struct MarkupSurface {
    regions:     BTreeMap<Region, String>,
    guess_slots: usize,
    input:       InputState,
}

impl MarkupSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(&self, region: Region) -> Option<&str> {
        self.regions.get(&region).map(String::as_str)
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn slot_count(&self) -> usize {
        self.guess_slots
    }

    fn text(&self, region: Region) -> &str {
        self.region(region).unwrap_or("")
    }

    /// The page fragment the browser would show.
    pub fn to_html(&self) -> String {
        let mut html = String::new();

        html.push_str("<div id=\"postle-posting\">\n");
        html.push_str("  <div class=\"row justify-content-center mt-2 position-relative\">\n");
        html.push_str("    <div class=\"p-3 bg-posting rounded text-start\">\n");
        html.push_str(&format!(
            "      <div class=\"row\"><div class=\"col fw-bold text-start posting-username small\">{}</div>\
             <div class=\"col text-end posting-rating small\">{}</div></div>\n",
            self.text(Region::Username),
            self.text(Region::Rating),
        ));
        html.push_str(&format!(
            "      <div class=\"row\"><div class=\"col text-start posting-status small\">{}</div></div>\n",
            self.text(Region::Status),
        ));
        html.push_str(&format!(
            "      <div class=\"row\"><div class=\"col text-muted text-start posting-published small\">{}</div></div>\n",
            self.text(Region::Published),
        ));
        html.push_str("      <hr>\n");
        html.push_str(&format!(
            "      <div class=\"row\"><div class=\"col fw-bold text-start posting-title\">{}</div></div>\n",
            self.text(Region::Title),
        ));
        html.push_str(&format!(
            "      <div class=\"row\"><div class=\"col posting-message\">{}</div></div>\n",
            self.text(Region::Message),
        ));
        html.push_str("    </div>\n");
        match self.region(Region::Link) {
            Some(href) => html.push_str(&format!(
                "    <a class=\"stretched-link posting-link\" target=\"_blank\" href=\"{}\"></a>\n",
                escape_html(href)
            )),
            None => html.push_str("    <a class=\"stretched-link posting-link\" target=\"_blank\"></a>\n"),
        }
        html.push_str("  </div>\n</div>\n");

        html.push_str("<div id=\"postle-guesses\">\n");
        for i in 0..self.guess_slots {
            html.push_str(&format!(
                "  <div class=\"row row-guess my-2 py-2 ps-3 bg-guess rounded\" id=\"{}\">{}</div>\n",
                Region::Guess(i).class_name(),
                self.text(Region::Guess(i)),
            ));
        }
        html.push_str("</div>\n");

        let mut classes = String::from("form-control");
        match self.input.tone {
            InputTone::Neutral => {}
            InputTone::Success => classes.push_str(" bg-success fw-bold text-muted"),
            InputTone::Danger  => classes.push_str(" bg-danger fw-bold text-muted"),
        }
        html.push_str(&format!(
            "<input type=\"text\" class=\"{classes}\" id=\"postle-user-input\" placeholder=\"{}\" value=\"{}\"{}>\n",
            escape_html(&self.input.placeholder),
            escape_html(&self.input.value),
            if self.input.disabled { " disabled" } else { "" },
        ));
        html.push_str(&format!(
            "<button type=\"button\" class=\"btn btn-primary\" id=\"postle-user-input-submit\">{SUBMIT_LABEL}</button>\n"
        ));
        html
    }
}

impl Surface for MarkupSurface {
    fn clear(&mut self, section: Section) {
        self.regions.retain(|region, _| region.section() != section);
        if section == Section::Guesses {
            self.guess_slots = 0;
        }
    }

    fn write(&mut self, region: Region, content: &str) {
        if let Region::Guess(i) = region {
            if i >= self.guess_slots {
                return;
            }
        }
        self.regions.insert(region, content.to_string());
    }

    fn guess_slots(&mut self, count: usize) {
        self.clear(Section::Guesses);
        self.guess_slots = count;
    }

    fn set_input(&mut self, input: &InputState) {
        self.input = input.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_outside_the_slots_are_dropped() {
        let mut s = MarkupSurface::new();
        s.guess_slots(2);
        s.write(Region::Guess(1), "bob");
        s.write(Region::Guess(2), "carol");
        assert_eq!(s.region(Region::Guess(1)), Some("bob"));
        assert_eq!(s.region(Region::Guess(2)), None);
    }

    #[test]
    fn clearing_one_section_keeps_the_other() {
        let mut s = MarkupSurface::new();
        s.guess_slots(1);
        s.write(Region::Guess(0), "bob");
        s.write(Region::Title, "Titel");
        s.clear(Section::Posting);
        assert_eq!(s.region(Region::Title), None);
        assert_eq!(s.region(Region::Guess(0)), Some("bob"));
    }

    #[test]
    fn html_contains_slots_and_input() {
        let mut s = MarkupSurface::new();
        s.guess_slots(3);
        s.set_input(&InputState::default());
        let html = s.to_html();
        assert!(html.contains("id=\"postle-guess-2\""));
        assert!(!html.contains("id=\"postle-guess-3\""));
        assert!(html.contains(INPUT_PLACEHOLDER));
        assert!(!html.contains(" disabled"));
    }
}
