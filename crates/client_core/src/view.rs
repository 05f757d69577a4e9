//! View abstraction over the quiz page and an in-memory document implementing it.

use std::{collections::BTreeMap, fmt};

use shared::domain::Guess;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementId {
    StartButton,
    NextButton,
    RealButton,
    FakeButton,
    GameArea,
    Instructions,
    RoundInfo,
    FlowerImage,
    Result,
    Score,
}

impl ElementId {
    pub const ALL: [ElementId; 10] = [
        ElementId::StartButton,
        ElementId::NextButton,
        ElementId::RealButton,
        ElementId::FakeButton,
        ElementId::GameArea,
        ElementId::Instructions,
        ElementId::RoundInfo,
        ElementId::FlowerImage,
        ElementId::Result,
        ElementId::Score,
    ];

    /// Elements nested inside the game area. Replacing the game area drops them.
    pub const GAME_AREA_CHILDREN: [ElementId; 7] = [
        ElementId::NextButton,
        ElementId::RealButton,
        ElementId::FakeButton,
        ElementId::RoundInfo,
        ElementId::FlowerImage,
        ElementId::Result,
        ElementId::Score,
    ];

    pub fn dom_id(self) -> &'static str {
        match self {
            ElementId::StartButton => "btn-start",
            ElementId::NextButton => "btn-next",
            ElementId::RealButton => "btn-real",
            ElementId::FakeButton => "btn-fake",
            ElementId::GameArea => "game-area",
            ElementId::Instructions => "instructions",
            ElementId::RoundInfo => "round-info",
            ElementId::FlowerImage => "flower-img",
            ElementId::Result => "result",
            ElementId::Score => "score",
        }
    }

    pub fn guess_button(guess: Guess) -> Self {
        match guess {
            Guess::Real => ElementId::RealButton,
            Guess::Fake => ElementId::FakeButton,
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dom_id())
    }
}

/// Mutations the round controller performs on the page.
///
/// Implementations must tolerate writes to elements that no longer exist
/// (for example after [`GameView::replace_game_area`]) by ignoring them.
pub trait GameView {
    fn has_element(&self, id: ElementId) -> bool;
    fn set_visible(&mut self, id: ElementId, visible: bool);
    fn set_enabled(&mut self, id: ElementId, enabled: bool);
    fn set_text(&mut self, id: ElementId, text: &str);
    fn set_image_source(&mut self, id: ElementId, src: &str);
    /// Replaces the whole game area, nested controls included, with a message.
    fn replace_game_area(&mut self, message: &str);

    fn show_retry(&mut self, label: &str) {
        self.set_text(ElementId::NextButton, label);
        self.set_visible(ElementId::NextButton, true);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub visible: bool,
    pub enabled: bool,
    pub text: String,
    pub src: Option<String>,
}

impl Element {
    fn shown(text: &str) -> Self {
        Self {
            visible: true,
            enabled: true,
            text: text.to_string(),
            src: None,
        }
    }

    fn hidden(text: &str) -> Self {
        Self {
            visible: false,
            ..Self::shown(text)
        }
    }
}

/// In-memory page with the layout of the quiz document: start button and
/// instructions visible, game area hidden until the game starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    elements: BTreeMap<ElementId, Element>,
}

impl Default for PageView {
    fn default() -> Self {
        Self::new()
    }
}

impl PageView {
    pub fn new() -> Self {
        let elements = ElementId::ALL
            .into_iter()
            .map(|id| {
                let element = match id {
                    ElementId::StartButton => Element::shown("Start Game"),
                    ElementId::Instructions => {
                        Element::shown("Decide whether each flower is a real photo or generated.")
                    }
                    ElementId::GameArea => Element::hidden(""),
                    ElementId::NextButton => Element::hidden("Next Round"),
                    ElementId::RealButton => Element::shown("Real"),
                    ElementId::FakeButton => Element::shown("Fake"),
                    _ => Element::shown(""),
                };
                (id, element)
            })
            .collect();
        Self { elements }
    }

    pub fn without(mut self, id: ElementId) -> Self {
        self.elements.remove(&id);
        self
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.element(id).map(|element| element.text.as_str())
    }

    pub fn image_source(&self, id: ElementId) -> Option<&str> {
        self.element(id).and_then(|element| element.src.as_deref())
    }

    pub fn is_visible(&self, id: ElementId) -> bool {
        self.element(id).is_some_and(|element| element.visible)
    }

    pub fn is_enabled(&self, id: ElementId) -> bool {
        self.element(id).is_some_and(|element| element.enabled)
    }

    /// True when a user could click the element: present, visible and enabled.
    pub fn is_interactive(&self, id: ElementId) -> bool {
        self.is_visible(id) && self.is_enabled(id)
    }
}

impl GameView for PageView {
    fn has_element(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    fn set_visible(&mut self, id: ElementId, visible: bool) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.visible = visible;
        }
    }

    fn set_enabled(&mut self, id: ElementId, enabled: bool) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.enabled = enabled;
        }
    }

    fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.text = text.to_string();
        }
    }

    fn set_image_source(&mut self, id: ElementId, src: &str) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.src = Some(src.to_string());
        }
    }

    fn replace_game_area(&mut self, message: &str) {
        for child in ElementId::GAME_AREA_CHILDREN {
            self.elements.remove(&child);
        }
        self.set_text(ElementId::GameArea, message);
    }
}
