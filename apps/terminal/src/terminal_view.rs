//! Line-oriented rendering of the quiz page.

use std::io::Write;

use client_core::{ElementId, GameView, PageView, QuizClient};
use tracing::warn;

/// Keeps the page model in a [`PageView`] and echoes the parts a player
/// needs to see as plain lines on the writer.
pub struct TerminalView<W: Write> {
    page: PageView,
    client: QuizClient,
    out: W,
}

impl<W: Write> TerminalView<W> {
    /// `client` is only used to turn server-relative image paths into URLs.
    pub fn new(client: QuizClient, out: W) -> Self {
        Self {
            page: PageView::new(),
            client,
            out,
        }
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    fn emit(&mut self, line: &str) {
        if let Err(err) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            warn!(error = %err, "failed to write to terminal");
        }
    }

    fn guesses_open(&self) -> bool {
        self.page.is_interactive(ElementId::RealButton)
            && self.page.is_interactive(ElementId::FakeButton)
    }
}

impl<W: Write> GameView for TerminalView<W> {
    fn has_element(&self, id: ElementId) -> bool {
        self.page.has_element(id)
    }

    fn set_visible(&mut self, id: ElementId, visible: bool) {
        let was_visible = self.page.is_visible(id);
        self.page.set_visible(id, visible);
        if id == ElementId::NextButton && visible && !was_visible {
            let label = self.page.text(id).unwrap_or_default().to_string();
            let command = if label.eq_ignore_ascii_case("retry") {
                "retry"
            } else {
                "next"
            };
            self.emit(&format!("[{label}] type `{command}` to continue"));
        }
    }

    fn set_enabled(&mut self, id: ElementId, enabled: bool) {
        let was_open = self.guesses_open();
        self.page.set_enabled(id, enabled);
        if !was_open && self.guesses_open() {
            self.emit("Real or fake? type `real` or `fake`");
        }
    }

    fn set_text(&mut self, id: ElementId, text: &str) {
        self.page.set_text(id, text);
        match id {
            ElementId::RoundInfo => self.emit(&format!("== {text} ==")),
            ElementId::Result if !text.is_empty() => self.emit(&format!("> {text}")),
            ElementId::Score => self.emit(text),
            _ => {}
        }
    }

    fn set_image_source(&mut self, id: ElementId, src: &str) {
        self.page.set_image_source(id, src);
        if id == ElementId::FlowerImage {
            let url = self.client.resolve(src);
            self.emit(&format!("image: {url}"));
        }
    }

    fn replace_game_area(&mut self, message: &str) {
        self.page.replace_game_area(message);
        self.emit(&format!("*** {message} ***"));
    }
}
