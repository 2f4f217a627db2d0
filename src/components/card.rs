use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Padding},
};

/// Color scheme of a card
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Plain,
    Accent,
    Danger,
}

impl Tone {
    fn border(self) -> Color {
        match self {
            Tone::Plain => Color::DarkGray,
            Tone::Accent => Color::Rgb(120, 190, 230),
            Tone::Danger => Color::Rgb(200, 100, 100),
        }
    }

    fn background(self) -> Option<Color> {
        match self {
            Tone::Plain => None,
            Tone::Accent => Some(Color::Rgb(22, 30, 40)),
            Tone::Danger => Some(Color::Rgb(45, 22, 24)),
        }
    }
}

/// Rounded, padded frame around a piece of content
#[derive(Clone, Debug, Default)]
pub struct Card<'a> {
    title: Option<&'a str>,
    tone: Tone,
    padded: bool,
}

impl<'a> Card<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    /// One column of horizontal padding inside the border
    pub fn padded(mut self) -> Self {
        self.padded = true;
        self
    }

    pub fn block(&self) -> Block<'a> {
        let mut style = Style::default();
        if let Some(bg) = self.tone.background() {
            style = style.bg(bg);
        }
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.tone.border()))
            .style(style);
        if self.padded {
            block = block.padding(Padding::horizontal(1));
        }
        if let Some(title) = self.title {
            block = block.title(format!(" {title} "));
        }
        block
    }

    /// Draw the frame and return the area left for content.
    pub fn render(&self, frame: &mut Frame, area: Rect) -> Rect {
        let block = self.block();
        let inner = block.inner(area);
        frame.render_widget(block, area);
        inner
    }
}
