use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Bracketed label that dims when disabled
#[derive(Clone, Copy, Debug)]
pub struct Button<'a> {
    label: &'a str,
    enabled: bool,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Columns needed to draw the button
    pub fn width(&self) -> u16 {
        self.label.chars().count() as u16 + 4
    }
}

impl Widget for Button<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = if self.enabled {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(90, 170, 230))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray).bg(Color::Rgb(60, 60, 70))
        };
        let line = Line::from(vec![Span::styled(format!("[ {} ]", self.label), style)]);
        Paragraph::new(line).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_fits_label() {
        assert_eq!(Button::new("Ask").width(), 7);
        assert_eq!(Button::new("Loading...").enabled(false).width(), 14);
    }
}
