use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use serde_json::Value;

use super::{Card, Component, Tone};
use crate::action::Action;
use crate::normalize::{WeatherReport, field_text};

/// Icon family for a free-text condition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sky {
    Rain,
    Clear,
    Cloud,
}

impl Sky {
    pub fn from_condition(condition: Option<&str>) -> Self {
        let Some(condition) = condition else {
            return Sky::Cloud;
        };
        let condition = condition.to_lowercase();
        if condition.contains("rain") {
            Sky::Rain
        } else if condition.contains("sunny") || condition.contains("clear") {
            Sky::Clear
        } else {
            Sky::Cloud
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Sky::Rain => "\u{1f327}\u{fe0f}",
            Sky::Clear => "\u{2600}\u{fe0f}",
            Sky::Cloud => "\u{2601}\u{fe0f}",
        }
    }
}

pub struct ReportCard;

pub struct ReportCardProps<'a> {
    pub report: &'a WeatherReport,
}

/// Rows: heading, description, blank, temperature, blank, details
const CONTENT_ROWS: u16 = 6;

fn detail_span(label: &str, value: &Value, unit: &str, color: Color) -> Vec<Span<'static>> {
    vec![
        Span::styled(format!("{label} "), Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}{unit}", field_text(value)),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
    ]
}

impl Component<Action> for ReportCard {
    type Props<'a> = ReportCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let report = props.report;
        let inner = Card::new().tone(Tone::Accent).padded().render(frame, area);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Heading
            Constraint::Length(1), // Description
            Constraint::Length(1),
            Constraint::Length(1), // Temperature
            Constraint::Length(1),
            Constraint::Length(1), // Humidity / wind / visibility
            Constraint::Min(0),
        ])
        .split(inner);

        let condition = report.condition_text();
        let sky = Sky::from_condition(condition.as_deref());
        let heading = Line::from(vec![
            Span::raw(sky.icon()),
            Span::raw("  "),
            Span::styled(
                condition.unwrap_or_else(|| "Weather Update".to_string()),
                Style::default().fg(Color::White).bold(),
            ),
        ]);
        frame.render_widget(Paragraph::new(heading), chunks[0]);

        let description = report
            .description_text()
            .unwrap_or_else(|| "Current conditions".to_string());
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                description,
                Style::default().fg(Color::Gray),
            ))),
            chunks[1],
        );

        if let Some(temperature) = &report.temperature {
            let line = Line::from(vec![
                Span::styled("Temperature ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{}°", field_text(temperature)),
                    Style::default()
                        .fg(Color::Rgb(90, 170, 230))
                        .add_modifier(Modifier::BOLD),
                ),
            ]);
            frame.render_widget(Paragraph::new(line), chunks[3]);
        }

        let mut details = Vec::new();
        if let Some(humidity) = &report.humidity {
            details.extend(detail_span("Humidity", humidity, "%", Color::Rgb(120, 160, 255)));
        }
        if let Some(wind) = &report.wind_speed {
            details.extend(detail_span("Wind Speed", wind, " km/h", Color::Rgb(100, 210, 220)));
        }
        if let Some(visibility) = &report.visibility {
            details.extend(detail_span("Visibility", visibility, " km", Color::Rgb(150, 200, 240)));
        }
        if !details.is_empty() {
            frame.render_widget(Paragraph::new(Line::from(details)), chunks[5]);
        }
    }
}

impl ReportCard {
    /// Height the card needs including its border
    pub fn height() -> u16 {
        CONTENT_ROWS + 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sky_from_condition() {
        assert_eq!(Sky::from_condition(Some("Light Rain")), Sky::Rain);
        assert_eq!(Sky::from_condition(Some("Sunny")), Sky::Clear);
        assert_eq!(Sky::from_condition(Some("clear sky")), Sky::Clear);
        assert_eq!(Sky::from_condition(Some("Overcast")), Sky::Cloud);
        assert_eq!(Sky::from_condition(None), Sky::Cloud);
    }
}
