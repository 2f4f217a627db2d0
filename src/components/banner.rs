use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, ColorStop, Fill, LinearGradient, Renderer,
    fonts, integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::state::LOADING_ANIM_CYCLE_TICKS;

/// FIGlet title over a sky gradient; a glint sweeps across while loading
pub struct Banner;

pub struct BannerProps<'a> {
    pub title: &'a str,
    pub tagline: &'a str,
    pub is_animating: bool,
    pub tick_count: u32,
}

/// Rows besides the FIGlet title: 1 spacer + 1 tagline.
pub const BANNER_OVERHEAD: u16 = 2;

const SKY: (u8, u8, u8) = (70, 150, 225);
const HAZE: (u8, u8, u8) = (160, 210, 240);
const GLINT: (u8, u8, u8) = (250, 250, 255);

/// Half-width of the glint band, in gradient units
const GLINT_HALF_WIDTH: f32 = 0.12;

fn art(rgb: (u8, u8, u8)) -> ArtColor {
    ArtColor::rgb(rgb.0, rgb.1, rgb.2)
}

/// Centre of the glint for this tick, kept far enough from the edges that
/// the whole band stays inside the title.
fn glint_position(tick_count: u32) -> f32 {
    let steps = LOADING_ANIM_CYCLE_TICKS.max(1);
    let progress = (tick_count % steps) as f32 / steps as f32;
    GLINT_HALF_WIDTH + progress * (1.0 - 2.0 * GLINT_HALF_WIDTH)
}

/// Gradient stops from sky to haze, with the glint band laid over when set.
fn sky_stops(glint: Option<f32>) -> Vec<(f32, ArtColor)> {
    let (sky, haze) = (art(SKY), art(HAZE));
    let Some(center) = glint else {
        return vec![(0.0, sky), (1.0, haze)];
    };
    let before = center - GLINT_HALF_WIDTH;
    let after = center + GLINT_HALF_WIDTH;
    let mut stops = vec![
        (0.0, sky),
        (before, sky.interpolate(haze, before)),
        (center, art(GLINT)),
        (after, sky.interpolate(haze, after)),
        (1.0, haze),
    ];
    stops.dedup_by(|next, prev| (next.0 - prev.0).abs() < f32::EPSILON);
    stops
}

fn sky_fill(glint: Option<f32>) -> Fill {
    let stops = sky_stops(glint)
        .into_iter()
        .map(|(pos, color)| ColorStop::new(pos, color))
        .collect();
    Fill::Linear(LinearGradient::new(5.0, stops))
}

impl Component<Action> for Banner {
    type Props<'a> = BannerProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let [title_area, _, tagline_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let glint = props
            .is_animating
            .then(|| glint_position(props.tick_count));
        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(sky_fill(glint));
        frame.render_widget(ArtBox::new(&renderer, props.title), title_area);

        let tagline = Line::from(Span::styled(props.tagline, Style::default().fg(Color::Gray)))
            .centered();
        frame.render_widget(Paragraph::new(tagline), tagline_area);
    }
}
