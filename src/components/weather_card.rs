use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::icons::{self, AssetKey, SpriteSize};
use crate::state::WeatherReading;

/// Populated weather card: icon, temperature, location, humidity and wind
pub struct WeatherCard;

pub struct WeatherCardProps<'a> {
    pub reading: &'a WeatherReading,
}

/// Rows besides sprite and temperature: blank, location, caption, blank,
/// two detail rows.
const LAYOUT_FIXED: u16 = 6;

/// Temperature text caps: terminus(6), miniwi(4), plain(1).
const TEMP_TIERS: [u16; 3] = [6, 4, 1];

struct LayoutSizing {
    sprite: Option<SpriteSize>,
    temp_cap: u16,
}

/// Fit the largest sprite by shrinking the temperature text first.
fn compute_layout(area_height: u16) -> LayoutSizing {
    for &temp_cap in &TEMP_TIERS {
        let budget = area_height.saturating_sub(temp_cap + LAYOUT_FIXED);
        if let Some(size) = SpriteSize::for_height(budget) {
            return LayoutSizing {
                sprite: Some(size),
                temp_cap,
            };
        }
    }
    LayoutSizing {
        sprite: None,
        temp_cap: TEMP_TIERS[0],
    }
}

pub fn format_temperature(celsius: i32) -> String {
    format!("{celsius}°C")
}

pub fn format_wind(speed: f64) -> String {
    format!("{speed} m/s")
}

impl Component<Action> for WeatherCard {
    type Props<'a> = WeatherCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let reading = props.reading;
        let sizing = compute_layout(area.height);
        let sprite_h = sizing.sprite.map_or(1, SpriteSize::height);

        let chunks = Layout::vertical([
            Constraint::Length(sprite_h),
            Constraint::Length(1),
            Constraint::Max(sizing.temp_cap),
            Constraint::Length(1), // Location
            Constraint::Length(1), // Condition caption
            Constraint::Length(1),
            Constraint::Length(2), // Humidity / wind
        ])
        .flex(Flex::Center)
        .split(area);

        match sizing.sprite {
            Some(size) => {
                let art = icons::get_sprite(reading.icon, size);
                frame.render_widget(
                    Paragraph::new(art).alignment(Alignment::Center),
                    chunks[0],
                );
            }
            None => {
                let glyph = Line::from(reading.icon.asset().glyph()).centered();
                frame.render_widget(Paragraph::new(glyph), chunks[0]);
            }
        }

        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(temperature_gradient(reading.temperature));
        frame.render_widget(
            ArtBox::new(&renderer, &format_temperature(reading.temperature)),
            chunks[2],
        );

        let location = Line::from(vec![Span::styled(
            reading.location.clone(),
            Style::default().fg(Color::Rgb(254, 240, 138)).bold(),
        )])
        .centered();
        frame.render_widget(Paragraph::new(location), chunks[3]);

        let caption = Line::from(vec![Span::styled(
            reading.icon.label(),
            Style::default().fg(Color::Gray),
        )])
        .centered();
        frame.render_widget(Paragraph::new(caption), chunks[4]);

        render_details(frame, chunks[6], reading);
    }
}

fn render_details(frame: &mut Frame, area: Rect, reading: &WeatherReading) {
    let columns = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let detail = |asset: AssetKey, value: String, label: &'static str| {
        Paragraph::new(vec![
            Line::from(vec![
                Span::raw(asset.glyph()),
                Span::raw(" "),
                Span::styled(value, Style::default().fg(Color::White).bold()),
            ]),
            Line::from(Span::styled(label, Style::default().fg(Color::DarkGray))),
        ])
        .alignment(Alignment::Center)
    };

    frame.render_widget(
        detail(
            AssetKey::Humidity,
            format!("{}%", reading.humidity),
            "Humidity",
        ),
        columns[0],
    );
    frame.render_widget(
        detail(AssetKey::Wind, format_wind(reading.wind_speed), "Wind speed"),
        columns[1],
    );
}

fn temperature_gradient(celsius: i32) -> Fill {
    let (start, end) = match celsius {
        t if t < 0 => (ArtColor::rgb(150, 200, 255), ArtColor::rgb(200, 230, 255)),
        t if t < 15 => (ArtColor::rgb(100, 180, 255), ArtColor::rgb(150, 220, 200)),
        t if t < 25 => (ArtColor::rgb(192, 132, 252), ArtColor::rgb(255, 220, 100)),
        t if t < 35 => (ArtColor::rgb(255, 180, 80), ArtColor::rgb(255, 120, 80)),
        _ => (ArtColor::rgb(255, 100, 80), ArtColor::rgb(255, 60, 60)),
    };
    Fill::Linear(LinearGradient::horizontal(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::IconKind;
    use tui_dispatch::testing::*;

    fn london() -> WeatherReading {
        WeatherReading {
            temperature: 15,
            location: "London".into(),
            humidity: 77,
            wind_speed: 4.1,
            icon: IconKind::Rain,
        }
    }

    #[test]
    fn test_compute_layout_prefers_sprite() {
        let sizing = compute_layout(40);
        assert_eq!(sizing.sprite, Some(SpriteSize::Large));
        assert_eq!(sizing.temp_cap, 6);

        // 6 fixed + 1 plain temp + 5 small sprite
        let sizing = compute_layout(12);
        assert_eq!(sizing.sprite, Some(SpriteSize::Small));
        assert_eq!(sizing.temp_cap, 1);

        assert_eq!(compute_layout(6).sprite, None);
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_temperature(-3), "-3°C");
        assert_eq!(format_wind(4.1), "4.1 m/s");
        assert_eq!(format_wind(4.15), "4.15 m/s");
        assert_eq!(format_wind(12.0), "12 m/s");
    }

    #[test]
    fn test_render_details() {
        let mut render = RenderHarness::new(60, 24);
        let mut card = WeatherCard;
        let reading = london();
        let output = render.render_to_string_plain(|frame| {
            card.render(frame, frame.area(), WeatherCardProps { reading: &reading });
        });

        assert!(output.contains("London"), "{output}");
        assert!(output.contains("77%"), "{output}");
        assert!(output.contains("4.1 m/s"), "{output}");
        assert!(output.contains("Humidity"));
        assert!(output.contains("Wind speed"));
        assert!(output.contains("Rain"));
    }
}
