//! Condition icons and the static visual assets
//!
//! OpenWeatherMap reports the sky state as a short icon code (`"10d"`,
//! `"13n"`, ...). [`IconKind::from_code`] folds the closed set of codes the
//! widget knows about into five visual categories, with everything else
//! drawn as clear sky.
//!
//! Sprites are loaded from text files at compile time using `include_str!`.
//! Each category has a Small and a Large variant; precipitation sprites
//! composite a gray cloud layer with a colored foreground layer.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Sprite data - embedded at compile time
// File naming: {size}_{color}.txt (e.g., small_yellow.txt, large_gray.txt)
// ============================================================================

mod sprite_data {
    pub mod clear {
        pub const SMALL_YELLOW: &str = include_str!("../sprites/clear/small_yellow.txt");
        pub const LARGE_YELLOW: &str = include_str!("../sprites/clear/large_yellow.txt");
    }
    pub mod cloud {
        pub const SMALL_GRAY: &str = include_str!("../sprites/cloud/small_gray.txt");
        pub const LARGE_GRAY: &str = include_str!("../sprites/cloud/large_gray.txt");
    }
    pub mod drizzle {
        // Cloud layer (background)
        pub const SMALL_GRAY: &str = include_str!("../sprites/drizzle/small_gray.txt");
        pub const LARGE_GRAY: &str = include_str!("../sprites/drizzle/large_gray.txt");
        // Drizzle layer (foreground)
        pub const SMALL_BLUE: &str = include_str!("../sprites/drizzle/small_blue.txt");
        pub const LARGE_BLUE: &str = include_str!("../sprites/drizzle/large_blue.txt");
    }
    pub mod rain {
        pub const SMALL_GRAY: &str = include_str!("../sprites/rain/small_gray.txt");
        pub const LARGE_GRAY: &str = include_str!("../sprites/rain/large_gray.txt");
        pub const SMALL_BLUE: &str = include_str!("../sprites/rain/small_blue.txt");
        pub const LARGE_BLUE: &str = include_str!("../sprites/rain/large_blue.txt");
    }
    pub mod snow {
        pub const SMALL_GRAY: &str = include_str!("../sprites/snow/small_gray.txt");
        pub const LARGE_GRAY: &str = include_str!("../sprites/snow/large_gray.txt");
        pub const SMALL_WHITE: &str = include_str!("../sprites/snow/small_white.txt");
        pub const LARGE_WHITE: &str = include_str!("../sprites/snow/large_white.txt");
    }
}

// ============================================================================
// Layer compositing
// ============================================================================

struct SpriteLayer {
    content: &'static str,
    color: Color,
}

/// Composite multiple layers into Text, treating spaces as transparent
fn composite_layers(layers: &[SpriteLayer]) -> Text<'static> {
    if layers.is_empty() {
        return Text::default();
    }

    let layer_lines: Vec<Vec<Vec<char>>> = layers
        .iter()
        .map(|l| l.content.lines().map(|line| line.chars().collect()).collect())
        .collect();

    let max_lines = layer_lines.iter().map(Vec::len).max().unwrap_or(0);
    let max_width = layer_lines
        .iter()
        .flat_map(|lines| lines.iter())
        .map(Vec::len)
        .max()
        .unwrap_or(0);

    let mut result_lines = Vec::with_capacity(max_lines);

    for line_idx in 0..max_lines {
        let mut spans = Vec::with_capacity(max_width);

        for col_idx in 0..max_width {
            // Last layer is the foreground
            let (ch, color) = layers
                .iter()
                .zip(&layer_lines)
                .rev()
                .find_map(|(layer, lines)| {
                    lines
                        .get(line_idx)
                        .and_then(|line| line.get(col_idx))
                        .filter(|ch| **ch != ' ')
                        .map(|ch| (*ch, layer.color))
                })
                .unwrap_or((' ', Color::Reset));

            spans.push(Span::styled(ch.to_string(), Style::default().fg(color)));
        }

        result_lines.push(Line::from(spans));
    }

    Text::from(result_lines)
}

// ============================================================================
// Types
// ============================================================================

/// Visual category for an upstream condition code
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum IconKind {
    #[default]
    Clear,
    Cloud,
    Drizzle,
    Rain,
    Snow,
}

impl IconKind {
    /// Every code the widget recognizes. Anything outside this set renders as
    /// [`IconKind::Clear`].
    const KNOWN_CODES: [&'static str; 14] = [
        "01d", "01n", "02d", "02n", "03d", "03n", "04d", "04n", "09d", "09n", "10d", "10n",
        "13d", "13n",
    ];

    /// Map an OpenWeatherMap icon code to its category
    pub fn from_code(code: &str) -> Self {
        match code {
            "01d" | "01n" => IconKind::Clear,
            "02d" | "02n" | "03d" | "03n" => IconKind::Cloud,
            "04d" | "04n" => IconKind::Drizzle,
            "09d" | "09n" | "10d" | "10n" => IconKind::Rain,
            "13d" | "13n" => IconKind::Snow,
            _ => IconKind::Clear,
        }
    }

    pub fn asset(self) -> AssetKey {
        match self {
            IconKind::Clear => AssetKey::Clear,
            IconKind::Cloud => AssetKey::Cloud,
            IconKind::Drizzle => AssetKey::Drizzle,
            IconKind::Rain => AssetKey::Rain,
            IconKind::Snow => AssetKey::Snow,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IconKind::Clear => "Clear",
            IconKind::Cloud => "Cloudy",
            IconKind::Drizzle => "Drizzle",
            IconKind::Rain => "Rain",
            IconKind::Snow => "Snow",
        }
    }
}

/// The fixed set of static images the widget draws
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKey {
    Search,
    Clear,
    Cloud,
    Drizzle,
    Rain,
    Snow,
    Humidity,
    Wind,
}

impl AssetKey {
    pub const ALL: [AssetKey; 8] = [
        AssetKey::Search,
        AssetKey::Clear,
        AssetKey::Cloud,
        AssetKey::Drizzle,
        AssetKey::Rain,
        AssetKey::Snow,
        AssetKey::Humidity,
        AssetKey::Wind,
    ];

    /// Single-cell glyph, used inline and when sprites don't fit
    pub fn glyph(self) -> &'static str {
        match self {
            AssetKey::Search => "\u{1f50d}",
            AssetKey::Clear => "\u{2600}\u{fe0f}",
            AssetKey::Cloud => "\u{2601}\u{fe0f}",
            AssetKey::Drizzle => "\u{1f326}\u{fe0f}",
            AssetKey::Rain => "\u{1f327}\u{fe0f}",
            AssetKey::Snow => "\u{2744}\u{fe0f}",
            AssetKey::Humidity => "\u{1f4a7}",
            AssetKey::Wind => "\u{1f32c}\u{fe0f}",
        }
    }
}

/// Sprite size categories
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteSize {
    /// 5 lines
    Small,
    /// 9 lines
    Large,
}

impl SpriteSize {
    /// Pick the largest sprite that fits the available height.
    /// Returns `None` if even Small won't fit.
    pub fn for_height(available: u16) -> Option<Self> {
        match available {
            0..=4 => None,
            5..=8 => Some(SpriteSize::Small),
            _ => Some(SpriteSize::Large),
        }
    }

    pub fn height(self) -> u16 {
        match self {
            SpriteSize::Small => 5,
            SpriteSize::Large => 9,
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

pub fn get_sprite(icon: IconKind, size: SpriteSize) -> Text<'static> {
    let cloud = Color::Rgb(160, 160, 175);
    let small = size == SpriteSize::Small;
    let pick = |small_art: &'static str, large_art: &'static str| {
        if small {
            small_art
        } else {
            large_art
        }
    };

    let layers: Vec<SpriteLayer> = match icon {
        IconKind::Clear => vec![SpriteLayer {
            content: pick(
                sprite_data::clear::SMALL_YELLOW,
                sprite_data::clear::LARGE_YELLOW,
            ),
            color: Color::Yellow,
        }],

        IconKind::Cloud => vec![SpriteLayer {
            content: pick(sprite_data::cloud::SMALL_GRAY, sprite_data::cloud::LARGE_GRAY),
            color: Color::Rgb(190, 190, 205),
        }],

        IconKind::Drizzle => vec![
            SpriteLayer {
                content: pick(
                    sprite_data::drizzle::SMALL_GRAY,
                    sprite_data::drizzle::LARGE_GRAY,
                ),
                color: cloud,
            },
            SpriteLayer {
                content: pick(
                    sprite_data::drizzle::SMALL_BLUE,
                    sprite_data::drizzle::LARGE_BLUE,
                ),
                color: Color::Rgb(130, 170, 200),
            },
        ],

        IconKind::Rain => vec![
            SpriteLayer {
                content: pick(sprite_data::rain::SMALL_GRAY, sprite_data::rain::LARGE_GRAY),
                color: cloud,
            },
            SpriteLayer {
                content: pick(sprite_data::rain::SMALL_BLUE, sprite_data::rain::LARGE_BLUE),
                color: Color::Rgb(80, 140, 200),
            },
        ],

        IconKind::Snow => vec![
            SpriteLayer {
                content: pick(sprite_data::snow::SMALL_GRAY, sprite_data::snow::LARGE_GRAY),
                color: cloud,
            },
            SpriteLayer {
                content: pick(
                    sprite_data::snow::SMALL_WHITE,
                    sprite_data::snow::LARGE_WHITE,
                ),
                color: Color::Rgb(200, 220, 255),
            },
        ],
    };

    composite_layers(&layers)
}
