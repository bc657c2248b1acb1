use crossterm::event::{KeyCode, MouseButton, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, BorderType, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use crate::action::Action;
use crate::icons::AssetKey;

const PLACEHOLDER: &str = "Search for a city...";

/// Always-visible city input with a clickable search glyph
pub struct SearchBar {
    input: TextInput,
    icon_area: Rect,
}

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    pub is_focused: bool,
    // Action constructors
    pub on_change: fn(String) -> Action,
    pub on_submit: fn(String) -> Action,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            icon_area: Rect::default(),
        }
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen area of the search glyph from the last render
    pub fn icon_area(&self) -> Rect {
        self.icon_area
    }
}

fn input_style() -> TextInputStyle {
    TextInputStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::new(0, 0, 0, 1),
            bg: None,
            fg: None,
        },
        placeholder_style: None,
        cursor_style: None,
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        match event {
            EventKind::Key(key) if key.code == KeyCode::Enter => {
                vec![(props.on_submit)(props.query.to_string())]
            }
            EventKind::Key(_) => {
                let input_props = TextInputProps {
                    value: props.query,
                    placeholder: PLACEHOLDER,
                    is_focused: true,
                    style: input_style(),
                    on_change: props.on_change,
                    on_submit: props.on_submit,
                    on_cursor_move: Some(|_| Action::Render),
                };
                self.input
                    .handle_event(event, input_props)
                    .into_iter()
                    .collect()
            }
            EventKind::Mouse(mouse) => {
                let clicked = mouse.kind == MouseEventKind::Down(MouseButton::Left)
                    && self
                        .icon_area
                        .contains(Position::new(mouse.column, mouse.row));
                if clicked {
                    vec![(props.on_submit)(props.query.to_string())]
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let border_color = if props.is_focused {
            Color::Rgb(126, 34, 206)
        } else {
            Color::DarkGray
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::horizontal([
            Constraint::Min(1),    // Input
            Constraint::Length(4), // Search glyph
        ])
        .split(inner);

        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: props.is_focused,
            style: input_style(),
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, chunks[0], input_props);

        self.icon_area = chunks[1];
        frame.render_widget(
            Paragraph::new(Line::from(AssetKey::Search.glyph()).centered()),
            chunks[1],
        );
    }
}
