use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Flex, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, SearchBar, SearchBarProps, WeatherCard, WeatherCardProps};
use crate::action::Action;
use crate::state::{AppState, WeatherReading};

const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

/// Props for WeatherDisplay - read-only view of state
pub struct WeatherDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The whole widget: search bar, body and help bar
#[derive(Default)]
pub struct WeatherDisplay {
    search: SearchBar,
}

impl WeatherDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for WeatherDisplay {
    type Props<'a> = WeatherDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        if let EventKind::Key(key) = event {
            match key.code {
                KeyCode::Esc => return vec![Action::Quit],
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return vec![Action::Quit];
                }
                KeyCode::F(5) => return vec![Action::WeatherRefresh],
                _ => {}
            }
        }

        self.search
            .handle_event(event, search_props(props.state, true))
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherDisplayProps<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // Search bar
            Constraint::Min(1),    // Body
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        self.search
            .render(frame, chunks[0], search_props(props.state, props.is_focused));

        match WeatherView::from_state(props.state) {
            WeatherView::Ready(reading) => {
                let mut card = WeatherCard;
                card.render(frame, chunks[1], WeatherCardProps { reading });
            }
            WeatherView::Error(message) => render_error(frame, chunks[1], message),
            WeatherView::Loading => render_loading(frame, chunks[1], props.state),
            WeatherView::Empty => render_hint(frame, chunks[1]),
        }

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[2],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("enter", "search"),
                    StatusBarHint::new("F5", "refresh"),
                    StatusBarHint::new("esc", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn search_props(state: &AppState, is_focused: bool) -> SearchBarProps<'_> {
    SearchBarProps {
        query: &state.query,
        is_focused,
        on_change: Action::SearchQueryChange,
        on_submit: Action::WeatherSearch,
    }
}

fn centered_rows(area: Rect, rows: u16) -> std::rc::Rc<[Rect]> {
    Layout::vertical(vec![Constraint::Length(1); rows as usize])
        .flex(Flex::Center)
        .split(area)
}

fn render_hint(frame: &mut Frame, area: Rect) {
    let rows = centered_rows(area, 1);
    let hint = Line::from(vec![
        Span::styled("Type a city and press ", Style::default().fg(Color::DarkGray)),
        Span::styled("Enter", Style::default().fg(Color::Cyan).bold()),
    ])
    .centered();
    frame.render_widget(Paragraph::new(hint), rows[0]);
}

fn render_loading(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = centered_rows(area, 1);
    let line = Line::from(vec![
        Span::styled(state.spinner_frame(), Style::default().fg(Color::Magenta)),
        Span::styled(" Loading weather...", Style::default().fg(Color::DarkGray)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(line), rows[0]);
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let rows = centered_rows(area, 5);

    frame.render_widget(Paragraph::new(Line::from(ERROR_ICON).centered()), rows[0]);
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                "Error",
                Style::default().fg(Color::Red).bold(),
            )])
            .centered(),
        ),
        rows[1],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                message.to_string(),
                Style::default().fg(Color::Rgb(200, 100, 100)),
            )])
            .centered(),
        ),
        rows[2],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                Span::styled("Enter", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" to search again", Style::default().fg(Color::DarkGray)),
            ])
            .centered(),
        ),
        rows[4],
    );
}

enum WeatherView<'a> {
    Error(&'a str),
    Ready(&'a WeatherReading),
    Loading,
    Empty,
}

impl<'a> WeatherView<'a> {
    fn from_state(state: &'a AppState) -> Self {
        match &state.weather {
            DataResource::Failed(error) => WeatherView::Error(error),
            DataResource::Loaded(reading) => WeatherView::Ready(reading),
            DataResource::Loading => WeatherView::Loading,
            DataResource::Empty => WeatherView::Empty,
        }
    }
}
