use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Wrap},
};
use weatherview_core::{
    ViewState, WeatherImage, WeatherSnapshot, WeatherView,
    display::{detail_cards, format_celsius},
};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(Color::Yellow),
        ))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(Color::Cyan))
        .border_type(BorderType::Rounded)
}

pub fn draw(f: &mut Frame, view: &WeatherView, spinner: usize) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(f.area());

    f.render_widget(search_box(view), layout[0]);

    match view.state() {
        ViewState::Loading => f.render_widget(loading(spinner), layout[1]),
        ViewState::Failed(message) => f.render_widget(failure(message), layout[1]),
        ViewState::Ready(snapshot) => draw_snapshot(f, layout[1], snapshot, view.clock()),
        ViewState::Idle => f.render_widget(idle(), layout[1]),
    }
}

fn search_box(view: &WeatherView) -> Paragraph<'_> {
    let text = if view.input().is_empty() {
        Span::styled(view.placeholder(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(view.input())
    };

    Paragraph::new(Line::from(vec![Span::raw(" "), text, Span::raw("▏")])).block(
        panel("Search").title_bottom(Line::from(" Enter: search · Esc: quit ").right_aligned()),
    )
}

fn loading(spinner: usize) -> Paragraph<'static> {
    let frame = SPINNER[spinner % SPINNER.len()];
    Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{frame} Searching the skies..."),
            Style::default().fg(Color::Cyan),
        )),
    ])
    .alignment(Alignment::Center)
    .block(panel("Weather"))
}

fn failure(message: &str) -> Paragraph<'_> {
    Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Error: {message}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from("Please search another City"),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(panel("Weather"))
}

fn idle() -> Paragraph<'static> {
    Paragraph::new(vec![Line::from(""), Line::from("Type a city and press Enter")])
        .alignment(Alignment::Center)
        .block(panel("Weather"))
}

fn draw_snapshot(f: &mut Frame, area: Rect, snapshot: &WeatherSnapshot, clock: &str) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(0)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[0]);

    let headline = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", snapshot.name),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(" {clock}")),
        Line::from(""),
        Line::from(format!(
            " {}",
            snapshot
                .weather
                .first()
                .map(|w| w.description.as_str())
                .unwrap_or_default()
        )),
    ])
    .block(panel("Now"));
    f.render_widget(headline, top[0]);

    let image = WeatherImage::select(snapshot);
    let mut today: Vec<Line> = image
        .glyph()
        .iter()
        .map(|row| Line::from(Span::styled(*row, Style::default().fg(Color::Yellow))))
        .collect();
    today.push(Line::from(Span::styled(
        format_celsius(snapshot.main.temp),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    f.render_widget(
        Paragraph::new(today)
            .alignment(Alignment::Center)
            .block(panel("Today")),
        top[1],
    );

    let cards: Vec<Row> = detail_cards(snapshot)
        .into_iter()
        .map(|card| {
            Row::new(vec![
                Cell::from(format!(" {}", card.title)),
                Cell::from(card.value).style(Style::default().fg(Color::Green)),
            ])
        })
        .collect();
    let table = Table::new(cards, [Constraint::Length(16), Constraint::Min(10)])
        .block(panel("Details"));
    f.render_widget(table, rows[1]);
}
