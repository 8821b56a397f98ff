use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::domain::{AppState, HomeOverlay, Screen, Topic};

use super::elements::{ElementId, ElementMap};
use super::session::UiSession;

pub const HOME_TITLE: &str = "Home Page";
pub const SUBTITLE: &str = "The latest stories from across the UK and around the world.";
pub const BREAKING_NEWS_LABEL: &str = "Breaking News";
pub const REFRESH_LABEL: &str = "[⟳ Refresh]";
pub const ERROR_MESSAGE: &str = "Sorry, something went wrong.";
pub const TV_LICENCE_MESSAGE: &str = "Do you have a valid TV licence?";
pub const LOADING_MESSAGE: &str = "Loading, please wait...";
pub const END_OF_PAGE: &str = "This is the end of the placeholder text.";

const CONFIRM_LABEL: &str = "[ Confirm ]";
const YES_LABEL: &str = "[ Yes ]";
const NO_LABEL: &str = "[ No ]";
const BACK_LABEL: &str = "[←]";
const SPINNER: &str = "◐";

/// Draws the current state and records every element into the session.
pub fn render_ui(f: &mut Frame, state: &AppState, session: &mut UiSession) {
    session.elements.clear();

    match state.screen {
        Screen::Home(overlay) => {
            render_home(f, state, &mut session.elements);
            match overlay {
                HomeOverlay::None => {
                    if session.picker.expanded {
                        render_picker_dropdown(f, session);
                    }
                }
                HomeOverlay::ErrorDialog => render_error_dialog(f, &mut session.elements),
                HomeOverlay::Loading => render_loading_dialog(f, &mut session.elements),
                HomeOverlay::TvLicenseConfirm => {
                    render_tv_licence_dialog(f, &mut session.elements)
                }
            }
        }
        Screen::Content(topic) => render_content(f, topic, &mut session.elements),
    }
}

/// Formats the home page timestamp, e.g. `Last updated: 05 Mar 2025 at 02:07:09`.
pub fn last_updated_text(at: &DateTime<Local>) -> String {
    format!(
        "Last updated: {} at {}",
        at.format("%d %b %Y"),
        at.format("%I:%M:%S")
    )
}

pub fn content_title(topic: Topic) -> String {
    format!("{topic} Content Page")
}

pub fn placeholder_text(topic: Topic) -> String {
    format!("This is the placeholder content for {topic}.")
}

/// Reads the text drawn inside `area`, one line per row, trimmed.
pub fn read_text(buffer: &Buffer, area: Rect) -> String {
    let area = area.intersection(buffer.area);
    let lines: Vec<String> = (area.top()..area.bottom())
        .map(|y| {
            let line: String = (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect();
            line.trim_end().to_string()
        })
        .collect();
    lines.join("\n").trim().to_string()
}

fn text_width(text: &str) -> u16 {
    text.chars().count() as u16
}

/// A one-line area at the left of `area` just wide enough for `text`.
fn left_line(area: Rect, text: &str) -> Rect {
    Rect::new(area.x, area.y, text_width(text).min(area.width), area.height.min(1))
}

/// A one-line area at the right of `area` just wide enough for `text`.
fn right_line(area: Rect, text: &str) -> Rect {
    let width = text_width(text).min(area.width);
    Rect::new(area.right() - width, area.y, width, area.height.min(1))
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// The first row of `area`, or an empty area when it has no rows.
fn top_row(area: Rect) -> Rect {
    Rect::new(area.x, area.y, area.width, area.height.min(1))
}

/// The last row of `area`, or an empty area when it has no rows.
fn bottom_row(area: Rect) -> Rect {
    let height = area.height.min(1);
    Rect::new(area.x, area.bottom() - height, area.width, height)
}

fn centered_line(area: Rect, text: &str) -> Rect {
    centered_rect(text_width(text), 1, area)
}

fn render_home(f: &mut Frame, state: &AppState, elements: &mut ElementMap) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(f.area());

    let logo_area = centered_rect(11, 3, chunks[0]);
    let logo = Paragraph::new("B B C")
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(logo, logo_area);
    elements.record(ElementId::Logo, logo_area);

    let title_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(text_width(REFRESH_LABEL)),
            Constraint::Length(2),
        ])
        .split(chunks[1]);
    let title_area = left_line(title_row[1], HOME_TITLE);
    f.render_widget(
        Paragraph::new(HOME_TITLE).style(Style::default().add_modifier(Modifier::BOLD)),
        title_area,
    );
    elements.record(ElementId::HomeTitle, title_area);
    f.render_widget(
        Paragraph::new(REFRESH_LABEL).style(Style::default().fg(Color::Blue)),
        title_row[2],
    );
    elements.record(ElementId::RefreshButton, title_row[2]);

    let image_area = centered_rect(40, 5, chunks[3]);
    let image = Paragraph::new(Text::from(vec![Line::from("▒".repeat(30)); 3]))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title("Broadcasting House"));
    f.render_widget(image, image_area);
    elements.record(ElementId::MainImage, image_area);

    let updated = last_updated_text(&state.last_updated);
    let updated_area = centered_line(chunks[4], &updated);
    f.render_widget(Paragraph::new(updated.as_str()), updated_area);
    elements.record(ElementId::LastUpdated, updated_area);

    let subtitle_area = chunks[5].inner(Margin::new(4, 0));
    f.render_widget(
        Paragraph::new(SUBTITLE)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        subtitle_area,
    );
    elements.record(ElementId::Subtitle, subtitle_area);

    let picker_label = format!("{} ▾", state.selected_topic);
    let go_to_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(12),
            Constraint::Length(2),
        ])
        .split(chunks[7]);
    let go_to = state.go_to_label();
    let go_to_area = left_line(go_to_row[1], &go_to);
    f.render_widget(
        Paragraph::new(go_to.as_str()).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
        ),
        go_to_area,
    );
    elements.record(ElementId::GoToButton, go_to_area);
    let picker_area = right_line(go_to_row[2], &picker_label);
    f.render_widget(Paragraph::new(picker_label.as_str()), picker_area);
    elements.record(ElementId::CurrentTopic, picker_area);

    let button_area = centered_rect(text_width(BREAKING_NEWS_LABEL) + 4, 3, chunks[9]);
    let button = Paragraph::new(BREAKING_NEWS_LABEL)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(button, button_area);
    elements.record(ElementId::BreakingNewsButton, button_area);
}

fn render_picker_dropdown(f: &mut Frame, session: &mut UiSession) {
    let Some(anchor) = session.elements.get(ElementId::CurrentTopic) else {
        return;
    };
    let frame = f.area();
    let width = 14_u16.min(frame.width);
    let height = (Topic::ALL.len() as u16 + 2).min(frame.bottom().saturating_sub(anchor.y + 1));
    let x = anchor.x.min(frame.right().saturating_sub(width));
    let area = Rect::new(x, anchor.y + 1, width, height);

    session.elements.begin_modal();
    f.render_widget(Clear, area);
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);
    session.elements.record(ElementId::DropdownMenu, area);

    for (row, topic) in Topic::ALL.into_iter().enumerate().take(inner.height as usize) {
        let row_area = Rect::new(inner.x, inner.y + row as u16, inner.width, 1);
        let style = if row == session.picker.highlighted {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        f.render_widget(Paragraph::new(topic.label()).style(style), row_area);
        session.elements.record(ElementId::PickerItem(topic), row_area);
    }
}

/// Clears and frames a centered dialog, returning its inner area.
fn open_dialog(
    f: &mut Frame,
    elements: &mut ElementMap,
    width: u16,
    height: u16,
    title: &str,
    color: Color,
) -> Rect {
    let area = centered_rect(width, height, f.area());
    elements.begin_modal();
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    f.render_widget(block, area);
    inner
}

fn render_error_dialog(f: &mut Frame, elements: &mut ElementMap) {
    let inner = open_dialog(f, elements, 44, 7, "Error", Color::Red);

    let message_area = centered_line(top_row(inner), ERROR_MESSAGE);
    f.render_widget(Paragraph::new(ERROR_MESSAGE), message_area);
    elements.record(ElementId::ErrorDialog, message_area);

    let button_row = bottom_row(inner);
    let button_area = centered_line(button_row, CONFIRM_LABEL);
    f.render_widget(
        Paragraph::new(CONFIRM_LABEL).style(Style::default().add_modifier(Modifier::BOLD)),
        button_area,
    );
    elements.record(ElementId::ErrorConfirmButton, button_area);
}

fn render_tv_licence_dialog(f: &mut Frame, elements: &mut ElementMap) {
    let inner = open_dialog(f, elements, 44, 7, "TV Licence", Color::Yellow);

    let message_area = centered_line(top_row(inner), TV_LICENCE_MESSAGE);
    f.render_widget(Paragraph::new(TV_LICENCE_MESSAGE), message_area);
    elements.record(ElementId::TvLicenseDialog, message_area);

    let button_row = bottom_row(inner);
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(button_row);
    let yes_area = centered_line(halves[0], YES_LABEL);
    let no_area = centered_line(halves[1], NO_LABEL);
    let button_style = Style::default().add_modifier(Modifier::BOLD);
    f.render_widget(Paragraph::new(YES_LABEL).style(button_style), yes_area);
    f.render_widget(Paragraph::new(NO_LABEL).style(button_style), no_area);
    elements.record(ElementId::TvLicenseYesButton, yes_area);
    elements.record(ElementId::TvLicenseNoButton, no_area);
}

fn render_loading_dialog(f: &mut Frame, elements: &mut ElementMap) {
    let inner = open_dialog(f, elements, 32, 5, "", Color::Blue);

    let spinner_area = centered_line(top_row(inner), SPINNER);
    f.render_widget(
        Paragraph::new(SPINNER).style(Style::default().fg(Color::Blue)),
        spinner_area,
    );
    elements.record(ElementId::LoadingSpinner, spinner_area);

    let message_row = bottom_row(inner);
    f.render_widget(Paragraph::new(LOADING_MESSAGE), centered_line(message_row, LOADING_MESSAGE));
}

fn render_content(f: &mut Frame, topic: Topic, elements: &mut ElementMap) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(f.area());

    let bar = Block::default().borders(Borders::ALL);
    let bar_inner = bar.inner(chunks[0]);
    f.render_widget(bar, chunks[0]);
    let bar_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(text_width(BACK_LABEL)),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(bar_inner);
    f.render_widget(Paragraph::new(BACK_LABEL), bar_row[0]);
    elements.record(ElementId::BackButton, bar_row[0]);

    let title = content_title(topic);
    let title_area = left_line(bar_row[2], &title);
    f.render_widget(
        Paragraph::new(title.as_str()).style(Style::default().add_modifier(Modifier::BOLD)),
        title_area,
    );
    elements.record(ElementId::ContentTitle, title_area);

    f.render_widget(
        Paragraph::new(topic.label()).alignment(Alignment::Center),
        chunks[2],
    );
    f.render_widget(
        Paragraph::new(placeholder_text(topic))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[4],
    );

    let end_area = centered_line(chunks[6], END_OF_PAGE);
    f.render_widget(Paragraph::new(END_OF_PAGE), end_area);
    elements.record(ElementId::ContentEndText, end_area);
}
