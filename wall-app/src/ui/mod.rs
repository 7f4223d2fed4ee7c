pub mod button;
pub mod card;

use crate::feed::FeedView;
use button::Button;
use card::Card;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Clear, Paragraph, Wrap};
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use wall_common::model::message::Message;

const COMPOSE_HEIGHT: u16 = 7;

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

pub fn draw(frame: &mut Frame, view: &FeedView, prompt: Option<&str>) {
    let chunks = Layout::vertical([
        Constraint::Length(COMPOSE_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(frame.area());

    draw_compose(frame, chunks[0], view);
    draw_feed(frame, chunks[1], view);
    draw_keybar(frame, chunks[2]);

    if let Some(path) = prompt {
        draw_photo_prompt(frame, path);
    }

    // The alert is blocking: it covers everything until dismissed.
    if let Some(alert) = view.alert() {
        draw_alert(frame, alert);
    }
}

fn draw_compose(frame: &mut Frame, area: Rect, view: &FeedView) {
    let card = Card::new().title("What's on your mind?");
    frame.render_widget(&card, area);

    let inner = card.inner(area);
    let rows = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(inner);

    frame.render_widget(
        Paragraph::new(view.draft()).wrap(Wrap { trim: false }),
        rows[0],
    );

    let photo_line = match view.photo() {
        Some(photo) => Line::from(vec![
            Span::styled(
                format!("Photo: {} ({} bytes)", photo.file_name, photo.bytes.len()),
                Style::new().fg(Color::Cyan),
            ),
            Span::styled("  Ctrl-P to replace", Style::new().fg(Color::DarkGray)),
        ]),
        None => Line::styled(
            "No photo. Ctrl-P to attach one.",
            Style::new().fg(Color::DarkGray),
        ),
    };
    frame.render_widget(Paragraph::new(photo_line), rows[1]);

    let status = Layout::horizontal([Constraint::Min(0), Constraint::Length(11)]).split(rows[2]);
    frame.render_widget(
        Paragraph::new(format!("{} characters remaining", view.chars_remaining()))
            .style(Style::new().fg(Color::DarkGray)),
        status[0],
    );
    frame.render_widget(&Button::new("Share").disabled(!view.can_share()), status[1]);
}

fn draw_feed(frame: &mut Frame, area: Rect, view: &FeedView) {
    if view.loading() {
        frame.render_widget(
            Paragraph::new("Loading...")
                .centered()
                .style(Style::new().fg(Color::DarkGray)),
            area,
        );
        return;
    }

    let mut y = area.y;
    for message in view.messages().iter().skip(view.scroll()) {
        if y >= area.bottom() {
            break;
        }

        let lines = message_lines(message, area.width.saturating_sub(2).max(1) as usize);
        let height = (lines.len() as u16 + 2).min(area.bottom() - y);
        let card_area = Rect::new(area.x, y, area.width, height);

        let card = Card::new();
        frame.render_widget(&card, card_area);
        frame.render_widget(Paragraph::new(Text::from(lines)), card.inner(card_area));

        y += height;
    }
}

fn message_lines(message: &Message, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled(
        message.author.clone(),
        Style::new().add_modifier(Modifier::BOLD),
    )];
    lines.extend(wrap(message.body.get(), width).into_iter().map(Line::from));
    if let Some(url) = &message.photo_url {
        lines.push(Line::styled(url.clone(), Style::new().fg(Color::Cyan)));
    }
    lines.push(Line::styled(
        format_timestamp(message.created_at),
        Style::new().fg(Color::DarkGray),
    ));
    lines
}

fn draw_keybar(frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new("Enter share   Ctrl-P photo   Up/Down scroll   Esc quit")
            .style(Style::new().fg(Color::DarkGray)),
        area,
    );
}

fn draw_photo_prompt(frame: &mut Frame, path: &str) {
    let area = overlay(frame.area(), 60, 5);
    frame.render_widget(Clear, area);

    let card = Card::new().title("Attach photo");
    frame.render_widget(&card, area);

    let inner = card.inner(area);
    let text = Text::from(vec![
        Line::from(format!("{path}_")),
        Line::styled(
            "Enter to stage, Esc to cancel",
            Style::new().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(text), inner);
}

fn draw_alert(frame: &mut Frame, alert: &str) {
    let area = overlay(frame.area(), 60, 7);
    frame.render_widget(Clear, area);

    let card = Card::new()
        .title("Error")
        .border_style(Style::new().fg(Color::Red));
    frame.render_widget(&card, area);

    let inner = card.inner(area);
    let rows =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
    frame.render_widget(
        Paragraph::new(alert.to_owned()).wrap(Wrap { trim: false }),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new("Press any key to dismiss").style(Style::new().fg(Color::DarkGray)),
        rows[1],
    );
}

fn overlay(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn format_timestamp(at: OffsetDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).unwrap_or_default()
}

/// Greedy word wrap; words longer than the width are hard-split. Only used
/// to size feed cards exactly, so partial cards never truncate mid-card.
fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for raw_line in text.lines() {
        let mut current = String::new();
        let mut current_len = 0usize;

        for mut word in raw_line.split_whitespace() {
            loop {
                if word.chars().count() <= width {
                    break;
                }
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let split_at = word
                    .char_indices()
                    .nth(width)
                    .map_or(word.len(), |(index, _)| index);
                lines.push(word[..split_at].to_owned());
                word = &word[split_at..];
            }

            let word_len = word.chars().count();
            if current_len == 0 {
                current.push_str(word);
                current_len = word_len;
            } else if current_len + 1 + word_len <= width {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_len = word_len;
            }
        }

        if !current.is_empty() || raw_line.is_empty() {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
