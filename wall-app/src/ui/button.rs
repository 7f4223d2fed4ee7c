use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Widget};

/// Stateless clickable-action control. The label line is passed through
/// unchanged; a caller style is merged over the base appearance, and the
/// disabled state dims the merged result on top.
#[derive(Clone, Debug)]
pub struct Button<'a> {
    label: Line<'a>,
    style: Style,
    disabled: bool,
}

impl<'a> Button<'a> {
    const BASE_STYLE: Style = Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD);
    const DISABLED_STYLE: Style = Style::new()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::DIM);

    #[must_use]
    pub fn new(label: impl Into<Line<'a>>) -> Self {
        Self {
            label: label.into(),
            style: Style::new(),
            disabled: false,
        }
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = self.style.patch(style);
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    fn resolved_style(&self) -> Style {
        let merged = Self::BASE_STYLE.patch(self.style);
        if self.disabled {
            merged.patch(Self::DISABLED_STYLE)
        } else {
            merged
        }
    }
}

impl Widget for &Button<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec!["[ ".into()];
        spans.extend(self.label.spans.iter().cloned());
        spans.push(" ]".into());

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Right)
            .style(self.resolved_style())
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_style_augments_the_base() {
        let button = Button::new("Share").style(Style::new().fg(Color::Red));
        let style = button.resolved_style();

        assert_eq!(style.fg, Some(Color::Red));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn disabled_dims_on_top_of_the_merge() {
        let button = Button::new("Share")
            .style(Style::new().fg(Color::Red))
            .disabled(true);
        let style = button.resolved_style();

        assert_eq!(style.fg, Some(Color::DarkGray));
        assert!(style.add_modifier.contains(Modifier::DIM));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn same_inputs_render_the_same_cells() {
        let area = Rect::new(0, 0, 12, 1);
        let render = |button: &Button<'_>| {
            let mut buf = Buffer::empty(area);
            button.render(area, &mut buf);
            buf
        };

        let first = render(&Button::new("Share").style(Style::new().fg(Color::Red)));
        let second = render(&Button::new("Share").style(Style::new().fg(Color::Red)));
        assert_eq!(first, second);
    }
}
