use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Widget};

/// Stateless bordered container. Caller options are forwarded to the
/// underlying [`Block`]; caller styles are merged over the base appearance
/// rather than replacing it, so the same inputs always resolve to the same
/// merged output.
#[derive(Clone, Debug, Default)]
pub struct Card<'a> {
    title: Option<Line<'a>>,
    style: Style,
    border_style: Style,
}

impl<'a> Card<'a> {
    const BASE_BORDER_STYLE: Style = Style::new().fg(Color::DarkGray);

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<Line<'a>>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = self.style.patch(style);
        self
    }

    #[must_use]
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = self.border_style.patch(style);
        self
    }

    /// The area left for content once the border is drawn.
    #[must_use]
    pub fn inner(&self, area: Rect) -> Rect {
        self.block().inner(area)
    }

    fn block(&self) -> Block<'a> {
        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Self::BASE_BORDER_STYLE.patch(self.border_style))
            .style(self.style);

        if let Some(title) = &self.title {
            block = block.title(title.clone());
        }

        block
    }
}

impl Widget for &Card<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block().render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Modifier;

    fn rendered(card: &Card<'_>) -> Buffer {
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);
        card.render(area, &mut buf);
        buf
    }

    #[test]
    fn caller_style_augments_the_base() {
        let card = Card::new()
            .style(Style::new().fg(Color::Red))
            .border_style(Style::new().add_modifier(Modifier::BOLD));
        let buf = rendered(&card);

        // Content cells carry the caller style.
        let content = buf.cell((1, 1)).unwrap();
        assert_eq!(content.style().fg, Some(Color::Red));
        // Border cells keep the base color and gain the caller modifier.
        let corner = buf.cell((0, 0)).unwrap();
        assert_eq!(corner.style().fg, Some(Color::DarkGray));
        assert!(corner.style().add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn style_merge_is_deterministic() {
        let style = Style::new().fg(Color::Red);
        let first = rendered(&Card::new().style(style));
        let second = rendered(&Card::new().style(style));
        assert_eq!(first, second);
    }
}
