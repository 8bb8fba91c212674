use ratatui::{
    style::{Color, Style},
    text::Span,
};

pub const DEFAULT_TOTAL_STARS: u8 = 5;

const STAR: char = '★';
const EMPTY_STAR: char = '☆';

/// A fixed-size row of filled/empty stars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarRating {
    pub rating: f64,
    pub total_stars: u8,
}

impl StarRating {
    pub fn new(rating: f64) -> Self {
        Self {
            rating,
            total_stars: DEFAULT_TOTAL_STARS,
        }
    }

    pub fn with_total(mut self, total_stars: u8) -> Self {
        self.total_stars = total_stars;
        self
    }

    /// Number of filled stars: rating rounded half-up, clamped to the row.
    pub fn filled(&self) -> u8 {
        if !self.rating.is_finite() || self.rating <= 0.0 {
            return 0;
        }
        let rounded = (self.rating + 0.5).floor();
        rounded.min(f64::from(self.total_stars)) as u8
    }

    /// Plain-text rendering, e.g. `★★★☆☆`.
    pub fn glyphs(&self) -> String {
        let filled = self.filled() as usize;
        let empty = (self.total_stars as usize).saturating_sub(filled);
        std::iter::repeat_n(STAR, filled)
            .chain(std::iter::repeat_n(EMPTY_STAR, empty))
            .collect()
    }

    pub fn to_spans(&self) -> Vec<Span<'static>> {
        let filled = self.filled() as usize;
        let empty = (self.total_stars as usize).saturating_sub(filled);
        vec![
            Span::styled(
                STAR.to_string().repeat(filled),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                EMPTY_STAR.to_string().repeat(empty),
                Style::default().fg(Color::DarkGray),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_down_below_half() {
        assert_eq!(StarRating::new(3.2).filled(), 3);
    }

    #[test]
    fn test_rounds_half_up() {
        assert_eq!(StarRating::new(3.5).filled(), 4);
        assert_eq!(StarRating::new(0.5).filled(), 1);
    }

    #[test]
    fn test_zero_is_empty_row() {
        let stars = StarRating::new(0.0);
        assert_eq!(stars.filled(), 0);
        assert_eq!(stars.glyphs(), "☆☆☆☆☆");
    }

    #[test]
    fn test_custom_total() {
        let stars = StarRating::new(10.0).with_total(10);
        assert_eq!(stars.filled(), 10);
        assert_eq!(stars.glyphs().chars().count(), 10);
    }

    #[test]
    fn test_clamps_out_of_range() {
        assert_eq!(StarRating::new(9.0).filled(), 5);
        assert_eq!(StarRating::new(-1.0).filled(), 0);
        assert_eq!(StarRating::new(f64::NAN).filled(), 0);
    }

    #[test]
    fn test_spans_split_filled_and_empty() {
        let spans = StarRating::new(3.0).to_spans();
        assert_eq!(spans[0].content, "★★★");
        assert_eq!(spans[1].content, "☆☆");
    }

    #[test]
    fn test_spans_match_plain_glyphs() {
        for rating in [0.0, 1.4, 2.5, 4.9, 7.0] {
            let stars = StarRating::new(rating);
            let joined: String = stars.to_spans().iter().map(|s| s.content.as_ref()).collect();
            assert_eq!(joined, stars.glyphs());
        }
    }
}
