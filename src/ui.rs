pub mod swatch;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::{
    app::App,
    evaluator::MatchRule,
    session::{Outcome, SessionPhase},
    timer::Clock,
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

impl<C: Clock> Widget for &App<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Min(4),    // swatches
                Constraint::Length(3), // hue / brightness / tolerance
                Constraint::Length(1), // padding
                Constraint::Length(1), // timer or feedback
                Constraint::Length(1), // score
                Constraint::Length(1), // padding
                Constraint::Length(1), // legend
            ])
            .split(area);

        let swatches = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[0]);

        // under the literal rule there is no separate target to show
        let (left_title, left_shade) = match session.match_rule() {
            MatchRule::Target => ("target", session.reference()),
            MatchRule::Literal => ("mirror", session.current()),
        };
        Block::default()
            .borders(Borders::ALL)
            .title(left_title)
            .style(Style::default().bg(swatch::swatch_color(left_shade)))
            .render(swatches[0], buf);
        Block::default()
            .borders(Borders::ALL)
            .title("yours")
            .style(Style::default().bg(swatch::swatch_color(session.current())))
            .render(swatches[1], buf);

        let readouts = Paragraph::new(vec![
            Line::from(format!("Hue         {}", session.hue().round())),
            Line::from(format!(
                "Brightness  {}%",
                (session.brightness() * 100.0).round()
            )),
            Line::from(format!("Tolerance   {}", session.tolerance())),
        ])
        .alignment(Alignment::Center);
        readouts.render(chunks[1], buf);

        let (feedback, legend) = match session.phase() {
            SessionPhase::InProgress => (
                Span::styled(session.seconds_remaining().to_string(), dim_bold_style),
                "drag / ←→↑↓ to mix   (enter) submit   (g) new game   (esc)ape",
            ),
            SessionPhase::Correct => (
                Span::styled("Correct!", green_bold_style),
                "(n)ext   (g) new game   (esc)ape",
            ),
            SessionPhase::Forfeited => {
                let text = match session.last_resolution() {
                    Some(r) if r.outcome == Outcome::Missed => match r.verdict {
                        Some(v) => format!("Missed by {:.1}", v.distance),
                        None => "Missed".to_string(),
                    },
                    _ => "Time's up!".to_string(),
                };
                (
                    Span::styled(text, red_bold_style),
                    "(n)ext   (g) new game   (esc)ape",
                )
            }
            SessionPhase::SessionComplete => (
                Span::styled(
                    format!(
                        "Congratulations, your final score is {}",
                        session.score()
                    ),
                    green_bold_style,
                ),
                "(g) new game   (esc)ape",
            ),
        };

        Paragraph::new(feedback)
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        Paragraph::new(Span::styled(
            format!(
                "Score: {}   Attempts: {}/{}",
                session.score(),
                session.attempts(),
                session.max_attempts()
            ),
            bold_style,
        ))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

        Paragraph::new(Span::styled(legend, italic_style))
            .alignment(Alignment::Center)
            .render(chunks[6], buf);
    }
}
