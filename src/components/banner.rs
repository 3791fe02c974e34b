use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Widget};

pub const FRAME_COUNT: usize = 4;

const TITLE: [&str; 4] = [
    " ___ ___ _____ ___ _  _ ___ ___ ___  ___ ",
    "| _ \\_ _|_   _/ __| || / __|_ _|   \\| __|",
    "|  _/| |  | || (__| __ \\__ \\| || |) | _| ",
    "|_| |___| |_| \\___|_||_|___/___|___/|___|",
];

const BALL_FRAMES: [&str; FRAME_COUNT] = ["(o)", "(O)", "(0)", "(O)"];

fn primary() -> Style {
    Style::default().fg(Color::Green)
}

fn accent() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().fg(Color::Indexed(240))
}

/// Title banner for the home screen: the logo plus a ball rolling along the touchline.
pub struct PitchBanner<'a> {
    pub frame: usize,
    pub tick: u64,
    pub subtitle: &'a str,
}

impl Widget for PitchBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 3 {
            render_line(Line::from(" PITCHSIDE "), area.x, area.y, area.width, buf);
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(primary());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let title_fits = inner.width as usize > TITLE[0].len() && inner.height >= 6;
        let mut y = inner.y;
        if title_fits {
            for row in TITLE {
                render_centered(Line::from(Span::styled(row, primary())), inner, y, buf);
                y += 1;
            }
        } else {
            render_centered(Line::from(Span::styled("PITCHSIDE", accent())), inner, y, buf);
            y += 1;
        }

        render_centered(Line::from(Span::styled(self.subtitle, accent())), inner, y, buf);
        y += 1;

        if y < inner.y + inner.height {
            render_line(touchline(self.frame, self.tick, inner.width), inner.x, y, inner.width, buf);
        }
    }
}

/// Position of the ball on a touchline `width` cells wide, bouncing between the ends.
pub fn ball_offset(tick: u64, width: u16) -> u16 {
    let travel = u64::from(width.saturating_sub(3));
    if travel == 0 {
        return 0;
    }
    let t = tick % (2 * travel);
    travel.abs_diff(t) as u16
}

fn touchline(frame: usize, tick: u64, width: u16) -> Line<'static> {
    let offset = ball_offset(tick, width) as usize;
    let rest = (width as usize).saturating_sub(offset + 3);
    Line::from(vec![
        Span::styled("-".repeat(offset), dim()),
        Span::styled(BALL_FRAMES[frame % FRAME_COUNT], Style::default().fg(Color::White)),
        Span::styled("-".repeat(rest), dim()),
    ])
}

fn render_centered(line: Line, area: Rect, y: u16, buf: &mut Buffer) {
    if y >= area.y + area.height {
        return;
    }
    let w = line.width() as u16;
    let x = area.x + area.width.saturating_sub(w) / 2;
    render_line(line, x, y, area.width, buf);
}

fn render_line(line: Line, x: u16, y: u16, max_width: u16, buf: &mut Buffer) {
    let mut cx = x;
    let limit = x.saturating_add(max_width);
    for span in &line.spans {
        let mut run = String::new();
        for ch in span.content.chars() {
            if cx >= limit {
                break;
            }
            run.push(ch);
            cx += 1;
        }
        let start = cx.saturating_sub(run.chars().count() as u16);
        if !run.is_empty() {
            buf.set_string(start, y, run, span.style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_bounces_between_ends() {
        assert_eq!(ball_offset(0, 13), 10);
        assert_eq!(ball_offset(10, 13), 0);
        assert_eq!(ball_offset(20, 13), 10);
        assert_eq!(ball_offset(5, 3), 0);
    }

    #[test]
    fn test_renders_compact_title_in_small_area() {
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        PitchBanner { frame: 0, tick: 0, subtitle: "Premier League" }.render(area, &mut buf);
        let row: String = (0..30).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.contains("PITCHSIDE"));
    }
}
