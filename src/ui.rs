//! UI layout and rendering.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Clear, Paragraph, Row, Table, TableState,
};
use ratatui::Frame;

use crate::app::App;
use crate::collector::ProcessRecord;
use crate::state::SortKey;
use crate::theme;

/// Column labels paired with the sort key they display, if any.
const COLUMNS: [(&str, Option<SortKey>); 5] = [
    ("PID", Some(SortKey::Pid)),
    ("S", None),
    ("RSS(KiB)", Some(SortKey::Mem)),
    ("NAME", Some(SortKey::Name)),
    ("COMMAND", None),
];

const MIN_FRAME_WIDTH: u16 = 40;
const MIN_FRAME_HEIGHT: u16 = 10;
const FALLBACK_MARGIN: u16 = 2;
const POPUP_HEIGHT: u16 = 10;
const POPUP_MARGIN: u16 = 2;

/// Centered content frame: ~90% of the screen, falling back to screen minus
/// a fixed margin when 90% would be below the minimum usable size.
pub fn content_frame(area: Rect) -> Rect {
    let mut width = (u32::from(area.width) * 9 / 10) as u16;
    let mut height = (u32::from(area.height) * 9 / 10) as u16;
    if width < MIN_FRAME_WIDTH {
        width = area.width.saturating_sub(FALLBACK_MARGIN * 2);
    }
    if height < MIN_FRAME_HEIGHT {
        height = area.height.saturating_sub(FALLBACK_MARGIN * 2);
    }
    width = width.min(area.width);
    height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Data rows the frame geometry for `area` can display. Never zero, so the
/// scroll-window invariant stays meaningful on tiny terminals.
pub fn visible_rows(area: Rect) -> usize {
    let frame = content_frame(area);
    let inner = frame.height.saturating_sub(2); // borders
    usize::from(inner.saturating_sub(2).max(1)) // header + footer
}

/// Main draw function
pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let frame = content_frame(area);

    let title = format!(
        " Processes ({}) │ Sort: {} ▼ ",
        app.snapshot.len(),
        app.sort_key.name()
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::FRAME));
    let inner = block.inner(frame);
    f.render_widget(block, frame);

    if inner.height < 2 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    draw_table(f, app, chunks[0]);
    draw_footer(f, chunks[1]);

    if let Some(record) = &app.detail {
        draw_detail(f, record, area);
    }
}

fn draw_table(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(COLUMNS.iter().map(|&(label, key)| {
        if key == Some(app.sort_key) {
            Span::styled(
                format!("{label}▼"),
                Style::default()
                    .fg(theme::HEADER)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
        } else {
            Span::styled(
                label,
                Style::default().fg(theme::HEADER).add_modifier(Modifier::BOLD),
            )
        }
    }))
    .height(1);

    let rows: Vec<Row> = app
        .snapshot
        .iter()
        .map(|p| {
            Row::new(vec![
                Span::styled(format!("{:>6}", p.pid), Style::default().fg(theme::PID)),
                Span::styled(
                    p.state.to_string(),
                    Style::default().fg(theme::state_color(p.state)),
                ),
                Span::styled(format!("{:>8}", p.rss_kib), Style::default().fg(theme::MEM)),
                Span::raw(p.name.clone()),
                Span::styled(
                    if p.cmdline.is_empty() {
                        "-".to_string()
                    } else {
                        p.cmdline.clone()
                    },
                    Style::default().fg(theme::COMMAND),
                ),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(8),  // PID
        Constraint::Length(2),  // S
        Constraint::Length(9),  // RSS(KiB)
        Constraint::Length(16), // NAME
        Constraint::Fill(1),    // COMMAND (fills remaining)
    ];

    let mut table_state = TableState::default()
        .with_offset(app.scroll)
        .with_selected(if app.snapshot.is_empty() {
            None
        } else {
            Some(app.selected)
        });

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(
            Style::default()
                .bg(theme::SELECTION_BG)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    f.render_stateful_widget(table, area, &mut table_state);
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let hint = Paragraph::new("↑/↓ move │ PgUp/PgDn page │ s sort │ Enter details │ q quit")
        .style(Style::default().add_modifier(Modifier::DIM));
    f.render_widget(hint, area);
}

/// Modal popup with one process's full record. The record is a point-in-time
/// copy; it is not re-queried while the popup is open.
fn draw_detail(f: &mut Frame, record: &ProcessRecord, area: Rect) {
    let width = area.width.saturating_sub(POPUP_MARGIN * 2);
    let height = POPUP_HEIGHT.min(area.height.saturating_sub(2));
    if width < 2 || height < 2 {
        return;
    }
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    f.render_widget(Clear, popup);

    let label = Style::default().fg(theme::LABEL).add_modifier(Modifier::BOLD);
    let cmdline = if record.cmdline.is_empty() {
        "-"
    } else {
        record.cmdline.as_str()
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  PID:     ", label),
            Span::raw(record.pid.to_string()),
        ]),
        Line::from(vec![
            Span::styled("  State:   ", label),
            Span::raw(record.state.to_string()),
        ]),
        Line::from(vec![
            Span::styled("  Mem RSS: ", label),
            Span::raw(format!("{} KiB", record.rss_kib)),
        ]),
        Line::from(vec![
            Span::styled("  Name:    ", label),
            Span::raw(record.name.clone()),
        ]),
        Line::from(vec![
            Span::styled("  Cmd:     ", label),
            Span::raw(cmdline.to_string()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  [Enter/q] close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let popup_block = Block::default()
        .title(" Process Details ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::POPUP));

    f.render_widget(Paragraph::new(lines).block(popup_block), popup);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_frame_is_90_percent_centered() {
        let frame = content_frame(Rect::new(0, 0, 100, 40));
        assert_eq!(frame, Rect::new(5, 2, 90, 36));
    }

    #[test]
    fn test_content_frame_falls_back_on_small_screens() {
        // 90% of 30 is 27 wide but below the 40-col minimum, so the frame
        // falls back to screen minus margin
        let frame = content_frame(Rect::new(0, 0, 30, 8));
        assert_eq!(frame.width, 26);
        assert_eq!(frame.height, 4);
    }

    #[test]
    fn test_content_frame_zero_area() {
        let frame = content_frame(Rect::new(0, 0, 0, 0));
        assert_eq!(frame.width, 0);
        assert_eq!(frame.height, 0);
    }

    #[test]
    fn test_visible_rows_accounts_for_chrome() {
        // 100x40 -> frame 36 high -> 34 inner -> 32 data rows
        assert_eq!(visible_rows(Rect::new(0, 0, 100, 40)), 32);
    }

    #[test]
    fn test_visible_rows_never_zero() {
        assert_eq!(visible_rows(Rect::new(0, 0, 0, 0)), 1);
        assert_eq!(visible_rows(Rect::new(0, 0, 10, 3)), 1);
    }
}
