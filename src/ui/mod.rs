pub mod cursor;
pub mod layout;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use story_shuffle::game::{Notice, NoticeKind, Zone};

use crate::app::{App, MenuOption, Screen};
use self::layout::{
    celebration_area, close_button, notice_area, BoardLayout, CHECK_LABEL, CLOSE_LABEL, RESET_LABEL,
};

const HELP: &str =
    "drag words with the mouse  •  ↑/↓ line  •  Tab pool/line  •  ←/→ word  •  Enter place  •  </> move  •  Del remove  •  c check  •  r reset  •  :q quit";

/// Draws the current screen and returns the board geometry used for mouse
/// hit-testing until the next frame.
pub fn draw_ui(f: &mut Frame, app: &App) -> Option<BoardLayout> {
    if matches!(app.screen, Screen::TitleScreen) {
        draw_title_screen(f, app);
        return None;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_status(f, app, chunks[0]);

    let mut board = BoardLayout::compute(&app.game, chunks[1], app.scroll);
    if let Some(line) = app.reveal {
        board.reveal(line);
    }
    draw_board(f, app, &board);
    draw_footer(f, app, chunks[2]);

    if app.game.is_celebrating() {
        board.overlays.push(draw_celebration(f, chunks[1]));
    }
    if let Some(notice) = app.game.notice() {
        let (popup, close) = draw_notice(f, notice, chunks[1]);
        board.overlays.push(popup);
        board.notice_close = Some(close);
    }

    Some(board)
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let (solved, total) = app.game.progress();
    let status = Line::from(vec![
        Span::styled(
            " STORY SHUFFLE ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ),
        Span::raw("  "),
        Span::styled(
            format!(" {} ", app.game.story().meta.title),
            Style::default().fg(Color::White).bg(Color::DarkGray),
        ),
        Span::raw("  "),
        Span::styled(
            format!(" Solved {}/{} ", solved, total),
            Style::default().fg(if solved == total {
                Color::Green
            } else {
                Color::Cyan
            }),
        ),
    ]);
    let status_block = Paragraph::new(status).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(status_block, area);
}

fn draw_board(f: &mut Frame, app: &App, board: &BoardLayout) {
    let dragged = app.drag.payload().map(|p| p.token);

    for group in &board.lines {
        let line = group.line;
        let is_cursor_line = app.cursor.line == line;

        if let Some(rect) = board.to_screen(group.header) {
            let label_style = if is_cursor_line {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let mut spans = vec![Span::styled(format!("Line {}", line + 1), label_style)];
            if app.game.is_solved(line) {
                // A solved line keeps its flag after a reset; show it dimmed then.
                let marker_style = if app.game.arrangement_matches(line) {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                spans.push(Span::styled("  ✓ solved", marker_style));
            }
            f.render_widget(Paragraph::new(Line::from(spans)), rect);
        }
        if let Some(rect) = board.to_screen(group.check) {
            f.render_widget(
                Paragraph::new(Span::styled(CHECK_LABEL, Style::default().fg(Color::Cyan))),
                rect,
            );
        }
        if let Some(rect) = board.to_screen(group.reset) {
            f.render_widget(
                Paragraph::new(Span::styled(RESET_LABEL, Style::default().fg(Color::Magenta))),
                rect,
            );
        }

        if let Some(rect) = board.to_screen(group.arrangement) {
            let border = if app.hover == Some(Zone::Arrangement(line)) {
                Color::Yellow
            } else if app.game.is_solved(line) {
                Color::Green
            } else {
                Color::DarkGray
            };
            f.render_widget(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
                rect,
            );
        }
        if app.game.arrangement(line).is_empty() {
            let placeholder = Rect::new(
                group.arrangement.x + 1,
                group.arrangement.y + 1,
                group.arrangement.width.saturating_sub(2),
                1,
            );
            if let Some(rect) = board.to_screen(placeholder) {
                f.render_widget(
                    Paragraph::new(Span::styled(
                        "Drop here",
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::ITALIC),
                    )),
                    rect,
                );
            }
        }

        for chip in &group.chips {
            let Some(rect) = board.to_screen(chip.rect) else {
                continue;
            };
            let selected = is_cursor_line
                && app.cursor.index == chip.index
                && app.cursor.zone() == chip.zone;
            let mut style = match (chip.zone, selected) {
                (_, true) => Style::default().fg(Color::Black).bg(Color::Yellow),
                (Zone::Pool(_), false) => Style::default().fg(Color::Black).bg(Color::Gray),
                (Zone::Arrangement(_), false) => Style::default().fg(Color::White).bg(Color::Blue),
            };
            if dragged == Some(chip.token) {
                style = style.add_modifier(Modifier::DIM);
            }
            let word = app.game.word(chip.token);
            f.render_widget(
                Paragraph::new(Span::styled(format!(" {} ", word), style)),
                rect,
            );
        }
    }
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let (content, style) = if app.command_mode {
        (
            format!(":{}", app.command_buffer),
            Style::default().fg(Color::White).bg(Color::DarkGray),
        )
    } else if !app.status.is_empty() {
        (app.status.clone(), Style::default().fg(Color::Yellow))
    } else {
        (HELP.to_string(), Style::default().fg(Color::DarkGray))
    };
    f.render_widget(Paragraph::new(content).style(style), area);
}

/// Renders the notice popup and returns its rect and the close button's rect.
fn draw_notice(f: &mut Frame, notice: &Notice, board: Rect) -> (Rect, Rect) {
    let area = notice_area(board);
    let (style, title) = match notice.kind {
        NoticeKind::LineCorrect => (Style::default().fg(Color::Black).bg(Color::Green), " Correct "),
        NoticeKind::LineIncorrect => (Style::default().fg(Color::White).bg(Color::Red), " Try again "),
        NoticeKind::AllCorrect => (
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            " STORY COMPLETE! ",
        ),
    };
    f.render_widget(Clear, area);
    let popup = Paragraph::new(notice.message.as_str())
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
        .style(style);
    f.render_widget(popup, area);

    let close = close_button(area);
    f.render_widget(
        Paragraph::new(Span::styled(CLOSE_LABEL, style.add_modifier(Modifier::BOLD))),
        close,
    );
    (area, close)
}

fn draw_celebration(f: &mut Frame, board: Rect) -> Rect {
    let area = celebration_area(board);
    let banner = "\
✦  ✧  ★  ✦  ✧  ★  ✦  ✧  ★

THE WHOLE STORY IS BACK IN ORDER

★  ✧  ✦  ★  ✧  ✦  ★  ✧  ✦";
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(banner)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        area,
    );
    area
}

fn draw_title_screen(f: &mut Frame, app: &App) {
    let area = f.area();

    let title_art = r#"
    ╔═══════════════════════════════════════════════════╗
    ║                                                   ║
    ║     ╔═╗ ╔╦╗ ╔═╗ ╦═╗ ╦ ╦                           ║
    ║     ╚═╗  ║  ║ ║ ╠╦╝ ╚╦╝                           ║
    ║     ╚═╝  ╩  ╚═╝ ╩╚═  ╩                            ║
    ║                  ╔═╗ ╦ ╦ ╦ ╦ ╔═╗ ╔═╗ ╦   ╔═╗      ║
    ║                  ╚═╗ ╠═╣ ║ ║ ╠╣  ╠╣  ║   ║╣       ║
    ║                  ╚═╝ ╩ ╩ ╚═╝ ╚   ╚   ╩═╝ ╚═╝      ║
    ║                                                   ║
    ║        "Put every word back where it belongs"     ║
    ║                                                   ║
    ╚═══════════════════════════════════════════════════╝
"#;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(15),
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    let title = Paragraph::new(title_art)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let story = Paragraph::new(format!(
        "{}  ({} lines)",
        app.game.story().meta.title,
        app.game.line_count()
    ))
    .style(Style::default().fg(Color::Cyan))
    .alignment(Alignment::Center);
    f.render_widget(story, chunks[1]);

    let selected = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let unselected = Style::default().fg(Color::White);

    let start = Paragraph::new("  START  ")
        .style(if matches!(app.menu_selection, MenuOption::Start) {
            selected
        } else {
            unselected
        })
        .alignment(Alignment::Center);
    f.render_widget(start, chunks[2]);

    let quit = Paragraph::new("  QUIT  ")
        .style(if matches!(app.menu_selection, MenuOption::Quit) {
            selected
        } else {
            unselected
        })
        .alignment(Alignment::Center);
    f.render_widget(quit, chunks[3]);

    let help = Paragraph::new("↑/↓ to select  •  ENTER to confirm  •  q to quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[4]);
}
