//! HEXA CLI Showcase - Terminal User Interface
//!
//! Plays the command demos in a fake terminal window with copyable install
//! commands underneath. App logic lives in `hexa_showcase::tui::showcase_app`.

#![forbid(unsafe_code)]

#[cfg(feature = "tui")]
fn main() -> std::io::Result<()> {
    use hexa_showcase::tui::showcase_app::ShowcaseApp;
    let app = ShowcaseApp::new().map_err(|e| std::io::Error::other(e.to_string()))?;
    tui::run(app)
}

#[cfg(not(feature = "tui"))]
fn main() {
    eprintln!("TUI feature not enabled. Run with --features tui");
    std::process::exit(1);
}

#[cfg(feature = "tui")]
mod tui {
    use crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use hexa_showcase::engine::ShowTime;
    use hexa_showcase::tui::showcase_app::{ShowcaseApp, FRAME_MS};
    use ratatui::{
        backend::CrosstermBackend,
        layout::{Constraint, Direction, Layout, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Block, Borders, Paragraph},
        Frame, Terminal,
    };
    use std::io;
    use std::time::{Duration, Instant};

    /// Run the TUI application.
    pub fn run(mut app: ShowcaseApp) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(FRAME_MS);
        let epoch = Instant::now();

        loop {
            let start = Instant::now();
            terminal.draw(|f| ui(f, &app))?;

            let timeout = tick_rate.saturating_sub(start.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        app.handle_key(key.code);
                    }
                }
            }

            if app.should_quit {
                break;
            }

            app.update_to(ShowTime::from_duration(epoch.elapsed()));
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    fn ui(f: &mut Frame, app: &ShowcaseApp) {
        let targets = app.config.copy_targets.len() as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
                Constraint::Length(targets + 2),
            ])
            .split(f.area());

        render_title(f, chunks[0], app);
        render_terminal(f, chunks[1], app);
        render_demo_tabs(f, chunks[2], app);
        render_copy_targets(f, chunks[3], app);
    }

    fn render_title(f: &mut Frame, area: Rect, app: &ShowcaseApp) {
        let title = Paragraph::new(vec![Line::from(vec![
            Span::styled(
                " HEXA CLI ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(
                if app.paused { "[PAUSED]" } else { "[PLAYING]" },
                Style::default().fg(if app.paused {
                    Color::Yellow
                } else {
                    Color::Green
                }),
            ),
            Span::raw(" | "),
            Span::styled(
                format!("Time: {}", app.clock.now()),
                Style::default().fg(Color::White),
            ),
        ])])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls: [Space] Pause  [R] Restart  [←/→] Demo  [1-9] Copy  [Q] Quit"),
        );
        f.render_widget(title, area);
    }

    fn render_terminal(f: &mut Frame, area: Rect, app: &ShowcaseApp) {
        let prompt = app.sequencer.prompt();
        let lines: Vec<Line> = app
            .terminal_lines()
            .into_iter()
            .map(|line| match line.strip_prefix(prompt) {
                Some(rest) => Line::from(vec![
                    Span::styled(prompt.to_string(), Style::default().fg(Color::Green)),
                    Span::styled(rest.to_string(), Style::default().fg(Color::White)),
                ]),
                None => Line::from(Span::styled(line, Style::default().fg(Color::Gray))),
            })
            .collect();

        let terminal = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" ● ● ●  terminal "),
        );
        f.render_widget(terminal, area);
    }

    fn render_demo_tabs(f: &mut Frame, area: Rect, app: &ShowcaseApp) {
        let active = app.sequencer.state().active_demo;
        let mut spans = Vec::new();
        for (i, demo) in app.sequencer.demos().iter().enumerate() {
            let style = if i == active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(format!(" {} ", demo.command), style));
        }
        let tabs = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title("Demos"));
        f.render_widget(tabs, area);
    }

    fn render_copy_targets(f: &mut Frame, area: Rect, app: &ShowcaseApp) {
        let lines: Vec<Line> = app
            .copy_targets()
            .into_iter()
            .enumerate()
            .map(|(i, (target, copied))| {
                let badge = if copied {
                    Span::styled(" ✓ Copied! ", Style::default().fg(Color::Green))
                } else {
                    Span::styled(format!(" [{}] Copy  ", i + 1), Style::default().fg(Color::Gray))
                };
                Line::from(vec![
                    badge,
                    Span::styled(target.text.clone(), Style::default().fg(Color::White)),
                ])
            })
            .collect();

        let panel = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Install"));
        f.render_widget(panel, area);
    }
}
