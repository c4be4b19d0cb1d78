use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use super::app::App;
use super::markdown::format_message;
use super::section::Section;
use crate::chat::{ChatTurn, Sender};
use crate::constants::CHAT_SUGGESTIONS;
use crate::directory::FacetField;

/// Render the main UI
pub fn render_ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header / section tabs
            Constraint::Min(8),    // Section body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);

    match app.section {
        Section::Dashboard => render_dashboard(frame, chunks[1], app),
        Section::Directory => render_directory(frame, chunks[1], app),
        Section::Assistant => render_assistant(frame, chunks[1], app),
        Section::Profile => render_profile(frame, chunks[1], app),
    }

    render_status_bar(frame, chunks[2], app);

    if let Some(detail) = &app.detail {
        render_detail(frame, detail);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Section::ALL
        .iter()
        .map(|s| Line::from(Span::styled(s.display_name().to_string(), Style::default().fg(s.color()))))
        .collect();
    let selected = Section::ALL
        .iter()
        .position(|s| *s == app.section)
        .unwrap_or_default();

    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
        .block(
            Block::default()
                .title(Span::styled(
                    " 🎓 Alumni Portal ",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(tabs, area);
}

fn stat_card(value: usize, label: &str, color: Color) -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(label.to_string(), Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)))
}

fn render_dashboard(frame: &mut Frame, area: Rect, app: &App) {
    let profile = app.portal.profile();
    let stats = app.portal.stats();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(4),
            Constraint::Min(3),
        ])
        .split(area);

    let welcome = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("Welcome back, {}!", profile.name),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(profile.class_label(), Style::default().fg(Color::Gray))),
    ]);
    frame.render_widget(welcome, rows[0]);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    frame.render_widget(stat_card(stats.connections, "Connections", Color::Cyan), cards[0]);
    frame.render_widget(
        stat_card(stats.upcoming_events, "Upcoming Events", Color::Yellow),
        cards[1],
    );

    if app.show_activity {
        let items: Vec<ListItem> = app
            .portal
            .activity()
            .into_iter()
            .map(|item| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{} ", item.kind.icon())),
                    Span::raw(item.text),
                    Span::styled(
                        format!("  {}", item.time_ago),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let feed = List::new(items).block(
            Block::default()
                .title(" Recent Activity ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(feed, rows[2]);
    }
}

fn render_directory(frame: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search box
            Constraint::Length(1), // Facets
            Constraint::Min(3),    // Results
        ])
        .split(area);

    let search_title = if app.search_pending() {
        " Search alumni… "
    } else {
        " Search alumni "
    };
    let search = Paragraph::new(Line::from(vec![
        Span::styled("🔍 ", Style::default().fg(Color::Yellow)),
        Span::raw(app.search_input.as_str()),
        Span::styled("▌", Style::default().fg(Color::Yellow)),
    ]))
    .block(
        Block::default()
            .title(search_title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Section::Directory.color())),
    );
    frame.render_widget(search, rows[0]);

    let mut facet_spans = Vec::new();
    for (key, field) in ["F2", "F3", "F4"].iter().zip(FacetField::ALL) {
        let value = app.facet_value(field).unwrap_or("All");
        facet_spans.push(Span::styled(format!(" {} ", key), Style::default().fg(Color::DarkGray)));
        facet_spans.push(Span::raw(format!("{}: ", field.label())));
        facet_spans.push(Span::styled(
            value.to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        facet_spans.push(Span::raw("  "));
    }
    frame.render_widget(Paragraph::new(Line::from(facet_spans)), rows[1]);

    let results_block = Block::default()
        .title(format!(" Alumni ({}) ", app.view().records().len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if let Some(message) = app.view().empty_message() {
        let empty = Paragraph::new(Span::styled(message, Style::default().fg(Color::Gray)))
            .alignment(Alignment::Center)
            .block(results_block);
        frame.render_widget(empty, rows[2]);
        return;
    }

    let items: Vec<ListItem> = app
        .view()
        .records()
        .iter()
        .map(|alumni| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        format!("[{}] ", alumni.initials),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(alumni.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(
                        format!("  Class of {}", alumni.class),
                        Style::default().fg(Color::Gray),
                    ),
                ]),
                Line::from(format!(
                    "     {} at {} · {} · {}",
                    alumni.position, alumni.company, alumni.industry, alumni.location
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(results_block)
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)))
        .highlight_symbol("› ");
    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, rows[2], &mut state);
}

fn turn_lines(turn: &ChatTurn) -> Vec<Line<'static>> {
    let (label, color) = match turn.sender {
        Sender::User => ("You", Color::Blue),
        Sender::Assistant if turn.is_error => ("Assistant", Color::Red),
        Sender::Assistant => ("Assistant", Color::Green),
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("[{}] ", label),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(turn.time_label(), Style::default().fg(Color::DarkGray)),
    ])];

    let body = if turn.is_error {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    lines.extend(format_message(&turn.text, body));
    lines.push(Line::default());
    lines
}

fn render_assistant(frame: &mut Frame, area: Rect, app: &App) {
    let chat = app.portal.chat();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Transcript
            Constraint::Length(3), // Input
            Constraint::Length(1), // Suggestions
        ])
        .split(area);

    let transcript = chat.transcript();
    let mut lines: Vec<Line> = Vec::new();
    if transcript.is_empty() {
        lines.push(Line::from(Span::styled(
            "Ask me anything about alumni, events, or networking.",
            Style::default().fg(Color::Gray),
        )));
    }
    for turn in &transcript {
        lines.extend(turn_lines(turn));
    }
    if chat.is_sending() {
        lines.push(Line::from(Span::styled(
            "Assistant is typing…",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    // Bottom-anchored; `chat_scroll` moves the window up.
    // Rows are counted with the same word wrapping the widget renders with.
    let conversation = Paragraph::new(lines).wrap(Wrap { trim: false });
    let inner_height = rows[0].height.saturating_sub(2);
    let total = conversation.line_count(rows[0].width.saturating_sub(2));
    let total = u16::try_from(total).unwrap_or(u16::MAX);
    let max_scroll = total.saturating_sub(inner_height);
    let top = max_scroll.saturating_sub(app.chat_scroll.min(max_scroll));

    let conversation = conversation
        .scroll((top, 0))
        .block(
            Block::default()
                .title(" AI Assistant ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Section::Assistant.color())),
        );
    frame.render_widget(conversation, rows[0]);

    let input_style = if chat.is_sending() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let send_hint = if chat.submit_enabled() { " Enter to send " } else { "" };
    let input = Paragraph::new(Line::from(vec![
        Span::styled(chat.pending_input(), input_style),
        Span::styled("▌", Style::default().fg(Color::Green)),
    ]))
    .block(
        Block::default()
            .title(" Message ")
            .title_bottom(Line::from(send_hint).right_aligned())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(input, rows[1]);

    let mut suggestion_spans = Vec::new();
    for (i, text) in CHAT_SUGGESTIONS.iter().enumerate() {
        suggestion_spans.push(Span::styled(
            format!(" F{} ", i + 1),
            Style::default().fg(Color::Black).bg(Color::Green),
        ));
        suggestion_spans.push(Span::styled(
            format!(" {}  ", text),
            Style::default().fg(Color::Gray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(suggestion_spans)), rows[2]);
}

fn render_profile(frame: &mut Frame, area: Rect, app: &App) {
    let profile = app.portal.profile();
    let field = |label: &str, value: &str| {
        let shown = if value.is_empty() { "—" } else { value };
        Line::from(vec![
            Span::styled(format!("{:<10}", label), Style::default().fg(Color::Gray)),
            Span::raw(shown.to_string()),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(
            format!(" {} ", profile.initials),
            Style::default()
                .fg(Color::Black)
                .bg(Section::Profile.color())
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            profile.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(profile.class_label()),
        Line::default(),
        field("Email", &profile.email),
        field("Location", &profile.location),
        field("Directory", app.portal.source_label()),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .title(" My Profile ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Section::Profile.color())),
    );
    frame.render_widget(card, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status_message {
        Some(message) => Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Green),
        )),
        None => Line::from(vec![
            Span::styled(
                format!(" {} ", app.section.display_name()),
                Style::default().fg(Color::Black).bg(app.section.color()),
            ),
            Span::styled(
                format!("  {}  Tab: next section  Ctrl+C: quit", app.section.keyboard_hint()),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn centered(area: Rect, width_pct: u16, height: u16) -> Rect {
    let width = u32::from(area.width) * u32::from(width_pct.min(100)) / 100;
    let width = u16::try_from(width).unwrap_or(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_detail(frame: &mut Frame, text: &str) {
    let height = u16::try_from(text.lines().count()).unwrap_or(8) + 3;
    let area = centered(frame.area(), 60, height);
    let popup = Paragraph::new(text.to_string())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Profile ")
                .title_bottom(Line::from(" Esc to close ").right_aligned())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

/// Full-screen blocking notice, shown when the portal could not start
pub fn render_notice(frame: &mut Frame, message: &str) {
    let area = centered(frame.area(), 70, 5);
    let notice = Paragraph::new(vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled("Press any key to exit", Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(notice, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::UIConfig;
    use crate::assistant::MockResponder;
    use crate::chat::ChatController;
    use crate::constants::{CHAT_FAILURE_MESSAGE, INIT_FAILURE_MESSAGE};
    use crate::directory::StaticRecordSource;
    use crate::portal::{Portal, UserProfile};
    use crate::tui::input::InputAction;
    use crate::utils::PortalError;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    async fn app_with(responder: MockResponder) -> App {
        let chat = ChatController::new(Arc::new(responder));
        let portal = Portal::bootstrap(&StaticRecordSource, chat, UserProfile::default())
            .await
            .unwrap();
        App::new(portal, &UIConfig::default())
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 36)).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        buffer_text(&terminal)
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = usize::from(buffer.area.width);
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn test_dashboard_shows_stats_and_feed() {
        let app = app_with(MockResponder::new()).await;
        let text = screen(&app);

        assert!(text.contains("Welcome back, Alumni User!"));
        assert!(text.contains("Class of 2020"));
        assert!(text.contains("Connections"));
        assert!(text.contains("Tech Alumni Meetup"));
    }

    #[tokio::test]
    async fn test_directory_lists_records_and_empty_state() {
        let mut app = app_with(MockResponder::new()).await;
        app.section = Section::Directory;
        assert!(screen(&app).contains("Emily Rodriguez"));

        let start = Instant::now();
        for c in "zzz".chars() {
            app.apply(InputAction::Insert(c), start);
        }
        app.tick(start + Duration::from_secs(1));

        let text = screen(&app);
        assert!(text.contains("No alumni found matching your criteria."));
        assert!(!text.contains("Emily Rodriguez"));
    }

    #[tokio::test]
    async fn test_assistant_transcript_renders_formatted_reply() {
        let mut responder = MockResponder::new();
        responder
            .expect_respond()
            .times(1)
            .returning(|_| Ok("**Sarah** can help".to_string()));
        let mut app = app_with(responder).await;
        app.section = Section::Assistant;

        app.portal.chat().submit("Who works at Google?").await;

        let text = screen(&app);
        assert!(text.contains("Who works at Google?"));
        assert!(text.contains("Sarah can help"));
        assert!(!text.contains("**"));
        assert!(!text.contains("typing"));
    }

    #[tokio::test]
    async fn test_assistant_failure_turn_is_shown() {
        let mut responder = MockResponder::new();
        responder
            .expect_respond()
            .returning(|_| Err(PortalError::ApiError { status: 502 }));
        let mut app = app_with(responder).await;
        app.section = Section::Assistant;

        app.portal.chat().submit("Hello").await;

        let text = screen(&app);
        assert!(text.contains(&CHAT_FAILURE_MESSAGE[..40]));
    }

    #[test]
    fn test_notice_screen() {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal
            .draw(|f| render_notice(f, INIT_FAILURE_MESSAGE))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Failed to initialize the application."));
    }

    #[tokio::test]
    async fn test_word_wrapped_reply_end_is_visible() {
        let row = format!("{} {} {}", "a".repeat(20), "b".repeat(20), "c".repeat(20));
        let mut reply = vec![row; 12];
        reply.push("FINAL_MARKER".to_string());
        let reply = reply.join("\n");

        let mut responder = MockResponder::new();
        responder
            .expect_respond()
            .times(1)
            .returning(move |_| Ok(reply.clone()));
        let mut app = app_with(responder).await;
        app.section = Section::Assistant;
        app.portal.chat().submit("List everyone").await;

        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        terminal.draw(|f| render_ui(f, &app)).unwrap();
        assert!(buffer_text(&terminal).contains("FINAL_MARKER"));

        app.scroll_up(6);
        terminal.draw(|f| render_ui(f, &app)).unwrap();
        assert!(!buffer_text(&terminal).contains("FINAL_MARKER"));
    }

    #[test]
    fn test_centered_on_very_wide_terminal() {
        let area = Rect::new(0, 0, 1200, 40);
        let popup = centered(area, 70, 5);
        assert_eq!(popup.width, 840);
        assert_eq!(popup.x, 180);
        assert_eq!(popup.height, 5);
    }
}
