//! TUI Rendering
//!
//! Translates `AppState` into Ratatui widgets and draws to the terminal frame.

use harimu_core::{
    content::{greeting, ASK_MOOD},
    AudioController, Author, BalloonPop, CharacterMood, ChatScreen, EndingScreen, HealingTreat,
    LandingForm, MoodPicker, View, BOT_NAME, MOODS, TREATS,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::app::{AppState, DynOutput, Screen};

const PINK: Color = Color::Rgb(0xFF, 0xB7, 0xC5);
const MUTED_TEXT: Color = Color::Gray;

/// Main draw function.
pub fn draw_ui(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Screen
            Constraint::Length(3), // Key hints
        ])
        .split(f.size());

    render_header(f, chunks[0], state);

    let name = state.session().user_name.as_str();
    match state.screen() {
        Screen::Landing(form) => render_landing(f, chunks[1], form),
        Screen::Mood(picker) => render_mood(f, chunks[1], picker, name),
        Screen::Balloon(balloons) => render_balloons(f, chunks[1], balloons, name),
        Screen::Treat(treat) => render_treat(f, chunks[1], treat, name),
        Screen::Chat { chat, cursor } => render_chat(f, chunks[1], chat, *cursor, name),
        Screen::Ending(ending) => render_ending(f, chunks[1], ending, name),
    }

    render_footer(f, chunks[2], state);
}

fn render_header(f: &mut Frame, area: Rect, state: &AppState) {
    let line = Line::from(vec![
        Span::styled(BOT_NAME, Style::default().fg(PINK).add_modifier(Modifier::BOLD)),
        Span::styled(" · teman virtualmu ", Style::default().fg(MUTED_TEXT)),
        Span::raw("   "),
        Span::styled(audio_label(state.audio()), Style::default().fg(Color::Cyan)),
    ]);
    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(PINK)),
    );
    f.render_widget(header, area);
}

fn audio_label(audio: &AudioController<DynOutput>) -> String {
    if !audio.is_active() {
        "♪ off".to_string()
    } else if audio.is_muted() {
        "♪ muted".to_string()
    } else if audio.is_playing() {
        format!("♪ {:.0}%", audio.volume() * 100.0)
    } else {
        "♪ waiting".to_string()
    }
}

fn render_footer(f: &mut Frame, area: Rect, state: &AppState) {
    let hints = match state.view() {
        View::Landing => "type your name · Enter start · Esc quit",
        View::Mood => "←↑↓→/hjkl move · Enter or 1-4 pick · r new affirmation · m mute · Esc quit",
        View::StressRelief => "1-6 choose · Enter continue · m mute · Esc quit",
        View::Chat => "1-3 or ↑↓ + Enter reply · Enter continue · m mute · Esc quit",
        View::Ending => "h hug · o profile · r restart after the hug · m mute · Esc quit",
    };
    let mut spans = vec![Span::styled(hints, Style::default().fg(MUTED_TEXT))];
    if let Some(status) = &state.status {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(status.as_str(), Style::default().fg(Color::Yellow)));
    }
    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::TOP));
    f.render_widget(footer, area);
}

fn centered(lines: Vec<Line<'_>>) -> Paragraph<'_> {
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
}

fn title(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default().fg(PINK).add_modifier(Modifier::BOLD),
    ))
}

fn hint(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(Color::Cyan)))
}

// ---------------------------------------------------------------------------
// Landing
// ---------------------------------------------------------------------------

fn render_landing(f: &mut Frame, area: Rect, form: &LandingForm) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    let intro = centered(vec![
        title(BOT_NAME),
        Line::from("Teman virtual yang selalu ada untukmu ☁️"),
        Line::from("Di sini, kamu aman untuk jadi dirimu sendiri."),
    ]);
    f.render_widget(intro, chunks[0]);

    let input_style = if form.can_submit() {
        Style::default().fg(PINK)
    } else {
        Style::default().fg(MUTED_TEXT)
    };
    let input = Paragraph::new(format!("{}▏", form.input())).block(
        Block::default()
            .title("Siapa namamu? ✨")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(input_style),
    );
    f.render_widget(input, horizontal_center(chunks[1], 40));

    let privacy = centered(vec![
        Line::from(""),
        Line::styled(
            "Semua percakapan bersifat privat dan tidak disimpan di mana pun 🔒",
            Style::default().fg(MUTED_TEXT),
        ),
    ]);
    f.render_widget(privacy, chunks[2]);
}

fn horizontal_center(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

// ---------------------------------------------------------------------------
// Mood
// ---------------------------------------------------------------------------

fn render_mood(f: &mut Frame, area: Rect, picker: &MoodPicker, name: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(8),
            Constraint::Min(4),
        ])
        .split(area);

    let intro = Paragraph::new(vec![Line::from(greeting(name)), Line::from(ASK_MOOD)])
        .wrap(Wrap { trim: true });
    f.render_widget(intro, chunks[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(4)])
        .split(chunks[1]);
    for (row_index, row) in rows.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row);
        for (col_index, cell) in cells.iter().enumerate() {
            let index = row_index * 2 + col_index;
            let Some(mood) = MOODS.get(index) else { continue };
            let color = mood
                .rgb()
                .map(|(r, g, b)| Color::Rgb(r, g, b))
                .unwrap_or(PINK);
            let selected = picker.highlighted() == index;
            let border = if selected {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let tile = Paragraph::new(Line::from(format!("{} {}", mood.emoji, mood.label)))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(if selected { BorderType::Thick } else { BorderType::Rounded })
                        .border_style(border),
                );
            f.render_widget(tile, *cell);
        }
    }

    let body = match picker.affirmation() {
        Some(a) => Line::from(format!("{} {}", a.emoji, a.text)),
        None => Line::styled("…", Style::default().fg(MUTED_TEXT)),
    };
    let card = Paragraph::new(body).wrap(Wrap { trim: true }).block(
        Block::default()
            .title("Pengingat Hari Ini")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(PINK)),
    );
    f.render_widget(card, chunks[2]);
}

// ---------------------------------------------------------------------------
// Stress relief
// ---------------------------------------------------------------------------

fn render_balloons(f: &mut Frame, area: Rect, balloons: &BalloonPop, name: &str) {
    if balloons.intro_visible() {
        let intro = centered(vec![
            title(format!("{name}, sebelum kita lanjut...")),
            Line::from("Yuk pecahkan balon-balon emosi negatif ini dulu! 🎯"),
            Line::styled("Tekan angkanya untuk melepaskan...", Style::default().fg(MUTED_TEXT)),
        ]);
        f.render_widget(intro, area);
        return;
    }

    if balloons.can_continue() {
        let done = centered(vec![
            title("🎉 Lihat? Semuanya sudah pecah! ✨"),
            Line::from("Sekarang tarik napas dalam-dalam ya..."),
            Line::styled("Hirup... tahan... hembuskan... ☁️", Style::default().fg(MUTED_TEXT)),
            Line::from(""),
            hint("[Enter] Lanjut"),
        ]);
        f.render_widget(done, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let ratio = balloons.popped_count() as f64 / balloons.total().max(1) as f64;
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(PINK))
        .ratio(ratio)
        .label(format!(
            "🎈 {} / {} dipecahkan",
            balloons.popped_count(),
            balloons.total()
        ))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(gauge, chunks[0]);

    let lines: Vec<Line> = balloons
        .balloons()
        .iter()
        .enumerate()
        .filter(|(_, b)| !b.popped)
        .map(|(i, b)| Line::from(format!("[{}] 🎈 {}", i + 1, b.label.text)))
        .collect();
    f.render_widget(centered(lines), chunks[1]);
}

fn render_treat(f: &mut Frame, area: Rect, treat: &HealingTreat, name: &str) {
    let mut lines = match treat.character() {
        CharacterMood::Waiting => vec![
            title("🥺"),
            title(format!("{name}, sebelum aku bicara...")),
            Line::from("Bolehkah aku minta satu camilan? 🥺"),
            Line::from("Aku ingin menemanimu sambil ngemil!"),
            Line::from(""),
        ],
        CharacterMood::Happy => vec![
            title(treat.selected().map_or("😋", |t| t.emoji)),
            title("Nyam! Enak sekali! 😋"),
            Line::from("Makasih ya, kamu baik banget! 💕"),
        ],
        CharacterMood::Done => vec![
            title("🤍"),
            title("Sekarang, dengerin aku ya... 🤍"),
            Line::from("Aku mau cerita sesuatu yang penting untukmu ✨"),
            Line::from(""),
            hint("[Enter] Lanjut"),
        ],
    };
    if treat.character() == CharacterMood::Waiting {
        lines.extend(
            TREATS
                .iter()
                .enumerate()
                .map(|(i, t)| Line::from(format!("[{}] {} {}", i + 1, t.emoji, t.name))),
        );
    }
    f.render_widget(centered(lines), area);
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

fn render_chat(f: &mut Frame, area: Rect, chat: &ChatScreen, cursor: usize, name: &str) {
    let choice_rows = if chat.choices_visible() || chat.is_complete() {
        chat.script().user_choices.len() as u16 + 2
    } else {
        0
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(choice_rows)])
        .split(area);

    let mut lines: Vec<Line> = Vec::new();
    for message in chat.messages() {
        let line = match message.author {
            Author::Bot => Line::from(vec![
                Span::styled(format!("{BOT_NAME}: "), Style::default().fg(PINK).add_modifier(Modifier::BOLD)),
                Span::raw(message.text.as_str()),
            ]),
            Author::User => Line::from(vec![
                Span::raw(message.text.as_str()),
                Span::styled(format!(" :{name}"), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            ])
            .alignment(Alignment::Right),
        };
        lines.push(line);
        lines.push(Line::from(""));
    }
    if chat.is_typing() {
        lines.push(Line::styled(
            format!("{BOT_NAME} sedang mengetik…"),
            Style::default().fg(MUTED_TEXT).add_modifier(Modifier::ITALIC),
        ));
    }

    let block = Block::default()
        .title(BOT_NAME)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(PINK));
    let inner = block.inner(chunks[0]);
    let transcript = Paragraph::new(lines).wrap(Wrap { trim: false });
    let scroll = overflow(&transcript, inner.width, inner.height);
    let transcript = transcript.scroll((scroll, 0)).block(block);
    f.render_widget(transcript, chunks[0]);

    if chat.choices_visible() {
        let choices: Vec<Line> = chat
            .script()
            .user_choices
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                let selected = i == cursor;
                let style = if selected {
                    Style::default().fg(PINK).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let marker = if selected { "›" } else { " " };
                Line::styled(format!("{marker} [{}] {}", i + 1, choice.text), style)
            })
            .collect();
        let panel = Paragraph::new(choices)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::TOP).title("Balas"));
        f.render_widget(panel, chunks[1]);
    } else if chat.is_complete() {
        let panel = centered(vec![Line::from(""), hint("[Enter] Lanjut ✨")]);
        f.render_widget(panel, chunks[1]);
    }
}

/// Rows hidden above the viewport so the newest line stays visible.
///
/// Counts rows after word wrapping, so the paragraph must not carry a block yet.
fn overflow(transcript: &Paragraph<'_>, width: u16, height: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let rows = transcript.line_count(width);
    rows.saturating_sub(height as usize).min(u16::MAX as usize) as u16
}

// ---------------------------------------------------------------------------
// Ending
// ---------------------------------------------------------------------------

fn render_ending(f: &mut Frame, area: Rect, ending: &EndingScreen, name: &str) {
    let mut lines = vec![
        title(ending.headline(name)),
        Line::from(""),
        Line::from(ending.message()),
        Line::from(""),
    ];
    if ending.hug_sent() {
        lines.push(hint("[r] Mulai percakapan baru ✨"));
    } else {
        lines.push(hint("[h] 🫂 Virtual Hug"));
    }

    if ending.secret_visible() {
        lines.extend([
            Line::from(""),
            Line::styled(
                "Kalau kamu masih merasa berat atau sekadar ingin cerita lebih banyak lagi... kamu masih ingat username IG-ku kan? xixixi 🙈",
                Style::default().fg(PINK),
            ),
            Line::styled("Aku selalu ada di sana. 💌", Style::default().fg(PINK)),
            hint("[o] Kunjungi IG-ku 🤍"),
        ]);
    }

    lines.push(Line::from(""));
    lines.push(Line::styled(
        format!("{BOT_NAME} v{}", env!("CARGO_PKG_VERSION")),
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(centered(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppSettings;
    use chrono::NaiveDate;
    use harimu_core::FixedSource;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use std::time::Duration;

    fn app(draw: f64) -> AppState {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        AppState::new(AppSettings::default(), "render", today)
            .with_sources(Box::new(FixedSource(draw)), Box::new(FixedSource(0.0)))
    }

    fn rendered(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 40)).unwrap();
        terminal.draw(|f| draw_ui(f, state)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn start(state: &mut AppState, name: &str) {
        for c in name.chars() {
            state.type_char(c);
        }
        state.submit_name();
    }

    #[test]
    fn landing_shows_prompt_and_input() {
        let mut state = app(0.5);
        state.type_char('A');
        state.type_char('l');
        let text = rendered(&state);
        assert!(text.contains("Siapa namamu?"));
        assert!(text.contains("Al"));
        assert!(text.contains("off"));
    }

    #[test]
    fn mood_screen_greets_by_name() {
        let mut state = app(0.5);
        start(&mut state, "Alya");
        let text = rendered(&state);
        assert!(text.contains("Hai Alya!"));
        assert!(text.contains("Burnout"));
        assert!(text.contains("Kesepian"));
        assert!(text.contains("Pengingat Hari Ini"));
    }

    #[test]
    fn balloon_intro_then_progress() {
        let mut state = app(0.1);
        start(&mut state, "Alya");
        state.select_highlighted_mood();
        assert!(rendered(&state).contains("Alya, sebelum kita lanjut..."));

        state.advance(Duration::from_millis(2500));
        state.pop_balloon(0);
        let text = rendered(&state);
        assert!(text.contains("1 / 6 dipecahkan"));
        assert!(text.contains("Capek"));
        assert!(!text.contains("Overthinking"));
    }

    #[test]
    fn chat_shows_typing_then_choices() {
        let mut state = app(0.9);
        start(&mut state, "Alya");
        state.select_highlighted_mood();
        state.give_treat(1);
        state.advance(Duration::from_millis(1500));
        state.continue_relief();
        assert!(rendered(&state).contains("sedang mengetik"));

        state.advance(Duration::from_millis(1700));
        let text = rendered(&state);
        assert!(text.contains("Balas"));
        assert!(text.contains("[1]"));
        assert!(!text.contains("sedang mengetik"));
    }

    #[test]
    fn ending_reveals_profile_action_after_hug() {
        let mut state = app(0.9);
        start(&mut state, "Alya");
        state.select_highlighted_mood();
        state.give_treat(0);
        state.advance(Duration::from_millis(1500));
        state.continue_relief();
        state.advance(Duration::from_millis(1700));
        state.choose(2);
        state.advance(Duration::from_secs(5));
        state.complete_chat();

        let text = rendered(&state);
        assert!(text.contains("Kamu hebat, Alya!"));
        assert!(!text.contains("Kunjungi"));

        state.send_hug();
        state.advance(Duration::from_millis(2000));
        let text = rendered(&state);
        assert!(text.contains("Mulai percakapan baru"));
        assert!(text.contains("Kunjungi IG-ku"));
    }

    fn wrapped(lines: Vec<Line<'static>>) -> Paragraph<'static> {
        Paragraph::new(lines).wrap(Wrap { trim: false })
    }

    #[test]
    fn overflow_keeps_tail_visible() {
        let p = wrapped(vec![Line::from("x".repeat(25)), Line::from("y")]);
        assert_eq!(overflow(&p, 10, 2), 2);
        assert_eq!(overflow(&p, 10, 10), 0);
    }

    #[test]
    fn overflow_counts_word_wrapped_rows() {
        // 20 columns of text, but words push it onto three rows of 10.
        let p = wrapped(vec![Line::from("aaaaaa bbbbbb cccccc")]);
        assert_eq!(overflow(&p, 10, 1), 2);
    }

    #[test]
    fn finished_chat_keeps_final_line_visible_on_narrow_terminal() {
        let mut state = app(0.9);
        start(&mut state, "Alya");
        state.select_highlighted_mood();
        state.give_treat(0);
        state.advance(Duration::from_millis(1500));
        state.continue_relief();
        state.advance(Duration::from_millis(1700));
        state.choose(0);
        state.advance(Duration::from_secs(10));

        let mut terminal = Terminal::new(TestBackend::new(50, 22)).unwrap();
        terminal.draw(|f| draw_ui(f, &state)).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Lanjut"));
        assert!(text.contains("bangga"));
        assert!(text.contains("kamu."));
    }
}
