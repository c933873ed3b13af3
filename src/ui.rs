use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
};
use throbber_widgets_tui::{BRAILLE_SIX, Throbber, WhichUse};

use crate::app::App;
use crate::model::{AppScreen, Band, DictionaryIndicator, Focus};

const MASK_CHAR: char = '•';

/// Draw router
pub fn draw_ui(f: &mut Frame<'_>, app: &mut App) {
    match app.screen {
        AppScreen::Welcome => draw_welcome_screen(f),
        AppScreen::Analyzer => draw_analyzer_screen(f, app),
    }
}

fn band_color(band: Option<Band>) -> Color {
    match band {
        None => Color::Gray,
        Some(Band::Weak) => Color::Red,
        Some(Band::Medium) => Color::Yellow,
        Some(Band::Strong) => Color::Green,
    }
}

fn focus_style(app: &App, focus: Focus) -> Style {
    if app.focus == focus {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn check_line(label: &str, satisfied: bool) -> Line<'static> {
    if satisfied {
        Line::from(Span::styled(
            format!("✔ {}", label),
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::from(Span::styled(
            format!("○ {}", label),
            Style::default().fg(Color::DarkGray),
        ))
    }
}

fn dictionary_line(indicator: DictionaryIndicator) -> Line<'static> {
    match indicator {
        DictionaryIndicator::Unknown => Line::from(Span::styled(
            "○ Not Leaked",
            Style::default().fg(Color::DarkGray),
        )),
        DictionaryIndicator::Secure => Line::from(Span::styled(
            "🛡 Secure Pattern",
            Style::default().fg(Color::Green),
        )),
        DictionaryIndicator::Patterned => Line::from(Span::styled(
            "⚠ Common/Patterned",
            Style::default().fg(Color::Red),
        )),
    }
}

pub fn masked_text(password: &str, masked: bool) -> String {
    if masked {
        password.chars().map(|_| MASK_CHAR).collect()
    } else {
        password.to_string()
    }
}

/// Welcome ASCII art screen (centered)
fn draw_welcome_screen(f: &mut Frame<'_>) {
    let area = f.area();
    let art = r#"
  ____             _   _            _
 / ___|  ___ _ __ | |_(_)_ __   ___| |
 \___ \ / _ \ '_ \| __| | '_ \ / _ \ |
  ___) |  __/ | | | |_| | | | |  __/ |
 |____/ \___|_| |_|\__|_|_| |_|\___|_|

        live password strength feedback
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Sentinel")
        .title_alignment(Alignment::Center);

    let paragraph = Paragraph::new(art)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(block);

    f.render_widget(paragraph, area);
}

fn draw_analyzer_screen(f: &mut Frame<'_>, app: &mut App) {
    let area = f.area();
    let view = &app.view;
    let accent = band_color(view.band);

    // the outer frame plays the role of the page background
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(Span::styled(
            "Sentinel Password Analyzer",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = outer_block.inner(area);
    f.render_widget(outer_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(inner);

    let help = Paragraph::new(
        "[Tab: focus] [Ctrl+T: show/hide] [Ctrl+U: clear] [←/→: type] [g: generate] [c: copy] [Esc: quit]",
    )
    .style(Style::default().fg(Color::Gray));
    f.render_widget(help, chunks[0]);

    let visibility = if app.masked { "hidden" } else { "visible" };
    let cursor = if app.focus == Focus::Input { "_" } else { "" };
    let input = Paragraph::new(format!(
        "{}{}",
        masked_text(&app.password, app.masked),
        cursor
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(app, Focus::Input))
            .title(format!("🔑 Password ({})", visibility)),
    );
    f.render_widget(input, chunks[1]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(view.status.clone(), Style::default().fg(accent))),
        )
        .gauge_style(Style::default().fg(accent))
        .percent(u16::from(view.score))
        .label(format!("{}/100", view.score));
    f.render_widget(gauge, chunks[2]);

    let stats = Paragraph::new(format!(
        "Entropy: {}   Hash pattern: {}%",
        view.entropy, view.hash_pattern_score
    ));
    f.render_widget(stats, chunks[3]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[4]);

    let left = if view.suggestions_visible() {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(3)])
            .split(body[0])
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8)])
            .split(body[0])
    };

    let mut check_lines: Vec<Line> = view
        .checks
        .entries()
        .iter()
        .map(|(label, ok)| check_line(label, *ok))
        .collect();
    check_lines.push(dictionary_line(view.dictionary));
    let checks = Paragraph::new(check_lines)
        .block(Block::default().borders(Borders::ALL).title("Checks"));
    f.render_widget(checks, left[0]);

    if view.suggestions_visible() {
        let items: Vec<ListItem> = view
            .suggestions
            .iter()
            .map(|s| ListItem::new(format!("{}  [Enter: use]", s)))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(focus_style(app, Focus::Suggestions))
                    .title("Suggestions"),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_stateful_widget(list, left[1], &mut app.suggestion_state);
    }

    let generated = app
        .generator
        .password
        .clone()
        .unwrap_or_else(|| "(press g to generate)".to_string());
    let generator_lines = vec![
        Line::from(format!("Type: < {} >", app.generator.kind.label())),
        Line::from(""),
        Line::from(Span::styled(
            generated,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("[c] {}", app.generator.copy_label)),
    ];
    let generator = Paragraph::new(generator_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(app, Focus::Generator))
            .title("Generator"),
    );
    f.render_widget(generator, body[1]);

    let footer = Paragraph::new(app.message.clone().unwrap_or_default())
        .block(Block::default().borders(Borders::ALL).title("Message"))
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(footer, chunks[5]);

    if app.busy() {
        let throbber = Throbber::default()
            .label(" Working...")
            .style(Style::default().fg(Color::Yellow))
            .throbber_set(BRAILLE_SIX)
            .use_type(WhichUse::Spin);
        let footer_inner = chunks[5];
        let spinner_area = Rect {
            x: footer_inner.right().saturating_sub(16),
            y: footer_inner.y + 1,
            width: 14.min(footer_inner.width),
            height: 1.min(footer_inner.height),
        };
        f.render_stateful_widget(throbber, spinner_area, &mut app.throbber_state);
    }
}
