//! Lemonade Tycoon rendering. Reads engine state, never mutates it.

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::click::TapMap;

use super::actions::Panel;
use super::cooldown::Cooldown;
use super::logic::Engine;
use super::TycoonGame;

/// Width of the cooldown gauge in cells.
const GAUGE_WIDTH: usize = 10;

/// Draw the whole game and record tap targets for the visible rows.
pub fn render(game: &TycoonGame, f: &mut Frame, area: Rect, taps: &mut TapMap) {
    taps.reset(area.height);
    let Some(engine) = game.engine() else {
        render_load_error(game, f, area);
        return;
    };

    // Wide screens put the log beside the panels, narrow ones stack it below.
    let (main_area, log_area) = if is_narrow_layout(area.width) {
        let v_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(12), Constraint::Length(8)])
            .split(area);
        (v_chunks[0], v_chunks[1])
    } else {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        (h_chunks[0], h_chunks[1])
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
        ])
        .split(main_area);

    render_header(engine, f, chunks[0]);
    render_tab_bar(game.panel, f, chunks[1]);
    match game.panel {
        Panel::Earn => render_earn(game, engine, f, chunks[2]),
        Panel::Improve => render_improve(engine, f, chunks[2]),
        Panel::Managers => render_managers(engine, f, chunks[2]),
        Panel::Upgrades => render_upgrades(engine, f, chunks[2]),
    }
    register_taps(game, engine, chunks[1], chunks[2], taps);

    render_log(game, f, log_area);
}

fn register_taps(game: &TycoonGame, engine: &Engine, tabs: Rect, list: Rect, taps: &mut TapMap) {
    // The tab bar cycles to the next panel when tapped.
    let panels = Panel::all();
    let current = panels.iter().position(|p| *p == game.panel).unwrap_or(0);
    taps.add(tabs.y + 1, panels[(current + 1) % panels.len()].key());

    let rows = match game.panel {
        Panel::Upgrades => engine.state().available_upgrades.len(),
        _ => engine.state().businesses.len(),
    };
    let visible = list.height.saturating_sub(2) as usize;
    for i in 0..rows.min(visible).min(9) {
        taps.add(list.y + 1 + i as u16, char::from(b'1' + i as u8));
    }
}

fn render_load_error(game: &TycoonGame, f: &mut Frame, area: Rect) {
    let reason = game.load_error.as_deref().unwrap_or("unknown error");
    let widget = Paragraph::new(vec![
        Line::from(Span::styled(
            "The game could not start.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(reason, Style::default().fg(Color::Gray))),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Lemonade Tycoon "),
    )
    .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_header(engine: &Engine, f: &mut Frame, area: Rect) {
    let state = engine.state();
    let line = Line::from(vec![
        Span::styled(
            format_money(state.currency),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   passive {}/s", format_money(state.passive_income_per_second)),
            Style::default().fg(Color::Green),
        ),
    ]);
    let widget = Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Lemonade Tycoon "),
        )
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

fn render_tab_bar(active: Panel, f: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    for (i, panel) in Panel::all().iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        let style = if *panel == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(
            format!(" [{}] {} ", panel.key().to_ascii_uppercase(), panel.title()),
            style,
        ));
    }
    let widget = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

fn key_span(row: usize, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(format!(" [{}] ", row + 1), style)
}

fn panel_block(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title)
}

fn render_earn(game: &TycoonGame, engine: &Engine, f: &mut Frame, area: Rect) {
    let now = engine.now();
    let items: Vec<ListItem> = engine
        .state()
        .businesses
        .iter()
        .enumerate()
        .map(|(i, b)| {
            if !b.unlocked {
                return ListItem::new(Line::from(vec![
                    key_span(i, false),
                    Span::styled(
                        format!("{} (unlocks at {})", b.name, format_money(b.unlock_threshold)),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]));
            }
            if game.manual_disabled.contains(&b.name) {
                let who = b.manager.as_ref().map(|m| m.name.as_str()).unwrap_or("manager");
                let eta = engine
                    .manager_eta(&b.name)
                    .map(|ms| format!("  next in {:.1}s", ms as f64 / 1000.0))
                    .unwrap_or_default();
                return ListItem::new(Line::from(vec![
                    Span::raw("     "),
                    Span::styled(
                        format!("{:<12}{:>12}  run by {}", b.name, format_money(b.income_per_action), who),
                        Style::default().fg(Color::Green),
                    ),
                    Span::styled(eta, Style::default().fg(Color::Gray)),
                ]));
            }
            let cooldown = engine.cooldown(&b.name).unwrap_or(Cooldown::Ready);
            let remaining = game.cooling.get(&b.name).copied().unwrap_or(0.0);
            let ready = engine.can_earn(&b.name);
            let status = if ready {
                "ready".to_string()
            } else {
                format!("{:.1}s", cooldown.remaining_ms(now) as f64 / 1000.0)
            };
            ListItem::new(Line::from(vec![
                key_span(i, ready),
                Span::styled(
                    format!("{:<12}", b.name),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:>12} ", format_money(b.income_per_action)),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    cooldown_bar(remaining, GAUGE_WIDTH),
                    Style::default().fg(if ready { Color::Green } else { Color::Cyan }),
                ),
                Span::styled(format!(" {}", status), Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();
    f.render_widget(List::new(items).block(panel_block(" Earn ", Color::Yellow)), area);
}

fn render_improve(engine: &Engine, f: &mut Frame, area: Rect) {
    let state = engine.state();
    let growth = engine.config().business_income_growth;
    let items: Vec<ListItem> = state
        .businesses
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let affordable = b.unlocked && state.currency >= b.upgrade_cost;
            let text_style = if b.unlocked {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(Line::from(vec![
                key_span(i, affordable),
                Span::styled(format!("{:<12}", b.name), text_style),
                Span::styled(
                    format!(
                        "{} → {}",
                        format_money(b.income_per_action),
                        format_money(b.income_per_action * growth)
                    ),
                    text_style,
                ),
                Span::styled(
                    format!("  ({}/s)", format_money(b.income_per_second())),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("  cost {}", format_money(b.upgrade_cost)),
                    Style::default().fg(if affordable { Color::Yellow } else { Color::DarkGray }),
                ),
            ]))
        })
        .collect();
    f.render_widget(List::new(items).block(panel_block(" Improve ", Color::Magenta)), area);
}

fn render_managers(engine: &Engine, f: &mut Frame, area: Rect) {
    let state = engine.state();
    let items: Vec<ListItem> = state
        .businesses
        .iter()
        .enumerate()
        .map(|(i, b)| match &b.manager {
            None => ListItem::new(Line::from(vec![
                key_span(i, false),
                Span::styled(
                    format!("{:<12} no manager", b.name),
                    Style::default().fg(Color::DarkGray),
                ),
            ])),
            Some(m) if b.has_hired_manager() => ListItem::new(Line::from(vec![
                Span::raw("     "),
                Span::styled(
                    format!("{:<12} {} (every {:.1}s)", b.name, m.name, m.interval_seconds),
                    Style::default().fg(Color::Green),
                ),
            ])),
            Some(m) => {
                let affordable = b.unlocked && state.currency >= m.cost;
                ListItem::new(Line::from(vec![
                    key_span(i, affordable),
                    Span::styled(
                        format!("{:<12} {}", b.name, m.name),
                        Style::default().fg(if b.unlocked { Color::White } else { Color::DarkGray }),
                    ),
                    Span::styled(
                        format!("  {}", format_money(m.cost)),
                        Style::default().fg(if affordable { Color::Yellow } else { Color::DarkGray }),
                    ),
                ]))
            }
        })
        .collect();
    f.render_widget(List::new(items).block(panel_block(" Managers ", Color::Green)), area);
}

fn render_upgrades(engine: &Engine, f: &mut Frame, area: Rect) {
    let state = engine.state();
    let items: Vec<ListItem> = state
        .available_upgrades
        .iter()
        .enumerate()
        .map(|(i, u)| {
            let affordable = state.currency >= u.cost;
            ListItem::new(Line::from(vec![
                key_span(i, affordable),
                Span::styled(format!("{:<34}", u.name), Style::default().fg(Color::White)),
                Span::styled(
                    format_money(u.cost),
                    Style::default().fg(if affordable { Color::Yellow } else { Color::DarkGray }),
                ),
            ]))
        })
        .collect();
    f.render_widget(List::new(items).block(panel_block(" Upgrades ", Color::Cyan)), area);
}

fn render_log(game: &TycoonGame, f: &mut Frame, area: Rect) {
    let visible_height = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = game
        .log
        .iter()
        .rev()
        .take(visible_height)
        .map(|entry| {
            let style = if entry.is_important {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();
    let widget = Paragraph::new(lines)
        .block(panel_block(" Log ", Color::Blue))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

pub fn is_narrow_layout(width: u16) -> bool {
    width < 80
}

/// `$1,234.50` style money formatting.
pub fn format_money(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!(
        "{}${}.{:02}",
        if negative { "-" } else { "" },
        grouped,
        cents % 100
    )
}

/// Gauge that fills as the cooldown runs out: full when ready.
pub fn cooldown_bar(remaining: f64, width: usize) -> String {
    let done = ((1.0 - remaining.clamp(0.0, 1.0)) * width as f64).round() as usize;
    let done = done.min(width);
    format!("{}{}", "█".repeat(done), "░".repeat(width - done))
}
