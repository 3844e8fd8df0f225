use chrono::{Datelike, NaiveDate};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

use super::app::{App, InputMode};
use crate::api::resolve_media;
use crate::commands::render::cell;
use crate::locale;
use crate::models::{
    format_playback_time, ProgressTier, ReportData, StatCard, Trainee, UpcomingWebinar, Webinar,
    WebinarStatus,
};
use crate::services::reports::bar_glyphs;
use crate::services::Calendar;

fn panel(title: &str, is_selected: bool) -> Block<'_> {
    let border_style = if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style)
}

fn status_style(status: WebinarStatus) -> Style {
    match status {
        WebinarStatus::Upcoming => Style::default().fg(Color::Blue),
        WebinarStatus::Live => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        WebinarStatus::Completed => Style::default().fg(Color::Green),
        WebinarStatus::Cancelled => Style::default().fg(Color::DarkGray),
    }
}

fn row_style(highlighted: bool) -> Style {
    if highlighted {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

/// Render the dashboard stat cards
pub fn render_stats(area: Rect, buf: &mut Buffer, stats: &[StatCard]) {
    let block = panel(" Overview ", false);
    let inner = block.inner(area);
    block.render(area, buf);

    let lines: Vec<Line> = stats
        .iter()
        .map(|card| {
            let mut spans = vec![
                Span::styled(cell(&card.title, 22), Style::default().fg(Color::Gray)),
                Span::styled(
                    cell(&card.value, 7),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
            ];
            if let Some(change) = &card.change {
                let color = if change.positive {
                    Color::Green
                } else {
                    Color::Red
                };
                spans.push(Span::styled(change.label(), Style::default().fg(color)));
            }
            Line::from(spans)
        })
        .collect();

    Paragraph::new(lines).render(inner, buf);
}

/// Render the recent webinars list
pub fn render_recent(
    area: Rect,
    buf: &mut Buffer,
    recent: &[Webinar],
    selected_index: usize,
    is_selected: bool,
) {
    let block = panel(" Recent webinars ", is_selected);
    let inner = block.inner(area);
    block.render(area, buf);

    if recent.is_empty() {
        Paragraph::new("No webinars yet.")
            .style(Style::default().fg(Color::Gray))
            .render(inner, buf);
        return;
    }

    let width = inner.width.saturating_sub(14) as usize;
    let items: Vec<ListItem> = recent
        .iter()
        .enumerate()
        .map(|(idx, webinar)| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    cell(&webinar.title, width),
                    row_style(is_selected && idx == selected_index),
                ),
                Span::raw(" "),
                Span::styled(webinar.status.label(), status_style(webinar.status)),
            ]))
        })
        .collect();

    List::new(items).render(inner, buf);
}

/// Render the upcoming sessions panel
pub fn render_upcoming(area: Rect, buf: &mut Buffer, upcoming: &[UpcomingWebinar]) {
    let block = panel(" Upcoming ", false);
    let inner = block.inner(area);
    block.render(area, buf);

    let mut lines = Vec::new();
    for item in upcoming {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} {} ", item.date, item.time),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(item.title.clone()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", item.presenter),
            Style::default().fg(Color::DarkGray),
        )));
    }

    Paragraph::new(lines).render(inner, buf);
}

/// Render a month grid; days with webinars in cyan, the selected day reversed
pub fn render_month(area: Rect, buf: &mut Buffer, calendar: &Calendar, selected: NaiveDate) {
    let title = format!(" {} ", locale::format_month_year(selected));
    let block = panel(&title, false);
    let inner = block.inner(area);
    block.render(area, buf);

    let mut lines = vec![Line::from(Span::styled(
        locale::weekday_initials().join(" "),
        Style::default().fg(Color::Gray),
    ))];

    if let Some(grid) = calendar.month_grid(selected.year(), selected.month()) {
        for week in &grid.weeks {
            let mut spans = Vec::new();
            for (idx, day) in week.iter().enumerate() {
                if idx > 0 {
                    spans.push(Span::raw(" "));
                }
                match day {
                    None => spans.push(Span::raw("  ")),
                    Some(day) => {
                        let style = if day.date == selected {
                            Style::default().add_modifier(Modifier::REVERSED)
                        } else if day.has_webinars {
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD)
                        } else {
                            Style::default()
                        };
                        spans.push(Span::styled(format!("{:>2}", day.date.day()), style));
                    }
                }
            }
            lines.push(Line::from(spans));
        }
    }

    Paragraph::new(lines).render(inner, buf);
}

/// Render the agenda of one day
pub fn render_day(area: Rect, buf: &mut Buffer, calendar: &Calendar, date: NaiveDate) {
    let title = format!(" {} ", locale::format_full_date(date));
    let block = panel(&title, true);
    let inner = block.inner(area);
    block.render(area, buf);

    let day = calendar.webinars_on(date);
    if day.is_empty() {
        Paragraph::new("No webinars scheduled for this day.")
            .style(Style::default().fg(Color::Gray))
            .render(inner, buf);
        return;
    }

    let mut lines = Vec::new();
    for webinar in day {
        lines.push(Line::from(vec![
            Span::styled(
                format!(
                    "{} - {}  ",
                    webinar.time_label(),
                    webinar.end_time().format("%H:%M")
                ),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(webinar.title.clone()),
            Span::raw(" "),
            Span::styled(webinar.status.label(), status_style(webinar.status)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {} · {}", webinar.presenter, webinar.category),
            Style::default().fg(Color::DarkGray),
        )));
    }

    Paragraph::new(lines).render(inner, buf);
}

/// Render the filter bar above the webinar list
pub fn render_filter_bar(area: Rect, buf: &mut Buffer, app: &App) {
    let searching = app.input_mode == InputMode::Search;
    let block = panel(" Filters ", searching);
    let inner = block.inner(area);
    block.render(area, buf);

    let search = if searching {
        format!("{}▏", app.filter.search)
    } else if app.filter.search.is_empty() {
        "-".to_string()
    } else {
        app.filter.search.clone()
    };
    let status = app
        .filter
        .status
        .map(|s| s.label())
        .unwrap_or("All statuses");

    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::Yellow);
    let line = Line::from(vec![
        Span::styled("Search: ", label),
        Span::styled(search, value),
        Span::styled("  Category: ", label),
        Span::styled(app.filter.category.label().to_string(), value),
        Span::styled("  Status: ", label),
        Span::styled(status, value),
        Span::styled(
            if app.filter.match_presenter {
                "  (+presenter)"
            } else {
                ""
            },
            label,
        ),
    ]);

    Paragraph::new(line).render(inner, buf);
}

/// Render the filtered webinar list
pub fn render_webinar_list(
    area: Rect,
    buf: &mut Buffer,
    webinars: &[&Webinar],
    total: usize,
    selected_index: usize,
) {
    let title = format!(" Webinars ({}/{}) ", webinars.len(), total);
    let block = panel(&title, true);
    let inner = block.inner(area);
    block.render(area, buf);

    if webinars.is_empty() {
        Paragraph::new("No webinars match your search.\nPress 'x' to reset the filters.")
            .style(Style::default().fg(Color::Gray))
            .render(inner, buf);
        return;
    }

    let title_width = (inner.width as usize).saturating_sub(58).max(12);
    let items: Vec<ListItem> = webinars
        .iter()
        .enumerate()
        .map(|(idx, webinar)| {
            ListItem::new(Line::from(vec![
                Span::styled(cell(&webinar.title, title_width), row_style(idx == selected_index)),
                Span::raw(" "),
                Span::styled(cell(&webinar.presenter, 18), Style::default().fg(Color::Gray)),
                Span::raw(" "),
                Span::raw(cell(&webinar.date_label(), 17)),
                Span::raw(" "),
                Span::styled(cell(&webinar.category, 10), Style::default().fg(Color::Cyan)),
                Span::raw(" "),
                Span::styled(webinar.status.label(), status_style(webinar.status)),
            ]))
        })
        .collect();

    List::new(items).render(inner, buf);
}

/// Render the detail page of one webinar
pub fn render_webinar_detail(
    area: Rect,
    buf: &mut Buffer,
    webinar: &Webinar,
    related: &[&Webinar],
    base_url: &str,
) {
    let title = format!(" {} ", webinar.title);
    let block = panel(&title, true);
    let inner = block.inner(area);
    block.render(area, buf);

    let label = Style::default().fg(Color::Gray);
    let heading = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(webinar.category.clone(), Style::default().fg(Color::Cyan)),
            Span::raw("  "),
            Span::styled(webinar.status.label(), status_style(webinar.status)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Presenter  ", label),
            Span::raw(webinar.presenter.clone()),
        ]),
        Line::from(vec![
            Span::styled("Date       ", label),
            Span::raw(webinar.date_label()),
        ]),
        Line::from(vec![
            Span::styled("Time       ", label),
            Span::raw(format!(
                "{} - {} ({})",
                webinar.time_label(),
                webinar.end_time().format("%H:%M"),
                webinar.duration_label()
            )),
        ]),
        Line::from(vec![
            Span::styled("Attendees  ", label),
            Span::raw(webinar.attendees.to_string()),
        ]),
    ];

    if let Some(video) = &webinar.video {
        lines.push(Line::from(vec![
            Span::styled("Recording  ", label),
            Span::raw(resolve_media(base_url, video)),
            Span::styled(
                format!(
                    "  0:00 / {}",
                    format_playback_time(f64::from(webinar.duration_minutes) * 60.0)
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("About this webinar", heading)));
    lines.push(Line::from(webinar.description_or_default().to_string()));

    if !related.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Related webinars", heading)));
        for other in related {
            lines.push(Line::from(vec![
                Span::raw(format!("  {} ", other.title)),
                Span::styled(other.date_label(), label),
            ]));
        }
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}

/// Render the trainee directory
pub fn render_trainees(area: Rect, buf: &mut Buffer, trainees: &[Trainee], selected_index: usize) {
    let block = panel(" Trainees ", true);
    let inner = block.inner(area);
    block.render(area, buf);

    let items: Vec<ListItem> = trainees
        .iter()
        .enumerate()
        .map(|(idx, trainee)| {
            let color = match trainee.progress_tier() {
                ProgressTier::High => Color::Green,
                ProgressTier::Medium => Color::Yellow,
                ProgressTier::Low => Color::Red,
            };
            ListItem::new(Line::from(vec![
                Span::styled(cell(&trainee.name, 20), row_style(idx == selected_index)),
                Span::raw(" "),
                Span::styled(cell(&trainee.program, 28), Style::default().fg(Color::Gray)),
                Span::raw(" "),
                Span::styled(
                    bar_glyphs(trainee.progress as f64 / 100.0, 12),
                    Style::default().fg(color),
                ),
                Span::raw(format!(" {:>3}%", trainee.progress)),
            ]))
        })
        .collect();

    List::new(items).render(inner, buf);
}

/// Render the monthly attendance chart and summary cards
pub fn render_report(area: Rect, buf: &mut Buffer, report: &ReportData) {
    let block = panel(" Monthly attendance ", true);
    let inner = block.inner(area);
    block.render(area, buf);

    let summary: Vec<Span> = report
        .summary
        .iter()
        .flat_map(|card| {
            let color = if card.trend > 0 {
                Color::Green
            } else if card.trend < 0 {
                Color::Red
            } else {
                Color::Gray
            };
            vec![
                Span::styled(format!("{} ", card.title), Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{} ", card.value),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("{}   ", card.trend_label()), Style::default().fg(color)),
            ]
        })
        .collect();

    let summary_area = Rect { height: 1.min(inner.height), ..inner };
    Paragraph::new(Line::from(summary)).render(summary_area, buf);

    let chart_area = Rect {
        y: inner.y + 2,
        height: inner.height.saturating_sub(2),
        ..inner
    };
    let data: Vec<(&str, u64)> = report
        .monthly_attendance
        .iter()
        .map(|p| (p.name.as_str(), p.value))
        .collect();

    BarChart::default()
        .data(&data)
        .bar_width(5)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        .render(chart_area, buf);
}

/// Full-page message (unauthorized, not found, fetch failure)
pub fn render_message(area: Rect, buf: &mut Buffer, title: &str, lines: &[&str], color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    block.render(area, buf);

    let text: Vec<Line> = lines.iter().map(|l| Line::from(l.to_string())).collect();
    Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}

/// Render help overlay
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ❓ Help ")
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(area);
    block.render(area, buf);

    let section = Style::default().fg(Color::Cyan);
    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Pages:", section)),
        Line::from("  1-5      - Dashboard, webinars, calendar, trainees, reports"),
        Line::from("  Esc      - Back"),
        Line::from("  ↑/k ↓/j  - Move selection"),
        Line::from("  Enter    - Open webinar"),
        Line::from(""),
        Line::from(Span::styled("Webinars:", section)),
        Line::from("  /        - Search titles"),
        Line::from("  c / s    - Next category / status"),
        Line::from("  p        - Also search presenters"),
        Line::from("  x        - Reset filters"),
        Line::from("  d        - Delete locally"),
        Line::from(""),
        Line::from(Span::styled("Calendar:", section)),
        Line::from("  h/l j/k  - Day / week"),
        Line::from("  < >      - Month"),
        Line::from("  m d t    - Month view, day view, today"),
        Line::from(""),
        Line::from(Span::styled("Other:", section)),
        Line::from("  r        - Refresh data"),
        Line::from("  ?        - Toggle this help"),
        Line::from("  q        - Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? or ESC to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    Paragraph::new(help_text).render(inner, buf);
}

/// Render status bar at bottom
pub fn render_status_bar(area: Rect, buf: &mut Buffer, app: &App) {
    let bar = Style::default().bg(Color::DarkGray);

    let mut spans = vec![
        Span::styled(format!(" {} ", app.route.title()), bar.fg(Color::Cyan)),
        Span::styled(format!(" {} ", app.username), bar.fg(Color::White)),
    ];
    if let Some(message) = &app.status_message {
        spans.push(Span::styled(format!(" {} ", message), bar.fg(Color::Yellow)));
    }
    spans.push(Span::styled(" Press ? for help ", bar.fg(Color::Gray)));

    Paragraph::new(Line::from(spans)).render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::seed;

    fn text(buf: &Buffer) -> String {
        buf.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_webinar_list_renders_titles() {
        let webinars = seed::webinars();
        let refs: Vec<&Webinar> = webinars.iter().take(2).collect();
        let area = Rect::new(0, 0, 120, 6);
        let mut buf = Buffer::empty(area);

        render_webinar_list(area, &mut buf, &refs, webinars.len(), 0);

        let rendered = text(&buf);
        assert!(rendered.contains("Webinars (2/8)"));
        assert!(rendered.contains("Introduction à React"));
        assert!(rendered.contains("En direct"));
    }

    #[test]
    fn test_empty_day_message() {
        let calendar = Calendar::new(seed::webinars());
        let area = Rect::new(0, 0, 60, 5);
        let mut buf = Buffer::empty(area);

        render_day(
            area,
            &mut buf,
            &calendar,
            NaiveDate::from_ymd_opt(2023, 6, 13).unwrap(),
        );

        assert!(text(&buf).contains("No webinars scheduled"));
    }
}
