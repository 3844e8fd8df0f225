use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    Frame, Terminal,
};
use std::io;
use tokio::runtime::Handle;

use super::app::{Action, App, Snapshot};
use super::widgets;
use crate::auth::SessionState;
use crate::commands::context::AppContext;
use crate::commands::render::related;
use crate::routes::{Outcome, Route};
use crate::services::CalendarView;

/// Everything the home page shows, fetched in one go
pub async fn load_snapshot(ctx: &AppContext) -> Result<Snapshot> {
    let (stats, recent, upcoming) = tokio::try_join!(
        ctx.query.stats(),
        ctx.query.recent_webinars(),
        ctx.query.upcoming_webinars()
    )
    .context("Failed to load dashboard")?;
    let webinars = ctx.load_webinars().await?;

    Ok(Snapshot {
        webinars,
        stats,
        recent,
        upcoming,
    })
}

/// How the dashboard ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exit {
    Quit,
    /// Session ended while the dashboard was open
    SessionTerminated { redirect: String },
}

/// Dashboard manages the TUI lifecycle
pub struct Dashboard<'a> {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: App,
    ctx: &'a AppContext,
    runtime: Handle,
}

impl<'a> Dashboard<'a> {
    /// Create new dashboard instance
    pub fn new(ctx: &'a AppContext, app: App) -> Result<Self> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        Ok(Self {
            terminal,
            app,
            ctx,
            runtime: Handle::current(),
        })
    }

    /// Run the dashboard event loop. Blocks; call it from `block_in_place`.
    pub fn run(&mut self) -> Result<Exit> {
        loop {
            let app = &self.app;
            let base_url = &self.ctx.config.api.base_url;
            self.terminal.draw(|f| ui(f, app, base_url))?;

            if event::poll(std::time::Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == event::KeyEventKind::Press {
                        let action = self.app.handle_key(key.code);
                        self.perform(action)?;
                    }
                }
            }

            // The refresh task may have ended the session since the last tick
            if let SessionState::Terminated { redirect } = self.ctx.session.state() {
                return Ok(Exit::SessionTerminated { redirect });
            }

            if self.app.should_quit {
                return Ok(Exit::Quit);
            }
        }
    }

    fn perform(&mut self, action: Action) -> Result<()> {
        match action {
            Action::None => {}
            Action::Navigate(route) => self.navigate(route),
            Action::Refresh => {
                self.app.status_message = Some("Refreshing...".to_string());
                let app = &self.app;
                let base_url = &self.ctx.config.api.base_url;
                self.terminal.draw(|f| ui(f, app, base_url))?;

                self.runtime.block_on(self.ctx.query.clear());
                self.reload("Data refreshed");
            }
            Action::Delete(id) => {
                let hidden = self.ctx.store().and_then(|store| store.hide_webinar(&id));
                match hidden {
                    Ok(_) => self.reload("Webinar deleted"),
                    Err(e) => {
                        tracing::error!("Failed to delete webinar {}: {:#}", id, e);
                        self.app.status_message = Some(format!("Delete failed: {}", e));
                    }
                }
            }
        }
        Ok(())
    }

    /// Pass the route through the guard with the current session
    fn navigate(&mut self, route: Route) {
        let session = self.runtime.block_on(self.ctx.session.snapshot());

        match self.ctx.router.enter(route, &session) {
            Outcome::Render(route) => {
                self.app.status_message = None;
                self.app.navigate(route);
            }
            Outcome::Redirect(target) => self.app.navigate(target),
            Outcome::LoginRequired => {
                tracing::warn!("Session lost, leaving the dashboard");
                self.app.should_quit = true;
            }
        }
    }

    fn reload(&mut self, done: &str) {
        match self.runtime.block_on(load_snapshot(self.ctx)) {
            Ok(snapshot) => {
                self.app.set_snapshot(snapshot);
                self.app.status_message = Some(done.to_string());
            }
            Err(e) => {
                tracing::error!("Reload failed: {:#}", e);
                self.app.status_message = Some(format!("Error: {:#}", e));
            }
        }
    }

    /// Cleanup terminal on exit
    pub fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to restore terminal")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;

        Ok(())
    }
}

impl Drop for Dashboard<'_> {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Render the UI
fn ui(f: &mut Frame, app: &App, base_url: &str) {
    let size = f.area();

    // Main layout: page + status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(size);
    let page = main_chunks[0];

    match &app.route {
        Route::Dashboard => render_home(f, app, page),
        Route::Webinars => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(0)])
                .split(page);
            widgets::render_filter_bar(chunks[0], f.buffer_mut(), app);
            widgets::render_webinar_list(
                chunks[1],
                f.buffer_mut(),
                &app.visible_webinars(),
                app.snapshot.webinars.len(),
                app.selected_index,
            );
        }
        Route::WebinarDetail(id) => match app.detail_webinar() {
            Some(webinar) => {
                let related = related(webinar, &app.snapshot.webinars);
                widgets::render_webinar_detail(page, f.buffer_mut(), webinar, &related, base_url);
            }
            None => widgets::render_message(
                page,
                f.buffer_mut(),
                " 404 ",
                &["Oops! Page not found.", format!("No webinar with id {}.", id).as_str()],
                Color::Yellow,
            ),
        },
        Route::Calendar => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(26), Constraint::Min(0)])
                .split(page);
            widgets::render_month(columns[0], f.buffer_mut(), &app.calendar, app.calendar_date);
            match app.calendar_view {
                CalendarView::Day => widgets::render_day(
                    columns[1],
                    f.buffer_mut(),
                    &app.calendar,
                    app.calendar_date,
                ),
                CalendarView::Month => {
                    widgets::render_upcoming(columns[1], f.buffer_mut(), &app.snapshot.upcoming)
                }
            }
        }
        Route::Trainees => {
            widgets::render_trainees(page, f.buffer_mut(), &app.trainees, app.selected_index)
        }
        Route::Reports => widgets::render_report(page, f.buffer_mut(), &app.report),
        Route::Unauthorized => widgets::render_message(
            page,
            f.buffer_mut(),
            " Access denied ",
            &[
                "You do not have the permissions required to view this page.",
                "Contact an administrator if you believe this is a mistake.",
                "",
                "Press 1 to return to the dashboard.",
            ],
            Color::Red,
        ),
        Route::NotFound(path) => widgets::render_message(
            page,
            f.buffer_mut(),
            " 404 ",
            &["Oops! Page not found.", path.as_str()],
            Color::Yellow,
        ),
    }

    widgets::render_status_bar(main_chunks[1], f.buffer_mut(), app);

    // Render help overlay if active
    if app.show_help {
        let help_area = centered_rect(60, 80, size);
        widgets::render_help_overlay(help_area, f.buffer_mut());
    }
}

fn render_home(f: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(0)])
        .split(columns[1]);

    widgets::render_stats(left[0], f.buffer_mut(), &app.snapshot.stats);
    widgets::render_recent(
        left[1],
        f.buffer_mut(),
        &app.snapshot.recent,
        app.selected_index,
        true,
    );
    widgets::render_month(right[0], f.buffer_mut(), &app.calendar, app.calendar_date);
    widgets::render_upcoming(right[1], f.buffer_mut(), &app.snapshot.upcoming);
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
