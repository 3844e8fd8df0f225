use chrono::{Local, NaiveDate};
use crossterm::event::KeyCode;

use crate::models::{
    categories, CategorySelector, ReportData, StatCard, Trainee, UpcomingWebinar, Webinar,
    WebinarFilter, WebinarStatus,
};
use crate::routes::Route;
use crate::services::calendar::{next_day, previous_day, shift_month, shift_weeks};
use crate::services::{seed, Calendar, CalendarView};

/// Data fetched for one dashboard session
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub webinars: Vec<Webinar>,
    pub stats: Vec<StatCard>,
    pub recent: Vec<Webinar>,
    pub upcoming: Vec<UpcomingWebinar>,
}

/// Work a key press asks of the dashboard (guarded navigation, fetches, store writes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Navigate(Route),
    Refresh,
    Delete(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// Application state for the TUI dashboard
pub struct App {
    /// Should the application quit?
    pub should_quit: bool,
    /// Page currently shown
    pub route: Route,
    /// Show help overlay
    pub show_help: bool,
    pub input_mode: InputMode,
    pub filter: WebinarFilter,
    /// Selected row in the current page
    pub selected_index: usize,
    pub snapshot: Snapshot,
    pub calendar: Calendar,
    pub calendar_date: NaiveDate,
    pub calendar_view: CalendarView,
    pub trainees: Vec<Trainee>,
    pub report: ReportData,
    /// One-line feedback shown in the status bar
    pub status_message: Option<String>,
    pub username: String,
}

impl App {
    pub fn new(snapshot: Snapshot, username: String) -> Self {
        let calendar = Calendar::new(snapshot.webinars.clone());

        Self {
            should_quit: false,
            route: Route::Dashboard,
            show_help: false,
            input_mode: InputMode::Normal,
            filter: WebinarFilter::default(),
            selected_index: 0,
            snapshot,
            calendar,
            calendar_date: Local::now().date_naive(),
            calendar_view: CalendarView::Month,
            trainees: seed::trainees(),
            report: seed::report(),
            status_message: None,
            username,
        }
    }

    /// Swap in freshly fetched data, keeping the selection in range
    pub fn set_snapshot(&mut self, snapshot: Snapshot) {
        self.calendar = Calendar::new(snapshot.webinars.clone());
        self.snapshot = snapshot;
        self.selected_index = self.selected_index.min(self.row_count().saturating_sub(1));
    }

    /// Show a page the guard let through
    pub fn navigate(&mut self, route: Route) {
        if route != self.route {
            self.selected_index = 0;
        }
        self.input_mode = InputMode::Normal;
        self.route = route;
    }

    pub fn visible_webinars(&self) -> Vec<&Webinar> {
        self.filter.apply(&self.snapshot.webinars)
    }

    pub fn selected_webinar(&self) -> Option<&Webinar> {
        match self.route {
            Route::Dashboard => self.snapshot.recent.get(self.selected_index),
            Route::Webinars => self.visible_webinars().get(self.selected_index).copied(),
            _ => None,
        }
    }

    /// Webinar of the detail page, `None` once it is gone from the list
    pub fn detail_webinar(&self) -> Option<&Webinar> {
        match &self.route {
            Route::WebinarDetail(id) => self.snapshot.webinars.iter().find(|w| &w.id == id),
            _ => None,
        }
    }

    fn row_count(&self) -> usize {
        match self.route {
            Route::Dashboard => self.snapshot.recent.len(),
            Route::Webinars => self.visible_webinars().len(),
            Route::Trainees => self.trainees.len(),
            _ => 0,
        }
    }

    /// All → first category → ... → last category → All
    pub fn cycle_category(&mut self) {
        let categories = categories(&self.snapshot.webinars);
        let next = match &self.filter.category {
            CategorySelector::All => categories.first().cloned(),
            CategorySelector::Only(current) => categories
                .iter()
                .position(|c| c == current)
                .and_then(|idx| categories.get(idx + 1))
                .cloned(),
        };

        self.filter.category = match next {
            Some(category) => CategorySelector::Only(category),
            None => CategorySelector::All,
        };
        self.selected_index = 0;
    }

    /// Any → upcoming → live → completed → cancelled → any
    pub fn cycle_status(&mut self) {
        self.filter.status = match self.filter.status {
            None => Some(WebinarStatus::ALL[0]),
            Some(current) => WebinarStatus::ALL
                .iter()
                .position(|s| *s == current)
                .and_then(|idx| WebinarStatus::ALL.get(idx + 1))
                .copied(),
        };
        self.selected_index = 0;
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyCode) -> Action {
        // Help overlay takes precedence
        if self.show_help {
            if matches!(key, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return Action::None;
        }

        if self.input_mode == InputMode::Search {
            match key {
                KeyCode::Esc | KeyCode::Enter => self.input_mode = InputMode::Normal,
                KeyCode::Backspace => {
                    self.filter.search.pop();
                }
                KeyCode::Char(c) => self.filter.search.push(c),
                _ => {}
            }
            self.selected_index = 0;
            return Action::None;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                Action::None
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                Action::None
            }
            KeyCode::Char('1') => Action::Navigate(Route::Dashboard),
            KeyCode::Char('2') => Action::Navigate(Route::Webinars),
            KeyCode::Char('3') => Action::Navigate(Route::Calendar),
            KeyCode::Char('4') => Action::Navigate(Route::Trainees),
            KeyCode::Char('5') => Action::Navigate(Route::Reports),
            KeyCode::Char('r') | KeyCode::Char('R') => Action::Refresh,
            KeyCode::Esc => match self.route {
                Route::WebinarDetail(_) => Action::Navigate(Route::Webinars),
                Route::Dashboard => Action::None,
                _ => Action::Navigate(Route::Dashboard),
            },
            _ => match self.route {
                Route::Calendar => {
                    self.handle_calendar_key(key);
                    Action::None
                }
                Route::Webinars => self.handle_list_key(key),
                _ => self.handle_selection_key(key),
            },
        }
    }

    fn handle_selection_key(&mut self, key: KeyCode) -> Action {
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_index = self.selected_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_index + 1 < self.row_count() {
                    self.selected_index += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(webinar) = self.selected_webinar() {
                    return Action::Navigate(Route::WebinarDetail(webinar.id.clone()));
                }
            }
            _ => {}
        }
        Action::None
    }

    fn handle_list_key(&mut self, key: KeyCode) -> Action {
        match key {
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Char('c') => self.cycle_category(),
            KeyCode::Char('s') => self.cycle_status(),
            KeyCode::Char('p') => {
                self.filter.match_presenter = !self.filter.match_presenter;
                self.selected_index = 0;
            }
            KeyCode::Char('x') => {
                self.filter.reset();
                self.selected_index = 0;
            }
            KeyCode::Char('d') => {
                if let Some(webinar) = self.selected_webinar() {
                    return Action::Delete(webinar.id.clone());
                }
            }
            _ => return self.handle_selection_key(key),
        }
        Action::None
    }

    fn handle_calendar_key(&mut self, key: KeyCode) {
        let date = self.calendar_date;
        self.calendar_date = match key {
            KeyCode::Left | KeyCode::Char('h') => previous_day(date),
            KeyCode::Right | KeyCode::Char('l') => next_day(date),
            KeyCode::Up | KeyCode::Char('k') => shift_weeks(date, -1),
            KeyCode::Down | KeyCode::Char('j') => shift_weeks(date, 1),
            KeyCode::Char('<') => shift_month(date, -1),
            KeyCode::Char('>') => shift_month(date, 1),
            KeyCode::Char('t') => Local::now().date_naive(),
            _ => date,
        };

        match key {
            KeyCode::Char('m') => self.calendar_view = CalendarView::Month,
            KeyCode::Char('d') => self.calendar_view = CalendarView::Day,
            _ => {}
        }
    }
}
