pub mod calendar;
pub mod form;
pub mod reports;
pub mod seed;

pub use calendar::{Calendar, CalendarView, GridDay, MonthGrid};
pub use form::{Attachment, FormError, WebinarDraft};
pub use reports::{Bar, ReportTab, Slice};
