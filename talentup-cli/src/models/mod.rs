pub mod dashboard;
pub mod filter;
pub mod trainee;
pub mod webinar;

pub use dashboard::{
    ChartPoint, ReportData, ReportSummary, StatCard, StatChange, TopWebinar, UpcomingWebinar,
};
pub use filter::{categories, CategorySelector, TraineeFilter, WebinarFilter};
pub use trainee::{
    AttendedWebinar, Certification, Education, Experience, ProgressTier, Trainee, TraineeStatus,
};
pub use webinar::{format_duration, format_playback_time, parse_duration, Webinar, WebinarStatus};
