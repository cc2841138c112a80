pub mod color;
pub mod date_math;
pub mod task;
pub mod view;

pub use task::{Event, ForecastStatus, Task, Timeline};
pub use view::{compute_ranges, fit_zoom, DateRange, DateRanges, Metrics, ViewState, Viewport};
