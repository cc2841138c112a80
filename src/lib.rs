//! Gantt timeline layout and rendering.
//!
//! Tasks and events are laid out on a date axis ([`layout`]), drawn through
//! the [`render::Surface`] trait, and kept interactive by
//! [`interaction::ChartController`]. The [`ui`] module hosts the chart in egui.

pub mod config;
pub mod error;
pub mod interaction;
pub mod io;
pub mod layout;
pub mod model;
pub mod render;
pub mod telemetry;
pub mod ui;

pub use config::ChartConfig;
pub use error::{GanttError, GanttResult};
pub use interaction::{ChartController, InputEvent, Outcome, Tooltip, TooltipContent};
pub use layout::ChartLayout;
pub use model::{Event, ForecastStatus, Task, Timeline, ViewState, Viewport};
pub use render::{Renderer, Surface};
