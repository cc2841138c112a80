pub mod chart_view;
pub mod surface;
pub mod theme;
pub mod toolbar;

pub use chart_view::ChartView;
pub use surface::EguiSurface;
