use thiserror::Error;

pub type GanttResult<T> = Result<T, GanttError>;

#[derive(Debug, Error)]
pub enum GanttError {
    #[error("invalid date `{input}`: expected YYYY-MM-DD")]
    InvalidDateFormat { input: String },

    #[error("task `{task}` depends on unknown task `{dependency}`")]
    DanglingDependency { task: String, dependency: String },

    #[error("degenerate viewport: width={width}, height={height}")]
    DegenerateViewport { width: f32, height: f32 },

    #[error("invalid color `{0}`: expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),

    #[error("failed to read timeline: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed timeline document: {0}")]
    Json(#[from] serde_json::Error),
}
