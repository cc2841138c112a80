use std::path::Path;

use tracing::{info, warn};

use crate::error::GanttResult;
use crate::model::Timeline;

/// Load a timeline from a JSON file of the form
/// `{"tasks": [...], "events": [...]}`.
pub fn load_timeline(path: &Path) -> GanttResult<Timeline> {
    let json = std::fs::read_to_string(path)?;
    let timeline = parse_timeline(&json)?;
    info!(
        path = %path.display(),
        tasks = timeline.tasks.len(),
        events = timeline.events.len(),
        "timeline loaded"
    );
    Ok(timeline)
}

/// Parse a timeline document. Unparseable dates reject the document;
/// dangling dependencies are only logged, since the chart skips them.
pub fn parse_timeline(json: &str) -> GanttResult<Timeline> {
    let timeline: Timeline = serde_json::from_str(json)?;
    for dangling in timeline.dangling_dependencies() {
        warn!("{dangling}");
    }
    Ok(timeline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GanttError;

    #[test]
    fn tasks_and_events_are_optional() {
        let timeline = parse_timeline("{}").unwrap();
        assert!(timeline.tasks.is_empty());
        assert!(timeline.events.is_empty());
    }

    #[test]
    fn dangling_dependency_does_not_reject() {
        let json = r#"{"tasks": [
            {"id": "a", "name": "A", "start": "2024-01-01", "end": "2024-01-02", "dependencies": ["zz"]}
        ]}"#;
        let timeline = parse_timeline(json).unwrap();
        assert_eq!(timeline.tasks[0].dependencies, vec!["zz".to_string()]);
    }

    #[test]
    fn bad_date_rejects_the_document() {
        let json = r#"{"events": [{"name": "Launch", "date": "soon"}]}"#;
        let err = parse_timeline(json).unwrap_err();
        assert!(matches!(err, GanttError::Json(_)));
        assert!(err.to_string().contains("invalid date `soon`"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("gantt-timeline-missing/timeline.json");
        assert!(matches!(load_timeline(&path), Err(GanttError::Io(_))));
    }
}
