use egui::{pos2, Pos2};
use tracing::trace;

use super::Scale;
use crate::config::ChartConfig;
use crate::model::{Task, Timeline};

/// A routed connector from a predecessor's end to a successor's start.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyPath {
    pub from: String,
    pub to: String,
    /// Polyline vertices; the arrowhead sits on the last point.
    pub points: Vec<Pos2>,
}

/// Route one connector.
///
/// The path leaves the source bar's right edge and runs right by half the
/// padding. If the target starts left of that exit point, it drops into a
/// channel half a row towards the target, runs back to just before the
/// target, and descends to the target row. Horizontal runs only ever go left
/// inside that channel.
pub fn dependency_path(
    source: &Task,
    target: &Task,
    source_row: usize,
    target_row: usize,
    scale: &Scale,
    config: &ChartConfig,
) -> DependencyPath {
    let start_x = scale.x_after(source.end);
    let start_y = scale.row_center(source_row);
    let end_x = scale.x(target.start);
    let end_y = scale.row_center(target_row);
    let exit_x = start_x + config.padding / 2.0;

    let mut points = vec![pos2(start_x, start_y), pos2(exit_x, start_y)];
    if end_x < exit_x {
        let half_row = scale.metrics.row_height / 2.0;
        let channel_y = if end_y > start_y {
            start_y + half_row
        } else {
            start_y - half_row
        };
        let approach_x = end_x - config.padding / 2.0;
        points.extend([
            pos2(exit_x, channel_y),
            pos2(approach_x, channel_y),
            pos2(approach_x, end_y),
        ]);
    }
    points.push(pos2(end_x, end_y));

    DependencyPath {
        from: source.id.clone(),
        to: target.id.clone(),
        points,
    }
}

/// Connectors for every dependency edge, in task order.
/// Edges naming an unknown task are skipped.
pub fn dependency_paths(timeline: &Timeline, scale: &Scale, config: &ChartConfig) -> Vec<DependencyPath> {
    let rows = timeline.row_index();
    let mut paths = Vec::new();
    for (target_row, target) in timeline.tasks.iter().enumerate() {
        for dep in &target.dependencies {
            let Some(&source_row) = rows.get(dep.as_str()) else {
                trace!(task = %target.id, dependency = %dep, "skipping dangling dependency");
                continue;
            };
            let source = &timeline.tasks[source_row];
            paths.push(dependency_path(source, target, source_row, target_row, scale, config));
        }
    }
    paths
}
