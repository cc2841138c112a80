//! Input handling for the chart.
//!
//! [`ChartController`] owns the authoritative [`ViewState`] and date ranges.
//! Host input arrives as [`InputEvent`]s; each one either replaces the view
//! state (zoom, resize) or updates the tooltip (pointer). Rendering reads the
//! controller's state through [`ChartController::layout`] and never mutates it.

mod tooltip;

pub use tooltip::{format_day, Tooltip, TooltipContent};

use chrono::NaiveDate;
use egui::{vec2, Pos2, Vec2};
use tracing::{debug, trace};

use crate::config::ChartConfig;
use crate::layout::{self, ChartLayout};
use crate::model::{compute_ranges, fit_zoom, DateRanges, Timeline, ViewState, Viewport};
use crate::render::{Renderer, Surface};

/// Host input, already stripped of platform details.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Wheel notch. `delta_y > 0` scrolls down (zooms out when `modifier`
    /// is held).
    Wheel { delta_y: f32, modifier: bool },
    /// The scrollable area changed size.
    Resize(Viewport),
    /// Pointer position in drawing space plus its screen position.
    PointerMove { pos: Pos2, screen_pos: Pos2 },
    PointerLeave,
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::Wheel { .. } => EventKind::Wheel,
            InputEvent::Resize(_) => EventKind::Resize,
            InputEvent::PointerMove { .. } => EventKind::PointerMove,
            InputEvent::PointerLeave => EventKind::PointerLeave,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Wheel,
    Resize,
    PointerMove,
    PointerLeave,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::Wheel,
        EventKind::Resize,
        EventKind::PointerMove,
        EventKind::PointerLeave,
    ];
}

/// What the host should do after an event.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    /// Suppress the host's default handling (e.g. scrolling).
    pub prevent_default: bool,
    /// The view changed; run a full render pass.
    pub redraw: bool,
}

impl Outcome {
    pub const IGNORED: Self = Self {
        prevent_default: false,
        redraw: false,
    };
    const REDRAW: Self = Self {
        prevent_default: false,
        redraw: true,
    };
}

/// The element under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget<'a> {
    Task(&'a str),
    Event(&'a str),
}

/// Resolve a chart-space position. Event hitboxes are drawn above the bars,
/// so they win; within a layer the last-drawn element wins.
pub fn hit_test(layout: &ChartLayout, chart_pos: Pos2) -> Option<HitTarget<'_>> {
    if let Some(event) = layout
        .events
        .iter()
        .rev()
        .find(|e| e.hitbox.contains(chart_pos))
    {
        return Some(HitTarget::Event(&event.label));
    }
    layout
        .bars
        .iter()
        .rev()
        .find(|bar| bar.segments.iter().any(|s| s.rect.contains(chart_pos)))
        .map(|bar| HitTarget::Task(&bar.task_id))
}

#[derive(Debug)]
pub struct ChartController {
    timeline: Timeline,
    config: ChartConfig,
    ranges: DateRanges,
    view: ViewState,
    viewport: Viewport,
    today: NaiveDate,
    tooltip: Tooltip,
    subscriptions: Vec<EventKind>,
    generation: u64,
}

impl ChartController {
    /// Compute the date ranges and fit the zoom to `viewport`.
    /// The controller starts detached; call [`attach`](Self::attach) to
    /// start receiving input.
    pub fn new(timeline: Timeline, config: ChartConfig, viewport: Viewport, today: NaiveDate) -> Self {
        let ranges = compute_ranges(&timeline, today, &config);
        let view = fit_zoom(viewport, ranges.viewing.days(), timeline.tasks.len(), &config);
        debug!(
            tasks = timeline.tasks.len(),
            events = timeline.events.len(),
            zoom_x = view.zoom_x,
            zoom_y = view.zoom_y,
            "chart created"
        );
        Self {
            timeline,
            config,
            ranges,
            view,
            viewport,
            today,
            tooltip: Tooltip::default(),
            subscriptions: Vec::new(),
            generation: 0,
        }
    }

    /// Subscribe to every input kind.
    pub fn attach(&mut self) {
        self.subscriptions = EventKind::ALL.to_vec();
        trace!("chart input attached");
    }

    /// Release all subscriptions. Later events are ignored and the tooltip
    /// is hidden.
    pub fn detach(&mut self) {
        self.subscriptions.clear();
        self.tooltip.hide();
        trace!("chart input detached");
    }

    pub fn is_attached(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    pub fn handle(&mut self, event: InputEvent) -> Outcome {
        if !self.subscriptions.contains(&event.kind()) {
            return Outcome::IGNORED;
        }
        match event {
            InputEvent::Wheel { modifier: false, .. } => Outcome::IGNORED,
            InputEvent::Wheel {
                delta_y,
                modifier: true,
            } => self.zoom(delta_y),
            InputEvent::Resize(viewport) => {
                self.viewport = viewport;
                debug!(width = viewport.width, height = viewport.height, "viewport resized");
                self.refit()
            }
            InputEvent::PointerMove { pos, screen_pos } => {
                self.hover(pos, screen_pos);
                Outcome::IGNORED
            }
            InputEvent::PointerLeave => {
                self.tooltip.hide();
                Outcome::IGNORED
            }
        }
    }

    /// Re-fit the zoom to the current viewport.
    pub fn refit(&mut self) -> Outcome {
        self.view = fit_zoom(
            self.viewport,
            self.ranges.viewing.days(),
            self.timeline.tasks.len(),
            &self.config,
        );
        self.generation += 1;
        Outcome::REDRAW
    }

    fn zoom(&mut self, delta_y: f32) -> Outcome {
        let step = if delta_y > 0.0 {
            -self.config.zoom_step
        } else if delta_y < 0.0 {
            self.config.zoom_step
        } else {
            return Outcome {
                prevent_default: true,
                redraw: false,
            };
        };
        self.view = self.view.zoomed_by(step, &self.config);
        self.generation += 1;
        debug!(zoom_x = self.view.zoom_x, zoom_y = self.view.zoom_y, "zoom changed");
        Outcome {
            prevent_default: true,
            redraw: true,
        }
    }

    fn hover(&mut self, pos: Pos2, screen_pos: Pos2) {
        let layout = self.layout();
        let chart_pos = pos - layout.offset;
        let content = match hit_test(&layout, chart_pos) {
            Some(HitTarget::Task(id)) => self.timeline.task(id).map(TooltipContent::for_task),
            Some(HitTarget::Event(name)) => Some(TooltipContent::for_event(name)),
            None => None,
        };
        self.tooltip = Tooltip {
            content,
            position: screen_pos + vec2(self.config.tooltip_offset, 0.0),
        };
    }

    /// Geometry for the current state.
    pub fn layout(&self) -> ChartLayout {
        layout::compute(&self.timeline, &self.ranges, self.view, self.today, &self.config)
    }

    /// Full render pass onto `surface`. Returns the layout that was drawn.
    pub fn render<S: Surface + ?Sized>(&self, renderer: &Renderer, surface: &mut S) -> ChartLayout {
        let layout = self.layout();
        renderer.draw(&layout, surface);
        layout
    }

    /// Bumped by every zoom or fit change; hosts compare it to know when to
    /// reapply the scroll position.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn ranges(&self) -> DateRanges {
        self.ranges
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Move the "today" marker. The date ranges stay as computed at creation.
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    /// Zoom level relative to identity, for status displays.
    pub fn zoom_percent(&self) -> f32 {
        self.view.zoom_x * 100.0
    }

    /// Offset of the padding around the plot, as a vector.
    pub fn plot_offset(&self) -> Vec2 {
        Vec2::splat(self.config.padding)
    }
}
