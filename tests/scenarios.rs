use approx::assert_relative_eq;
use chrono::NaiveDate;
use gantt_timeline::layout::{self, BarKind, ChartLayout};
use gantt_timeline::model::date_math::parse_date;
use gantt_timeline::model::{compute_ranges, fit_zoom, Event, Task, Timeline, ViewState, Viewport};
use gantt_timeline::render::{Layer, RecordingSurface, Renderer};
use gantt_timeline::{ChartConfig, ChartController, InputEvent};

fn d(s: &str) -> NaiveDate {
    parse_date(s).expect("valid test date")
}

fn layout_at_identity(timeline: &Timeline, today: NaiveDate) -> ChartLayout {
    let config = ChartConfig::default();
    let ranges = compute_ranges(timeline, today, &config);
    layout::compute(timeline, &ranges, ViewState::IDENTITY, today, &config)
}

#[test]
fn single_task_without_events() {
    let timeline = Timeline::new(
        vec![Task::new("t1", "Only", d("2024-01-01"), d("2024-01-05"))],
        Vec::new(),
    );
    let ranges = compute_ranges(&timeline, d("2024-01-03"), &ChartConfig::default());
    // Task week plus one spare week either side.
    assert_eq!(ranges.total.start, d("2023-12-25"));
    assert_eq!(ranges.total.end, d("2024-01-14"));

    let layout = layout_at_identity(&timeline, d("2024-01-03"));
    assert_eq!(layout.bars.len(), 1);
    assert_eq!(layout.bars[0].kind, BarKind::Plan);
    assert!(layout.dependencies.is_empty());
    assert!(layout.events.is_empty());

    let plot_width = ranges.total.days() as f32 * layout.metrics.day_width;
    assert!(!layout.grid.is_empty());
    assert!(layout.grid.iter().all(|l| l.x >= 0.0 && l.x <= plot_width));
    assert_relative_eq!(layout.grid[0].x, 0.0);

    let today = layout.today.expect("today lies inside the range");
    assert_relative_eq!(today.x, 9.0 * layout.metrics.day_width);
    assert_relative_eq!(layout.bars[0].bounds().min.x, 7.0 * layout.metrics.day_width);
}

#[test]
fn today_marker_is_absent_outside_the_total_range() {
    let timeline = Timeline::new(
        vec![Task::new("t1", "Only", d("2024-01-01"), d("2024-01-05"))],
        Vec::new(),
    );
    let layout = layout_at_identity(&timeline, d("2023-11-15"));
    assert!(layout.today.is_none());
}

#[test]
fn early_forecast_splits_at_the_forecast_day() {
    let timeline = Timeline::new(
        vec![Task::new("t1", "Early", d("2024-01-01"), d("2024-01-05"))
            .with_forecast_end(d("2024-01-03"))],
        Vec::new(),
    );
    let today = d("2024-01-02");
    let layout = layout_at_identity(&timeline, today);
    let origin = compute_ranges(&timeline, today, &ChartConfig::default()).total.start;
    assert_eq!(origin, d("2023-12-25"));

    // Offsets from the padded origin, end days inclusive.
    let day_width = layout.metrics.day_width;
    let bar = &layout.bars[0];
    match bar.kind {
        BarKind::FinishedEarly { split_x } => assert_relative_eq!(split_x, 10.0 * day_width),
        other => panic!("expected an early finish, got {other:?}"),
    }
    assert_eq!(bar.segments.len(), 2);
    assert_eq!(bar.segments[0].rect.max.x, bar.segments[1].rect.min.x);
    assert_relative_eq!(bar.segments[0].rect.min.x, 7.0 * day_width);
    assert_relative_eq!(bar.segments[1].rect.max.x, 12.0 * day_width);
}

#[test]
fn dependency_path_comes_and_goes_with_the_edge() {
    let first = Task::new("a", "First", d("2024-01-01"), d("2024-01-05"));
    let second = Task::new("b", "Second", d("2024-01-10"), d("2024-01-12"));
    let linked = Timeline::new(vec![first.clone(), second.clone().depends_on("a")], Vec::new());
    let unlinked = Timeline::new(vec![first, second], Vec::new());
    let today = d("2024-01-08");

    let with = layout_at_identity(&linked, today);
    assert_eq!(with.dependencies.len(), 1);
    let path = &with.dependencies[0];
    assert_eq!((path.from.as_str(), path.to.as_str()), ("a", "b"));
    let first_point = path.points.first().expect("non-empty path");
    let last_point = path.points.last().expect("non-empty path");
    assert_relative_eq!(first_point.x, with.bars[0].bounds().max.x);
    assert_relative_eq!(last_point.x, with.bars[1].bounds().min.x);

    let without = layout_at_identity(&unlinked, today);
    assert!(without.dependencies.is_empty());
    assert_eq!(
        ChartLayout {
            dependencies: Vec::new(),
            ..with
        },
        without
    );
}

#[test]
fn unknown_dependency_is_skipped() {
    let timeline = Timeline::new(
        vec![Task::new("a", "Lonely", d("2024-01-01"), d("2024-01-05")).depends_on("ghost")],
        Vec::new(),
    );
    let layout = layout_at_identity(&timeline, d("2024-01-02"));
    assert!(layout.dependencies.is_empty());
    assert_eq!(layout.bars.len(), 1);
}

#[test]
fn zero_viewport_fits_to_identity() {
    let view = fit_zoom(Viewport::new(0.0, 0.0), 42, 3, &ChartConfig::default());
    assert_eq!(view, ViewState::IDENTITY);
}

#[test]
fn controller_round_trip() {
    let timeline = Timeline::new(
        vec![
            Task::new("a", "Design", d("2024-01-01"), d("2024-01-05")),
            Task::new("b", "Build", d("2024-01-08"), d("2024-01-19"))
                .with_forecast_end(d("2024-01-24"))
                .depends_on("a"),
        ],
        vec![Event::new("Demo", d("2024-01-17"))],
    );
    let mut controller = ChartController::new(
        timeline,
        ChartConfig::default(),
        Viewport::new(0.0, 0.0),
        d("2024-01-10"),
    );
    controller.attach();

    let _ = controller.handle(InputEvent::Resize(Viewport::new(200.0, 300.0)));
    let fitted = controller.view();
    let outcome = controller.handle(InputEvent::Wheel {
        delta_y: -120.0,
        modifier: true,
    });
    assert!(outcome.prevent_default);
    assert!(controller.view().zoom_x > fitted.zoom_x);

    let mut surface = RecordingSurface::default();
    let drawn = controller.render(&Renderer::default(), &mut surface);
    assert_eq!(surface.layers(), Layer::ORDER.to_vec());
    assert_eq!(drawn.dependencies.len(), 1);
    assert_eq!(drawn.events.len(), 1);

    controller.detach();
    let before = controller.view();
    let _ = controller.handle(InputEvent::Wheel {
        delta_y: -120.0,
        modifier: true,
    });
    assert_eq!(controller.view(), before);
}
