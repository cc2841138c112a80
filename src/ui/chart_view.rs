use chrono::NaiveDate;
use egui::{Id, Order, RichText, ScrollArea, Sense, Ui, Vec2};

use super::theme;
use super::EguiSurface;
use crate::config::ChartConfig;
use crate::interaction::{format_day, ChartController, InputEvent, TooltipContent};
use crate::model::{Timeline, Viewport};
use crate::render::Renderer;

/// egui host for a [`ChartController`]: forwards wheel, resize and pointer
/// input, then paints the layout inside a two-way scroll area.
pub struct ChartView {
    controller: ChartController,
    renderer: Renderer,
    last_size: Option<Vec2>,
    applied_generation: Option<u64>,
    hovering: bool,
}

impl ChartView {
    pub fn new(timeline: Timeline, config: ChartConfig, today: NaiveDate) -> Self {
        let mut controller = ChartController::new(timeline, config, Viewport::default(), today);
        controller.attach();
        Self {
            controller,
            renderer: Renderer::default(),
            last_size: None,
            applied_generation: None,
            hovering: false,
        }
    }

    pub fn controller(&self) -> &ChartController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ChartController {
        &mut self.controller
    }

    pub fn show(&mut self, ui: &mut Ui) {
        let available = ui.available_size();
        if self.last_size != Some(available) {
            self.last_size = Some(available);
            let _ = self
                .controller
                .handle(InputEvent::Resize(Viewport::new(available.x, available.y)));
        }

        if ui.rect_contains_pointer(ui.max_rect()) {
            self.forward_wheel(ui);
        }

        let layout = self.controller.layout();
        let mut scroll = ScrollArea::both().auto_shrink([false, false]);
        let generation = self.controller.generation();
        if self.applied_generation != Some(generation) {
            self.applied_generation = Some(generation);
            scroll = scroll.horizontal_scroll_offset(layout.scroll_x);
        }

        scroll.show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(layout.size, Sense::hover());
            let mut surface = EguiSurface::new(&painter, response.rect);
            self.renderer.draw(&layout, &mut surface);

            match response.hover_pos() {
                Some(pointer) => {
                    self.hovering = true;
                    let _ = self.controller.handle(InputEvent::PointerMove {
                        pos: (pointer - response.rect.min).to_pos2(),
                        screen_pos: pointer,
                    });
                }
                None if self.hovering => {
                    self.hovering = false;
                    let _ = self.controller.handle(InputEvent::PointerLeave);
                }
                None => {}
            }
        });

        self.show_tooltip(ui);
    }

    /// Feed ctrl/cmd wheel notches to the controller and swallow the scroll
    /// when it zooms.
    fn forward_wheel(&mut self, ui: &Ui) {
        let notches: Vec<(f32, bool)> = ui.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::MouseWheel {
                        delta, modifiers, ..
                    } => Some((-delta.y, modifiers.command || modifiers.ctrl)),
                    _ => None,
                })
                .collect()
        });
        for (delta_y, modifier) in notches {
            let outcome = self.controller.handle(InputEvent::Wheel { delta_y, modifier });
            if outcome.prevent_default {
                ui.ctx().input_mut(|i| {
                    i.smooth_scroll_delta = Vec2::ZERO;
                    i.raw_scroll_delta = Vec2::ZERO;
                });
            }
        }
    }

    fn show_tooltip(&self, ui: &Ui) {
        let tooltip = self.controller.tooltip();
        let Some(content) = &tooltip.content else {
            return;
        };
        egui::Area::new(Id::new("gantt_tooltip"))
            .order(Order::Tooltip)
            .fixed_pos(tooltip.position)
            .interactable(false)
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| match content {
                    TooltipContent::Task {
                        name,
                        start,
                        planned_end,
                        forecast,
                    } => {
                        ui.label(RichText::new(name).strong());
                        ui.label(format!("Start: {}", format_day(*start)));
                        ui.label(format!("Planned end: {}", format_day(*planned_end)));
                        if let Some((end, status)) = forecast {
                            ui.separator();
                            ui.label(
                                RichText::new(format!(
                                    "Forecast end: {} ({})",
                                    format_day(*end),
                                    status.label()
                                ))
                                .italics()
                                .color(theme::TEXT_SECONDARY),
                            );
                        }
                    }
                    TooltipContent::Event { name } => {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new("Event:").strong());
                            ui.label(name);
                        });
                    }
                });
            });
    }
}

impl Drop for ChartView {
    fn drop(&mut self) {
        self.controller.detach();
    }
}
