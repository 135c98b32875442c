use eframe::egui::{self, Align, Layout, RichText, ScrollArea, TextEdit, TopBottomPanel};

use tl_core::gesture::GesturePhase;

use crate::actions::{dispatch, AppAction};
use crate::state::AppState;
use crate::theme;

pub fn launch() -> eframe::Result<()> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "touchlist",
        options,
        Box::new(|cc| {
            theme::apply_theme(&cc.egui_ctx);
            Box::new(TouchlistApp::default())
        }),
    )
}

struct FeedRow {
    id: u64,
    title: String,
    unread: bool,
}

pub struct TouchlistApp {
    state: AppState,
    pointer_down: bool,
}

impl Default for TouchlistApp {
    fn default() -> Self {
        Self {
            state: AppState::demo(),
            pointer_down: false,
        }
    }
}

impl TouchlistApp {
    fn run_action(&mut self, action: AppAction) {
        if let Err(err) = dispatch(&mut self.state, action) {
            self.state.status = err;
        }
    }

    /// Translate egui input into the gesture vocabulary. Real touches map
    /// directly; the primary pointer is treated as a touch so the gesture
    /// also works with a mouse.
    fn route_input(&mut self, ctx: &egui::Context) {
        let events = ctx.input(|i| i.events.clone());
        for event in events {
            match event {
                egui::Event::Touch { phase, pos, .. } => {
                    let action = match phase {
                        egui::TouchPhase::Start => AppAction::TouchStart(pos.y),
                        egui::TouchPhase::Move => AppAction::TouchMove(pos.y),
                        egui::TouchPhase::End => AppAction::TouchEnd,
                        egui::TouchPhase::Cancel => AppAction::TouchCancel,
                    };
                    self.run_action(action);
                }
                egui::Event::PointerButton {
                    button: egui::PointerButton::Primary,
                    pressed,
                    pos,
                    ..
                } => {
                    if pressed {
                        self.pointer_down = true;
                        self.run_action(AppAction::TouchStart(pos.y));
                    } else {
                        self.pointer_down = false;
                        self.run_action(AppAction::TouchEnd);
                    }
                }
                egui::Event::PointerMoved(pos) if self.pointer_down => {
                    self.run_action(AppAction::TouchMove(pos.y));
                }
                _ => {}
            }
        }
    }

    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Search");
            let mut query = self.state.pane.query().to_string();
            if ui
                .add(TextEdit::singleline(&mut query).desired_width(220.0))
                .changed()
            {
                self.run_action(AppAction::SetQuery(query));
            }
            if ui.button("Mark all read").clicked() {
                self.run_action(AppAction::MarkAllRead);
            }
            let counts = self.state.counts();
            ui.label(format!("{} unread of {}", counts.unread, counts.total));
        });

        ui.horizontal(|ui| {
            let mut threshold = self.state.refresh.threshold();
            if ui
                .add(
                    egui::DragValue::new(&mut threshold)
                        .clamp_range(20.0..=240.0)
                        .prefix("threshold "),
                )
                .changed()
            {
                self.run_action(AppAction::SetThreshold(threshold));
            }
            let mut item_height = self.state.item_height;
            if ui
                .add(
                    egui::DragValue::new(&mut item_height)
                        .clamp_range(24.0..=96.0)
                        .prefix("row "),
                )
                .changed()
            {
                self.run_action(AppAction::SetItemHeight(item_height));
            }
            let mut overscan = self.state.overscan;
            if ui
                .add(
                    egui::DragValue::new(&mut overscan)
                        .clamp_range(0..=32)
                        .prefix("overscan "),
                )
                .changed()
            {
                self.run_action(AppAction::SetOverscan(overscan));
            }
            if ui.button("Save prefs").clicked() {
                self.run_action(AppAction::PersistPrefs);
            }
            if ui.button("Reset").clicked() {
                self.run_action(AppAction::ResetPrefs);
            }
        });
    }

    fn draw_feed(&mut self, ui: &mut egui::Ui) {
        let pull = self.state.refresh.pull_distance();
        let refreshing = self.state.refresh.is_refreshing();
        let threshold = self.state.refresh.threshold();

        if refreshing {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new());
                ui.label("Refreshing…");
            });
        } else if pull > 0.0 {
            let hint = if pull >= threshold {
                "Release to refresh"
            } else {
                "Pull to refresh"
            };
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(hint).small());
            });
            // The feed tracks the damped pull, like the indicator.
            ui.add_space(pull);
        }

        let viewport_height = ui.available_height();
        self.run_action(AppAction::Layout(viewport_height));
        let window = self.state.window;
        let item_height = self.state.item_height;
        let scroll_lock = self.state.scroll_lock;
        let selected_id = self.state.pane.selected_id();

        let rows: Vec<FeedRow> = (window.start..window.end)
            .filter_map(|idx| {
                self.state.filtered_notice(idx).map(|notice| FeedRow {
                    id: notice.id,
                    title: notice.title.clone(),
                    unread: notice.unread,
                })
            })
            .collect();

        let mut clicked = None;
        let output = ScrollArea::vertical()
            .auto_shrink([false, false])
            .enable_scrolling(!scroll_lock)
            .show(ui, |ui| {
                // Row geometry must match the window math exactly.
                ui.spacing_mut().item_spacing.y = 0.0;
                ui.add_space(window.offset_y);
                let width = ui.available_width();
                for row in &rows {
                    let marker = if row.unread { "•" } else { " " };
                    let label = egui::SelectableLabel::new(
                        selected_id == Some(row.id),
                        format!("{marker} {}", row.title),
                    );
                    if ui.add_sized([width, item_height], label).clicked() {
                        clicked = Some(row.id);
                    }
                }
                let tail = (window.total_height
                    - window.offset_y
                    - rows.len() as f32 * item_height)
                    .max(0.0);
                ui.add_space(tail);
            });

        self.run_action(AppAction::SetScrollTop(output.state.offset.y));
        if let Some(id) = clicked {
            self.run_action(AppAction::Select(id));
            self.run_action(AppAction::MarkRead(id));
        }
    }

    fn draw_detail(&mut self, ui: &mut egui::Ui) {
        ui.heading("Notice");
        ui.separator();
        let Some(notice) = self.state.pane.selected().cloned() else {
            ui.label("Select a notice from the feed.");
            return;
        };
        ui.label(RichText::new(&notice.title).strong());
        ui.label(&notice.body);
        if notice.unread && ui.button("Mark read").clicked() {
            self.run_action(AppAction::MarkRead(notice.id));
        }
    }

    fn draw_status(&mut self, ui: &mut egui::Ui) {
        let counts = self.state.counts();
        ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
            let phase = match self.state.refresh.phase() {
                GesturePhase::Idle => "idle",
                GesturePhase::Dragging => "dragging",
                GesturePhase::Refreshing => "refreshing",
            };
            ui.label(format!("gesture: {phase}"));
            ui.label(format!("refreshes: {}", self.state.refreshes_completed));
            ui.label(format!("{} unread of {}", counts.unread, counts.total));
            if !self.state.status.is_empty() {
                ui.label(RichText::new(&self.state.status).small());
            }
            if !self.state.prefs_error.is_empty() {
                ui.colored_label(egui::Color32::RED, &self.state.prefs_error);
            }
        });
    }
}

impl eframe::App for TouchlistApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.run_action(AppAction::PollRefresh);
        self.route_input(ctx);

        TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });
        TopBottomPanel::bottom("status").show(ctx, |ui| {
            self.draw_status(ui);
        });
        egui::SidePanel::right("detail")
            .default_width(260.0)
            .show(ctx, |ui| {
                self.draw_detail(ui);
            });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_feed(ui);
        });

        // Keep polling while a gesture or refresh is in flight.
        if self.state.refresh.is_refreshing() || self.state.refresh.pull_distance() > 0.0 {
            ctx.request_repaint();
        }
    }
}
