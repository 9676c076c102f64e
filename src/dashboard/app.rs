//! Dashboard application entry point

use eframe::egui;
use egui::RichText;
use egui_extras::{Size, StripBuilder};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, warn};

use crate::dashboard::state::DemoState;
use crate::dashboard::theme::{self, ThemeColors};
use crate::dashboard::views::{
    load_texture, render_examples, render_input_panel, render_output_panel, InputAction,
};
use crate::interface::InterfaceSpec;
use crate::shared::{RuntimeState, SamplesStatus, WorkerEvent};
use crate::worker::InferenceWorker;

/// The demo page
pub struct DemoApp {
    /// Worker-owned status
    runtime: Arc<RwLock<RuntimeState>>,
    /// Form and result state
    state: DemoState,
    /// What the page shows
    spec: InterfaceSpec,
    /// Background recognition
    worker: InferenceWorker,
    /// Whether theme has been applied
    theme_applied: bool,
}

impl DemoApp {
    pub fn new(runtime: Arc<RwLock<RuntimeState>>, spec: InterfaceSpec, worker: InferenceWorker) -> Self {
        Self {
            runtime,
            state: DemoState::new(spec.default_languages()),
            spec,
            worker,
            theme_applied: false,
        }
    }

    /// Create eframe options for the demo window
    pub fn options() -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1280.0, 860.0])
                .with_min_inner_size([900.0, 600.0])
                .with_drag_and_drop(true)
                .with_title("EasyOCR Demo"),
            ..Default::default()
        }
    }

    /// Validate the form and hand the request to the worker
    fn submit(&mut self) {
        match self.state.build_request() {
            Ok(request) => {
                info!("Submitting request {} ({}) for {:?}", request.id, request.languages, request.image);
                self.state.last_error = None;
                self.worker.submit(request);
            }
            Err(message) => self.state.last_error = Some(message),
        }
    }

    /// Drain finished work from the worker
    fn poll_worker(&mut self, ctx: &egui::Context) {
        while let Some(event) = self.worker.try_recv() {
            match event {
                WorkerEvent::SamplesPrepared(Ok(report)) => {
                    if !report.fetched.is_empty() {
                        info!("Downloaded {} sample image(s)", report.fetched.len());
                    }
                }
                WorkerEvent::SamplesPrepared(Err(message)) => {
                    // The output column shows it from the runtime state
                    warn!("Sample images unavailable: {}", message);
                }
                WorkerEvent::Completed { id, result, preview, elapsed_ms } => {
                    // A newer request superseded this one
                    if !self.state.is_current(id) {
                        continue;
                    }
                    self.state.pending_request = None;
                    self.state.last_processing_time_ms = elapsed_ms;
                    self.state.output_texture = preview.map(|img| load_texture(ctx, "output_preview", &img));
                    self.state.results = Some(result.table);
                    self.state.last_error = None;
                }
                WorkerEvent::Failed { id, message, elapsed_ms } => {
                    if !self.state.is_current(id) {
                        continue;
                    }
                    self.state.pending_request = None;
                    self.state.last_processing_time_ms = elapsed_ms;
                    self.state.output_texture = None;
                    self.state.results = None;
                    self.state.last_error = Some(message);
                }
            }
        }
    }

    /// Fail the pending request if the worker thread died
    fn check_worker_status(&mut self) {
        if self.state.is_processing() && !self.worker.is_running() {
            warn!("Inference worker stopped unexpectedly");
            self.state.pending_request = None;
            self.state.last_error = Some("Inference worker stopped unexpectedly".to_string());
        }
    }

    /// Take the first dropped file as the input image
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(path) = dropped.into_iter().find_map(|file| file.path) {
            self.state.set_image(&path);
        }
    }

    fn render_header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::none().fill(ThemeColors::BG_MEDIUM).inner_margin(16.0))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(RichText::new(self.spec.title).size(28.0).strong());
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new(self.spec.description)
                            .size(14.0)
                            .color(ThemeColors::TEXT_SECONDARY)
                    );
                });
            });
    }

    fn render_footer(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("footer")
            .frame(egui::Frame::none().fill(ThemeColors::BG_MEDIUM).inner_margin(12.0))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new(self.spec.article)
                            .size(13.0)
                            .color(ThemeColors::TEXT_SECONDARY)
                    );
                    ui.horizontal(|ui| {
                        for (label, url) in self.spec.article_links {
                            ui.hyperlink_to(*label, *url);
                        }
                    });
                });
            });
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme once
        if !self.theme_applied {
            theme::apply_theme(ctx);
            self.theme_applied = true;
        }

        self.poll_worker(ctx);
        self.check_worker_status();
        self.handle_dropped_files(ctx);

        if self.state.submit_requested {
            self.state.submit_requested = false;
            self.submit();
        }

        // Keep polling while work is outstanding
        let runtime = self.runtime.read().clone();
        if self.state.is_processing() || runtime.samples == SamplesStatus::Pending {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        self.render_header(ctx);
        self.render_footer(ctx);

        let mut action = InputAction::None;
        let mut example_clicked = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().auto_shrink(false).show(ui, |ui| {
                egui::Frame::none().inner_margin(16.0).show(ui, |ui| {
                    let column_height = self.spec.preview_height + 360.0;
                    StripBuilder::new(ui)
                        .size(Size::exact(column_height))
                        .vertical(|mut strip| {
                            strip.strip(|builder| {
                                builder
                                    .size(Size::remainder())
                                    .size(Size::exact(24.0))
                                    .size(Size::remainder())
                                    .horizontal(|mut strip| {
                                        strip.cell(|ui| {
                                            action = render_input_panel(ui, &mut self.state, &self.spec);
                                        });
                                        strip.empty();
                                        strip.cell(|ui| {
                                            render_output_panel(ui, &self.state, &runtime, &self.spec);
                                        });
                                    });
                            });
                        });

                    ui.add_space(16.0);
                    ui.separator();
                    ui.add_space(8.0);

                    example_clicked = render_examples(ui, &self.spec.examples, !self.state.is_processing());
                });
            });
        });

        match action {
            InputAction::Submit => self.submit(),
            InputAction::Clear => self.state.clear(),
            InputAction::None => {}
        }

        if let Some(index) = example_clicked {
            if let Some(example) = self.spec.examples.get(index) {
                self.state.apply_example(example);
            }
        }
    }
}

/// Run the demo window until it is closed
pub fn run_dashboard(
    runtime: Arc<RwLock<RuntimeState>>,
    spec: InterfaceSpec,
    worker: InferenceWorker,
) -> Result<(), eframe::Error> {
    let app = DemoApp::new(runtime, spec, worker);
    eframe::run_native(
        "EasyOCR Demo",
        DemoApp::options(),
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
