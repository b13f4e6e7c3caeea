use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Color32, Context, Vec2};
use tracing::{debug, error, info, warn};

use pathview::canvas::{Scene, apply_commands};
use pathview::path::DistanceWindow;
use pathview::render::{
    RequestSequencer, RequestToken, WindowPlan, WindowRequest, check_window, plan_checked_window,
};
use pathview::source::{JsonDataset, NodeSource, PathContext};

mod graph;
mod render_utils;
mod ui;

/// Startup choices carried from the command line into the first view.
#[derive(Clone, Debug)]
pub struct InitialView {
    pub path_ctx_id: Option<i32>,
    pub from_dist: i64,
    pub to_dist: i64,
    pub rotating: bool,
}

pub struct PathViewApp {
    data_path: PathBuf,
    initial: InitialView,
    state: AppState,
}

struct LoadedDataset {
    source: Arc<dyn NodeSource>,
    context_ids: Vec<i32>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<LoadedDataset, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    source: Arc<dyn NodeSource>,
    context_ids: Vec<i32>,
    context_search: String,
    context: Option<PathContext>,
    from_dist: i64,
    to_dist: i64,
    status: Option<StatusMessage>,
    scene: Scene,
    sequencer: RequestSequencer,
    pending: Vec<PendingRender>,
    last_render: Option<RenderSummary>,
    main_point_color: Color32,
    rotating: bool,
    yaw: f32,
    pitch: f32,
    zoom: f32,
    pan: Vec2,
    view_scratch: ViewScratch,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
}

enum StatusMessage {
    Error(String),
    Info(String),
}

struct PendingRender {
    token: RequestToken,
    request: WindowRequest,
    rx: Receiver<Result<WindowPlan, String>>,
}

#[derive(Clone, Copy)]
struct RenderSummary {
    request: WindowRequest,
    node_count: usize,
    root_count: usize,
    edge_count: usize,
}

struct ViewScratch {
    projected: Vec<render_utils::ProjectedPrimitive>,
}

impl PathViewApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, data_path: PathBuf, initial: InitialView) -> Self {
        let state = Self::start_load(data_path.clone());
        Self {
            data_path,
            initial,
            state,
        }
    }

    fn spawn_load(data_path: PathBuf) -> Receiver<Result<LoadedDataset, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = JsonDataset::load(&data_path)
                .and_then(|dataset| {
                    let context_ids = dataset.path_context_ids()?;
                    Ok(LoadedDataset {
                        source: Arc::new(dataset) as Arc<dyn NodeSource>,
                        context_ids,
                    })
                })
                .map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(data_path: PathBuf) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(data_path),
        }
    }
}

impl eframe::App for PathViewApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(loaded)) => {
                        transition = Some(AppState::Ready(Box::new(ViewModel::new(
                            loaded,
                            &self.initial,
                        ))));
                    }
                    Ok(Err(message)) => {
                        error!(%message, "failed to load path dataset");
                        transition = Some(AppState::Error(message));
                    }
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition =
                            Some(AppState::Error("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading path dataset...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load path dataset");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.data_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                model.show(ctx, &self.data_path);
            }
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}

impl ViewModel {
    fn new(loaded: LoadedDataset, initial: &InitialView) -> Self {
        let mut model = Self {
            source: loaded.source,
            context_ids: loaded.context_ids,
            context_search: String::new(),
            context: None,
            from_dist: initial.from_dist,
            to_dist: initial.to_dist,
            status: None,
            scene: Scene::new(),
            sequencer: RequestSequencer::default(),
            pending: Vec::new(),
            last_render: None,
            main_point_color: render_utils::DEFAULT_MAIN_POINT_COLOR,
            rotating: initial.rotating,
            yaw: 0.0,
            pitch: 0.55,
            zoom: 0.6,
            pan: Vec2::ZERO,
            view_scratch: ViewScratch {
                projected: Vec::new(),
            },
            fps_current: 0.0,
            fps_samples: VecDeque::new(),
        };

        let first = initial
            .path_ctx_id
            .or_else(|| model.context_ids.first().copied());
        if let Some(path_ctx_id) = first {
            model.select_context(path_ctx_id);
            if initial.path_ctx_id.is_some() {
                model.request_render();
            }
        }

        model
    }

    fn select_context(&mut self, path_ctx_id: i32) {
        match self.source.path_context(path_ctx_id) {
            Ok(context) => {
                debug!(path_ctx_id, max_dist = context.max_dist, "selected path context");
                self.context = Some(context);
                self.status = None;
            }
            Err(error) => {
                warn!(path_ctx_id, error = %format!("{error:#}"), "path context lookup failed");
                self.status = Some(StatusMessage::Error(format!("{error:#}")));
            }
        }
    }

    /// Validates the current window on the UI thread, then plans it in the
    /// background. A rejected window leaves the scene as it was.
    fn request_render(&mut self) {
        let Some(context) = &self.context else {
            return;
        };

        let request = WindowRequest::new(context.id, self.from_dist, self.to_dist);
        if let Err(error) = check_window(self.source.as_ref(), request) {
            info!(%error, "rejected window request");
            self.status = Some(StatusMessage::Error(error.to_string()));
            return;
        }

        let token = self.sequencer.issue();
        let source = Arc::clone(&self.source);
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result =
                plan_checked_window(source.as_ref(), request).map_err(|error| error.to_string());
            let _ = tx.send(result);
        });

        self.status = Some(StatusMessage::Info(format!(
            "Loading dist {}..={}",
            request.window.from, request.window.to
        )));
        self.pending.push(PendingRender { token, request, rx });
    }

    /// Moves both window bounds one step forward and renders the result.
    fn step_render(&mut self) {
        let window = DistanceWindow::new(self.from_dist, self.to_dist).stepped();
        self.from_dist = window.from;
        self.to_dist = window.to;
        self.request_render();
    }

    /// Applies finished plans whose token is still the newest issued one.
    fn poll_pending(&mut self, ctx: &Context) {
        let mut still_pending = Vec::with_capacity(self.pending.len());

        for pending in self.pending.drain(..) {
            match pending.rx.try_recv() {
                Ok(result) if !self.sequencer.is_current(pending.token) => {
                    debug!(
                        token = ?pending.token,
                        ok = result.is_ok(),
                        "dropping stale window result"
                    );
                }
                Ok(Ok(plan)) => {
                    apply_commands(&mut self.scene, &plan.commands);
                    info!(
                        path_ctx_id = plan.request.path_ctx_id,
                        from = plan.request.window.from,
                        to = plan.request.window.to,
                        nodes = plan.node_count,
                        commands = plan.commands.len(),
                        "applied window"
                    );
                    self.last_render = Some(RenderSummary {
                        request: plan.request,
                        node_count: plan.node_count,
                        root_count: plan.root_count,
                        edge_count: plan.edge_count,
                    });
                    self.status = None;
                }
                Ok(Err(message)) => {
                    warn!(%message, "window planning failed");
                    self.status = Some(StatusMessage::Error(message));
                }
                Err(TryRecvError::Empty) => still_pending.push(pending),
                Err(TryRecvError::Disconnected) => {
                    warn!(
                        path_ctx_id = pending.request.path_ctx_id,
                        "window worker disconnected"
                    );
                }
            }
        }

        self.pending = still_pending;
        if !self.pending.is_empty() {
            ctx.request_repaint();
        }
    }
}
