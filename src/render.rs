use thiserror::Error;
use tracing::{debug, info};

use crate::canvas::{DrawSurface, apply_commands};
use crate::path::{DistanceWindow, DrawCommand, Forest, RangeError, normalize, traverse, validate};
use crate::source::{NodeSource, PathContext};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Range(#[from] RangeError),

    #[error("failed to query path nodes: {0:#}")]
    Source(anyhow::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowRequest {
    pub path_ctx_id: i32,
    pub window: DistanceWindow,
}

impl WindowRequest {
    pub const fn new(path_ctx_id: i32, from: i64, to: i64) -> Self {
        Self {
            path_ctx_id,
            window: DistanceWindow::new(from, to),
        }
    }
}

/// Draw sequence for one request, ready to be applied to a canvas.
#[derive(Clone, Debug)]
pub struct WindowPlan {
    pub request: WindowRequest,
    pub commands: Vec<DrawCommand>,
    pub node_count: usize,
    pub root_count: usize,
    pub edge_count: usize,
}

/// Looks up the request's context and validates the window against its
/// known max distance.
pub fn check_window(
    source: &dyn NodeSource,
    request: WindowRequest,
) -> Result<PathContext, RenderError> {
    let context = source
        .path_context(request.path_ctx_id)
        .map_err(RenderError::Source)?;
    validate(request.window, context.max_dist)?;
    Ok(context)
}

/// Fetches, normalizes, builds and traverses one window. Does not validate.
pub fn plan_checked_window(
    source: &dyn NodeSource,
    request: WindowRequest,
) -> Result<WindowPlan, RenderError> {
    let records = source
        .path_nodes(request.path_ctx_id, request.window)
        .map_err(RenderError::Source)?;
    let nodes = normalize(records);
    let forest = Forest::build(nodes, request.window);
    let commands = traverse(&forest);

    debug!(
        path_ctx_id = request.path_ctx_id,
        from = request.window.from,
        to = request.window.to,
        commands = commands.len(),
        "planned window"
    );

    Ok(WindowPlan {
        request,
        node_count: forest.len(),
        root_count: forest.root_ids().len(),
        edge_count: forest.edge_count(),
        commands,
    })
}

pub fn plan_window(
    source: &dyn NodeSource,
    request: WindowRequest,
) -> Result<WindowPlan, RenderError> {
    check_window(source, request)?;
    plan_checked_window(source, request)
}

/// Plans `request` and, only if that succeeds, redraws `surface` with it.
pub fn render_window<S: DrawSurface + ?Sized>(
    source: &dyn NodeSource,
    request: WindowRequest,
    surface: &mut S,
) -> Result<WindowPlan, RenderError> {
    let plan = plan_window(source, request)?;
    apply_commands(surface, &plan.commands);
    info!(
        path_ctx_id = request.path_ctx_id,
        nodes = plan.node_count,
        roots = plan.root_count,
        commands = plan.commands.len(),
        "rendered window"
    );
    Ok(plan)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Stamps window requests so only the most recently issued one is applied,
/// whatever order their results arrive in.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: u64,
}

impl RequestSequencer {
    pub fn issue(&mut self) -> RequestToken {
        self.issued = self.issued.wrapping_add(1);
        RequestToken(self.issued)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued
    }
}
