use anyhow::{Result, bail, ensure};
use itertools::Itertools;
use log::{debug, info, warn};
use svg::Document;

use nestview::allocation::{AllocationReport, AllocationSession, Zone, ZoneReport};
use nestview::entities::Layout;
use nestview::io::ext_repr::{ExtAllocationPlan, ExtLayout};
use nestview::io::import;
use nestview::io::svg::layout_to_svg;
use nestview::render::Focus;
use nestview::viewport::Viewport;
use nestview_client::{HttpNestingApi, LayoutLoader, LayoutRequest, LoadOutcome};

use crate::config::CliConfig;
use crate::io;
use crate::io::cli::{AllocateArgs, FetchArgs, RenderArgs};

/// What to draw on top of the layout
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderOptions {
    /// Multiplies the scale chosen by fit-to-canvas
    pub zoom: Option<f32>,
    pub select: Option<u64>,
    pub hover: Option<u64>,
}

impl From<&RenderArgs> for RenderOptions {
    fn from(args: &RenderArgs) -> Self {
        RenderOptions {
            zoom: args.zoom,
            select: args.select,
            hover: args.hover,
        }
    }
}

pub fn render(args: &RenderArgs, config: &CliConfig) -> Result<()> {
    let ext_layout: ExtLayout = io::read_json(&args.input_file)?;
    let layout = import::import_layout(&ext_layout)?;
    let title = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let document = render_layout(&layout, config, RenderOptions::from(args), title)?;
    io::write_svg(&document, &args.output_file)
}

pub fn render_layout(
    layout: &Layout,
    config: &CliConfig,
    options: RenderOptions,
    title: &str,
) -> Result<Document> {
    let canvas = config.canvas();
    let mut viewport = Viewport::try_new(config.viewer.viewport)?;
    if config.fit_to_canvas {
        viewport.fit_to(layout.container(), canvas)?;
    }
    if let Some(zoom) = options.zoom {
        let requested = viewport.scale() * zoom;
        viewport.set_scale(requested);
        if viewport.scale() != requested {
            warn!(
                "zoom {zoom} clamped, rendering at scale {:.3}",
                viewport.scale()
            );
        }
    }

    let known = |id: Option<u64>, what: &str| match id {
        Some(id) if layout.item(id).is_none() => {
            warn!("cannot {what} item {id}, it is not part of the layout");
            None
        }
        other => other,
    };
    let focus = Focus {
        selected: known(options.select, "select"),
        hovered: known(options.hover, "hover"),
    };

    info!(
        "rendering container {} ({} items) on a {}x{} canvas",
        layout.container().id,
        layout.len(),
        canvas.width,
        canvas.height
    );
    layout_to_svg(
        layout,
        &viewport,
        focus,
        canvas,
        &config.viewer.render,
        config.svg_draw_options,
        title,
    )
}

/// Imports an allocation plan and reports the utilization of both containers.
/// Fails if the plan exceeds any capacity.
pub fn allocate(args: &AllocateArgs) -> Result<AllocationReport> {
    let plan: ExtAllocationPlan = io::read_json(&args.input_file)?;
    let session = import::import_allocation_plan(&plan)?;
    let report = session.report().clone();

    log_report(&session);
    if let Some(output_file) = &args.output_file {
        io::write_json(&report, output_file)?;
    }
    for violation in report.violations() {
        warn!("{violation}");
    }
    ensure!(
        report.valid,
        "allocation of session {} exceeds capacity",
        session.id()
    );
    if !report.confirmable {
        warn!("session {}: no items assigned to either container", session.id());
    }
    Ok(report)
}

fn log_report(session: &AllocationSession) {
    let zone_line = |zr: &ZoneReport| {
        format!(
            "{:<12} {:>3} items | mass {:>6.1}% | area {:>6.1}% | vacuum lines {:>6.1}%",
            zr.zone.label(),
            zr.load.count,
            zr.mass_pct,
            zr.area_pct,
            zr.resource_pct
        )
    };
    info!("session {}", session.id());
    for (zone, zr) in [(Zone::A, &session.report().a), (Zone::B, &session.report().b)] {
        info!("{}", zone_line(zr));
        debug!(
            "{}: {}",
            zone.label(),
            session.zone_items(zone).map(|pi| pi.label.as_str()).join(", ")
        );
    }
    info!("{:<12} {:>3} items", Zone::Pool.label(), session.zone(Zone::Pool).len());
}

/// Requests a layout from the backend and renders it.
pub async fn fetch(args: &FetchArgs, config: &CliConfig) -> Result<()> {
    let request: LayoutRequest = io::read_json(&args.request_file)?;
    let title = format!("autoclave {}", request.autoclave_id);
    let loader = LayoutLoader::new(HttpNestingApi::new(&args.base_url));

    let layout = match loader.refresh(request).await {
        LoadOutcome::Applied(layout) => layout,
        LoadOutcome::Failed(message) => bail!("could not fetch layout: {message}"),
        LoadOutcome::Stale => bail!("layout response was superseded"),
    };
    let document = render_layout(&layout, config, RenderOptions::default(), &title)?;
    io::write_svg(&document, &args.output_file)
}
