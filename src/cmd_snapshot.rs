//! Snapshot subcommand handlers: render, refs, act.

use std::path::Path;

use anyhow::{bail, Context};
use tracing::{info, warn};

use wireframe_backend_snapshot::SnapshotBackend;
use wireframe_config::{Config, ConfigValidator};
use wireframe_core::{
    CharMetrics, OverlayRule, RenderOptions, Viewport, WireframeRenderer, WireframeSession,
};

use crate::cli::{ActionKind, OutputFormat};

/// Build a session over the snapshot at `path`.
fn open_session(
    config: &Config,
    path: &Path,
    metrics: CharMetrics,
) -> anyhow::Result<WireframeSession<SnapshotBackend>> {
    let warnings = ConfigValidator::validate(config).into_result()?;
    for warning in warnings {
        warn!("{}: {}", warning.path, warning.message);
    }

    let backend = SnapshotBackend::from_path(path)
        .with_context(|| format!("failed to load snapshot {}", path.display()))?;
    let options = RenderOptions {
        metrics,
        overflow_buffer: config.render.overflow_buffer,
        overlay: OverlayRule {
            min_z_index: config.overlay.min_z_index,
            min_coverage: config.overlay.min_coverage,
            max_text_len: config.overlay.max_text_len,
        },
    };
    let viewport = Viewport::new(config.render.viewport_width, config.render.viewport_height);
    Ok(WireframeSession::new(backend)
        .with_renderer(WireframeRenderer::new(options))
        .with_default_viewport(viewport))
}

fn configured_metrics(config: &Config) -> CharMetrics {
    CharMetrics::new(config.render.char_width, config.render.char_height)
}

/// Print the wireframe for a snapshot.
pub(crate) async fn render(
    config: &Config,
    path: &Path,
    char_width: Option<f64>,
    char_height: Option<f64>,
) -> anyhow::Result<()> {
    let configured = configured_metrics(config);
    let metrics = CharMetrics::new(
        char_width.unwrap_or(configured.char_width),
        char_height.unwrap_or(configured.char_height),
    );
    if !(metrics.char_width > 0.0 && metrics.char_height > 0.0) {
        bail!("character metrics must be positive");
    }

    let session = open_session(config, path, metrics)?;
    let wireframe = session.wireframe().await?;
    println!("{}", wireframe);
    Ok(())
}

/// List reference ids of a snapshot.
pub(crate) async fn refs(config: &Config, path: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let session = open_session(config, path, configured_metrics(config))?;
    session.wireframe().await?;
    let entries = session.refs().await;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&entries)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            if entries.is_empty() {
                println!("No interactive elements found.");
                return Ok(());
            }
            println!("{:<6} {:<22} {:<12} {}", "REF", "ROLE", "POSITION", "LABEL");
            println!("{}", "-".repeat(70));
            for entry in entries {
                let role = serde_json::to_value(entry.role)?;
                let position = format!("{:.0},{:.0}", entry.bounds.left, entry.bounds.top);
                println!(
                    "{:<6} {:<22} {:<12} {}",
                    entry.ref_id.label(),
                    role.as_str().unwrap_or("-"),
                    position,
                    entry.label
                );
            }
        }
    }
    Ok(())
}

/// Apply one action to the in-memory snapshot and show the result.
pub(crate) async fn act(
    config: &Config,
    path: &Path,
    action: ActionKind,
    ref_id: u32,
    text: Option<String>,
) -> anyhow::Result<()> {
    let text = match (action.needs_text(), text) {
        (true, Some(text)) => text,
        (true, None) => bail!("{:?} needs a text argument", action),
        (false, _) => String::new(),
    };

    let session = open_session(config, path, configured_metrics(config))?;
    session.wireframe().await?;

    match action {
        ActionKind::Click => session.click(ref_id).await?,
        ActionKind::Dblclick => session.dblclick(ref_id).await?,
        ActionKind::Hover => session.hover(ref_id).await?,
        ActionKind::Fill => session.fill(ref_id, &text).await?,
        ActionKind::Type => session.type_text(ref_id, &text).await?,
        ActionKind::Select => session.select(ref_id, &text).await?,
        ActionKind::Check => session.check(ref_id).await?,
        ActionKind::Uncheck => session.uncheck(ref_id).await?,
    }
    info!("Applied {:?} to [{}]", action, ref_id);

    for performed in session.backend().actions() {
        println!("{}", serde_json::to_string_pretty(&performed)?);
    }
    println!();
    println!("{}", session.wireframe().await?);
    Ok(())
}
