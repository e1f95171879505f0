//! Chaîne complète : catalogue → image → rendu → exports ou terminal.

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tg_ascii::compositor::{RenderOptions, render};
use tg_core::charset::GlyphSpec;
use tg_core::config::{Config, ModeKind, Template, load_config};
use tg_core::error::CoreError;
use tg_core::frame::{AsciiGrid, PixelBuffer};
use tg_export::ExportError;

use crate::cli::Cli;
use crate::session::TerminalSession;

/// Paramètres de rendu résolus (CLI > défauts du template).
#[derive(Clone, Debug, PartialEq)]
pub struct RenderPlan {
    /// Template retenu.
    pub template: Template,
    /// Mode résolu du template.
    pub mode: ModeKind,
    /// Id de la variante de glyph retenue (vide si la famille est absente).
    pub variant_id: String,
    /// Glyph et charset effectifs.
    pub glyph: GlyphSpec,
    /// Largeur en colonnes, bornée par `max_width`.
    pub width: u32,
    /// Correction d'aspect.
    pub aspect: f32,
    /// Délai par ligne.
    pub delay: Duration,
    /// Inversion de luminance.
    pub invert: bool,
    /// Effacement de l'écran avant diffusion.
    pub clear: bool,
}

impl RenderPlan {
    /// Options passed to the mode engine.
    #[must_use]
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            invert: self.invert,
            color_strategy: self.template.color_strategy,
        }
    }
}

/// Pick the template: `--preset` first, then the legacy `--mode` token,
/// otherwise the first template of the catalog.
///
/// # Errors
/// [`CoreError::UnknownTemplate`] / [`CoreError::UnknownLegacyToken`] when
/// the requested id or token is absent, or when the catalog is empty.
pub fn select_template<'a>(
    config: &'a Config,
    preset: Option<&str>,
    legacy_mode: Option<&str>,
) -> Result<&'a Template, CoreError> {
    if let Some(id) = preset {
        return config.get_template(id);
    }
    if let Some(token) = legacy_mode {
        let id = config.resolve_legacy_mode(token)?;
        return config.get_template(id);
    }
    config
        .templates
        .first()
        .ok_or_else(|| CoreError::UnknownTemplate("<catalogue vide>".to_string()))
}

/// Resolve the template, glyph variant and merged parameters.
///
/// # Errors
/// Template selection errors and [`CoreError::UnknownMode`] for a template
/// whose mode is not one of the six kinds.
pub fn plan(cli: &Cli, config: &Config) -> Result<RenderPlan, CoreError> {
    let template = select_template(config, cli.preset.as_deref(), cli.mode.as_deref())?;
    let mode = template.mode_kind()?;
    let variant = config.get_glyph_variant(&template.glyph_family, cli.glyph.as_deref());
    let defaults = &template.defaults;

    let width = cli
        .width
        .filter(|&w| w > 0)
        .unwrap_or(defaults.width)
        .clamp(1, config.defaults.max_width.max(1));
    let aspect = cli
        .aspect
        .filter(|a| a.is_finite() && *a > 0.0)
        .unwrap_or(defaults.aspect);
    let delay = cli.delay.filter(|&d| d > 0).unwrap_or(defaults.delay);

    Ok(RenderPlan {
        template: template.clone(),
        mode,
        variant_id: variant.id.clone(),
        glyph: GlyphSpec::from_variant(&variant),
        width,
        aspect,
        delay: Duration::from_millis(delay),
        invert: cli.invert || defaults.invert,
        clear: cli.clear || defaults.clear,
    })
}

/// Prepare the pixel buffer for the plan: full render or cropped preview.
///
/// # Errors
/// Resize failures.
pub fn prepare(frame: &PixelBuffer, plan: &RenderPlan, config: &Config, preview: bool) -> Result<PixelBuffer> {
    if preview {
        let d = &config.defaults;
        tg_source::prepare_preview(frame, d.preview_width, d.preview_height, plan.mode)
    } else {
        tg_source::prepare_image(frame, plan.width, plan.aspect, plan.mode)
    }
}

/// Run every requested export; failures are logged and counted, never fatal.
///
/// Returns the number of failed exports.
pub fn run_exports(cli: &Cli, grid: &AsciiGrid, source: &PixelBuffer, title: &str) -> usize {
    let lines = grid.to_ansi_lines();
    let mut results: Vec<(&str, &Path, Result<(), ExportError>)> = Vec::new();

    if let Some(path) = cli.png.as_deref() {
        results.push(("PNG", path, tg_export::export_png(grid, path)));
    }
    if let Some(path) = cli.html.as_deref() {
        results.push(("HTML", path, tg_export::export_html(&lines, path, title)));
    }
    if let Some(path) = cli.ansi.as_deref() {
        results.push(("ANSI", path, tg_export::export_ansi(&lines, path)));
    }
    if let Some(path) = cli.source_png.as_deref() {
        results.push(("source", path, tg_export::export_source_png(source, path)));
    }

    let mut failures = 0;
    for (kind, path, result) in results {
        if let Err(e) = result {
            log::error!("Export {kind} échoué ({}) : {e}", path.display());
            failures += 1;
        }
    }
    failures
}

/// Print the catalog: templates, then glyph variants per family.
///
/// # Errors
/// Returns the underlying write error.
pub fn list_catalog(config: &Config, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Templates :")?;
    for t in &config.templates {
        writeln!(out, "  {:<14} {:<15} {}", t.id, t.mode, t.name)?;
    }
    writeln!(out, "Glyphs :")?;
    for (family_id, family) in &config.glyph_families {
        for v in &family.variants {
            let sample: String = match (v.glyph, &v.charset) {
                (Some(g), _) => g.to_string(),
                (None, Some(cs)) => cs.chars().take(16).collect(),
                (None, None) => String::new(),
            };
            let marker = if v.id == family.default { " *" } else { "" };
            writeln!(out, "  {family_id}/{:<4} {:<20} [{sample}]{marker}", v.id, v.name)?;
        }
    }
    if !config.legacy_mode_mapping.is_empty() {
        writeln!(out, "Modes historiques :")?;
        for (token, id) in &config.legacy_mode_mapping {
            writeln!(out, "  {token:<5} → {id}")?;
        }
    }
    Ok(())
}

/// Entry point behind `main`.
///
/// # Errors
/// Startup-fatal failures: unreadable catalog, unknown template or mode,
/// unreadable image. Export failures are logged and do not abort.
pub fn run(cli: &Cli) -> Result<()> {
    let config = load_config(&cli.config)
        .with_context(|| format!("Chargement du catalogue {}", cli.config.display()))?;

    if cli.list {
        let stdout = io::stdout();
        list_catalog(&config, &mut stdout.lock())?;
        return Ok(());
    }

    let Some(image_path) = cli.image.as_deref() else {
        anyhow::bail!("Aucune image spécifiée. Usage : termglyph <image> [options]");
    };

    let plan = plan(cli, &config)?;
    let frame = tg_source::load_image(image_path)?;
    let frame = tg_source::limit_image_size(frame, config.defaults.max_image_size)?;
    let prepared = prepare(&frame, &plan, &config, cli.preview)?;

    log::info!(
        "Rendu : template={}, glyph={}, {}x{} px",
        plan.template.id,
        if plan.variant_id.is_empty() { "N/A" } else { plan.variant_id.as_str() },
        prepared.width(),
        prepared.height()
    );

    let grid = render(plan.mode, &prepared, &plan.glyph, &plan.options())?;

    if cli.has_exports() {
        let failures = run_exports(cli, &grid, &prepared, &plan.template.name);
        if failures > 0 {
            log::warn!("{failures} export(s) en échec");
        }
        return Ok(());
    }

    let mut session = TerminalSession::new(io::stdout().lock());
    session.init();
    if plan.clear {
        session.clear()?;
    }
    session.stream(&grid.to_ansi_lines(), plan.delay)?;
    Ok(())
}
