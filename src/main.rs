use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::{info, warn};

use paneframe::app::App;
use paneframe::config::RenderConfig;
use paneframe::ui::page::{ids, Page};

const CONFIG_ENV: &str = "PANEFRAME_CONFIG";
const CONFIG_FILE: &str = "paneframe.toml";
const DEFAULT_OUTPUT: &str = "window.png";

/// Usage: paneframe [FORM_TOML] [OUTPUT_PNG]
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let form_path = args.next().map(PathBuf::from);
    let output_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let config = load_config()?;

    let form = match &form_path {
        Some(path) => read_form(path)?,
        None => default_form(),
    };

    let mut page = Page::calculator();
    for (id, value) in &form {
        if !page.set_input_value(id, value.as_str()) {
            warn!("Ignoring unknown form field: {}", id);
        }
    }

    let mut app = App::initialize(page, config)?;
    let outcome = app.calculate_sizes();

    println!("Pane width:  {}", app.page().output_text(ids::PANE_WIDTH).unwrap_or_default());
    println!("Pane height: {}", app.page().output_text(ids::PANE_HEIGHT).unwrap_or_default());

    outcome?;

    let canvas = app.canvas().context("canvas disappeared after rendering")?;
    canvas
        .save_png(&output_path)
        .with_context(|| format!("writing {}", output_path.display()))?;
    info!("Saved frame schematic to {}", output_path.display());

    Ok(())
}

fn load_config() -> Result<RenderConfig> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Ok(RenderConfig::load(Path::new(&path))?);
    }

    let local = Path::new(CONFIG_FILE);
    if local.exists() {
        return Ok(RenderConfig::load(local)?);
    }

    info!("No configuration file found, using defaults");
    Ok(RenderConfig::default())
}

/// Reads field values from a flat TOML table keyed by element id
fn read_form(path: &Path) -> Result<BTreeMap<String, String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading form values from {}", path.display()))?;
    let table: BTreeMap<String, toml::Value> = toml::from_str(&contents)
        .with_context(|| format!("parsing form values in {}", path.display()))?;

    let mut form = BTreeMap::new();
    for (id, value) in table {
        let text = match value {
            toml::Value::String(text) => text,
            toml::Value::Integer(number) => number.to_string(),
            toml::Value::Float(number) => number.to_string(),
            other => bail!("form field {id} must be a string or number, got {other}"),
        };
        form.insert(id, text);
    }
    Ok(form)
}

fn default_form() -> BTreeMap<String, String> {
    [
        (ids::WINDOW_OPENING_HEIGHT, "800"),
        (ids::WINDOW_OPENING_WIDTH, "1000"),
        (ids::NUMBER_OF_PANE_COLUMNS, "3"),
        (ids::NUMBER_OF_PANE_ROWS, "2"),
        (ids::OUTER_FRAME_WIDTH, "20"),
        (ids::INNER_FRAME_WIDTH, "10"),
    ]
    .into_iter()
    .map(|(id, value)| (id.to_string(), value.to_string()))
    .collect()
}
