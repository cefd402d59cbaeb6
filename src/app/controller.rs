//! Application controller and coordination layer
//!
//! The controller owns the page, the render configuration and the label font.
//! `App::initialize` validates the page once; `App::calculate_sizes` runs one
//! complete calculate-and-render cycle per submit.

use log::{error, info, warn};

use crate::app::state::{AppState, OutputValue};
use crate::config::canvas::CanvasWindowSettings;
use crate::config::render::{ConfigError, RenderConfig, RenderStyle};
use crate::domain::layout::{Axis, LayoutError};
use crate::domain::settings::WindowSettings;
use crate::ui::canvas::Canvas;
use crate::ui::form::{Field, FieldError, FormValues};
use crate::ui::page::{ids, ElementKind, Page};
use crate::ui::renderer::{CanvasWindowRenderer, FrameLayout, RendererError};
use crate::ui::text::{LabelFont, TextError};

/// Errors that stop the application from starting
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("Validation failed: {}", join_messages(.0))]
    MissingElements(Vec<String>),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Font(#[from] TextError),
}

fn join_messages(messages: &[String]) -> String {
    messages.join(", ")
}

/// Why one pane dimension could not be calculated
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AxisError {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Errors that abort a single calculate-and-render cycle
#[derive(Debug, thiserror::Error)]
pub enum CalculateError {
    #[error("{}", describe_invalid(.width, .height))]
    InvalidInput {
        width: Option<AxisError>,
        height: Option<AxisError>,
    },

    #[error("Rendering failed: {0}")]
    Render(#[from] RendererError),
}

fn describe_invalid(width: &Option<AxisError>, height: &Option<AxisError>) -> String {
    let reasons: Vec<String> = [("pane width", width), ("pane height", height)]
        .into_iter()
        .filter_map(|(name, err)| err.as_ref().map(|err| format!("{name}: {err}")))
        .collect();
    format!("Invalid input values: {}", reasons.join("; "))
}

/// Result of a successful cycle
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationReport {
    pub pane_width: f64,
    pub pane_height: f64,
    pub layout: FrameLayout,
}

pub struct App {
    page: Page,
    style: RenderStyle,
    font: LabelFont,
    settings: CanvasWindowSettings,
    state: AppState,
}

impl App {
    /// Validates the page and configuration and loads the label font
    pub fn initialize(page: Page, config: RenderConfig) -> Result<Self, SetupError> {
        config.validate()?;
        Self::validate_elements(&page, &config.canvas_element_id)?;
        let font = LabelFont::load(config.font_path.as_deref())?;
        Self::build(page, &config, font)
    }

    /// Like [`App::initialize`] but with an already loaded font
    pub fn with_font(page: Page, config: RenderConfig, font: LabelFont) -> Result<Self, SetupError> {
        config.validate()?;
        Self::validate_elements(&page, &config.canvas_element_id)?;
        Self::build(page, &config, font)
    }

    fn build(page: Page, config: &RenderConfig, font: LabelFont) -> Result<Self, SetupError> {
        let app = Self {
            page,
            style: config.style()?,
            font,
            settings: CanvasWindowSettings::from_config(config),
            state: AppState::Idle,
        };
        info!("App initialized (label font loaded: {})", app.font.is_loaded());
        Ok(app)
    }

    /// Checks that every element the calculator needs is on the page
    ///
    /// All problems are collected before failing.
    pub fn validate_elements(page: &Page, canvas_element_id: &str) -> Result<(), SetupError> {
        let mut required: Vec<(&str, ElementKind, String)> = vec![(
            ids::FORM,
            ElementKind::Form,
            "Form element is missing".to_string(),
        )];
        for field in Field::ALL {
            required.push((field.id(), ElementKind::Input, format!("{} field is missing", field.label())));
        }
        required.extend([
            (ids::SUBMIT_BUTTON, ElementKind::Button, "Submit button is missing".to_string()),
            (ids::PANE_WIDTH, ElementKind::Output, "Pane width element is missing".to_string()),
            (ids::PANE_HEIGHT, ElementKind::Output, "Pane height element is missing".to_string()),
            (
                canvas_element_id,
                ElementKind::Canvas,
                format!("Canvas element {canvas_element_id} is missing"),
            ),
        ]);

        let errors: Vec<String> = required
            .into_iter()
            .filter(|(id, kind, _)| !page.has(id, *kind))
            .map(|(_, _, message)| message)
            .collect();

        if errors.is_empty() {
            info!("All elements are present and valid");
            Ok(())
        } else {
            error!("Validation errors: {}", errors.join(", "));
            Err(SetupError::MissingElements(errors))
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn settings(&self) -> &CanvasWindowSettings {
        &self.settings
    }

    pub fn canvas(&self) -> Option<&Canvas> {
        self.page.canvas(&self.settings.canvas_element_id)
    }

    /// Types `value` into a form field
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        self.page.set_input_value(field.id(), value)
    }

    pub fn output(&self, axis: Axis) -> Option<&str> {
        self.page.output_text(output_id(axis))
    }

    /// Handles the submit action: reads the form, computes both pane sizes,
    /// updates the outputs and draws the frame
    pub fn calculate_sizes(&mut self) -> Result<CalculationReport, CalculateError> {
        info!("Form submitted, calculating sizes");

        let values = FormValues::read(&self.page);
        self.settings.window = settings_from(&values);

        let width = pane_size(&self.settings.window, &values, Axis::Width);
        let height = pane_size(&self.settings.window, &values, Axis::Height);

        let width_output = output_for(&width);
        let height_output = output_for(&height);
        self.show(Axis::Width, &width_output);
        self.show(Axis::Height, &height_output);

        let (pane_width, pane_height) = match (width, height) {
            (Ok(w), Ok(h)) => (w, h),
            (width, height) => {
                let err = CalculateError::InvalidInput {
                    width: width.err(),
                    height: height.err(),
                };
                warn!("{}", err);
                self.state = AppState::Failed {
                    width: width_output,
                    height: height_output,
                };
                return Err(err);
            }
        };

        match self.render() {
            Ok(layout) => {
                info!(
                    "Rendered {} panes of {:.2} x {:.2}",
                    layout.panes.len(),
                    pane_width,
                    pane_height
                );
                self.state = AppState::Rendered {
                    pane_width,
                    pane_height,
                    pane_count: layout.panes.len(),
                };
                Ok(CalculationReport {
                    pane_width,
                    pane_height,
                    layout,
                })
            }
            Err(err) => {
                error!("Rendering failed: {}", err);
                let marker = OutputValue::Error(format!("Rendering failed: {err}"));
                self.show(Axis::Width, &marker);
                self.show(Axis::Height, &marker);
                self.state = AppState::Failed {
                    width: marker.clone(),
                    height: marker,
                };
                Err(err.into())
            }
        }
    }

    fn render(&mut self) -> Result<FrameLayout, RendererError> {
        let mut renderer = CanvasWindowRenderer::attach(&mut self.page, &self.settings, self.style, &self.font)?;
        renderer.render_settings(&self.settings.window)
    }

    fn show(&mut self, axis: Axis, value: &OutputValue) {
        if !self.page.set_output_text(output_id(axis), value.to_string()) {
            warn!("Pane {} output element disappeared", axis);
        }
    }

    /// Clears every input and output and forgets the last calculation
    pub fn reset(&mut self) {
        for field in Field::ALL {
            self.page.set_input_value(field.id(), "");
        }
        self.show(Axis::Width, &OutputValue::Empty);
        self.show(Axis::Height, &OutputValue::Empty);
        self.settings.window = WindowSettings::default();
        self.state = AppState::Idle;
        info!("Form reset");
    }
}

fn output_id(axis: Axis) -> &'static str {
    match axis {
        Axis::Width => ids::PANE_WIDTH,
        Axis::Height => ids::PANE_HEIGHT,
    }
}

fn output_for(result: &Result<f64, AxisError>) -> OutputValue {
    match result {
        Ok(value) => OutputValue::Value(*value),
        Err(err) => OutputValue::Error(err.to_string()),
    }
}

/// Builds fresh settings from whatever parsed; unparsed fields stay zero
fn settings_from(values: &FormValues) -> WindowSettings {
    let mut settings = WindowSettings::new();
    if let Ok(v) = values.window_opening_height {
        settings.set_window_opening_height(v);
    }
    if let Ok(v) = values.window_opening_width {
        settings.set_window_opening_width(v);
    }
    if let Ok(v) = values.number_of_pane_columns {
        settings.set_number_of_pane_columns(v);
    }
    if let Ok(v) = values.number_of_pane_rows {
        settings.set_number_of_pane_rows(v);
    }
    if let Ok(v) = values.outer_frame_width {
        settings.set_outer_frame_width(v);
    }
    if let Ok(v) = values.inner_frame_width {
        settings.set_inner_frame_width(v);
    }
    settings
}

/// Computes one axis, reporting a field error for that axis's inputs first
fn pane_size(settings: &WindowSettings, values: &FormValues, axis: Axis) -> Result<f64, AxisError> {
    let (opening, count) = match axis {
        Axis::Width => (&values.window_opening_width, values.number_of_pane_columns.as_ref().err()),
        Axis::Height => (&values.window_opening_height, values.number_of_pane_rows.as_ref().err()),
    };

    let field_error = [
        opening.as_ref().err(),
        values.outer_frame_width.as_ref().err(),
        values.inner_frame_width.as_ref().err(),
        count,
    ]
    .into_iter()
    .flatten()
    .next();

    if let Some(err) = field_error {
        return Err(err.clone().into());
    }

    let size = match axis {
        Axis::Width => settings.pane_width()?,
        Axis::Height => settings.pane_height()?,
    };
    Ok(size)
}
