//! Reading and parsing the calculator's input fields
//!
//! Dimensions are parsed as floating point numbers, pane counts as unsigned
//! integers. Surrounding whitespace is ignored; anything else that does not
//! parse cleanly is a [`FieldError`] for that field alone.

use crate::ui::page::{ids, Page};

/// One numeric input of the calculator form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    WindowOpeningHeight,
    WindowOpeningWidth,
    NumberOfPaneColumns,
    NumberOfPaneRows,
    OuterFrameWidth,
    InnerFrameWidth,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::WindowOpeningHeight,
        Field::WindowOpeningWidth,
        Field::NumberOfPaneColumns,
        Field::NumberOfPaneRows,
        Field::OuterFrameWidth,
        Field::InnerFrameWidth,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Field::WindowOpeningHeight => ids::WINDOW_OPENING_HEIGHT,
            Field::WindowOpeningWidth => ids::WINDOW_OPENING_WIDTH,
            Field::NumberOfPaneColumns => ids::NUMBER_OF_PANE_COLUMNS,
            Field::NumberOfPaneRows => ids::NUMBER_OF_PANE_ROWS,
            Field::OuterFrameWidth => ids::OUTER_FRAME_WIDTH,
            Field::InnerFrameWidth => ids::INNER_FRAME_WIDTH,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::WindowOpeningHeight => "Window opening height",
            Field::WindowOpeningWidth => "Window opening width",
            Field::NumberOfPaneColumns => "Number of pane columns",
            Field::NumberOfPaneRows => "Number of pane rows",
            Field::OuterFrameWidth => "Outer frame width",
            Field::InnerFrameWidth => "Inner frame width",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{} field is missing", label(.field))]
    Missing { field: Field },

    #[error("{} must be a number, got {value:?}", label(.field))]
    NotNumeric { field: Field, value: String },

    #[error("{} must be a whole number, got {value:?}", label(.field))]
    NotCount { field: Field, value: String },
}

fn label(field: &Field) -> &'static str {
    field.label()
}

/// Parsed values of every form field, each with its own outcome
#[derive(Debug, Clone, PartialEq)]
pub struct FormValues {
    pub window_opening_height: Result<f64, FieldError>,
    pub window_opening_width: Result<f64, FieldError>,
    pub number_of_pane_columns: Result<u32, FieldError>,
    pub number_of_pane_rows: Result<u32, FieldError>,
    pub outer_frame_width: Result<f64, FieldError>,
    pub inner_frame_width: Result<f64, FieldError>,
}

impl FormValues {
    /// Reads every field from the page at the moment of submission
    pub fn read(page: &Page) -> Self {
        Self {
            window_opening_height: read_dimension(page, Field::WindowOpeningHeight),
            window_opening_width: read_dimension(page, Field::WindowOpeningWidth),
            number_of_pane_columns: read_count(page, Field::NumberOfPaneColumns),
            number_of_pane_rows: read_count(page, Field::NumberOfPaneRows),
            outer_frame_width: read_dimension(page, Field::OuterFrameWidth),
            inner_frame_width: read_dimension(page, Field::InnerFrameWidth),
        }
    }
}

/// Reads a floating point dimension
pub fn read_dimension(page: &Page, field: Field) -> Result<f64, FieldError> {
    let raw = page
        .input_value(field.id())
        .ok_or(FieldError::Missing { field })?;

    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FieldError::NotNumeric {
            field,
            value: raw.to_string(),
        }),
    }
}

/// Reads a non-negative whole pane count
pub fn read_count(page: &Page, field: Field) -> Result<u32, FieldError> {
    let raw = page
        .input_value(field.id())
        .ok_or(FieldError::Missing { field })?;

    raw.trim().parse::<u32>().map_err(|_| FieldError::NotCount {
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with(values: &[(Field, &str)]) -> Page {
        let mut page = Page::calculator();
        for (field, value) in values {
            assert!(page.set_input_value(field.id(), *value));
        }
        page
    }

    #[test]
    fn dimensions_parse_as_floats() {
        let page = page_with(&[
            (Field::WindowOpeningWidth, "1000"),
            (Field::OuterFrameWidth, " 12.5 "),
        ]);

        assert_eq!(read_dimension(&page, Field::WindowOpeningWidth), Ok(1000.0));
        assert_eq!(read_dimension(&page, Field::OuterFrameWidth), Ok(12.5));
    }

    #[test]
    fn counts_parse_as_integers() {
        let page = page_with(&[(Field::NumberOfPaneColumns, "3"), (Field::NumberOfPaneRows, "2.5")]);

        assert_eq!(read_count(&page, Field::NumberOfPaneColumns), Ok(3));
        assert!(matches!(
            read_count(&page, Field::NumberOfPaneRows),
            Err(FieldError::NotCount { field: Field::NumberOfPaneRows, .. })
        ));
    }

    #[test]
    fn empty_and_garbage_input_are_errors() {
        let page = page_with(&[(Field::InnerFrameWidth, "ten"), (Field::NumberOfPaneRows, "-1")]);

        assert!(matches!(
            read_dimension(&page, Field::WindowOpeningHeight),
            Err(FieldError::NotNumeric { .. })
        ));
        assert!(matches!(
            read_dimension(&page, Field::InnerFrameWidth),
            Err(FieldError::NotNumeric { .. })
        ));
        assert!(read_count(&page, Field::NumberOfPaneRows).is_err());
    }

    #[test]
    fn non_finite_text_is_not_numeric() {
        let page = page_with(&[(Field::WindowOpeningWidth, "NaN"), (Field::WindowOpeningHeight, "inf")]);

        assert!(read_dimension(&page, Field::WindowOpeningWidth).is_err());
        assert!(read_dimension(&page, Field::WindowOpeningHeight).is_err());
    }

    #[test]
    fn missing_field_is_reported() {
        let mut page = Page::calculator();
        page.remove(Field::OuterFrameWidth.id());

        let err = read_dimension(&page, Field::OuterFrameWidth).unwrap_err();
        assert_eq!(err.to_string(), "Outer frame width field is missing");
    }

    #[test]
    fn read_collects_every_field() {
        let page = page_with(&[
            (Field::WindowOpeningHeight, "800"),
            (Field::WindowOpeningWidth, "1000"),
            (Field::NumberOfPaneColumns, "3"),
            (Field::NumberOfPaneRows, "2"),
            (Field::OuterFrameWidth, "20"),
            (Field::InnerFrameWidth, ""),
        ]);

        let values = FormValues::read(&page);
        assert_eq!(values.window_opening_height, Ok(800.0));
        assert_eq!(values.number_of_pane_columns, Ok(3));
        assert_eq!(
            values.inner_frame_width,
            Err(FieldError::NotNumeric {
                field: Field::InnerFrameWidth,
                value: String::new(),
            })
        );
    }

    #[test]
    fn error_message_quotes_value() {
        let page = page_with(&[(Field::NumberOfPaneColumns, "three")]);
        let err = read_count(&page, Field::NumberOfPaneColumns).unwrap_err();
        assert_eq!(err.to_string(), "Number of pane columns must be a whole number, got \"three\"");
    }
}
