pub mod canvas;
pub mod form;
pub mod page;
pub mod renderer;
pub mod text;

pub use canvas::{Canvas, CanvasError};
pub use form::{Field, FieldError, FormValues};
pub use page::{ids, Element, ElementKind, Page};
pub use renderer::{CanvasWindowRenderer, FrameLayout, Label, PaneLayout, RendererError};
pub use text::{LabelFont, TextError, TextMeasure};
