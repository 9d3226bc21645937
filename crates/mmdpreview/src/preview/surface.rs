//! The display surface hosting a preview: managed diagram container, error panel, status line,
//! and whatever loose elements the rendering library left behind.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusLine {
    pub fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// An element present on the surface, as far as stray-artifact matching is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceElement {
    pub tag: String,
    pub id: String,
    pub classes: Vec<String>,
    /// True when the element lives inside the managed diagram container.
    pub inside_diagram: bool,
}

impl SurfaceElement {
    pub fn new(tag: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: id.into(),
            classes: Vec::new(),
            inside_diagram: false,
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn inside_diagram(mut self) -> Self {
        self.inside_diagram = true;
        self
    }
}

/// Patterns identifying orphaned render artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrayPattern {
    /// Any element whose id starts with the prefix.
    IdPrefix(&'static str),
    /// Any element carrying the class.
    Class(&'static str),
    /// Elements of `tag` whose id starts with `prefix`.
    TagIdPrefix {
        tag: &'static str,
        prefix: &'static str,
    },
    /// Elements whose id starts with the prefix, unless inside the diagram container.
    OutsideDiagramIdPrefix(&'static str),
}

impl StrayPattern {
    pub fn matches(&self, element: &SurfaceElement) -> bool {
        match *self {
            Self::IdPrefix(prefix) => element.id.starts_with(prefix),
            Self::Class(class) => element.classes.iter().any(|c| c == class),
            Self::TagIdPrefix { tag, prefix } => {
                element.tag.eq_ignore_ascii_case(tag) && element.id.starts_with(prefix)
            }
            Self::OutsideDiagramIdPrefix(prefix) => {
                !element.inside_diagram && element.id.starts_with(prefix)
            }
        }
    }
}

/// Zoom state of the preview. Handled entirely inside the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl Viewport {
    pub const MIN_SCALE: f64 = 0.2;
    pub const MAX_SCALE: f64 = 4.0;
    pub const STEP: f64 = 0.2;

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Adjusts the scale by `delta`; a zero delta resets it.
    pub fn zoom(&mut self, delta: f64) -> f64 {
        self.scale = if delta == 0.0 {
            1.0
        } else {
            (self.scale + delta).clamp(Self::MIN_SCALE, Self::MAX_SCALE)
        };
        self.scale
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.zoom(Self::STEP)
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.zoom(-Self::STEP)
    }

    pub fn reset(&mut self) -> f64 {
        self.zoom(0.0)
    }
}

pub trait PreviewSurface {
    /// Hides the loading indicator and reveals the diagram area.
    fn set_ready(&mut self);

    /// Replaces the markup inside the managed diagram container.
    fn show_diagram(&mut self, markup: &str);

    fn show_error(&mut self, message: &str);

    fn hide_error(&mut self);

    fn set_status(&mut self, status: StatusLine);

    /// Removes every element matching any of `patterns`, returning how many were removed.
    fn purge(&mut self, patterns: &[StrayPattern]) -> usize;
}

/// In-memory surface for headless hosts and tests.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    ready: bool,
    diagram: Option<String>,
    error: Option<String>,
    status: StatusLine,
    elements: Vec<SurfaceElement>,
    viewport: Viewport,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self {
            ready: false,
            diagram: None,
            error: None,
            status: StatusLine::new(StatusKind::Loading, "Initializing…"),
            elements: Vec::new(),
            viewport: Viewport::default(),
        }
    }
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn diagram(&self) -> Option<&str> {
        self.diagram.as_deref()
    }

    /// Text of the error panel while it is visible.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn elements(&self) -> &[SurfaceElement] {
        &self.elements
    }

    /// Adds a loose element, e.g. an error marker injected by the rendering library.
    pub fn insert_element(&mut self, element: SurfaceElement) {
        self.elements.push(element);
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// The currently displayed diagram markup, for download as an `.svg` file.
    pub fn export_svg(&self) -> Option<&str> {
        self.diagram().filter(|markup| markup.contains("<svg"))
    }
}

impl PreviewSurface for MemorySurface {
    fn set_ready(&mut self) {
        self.ready = true;
    }

    fn show_diagram(&mut self, markup: &str) {
        self.diagram = Some(markup.to_string());
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn hide_error(&mut self) {
        self.error = None;
    }

    fn set_status(&mut self, status: StatusLine) {
        self.status = status;
    }

    fn purge(&mut self, patterns: &[StrayPattern]) -> usize {
        let before = self.elements.len();
        self.elements
            .retain(|el| !patterns.iter().any(|pattern| pattern.matches(el)));
        before - self.elements.len()
    }
}
