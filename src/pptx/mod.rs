//! Minimal PresentationML writer.
//!
//! Slides are built up in memory as a [`Presentation`] and serialized into an
//! OPC zip package by [`package::write_package`]. The slide master, layouts and
//! theme come from a fixed default template.

pub mod chart;
pub mod package;
pub mod slide;
pub mod template;
pub mod units;
pub mod xml;

pub use chart::XyChart;
pub use units::Rect;

use units::{DEFAULT_SLIDE_HEIGHT, DEFAULT_SLIDE_WIDTH};

/// Slide layouts available in the default template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideLayout {
    /// Centered title with a subtitle placeholder.
    TitleSlide,
    /// Title with a bulleted body placeholder.
    TitleAndContent,
    /// Title only; the rest of the slide is free for shapes.
    TitleOnly,
}

impl SlideLayout {
    pub const ALL: [SlideLayout; 3] = [
        SlideLayout::TitleSlide,
        SlideLayout::TitleAndContent,
        SlideLayout::TitleOnly,
    ];

    /// 1-based part number of the layout inside the package.
    pub fn part_number(&self) -> usize {
        match self {
            SlideLayout::TitleSlide => 1,
            SlideLayout::TitleAndContent => 2,
            SlideLayout::TitleOnly => 3,
        }
    }

    /// Placeholder type used for the slide title on this layout.
    pub(crate) fn title_placeholder(&self) -> &'static str {
        match self {
            SlideLayout::TitleSlide => "ctrTitle",
            _ => "title",
        }
    }
}

/// A paragraph of plain text at an indent level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub text: String,
    pub level: u8,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: 0,
        }
    }

    pub fn with_level(text: impl Into<String>, level: u8) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }

    /// Split multi-line text into one paragraph per line.
    pub fn lines(text: &str) -> Vec<Paragraph> {
        text.split('\n').map(Paragraph::new).collect()
    }
}

/// Raster formats that can be embedded as picture media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
}

impl ImageKind {
    pub fn from_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Png => Some(ImageKind::Png),
            image::ImageFormat::Jpeg => Some(ImageKind::Jpeg),
            image::ImageFormat::Gif => Some(ImageKind::Gif),
            image::ImageFormat::Bmp => Some(ImageKind::Bmp),
            image::ImageFormat::Tiff => Some(ImageKind::Tiff),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageKind::Png => "png",
            ImageKind::Jpeg => "jpeg",
            ImageKind::Gif => "gif",
            ImageKind::Bmp => "bmp",
            ImageKind::Tiff => "tiff",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ImageKind::Png => "image/png",
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Gif => "image/gif",
            ImageKind::Bmp => "image/bmp",
            ImageKind::Tiff => "image/tiff",
        }
    }
}

/// Image bytes embedded verbatim into the package.
#[derive(Debug, Clone)]
pub struct EmbeddedImage {
    pub data: Vec<u8>,
    pub kind: ImageKind,
    /// Original file name, used as the picture description.
    pub name: String,
}

/// A shape placed on a slide, in addition to its title.
#[derive(Debug, Clone)]
pub enum Shape {
    /// Text for the layout's subtitle placeholder.
    Subtitle(Vec<Paragraph>),
    /// Paragraphs for the layout's body placeholder.
    Body(Vec<Paragraph>),
    /// Free-standing text box that grows to fit its text.
    TextBox {
        frame: Rect,
        paragraphs: Vec<Paragraph>,
    },
    Picture {
        frame: Rect,
        image: EmbeddedImage,
    },
    Chart {
        frame: Rect,
        chart: XyChart,
    },
}

#[derive(Debug, Clone)]
pub struct Slide {
    pub layout: SlideLayout,
    pub title: String,
    pub shapes: Vec<Shape>,
}

impl Slide {
    pub fn new(layout: SlideLayout, title: impl Into<String>) -> Self {
        Self {
            layout,
            title: title.into(),
            shapes: Vec::new(),
        }
    }

    pub fn add_shape(&mut self, shape: Shape) -> &mut Self {
        self.shapes.push(shape);
        self
    }

    pub fn pictures(&self) -> impl Iterator<Item = &EmbeddedImage> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Picture { image, .. } => Some(image),
            _ => None,
        })
    }

    pub fn charts(&self) -> impl Iterator<Item = &XyChart> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Chart { chart, .. } => Some(chart),
            _ => None,
        })
    }
}

/// An in-memory presentation ready to be packaged.
#[derive(Debug, Clone)]
pub struct Presentation {
    slide_width: i64,
    slide_height: i64,
    slides: Vec<Slide>,
}

impl Presentation {
    /// Create an empty 10" x 7.5" presentation.
    pub fn new() -> Self {
        Self {
            slide_width: DEFAULT_SLIDE_WIDTH,
            slide_height: DEFAULT_SLIDE_HEIGHT,
            slides: Vec::new(),
        }
    }

    pub fn slide_width(&self) -> i64 {
        self.slide_width
    }

    pub fn slide_height(&self) -> i64 {
        self.slide_height
    }

    /// Append a new slide and return it for filling in.
    pub fn add_slide(&mut self, layout: SlideLayout, title: impl Into<String>) -> &mut Slide {
        self.slides.push(Slide::new(layout, title));
        let last = self.slides.len() - 1;
        &mut self.slides[last]
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Title of the first slide, used as the document title.
    pub fn document_title(&self) -> Option<&str> {
        self.slides
            .first()
            .map(|slide| slide.title.as_str())
            .filter(|title| !title.is_empty())
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new()
    }
}
