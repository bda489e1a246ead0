use std::io::Cursor;
use std::path::Path;

use image::ImageReader;

use crate::core::layout::{fit_picture, CHART_FRAME, TEXT_BOX_FRAME};
use crate::core::plot::parse_plot_data;
use crate::core::Storage;
use crate::domain::model::{ListItem, PlotConfiguration, SlideDescriptor, SlideKind};
use crate::pptx::{EmbeddedImage, ImageKind, Paragraph, Presentation, Shape, SlideLayout, XyChart};
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{validate_path, validate_range, Validate};

/// Deepest indent level a list item may use.
pub const MAX_LIST_LEVEL: u8 = 8;

/// A slide descriptor checked against its declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideSpec {
    Title {
        title: String,
        subtitle: String,
    },
    Text {
        title: String,
        body: String,
    },
    List {
        title: String,
        items: Vec<ListItem>,
    },
    Picture {
        title: String,
        path: String,
    },
    Plot {
        title: String,
        data_path: String,
        configuration: PlotConfiguration,
    },
}

impl SlideSpec {
    /// Build the typed slide for the descriptor at `index`.
    ///
    /// Returns `Ok(None)` for an unrecognized type tag; such slides are skipped.
    pub fn from_descriptor(index: usize, descriptor: &SlideDescriptor) -> Result<Option<Self>> {
        let Some(kind) = SlideKind::from_tag(&descriptor.kind) else {
            return Ok(None);
        };
        let title = descriptor
            .title
            .clone()
            .ok_or_else(|| ReportError::MissingConfigError {
                field: format!("presentation[{}].title", index),
            })?;

        let spec = match kind {
            SlideKind::Title => SlideSpec::Title {
                subtitle: content_str(index, descriptor)?,
                title,
            },
            SlideKind::Text => SlideSpec::Text {
                body: content_str(index, descriptor)?,
                title,
            },
            SlideKind::List => {
                let items = serde_json::from_value::<Vec<ListItem>>(content(index, descriptor)?.clone())
                    .map_err(|e| slide_error(index, descriptor, format!(
                        "list content must be an array of {{\"text\", \"level\"}} objects: {}",
                        e
                    )))?;
                SlideSpec::List { title, items }
            }
            SlideKind::Picture => SlideSpec::Picture {
                path: content_str(index, descriptor)?,
                title,
            },
            SlideKind::Plot => {
                let field = format!("presentation[{}].configuration", index);
                let raw = descriptor
                    .configuration
                    .as_ref()
                    .ok_or_else(|| ReportError::MissingConfigError {
                        field: field.clone(),
                    })?;
                let configuration = serde_json::from_value::<PlotConfiguration>(raw.clone())
                    .map_err(|e| ReportError::InvalidConfigValueError {
                        field,
                        value: raw.to_string(),
                        reason: e.to_string(),
                    })?;
                SlideSpec::Plot {
                    data_path: content_str(index, descriptor)?,
                    title,
                    configuration,
                }
            }
        };

        spec.validate()?;
        Ok(Some(spec))
    }

    pub fn kind(&self) -> SlideKind {
        match self {
            SlideSpec::Title { .. } => SlideKind::Title,
            SlideSpec::Text { .. } => SlideKind::Text,
            SlideSpec::List { .. } => SlideKind::List,
            SlideSpec::Picture { .. } => SlideKind::Picture,
            SlideSpec::Plot { .. } => SlideKind::Plot,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            SlideSpec::Title { title, .. }
            | SlideSpec::Text { title, .. }
            | SlideSpec::List { title, .. }
            | SlideSpec::Picture { title, .. }
            | SlideSpec::Plot { title, .. } => title,
        }
    }

    pub fn layout(&self) -> SlideLayout {
        match self.kind() {
            SlideKind::Title => SlideLayout::TitleSlide,
            SlideKind::List => SlideLayout::TitleAndContent,
            SlideKind::Text | SlideKind::Picture | SlideKind::Plot => SlideLayout::TitleOnly,
        }
    }
}

impl Validate for SlideSpec {
    fn validate(&self) -> Result<()> {
        match self {
            SlideSpec::List { items, .. } => {
                for item in items {
                    validate_range("level", item.level, 0, MAX_LIST_LEVEL)?;
                }
                Ok(())
            }
            SlideSpec::Picture { path, .. } => validate_path("content", path),
            SlideSpec::Plot { data_path, .. } => validate_path("content", data_path),
            SlideSpec::Title { .. } | SlideSpec::Text { .. } => Ok(()),
        }
    }
}

fn content(index: usize, descriptor: &SlideDescriptor) -> Result<&serde_json::Value> {
    descriptor
        .content
        .as_ref()
        .ok_or_else(|| ReportError::MissingConfigError {
            field: format!("presentation[{}].content", index),
        })
}

fn content_str(index: usize, descriptor: &SlideDescriptor) -> Result<String> {
    content(index, descriptor)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| slide_error(index, descriptor, format!(
            "content of a '{}' slide must be a string",
            descriptor.kind
        )))
}

fn slide_error(index: usize, descriptor: &SlideDescriptor, message: String) -> ReportError {
    ReportError::SlideError {
        index,
        title: descriptor.title.clone().unwrap_or_default(),
        message,
    }
}

/// Render one slide onto the presentation.
///
/// Pictures and plot data are read through `storage`.
pub async fn render_slide<S: Storage>(
    storage: &S,
    index: usize,
    spec: SlideSpec,
    pres: &mut Presentation,
) -> Result<()> {
    let layout = spec.layout();
    tracing::debug!(
        "Rendering slide {} ({}) '{}'",
        index,
        spec.kind().tag(),
        spec.title()
    );

    match spec {
        SlideSpec::Title { title, subtitle } => {
            pres.add_slide(layout, title)
                .add_shape(Shape::Subtitle(Paragraph::lines(&subtitle)));
        }
        SlideSpec::Text { title, body } => {
            // One paragraph; newlines become line breaks inside it.
            pres.add_slide(layout, title).add_shape(Shape::TextBox {
                frame: TEXT_BOX_FRAME,
                paragraphs: vec![Paragraph::new(body.replace('\n', "\u{b}"))],
            });
        }
        SlideSpec::List { title, items } => {
            // Line breaks inside an item stay within its bullet.
            let paragraphs = items
                .into_iter()
                .map(|item| Paragraph::with_level(item.text.replace('\n', "\u{b}"), item.level))
                .collect();
            pres.add_slide(layout, title)
                .add_shape(Shape::Body(paragraphs));
        }
        SlideSpec::Picture { title, path } => {
            let data = storage.read_file(&path).await?;
            let (kind, width, height) = probe_image(index, &title, &path, &data)?;
            let frame = fit_picture(width, height, pres.slide_width(), pres.slide_height())
                .ok_or_else(|| ReportError::SlideError {
                    index,
                    title: title.clone(),
                    message: format!("image '{}' has zero width or height", path),
                })?;
            tracing::debug!("Fitted {}x{} image {} into {:?}", width, height, path, frame);

            let name = Path::new(&path)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.clone());
            pres.add_slide(layout, title).add_shape(Shape::Picture {
                frame,
                image: EmbeddedImage { data, kind, name },
            });
        }
        SlideSpec::Plot {
            title,
            data_path,
            configuration,
        } => {
            let data = storage.read_file(&data_path).await?;
            let points = parse_plot_data(&data_path, &data)?;
            let chart = XyChart::new(points, &configuration.x_label, &configuration.y_label);
            pres.add_slide(layout, title).add_shape(Shape::Chart {
                frame: CHART_FRAME,
                chart,
            });
        }
    }

    Ok(())
}

/// Detect the image format and pixel size from the file header.
fn probe_image(index: usize, title: &str, path: &str, data: &[u8]) -> Result<(ImageKind, u32, u32)> {
    let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;

    let kind = reader
        .format()
        .and_then(ImageKind::from_format)
        .ok_or_else(|| ReportError::SlideError {
            index,
            title: title.to_string(),
            message: format!("'{}' is not a PNG, JPEG, GIF, BMP or TIFF image", path),
        })?;

    let (width, height) = reader
        .into_dimensions()
        .map_err(|source| ReportError::ImageError {
            path: path.to_string(),
            source,
        })?;

    Ok((kind, width, height))
}
