//! Slide geometry for the shapes the renderer places itself.

use crate::pptx::units::inches;
use crate::pptx::Rect;

/// Text box on `text` slides. It grows with its content.
pub const TEXT_BOX_FRAME: Rect = Rect::new(inches(1), inches(2), inches(1), inches(1));

/// Chart frame on `plot` slides.
pub const CHART_FRAME: Rect = Rect::new(inches(1), inches(2), inches(6), inches(4));

/// Margin kept above and below a picture before fitting.
const PICTURE_V_MARGIN: i64 = inches(2);
/// Margin kept left and right of a picture before fitting.
const PICTURE_H_MARGIN: i64 = inches(1);

/// Fit an image into the slide, preserving its aspect ratio.
///
/// The picture is first given a box inset by 1" left/right and 2" top/bottom
/// (never smaller than the margin itself). A picture relatively wider than the
/// box fills its width and sits two thirds of the way down the remaining
/// vertical space, leaving room for the title. A taller picture fills the box
/// height and is centered horizontally.
///
/// Returns `None` when either image dimension is zero.
pub fn fit_picture(image_width: u32, image_height: u32, slide_width: i64, slide_height: i64) -> Option<Rect> {
    if image_width == 0 || image_height == 0 {
        return None;
    }

    let aspect = image_width as f64 / image_height as f64;
    let slide_width = slide_width as f64;
    let slide_height = slide_height as f64;

    let mut h_margin = PICTURE_H_MARGIN as f64;
    let mut v_margin = PICTURE_V_MARGIN as f64;
    let mut target_width = (slide_width - 2.0 * h_margin).max(h_margin);
    let mut target_height = (slide_height - 2.0 * v_margin).max(v_margin);

    if target_width / target_height <= aspect {
        target_height = target_width / aspect;
        v_margin = 2.0 * (slide_height - target_height) / 3.0;
    } else {
        target_width = target_height * aspect;
        h_margin = (slide_width - target_width) / 2.0;
    }

    Some(Rect::new(
        h_margin.round() as i64,
        v_margin.round() as i64,
        target_width.round() as i64,
        target_height.round() as i64,
    ))
}
