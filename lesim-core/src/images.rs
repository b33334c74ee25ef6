use crate::constants::PDF_VIEWER_SUFFIX;
use crate::settings::{FileType, Settings};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageElement {
    /// Embedded PDF viewer.
    Frame,
    Img,
}

/// How one server-rendered figure is shown.
#[derive(Clone, Debug, PartialEq)]
pub struct ImagePanel {
    pub element: ImageElement,
    pub src: String,
    /// Fixed container size (px); `None` keeps the image's natural size.
    pub size: Option<(f64, f64)>,
    /// The user may drag-resize the container.
    pub resizable: bool,
    /// The image fills its container.
    pub fill: bool,
}

impl ImagePanel {
    pub fn for_file(src: &str, settings: &Settings) -> Self {
        match settings.file_type() {
            // Browsers give iframes a tiny default size.
            FileType::Pdf => ImagePanel {
                element: ImageElement::Frame,
                src: format!("{src}{PDF_VIEWER_SUFFIX}"),
                size: Some((settings.plot_width(), settings.plot_height())),
                resizable: false,
                fill: true,
            },
            FileType::Svg => ImagePanel {
                element: ImageElement::Img,
                src: src.to_string(),
                size: None,
                resizable: true,
                fill: true,
            },
            FileType::Png | FileType::Other => ImagePanel {
                element: ImageElement::Img,
                src: src.to_string(),
                size: None,
                resizable: false,
                fill: false,
            },
        }
    }
}

pub fn image_panels(files: &[String], settings: &Settings) -> Vec<ImagePanel> {
    files
        .iter()
        .map(|f| ImagePanel::for_file(f, settings))
        .collect()
}
