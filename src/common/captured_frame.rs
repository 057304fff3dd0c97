use std::io::Cursor;
use std::path::Path;
use image::{DynamicImage, ImageFormat, RgbImage};
use crate::common::FrameSize;
use crate::error::ScanError;

pub const FRAME_FILE_NAME: &str = "frame.jpg";
pub const FRAME_MIME: &str = "image/jpeg";

/// One encoded frame ready to be posted to the inference endpoint.
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    pub bytes: Vec<u8>,
    pub img_width: u32,
    pub img_height: u32,
    pub file_name: String,
    pub mime: String,
}

impl CapturedFrame {
    /// Wraps already-encoded JPEG bytes.
    pub fn from_jpeg(bytes: Vec<u8>, img_width: u32, img_height: u32) -> Self {
        Self {
            bytes,
            img_width,
            img_height,
            file_name: FRAME_FILE_NAME.to_string(),
            mime: FRAME_MIME.to_string(),
        }
    }

    /// JPEG-encodes a decoded image.
    pub fn encode(image: &DynamicImage) -> Result<Self, ScanError> {
        let rgb: RgbImage = image.to_rgb8();
        let (img_width, img_height) = rgb.dimensions();
        let mut bytes = Vec::new();
        DynamicImage::from(rgb).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)?;
        Ok(Self::from_jpeg(bytes, img_width, img_height))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ScanError> {
        let image = image::open(path)?;
        Self::encode(&image)
    }

    /// Reference geometry of this frame, used to normalize pixel boxes computed against it.
    pub fn frame_size(&self) -> Result<FrameSize, ScanError> {
        FrameSize::new(self.img_width, self.img_height)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.img_width, self.img_height)
    }
}

impl TryFrom<DynamicImage> for CapturedFrame {
    type Error = ScanError;

    fn try_from(image: DynamicImage) -> Result<Self, Self::Error> {
        Self::encode(&image)
    }
}

impl TryFrom<RgbImage> for CapturedFrame {
    type Error = ScanError;

    fn try_from(image: RgbImage) -> Result<Self, Self::Error> {
        Self::encode(&DynamicImage::from(image))
    }
}
