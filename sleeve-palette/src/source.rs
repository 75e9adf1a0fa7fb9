use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::error::ExtractError;

/// A decoding capability handed to the extractor.
///
/// The pipeline never touches files, sockets or tags itself; whoever owns the
/// image (the batch driver, an interactive view) decides how it is decoded.
pub trait ImageSource {
    fn decode(&self) -> Result<DynamicImage, ExtractError>;

    /// Short description used in log lines.
    fn describe(&self) -> String {
        String::from("<image>")
    }
}

impl ImageSource for Path {
    fn decode(&self) -> Result<DynamicImage, ExtractError> {
        Ok(image::open(self)?)
    }

    fn describe(&self) -> String {
        self.display().to_string()
    }
}

impl ImageSource for PathBuf {
    fn decode(&self) -> Result<DynamicImage, ExtractError> {
        self.as_path().decode()
    }

    fn describe(&self) -> String {
        self.as_path().describe()
    }
}

impl ImageSource for [u8] {
    fn decode(&self) -> Result<DynamicImage, ExtractError> {
        Ok(image::load_from_memory(self)?)
    }

    fn describe(&self) -> String {
        format!("<{} bytes>", self.len())
    }
}

impl ImageSource for Vec<u8> {
    fn decode(&self) -> Result<DynamicImage, ExtractError> {
        self.as_slice().decode()
    }

    fn describe(&self) -> String {
        self.as_slice().describe()
    }
}

/// An image that is already decoded, e.g. a canvas owned by the caller.
impl ImageSource for DynamicImage {
    fn decode(&self) -> Result<DynamicImage, ExtractError> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("<{}x{} image>", self.width(), self.height())
    }
}

impl<T: ImageSource + ?Sized> ImageSource for &T {
    fn decode(&self) -> Result<DynamicImage, ExtractError> {
        (**self).decode()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
