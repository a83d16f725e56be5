//! Interactive preview state for front-ends with live parameter controls.
//!
//! Every parameter change arrives as one [`SessionEvent`] carrying the full
//! [`Config`]. The session re-runs the engine on the untouched original and
//! replaces the previous result; nothing from an earlier run is reused.

use std::path::Path;

use common::BitBuffer2;

use crate::config::Config;
use crate::denoise::{Denoised, denoise_with_mask};
use crate::error::Result;
use crate::image::{Image, PREVIEW_MAX_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    ParametersChanged(Config),
}

#[derive(Debug)]
pub struct PreviewSession {
    original: Image,
    config: Config,
    result: Denoised,
}

impl PreviewSession {
    /// Processes `original` with `config` right away.
    pub fn new(original: Image, config: Config) -> Self {
        let result = denoise_with_mask(&original, &config);
        Self {
            original,
            config,
            result,
        }
    }

    pub fn open<P: AsRef<Path>>(path: P, config: Config) -> Result<Self> {
        let original = Image::read_file(path)?;
        Ok(Self::new(original, config))
    }

    /// Applies `event`. Returns true when the result was recomputed.
    pub fn handle(&mut self, event: SessionEvent) -> bool {
        match event {
            SessionEvent::ParametersChanged(config) => {
                if config == self.config {
                    return false;
                }
                tracing::debug!("Parameters changed: {config:?}");
                self.result = denoise_with_mask(&self.original, &config);
                self.config = config;
                true
            }
        }
    }

    pub fn original(&self) -> &Image {
        &self.original
    }

    pub fn processed(&self) -> &Image {
        &self.result.image
    }

    pub fn mask(&self) -> &BitBuffer2 {
        &self.result.mask
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn masked_pixels(&self) -> usize {
        self.result.replaced_pixels()
    }

    pub fn original_preview(&self) -> Image {
        self.original.thumbnail(PREVIEW_MAX_SIZE.0, PREVIEW_MAX_SIZE.1)
    }

    pub fn processed_preview(&self) -> Image {
        self.result.image.thumbnail(PREVIEW_MAX_SIZE.0, PREVIEW_MAX_SIZE.1)
    }

    pub fn save_processed<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.result.image.save_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::denoise::denoise;
    use crate::test_utils::speckled_image;

    #[test]
    fn test_new_processes_immediately() {
        let image = speckled_image(60, 40, 1);
        let session = PreviewSession::new(image.clone(), Config::default());

        assert_eq!(session.original(), &image);
        assert_eq!(session.processed(), &denoise(&image, &Config::default()));
        assert!(session.masked_pixels() > 0);
    }

    #[test]
    fn test_parameter_change_recomputes_from_original() {
        let image = speckled_image(60, 40, 2);
        let mut session = PreviewSession::new(image.clone(), Config::default());

        let aggressive = Config {
            delta: 2,
            expand: 7,
            ..Config::default()
        };
        assert!(session.handle(SessionEvent::ParametersChanged(aggressive)));
        assert_eq!(session.config(), &aggressive);
        assert_eq!(session.processed(), &denoise(&image, &aggressive));
        assert_eq!(session.original(), &image);
    }

    #[test]
    fn test_switching_back_leaves_no_state() {
        let image = speckled_image(60, 40, 3);
        let mut session = PreviewSession::new(image.clone(), Config::default());
        let first = session.processed().clone();
        let first_mask = session.mask().clone();

        session.handle(SessionEvent::ParametersChanged(Config {
            threshold: 200,
            strength: 4,
            ..Config::default()
        }));
        session.handle(SessionEvent::ParametersChanged(Config::default()));

        assert_eq!(session.processed(), &first);
        assert_eq!(session.mask(), &first_mask);
    }

    #[test]
    fn test_unchanged_parameters_are_ignored() {
        let mut session = PreviewSession::new(speckled_image(20, 20, 4), Config::default());
        assert!(!session.handle(SessionEvent::ParametersChanged(Config::default())));
    }

    #[test]
    fn test_previews_fit_bounds() {
        let image = Image::new_filled(840, 300, [180, 180, 180]);
        let session = PreviewSession::new(image, Config::default());

        for preview in [session.original_preview(), session.processed_preview()] {
            assert_eq!(preview.width(), 420);
            assert_eq!(preview.height(), 150);
        }
    }

    #[test]
    fn test_open_missing_file_fails() {
        let result = PreviewSession::open("/nonexistent/dir/photo.png", Config::default());
        assert!(result.is_err());
    }
}
