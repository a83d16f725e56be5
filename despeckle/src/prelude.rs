// Parameters
pub use crate::config::{
    Config, ConfigError, ConfigOverrides, MIN_EXPAND, MIN_WINDOW_SIZE, NormalizedConfig,
    normalize_filter_size,
};

// Error handling
pub use crate::error::{Error, Result};

// Image types
pub use crate::image::{Image, PREVIEW_MAX_SIZE, Rgb};

// Pipeline
pub use crate::denoise::{Denoised, denoise, denoise_with_mask};
pub use crate::noise_mask::{contrast_mask, dark_mask, noise_mask, speckle_mask};

// Building blocks
pub use crate::luminance::{luminance, rgb_to_luma};
pub use crate::mask_dilation::dilate_mask;
pub use crate::median_filter::{median_filter, median_filter_rgb};

// Front-end support
pub use crate::session::{PreviewSession, SessionEvent};
pub use crate::settings::Settings;
