mod config;
mod denoise;
mod error;
mod image;
mod luminance;
mod mask_dilation;
mod median_filter;
mod noise_mask;
mod session;
mod settings;

#[cfg(test)]
mod test_utils;

pub mod prelude;

pub use prelude::*;
