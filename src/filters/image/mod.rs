// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod convert;
pub mod crop;
pub mod histogram;
pub mod inpaint;
pub mod load;
pub mod resize;
pub mod sobel;

pub use convert::{ColorMode, ConvertImage};
pub use crop::{CropImage, CropRect};
pub use histogram::ImageHistogram;
pub use inpaint::{ImageInpaint, InpaintSettings};
pub use load::LoadImage;
pub use resize::{ResizeImage, ResizeSettings};
pub use sobel::SobelEdge;
