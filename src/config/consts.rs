/// Default tracing filter directive when neither `RUST_LOG` nor the settings give one
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Pixels with every channel at or above this value count as glare
pub const DEFAULT_INPAINT_THRESHOLD: u8 = 252;
/// Neighbourhood radius, in pixels, used to refill glare
pub const DEFAULT_INPAINT_RADIUS: u32 = 3;
/// Largest accepted inpaint radius; the window is `(2r + 1)^2` pixels per glare pixel
pub const MAX_INPAINT_RADIUS: u32 = 64;

/// Target width of the resize stage
pub const DEFAULT_RESIZE_WIDTH: u32 = 1280;
/// Target height of the resize stage (used when the aspect ratio is not kept)
pub const DEFAULT_RESIZE_HEIGHT: u32 = 960;
pub const DEFAULT_RESIZE_KEEP_ASPECT_RATIO: bool = true;
pub const DEFAULT_RESIZE_UPSIZE: bool = false;

/// Default crop box as (left, top, right, bottom)
pub const DEFAULT_CROP_RECT: (u32, u32, u32, u32) = (160, 0, 960, 960);

/// One bucket per 8-bit gray level
pub const DEFAULT_HISTOGRAM_BINS: usize = 256;
pub const MAX_HISTOGRAM_BINS: usize = 256;

/// Pixel distances 1..=5
pub const DEFAULT_TEXTURE_DISTANCES: u32 = 5;
/// Angles every 45 degrees over [0, 180]
pub const DEFAULT_TEXTURE_ANGLE_STEP: f64 = 45.0;
/// Smallest accepted angle step, giving at most 181 angles
pub const MIN_TEXTURE_ANGLE_STEP: f64 = 1.0;
