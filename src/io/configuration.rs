//! Engine defaults and runtime configuration constants

// Threshold settings
/// Threshold used when none is given
pub const DEFAULT_THRESHOLD: u32 = 11;
/// Upper end of the interactive threshold range; larger values are accepted
pub const MAX_INTERACTIVE_THRESHOLD: u32 = 40;

// Resize settings
/// Resize factor used when none is given
pub const DEFAULT_RESIZE: f64 = 1.0;
/// Smallest accepted resize factor
pub const MIN_RESIZE: f64 = 0.25;
/// Largest accepted resize factor
pub const MAX_RESIZE: f64 = 2.0;
/// Resize factors are snapped to multiples of this step
pub const RESIZE_STEP: f64 = 0.05;

// Input settings
/// File extensions accepted as input images (lowercase)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to pixelated output filenames
pub const OUTPUT_SUFFIX: &str = "_grain";
/// Suffix added to layer visualization filenames
pub const LAYERS_SUFFIX: &str = "_layers";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 400;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Multiplier applied to the delay of the final frame
pub const FINAL_FRAME_HOLD: u32 = 5;
