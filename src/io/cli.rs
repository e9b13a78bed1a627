//! Command-line interface for batch pixelation of image files

use crate::algorithm::executor::{PixelateConfig, Pixelator};
use crate::algorithm::schedule::cell_sizes;
use crate::algorithm::threshold::Threshold;
use crate::io::configuration::{
    DEFAULT_RESIZE, DEFAULT_THRESHOLD, GIF_FRAME_DELAY_MS, LAYERS_SUFFIX,
    MAX_INTERACTIVE_THRESHOLD, OUTPUT_SUFFIX, SUPPORTED_EXTENSIONS,
};
use crate::io::error::{Result, io_error};
use crate::io::image::{dimension_summary, load_raster, resize_raster, save_png, snap_resize_factor};
use crate::io::logger::level_filter;
use crate::io::progress::ProgressManager;
use clap::Parser;
use log::{LevelFilter, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "grain")]
#[command(
    author,
    version,
    about = "Progressively pixelate images with a loss threshold"
)]
/// Command-line arguments for the pixelation tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input image file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Maximum cell loss that still gets flattened (interactive range 0-40)
    #[arg(short, long, default_value_t = i64::from(DEFAULT_THRESHOLD), allow_negative_numbers = true)]
    pub threshold: i64,

    /// Resize factor applied before pixelation (0.25-2.0, steps of 0.05)
    #[arg(short, long, default_value_t = DEFAULT_RESIZE)]
    pub resize: f64,

    /// Also write every layer as an animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Log every layer
    #[arg(short, long)]
    pub debug: bool,

    /// Evaluate cells on a single thread
    #[arg(long)]
    pub sequential: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log level implied by `--quiet` and `--debug`
    pub const fn log_level(&self) -> LevelFilter {
        level_filter(self.quiet, self.debug)
    }
}

/// Whether a path carries one of the supported image extensions
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

// Files this tool wrote itself are never picked up as inputs
fn is_generated_output(path: &Path) -> bool {
    path.file_stem()
        .map(|stem| stem.to_string_lossy())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX) || stem.ends_with(LAYERS_SUFFIX))
}

/// Orchestrates batch processing of image files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// Threshold and resize factor are validated before any file is touched.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The threshold is negative or the resize factor is out of range
    /// - The target is not a supported image or a directory
    /// - Loading, pixelating or saving any file fails
    pub fn process(&mut self) -> Result<()> {
        let config = PixelateConfig {
            threshold: Threshold::new(self.cli.threshold)?,
            parallel: !self.cli.sequential,
        };
        let resize = snap_resize_factor(self.cli.resize)?;

        if config.threshold.value() > MAX_INTERACTIVE_THRESHOLD {
            warn!(
                "threshold {} is above the interactive range 0-{MAX_INTERACTIVE_THRESHOLD}",
                config.threshold
            );
        }

        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index, config, resize)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if is_supported_image(&self.cli.target) {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(io_error("Target file must be a supported image"))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if path.is_file()
                    && is_supported_image(&path)
                    && !is_generated_output(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(io_error("Target must be an image file or directory"))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            info!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(
        &mut self,
        input_path: &Path,
        index: usize,
        config: PixelateConfig,
        resize: f64,
    ) -> Result<()> {
        let start_time = Instant::now();
        let output_path = Self::get_output_path(input_path);

        let source = load_raster(input_path)?;
        info!(
            "{}: {}",
            input_path.display(),
            dimension_summary(source.width(), source.height(), resize)
        );
        let mut raster = resize_raster(&source, resize)?;

        if let Some(ref mut pm) = self.progress_manager {
            let layers = cell_sizes(raster.width(), raster.height()).len();
            pm.start_file(index, input_path, layers);
        }

        let mut pixelator = Pixelator::new(config);
        if self.cli.visualize {
            pixelator.enable_capture();
        }

        let progress = &mut self.progress_manager;
        let summaries = pixelator.run(&mut raster, |layer, _summary| {
            if let Some(pm) = progress.as_mut() {
                pm.update_layer(index, layer);
            }
        });

        save_png(&raster, &output_path)?;

        if let Some(capture) = pixelator.capture() {
            capture.export_gif(&Self::get_visualization_path(input_path), GIF_FRAME_DELAY_MS)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }

        let flattened: usize = summaries.iter().map(|summary| summary.flattened).sum();
        info!(
            "{} -> {} ({} layers, {} cells flattened, {} colors, {:.2?})",
            input_path.display(),
            output_path.display(),
            summaries.len(),
            flattened,
            raster.distinct_colors(),
            start_time.elapsed()
        );

        Ok(())
    }

    /// Output path for a given input: `<stem>_grain.png` in the same directory
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        Self::sibling_path(input_path, OUTPUT_SUFFIX, "png")
    }

    /// Layer animation path for a given input: `<stem>_layers.gif`
    pub fn get_visualization_path(input_path: &Path) -> PathBuf {
        Self::sibling_path(input_path, LAYERS_SUFFIX, "gif")
    }

    fn sibling_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(name)
        } else {
            PathBuf::from(name)
        }
    }
}
