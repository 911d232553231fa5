//! Write color palette reports, with color harmonies and hex and CMYK values, for images.

#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::pedantic,
    clippy::cargo,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::unwrap_in_result,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice,
    missing_docs,
    clippy::missing_docs_in_private_items,
    rustdoc::all,
    clippy::float_cmp_const,
    clippy::lossy_float_literal
)]
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::many_single_char_names,
    clippy::missing_panics_doc,
    clippy::unreadable_literal
)]

mod cli;
mod report;

#[allow(clippy::wildcard_imports)]
use cli::*;

use std::{
    ffi::OsStr,
    fmt::{self, Display},
    fs, io,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::atomic::{AtomicUsize, Ordering},
    time::Instant,
};

use chromalyze::{Analyzer, Color, ImageMetadata};
use clap::Parser;
use image::{DynamicImage, GenericImageView, ImageFormat, RgbaImage};
use log::LevelFilter;
use palette::Srgb;

#[cfg(feature = "threads")]
use rayon::prelude::*;

/// Record the running time of a function and log the elapsed time
macro_rules! time {
    ($name: literal, $func_call: expr) => {{
        let start = Instant::now();
        let result = $func_call;
        log::debug!("{} took {}ms", $name, start.elapsed().as_millis());
        result
    }};
}

/// Error cases for analyzing images and writing their reports
#[derive(Debug)]
enum ProcessError {
    /// The input path is neither a file nor a directory
    InvalidInput(PathBuf),
    /// Failed to search the input directory for images
    Search(io::Error),
    /// Failed to read or decode the image file
    Load(image::ImageError),
    /// The image could not be analyzed
    Analysis(chromalyze::Error),
    /// Failed to write the report
    Write(io::Error),
    /// Failed to start the worker threads
    #[cfg(feature = "threads")]
    ThreadPool(rayon::ThreadPoolBuildError),
}

impl Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProcessError::InvalidInput(path) => {
                write!(f, "Invalid input path: {} is not a file or directory", path.display())
            }
            ProcessError::Search(e) => write!(f, "Failed to search the input directory: {e}"),
            ProcessError::Load(e) => write!(f, "Failed to load the image file: {e}"),
            ProcessError::Analysis(e) => write!(f, "Failed to analyze the image: {e}"),
            ProcessError::Write(e) => write!(f, "Failed to write the report: {e}"),
            #[cfg(feature = "threads")]
            ProcessError::ThreadPool(e) => write!(f, "Failed to start the worker threads: {e}"),
        }
    }
}

fn main() -> ExitCode {
    let options = Options::parse();
    init_logger(options.verbose);

    // Returning Result<_> uses Debug printing instead of Display
    match run(&options) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failures) => {
            log::error!("{failures} image(s) could not be analyzed");
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Log at info level, or debug level with `--verbose`, unless overridden by `RUST_LOG`
fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Analyze the input file or directory, returning the number of images that failed
fn run(options: &Options) -> Result<usize, ProcessError> {
    let analyzer = Analyzer::new(options.analysis_config());
    let input = &options.input;

    if input.is_file() {
        log::info!("Analyzing single file: {}", input.display());
        process_image(input, &options.output, &analyzer, options)?;
        Ok(0)
    } else if input.is_dir() {
        log::info!("Batch processing directory: {}", input.display());
        let images = find_images(input).map_err(ProcessError::Search)?;

        if images.is_empty() {
            log::warn!("No supported images found in {}", input.display());
        } else {
            log::info!("Found {} images", images.len());
        }

        let batch = Batch::new(input, images.len(), &analyzer, options);
        let failures = process_batch(&images, &batch)?;
        log::info!("Processed {} images, {failures} failed", batch.progress.finished());
        Ok(failures)
    } else {
        Err(ProcessError::InvalidInput(input.clone()))
    }
}

/// Counts the finished images of a batch
struct Progress {
    /// Number of images in the batch
    total: usize,
    /// Number of images finished so far, successfully or not
    finished: AtomicUsize,
}

impl Progress {
    /// Start counting a batch of `total` images
    fn new(total: usize) -> Self {
        Self { total, finished: AtomicUsize::new(0) }
    }

    /// Record a finished image, returning the number of finished images including this one
    fn advance(&self) -> usize {
        self.finished.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Number of images finished so far
    fn finished(&self) -> usize {
        self.finished.load(Ordering::Relaxed)
    }
}

/// Everything shared by the images of a directory batch
struct Batch<'a> {
    /// The input directory, whose layout is mirrored in the output directory
    root: &'a Path,
    /// Shared by all worker threads
    analyzer: &'a Analyzer,
    /// The parsed command line
    options: &'a Options,
    /// Counts finished images for the log
    progress: Progress,
}

impl<'a> Batch<'a> {
    /// Prepare a batch of `total` images found under `root`
    fn new(root: &'a Path, total: usize, analyzer: &'a Analyzer, options: &'a Options) -> Self {
        Self { root, analyzer, options, progress: Progress::new(total) }
    }

    /// Analyze an image, logging the outcome instead of returning it so the batch can continue
    fn process(&self, path: &Path) -> bool {
        log::debug!("Processing {}...", path.display());
        let report_dir = report_dir(&self.options.output, self.root, path);
        let result = process_image(path, &report_dir, self.analyzer, self.options);

        let finished = self.progress.advance();
        match result {
            Ok(_) => {
                log::info!("[{finished}/{}] {}", self.progress.total, path.display());
                true
            }
            Err(e) => {
                log::error!("[{finished}/{}] Error processing {}: {e}", self.progress.total, path.display());
                false
            }
        }
    }
}

/// Analyze every image in parallel, returning the number of images that failed
#[cfg(feature = "threads")]
fn process_batch(images: &[PathBuf], batch: &Batch) -> Result<usize, ProcessError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(usize::from(batch.options.threads))
        .build()
        .map_err(ProcessError::ThreadPool)?;

    Ok(pool.install(|| images.par_iter().filter(|path| !batch.process(path)).count()))
}

/// Analyze every image on a single thread, returning the number of images that failed
#[cfg(not(feature = "threads"))]
fn process_batch(images: &[PathBuf], batch: &Batch) -> Result<usize, ProcessError> {
    Ok(images.iter().filter(|path| !batch.process(path)).count())
}

/// The directory for an image's report: `output` joined with the image's directory relative to `root`
///
/// Mirroring the input layout keeps images with the same file name in different
/// directories from overwriting each other's reports.
fn report_dir(output: &Path, root: &Path, image: &Path) -> PathBuf {
    image
        .parent()
        .and_then(|parent| parent.strip_prefix(root).ok())
        .map_or_else(|| output.to_path_buf(), |relative| output.join(relative))
}

/// Load an image, analyze it, and save its report in `report_dir`, returning the path of the report
fn process_image(
    path: &Path,
    report_dir: &Path,
    analyzer: &Analyzer,
    options: &Options,
) -> Result<PathBuf, ProcessError> {
    // Input
    let (image, format) = time!("Image loading", load_image(path)).map_err(ProcessError::Load)?;
    let (width, height) = image.dimensions();
    let image = generate_thumbnail(image, options.max_pixels);
    let pixels = opaque_pixels(&image.into_rgba8());

    // Processing
    let analysis = time!(
        "Analysis",
        analyzer.analyze(&pixels, ImageMetadata::new(width, height, format))
    )
    .map_err(ProcessError::Analysis)?;

    // Output
    let file_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());

    if options.swatch {
        report::print_swatches(&file_name, &analysis);
    }

    let report = report::save_report(report_dir, &file_name, &analysis).map_err(ProcessError::Write)?;
    log::info!("Analysis saved to {}", report.display());

    Ok(report)
}

/// Recursively find all files in `dir` with a supported image extension, sorted by path
///
/// Symbolic links to directories are not followed, so links back to an ancestor cannot cause a loop.
fn find_images(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    let mut dirs = vec![dir.to_path_buf()];

    while let Some(dir) = dirs.pop() {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            // unlike Path::is_dir, this does not follow symlinks
            if entry.file_type()?.is_dir() {
                dirs.push(path);
            } else if is_supported(&path) {
                images.push(path);
            }
        }
    }

    images.sort();
    Ok(images)
}

/// Whether the file extension belongs to an image format enabled in this build
fn is_supported(path: &Path) -> bool {
    let Some(extension) = path.extension().and_then(OsStr::to_str) else {
        return false;
    };

    match extension.to_ascii_lowercase().as_str() {
        "png" => cfg!(feature = "png"),
        "jpg" | "jpeg" => cfg!(feature = "jpeg"),
        "tif" | "tiff" => cfg!(feature = "tiff"),
        "webp" => cfg!(feature = "webp"),
        "gif" => cfg!(feature = "gif"),
        "bmp" => cfg!(feature = "bmp"),
        "qoi" => cfg!(feature = "qoi"),
        _ => false,
    }
}

/// The conventional name of an image format, e.g. `JPEG` or `PNG`
fn format_name(format: ImageFormat) -> String {
    let name = match format {
        ImageFormat::Png => "PNG",
        ImageFormat::Jpeg => "JPEG",
        ImageFormat::Tiff => "TIFF",
        ImageFormat::WebP => "WEBP",
        ImageFormat::Gif => "GIF",
        ImageFormat::Bmp => "BMP",
        ImageFormat::Qoi => "QOI",
        _ => format.extensions_str().first().copied().unwrap_or("UNKNOWN"),
    };

    name.to_ascii_uppercase()
}

/// Load the image at the given path along with the name of its format
fn load_image(path: &Path) -> Result<(DynamicImage, String), image::ImageError> {
    let reader = image::io::Reader::open(path)?.with_guessed_format()?;
    let format = reader.format().map_or_else(|| "UNKNOWN".to_owned(), format_name);
    let image = reader.decode()?;
    Ok((image, format))
}

/// Create a thumbnail with at most `max_pixels` pixels if the image has more than `max_pixels` pixels
fn generate_thumbnail(image: DynamicImage, max_pixels: u32) -> DynamicImage {
    // The number of pixels should be < u64::MAX, since image dimensions are (u32, u32)
    let (width, height) = image.dimensions();
    let pixels = u64::from(width) * u64::from(height);
    if pixels <= u64::from(max_pixels) {
        image
    } else {
        // (u64 as f64) only gives innaccurate results for very large u64
        // I.e, only when pixels is in the order of quintillions
        #[allow(clippy::cast_precision_loss)]
        let scale = (f64::from(max_pixels) / pixels as f64).sqrt();

        // multiplying by a positive factor < 1
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (thumb_width, thumb_height) = (
            (f64::from(width) * scale) as u32,
            (f64::from(height) * scale) as u32,
        );

        log::debug!("Creating a thumbnail with dimensions {thumb_width}x{thumb_height}");

        time!(
            "Image thumbnail",
            image.thumbnail(thumb_width, thumb_height)
        )
    }
}

/// Collect the colors of all pixels that are not fully transparent
fn opaque_pixels(image: &RgbaImage) -> Vec<Color> {
    image
        .pixels()
        .filter(|pixel| pixel[3] != 0)
        .map(|&image::Rgba([r, g, b, _])| Srgb::new(r, g, b))
        .collect()
}
