// SPDX-License-Identifier: MPL-2.0
//! Batch processing of image folders.
//!
//! A [`BatchJob`] applies one operation (crop or resize) to every supported
//! image in a folder, writing the results to an output folder with a
//! job-specific file name prefix. Files that fail to decode or process are
//! skipped with a warning; the run keeps going.

use crate::error::{Error, Result};
use crate::media::{self, SaveOptions};
use crate::processing::transform;
use crate::session::crop::CropRect;
use image::DynamicImage;
use std::fs;
use std::path::{Path, PathBuf};

/// The operation a batch run applies to every image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BatchJob {
    /// Crop every image to the given rectangle, clamped per image.
    Crop(CropRect),
    /// Resize every image to the given dimensions.
    Resize {
        width: u32,
        height: u32,
        /// When set, shrink to fit within the dimensions instead of
        /// stretching to them exactly.
        preserve_aspect: bool,
    },
}

impl BatchJob {
    /// The file name prefix applied to this job's outputs.
    #[must_use]
    pub fn output_prefix(&self) -> &'static str {
        match self {
            BatchJob::Crop(_) => "cropped_",
            BatchJob::Resize { .. } => "resized_",
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            BatchJob::Crop(rect) if rect.is_empty() => Err(Error::UserInput(
                "batch crop rectangle has no area".to_string(),
            )),
            BatchJob::Resize { width, height, .. } if *width == 0 || *height == 0 => {
                Err(Error::UserInput(
                    "batch resize dimensions must be at least 1x1 pixel".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }

    fn apply(&self, image: &DynamicImage) -> Result<DynamicImage> {
        match *self {
            BatchJob::Crop(rect) => {
                transform::crop(image, rect.x1, rect.y1, rect.width(), rect.height())
                    .ok_or_else(|| {
                        Error::Processing("crop rectangle lies outside the image".to_string())
                    })
            }
            BatchJob::Resize {
                width,
                height,
                preserve_aspect,
            } => {
                if preserve_aspect {
                    Ok(transform::resize_to_fit(image, width, height))
                } else {
                    Ok(transform::resize(image, width, height))
                }
            }
        }
    }
}

/// What a batch run accomplished.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchOutcome {
    /// Files processed and written successfully.
    pub processed: usize,
    /// Files considered (every supported image found in the folder).
    pub total: usize,
    /// Files that failed and were skipped.
    pub skipped: Vec<PathBuf>,
}

/// Runs a batch job over every supported image in `input_dir`, writing
/// prefixed outputs into `output_dir` (created if missing).
///
/// Per-file failures are logged and recorded in the outcome; only setup
/// problems (bad job parameters, unreadable input folder) fail the run.
pub fn run(job: &BatchJob, input_dir: &Path, output_dir: &Path) -> Result<BatchOutcome> {
    job.validate()?;

    let files = scan_image_files(input_dir)?;
    fs::create_dir_all(output_dir)?;
    tracing::info!(
        input = %input_dir.display(),
        output = %output_dir.display(),
        total = files.len(),
        "batch run started"
    );

    let mut outcome = BatchOutcome {
        total: files.len(),
        ..BatchOutcome::default()
    };
    for path in files {
        match process_file(job, &path, output_dir) {
            Ok(()) => outcome.processed += 1,
            Err(err) => {
                tracing::warn!(file = %path.display(), error = %err, "skipping file");
                outcome.skipped.push(path);
            }
        }
    }

    tracing::info!(
        processed = outcome.processed,
        skipped = outcome.skipped.len(),
        "batch run finished"
    );
    Ok(outcome)
}

/// Lists the supported image files in a folder, sorted by file name for a
/// stable processing order.
fn scan_image_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && media::is_supported_image(path))
        .collect();
    files.sort_by_key(|path| path.file_name().map(|name| name.to_owned()));
    Ok(files)
}

fn process_file(job: &BatchJob, input: &Path, output_dir: &Path) -> Result<()> {
    let image = media::load_image(input)?;
    let processed = job.apply(&image)?;
    let output = media::derived_output_path(input, output_dir, job.output_prefix());
    media::save_image(&processed, &output, &SaveOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage};
    use std::fs::File;
    use std::io::Write as _;
    use tempfile::tempdir;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([50, 100, 150])));
        image.save(dir.join(name)).expect("write test image");
    }

    #[test]
    fn resize_job_processes_every_image() {
        let input = tempdir().expect("input dir");
        let output = tempdir().expect("output dir");
        for name in ["a.png", "b.png", "c.png"] {
            write_png(input.path(), name, 40, 20);
        }

        let job = BatchJob::Resize {
            width: 10,
            height: 10,
            preserve_aspect: true,
        };
        let outcome = run(&job, input.path(), output.path()).expect("batch run");

        assert_eq!(outcome.processed, 3);
        assert_eq!(outcome.total, 3);
        assert!(outcome.skipped.is_empty());

        let resized = media::load_image(&output.path().join("resized_a.png")).expect("output");
        assert_eq!((resized.width(), resized.height()), (10, 5));
    }

    #[test]
    fn crop_job_uses_the_cropped_prefix() {
        let input = tempdir().expect("input dir");
        let output = tempdir().expect("output dir");
        write_png(input.path(), "photo.png", 100, 100);

        let rect = CropRect::from_corners(10.0, 10.0, 60.0, 40.0, 100, 100);
        let outcome = run(&BatchJob::Crop(rect), input.path(), output.path()).expect("batch run");

        assert_eq!(outcome.processed, 1);
        let cropped =
            media::load_image(&output.path().join("cropped_photo.png")).expect("output");
        assert_eq!((cropped.width(), cropped.height()), (50, 30));
    }

    #[test]
    fn corrupt_files_are_skipped_not_fatal() {
        let input = tempdir().expect("input dir");
        let output = tempdir().expect("output dir");
        for name in ["a.png", "b.png", "c.png", "d.png", "e.png"] {
            write_png(input.path(), name, 20, 20);
        }
        let mut corrupt = File::create(input.path().join("broken.png")).expect("create");
        corrupt.write_all(b"not a png").expect("write");

        let job = BatchJob::Resize {
            width: 10,
            height: 10,
            preserve_aspect: false,
        };
        let outcome = run(&job, input.path(), output.path()).expect("batch run");

        assert_eq!(outcome.total, 6);
        assert_eq!(outcome.processed, 5);
        assert_eq!(outcome.skipped.len(), 1);
        assert!(outcome.skipped[0].ends_with("broken.png"));
    }

    #[test]
    fn unsupported_files_are_ignored_entirely() {
        let input = tempdir().expect("input dir");
        let output = tempdir().expect("output dir");
        write_png(input.path(), "a.png", 20, 20);
        fs::write(input.path().join("notes.txt"), "hello").expect("write");

        let job = BatchJob::Resize {
            width: 10,
            height: 10,
            preserve_aspect: false,
        };
        let outcome = run(&job, input.path(), output.path()).expect("batch run");
        assert_eq!(outcome.total, 1);
        assert_eq!(outcome.processed, 1);
    }

    #[test]
    fn invalid_job_parameters_fail_the_run() {
        let input = tempdir().expect("input dir");
        let output = tempdir().expect("output dir");

        let job = BatchJob::Resize {
            width: 0,
            height: 10,
            preserve_aspect: false,
        };
        assert!(matches!(
            run(&job, input.path(), output.path()),
            Err(Error::UserInput(_))
        ));

        let empty = CropRect::from_corners(5.0, 5.0, 5.0, 5.0, 100, 100);
        assert!(matches!(
            run(&BatchJob::Crop(empty), input.path(), output.path()),
            Err(Error::UserInput(_))
        ));
    }

    #[test]
    fn missing_input_folder_is_an_io_error() {
        let output = tempdir().expect("output dir");
        let job = BatchJob::Resize {
            width: 10,
            height: 10,
            preserve_aspect: false,
        };
        let err = run(&job, Path::new("/nonexistent/folder"), output.path()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn empty_folder_yields_an_empty_outcome() {
        let input = tempdir().expect("input dir");
        let output = tempdir().expect("output dir");
        let job = BatchJob::Resize {
            width: 10,
            height: 10,
            preserve_aspect: false,
        };
        let outcome = run(&job, input.path(), output.path()).expect("batch run");
        assert_eq!(outcome, BatchOutcome::default());
    }
}
