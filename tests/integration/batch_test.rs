//! Integration tests for batch conversion and its notifications

#[cfg(test)]
mod batch_tests {
    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use image_morph::{run_batch, spawn_batch, BatchJob, BatchOutcome, ConversionUpdate};
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::sync::mpsc::channel;
    use tempfile::tempdir;

    fn write_inputs(dir: &Path, count: usize, broken: Option<usize>) -> Vec<PathBuf> {
        (0..count)
            .map(|i| {
                let path = dir.join(format!("img_{}.png", i));
                if Some(i) == broken {
                    fs::write(&path, "definitely not a png").unwrap();
                } else if i % 2 == 0 {
                    RgbaImage::from_pixel(16, 16, Rgba([i as u8 * 20, 0, 0, 100]))
                        .save_with_format(&path, ImageFormat::Png)
                        .unwrap();
                } else {
                    RgbImage::from_pixel(16, 16, Rgb([0, i as u8 * 20, 0]))
                        .save_with_format(&path, ImageFormat::Png)
                        .unwrap();
                }
                path
            })
            .collect()
    }

    #[test]
    fn test_one_broken_file_does_not_block_siblings() {
        let input_dir = tempdir().unwrap();
        let output_dir = tempdir().unwrap();
        let broken = 2;
        let files = write_inputs(input_dir.path(), 5, Some(broken));

        let job = BatchJob::new(files.clone(), "JPG", output_dir.path());
        let (sender, _receiver) = channel();
        let outcome = run_batch(&job, &sender);

        assert!(!outcome.all_succeeded);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].starts_with("Failed to convert img_2.png: "), "{}", outcome.errors[0]);
        assert!(outcome.errors[0].contains("Cannot identify image file"));

        for (i, _) in files.iter().enumerate() {
            let output = output_dir.path().join(format!("img_{}.jpg", i));
            if i == broken {
                assert!(!output.exists());
            } else {
                let img = image::open(&output).unwrap();
                assert!(!img.color().has_alpha());
            }
        }
    }

    #[test]
    fn test_errors_keep_input_order() {
        let input_dir = tempdir().unwrap();
        let output_dir = tempdir().unwrap();
        let mut files = write_inputs(input_dir.path(), 3, Some(0));
        files.push(input_dir.path().join("missing.png"));

        let job = BatchJob::new(files, "png", output_dir.path());
        let (sender, _receiver) = channel();
        let outcome = run_batch(&job, &sender);

        assert!(!outcome.all_succeeded);
        assert_eq!(outcome.errors.len(), 2);
        assert!(outcome.errors[0].contains("img_0.png"));
        assert!(outcome.errors[1].contains("missing.png"));
        assert!(outcome.errors[1].contains("Input file not found"));
    }

    #[test]
    fn test_empty_batch_is_an_immediate_success() {
        let output_dir = tempdir().unwrap();
        let job = BatchJob::new(Vec::new(), "png", output_dir.path());
        let (sender, receiver) = channel();

        let outcome = run_batch(&job, &sender);
        drop(sender);

        assert_eq!(outcome, BatchOutcome { all_succeeded: true, errors: Vec::new() });
        assert_eq!(receiver.iter().count(), 0);
    }

    #[test]
    fn test_notifications_are_ordered_and_end_at_100() {
        let input_dir = tempdir().unwrap();
        let output_dir = tempdir().unwrap();
        let files = write_inputs(input_dir.path(), 3, Some(1));

        let job = BatchJob::new(files, "gif", output_dir.path());
        let (sender, receiver) = channel();
        run_batch(&job, &sender);
        drop(sender);
        let updates: Vec<ConversionUpdate> = receiver.iter().collect();

        assert_eq!(
            updates,
            vec![
                ConversionUpdate::FileStarted("img_0.png".to_string(), "Converting 1/3...".to_string()),
                ConversionUpdate::Progress(33),
                ConversionUpdate::FileStarted("img_1.png".to_string(), "Converting 2/3...".to_string()),
                ConversionUpdate::Progress(67),
                ConversionUpdate::FileStarted("img_2.png".to_string(), "Converting 3/3...".to_string()),
                ConversionUpdate::Progress(100),
            ]
        );
    }

    #[test]
    fn test_spawned_batch_completes_with_outcome() {
        let input_dir = tempdir().unwrap();
        let output_dir = tempdir().unwrap();
        let files = write_inputs(input_dir.path(), 4, None);

        let job = BatchJob::new(files, "WEBP", output_dir.path().join("converted"));
        let (receiver, handle) = spawn_batch(job).unwrap();
        let updates: Vec<ConversionUpdate> = receiver.iter().collect();
        handle.join().unwrap();

        let progress: Vec<u8> = updates
            .iter()
            .filter_map(|update| match update {
                ConversionUpdate::Progress(value) => Some(*value),
                _ => None,
            })
            .collect();
        assert_eq!(progress, vec![25, 50, 75, 100]);
        assert_eq!(updates.last(), Some(&ConversionUpdate::Completed(BatchOutcome::default())));

        for i in 0..4 {
            assert!(output_dir.path().join("converted").join(format!("img_{}.webp", i)).is_file());
        }
    }

    #[test]
    fn test_single_job_writes_the_chosen_path() {
        let input_dir = tempdir().unwrap();
        let output_dir = tempdir().unwrap();
        let files = write_inputs(input_dir.path(), 1, None);
        let chosen = output_dir.path().join("holiday.bmp");

        let job = BatchJob::single(files[0].clone(), "BMP", &chosen);
        let (sender, _receiver) = channel();
        let outcome = run_batch(&job, &sender);

        assert!(outcome.all_succeeded, "{:?}", outcome.errors);
        assert!(chosen.is_file());
        assert!(!output_dir.path().join("img_0.bmp").exists());
    }

    #[test]
    fn test_batch_survives_dropped_receiver() {
        let input_dir = tempdir().unwrap();
        let output_dir = tempdir().unwrap();
        let files = write_inputs(input_dir.path(), 2, None);

        let job = BatchJob::new(files, "png", output_dir.path());
        let (sender, receiver) = channel();
        drop(receiver);
        let outcome = run_batch(&job, &sender);

        assert!(outcome.all_succeeded);
        assert!(output_dir.path().join("img_1.png").is_file());
    }
}
