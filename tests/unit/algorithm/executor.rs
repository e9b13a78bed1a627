//! Tests for layer evaluation, commit and the pixelation entry points

#[cfg(test)]
mod tests {
    use grain::GrainError;
    use grain::RasterBuffer;
    use grain::algorithm::executor::{
        FlattenDecision, PixelateConfig, Pixelator, apply_layer, commit_layer, evaluate_layer,
        pixelate, pixelate_rgba,
    };
    use grain::algorithm::schedule::LayerGeometry;
    use grain::algorithm::threshold::Threshold;
    use grain::io::configuration::DEFAULT_THRESHOLD;

    fn gradient(width: usize, height: usize) -> RasterBuffer {
        let mut raster = RasterBuffer::new(width, height).unwrap();
        for y in 0..height {
            for x in 0..width {
                let r = ((x * 255) / width.max(1)) as u8;
                let g = ((y * 255) / height.max(1)) as u8;
                raster.set_pixel(x, y, [r, g, r ^ g, 200]);
            }
        }
        raster
    }

    fn checkerboard(size: usize) -> RasterBuffer {
        let mut raster = RasterBuffer::new(size, size).unwrap();
        for y in 0..size {
            for x in 0..size {
                let v = if (x + y) % 2 == 0 { 0 } else { 255 };
                raster.set_pixel(x, y, [v, v, v, 255]);
            }
        }
        raster
    }

    // Tests default config uses the stored default threshold in parallel mode
    // Verified by changing the default threshold
    #[test]
    fn test_default_config() {
        let config = PixelateConfig::default();
        assert_eq!(config.threshold.value(), DEFAULT_THRESHOLD);
        assert!(config.parallel);
    }

    // Tests evaluation only selects cells within the threshold
    // Verified by inverting the admission check
    #[test]
    fn test_evaluate_layer_selects_flat_cells() {
        // Left 2x2 block is flat, right 2x2 block is a checker
        let mut raster = RasterBuffer::filled(4, 2, [40, 40, 40, 255]).unwrap();
        raster.set_pixel(2, 0, [0, 0, 0, 255]);
        raster.set_pixel(3, 0, [255, 255, 255, 255]);
        raster.set_pixel(2, 1, [255, 255, 255, 255]);
        raster.set_pixel(3, 1, [0, 0, 0, 255]);

        let geometry = LayerGeometry::new(4, 2, 2);
        let decisions = evaluate_layer(&raster, &geometry, Threshold::from(5_u32), false);

        assert_eq!(
            decisions,
            vec![FlattenDecision {
                xs: 0..2,
                ys: 0..2,
                color: [40, 40, 40],
            }]
        );
    }

    // Tests parallel and sequential evaluation agree
    // Verified by skipping odd rows in the parallel path
    #[test]
    fn test_evaluate_layer_parallel_matches_sequential() {
        let raster = gradient(37, 23);
        for cell_size in [2, 4, 8, 16, 32, 64] {
            let geometry = LayerGeometry::new(37, 23, cell_size);
            let mut parallel = evaluate_layer(&raster, &geometry, Threshold::from(20_u32), true);
            let mut sequential =
                evaluate_layer(&raster, &geometry, Threshold::from(20_u32), false);
            let key = |d: &FlattenDecision| (d.ys.start, d.xs.start);
            parallel.sort_by_key(key);
            sequential.sort_by_key(key);
            assert_eq!(parallel, sequential, "cell size {cell_size}");
        }
    }

    // Tests commit writes color channels only
    // Verified by writing the full pixel including alpha
    #[test]
    fn test_commit_layer_preserves_alpha() {
        let mut raster = RasterBuffer::filled(3, 3, [1, 2, 3, 77]).unwrap();
        commit_layer(
            &mut raster,
            &[FlattenDecision {
                xs: 1..3,
                ys: 0..2,
                color: [9, 8, 7],
            }],
        );

        assert_eq!(raster.pixel(1, 0), Some([9, 8, 7, 77]));
        assert_eq!(raster.pixel(2, 1), Some([9, 8, 7, 77]));
        assert_eq!(raster.pixel(0, 0), Some([1, 2, 3, 77]));
        assert_eq!(raster.pixel(1, 2), Some([1, 2, 3, 77]));
    }

    // Tests layer summary counts cells and flattened cells
    // Verified by reporting decisions before filtering
    #[test]
    fn test_apply_layer_summary() {
        let mut raster = checkerboard(4);
        let summary = apply_layer(&mut raster, 2, Threshold::from(0_u32), true);

        assert_eq!(summary.cell_size, 2);
        assert_eq!(summary.cells, 4);
        assert_eq!(summary.flattened, 0);
        assert_eq!(raster, checkerboard(4));
    }

    // Tests checkerboard collapses to mid-gray at a large threshold
    // Verified by rounding 127.5 down
    #[test]
    fn test_checkerboard_high_threshold() {
        let mut raster = checkerboard(4);
        let summaries = pixelate(&mut raster, Threshold::from(255_u32));

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].flattened, 4);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(raster.pixel(x, y), Some([128, 128, 128, 255]));
            }
        }
    }

    // Tests checkerboard is untouched at threshold zero
    // Verified by using strict comparison reversed
    #[test]
    fn test_checkerboard_zero_threshold() {
        let mut raster = checkerboard(4);
        let summaries = pixelate(&mut raster, Threshold::from(0_u32));

        assert!(summaries.iter().all(|summary| summary.flattened == 0));
        assert_eq!(raster, checkerboard(4));
    }

    // Tests layers compound: a later layer sees earlier flattening
    // Verified by evaluating every layer against the original input
    #[test]
    fn test_layers_compound() {
        // Each 2x2 quadrant has one pixel 4 brighter than the other three.
        // Against the untouched input the 4x4 cell has loss 2.25.
        let mut raster = RasterBuffer::new(4, 4).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                let base: u8 = if x < 2 { 100 } else { 104 };
                let v = base + if x % 2 == 1 && y % 2 == 1 { 4 } else { 0 };
                raster.set_pixel(x, y, [v, v, v, 255]);
            }
        }

        let mut pixelator = Pixelator::new(PixelateConfig {
            threshold: Threshold::from(2_u32),
            parallel: false,
        });
        let summaries = pixelator.run(&mut raster, |_, _| {});

        assert_eq!(summaries[0].flattened, 4);
        assert_eq!(summaries[1].flattened, 1);
        assert_eq!(raster.distinct_colors(), 1);
        assert_eq!(raster.pixel(0, 0), Some([103, 103, 103, 255]));
    }

    // Tests callback fires once per layer in order
    // Verified by passing a zero-based layer index
    #[test]
    fn test_run_reports_layers() {
        let mut raster = gradient(20, 10);
        let mut seen = Vec::new();
        let mut pixelator = Pixelator::new(PixelateConfig::default());
        let summaries = pixelator.run(&mut raster, |layer, summary| {
            seen.push((layer, summary.cell_size));
        });

        assert_eq!(seen, vec![(1, 2), (2, 4), (3, 8), (4, 16), (5, 32)]);
        assert_eq!(summaries.len(), 5);
    }

    // Tests capture holds the input plus one frame per layer
    // Verified by not recording the initial frame
    #[test]
    fn test_run_with_capture() {
        let source = gradient(9, 5);
        let mut raster = source.clone();
        let mut pixelator = Pixelator::new(PixelateConfig::default());
        assert!(pixelator.capture().is_none());

        pixelator.enable_capture();
        pixelator.run(&mut raster, |_, _| {});

        let capture = pixelator.capture().unwrap();
        assert_eq!(capture.frame_count(), 5);
        assert_eq!(capture.frames()[0].cell_size, None);
        assert_eq!(capture.frames()[0].raster, source);
        assert_eq!(capture.frames()[4].cell_size, Some(16));
        assert_eq!(capture.frames()[4].raster, raster);
    }

    // Tests raw buffer entry point rejects bad input without writing
    // Verified by validating after mutation
    #[test]
    fn test_pixelate_rgba_validation() {
        let mut data = vec![7_u8; 16];

        assert!(matches!(
            pixelate_rgba(0, 4, &mut data, 10),
            Err(GrainError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            pixelate_rgba(2, 2, &mut data, -1),
            Err(GrainError::InvalidThreshold { value: -1 })
        ));
        assert!(matches!(
            pixelate_rgba(3, 2, &mut data, 10),
            Err(GrainError::BufferLength {
                expected: 24,
                actual: 16
            })
        ));
        assert_eq!(data, vec![7_u8; 16]);
    }

    // Tests raw buffer entry point matches the raster entry point
    // Verified by skipping the copy back into the caller buffer
    #[test]
    fn test_pixelate_rgba_matches_raster() {
        let mut raster = gradient(13, 7);
        let mut data = raster.as_raw().to_vec();

        pixelate(&mut raster, Threshold::from(15_u32));
        pixelate_rgba(13, 7, &mut data, 15).unwrap();

        assert_eq!(data, raster.as_raw());
    }
}
