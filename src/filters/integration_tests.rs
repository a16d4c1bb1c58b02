// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::test_support::{Event, RecordingObserver};
use crate::engine::{GraphBuilder, Pipeline, Port};
use crate::filters::test_images::solid_rgb;
use crate::filters::texture::tests::stub_descriptor;
use crate::filters::{
    Collector, CropImage, CropRect, ImageHistogram, LoadImage, TextureFeatureFilter,
    TextureSettings,
};

/// Integration tests running the concrete filters through the engine
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_fans_out_to_histogram_and_texture() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img1.png");
        solid_rgb(32, 24, [40, 80, 120]).save(&path).unwrap();

        let mut builder = GraphBuilder::new();
        let source = builder.add_source("Source");
        let load = builder.add_filter(LoadImage::new());
        let crop = builder.add_filter(CropImage::new(Some(CropRect::new(4, 4, 20, 20))));
        let histogram = builder.add_filter(ImageHistogram::default());
        let texture = builder.add_filter(TextureFeatureFilter::new(
            stub_descriptor(),
            TextureSettings::default(),
        ));
        let histograms = Collector::new("Histograms");
        let histogram_frames = histograms.frames();
        let histograms = builder.add_filter(histograms);
        let textures = Collector::new("Textures");
        let texture_frames = textures.frames();
        let textures = builder.add_filter(textures);

        builder.connect(source.output(0), load.input(0)).unwrap();
        builder.connect(load.output(0), crop.input(0)).unwrap();
        builder.connect(crop.output(0), histogram.input(0)).unwrap();
        let second = builder.add_output(crop).unwrap();
        builder.connect(second, texture.input(0)).unwrap();
        builder.connect(histogram.output(0), histograms.input(0)).unwrap();
        builder.connect(texture.output(0), textures.input(0)).unwrap();

        let mut pipeline = Pipeline::new(builder.freeze().unwrap(), source).unwrap();
        let observer = RecordingObserver::new();
        pipeline.observe(observer.clone());
        let report = pipeline.run([path]);

        assert!(report.diagnostics().is_empty(), "{:?}", report.diagnostics());

        let executions: Vec<(String, Port)> = observer
            .events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Executing { node, port, .. } => Some((node, port)),
                _ => None,
            })
            .collect();
        let count = |name: &str| executions.iter().filter(|(node, _)| node == name).count();
        assert_eq!(count("Image Load"), 1);
        assert_eq!(count("Image Crop"), 1);
        assert_eq!(count("Histogram"), 1);
        assert_eq!(count("GLCM"), 1);

        let arrivals: Vec<(String, Port)> = observer
            .events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Executing { node, from, port, .. } if from == crop => Some((node, port)),
                _ => None,
            })
            .collect();
        assert_eq!(
            arrivals,
            vec![
                ("Histogram".to_string(), Port::Output(0)),
                ("GLCM".to_string(), Port::Output(1)),
            ]
        );

        let histogram_frame = histogram_frames.last().unwrap();
        assert_eq!(histogram_frame.producing_node(), histogram);
        assert_eq!(histogram_frame.payload().as_histogram().unwrap().total(), 16 * 16);

        let texture_frame = texture_frames.last().unwrap();
        assert_eq!(texture_frame.producing_node(), texture);
        assert!(!texture_frame.payload().as_texture().unwrap().is_empty());
    }

    #[test]
    fn unreadable_image_only_fails_its_own_item() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.png");
        solid_rgb(8, 8, [1, 2, 3]).save(&good).unwrap();
        let missing = dir.path().join("missing.png");

        let mut builder = GraphBuilder::new();
        let source = builder.add_source("Source");
        let load = builder.add_filter(LoadImage::new());
        let sink = Collector::new("Images");
        let frames = sink.frames();
        let sink = builder.add_filter(sink);
        builder.connect(source.output(0), load.input(0)).unwrap();
        builder.connect(load.output(0), sink.input(0)).unwrap();

        let mut pipeline = Pipeline::new(builder.freeze().unwrap(), source).unwrap();
        let report = pipeline.run([missing, good]);

        assert_eq!(frames.len(), 1);
        let errors: Vec<_> = report.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].node(), load);
        let image = frames.snapshot()[0].payload().as_image().cloned().unwrap();
        assert_eq!((image.width(), image.height()), (8, 8));
    }
}
