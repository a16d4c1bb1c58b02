// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The texture application's standard pipeline, wired from [`Settings`].
//!
//! ```text
//! Source -> Image Load -> Image Inpaint -> Image Size -> Image Crop
//!   Image Crop[0] -> Histogram -> "Histograms"
//!   Image Crop[1] -> Image Convert (L)
//!     Image Convert (L)[0] -> GLCM -> "Texture Features"   (with a descriptor)
//!                          -> "Grayscale"                  (without one)
//!     Image Convert (L)[1] -> Sobel Edge                   (when `edges` is set)
//!       Sobel Edge[0] -> "Horizontal Edges"
//!       Sobel Edge[1] -> "Vertical Edges"
//! ```

use crate::config::Settings;
use crate::engine::{GraphBuilder, NodeId, OutputPinId, PayloadKind, Pipeline};
use crate::errors::{FilterError, GraphError};
use crate::filters::{
    CollectedFrames, Collector, ConvertImage, CropImage, ImageHistogram, ImageInpaint, LoadImage,
    ResizeImage, SobelEdge, TextureDescriptor, TextureFeatureFilter,
};

pub const HISTOGRAM_SINK: &str = "Histograms";
pub const TEXTURE_SINK: &str = "Texture Features";
pub const GRAYSCALE_SINK: &str = "Grayscale";
pub const HORIZONTAL_EDGES_SINK: &str = "Horizontal Edges";
pub const VERTICAL_EDGES_SINK: &str = "Vertical Edges";

/// The built pipeline plus handles to what each terminal collector receives.
pub struct DefaultPipeline {
    pub pipeline: Pipeline,
    pub sinks: Vec<(String, CollectedFrames)>,
}

impl DefaultPipeline {
    pub fn sink(&self, name: &str) -> Option<&CollectedFrames> {
        self.sinks
            .iter()
            .find(|(sink, _)| sink == name)
            .map(|(_, frames)| frames)
    }
}

/// Failure to assemble the standard pipeline.
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Filter(#[from] FilterError),
}

impl From<crate::errors::WiringError> for TopologyError {
    fn from(err: crate::errors::WiringError) -> Self {
        TopologyError::Graph(err.into())
    }
}

struct Wiring {
    builder: GraphBuilder,
    sinks: Vec<(String, CollectedFrames)>,
}

impl Wiring {
    fn collect(
        &mut self,
        from: OutputPinId,
        name: &str,
        kind: PayloadKind,
    ) -> Result<NodeId, TopologyError> {
        let collector = Collector::accepting(name, kind);
        self.sinks.push((name.to_string(), collector.frames()));
        let node = self.builder.add_filter(collector);
        self.builder.connect(from, node.input(0))?;
        Ok(node)
    }
}

/// Builds the standard pipeline. The source's stored items are the
/// configured `inputs`.
pub fn build_default_pipeline(
    settings: &Settings,
    descriptor: Option<Box<dyn TextureDescriptor>>,
) -> Result<DefaultPipeline, TopologyError> {
    let mut wiring = Wiring {
        builder: GraphBuilder::new(),
        sinks: Vec::new(),
    };
    let builder = &mut wiring.builder;

    let source = match settings.default_items() {
        Some(items) => builder.add_source_with_defaults("Source", items),
        None => builder.add_source("Source"),
    };
    let load = builder.add_filter(LoadImage::new());
    let inpaint = builder.add_filter(ImageInpaint::new(settings.inpaint));
    let resize = builder.add_filter(ResizeImage::new(settings.resize));
    let crop = builder.add_filter(CropImage::new(settings.crop));
    let histogram = builder.add_filter(ImageHistogram::new(settings.histogram.bins)?);
    let convert = builder.add_filter(ConvertImage::grayscale());

    builder.connect(source.output(0), load.input(0))?;
    builder.connect(load.output(0), inpaint.input(0))?;
    builder.connect(inpaint.output(0), resize.input(0))?;
    builder.connect(resize.output(0), crop.input(0))?;
    builder.connect(crop.output(0), histogram.input(0))?;
    let gray_branch = builder.add_output(crop)?;
    builder.connect(gray_branch, convert.input(0))?;

    wiring.collect(histogram.output(0), HISTOGRAM_SINK, PayloadKind::Histogram)?;

    match descriptor {
        Some(descriptor) => {
            let texture = wiring
                .builder
                .add_filter(TextureFeatureFilter::new(descriptor, settings.texture));
            wiring.builder.connect(convert.output(0), texture.input(0))?;
            wiring.collect(texture.output(0), TEXTURE_SINK, PayloadKind::Texture)?;
        }
        None => {
            wiring.collect(convert.output(0), GRAYSCALE_SINK, PayloadKind::Image)?;
        }
    }

    if settings.edges {
        let edge_branch = wiring.builder.add_output(convert)?;
        let sobel = wiring.builder.add_filter(SobelEdge::new());
        wiring.builder.connect(edge_branch, sobel.input(0))?;
        wiring.collect(sobel.output(0), HORIZONTAL_EDGES_SINK, PayloadKind::Image)?;
        wiring.collect(sobel.output(1), VERTICAL_EDGES_SINK, PayloadKind::Image)?;
    }

    let Wiring { builder, sinks } = wiring;
    let pipeline = Pipeline::new(builder.freeze()?, source)?;
    Ok(DefaultPipeline { pipeline, sinks })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Port, TextureFeatures};
    use crate::filters::texture::tests::stub_descriptor;
    use crate::filters::test_images::solid_rgb;

    fn write_image(dir: &tempfile::TempDir, name: &str, width: u32, height: u32) -> std::path::PathBuf {
        let path = dir.path().join(name);
        solid_rgb(width, height, [90, 120, 150]).save(&path).unwrap();
        path
    }

    #[test]
    fn default_topology_without_descriptor() {
        let built = build_default_pipeline(&Settings::default(), None).unwrap();
        let graph = built.pipeline.graph();

        // Source, 6 filters, 2 collectors.
        assert_eq!(graph.node_count(), 9);
        assert_eq!(graph.connection_count(), 8);
        let crop = graph.find("Image Crop").unwrap();
        assert_eq!(graph.outputs(crop).unwrap().len(), 2);
        let names: Vec<&str> = built.sinks.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec![HISTOGRAM_SINK, GRAYSCALE_SINK]);
    }

    #[test]
    fn edges_add_a_sobel_branch() {
        let settings = Settings {
            edges: true,
            ..Settings::default()
        };
        let built = build_default_pipeline(&settings, Some(stub_descriptor())).unwrap();
        let graph = built.pipeline.graph();

        let convert = graph.find("Image Convert (L)").unwrap();
        assert_eq!(graph.outputs(convert).unwrap().len(), 2);
        assert!(graph.find("Sobel Edge").is_some());
        assert_eq!(built.sinks.len(), 4);
    }

    #[test]
    fn runs_an_image_through_every_branch() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_image(&dir, "img1.png", 1600, 1200);
        let settings = Settings {
            edges: true,
            ..Settings::default()
        };
        let mut built = build_default_pipeline(&settings, Some(stub_descriptor())).unwrap();

        let report = built.pipeline.run([path]);
        assert!(report.diagnostics().is_empty(), "{:?}", report.diagnostics());

        // 1600x1200 -> 1280x960 -> crop (160, 0, 960, 960) -> 800x960.
        let histograms = built.sink(HISTOGRAM_SINK).unwrap().snapshot();
        assert_eq!(histograms.len(), 1);
        let histogram = histograms[0].payload().as_histogram().unwrap();
        assert_eq!(histogram.total(), 800 * 960);

        let textures = built.sink(TEXTURE_SINK).unwrap().snapshot();
        let features: &TextureFeatures = textures[0].payload().as_texture().unwrap();
        assert_eq!(
            features.get("contrast", 1, crate::engine::Angle::from_degrees(0.0)),
            Some(800.0)
        );

        let horizontal = built.sink(HORIZONTAL_EDGES_SINK).unwrap().snapshot();
        let vertical = built.sink(VERTICAL_EDGES_SINK).unwrap().snapshot();
        assert_eq!(horizontal[0].producing_port(), Port::Output(0));
        assert_eq!(vertical[0].producing_port(), Port::Output(1));
    }

    #[test]
    fn configured_inputs_are_the_default_data() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            inputs: vec![
                write_image(&dir, "a.png", 64, 32),
                write_image(&dir, "b.png", 64, 32),
            ],
            crop: None,
            ..Settings::default()
        };
        let mut built = build_default_pipeline(&settings, None).unwrap();

        let report = built.pipeline.exec(None);
        assert_eq!(report.seeded(), 2);
        assert_eq!(built.sink(GRAYSCALE_SINK).unwrap().len(), 2);
    }

    #[test]
    fn invalid_histogram_bins_fail_to_build() {
        let mut settings = Settings::default();
        settings.histogram.bins = 0;
        assert!(matches!(
            build_default_pipeline(&settings, None),
            Err(TopologyError::Filter(_))
        ));
    }
}
