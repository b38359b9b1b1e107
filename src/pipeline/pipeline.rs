use anyhow::Error;
use log::{error, info};
use opencv::core::Mat;
use crate::features::{Feature, FeatureInput, Summary};
use crate::helper::annotator::draw_all;
use crate::modules::response::parse_response;
use crate::modules::vision_client::VisionClient;
use crate::pipeline::archive::ResponseArchiver;
use crate::utils::image::{decode_image, image_size, resize_to_width};

/// Result of one feature invocation: the annotated image at its original size
/// and the text shown next to it.
#[derive(Debug)]
pub struct FeatureOutcome {
    pub image: Mat,
    pub summary: Summary,
    pub drawn: usize,
}

impl FeatureOutcome {
    /// display_image returns a copy of the annotated image scaled to `width`.
    pub fn display_image(&self, width: i32) -> Result<Mat, Error> {
        resize_to_width(&self.image, width)
    }
}

#[derive(Debug, Clone)]
pub struct AnnotationPipeline<C: VisionClient> {
    client: C,
    archiver: ResponseArchiver,
    pub display_width: i32,
}

impl<C: VisionClient> AnnotationPipeline<C> {

    /// new initializes new instance of the pipeline
    pub fn new(client: C, archiver: ResponseArchiver, display_width: i32) -> Self {
        AnnotationPipeline {
            client,
            archiver,
            display_width,
        }
    }

    /// run calls the service for one feature and draws its findings on the uploaded image.
    ///
    /// The raw response is archived before anything is decoded or drawn. When the
    /// call fails nothing is archived and the image is left alone.
    ///
    /// # Arguments
    /// * `feature` - the feature rules to apply
    /// * `input` - uploaded image bytes
    ///
    /// # Returns
    /// * `Result<FeatureOutcome, Error>`
    pub async fn run<F: Feature>(&self, feature: &F, input: &FeatureInput) -> Result<FeatureOutcome, Error> {
        let request = feature.request(input)?;
        info!("pipeline - {} calling {} ({} bytes)", feature.name(), request.operation(), request.payload_size());

        let raw = match self.client.call(&request).await {
            Ok(raw) => raw,
            Err(e) => {
                error!("pipeline - {} failed: {e}", feature.name());
                return Err(Error::from(e))
            }
        };
        self.archiver.save(&raw)?;

        let mut img = decode_image(&input.image)?;
        let response = parse_response::<F::Response>(&raw)?;
        let (width, height) = image_size(&img)?;

        let annotations = feature.annotate(&response, width, height);
        draw_all(&mut img, &annotations.requests);
        let drawn = annotations.requests.len();
        info!("pipeline - {} drew {drawn} annotations on {width}x{height} image", feature.name());

        Ok(FeatureOutcome {
            image: img,
            summary: annotations.summary,
            drawn,
        })
    }
}
