use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Error;
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use rs_rekognition_overlay::config::config::AppConfig;
use rs_rekognition_overlay::features::{
    CelebrityDetection, FaceComparison, FaceDetection, FeatureInput, LabelDetection, ModerationDetection,
};
use rs_rekognition_overlay::modules::rekognition_client::RekognitionClient;
use rs_rekognition_overlay::modules::replay_client::ReplayClient;
use rs_rekognition_overlay::modules::vision_client::VisionClient;
use rs_rekognition_overlay::pipeline::archive::ResponseArchiver;
use rs_rekognition_overlay::pipeline::pipeline::AnnotationPipeline;
use rs_rekognition_overlay::utils::image::encode_image;
use rs_rekognition_overlay::utils::utils::{is_supported_upload, FILE_TYPES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FeatureKind {
    CompareFaces,
    DetectCelebrities,
    DetectFaces,
    DetectLabels,
    DetectModerationLabels,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Feature to run
    #[arg(value_enum)]
    feature: FeatureKind,

    /// Image to analyze and annotate (the target face for compare-faces)
    #[arg(long)]
    image: PathBuf,

    /// Source face image, required by compare-faces
    #[arg(long)]
    reference: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the annotated image
    #[arg(long, default_value = "annotated.png")]
    output: PathBuf,

    /// Render a previously archived response instead of calling the service
    #[arg(long)]
    replay: Option<PathBuf>,
}

fn setup_logger() {
    let mut builder = env_logger::Builder::new();
    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_env("RUST_LOG");
    } else {
        builder.filter(None, LevelFilter::Warn);
        builder.filter(Some("rs_rekognition_overlay"), LevelFilter::Info);
    }
    builder.init();
}

fn read_upload(path: &Path) -> Result<Vec<u8>, Error> {
    if !is_supported_upload(path) {
        return Err(Error::msg(format!(
            "{} is not a supported upload, expected one of {:?}",
            path.display(),
            FILE_TYPES
        )))
    }
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) => Err(Error::msg(format!("cannot read {}: {e}", path.display()))),
    }
}

async fn annotate<C: VisionClient>(client: C, config: AppConfig, args: &Args, input: FeatureInput) -> Result<(), Error> {
    let pipeline = AnnotationPipeline::new(
        client,
        ResponseArchiver::new(&config.display.archive_path),
        config.display.width,
    );

    let outcome = match args.feature {
        FeatureKind::CompareFaces => pipeline.run(&FaceComparison::new(config.compare_faces), &input).await?,
        FeatureKind::DetectCelebrities => pipeline.run(&CelebrityDetection::new(config.celebrities), &input).await?,
        FeatureKind::DetectFaces => pipeline.run(&FaceDetection::new(config.detect_faces), &input).await?,
        FeatureKind::DetectLabels => pipeline.run(&LabelDetection::new(config.detect_labels), &input).await?,
        FeatureKind::DetectModerationLabels => pipeline.run(&ModerationDetection::new(), &input).await?,
    };

    if outcome.summary.is_none_found() {
        info!("nothing detected in {}", args.image.display());
    }
    for line in outcome.summary.lines() {
        println!("{line}");
    }

    let extension = args.output.extension().and_then(|ext| ext.to_str()).unwrap_or("png");
    let display = outcome.display_image(pipeline.display_width)?;
    let encoded = encode_image(&display, &format!(".{extension}"))?;
    fs::write(&args.output, encoded)?;
    info!("annotated image written to {}", args.output.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_logger();
    let args = Args::parse();

    if !is_supported_upload(&args.output) {
        return Err(Error::msg(format!("{} must end in one of {:?}", args.output.display(), FILE_TYPES)))
    }

    let config = AppConfig::load(args.config.as_deref())?;
    let image = read_upload(&args.image)?;
    let input = match &args.reference {
        Some(reference) => FeatureInput::with_reference(image, read_upload(reference)?),
        None => FeatureInput::new(image),
    };

    match &args.replay {
        Some(path) => annotate(ReplayClient::new(path), config, &args, input).await,
        None => {
            let client = RekognitionClient::new(config.client.clone())?;
            annotate(client, config, &args, input).await
        }
    }
}
