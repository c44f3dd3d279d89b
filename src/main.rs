//! specmark CLI entry point.

use clap::Parser;

use specmark::cli::Args;
use specmark::pipeline::Pipeline;
use specmark::render;

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let stft = args.stft_config();
    let raster = args.raster_config();
    let params = args.embed_params();

    stft.validate()?;
    raster.validate()?;
    params.validate()?;

    let pipeline = Pipeline {
        stft,
        raster,
        params,
    };
    let summary = pipeline.run(&args.input, &args.message, &args.output)?;

    println!(
        "Embedded {:?} into {} ({} bins x {} frames, {:.2}s -> {:.2}s)",
        args.message,
        args.output.display(),
        summary.freq_bins,
        summary.time_frames,
        summary.input_duration_secs,
        summary.output_duration_secs,
    );

    if let Some(png_path) = &args.spectrogram_png {
        render::save_spectrogram_png(&summary.spectrogram, png_path)?;
        println!("Spectrogram heatmap: {}", png_path.display());
    }

    Ok(())
}
