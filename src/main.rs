/// Native entry point: render a `.npy` label map to an overlay PNG.
///
/// Usage: `seg-raster-native <labels.npy> <out.png> [config.json]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(e) = run() {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    use seg_raster::{EditorConfig, LabelGrid, LabelRaster, MemorySurface, RenderAdapter};

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [input, output, rest @ ..] = args.as_slice() else {
        return Err("usage: seg-raster-native <labels.npy> <out.png> [config.json]".into());
    };

    let config = match rest.first() {
        Some(path) => EditorConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => EditorConfig::default(),
    };

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    let grid = LabelGrid::read_npy(&std::fs::read(input)?)?;
    let raster = LabelRaster::with_config(grid, &config);
    log::info!(
        "Loaded {} with {} segments",
        input,
        raster.segment_ids().len()
    );

    // The PNG is written from the frame the surface received
    let mut adapter = RenderAdapter::new(MemorySurface::new());
    adapter.present(raster.pixels());
    let surface = adapter.into_inner();

    let (width, height) = surface.dimensions();
    let image = image::RgbaImage::from_raw(
        u32::try_from(width)?,
        u32::try_from(height)?,
        surface.data().to_vec(),
    )
    .ok_or("uploaded frame does not match its dimensions")?;
    image.save(output)?;
    log::info!("Wrote {}x{} overlay to {}", image.width(), image.height(), output);

    for entry in raster.legend() {
        log::debug!("segment {} -> {}", entry.id, entry.hex);
    }
    Ok(())
}

// WASM builds use the library directly
#[cfg(target_arch = "wasm32")]
fn main() {}
