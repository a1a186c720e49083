use mandala::prelude::*;
use mandala_examples::{
    init_tracing, render_mandala_svg, render_mandala_to_png, FillMode, RenderConfig,
};

fn main() -> anyhow::Result<()> {
    init_tracing();
    // Seed word from the first argument; the palette is the default one.
    let word = std::env::args().nth(1).unwrap_or_else(|| "luna".to_owned());
    let request = GenerationRequest::new(&word, Palette::rainbow().into());
    let (word, palette) = request.validate()?;

    let generator = MandalaGenerator::default();
    let mut sink = VecSink::only([MandalaEventKind::LayerFinished]);
    let mandala = generator.generate_with_events(word, &palette, &mut sink);

    println!(
        "'{word}': {} slices, {} layers, {} paths",
        mandala.num_slices,
        mandala.num_layers,
        mandala.len()
    );
    for event in sink.as_slice() {
        if let MandalaEvent::LayerFinished {
            index,
            inner_radius,
            outer_radius,
            path_count,
        } = event
        {
            println!("  layer {index}: r {inner_radius:.1}..{outer_radius:.1}, {path_count} paths");
        }
    }

    let blank = UserColoring::new();
    let svg = render_mandala_svg(&mandala, &blank, FillMode::GroundTruth);
    std::fs::write("mandala-from-word.svg", svg)?;

    let outline = render_mandala_svg(&mandala, &blank, FillMode::Painted);
    std::fs::write("mandala-from-word-outline.svg", outline)?;

    let rc = RenderConfig::new(900);
    render_mandala_to_png(
        &mandala,
        &blank,
        FillMode::GroundTruth,
        &rc,
        "mandala-from-word.png",
    )?;

    Ok(())
}
