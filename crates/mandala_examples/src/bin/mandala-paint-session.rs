use mandala::prelude::*;
use mandala_examples::{init_tracing, render_mandala_to_png, FillMode, RenderConfig};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let palette = Palette::new(["#FF3B30", "#FFCC02", "#007AFF"])?;
    let mandala = generate_with_palette("luna", &palette);
    let paint_colors = Palette::paint_colors();

    // A painter who picks the right color with probability `accuracy`, and otherwise a
    // random paint color, skipping one path in five.
    let mut rng = StdRng::seed_from_u64(2025);
    let mut session = PaintSession::new(&paint_colors);
    for accuracy in [0.0, 0.5, 0.9, 1.0] {
        session.reset();
        session.select_tool(Tool::Fill);
        for path in &mandala.paths {
            let roll = rng.next_u32() as f64 / 4_294_967_296.0;
            if accuracy < 1.0 && roll < 0.2 {
                continue;
            }
            let color = if roll < accuracy {
                mandala.colors[&path.id].clone()
            } else {
                paint_colors.cyclic(rng.next_u32() as usize).clone()
            };
            session.select_color(color);
            session.apply_checked(&mandala, path.id)?;
        }
        let breakdown = session.breakdown(&mandala);
        println!(
            "accuracy {accuracy:.1}: score {}% (matched {}, wrong {}, unpainted {})",
            session.score(&mandala)?,
            breakdown.matched,
            breakdown.wrong,
            breakdown.unpainted
        );
    }

    // Erase the first layer and render what is left.
    session.select_tool(Tool::Erase);
    for id in mandala.ids().filter(|id| id.layer == 0) {
        session.apply(id);
    }
    println!("after erasing layer 0: {}%", session.score(&mandala)?);

    let rc = RenderConfig::new(900);
    render_mandala_to_png(
        &mandala,
        session.coloring(),
        FillMode::Painted,
        &rc,
        "mandala-paint-session.png",
    )?;

    Ok(())
}
