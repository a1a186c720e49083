#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{
    init_tracing, parse_hex_color, render_mandala_svg, render_mandala_to_png, FillMode,
    RenderConfig, DEFAULT_BACKGROUND,
};
