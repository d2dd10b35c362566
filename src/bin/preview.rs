//! Offline reference-frame dumper.
//!
//! Evaluates the CPU reference over a pixel grid and writes a PNG, so the
//! effect can be eyeballed (and golden frames regenerated) without a host
//! pipeline. Not a renderer: one frame, no GPU, no window.

use glam::Vec4;
use kaleidofx::{render_frame, EffectUniforms, ImageTexture, SolidColor, TextureSource};
use std::process;

const DEFAULT_WIDTH: u32 = 640;
const DEFAULT_HEIGHT: u32 = 360;

fn usage() -> ! {
    eprintln!("usage: kaleidofx-preview [WIDTH HEIGHT] [--texture IMAGE] [--out FILE.png]");
    process::exit(2);
}

struct Options {
    width: u32,
    height: u32,
    texture: Option<String>,
    out: String,
}

fn parse_args() -> Options {
    let mut opts = Options {
        width: DEFAULT_WIDTH,
        height: DEFAULT_HEIGHT,
        texture: None,
        out: "preview.png".to_string(),
    };

    let mut args = std::env::args().skip(1);
    let mut dims: Vec<u32> = Vec::new();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--texture" => match args.next() {
                Some(path) => opts.texture = Some(path),
                None => usage(),
            },
            "--out" => match args.next() {
                Some(path) => opts.out = path,
                None => usage(),
            },
            "--help" | "-h" => usage(),
            other => match other.parse::<u32>() {
                Ok(n) if n > 0 => dims.push(n),
                _ => usage(),
            },
        }
    }

    match dims.as_slice() {
        [] => {}
        [w, h] => {
            opts.width = *w;
            opts.height = *h;
        }
        _ => usage(),
    }

    opts
}

fn main() {
    env_logger::init();
    let opts = parse_args();

    let texture: Box<dyn TextureSource> = match &opts.texture {
        Some(path) => match ImageTexture::open(path) {
            Ok(tex) => Box::new(tex),
            Err(e) => {
                eprintln!("failed to load texture {}: {}", path, e);
                process::exit(1);
            }
        },
        None => Box::new(SolidColor(Vec4::new(0.5, 0.5, 0.5, 1.0))),
    };

    // a representative mid-animation snapshot of the knobs
    let params = EffectUniforms {
        background_color: [0.02, 0.01, 0.05],
        time: 7_400.0,
        color1: [0.95, 0.35, 0.20],
        real_time: 9_100.0,
        color2: [0.15, 0.45, 0.90],
        resolution: opts.height as f32 / opts.width as f32,
        peak_value: 0.4,
        ..EffectUniforms::default()
    };

    log::info!("evaluating {}x{} frame", opts.width, opts.height);
    let frame = render_frame(&params, texture.as_ref(), opts.width, opts.height);

    if let Err(e) = frame.save(&opts.out) {
        eprintln!("failed to write {}: {}", opts.out, e);
        process::exit(1);
    }
    log::info!("wrote {}", opts.out);
}
