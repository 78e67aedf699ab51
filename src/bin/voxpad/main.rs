//! voxpad - analyze a voice clip and preview the formant knobs it maps to
//!
//! Run with: cargo run -- <clip.wav> [profile] [tuning.toml]

mod app;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let wav_path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("usage: voxpad <clip.wav> [profile] [tuning.toml]");
            std::process::exit(2);
        }
    };
    let profile = args.next().unwrap_or_else(|| "Tenor".to_string());
    let tuning_path = args.next();

    app::run(&wav_path, &profile, tuning_path.as_deref())
}
