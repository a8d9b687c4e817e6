use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};

/// Input resolution order when `--in` is absent: the `REPOVERSE_PROFILE`
/// environment variable, then the bundled demo path.
const PROFILE_ENV: &str = "REPOVERSE_PROFILE";
const DEMO_PROFILE: &str = "profile.json";

#[derive(Parser, Debug)]
#[command(name = "repoverse", version)]
struct Cli {
    /// Input profile snapshot JSON (viewer + ranked entities).
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Output directory for the generated scenes.
    #[arg(long, default_value = "public")]
    out_dir: PathBuf,

    /// Which scene style(s) to generate.
    #[arg(long, value_enum, default_value_t = StyleChoice::Both)]
    style: StyleChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StyleChoice {
    City,
    Orbital,
    Both,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let in_path = cli
        .in_path
        .or_else(|| std::env::var_os(PROFILE_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEMO_PROFILE));

    let snapshot = read_profile_json(&in_path)?;
    eprintln!(
        "building scenes for {} ({} entities)",
        snapshot.viewer.display_name,
        snapshot.entities.len()
    );

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("create output dir '{}'", cli.out_dir.display()))?;

    if matches!(cli.style, StyleChoice::City | StyleChoice::Both) {
        let mut rng = repoverse::EntropyRng;
        let svg = repoverse::cityscape_scene(
            &snapshot.viewer,
            &snapshot.entities,
            &repoverse::CityscapeOpts::default(),
            &mut rng,
        )
        .context("build cityscape scene")?;
        write_scene(&cli.out_dir.join("cityscape.svg"), &svg)?;
    }

    if matches!(cli.style, StyleChoice::Orbital | StyleChoice::Both) {
        let svg = repoverse::orbital_scene(
            &snapshot.viewer,
            &snapshot.entities,
            &repoverse::OrbitalOpts::default(),
        )
        .context("build orbital scene")?;
        write_scene(&cli.out_dir.join("universe.svg"), &svg)?;
    }

    Ok(())
}

fn read_profile_json(path: &Path) -> anyhow::Result<repoverse::ProfileSnapshot> {
    let f = File::open(path).with_context(|| format!("open profile '{}'", path.display()))?;
    let r = BufReader::new(f);
    let snapshot: repoverse::ProfileSnapshot =
        serde_json::from_reader(r).with_context(|| "parse profile JSON")?;
    Ok(snapshot)
}

fn write_scene(path: &Path, svg: &str) -> anyhow::Result<()> {
    std::fs::write(path, svg).with_context(|| format!("write svg '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
