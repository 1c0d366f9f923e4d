use std::path::PathBuf;

use clap::Parser;

use placegen::{BatchConfig, BatchOutcome, run_batch};

#[derive(Parser, Debug)]
#[command(name = "placegen", version)]
struct Cli {
    /// Input CSV table: header line, then one `width,height,format` row per
    /// image.
    #[arg(long, default_value = "setting.csv")]
    input: PathBuf,

    /// Output directory (created if absent).
    #[arg(long, default_value = "dist")]
    out: PathBuf,

    /// Fixed RNG seed for reproducible colors.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();
    let cfg = BatchConfig {
        input: cli.input,
        out_dir: cli.out,
        seed: cli.seed,
    };

    match run_batch(&cfg)? {
        BatchOutcome::NoInput => {}
        BatchOutcome::Completed(outcomes) => {
            let written = outcomes.iter().filter(|o| o.success).count();
            eprintln!(
                "wrote {written}/{} images to '{}'",
                outcomes.len(),
                cfg.out_dir.display()
            );
        }
    }

    Ok(())
}
