use std::io::Read;

use clap::Parser;

use compgraph2txt::RenderOptions;

#[derive(Parser)]
#[command(
    name = "compgraph2txt",
    about = "Render computational graphs as box-drawing text diagrams"
)]
struct Cli {
    /// Input file (reads from stdin if not provided)
    file: Option<std::path::PathBuf>,

    /// Use square corners instead of rounded ones
    #[arg(long)]
    square_corners: bool,

    /// Only validate the graph; print nothing on success
    #[arg(long)]
    check: bool,
}

fn main() {
    let cli = Cli::parse();

    let input = match cli.file {
        Some(path) => std::fs::read_to_string(&path).unwrap_or_else(|e| {
            eprintln!("ERROR: failed to read {}: {e}", path.display());
            std::process::exit(1);
        }),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).unwrap_or_else(|e| {
                eprintln!("ERROR: failed to read stdin: {e}");
                std::process::exit(1);
            });
            buf
        }
    };

    if cli.check {
        if let Err(e) = compgraph2txt::check(&input) {
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }
        return;
    }

    let options = RenderOptions {
        rounded_corners: !cli.square_corners,
    };
    match compgraph2txt::render_with_options(&input, &options) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }
    }
}
