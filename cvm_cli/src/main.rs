use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use cvm::{ContainerHeader, Direction, TranscoderBuilder};
use tracing_subscriber::EnvFilter;

/// Exit code for unusable command lines
const EXIT_USAGE: i32 = 254;

#[derive(Parser, Debug)]
#[command(author, version, about = "Converts between .iso images and .cvm containers")]
#[command(after_help = "If unspecified, name for outfile is automatically derived from infile")]
struct Args {
    /// Encodes .iso to .cvm
    #[arg(short, long, overrides_with = "decode")]
    encode: bool,

    /// Decodes .cvm to .iso. The last of -e/-d given wins
    #[arg(short, long, overrides_with = "encode")]
    decode: bool,

    /// Input .iso or .cvm path
    #[arg(index = 1)]
    input: PathBuf,

    /// Output path. Defaults to the input path with .cvm or .iso appended
    #[arg(index = 2)]
    output: Option<PathBuf>,

    /// Container header template (0x1800 bytes) written when encoding
    #[arg(long)]
    header: Option<PathBuf>,

    /// Product code the xor IV is derived from
    #[arg(short, long, default_value = cvm::PRODUCT_CODE)]
    product_code: String,

    /// Log every ciphered sector
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn direction(&self) -> Option<Direction> {
        match (self.encode, self.decode) {
            (true, _) => Some(Direction::Encode),
            (_, true) => Some(Direction::Decode),
            _ => None,
        }
    }
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() { EXIT_USAGE } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    init_tracing(&args);

    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
}

fn init_tracing(args: &Args) {
    let filter = match (args.verbose, args.quiet) {
        (true, _) => EnvFilter::new("debug"),
        (_, true) => EnvFilter::new("warn"),
        _ => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .with_env_filter(filter)
        .init();
}

fn run(args: Args) -> Result<(), cvm::Error> {
    let direction = args.direction();

    let mut builder = TranscoderBuilder::new().product_code(&args.product_code);
    if let Some(path) = &args.header {
        let template = std::fs::read(path).map_err(|source| cvm::Error::HeaderTemplateOpen {
            path: path.display().to_string(),
            source,
        })?;
        builder = builder.header(ContainerHeader::from_template(&template)?);
    }
    let transcoder = builder.build()?;

    let outcome = transcoder.transcode_path(&args.input, args.output.as_deref(), direction)?;
    tracing::info!(
        direction = %outcome.direction,
        "wrote {} ({:#x} bytes)",
        outcome.output.display(),
        outcome.output_size
    );
    Ok(())
}
