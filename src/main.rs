//! rsecc binary - encode a file into pieces or rebuild it from pieces

use anyhow::{bail, Context, Result};
use rsecc::args::parse_args;
use rsecc::codec::{decode_files_with_config, encode_file_with_config, CodecConfig};
use rsecc::reporters::{CodecReporter, ConsoleReporter, SilentReporter};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let matches = parse_args();
    let (name, sub) = matches
        .subcommand()
        .context("a subcommand is required")?;

    let config = CodecConfig::from_args(sub);
    let reporter: Box<dyn CodecReporter> = if sub.get_flag("quiet") {
        Box::new(SilentReporter::new())
    } else {
        Box::new(ConsoleReporter::new())
    };

    match name {
        "encode" => {
            let source = sub
                .get_one::<String>("source")
                .context("source file is required")?;
            let prefix = sub
                .get_one::<String>("prefix")
                .context("output prefix is required")?;
            let n = *sub.get_one::<usize>("n").context("-n is required")?;
            let k = *sub.get_one::<usize>("k").context("-k is required")?;

            encode_file_with_config(
                Path::new(source),
                Path::new(prefix),
                n,
                k,
                &config,
                reporter.as_ref(),
            )
            .with_context(|| format!("Failed to encode {}", source))?;
        }
        "decode" => {
            let output = sub
                .get_one::<String>("output")
                .context("output path is required")?;
            let pieces: Vec<PathBuf> = sub
                .get_many::<String>("pieces")
                .context("at least one piece is required")?
                .map(PathBuf::from)
                .collect();

            decode_files_with_config(&pieces, Path::new(output), &config, reporter.as_ref())
                .with_context(|| format!("Failed to decode into {}", output))?;
        }
        other => bail!("unknown subcommand {}", other),
    }

    Ok(())
}
