use std::fs::File;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use console::style;
use huffzip::CodeTable;
use indicatif::HumanBytes;
use tracing::info;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

mod archive;
mod output;
mod progress;
mod sources;

#[derive(Parser)]
#[command(version, about = "Compress files with Huffman coding", long_about = None)]
struct Cli {
    /// Also show debug events of the encoder and decoder
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress files and directories into one archive and a codebook
    Compress {
        /// Files, or directories whose direct child files are compressed
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Where to write the zip archive
        #[arg(short, long)]
        output: PathBuf,
        /// Where to write the codebook, defaults to `<OUTPUT>.codebook`
        #[arg(long)]
        codebook: Option<PathBuf>,
    },
    /// Restore the original bytes from an archive and its codebook
    Decompress {
        /// The zip archive written by `compress`
        archive: PathBuf,
        /// Where to write the restored bytes
        #[arg(short, long)]
        output: PathBuf,
        /// The codebook written by `compress`, defaults to `<ARCHIVE>.codebook`
        #[arg(long)]
        codebook: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_filter(level),
        )
        .with(indicatif_layer)
        .init();

    match cli.command {
        Commands::Compress {
            inputs,
            output,
            codebook,
        } => {
            let codebook = codebook.unwrap_or_else(|| codebook_path_for(&output));
            compress(&inputs, &output, &codebook)
        }
        Commands::Decompress {
            archive,
            output,
            codebook,
        } => {
            let codebook = codebook.unwrap_or_else(|| codebook_path_for(&archive));
            decompress(&archive, &codebook, &output)
        }
    }
}

fn codebook_path_for(archive: &Path) -> PathBuf {
    let mut path = archive.as_os_str().to_owned();
    path.push(".codebook");
    PathBuf::from(path)
}

fn compress(inputs: &[PathBuf], output: &Path, codebook: &Path) -> Result<()> {
    let files = sources::collect(inputs)?;
    info!("compressing {} files", files.len());
    let buffers = sources::read_all(&files)?;

    let compressed = huffzip::compress_all(&buffers)?;
    let archive = archive::write_archive(Cursor::new(Vec::new()), &compressed.to_frame_bytes())?
        .into_inner();

    // Nothing touches the disk before the whole input is compressed, and the archive
    // never shows up without its codebook
    let mut codebook_text = Vec::new();
    compressed.codes.write_codebook(&mut codebook_text)?;
    output::write_all_or_nothing(&[
        (output, archive.as_slice()),
        (codebook, codebook_text.as_slice()),
    ])?;

    let original = compressed.packed.symbol_count;
    println!(
        "{} {} -> {} ({} distinct symbols, payload at {:.1}% of the input)",
        style("compressed").green().bold(),
        HumanBytes(original),
        HumanBytes(archive.len() as u64),
        compressed.codes.len(),
        compressed.ratio() * 100.0,
    );
    info!(
        "archive written to {}, codebook to {}",
        output.display(),
        codebook.display()
    );
    Ok(())
}

fn decompress(archive: &Path, codebook: &Path, output: &Path) -> Result<()> {
    let codebook_file = File::open(codebook)
        .wrap_err_with(|| format!("Can't open codebook {}", codebook.display()))?;
    let codes = CodeTable::read_codebook(codebook_file)
        .wrap_err_with(|| format!("Can't read codebook {}", codebook.display()))?;
    info!("codebook has {} symbols", codes.len());

    let archive_file = File::open(archive)
        .wrap_err_with(|| format!("Can't open archive {}", archive.display()))?;
    let frame = archive::read_archive(archive_file)?;
    let data = huffzip::decompress_frame(&frame, &codes)?;

    // Only a fully decoded and verified payload is written
    output::write_all_or_nothing(&[(output, data.as_slice())])?;
    println!(
        "{} {} -> {}",
        style("decompressed").green().bold(),
        HumanBytes(frame.len() as u64),
        HumanBytes(data.len() as u64),
    );
    Ok(())
}
