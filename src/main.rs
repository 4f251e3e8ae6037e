use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;

use huffpack::config::ToolConfig;
use huffpack::container::Archive;
use huffpack::engine::{self, CodeTable, CodeTree, FrequencyTable};
use huffpack::utils::hash::content_hash;

#[derive(Parser)]
#[command(name = "huffpack")]
#[command(about = "Huffman prefix-code compression")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, help = "Config file path")]
    config: Option<String>,

    #[arg(long, help = "Output as JSON")]
    json: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Compress a file into an archive
    Compress {
        input: String,
        #[arg(long, help = "Archive path (defaults to <input>.<ext>)")]
        output: Option<String>,
    },
    /// Decompress an archive back to the original bytes
    Decompress {
        archive: String,
        #[arg(long, help = "Output path (defaults to <archive>.out)")]
        output: Option<String>,
    },
    /// Show the code table and size statistics of an archive
    Inspect { archive: String },
    /// Decode an archive and compare content hashes against a source file
    Verify {
        archive: String,
        #[arg(long, help = "Original file to compare against")]
        source: Option<String>,
    },
    /// Report original vs compressed bit counts for a file
    Stats { input: String },
    GenerateConfig {
        #[arg(long, default_value = "huffpack.toml", help = "Config file path")]
        output: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "huffpack=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = ToolConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Compress { input, output } => {
            let output = output.unwrap_or_else(|| format!("{}.{}", input, config.output_extension));
            run_compress(&input, &output, &config, cli.json)
        }
        Commands::Decompress { archive, output } => {
            let output = output.unwrap_or_else(|| format!("{}.out", archive));
            run_decompress(&archive, &output, cli.json)
        }
        Commands::Inspect { archive } => run_inspect(&archive, &config, cli.json),
        Commands::Verify { archive, source } => run_verify(&archive, source.as_deref(), cli.json),
        Commands::Stats { input } => run_stats(&input, &config, cli.json),
        Commands::GenerateConfig { output } => {
            config.save(&output)?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({"success": true, "config_file": output})
                );
            } else {
                println!("⚙️  Generate Configuration");
                println!("========================");
                println!("✅ Default configuration saved to: {}", output);
            }
            Ok(())
        }
    }
}

fn read_input(path: &str, config: &ToolConfig) -> anyhow::Result<Vec<u8>> {
    let data = std::fs::read(path).with_context(|| format!("failed to read {}", path))?;
    if data.len() > config.max_input_size {
        bail!(
            "{} is {} bytes, larger than the configured limit of {}",
            path,
            data.len(),
            config.max_input_size
        );
    }
    Ok(data)
}

fn run_compress(input: &str, output: &str, config: &ToolConfig, json: bool) -> anyhow::Result<()> {
    let data = read_input(input, config)?;
    let bytes = Archive::compress(&data)
        .with_context(|| format!("failed to compress {}", input))?;
    std::fs::write(output, &bytes).with_context(|| format!("failed to write {}", output))?;

    info!(input, output, "compressed");
    let ratio = if data.is_empty() {
        0.0
    } else {
        bytes.len() as f64 / data.len() as f64
    };

    if json {
        println!(
            "{}",
            serde_json::json!({
                "input": input,
                "archive": output,
                "original_bytes": data.len(),
                "archive_bytes": bytes.len(),
                "ratio": ratio
            })
        );
    } else {
        println!("📦 Compress");
        println!("===========");
        println!("✅ {} -> {}", input, output);
        println!("   Original: {} bytes", data.len());
        println!("   Archive:  {} bytes ({:.1}%)", bytes.len(), ratio * 100.0);
    }
    Ok(())
}

fn run_decompress(archive: &str, output: &str, json: bool) -> anyhow::Result<()> {
    let bytes = std::fs::read(archive).with_context(|| format!("failed to read {}", archive))?;
    let data = Archive::decompress(&bytes)
        .with_context(|| format!("failed to decompress {}", archive))?;
    std::fs::write(output, &data).with_context(|| format!("failed to write {}", output))?;

    info!(archive, output, "decompressed");
    if json {
        println!(
            "{}",
            serde_json::json!({
                "archive": archive,
                "output": output,
                "bytes": data.len()
            })
        );
    } else {
        println!("📂 Decompress");
        println!("=============");
        println!("✅ {} -> {}", archive, output);
        println!("   Recovered: {} bytes", data.len());
    }
    Ok(())
}

fn run_inspect(archive: &str, config: &ToolConfig, json: bool) -> anyhow::Result<()> {
    let bytes = std::fs::read(archive).with_context(|| format!("failed to read {}", archive))?;
    let parsed = Archive::from_bytes(&bytes)
        .with_context(|| format!("failed to parse {}", archive))?;
    let table = CodeTable::from_tree(&parsed.tree)?;
    let stats = engine::size_stats(
        parsed.original_len,
        &parsed.payload,
        config.symbol_bit_width,
    );

    if json {
        let codes: Vec<_> = table
            .entries()
            .iter()
            .map(|(symbol, code)| {
                serde_json::json!({
                    "symbol": symbol,
                    "code": render_code(code),
                    "length": code.len()
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::json!({
                "archive": archive,
                "distinct_symbols": table.len(),
                "original_symbols": parsed.original_len,
                "stats": stats,
                "codes": codes
            })
        );
    } else {
        println!("🔍 Archive Inspection: {}", archive);
        println!("========================");
        println!("   Distinct symbols: {}", table.len());
        println!("   Original symbols: {}", parsed.original_len);
        println!("   Original bits:    {}", stats.original_bits);
        println!("   Compressed bits:  {}", stats.compressed_bits);
        println!("   Codes:");
        for (symbol, code) in table.entries() {
            println!("     {} -> {}", render_symbol(symbol), render_code(code));
        }
    }
    Ok(())
}

fn run_verify(archive: &str, source: Option<&str>, json: bool) -> anyhow::Result<()> {
    let bytes = std::fs::read(archive).with_context(|| format!("failed to read {}", archive))?;
    let data = Archive::decompress(&bytes)
        .with_context(|| format!("failed to decompress {}", archive))?;
    let decoded_hash = content_hash(&data);

    let hash_match = match source {
        Some(path) => {
            let original = std::fs::read(path).with_context(|| format!("failed to read {}", path))?;
            Some(content_hash(&original) == decoded_hash)
        }
        None => None,
    };

    if json {
        println!(
            "{}",
            serde_json::json!({
                "archive": archive,
                "decoded_bytes": data.len(),
                "content_hash": decoded_hash,
                "hash_match": hash_match
            })
        );
    } else {
        println!("🔐 Archive Verification: {}", archive);
        println!("=========================");
        println!("✅ Checksum and decode OK ({} bytes)", data.len());
        println!("   Content hash: {}", decoded_hash);
        match hash_match {
            Some(true) => println!("✅ Matches source file"),
            Some(false) => println!("❌ Does NOT match source file"),
            None => {}
        }
    }

    if hash_match == Some(false) {
        bail!("decoded content does not match the source file");
    }
    Ok(())
}

fn run_stats(input: &str, config: &ToolConfig, json: bool) -> anyhow::Result<()> {
    let data = read_input(input, config)?;
    let freqs = FrequencyTable::scan(&data);
    let tree = CodeTree::build(&freqs).with_context(|| format!("cannot build code for {}", input))?;
    let table = CodeTable::from_tree(&tree)?;
    let stream = engine::encode(&data, &table)?;
    let stats = engine::size_stats(data.len() as u64, &stream, config.symbol_bit_width);

    if json {
        println!(
            "{}",
            serde_json::json!({
                "input": input,
                "distinct_symbols": table.len(),
                "stats": stats,
                "ratio": stats.ratio()
            })
        );
    } else {
        println!("📈 Compression Statistics: {}", input);
        println!("==========================");
        println!("   Distinct symbols: {}", table.len());
        println!("   Bits without compression: {}", stats.original_bits);
        println!("   Bits with compression:    {}", stats.compressed_bits);
        println!("   Ratio: {:.3}", stats.ratio());
    }
    Ok(())
}

fn render_code(code: &[bool]) -> String {
    code.iter().map(|&b| if b { '1' } else { '0' }).collect()
}

fn render_symbol(symbol: u8) -> String {
    if symbol.is_ascii_graphic() || symbol == b' ' {
        format!("'{}'", symbol as char)
    } else {
        format!("{:#04x}", symbol)
    }
}
