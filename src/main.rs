mod cli;

use mediameta::{config, render};
use mediameta_probe::{
    FormatMetadata, FormatTags, JsonPassthrough, KeyDescriptor, MediaMetadata, Projectable,
    StreamMetadata, StreamTags,
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, Entity};
use std::io::Read;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "mediameta=debug,mediameta_probe=trace,mediameta_common=debug".to_string()
        } else {
            "mediameta=warn,mediameta_probe=warn,mediameta_common=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Show { input, json, tags } => {
            show_report(&input, cli.config.as_deref(), json, tags)
        }
        Commands::Keys { entity } => list_keys(entity),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("mediameta {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn read_report(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read report from stdin")?;
        return Ok(text);
    }

    if !input.exists() {
        anyhow::bail!("File does not exist: {:?}", input);
    }
    std::fs::read_to_string(input).with_context(|| format!("Failed to read report: {:?}", input))
}

fn show_report(
    input: &Path,
    config_path: Option<&Path>,
    json: bool,
    include_tags: bool,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let ctx = config.display_context()?;

    let text = read_report(input)?;
    let metadata = MediaMetadata::from_report(&text, &JsonPassthrough)
        .with_context(|| format!("Failed to decode report: {:?}", input))?;

    tracing::info!(
        "Decoded {:?}: {} streams",
        metadata.file_name().unwrap_or("<unnamed>"),
        metadata.streams.len()
    );

    if json {
        let value = render::render_json(&metadata, &ctx, include_tags);
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        let sections = render::sections(&metadata, &ctx, include_tags);
        print!("{}", render::render_text(&sections));
    }

    Ok(())
}

fn list_keys(entity: Entity) -> Result<()> {
    let descriptors: Vec<KeyDescriptor> = match entity {
        Entity::Format => FormatMetadata::descriptors(),
        Entity::Stream => StreamMetadata::descriptors(),
        Entity::FormatTags => FormatTags::descriptors(),
        Entity::StreamTags => StreamTags::descriptors(),
    };

    for descriptor in descriptors {
        println!(
            "{:>2}  {:<22}  {}",
            descriptor.index, descriptor.id, descriptor.label
        );
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            let locale = &config.display;
            println!("✓ Configuration is valid");
            println!("  Grouping separator: {:?}", locale.grouping_separator);
            println!("  Decimal separator: {:?}", locale.decimal_separator);
            println!("  UTC offset: {}", locale.utc_offset);
            println!("  Date format: {}", locale.date_format);
            println!("  Translations: {}", config.translations.len());
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  UTC offset: {}", config.display.utc_offset);
            println!("  Date format: {}", config.display.date_format);
        }
    }

    Ok(())
}
