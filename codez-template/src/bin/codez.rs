use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codez_template::validator::{lint_template, validate_color, validate_template};
use codez_template::{
    archive_file_name, assemble, derive_map, Bucket, Customizations, ExportBundle, Template,
};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "codez", about = "Render, export and check customizable HTML/CSS templates")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the final code for a template
    Render {
        template: PathBuf,
        /// YAML/JSON file with customization values layered over the defaults
        #[arg(short, long)]
        customizations: Option<PathBuf>,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Write the export archive (template.html, styles.css, combined.html, README.md)
    Export {
        template: PathBuf,
        #[arg(short, long)]
        customizations: Option<PathBuf>,
        #[arg(short = 'd', long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Print the element map as JSON
    Map { template: PathBuf },
    /// Validate template files
    Check { files: Vec<PathBuf> },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Render {
            template,
            customizations,
            out,
        } => render(&template, customizations.as_deref(), out.as_deref()),
        Command::Export {
            template,
            customizations,
            out_dir,
        } => export(&template, customizations.as_deref(), &out_dir),
        Command::Map { template } => map(&template),
        Command::Check { files } => check(&files),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
    }
}

fn load(template: &Path, customizations: Option<&Path>) -> Result<(Template, Customizations)> {
    let template = Template::from_path(template)
        .with_context(|| format!("Failed to load template {}", template.display()))?;
    let mut values = template.default_customizations();
    if let Some(path) = customizations {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let overrides: Customizations = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            _ => serde_yaml::from_str(&content)?,
        };
        for bucket in Bucket::ALL {
            for (key, value) in overrides.bucket(bucket) {
                values.set(bucket, key, value.clone());
            }
        }
    }
    Ok((template, values))
}

fn render(template: &Path, customizations: Option<&Path>, out: Option<&Path>) -> Result<i32> {
    let (template, values) = load(template, customizations)?;
    let code = assemble(&template, &values);
    match out {
        Some(path) => std::fs::write(path, code)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", code),
    }
    Ok(0)
}

fn export(template: &Path, customizations: Option<&Path>, out_dir: &Path) -> Result<i32> {
    let (template, values) = load(template, customizations)?;
    let bundle = ExportBundle::build(&template, &values);
    let path = out_dir.join(archive_file_name(&template.name));
    bundle.save_zip(&path)?;
    println!("{}", path.display());
    Ok(0)
}

fn map(template: &Path) -> Result<i32> {
    let (template, _) = load(template, None)?;
    let map = derive_map(&template);
    println!("{}", serde_json::to_string_pretty(&map)?);
    Ok(0)
}

fn check(files: &[PathBuf]) -> Result<i32> {
    if files.is_empty() {
        eprintln!("Usage: codez check <template.yaml|template.json>...");
        return Ok(1);
    }

    let mut exit_code = 0;
    for path in files {
        let outcome = Template::from_path(path).and_then(|t| validate_template(&t).map(|_| t));
        match outcome {
            Ok(template) => {
                println!("✓ {} is valid", path.display());
                for warning in lint_template(&template) {
                    println!("  warning: {}", warning);
                }
                for (key, value) in &template.customizable_fields.colors {
                    if let Err(e) = validate_color(value) {
                        println!("  warning: colors.{}: {}", key, e);
                    }
                }
            }
            Err(e) => {
                eprintln!("✗ {} has errors:", path.display());
                eprintln!("  {}", e);
                exit_code = 1;
            }
        }
    }
    Ok(exit_code)
}
