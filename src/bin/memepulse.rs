use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "memepulse", version)]
struct Cli {
    /// Studio config JSON (fonts, caption style, catalog).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Caption a local template image and write a PNG.
    Render(RenderArgs),
    /// Print the template catalog as JSON.
    Catalog,
    /// Print the prompt a caption model would receive for some source text.
    Prompt(PromptArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Template image (PNG, JPEG, GIF or WebP).
    #[arg(long)]
    template: PathBuf,

    /// Top caption.
    #[arg(long, default_value = "")]
    top: String,

    /// Bottom caption.
    #[arg(long, default_value = "")]
    bottom: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Caption font file. Overrides the config and skips system font discovery.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PromptArgs {
    /// File holding the source text; `-` reads stdin.
    #[arg(long)]
    source: PathBuf,

    /// Refinement instruction.
    #[arg(long)]
    refine: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("memepulse=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => memepulse::StudioConfig::load(path)?,
        None => memepulse::StudioConfig::default(),
    };
    match cli.cmd {
        Command::Render(args) => cmd_render(&config, args),
        Command::Catalog => cmd_catalog(&config),
        Command::Prompt(args) => cmd_prompt(&config, args),
    }
}

fn load_catalog(config: &memepulse::StudioConfig) -> anyhow::Result<memepulse::TemplateCatalog> {
    Ok(match &config.catalog_path {
        Some(path) => memepulse::TemplateCatalog::load(path)?,
        None => memepulse::TemplateCatalog::builtin(),
    })
}

fn cmd_render(config: &memepulse::StudioConfig, args: RenderArgs) -> anyhow::Result<()> {
    let font = match args.font.as_ref().or(config.font_path.as_ref()) {
        Some(path) => memepulse::CaptionFont::from_file(path)?,
        None => memepulse::CaptionFont::discover(&config.font_families, &config.font_dirs)?,
    };
    tracing::info!(family = %font.family, "caption font");

    let typesetter = memepulse::ParleyTypesetter::new(&font)?;
    let mut compositor = memepulse::Compositor::new(config.style.clone(), Box::new(typesetter));

    let bytes = std::fs::read(&args.template)
        .with_context(|| format!("read template '{}'", args.template.display()))?;
    let image = compositor.render_png(&bytes, &args.top, &args.bottom)?;

    write_output(&args.out, image.png_bytes())?;
    println!(
        "wrote {} ({}x{})",
        args.out.display(),
        image.width,
        image.height
    );
    Ok(())
}

fn cmd_catalog(config: &memepulse::StudioConfig) -> anyhow::Result<()> {
    let catalog = load_catalog(config)?;
    println!("{}", serde_json::to_string_pretty(&catalog)?);
    Ok(())
}

fn cmd_prompt(config: &memepulse::StudioConfig, args: PromptArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(config)?;
    let text = if args.source == Path::new("-") {
        std::io::read_to_string(std::io::stdin()).context("read source text from stdin")?
    } else {
        std::fs::read_to_string(&args.source)
            .with_context(|| format!("read source text '{}'", args.source.display()))?
    };
    if text.trim().is_empty() {
        anyhow::bail!("source text is empty");
    }
    print!(
        "{}",
        memepulse::caption::build_prompt(&text, args.refine.as_deref(), &catalog)
    );
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    Ok(())
}
