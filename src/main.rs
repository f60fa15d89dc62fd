use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use ad_composer::{
    COLOR_TEMPLATES, Configurable, DirectoryDelivery, Editor, EditorProfile, ExportError,
    RasterError, SIZE_PRESETS, StderrNotifier,
};
use clap::{Args, Parser, Subcommand};
use log::info;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(version, about = "Compose and export social media ad banners", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available size presets
    Sizes,
    /// List the available color templates
    Templates,
    /// Export a banner as PNG
    Render(RenderArgs),
    /// Print the resulting configuration as JSON
    Profile(EditArgs),
}

#[derive(Args, Debug)]
struct EditArgs {
    /// JSON profile describing the banner
    #[arg(long)]
    profile: Option<PathBuf>,
    #[arg(long)]
    headline: Option<String>,
    #[arg(long)]
    subheadline: Option<String>,
    /// Call-to-action label
    #[arg(long)]
    cta: Option<String>,
    /// Logo text
    #[arg(long)]
    logo: Option<String>,
    #[arg(long, default_value_t = false)]
    hide_logo: bool,
    #[arg(long, allow_negative_numbers = true)]
    headline_size: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    subheadline_size: Option<i32>,
    /// Size preset name, e.g. "Instagram Story"
    #[arg(long)]
    size: Option<String>,
    /// Color template id
    #[arg(long)]
    template: Option<String>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    edit: EditArgs,
    /// Directory the PNG is written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
    /// Also write the preview-scale raster here
    #[arg(long)]
    preview: Option<PathBuf>,
    /// Also write the native-size SVG here
    #[arg(long)]
    svg: Option<PathBuf>,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("failed to read profile {path}: {source}")]
    ReadProfile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid profile {path}: {source}")]
    ParseProfile {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("preview failed: {0}")]
    Preview(#[from] RasterError),
    #[error("failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },
    #[error(transparent)]
    Export(#[from] ExportError),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("ad_composer=info"))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        // The notifier has already shown the user message
        Err(CliError::Export(_)) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Sizes => {
            for preset in &SIZE_PRESETS {
                println!("{preset}");
            }
        }
        Command::Templates => {
            for template in &COLOR_TEMPLATES {
                println!(
                    "{:>2}  {:<14} text {}  {}",
                    template.id,
                    template.name,
                    template.text_color,
                    template.background.to_css()
                );
            }
        }
        Command::Profile(args) => {
            let editor = build_editor(&args)?;
            println!("{}", editor.export_profile().to_json_pretty()?);
        }
        Command::Render(args) => render(&args)?,
    }
    Ok(())
}

fn build_editor(args: &EditArgs) -> Result<Editor, CliError> {
    let mut editor = Editor::default();

    if let Some(path) = &args.profile {
        let json = fs::read_to_string(path).map_err(|source| CliError::ReadProfile {
            path: path.clone(),
            source,
        })?;
        let profile = EditorProfile::from_json(&json).map_err(|source| CliError::ParseProfile {
            path: path.clone(),
            source,
        })?;
        editor.apply_profile(&profile);
    }

    editor.update(|store| {
        if let Some(text) = &args.headline {
            store.set_headline(text.as_str());
        }
        if let Some(text) = &args.subheadline {
            store.set_subheadline(text.as_str());
        }
        if let Some(text) = &args.cta {
            store.set_cta(text.as_str());
        }
        if let Some(text) = &args.logo {
            store.set_logo_text(text.as_str());
        }
        if args.hide_logo {
            store.set_show_logo(false);
        }
        if let Some(size) = args.headline_size {
            store.set_headline_font_size(size);
        }
        if let Some(size) = args.subheadline_size {
            store.set_subheadline_font_size(size);
        }
        if let Some(name) = &args.size {
            store.select_size_by_name(name);
        }
        if let Some(id) = &args.template {
            store.select_template_by_id(id);
        }
    });

    Ok(editor)
}

fn render(args: &RenderArgs) -> Result<(), CliError> {
    let editor = build_editor(&args.edit)?;

    if let Some(path) = &args.svg {
        fs::write(path, editor.to_svg()).map_err(|err| CliError::Write {
            path: path.clone(),
            message: err.to_string(),
        })?;
        info!("Wrote {}", path.display());
    }

    if let Some(path) = &args.preview {
        let preview = editor.render_preview()?;
        preview.save(path).map_err(|err| CliError::Write {
            path: path.clone(),
            message: err.to_string(),
        })?;
        info!(
            "Wrote preview {} at scale {:.3}",
            path.display(),
            editor.preview_scale()
        );
    }

    let mut delivery = DirectoryDelivery::new(&args.out_dir);
    let artifact = editor.export(&mut delivery, &mut StderrNotifier)?;
    println!("{}", delivery.path_for(&artifact.filename).display());
    Ok(())
}
