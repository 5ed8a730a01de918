//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use coversheet_core::form::today;
use coversheet_core::settings::{starter_toml, DEFAULT_SETTINGS_FILE};
use coversheet_core::{
    CaseMode, Color, CoverRenderer, FontFamily, FormEvent, FormField, FormSettings, FormState,
    Logo, PreviewRenderer, RenderingPlan,
};
use coversheet_ooxml::{DocxWriter, Template};
use coversheet_pdf::PdfExporter;

/// Output format for the preview command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PreviewFormat {
    /// Standalone HTML page
    #[default]
    Html,
    /// Preview elements as JSON
    Json,
}

#[derive(Parser)]
#[command(name = "coversheet")]
#[command(author, version, about = "Academic cover sheets as PDF and DOCX", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the cover sheet as PDF
    Pdf {
        #[command(flatten)]
        fields: FieldArgs,

        /// Extra font file for the PDF compiler (repeatable)
        #[arg(long = "font-file")]
        font_file: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Export the cover sheet as DOCX
    Docx {
        #[command(flatten)]
        fields: FieldArgs,

        /// Base DOTX/DOCX template
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Render the live preview
    Preview {
        #[command(flatten)]
        fields: FieldArgs,

        /// Output format (html or json)
        #[arg(long, value_enum, default_value = "html")]
        format: PreviewFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a starter form file
    Init {
        /// Output file path
        #[arg(short, long, default_value = DEFAULT_SETTINGS_FILE)]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Form file plus per-field overrides shared by every export command
#[derive(Args, Debug, Clone, Default)]
pub struct FieldArgs {
    /// Form file (coversheet.toml)
    #[arg(short, long)]
    pub form: Option<PathBuf>,

    #[arg(long)]
    pub university: Option<String>,
    #[arg(long)]
    pub faculty: Option<String>,
    #[arg(long)]
    pub module: Option<String>,
    /// Assignment title
    #[arg(long)]
    pub title: Option<String>,
    /// Student name
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub student_id: Option<String>,
    /// Submission date; an empty value drops the date line
    #[arg(long)]
    pub date: Option<String>,

    /// Theme colour as #rrggbb
    #[arg(long)]
    pub theme_color: Option<String>,
    /// Page colour as #rrggbb
    #[arg(long)]
    pub page_color: Option<String>,
    /// times, helvetica, courier, georgia, verdana or sinhala
    #[arg(long)]
    pub font_family: Option<String>,
    /// Title case: uppercase, lowercase, capitalize or none
    #[arg(long = "case")]
    pub title_case: Option<String>,
    /// Title size in points
    #[arg(long)]
    pub title_size: Option<u32>,

    /// Logo image (PNG, JPEG or GIF)
    #[arg(long)]
    pub logo: Option<PathBuf>,
}

impl FieldArgs {
    /// Flag values as form events, in field order
    pub fn overrides(&self) -> Vec<FormEvent> {
        let mut events = Vec::new();

        let fields = [
            (FormField::University, &self.university),
            (FormField::Faculty, &self.faculty),
            (FormField::Module, &self.module),
            (FormField::AssignmentTitle, &self.title),
            (FormField::StudentName, &self.name),
            (FormField::StudentId, &self.student_id),
            (FormField::SubmissionDate, &self.date),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                events.push(FormEvent::SetField(field, value.clone()));
            }
        }

        if let Some(ref color) = self.theme_color {
            events.push(FormEvent::SetThemeColor(Color::parse_or(
                color,
                Color::DEFAULT_THEME,
            )));
        }
        if let Some(ref color) = self.page_color {
            events.push(FormEvent::SetPageColor(Color::parse_or(color, Color::WHITE)));
        }
        if let Some(ref family) = self.font_family {
            events.push(FormEvent::SetFontFamily(FontFamily::from_token(family)));
        }
        if let Some(ref mode) = self.title_case {
            events.push(FormEvent::SetTitleCase(CaseMode::from_token(mode)));
        }
        if let Some(size) = self.title_size {
            events.push(FormEvent::SetTitleSize(size));
        }

        events
    }

    /// Build the form: file values first, then flag overrides
    pub fn load(&self) -> Result<LoadedForm> {
        let (settings, base_dir) = match self.form {
            Some(ref path) => {
                if !path.exists() {
                    anyhow::bail!("Form file not found: {}", path.display());
                }
                let settings = FormSettings::load(path)
                    .with_context(|| format!("Failed to read form file: {}", path.display()))?;
                let base_dir = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."));
                (settings, base_dir)
            }
            None => (FormSettings::default(), PathBuf::from(".")),
        };

        let mut form = match self.logo {
            // flag logo wins, so the file's logo is never read
            Some(_) => FormState::new().apply_all(settings.events()),
            None => settings
                .to_form(&base_dir)
                .context("Failed to load logo from form file")?,
        };
        form = form.apply_all(self.overrides());

        if let Some(ref path) = self.logo {
            let logo = Logo::load(path)
                .with_context(|| format!("Failed to read logo: {}", path.display()))?;
            form = form.apply(FormEvent::UploadLogo(logo));
        }

        Ok(LoadedForm {
            form,
            settings,
            base_dir,
        })
    }
}

/// A form together with the file it came from
#[derive(Debug, Clone)]
pub struct LoadedForm {
    pub form: FormState,
    pub settings: FormSettings,
    /// Directory relative paths in the form file resolve against
    pub base_dir: PathBuf,
}

/// Log filter for `RUST_LOG`-style directives; warnings only when unset
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives.unwrap_or_default())
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Pdf {
            fields,
            font_file,
            out_dir,
        } => {
            pdf_command(&fields, &font_file, &out_dir)?;
        }
        Commands::Docx {
            fields,
            template,
            out_dir,
        } => {
            docx_command(&fields, template.as_deref(), &out_dir)?;
        }
        Commands::Preview {
            fields,
            format,
            output,
        } => {
            preview_command(&fields, format, output.as_deref())?;
        }
        Commands::Init { output, force } => {
            init_command(&output, force)?;
        }
    }

    Ok(())
}

/// Execute the pdf command, returning the written path
pub fn pdf_command(fields: &FieldArgs, font_files: &[PathBuf], out_dir: &Path) -> Result<PathBuf> {
    println!("coversheet v{}", coversheet_core::VERSION);
    let loaded = fields.load()?;
    let plan = loaded.form.plan();

    for advisory in plan.pdf_advisories() {
        println!("  Note: {}", advisory.message());
    }

    let mut fonts = loaded.settings.font_paths(&loaded.base_dir);
    fonts.extend(font_files.iter().cloned());
    for font in &fonts {
        println!("  Font: {}", font.display());
    }
    let exporter = PdfExporter::new()
        .with_font_files(&fonts)
        .context("Failed to load PDF fonts")?;

    export(&exporter, &plan, out_dir)
}

/// Execute the docx command, returning the written path
pub fn docx_command(
    fields: &FieldArgs,
    template: Option<&Path>,
    out_dir: &Path,
) -> Result<PathBuf> {
    println!("coversheet v{}", coversheet_core::VERSION);
    let loaded = fields.load()?;
    let plan = loaded.form.plan();

    let template_path = template
        .map(Path::to_path_buf)
        .or_else(|| loaded.settings.template_path(&loaded.base_dir));

    let writer = match template_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Template file not found: {}", path.display());
            }
            println!("  Template: {}", path.display());
            let template = Template::load(&path)
                .with_context(|| format!("Failed to load template: {}", path.display()))?;
            DocxWriter::with_template(template)
        }
        None => DocxWriter::new(),
    };

    export(&writer, &plan, out_dir)
}

/// Render `plan` with `renderer` and write it under its export name
fn export<R: CoverRenderer>(renderer: &R, plan: &RenderingPlan, out_dir: &Path) -> Result<PathBuf> {
    let target = renderer.target();
    println!("  Rendering {}...", target.extension().to_uppercase());
    let bytes = renderer
        .render(plan)
        .with_context(|| format!("Failed to render {}", target.extension()))?;

    fs::create_dir_all(out_dir).with_context(|| {
        format!("Failed to create output directory: {}", out_dir.display())
    })?;
    let path = out_dir.join(plan.file_name(target));
    fs::write(&path, &bytes)
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;

    println!("  Created: {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}

/// Preview in the requested format
pub fn preview_output(fields: &FieldArgs, format: PreviewFormat) -> Result<String> {
    let plan = fields.load()?.form.plan();
    let document = PreviewRenderer::new().render(&plan);
    match format {
        PreviewFormat::Html => Ok(document.to_html()),
        PreviewFormat::Json => {
            serde_json::to_string_pretty(&document).context("Failed to serialize preview")
        }
    }
}

/// Execute the preview command
pub fn preview_command(
    fields: &FieldArgs,
    format: PreviewFormat,
    output: Option<&Path>,
) -> Result<()> {
    let rendered = preview_output(fields, format)?;
    match output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write preview: {}", path.display()))?;
            println!("Created: {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

/// Execute the init command
pub fn init_command(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "Form file already exists: {}\n\
             Use --force to overwrite it.",
            output.display()
        );
    }

    fs::write(output, starter_toml(&today()))
        .with_context(|| format!("Failed to write form file: {}", output.display()))?;
    println!("Created: {}", output.display());
    println!();
    println!("Edit the file, then run:");
    println!("  coversheet pdf --form {}", output.display());
    Ok(())
}
