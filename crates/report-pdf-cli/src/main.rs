use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use report_pdf::{
    GenerationOptions, HeaderMetadata, Orientation, ProgressReporter, TemplateId,
    default_output_filename, generate_to_file, load_entries_from_csv, report_statistics,
    resolve_template,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reportpdf", about = "Grid-based inspection report PDF generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a report PDF from a CSV entry list
    Generate {
        /// Input CSV file (columns: location, observations, photo, timestamp)
        #[arg(short, long)]
        entries: PathBuf,

        /// Output PDF file (default: PDF_<timestamp>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Grid template
        #[arg(short, long, value_enum)]
        template: Option<TemplateArg>,

        /// Options JSON file to start from; explicit flags override it
        #[arg(long)]
        options: Option<PathBuf>,

        /// Render the minimal title header instead of the metadata block
        #[arg(long)]
        no_header: bool,

        /// Company name for the page header
        #[arg(long)]
        company: Option<String>,

        /// Inspector name for the page header
        #[arg(long)]
        created_by: Option<String>,

        /// Client the report is for
        #[arg(long)]
        report_for: Option<String>,

        /// Report title, e.g. "Annual Roof Survey"
        #[arg(long)]
        report_type: Option<String>,

        /// Report date (default: today)
        #[arg(long)]
        date: Option<String>,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// List the supported grid templates
    Templates,

    /// Write a reusable options JSON file
    SaveOptions {
        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Grid template
        #[arg(short, long, value_enum, default_value = "A4Portrait2x2")]
        template: TemplateArg,

        /// Use the minimal title header instead of the metadata block
        #[arg(long)]
        no_header: bool,

        /// Company name for the page header
        #[arg(long)]
        company: Option<String>,

        /// Inspector name for the page header
        #[arg(long)]
        created_by: Option<String>,

        /// Client the report is for
        #[arg(long)]
        report_for: Option<String>,

        /// Report title
        #[arg(long)]
        report_type: Option<String>,

        /// Report date
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TemplateArg {
    #[value(name = "A4Portrait2x2")]
    A4Portrait2x2,
    #[value(name = "A4Portrait2x3")]
    A4Portrait2x3,
    #[value(name = "A4Landscape3x2")]
    A4Landscape3x2,
    #[value(name = "A4Landscape4x2")]
    A4Landscape4x2,
    #[value(name = "A4Landscape5x2", alias = "A4Landscape5x3")]
    A4Landscape5x2,
    #[value(name = "A4Portrait4x6")]
    A4Portrait4x6,
}

impl From<TemplateArg> for TemplateId {
    fn from(arg: TemplateArg) -> Self {
        match arg {
            TemplateArg::A4Portrait2x2 => Self::A4Portrait2x2,
            TemplateArg::A4Portrait2x3 => Self::A4Portrait2x3,
            TemplateArg::A4Landscape3x2 => Self::A4Landscape3x2,
            TemplateArg::A4Landscape4x2 => Self::A4Landscape4x2,
            TemplateArg::A4Landscape5x2 => Self::A4Landscape5x2,
            TemplateArg::A4Portrait4x6 => Self::A4Portrait4x6,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            entries,
            output,
            template,
            options,
            no_header,
            company,
            created_by,
            report_for,
            report_type,
            date,
            quiet,
        } => {
            let mut generation = match options {
                Some(path) => GenerationOptions::load_from_file(&path).await?,
                None => GenerationOptions::default(),
            };
            if let Some(template) = template {
                generation.template = TemplateId::from(template).as_str().to_string();
            }
            if no_header {
                generation.include_header = false;
            }
            if company.is_some() {
                generation.header.company = company;
            }
            if created_by.is_some() {
                generation.header.created_by = created_by;
            }
            if report_for.is_some() {
                generation.header.report_for = report_for;
            }
            if report_type.is_some() {
                generation.header.type_of_report = report_type;
            }
            if date.is_some() {
                generation.header.date = date;
            }

            let entry_list = load_entries_from_csv(&entries).await?;

            let template_id = resolve_template(&generation.template);
            let stats = report_statistics(&entry_list, template_id);
            println!("Report statistics:");
            println!("  Entries: {}", stats.entry_count);
            println!("  With photos: {}", stats.photo_count);
            println!(
                "  Grid: {} ({} entries per page)",
                template_id.spec().grid_label(),
                stats.entries_per_page
            );
            println!("  Pages: {}", stats.pages);

            let output = output
                .unwrap_or_else(|| PathBuf::from(default_output_filename(&Local::now())));

            let (reporter, printer) = if quiet {
                (ProgressReporter::disabled(), None)
            } else {
                let (reporter, mut receiver) = ProgressReporter::channel();
                let printer = tokio::spawn(async move {
                    while let Some(update) = receiver.recv().await {
                        match (update.current, update.total) {
                            (Some(current), Some(total)) => println!(
                                "[{}] {} ({current}/{total})",
                                update.stage.as_str(),
                                update.message
                            ),
                            _ => println!("[{}] {}", update.stage.as_str(), update.message),
                        }
                    }
                });
                (reporter, Some(printer))
            };

            let result = generate_to_file(&entry_list, &generation, &output, &reporter).await;
            drop(reporter);
            if let Some(printer) = printer {
                printer.await?;
            }
            result?;

            println!("Generated {} pages → {}", stats.pages, output.display());
        }

        Commands::Templates => {
            println!("Supported templates:");
            for id in TemplateId::ALL {
                let spec = id.spec();
                let orientation = match spec.orientation {
                    Orientation::Portrait => "portrait",
                    Orientation::Landscape => "landscape",
                };
                println!(
                    "  {:<16} {:>3} grid, {}, {} entries per page{}",
                    id.as_str(),
                    spec.grid_label(),
                    orientation,
                    spec.entries_per_page(),
                    if spec.show_observations { "" } else { ", no observations" },
                );
            }
        }

        Commands::SaveOptions {
            output,
            template,
            no_header,
            company,
            created_by,
            report_for,
            report_type,
            date,
        } => {
            let generation = GenerationOptions {
                template: TemplateId::from(template).as_str().to_string(),
                include_header: !no_header,
                header: HeaderMetadata {
                    company,
                    created_by,
                    report_for,
                    type_of_report: report_type,
                    date,
                },
            };
            generation.save_to_file(&output).await?;
            println!("Saved options → {}", output.display());
        }
    }

    Ok(())
}
