pub mod constants;
pub mod layout;
pub mod normalize;
pub mod paginate;
pub mod progress;
pub mod template;

mod generate;
mod input;
mod options;
mod render;
mod stats;
mod timefmt;
mod types;

pub use generate::{generate, generate_to_file};
pub use input::load_entries_from_csv;
pub use options::GenerationOptions;
pub use progress::{ProgressReporter, ProgressStage, ProgressUpdate};
pub use stats::{ReportStatistics, report_statistics};
pub use template::{DEFAULT_TEMPLATE, TemplateId, TemplateSpec, resolve_template};
pub use timefmt::{default_output_filename, format_capture_timestamp};
pub use types::*;
