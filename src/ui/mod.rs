pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{banner, dump_source, elapsed, notice, section, stage_icon, stage_outcome, stage_started, success};
pub use progress::Spinner;
pub use table::{stats_table, TableBuilder};
pub use theme::{theme, Theme};
