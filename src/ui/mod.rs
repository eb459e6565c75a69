pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{is_quiet, success, summary, warn, warn_invalid_source};
pub use table::{summary_table, SummaryRow};
pub use theme::{theme, Theme};
