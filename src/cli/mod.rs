// CLI module
// Terminal rendering for the stats commands

mod report;

pub use report::render_report;
