//! Rendering of command results for terminals and scripts.
//!
//! Results go to stdout; errors from the human formatter go to stderr while
//! `--json` keeps every outcome, failures included, in one stdout envelope.

mod formatter;
mod human;
mod json;

pub use formatter::OutputFormatter;

use human::HumanFormatter;
use json::JsonFormatter;

/// Picks the formatter for the global `--json`, `--verbose` and `--quiet`
/// flags. `--quiet` has no effect on JSON output.
pub fn create_formatter(json: bool, verbose: bool, quiet: bool) -> Box<dyn OutputFormatter> {
    if json {
        return Box::new(JsonFormatter);
    }
    Box::new(HumanFormatter::new(verbose, quiet))
}
