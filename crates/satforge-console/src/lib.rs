//! Colorful console output for search events.
//!
//! Provides a custom `tracing` layer that formats the solver's events.
//!
//! ## Log Levels
//!
//! - **INFO**: Search start and end with the final counters
//! - **DEBUG**: One line per solution reached
//! - **TRACE**: Conflicts and backtracks

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SEARCH_START_NANOS: AtomicU64 = AtomicU64::new(0);

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter applied when `RUST_LOG` is not set.
pub const DEFAULT_DIRECTIVE: &str = "satforge_solver=info";

/// Always-on filter for encoders that log under the `satforge::` target.
pub const ENCODING_DIRECTIVE: &str = "satforge=info";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and installs the tracing subscriber.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let mut builder = EnvFilter::builder();
        if let Ok(directive) = DEFAULT_DIRECTIVE.parse() {
            builder = builder.with_default_directive(directive);
        }
        let mut filter = builder.from_env_lossy();
        if let Ok(directive) = ENCODING_DIRECTIVE.parse() {
            filter = filter.add_directive(directive);
        }

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SearchConsoleLayer)
            .try_init();
    });
}

// Marks the start of a search for elapsed time tracking.
fn mark_search_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SEARCH_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SEARCH_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 ____        _   _____
/ ___|  __ _| |_|  ___|__  _ __ __ _  ___
\___ \ / _` | __| |_ / _ \| '__/ _` |/ _ \
 ___) | (_| | |_|  _| (_) | | | (_| |  __/
|____/ \__,_|\__|_|  \___/|_|  \__, |\___|
                               |___/
"#;

    let version_line = format!("          v{} - Boolean Constraint Enumerator\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats search events with colors.
pub struct SearchConsoleLayer;

impl<S: Subscriber> Layer<S> for SearchConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        if !is_console_target(target) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

fn is_console_target(target: &str) -> bool {
    target.starts_with("satforge_solver") || target.starts_with("satforge::")
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    status: Option<String>,
    constraint: Option<String>,
    variable: Option<String>,
    occurrence_limit: Option<String>,
    variables: Option<u64>,
    constraints: Option<u64>,
    groups: Option<u64>,
    occurrence: Option<u64>,
    depth: Option<u64>,
    solutions_found: Option<u64>,
    solutions_delivered: Option<u64>,
    conflicts: Option<u64>,
    branches: Option<u64>,
    propagations: Option<u64>,
    max_depth: Option<u64>,
    duration_ms: Option<u64>,
    delivered: Option<bool>,
    completed: Option<bool>,
    value: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "status" => self.status = Some(s),
            "constraint" => self.constraint = Some(s),
            "variable" => self.variable = Some(s),
            "occurrence_limit" => self.occurrence_limit = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "variables" => self.variables = Some(value),
            "constraints" => self.constraints = Some(value),
            "groups" => self.groups = Some(value),
            "occurrence" => self.occurrence = Some(value),
            "depth" => self.depth = Some(value),
            "solutions_found" => self.solutions_found = Some(value),
            "solutions_delivered" => self.solutions_delivered = Some(value),
            "conflicts" => self.conflicts = Some(value),
            "branches" => self.branches = Some(value),
            "propagations" => self.propagations = Some(value),
            "max_depth" => self.max_depth = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "delivered" => self.delivered = Some(value),
            "completed" => self.completed = Some(value),
            "value" => self.value = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "status" => self.status = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "model_built" => format_model_built(v),
        "search_start" => format_search_start(v),
        "search_end" => format_search_end(v),
        "solution_found" => format_solution(v),
        "conflict" | "backtrack" if level == Level::TRACE => format_trace(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}

fn format_model_built(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} Model built │ {} variables │ {} constraints",
        format_elapsed(),
        "◆".bright_blue().bold(),
        count(v.variables.unwrap_or(0)).bright_yellow(),
        count(v.constraints.unwrap_or(0)).bright_yellow(),
    );
    if let Some(groups) = v.groups {
        output.push_str(&format!(" │ {} groups", count(groups).bright_yellow()));
    }
    output
}

fn format_search_start(v: &EventVisitor) -> String {
    mark_search_start();
    let variables = v.variables.unwrap_or(0);
    let constraints = v.constraints.unwrap_or(0);

    let mut output = format!(
        "{} {} Searching │ {} variables │ {} constraints │ space {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        count(variables).bright_yellow(),
        count(constraints).bright_yellow(),
        search_space(variables).bright_magenta()
    );

    if let Some(limit) = v
        .occurrence_limit
        .as_deref()
        .and_then(|s| s.strip_prefix("Some("))
        .and_then(|s| s.strip_suffix(')'))
    {
        output.push_str(&format!(" │ stop after {} solutions", limit.bright_yellow()));
    }
    output
}

fn format_search_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("unknown");
    let completed = v.completed.unwrap_or(true);
    let duration = v.duration_ms.unwrap_or(0);

    let status_colored = if completed {
        status.bright_green().bold().to_string()
    } else {
        status.bright_red().bold().to_string()
    };

    let mut output = format!(
        "{} {} Search {} │ {} │ {} solutions",
        format_elapsed(),
        "■".bright_cyan().bold(),
        status_colored,
        format_duration_ms(duration).yellow(),
        count(v.solutions_found.unwrap_or(0)).white().bold(),
    );

    let title = if completed {
        "SEARCH COMPLETE"
    } else {
        "SEARCH INCOMPLETE (budget exceeded)"
    };
    let rows = [
        ("Solutions found:", count(v.solutions_found.unwrap_or(0))),
        (
            "Solutions delivered:",
            count(v.solutions_delivered.unwrap_or(0)),
        ),
        ("Conflicts:", count(v.conflicts.unwrap_or(0))),
        ("Branches:", count(v.branches.unwrap_or(0))),
        ("Propagations:", count(v.propagations.unwrap_or(0))),
        ("Max depth:", count(v.max_depth.unwrap_or(0))),
        ("Wall time:", format_duration_ms(duration)),
    ];
    output.push_str("\n\n");
    output.push_str(&summary_box(title, completed, &rows));
    output
}

fn summary_box(title: &str, completed: bool, rows: &[(&str, String)]) -> String {
    const INNER_WIDTH: usize = 58;
    let rule = "═".repeat(INNER_WIDTH);

    let mut output = format!("{}\n", format!("╔{}╗", rule).bright_cyan());

    let total_pad = INNER_WIDTH.saturating_sub(title.len());
    let left_pad = total_pad / 2;
    let title_colored = if completed {
        title.bright_green().bold().to_string()
    } else {
        title.bright_red().bold().to_string()
    };
    output.push_str(&format!(
        "{}{}{}{}{}\n",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        title_colored,
        " ".repeat(total_pad - left_pad),
        "║".bright_cyan()
    ));
    output.push_str(&format!("{}\n", format!("╠{}╣", rule).bright_cyan()));

    for (label, value) in rows {
        output.push_str(&format!(
            "{}  {:<22}{:>32}  {}\n",
            "║".bright_cyan(),
            label,
            value,
            "║".bright_cyan()
        ));
    }
    output.push_str(&format!("{}\n", format!("╚{}╝", rule).bright_cyan()));
    output
}

fn format_solution(v: &EventVisitor) -> String {
    let occurrence = v.occurrence.unwrap_or(0);
    let delivered = v.delivered.unwrap_or(false);
    let icon = if delivered {
        "✓".bright_green().to_string()
    } else {
        "·".bright_black().to_string()
    };

    format!(
        "{} {} Solution #{:<8} │ depth {}",
        format_elapsed(),
        icon,
        count(occurrence).white(),
        v.depth.unwrap_or(0)
    )
}

fn format_trace(v: &EventVisitor) -> String {
    let event = v.event.as_deref().unwrap_or("");
    let variable = v.variable.as_deref().unwrap_or("-");
    let depth = v.depth.unwrap_or(0);

    let line = match (event, v.constraint.as_deref()) {
        ("conflict", Some(constraint)) => {
            let value = match v.value {
                Some(true) => "=1",
                Some(false) => "=0",
                None => "",
            };
            format!(
                "✗ conflict on {} after {}{} at depth {}",
                constraint, variable, value, depth
            )
        }
        _ => format!("↩ backtrack to {} at depth {}", variable, depth),
    };
    format!("{} {}", format_elapsed(), line.bright_black())
}

fn format_duration_ms(ms: u64) -> String {
    match ms {
        0..=999 => format!("{}ms", ms),
        1_000..=59_999 => format!("{}.{:03}s", ms / 1_000, ms % 1_000),
        _ => format!("{}m {:02}s", ms / 60_000, (ms / 1_000) % 60),
    }
}

/// Number of total assignments over `variables` booleans. Exact while it
/// fits comfortably, otherwise `2^n (~1.3e30)`.
fn search_space(variables: u64) -> String {
    if variables < 40 {
        return count(1u64 << variables);
    }
    let decimal_digits = variables as f64 * std::f64::consts::LOG10_2;
    format!(
        "2^{} (~{:.1}e{})",
        variables,
        10f64.powf(decimal_digits.fract()),
        decimal_digits.trunc()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1_500), "1.500s");
        assert_eq!(format_duration_ms(125_000), "2m 05s");
    }

    #[test]
    fn test_search_space() {
        assert_eq!(search_space(0), "1");
        assert_eq!(search_space(10), "1,024");
        assert_eq!(search_space(100), "2^100 (~1.3e30)");
    }

    #[test]
    fn test_unknown_event_is_silent() {
        let visitor = EventVisitor {
            event: Some("other".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor, Level::INFO).is_empty());
    }

    #[test]
    fn test_model_built_event() {
        let visitor = EventVisitor {
            event: Some("model_built".to_string()),
            variables: Some(1_296),
            constraints: Some(40),
            groups: Some(792),
            ..EventVisitor::default()
        };
        let line = format_event(&visitor, Level::INFO);
        assert!(line.contains("Model built"));
        assert!(line.contains("1,296"));
        assert!(line.contains("792"));
    }

    #[test]
    fn test_console_targets() {
        assert!(is_console_target("satforge_solver::solver"));
        assert!(is_console_target("satforge::encoding"));
        assert!(!is_console_target("meeting_scheduling"));
        assert!(!is_console_target("tokio::runtime"));
    }

    #[test]
    fn test_directives_parse() {
        assert!(DEFAULT_DIRECTIVE.parse::<tracing_subscriber::filter::Directive>().is_ok());
        assert!(ENCODING_DIRECTIVE.parse::<tracing_subscriber::filter::Directive>().is_ok());
    }

    #[test]
    fn test_trace_events_need_trace_level() {
        let visitor = EventVisitor {
            event: Some("conflict".to_string()),
            constraint: Some("c3".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor, Level::DEBUG).is_empty());
        assert!(format_event(&visitor, Level::TRACE).contains("c3"));
    }
}
