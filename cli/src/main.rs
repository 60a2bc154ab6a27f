//! svgscribe CLI - render SVG text into drawing call trees

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use svgscribe::model::parse_bounds;
use svgscribe::render::{to_json, CallValue, CallVisitor, VisitorAction};
use svgscribe::{CallRecord, Document, JsonFormat, RenderResult, Scribe};

#[derive(Parser)]
#[command(name = "svgscribe")]
#[command(version)]
#[command(about = "Render SVG text into backend drawing calls", long_about = None)]
struct Cli {
    /// Input SVG file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(flatten)]
    render: RenderArgs,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone)]
struct RenderArgs {
    /// Available drawing area, e.g. "800x600"
    #[arg(long, value_name = "WxH", global = true, value_parser = parse_bounds_arg)]
    bounds: Option<[f64; 2]>,

    /// Fallback font family, or "none" to disable it
    #[arg(long, value_name = "NAME", global = true, env = "SVGSCRIBE_FALLBACK_FONT")]
    fallback_font: Option<String>,

    /// Do not warn about unknown tags
    #[arg(long, global = true)]
    quiet_unknown: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the call tree
    Calls {
        /// Input SVG file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output JSON instead of a tree
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the drawn text, one run per line
    Text {
        /// Input SVG file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show document information
    Info {
        /// Input SVG file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn parse_bounds_arg(value: &str) -> Result<[f64; 2], String> {
    parse_bounds(value).ok_or_else(|| format!("invalid bounds '{}', expected WxH", value))
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let scribe = build_scribe(&cli.render);

    let result = match cli.command {
        Some(Commands::Calls {
            input,
            json,
            compact,
            output,
        }) => cmd_calls(&scribe, &input, json, compact, output.as_deref()),
        Some(Commands::Text { input, output }) => cmd_text(&scribe, &input, output.as_deref()),
        Some(Commands::Info { input }) => cmd_info(&scribe, &input),
        None => {
            if let Some(input) = cli.input {
                cmd_calls(&scribe, &input, false, false, None)
            } else {
                println!("{}", "Usage: svgscribe <FILE>".yellow());
                println!("       svgscribe --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_scribe(args: &RenderArgs) -> Scribe {
    let mut scribe = Scribe::new().with_unknown_element_warnings(!args.quiet_unknown);
    if let Some([width, height]) = args.bounds {
        scribe = scribe.with_bounds(width, height);
    }
    match args.fallback_font.as_deref() {
        Some(name) if name.eq_ignore_ascii_case("none") => {
            scribe = scribe.without_fallback_font();
        }
        Some(name) => scribe = scribe.with_fallback_font(name),
        None => {}
    }
    scribe
}

fn print_warnings(result: &RenderResult) {
    for warning in &result.warnings {
        eprintln!("{}: {}", "Warning".yellow().bold(), warning);
    }
}

fn write_output(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_calls(
    scribe: &Scribe,
    input: &Path,
    json: bool,
    compact: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    log::debug!("Rendering {}", input.display());
    let result = scribe.render_file(input)?;
    print_warnings(&result);

    let content = if json {
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        to_json(&result, format)?
    } else {
        // Colors only make sense on a terminal.
        let mut printer = TreePrinter::new(output.is_none());
        result.replay(&mut printer);
        printer.finish()
    };

    write_output(&content, output)
}

fn cmd_text(
    scribe: &Scribe,
    input: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = scribe.render_file(input)?;
    print_warnings(&result);
    write_output(&result.plain_text(), output)
}

fn cmd_info(scribe: &Scribe, input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc: Document = scribe.parse_file(input)?;
    let result = doc.render();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let sizing = doc.sizing();
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: <{}>", "Root".bold(), doc.root().tag);
    println!("{}: {} x {}", "Size".bold(), sizing.width, sizing.height);
    if let Some([x, y, w, h]) = sizing.view_box {
        println!("{}: {} {} {} {}", "viewBox".bold(), x, y, w, h);
    }
    println!("{}: {}", "Elements".bold(), doc.root().element_count());

    let ids = doc.references().ids();
    if !ids.is_empty() {
        println!("{}: {}", "Identifiers".bold(), ids.join(", "));
    }

    println!();
    println!("{}", "Render Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let stats = &result.stats;
    println!("{}: {}", "Calls".bold(), result.call_count());
    println!("{}: {}", "Text runs".bold(), stats.text_runs);
    println!(
        "{}: {} resolved, {} missing",
        "Fonts".bold(),
        stats.fonts_resolved,
        stats.fonts_missing
    );
    println!(
        "{}: {} resolved, {} missing",
        "References".bold(),
        stats.references_resolved,
        stats.references_missing
    );
    println!("{}: {}", "Skipped elements".bold(), stats.elements_skipped);

    if !doc.warnings().is_empty() {
        println!();
        println!("{}", "Warnings".yellow().bold());
        for warning in doc.warnings() {
            println!("  {} {}", "•".dimmed(), warning);
        }
    }

    Ok(())
}

/// Prints a call tree with one indented line per call.
struct TreePrinter {
    lines: Vec<String>,
    depth: usize,
    color: bool,
}

impl TreePrinter {
    fn new(color: bool) -> Self {
        Self {
            lines: Vec::new(),
            depth: 0,
            color,
        }
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

impl CallVisitor for TreePrinter {
    fn enter_call(&mut self, call: &CallRecord) -> VisitorAction {
        let name = if self.color {
            call.name().cyan().to_string()
        } else {
            call.name().to_string()
        };

        let mut parts: Vec<String> = call.operation.args().iter().map(format_value).collect();
        let options = call.operation.options();
        if !options.is_empty() {
            let pairs: Vec<String> = options
                .iter()
                .map(|(key, value)| format!("{}: {}", key, format_value(value)))
                .collect();
            parts.push(format!("{{{}}}", pairs.join(", ")));
        }

        self.lines.push(format!(
            "{}{}({})",
            "  ".repeat(self.depth),
            name,
            parts.join(", ")
        ));
        self.depth += 1;
        VisitorAction::Continue
    }

    fn leave_call(&mut self, _call: &CallRecord) {
        self.depth = self.depth.saturating_sub(1);
    }
}

fn format_value(value: &CallValue) -> String {
    match value {
        CallValue::Number(n) => n.to_string(),
        CallValue::String(s) => format!("{:?}", s),
        CallValue::Point([x, y]) => format!("[{}, {}]", x, y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bounds_arg() {
        assert_eq!(parse_bounds_arg("800x600"), Ok([800.0, 600.0]));
        assert!(parse_bounds_arg("wide").is_err());
    }

    #[test]
    fn test_tree_printer() {
        let result = Scribe::new()
            .render_str(r#"<text letter-spacing="5">spaced</text>"#)
            .unwrap();
        let mut printer = TreePrinter::new(false);
        result.replay(&mut printer);
        let tree = printer.finish();
        let lines: Vec<&str> = tree.lines().collect();

        assert_eq!(lines[0], "fill_color(\"000000\")");
        assert_eq!(lines[1], "  fill()");
        assert_eq!(lines[2], "    font(\"Helvetica\", {style: \"normal\"})");
        assert_eq!(lines[4], "      character_spacing(5)");
        assert!(lines[5].starts_with("        draw_text(\"spaced\""));
    }

    #[test]
    fn test_build_scribe_fallback_none() {
        let args = RenderArgs {
            bounds: Some([800.0, 600.0]),
            fallback_font: Some("none".into()),
            quiet_unknown: false,
        };
        let result = build_scribe(&args)
            .render_str(r#"<text font-family="Missing">x</text>"#)
            .unwrap();
        assert_eq!(result.stats.fonts_missing, 1);
    }

    #[test]
    fn test_cmd_text_writes_file() {
        use std::io::Write;

        let mut input = tempfile::NamedTempFile::new().unwrap();
        write!(input, "<svg><text>one</text><text>two</text></svg>").unwrap();
        let out = tempfile::NamedTempFile::new().unwrap();

        cmd_text(&Scribe::new(), input.path(), Some(out.path())).unwrap();
        assert_eq!(fs::read_to_string(out.path()).unwrap(), "one\ntwo");
    }
}
