//! linked-map-viz - interactive terminal visualizer for a linked hash map
//!

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use log::{LevelFilter, Log, Metadata, Record};
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor, EditMode};

use linked_map_visualizer::render::{render_map, Style};
use linked_map_visualizer::{hash_trace, Command, Report, Visualizer, VisualizerConfig};

/// Linked hash map visualizer
#[derive(Parser, Debug)]
#[command(name = "linked-map-viz")]
#[command(version)]
#[command(about = "Watch a linked hash map's buckets and insertion-ordered list change")]
#[command(
    long_about = "Drives a ten-bucket linked hash map from typed commands and redraws\n\
its doubly linked list and bucket array after each one.\n\n\
COMMANDS:\n\
  put <key> <value>    put(19, \"Apple\") also works\n\
  get <key>\n\
  remove <key>\n\
  containsKey <key>\n\
  keySet\n\
  values\n\
  hash <key>           show the digit-sum routing for a key\n\
  reset\n\
  show\n\n\
EXAMPLES:\n\
  linked-map-viz                                  Interactive session\n\
  linked-map-viz -e 'put 19 Apple' -e 'get 19'    Run commands and exit\n\
  linked-map-viz -f demo.txt --json               Replay a script as JSON"
)]
struct Args {
    /// JSON config file (key_options, value_options, highlight_ms, color)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output one JSON object per command instead of drawings
    #[arg(short = 'j', long = "json", default_value = "false")]
    json_output: bool,

    /// Disable ANSI colour
    #[arg(long = "no-color", default_value = "false")]
    no_color: bool,

    /// Highlight duration in milliseconds
    #[arg(long = "highlight-ms", value_name = "MS")]
    highlight_ms: Option<u64>,

    /// Execute a command and exit; may be repeated
    #[arg(short = 'e', long = "execute")]
    execute: Vec<String>,

    /// Execute commands from a file, one per line
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    /// Log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

/// Writes log records to stderr.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Prints reports either as drawings or as JSON.
struct Printer {
    style: Style,
    json_output: bool,
}

impl Printer {
    fn print(&self, viz: &mut Visualizer, command: Option<&Command>, report: &Report) -> Result<(), String> {
        if self.json_output {
            let json = report
                .to_json(&viz.snapshot())
                .map_err(|e| e.to_string())?;
            println!("{}", json);
            return Ok(());
        }

        if !report.message.is_empty() {
            if report.accepted {
                println!("{}", report.message);
            } else if self.style.color {
                println!("\x1b[1;31m{}\x1b[0m", report.message);
            } else {
                println!("{}", report.message);
            }
        }

        if let Some(Command::Put { key, .. }) = command {
            println!("Sample Hash Function: (sum of digits % 10)");
            println!("{}", hash_trace(*key));
        }

        println!();
        println!("{}", render_map(&viz.snapshot(), viz.active_highlight(), self.style));
        Ok(())
    }

    fn run(&self, viz: &mut Visualizer, line: &str) -> Result<(), String> {
        match Command::parse(line) {
            Ok(command) => {
                let report = viz.execute(command.clone());
                self.print(viz, Some(&command), &report)
            }
            Err(e) => {
                log::warn!("rejected input {:?}: {}", line, e);
                self.print(viz, None, &Report::rejected(&e))
            }
        }
    }
}

/// CLI state for interactive mode
struct Cli {
    viz: Visualizer,
    config: VisualizerConfig,
    printer: Printer,
    editor: DefaultEditor,
}

impl Cli {
    fn new(viz: Visualizer, config: VisualizerConfig, printer: Printer) -> io::Result<Self> {
        let rl_config = Config::builder()
            .history_ignore_space(true)
            .edit_mode(EditMode::Emacs)
            .build();

        let editor =
            DefaultEditor::with_config(rl_config).map_err(|e| io::Error::other(e.to_string()))?;

        Ok(Self {
            viz,
            config,
            printer,
            editor,
        })
    }

    fn prompt(&self) -> &'static str {
        if self.printer.style.color {
            "\x1b[1;36mmap>\x1b[0m "
        } else {
            "map> "
        }
    }

    fn run(&mut self) -> io::Result<()> {
        println!("LinkedHashMap: Visualization v{}", env!("CARGO_PKG_VERSION"));
        println!("Enter operations, 'help' for assistance, or 'exit' to quit.");
        println!();
        self.print_options();

        let initial = self.viz.run_line("show");
        if let Err(e) = self.printer.print(&mut self.viz, None, &initial) {
            eprintln!("Error: {}", e);
        }

        loop {
            let prompt = self.prompt();
            match self.editor.readline(prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    let _ = self.editor.add_history_entry(line);

                    match line.to_lowercase().as_str() {
                        "exit" | "quit" | "\\q" => break,
                        "help" | "\\h" | "\\?" => {
                            self.print_help();
                            continue;
                        }
                        "options" => {
                            self.print_options();
                            continue;
                        }
                        _ => {}
                    }

                    if let Err(e) = self.printer.run(&mut self.viz, line) {
                        eprintln!("Error: {}", e);
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    fn print_options(&self) {
        let keys = self
            .config
            .key_options
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let present = self
            .viz
            .map()
            .key_set()
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        println!("Keys:    {}", keys);
        println!("Values:  {}", self.config.value_options.join(", "));
        println!("Present: [{}]", present);
        println!();
    }

    fn print_help(&self) {
        println!("Operations:");
        println!("  put <key> <value>    insert, or update in place; quote values with spaces");
        println!("  get <key>            look a key up");
        println!("  remove <key>         delete a key");
        println!("  containsKey <key>    membership test");
        println!("  keySet               keys in insertion order");
        println!("  values               values in insertion order");
        println!("  hash <key>           show which bucket a key routes to");
        println!("  reset                clear the map");
        println!("  show                 redraw");
        println!();
        println!("Session:");
        println!("  options              list suggested keys and values");
        println!("  help                 this text");
        println!("  exit                 quit");
        println!();
    }
}

fn run_lines<R: BufRead>(viz: &mut Visualizer, printer: &Printer, reader: R) -> Result<(), String> {
    for line_result in reader.lines() {
        let line = line_result.map_err(|e| format!("Error reading input: {}", e))?;

        // Skip blank and comment lines
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        printer.run(viz, trimmed)?;
    }

    Ok(())
}

fn run_file(viz: &mut Visualizer, printer: &Printer, path: &Path) -> Result<(), String> {
    let file = File::open(path)
        .map_err(|e| format!("Error opening file {}: {}", path.display(), e))?;
    run_lines(viz, printer, BufReader::new(file))
}

fn load_config(args: &Args) -> Result<VisualizerConfig, String> {
    let mut config = match &args.config {
        Some(path) => VisualizerConfig::load(path).map_err(|e| e.to_string())?,
        None => VisualizerConfig::default(),
    };

    if args.no_color {
        config.color = false;
    }

    if let Some(ms) = args.highlight_ms {
        config.highlight_ms = ms;
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let is_tty = io::stdout().is_terminal();
    let printer = Printer {
        style: Style {
            color: config.color && is_tty,
        },
        json_output: args.json_output,
    };
    let mut viz = Visualizer::new(&config);
    log::info!("visualizer ready ({} ms highlights)", config.highlight_ms);

    // Handle execute flags - run each command and exit
    if !args.execute.is_empty() {
        for line in &args.execute {
            if let Err(e) = printer.run(&mut viz, line) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    if let Some(ref path) = args.file {
        if let Err(e) = run_file(&mut viz, &printer, path) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    if !io::stdin().is_terminal() {
        let stdin = io::stdin();
        if let Err(e) = run_lines(&mut viz, &printer, stdin.lock()) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let mut cli = match Cli::new(viz, config, printer) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error initializing CLI: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = cli.run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
