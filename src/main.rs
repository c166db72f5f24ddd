// hashmux command-line interface
// Multi-digest checksums with a single read pass per input

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use indicatif::{ProgressBar, ProgressStyle};

use hashmux::hash::{BatchHasher, DigestError, HashRegistry, Input};
use hashmux::output::{OutputFormat, RowWriter};

// Constants for progress bar
const PROGRESS_BAR_THRESHOLD: u64 = 1024 * 1024 * 1024; // 1GB

fn main() -> ExitCode {
    let registry = HashRegistry::new();
    match run(&registry) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("hashmux: {:#}", err);
            let validation = err
                .downcast_ref::<DigestError>()
                .map(|e| e.is_validation())
                .unwrap_or(false);
            ExitCode::from(if validation { 2 } else { 1 })
        }
    }
}

fn build_cli(registry: &HashRegistry) -> Command {
    let mut cmd = Command::new("hashmux")
        .about("Compute several digests of each input in a single read pass, one algorithm per thread")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .action(ArgAction::Append)
                .help("Input file, repeatable ('-' selects standard input)"),
        )
        .arg(
            Arg::new("files")
                .value_name("FILE")
                .action(ArgAction::Append)
                .help("More input files; standard input is hashed when no input is given"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write rows to FILE instead of standard output"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Emit JSON lines instead of tab-separated rows"),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .action(ArgAction::SetTrue)
                .help("List supported algorithms and exit"),
        );
    for info in registry.algorithms() {
        cmd = cmd.arg(
            Arg::new(info.name.clone())
                .long(info.name.clone())
                .action(ArgAction::SetTrue)
                .help(format!("Enable the {} digest", info.name)),
        );
    }
    cmd
}

fn run(registry: &HashRegistry) -> Result<bool> {
    let matches = build_cli(registry).get_matches();

    if matches.get_flag("list") {
        list_algorithms(registry, matches.get_flag("json"))?;
        return Ok(true);
    }

    // Algorithm flags select from the registry's canonical order
    let selected: Vec<String> = registry
        .algorithms()
        .into_iter()
        .filter(|info| matches.get_flag(&info.name))
        .map(|info| info.name)
        .collect();

    let mut raw_inputs: Vec<String> = Vec::new();
    if let Some(values) = matches.get_many::<String>("input") {
        raw_inputs.extend(values.cloned());
    }
    if let Some(values) = matches.get_many::<String>("files") {
        raw_inputs.extend(values.cloned());
    }
    let inputs: Vec<Input> = if raw_inputs.is_empty() {
        vec![Input::Stdin]
    } else {
        raw_inputs
            .iter()
            .map(|name| {
                if name == "-" {
                    Input::Stdin
                } else {
                    Input::Path(PathBuf::from(name))
                }
            })
            .collect()
    };

    let mut batch = BatchHasher::new(registry, &selected)?;

    // Progress bars only for large file inputs on an interactive terminal
    let mut sizes: HashMap<String, u64> = HashMap::new();
    if io::stderr().is_terminal() {
        for input in &inputs {
            if let Input::Path(path) = input {
                if let Ok(meta) = std::fs::metadata(path) {
                    if meta.len() > PROGRESS_BAR_THRESHOLD {
                        sizes.insert(path.display().to_string(), meta.len());
                    }
                }
            }
        }
    }
    let active_bar: Arc<Mutex<Option<ProgressBar>>> = Arc::new(Mutex::new(None));
    if !sizes.is_empty() {
        let bar_slot = Arc::clone(&active_bar);
        batch = batch.with_progress_callback(move |progress| {
            let mut bar = bar_slot.lock().unwrap();
            if bar.is_none() {
                if let Some(total) = sizes.get(&progress.label) {
                    let pb = ProgressBar::new(*total);
                    pb.set_style(
                        ProgressStyle::default_bar()
                            .template("{msg}\n[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                            .unwrap()
                            .progress_chars("#>-"),
                    );
                    pb.set_message(format!("Hashing: {}", progress.label));
                    *bar = Some(pb);
                }
            }
            if let Some(pb) = bar.as_ref() {
                pb.set_position(progress.bytes_processed);
            }
        });
    }

    let out: Box<dyn Write> = match matches.get_one::<String>("output") {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("creating output file {}", path))?,
        ),
        None => Box::new(io::stdout()),
    };
    let format = if matches.get_flag("json") {
        OutputFormat::JsonLines
    } else {
        OutputFormat::Tsv
    };
    let mut writer = RowWriter::new(BufWriter::new(out), format);
    writer.write_header(&batch.header()).context("writing header")?;

    // A failed input loses only its own row; the batch keeps going
    let mut had_failures = false;
    for row in batch.run(inputs)? {
        if let Some(pb) = active_bar.lock().unwrap().take() {
            pb.finish_and_clear();
        }
        match row {
            Ok(row) => writer.write_row(&row).context("writing result row")?,
            Err(e) => {
                eprintln!("hashmux: {}", e);
                had_failures = true;
            }
        }
    }
    writer.finish().context("flushing output")?;

    Ok(!had_failures)
}

fn list_algorithms(registry: &HashRegistry, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&registry.algorithms())?);
    } else {
        for info in registry.algorithms() {
            let note = if info.cryptographic {
                ""
            } else {
                "  (non-cryptographic)"
            };
            println!("{:<10} {:>4} bits{}", info.name, info.output_bits, note);
        }
    }
    Ok(())
}
