// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#![allow(clippy::uninlined_format_args)]

use std::path;

use svgharvest::markuptree::Element;
use svgharvest::{Candidate, DefaultFetcher, Options, Pipeline};

fn main() {
    if let Err(e) = process() {
        eprintln!("Error: {}.", e);
        std::process::exit(1);
    }
}

const HELP: &str = "\
svgharvest collects SVG graphics from candidate elements found on a page.

USAGE:
  svgharvest [OPTIONS] <candidate-file>...

  svgharvest icon.svg logo.html
  svgharvest --location https://example.com/ img.html
  svgharvest --background --markup bg.css

OPTIONS:
      --help                    Prints this help
  -V, --version                 Prints version

  --location URL                Sets the URL of the page the candidates came from.
                                Relative references are resolved against it
                                [default: the first candidate file]
  --background                  Treats each file as a CSS background-image value
  --timeout SECS                Sets a timeout for a single fetch
                                [default: 10]
  --markup                      Prints the markup of each SVG
  --quiet                       Disables warnings

ARGS:
  <candidate-file>              A file with a single candidate element
";

#[derive(Debug)]
struct CliArgs {
    location: Option<String>,
    background: bool,
    timeout: u64,
    markup: bool,
    quiet: bool,
    files: Vec<path::PathBuf>,
}

fn collect_args() -> Result<CliArgs, pico_args::Error> {
    let mut input = pico_args::Arguments::from_env();

    if input.contains("--help") {
        print!("{}", HELP);
        std::process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    let mut args = CliArgs {
        location: input.opt_value_from_str("--location")?,
        background: input.contains("--background"),
        timeout: input
            .opt_value_from_fn("--timeout", parse_timeout)?
            .unwrap_or(10),
        markup: input.contains("--markup"),
        quiet: input.contains("--quiet"),
        files: Vec::new(),
    };

    while let Some(file) = input.opt_free_from_str()? {
        args.files.push(file);
    }

    Ok(args)
}

fn parse_timeout(s: &str) -> Result<u64, String> {
    let n: u64 = s.parse().map_err(|_| "invalid number")?;

    if n > 0 {
        Ok(n)
    } else {
        Err("TIMEOUT cannot be zero".to_string())
    }
}

fn process() -> Result<(), String> {
    let args = match collect_args() {
        Ok(args) => args,
        Err(e) => {
            println!("{}", HELP);
            return Err(e.to_string());
        }
    };

    if args.files.is_empty() {
        println!("{}", HELP);
        return Err("no candidate files were provided".to_string());
    }

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            log::set_max_level(log::LevelFilter::Warn);
        }
    }

    let location = match args.location {
        Some(ref location) => location.clone(),
        None => file_location(&args.files[0])?,
    };

    let opt = Options {
        fetch_timeout: std::time::Duration::from_secs(args.timeout),
        ..Options::default()
    };

    let mut candidates: Vec<Candidate<Element>> = Vec::with_capacity(args.files.len());
    for file in &args.files {
        let text = load_candidate(file, opt.max_fetch_size)?;
        if args.background {
            candidates.push(Candidate::BackgroundImage(text.trim().to_string()));
        } else {
            candidates.push(Candidate::Markup(text));
        }
    }

    let fetcher = DefaultFetcher::new(&opt);
    let pipeline = Pipeline::new(opt, fetcher);
    for artifact in pipeline.process(candidates, &location) {
        println!(
            "{}\t{}\t{}\t{}",
            artifact.id(),
            artifact.embedding_type(),
            artifact.size_label(),
            artifact.white_fill_with(&pipeline.options().heuristics)
        );

        if args.markup {
            println!("{}", artifact.svg_string());
        }
    }

    Ok(())
}

fn load_candidate(file: &path::Path, max_size: usize) -> Result<String, String> {
    let mut data = std::fs::read(file)
        .map_err(|e| format!("failed to read '{}' cause {}", file.display(), e))?;

    if data.starts_with(&[0x1f, 0x8b]) {
        data = svgharvest::decompress_svgz(&data, max_size).map_err(|e| e.to_string())?;
    }

    String::from_utf8(data).map_err(|_| "provided data has not an UTF-8 encoding".to_string())
}

fn file_location(file: &path::Path) -> Result<String, String> {
    let path = file
        .canonicalize()
        .map_err(|e| format!("failed to resolve '{}' cause {}", file.display(), e))?;

    url::Url::from_file_path(&path)
        .map(|url| url.to_string())
        .map_err(|_| format!("'{}' cannot be converted into an URL", path.display()))
}

static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::LevelFilter::Warn
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);
            let args = record.args();

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, args),
                log::Level::Warn => eprintln!("Warning (in {}:{}): {}", target, line, args),
                log::Level::Info => eprintln!("Info (in {}:{}): {}", target, line, args),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, args),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, args),
            }
        }
    }

    fn flush(&self) {}
}
