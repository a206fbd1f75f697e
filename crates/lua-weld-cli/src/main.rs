use anyhow::{anyhow, bail, Context, Result};
use lua_weld::build::{BindingBuilder, BundleBuilder, WeldConfig};
use lua_weld::{scan_files, BundleKind};
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

fn usage() {
    eprintln!("lua-weld [--config <weld.toml>] [--strict] <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  bindings <header> <marker> <sources...>  Generate the Lua binding header");
    eprintln!("  templates <output> <sources...>          Embed script templates");
    eprintln!("  codes <output> <sources...>              Embed raw script code strings");
    eprintln!("  licenses <output> <sources...>           Embed third-party license texts");
    eprintln!("  all                                      Run every section of the config file");
    eprintln!("  parse <sources...>                       Print extracted signatures as JSON");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config, -c <path>  Load marshaling overrides and sections from weld.toml");
    eprintln!("  --strict             Fail on argument or return types with no marshaling");
    eprintln!();
    eprintln!("Set LUA_WELD_LOG to control log output (default: info)");
}

/// One CLI subcommand with its positional arguments
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Bindings {
        header: PathBuf,
        marker: PathBuf,
        sources: Vec<PathBuf>,
    },
    Bundle {
        kind: BundleKind,
        output: PathBuf,
        sources: Vec<PathBuf>,
    },
    All,
    Parse {
        sources: Vec<PathBuf>,
    },
    Help,
}

/// Parsed command line
#[derive(Debug, PartialEq, Eq)]
struct Cli {
    config: Option<PathBuf>,
    strict: bool,
    command: Command,
}

impl Cli {
    fn parse(args: &[String]) -> Result<Self> {
        let mut config = None;
        let mut strict = false;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    if i + 1 < args.len() {
                        config = Some(PathBuf::from(&args[i + 1]));
                        i += 2;
                    } else {
                        bail!("--config requires a value");
                    }
                }
                "--strict" => {
                    strict = true;
                    i += 1;
                }
                "--help" | "-h" => {
                    return Ok(Cli {
                        config,
                        strict,
                        command: Command::Help,
                    });
                }
                arg if arg.starts_with('-') => bail!("Unknown flag: {}", arg),
                _ => break,
            }
        }

        let Some(name) = args.get(i) else {
            return Ok(Cli {
                config,
                strict,
                command: Command::Help,
            });
        };
        let rest: Vec<PathBuf> = args[i + 1..].iter().map(PathBuf::from).collect();

        let command = match name.as_str() {
            "bindings" => {
                let [header, marker, sources @ ..] = rest.as_slice() else {
                    bail!("Usage: lua-weld bindings <header> <marker> <sources...>");
                };
                if sources.is_empty() {
                    bail!("bindings requires at least one declaration file");
                }
                Command::Bindings {
                    header: header.clone(),
                    marker: marker.clone(),
                    sources: sources.to_vec(),
                }
            }
            "templates" | "codes" | "licenses" => {
                let kind = match name.as_str() {
                    "templates" => BundleKind::Templates,
                    "codes" => BundleKind::Codes,
                    _ => BundleKind::Licenses,
                };
                let Some((output, sources)) = rest.split_first() else {
                    bail!("Usage: lua-weld {} <output> <sources...>", name);
                };
                Command::Bundle {
                    kind,
                    output: output.clone(),
                    sources: sources.to_vec(),
                }
            }
            "all" => {
                if !rest.is_empty() {
                    bail!("all takes no arguments; sections come from --config");
                }
                Command::All
            }
            "parse" => {
                if rest.is_empty() {
                    bail!("Usage: lua-weld parse <sources...>");
                }
                Command::Parse { sources: rest }
            }
            "help" => Command::Help,
            other => return Err(anyhow!("Unknown command: {}", other)),
        };

        Ok(Cli {
            config,
            strict,
            command,
        })
    }

    fn load_config(&self) -> Result<WeldConfig> {
        match self.config {
            Some(ref path) => WeldConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display())),
            None => Ok(WeldConfig::default()),
        }
    }
}

fn cmd_bindings(
    config: &WeldConfig,
    strict: bool,
    header: &Path,
    marker: &Path,
    sources: &[PathBuf],
) -> Result<()> {
    let output = BindingBuilder::new()
        .sources(sources)
        .header_path(header)
        .marker_path(marker)
        .registry(config.registry()?)
        .strict(strict)
        .build()
        .context("Failed to generate Lua bindings")?;

    for (type_name, count) in &output.header.wrapper_counts {
        info!("{}: {} wrapper(s)", type_name, count);
    }
    if !output.header.degradations.is_empty() {
        warn!(
            "{} member(s) degraded; see warnings above",
            output.header.degradations.len()
        );
    }
    Ok(())
}

fn cmd_bundle(kind: BundleKind, output: &Path, sources: &[PathBuf]) -> Result<()> {
    BundleBuilder::new(kind)
        .sources(sources)
        .output(output)
        .build()
        .with_context(|| format!("Failed to generate {} bundle", kind.as_str()))?;
    Ok(())
}

fn cmd_all(cli: &Cli, config: &WeldConfig) -> Result<()> {
    if cli.config.is_none() {
        bail!("all requires --config <weld.toml>");
    }

    let mut ran = 0;
    if let Some(builder) = config.binding_builder()? {
        builder
            .strict(cli.strict || config.strict)
            .build()
            .context("Failed to generate Lua bindings")?;
        ran += 1;
    }
    for builder in config.bundle_builders() {
        let kind = builder.kind();
        builder
            .build()
            .with_context(|| format!("Failed to generate {} bundle", kind.as_str()))?;
        ran += 1;
    }

    if ran == 0 {
        warn!("Config has no [bindings], [templates], [codes] or [licenses] section");
    }
    Ok(())
}

fn cmd_parse(sources: &[PathBuf]) -> Result<()> {
    let set = scan_files(sources)?;
    let records: Vec<_> = set.iter().collect();
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

fn run(args: &[String]) -> Result<()> {
    let cli = Cli::parse(args)?;
    let config = cli.load_config()?;
    let strict = cli.strict || config.strict;

    match cli.command {
        Command::Bindings {
            ref header,
            ref marker,
            ref sources,
        } => cmd_bindings(&config, strict, header, marker, sources),
        Command::Bundle {
            kind,
            ref output,
            ref sources,
        } => cmd_bundle(kind, output, sources),
        Command::All => cmd_all(&cli, &config),
        Command::Parse { ref sources } => cmd_parse(sources),
        Command::Help => {
            usage();
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    use tracing_subscriber::EnvFilter;
    let filter =
        EnvFilter::try_from_env("LUA_WELD_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
