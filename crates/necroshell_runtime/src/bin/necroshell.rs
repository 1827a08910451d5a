//! Necromancer's Shell CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use necroshell_runtime::repl::print_result;
use necroshell_runtime::{Interpreter, Repl, ShellConfig};

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    config_file: Option<PathBuf>,
    history_file: Option<PathBuf>,
    no_history: bool,
    no_banner: bool,
    command: Option<String>,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();
    let mut args = args.into_iter().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--no-history" => config.no_history = true,
            "--no-banner" => config.no_banner = true,
            "--config" => {
                let path = args.next().ok_or("--config requires a path")?;
                config.config_file = Some(PathBuf::from(path));
            }
            "--history-file" => {
                let path = args.next().ok_or("--history-file requires a path")?;
                config.history_file = Some(PathBuf::from(path));
            }
            "-c" | "--command" => {
                config.command = Some(args.next().ok_or("--command requires a command line")?);
            }
            other => return Err(format!("unknown option: {other}").into()),
        }
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<u8, Box<dyn std::error::Error>> {
    let cli = parse_args(args)?;

    if cli.show_help {
        print_help();
        return Ok(0);
    }

    if cli.show_version {
        println!("necroshell {}", env!("CARGO_PKG_VERSION"));
        return Ok(0);
    }

    let mut config = match &cli.config_file {
        Some(path) => ShellConfig::load(path)?,
        None => ShellConfig::default(),
    };
    if let Some(path) = cli.history_file {
        config = config.with_history_file(path);
    }
    if cli.no_history {
        config = config.with_persist_history(false);
    }
    if cli.no_banner || cli.command.is_some() {
        config = config.with_banner(false);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let mut interpreter = Interpreter::new(config)?;

    let code = if let Some(line) = cli.command {
        let result = interpreter.execute(&line);
        print_result(&result);
        if let Err(e) = interpreter.shutdown() {
            log::warn!("could not save history: {e}");
        }
        result.exit_code
    } else {
        Repl::new(interpreter)?.run()?
    };

    Ok(u8::try_from(code).unwrap_or(1))
}

fn print_help() {
    println!(
        "\x1b[1mNecromancer's Shell\x1b[0m - Command interpreter

\x1b[1mUSAGE:\x1b[0m
    necroshell [OPTIONS]

\x1b[1mOPTIONS:\x1b[0m
    -h, --help               Print help information
    -V, --version            Print version information
    -c, --command <LINE>     Run one command line and exit
    --config <PATH>          Load settings from a TOML file
    --history-file <PATH>    Read and write history at PATH
    --no-history             Do not load or save history
    --no-banner              Skip the welcome banner

\x1b[1mENVIRONMENT:\x1b[0m
    RUST_LOG                 Log filter, overrides the configured log_level

\x1b[1mEXAMPLES:\x1b[0m
    necroshell                         Start the interactive shell
    necroshell -c 'help history'       Show help for one command and exit
    necroshell --config necro.toml     Start with custom settings

\x1b[1mSHELL COMMANDS:\x1b[0m
    help [command]       List commands or describe one
    history [count]      Show recent input
    log [level]          Show or change the log level
    clear                Clear the screen
    quit, exit           Leave the shell
    Ctrl+D               Leave the shell
    Ctrl+C               Cancel current input"
    );
}
