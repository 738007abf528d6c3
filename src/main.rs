use clap::{ArgAction, Parser};
use log::{LevelFilter, info};
use rescomp::compile::{self, CompileError, CompileSummary, Context};
use rescomp::{config, output, paths};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// No manifest argument given, or the command line did not parse.
const EXIT_NO_MANIFEST: u8 = 1;
/// First argument is not a resource manifest.
const EXIT_NOT_A_MANIFEST: u8 = 2;
/// The manifest's directory does not exist.
const EXIT_NO_INPUT_DIR: u8 = 3;
/// Compilation failed.
const EXIT_COMPILE_FAILED: u8 = 4;

fn version_string() -> &'static str {
    if env!("RESCOMP_ON_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    let hash = env!("RESCOMP_GIT_HASH");
    if hash.is_empty() {
        "dev@unknown"
    } else {
        // Leaked once at startup
        Box::leak(format!("dev@{hash}").into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "rescomp")]
#[command(about = "Embed asset trees described by resource manifests as C/C++ byte arrays")]
#[command(long_about = "\
Embed asset trees described by resource manifests as C/C++ byte arrays

Every manifest becomes a <name>.c / <name>.h pair, written to the output
directory at the same relative location as the manifest. Content entries
ending in .rc are nested manifests and are compiled first; everything else
is embedded byte for byte.

Manifest format (pack.rc.json):

  {
    \"name\": \"Pack\",
    \"namespace\": \"res\",
    \"dependencies\": [\"stddef.h\"],
    \"content\": [
      { \"path\": \"logo.png\", \"name\": \"kLogo\" },
      { \"path\": \"blur.hlsl\", \"name\": \"kBlur\", \"namespace\": \"shaders\" },
      { \"path\": \"fonts/fonts.rc\", \"name\": \"\" }
    ]
  }

All .c/.h/.cpp/.hpp files under the output directory are deleted before
generation. Extensions are configurable in rescomp.toml next to the root
manifest; run 'rescomp --gen-config' for a documented template.

Exit codes: 0 success, 1 no manifest given or bad arguments, 2 not a manifest file,
3 manifest directory missing, 4 compilation failed.")]
#[command(version = version_string())]
struct Cli {
    /// Root resource manifest (e.g. pack.rc.json)
    manifest: Option<PathBuf>,

    /// Output directory [default: the manifest's directory]
    output_dir: Option<PathBuf>,

    /// Turn on verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Print a stock rescomp.toml with all options documented
    #[arg(long)]
    gen_config: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version land here too
            return if e.use_stderr() {
                ExitCode::from(EXIT_NO_MANIFEST)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_logging(cli.verbose);

    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return ExitCode::SUCCESS;
    }

    let Some(manifest_arg) = cli.manifest else {
        eprintln!("ERROR: No manifest given. Usage: rescomp <manifest.rc.json> [output-dir]");
        return ExitCode::from(EXIT_NO_MANIFEST);
    };
    if !paths::is_manifest_argument(&manifest_arg) {
        eprintln!(
            "ERROR: {} is not a resource manifest (expected a .rc.json file)",
            manifest_arg.display()
        );
        return ExitCode::from(EXIT_NOT_A_MANIFEST);
    }

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("ERROR: Cannot determine the current directory: {e}");
            return ExitCode::from(EXIT_COMPILE_FAILED);
        }
    };
    let manifest = paths::absolutize(&manifest_arg, &cwd);
    let resource_root = manifest
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cwd.clone());
    let output_root = cli
        .output_dir
        .as_deref()
        .map(|dir| paths::absolutize(dir, &cwd))
        .unwrap_or_else(|| resource_root.clone());

    if !resource_root.is_dir() {
        eprintln!(
            "ERROR: No directory found at path {}",
            resource_root.display()
        );
        return ExitCode::from(EXIT_NO_INPUT_DIR);
    }

    match run(&manifest, &resource_root, &output_root) {
        Ok(summary) => {
            info!("{}", output::format_summary(&summary));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(EXIT_COMPILE_FAILED)
        }
    }
}

fn run(
    manifest: &Path,
    resource_root: &Path,
    output_root: &Path,
) -> Result<CompileSummary, CompileError> {
    let config = config::load_config(resource_root)?;
    let ctx = Context::new(resource_root, output_root, config);
    compile::compile(&ctx, manifest, output::print_event)
}

/// Log to stderr so stdout carries only the progress lines.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
    // Logging failure shouldn't stop a build
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}
