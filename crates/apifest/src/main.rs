//! ApiFest mapping generator - Entry point
//!
//! Reads method descriptors and writes the routing mapping and/or the endpoint
//! documentation.

use std::path::PathBuf;

use anyhow::Context;
use tracing::info;

use apifest::{
    ApifestConfig, ApifestError, ConfigLoader, Generator, GeneratorError, GeneratorResult,
    MethodSet, OutputMode,
};

/// Command-line arguments.
struct Args {
    /// Path to the method descriptor document.
    input: Option<PathBuf>,
    /// Path to configuration file.
    config: Option<PathBuf>,
    /// Output mode override (comma list).
    mode: Option<String>,
    /// Directory output file names are resolved against.
    output_dir: Option<PathBuf>,
}

impl Args {
    fn parse() -> Self {
        let mut args = std::env::args().skip(1);
        let mut input = None;
        let mut config = None;
        let mut mode = None;
        let mut output_dir = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--input" | "-i" => {
                    input = Some(PathBuf::from(required_value(&mut args, &arg)));
                }
                "--config" | "-c" => {
                    config = Some(PathBuf::from(required_value(&mut args, &arg)));
                }
                "--mode" | "-m" => {
                    mode = Some(required_value(&mut args, &arg));
                }
                "--output-dir" | "-o" => {
                    output_dir = Some(PathBuf::from(required_value(&mut args, &arg)));
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                "--version" | "-v" => {
                    println!("apifest-gen {}", apifest::VERSION);
                    std::process::exit(0);
                }
                other => {
                    eprintln!("Unknown argument: {other}");
                    eprintln!("Use --help for usage information");
                    std::process::exit(1);
                }
            }
        }

        Self {
            input,
            config,
            mode,
            output_dir,
        }
    }
}

fn required_value(args: &mut impl Iterator<Item = String>, flag: &str) -> String {
    args.next().unwrap_or_else(|| {
        eprintln!("Missing value for {flag}");
        eprintln!("Use --help for usage information");
        std::process::exit(1);
    })
}

fn print_help() {
    println!(
        r"ApiFest mapping generator - routing mapping and endpoint documentation

USAGE:
    apifest-gen --input <PATH> [OPTIONS]

OPTIONS:
    -i, --input <PATH>        Method descriptor document (JSON)
    -c, --config <PATH>       Configuration file (TOML or JSON, default: apifest.toml if present)
    -m, --mode <MODES>        Documents to produce: mapping, doc or mapping,doc
    -o, --output-dir <PATH>   Directory for relative output file names (default: .)
    -h, --help                Print help information
    -v, --version             Print version information

ENVIRONMENT VARIABLES:
    APIFEST__MAPPING__VERSION          Mapping version (required)
    APIFEST__MAPPING__MODE             Documents to produce
    APIFEST__MAPPING__FILENAME         Routing mapping output file
    APIFEST__MAPPING__DOCS_FILENAME    Documentation output file
    APIFEST__BACKEND__HOST             Default backend host
    APIFEST__BACKEND__PORT             Default backend port
    APIFEST__DEFAULTS__ACTION_CLASS    Default action class
    APIFEST__DEFAULTS__FILTER_CLASS    Default filter class
    APIFEST__DEFAULTS__APPLICATION_PATH
                                       Prefix for internal paths (null: none)
    APIFEST__ANNOTATIONS               Custom annotations (Type[:attr],...)
    APIFEST__LOGGING__ENABLED          Enable logging (default: true)
    APIFEST__LOGGING__LEVEL            Log filter directive (default: info)
    APIFEST__LOGGING__FORMAT           Log format: pretty or json (default: pretty)

    Variables are also read from a .env file when one is present.

EXAMPLES:
    # Generate the routing mapping
    apifest-gen --input methods.json --config apifest.toml

    # Generate both documents
    apifest-gen -i methods.json -m mapping,doc
"
    );
}

fn load_config(args: &Args) -> GeneratorResult<ApifestConfig> {
    let mut loader = ConfigLoader::new().with_defaults().with_dotenv()?;
    loader = match &args.config {
        Some(path) => loader.with_file(path)?,
        None => loader.with_optional_file(apifest::DEFAULT_CONFIG_FILE)?,
    };
    loader = loader.with_env_prefix(apifest::ENV_PREFIX);
    if let Some(mode) = &args.mode {
        loader = loader.with_modes(OutputMode::parse_list(mode)?);
    }
    Ok(loader.load()?)
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = load_config(&args)?;

    apifest::telemetry::init_logging(&config.logging.to_log_config())
        .map_err(GeneratorError::from)?;

    let input = args
        .input
        .context("missing --input <PATH>, use --help for usage information")?;
    info!(path = %input.display(), "reading method descriptors");
    let methods = MethodSet::from_file(&input).map_err(GeneratorError::from)?;

    let mut generator = Generator::from_config(config)?;
    if let Some(dir) = args.output_dir {
        generator = generator.with_output_dir(dir);
    }
    generator.run(&methods)?;
    Ok(())
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<GeneratorError>() {
        Some(GeneratorError::Extract(ApifestError::Batch { errors })) => {
            eprintln!("apifest-gen: {} endpoint(s) failed to assemble", errors.len());
            for failure in errors {
                eprintln!("  - {failure}");
            }
        }
        Some(generator_err) => {
            eprintln!("apifest-gen [{}]: {generator_err}", generator_err.class());
        }
        None => eprintln!("apifest-gen: {err:#}"),
    }
}

fn main() {
    let args = Args::parse();

    if let Err(err) = run(args) {
        report(&err);
        std::process::exit(1);
    }
}
