use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use redirect_shim::Operation;
use redirect_shim::config::{
	LoadedConfig, TEMPLATE_FILE_NAME, discover_configs, generate_init_template,
	load_explicit_config, load_merged_config, user_config_path,
};
use redirect_shim::profile::select_profile;

#[derive(Parser)]
#[command(name = "redirect")]
#[command(
	author,
	version,
	about = "Inspect and test per-executable path redirect profiles"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Create a template profiles.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing profiles.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,

	/// Use this config file instead of the user/system cascade
	#[arg(long, global = true, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Log profile selection and rewrites
	#[arg(short, long, global = true)]
	verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Resolve paths through the profile selected for an executable
	Resolve {
		/// Executable whose profile is used
		#[arg(long, value_name = "EXE")]
		exe: PathBuf,

		/// Operation whose rule chain is consulted
		#[arg(long, default_value = "open")]
		op: Operation,

		/// Paths to resolve
		#[arg(required = true)]
		paths: Vec<PathBuf>,
	},
	/// Show the profile selected for an executable
	Profile {
		/// Executable whose profile is shown
		#[arg(long, value_name = "EXE")]
		exe: PathBuf,
	},
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display every config file in cascade order
	Show,
	/// Check all config files for errors without resolving anything
	Validate,
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logger(cli.verbose);

	match run(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `--verbose`.
fn init_logger(verbose: bool) {
	if std::env::var_os("RUST_LOG").is_some() {
		env_logger::init();
	} else {
		let level_filter = if verbose {
			log::LevelFilter::Debug
		} else {
			log::LevelFilter::Warn
		};
		env_logger::builder().filter_level(level_filter).init();
	}
}

fn run(cli: Cli) -> Result<ExitCode> {
	if cli.init {
		return handle_init(cli.force);
	}

	let config = cli.config.as_deref();
	match cli.command {
		Some(Commands::Resolve { exe, op, paths }) => handle_resolve(config, &exe, op, &paths),
		Some(Commands::Profile { exe }) => handle_profile(config, &exe),
		Some(Commands::Config { action }) => match action {
			ConfigAction::Show => handle_config_show(config),
			ConfigAction::Validate => handle_config_validate(config),
		},
		// Unreachable with arg_required_else_help
		None => Ok(ExitCode::SUCCESS),
	}
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(TEMPLATE_FILE_NAME);

	if config_path.exists() && !force {
		anyhow::bail!("{TEMPLATE_FILE_NAME} already exists. Use --force to overwrite.");
	}

	std::fs::write(&config_path, generate_init_template())
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {TEMPLATE_FILE_NAME}");
	Ok(ExitCode::SUCCESS)
}

fn handle_resolve(
	config: Option<&Path>,
	exe: &Path,
	op: Operation,
	paths: &[PathBuf],
) -> Result<ExitCode> {
	let merged = load_merged_config(config).context("Failed to load configuration")?;
	let profile = select_profile(&merged, exe)
		.with_context(|| format!("Failed to build profile for {}", exe.display()))?;

	for path in paths {
		let resolved = match &profile {
			Some(profile) => profile.resolve(op, path),
			None => path.as_path(),
		};
		println!("{}", resolved.display());
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_profile(config: Option<&Path>, exe: &Path) -> Result<ExitCode> {
	let merged = load_merged_config(config).context("Failed to load configuration")?;
	let Some(profile) = select_profile(&merged, exe)
		.with_context(|| format!("Failed to build profile for {}", exe.display()))?
	else {
		println!("No profile matches {}", exe.display());
		return Ok(ExitCode::SUCCESS);
	};

	println!("Profile: {}", profile.name().to_string_lossy());
	for op in Operation::ALL {
		let chain = profile.chain(op);
		println!(
			"  {} ({} rules) via {}",
			op,
			chain.len(),
			op.symbols().join(", ")
		);
		for (i, rule) in chain.iter().enumerate() {
			println!("    {}. {}", i + 1, rule);
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn load_configs(config: Option<&Path>) -> redirect_shim::Result<Vec<LoadedConfig>> {
	match config {
		Some(path) => Ok(vec![load_explicit_config(path)?]),
		None => discover_configs(),
	}
}

fn handle_config_show(config: Option<&Path>) -> Result<ExitCode> {
	let configs = load_configs(config).context("Failed to discover config files")?;

	if configs.is_empty() {
		println!("No configuration files found.");
		return Ok(ExitCode::SUCCESS);
	}

	println!("Configuration files (in cascade order):\n");

	for loaded in &configs {
		println!("# Source: {}", loaded.path.display());
		println!("# root: {}", loaded.config.root);
		println!("# profiles: {}", loaded.config.profiles.len());
		println!();

		for profile in &loaded.config.profiles {
			println!("  Profile {}:", profile.name);
			if !profile.executables.is_empty() {
				println!("    executables: {}", profile.executables.join(", "));
			}
			for (i, rule) in profile.rules.iter().enumerate() {
				match rule.to_rule() {
					Ok(rule) => println!("    {}. {}", i + 1, rule),
					Err(e) => println!("    {}. invalid: {}", i + 1, e),
				}
			}
			println!();
		}
	}

	if config.is_none()
		&& let Ok(user_path) = user_config_path()
	{
		println!("User config path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(config: Option<&Path>) -> Result<ExitCode> {
	match load_configs(config) {
		Ok(configs) => {
			if configs.is_empty() {
				println!("No configuration files found.");
			} else {
				println!("All configuration files are valid:");
				for loaded in &configs {
					println!(
						"  {} ({} profiles)",
						loaded.path.display(),
						loaded.config.profiles.len()
					);
				}
			}
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {}", e);
			Ok(ExitCode::FAILURE)
		}
	}
}
