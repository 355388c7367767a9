use anyhow::{Result, bail};
use clap::Parser;
use dealgauge::cli::{
    BantSubcommand, Cli, ClassifyArgs, Commands, MeddpiccSubcommand, RunArgs, SignalsSubcommand,
};
use dealgauge::config;
use dealgauge::core::aggregate::{Dimension, aggregate};
use dealgauge::core::classify::classify;
use dealgauge::core::report::{self, JsonReport};
use dealgauge::core::{self, RunProfile};
use dealgauge::utils::parse::parse_dimension_spec;

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => run_profile(args, RunProfile::Full),
        Commands::Init(args) => {
            if args.config.is_some() {
                eprintln!(
                    "warning: --config is ignored by `dealgauge init`; writing ./dealgauge.toml"
                );
            }

            let path = std::env::current_dir()?.join("dealgauge.toml");
            config::write_default_config(&path)?;
            println!("created {}", path.display());
            Ok(0)
        }
        Commands::Classify(args) => run_classify(args),
        Commands::Bant { command } => match command {
            BantSubcommand::Score(args) => run_profile(args, RunProfile::BantOnly),
        },
        Commands::Meddpicc { command } => match command {
            MeddpiccSubcommand::Score(args) => run_profile(args, RunProfile::MeddpiccOnly),
        },
        Commands::Signals { command } => match command {
            SignalsSubcommand::Classify(args) => run_profile(args, RunProfile::SignalsOnly),
        },
    }
}

fn run_profile(args: RunArgs, profile: RunProfile) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(args.config.as_deref(), &cwd)?;
    let input = if args.input.is_absolute() {
        args.input.clone()
    } else {
        cwd.join(&args.input)
    };
    let report = core::run_assessment(&input, &loaded.config, profile)?;

    let output_json = args.json || loaded.config.general.json;
    if output_json {
        let json_report = JsonReport::from(&report);
        println!("{}", serde_json::to_string_pretty(&json_report)?);
    } else {
        report::print_human(&report);
    }

    if report.exit.ok { Ok(0) } else { Ok(1) }
}

fn run_classify(args: ClassifyArgs) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(args.config.as_deref(), &cwd)?;
    let scale = loaded.config.scales.resolve(&args.scale)?;

    if !args.dimensions.is_empty() {
        if args.value.is_some() || args.max.is_some() {
            bail!("use either --dim specs or --value/--max, not both");
        }

        let dimensions = args
            .dimensions
            .iter()
            .map(|spec| parse_dimension_spec(spec))
            .collect::<Result<Vec<Dimension>>>()?;
        let result = aggregate(&dimensions, &scale)?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            report::print_aggregate(&result);
        }
        return Ok(0);
    }

    let (Some(value), Some(max)) = (args.value, args.max) else {
        bail!("pass --value and --max, or one or more --dim name=value/max specs");
    };
    let score = classify(value, max, &scale)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&score)?);
    } else {
        report::print_classified(&scale.name, value, max, &score);
    }
    Ok(0)
}
