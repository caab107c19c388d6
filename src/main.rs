use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use diamond_kinematics::kinematic_traits::Kinematics;
use diamond_kinematics::kinematics_impl::{DhConvention, DhKinematics};
use diamond_kinematics::kinematics_request::KinematicsRequest;
use diamond_kinematics::leg_state::JointAngles;
use diamond_kinematics::parameters::dh_kinematics::DhChain;
use diamond_kinematics::parameters_legs::dh_kinematics::LegGeometry;
use diamond_kinematics::utils::{dump_positions, is_valid, AngleUnit};

#[derive(Clone, Copy, ValueEnum)]
enum ConventionArg {
    Standard,
    Modified,
}

impl From<ConventionArg> for DhConvention {
    fn from(arg: ConventionArg) -> Self {
        match arg {
            ConventionArg::Standard => DhConvention::Standard,
            ConventionArg::Modified => DhConvention::Modified,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitArg {
    Degrees,
    Radians,
}

impl From<UnitArg> for AngleUnit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Degrees => AngleUnit::Degrees,
            UnitArg::Radians => AngleUnit::Radians,
        }
    }
}

/// Joint positions of Diamond leg chains.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// DH convention the chain is written in.
    #[arg(long, value_enum, default_value = "standard", global = true)]
    convention: ConventionArg,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a chain from a YAML file, or the default leg chain.
    Chain {
        #[arg(long)]
        file: Option<PathBuf>,

        /// Print the chain as YAML before the positions.
        #[arg(long)]
        show: bool,
    },
    /// Evaluate a leg at the given joint angles.
    Leg {
        #[arg(long, allow_negative_numbers = true)]
        lower_hip: f64,
        #[arg(long, allow_negative_numbers = true)]
        upper_hip: f64,
        #[arg(long, allow_negative_numbers = true)]
        shoulder: f64,

        /// Leg geometry YAML file, the Diamond leg if not given.
        #[arg(long)]
        geometry: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "degrees")]
        unit: UnitArg,
    },
    /// Read a JSON kinematics request from stdin and write the JSON response.
    Request,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let kinematics = DhKinematics::new(cli.convention.into());

    match cli.command {
        Command::Chain { file, show } => {
            let chain = match file {
                Some(path) => DhChain::from_yaml_file(&path)
                    .with_context(|| format!("Failed to load chain from {}", path.display()))?,
                None => DhChain::diamond_leg(),
            };
            if show {
                println!("{}", chain.to_yaml());
            }
            report(&kinematics, &chain);
        }
        Command::Leg { lower_hip, upper_hip, shoulder, geometry, unit } => {
            let geometry = match geometry {
                Some(path) => LegGeometry::from_yaml_file(&path)
                    .with_context(|| format!("Failed to load leg geometry from {}", path.display()))?,
                None => LegGeometry::diamond(),
            };
            let angles = JointAngles::new(lower_hip, upper_hip, shoulder);
            let chain = geometry.chain_for(&angles, unit.into());
            report(&kinematics, &chain);
        }
        Command::Request => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body).context("Failed to read request")?;
            let request = KinematicsRequest::from_json(&body).context("Malformed kinematics request")?;
            let response = request.evaluate(&kinematics);
            println!("{}", response.to_json()?);
        }
    }
    Ok(())
}

fn report(kinematics: &DhKinematics, chain: &DhChain) {
    let positions = kinematics.joint_positions(chain.links());
    info!(links = chain.len(), convention = ?kinematics.convention(), "chain evaluated");
    if !is_valid(&positions) {
        eprintln!("Warning: chain produced non-finite positions");
    }
    dump_positions(&positions);
}
