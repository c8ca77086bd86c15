use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use orbslf::catalog::source::from_location;
use orbslf::catalog::CatalogFormat;
use orbslf::config::{EphemerisKind, SlfConfig};
use orbslf::env_state::SlfEnv;
use orbslf::ephemeris::horizons::HorizonsEphemeris;
use orbslf::ephemeris::standish::StandishEphemeris;
use orbslf::pipeline::run;
use orbslf::slf_errors::SlfError;

/// Convert minor-planet orbit catalogs into an SLF initial-state file.
#[derive(Parser, Debug)]
#[command(name = "orbslf", version)]
struct Cli {
    /// TOML configuration file; the flags below override it
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Read the packed asteroid orbital database instead of the MPC one
    #[arg(long)]
    astorb: bool,

    /// Catalog URL or local path
    #[arg(long)]
    catalog: Option<String>,

    /// Physical parameters file
    #[arg(long)]
    details: Option<Utf8PathBuf>,

    /// SLF file to write
    #[arg(short, long)]
    output: Option<Utf8PathBuf>,

    /// Query planetary states from JPL Horizons
    #[arg(long)]
    horizons: bool,

    /// Emit NEO and NEO! bodies before the other massless bodies
    #[arg(long)]
    neo_first: bool,

    /// Maximum number of bodies written, 0 for all
    #[arg(long)]
    max_bodies: Option<usize>,

    /// Number of synthetic Oort cloud bodies
    #[arg(long)]
    num_oort: Option<usize>,

    /// Add a duplicate of the whole system, shifted by the offsets below
    #[arg(long)]
    add_duplicate: bool,

    /// Offsets of the duplicated system (Gm)
    #[arg(long, allow_negative_numbers = true)]
    x_offset: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    y_offset: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    z_offset: Option<f64>,

    /// Velocity offsets of the duplicated system (km/s)
    #[arg(long, allow_negative_numbers = true)]
    vx_offset: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    vy_offset: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    vz_offset: Option<f64>,

    /// Seed of the Oort cloud generator
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn apply(&self, config: &mut SlfConfig) {
        if self.astorb {
            config.catalog_format = CatalogFormat::Astorb;
        }
        if self.horizons {
            config.ephemeris = EphemerisKind::Horizons;
        }
        config.neo_first |= self.neo_first;
        config.add_duplicate |= self.add_duplicate;

        if let Some(catalog) = &self.catalog {
            config.catalog_source = Some(catalog.clone());
        }
        if let Some(details) = &self.details {
            config.details_path = details.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(max_bodies) = self.max_bodies {
            config.max_bodies = max_bodies;
        }
        if let Some(num_oort) = self.num_oort {
            config.num_oort = num_oort;
        }

        let offsets = &mut config.offsets;
        for (flag, value) in [
            (self.x_offset, &mut offsets.x),
            (self.y_offset, &mut offsets.y),
            (self.z_offset, &mut offsets.z),
            (self.vx_offset, &mut offsets.vx),
            (self.vy_offset, &mut offsets.vy),
            (self.vz_offset, &mut offsets.vz),
        ] {
            if let Some(flag) = flag {
                *value = flag;
            }
        }
    }
}

fn convert(cli: &Cli) -> Result<usize, SlfError> {
    let mut config = match &cli.config {
        Some(path) => SlfConfig::from_toml_file(path)?,
        None => SlfConfig::default(),
    };
    cli.apply(&mut config);

    let env = SlfEnv::new();
    let source = from_location(config.catalog_location(), &env);
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    match config.ephemeris {
        EphemerisKind::Standish => run(&config, &StandishEphemeris, &*source, &mut rng),
        EphemerisKind::Horizons => {
            let horizons = HorizonsEphemeris::new(&env, config.horizons_url.clone());
            run(&config, &horizons, &*source, &mut rng)
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match convert(&cli) {
        Ok(count) => {
            info!("Output {count} bodies");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
