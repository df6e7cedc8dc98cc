use career_core::utils::{RandomSource, SimRng, TimeEstimation};
use career_core::{CareerContext, CareerSave, CareerSimulator, ReferenceData};
use career_database::DatabaseLoader;
use color_eyre::eyre::{Result, WrapErr, eyre};
use env_logger::Env;
use log::{info, warn};
use std::env;
use std::path::{Path, PathBuf};

#[cfg(target_os = "linux")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

struct DriverConfig {
    club_id: Option<u32>,
    seasons: u32,
    seed: Option<u64>,
    save_path: Option<PathBuf>,
}

impl DriverConfig {
    fn from_env() -> Result<Self> {
        Ok(DriverConfig {
            club_id: Self::parse("CAREER_CLUB")?,
            seasons: Self::parse("CAREER_SEASONS")?.unwrap_or(1),
            seed: Self::parse("CAREER_SEED")?,
            save_path: env::var_os("CAREER_SAVE_PATH").map(PathBuf::from),
        })
    }

    fn parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
        match env::var(key) {
            Ok(value) => value
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| eyre!("{} has an invalid value: {}", key, value)),
            Err(_) => Ok(None),
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = DriverConfig::from_env()?;

    let (reference, estimated) = TimeEstimation::estimate(DatabaseLoader::load);

    info!("database loaded: {} ms", estimated);

    let mut rng: SimRng = match config.seed {
        Some(seed) => {
            info!("🎲 Seed {}", seed);
            RandomSource::seeded(seed)
        }
        None => RandomSource::from_entropy(),
    };

    let mut ctx = CareerContext::new(&reference, &mut rng);

    let mut save = open_career(&config, &reference, &mut ctx)?;

    for season in 0..config.seasons {
        if season > 0 && !CareerSimulator::start_new_season(&mut save, &mut ctx) {
            warn!("season {} could not be started", save.season_id());
            break;
        }

        let (rounds, estimated) = TimeEstimation::estimate(|| {
            let mut rounds = 0;
            while CareerSimulator::advance_round(&mut save, &mut ctx).is_some() {
                rounds += 1;
            }
            rounds
        });

        info!("{} rounds simulated in {} ms", rounds, estimated);

        report_season(&save);

        if let Some(path) = &config.save_path {
            write_save(&save, path)?;
        }
    }

    Ok(())
}

fn open_career(config: &DriverConfig, reference: &ReferenceData, ctx: &mut CareerContext<'_>) -> Result<CareerSave> {
    if let Some(path) = config.save_path.as_deref().filter(|p| p.exists()) {
        let json = std::fs::read_to_string(path).wrap_err_with(|| format!("reading {}", path.display()))?;

        info!("💾 Loading career from {}", path.display());

        return Ok(CareerSimulator::load(&json, ctx)?);
    }

    let club_id = match config.club_id {
        Some(id) => id,
        None => reference
            .first_divisions()
            .next()
            .and_then(|league| reference.clubs.iter().find(|c| c.league_id == league.id))
            .map(|c| c.id)
            .ok_or_else(|| eyre!("the club catalog is empty"))?,
    };

    Ok(CareerSimulator::new_career(club_id, ctx)?)
}

fn report_season(save: &CareerSave) {
    let club = save.world.clubs.name(save.user_club_id);

    if let Some(record) = save.career.history.last() {
        info!(
            "📊 {} {}: finished {:?} with {} points (target {:?}), champions {}",
            club,
            record.season,
            record.position,
            record.points,
            record.target_position,
            record.champion_name.as_deref().unwrap_or("-")
        );
    }

    info!(
        "💰 Cash {}, career score {}, reputation {}, trophies {}",
        save.finances.cash_value(),
        save.career.score,
        save.career.reputation,
        save.career.trophies.len()
    );
}

fn write_save(save: &CareerSave, path: &Path) -> Result<()> {
    let json = save.to_json()?;

    std::fs::write(path, json).wrap_err_with(|| format!("writing {}", path.display()))?;

    info!("💾 Career saved to {}", path.display());

    Ok(())
}
