mod generators;
mod loaders;

pub use generators::*;
pub use loaders::*;

use career_core::reference::ReferenceData;
use career_core::utils::Logging;
use log::info;

/// Seed for squads generated at load time; fixed so every session sees the
/// same world.
pub const SQUAD_SEED: u64 = 0x5EA5_0F_F00D;

pub struct DatabaseLoader;

impl DatabaseLoader {
    pub fn load() -> ReferenceData {
        Logging::estimate_result(
            || {
                let clubs = ClubLoader::load();
                let mut players = PlayerLoader::load();

                let first_free_id = players.iter().map(|p| p.id).max().unwrap_or(0) + 1;
                PlayerGenerator::new(SQUAD_SEED, NamesLoader::load(), first_free_id)
                    .fill_squads(&clubs, &mut players);

                let reference = ReferenceData {
                    clubs,
                    players,
                    competitions: CompetitionLoader::load(),
                    qualifications: QualificationLoader::load(),
                    rules: RulesLoader::load(),
                };

                info!(
                    "📚 Database loaded: {} competitions, {} clubs, {} players",
                    reference.competitions.len(),
                    reference.clubs.len(),
                    reference.players.len()
                );

                reference
            },
            "database loaded",
        )
    }
}
