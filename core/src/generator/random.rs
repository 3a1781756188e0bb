use super::*;

/// Uniform placement by rejection sampling: draw any location, retry when it already holds a mine.
///
/// Terminates because a valid config always leaves at least one safe cell.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seeds from the wall clock, so consecutive games differ.
    pub fn from_clock() -> Self {
        use web_time::{SystemTime, UNIX_EPOCH};

        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        use rand::prelude::*;
        use rand::rngs::SmallRng;

        let config = config.validate()?;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut occupied: Array2<bool> =
            Array2::default([usize::from(config.width), usize::from(config.height)]);
        let mut mines = Vec::with_capacity(config.mines as usize);
        let mut collisions = 0usize;

        while mines.len() < config.mines as usize {
            let location = Location::from_coords(
                rng.random_range(0..config.width),
                rng.random_range(0..config.height),
            );
            let slot = &mut occupied[location.to_nd_index()];
            if *slot {
                collisions += 1;
                continue;
            }
            *slot = true;
            mines.push(location);
        }

        log::debug!(
            "Placed {} mines on {}x{} with seed {} ({} collisions)",
            config.mines,
            config.width,
            config.height,
            self.seed,
            collisions
        );
        Ok(MineLayout::new_unchecked(config, mines))
    }
}
