//! Running totals for a simulation.

use crate::engine::Changes;

/// Statistics about the current run. Reset whenever a run starts or stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Current number of living cells
    pub population: u64,
    /// Total number of cells born since start
    pub births: u64,
    /// Total number of cells that died since start
    pub deaths: u64,
}

impl Stats {
    /// Fresh statistics for a grid holding `population` live cells.
    pub fn new(population: u64) -> Self {
        Self {
            population,
            ..Self::default()
        }
    }

    /// Adds one generation's births and deaths.
    pub fn record(&mut self, changes: Changes) {
        self.births += changes.births;
        self.deaths += changes.deaths;
        self.population = self.population + changes.births - changes.deaths;
    }

    /// Average births per generation.
    pub fn birth_rate(&self, generation: u64) -> f64 {
        self.births as f64 / generation.max(1) as f64
    }

    /// Average deaths per generation.
    pub fn death_rate(&self, generation: u64) -> f64 {
        self.deaths as f64 / generation.max(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accumulates() {
        let mut stats = Stats::new(10);
        stats.record(Changes { births: 3, deaths: 5 });
        stats.record(Changes { births: 1, deaths: 0 });
        assert_eq!(stats, Stats { population: 9, births: 4, deaths: 5 });
    }

    #[test]
    fn test_rates_before_first_generation() {
        let stats = Stats::new(0);
        assert_eq!(stats.birth_rate(0), 0.0);

        let stats = Stats { population: 0, births: 6, deaths: 3 };
        assert_eq!(stats.birth_rate(3), 2.0);
        assert_eq!(stats.death_rate(3), 1.0);
    }
}
