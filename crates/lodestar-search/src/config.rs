//! Configuration for a search run.

use serde::{Deserialize, Serialize};

/// Errors raised by configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("population size must be at least 1")]
    EmptyPopulation,

    #[error("tournament size {tournament} must be between 1 and the population size {population}")]
    BadTournamentSize { tournament: usize, population: usize },

    #[error("{name} must be a probability in [0, 1], got {value}")]
    BadProbability { name: &'static str, value: f64 },
}

/// Parameters of the evolutionary loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of encodings kept across generations.
    pub population_size: usize,
    /// Number of distinct contestants per tournament.
    pub tournament_size: usize,
    /// Probability that two parents are recombined instead of cloned.
    pub crossover_probability: f64,
    /// Per-offspring probability of applying the mutation operator.
    pub mutation_probability: f64,
    /// Depth handed to `Encoding::mutate` for resampling decisions.
    pub max_mutation_depth: usize,
    /// PRNG seed for reproducibility.
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            tournament_size: 4,
            crossover_probability: 0.8,
            mutation_probability: 0.3,
            max_mutation_depth: 5,
            seed: 42,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(ConfigError::BadTournamentSize {
                tournament: self.tournament_size,
                population: self.population_size,
            });
        }
        for (name, value) in [
            ("crossover_probability", self.crossover_probability),
            ("mutation_probability", self.mutation_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::BadProbability { name, value });
            }
        }
        Ok(())
    }
}
