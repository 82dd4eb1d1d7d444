//! Search-based test generation engine.
//!
//! Evolves populations of candidate test encodings toward maximal branch
//! coverage of a search subject using multi-objective evolutionary
//! algorithms. The engine owns the metaheuristic loop, objective management
//! and the best-found archive; encoding representation, execution and
//! variation operators plug in through the traits in [`encoding`].
//!
//! A search run wires together:
//! - a [`subject::SearchSubject`] exposing structural objectives and path
//!   distances derived from its control flow graph,
//! - an [`objective::ObjectiveManager`] tracking covered/uncovered objectives
//!   and maintaining the [`objective::Archive`],
//! - a [`metaheuristics::GeneticAlgorithm`] driving selection, variation,
//!   evaluation and environmental selection,
//! - a [`budget::BudgetManager`] deciding when the search halts.
//!
//! Every stochastic operation draws from one seeded ChaCha8 PRNG; a fixed
//! seed and fixed runner outputs reproduce a run bit for bit.

pub mod budget;
pub mod config;
pub mod encoding;
pub mod events;
pub mod metaheuristics;
pub mod objective;
pub mod operators;
pub mod rng;
pub mod subject;

pub use config::{ConfigError, SearchConfig};
pub use encoding::{
    Crossover, Encoding, EncodingId, EncodingRunner, EncodingSampler, ExecutionError,
    ExecutionTrace,
};
pub use events::{SearchListener, SearchStatus};
pub use metaheuristics::{GeneticAlgorithm, SearchError, SearchState};
pub use objective::{Archive, ObjectiveFunction, ObjectiveId, ObjectiveManager};
pub use subject::SearchSubject;
