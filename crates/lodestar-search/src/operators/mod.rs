//! Stateless operators over populations: ranking and selection.

pub mod ranking;
pub mod selection;

pub use ranking::{
    crowding_distances, dominates, fast_non_dominated_sort, rank_population, FrontRank,
};
pub use selection::tournament_select;
