//! Generic evolutionary driver.
//!
//! Owns the population and the run state machine and drives the loop:
//! sample -> evaluate -> (select parents -> vary -> evaluate offspring ->
//! environmental selection -> notify budgets)* -> deliver the archive.
//! Algorithm variants plug in through their [`ReplacementStrategy`].

use std::collections::BTreeSet;
use std::sync::Arc;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::budget::BudgetManager;
use crate::config::SearchConfig;
use crate::encoding::{Crossover, Encoding, EncodingSampler};
use crate::events::{SearchListener, SearchStatus};
use crate::metaheuristics::{ReplacementStrategy, SearchError, SearchState};
use crate::objective::{Archive, ObjectiveId, ObjectiveManager};
use crate::operators::{rank_population, tournament_select};
use crate::rng::seeded_rng;
use crate::subject::SearchSubject;

pub struct GeneticAlgorithm<E: Encoding> {
    config: SearchConfig,
    subject: Arc<dyn SearchSubject<E>>,
    manager: ObjectiveManager<E>,
    sampler: Box<dyn EncodingSampler<E>>,
    crossover: Box<dyn Crossover<E>>,
    replacement: Box<dyn ReplacementStrategy<E>>,
    listeners: Vec<Box<dyn SearchListener<E>>>,
    population: Vec<E>,
    rng: ChaCha8Rng,
    state: SearchState,
    generation: u64,
    /// Restriction to a subset of the subject's objectives, if any.
    scope: Option<BTreeSet<ObjectiveId>>,
    /// Objectives removed from this search's responsibility.
    excluded: BTreeSet<ObjectiveId>,
}

impl<E: Encoding> GeneticAlgorithm<E> {
    pub fn new(
        config: SearchConfig,
        subject: Arc<dyn SearchSubject<E>>,
        manager: ObjectiveManager<E>,
        sampler: Box<dyn EncodingSampler<E>>,
        crossover: Box<dyn Crossover<E>>,
        replacement: Box<dyn ReplacementStrategy<E>>,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        let rng = seeded_rng(config.seed);
        Ok(Self {
            config,
            subject,
            manager,
            sampler,
            crossover,
            replacement,
            listeners: Vec::new(),
            population: Vec::new(),
            rng,
            state: SearchState::Created,
            generation: 0,
            scope: None,
            excluded: BTreeSet::new(),
        })
    }

    pub fn add_listener(&mut self, listener: Box<dyn SearchListener<E>>) {
        self.listeners.push(listener);
    }

    /// Restrict this search to the given objective subset.
    pub fn restrict_objectives(&mut self, scope: BTreeSet<ObjectiveId>) {
        self.scope = Some(scope);
    }

    /// Take the given objectives out of this search's responsibility.
    pub fn exclude_objectives(&mut self, excluded: BTreeSet<ObjectiveId>) {
        self.excluded.extend(excluded);
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> &[E] {
        &self.population
    }

    pub fn coverage(&self) -> f64 {
        self.manager.coverage()
    }

    pub fn strategy_name(&self) -> &'static str {
        self.replacement.name()
    }

    fn status(&self) -> SearchStatus {
        SearchStatus {
            generation: self.generation,
            covered: self.manager.covered_count(),
            uncovered: self.manager.uncovered_count(),
            coverage: self.manager.coverage(),
            tracked_objectives: self.manager.uncovered_ids(),
        }
    }

    /// Run the search until the budgets are exhausted or every tracked
    /// objective is covered, and deliver the best-found archive.
    pub fn search(&mut self, budgets: &mut BudgetManager<E>) -> Result<Archive<E>, SearchError> {
        self.initialize(budgets);

        self.state = SearchState::SearchStarted;
        budgets.search_started();
        let status = self.status();
        for listener in &mut self.listeners {
            listener.search_started(&status);
        }
        log::info!(
            "{} search started on `{}`: {} objectives, population {}",
            self.replacement.name(),
            self.subject.name(),
            self.manager.uncovered_count(),
            self.config.population_size,
        );

        while !budgets.exhausted()
            && self.manager.uncovered_count() > 0
            && !self.population.is_empty()
        {
            self.generation += 1;
            if let Err(error) = self.iterate(budgets) {
                budgets.search_stopped();
                self.state = SearchState::SearchStopped;
                return Err(error.at_generation(self.generation, self.subject.name()));
            }

            let status = self.status();
            budgets.iteration(&status);
            for listener in &mut self.listeners {
                listener.iteration(&status);
            }
            log::info!(
                "generation {}: {:.1}% coverage, {} objectives open, budget {:.0}% left",
                self.generation,
                status.coverage * 100.0,
                status.uncovered,
                budgets.remaining_fraction() * 100.0,
            );
        }

        budgets.search_stopped();
        self.state = SearchState::SearchStopped;

        let status = self.status();
        let archive = self.manager.archive().clone();
        for listener in &mut self.listeners {
            listener.search_stopped(&status, &archive);
        }
        log::info!(
            "search stopped after {} generations: {} of {} objectives archived",
            self.generation,
            archive.len(),
            self.manager.covered_count() + self.manager.uncovered_count(),
        );

        Ok(archive)
    }

    /// Sample and evaluate the initial population.
    fn initialize(&mut self, budgets: &mut BudgetManager<E>) {
        self.state = SearchState::InitializationStarted;
        budgets.initialization_started();

        self.manager.update_objectives(self.subject.as_ref());
        if let Some(scope) = &self.scope {
            self.manager.retain_objectives(scope);
        }
        if !self.excluded.is_empty() {
            self.manager.exclude_objectives(&self.excluded);
        }

        let mut population: Vec<E> = (0..self.config.population_size)
            .map(|_| self.sampler.sample(&mut self.rng))
            .collect();
        let report = self
            .manager
            .evaluate(self.subject.as_ref(), &mut population, budgets);
        if !report.failed.is_empty() {
            log::warn!(
                "{} of {} initial encodings failed evaluation",
                report.failed.len(),
                population.len(),
            );
            population.retain(|e| !report.failed.contains(&e.id()));
        }
        self.population = population;

        budgets.initialization_stopped();
        self.state = SearchState::InitializationStopped;
    }

    /// One generation: variation, evaluation, environmental selection.
    fn iterate(&mut self, budgets: &mut BudgetManager<E>) -> Result<(), SearchError> {
        let mut offspring = self.generate_offspring();

        let report = self
            .manager
            .evaluate(self.subject.as_ref(), &mut offspring, budgets);
        if !report.failed.is_empty() {
            log::debug!(
                "{} offspring failed evaluation and are excluded",
                report.failed.len()
            );
            offspring.retain(|e| !report.failed.contains(&e.id()));
        }

        let mut candidates = self.population.clone();
        candidates.extend(offspring);

        let survivors = self.replacement.select_survivors(
            &candidates,
            &self.manager,
            self.config.population_size,
            &mut self.rng,
        )?;
        if survivors.len() != self.config.population_size {
            return Err(SearchError::WrongPopulationSize {
                expected: self.config.population_size,
                actual: survivors.len(),
                strategy: self.replacement.name(),
            });
        }
        self.population = survivors;

        Ok(())
    }

    /// Breed a full offspring generation by tournament selection, crossover
    /// and mutation.
    fn generate_offspring(&mut self) -> Vec<E> {
        let objectives = self.replacement.ranking_objectives(&self.manager);
        let ranks = rank_population(&self.population, &objectives);

        let target = self.config.population_size;
        let mut offspring: Vec<E> = Vec::with_capacity(target);

        while offspring.len() < target {
            let first = tournament_select(&ranks, self.config.tournament_size, &mut self.rng);
            let second = tournament_select(&ranks, self.config.tournament_size, &mut self.rng);

            let children = if self.rng.gen::<f64>() < self.config.crossover_probability {
                self.crossover
                    .cross_over(&self.population[first], &self.population[second], &mut self.rng)
            } else {
                vec![
                    self.population[first].clone(),
                    self.population[second].clone(),
                ]
            };

            // A crossover is allowed to produce no offspring; fall back to
            // the first parent so the generation always fills.
            let children = if children.is_empty() {
                vec![self.population[first].clone()]
            } else {
                children
            };

            for child in children {
                if offspring.len() == target {
                    break;
                }
                let child =
                    if self.rng.gen::<f64>() < self.config.mutation_probability {
                        child.mutate(
                            self.sampler.as_mut(),
                            self.config.max_mutation_depth,
                            &mut self.rng,
                        )
                    } else {
                        child
                    };
                offspring.push(child);
            }
        }

        offspring
    }
}
