//! Objective function and mining run.

use super::config::MiningConfig;
use super::types::{Optimizer, SearchBounds};
use crate::archive::{ArchiveEntry, RuleArchive};
use crate::attribute::AttributeModel;
use crate::error::{Error, Result};
use crate::fitness::FitnessEvaluator;
use crate::rule::{Decoded, Rule, RuleDecoder};
use crate::transaction::TransactionTable;
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The objective an external optimizer calls.
///
/// Owns the archive of one run. [`evaluate`](Self::evaluate) takes `&self`
/// and is safe to call from many threads at once: the model and table are
/// read-only, and the archive insert is atomic.
#[derive(Debug)]
pub struct RuleMiningProblem<'d> {
    model: &'d AttributeModel,
    table: &'d TransactionTable,
    decoder: RuleDecoder,
    evaluator: FitnessEvaluator,
    archive: RuleArchive,
    evaluations: AtomicUsize,
    parallel: bool,
}

impl<'d> RuleMiningProblem<'d> {
    /// Creates the objective with an empty archive.
    pub fn new(
        model: &'d AttributeModel,
        table: &'d TransactionTable,
        config: &MiningConfig,
    ) -> Result<Self> {
        config.validate().map_err(Error::InvalidConfig)?;
        table.check_model(model)?;

        let decoder = RuleDecoder::new(model, config.decoder)?;
        let evaluator = FitnessEvaluator::new(model, config.fitness.clone())?;

        tracing::debug!(
            dimension = decoder.dimension(),
            transactions = table.len(),
            orientation = ?config.fitness.orientation,
            "rule mining problem ready"
        );

        Ok(Self {
            model,
            table,
            decoder,
            evaluator,
            archive: RuleArchive::new(),
            evaluations: AtomicUsize::new(0),
            parallel: config.parallel,
        })
    }

    /// Candidate vector length.
    pub fn dimension(&self) -> usize {
        self.decoder.dimension()
    }

    /// Search-space bounds for every dimension.
    pub fn bounds(&self) -> SearchBounds {
        SearchBounds::unit()
    }

    /// Worst-fitness sentinel in the configured orientation.
    pub fn worst(&self) -> f64 {
        self.evaluator.worst()
    }

    pub fn model(&self) -> &AttributeModel {
        self.model
    }

    pub fn table(&self) -> &TransactionTable {
        self.table
    }

    /// Decodes a vector without scoring or archiving it.
    pub fn decode(&self, vector: &[f64]) -> Result<Decoded> {
        self.decoder.decode(vector)
    }

    /// Decodes, scores, and archives `vector`.
    ///
    /// Invalid decodings score [`worst`](Self::worst) and leave the archive
    /// untouched. Fails only on a wrong vector length.
    pub fn try_evaluate(&self, vector: &[f64]) -> Result<f64> {
        let decoded = self.decoder.decode(vector)?;
        self.evaluations.fetch_add(1, Ordering::Relaxed);

        let (fitness, metrics) = self.evaluator.score(&decoded, self.table);
        if let (Decoded::Rule(rule), Some(metrics)) = (&decoded, metrics) {
            self.archive.record(rule, metrics, fitness);
        }
        Ok(fitness)
    }

    /// Optimizer-facing objective.
    ///
    /// A wrong-length vector breaks the optimizer's contract; it is logged
    /// and scored worst instead of panicking inside the optimizer.
    pub fn evaluate(&self, vector: &[f64]) -> f64 {
        match self.try_evaluate(vector) {
            Ok(fitness) => fitness,
            Err(e) => {
                tracing::warn!(error = %e, "candidate rejected");
                self.worst()
            }
        }
    }

    /// Evaluates many candidates, in parallel when enabled.
    pub fn evaluate_batch(&self, candidates: &[Vec<f64>]) -> Vec<f64> {
        #[cfg(feature = "parallel")]
        if self.is_parallel() {
            return candidates.par_iter().map(|v| self.evaluate(v)).collect();
        }
        candidates.iter().map(|v| self.evaluate(v)).collect()
    }

    /// Whether [`evaluate_batch`](Self::evaluate_batch) uses rayon.
    pub fn is_parallel(&self) -> bool {
        cfg!(feature = "parallel") && self.parallel
    }

    /// Number of successfully decoded evaluations so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::Relaxed)
    }

    pub fn archive(&self) -> &RuleArchive {
        &self.archive
    }

    /// Consumes the problem, returning its archive.
    pub fn into_archive(self) -> RuleArchive {
        self.archive
    }
}

/// Result of a mining run.
#[derive(Debug, Clone)]
pub struct MiningResult {
    /// Every distinct valid rule found, in discovery order.
    pub entries: Vec<ArchiveEntry>,

    /// Vectors the optimizer reported as best, best first.
    pub best_vectors: Vec<Vec<f64>>,

    /// Valid rules decoded from `best_vectors`, in the same order.
    pub best_rules: Vec<Rule>,

    /// Total objective evaluations.
    pub evaluations: usize,
}

/// Drives one or more mining runs over a fixed dataset.
///
/// Optimizers seeded through [`RuleEncoder`](crate::rule::RuleEncoder)
/// archive the decoded rule. A real bound that no scalar decodes onto
/// exactly is archived at its nearest decodable neighbour.
///
/// # Usage
///
/// ```ignore
/// let miner = Miner::new(&model, &table, MiningConfig::default());
/// let result = miner.run(&mut my_optimizer)?;
/// for entry in &result.entries {
///     println!("{}  support={:.3}", entry.rule.display(&model), entry.metrics.support);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Miner<'d> {
    model: &'d AttributeModel,
    table: &'d TransactionTable,
    config: MiningConfig,
}

impl<'d> Miner<'d> {
    pub fn new(model: &'d AttributeModel, table: &'d TransactionTable, config: MiningConfig) -> Self {
        Self {
            model,
            table,
            config,
        }
    }

    pub fn config(&self) -> &MiningConfig {
        &self.config
    }

    /// Runs `optimizer` against a fresh problem and archive.
    ///
    /// Runs are independent: each gets its own archive, so several may
    /// execute concurrently over the same data.
    pub fn run<O: Optimizer + ?Sized>(&self, optimizer: &mut O) -> Result<MiningResult> {
        let problem = RuleMiningProblem::new(self.model, self.table, &self.config)?;
        let objective = |v: &[f64]| problem.evaluate(v);

        let best_vectors = optimizer.optimize(
            &objective,
            problem.dimension(),
            problem.bounds(),
            self.config.fitness.orientation,
        );

        let best_rules: Vec<Rule> = best_vectors
            .iter()
            .filter_map(|v| problem.decode(v).ok().and_then(Decoded::into_rule))
            .collect();
        let evaluations = problem.evaluations();
        let entries = problem.into_archive().into_entries();

        tracing::info!(
            evaluations,
            rules = entries.len(),
            best = best_rules.len(),
            "mining run finished"
        );

        Ok(MiningResult {
            entries,
            best_vectors,
            best_rules,
            evaluations,
        })
    }
}
