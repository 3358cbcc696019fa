use crate::error::EvaluationError;
use crate::error::Result;
use crate::evaluator;
use crate::parser;
use crate::roll;
use crate::roll::BatchResults;
use crate::roll::RollResults;
use crate::roll::Thresholds;
use crate::segment::Batch;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use tracing::debug;

/// Default random dice roller
pub struct RandomSource<'a, T: Rng> {
    pub generator: &'a mut T,
}

impl<T: Rng> roll::Source for RandomSource<'_, T> {
    fn throw(&mut self, faces: u64) -> u64 {
        self.generator.gen_range(1..=faces)
    }
}

/// Evaluate every segment of a batch in order and sum their totals
pub fn evaluate_batch<S: roll::Source>(
    batch: &Batch,
    thresholds: Thresholds,
    source: &mut S,
) -> std::result::Result<RollResults, EvaluationError> {
    let results = batch
        .iter()
        .map(|segment| evaluator::evaluate(segment, source))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let results = RollResults::new(results, thresholds)?;
    debug!(
        grand_total = results.get_grand_total(),
        verdict = ?results.get_verdict(),
        "batch evaluated"
    );
    Ok(results)
}

/// Evaluate batches one after the other, drawing from a single source
pub fn evaluate_all<S: roll::Source>(
    batches: &[Batch],
    thresholds: Thresholds,
    source: &mut S,
) -> std::result::Result<BatchResults, EvaluationError> {
    batches
        .iter()
        .map(|batch| evaluate_batch(batch, thresholds, source))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map(BatchResults::new)
}

/// Evaluate batches with one rng per batch, seeded with `seed + index`
///
/// The outcome of a batch only depends on the seed and its index.
pub fn evaluate_all_seeded(
    batches: &[Batch],
    thresholds: Thresholds,
    seed: u64,
) -> std::result::Result<BatchResults, EvaluationError> {
    batches
        .iter()
        .enumerate()
        .map(|(index, batch)| {
            let mut generator = StdRng::seed_from_u64(seed.wrapping_add(index as u64));
            evaluate_batch(
                batch,
                thresholds,
                &mut RandomSource {
                    generator: &mut generator,
                },
            )
        })
        .collect::<std::result::Result<Vec<_>, _>>()
        .map(BatchResults::new)
}

/// Represent a solver and holds the query string with its parsed batches
#[derive(Clone, Debug)]
pub struct Solver {
    query: String,
    batches: Vec<Batch>,
    thresholds: Thresholds,
}

impl Solver {
    pub fn new(input: &str) -> Result<Self> {
        Ok(Solver {
            query: input.to_owned(),
            batches: parser::parse(input)?,
            thresholds: Thresholds::default(),
        })
    }

    /// Apply success bounds to every batch
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Solve the roll expression using the default Rng source
    pub fn solve(&self) -> Result<BatchResults> {
        self.solve_with(&mut rand::thread_rng())
    }

    /// Solve the roll expression using the provided Rng source
    pub fn solve_with<R: Rng>(&self, generator: &mut R) -> Result<BatchResults> {
        self.solve_with_source(&mut RandomSource { generator })
    }

    /// Solve the roll expression using the provided source
    pub fn solve_with_source<S: roll::Source>(&self, source: &mut S) -> Result<BatchResults> {
        Ok(evaluate_all(&self.batches, self.thresholds, source)?)
    }

    /// Solve the roll expression with one seeded rng per batch
    pub fn solve_seeded(&self, seed: u64) -> Result<BatchResults> {
        Ok(evaluate_all_seeded(&self.batches, self.thresholds, seed)?)
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    /// Return the query string
    pub fn as_str(&self) -> &str {
        &self.query
    }
}
