use std::fmt;
use std::mem;

use super::step::StepFunction;
use crate::config::{ConfigError, ConfigResult, GridConfig};
use crate::pattern::{self, Grid, PatternCodec, PatternId, PatternResult};
use crate::topology::NeighborTopology;

/// Outcome of simulating a pattern.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The pattern returned to its seed after `period` generations without
    /// becoming static first.
    Oscillator {
        /// Number of generations needed to return to the seed.
        period: usize,
    },
    /// Generation `generation` was identical to the one before it.
    StillLife {
        /// First generation that repeated its predecessor.
        generation: usize,
    },
    /// Neither happened within the generation limit.
    Undetermined,
}
impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Oscillator { period } => write!(f, "oscillator (period {})", period),
            Verdict::StillLife { generation } => {
                write!(f, "not an oscillator (static at generation {})", generation)
            }
            Verdict::Undetermined => write!(f, "not an oscillator (undetermined)"),
        }
    }
}
impl Verdict {
    /// Returns `true` if the verdict is [`Verdict::Oscillator`].
    pub fn is_oscillator(self) -> bool {
        matches!(self, Verdict::Oscillator { .. })
    }
}

/// Classification of a single pattern.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ClassificationResult {
    /// Pattern that was classified.
    pub id: PatternId,
    /// Outcome of the simulation.
    pub verdict: Verdict,
    /// Number of generations simulated before the verdict was reached.
    pub generations: usize,
}
impl ClassificationResult {
    /// Returns `true` if the pattern is an oscillator.
    pub fn is_oscillator(&self) -> bool {
        self.verdict.is_oscillator()
    }
    /// Returns the period of the pattern, if it is an oscillator.
    pub fn period(&self) -> Option<usize> {
        match self.verdict {
            Verdict::Oscillator { period } => Some(period),
            _ => None,
        }
    }
}

/// Every state visited while classifying one pattern, starting with the seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTrace {
    /// Classification of the seed.
    pub result: ClassificationResult,
    /// Seed followed by each generation simulated.
    pub states: Vec<Grid>,
}

/// Reusable cell buffers for one classification at a time.
#[derive(Debug, Clone)]
pub(crate) struct Scratch {
    seed: Vec<bool>,
    previous: Vec<bool>,
    current: Vec<bool>,
}
impl Scratch {
    pub(crate) fn new(cell_count: usize) -> Self {
        Self {
            seed: vec![false; cell_count],
            previous: vec![false; cell_count],
            current: vec![false; cell_count],
        }
    }
}

/// Decides whether patterns are oscillators by simulating them for a bounded
/// number of generations.
///
/// Only a return to the seed itself counts. A pattern that settles into a
/// cycle that does not include its seed is not an oscillator.
#[derive(Debug, Clone)]
pub struct Classifier {
    codec: PatternCodec,
    step: StepFunction,
    max_generation: usize,
}

impl Default for Classifier {
    fn default() -> Self {
        let config = GridConfig::default();
        Self {
            codec: PatternCodec::default(),
            step: StepFunction::new(NeighborTopology::shared(config.side), config.rule),
            max_generation: config.max_generation,
        }
    }
}

impl Classifier {
    /// Constructs a classifier from grid settings.
    pub fn new(config: &GridConfig) -> ConfigResult<Self> {
        config.validate()?;
        let codec = PatternCodec::new(config.side).map_err(|_| ConfigError::SideOutOfRange {
            got: config.side,
            max: crate::config::MAX_SIDE,
        })?;
        Ok(Self {
            codec,
            step: StepFunction::new(NeighborTopology::shared(config.side), config.rule),
            max_generation: config.max_generation,
        })
    }

    /// Returns the codec used to decode pattern ids.
    pub fn codec(&self) -> &PatternCodec {
        &self.codec
    }
    /// Returns the step function.
    pub fn step_function(&self) -> &StepFunction {
        &self.step
    }
    /// Returns the maximum number of generations simulated per pattern.
    pub fn max_generation(&self) -> usize {
        self.max_generation
    }

    /// Classifies a pattern.
    pub fn classify(&self, id: PatternId) -> PatternResult<ClassificationResult> {
        self.codec.check(id)?;
        Ok(self.classify_with(id, &mut Scratch::new(self.codec.cell_count())))
    }
    /// Classifies the pattern on a grid.
    pub fn classify_grid(&self, seed: &Grid) -> PatternResult<ClassificationResult> {
        let id = self.codec.encode(seed)?;
        self.classify(id)
    }
    /// Classifies a pattern and records every generation along the way.
    pub fn trace(&self, id: PatternId) -> PatternResult<GenerationTrace> {
        let seed = self.codec.decode(id)?;
        let mut states = vec![seed.clone()];
        let mut scratch = Scratch::new(self.codec.cell_count());
        let (verdict, generations) = self.run(id, &mut scratch, |cells| {
            let mut grid = Grid::dead(seed.side());
            grid.cells_mut().copy_from_slice(cells);
            states.push(grid);
        });
        Ok(GenerationTrace {
            result: ClassificationResult {
                id,
                verdict,
                generations,
            },
            states,
        })
    }

    /// Classifies a pattern that is already known to be in range, reusing
    /// `scratch` for the intermediate states.
    pub(crate) fn classify_with(&self, id: PatternId, scratch: &mut Scratch) -> ClassificationResult {
        let (verdict, generations) = self.run(id, scratch, |_| ());
        ClassificationResult {
            id,
            verdict,
            generations,
        }
    }

    fn run(
        &self,
        id: PatternId,
        scratch: &mut Scratch,
        mut on_state: impl FnMut(&[bool]),
    ) -> (Verdict, usize) {
        let Scratch {
            seed,
            previous,
            current,
        } = scratch;
        pattern::decode_cells(id.bits(), seed);
        previous.copy_from_slice(&seed[..]);

        for generation in 1..=self.max_generation {
            self.step.step_cells(&previous[..], &mut current[..]);
            on_state(&current[..]);
            if current == previous {
                return (Verdict::StillLife { generation }, generation);
            }
            if current == seed {
                return (Verdict::Oscillator { period: generation }, generation);
            }
            mem::swap(previous, current);
        }
        (Verdict::Undetermined, self.max_generation)
    }
}
