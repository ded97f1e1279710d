//! Enumeration policies over an assembled search space.

use std::collections::HashMap;

use rand::Rng;

use crate::space::{ParamValue, SearchSpace};

/// Sample count used by random search when no trial limit is configured.
pub const DEFAULT_RANDOM_SAMPLES: usize = 20;

/// Common trait for the interchangeable enumeration policies.
pub trait SearchStrategy {
    /// Produce up to `count` more parameter assignments. An empty batch
    /// means the strategy is exhausted.
    fn suggest(&mut self, count: usize) -> Vec<HashMap<String, ParamValue>>;

    /// Total number of assignments this strategy will produce.
    fn planned(&self) -> usize;

    /// Human-readable strategy name.
    fn name(&self) -> &str;
}

// ---- Grid search ----

/// Exhaustive enumeration of the Cartesian product of all domains.
///
/// Iteration order is the standard nested-loop order: the first declared
/// parameter varies slowest, the last fastest. This order is a contract
/// with the trial numbers shown to the user; a trial limit truncates the
/// front of it rather than sampling.
#[derive(Debug, Clone)]
pub struct GridSearch {
    cursor: usize,
    combos: Vec<HashMap<String, ParamValue>>,
}

impl GridSearch {
    pub fn new(space: &SearchSpace, limit: Option<usize>) -> Self {
        let mut combos = Self::build_grid(space);
        if let Some(limit) = limit {
            combos.truncate(limit);
        }
        Self { cursor: 0, combos }
    }

    fn build_grid(space: &SearchSpace) -> Vec<HashMap<String, ParamValue>> {
        let mut result: Vec<HashMap<String, ParamValue>> = vec![HashMap::new()];
        for param in space.params() {
            let mut next = Vec::with_capacity(result.len() * param.len());
            for existing in &result {
                for value in param.values() {
                    let mut combo = existing.clone();
                    combo.insert(param.name.clone(), *value);
                    next.push(combo);
                }
            }
            result = next;
        }
        result
    }
}

impl SearchStrategy for GridSearch {
    fn suggest(&mut self, count: usize) -> Vec<HashMap<String, ParamValue>> {
        let end = (self.cursor + count).min(self.combos.len());
        let batch = self.combos[self.cursor..end].to_vec();
        self.cursor = end;
        batch
    }

    fn planned(&self) -> usize {
        self.combos.len()
    }

    fn name(&self) -> &str {
        "grid"
    }
}

// ---- Random search ----

/// Independent uniform sampling with replacement: one value per domain
/// per draw, no deduplication against prior draws.
#[derive(Debug, Clone)]
pub struct RandomSearch {
    space: SearchSpace,
    samples: usize,
    drawn: usize,
}

impl RandomSearch {
    pub fn new(space: &SearchSpace, limit: Option<usize>) -> Self {
        Self {
            space: space.clone(),
            samples: limit.unwrap_or(DEFAULT_RANDOM_SAMPLES),
            drawn: 0,
        }
    }

    fn sample_one(&self) -> HashMap<String, ParamValue> {
        let mut rng = rand::rng();
        let mut params = HashMap::new();
        for param in self.space.params() {
            let idx = rng.random_range(0..param.len());
            params.insert(param.name.clone(), param.values()[idx]);
        }
        params
    }
}

impl SearchStrategy for RandomSearch {
    fn suggest(&mut self, count: usize) -> Vec<HashMap<String, ParamValue>> {
        let take = count.min(self.samples - self.drawn);
        self.drawn += take;
        (0..take).map(|_| self.sample_one()).collect()
    }

    fn planned(&self) -> usize {
        self.samples
    }

    fn name(&self) -> &str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::{ParamSpec, SearchSpace};

    fn two_param_space() -> SearchSpace {
        let mut space = SearchSpace::new();
        space.insert(
            ParamSpec::from_list("a", vec![ParamValue::Int(1), ParamValue::Int(2)]).unwrap(),
        );
        space.insert(
            ParamSpec::from_list(
                "b",
                vec![
                    ParamValue::Int(10),
                    ParamValue::Int(20),
                    ParamValue::Int(30),
                ],
            )
            .unwrap(),
        );
        space
    }

    fn pair(combo: &HashMap<String, ParamValue>) -> (i64, i64) {
        let int = |v: &ParamValue| match v {
            ParamValue::Int(i) => *i,
            other => panic!("expected int, got {other:?}"),
        };
        (int(&combo["a"]), int(&combo["b"]))
    }

    #[test]
    fn grid_order_first_param_slowest() {
        let mut gs = GridSearch::new(&two_param_space(), None);
        assert_eq!(gs.planned(), 6);

        let combos = gs.suggest(100);
        let pairs: Vec<(i64, i64)> = combos.iter().map(pair).collect();
        assert_eq!(
            pairs,
            vec![(1, 10), (1, 20), (1, 30), (2, 10), (2, 20), (2, 30)]
        );
    }

    #[test]
    fn grid_limit_truncates_in_order() {
        let mut gs = GridSearch::new(&two_param_space(), Some(4));
        assert_eq!(gs.planned(), 4);
        let pairs: Vec<(i64, i64)> = gs.suggest(100).iter().map(pair).collect();
        assert_eq!(pairs, vec![(1, 10), (1, 20), (1, 30), (2, 10)]);
    }

    #[test]
    fn grid_cursor_advances() {
        let mut gs = GridSearch::new(&two_param_space(), None);
        assert_eq!(gs.suggest(4).len(), 4);
        assert_eq!(gs.suggest(4).len(), 2);
        assert!(gs.suggest(1).is_empty());
    }

    #[test]
    fn grid_enumeration_is_deterministic() {
        let space = two_param_space();
        let a = GridSearch::new(&space, None).suggest(100);
        let b = GridSearch::new(&space, None).suggest(100);
        assert_eq!(a, b);
    }

    #[test]
    fn random_draws_exactly_requested_count() {
        let mut rs = RandomSearch::new(&two_param_space(), Some(5));
        assert_eq!(rs.planned(), 5);
        assert_eq!(rs.suggest(3).len(), 3);
        assert_eq!(rs.suggest(100).len(), 2);
        assert!(rs.suggest(1).is_empty());
    }

    #[test]
    fn random_values_come_from_domains() {
        let mut rs = RandomSearch::new(&two_param_space(), Some(50));
        for combo in rs.suggest(50) {
            let (a, b) = pair(&combo);
            assert!([1, 2].contains(&a));
            assert!([10, 20, 30].contains(&b));
        }
    }

    #[test]
    fn random_default_sample_count() {
        let rs = RandomSearch::new(&two_param_space(), None);
        assert_eq!(rs.planned(), DEFAULT_RANDOM_SAMPLES);
    }
}
