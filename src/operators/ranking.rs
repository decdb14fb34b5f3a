use super::pareto::{dominates, fast_non_dominated_sort};
use super::traits::Ranking;

/// Non-dominated sorting: rank = index of the front a point belongs to
#[derive(Debug, Clone, Default)]
pub struct DominanceRanking;

impl Ranking for DominanceRanking {
    fn name(&self) -> &'static str {
        "dominanceRanking"
    }

    fn rank(&self, objectives: &[&[f64]]) -> Vec<usize> {
        fast_non_dominated_sort(objectives).1
    }
}

/// SPEA2 raw fitness: sum of the strengths of all dominators, where a
/// point's strength is the number of points it dominates. Distinct raw
/// fitness values are mapped to dense ranks.
#[derive(Debug, Clone, Default)]
pub struct StrengthRanking;

impl Ranking for StrengthRanking {
    fn name(&self) -> &'static str {
        "strengthRanking"
    }

    fn rank(&self, objectives: &[&[f64]]) -> Vec<usize> {
        let n = objectives.len();
        let mut strength = vec![0usize; n];
        for i in 0..n {
            for j in 0..n {
                if i != j && dominates(objectives[i], objectives[j]) {
                    strength[i] += 1;
                }
            }
        }

        let mut raw = vec![0usize; n];
        for i in 0..n {
            for j in 0..n {
                if i != j && dominates(objectives[j], objectives[i]) {
                    raw[i] += strength[j];
                }
            }
        }

        let mut levels = raw.clone();
        levels.sort_unstable();
        levels.dedup();

        raw.iter()
            .map(|value| levels.binary_search(value).unwrap_or(0))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<Vec<f64>> {
        vec![
            vec![1.0, 5.0],
            vec![5.0, 1.0],
            vec![3.0, 6.0],
            vec![6.0, 6.0],
        ]
    }

    #[test]
    fn test_dominance_ranking() {
        let points = points();
        let refs: Vec<&[f64]> = points.iter().map(|p| p.as_slice()).collect();
        assert_eq!(DominanceRanking.rank(&refs), vec![0, 0, 1, 2]);
    }

    #[test]
    fn test_strength_ranking() {
        let points = points();
        let refs: Vec<&[f64]> = points.iter().map(|p| p.as_slice()).collect();

        // strengths: [2, 1, 1, 0]; raw: [0, 0, 2, 4]
        assert_eq!(StrengthRanking.rank(&refs), vec![0, 0, 1, 2]);
    }

    #[test]
    fn test_ranking_empty() {
        assert!(StrengthRanking.rank(&[]).is_empty());
        assert!(DominanceRanking.rank(&[]).is_empty());
    }
}
