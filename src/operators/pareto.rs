/// Pareto dominance utilities shared by ranking, archives and reference fronts.
/// Implements NSGA-II style fast non-dominated sorting and crowding distance.
/// All objectives are minimized.

/// Check if A dominates B: A is no worse than B in all objectives and
/// strictly better in at least one. Vectors of different length never
/// dominate each other.
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut at_least_one_better = false;

    for (a_val, b_val) in a.iter().zip(b) {
        if b_val < a_val {
            return false;
        }
        if a_val < b_val {
            at_least_one_better = true;
        }
    }

    at_least_one_better
}

/// Fast non-dominated sorting (NSGA-II algorithm)
/// Returns indices grouped by front (0 = best) and the rank of every point
pub fn fast_non_dominated_sort(objectives: &[&[f64]]) -> (Vec<Vec<usize>>, Vec<usize>) {
    let n = objectives.len();

    // domination_count: how many points dominate i
    // dominated_solutions: indices of points i dominates
    let mut domination_count = vec![0usize; n];
    let mut dominated_solutions: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut ranks = vec![0usize; n];
    let mut fronts: Vec<Vec<usize>> = Vec::new();

    let mut first_front = Vec::new();

    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }

            if dominates(objectives[i], objectives[j]) {
                dominated_solutions[i].push(j);
            } else if dominates(objectives[j], objectives[i]) {
                domination_count[i] += 1;
            }
        }

        if domination_count[i] == 0 {
            first_front.push(i);
        }
    }

    if first_front.is_empty() {
        return (fronts, ranks);
    }
    fronts.push(first_front);

    let mut front_index = 0;
    while front_index < fronts.len() {
        let mut next_front = Vec::new();

        for &i in &fronts[front_index] {
            for &j in &dominated_solutions[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    ranks[j] = front_index + 1;
                    next_front.push(j);
                }
            }
        }

        if !next_front.is_empty() {
            fronts.push(next_front);
        }
        front_index += 1;
    }

    (fronts, ranks)
}

/// Crowding distance of every point in `points`
/// Higher values indicate more isolated points; boundary points are infinite
pub fn crowding_distance(points: &[&[f64]]) -> Vec<f64> {
    let size = points.len();

    if size <= 2 {
        return vec![f64::INFINITY; size];
    }

    let num_objectives = points[0].len();
    let mut distances = vec![0.0; size];

    for obj in 0..num_objectives {
        let mut sorted: Vec<usize> = (0..size).collect();
        sorted.sort_by(|&a, &b| {
            points[a][obj]
                .partial_cmp(&points[b][obj])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        distances[sorted[0]] = f64::INFINITY;
        distances[sorted[size - 1]] = f64::INFINITY;

        let min_val = points[sorted[0]][obj];
        let max_val = points[sorted[size - 1]][obj];
        let range = max_val - min_val;

        if !range.is_finite() || range.abs() < 1e-10 {
            continue;
        }

        for i in 1..(size - 1) {
            let prev_val = points[sorted[i - 1]][obj];
            let next_val = points[sorted[i + 1]][obj];
            distances[sorted[i]] += (next_val - prev_val) / range;
        }
    }

    distances
}

/// Insert `candidate` into a mutually non-dominated set.
///
/// Rejects the candidate if a member dominates or equals it; otherwise
/// evicts every member it dominates. Returns whether it was inserted.
pub fn insert_non_dominated<T, F>(members: &mut Vec<T>, candidate: T, objectives: F) -> bool
where
    F: Fn(&T) -> &[f64],
{
    let incoming = objectives(&candidate);
    if members.iter().any(|member| {
        let existing = objectives(member);
        dominates(existing, incoming) || existing == incoming
    }) {
        return false;
    }

    members.retain(|member| !dominates(incoming, objectives(member)));
    members.push(candidate);
    true
}
