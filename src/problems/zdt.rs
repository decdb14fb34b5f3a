use super::Problem;
use anyhow::{bail, Result};
use std::f64::consts::PI;

fn check_length(name: &str, expected: usize, variables: &[f64]) -> Result<()> {
    if expected == 0 || variables.len() != expected {
        bail!("{} expects {} variables, got {}", name, expected, variables.len());
    }
    Ok(())
}

/// `1 + 9 * mean(x[1..])`, shared by ZDT1-3
fn linear_g(variables: &[f64]) -> f64 {
    let tail = &variables[1..];
    if tail.is_empty() {
        return 1.0;
    }
    1.0 + 9.0 * tail.iter().sum::<f64>() / tail.len() as f64
}

macro_rules! zdt_problem {
    ($name:ident) => {
        #[derive(Debug, Clone)]
        pub struct $name {
            variables: usize,
        }

        impl $name {
            pub fn new(variables: usize) -> Self {
                Self { variables }
            }
        }
    };
}

zdt_problem!(Zdt1);
zdt_problem!(Zdt2);
zdt_problem!(Zdt3);
zdt_problem!(Zdt4);
zdt_problem!(Zdt6);

impl Problem for Zdt1 {
    fn name(&self) -> &str {
        "ZDT1"
    }

    fn number_of_variables(&self) -> usize {
        self.variables
    }

    fn number_of_objectives(&self) -> usize {
        2
    }

    fn bounds(&self) -> Vec<(f64, f64)> {
        vec![(0.0, 1.0); self.variables]
    }

    fn evaluate(&self, x: &[f64]) -> Result<Vec<f64>> {
        check_length(self.name(), self.variables, x)?;
        let f1 = x[0];
        let g = linear_g(x);
        Ok(vec![f1, g * (1.0 - (f1 / g).sqrt())])
    }
}

impl Problem for Zdt2 {
    fn name(&self) -> &str {
        "ZDT2"
    }

    fn number_of_variables(&self) -> usize {
        self.variables
    }

    fn number_of_objectives(&self) -> usize {
        2
    }

    fn bounds(&self) -> Vec<(f64, f64)> {
        vec![(0.0, 1.0); self.variables]
    }

    fn evaluate(&self, x: &[f64]) -> Result<Vec<f64>> {
        check_length(self.name(), self.variables, x)?;
        let f1 = x[0];
        let g = linear_g(x);
        Ok(vec![f1, g * (1.0 - (f1 / g).powi(2))])
    }
}

impl Problem for Zdt3 {
    fn name(&self) -> &str {
        "ZDT3"
    }

    fn number_of_variables(&self) -> usize {
        self.variables
    }

    fn number_of_objectives(&self) -> usize {
        2
    }

    fn bounds(&self) -> Vec<(f64, f64)> {
        vec![(0.0, 1.0); self.variables]
    }

    fn evaluate(&self, x: &[f64]) -> Result<Vec<f64>> {
        check_length(self.name(), self.variables, x)?;
        let f1 = x[0];
        let g = linear_g(x);
        let h = 1.0 - (f1 / g).sqrt() - (f1 / g) * (10.0 * PI * f1).sin();
        Ok(vec![f1, g * h])
    }
}

impl Problem for Zdt4 {
    fn name(&self) -> &str {
        "ZDT4"
    }

    fn number_of_variables(&self) -> usize {
        self.variables
    }

    fn number_of_objectives(&self) -> usize {
        2
    }

    fn bounds(&self) -> Vec<(f64, f64)> {
        let mut bounds = vec![(-5.0, 5.0); self.variables];
        if let Some(first) = bounds.first_mut() {
            *first = (0.0, 1.0);
        }
        bounds
    }

    fn evaluate(&self, x: &[f64]) -> Result<Vec<f64>> {
        check_length(self.name(), self.variables, x)?;
        let f1 = x[0];
        let tail = &x[1..];
        let g = 1.0
            + 10.0 * tail.len() as f64
            + tail
                .iter()
                .map(|xi| xi * xi - 10.0 * (4.0 * PI * xi).cos())
                .sum::<f64>();
        Ok(vec![f1, g * (1.0 - (f1 / g).sqrt())])
    }
}

impl Problem for Zdt6 {
    fn name(&self) -> &str {
        "ZDT6"
    }

    fn number_of_variables(&self) -> usize {
        self.variables
    }

    fn number_of_objectives(&self) -> usize {
        2
    }

    fn bounds(&self) -> Vec<(f64, f64)> {
        vec![(0.0, 1.0); self.variables]
    }

    fn evaluate(&self, x: &[f64]) -> Result<Vec<f64>> {
        check_length(self.name(), self.variables, x)?;
        let f1 = 1.0 - (-4.0 * x[0]).exp() * (6.0 * PI * x[0]).sin().powi(6);
        let tail = &x[1..];
        let g = if tail.is_empty() {
            1.0
        } else {
            1.0 + 9.0 * (tail.iter().sum::<f64>() / tail.len() as f64).powf(0.25)
        };
        Ok(vec![f1, g * (1.0 - (f1 / g).powi(2))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zdt1_on_optimal_front() {
        let problem = Zdt1::new(5);
        let objectives = problem.evaluate(&[0.25, 0.0, 0.0, 0.0, 0.0]).unwrap();
        assert_eq!(objectives[0], 0.25);
        assert!((objectives[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_zdt2_on_optimal_front() {
        let problem = Zdt2::new(3);
        let objectives = problem.evaluate(&[0.5, 0.0, 0.0]).unwrap();
        assert!((objectives[1] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_zdt4_bounds() {
        let bounds = Zdt4::new(3).bounds();
        assert_eq!(bounds[0], (0.0, 1.0));
        assert_eq!(bounds[2], (-5.0, 5.0));
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        assert!(Zdt3::new(4).evaluate(&[0.1, 0.2]).is_err());
    }
}
