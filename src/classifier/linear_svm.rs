//! Linear SVM delegate trained by stochastic subgradient descent
//!
//! One-vs-all multiclass: each declared class gets its own binary {-1, +1}
//! relabeling of the training set and its own hyperplane; classification is
//! the argmax of the per-class decision values.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::{Classifier, Dataset, RebalanceError, Result};

/// Hyperparameters for [`LinearSvm`]
#[derive(Debug, Clone)]
pub struct SvmParams {
    /// Regularization strength (larger C fits the data harder)
    pub c: f64,
    /// Number of passes over the training set
    pub epochs: usize,
}

impl Default for SvmParams {
    fn default() -> Self {
        Self { c: 1.0, epochs: 50 }
    }
}

struct OvaModel {
    /// One weight vector per declared class, in declaration order
    weights: Vec<Vec<f64>>,
    biases: Vec<f64>,
    dim: usize,
    samples: usize,
}

/// Linear one-vs-all SVM
pub struct LinearSvm {
    classes: Vec<i32>,
    params: SvmParams,
    seed: Option<u64>,
    model: Option<OvaModel>,
}

impl LinearSvm {
    /// Create an untrained SVM over the given output classes with default
    /// hyperparameters
    pub fn new(classes: Vec<i32>) -> Self {
        Self {
            classes,
            params: SvmParams::default(),
            seed: None,
            model: None,
        }
    }

    /// Set regularization parameter C
    pub fn with_c(mut self, c: f64) -> Self {
        self.params.c = c;
        self
    }

    /// Set the number of training epochs
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.params.epochs = epochs;
        self
    }

    /// Fix the RNG seed for reproducible training
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of rows the model was fit on, once trained
    pub fn sample_count(&self) -> Option<usize> {
        self.model.as_ref().map(|m| m.samples)
    }

    /// Feature width the model was fit on, once trained
    pub fn feature_count(&self) -> Option<usize> {
        self.model.as_ref().map(|m| m.dim)
    }

    /// Fit one binary hyperplane with the Pegasos update rule
    fn fit_binary<R: Rng>(
        &self,
        data: &Dataset,
        binary_labels: &[f64],
        rng: &mut R,
    ) -> (Vec<f64>, f64) {
        let n = data.len();
        let lambda = 1.0 / (self.params.c * n as f64);
        let steps = self.params.epochs * n;

        let mut w = vec![0.0; data.dim()];
        let mut b = 0.0;

        for t in 1..=steps {
            let i = rng.gen_range(0..n);
            let x = data.row(i);
            let y = binary_labels[i];

            let eta = 1.0 / (lambda * t as f64);
            let margin = y * (dot(&w, x) + b);

            let shrink = 1.0 - eta * lambda;
            if margin < 1.0 {
                for (wj, &xj) in w.iter_mut().zip(x) {
                    *wj = shrink * *wj + eta * y * xj;
                }
                b += eta * y;
            } else {
                for wj in w.iter_mut() {
                    *wj *= shrink;
                }
            }
        }

        (w, b)
    }
}

impl Classifier for LinearSvm {
    fn name(&self) -> String {
        "LinearSvm".to_string()
    }

    fn classes(&self) -> &[i32] {
        &self.classes
    }

    fn train(&mut self, data: &Dataset) -> Result<()> {
        if data.is_empty() {
            return Err(RebalanceError::EmptyDataset);
        }
        if self.classes.is_empty() {
            return Err(RebalanceError::InvalidParameter(
                "no output classes declared".to_string(),
            ));
        }
        if self.params.c <= 0.0 {
            return Err(RebalanceError::InvalidParameter(format!(
                "C must be positive, got {}",
                self.params.c
            )));
        }
        for &label in data.labels() {
            if !self.classes.contains(&label) {
                return Err(RebalanceError::InvalidDataset(format!(
                    "label {label} not among declared classes {:?}",
                    self.classes
                )));
            }
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut weights = Vec::with_capacity(self.classes.len());
        let mut biases = Vec::with_capacity(self.classes.len());

        for &class in &self.classes {
            // Binary {-1, +1} relabeling for one-vs-all
            let binary_labels: Vec<f64> = data
                .labels()
                .iter()
                .map(|&l| if l == class { 1.0 } else { -1.0 })
                .collect();

            let (w, b) = self.fit_binary(data, &binary_labels, &mut rng);
            weights.push(w);
            biases.push(b);
        }

        self.model = Some(OvaModel {
            weights,
            biases,
            dim: data.dim(),
            samples: data.len(),
        });
        Ok(())
    }

    fn classify(&self, features: &[Vec<f64>]) -> Result<Vec<i32>> {
        let model = self.model.as_ref().ok_or(RebalanceError::UnfitClassifier)?;

        let mut predictions = Vec::with_capacity(features.len());
        for row in features {
            if row.len() != model.dim {
                return Err(RebalanceError::DimensionMismatch {
                    expected: model.dim,
                    actual: row.len(),
                });
            }

            let mut best_class = self.classes[0];
            let mut best_score = f64::NEG_INFINITY;
            for (k, &class) in self.classes.iter().enumerate() {
                let score = dot(&model.weights[k], row) + model.biases[k];
                if score > best_score {
                    best_score = score;
                    best_class = class;
                }
            }
            predictions.push(best_class);
        }
        Ok(predictions)
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
