// Binary logistic regression, trained from scratch on every call.
//
// The training sets here are tiny (a few hundred embeddings at most), so a
// fixed number of full-batch gradient descent steps is plenty. Everything
// is pinned — zero-initialized weights, fixed learning rate and iteration
// count, no shuffling — so a fit on the same data always produces the same
// model.

use anyhow::Result;

/// Full-batch gradient descent steps per fit.
const ITERATIONS: usize = 500;
/// Step size. Embedding features are mean-pooled BERT activations, roughly
/// unit scale, so this converges comfortably within the iteration budget.
const LEARNING_RATE: f64 = 0.5;
/// Small L2 penalty on the weights (not the bias).
const L2_PENALTY: f64 = 1e-4;

/// A fitted binary classifier: sigmoid(w·x + b) is the probability of
/// label 1.
pub struct LogisticRegression {
    weights: Vec<f64>,
    bias: f64,
}

impl LogisticRegression {
    /// Fit on feature rows `x` with labels `y` (each 0.0 or 1.0).
    pub fn fit(x: &[Vec<f64>], y: &[f64]) -> Result<Self> {
        if x.is_empty() || x.len() != y.len() {
            anyhow::bail!(
                "Training set mismatch: {} feature rows, {} labels",
                x.len(),
                y.len()
            );
        }
        let dim = x[0].len();
        if dim == 0 {
            anyhow::bail!("Training features are zero-dimensional");
        }
        if x.iter().any(|row| row.len() != dim) {
            anyhow::bail!("Training feature rows have inconsistent dimensions");
        }

        let n = x.len() as f64;
        let mut weights = vec![0.0_f64; dim];
        let mut bias = 0.0_f64;

        for _ in 0..ITERATIONS {
            let mut grad_w = vec![0.0_f64; dim];
            let mut grad_b = 0.0_f64;

            for (row, &label) in x.iter().zip(y) {
                let p = sigmoid(dot(&weights, row) + bias);
                let err = p - label;
                for (g, &feature) in grad_w.iter_mut().zip(row) {
                    *g += err * feature;
                }
                grad_b += err;
            }

            for (w, g) in weights.iter_mut().zip(&grad_w) {
                *w -= LEARNING_RATE * (g / n + L2_PENALTY * *w);
            }
            bias -= LEARNING_RATE * grad_b / n;
        }

        Ok(Self { weights, bias })
    }

    /// Probability that `x` belongs to class 1.
    pub fn predict_proba(&self, x: &[f64]) -> f64 {
        sigmoid(dot(&self.weights, x) + self.bias)
    }

    /// Hard decision: 1 if the class-1 probability is at least 0.5.
    pub fn predict(&self, x: &[f64]) -> u8 {
        if self.predict_proba(x) >= 0.5 {
            1
        } else {
            0
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
