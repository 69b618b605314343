// Non-negative matrix factorization by multiplicative updates.
//
// Factors a document-term matrix V (n_docs x n_terms) into W * H where
// W is n_docs x k and H is k x n_terms, all entries non-negative. Each row
// of H is one "topic": a weighting over the vocabulary. The classic
// Lee-Seung update rules minimize the Frobenius reconstruction error and
// keep everything non-negative by construction.
//
// Initialization is random but seeded, so the same corpus always factors
// into the same topics.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Guards the update-rule denominators against division by zero.
const EPS: f64 = 1e-10;

pub struct Nmf {
    pub n_components: usize,
    pub max_iter: usize,
    pub seed: u64,
}

impl Nmf {
    pub fn new(n_components: usize, seed: u64) -> Self {
        Self {
            n_components,
            max_iter: 200,
            seed,
        }
    }

    /// Factor `v` and return H, the component-by-term matrix
    /// (n_components rows, one per topic).
    ///
    /// The caller is responsible for clamping `n_components` to the matrix
    /// rank bound (min of the two dimensions); rows and columns of `v` must
    /// be non-negative, which TF-IDF output always is.
    pub fn fit(&self, v: &[Vec<f64>]) -> Vec<Vec<f64>> {
        let n_docs = v.len();
        let n_terms = v.first().map_or(0, |row| row.len());
        let k = self.n_components;

        if n_docs == 0 || n_terms == 0 || k == 0 {
            return Vec::new();
        }

        // Seeded uniform init scaled to the data magnitude, mirroring the
        // usual sqrt(mean(V)/k) heuristic
        let mean: f64 =
            v.iter().flatten().sum::<f64>() / (n_docs as f64 * n_terms as f64);
        let scale = (mean / k as f64).sqrt().max(EPS);

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut w: Vec<Vec<f64>> = (0..n_docs)
            .map(|_| (0..k).map(|_| rng.random::<f64>() * scale + EPS).collect())
            .collect();
        let mut h: Vec<Vec<f64>> = (0..k)
            .map(|_| (0..n_terms).map(|_| rng.random::<f64>() * scale + EPS).collect())
            .collect();

        for _ in 0..self.max_iter {
            // H <- H * (WtV) / (WtW H)
            let wt_v = matmul_at_b(&w, v, k, n_terms);
            let wt_w = matmul_at_b(&w, &w, k, k);
            let wt_w_h = matmul(&wt_w, &h, k, n_terms);
            for i in 0..k {
                for j in 0..n_terms {
                    h[i][j] *= wt_v[i][j] / (wt_w_h[i][j] + EPS);
                }
            }

            // W <- W * (V Ht) / (W H Ht)
            let v_ht = matmul_a_bt(v, &h, n_docs, k);
            let h_ht = matmul_a_bt(&h, &h, k, k);
            let w_h_ht = matmul(&w, &h_ht, n_docs, k);
            for i in 0..n_docs {
                for j in 0..k {
                    w[i][j] *= v_ht[i][j] / (w_h_ht[i][j] + EPS);
                }
            }
        }

        h
    }
}

/// A * B, where A is rows x inner and B is inner x cols.
fn matmul(a: &[Vec<f64>], b: &[Vec<f64>], rows: usize, cols: usize) -> Vec<Vec<f64>> {
    let inner = b.len();
    let mut out = vec![vec![0.0; cols]; rows];
    for i in 0..rows {
        for (l, b_row) in b.iter().enumerate().take(inner) {
            let a_il = a[i][l];
            if a_il == 0.0 {
                continue;
            }
            for j in 0..cols {
                out[i][j] += a_il * b_row[j];
            }
        }
    }
    out
}

/// Aᵀ * B, where A is inner x rows and B is inner x cols.
fn matmul_at_b(a: &[Vec<f64>], b: &[Vec<f64>], rows: usize, cols: usize) -> Vec<Vec<f64>> {
    let mut out = vec![vec![0.0; cols]; rows];
    for (a_row, b_row) in a.iter().zip(b) {
        for i in 0..rows {
            let a_li = a_row[i];
            if a_li == 0.0 {
                continue;
            }
            for j in 0..cols {
                out[i][j] += a_li * b_row[j];
            }
        }
    }
    out
}

/// A * Bᵀ, where A is rows x inner and B is cols x inner.
fn matmul_a_bt(a: &[Vec<f64>], b: &[Vec<f64>], rows: usize, cols: usize) -> Vec<Vec<f64>> {
    let mut out = vec![vec![0.0; cols]; rows];
    for i in 0..rows {
        for j in 0..cols {
            out[i][j] = a[i].iter().zip(&b[j]).map(|(x, y)| x * y).sum();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_matrix() -> Vec<Vec<f64>> {
        // Two clearly separated "topics": docs 0-1 use terms 0-2,
        // docs 2-3 use terms 3-5
        vec![
            vec![1.0, 0.8, 0.9, 0.0, 0.0, 0.0],
            vec![0.9, 1.0, 0.7, 0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 1.0, 0.9, 0.8],
            vec![0.0, 0.0, 0.0, 0.8, 1.0, 0.9],
        ]
    }

    #[test]
    fn test_fit_shapes() {
        let h = Nmf::new(2, 42).fit(&block_matrix());
        assert_eq!(h.len(), 2);
        assert!(h.iter().all(|row| row.len() == 6));
    }

    #[test]
    fn test_fit_is_nonnegative() {
        let h = Nmf::new(2, 42).fit(&block_matrix());
        assert!(h.iter().flatten().all(|&x| x >= 0.0));
    }

    #[test]
    fn test_fit_is_deterministic() {
        let v = block_matrix();
        let a = Nmf::new(2, 42).fit(&v);
        let b = Nmf::new(2, 42).fit(&v);
        assert_eq!(a, b);
    }

    #[test]
    fn test_fit_separates_block_topics() {
        let h = Nmf::new(2, 42).fit(&block_matrix());
        // Each component should concentrate its weight on one block.
        // Identify the dominant term of each component and check the two
        // components picked terms from different blocks.
        let dominant: Vec<usize> = h
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
                    .map(|(i, _)| i)
                    .unwrap()
            })
            .collect();
        let blocks: Vec<usize> = dominant.iter().map(|&i| if i < 3 { 0 } else { 1 }).collect();
        assert_ne!(blocks[0], blocks[1], "components collapsed onto one block");
    }

    #[test]
    fn test_fit_empty_input() {
        assert!(Nmf::new(2, 42).fit(&[]).is_empty());
    }

    #[test]
    fn test_different_seeds_may_differ_but_stay_valid() {
        let v = block_matrix();
        let h = Nmf::new(2, 7).fit(&v);
        assert_eq!(h.len(), 2);
        assert!(h.iter().flatten().all(|&x| x >= 0.0));
    }
}
