// Copyright 2026 Quill Contributors
// SPDX-License-Identifier: Apache-2.0

//! Variable-depth recurrent cell.
//!
//! A stack of L+1 layer blocks (linear projection, tanh, dropout) threads a
//! caller-owned hidden-state matrix through one step at a time. Block 0
//! consumes the external input concatenated with hidden row 0; block i
//! consumes row i-1 concatenated with row i. The matrix is mutated in place,
//! row by row, so within one step row i-1 is read *after* this step already
//! overwrote it while row i still holds the previous step's value. That
//! read-before-write ordering is the contract, not an accident: callers must
//! reuse the same matrix across all steps of one sequence.

use ndarray::{s, Array1, Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use thiserror::Error;

/// Caller contract violations. The cell fails fast on a dimension mismatch
/// rather than truncating or padding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("input has width {got}, expected {expected}")]
    InputDim { expected: usize, got: usize },

    #[error(
        "hidden state has shape ({got_rows}, {got_cols}), expected ({expected_rows}, {expected_cols})"
    )]
    HiddenShape {
        expected_rows: usize,
        expected_cols: usize,
        got_rows: usize,
        got_cols: usize,
    },
}

/// Construction parameters for [`Rnn`].
///
/// Everything the original left to ambient globals (device placement, the
/// RNG behind dropout) is explicit here; a fixed `seed` makes weight init
/// and dropout masks reproducible.
#[derive(Debug, Clone, Deserialize)]
pub struct RnnConfig {
    /// Width of the external input vector.
    pub input_size: usize,
    /// Width of every hidden-state row.
    pub hidden_size: usize,
    /// Number of output categories.
    pub output_size: usize,
    /// Number of hidden layers beyond block 0 (the stack has this + 1 rows).
    #[serde(default = "default_hidden_layers")]
    pub hidden_layers: usize,
    /// Dropout probability applied after every block's tanh.
    #[serde(default = "default_dropout")]
    pub dropout: f32,
    /// RNG seed; `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_hidden_layers() -> usize {
    1
}

fn default_dropout() -> f32 {
    0.5
}

/// Dense projection `W·x + b` with PyTorch-default uniform init.
#[derive(Debug, Clone)]
struct Linear {
    weight: Array2<f32>,
    bias: Array1<f32>,
}

impl Linear {
    fn init(in_dim: usize, out_dim: usize, rng: &mut StdRng) -> Self {
        let bound = 1.0 / (in_dim as f32).sqrt();
        let weight = Array2::from_shape_fn((out_dim, in_dim), |_| rng.gen_range(-bound..bound));
        let bias = Array1::from_shape_fn(out_dim, |_| rng.gen_range(-bound..bound));
        Self { weight, bias }
    }

    fn apply(&self, x: ArrayView1<f32>) -> Array1<f32> {
        self.weight.dot(&x) + &self.bias
    }
}

/// One layer of the stack: projection, tanh, dropout, bound at construction.
#[derive(Debug, Clone)]
struct LayerBlock {
    linear: Linear,
    dropout_p: f32,
}

impl LayerBlock {
    /// Projection, tanh, then inverted dropout (train mode only).
    fn apply(&self, x: ArrayView1<f32>, training: bool, rng: &mut StdRng) -> Array1<f32> {
        let mut h = self.linear.apply(x).mapv(f32::tanh);
        if training && self.dropout_p > 0.0 {
            let keep = 1.0 - self.dropout_p;
            for v in h.iter_mut() {
                if rng.gen::<f32>() < self.dropout_p {
                    *v = 0.0;
                } else {
                    *v /= keep;
                }
            }
        }
        h
    }
}

/// The recurrent cell. See the module docs for the state-threading contract.
#[derive(Debug)]
pub struct Rnn {
    input_size: usize,
    hidden_size: usize,
    output_size: usize,
    hidden_layers: usize,
    /// Fixed-length block arena, index = layer number. Never resized.
    blocks: Vec<LayerBlock>,
    h2o: Linear,
    training: bool,
    rng: StdRng,
}

impl Rnn {
    /// Build L+1 layer blocks and the output projection.
    ///
    /// Block 0 projects `input_size + hidden_size -> hidden_size`; blocks
    /// 1..=L project `2*hidden_size -> hidden_size`.
    pub fn new(config: RnnConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut blocks = Vec::with_capacity(config.hidden_layers + 1);
        blocks.push(LayerBlock {
            linear: Linear::init(
                config.input_size + config.hidden_size,
                config.hidden_size,
                &mut rng,
            ),
            dropout_p: config.dropout,
        });
        for _ in 0..config.hidden_layers {
            blocks.push(LayerBlock {
                linear: Linear::init(config.hidden_size * 2, config.hidden_size, &mut rng),
                dropout_p: config.dropout,
            });
        }
        let h2o = Linear::init(config.hidden_size, config.output_size, &mut rng);

        Self {
            input_size: config.input_size,
            hidden_size: config.hidden_size,
            output_size: config.output_size,
            hidden_layers: config.hidden_layers,
            blocks,
            h2o,
            training: true,
            rng,
        }
    }

    /// Zero-filled hidden state of shape `(hidden_layers + 1, hidden_size)`,
    /// the first step's input for a fresh sequence.
    pub fn init_hidden(&self) -> Array2<f32> {
        Array2::zeros((self.hidden_layers + 1, self.hidden_size))
    }

    /// Toggle training mode (dropout active) vs evaluation mode (dropout is
    /// the identity).
    pub fn train(&mut self, training: bool) {
        self.training = training;
    }

    pub fn is_training(&self) -> bool {
        self.training
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    /// One forward step.
    ///
    /// Overwrites every row of `hidden` in layer order, then projects the
    /// last row to a log-probability distribution over `output_size`
    /// categories. With zero hidden layers the inter-layer loop is empty and
    /// the output is projected straight from row 0.
    pub fn forward(
        &mut self,
        input: ArrayView1<f32>,
        hidden: &mut Array2<f32>,
    ) -> Result<Array1<f32>, ModelError> {
        if input.len() != self.input_size {
            return Err(ModelError::InputDim {
                expected: self.input_size,
                got: input.len(),
            });
        }
        let rows = self.hidden_layers + 1;
        if hidden.shape() != [rows, self.hidden_size] {
            return Err(ModelError::HiddenShape {
                expected_rows: rows,
                expected_cols: self.hidden_size,
                got_rows: hidden.nrows(),
                got_cols: hidden.ncols(),
            });
        }

        let combined = concat(input, hidden.row(0));
        let h0 = self.blocks[0].apply(combined.view(), self.training, &mut self.rng);
        hidden.row_mut(0).assign(&h0);

        for i in 1..=self.hidden_layers {
            // Row i-1 is this step's fresh value; row i is still last step's.
            let combined = concat(hidden.row(i - 1), hidden.row(i));
            let hi = self.blocks[i].apply(combined.view(), self.training, &mut self.rng);
            hidden.row_mut(i).assign(&hi);
        }

        let logits = self.h2o.apply(hidden.row(self.hidden_layers));
        Ok(log_softmax(logits))
    }
}

fn concat(a: ArrayView1<f32>, b: ArrayView1<f32>) -> Array1<f32> {
    let mut out = Array1::zeros(a.len() + b.len());
    out.slice_mut(s![..a.len()]).assign(&a);
    out.slice_mut(s![a.len()..]).assign(&b);
    out
}

/// Numerically stable log-softmax: shift by the max before exponentiating.
fn log_softmax(x: Array1<f32>) -> Array1<f32> {
    let max = x.fold(f32::NEG_INFINITY, |m, &v| m.max(v));
    let shifted = x.mapv(|v| v - max);
    let log_sum = shifted.mapv(f32::exp).sum().ln();
    shifted.mapv(|v| v - log_sum)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(hidden_layers: usize) -> RnnConfig {
        RnnConfig {
            input_size: 8,
            hidden_size: 16,
            output_size: 5,
            hidden_layers,
            dropout: 0.5,
            seed: Some(7),
        }
    }

    fn input() -> Array1<f32> {
        Array1::from_shape_fn(8, |i| (i as f32 * 0.3).sin())
    }

    #[test]
    fn test_init_hidden_shape_and_zeros() {
        for layers in [0, 1, 3] {
            let rnn = Rnn::new(config(layers));
            let hidden = rnn.init_hidden();
            assert_eq!(hidden.shape(), [layers + 1, 16]);
            assert!(hidden.iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn test_output_is_log_distribution() {
        for layers in [0, 1, 2] {
            let mut rnn = Rnn::new(config(layers));
            rnn.train(false);
            let mut hidden = rnn.init_hidden();
            let out = rnn.forward(input().view(), &mut hidden).unwrap();
            assert_eq!(out.len(), 5);
            let prob_sum: f32 = out.mapv(f32::exp).sum();
            assert!(
                (prob_sum - 1.0).abs() < 1e-5,
                "layers={layers}: probabilities sum to {prob_sum}"
            );
        }
    }

    #[test]
    fn test_distribution_holds_in_training_mode() {
        let mut rnn = Rnn::new(config(2));
        let mut hidden = rnn.init_hidden();
        let out = rnn.forward(input().view(), &mut hidden).unwrap();
        let prob_sum: f32 = out.mapv(f32::exp).sum();
        assert!((prob_sum - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_hidden_layers_uses_row_zero() {
        let mut rnn = Rnn::new(config(0));
        rnn.train(false);
        let mut hidden = rnn.init_hidden();
        assert_eq!(hidden.nrows(), 1);

        let out = rnn.forward(input().view(), &mut hidden).unwrap();
        assert_eq!(out.len(), 5);

        // Row 0 was overwritten by block 0, so a second step sees new state.
        assert!(hidden.row(0).iter().any(|&v| v != 0.0));
        let out2 = rnn.forward(input().view(), &mut hidden).unwrap();
        assert_ne!(out, out2);
    }

    #[test]
    fn test_hidden_mutated_in_place_across_steps() {
        let mut rnn = Rnn::new(config(2));
        rnn.train(false);
        let mut hidden = rnn.init_hidden();

        rnn.forward(input().view(), &mut hidden).unwrap();
        let after_one = hidden.clone();
        assert!(after_one.iter().any(|&v| v != 0.0));

        rnn.forward(input().view(), &mut hidden).unwrap();
        assert_ne!(hidden, after_one);
    }

    #[test]
    fn test_eval_mode_is_deterministic() {
        let mut rnn = Rnn::new(config(1));
        rnn.train(false);

        let mut h1 = rnn.init_hidden();
        let out1 = rnn.forward(input().view(), &mut h1).unwrap();
        let mut h2 = rnn.init_hidden();
        let out2 = rnn.forward(input().view(), &mut h2).unwrap();

        assert_eq!(out1, out2);
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_train_mode_dropout_zeroes_units() {
        let mut cfg = config(0);
        cfg.dropout = 0.9;
        cfg.hidden_size = 64;
        let mut rnn = Rnn::new(cfg);
        let mut hidden = rnn.init_hidden();
        rnn.forward(input().view(), &mut hidden).unwrap();

        let zeros = hidden.row(0).iter().filter(|&&v| v == 0.0).count();
        assert!(zeros > 0, "expected dropped units at p=0.9, found none");
    }

    #[test]
    fn test_wrong_input_width() {
        let mut rnn = Rnn::new(config(1));
        let mut hidden = rnn.init_hidden();
        let bad = Array1::<f32>::zeros(3);
        let err = rnn.forward(bad.view(), &mut hidden).unwrap_err();
        assert_eq!(err, ModelError::InputDim { expected: 8, got: 3 });
    }

    #[test]
    fn test_wrong_hidden_shape() {
        let mut rnn = Rnn::new(config(1));
        let mut bad = Array2::<f32>::zeros((3, 16));
        let err = rnn.forward(input().view(), &mut bad).unwrap_err();
        assert_eq!(
            err,
            ModelError::HiddenShape {
                expected_rows: 2,
                expected_cols: 16,
                got_rows: 3,
                got_cols: 16,
            }
        );
    }

    #[test]
    fn test_config_defaults_from_json() {
        let cfg: RnnConfig =
            serde_json::from_str(r#"{"input_size":4,"hidden_size":8,"output_size":2}"#).unwrap();
        assert_eq!(cfg.hidden_layers, 1);
        assert_eq!(cfg.dropout, 0.5);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn test_seeded_construction_is_reproducible() {
        let mut a = Rnn::new(config(1));
        let mut b = Rnn::new(config(1));
        a.train(false);
        b.train(false);

        let mut ha = a.init_hidden();
        let mut hb = b.init_hidden();
        let out_a = a.forward(input().view(), &mut ha).unwrap();
        let out_b = b.forward(input().view(), &mut hb).unwrap();
        assert_eq!(out_a, out_b);
    }
}
