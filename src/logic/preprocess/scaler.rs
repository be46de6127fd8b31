//! Standard scaling (zero mean, unit variance per column)

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    /// Population std per column; constant columns get 1.0
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn fit(data: &Array2<f64>) -> Self {
        let cols = data.ncols();
        if data.nrows() == 0 {
            return Self {
                mean: vec![0.0; cols],
                scale: vec![1.0; cols],
            };
        }

        let mean = data
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(cols));
        let std = data.std_axis(Axis(0), 0.0);

        Self {
            mean: mean.to_vec(),
            scale: std
                .iter()
                .map(|&s| if s == 0.0 || !s.is_finite() { 1.0 } else { s })
                .collect(),
        }
    }

    pub fn transform(&self, data: &Array2<f64>) -> AnalysisResult<Array2<f64>> {
        if data.ncols() != self.mean.len() {
            return Err(AnalysisError::ShapeMismatch {
                expected: self.mean.len(),
                got: data.ncols(),
            });
        }

        let mean = Array1::from(self.mean.clone());
        let scale = Array1::from(self.scale.clone());
        Ok((data - &mean) / &scale)
    }

    pub fn fit_transform(data: &Array2<f64>) -> AnalysisResult<(Self, Array2<f64>)> {
        let scaler = Self::fit(data);
        let scaled = scaler.transform(data)?;
        Ok((scaler, scaled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_columns_zero_mean_unit_std() {
        let data = array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0]];
        let (_, scaled) = StandardScaler::fit_transform(&data).unwrap();

        for col in scaled.axis_iter(Axis(1)) {
            let mean: f64 = col.sum() / col.len() as f64;
            assert!(mean.abs() < 1e-9);
            let var: f64 = col.iter().map(|v| v * v).sum::<f64>() / col.len() as f64;
            assert!((var - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_constant_column_not_divided_by_zero() {
        let data = array![[5.0], [5.0]];
        let (scaler, scaled) = StandardScaler::fit_transform(&data).unwrap();
        assert_eq!(scaler.scale, vec![1.0]);
        assert_eq!(scaled, array![[0.0], [0.0]]);
    }

    #[test]
    fn test_shape_mismatch() {
        let scaler = StandardScaler::fit(&array![[1.0, 2.0]]);
        assert!(matches!(
            scaler.transform(&array![[1.0]]),
            Err(AnalysisError::ShapeMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_refitted_scaler_reuses_statistics() {
        let train = array![[0.0], [10.0]];
        let (scaler, _) = StandardScaler::fit_transform(&train).unwrap();
        let scaled = scaler.transform(&array![[5.0], [15.0]]).unwrap();
        assert_eq!(scaled, array![[0.0], [2.0]]);
    }

    #[test]
    fn test_empty_matrix() {
        let data = Array2::<f64>::zeros((0, 3));
        let scaler = StandardScaler::fit(&data);
        assert_eq!(scaler.mean, vec![0.0; 3]);
    }
}
