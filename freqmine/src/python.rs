use numpy::ndarray::{Array1, Array2, ArrayView2};
use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray2};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::{mine, Algorithm, FrequentItemsets, InlineScheduler, MiningConfig, Transaction, WorkerPool};

type LevelArrays<'py> = (Bound<'py, PyArray2<usize>>, Bound<'py, PyArray1<usize>>);

/// Convert a 0/1 transaction matrix (rows = transactions, columns = items) to item lists
fn matrix_to_transactions(matrix: ArrayView2<i32>) -> Vec<Transaction> {
    let num_items = matrix.shape()[1];
    matrix
        .outer_iter()
        .map(|row| (0..num_items).filter(|&j| row[j] != 0).collect())
        .collect()
}

fn to_arrays<'py>(py: Python<'py>, result: &FrequentItemsets) -> PyResult<Vec<LevelArrays<'py>>> {
    let mut out = Vec::new();
    for level in result.iter_levels() {
        let itemset_size = level.itemset_size;
        let mut data = Vec::with_capacity(level.len() * itemset_size);
        let mut supports = Vec::with_capacity(level.len());
        for (items, support) in level.iter() {
            data.extend_from_slice(items);
            supports.push(support);
        }

        let itemsets = Array2::from_shape_vec((level.len(), itemset_size), data)
            .map_err(|_| PyValueError::new_err("Failed to create array"))?;
        out.push((itemsets.into_pyarray(py), Array1::from(supports).into_pyarray(py)));
    }
    Ok(out)
}

#[pyfunction]
#[pyo3(signature = (transactions, min_support, threads = 0))]
fn apriori<'py>(
    py: Python<'py>,
    transactions: PyReadonlyArray2<'py, i32>,
    min_support: f64,
    threads: usize,
) -> PyResult<Vec<LevelArrays<'py>>> {
    let transactions = matrix_to_transactions(transactions.as_array());
    let pool = WorkerPool::new(threads).map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
    let config = MiningConfig::new(min_support)
        .with_parallelism(threads)
        .with_algorithm(Algorithm::Apriori);

    let result = py.allow_threads(|| mine(&transactions, &config, &pool));
    to_arrays(py, &result)
}

#[pyfunction]
fn fp_growth<'py>(
    py: Python<'py>,
    transactions: PyReadonlyArray2<'py, i32>,
    min_support: f64,
) -> PyResult<Vec<LevelArrays<'py>>> {
    let transactions = matrix_to_transactions(transactions.as_array());
    let config = MiningConfig::new(min_support).with_algorithm(Algorithm::FpGrowth);

    let result = py.allow_threads(|| mine(&transactions, &config, &InlineScheduler));
    to_arrays(py, &result)
}

#[pymodule]
fn freqmine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(apriori, m)?)?;
    m.add_function(wrap_pyfunction!(fp_growth, m)?)?;
    Ok(())
}
