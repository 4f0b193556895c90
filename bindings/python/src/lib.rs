use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;
use spectral_blur_core::histogram::DEFAULT_TOP_COLORS;
use spectral_blur_core::{BlurOptions, ColorHistogram, DEFAULT_RADIUS};

/// Convert a `BlurError` into a Python `ValueError`.
fn to_py_err(e: spectral_blur_core::BlurError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Blur raw RGB pixel data with a frequency-domain Gaussian.
///
/// Args:
///     data: Raw pixel bytes in RGB order (length must be width * height * 3).
///     width: Image width in pixels.
///     height: Image height in pixels.
///     radius: Gaussian standard deviation in pixels (default 4.5).
///
/// Returns:
///     A bytes object of the same length containing the blurred pixels.
#[pyfunction]
#[pyo3(signature = (data, width, height, radius = DEFAULT_RADIUS))]
fn blur(
    py: Python<'_>,
    data: &[u8],
    width: u32,
    height: u32,
    radius: f64,
) -> PyResult<Py<PyBytes>> {
    let options = BlurOptions::new().with_radius(radius);
    let pixels = py
        .allow_threads(|| spectral_blur_core::blur_rgb(data, width, height, &options))
        .map_err(to_py_err)?;
    Ok(PyBytes::new(py, &pixels).into())
}

/// Replace every pixel with the integer mean of its channels.
#[pyfunction]
fn grayscale(py: Python<'_>, data: &[u8], width: u32, height: u32) -> PyResult<Py<PyBytes>> {
    let pixels =
        spectral_blur_core::filters::grayscale_rgb(data, width, height).map_err(to_py_err)?;
    Ok(PyBytes::new(py, &pixels).into())
}

/// Replace every channel value `c` with `255 - c`.
#[pyfunction]
fn invert(py: Python<'_>, data: &[u8], width: u32, height: u32) -> PyResult<Py<PyBytes>> {
    let pixels = spectral_blur_core::filters::invert_rgb(data, width, height).map_err(to_py_err)?;
    Ok(PyBytes::new(py, &pixels).into())
}

/// Most common exact colours of raw RGB pixel data.
///
/// Args:
///     data: Raw pixel bytes in RGB order.
///     top: Number of colours to return (default 15).
///
/// Returns:
///     A list of (hex, count) tuples, most frequent first.
#[pyfunction]
#[pyo3(signature = (data, top = DEFAULT_TOP_COLORS))]
fn top_colors(data: &[u8], top: usize) -> PyResult<Vec<(String, u64)>> {
    if data.len() % 3 != 0 {
        return Err(PyValueError::new_err(format!(
            "pixel buffer length {} is not a multiple of 3",
            data.len()
        )));
    }
    Ok(ColorHistogram::from_rgb(data)
        .top(top)
        .into_iter()
        .map(|c| (c.hex(), c.count))
        .collect())
}

/// FFT Gaussian blur and simple colour filters (Rust-powered).
#[pymodule]
fn spectral_blur(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(blur, m)?)?;
    m.add_function(wrap_pyfunction!(grayscale, m)?)?;
    m.add_function(wrap_pyfunction!(invert, m)?)?;
    m.add_function(wrap_pyfunction!(top_colors, m)?)?;
    m.add("DEFAULT_RADIUS", DEFAULT_RADIUS)?;
    Ok(())
}
