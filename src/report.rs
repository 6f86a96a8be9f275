use super::*;
use std::io;

/// Mean (and, if requested, population standard deviation) of a series
/// of run times.
pub fn stat(run_times: &[f64]) -> (f64, f64) {
    let n = run_times.len() as f64;
    let mean = run_times.iter().sum::<f64>() / n;
    let variance = run_times.iter().map(|t| (t - mean) * (t - mean)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Checks that two solves of the same instance agree on the objective
/// value within `obj_esp`, and that every `x_i` stays within its
/// original box bounds. Ported from `solValid`.
pub fn sol_valid(input: &InputData, reference: &OutputData, candidate: &OutputData, obj_esp: Floating) -> bool {
    if (*reference.obj_val() - *candidate.obj_val()).abs() > obj_esp {
        return false;
    }
    for i in 0..*input.n() {
        if candidate.x()[i] < input.lb() || candidate.x()[i] > input.ub() {
            return false;
        }
    }
    true
}

/// One row of a benchmark report: a problem size paired with the
/// average (and standard deviation of) run time for each algorithm
/// under comparison.
#[derive(Debug, Clone)]
pub struct BenchRow {
    pub n: usize,
    pub alg_name: String,
    pub mean_ms: f64,
    pub std_ms: f64,
    pub obj_val: Floating,
}

/// Writes benchmark rows to a CSV file at `path`, one row per
/// `(problem size, algorithm)` pair.
pub fn write_report(path: &str, rows: &[BenchRow]) -> io::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["n", "algorithm", "mean_ms", "std_ms", "obj_val"])?;
    for row in rows {
        writer.write_record([
            row.n.to_string(),
            row.alg_name.clone(),
            row.mean_ms.to_string(),
            row.std_ms.to_string(),
            row.obj_val.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_computes_mean_and_stddev() {
        let (mean, std) = stat(&[1.0, 2.0, 3.0]);
        assert!((mean - 2.0).abs() < 1e-12);
        assert!((std - (2.0 / 3.0_f64).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn sol_valid_rejects_divergent_objective() {
        let input = InputData::builder(2, 2, 1)
            .c_dev(DVector::from_vec(vec![1.0, 1.0]))
            .a_dev(DVector::zeros(2))
            .c_sep(DVector::from_vec(vec![1.0]))
            .build()
            .unwrap();
        let mut reference = OutputData::new(&input);
        reference.set_obj_val(1.0);
        let mut candidate = OutputData::new(&input);
        candidate.set_obj_val(5.0);
        assert!(!sol_valid(&input, &reference, &candidate, 1e-6));
    }
}
