//! Solution output and run summaries.

use crate::model::Solution;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

/// Writes one line per item, sorted by ID, then a summary line.
///
/// Item lines are `ID container x y rotation` with `container = -1` and
/// zero coordinates for unplaced items. The summary line is
/// `N K total_cost elapsed_seconds`.
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use u_binpack::greedy::construct;
/// use u_binpack::model::Instance;
/// use u_binpack::report::write_solution;
///
/// let instance = Instance::parse("1 1 4 1 2 5 7").unwrap();
/// let solution = construct(Arc::new(instance)).unwrap();
///
/// let mut out = Vec::new();
/// write_solution(&mut out, &solution, Duration::from_millis(1500)).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "1 1 0 0 1\n1 1 7 1.500000\n");
/// ```
pub fn write_solution<W: Write>(out: &mut W, solution: &Solution, elapsed: Duration) -> io::Result<()> {
    let instance = solution.instance();
    for item in instance.items() {
        match solution.placement(item.id) {
            Some(p) => writeln!(
                out,
                "{} {} {} {} {}",
                item.id,
                p.container,
                p.x,
                p.y,
                u8::from(p.rotated)
            )?,
            None => writeln!(out, "{} -1 0 0 0", item.id)?,
        }
    }
    writeln!(
        out,
        "{} {} {} {:.6}",
        instance.item_count(),
        instance.container_count(),
        solution.total_cost(),
        elapsed.as_secs_f64()
    )
}

/// Writes a solution file.
pub fn save_solution(
    path: impl AsRef<Path>,
    solution: &Solution,
    elapsed: Duration,
) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_solution(&mut out, solution, elapsed)?;
    out.flush()
}

/// Outcome of solving one instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunRecord {
    /// Instance name (usually the file name).
    pub instance: String,
    /// Solved figures, `None` when the run failed.
    pub outcome: Option<RunOutcome>,
}

/// Figures of a successful run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunOutcome {
    pub items: usize,
    pub containers: usize,
    pub containers_used: usize,
    pub cost: u64,
    pub seconds: f64,
}

impl RunRecord {
    /// Record of a successful run.
    pub fn solved(instance: impl Into<String>, solution: &Solution, elapsed: Duration) -> Self {
        Self {
            instance: instance.into(),
            outcome: Some(RunOutcome {
                items: solution.instance().item_count(),
                containers: solution.instance().container_count(),
                containers_used: solution.used_count(),
                cost: solution.total_cost(),
                seconds: elapsed.as_secs_f64(),
            }),
        }
    }

    /// Record of a run that produced no solution.
    pub fn failed(instance: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
            outcome: None,
        }
    }
}

/// Collection of run records for a batch.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub records: Vec<RunRecord>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: RunRecord) {
        self.records.push(record);
    }

    /// Writes the report as CSV; failed runs show `N/A` in every figure.
    pub fn write_csv<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "instance,n_items,n_containers,n_containers_used,cost,running_time"
        )?;
        for record in &self.records {
            match &record.outcome {
                Some(o) => writeln!(
                    out,
                    "{},{},{},{},{},{:.6}",
                    csv_field(&record.instance),
                    o.items,
                    o.containers,
                    o.containers_used,
                    o.cost,
                    o.seconds
                )?,
                None => writeln!(out, "{},N/A,N/A,N/A,N/A,N/A", csv_field(&record.instance))?,
            }
        }
        Ok(())
    }

    /// Saves the report to a CSV file.
    pub fn save_csv(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_csv(&mut out)?;
        out.flush()
    }

    /// Number of runs that produced a solution.
    pub fn solved_count(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_some()).count()
    }

    /// Sum of costs over solved runs.
    pub fn total_cost(&self) -> u64 {
        self.records
            .iter()
            .filter_map(|r| r.outcome.as_ref())
            .map(|o| o.cost)
            .sum()
    }

    /// Prints a summary table to stdout.
    pub fn print_summary(&self) {
        println!("\n{:=<80}", "");
        println!(
            "{:<30} {:>8} {:>8} {:>8} {:>10} {:>12}",
            "Instance", "Items", "Bins", "Used", "Cost", "Time(s)"
        );
        println!("{:-<80}", "");
        for record in &self.records {
            match &record.outcome {
                Some(o) => println!(
                    "{:<30} {:>8} {:>8} {:>8} {:>10} {:>12.3}",
                    record.instance, o.items, o.containers, o.containers_used, o.cost, o.seconds
                ),
                None => println!("{:<30} {:>8}", record.instance, "failed"),
            }
        }
        println!("{:-<80}", "");
        println!(
            "{} of {} solved, total cost {}",
            self.solved_count(),
            self.records.len(),
            self.total_cost()
        );
        println!("{:=<80}\n", "");
    }
}

/// Quotes a CSV field when it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::greedy::construct;
    use crate::model::Instance;
    use std::sync::Arc;

    fn solved() -> Solution {
        let instance = Instance::new(&[(2, 2), (4, 1)], &[(5, 5, 10), (2, 5, 7)]).unwrap();
        construct(Arc::new(instance)).unwrap()
    }

    #[test]
    fn test_write_solution_lines() {
        let mut out = Vec::new();
        write_solution(&mut out, &solved(), Duration::from_micros(250)).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["1 2 0 0 0", "2 1 0 0 0", "2 2 17 0.000250"]);
    }

    #[test]
    fn test_unplaced_item_line() {
        let instance = Arc::new(Instance::new(&[(1, 1)], &[(1, 1, 1)]).unwrap());
        let mut out = Vec::new();
        write_solution(&mut out, &Solution::new(instance), Duration::ZERO).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1 -1 0 0 0\n1 1 0 0.000000\n");
    }

    #[test]
    fn test_csv_report() {
        let mut report = RunReport::new();
        report.add(RunRecord::solved("a.txt", &solved(), Duration::from_secs(2)));
        report.add(RunRecord::failed("b.txt"));

        let mut out = Vec::new();
        report.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "a.txt,2,2,2,17,2.000000");
        assert_eq!(lines[2], "b.txt,N/A,N/A,N/A,N/A,N/A");
        assert_eq!(report.solved_count(), 1);
        assert_eq!(report.total_cost(), 17);
    }

    #[test]
    fn test_csv_quotes_awkward_names() {
        let mut report = RunReport::new();
        report.add(RunRecord::failed("a,b.txt"));
        report.add(RunRecord::failed("say \"hi\".txt"));

        let mut out = Vec::new();
        report.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "\"a,b.txt\",N/A,N/A,N/A,N/A,N/A");
        assert_eq!(lines[2], "\"say \"\"hi\"\".txt\",N/A,N/A,N/A,N/A,N/A");
    }
}
