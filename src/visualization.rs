use crate::clustering::{ClusterSet, ExecutionMode};
use crate::core::{KMeansError, KMeansFloat, Result};
use crate::distances::{DistanceMetric, EuclideanDistance};
use crate::harness::TimingTable;
use colored::Colorize;
use ndarray::ArrayView2;
use rayon::prelude::*;
use std::fmt;
use std::fmt::Write;

pub fn print_cluster_analysis<F: KMeansFloat>(
    clusters: &ClusterSet<F>,
    data: &ArrayView2<F>,
    labels: &[usize],
) -> Result<()> {
    println!("\n{}", "=== Cluster Analysis ===".bold());

    let stats = calculate_cluster_stats(clusters, data, labels)?;
    print_summary_statistics(&stats);
    print_detailed_cluster_info(&stats);
    Ok(())
}

/// Per-cluster size and distance-to-centroid statistics for labelled points.
/// `labels[i]` is the cluster of row `i` of `data`.
pub fn calculate_cluster_stats<F: KMeansFloat>(
    clusters: &ClusterSet<F>,
    data: &ArrayView2<F>,
    labels: &[usize],
) -> Result<Vec<ClusterStats>> {
    let distances = labels
        .par_iter()
        .enumerate()
        .map(|(idx, &label)| {
            if idx >= data.nrows() {
                return Err(KMeansError::PointOutOfRange {
                    index: idx,
                    len: data.nrows(),
                });
            }
            let cluster = clusters.get(label).ok_or(KMeansError::LabelOutOfRange {
                label,
                k: clusters.len(),
            })?;
            EuclideanDistance
                .compute(&data.row(idx), &cluster.centroid().view())
                .map(|d| (label, d.to_f64().unwrap_or(f64::NAN)))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut stats: Vec<ClusterStats> = clusters
        .clusters()
        .iter()
        .enumerate()
        .map(|(idx, cluster)| ClusterStats {
            cluster_id: idx,
            size: 0,
            avg_distance_to_centroid: 0.0,
            sum_distance_to_centroid: 0.0,
            stale: cluster.is_stale(),
        })
        .collect();

    for (label, distance) in distances {
        stats[label].size += 1;
        stats[label].sum_distance_to_centroid += distance;
    }
    for stat in stats.iter_mut().filter(|s| s.size > 0) {
        stat.avg_distance_to_centroid = stat.sum_distance_to_centroid / stat.size as f64;
    }
    Ok(stats)
}

#[derive(Debug)]
pub struct ClusterStats {
    pub cluster_id: usize,
    pub size: usize,
    pub avg_distance_to_centroid: f64,
    pub sum_distance_to_centroid: f64,
    pub stale: bool,
}

impl fmt::Display for ClusterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cluster {}: {} points, Avg Distance: {:.4}, Sum Distance: {:.4}",
            self.cluster_id, self.size, self.avg_distance_to_centroid, self.sum_distance_to_centroid
        )?;
        if self.stale {
            write!(f, " (stale centroid)")?;
        }
        Ok(())
    }
}

fn print_summary_statistics(stats: &[ClusterStats]) {
    println!("\n{}", "Summary Statistics:".bold());
    println!("Total Clusters: {}", stats.len());

    let total_points: usize = stats.iter().map(|s| s.size).sum();
    let total_sum_distance: f64 = stats.iter().map(|s| s.sum_distance_to_centroid).sum();
    let stale = stats.iter().filter(|s| s.stale).count();

    println!("Total Points: {}", total_points);
    if !stats.is_empty() {
        println!("Average Cluster Size: {:.2}", total_points as f64 / stats.len() as f64);
    }
    if total_points > 0 {
        println!("Overall Average Distance: {:.4}", total_sum_distance / total_points as f64);
    }
    println!("Stale Clusters: {}", stale);
}

fn print_detailed_cluster_info(stats: &[ClusterStats]) {
    println!("\n{}", "Detailed Cluster Information:".bold());
    for stat in stats {
        let info = format!("{}", stat);
        if stat.stale || stat.size == 0 {
            println!("{}", info.red());
        } else {
            println!("{}", info.green());
        }
    }
}

/// One mode's timings as a tab separated table, trials as rows and sizes as
/// columns, followed by the per-size mean.
pub fn format_timing_table(table: &TimingTable) -> String {
    let mut out = String::new();
    let _ = write!(out, "Trial");
    for n in &table.sizes {
        let _ = write!(out, "\t{:>8}", n);
    }
    let _ = writeln!(out);
    for (trial, row) in table.times.iter().enumerate() {
        let _ = write!(out, "{}", trial);
        for seconds in row {
            let _ = write!(out, "\t{:.7}", seconds);
        }
        let _ = writeln!(out);
    }
    let _ = write!(out, "Mean");
    for seconds in table.mean_times() {
        let _ = write!(out, "\t{:.7}", seconds);
    }
    let _ = writeln!(out);
    out
}

/// Sequential mean time divided by parallel mean time, per size, when both
/// modes were measured.
pub fn speedups(tables: &[TimingTable]) -> Option<Vec<(usize, f64)>> {
    let find = |mode: ExecutionMode| tables.iter().find(|t| t.mode == mode);
    let sequential = find(ExecutionMode::Sequential)?;
    let parallel = find(ExecutionMode::Parallel)?;

    Some(
        sequential
            .sizes
            .iter()
            .zip(sequential.mean_times().into_iter().zip(parallel.mean_times()))
            .map(|(&n, (seq, par))| (n, if par > 0.0 { seq / par } else { f64::INFINITY }))
            .collect(),
    )
}

pub fn print_timing_report(tables: &[TimingTable]) {
    for table in tables {
        let heading = format!("Values of Ns and times T(N), {} mode:", table.mode);
        println!("\n{}", heading.bold());
        print!("{}", format_timing_table(table));
    }

    if let Some(speedups) = speedups(tables) {
        println!("\n{}", "Speedup (sequential / parallel):".bold());
        for (n, speedup) in speedups {
            let line = format!("N = {:>8}: {:.2}x", n, speedup);
            if speedup >= 1.0 {
                println!("{}", line.green());
            } else {
                println!("{}", line.yellow());
            }
        }
    }
}
