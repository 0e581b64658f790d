//! Row accounting for regression-matrix assembly.
//!
//! ## Purpose
//!
//! Rows excluded during assembly are reported, never silently absorbed. This
//! module holds the per-reason counts.
//!
//! ## Key concepts
//!
//! * **Drop reason**: each excluded row is counted once, under the first
//!   failing check in this order: outside coverage, missing target, missing
//!   time, missing covariate or distance, missing weight.
//!
//! ## Invariants
//!
//! * `retained + dropped() == observations`.

use core::fmt;

/// Why an observation was excluded from the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Location not covered by a grid or by the distance layers.
    OutsideCoverage,
    /// Target value missing.
    MissingTarget,
    /// Time stamp missing while the matrix has a time column.
    MissingTime,
    /// A covariate or distance value is nodata.
    MissingCovariate,
    /// Weight missing or non-finite.
    MissingWeight,
}

/// Counts of retained and dropped observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssemblyReport {
    /// Observations offered to the assembler.
    pub observations: usize,
    /// Rows written to the matrix.
    pub retained: usize,
    /// Observations outside coverage.
    pub outside_coverage: usize,
    /// Observations with a missing target.
    pub missing_target: usize,
    /// Observations without a time stamp.
    pub missing_time: usize,
    /// Observations with a nodata covariate or distance.
    pub missing_covariate: usize,
    /// Observations with a missing weight.
    pub missing_weight: usize,
}

impl AssemblyReport {
    /// Count a retained row.
    pub fn retain(&mut self) {
        self.observations += 1;
        self.retained += 1;
    }

    /// Count a dropped row.
    pub fn drop_row(&mut self, reason: DropReason) {
        self.observations += 1;
        match reason {
            DropReason::OutsideCoverage => self.outside_coverage += 1,
            DropReason::MissingTarget => self.missing_target += 1,
            DropReason::MissingTime => self.missing_time += 1,
            DropReason::MissingCovariate => self.missing_covariate += 1,
            DropReason::MissingWeight => self.missing_weight += 1,
        }
    }

    /// Total dropped rows.
    pub fn dropped(&self) -> usize {
        self.outside_coverage
            + self.missing_target
            + self.missing_time
            + self.missing_covariate
            + self.missing_weight
    }

    /// Sum of two reports, used for stacked assembly.
    pub fn merge(&self, other: &AssemblyReport) -> AssemblyReport {
        AssemblyReport {
            observations: self.observations + other.observations,
            retained: self.retained + other.retained,
            outside_coverage: self.outside_coverage + other.outside_coverage,
            missing_target: self.missing_target + other.missing_target,
            missing_time: self.missing_time + other.missing_time,
            missing_covariate: self.missing_covariate + other.missing_covariate,
            missing_weight: self.missing_weight + other.missing_weight,
        }
    }
}

impl fmt::Display for AssemblyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Assembly report:")?;
        writeln!(f, "  Observations:      {}", self.observations)?;
        writeln!(f, "  Retained:          {}", self.retained)?;
        writeln!(f, "  Dropped:           {}", self.dropped())?;
        writeln!(f, "    Outside coverage:  {}", self.outside_coverage)?;
        writeln!(f, "    Missing target:    {}", self.missing_target)?;
        writeln!(f, "    Missing time:      {}", self.missing_time)?;
        writeln!(f, "    Missing covariate: {}", self.missing_covariate)?;
        write!(f, "    Missing weight:    {}", self.missing_weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_balance() {
        let mut report = AssemblyReport::default();
        report.retain();
        report.retain();
        report.drop_row(DropReason::OutsideCoverage);
        report.drop_row(DropReason::MissingTarget);
        assert_eq!(report.observations, 4);
        assert_eq!(report.retained + report.dropped(), report.observations);

        let merged = report.merge(&report);
        assert_eq!(merged.observations, 8);
        assert_eq!(merged.outside_coverage, 2);
    }
}
