//! Affine-gap local alignment that reports every co-optimal alignment.
//!
//! The subject is laid along the rows of the DP matrix and the query along the
//! columns. Three matrices are kept (Gotoh):
//!
//! - `M`: the cell ends in an aligned pair
//! - `X`: the cell ends in a subject residue opposite a query gap
//! - `Y`: the cell ends in a query residue opposite a subject gap
//!
//! `H = max(0, M, X, Y)` is derived on the fly. Gap penalties are asymmetric so
//! that long runs of skipped subject (introns) can be made cheap while query
//! insertions stay prohibitively expensive.
//!
//! Time and memory are both `O(|subject| * |query|)`.

use serde::{Deserialize, Serialize};

use crate::core::types::GAP;

/// Sentinel for unreachable cells; far enough from `i32::MIN` that adding
/// penalties cannot wrap.
const NEG_INF: i32 = i32::MIN / 4;

/// Scores for the local alignment. A gap of length `k` costs
/// `open + (k - 1) * extend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringScheme {
    pub match_score: i32,
    pub mismatch_score: i32,
    /// Opening a gap in the subject row (query insertion)
    pub subject_gap_open: i32,
    pub subject_gap_extend: i32,
    /// Opening a gap in the query row (skipped subject, e.g. an intron)
    pub query_gap_open: i32,
    pub query_gap_extend: i32,
}

impl Default for ScoringScheme {
    fn default() -> Self {
        Self {
            match_score: 3,
            mismatch_score: -3,
            subject_gap_open: -100,
            subject_gap_extend: -100,
            query_gap_open: -5,
            query_gap_extend: 0,
        }
    }
}

impl ScoringScheme {
    #[inline]
    fn substitution(&self, a: u8, b: u8) -> i32 {
        if a == b {
            self.match_score
        } else {
            self.mismatch_score
        }
    }
}

/// A single alignment column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignOp {
    Match,
    Mismatch,
    /// Subject residue opposite a query gap
    Deletion,
    /// Query residue opposite a subject gap
    Insertion,
}

/// One optimal local alignment. Coordinates are 0-based, ends exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalAlignment {
    pub score: i32,
    pub subject_start: usize,
    pub subject_end: usize,
    pub query_start: usize,
    pub query_end: usize,
    pub ops: Vec<AlignOp>,
}

/// Both rows of a rendered alignment, equal length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairwiseRows {
    pub subject: Vec<u8>,
    pub query: Vec<u8>,
}

impl LocalAlignment {
    /// Render the alignment over the full length of both sequences.
    ///
    /// Unaligned leading residues are right-aligned against each other before
    /// the aligned core and unaligned trailing residues are left-aligned after
    /// it; the shorter side is padded with gaps.
    #[must_use]
    pub fn render(&self, subject: &[u8], query: &[u8]) -> PairwiseRows {
        let lead = self.subject_start.max(self.query_start);
        let trail = (subject.len() - self.subject_end).max(query.len() - self.query_end);
        let width = lead + self.ops.len() + trail;

        let mut subject_row = Vec::with_capacity(width);
        let mut query_row = Vec::with_capacity(width);

        subject_row.resize(lead - self.subject_start, GAP);
        subject_row.extend_from_slice(&subject[..self.subject_start]);
        query_row.resize(lead - self.query_start, GAP);
        query_row.extend_from_slice(&query[..self.query_start]);

        let (mut i, mut j) = (self.subject_start, self.query_start);
        for op in &self.ops {
            match op {
                AlignOp::Match | AlignOp::Mismatch => {
                    subject_row.push(subject[i]);
                    query_row.push(query[j]);
                    i += 1;
                    j += 1;
                }
                AlignOp::Deletion => {
                    subject_row.push(subject[i]);
                    query_row.push(GAP);
                    i += 1;
                }
                AlignOp::Insertion => {
                    subject_row.push(GAP);
                    query_row.push(query[j]);
                    j += 1;
                }
            }
        }

        subject_row.extend_from_slice(&subject[self.subject_end..]);
        subject_row.resize(width, GAP);
        query_row.extend_from_slice(&query[self.query_end..]);
        query_row.resize(width, GAP);

        PairwiseRows {
            subject: subject_row,
            query: query_row,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    H,
    M,
    X,
    Y,
}

/// Pending traceback branch
struct Branch {
    i: usize,
    j: usize,
    state: State,
    /// Gap state that may not be re-entered from `H` (its re-entry would
    /// duplicate an extension path already being followed)
    forbid: Option<State>,
    ops: Vec<AlignOp>,
}

/// Filled DP matrices for one subject/query pair
struct Matrices<'a> {
    subject: &'a [u8],
    query: &'a [u8],
    cols: usize,
    m: Vec<i32>,
    x: Vec<i32>,
    y: Vec<i32>,
}

impl<'a> Matrices<'a> {
    fn fill(subject: &'a [u8], query: &'a [u8], scheme: &ScoringScheme) -> Self {
        let rows = subject.len() + 1;
        let cols = query.len() + 1;
        let mut mat = Self {
            subject,
            query,
            cols,
            m: vec![NEG_INF; rows * cols],
            x: vec![NEG_INF; rows * cols],
            y: vec![NEG_INF; rows * cols],
        };

        for i in 1..rows {
            for j in 1..cols {
                let idx = i * cols + j;
                let diag = mat
                    .h(i - 1, j - 1)
                    .saturating_add(scheme.substitution(subject[i - 1], query[j - 1]));
                let up = mat
                    .h(i - 1, j)
                    .saturating_add(scheme.query_gap_open)
                    .max(mat.x[idx - cols].saturating_add(scheme.query_gap_extend));
                let left = mat
                    .h(i, j - 1)
                    .saturating_add(scheme.subject_gap_open)
                    .max(mat.y[idx - 1].saturating_add(scheme.subject_gap_extend));
                mat.m[idx] = diag;
                mat.x[idx] = up.max(NEG_INF);
                mat.y[idx] = left.max(NEG_INF);
            }
        }

        mat
    }

    #[inline]
    fn h(&self, i: usize, j: usize) -> i32 {
        let idx = i * self.cols + j;
        0.max(self.m[idx]).max(self.x[idx]).max(self.y[idx])
    }

    #[inline]
    fn get(&self, state: State, i: usize, j: usize) -> i32 {
        let idx = i * self.cols + j;
        match state {
            State::H => self.h(i, j),
            State::M => self.m[idx],
            State::X => self.x[idx],
            State::Y => self.y[idx],
        }
    }

    /// Best score and every cell reaching it, in row-major order
    fn best_cells(&self) -> (i32, Vec<(usize, usize)>) {
        let mut best = 0;
        let mut cells = Vec::new();
        for i in 1..=self.subject.len() {
            for j in 1..=self.query.len() {
                let h = self.h(i, j);
                if h > best {
                    best = h;
                    cells.clear();
                    cells.push((i, j));
                } else if h == best && best > 0 {
                    cells.push((i, j));
                }
            }
        }
        (best, cells)
    }

    /// Whether `H(i, j)` can be derived without re-entering `gap`
    fn has_exit_besides(&self, i: usize, j: usize, gap: State) -> bool {
        let h = self.h(i, j);
        h == 0
            || self.m[i * self.cols + j] == h
            || (gap != State::X && self.x[i * self.cols + j] == h)
            || (gap != State::Y && self.y[i * self.cols + j] == h)
    }
}

/// Local aligner returning up to `max_alignments` co-optimal alignments
#[derive(Debug, Clone)]
pub struct LocalAligner {
    scheme: ScoringScheme,
    max_alignments: usize,
}

impl LocalAligner {
    #[must_use]
    pub fn new(scheme: ScoringScheme) -> Self {
        Self {
            scheme,
            max_alignments: 2,
        }
    }

    #[must_use]
    pub fn with_max_alignments(mut self, max_alignments: usize) -> Self {
        self.max_alignments = max_alignments.max(1);
        self
    }

    /// Align `query` locally against `subject`.
    ///
    /// Returns every distinct optimal alignment, capped at `max_alignments`.
    /// An empty result means nothing scores above zero.
    #[must_use]
    pub fn align(&self, subject: &[u8], query: &[u8]) -> Vec<LocalAlignment> {
        if subject.is_empty() || query.is_empty() {
            return Vec::new();
        }

        let mat = Matrices::fill(subject, query, &self.scheme);
        let (best, ends) = mat.best_cells();
        if best <= 0 {
            return Vec::new();
        }

        let mut found = Vec::new();
        for (end_i, end_j) in ends {
            if found.len() >= self.max_alignments {
                break;
            }
            self.trace_from(&mat, best, end_i, end_j, &mut found);
        }
        found
    }

    fn trace_from(
        &self,
        mat: &Matrices<'_>,
        best: i32,
        end_i: usize,
        end_j: usize,
        found: &mut Vec<LocalAlignment>,
    ) {
        let mut stack = vec![Branch {
            i: end_i,
            j: end_j,
            state: State::H,
            forbid: None,
            ops: Vec::new(),
        }];

        while let Some(mut branch) = stack.pop() {
            loop {
                // Each pending branch yields at least one alignment, so more
                // are only worth recording while under the cap.
                let may_branch = found.len() + stack.len() + 1 < self.max_alignments;
                let Branch { i, j, state, forbid, .. } = branch;
                let value = mat.get(state, i, j);

                let mut options: Vec<(usize, usize, State, Option<State>, Option<AlignOp>)> =
                    Vec::with_capacity(3);

                match state {
                    State::H => {
                        if value == 0 {
                            branch.ops.reverse();
                            found.push(LocalAlignment {
                                score: best,
                                subject_start: i,
                                subject_end: end_i,
                                query_start: j,
                                query_end: end_j,
                                ops: branch.ops,
                            });
                            break;
                        }
                        for next in [State::M, State::X, State::Y] {
                            if forbid != Some(next) && mat.get(next, i, j) == value {
                                options.push((i, j, next, None, None));
                            }
                        }
                    }
                    State::M => {
                        let op = if mat.subject[i - 1] == mat.query[j - 1] {
                            AlignOp::Match
                        } else {
                            AlignOp::Mismatch
                        };
                        options.push((i - 1, j - 1, State::H, None, Some(op)));
                    }
                    State::X => {
                        let open =
                            mat.h(i - 1, j).saturating_add(self.scheme.query_gap_open) == value;
                        let extend =
                            mat.x[(i - 1) * mat.cols + j].saturating_add(self.scheme.query_gap_extend)
                                == value
                                && i > 1;
                        if extend {
                            options.push((i - 1, j, State::X, None, Some(AlignOp::Deletion)));
                        }
                        if open && (!extend || mat.has_exit_besides(i - 1, j, State::X)) {
                            let forbid = extend.then_some(State::X);
                            options.push((i - 1, j, State::H, forbid, Some(AlignOp::Deletion)));
                        }
                    }
                    State::Y => {
                        let open =
                            mat.h(i, j - 1).saturating_add(self.scheme.subject_gap_open) == value;
                        let extend = mat.y[i * mat.cols + j - 1]
                            .saturating_add(self.scheme.subject_gap_extend)
                            == value
                            && j > 1;
                        if extend {
                            options.push((i, j - 1, State::Y, None, Some(AlignOp::Insertion)));
                        }
                        if open && (!extend || mat.has_exit_besides(i, j - 1, State::Y)) {
                            let forbid = extend.then_some(State::Y);
                            options.push((i, j - 1, State::H, forbid, Some(AlignOp::Insertion)));
                        }
                    }
                }

                let mut options = options.into_iter();
                let Some((ni, nj, nstate, nforbid, op)) = options.next() else {
                    // Inconsistent cell; nothing to follow
                    break;
                };

                if may_branch {
                    for (bi, bj, bstate, bforbid, bop) in options {
                        let mut ops = branch.ops.clone();
                        ops.extend(bop);
                        stack.push(Branch {
                            i: bi,
                            j: bj,
                            state: bstate,
                            forbid: bforbid,
                            ops,
                        });
                        if found.len() + stack.len() + 1 >= self.max_alignments {
                            break;
                        }
                    }
                }

                branch.ops.extend(op);
                branch.i = ni;
                branch.j = nj;
                branch.state = nstate;
                branch.forbid = nforbid;
            }

            if found.len() >= self.max_alignments {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aligner() -> LocalAligner {
        LocalAligner::new(ScoringScheme::default())
    }

    #[test]
    fn test_exact_local_hit() {
        let alns = aligner().align(b"TTTTACGTACGGACTTTT", b"ACGTACGGAC");
        assert_eq!(alns.len(), 1);
        let aln = &alns[0];
        assert_eq!(aln.score, 30);
        assert_eq!((aln.subject_start, aln.subject_end), (4, 14));
        assert_eq!((aln.query_start, aln.query_end), (0, 10));
        assert!(aln.ops.iter().all(|op| *op == AlignOp::Match));
    }

    #[test]
    fn test_intron_is_a_single_cheap_gap() {
        let alns = aligner().align(b"AAAAAGGGGGAAAAA", b"AAAAAAAAAA");
        assert_eq!(alns.len(), 1);
        let aln = &alns[0];
        // 10 matches, one 5-long gap in the query row
        assert_eq!(aln.score, 30 - 5);
        assert_eq!(
            aln.ops.iter().filter(|op| **op == AlignOp::Deletion).count(),
            5
        );
        assert_eq!((aln.subject_start, aln.subject_end), (0, 15));
    }

    #[test]
    fn test_render_pads_unaligned_ends() {
        let subject = b"GGGGACGTACGGACCC";
        let query = b"ACGTACGGAC";
        let alns = aligner().align(subject, query);
        let rows = alns[0].render(subject, query);
        assert_eq!(rows.subject, subject.to_vec());
        assert_eq!(rows.query, b"----ACGTACGGAC--".to_vec());
    }

    #[test]
    fn test_render_overlaps_leading_residues() {
        let aln = LocalAlignment {
            score: 9,
            subject_start: 3,
            subject_end: 6,
            query_start: 1,
            query_end: 4,
            ops: vec![AlignOp::Match; 3],
        };
        let rows = aln.render(b"CCCAAAG", b"TAAATT");
        assert_eq!(rows.subject, b"CCCAAAG-".to_vec());
        assert_eq!(rows.query, b"--TAAATT".to_vec());
    }

    #[test]
    fn test_repeated_hit_reports_both_optima() {
        let copy = b"ACGGTCAGGATCCAT";
        let mut subject = copy.to_vec();
        subject.extend_from_slice(b"TTTTTTTTTTTTTTTTTTTT");
        subject.extend_from_slice(copy);

        let alns = aligner().align(&subject, copy);
        assert_eq!(alns.len(), 2);
        assert_eq!(alns[0].subject_start, 0);
        assert_eq!(alns[1].subject_start, 35);
    }

    #[test]
    fn test_cap_limits_reported_optima() {
        let copy = b"ACGGTCAGGATCCAT";
        let mut subject = Vec::new();
        for _ in 0..4 {
            subject.extend_from_slice(copy);
            subject.extend_from_slice(b"TTTTTTTTTTTTTTTTTTTT");
        }

        assert_eq!(aligner().align(&subject, copy).len(), 2);
        assert_eq!(
            aligner()
                .with_max_alignments(10)
                .align(&subject, copy)
                .len(),
            4
        );
    }

    #[test]
    fn test_no_positive_score() {
        assert!(aligner().align(b"AAAAAAAA", b"CCCC").is_empty());
        assert!(aligner().align(b"", b"ACGT").is_empty());
    }

    #[test]
    fn test_alignment_is_deterministic() {
        let subject = b"ATGGCAGGAAGAAGCGGAGATTTTTTTTTTCAGCGACGAAGACCTCCTCA";
        let query = b"ATGGCAGGAAGAAGCGGAGACAGCGACGAAGACCTCCTCA";
        let first = aligner().align(subject, query);
        let second = aligner().align(subject, query);
        assert_eq!(first, second);
    }
}
