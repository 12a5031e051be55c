//! String edit distance: Levenshtein and optimal-string-alignment
//! Damerau-Levenshtein over rolling rows.
//!
//! Inputs are transliterated to ASCII and case-folded by default, so
//! `"slava"` and `"слава"` are identical and `"pÓPé"` equals `"PópÉ"`.
//! Lengths and positions are counted in `char`s, not bytes.

use deunicode::deunicode;

/// Knobs for [`distance_with`].
///
/// `case` keeps the historical naming: `true` means the comparison is
/// case-SENSITIVE, `false` (the default) folds both sides first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceOptions {
    /// Allow adjacent transpositions at unit cost (Damerau-Levenshtein).
    pub damerau: bool,
    /// Transliterate both strings to ASCII before comparing.
    pub ascii_fold: bool,
    /// Compare case-sensitively.
    pub case: bool,
}

impl Default for DistanceOptions {
    fn default() -> Self {
        Self {
            damerau: false,
            ascii_fold: true,
            case: false,
        }
    }
}

impl DistanceOptions {
    /// Default options with transpositions enabled.
    pub fn damerau() -> Self {
        Self {
            damerau: true,
            ..Self::default()
        }
    }
}

/// Levenshtein distance with default options.
pub fn distance(source: &str, target: &str) -> usize {
    distance_with(source, target, DistanceOptions::default())
}

/// Damerau-Levenshtein distance with default folding.
pub fn damerau(source: &str, target: &str) -> usize {
    distance_with(source, target, DistanceOptions::damerau())
}

/// Strip the longest common prefix of two strings.
///
/// Identical strings yield two empty slices. Only the prefix is removed; a
/// common suffix is left in place.
pub fn exclusion<'a, 'b>(a: &'a str, b: &'b str) -> (&'a str, &'b str) {
    if a == b {
        return ("", "");
    }
    let mut a_cut = a.len();
    let mut b_cut = b.len();
    let mut a_chars = a.char_indices();
    let mut b_chars = b.char_indices();
    loop {
        match (a_chars.next(), b_chars.next()) {
            (Some((ai, ac)), Some((bi, bc))) => {
                if ac != bc {
                    a_cut = ai;
                    b_cut = bi;
                    break;
                }
            }
            (Some((ai, _)), None) => {
                a_cut = ai;
                break;
            }
            (None, Some((bi, _))) => {
                b_cut = bi;
                break;
            }
            (None, None) => break,
        }
    }
    (&a[a_cut..], &b[b_cut..])
}

/// Edit distance between `source` and `target` under `opts`.
pub fn distance_with(source: &str, target: &str, opts: DistanceOptions) -> usize {
    let (mut source, mut target) = if opts.ascii_fold {
        (deunicode(source), deunicode(target))
    } else {
        (source.to_string(), target.to_string())
    };
    if !opts.case {
        source = source.to_lowercase();
        target = target.to_lowercase();
    }

    let (source, target) = exclusion(&source, &target);
    let source: Vec<char> = source.chars().collect();
    let target: Vec<char> = target.chars().collect();

    if source.is_empty() {
        return target.len();
    }
    if target.is_empty() {
        return source.len();
    }

    // The longer string drives the outer loop; rows are sized by the shorter.
    let (long, short) = if source.len() < target.len() {
        (&target, &source)
    } else {
        (&source, &target)
    };
    rolling_rows(long, short, opts.damerau)
}

fn rolling_rows(long: &[char], short: &[char], damerau: bool) -> usize {
    let m = short.len();
    let mut one_ago: Vec<usize> = (0..=m).collect();
    let mut two_ago: Vec<usize> = vec![0; m + 1];
    let mut current: Vec<usize> = Vec::with_capacity(m + 1);

    for i in 0..long.len() {
        current.clear();
        current.push(i + 1);
        for j in 0..m {
            let transposed =
                damerau && i > 0 && j > 0 && long[i] == short[j - 1] && long[i - 1] == short[j];
            let left = current[j];
            let cell = if long[i] == short[j] {
                if transposed {
                    one_ago[j].min(two_ago[j - 1])
                } else {
                    one_ago[j]
                }
            } else {
                let best = one_ago[j].min(one_ago[j + 1]).min(left);
                if transposed {
                    1 + best.min(two_ago[j - 1])
                } else {
                    1 + best
                }
            };
            current.push(cell);
        }
        if damerau {
            std::mem::swap(&mut two_ago, &mut one_ago);
        }
        std::mem::swap(&mut one_ago, &mut current);
    }

    one_ago[m]
}
