//! Proptest generators for property-based testing.

use proptest::prelude::*;

use chronos_kernel_core::SimulationKind;

/// Largest side length the matrix strategies produce.
pub const MAX_DIM: usize = 8;

/// A finite matrix entry of moderate magnitude.
pub fn entry() -> impl Strategy<Value = f64> {
    -1_000.0f64..1_000.0
}

/// Non-empty rectangular rows of the given shape.
pub fn rows_of(rows: usize, cols: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(prop::collection::vec(entry(), cols), rows)
}

/// Rows with at least one row of a different length.
pub fn ragged_rows() -> impl Strategy<Value = Vec<Vec<f64>>> {
    (2..=MAX_DIM, 1..MAX_DIM, 1..MAX_DIM)
        .prop_filter("lengths must differ", |(_, a, b)| a != b)
        .prop_flat_map(|(r, a, b)| {
            (rows_of(r - 1, a), prop::collection::vec(entry(), b)).prop_map(|(mut rows, last)| {
                rows.push(last);
                rows
            })
        })
}

/// Two matrices with `cols(A) == rows(B)`.
#[derive(Debug, Clone)]
pub struct CompatiblePair {
    pub a: Vec<Vec<f64>>,
    pub b: Vec<Vec<f64>>,
}

impl Arbitrary for CompatiblePair {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (1..=MAX_DIM, 1..=MAX_DIM, 1..=MAX_DIM)
            .prop_flat_map(|(r, inner, c)| (rows_of(r, inner), rows_of(inner, c)))
            .prop_map(|(a, b)| CompatiblePair { a, b })
            .boxed()
    }
}

/// Two matrices with `cols(A) != rows(B)`.
pub fn incompatible_pair() -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<Vec<f64>>)> {
    (1..=MAX_DIM, 1..=MAX_DIM, 1..=MAX_DIM, 1..=MAX_DIM)
        .prop_filter("inner dimensions must differ", |(_, inner, rows_b, _)| inner != rows_b)
        .prop_flat_map(|(r, inner, rows_b, c)| (rows_of(r, inner), rows_of(rows_b, c)))
}

/// Any UTF-8 message, including the empty string.
pub fn message() -> impl Strategy<Value = String> {
    ".{0,256}"
}

/// A message and a one-character edit of it that differs.
pub fn message_and_edit() -> impl Strategy<Value = (String, String)> {
    ("[a-zA-Z0-9 ]{1,64}", any::<prop::sample::Index>(), any::<char>()).prop_filter_map(
        "edit must change the message",
        |(m, at, c)| {
            let mut chars: Vec<char> = m.chars().collect();
            let i = at.index(chars.len());
            if chars[i] == c {
                return None;
            }
            chars[i] = c;
            Some((m, chars.into_iter().collect()))
        },
    )
}

/// Dice counts inside the accepted range.
pub fn dice_count() -> impl Strategy<Value = i64> {
    1i64..=10
}

/// Dice counts outside the accepted range.
pub fn bad_dice_count() -> impl Strategy<Value = i64> {
    prop_oneof![i64::MIN..=0, 11i64..=i64::MAX]
}

pub fn simulation_kind() -> impl Strategy<Value = SimulationKind> {
    prop_oneof![
        Just(SimulationKind::Pi),
        Just(SimulationKind::Integral),
        Just(SimulationKind::Dice),
        Just(SimulationKind::RandomWalk),
    ]
}

/// Arbitrary bytes.
pub fn bytes(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}
