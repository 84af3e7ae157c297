//! Chunking of row specs for bulk statement generation.

use crate::types::RowSpec;

/// Partition `rows` into order-preserving chunks of at most `size` rows.
///
/// Produces `ceil(rows.len() / size)` chunks covering every row exactly
/// once; trailing rows that do not fill a whole chunk form a final short
/// chunk. A `size` of zero yields a single chunk holding everything.
#[must_use]
pub fn slice_batches(rows: Vec<RowSpec>, size: usize) -> Vec<Vec<RowSpec>> {
    if size == 0 || rows.len() <= size {
        return vec![rows];
    }
    let mut chunks = Vec::with_capacity(rows.len().div_ceil(size));
    let mut rows = rows.into_iter();
    loop {
        let chunk: Vec<RowSpec> = rows.by_ref().take(size).collect();
        if chunk.is_empty() {
            break;
        }
        chunks.push(chunk);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    fn rows(n: usize) -> Vec<RowSpec> {
        (0..n)
            .map(|i| RowSpec::Values(vec![Value::Int(i as i64)]))
            .collect()
    }

    #[test]
    fn fewer_rows_than_size_is_one_chunk() {
        let chunks = slice_batches(rows(3), 10);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 3);
    }

    #[test]
    fn trailing_remainder_gets_its_own_chunk() {
        let chunks = slice_batches(rows(25), 10);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 10);
        assert_eq!(chunks[1].len(), 10);
        assert_eq!(chunks[2].len(), 5);
    }

    #[test]
    fn every_row_covered_exactly_once_in_order() {
        let chunks = slice_batches(rows(25), 7);
        let flattened: Vec<RowSpec> = chunks.into_iter().flatten().collect();
        assert_eq!(flattened, rows(25));
    }

    #[test]
    fn zero_size_never_divides() {
        let chunks = slice_batches(rows(4), 0);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 4);
    }

    #[test]
    fn empty_input_is_one_empty_chunk() {
        let chunks = slice_batches(Vec::new(), 10);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].is_empty());
    }
}
