/*!
 * Round-robin assignment of sentences to rewriters.
 *
 * Assignment depends only on the sentence position and the size of the
 * rewriter set, never on provider health or latency.
 */

/// Index of the rewriter that handles sentence `index` out of `rewriter_count`
///
/// # Panics
/// Panics if `rewriter_count` is zero.
pub fn round_robin_index(index: usize, rewriter_count: usize) -> usize {
    assert!(rewriter_count > 0, "round-robin over an empty rewriter set");
    index % rewriter_count
}

/// Full assignment plan for `sentence_count` sentences
pub fn assignment_plan(sentence_count: usize, rewriter_count: usize) -> Vec<usize> {
    (0..sentence_count)
        .map(|i| round_robin_index(i, rewriter_count))
        .collect()
}
