use rayon::prelude::*;

/// Splits `items` into at most one contiguous chunk per rayon worker and
/// runs `work(start, chunk)` on each chunk concurrently, where `start` is
/// the index of the chunk's first element in `items`.
pub fn execute<T, F>(items: &mut [T], work: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync,
{
    if items.is_empty() {
        return;
    }
    let chunk_size = items.len().div_ceil(rayon::current_num_threads()).max(1);
    items
        .par_chunks_mut(chunk_size)
        .enumerate()
        .for_each(|(i, chunk)| work(i * chunk_size, chunk));
}
