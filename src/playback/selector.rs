//! Random track sampling.

use rand::Rng;

use crate::library::File;

/// Draw `min(count, files.len())` files uniformly, with replacement.
///
/// The same file can be drawn more than once. An empty candidate list
/// always yields an empty selection.
///
/// # Example
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use rompr_remote::library::File;
/// use rompr_remote::playback::select;
///
/// let files = vec![File::new("a.mp3", "A", "1:00"), File::new("b.mp3", "B", "2:00")];
/// let mut rng = StdRng::seed_from_u64(7);
///
/// assert_eq!(select(&files, 10, &mut rng).len(), 2);
/// assert!(select(&[], 10, &mut rng).is_empty());
/// ```
pub fn select<R: Rng + ?Sized>(files: &[File], count: usize, rng: &mut R) -> Vec<File> {
    let draws = count.min(files.len());
    (0..draws)
        .map(|_| files[rng.gen_range(0..files.len())].clone())
        .collect()
}
