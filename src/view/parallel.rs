//! Running work over split parts on the rayon pool.
//!
//! Pair these with `split`: a [`Shared`](super::Shared) or
//! [`Atomic`](super::Atomic) handle splits into windows that can each be
//! worked on from a different thread.

use crate::error::Result;
use crate::traits::{NavigableMap, NavigableSet, Table};
use rayon::prelude::*;

/// Run `f` on every part in parallel.
pub fn for_each_part<P, F>(parts: Vec<P>, f: F)
where
    P: Send,
    F: Fn(P) + Sync + Send,
{
    parts.into_par_iter().for_each(f);
}

/// Run `f` on every part in parallel and collect the results in part order.
pub fn map_parts<P, R, F>(parts: Vec<P>, f: F) -> Vec<R>
where
    P: Send,
    R: Send,
    F: Fn(P) -> R + Sync + Send,
{
    parts.into_par_iter().map(f).collect()
}

/// Split `table` into one window per rayon thread and run `f` on each.
///
/// The first error any part reports is returned.
pub fn for_each_table_part<T, C, F>(table: &C, f: F) -> Result<()>
where
    T: PartialEq,
    C: Table<T> + Clone + Send,
    F: Fn(super::SubTable<C>) -> Result<()> + Sync + Send,
{
    let parts = table.split(rayon::current_num_threads())?;
    log::debug!("running over {} table parts", parts.len());
    map_parts(parts, f).into_iter().collect()
}

/// Split `map` into one key range per rayon thread and run `f` on each.
///
/// The first error any part reports is returned.
pub fn for_each_map_part<K, V, M, F>(map: &M, f: F) -> Result<()>
where
    K: Clone + Send,
    M: NavigableMap<K, V> + Clone + Send,
    F: Fn(super::SubMap<M, K>) -> Result<()> + Sync + Send,
{
    let parts = map.split(rayon::current_num_threads())?;
    log::debug!("running over {} map parts", parts.len());
    map_parts(parts, f).into_iter().collect()
}

/// Split `set` into one value range per rayon thread and run `f` on each.
pub fn for_each_set_part<T, S, F>(set: &S, f: F) -> Result<()>
where
    T: Clone + Send,
    S: NavigableSet<T> + Clone + Send,
    F: Fn(super::SubSet<S, T>) -> Result<()> + Sync + Send,
{
    let parts = NavigableSet::split(set, rayon::current_num_threads())?;
    log::debug!("running over {} set parts", parts.len());
    map_parts(parts, f).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::IndexOrder;
    use crate::traits::Collection;
    use crate::view::Shared;
    use crate::{FastMap, FastSet, FractalTable};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_parallel_table_update() {
        let table = Shared::new((0..1000u32).collect::<FractalTable<u32>>());
        for_each_table_part(&table, |mut part| {
            for i in 0..part.len() {
                let value = part.get(i)?;
                part.set(i, value * 2)?;
            }
            Ok(())
        })
        .unwrap();
        let doubled: Vec<u32> = (0..1000u32).map(|v| v * 2).collect();
        assert_eq!(table.to_vec(), doubled);
    }

    #[test]
    fn test_parallel_map_sum() {
        let map = Shared::new((0..500u32).map(|i| (i, 1u32)).collect::<FastMap<u32, u32, IndexOrder>>());
        let total = AtomicUsize::new(0);
        for_each_map_part(&map, |part| {
            total.fetch_add(part.len(), Ordering::Relaxed);
            Ok(())
        })
        .unwrap();
        assert_eq!(total.load(Ordering::Relaxed), 500);
    }

    #[test]
    fn test_parallel_set_prune() {
        let set = Shared::new((0..600u32).collect::<FastSet<u32, IndexOrder>>());
        for_each_set_part(&set, |mut part| {
            part.remove_if(&|v| v % 3 != 0)?;
            Ok(())
        })
        .unwrap();
        assert_eq!(set.len(), 200);
        assert_eq!(set.read(|s| s.first().copied()), Some(0));
    }
}
