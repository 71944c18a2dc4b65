use rayon::prelude::*;

use crate::foundation::error::{KeycompError, KeycompResult};

/// Row-parallelism settings shared by every pipeline stage.
///
/// Stages write disjoint output rows, so parallel and sequential runs produce identical grids.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Threading {
    /// Partition stage output by rows across a rayon pool.
    pub parallel: bool,
    /// Override rayon worker threads (parallel mode only).
    pub threads: Option<usize>,
}

/// Runs a per-row kernel over an output buffer.
pub(crate) enum RowExecutor {
    Sequential,
    Pool(rayon::ThreadPool),
}

impl RowExecutor {
    pub(crate) fn new(threading: &Threading) -> KeycompResult<Self> {
        if !threading.parallel {
            return Ok(Self::Sequential);
        }
        Ok(Self::Pool(build_thread_pool(threading.threads)?))
    }

    /// Call `f(y, row)` for every `row_len`-byte row of `out`.
    pub(crate) fn for_each_row<F>(&self, out: &mut [u8], row_len: usize, f: F)
    where
        F: Fn(u32, &mut [u8]) + Send + Sync,
    {
        if row_len == 0 || out.is_empty() {
            return;
        }
        match self {
            Self::Sequential => out
                .chunks_exact_mut(row_len)
                .enumerate()
                .for_each(|(y, row)| f(y as u32, row)),
            Self::Pool(pool) => pool.install(|| {
                out.par_chunks_exact_mut(row_len)
                    .enumerate()
                    .for_each(|(y, row)| f(y as u32, row))
            }),
        }
    }
}

fn build_thread_pool(threads: Option<usize>) -> KeycompResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(KeycompError::validation(
            "threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| KeycompError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/threading.rs"]
mod tests;
