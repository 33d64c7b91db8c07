use anyhow::{Result, anyhow};

/// Children created under every directory, named `0` through `9`.
pub const FANOUT: u64 = 10;

/// Number of directories a complete run at `depth` creates below the root.
///
/// Returns `None` when the count does not fit in a `u64` (depth 20 and up).
pub fn total_for_depth(depth: u32) -> Option<u64> {
    let mut total: u64 = 0;
    let mut level_size: u64 = 1;
    for _ in 0..depth {
        level_size = level_size.checked_mul(FANOUT)?;
        total = total.checked_add(level_size)?;
    }
    Some(total)
}

/// Fixed work estimate for one build.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Plan {
    depth: u32,
    total: u64,
}

impl Plan {
    pub fn new(depth: u32) -> Result<Self> {
        let total = total_for_depth(depth)
            .ok_or_else(|| anyhow!("depth {depth} is too large: directory count overflows u64"))?;
        Ok(Self { depth, total })
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// `(level, directories at that level)` for levels `1..=depth`.
    pub fn levels(&self) -> impl Iterator<Item = (u32, u64)> {
        (1..=self.depth).scan(1u64, |size, level| {
            *size *= FANOUT;
            Some((level, *size))
        })
    }
}
