//! Next-piece generator with one piece of look-ahead.
//!
//! Each draw is uniform over the seven piece kinds (no bag). The value handed
//! out by [`PieceSpawner::peek_and_advance`] is the one the preview has been
//! showing; a fresh kind replaces it immediately.

use crate::rng::RandomSource;
use crate::types::BlockType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PieceSpawner {
    /// `None` until the first draw.
    next: Option<BlockType>,
}

impl PieceSpawner {
    pub fn new() -> Self {
        Self { next: None }
    }

    /// Kind shown in the next-piece preview, `Empty` before the first draw.
    pub fn preview(&self) -> BlockType {
        self.next.unwrap_or(BlockType::Empty)
    }

    /// Return the queued kind and queue a new one.
    pub fn peek_and_advance<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> BlockType {
        let current = match self.next {
            Some(kind) => kind,
            None => draw(rng),
        };
        self.next = Some(draw(rng));
        current
    }
}

fn draw<R: RandomSource + ?Sized>(rng: &mut R) -> BlockType {
    let n = BlockType::PIECES.len() as u32;
    BlockType::PIECES[rng.uniform_int(n) as usize % BlockType::PIECES.len()]
}
