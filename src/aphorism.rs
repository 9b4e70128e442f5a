//! Aphorisms for the twice-daily APRS bulletins.
//!
//! Lines are read once from a text file and visited in a shuffled order, so
//! no aphorism repeats until every one has been used.

use anyhow::Context;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs;
use std::path::Path;

pub struct Aphorisms {
    lines: Vec<String>,
    order: Vec<usize>,
    next: usize,
}

impl Aphorisms {
    /// Load one aphorism per non-blank line.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("read aphorisms from {}", path.display()))?;
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        let aphorisms = Self::from_lines(lines, &mut rand::rng());
        log::info!("{} aphorisms in {}", aphorisms.len(), path.display());
        Ok(aphorisms)
    }

    pub fn from_lines<R: Rng + ?Sized>(lines: Vec<String>, rng: &mut R) -> Self {
        let lines: Vec<String> = lines
            .into_iter()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        let mut order: Vec<usize> = (0..lines.len()).collect();
        order.shuffle(rng);
        Self {
            lines,
            order,
            next: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Next aphorism in shuffled order, wrapping after the last.
    pub fn next(&mut self) -> Option<&str> {
        if self.order.is_empty() {
            return None;
        }
        let index = self.order[self.next % self.order.len()];
        self.next = (self.next + 1) % self.order.len();
        self.lines.get(index).map(String::as_str)
    }
}
