// Suspendable ascending traversal: an explicit cursor state machine driven by
// per-step control signals.
use crate::core::table::Table;

/// Control signal a step function returns to drive the walk.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Step<A> {
    /// Advance to the next key and keep going.
    Continue(A),
    /// Pause here; the walk hands back a resumable [`Traversal`].
    Suspend(A),
    /// Stop; no further entries are visited.
    Halt(A),
}

/// Cursor position in a table's ascending key order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Cursor<K> {
    /// Before the first key; the next advance visits the smallest key.
    Start,
    /// At the key most recently handed to the step function.
    At(K),
    /// End-of-table sentinel.
    End,
}

/// Terminal outcome of a reduction.
pub enum Reduced<K, V, A, F> {
    /// The walk ran off the end of the table.
    Done(A),
    /// The step function halted the walk.
    Halted(A),
    /// The step function paused the walk; resume through the traversal.
    Suspended(A, Traversal<K, V, F>),
}

impl<K, V, A, F> Reduced<K, V, A, F> {
    /// The accumulator carried by any of the three outcomes.
    pub fn into_acc(self) -> A {
        match self {
            Reduced::Done(acc) | Reduced::Halted(acc) => acc,
            Reduced::Suspended(acc, _) => acc,
        }
    }
}

/// Suspended traversal state: a table handle plus the cursor the walk paused
/// on. A position reference only; the underlying map stays alive as long as
/// any handle does, and structural changes are observed live on resume.
///
/// Consumed on resume, so each suspension event is resumable exactly once.
pub struct Traversal<K, V, F> {
    table: Table<K, V>,
    cursor: Cursor<K>,
    step: F,
}

impl<K: Ord + Clone, V: Clone, F> Traversal<K, V, F> {
    /// A traversal positioned before the table's first key. Drive it with
    /// [`Traversal::resume`]; `Enumerate::reduce` is the common front door.
    pub fn new(table: &Table<K, V>, step: F) -> Self {
        Self {
            table: table.clone(),
            cursor: Cursor::Start,
            step,
        }
    }

    pub fn cursor(&self) -> &Cursor<K> {
        &self.cursor
    }

    /// Feeds `signal` into the state machine and runs until a terminal
    /// outcome.
    ///
    /// `Continue` advances the cursor first, so an entry that suspended the
    /// walk is not revisited on resume. `Suspend` and `Halt` take effect
    /// without advancing. No lock is held while the step function runs; each
    /// advance recomputes the successor against the live order, so entries
    /// deleted just ahead of the cursor are skipped and entries inserted
    /// behind it are never visited.
    pub fn resume<A>(mut self, signal: Step<A>) -> Reduced<K, V, A, F>
    where
        F: FnMut((K, V), A) -> Step<A>,
    {
        let mut signal = signal;
        loop {
            match signal {
                Step::Halt(acc) => return Reduced::Halted(acc),
                Step::Suspend(acc) => return Reduced::Suspended(acc, self),
                Step::Continue(acc) => {
                    let next = match &self.cursor {
                        Cursor::Start => self.table.first_key(),
                        Cursor::At(key) => self.table.next_key(key),
                        Cursor::End => None,
                    };
                    let Some(key) = next else {
                        self.cursor = Cursor::End;
                        return Reduced::Done(acc);
                    };
                    let Some(value) = self.table.get(&key) else {
                        // The entry vanished between the successor query and
                        // the read; advance past it.
                        self.cursor = Cursor::At(key);
                        signal = Step::Continue(acc);
                        continue;
                    };
                    self.cursor = Cursor::At(key.clone());
                    signal = (self.step)((key, value), acc);
                }
            }
        }
    }
}

/// Traversal-side capabilities of an ordered table.
pub trait Enumerate<K, V> {
    fn count(&self) -> usize;

    fn contains(&self, key: &K) -> bool;

    /// Walks entries in ascending key order, threading `acc` through `step`
    /// until the step function halts or suspends, or the table is exhausted.
    fn reduce<A, F>(&self, acc: A, step: F) -> Reduced<K, V, A, F>
    where
        F: FnMut((K, V), A) -> Step<A>;
}

impl<K: Ord + Clone, V: Clone> Enumerate<K, V> for Table<K, V> {
    fn count(&self) -> usize {
        self.len()
    }

    fn contains(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    fn reduce<A, F>(&self, acc: A, step: F) -> Reduced<K, V, A, F>
    where
        F: FnMut((K, V), A) -> Step<A>,
    {
        Traversal::new(self, step).resume(Step::Continue(acc))
    }
}
