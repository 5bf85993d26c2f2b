//! In-memory text host and deterministic layout oracle for the integration
//! tests: a flat-node container that can be split into marked wrappers and
//! restored, paired with a greedy character-grid wrapping model standing in
//! for a real layout engine.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use line_gauge::{LayoutOracle, TextHost};

/// Vertical distance between consecutive grid lines.
pub const LINE_HEIGHT_PX: f64 = 16.0;

/// One slot in the fake container.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Slot {
    /// Original text run.
    Run(String),
    /// Run replaced by marked wrapper nodes (marker id + chunk text).
    Wrapped(Vec<(u64, String)>),
}

type PositionMap = Rc<RefCell<HashMap<u64, f64>>>;

/// Minimal DOM stand-in: text runs in document order, splittable into
/// wrapper nodes and restorable. Layout is a greedy character grid: words
/// that would overflow `columns` move to the next line, whitespace never
/// forces a break.
pub struct FakeDom {
    slots: Vec<Slot>,
    original: Vec<String>,
    hidden_runs: Vec<usize>,
    columns: usize,
    next_id: u64,
    positions: PositionMap,
    /// Number of `revert` calls observed.
    pub revert_calls: usize,
    /// When set, the n-th `wrap_run` call (0-based) fails.
    pub fail_wrap_at: Option<usize>,
    wrap_calls: usize,
}

impl FakeDom {
    pub fn new<I, S>(columns: usize, runs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let original: Vec<String> = runs.into_iter().map(Into::into).collect();
        Self {
            slots: original.iter().cloned().map(Slot::Run).collect(),
            original,
            hidden_runs: Vec::new(),
            columns,
            next_id: 1,
            positions: Rc::default(),
            revert_calls: 0,
            fail_wrap_at: None,
            wrap_calls: 0,
        }
    }

    /// Marks one run as unrenderable (a `display: none` subtree): its
    /// wrappers never receive a position.
    pub fn hide_run(&mut self, run: usize) {
        self.hidden_runs.push(run);
    }

    /// Oracle sharing this container's layout state.
    pub fn oracle(&self) -> GridOracle {
        GridOracle {
            positions: Rc::clone(&self.positions),
        }
    }

    /// Full text in document order.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for slot in &self.slots {
            match slot {
                Slot::Run(text) => out.push_str(text),
                Slot::Wrapped(chunks) => {
                    for (_, text) in chunks {
                        out.push_str(text);
                    }
                }
            }
        }
        out
    }

    /// Total character count of the original content.
    pub fn total_chars(&self) -> usize {
        self.original.iter().map(|run| run.chars().count()).sum()
    }

    /// Structural snapshot for reversibility assertions; wrapper nodes and
    /// their markers are visible in the output.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for slot in &self.slots {
            match slot {
                Slot::Run(text) => out.push_str(&format!("run({:?})", text)),
                Slot::Wrapped(chunks) => {
                    out.push_str("wrapped[");
                    for (id, text) in chunks {
                        out.push_str(&format!("#{}:{:?}", id, text));
                    }
                    out.push(']');
                }
            }
        }
        out
    }

    /// Greedy grid relayout over all wrapper nodes in document order.
    fn reflow(&self) {
        let mut positions = self.positions.borrow_mut();
        positions.clear();
        let mut col = 0usize;
        let mut line = 0usize;
        for (slot_idx, slot) in self.slots.iter().enumerate() {
            let Slot::Wrapped(chunks) = slot else { continue };
            if self.hidden_runs.contains(&slot_idx) {
                continue;
            }
            for (id, text) in chunks {
                let width = text.chars().count();
                let is_ws = text.chars().all(char::is_whitespace);
                if !is_ws && col > 0 && col + width > self.columns {
                    line += 1;
                    col = 0;
                }
                positions.insert(*id, line as f64 * LINE_HEIGHT_PX);
                col += width;
            }
        }
    }
}

impl TextHost for FakeDom {
    type Handle = u64;
    type Error = String;

    fn run_count(&self) -> usize {
        self.original.len()
    }

    fn run_text(&self, run: usize) -> &str {
        &self.original[run]
    }

    fn wrap_run(&mut self, run: usize, chunks: &[&str]) -> Result<Vec<u64>, String> {
        let call = self.wrap_calls;
        self.wrap_calls += 1;
        if self.fail_wrap_at == Some(call) {
            return Err(format!("host rejected wrap of run {}", run));
        }
        let original = self
            .original
            .get(run)
            .ok_or_else(|| format!("no such run {}", run))?;
        if chunks.concat() != *original {
            return Err(format!("chunks do not reassemble run {}", run));
        }
        let mut nodes = Vec::with_capacity(chunks.len());
        let mut handles = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            let id = self.next_id;
            self.next_id += 1;
            nodes.push((id, (*chunk).to_string()));
            handles.push(id);
        }
        self.slots[run] = Slot::Wrapped(nodes);
        self.reflow();
        Ok(handles)
    }

    fn revert(&mut self) -> Result<(), String> {
        self.revert_calls += 1;
        for (slot, original) in self.slots.iter_mut().zip(&self.original) {
            *slot = Slot::Run(original.clone());
        }
        self.positions.borrow_mut().clear();
        Ok(())
    }
}

/// Geometry oracle over the [`FakeDom`] grid layout.
#[derive(Clone)]
pub struct GridOracle {
    positions: PositionMap,
}

impl LayoutOracle for GridOracle {
    type Handle = u64;

    fn position_of(&self, handle: &u64) -> Option<f64> {
        self.positions.borrow().get(handle).copied()
    }
}
