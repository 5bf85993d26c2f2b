//! Container fragmentation: whitespace-boundary segmentation and the
//! reversible text-host transformation.
//!
//! The engine never touches a real node tree. It drives an injected
//! [`TextHost`], which exposes the container's text runs in document order,
//! materializes one layout-neutral inline wrapper per chunk, and restores
//! the original structure on `revert`. The segmentation rule itself
//! (maximal whitespace or non-whitespace runs) lives here, so every host
//! binding fragments identically.
//!
//! # Usage
//!
//! ```rust,no_run
//! use line_gauge::fragment::{split_container, FragmentLimits, TextHost};
//!
//! # fn example<H: TextHost>(host: &mut H) -> Result<(), line_gauge::GaugeError> {
//! let fragments = split_container(host, &FragmentLimits::default())?;
//! let total: usize = fragments.iter().map(|f| f.len_chars()).sum();
//! # let _ = total;
//! # Ok(())
//! # }
//! ```

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;

use crate::error::{ErrorPhase, GaugeError};

/// Limits for one fragmentation pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FragmentLimits {
    /// Maximum number of fragments materialized in one pass.
    pub max_fragments: usize,
    /// Maximum UTF-8 byte length for any single text run.
    pub max_run_bytes: usize,
}

impl Default for FragmentLimits {
    fn default() -> Self {
        Self {
            max_fragments: 16 * 1024,
            max_run_bytes: 512 * 1024,
        }
    }
}

impl FragmentLimits {
    /// Embedded-focused preset with smaller bounds.
    pub fn embedded() -> Self {
        Self {
            max_fragments: 2048,
            max_run_bytes: 64 * 1024,
        }
    }
}

/// Host-side surface for one container under measurement.
///
/// The host owns the node mechanics; the engine owns the segmentation rule
/// and the pass ordering. Wrappers introduced by [`wrap_run`](Self::wrap_run)
/// must be layout-neutral (inline, no margin/padding/border) so the
/// transformation does not move line breaks, and must carry whatever marker
/// the host needs to find them again on revert.
///
/// Preconditions the engine relies on:
/// - the container stays attached and unmodified by other actors for the
///   duration of one pass (behavior is undefined otherwise);
/// - run indices keep addressing the original pre-split runs until
///   `revert` is called, regardless of wraps already applied.
pub trait TextHost {
    /// Opaque handle addressing one materialized fragment wrapper.
    type Handle;
    /// Host-side mutation failure.
    type Error: fmt::Display;

    /// Number of text runs in the container, in document order.
    fn run_count(&self) -> usize;

    /// Raw text of run `run`. Runs are indexed `0..run_count()`.
    fn run_text(&self, run: usize) -> &str;

    /// Replace run `run` with one inline wrapper per chunk, in order.
    ///
    /// The chunks concatenate to exactly the run's original text. Returns
    /// one handle per chunk.
    fn wrap_run(&mut self, run: usize, chunks: &[&str])
        -> Result<Vec<Self::Handle>, Self::Error>;

    /// Restore the container to its pre-split structure, bit-identical to
    /// the state before the first `wrap_run`.
    ///
    /// Calling `revert` on an already-reverted host is a no-op.
    fn revert(&mut self) -> Result<(), Self::Error>;
}

/// One addressable unit of text: a maximal whitespace or non-whitespace run.
///
/// Fragments are created by [`split_container`] and do not outlive the
/// paired revert; the handle is only meaningful while the transformation is
/// applied.
#[derive(Clone, Debug)]
pub struct Fragment<H> {
    /// Source text carried by the wrapper node.
    pub text: String,
    /// Host handle for geometry queries.
    pub handle: H,
}

impl<H> Fragment<H> {
    /// Character count of the source text (code points, not bytes and not
    /// rendered glyphs; collapsed whitespace still counts).
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the fragment is a whitespace run.
    pub fn is_whitespace(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }
}

/// Splits `text` into maximal runs that are entirely whitespace or entirely
/// non-whitespace.
///
/// Lossless: the runs concatenate back to `text` exactly, so wrapping each
/// run preserves the rendered character sequence.
pub fn split_runs(text: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut prev_is_ws = None;
    for (idx, ch) in text.char_indices() {
        let is_ws = ch.is_whitespace();
        match prev_is_ws {
            Some(prev) if prev == is_ws => {}
            Some(_) => {
                runs.push(&text[start..idx]);
                start = idx;
                prev_is_ws = Some(is_ws);
            }
            None => prev_is_ws = Some(is_ws),
        }
    }
    if start < text.len() {
        runs.push(&text[start..]);
    }
    runs
}

/// Splits every text run of `host` into fragments and materializes each
/// chunk with an inline wrapper, in document order.
///
/// A container with no text runs (or only empty runs) yields zero
/// fragments; that is not an error. A host mutation failure is fatal to the
/// pass and returned immediately; the caller still owes the host a
/// best-effort `revert`.
pub fn split_container<H: TextHost>(
    host: &mut H,
    limits: &FragmentLimits,
) -> Result<Vec<Fragment<H::Handle>>, GaugeError> {
    let run_total = host.run_count();
    let mut fragments = Vec::new();

    for run in 0..run_total {
        let run_bytes = host.run_text(run).len();
        if run_bytes > limits.max_run_bytes {
            return Err(GaugeError::LimitExceeded {
                kind: "run_bytes",
                actual: run_bytes,
                limit: limits.max_run_bytes,
            });
        }

        // Own the chunk text before handing &mut host to wrap_run.
        let chunk_texts: SmallVec<[String; 8]> = split_runs(host.run_text(run))
            .into_iter()
            .map(ToString::to_string)
            .collect();
        if chunk_texts.is_empty() {
            continue;
        }

        let wanted = fragments.len() + chunk_texts.len();
        if wanted > limits.max_fragments {
            return Err(GaugeError::LimitExceeded {
                kind: "fragments",
                actual: wanted,
                limit: limits.max_fragments,
            });
        }

        let chunk_refs: SmallVec<[&str; 8]> =
            chunk_texts.iter().map(String::as_str).collect();
        let handles = host
            .wrap_run(run, &chunk_refs)
            .map_err(|e| GaugeError::host(ErrorPhase::Fragment, e))?;
        drop(chunk_refs);
        if handles.len() != chunk_texts.len() {
            return Err(GaugeError::host(
                ErrorPhase::Fragment,
                "host returned a mismatched handle count",
            ));
        }

        for (text, handle) in chunk_texts.into_iter().zip(handles) {
            fragments.push(Fragment { text, handle });
        }
    }

    Ok(fragments)
}
