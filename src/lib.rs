//! Per-visual-line character measurement for rendered text containers.
//!
//! Given a container of wrapped text and nothing but per-fragment geometry
//! queries, `line_gauge` reports how many characters the layout engine put
//! on each rendered line, plus max/median summaries for spotting overly
//! long lines. The container is split into word/whitespace fragments, each
//! fragment's top coordinate is read in one batch, fragments sharing a top
//! are summed into one line, and the container is restored bit-identical
//! before the pass returns.
//!
//! The environment is injected: a [`TextHost`] performs the reversible
//! node mutation and a [`LayoutOracle`] answers geometry queries. Any
//! binding works: a browser DOM, a headless layout engine, or the
//! deterministic fakes used by this crate's own tests.
//!
//! # Usage
//!
//! ```rust,no_run
//! use line_gauge::{compute_stats, measure_lines, LayoutOracle, TextHost};
//!
//! # fn example<H, O>(host: &mut H, oracle: &O) -> Result<(), line_gauge::GaugeError>
//! # where
//! #     H: TextHost,
//! #     O: LayoutOracle<Handle = H::Handle>,
//! # {
//! let lengths = measure_lines(host, oracle)?;
//! match compute_stats(&lengths) {
//!     Some(stats) => println!("max {} / median {}", stats.max, stats.median),
//!     None => println!("no text found"),
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

extern crate alloc;

pub mod error;
pub mod fragment;
pub mod measure;
pub mod stats;

pub use error::{ErrorPhase, GaugeError};
pub use fragment::{split_container, split_runs, Fragment, FragmentLimits, TextHost};
pub use measure::{measure_lines, LayoutOracle, LineGauge, MeasureOptions};
pub use stats::{compute_stats, LineStats};
