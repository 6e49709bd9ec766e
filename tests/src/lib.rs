//! # Social Graph Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── graph_benchmarks.rs   # Recipient resolution and block check throughput
//! └── src/integration/
//!     ├── flows.rs              # Scenarios run against every store backend
//!     ├── persistence.rs        # File-backed SQLite across reopen
//!     └── http_e2e.rs           # Real socket, real client, full node wiring
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sg-tests
//! cargo test -p sg-tests integration::http_e2e::
//! cargo bench -p sg-tests
//! ```

pub mod integration;
