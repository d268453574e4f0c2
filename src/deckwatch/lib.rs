//! # Deckwatch Architecture
//!
//! Deckwatch is a **UI-agnostic reporting library** over a hierarchical
//! deck collection, with a CLI client on top. It answers one question:
//! which parts of a study hierarchy are starved of new cards, either
//! because a configured daily limit is 0 or because every new card there
//! is suspended.
//!
//! ## The Three-Layer Architecture
//!
//! - **CLI layer** (`main.rs`, `args.rs`, `print.rs`): argument parsing,
//!   colored tree output, exit codes. The only place that knows about
//!   stdout/stderr.
//! - **API layer** ([`api`]): thin facade over commands, generic over the
//!   store backend, returns structured `Result<CmdResult>` values.
//! - **Command layer** ([`commands`] plus the pure pipeline modules):
//!   business logic on Rust types, no I/O assumptions whatsoever.
//! - **Store layer** ([`store`]): the abstract `CollectionStore` trait with
//!   `FileCollection` (production) and `InMemoryCollection` (testing).
//!
//! ## The Report Pipeline
//!
//! Every report is recomputed from scratch against the current store state:
//!
//! 1. [`collect`] enumerates decks and gathers per-deck limits and card
//!    counts (fail-soft per deck),
//! 2. [`model::Status::classify`] derives each deck's own status,
//! 3. [`aggregate`] rolls counts and worst-case status up the name
//!    hierarchy and classifies container/empty decks,
//! 4. [`project`] applies the user's filters and emits the visible node
//!    set, keeping ancestors of matches for tree context.
//!
//! The pipeline is strictly read-only analytics: it never mutates deck
//! configuration, card state, or anything else in the collection.
//!
//! ## Module Overview
//!
//! - [`api`]: the API facade, entry point for all operations
//! - [`collect`]: deck enumeration and per-deck metrics
//! - [`aggregate`]: bottom-up hierarchy aggregation
//! - [`project`]: filter application and view projection
//! - [`commands`]: command orchestration and result types
//! - [`store`]: storage abstraction and implementations
//! - [`model`]: core data types (`DeckInfo`, `Status`, `LimitSource`)
//! - [`hierarchy`]: `"::"`-separated deck-name helpers
//! - [`config`]: user preferences and the reminder policy
//! - [`error`]: error types

pub mod aggregate;
pub mod api;
pub mod collect;
pub mod commands;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod model;
pub mod project;
pub mod store;
