//! A small backend for keeping a directory of relay-capable devices and for building the
//! "trigger" payloads that eventually get sent to them. The two interesting pieces are
//! `directory` (mongo-backed registration + lookup, keyed by a unique device `uid`) and
//! `trigger` (the pure payload builder); everything else is plumbing shared by the `relay-web`
//! and `relay-cli` binaries.

/// The http api surface consumed by the web binary.
pub mod api;

/// Shared configuration definitions deserialized from toml.
pub mod config;

/// The device directory itself: registration, lookup and index preparation.
pub mod directory;

/// The error taxonomy surfaced by directory + builder operations.
pub mod errors;

/// Mongo client bootstrapping.
pub mod mongo;

/// Struct definitions for things persisted in mongo or sent over the wire.
pub mod schema;

/// The relay trigger request builder.
pub mod trigger;
