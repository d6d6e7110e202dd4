// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client session: the authenticated identity, its bearer token and the
//! persisted copy that survives restarts.

pub mod storage;
pub mod store;
pub mod token;

pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};
pub use store::{SessionState, SessionStore};
