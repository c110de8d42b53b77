//! Backend implementations of the accessor traits: an in-process store
//! that owns its data outright, and an HTTP client against the remote
//! workshop API.

pub mod local;
pub mod remote;
