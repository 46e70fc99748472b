//! Edge-list provider: loads and saves graphs stored as whitespace-separated
//! `source target` lines.

mod errors;
mod provider;
mod writer;

pub use crate::{
    errors::{EdgeListError, EdgeListErrorCode},
    provider::EdgeListProvider,
    writer::{save_edge_list, write_edge_list},
};
