//! Data types shared by the fetchers and the extraction pipeline.

pub mod interaction;
pub mod page;
pub mod table;
