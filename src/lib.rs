#![forbid(unsafe_code)]
//! hdfs-ls — directory listing for HDFS through the namenode's WebHDFS API.

pub mod cli;
pub mod format;
pub mod fs;
pub mod listing;
pub mod path;
pub mod resolve;
pub mod table;
