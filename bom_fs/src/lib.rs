#![cfg_attr(docsrs, feature(doc_cfg))]

//! bom_fs - Synchronous random-access binary file
//! bom_fs - 同步随机访问二进制文件

mod file;

pub use file::BinFile;
