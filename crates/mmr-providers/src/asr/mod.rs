//! Speech recognition provider implementations

pub mod aliyun;
pub mod null;

pub use aliyun::{AliyunAsrProvider, AliyunAsrSettings};
pub use null::NullAsrProvider;
