#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use tw_codec as codec;
pub use tw_schema as schema;
pub use tw_utils as utils;

pub use tw_codec::{Codec, CodecConfig, deserialize, serialize};
pub use tw_schema::derive::Schema;
pub use tw_schema::{Message, Schema};
