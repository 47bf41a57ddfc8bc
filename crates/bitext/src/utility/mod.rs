//! # Utilities

mod file_io;

#[doc(inline)]
pub use file_io::{
    expand_path,
    read_json_path,
    to_json_bytes,
    write_all_atomic,
    write_atomic,
    write_json_path,
};
