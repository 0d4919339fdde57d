pub mod errors {
    pub use failure::err_msg;
    pub use failure::format_err;
    pub use failure::Error;
    pub use failure::Fail;

    pub type Result<T> = std::result::Result<T, Error>;
}

/// Converts a `snake_case` (or already camelCase) identifier to lowerCamelCase
/// the way protobuf field names are mapped onto their generated accessors:
/// underscores are dropped and the ASCII letter following one is upper-cased.
pub fn snake_to_camel_case(name: &str) -> String {
    let mut s = String::new();

    let mut next_upper = false;
    for c in name.chars() {
        if c == '_' {
            next_upper = true;
        } else if next_upper {
            s.push(c.to_ascii_uppercase());
            next_upper = false;
        } else {
            s.push(c);
        }
    }

    s
}
