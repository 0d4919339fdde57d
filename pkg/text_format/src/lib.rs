pub mod descriptor;
pub mod error;
pub mod literal;
pub mod message;
pub mod parser;
mod tokenizer;

pub use descriptor::{
    DescriptorPool, EnumDescriptor, EnumValueDescriptor, ExtensionDescriptor, FieldDescriptor,
    FieldType, MessageDescriptor, ScalarValue, WireType,
};
pub use error::{ParseError, Result};
pub use message::{MapKey, MapValue, Message};
pub use parser::{parse, ParserOptions};
