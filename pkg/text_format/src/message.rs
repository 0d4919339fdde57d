use crate::descriptor::{FieldDescriptor, MessageDescriptor, ScalarValue};

/// A map field's key. Protobuf restricts map keys to a handful of scalar
/// wire types (never float, bytes or message), so this is a narrower enum
/// than `ScalarValue`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapKey {
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    Bool(bool),
    String(String),
}

/// A map field's value: either a scalar/enum, or (when the map's value type
/// resolves to a message descriptor) a freshly merged sub-message.
pub enum MapValue {
    Scalar(ScalarValue),
    Enum(i64),
    Message(Box<dyn Message>),
}

/// The mutation surface a parsed field is deposited onto.
///
/// Implementations own whatever storage they like (a `HashMap<i64, Value>`
/// keyed by field number is the obvious choice, and is what the fixture
/// implementation under `tests/` uses); the parser only ever goes through
/// these methods.
pub trait Message {
    fn descriptor(&self) -> &'static dyn MessageDescriptor;

    /// Overwrites a singular scalar field.
    fn set_scalar(&mut self, field: &'static dyn FieldDescriptor, value: ScalarValue);

    /// Overwrites a singular enum field with its numeric value.
    fn set_enum(&mut self, field: &'static dyn FieldDescriptor, value: i64);

    /// Appends to a repeated scalar field, creating the sequence on first
    /// write.
    fn add_repeated_scalar(&mut self, field: &'static dyn FieldDescriptor, value: ScalarValue);

    /// Appends to a repeated enum field, creating the sequence on first
    /// write.
    fn add_repeated_enum(&mut self, field: &'static dyn FieldDescriptor, value: i64);

    /// Returns the existing singular sub-message for `field`, constructing
    /// one via `field`'s message descriptor if absent. Parsing into the
    /// field a second time merges into the same instance, matching the
    /// "messages merge" invariant in spec §3.
    fn mutable_message(&mut self, field: &'static dyn FieldDescriptor) -> &mut dyn Message;

    /// Appends a freshly constructed sub-message to a repeated message
    /// field and returns it for the caller to merge fields into.
    fn add_message(&mut self, field: &'static dyn FieldDescriptor) -> &mut dyn Message;

    /// Inserts into a map field, creating the mapping on first write and
    /// replacing any prior value for the same key (spec §3 invariant 3).
    fn insert_map_entry(&mut self, field: &'static dyn FieldDescriptor, key: MapKey, value: MapValue);
}
