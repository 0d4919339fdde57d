/// The wire-level shape of a scalar field, i.e. everything a field can be
/// that isn't itself a message or an enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    Double,
    Float,
    Int32,
    Int64,
    UInt32,
    UInt64,
    SInt32,
    SInt64,
    Fixed32,
    Fixed64,
    SFixed32,
    SFixed64,
    Bool,
    String,
    Bytes,
}

/// A decoded scalar literal, tagged with the wire type it was decoded for.
///
/// Message-typed and enum-typed values are not represented here: messages
/// are merged through the `Message` trait's own mutators, and enums carry
/// just a bare `i64` (open-enum semantics mean an unrecognised numeric value
/// is still a valid value, so there is no enum variant to wrap it in).
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    F64(f64),
    F32(f32),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    Bool(bool),
    String(String),
    Bytes(Vec<u8>),
}

/// What a field resolves to beyond its wire type: either it's a plain
/// scalar, or its values are themselves structured (message or enum).
#[derive(Clone, Copy)]
pub enum FieldType {
    Scalar(WireType),
    Enum(&'static dyn EnumDescriptor),
    Message(&'static dyn MessageDescriptor),
}

pub trait EnumValueDescriptor {
    fn name(&self) -> &str;
    fn number(&self) -> i64;
}

pub trait EnumDescriptor {
    fn name(&self) -> &str;
    fn value_by_name(&self, name: &str) -> Option<&'static dyn EnumValueDescriptor>;
    fn value_by_number(&self, number: i64) -> Option<&'static dyn EnumValueDescriptor>;
}

/// Per-field metadata as consumed by `merge_field`.
pub trait FieldDescriptor {
    /// The original (snake_case, or group-style capitalised) proto name.
    fn name(&self) -> &str;

    fn number(&self) -> i64;

    fn is_repeated(&self) -> bool;

    fn is_map(&self) -> bool;

    /// Only meaningful when `is_map()`: the map entry's `key` sub-field wire
    /// type. Map keys are always scalar in the protobuf grammar.
    fn map_key_type(&self) -> Option<WireType> {
        None
    }

    /// Only meaningful when `is_map()`: the map entry's `value` sub-field
    /// type, which may itself be a message.
    fn map_value_type(&self) -> Option<FieldType> {
        None
    }

    fn field_type(&self) -> FieldType;
}

/// Message-descriptor introspection: the directory `merge_field` consults to
/// resolve a field name or number against a concrete message type.
pub trait MessageDescriptor {
    /// Fully-qualified name, e.g. `"google.fonts.FamilyProto"`, used in
    /// "has no field named" error messages.
    fn full_name(&self) -> &str;

    /// The message's simple (unqualified) name, used to recognise
    /// capitalised group-style field names (see `merge_field` fallback
    /// resolution).
    fn name(&self) -> &str;

    fn field_by_camel_case_name(&self, name: &str) -> Option<&'static dyn FieldDescriptor>;

    fn field_by_number(&self, number: i64) -> Option<&'static dyn FieldDescriptor>;

    /// Constructs a fresh, empty instance of this message type. Stands in
    /// for the "message factory" collaborator named in the external spec:
    /// in practice the descriptor for a message type is exactly the thing
    /// that knows how to build one.
    fn new_instance(&self) -> Box<dyn crate::message::Message>;
}

/// An extension field resolved by dotted name, together with the message
/// type it extends (needed to reject cross-message extension usage).
#[derive(Clone, Copy)]
pub struct ExtensionDescriptor {
    pub field: &'static dyn FieldDescriptor,
    pub extendee: &'static dyn MessageDescriptor,
}

/// Global registry used to resolve `[a.b.c]` extension names. Supplied by
/// the host via `ParserOptions::descriptor_pool`.
pub trait DescriptorPool {
    fn find_extension(&self, full_name: &str) -> Option<ExtensionDescriptor>;
}
