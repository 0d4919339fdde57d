//! Hand-built descriptor/message fixture used only by the integration tests
//! in this directory. Schema *loading* is out of scope for this crate (see
//! the crate's top-level docs); this is a literal in-memory schema, not a
//! `.proto` reader.
//!
//! Modeled after the Google Fonts `FamilyProto` message (for the real-world
//! scenario) plus a small general-purpose `TestMessage` covering every field
//! shape the parser supports.

use std::collections::HashMap;
use text_format::{
    EnumDescriptor, EnumValueDescriptor, FieldDescriptor, FieldType, MapKey, MapValue, Message,
    MessageDescriptor, ScalarValue, WireType,
};

#[derive(Clone, Copy)]
enum Kind {
    Scalar(WireType),
    Message(&'static dyn MessageDescriptor),
    Enum(&'static dyn EnumDescriptor),
}

impl From<Kind> for FieldType {
    fn from(k: Kind) -> FieldType {
        match k {
            Kind::Scalar(w) => FieldType::Scalar(w),
            Kind::Message(m) => FieldType::Message(m),
            Kind::Enum(e) => FieldType::Enum(e),
        }
    }
}

struct Field {
    name: &'static str,
    camel: &'static str,
    number: i64,
    repeated: bool,
    kind: Kind,
    map_key: Option<WireType>,
    map_value: Option<Kind>,
}

impl FieldDescriptor for Field {
    fn name(&self) -> &str {
        self.name
    }
    fn number(&self) -> i64 {
        self.number
    }
    fn is_repeated(&self) -> bool {
        self.repeated
    }
    fn is_map(&self) -> bool {
        self.map_key.is_some()
    }
    fn map_key_type(&self) -> Option<WireType> {
        self.map_key
    }
    fn map_value_type(&self) -> Option<FieldType> {
        self.map_value.map(FieldType::from)
    }
    fn field_type(&self) -> FieldType {
        self.kind.into()
    }
}

struct Msg {
    full_name: &'static str,
    name: &'static str,
    fields: &'static [Field],
    make: fn() -> Box<dyn Message>,
}

impl MessageDescriptor for Msg {
    fn full_name(&self) -> &str {
        self.full_name
    }
    fn name(&self) -> &str {
        self.name
    }
    fn field_by_camel_case_name(&self, name: &str) -> Option<&'static dyn FieldDescriptor> {
        self.fields
            .iter()
            .find(|f| f.camel == name)
            .map(|f| f as &'static dyn FieldDescriptor)
    }
    fn field_by_number(&self, number: i64) -> Option<&'static dyn FieldDescriptor> {
        self.fields
            .iter()
            .find(|f| f.number == number)
            .map(|f| f as &'static dyn FieldDescriptor)
    }
    fn new_instance(&self) -> Box<dyn Message> {
        (self.make)()
    }
}

struct EnumValue {
    name: &'static str,
    number: i64,
}

impl EnumValueDescriptor for EnumValue {
    fn name(&self) -> &str {
        self.name
    }
    fn number(&self) -> i64 {
        self.number
    }
}

struct Enum {
    name: &'static str,
    values: &'static [EnumValue],
}

impl EnumDescriptor for Enum {
    fn name(&self) -> &str {
        self.name
    }
    fn value_by_name(&self, name: &str) -> Option<&'static dyn EnumValueDescriptor> {
        self.values
            .iter()
            .find(|v| v.name == name)
            .map(|v| v as &'static dyn EnumValueDescriptor)
    }
    fn value_by_number(&self, number: i64) -> Option<&'static dyn EnumValueDescriptor> {
        self.values
            .iter()
            .find(|v| v.number == number)
            .map(|v| v as &'static dyn EnumValueDescriptor)
    }
}

static COLOR_VALUES: &[EnumValue] = &[
    EnumValue { name: "RED", number: 0 },
    EnumValue { name: "GREEN", number: 1 },
    EnumValue { name: "BLUE", number: 2 },
];

pub static COLOR: Enum = Enum {
    name: "Color",
    values: COLOR_VALUES,
};

// ---- NestedProto { value: string = 1; number: int32 = 2; } ----

#[derive(Default)]
pub struct NestedData {
    pub value: Option<String>,
    pub number: Option<i32>,
}

impl NestedData {
    fn make() -> Box<dyn Message> {
        Box::new(NestedData::default())
    }
}

static NESTED_FIELDS: &[Field] = &[
    Field {
        name: "value",
        camel: "value",
        number: 1,
        repeated: false,
        kind: Kind::Scalar(WireType::String),
        map_key: None,
        map_value: None,
    },
    Field {
        name: "number",
        camel: "number",
        number: 2,
        repeated: false,
        kind: Kind::Scalar(WireType::Int32),
        map_key: None,
        map_value: None,
    },
];

static NESTED_DESC: Msg = Msg {
    full_name: "fixtures.NestedProto",
    name: "NestedProto",
    fields: NESTED_FIELDS,
    make: NestedData::make,
};

impl Message for NestedData {
    fn descriptor(&self) -> &'static dyn MessageDescriptor {
        &NESTED_DESC
    }
    fn set_scalar(&mut self, field: &'static dyn FieldDescriptor, value: ScalarValue) {
        match (field.number(), value) {
            (1, ScalarValue::String(s)) => self.value = Some(s),
            (2, ScalarValue::I32(n)) => self.number = Some(n),
            _ => {}
        }
    }
    fn set_enum(&mut self, _field: &'static dyn FieldDescriptor, _value: i64) {}
    fn add_repeated_scalar(&mut self, _field: &'static dyn FieldDescriptor, _value: ScalarValue) {}
    fn add_repeated_enum(&mut self, _field: &'static dyn FieldDescriptor, _value: i64) {}
    fn mutable_message(&mut self, _field: &'static dyn FieldDescriptor) -> &mut dyn Message {
        unreachable!("NestedProto has no message fields")
    }
    fn add_message(&mut self, _field: &'static dyn FieldDescriptor) -> &mut dyn Message {
        unreachable!("NestedProto has no message fields")
    }
    fn insert_map_entry(
        &mut self,
        _field: &'static dyn FieldDescriptor,
        _key: MapKey,
        _value: MapValue,
    ) {
    }
}

// ---- FontProto { name: string = 1; } ----

#[derive(Default)]
pub struct FontData {
    pub name: Option<String>,
}

impl FontData {
    fn make() -> Box<dyn Message> {
        Box::new(FontData::default())
    }
}

static FONT_FIELDS: &[Field] = &[Field {
    name: "name",
    camel: "name",
    number: 1,
    repeated: false,
    kind: Kind::Scalar(WireType::String),
    map_key: None,
    map_value: None,
}];

static FONT_DESC: Msg = Msg {
    full_name: "google.fonts.FontProto",
    name: "FontProto",
    fields: FONT_FIELDS,
    make: FontData::make,
};

impl Message for FontData {
    fn descriptor(&self) -> &'static dyn MessageDescriptor {
        &FONT_DESC
    }
    fn set_scalar(&mut self, field: &'static dyn FieldDescriptor, value: ScalarValue) {
        if let (1, ScalarValue::String(s)) = (field.number(), value) {
            self.name = Some(s);
        }
    }
    fn set_enum(&mut self, _field: &'static dyn FieldDescriptor, _value: i64) {}
    fn add_repeated_scalar(&mut self, _field: &'static dyn FieldDescriptor, _value: ScalarValue) {}
    fn add_repeated_enum(&mut self, _field: &'static dyn FieldDescriptor, _value: i64) {}
    fn mutable_message(&mut self, _field: &'static dyn FieldDescriptor) -> &mut dyn Message {
        unreachable!("FontProto has no message fields")
    }
    fn add_message(&mut self, _field: &'static dyn FieldDescriptor) -> &mut dyn Message {
        unreachable!("FontProto has no message fields")
    }
    fn insert_map_entry(
        &mut self,
        _field: &'static dyn FieldDescriptor,
        _key: MapKey,
        _value: MapValue,
    ) {
    }
}

// ---- FamilyProto { name: string = 1; license: string = 2; repeated fonts: FontProto = 3; } ----

#[derive(Default)]
pub struct FamilyData {
    pub name: Option<String>,
    pub license: Option<String>,
    pub fonts: Vec<FontData>,
}

impl FamilyData {
    fn make() -> Box<dyn Message> {
        Box::new(FamilyData::default())
    }
}

static FAMILY_FIELDS: &[Field] = &[
    Field {
        name: "name",
        camel: "name",
        number: 1,
        repeated: false,
        kind: Kind::Scalar(WireType::String),
        map_key: None,
        map_value: None,
    },
    Field {
        name: "license",
        camel: "license",
        number: 2,
        repeated: false,
        kind: Kind::Scalar(WireType::String),
        map_key: None,
        map_value: None,
    },
    Field {
        name: "fonts",
        camel: "fonts",
        number: 3,
        repeated: true,
        kind: Kind::Message(&FONT_DESC),
        map_key: None,
        map_value: None,
    },
];

static FAMILY_DESC: Msg = Msg {
    full_name: "google.fonts.FamilyProto",
    name: "FamilyProto",
    fields: FAMILY_FIELDS,
    make: FamilyData::make,
};

impl Message for FamilyData {
    fn descriptor(&self) -> &'static dyn MessageDescriptor {
        &FAMILY_DESC
    }
    fn set_scalar(&mut self, field: &'static dyn FieldDescriptor, value: ScalarValue) {
        match (field.number(), value) {
            (1, ScalarValue::String(s)) => self.name = Some(s),
            (2, ScalarValue::String(s)) => self.license = Some(s),
            _ => {}
        }
    }
    fn set_enum(&mut self, _field: &'static dyn FieldDescriptor, _value: i64) {}
    fn add_repeated_scalar(&mut self, _field: &'static dyn FieldDescriptor, _value: ScalarValue) {}
    fn add_repeated_enum(&mut self, _field: &'static dyn FieldDescriptor, _value: i64) {}
    fn mutable_message(&mut self, _field: &'static dyn FieldDescriptor) -> &mut dyn Message {
        unreachable!("FamilyProto has no singular message fields")
    }
    fn add_message(&mut self, field: &'static dyn FieldDescriptor) -> &mut dyn Message {
        assert_eq!(field.number(), 3);
        self.fonts.push(FontData::default());
        self.fonts.last_mut().unwrap()
    }
    fn insert_map_entry(
        &mut self,
        _field: &'static dyn FieldDescriptor,
        _key: MapKey,
        _value: MapValue,
    ) {
    }
}

pub fn new_family() -> FamilyData {
    FamilyData::default()
}

// ---- TestMessage: one field of every shape the parser supports. ----

#[derive(Default)]
pub struct TestData {
    pub string_field: Option<String>,
    pub int32_field: Option<i32>,
    pub bool_field: Option<bool>,
    pub float_field: Option<f32>,
    pub nested_message: Option<Box<NestedData>>,
    pub repeated_nested: Vec<NestedData>,
    pub string_int_map: HashMap<String, i32>,
    pub color_field: Option<i64>,
    pub repeated_int: Vec<i32>,
}

impl TestData {
    fn make() -> Box<dyn Message> {
        Box::new(TestData::default())
    }
}

static TEST_FIELDS: &[Field] = &[
    Field {
        name: "string_field",
        camel: "stringField",
        number: 1,
        repeated: false,
        kind: Kind::Scalar(WireType::String),
        map_key: None,
        map_value: None,
    },
    Field {
        name: "int32_field",
        camel: "int32Field",
        number: 2,
        repeated: false,
        kind: Kind::Scalar(WireType::Int32),
        map_key: None,
        map_value: None,
    },
    Field {
        name: "bool_field",
        camel: "boolField",
        number: 3,
        repeated: false,
        kind: Kind::Scalar(WireType::Bool),
        map_key: None,
        map_value: None,
    },
    Field {
        name: "float_field",
        camel: "floatField",
        number: 4,
        repeated: false,
        kind: Kind::Scalar(WireType::Float),
        map_key: None,
        map_value: None,
    },
    Field {
        name: "nested_message",
        camel: "nestedMessage",
        number: 5,
        repeated: false,
        kind: Kind::Message(&NESTED_DESC),
        map_key: None,
        map_value: None,
    },
    Field {
        name: "repeated_nested",
        camel: "repeatedNested",
        number: 6,
        repeated: true,
        kind: Kind::Message(&NESTED_DESC),
        map_key: None,
        map_value: None,
    },
    Field {
        name: "string_int_map",
        camel: "stringIntMap",
        number: 7,
        repeated: false,
        kind: Kind::Scalar(WireType::String),
        map_key: Some(WireType::String),
        map_value: Some(Kind::Scalar(WireType::Int32)),
    },
    Field {
        name: "color_field",
        camel: "colorField",
        number: 8,
        repeated: false,
        kind: Kind::Enum(&COLOR),
        map_key: None,
        map_value: None,
    },
    Field {
        name: "repeated_int",
        camel: "repeatedInt",
        number: 9,
        repeated: true,
        kind: Kind::Scalar(WireType::Int32),
        map_key: None,
        map_value: None,
    },
];

static TEST_DESC: Msg = Msg {
    full_name: "fixtures.TestMessage",
    name: "TestMessage",
    fields: TEST_FIELDS,
    make: TestData::make,
};

impl Message for TestData {
    fn descriptor(&self) -> &'static dyn MessageDescriptor {
        &TEST_DESC
    }

    fn set_scalar(&mut self, field: &'static dyn FieldDescriptor, value: ScalarValue) {
        match (field.number(), value) {
            (1, ScalarValue::String(s)) => self.string_field = Some(s),
            (2, ScalarValue::I32(n)) => self.int32_field = Some(n),
            (3, ScalarValue::Bool(b)) => self.bool_field = Some(b),
            (4, ScalarValue::F32(f)) => self.float_field = Some(f),
            _ => {}
        }
    }

    fn set_enum(&mut self, field: &'static dyn FieldDescriptor, value: i64) {
        if field.number() == 8 {
            self.color_field = Some(value);
        }
    }

    fn add_repeated_scalar(&mut self, field: &'static dyn FieldDescriptor, value: ScalarValue) {
        if let (9, ScalarValue::I32(n)) = (field.number(), value) {
            self.repeated_int.push(n);
        }
    }

    fn add_repeated_enum(&mut self, _field: &'static dyn FieldDescriptor, _value: i64) {}

    fn mutable_message(&mut self, field: &'static dyn FieldDescriptor) -> &mut dyn Message {
        assert_eq!(field.number(), 5);
        self.nested_message
            .get_or_insert_with(Box::default)
            .as_mut()
    }

    fn add_message(&mut self, field: &'static dyn FieldDescriptor) -> &mut dyn Message {
        assert_eq!(field.number(), 6);
        self.repeated_nested.push(NestedData::default());
        self.repeated_nested.last_mut().unwrap()
    }

    fn insert_map_entry(&mut self, field: &'static dyn FieldDescriptor, key: MapKey, value: MapValue) {
        if field.number() != 7 {
            return;
        }
        if let (MapKey::String(k), MapValue::Scalar(ScalarValue::I32(v))) = (key, value) {
            self.string_int_map.insert(k, v);
        }
    }
}

pub fn new_test_message() -> TestData {
    TestData::default()
}
