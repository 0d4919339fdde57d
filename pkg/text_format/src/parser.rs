use crate::descriptor::{
    DescriptorPool, FieldDescriptor, FieldType, MessageDescriptor, ScalarValue, WireType,
};
use crate::error::{ParseError, Result};
use crate::literal;
use crate::message::{MapKey, MapValue, Message};
use crate::tokenizer::Tokenizer;

/// Knobs recognised by `merge_field` (§4.3's options table).
pub struct ParserOptions<'a> {
    /// Unknown `[a.b.c]`-named fields are skipped instead of raising.
    pub allow_unknown_extension: bool,
    /// A bare integer field name looks up the field by numeric tag.
    pub allow_field_number: bool,
    /// Unknown field names have their contents skipped instead of raising.
    pub allow_unknown_field: bool,
    /// External registry used to resolve extension names.
    pub descriptor_pool: Option<&'a dyn DescriptorPool>,
}

impl<'a> Default for ParserOptions<'a> {
    fn default() -> Self {
        Self {
            allow_unknown_extension: false,
            allow_field_number: false,
            allow_unknown_field: false,
            descriptor_pool: None,
        }
    }
}

/// Parses `text` against `message`'s schema, mutating `message` in place and
/// returning it. The first error terminates parsing; whatever was already
/// written to `message` before the error stays (merge semantics, not
/// transactional).
pub fn parse<M: Message>(text: &str, mut message: M, options: &ParserOptions) -> Result<M> {
    let mut t = Tokenizer::new(text);
    while !t.at_end() {
        merge_field(&mut t, &mut message, options)?;
    }
    Ok(message)
}

/// One field: resolve its name, then dispatch on its shape, then consume an
/// optional trailing separator. Recurses into sub-message bodies.
fn merge_field(t: &mut Tokenizer, message: &mut dyn Message, options: &ParserOptions) -> Result<()> {
    let descriptor = message.descriptor();
    let field = resolve_field(t, descriptor, options)?;

    let field = match field {
        Some(f) => f,
        None => {
            skip_unknown_field(t)?;
            consume_unknown_separator(t);
            return Ok(());
        }
    };

    match field.field_type() {
        _ if field.is_map() => merge_map_field(t, message, field)?,
        FieldType::Message(_) => merge_message_field(t, message, field)?,
        FieldType::Enum(en) => merge_enum_field(t, message, field, en)?,
        FieldType::Scalar(wire) => merge_scalar_field(t, message, field, wire)?,
    }

    consume_known_separator(t);
    Ok(())
}

/// Implements §4.3's three-step field-name resolution. `Ok(None)` means the
/// name was well-formed but unknown, and the caller should skip its value
/// under `allow_unknown_field`.
fn resolve_field(
    t: &mut Tokenizer,
    descriptor: &'static dyn MessageDescriptor,
    options: &ParserOptions,
) -> Result<Option<&'static dyn FieldDescriptor>> {
    if t.try_consume("[") {
        return resolve_extension_field(t, descriptor, options);
    }

    let token = t.consume_identifier_or_number()?;

    if options.allow_field_number && token.chars().all(|c| c.is_ascii_digit()) {
        let number: i64 = token
            .parse()
            .map_err(|_| t.parse_error_previous_token(&format!("Couldn't parse integer: {}", token)))?;
        if let Some(f) = descriptor.field_by_number(number) {
            return Ok(Some(f));
        }
        return unknown_field_result(t, descriptor, &token, options);
    }

    let camel = common::snake_to_camel_case(&token);
    if let Some(f) = descriptor.field_by_camel_case_name(&camel) {
        return Ok(Some(f));
    }

    let lower = token.to_ascii_lowercase();
    if let Some(f) = descriptor.field_by_camel_case_name(&lower) {
        if let FieldType::Message(sub) = f.field_type() {
            if sub.name() == token {
                return Ok(Some(f));
            }
        }
        if let FieldType::Enum(en) = f.field_type() {
            if en.name() == token {
                return Ok(Some(f));
            }
        }
    }

    unknown_field_result(t, descriptor, &token, options)
}

fn unknown_field_result(
    t: &mut Tokenizer,
    descriptor: &'static dyn MessageDescriptor,
    token: &str,
    options: &ParserOptions,
) -> Result<Option<&'static dyn FieldDescriptor>> {
    if options.allow_unknown_field {
        Ok(None)
    } else {
        Err(t.parse_error_previous_token(&format!(
            "Message type \"{}\" has no field named \"{}\".",
            descriptor.full_name(),
            token
        )))
    }
}

fn resolve_extension_field(
    t: &mut Tokenizer,
    descriptor: &'static dyn MessageDescriptor,
    options: &ParserOptions,
) -> Result<Option<&'static dyn FieldDescriptor>> {
    let mut name = t.consume_identifier()?;
    while t.try_consume(".") {
        name.push('.');
        name.push_str(&t.consume_identifier()?);
    }
    t.consume("]")?;

    let pool = match options.descriptor_pool {
        Some(p) => p,
        None => {
            return if options.allow_unknown_extension {
                Ok(None)
            } else {
                Err(t.parse_error_previous_token(&format!("Extension \"{}\" not found.", name)))
            }
        }
    };

    match pool.find_extension(&name) {
        Some(ext) => {
            if ext.extendee.full_name() != descriptor.full_name() {
                return Err(t.parse_error_previous_token(&format!(
                    "Extension \"{}\" does not extend \"{}\".",
                    name,
                    descriptor.full_name()
                )));
            }
            Ok(Some(ext.field))
        }
        None => {
            if options.allow_unknown_extension {
                Ok(None)
            } else {
                Err(t.parse_error_previous_token(&format!("Extension \"{}\" not found.", name)))
            }
        }
    }
}

/// Separator after a resolved field: `,` only (§4.3).
fn consume_known_separator(t: &mut Tokenizer) {
    t.try_consume(",");
}

/// Separator while skipping an unrecognised field: `,` or `;` (§4.3).
fn consume_unknown_separator(t: &mut Tokenizer) {
    if !t.try_consume(",") {
        t.try_consume(";");
    }
}

/// Consumes and discards the value of a field the schema doesn't recognise:
/// either `: <scalar-or-list>` or a `{…}`/`<…>` body parsed recursively.
fn skip_unknown_field(t: &mut Tokenizer) -> Result<()> {
    if t.try_consume(":") {
        if t.try_consume("[") {
            if !t.looking_at("]") {
                loop {
                    skip_unknown_value(t)?;
                    if !t.try_consume(",") {
                        break;
                    }
                }
            }
            t.consume("]")?;
        } else {
            skip_unknown_value(t)?;
        }
        return Ok(());
    }

    skip_unknown_message_body(t)
}

fn skip_unknown_value(t: &mut Tokenizer) -> Result<()> {
    if t.looking_at("{") || t.looking_at("<") {
        return skip_unknown_message_body(t);
    }
    if t.try_consume_any_scalar() {
        return Ok(());
    }
    Err(t.parse_error("Expected value."))
}

fn skip_unknown_message_body(t: &mut Tokenizer) -> Result<()> {
    let close = if t.try_consume("{") {
        "}"
    } else if t.try_consume("<") {
        ">"
    } else {
        return Err(t.parse_error("Expected \"{\"."));
    };

    while !t.looking_at(close) {
        if t.at_end() {
            return Err(t.parse_error(&format!("Expected \"{}\"", close)));
        }
        if t.try_consume("[") {
            let mut name = t.consume_identifier()?;
            while t.try_consume(".") {
                name.push('.');
                name.push_str(&t.consume_identifier()?);
            }
            t.consume("]")?;
        } else {
            t.consume_identifier_or_number()?;
        }
        skip_unknown_field(t)?;
        consume_unknown_separator(t);
    }
    t.consume(close)?;
    Ok(())
}

/// Consumes the delimiter opening a message/map-entry body and returns the
/// matching close delimiter, erroring if neither `{` nor `<` is present.
fn consume_open_delimiter(t: &mut Tokenizer) -> Result<&'static str> {
    if t.try_consume("{") {
        Ok("}")
    } else if t.try_consume("<") {
        Ok(">")
    } else {
        Err(t.parse_error("Expected \"{\"."))
    }
}

fn merge_message_field(
    t: &mut Tokenizer,
    message: &mut dyn Message,
    field: &'static dyn FieldDescriptor,
) -> Result<()> {
    t.try_consume(":");

    if field.is_repeated() && t.try_consume("[") {
        if !t.looking_at("]") {
            loop {
                merge_one_message(t, message, field, true)?;
                if !t.try_consume(",") {
                    break;
                }
            }
        }
        t.consume("]")?;
        return Ok(());
    }

    merge_one_message(t, message, field, field.is_repeated())
}

fn merge_one_message(
    t: &mut Tokenizer,
    message: &mut dyn Message,
    field: &'static dyn FieldDescriptor,
    repeated: bool,
) -> Result<()> {
    let close = consume_open_delimiter(t)?;

    let target: &mut dyn Message = if repeated {
        message.add_message(field)
    } else {
        message.mutable_message(field)
    };

    while !t.looking_at(close) {
        if t.at_end() {
            return Err(t.parse_error(&format!("Expected \"{}\"", close)));
        }
        merge_field(t, target, &ParserOptions::default())?;
    }
    t.consume(close)?;
    Ok(())
}

fn merge_enum_field(
    t: &mut Tokenizer,
    message: &mut dyn Message,
    field: &'static dyn FieldDescriptor,
    en: &'static dyn crate::descriptor::EnumDescriptor,
) -> Result<()> {
    t.consume(":")?;

    if field.is_repeated() && t.try_consume("[") {
        if !t.looking_at("]") {
            loop {
                let v = parse_one_enum(t, en)?;
                message.add_repeated_enum(field, v);
                if !t.try_consume(",") {
                    break;
                }
            }
        }
        t.consume("]")?;
        return Ok(());
    }

    let v = parse_one_enum(t, en)?;
    if field.is_repeated() {
        message.add_repeated_enum(field, v);
    } else {
        message.set_enum(field, v);
    }
    Ok(())
}

fn parse_one_enum(t: &mut Tokenizer, en: &'static dyn crate::descriptor::EnumDescriptor) -> Result<i64> {
    if t.looking_at_number() {
        return t.consume_int64();
    }
    let name = t.consume_identifier()?;
    match en.value_by_name(&name) {
        Some(v) => Ok(v.number()),
        None => Err(ParseError::new(format!(
            "Enum type \"{}\" has no value named {}.",
            en.name(),
            name
        ))),
    }
}

fn merge_scalar_field(
    t: &mut Tokenizer,
    message: &mut dyn Message,
    field: &'static dyn FieldDescriptor,
    wire: WireType,
) -> Result<()> {
    t.consume(":")?;

    if field.is_repeated() && t.try_consume("[") {
        if !t.looking_at("]") {
            loop {
                let v = parse_one_scalar(t, wire)?;
                message.add_repeated_scalar(field, v);
                if !t.try_consume(",") {
                    break;
                }
            }
        }
        t.consume("]")?;
        return Ok(());
    }

    let v = parse_one_scalar(t, wire)?;
    if field.is_repeated() {
        message.add_repeated_scalar(field, v);
    } else {
        message.set_scalar(field, v);
    }
    Ok(())
}

fn parse_one_scalar(t: &mut Tokenizer, wire: WireType) -> Result<ScalarValue> {
    Ok(match wire {
        WireType::Double => ScalarValue::F64(t.consume_float()?),
        WireType::Float => ScalarValue::F32(t.consume_float()? as f32),
        WireType::Int32 | WireType::SInt32 | WireType::SFixed32 => ScalarValue::I32(t.consume_int32()?),
        WireType::UInt32 | WireType::Fixed32 => ScalarValue::U32(t.consume_uint32()?),
        WireType::Int64 | WireType::SInt64 | WireType::SFixed64 => ScalarValue::I64(t.consume_int64()?),
        WireType::UInt64 | WireType::Fixed64 => ScalarValue::U64(t.consume_uint64()?),
        WireType::Bool => ScalarValue::Bool(t.consume_bool()?),
        WireType::String => ScalarValue::String(t.consume_string()?),
        WireType::Bytes => ScalarValue::Bytes(t.consume_byte_string()?),
    })
}

fn merge_map_field(
    t: &mut Tokenizer,
    message: &mut dyn Message,
    field: &'static dyn FieldDescriptor,
) -> Result<()> {
    t.try_consume(":");

    if t.try_consume("[") {
        if !t.looking_at("]") {
            loop {
                merge_one_map_entry(t, message, field)?;
                if !t.try_consume(",") {
                    break;
                }
            }
        }
        t.consume("]")?;
        return Ok(());
    }

    merge_one_map_entry(t, message, field)
}

fn merge_one_map_entry(t: &mut Tokenizer, message: &mut dyn Message, field: &'static dyn FieldDescriptor) -> Result<()> {
    let close = consume_open_delimiter(t)?;

    let key_type = field
        .map_key_type()
        .ok_or_else(|| t.parse_error("Unexpected field in map entry: <missing key type>"))?;
    let value_type = field.map_value_type();

    let mut key: Option<MapKey> = None;
    let mut value: Option<MapValue> = None;

    while !t.looking_at(close) {
        if t.at_end() {
            return Err(t.parse_error(&format!("Expected \"{}\"", close)));
        }
        let name = t.consume_identifier()?;
        match name.as_str() {
            "key" => {
                t.consume(":")?;
                key = Some(parse_map_key(t, key_type)?);
            }
            "value" => {
                if matches!(value_type, Some(FieldType::Message(_))) {
                    t.try_consume(":");
                } else {
                    t.consume(":")?;
                }
                value = Some(parse_map_value(t, value_type)?);
            }
            other => {
                return Err(t.parse_error(&format!("Unexpected field in map entry: {}", other)));
            }
        }
        consume_known_separator(t);
    }
    t.consume(close)?;

    if let (Some(k), Some(v)) = (key, value) {
        message.insert_map_entry(field, k, v);
    }
    Ok(())
}

fn parse_map_key(t: &mut Tokenizer, key_type: WireType) -> Result<MapKey> {
    Ok(match key_type {
        WireType::Int32 | WireType::SInt32 | WireType::SFixed32 => MapKey::I32(t.consume_int32()?),
        WireType::UInt32 | WireType::Fixed32 => MapKey::U32(t.consume_uint32()?),
        WireType::Int64 | WireType::SInt64 | WireType::SFixed64 => MapKey::I64(t.consume_int64()?),
        WireType::UInt64 | WireType::Fixed64 => MapKey::U64(t.consume_uint64()?),
        WireType::Bool => MapKey::Bool(t.consume_bool()?),
        WireType::String => MapKey::String(t.consume_string()?),
        other => return Err(t.parse_error(&format!("Unknown scalar type: {:?}", other))),
    })
}

fn parse_map_value(t: &mut Tokenizer, value_type: Option<FieldType>) -> Result<MapValue> {
    match value_type {
        Some(FieldType::Message(sub)) => {
            let close = consume_open_delimiter(t)?;
            let mut inner = sub.new_instance();
            while !t.looking_at(close) {
                if t.at_end() {
                    return Err(t.parse_error(&format!("Expected \"{}\"", close)));
                }
                merge_field(t, inner.as_mut(), &ParserOptions::default())?;
            }
            t.consume(close)?;
            Ok(MapValue::Message(inner))
        }
        Some(FieldType::Enum(en)) => Ok(MapValue::Enum(parse_one_enum(t, en)?)),
        Some(FieldType::Scalar(wire)) => Ok(MapValue::Scalar(parse_one_scalar(t, wire)?)),
        None => Err(t.parse_error("Unexpected field in map entry: value")),
    }
}
