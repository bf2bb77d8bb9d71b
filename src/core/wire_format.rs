//! Cursor-style primitives shared by the frame codecs.
//!
//! All integers are big-endian. Strings carry a 16-bit length prefix and
//! payload blobs a 32-bit length prefix.

use alloc::{string::String, vec::Vec};
use core::convert::TryInto;

use crate::core::wire_error::WireError;

pub(crate) fn write_u8(buffer: &mut Vec<u8>, value: u8) {
  buffer.push(value);
}

pub(crate) fn read_u8(bytes: &[u8], cursor: &mut usize) -> Result<u8, WireError> {
  if bytes.len() <= *cursor {
    return Err(WireError::Truncated);
  }
  let value = bytes[*cursor];
  *cursor += 1;
  Ok(value)
}

pub(crate) fn write_u16(buffer: &mut Vec<u8>, value: u16) {
  buffer.extend_from_slice(&value.to_be_bytes());
}

pub(crate) fn read_u16(bytes: &[u8], cursor: &mut usize) -> Result<u16, WireError> {
  if bytes.len() < *cursor + 2 {
    return Err(WireError::Truncated);
  }
  let value = u16::from_be_bytes(bytes[*cursor..*cursor + 2].try_into().map_err(|_| WireError::Truncated)?);
  *cursor += 2;
  Ok(value)
}

pub(crate) fn write_u32(buffer: &mut Vec<u8>, value: u32) {
  buffer.extend_from_slice(&value.to_be_bytes());
}

pub(crate) fn read_u32(bytes: &[u8], cursor: &mut usize) -> Result<u32, WireError> {
  if bytes.len() < *cursor + 4 {
    return Err(WireError::Truncated);
  }
  let value = u32::from_be_bytes(bytes[*cursor..*cursor + 4].try_into().map_err(|_| WireError::Truncated)?);
  *cursor += 4;
  Ok(value)
}

pub(crate) fn write_bool(buffer: &mut Vec<u8>, value: bool) {
  buffer.push(u8::from(value));
}

pub(crate) fn read_bool(bytes: &[u8], cursor: &mut usize) -> Result<bool, WireError> {
  match read_u8(bytes, cursor)? {
    | 0 => Ok(false),
    | 1 => Ok(true),
    | _ => Err(WireError::Truncated),
  }
}

pub(crate) fn write_str(buffer: &mut Vec<u8>, value: &str) {
  let bytes = value.as_bytes();
  write_u16(buffer, bytes.len() as u16);
  buffer.extend_from_slice(bytes);
}

pub(crate) fn read_str(bytes: &[u8], cursor: &mut usize) -> Result<String, WireError> {
  let len = read_u16(bytes, cursor)? as usize;
  if bytes.len() < *cursor + len {
    return Err(WireError::Truncated);
  }
  let slice = &bytes[*cursor..*cursor + len];
  *cursor += len;
  Ok(String::from_utf8(slice.to_vec())?)
}

pub(crate) fn read_nonempty_str(bytes: &[u8], cursor: &mut usize, field: &'static str) -> Result<String, WireError> {
  let value = read_str(bytes, cursor)?;
  if value.is_empty() {
    return Err(WireError::EmptyField(field));
  }
  Ok(value)
}

pub(crate) fn write_payload(buffer: &mut Vec<u8>, payload: &[u8]) {
  write_u32(buffer, payload.len() as u32);
  buffer.extend_from_slice(payload);
}

pub(crate) fn read_payload(bytes: &[u8], cursor: &mut usize) -> Result<Vec<u8>, WireError> {
  let len = read_u32(bytes, cursor)? as usize;
  if bytes.len() < *cursor + len {
    return Err(WireError::Truncated);
  }
  let payload = bytes[*cursor..*cursor + len].to_vec();
  *cursor += len;
  Ok(payload)
}
