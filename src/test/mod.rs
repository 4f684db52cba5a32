//! Shared functionality which is used in unit-tests: a synthetic in-memory target.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::target::{DumpSpec, Target};
use crate::{Error, Result};

type FieldKey = (String, u64, String);

/// A synthetic [`Target`] backed by plain maps.
///
/// Anything not registered through the builder methods fails the way a real host fails
/// (`Inaccessible`/`UnknownLayout`/`Host`), which is exactly what the failure-path tests
/// need. Raw dumps return a stable canned form (`<struct RObject 0x1000>`, `<bytes 0x9000
/// len=11>`, ...) and every dump request is logged so tests can assert which dump strategy
/// a decoder picked - or that none was requested at all.
pub struct FakeTarget {
    fields: HashMap<FieldKey, u64>,
    addresses: HashMap<FieldKey, u64>,
    floats: HashMap<FieldKey, f64>,
    sizes: HashMap<String, u64>,
    enums: HashMap<(String, u64), String>,
    symbols: HashMap<u64, String>,
    flonums: HashMap<u64, f64>,
    cstrings: HashMap<u64, String>,
    dumps: RefCell<Vec<String>>,
}

impl FakeTarget {
    pub fn new() -> Self {
        FakeTarget {
            fields: HashMap::new(),
            addresses: HashMap::new(),
            floats: HashMap::new(),
            sizes: HashMap::new(),
            enums: HashMap::new(),
            symbols: HashMap::new(),
            flonums: HashMap::new(),
            cstrings: HashMap::new(),
            dumps: RefCell::new(Vec::new()),
        }
    }

    /// Registers a heap object header: an `RBasic.flags` read at `address`.
    pub fn object(self, address: u64, flags: u64) -> Self {
        self.field("RBasic", address, "flags", flags)
    }

    /// Registers a field value read.
    pub fn field(mut self, type_name: &str, address: u64, path: &str, value: u64) -> Self {
        self.fields
            .insert((type_name.into(), address, path.into()), value);
        self
    }

    /// Registers a field location.
    pub fn address_of(mut self, type_name: &str, address: u64, path: &str, location: u64) -> Self {
        self.addresses
            .insert((type_name.into(), address, path.into()), location);
        self
    }

    /// Registers a float field read.
    pub fn float_field(mut self, type_name: &str, address: u64, path: &str, value: f64) -> Self {
        self.floats
            .insert((type_name.into(), address, path.into()), value);
        self
    }

    /// Registers a structure byte size.
    pub fn size(mut self, type_name: &str, size: u64) -> Self {
        self.sizes.insert(type_name.into(), size);
        self
    }

    /// Registers an enum member name.
    pub fn enum_member(mut self, enum_name: &str, ordinal: u64, member: &str) -> Self {
        self.enums
            .insert((enum_name.into(), ordinal), member.into());
        self
    }

    /// Registers a symbol-table entry.
    pub fn symbol(mut self, id: u64, name: &str) -> Self {
        self.symbols.insert(id, name.into());
        self
    }

    /// Registers a flonum conversion result.
    pub fn flonum(mut self, raw: u64, value: f64) -> Self {
        self.flonums.insert(raw, value);
        self
    }

    /// Registers a C string in target memory.
    pub fn cstring(mut self, address: u64, text: &str) -> Self {
        self.cstrings.insert(address, text.into());
        self
    }

    /// The canned text of every dump requested so far, in request order.
    pub fn dump_log(&self) -> Vec<String> {
        self.dumps.borrow().clone()
    }

    fn inaccessible(type_name: &str, address: u64, field: &str) -> Error {
        Error::Inaccessible {
            type_name: type_name.into(),
            field: field.into(),
            address,
        }
    }
}

impl Default for FakeTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl Target for FakeTarget {
    fn read_field(&self, type_name: &str, address: u64, field: &str) -> Result<u64> {
        self.fields
            .get(&(type_name.into(), address, field.into()))
            .copied()
            .ok_or_else(|| Self::inaccessible(type_name, address, field))
    }

    fn field_address(&self, type_name: &str, address: u64, field: &str) -> Result<u64> {
        self.addresses
            .get(&(type_name.into(), address, field.into()))
            .copied()
            .ok_or_else(|| Self::inaccessible(type_name, address, field))
    }

    fn read_field_f64(&self, type_name: &str, address: u64, field: &str) -> Result<f64> {
        self.floats
            .get(&(type_name.into(), address, field.into()))
            .copied()
            .ok_or_else(|| Self::inaccessible(type_name, address, field))
    }

    fn type_size(&self, type_name: &str) -> Result<u64> {
        self.sizes
            .get(type_name)
            .copied()
            .ok_or_else(|| Error::UnknownLayout(type_name.into()))
    }

    fn enum_name(&self, enum_name: &str, ordinal: u64) -> Option<String> {
        self.enums.get(&(enum_name.into(), ordinal)).cloned()
    }

    fn symbol_name(&self, id: u64) -> Option<String> {
        self.symbols.get(&id).cloned()
    }

    fn flonum_value(&self, raw: u64) -> Result<f64> {
        self.flonums
            .get(&raw)
            .copied()
            .ok_or_else(|| Error::Host(format!("no float decode for {raw:#x}")))
    }

    fn dump_raw(&self, spec: &DumpSpec<'_>) -> Result<String> {
        let text = match spec {
            DumpSpec::Struct { type_name, address } => {
                format!("<struct {type_name} {address:#x}>")
            }
            DumpSpec::Bytes { address, len } => format!("<bytes {address:#x} len={len}>"),
            DumpSpec::Words { address, count } => format!("<words {address:#x} count={count}>"),
            DumpSpec::Digits { address, count } => {
                format!("<digits {address:#x} count={count}>")
            }
            DumpSpec::InlineWords {
                type_name,
                address,
                field,
            } => format!("<inline {type_name}.{field} {address:#x}>"),
            DumpSpec::CString { address } => match self.cstrings.get(address) {
                Some(text) => text.clone(),
                None => return Err(Error::Host(format!("no string at {address:#x}"))),
            },
        };
        self.dumps.borrow_mut().push(text.clone());
        Ok(text)
    }
}
