//! The type dispatcher, per-type decoders and the `render` entry point.
//!
//! Control flow: a tagged word is classified ([`crate::value::Value::classify`]); immediates
//! render directly, heap references get a one-read header descriptor
//! ([`crate::heap::HeapObject`]) and are dispatched on their type tag through a single
//! exhaustive match - the one source of truth for which tag implies which payload shape.
//! Container-like and numeric-composite types (rational, complex, regexp, the string behind
//! a symbol) recurse through the very same pipeline entry point; recursion depth is bounded
//! by the tag format itself (no type nests deeper than two), so there is no cycle guard and
//! none is needed.
//!
//! # Failure policy
//!
//! [`crate::inspect::Inspector::render`] never fails past the API. A failure reading the
//! top-level object header aborts that render into a single diagnostic line; a failure on
//! any other field renders an inline `<unreadable: …>` marker and the remaining fields
//! still contribute. Unrecognized type tags, encoding ordinals and sub-tags degrade to raw
//! renderings - forward compatibility with runtime builds this crate has never seen.

use crate::heap::flags::{self, ArrayFlags, BignumFlags};
use crate::heap::{string_view, HeapObject, RubyType};
use crate::report::Report;
use crate::target::{DumpSpec, Target};
use crate::value::{SpecialConsts, Value, ValueKind};
use crate::Result;

/// Decodes tagged words against an injected [`Target`] and renders them as text.
///
/// An `Inspector` owns no target state: every render is an independent, idempotent pass
/// over a paused process. The same instance can render any number of values.
///
/// # Examples
///
/// ```rust,ignore
/// use rbscope::{Inspector, SpecialConsts};
///
/// let inspector = Inspector::new(&my_lldb_target);
/// println!("{}", inspector.render(raw_word));
/// ```
pub struct Inspector<'a, T: Target> {
    target: &'a T,
    consts: SpecialConsts,
}

impl<'a, T: Target> Inspector<'a, T> {
    /// Creates an inspector over `target` with the default immediate-encoding table.
    pub fn new(target: &'a T) -> Self {
        Inspector {
            target,
            consts: SpecialConsts::default(),
        }
    }

    /// Creates an inspector with an explicit immediate-encoding table, for hosts that
    /// resolve the target build's constants.
    pub fn with_consts(target: &'a T, consts: SpecialConsts) -> Self {
        Inspector { target, consts }
    }

    /// Renders the tagged word `word` as human-readable text.
    ///
    /// Always returns text: internal failures are rendered as an inline diagnostic
    /// identifying the failing address and field.
    #[must_use]
    pub fn render(&self, word: u64) -> String {
        match self.try_render(Value::new(word)) {
            Ok(text) => text,
            Err(err) => format!("<decode failed: {err} (value={})>\n", Value::new(word)),
        }
    }

    /// Renders `value`, or returns the error that aborted the decode.
    ///
    /// # Errors
    /// Returns [`crate::Error::Inaccessible`] if the top-level object header cannot be
    /// read. Field-level failures below the header do not error; they render inline.
    pub fn try_render(&self, value: Value) -> Result<String> {
        let mut out = Report::new();
        self.inspect(&mut out, value)?;
        Ok(out.finish())
    }

    fn inspect(&self, out: &mut Report, value: Value) -> Result<()> {
        match value.classify(&self.consts) {
            ValueKind::False => out.line("false"),
            ValueKind::True => out.line("true"),
            ValueKind::Nil => out.line("nil"),
            ValueKind::Undef => out.line("undef"),
            ValueKind::Fixnum(n) => out.line(&n.to_string()),
            ValueKind::Flonum(raw) => match self.target.flonum_value(raw) {
                Ok(f) => out.line(&format!("{f:?}")),
                Err(err) => out.note_unreadable(&err),
            },
            ValueKind::StaticSymbol(raw) => self.static_symbol(out, raw),
            ValueKind::Immediate(raw) => out.line(&format!("immediate({raw:x})")),
            ValueKind::Heap(address) => self.inspect_heap(out, address)?,
        }
        Ok(())
    }

    fn static_symbol(&self, out: &mut Report, raw: u64) {
        if raw < 128 {
            out.line(&format!("T_SYMBOL: {}", raw as u8 as char));
        } else {
            out.line(&format!("T_SYMBOL: ({raw:x})"));
            let id = raw >> self.consts.special_shift;
            match self.target.symbol_name(id) {
                Some(name) => out.line(&name),
                None => out.line(&format!("(id {id:#x})")),
            }
        }
    }

    fn inspect_heap(&self, out: &mut Report, address: u64) -> Result<()> {
        let obj = HeapObject::read(self.target, address)?;

        let mut flaginfo = String::new();
        if obj.promoted() {
            flaginfo.push_str("[PROMOTED] ");
        }
        if obj.frozen() {
            flaginfo.push_str("[FROZEN] ");
        }

        let Some(tag) = obj.type_tag() else {
            self.not_handled(out, &obj);
            return Ok(());
        };

        match tag {
            RubyType::None | RubyType::Nil => {
                out.write(&format!("{tag}: {flaginfo}"));
                self.dump(out, DumpSpec::Struct {
                    type_name: "RBasic",
                    address,
                });
            }
            RubyType::Object => {
                out.write(&format!("T_OBJECT: {flaginfo}"));
                self.dump(out, DumpSpec::Struct {
                    type_name: "RObject",
                    address,
                });
            }
            RubyType::Class | RubyType::Module | RubyType::Iclass => {
                self.class_like(out, &obj, tag, &flaginfo);
            }
            RubyType::String => self.string(out, &obj, &flaginfo),
            RubyType::Symbol => self.symbol(out, &obj, &flaginfo),
            RubyType::Array => self.array(out, &obj, &flaginfo),
            RubyType::Hash => {
                out.write(&format!("T_HASH: {flaginfo}"));
                self.dump(out, DumpSpec::Struct {
                    type_name: "RHash",
                    address,
                });
            }
            RubyType::Bignum => self.bignum(out, &obj),
            RubyType::Float => self.float(out, &obj),
            RubyType::Rational => self.rational(out, &obj),
            RubyType::Complex => self.complex(out, &obj),
            RubyType::Regexp => self.regexp(out, &obj),
            RubyType::Data => self.data(out, &obj),
            RubyType::Node => self.node(out, &obj),
            RubyType::Imemo => self.imemo(out, &obj),
            RubyType::File => self.generic(out, &obj, "RFile"),
            RubyType::Moved => self.generic(out, &obj, "RMoved"),
            RubyType::Match => self.generic(out, &obj, "RMatch"),
            RubyType::Struct => self.generic(out, &obj, "RStruct"),
            RubyType::Zombie => self.generic(out, &obj, "RZombie"),
            RubyType::True | RubyType::False | RubyType::Fixnum | RubyType::Undef => {
                // Tags that mirror immediates never appear behind a heap reference in a
                // healthy process; render them like any unhandled tag.
                self.not_handled(out, &obj);
            }
        }
        Ok(())
    }

    fn string(&self, out: &mut Report, obj: &HeapObject, flaginfo: &str) {
        out.write(&format!("T_STRING: {flaginfo}"));

        let encidx = flags::encoding_index(obj.flags());
        match self.target.enum_name("ruby_preserved_encindex", encidx) {
            Some(name) => {
                let short = name.strip_prefix("RUBY_ENCINDEX_").unwrap_or(&name);
                out.write(&format!("[{short}] "));
            }
            None => out.write(&format!("[enc={encidx}] ")),
        }

        match string_view(self.target, obj.address()) {
            Ok(view) if view.len == 0 => out.line("(empty)"),
            Ok(view) => self.dump(out, DumpSpec::Bytes {
                address: view.ptr,
                len: view.len,
            }),
            Err(err) => out.note_unreadable(&err),
        }
    }

    fn symbol(&self, out: &mut Report, obj: &HeapObject, flaginfo: &str) {
        let address = obj.address();
        out.write(&format!("T_SYMBOL: {flaginfo}"));

        match self.target.read_field("RSymbol", address, "id") {
            Ok(id) => out.line(&format!("id={id:#x}")),
            Err(err) => {
                out.line("");
                out.note_unreadable(&err);
            }
        }
        match self.target.read_field("RSymbol", address, "fstr") {
            Ok(fstr) => self.output_string(out, fstr),
            Err(err) => out.note_unreadable(&err),
        }
    }

    fn array(&self, out: &mut Report, obj: &HeapObject, flaginfo: &str) {
        let address = obj.address();
        let aflags = ArrayFlags::from_flags(obj.flags());

        let len = match obj.array_len(self.target) {
            Ok(len) => len,
            Err(err) => {
                out.line(&format!("T_ARRAY: {flaginfo}"));
                out.note_unreadable(&err);
                return;
            }
        };
        out.write(&format!("T_ARRAY: {flaginfo}len={len}"));

        // Storage mode: embed wins over shared, anything else owns its buffer.
        if aflags.contains(ArrayFlags::EMBED) {
            out.write(" (embed)");
        } else if aflags.contains(ArrayFlags::SHARED) {
            match self.target.read_field("RArray", address, "as.heap.aux.shared") {
                Ok(shared) => out.write(&format!(" (shared) shared={shared:016x}")),
                Err(_) => out.write(" (shared)"),
            }
        } else {
            match self.target.read_field("RArray", address, "as.heap.aux.capa") {
                Ok(capa) => out.write(&format!(" (ownership) capa={}", capa as i64)),
                Err(_) => out.write(" (ownership)"),
            }
        }

        if len == 0 {
            out.line(" {(empty)}");
            return;
        }
        out.line("");

        // The dump strategy branches on the resolved pointer value, not the storage
        // flags: a null heap pointer means the elements still sit in the inline array.
        match obj.array_ptr(self.target) {
            Ok(0) => self.dump(out, DumpSpec::InlineWords {
                type_name: "RArray",
                address,
                field: "as.ary",
            }),
            Ok(ptr) => self.dump(out, DumpSpec::Words {
                address: ptr,
                count: len,
            }),
            Err(err) => out.note_unreadable(&err),
        }
    }

    fn bignum(&self, out: &mut Report, obj: &HeapObject) {
        let address = obj.address();
        let bflags = BignumFlags::from_flags(obj.flags());
        let sign = if bflags.contains(BignumFlags::POSITIVE) {
            '+'
        } else {
            '-'
        };

        let len = match obj.bignum_digit_count(self.target) {
            Ok(len) => len,
            Err(err) => {
                out.line(&format!("T_BIGNUM: sign={sign}"));
                out.note_unreadable(&err);
                return;
            }
        };

        if bflags.contains(BignumFlags::EMBED) {
            out.line(&format!("T_BIGNUM: sign={sign} len={len} (embed)"));
            self.dump(out, DumpSpec::InlineWords {
                type_name: "RBignum",
                address,
                field: "as.ary",
            });
        } else {
            out.line(&format!("T_BIGNUM: sign={sign} len={len}"));
            self.dump(out, DumpSpec::Struct {
                type_name: "RBignum",
                address,
            });
            match self.target.read_field("RBignum", address, "as.heap.digits") {
                Ok(digits) => self.dump(out, DumpSpec::Digits {
                    address: digits,
                    count: len,
                }),
                Err(err) => out.note_unreadable(&err),
            }
        }
    }

    fn float(&self, out: &mut Report, obj: &HeapObject) {
        match self
            .target
            .read_field_f64("RFloat", obj.address(), "float_value")
        {
            Ok(f) => out.line(&format!("{f:?}")),
            Err(err) => out.note_unreadable(&err),
        }
    }

    fn rational(&self, out: &mut Report, obj: &HeapObject) {
        let num = self.nested(obj.address(), "RRational", "num");
        let den = self.nested(obj.address(), "RRational", "den");
        out.line(&format!("(Rational) {num} / {den}"));
    }

    fn complex(&self, out: &mut Report, obj: &HeapObject) {
        let real = self.nested(obj.address(), "RComplex", "real");
        let imag = self.nested(obj.address(), "RComplex", "imag");
        let imag = if imag.starts_with('-') {
            imag
        } else {
            format!("+{imag}")
        };
        out.line(&format!("(Complex) {real}{imag}i"));
    }

    fn regexp(&self, out: &mut Report, obj: &HeapObject) {
        out.line("(Regex) ->src {");
        match self.target.read_field("RRegexp", obj.address(), "src") {
            Ok(src) => out.append_dump(&self.render(src)),
            Err(err) => out.note_unreadable(&err),
        }
        out.line("}");
    }

    fn class_like(&self, out: &mut Report, obj: &HeapObject, tag: RubyType, flaginfo: &str) {
        let address = obj.address();
        out.write(&format!("{tag}: {flaginfo}"));
        self.dump(out, DumpSpec::Struct {
            type_name: "RClass",
            address,
        });

        // Some builds drop the classext pointer field and inline the extension data
        // immediately after RClass; known to hold only for those builds.
        if self.target.read_field("RClass", address, "ptr").is_err() {
            match self.target.type_size("RClass") {
                Ok(size) => self.dump(out, DumpSpec::Struct {
                    type_name: "rb_classext_struct",
                    address: address + size,
                }),
                Err(err) => out.note_unreadable(&err),
            }
        }
    }

    fn data(&self, out: &mut Report, obj: &HeapObject) {
        let address = obj.address();
        match self.target.read_field("RTypedData", address, "typed_flag") {
            Ok(1) => {
                match self
                    .target
                    .read_field("RTypedData", address, "type->wrap_struct_name")
                    .and_then(|ptr| self.target.dump_raw(&DumpSpec::CString { address: ptr }))
                {
                    Ok(name) => out.line(&format!("T_DATA: {}", name.trim_end())),
                    Err(err) => {
                        out.line("T_DATA:");
                        out.note_unreadable(&err);
                    }
                }
                self.dump(out, DumpSpec::Struct {
                    type_name: "RTypedData",
                    address,
                });
            }
            Ok(_) => {
                out.line("T_DATA:");
                self.dump(out, DumpSpec::Struct {
                    type_name: "RData",
                    address,
                });
            }
            Err(err) => {
                out.line("T_DATA:");
                out.note_unreadable(&err);
                self.dump(out, DumpSpec::Struct {
                    type_name: "RData",
                    address,
                });
            }
        }
    }

    fn node(&self, out: &mut Report, obj: &HeapObject) {
        let subtype = flags::node_subtype(obj.flags());
        match self.target.enum_name("node_type", subtype) {
            Some(name) => out.line(&format!("{name} ({subtype})")),
            None => out.line(&format!("node_type {subtype}")),
        }
        self.dump(out, DumpSpec::Struct {
            type_name: "RNode",
            address: obj.address(),
        });
    }

    fn imemo(&self, out: &mut Report, obj: &HeapObject) {
        out.line("T_IMEMO: ");
        let subtype = flags::imemo_subtype(obj.flags());
        match self.target.enum_name("imemo_type", subtype) {
            Some(name) => out.line(&format!("{name} ({subtype})")),
            None => out.line(&format!("imemo_type {subtype}")),
        }
        self.dump(out, DumpSpec::Struct {
            type_name: "MEMO",
            address: obj.address(),
        });
    }

    fn generic(&self, out: &mut Report, obj: &HeapObject, type_name: &str) {
        self.dump(out, DumpSpec::Struct {
            type_name,
            address: obj.address(),
        });
    }

    fn not_handled(&self, out: &mut Report, obj: &HeapObject) {
        out.line(&format!("Not-handled type {:#04x}", obj.type_raw()));
        out.line(&Value::new(obj.address()).to_string());
    }

    /// Renders one nested tagged value through the top-level pipeline, trimmed for
    /// composition; a failed field read becomes an inline marker in the composed text.
    fn nested(&self, address: u64, type_name: &'static str, field: &'static str) -> String {
        match self.target.read_field(type_name, address, field) {
            Ok(word) => self.render(word).trim_end().to_string(),
            Err(err) => format!("<unreadable: {err}>"),
        }
    }

    /// Shared byte-dump path for string payloads resolved via [`string_view`].
    fn output_string(&self, out: &mut Report, address: u64) {
        match string_view(self.target, address) {
            Ok(view) => self.dump(out, DumpSpec::Bytes {
                address: view.ptr,
                len: view.len,
            }),
            Err(err) => out.note_unreadable(&err),
        }
    }

    fn dump(&self, out: &mut Report, spec: DumpSpec<'_>) {
        match self.target.dump_raw(&spec) {
            Ok(text) => out.append_dump(&text),
            Err(err) => out.note_unreadable(&err),
        }
    }
}
