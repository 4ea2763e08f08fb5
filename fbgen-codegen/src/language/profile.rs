//! Backend profiles.
//!
//! A [`BackendProfile`] is the single description of how one backend spells
//! things. Emitters read it; nothing else decides which backend is active.

use fbgen_schema::Scalar;

use crate::builder::Visibility;

/// Doc comment markers.
#[derive(Debug, Clone, Copy)]
pub struct DocStyle {
    pub start: Option<&'static str>,
    pub line: &'static str,
    pub end: Option<&'static str>,
}

/// Namespace or package declaration.
#[derive(Debug, Clone, Copy)]
pub struct NamespaceStyle {
    pub keyword: &'static str,
    /// Text after the name on the declaration line.
    pub terminator: &'static str,
    /// Line opening the namespace body, if any.
    pub open: Option<&'static str>,
    /// Line closing the namespace body, if any.
    pub close: Option<&'static str>,
}

/// Names of the special floating point constants.
#[derive(Debug, Clone, Copy)]
pub struct FloatSpelling {
    pub double_class: &'static str,
    pub float_class: &'static str,
    pub nan: &'static str,
    pub positive_infinity: &'static str,
    pub negative_infinity: &'static str,
}

/// Types used for offsets handed to builder methods.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceNames {
    pub string_offset: &'static str,
    pub vector_offset: &'static str,
    /// Accessor type a union payload is read into.
    pub union_table: &'static str,
}

/// Read an unsigned scalar into a wider signed type.
#[derive(Debug, Clone, Copy)]
pub struct Widening {
    pub from: Scalar,
    pub to: Scalar,
    /// Mask literal clearing the sign-extended bits after a read.
    pub mask: &'static str,
    /// Cast narrowing a destination value back before it is stored.
    pub narrow: &'static str,
    /// Cast applied to the raw read before masking.
    pub read_cast: &'static str,
}

/// How two key values are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparatorStyle {
    /// `a > b ? 1 : a < b ? -1 : 0`
    Ternary,
    /// `a.CompareTo(b)`
    CompareTo,
}

/// Where the key comparator lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySort {
    /// Override of the runtime's `keysCompare`, sorted by the runtime.
    Override,
    /// Static `KeysCompare` used by a generated sort.
    Static,
}

/// Raw byte access generated for strings and scalar vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteAccess {
    /// `<name>AsByteBuffer()` and `<name>InByteBuffer(ByteBuffer)`.
    ByteBuffer,
    /// `Get<Name>Bytes()` as `Span<byte>` or `ArraySegment<byte>?`, plus
    /// `Get<Name>Array()`.
    SpanOrSegment,
}

/// Features that only some backends offer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Capabilities {
    /// Enums are native enum types rather than integer constants.
    pub native_enums: bool,
    /// Read-only properties instead of no-argument getters.
    pub properties: bool,
    /// Getters take a reusable accessor object.
    pub object_reuse: bool,
    /// Offsets are typed (`Offset<T>`, `StringOffset`) and unwrapped with `.Value`.
    pub generic_offsets: bool,
    /// Accessors are value types wrapping a private runtime member.
    pub value_type_accessors: bool,
    /// Union accessors are generic over the payload type.
    pub generic_unions: bool,
    /// Parameters may carry default values.
    pub default_params: bool,
    /// `create<T>` accepts inline struct fields.
    pub inline_struct_create: bool,
    pub deep_clone: bool,
    /// Typed union wrappers next to union enums.
    pub union_helpers: bool,
    /// Typed vector wrappers and read-only collection accessors.
    pub collection_wrappers: bool,
    /// Block-copy vector constructors for non-enum scalars.
    pub block_copy: bool,
    /// Enum files carry the include preamble.
    pub enum_includes: bool,
    /// Scalar defaults in conditional reads are cast to the field type.
    pub typed_defaults: bool,
    /// Integer literals passed for narrow parameters need an explicit cast.
    pub narrow_literals: bool,
    pub open_brace_newline: bool,
}

/// Everything that differs, lexically, between backends.
#[derive(Debug, Clone, Copy)]
pub struct BackendProfile {
    pub name: &'static str,
    pub file_extension: &'static str,
    /// Whether method names start with an upper case letter.
    pub first_camel_upper: bool,
    pub string_type: &'static str,
    pub bool_type: &'static str,
    pub doc: DocStyle,
    pub namespace: NamespaceStyle,
    /// Generated-code warning at the top of each file.
    pub header: &'static [&'static str],
    pub includes: &'static [&'static str],
    pub nullable_import: Option<&'static str>,
    pub nullable_annotation: Option<&'static str>,
    pub class_annotation: Option<&'static str>,
    pub generated_annotation: Option<&'static str>,
    /// Line closing a type declaration.
    pub type_close: &'static str,
    /// Modifier making a field immutable.
    pub final_keyword: &'static str,
    /// Prefix of runtime members reached through the accessor (`__p.`).
    pub accessor_prefix: &'static str,
    /// Prefix of static runtime helpers (`Table.`).
    pub static_prefix: &'static str,
    /// Suffix marking nullable value types (`?`).
    pub optional_suffix: &'static str,
    pub bb_position: &'static str,
    pub bb_length: &'static str,
    pub builder_offset: &'static str,
    /// Statement run on the buffer before reading the root offset.
    pub byte_order_preamble: Option<&'static str>,
    pub constants_class: &'static str,
    /// Visibility of types marked `private` in the schema.
    pub private_visibility: Visibility,
    pub floats: FloatSpelling,
    pub scalar_keyword: fn(Scalar) -> &'static str,
    pub refs: ReferenceNames,
    pub widening: &'static [Widening],
    pub has_unsigned_64: bool,
    pub long_suffix: &'static str,
    /// Expression encoding the `key` parameter as UTF-8 bytes.
    pub utf8_key: &'static str,
    /// Buffer the key comparator reads from.
    pub key_buffer: &'static str,
    /// Element count of a parameter list (`length`, `Count`).
    pub count_member: &'static str,
    /// Length of a native array (`length`, `Length`).
    pub array_length_member: &'static str,
    pub comparator: ComparatorStyle,
    pub key_sort: KeySort,
    pub byte_access: ByteAccess,
    pub caps: Capabilities,
}

impl BackendProfile {
    pub fn keyword(&self, scalar: Scalar) -> &'static str {
        (self.scalar_keyword)(scalar)
    }

    pub fn widening_for(&self, scalar: Scalar) -> Option<&Widening> {
        self.widening.iter().find(|w| w.from == scalar)
    }

    /// Spell a runtime method name in the backend's leading case.
    pub fn method_name(&self, name: &str) -> String {
        if self.first_camel_upper {
            fbgen_core::to_upper_first(name)
        } else {
            name.to_string()
        }
    }

    /// Visibility of a declaration given its `private` attribute.
    pub fn visibility(&self, private: bool) -> Visibility {
        if private {
            self.private_visibility
        } else {
            Visibility::Public
        }
    }
}
