//! Built-in backend profiles.

use fbgen_schema::Scalar;

use super::profile::{
    BackendProfile, ByteAccess, Capabilities, ComparatorStyle, DocStyle, FloatSpelling, KeySort,
    NamespaceStyle, ReferenceNames, Widening,
};
use crate::builder::Visibility;

fn java_keyword(scalar: Scalar) -> &'static str {
    match scalar {
        Scalar::Bool => "boolean",
        Scalar::Byte | Scalar::UByte | Scalar::UType => "byte",
        Scalar::Short | Scalar::UShort => "short",
        Scalar::Int | Scalar::UInt => "int",
        Scalar::Long | Scalar::ULong => "long",
        Scalar::Float => "float",
        Scalar::Double => "double",
    }
}

fn csharp_keyword(scalar: Scalar) -> &'static str {
    match scalar {
        Scalar::Bool => "bool",
        Scalar::Byte => "sbyte",
        Scalar::UByte | Scalar::UType => "byte",
        Scalar::Short => "short",
        Scalar::UShort => "ushort",
        Scalar::Int => "int",
        Scalar::UInt => "uint",
        Scalar::Long => "long",
        Scalar::ULong => "ulong",
        Scalar::Float => "float",
        Scalar::Double => "double",
    }
}

const JAVA_WIDENING: &[Widening] = &[
    Widening {
        from: Scalar::UByte,
        to: Scalar::Int,
        mask: "0xFF",
        narrow: "byte",
        read_cast: "",
    },
    Widening {
        from: Scalar::UShort,
        to: Scalar::Int,
        mask: "0xFFFF",
        narrow: "short",
        read_cast: "",
    },
    Widening {
        from: Scalar::UInt,
        to: Scalar::Long,
        mask: "0xFFFFFFFFL",
        narrow: "int",
        read_cast: "long",
    },
];

pub const JAVA: BackendProfile = BackendProfile {
    name: "java",
    file_extension: "java",
    first_camel_upper: false,
    string_type: "String",
    bool_type: "boolean",
    doc: DocStyle {
        start: Some("/**"),
        line: " *",
        end: Some(" */"),
    },
    namespace: NamespaceStyle {
        keyword: "package",
        terminator: ";",
        open: None,
        close: None,
    },
    header: &["// automatically generated by fbgen, do not modify"],
    includes: &[
        "import java.nio.*;",
        "import java.lang.*;",
        "import java.util.*;",
        "import com.google.flatbuffers.*;",
    ],
    nullable_import: Some("import javax.annotation.Nullable;"),
    nullable_annotation: Some("@Nullable"),
    class_annotation: Some("@SuppressWarnings(\"unused\")"),
    generated_annotation: Some("@javax.annotation.Generated(value=\"fbgen\")"),
    type_close: "}",
    final_keyword: "final",
    accessor_prefix: "",
    static_prefix: "",
    optional_suffix: "",
    bb_position: "position()",
    bb_length: "capacity()",
    builder_offset: "offset()",
    byte_order_preamble: Some("_bb.order(ByteOrder.LITTLE_ENDIAN)"),
    constants_class: "Constants",
    private_visibility: Visibility::Package,
    floats: FloatSpelling {
        double_class: "Double",
        float_class: "Float",
        nan: "NaN",
        positive_infinity: "POSITIVE_INFINITY",
        negative_infinity: "NEGATIVE_INFINITY",
    },
    scalar_keyword: java_keyword,
    refs: ReferenceNames {
        string_offset: "int",
        vector_offset: "int",
        union_table: "Table",
    },
    widening: JAVA_WIDENING,
    has_unsigned_64: false,
    long_suffix: "L",
    utf8_key: "key.getBytes(Table.UTF8_CHARSET.get())",
    key_buffer: "_bb",
    count_member: "length",
    array_length_member: "length",
    comparator: ComparatorStyle::Ternary,
    key_sort: KeySort::Override,
    byte_access: ByteAccess::ByteBuffer,
    caps: Capabilities {
        native_enums: false,
        properties: false,
        object_reuse: true,
        generic_offsets: false,
        value_type_accessors: false,
        generic_unions: false,
        default_params: false,
        inline_struct_create: false,
        deep_clone: false,
        union_helpers: false,
        collection_wrappers: false,
        block_copy: false,
        enum_includes: false,
        typed_defaults: false,
        narrow_literals: true,
        open_brace_newline: false,
    },
};

pub const CSHARP: BackendProfile = BackendProfile {
    name: "csharp",
    file_extension: "cs",
    first_camel_upper: true,
    string_type: "string",
    bool_type: "bool",
    doc: DocStyle {
        start: None,
        line: "///",
        end: None,
    },
    namespace: NamespaceStyle {
        keyword: "namespace",
        terminator: "",
        open: Some("{"),
        close: Some("}"),
    },
    header: &[
        "// <auto-generated>",
        "//  automatically generated by fbgen, do not modify",
        "// </auto-generated>",
    ],
    includes: &[
        "using global::System;",
        "using global::System.Collections.Generic;",
        "using global::FlatBuffers;",
    ],
    nullable_import: None,
    nullable_annotation: None,
    class_annotation: None,
    generated_annotation: None,
    type_close: "};",
    final_keyword: "readonly",
    accessor_prefix: "__p.",
    static_prefix: "Table.",
    optional_suffix: "?",
    bb_position: "Position",
    bb_length: "Length",
    builder_offset: "Offset",
    byte_order_preamble: None,
    constants_class: "FlatBufferConstants",
    private_visibility: Visibility::Internal,
    floats: FloatSpelling {
        double_class: "Double",
        float_class: "Single",
        nan: "NaN",
        positive_infinity: "PositiveInfinity",
        negative_infinity: "NegativeInfinity",
    },
    scalar_keyword: csharp_keyword,
    refs: ReferenceNames {
        string_offset: "StringOffset",
        vector_offset: "VectorOffset",
        union_table: "TTable",
    },
    widening: &[],
    has_unsigned_64: true,
    long_suffix: "",
    utf8_key: "System.Text.Encoding.UTF8.GetBytes(key)",
    key_buffer: "builder.DataBuffer",
    count_member: "Count",
    array_length_member: "Length",
    comparator: ComparatorStyle::CompareTo,
    key_sort: KeySort::Static,
    byte_access: ByteAccess::SpanOrSegment,
    caps: Capabilities {
        native_enums: true,
        properties: true,
        object_reuse: false,
        generic_offsets: true,
        value_type_accessors: true,
        generic_unions: true,
        default_params: true,
        inline_struct_create: true,
        deep_clone: true,
        union_helpers: true,
        collection_wrappers: true,
        block_copy: true,
        enum_includes: true,
        typed_defaults: true,
        narrow_literals: false,
        open_brace_newline: true,
    },
};
